//! Host name list input from files or stdin.

use std::path::Path;

use tokio::io::AsyncReadExt;

use crate::error_handling::DiscoveryError;

/// Splits text on whitespace and commas, dropping empty entries.
pub fn split_hostnames(text: &str) -> Vec<String> {
    text.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Reads a host name list from `path`, or from stdin when `path` is `-`.
pub async fn read_hostnames(path: &Path) -> Result<Vec<String>, DiscoveryError> {
    let display = path.display().to_string();
    let io_error = |source| DiscoveryError::Io {
        path: display.clone(),
        source,
    };

    let text = if path == Path::new("-") {
        let mut text = String::new();
        tokio::io::stdin()
            .read_to_string(&mut text)
            .await
            .map_err(io_error)?;
        text
    } else {
        tokio::fs::read_to_string(path).await.map_err(io_error)?
    };

    Ok(split_hostnames(&text))
}

/// Expands `-` in a list of CLI values into the whitespace/comma separated
/// entries read from stdin.
pub async fn expand_stdin_values(values: &[String]) -> Result<Vec<String>, DiscoveryError> {
    if values.len() == 1 && values[0] == "-" {
        read_hostnames(Path::new("-")).await
    } else {
        Ok(values
            .iter()
            .flat_map(|value| split_hostnames(value))
            .collect())
    }
}
