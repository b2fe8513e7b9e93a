//! Common subdomain prefixes used to expand wildcard certificate names.

/// Most frequent subdomain labels, in descending order of popularity.
pub const SUBDOMAIN_PREFIXES: &[&str] = &[
    "www", "mail", "ftp", "localhost", "webmail", "smtp", "webdisk", "pop", "cpanel", "whm",
    "ns1", "ns2", "autodiscover", "autoconfig", "ns", "test", "m", "blog", "dev", "www2", "ns3",
    "pop3", "forum", "admin", "mail2", "vpn", "mx", "imap", "old", "new", "mobile", "mysql",
    "beta", "support", "cp", "secure", "shop", "demo", "dns2", "ns4", "dns1", "static", "lists",
    "web", "www1", "img", "news", "portal", "server", "wiki", "api", "media", "images",
    "www.blog", "backup", "dns", "sql", "intranet", "www.forum", "www.test", "stats", "host",
    "video", "mail1", "mx1", "www3", "staging", "www.m", "sip", "chat", "search", "crm", "mx2",
    "ads", "ipv4", "remote", "email", "my", "wap", "svn", "store", "cms", "download", "proxy",
    "www.dev", "mssql", "apps", "dns3", "exchange", "mail3", "forums", "ns5", "db", "office",
    "live", "files", "info", "owa", "monitor", "helpdesk", "panel", "sms", "newsletter", "ftp2",
    "web1", "web2", "upload", "home", "bbs", "login", "app", "en", "blogs", "it", "cdn", "stage",
    "gw", "dns4", "www.demo", "ssl",
];
