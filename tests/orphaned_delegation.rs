//! Orphaned-delegation check against an in-memory DNS oracle.

mod helpers;

use helpers::{healthy_delegation, soa, FakeDns, Zone};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use subdomain_scanner::{
    check_orphaned_delegation, DnsError, ReasonCode, SafeNameserverList, ScanError, Severity,
};

const HOST: &str = "app.example.com";

fn safe_list(ipv4: &[&str], ipv6: &[&str]) -> SafeNameserverList {
    SafeNameserverList::from_entries(ipv4, ipv6).expect("valid safe list")
}

#[tokio::test]
async fn test_nxdomain_on_ns_is_not_delegated() {
    let dns = FakeDns::new(Zone::new().ns_error(HOST, DnsError::NxDomain));
    let finding = check_orphaned_delegation(HOST, &dns, None).await.unwrap();
    assert!(!finding.vulnerable());
    assert_eq!(finding.reason_code(), ReasonCode::HostnameNotDelegated);
    assert!(finding.reason().contains(HOST));
}

#[tokio::test]
async fn test_empty_ns_answer_is_not_delegated() {
    let dns = FakeDns::new(Zone::new().ns(HOST, &[]));
    let finding = check_orphaned_delegation(HOST, &dns, None).await.unwrap();
    assert_eq!(finding.reason_code(), ReasonCode::HostnameNotDelegated);
}

#[tokio::test]
async fn test_matching_soa_everywhere_is_not_vulnerable() {
    let first = Ipv4Addr::new(192, 0, 2, 1);
    let second = Ipv4Addr::new(192, 0, 2, 2);
    let record = soa("ns1.example.net", 7);
    let zone = Zone::new()
        .ns(HOST, &["ns1.example.net", "ns2.example.net"])
        .a("ns1.example.net", first)
        .a("ns2.example.net", second)
        .soa(HOST, record.clone())
        .soa_at(IpAddr::V4(first), HOST, record.clone())
        .soa_at(IpAddr::V4(second), HOST, record);
    let dns = FakeDns::new(zone);

    let finding = check_orphaned_delegation(HOST, &dns, None).await.unwrap();
    assert!(!finding.vulnerable());
    assert_eq!(finding.reason_code(), ReasonCode::HostnameNotVulnerable);
    assert_eq!(finding.severity(), None);
    assert_eq!(
        dns.directed_upstreams(),
        vec![IpAddr::V4(first), IpAddr::V4(second)]
    );
}

#[tokio::test]
async fn test_unresolvable_nameserver_is_high() {
    let zone = Zone::new()
        .ns(HOST, &["ns1.expired-dns.example"])
        .a_error("ns1.expired-dns.example", DnsError::NxDomain);
    let dns = FakeDns::new(zone);

    let finding = check_orphaned_delegation(HOST, &dns, None).await.unwrap();
    assert!(finding.vulnerable());
    assert_eq!(finding.reason_code(), ReasonCode::NsDoesntResolve);
    assert_eq!(finding.severity(), Some(Severity::High));
    assert!(finding.reason().contains("ns1.expired-dns.example"));
    assert!(dns.directed_upstreams().is_empty());
}

#[tokio::test]
async fn test_ip_literal_nameserver_without_safe_list() {
    let dns = FakeDns::new(Zone::new().ns(HOST, &["203.0.113.10"]));
    let finding = check_orphaned_delegation(HOST, &dns, None).await.unwrap();
    assert!(finding.vulnerable());
    assert_eq!(finding.reason_code(), ReasonCode::IpNsDoesntResolve);
    assert_eq!(finding.severity(), Some(Severity::High));
}

#[tokio::test]
async fn test_safe_list_flips_ip_literal_finding() {
    let dns = FakeDns::new(Zone::new().ns(HOST, &["203.0.113.10"]));
    let covering = safe_list(&["203.0.113.0/24"], &[]);
    let unrelated = safe_list(&["198.51.100.0/24"], &[]);

    for _ in 0..2 {
        let finding = check_orphaned_delegation(HOST, &dns, Some(&covering))
            .await
            .unwrap();
        assert!(!finding.vulnerable());
        assert_eq!(finding.reason_code(), ReasonCode::IpNsOnV4SafeList);

        let finding = check_orphaned_delegation(HOST, &dns, Some(&unrelated))
            .await
            .unwrap();
        assert!(finding.vulnerable());
        assert_eq!(finding.reason_code(), ReasonCode::IpNsDoesntResolve);
    }
}

#[tokio::test]
async fn test_ipv6_literal_on_safe_list() {
    let dns = FakeDns::new(Zone::new().ns(HOST, &["2001:db8::53"]));
    let list = safe_list(&[], &["2001:db8::/32"]);
    let finding = check_orphaned_delegation(HOST, &dns, Some(&list))
        .await
        .unwrap();
    assert!(!finding.vulnerable());
    assert_eq!(finding.reason_code(), ReasonCode::IpNsOnV6SafeList);
}

#[tokio::test]
async fn test_ipv4_safe_list_does_not_cover_ipv6_literal() {
    let dns = FakeDns::new(Zone::new().ns(HOST, &["2001:db8::53"]));
    let list = safe_list(&["0.0.0.0/0"], &[]);
    let finding = check_orphaned_delegation(HOST, &dns, Some(&list))
        .await
        .unwrap();
    assert_eq!(finding.reason_code(), ReasonCode::IpNsDoesntResolve);
}

#[tokio::test]
async fn test_nameserver_nxdomain_on_soa_is_medium() {
    let address = Ipv4Addr::new(192, 0, 2, 53);
    let zone = Zone::new()
        .ns(HOST, &["ns.lame.example"])
        .a("ns.lame.example", address)
        .soa_error_at(IpAddr::V4(address), HOST, DnsError::NxDomain);
    let dns = FakeDns::new(zone);

    let finding = check_orphaned_delegation(HOST, &dns, None).await.unwrap();
    assert!(finding.vulnerable());
    assert_eq!(finding.reason_code(), ReasonCode::NsHasNoSoa);
    assert_eq!(finding.severity(), Some(Severity::Medium));
}

#[tokio::test]
async fn test_nameserver_servfail_on_soa_is_high() {
    let address = Ipv4Addr::new(192, 0, 2, 53);
    let zone = Zone::new()
        .ns(HOST, &["ns.lame.example"])
        .a("ns.lame.example", address)
        .soa_error_at(IpAddr::V4(address), HOST, DnsError::ServFail);
    let dns = FakeDns::new(zone);

    let finding = check_orphaned_delegation(HOST, &dns, None).await.unwrap();
    assert_eq!(finding.reason_code(), ReasonCode::NsHasNoRecords);
    assert_eq!(finding.severity(), Some(Severity::High));
}

#[tokio::test]
async fn test_mismatched_soa_is_medium() {
    let address = Ipv4Addr::new(192, 0, 2, 53);
    let zone = Zone::new()
        .ns(HOST, &["ns.other-tenant.example"])
        .a("ns.other-tenant.example", address)
        .soa(HOST, soa("ns1.example.net", 10))
        .soa_at(IpAddr::V4(address), HOST, soa("ns.other-tenant.example", 1));
    let dns = FakeDns::new(zone);

    let finding = check_orphaned_delegation(HOST, &dns, None).await.unwrap();
    assert!(finding.vulnerable());
    assert_eq!(finding.reason_code(), ReasonCode::NsHasMismatchedSoa);
    assert_eq!(finding.severity(), Some(Severity::Medium));
}

#[tokio::test]
async fn test_first_broken_nameserver_short_circuits() {
    let healthy = Ipv4Addr::new(192, 0, 2, 1);
    let record = soa("ns1.example.net", 3);
    let zone = Zone::new()
        .ns(HOST, &["ns1.example.net", "ns2.gone.example", "ns3.example.net"])
        .a("ns1.example.net", healthy)
        .a("ns3.example.net", Ipv4Addr::new(192, 0, 2, 3))
        .soa(HOST, record.clone())
        .soa_at(IpAddr::V4(healthy), HOST, record);
    let dns = FakeDns::new(zone);

    let finding = check_orphaned_delegation(HOST, &dns, None).await.unwrap();
    assert_eq!(finding.reason_code(), ReasonCode::NsDoesntResolve);
    assert!(finding.reason().contains("ns2.gone.example"));
    // ns3 is never queried directly
    assert_eq!(dns.directed_upstreams(), vec![IpAddr::V4(healthy)]);
}

#[tokio::test]
async fn test_ipv6_only_nameserver_is_queried_over_ipv6() {
    let address = Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 0x53);
    let record = soa("ns6.example.net", 1);
    let zone = Zone::new()
        .ns(HOST, &["ns6.example.net"])
        .a_error("ns6.example.net", DnsError::NoData)
        .aaaa("ns6.example.net", address)
        .soa(HOST, record.clone())
        .soa_at(IpAddr::V6(address), HOST, record);
    let dns = FakeDns::new(zone);

    let finding = check_orphaned_delegation(HOST, &dns, None).await.unwrap();
    assert_eq!(finding.reason_code(), ReasonCode::HostnameNotVulnerable);
    assert_eq!(dns.directed_upstreams(), vec![IpAddr::V6(address)]);
}

#[tokio::test]
async fn test_ns_servfail_and_nodata() {
    let dns = FakeDns::new(Zone::new().ns_error(HOST, DnsError::ServFail));
    let finding = check_orphaned_delegation(HOST, &dns, None).await.unwrap();
    assert!(!finding.vulnerable());
    assert_eq!(finding.reason_code(), ReasonCode::HostnameNsServfail);

    let dns = FakeDns::new(Zone::new().ns_error(HOST, DnsError::NoData));
    let finding = check_orphaned_delegation(HOST, &dns, None).await.unwrap();
    assert_eq!(finding.reason_code(), ReasonCode::HostnameHasNoNs);
}

#[tokio::test]
async fn test_transport_failure_is_hard_error() {
    let dns = FakeDns::new(
        Zone::new().ns_error(HOST, DnsError::Transport("network unreachable".into())),
    );
    let result = check_orphaned_delegation(HOST, &dns, None).await;
    assert!(matches!(result, Err(ScanError::Dns { .. })));
}

#[tokio::test]
async fn test_invalid_hostname_is_rejected() {
    let dns = FakeDns::new(Zone::new());
    let result = check_orphaned_delegation("bad..example.com", &dns, None).await;
    assert!(matches!(result, Err(ScanError::InvalidHostname { .. })));
}

#[tokio::test]
async fn test_hostname_is_normalized_before_lookup() {
    let dns = FakeDns::new(healthy_delegation(
        HOST,
        "ns1.example.net",
        Ipv4Addr::new(192, 0, 2, 1),
    ));
    let finding = check_orphaned_delegation("App.Example.COM.", &dns, None)
        .await
        .unwrap();
    assert_eq!(finding.reason_code(), ReasonCode::HostnameNotVulnerable);
}

#[tokio::test]
async fn test_unanswered_ns_lookup_counts_as_servfail() {
    for error in [DnsError::Timeout, DnsError::Refused] {
        let dns = FakeDns::new(Zone::new().ns_error(HOST, error.clone()));
        let finding = check_orphaned_delegation(HOST, &dns, None).await.unwrap();
        assert!(!finding.vulnerable());
        assert_eq!(
            finding.reason_code(),
            ReasonCode::HostnameNsServfail,
            "NS lookup error {error}"
        );
    }
}

#[tokio::test]
async fn test_reason_texts() {
    let dns = FakeDns::new(Zone::new().ns(HOST, &[]));
    let finding = check_orphaned_delegation(HOST, &dns, None).await.unwrap();
    assert_eq!(finding.reason(), "app.example.com is not delegated");

    let dns = FakeDns::new(
        Zone::new()
            .ns(HOST, &["ns1.expired-dns.example"])
            .a_error("ns1.expired-dns.example", DnsError::ServFail),
    );
    let finding = check_orphaned_delegation(HOST, &dns, None).await.unwrap();
    assert_eq!(
        finding.reason(),
        "Nameserver ns1.expired-dns.example does not resolve"
    );
}

#[tokio::test]
async fn test_ipv6_safe_list_does_not_cover_ipv4_literal() {
    let dns = FakeDns::new(Zone::new().ns(HOST, &["203.0.113.5"]));
    let list = safe_list(&[], &["::/0"]);
    let finding = check_orphaned_delegation(HOST, &dns, Some(&list))
        .await
        .unwrap();
    assert_eq!(finding.reason_code(), ReasonCode::IpNsDoesntResolve);
}

#[tokio::test]
async fn test_directed_soa_error_outcomes() {
    let address = Ipv4Addr::new(192, 0, 2, 53);
    for (error, expected) in [
        (DnsError::Timeout, ReasonCode::NsHasNoRecords),
        // Not decisive: the remaining checks run and pass
        (DnsError::Refused, ReasonCode::HostnameNotVulnerable),
        (DnsError::NoData, ReasonCode::HostnameNotVulnerable),
    ] {
        let zone = Zone::new()
            .ns(HOST, &["ns.example.net"])
            .a("ns.example.net", address)
            .soa(HOST, soa("ns.example.net", 1))
            .soa_error_at(IpAddr::V4(address), HOST, error.clone());
        let dns = FakeDns::new(zone);
        let finding = check_orphaned_delegation(HOST, &dns, None).await.unwrap();
        assert_eq!(finding.reason_code(), expected, "directed SOA error {error}");
    }
}

#[tokio::test]
async fn test_main_soa_failures_map_to_hostname_codes() {
    let address = Ipv4Addr::new(192, 0, 2, 1);
    for (error, expected) in [
        (DnsError::NxDomain, ReasonCode::HostnameIsNxdomain),
        (DnsError::NoData, ReasonCode::HostnameHasNoNs),
        (DnsError::ServFail, ReasonCode::HostnameNsServfail),
    ] {
        let zone = Zone::new()
            .ns(HOST, &["ns1.example.net"])
            .a("ns1.example.net", address)
            .soa_at(IpAddr::V4(address), HOST, soa("ns1.example.net", 1))
            .soa_error(HOST, error.clone());
        let dns = FakeDns::new(zone);
        let finding = check_orphaned_delegation(HOST, &dns, None).await.unwrap();
        assert!(!finding.vulnerable());
        assert_eq!(finding.reason_code(), expected, "main SOA error {error}");
    }
}
