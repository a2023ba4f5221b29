use iri_rules::{get_compiled_pattern, parse, Flags};

fn valid(rule: &str, s: &str) -> bool {
    parse(s, rule).is_ok()
}

#[test]
fn parse_v4() {
    for s in ["0.0.0.0", "127.0.0.1", "192.0.2.16", "255.255.255.255", "10.199.249.9"] {
        assert!(valid("IPv4address", s), "{s}");
    }
    for s in [
        "",
        "256.0.0.0",
        "1.2.3.256",
        "01.2.3.4",
        "1.2.3.04",
        "1.2.3",
        "1.2.3.4.5",
        "1.2.3.-1",
        "1..2.3",
        "1.2.3.4 ",
    ] {
        assert!(!valid("IPv4address", s), "{s}");
    }
}

#[test]
fn parse_v6() {
    for s in [
        "::",
        "::1",
        "1::",
        "1:2:3:4:5:6:7:8",
        "1:2:3:4:5:6:7::",
        "::2:3:4:5:6:7:8",
        "1::8",
        "1:2::7:8",
        "1::2:3:4:5:6:7",
        "1:2::3:4:5:6:7",
        "1:2:3::4:5:6:7",
        "1:2:3:4:5:6:1.2.3.4",
        "::1.2.3.4",
        "::ffff:192.0.2.128",
        "1::1.2.3.4",
        "1:2:3:4:5::1.2.3.4",
        "FFFF:ffff::",
        "2001:db8::7",
        "fe80::abcd:ef01:2345:6789",
    ] {
        assert!(valid("IPv6address", s), "{s}");
    }
    for s in [
        "",
        ":",
        ":::",
        "1:2:3:4:5:6:7",
        "1:2:3:4:5:6:7:8:9",
        "1:2:3:4:5:6:7:8::",
        "::1:2:3:4:5:6:7:8",
        "1::2::3",
        "1:2:3:4:5:6::1.2.3.4",
        "12345::",
        "g::",
        "::1.2.3",
        "::256.0.0.1",
        "::01.2.3.4",
        "1.2.3.4",
        ":1::",
        "1:",
    ] {
        assert!(!valid("IPv6address", s), "{s}");
    }
}

#[test]
fn parse_ip_literal() {
    for s in ["[::1]", "[2001:db8::7]", "[v7.fe80::a+en1]", "[V1F.x]", "[::ffff:1.2.3.4]"] {
        assert!(valid("IP_literal", s), "{s}");
    }
    for s in ["::1", "[::1", "[v.abc]", "[v1.]", "[vg.x]", "[1.2.3.4]", "[::1%eth0]"] {
        assert!(!valid("IP_literal", s), "{s}");
    }
}

#[test]
fn host_kinds() {
    let c = parse("http://[::1]:8080/", "URI").unwrap();
    assert_eq!(c.host.as_deref(), Some("[::1]"));
    assert_eq!(c.port.as_deref(), Some("8080"));

    // Not an IPv4 address, but a valid registered name.
    let c = parse("http://256.1.1.1/", "URI").unwrap();
    assert_eq!(c.host.as_deref(), Some("256.1.1.1"));

    // An IP literal must be closed.
    assert!(parse("http://[::1/", "URI").is_err());
}

#[test]
fn ipv6_is_linear_on_long_input() {
    let m = get_compiled_pattern("^{IPv6address}$", Flags::new()).unwrap();
    let input = "1:".repeat(10_000);
    assert!(!m.is_match(&input));
}
