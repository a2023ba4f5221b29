#![no_main]
use iri_rules::{compose, parse};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let Ok(c) = parse(data, "IRI_reference") else {
        assert!(parse(data, "URI_reference").is_err());
        return;
    };
    assert_eq!(compose(&c), data);

    if let Some(authority) = &c.authority {
        let mut buf = String::with_capacity(authority.len());
        if let Some(userinfo) = &c.userinfo {
            buf.push_str(userinfo);
            buf.push('@');
        }
        buf.push_str(c.host.as_deref().unwrap());
        if let Some(port) = &c.port {
            buf.push(':');
            buf.push_str(port);
        }
        assert_eq!(&buf, authority);
    }

    if let Ok(u) = parse(data, "URI_reference") {
        assert_eq!(u, c);
    }
    assert_eq!(iri_rules::split(data).compose(), data);
});
