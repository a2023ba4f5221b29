use iri_rules::{compose, parse, split, Components};

fn c() -> Components {
    Components::default()
}

#[test]
fn compose_markers() {
    assert_eq!(compose(&c()), "");

    let cases = [
        (
            Components {
                scheme: Some("s".into()),
                ..c()
            },
            "s:",
        ),
        (
            Components {
                authority: Some("".into()),
                ..c()
            },
            "//",
        ),
        (
            Components {
                path: Some("".into()),
                ..c()
            },
            "",
        ),
        (
            Components {
                query: Some("".into()),
                ..c()
            },
            "?",
        ),
        (
            Components {
                fragment: Some("".into()),
                ..c()
            },
            "#",
        ),
        (
            Components {
                scheme: Some("http".into()),
                authority: Some("a".into()),
                path: Some("/b".into()),
                query: Some("q".into()),
                fragment: Some("f".into()),
                ..c()
            },
            "http://a/b?q#f",
        ),
    ];
    for (components, expected) in cases {
        assert_eq!(compose(&components), expected, "{components:?}");
    }
}

#[test]
fn compose_ignores_authority_subcomponents() {
    let components = Components {
        authority: Some("a".into()),
        userinfo: Some("u".into()),
        host: Some("h".into()),
        port: Some("1".into()),
        ..c()
    };
    assert_eq!(components.compose(), "//a");
}

#[test]
fn compose_does_not_validate() {
    let components = Components {
        scheme: Some("not a scheme".into()),
        path: Some("#".into()),
        ..c()
    };
    assert_eq!(components.compose(), "not a scheme:#");
    assert_eq!(components.to_string(), components.compose());
}

#[test]
fn round_trip() {
    let cases = [
        ("http://a/b/c/d;p?q", "URI"),
        ("foo://@:?#", "URI"),
        ("file:///etc/hosts", "URI"),
        ("mailto:John.Doe@example.com", "URI"),
        ("//example.org/x?", "relative_ref"),
        ("?#", "relative_ref"),
        ("", "URI_reference"),
        ("../g;x=1", "URI_reference"),
        ("http://[2001:db8::7]/c=GB?objectClass?one", "URI"),
        ("https://ä.example/日本語?ö#ü", "IRI"),
        ("ö/ü", "IRI_reference"),
    ];
    for (s, rule) in cases {
        let components = parse(s, rule).unwrap();
        assert_eq!(compose(&components), s, "{rule}");
    }
}

#[test]
fn split_round_trip() {
    for s in ["http://a b/c?d#e", "::", "?#", "a#b#c", "//", "x:/\n"] {
        assert_eq!(split(s).compose(), s);
    }
}
