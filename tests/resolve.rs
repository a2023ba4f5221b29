use iri_rules::{
    error::ParseErrorKind,
    resolve::{resolve, resolve_parts, Resolver},
    Components, ResolveError,
};

trait Test {
    fn pass(&self, r: &str, res: &str);
    fn fail(&self, r: &str) -> ResolveError;
}

impl Test for Resolver {
    #[track_caller]
    fn pass(&self, r: &str, expected: &str) {
        assert_eq!(self.resolve(r).unwrap(), expected);
    }

    #[track_caller]
    fn fail(&self, r: &str) -> ResolveError {
        self.resolve(r).unwrap_err()
    }
}

#[test]
fn resolve_normal() {
    // Examples from Section 5.4.1 of RFC 3986.
    let base = Resolver::with_base("http://a/b/c/d;p?q").unwrap();

    base.pass("g:h", "g:h");
    base.pass("g", "http://a/b/c/g");
    base.pass("./g", "http://a/b/c/g");
    base.pass("g/", "http://a/b/c/g/");
    base.pass("/g", "http://a/g");
    base.pass("//g", "http://g");
    base.pass("?y", "http://a/b/c/d;p?y");
    base.pass("g?y", "http://a/b/c/g?y");
    base.pass("#s", "http://a/b/c/d;p?q#s");
    base.pass("g#s", "http://a/b/c/g#s");
    base.pass("g?y#s", "http://a/b/c/g?y#s");
    base.pass(";x", "http://a/b/c/;x");
    base.pass("g;x", "http://a/b/c/g;x");
    base.pass("g;x?y#s", "http://a/b/c/g;x?y#s");
    base.pass("", "http://a/b/c/d;p?q");
    base.pass(".", "http://a/b/c/");
    base.pass("./", "http://a/b/c/");
    base.pass("..", "http://a/b/");
    base.pass("../", "http://a/b/");
    base.pass("../g", "http://a/b/g");
    base.pass("../..", "http://a/");
    base.pass("../../", "http://a/");
    base.pass("../../g", "http://a/g");
}

#[test]
fn resolve_abnormal() {
    // Examples from Section 5.4.2 of RFC 3986.
    let base = Resolver::with_base("http://a/b/c/d;p?q").unwrap();

    base.pass("../../../g", "http://a/g");
    base.pass("../../../../g", "http://a/g");

    base.pass("/./g", "http://a/g");
    base.pass("/../g", "http://a/g");
    base.pass("g.", "http://a/b/c/g.");
    base.pass(".g", "http://a/b/c/.g");
    base.pass("g..", "http://a/b/c/g..");
    base.pass("..g", "http://a/b/c/..g");

    base.pass("./../g", "http://a/b/g");
    base.pass("./g/.", "http://a/b/c/g/");
    base.pass("g/./h", "http://a/b/c/g/h");
    base.pass("g/../h", "http://a/b/c/h");
    base.pass("g;x=1/./y", "http://a/b/c/g;x=1/y");
    base.pass("g;x=1/../y", "http://a/b/c/y");

    base.pass("g?y/./x", "http://a/b/c/g?y/./x");
    base.pass("g?y/../x", "http://a/b/c/g?y/../x");
    base.pass("g#s/./x", "http://a/b/c/g#s/./x");
    base.pass("g#s/../x", "http://a/b/c/g#s/../x");

    base.pass("http:g", "http:g");
    base.clone().strict(false).pass("http:g", "http://a/b/c/g");
}

#[test]
fn strict_only_matters_for_the_same_scheme() {
    let strict = Resolver::with_base("http://a/b/c/d;p?q").unwrap();
    let lax = strict.clone().strict(false);

    for r in ["g:h", "https:g", "ftp://x/y", "g", "../g", "", "#s"] {
        assert_eq!(strict.resolve(r).unwrap(), lax.resolve(r).unwrap(), "{r}");
    }
    assert_ne!(strict.resolve("http:g").unwrap(), lax.resolve("http:g").unwrap());
    // Only a textually equal scheme counts.
    assert_eq!(lax.resolve("HTTP:g").unwrap(), "HTTP:g");
    // Same scheme with an authority resolves to the same target either way.
    assert_eq!(lax.resolve("http://x/./y").unwrap(), "http://x/y");
    assert_eq!(strict.resolve("http://x/./y").unwrap(), "http://x/y");
}

#[test]
fn resolve_other_bases() {
    let base = Resolver::with_base("http://a").unwrap();
    base.pass("g", "http://a/g");
    base.pass("../g", "http://a/g");
    base.pass("?q", "http://a?q");
    base.pass("", "http://a");

    // No authority: the last segment of a rootless path is replaced.
    let base = Resolver::with_base("foo:bar/baz").unwrap();
    base.pass("qux", "foo:bar/qux");
    base.pass("#x", "foo:bar/baz#x");

    let base = Resolver::with_base("mailto:John.Doe@example.com").unwrap();
    base.pass("#top", "mailto:John.Doe@example.com#top");
    base.pass("Jane.Doe@example.com", "mailto:Jane.Doe@example.com");

    // The base fragment never carries over.
    let base = Resolver::with_base("http://a/b?q#f").unwrap();
    base.pass("", "http://a/b?q");
    base.pass("#g", "http://a/b?q#g");

    // Dot segments in a scheme-bearing reference are removed.
    let base = Resolver::with_base("http://a/b").unwrap();
    base.pass("ftp://x/a/./b/../c", "ftp://x/a/c");
}

#[test]
fn resolve_iri() {
    let base = Resolver::with_base("http://例え.jp/ä/ö/ü?クエリ").unwrap();
    base.pass("../言葉", "http://例え.jp/ä/言葉");
    base.pass("", "http://例え.jp/ä/ö/ü?クエリ");
    base.pass("#断片", "http://例え.jp/ä/ö/ü?クエリ#断片");
    base.pass("//例/./x", "http://例/x");
}

#[test]
fn resolve_parts_returns_components() {
    let t = resolve_parts("http://u@a:8/b/c", "d?x#y").unwrap();
    assert_eq!(t.scheme.as_deref(), Some("http"));
    assert_eq!(t.authority.as_deref(), Some("u@a:8"));
    assert_eq!(t.userinfo.as_deref(), Some("u"));
    assert_eq!(t.host.as_deref(), Some("a"));
    assert_eq!(t.port.as_deref(), Some("8"));
    assert_eq!(t.path.as_deref(), Some("/b/d"));
    assert_eq!(t.query.as_deref(), Some("x"));
    assert_eq!(t.fragment.as_deref(), Some("y"));

    let t = resolve_parts("http://a/b", "//c").unwrap();
    assert_eq!(t.host.as_deref(), Some("c"));
    assert_eq!(t.path.as_deref(), Some(""));
    assert_eq!(t.query, None);
}

#[test]
fn resolve_components() {
    let base = Components {
        scheme: Some("http".into()),
        authority: Some("a".into()),
        path: Some("/b/c/d;p".into()),
        query: Some("q".into()),
        ..Default::default()
    };
    let reference = Components {
        path: Some("../g".into()),
        ..Default::default()
    };
    assert_eq!(resolve(&base, &reference).unwrap(), "http://a/b/g");
    assert_eq!(resolve(&base, "").unwrap(), "http://a/b/c/d;p?q");

    // A reference without a path is resolved like an empty one.
    assert_eq!(
        resolve(&base, &Components::default()).unwrap(),
        "http://a/b/c/d;p?q"
    );
}

#[test]
fn resolve_errors() {
    // A well-formed base without a scheme.
    assert_eq!(resolve("//a/b/c", "g").unwrap_err(), ResolveError::MissingScheme);
    assert_eq!(resolve("/a/b", "g:h").unwrap_err(), ResolveError::MissingScheme);
    assert_eq!(
        Resolver::with_base(&Components::default()).unwrap_err(),
        ResolveError::MissingScheme
    );

    match resolve("http://a b/", "g").unwrap_err() {
        ResolveError::InvalidBase(e) => {
            assert_eq!(e.kind(), ParseErrorKind::NoMatch);
            assert_eq!(e.input(), "http://a b/");
        }
        e => panic!("unexpected error: {e}"),
    }

    let base = Resolver::with_base("http://a/b/c/d;p?q").unwrap();
    match base.fail("#f#g") {
        ResolveError::InvalidReference(e) => assert_eq!(e.rule(), "IRI_reference"),
        e => panic!("unexpected error: {e}"),
    }
    assert!(matches!(base.fail("g h"), ResolveError::InvalidReference(_)));
    // The base is checked before the reference.
    assert_eq!(resolve("g", "#f#g").unwrap_err(), ResolveError::MissingScheme);
}

#[test]
fn resolve_error_messages() {
    assert_eq!(
        resolve("//a", "g").unwrap_err().to_string(),
        "base has no scheme"
    );
    assert_eq!(
        resolve("http://a", "%").unwrap_err().to_string(),
        "invalid reference: input is not a valid `IRI_reference`: \"%\""
    );
}
