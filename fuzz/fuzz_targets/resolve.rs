#![no_main]
use iri_rules::{parse, Resolver};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (&str, &str)| {
    let Ok(resolver) = Resolver::with_base(data.0) else {
        return;
    };
    let Ok(t) = resolver.resolve_parts(data.1) else {
        return;
    };

    let target = t.compose();
    assert!(parse(&target, "IRI").is_ok(), "{target}");
    assert!(t.scheme.is_some());

    // Resolution in lax mode differs only for references sharing the base's scheme.
    let lax = resolver.clone().strict(false).resolve_parts(data.1).unwrap();
    let r = parse(data.1, "IRI_reference").unwrap();
    if r.scheme.is_none() || r.scheme != resolver.base().scheme {
        assert_eq!(lax, t);
    }
});
