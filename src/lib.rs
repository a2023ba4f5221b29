#![warn(missing_debug_implementations, missing_docs, rust_2018_idioms)]

//! Regular expressions for the grammars of URIs and IRIs, with parsing,
//! composition and reference resolution.
//!
//! The rule names of [RFC 3986, Appendix A] and [RFC 3987, Section 2.2]
//! (with `-` replaced by `_`) are expanded into ground patterns in which the
//! components are captured by name. On top of them this crate provides:
//!
//! - [`parse`]: validation against any rule, and decomposition into
//!   [`Components`].
//! - [`compose`]: the inverse of parsing, per [Section 5.3 of RFC 3986].
//! - [`resolve`]: reference resolution, per [Section 5.2 of RFC 3986].
//!
//! [RFC 3986, Appendix A]: https://datatracker.ietf.org/doc/html/rfc3986/#appendix-A
//! [RFC 3987, Section 2.2]: https://datatracker.ietf.org/doc/html/rfc3987/#section-2.2
//! [Section 5.3 of RFC 3986]: https://datatracker.ietf.org/doc/html/rfc3986/#section-5.3
//! [Section 5.2 of RFC 3986]: https://datatracker.ietf.org/doc/html/rfc3986/#section-5.2
//!
//! # Examples
//!
//! ```
//! use iri_rules::{parse, resolve};
//!
//! let c = parse("http://user@example.com:8080/a/b?q#f", "URI")?;
//! assert_eq!(c.scheme.as_deref(), Some("http"));
//! assert_eq!(c.authority.as_deref(), Some("user@example.com:8080"));
//! assert_eq!(c.userinfo.as_deref(), Some("user"));
//! assert_eq!(c.host.as_deref(), Some("example.com"));
//! assert_eq!(c.port.as_deref(), Some("8080"));
//! assert_eq!(c.path.as_deref(), Some("/a/b"));
//! assert_eq!(c.query.as_deref(), Some("q"));
//! assert_eq!(c.fragment.as_deref(), Some("f"));
//! assert_eq!(c.compose(), "http://user@example.com:8080/a/b?q#f");
//!
//! assert!(parse("#f#g", "relative_ref").is_err());
//!
//! assert_eq!(resolve("http://a/b/c/d;p?q", "../g")?, "http://a/b/g");
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```
//!
//! # Feature flags
//!
//! - `serde`: Derives `Serialize` and `Deserialize` for [`Components`].
//!
//! - `cli`: Builds the `iri-rules` binary, which prints rule names and patterns.

mod component;
pub mod error;
mod fmt;
mod grammar;
mod matcher;
pub mod resolve;

pub use component::{compose, AsComponents, Components};
pub use error::{CompileError, GrammarError, ParseError, ResolveError};
pub use grammar::{format_patterns, patterns, Capture, CaptureConfig, Pattern, Patterns};
pub use matcher::{get_compiled_pattern, parse, split, Flags, GroupMap, Matcher};
pub use resolve::{resolve, resolve_parts, Resolver};
