//! Module for reference resolution.

use crate::{
    component::{AsComponents, Components},
    error::ResolveError,
    matcher::{get_compiled_pattern, Flags},
};
use std::borrow::Cow;

/// Matches a segment followed by a `".."` segment, with the preceding slash.
const PARENT_SEGMENT: &str = r"/?{isegment}/\.\.(?:/|$)";

/// A configurable URI/IRI reference resolver against a fixed base.
///
/// # Examples
///
/// ```
/// use iri_rules::resolve::Resolver;
///
/// let resolver = Resolver::with_base("http://example.com/foo/bar")?;
///
/// assert_eq!(resolver.resolve("baz")?, "http://example.com/foo/baz");
/// assert_eq!(resolver.resolve("../baz")?, "http://example.com/baz");
/// assert_eq!(resolver.resolve("?baz")?, "http://example.com/foo/bar?baz");
/// # Ok::<_, iri_rules::ResolveError>(())
/// ```
#[derive(Clone, Debug)]
#[must_use]
pub struct Resolver {
    base: Components,
    strict: bool,
}

impl Resolver {
    /// Creates a new `Resolver` with the given base.
    ///
    /// A string base is parsed as an IRI reference and must have a scheme.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the base is not a valid IRI reference or has no scheme.
    pub fn with_base<B: AsComponents + ?Sized>(base: &B) -> Result<Self, ResolveError> {
        let base = base
            .as_components("IRI_reference")
            .map_err(ResolveError::InvalidBase)?;
        if base.scheme.is_none() {
            return Err(ResolveError::MissingScheme);
        }
        Ok(Resolver {
            base: base.into_owned(),
            strict: true,
        })
    }

    /// Sets whether a reference with a scheme always overrides the base.
    ///
    /// This defaults to `true`. With `false`, a reference whose scheme is
    /// identical to the base's is resolved as if it had no scheme, for
    /// backward compatibility with parsers that do so
    /// ([Section 5.2.2 of RFC 3986](https://datatracker.ietf.org/doc/html/rfc3986/#section-5.2.2)).
    ///
    /// # Examples
    ///
    /// ```
    /// use iri_rules::resolve::Resolver;
    ///
    /// let resolver = Resolver::with_base("http://a/b/c/d;p?q")?;
    /// assert_eq!(resolver.resolve("http:g")?, "http:g");
    /// assert_eq!(resolver.strict(false).resolve("http:g")?, "http://a/b/c/g");
    /// # Ok::<_, iri_rules::ResolveError>(())
    /// ```
    pub fn strict(mut self, value: bool) -> Self {
        self.strict = value;
        self
    }

    /// Returns the base components.
    #[must_use]
    pub fn base(&self) -> &Components {
        &self.base
    }

    /// Resolves the given reference against the configured base.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the reference is not a valid IRI reference.
    pub fn resolve<R: AsComponents + ?Sized>(&self, reference: &R) -> Result<String, ResolveError> {
        self.resolve_parts(reference).map(|t| t.compose())
    }

    /// Resolves the given reference and returns the target's components.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the reference is not a valid IRI reference.
    pub fn resolve_parts<R: AsComponents + ?Sized>(
        &self,
        reference: &R,
    ) -> Result<Components, ResolveError> {
        let r = reference
            .as_components("IRI_reference")
            .map_err(ResolveError::InvalidReference)?;

        let mut t = merge(&self.base, &r, self.strict);
        if let Some(path) = &mut t.path {
            *path = remove_dot_segments(path);
        }
        Ok(t)
    }
}

/// Resolves a reference against a base.
///
/// This is [`Resolver::resolve`] in strict mode.
///
/// # Errors
///
/// Returns `Err` if the base is invalid or has no scheme, or if the
/// reference is invalid.
///
/// # Examples
///
/// ```
/// use iri_rules::resolve;
///
/// let base = "http://a/b/c/d;p?q";
/// assert_eq!(resolve(base, "g;x=1/../y")?, "http://a/b/c/y");
/// assert_eq!(resolve(base, "../../../g")?, "http://a/g");
/// # Ok::<_, iri_rules::ResolveError>(())
/// ```
pub fn resolve<B, R>(base: &B, reference: &R) -> Result<String, ResolveError>
where
    B: AsComponents + ?Sized,
    R: AsComponents + ?Sized,
{
    Resolver::with_base(base)?.resolve(reference)
}

/// Resolves a reference against a base and returns the target's components.
///
/// This is [`Resolver::resolve_parts`] in strict mode.
///
/// # Errors
///
/// Returns `Err` on the same conditions as [`resolve`].
pub fn resolve_parts<B, R>(base: &B, reference: &R) -> Result<Components, ResolveError>
where
    B: AsComponents + ?Sized,
    R: AsComponents + ?Sized,
{
    Resolver::with_base(base)?.resolve_parts(reference)
}

fn merge(base: &Components, r: &Components, strict: bool) -> Components {
    if r.scheme.is_some() && (strict || r.scheme != base.scheme) {
        return r.clone();
    }

    let mut t = Components {
        scheme: base.scheme.clone(),
        ..Components::default()
    };

    if r.authority.is_some() {
        take_authority(&mut t, r);
        t.path = r.path.clone();
        t.query = r.query.clone();
    } else {
        take_authority(&mut t, base);
        match r.path.as_deref() {
            Some(r_path) if !r_path.is_empty() => {
                t.path = Some(merge_paths(base, r_path));
                t.query = r.query.clone();
            }
            _ => {
                t.path = base.path.clone();
                t.query = if r.query.is_some() {
                    r.query.clone()
                } else {
                    base.query.clone()
                };
            }
        }
    }
    t.fragment = r.fragment.clone();
    t
}

fn take_authority(t: &mut Components, from: &Components) {
    t.authority = from.authority.clone();
    t.userinfo = from.userinfo.clone();
    t.host = from.host.clone();
    t.port = from.port.clone();
}

fn merge_paths(base: &Components, r_path: &str) -> String {
    if r_path.starts_with('/') {
        return r_path.into();
    }

    let base_path = base.path.as_deref().unwrap_or_default();
    if base.authority.is_some() && base_path.is_empty() {
        let mut buf = String::with_capacity(r_path.len() + 1);
        buf.push('/');
        buf.push_str(r_path);
        return buf;
    }

    // Replace the last segment of the base path.
    let kept = base_path.rfind('/').map_or("", |i| &base_path[..=i]);
    let mut buf = String::with_capacity(kept.len() + r_path.len());
    buf.push_str(kept);
    buf.push_str(r_path);
    buf
}

pub(crate) fn remove_dot_segments(path: &str) -> String {
    let mut path = strip_dot_segments(path);

    let parent =
        get_compiled_pattern(PARENT_SEGMENT, Flags::new()).expect("built-in template compiles");
    // One replacement at a time: a replacement can create a new match
    // to the left of it.
    loop {
        path = match parent.as_regex().replacen(&path, 1, "/") {
            Cow::Borrowed(_) => break,
            Cow::Owned(p) => p,
        };
    }
    path
}

/// Removes `"."` segments, and `".."` segments at the start of the path.
///
/// A leading `"."` or `".."` segment is removed together with its trailing
/// slash, and so is any `"."` segment after a slash.
fn strip_dot_segments(path: &str) -> String {
    let start = if path.starts_with("../") {
        3
    } else if path == ".." || path.starts_with("./") {
        2
    } else if path == "." {
        1
    } else {
        0
    };

    let bytes = path.as_bytes();
    let mut buf = String::with_capacity(path.len() - start);
    let mut copied = start;
    let mut i = start;

    while i < bytes.len() {
        if bytes[i] == b'.' && i > 0 && bytes[i - 1] == b'/' {
            match bytes.get(i + 1) {
                None => {
                    buf.push_str(&path[copied..i]);
                    i += 1;
                    copied = i;
                    continue;
                }
                Some(b'/') => {
                    buf.push_str(&path[copied..i]);
                    i += 2;
                    copied = i;
                    continue;
                }
                Some(_) => {}
            }
        }
        i += 1;
    }

    buf.push_str(&path[copied..]);
    buf
}
