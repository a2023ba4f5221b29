//! Compiled matchers, their process-wide cache, and parsing.

use crate::{
    component::Components,
    error::{CompileError, ParseError, ParseErrorKind},
    grammar::patterns,
};
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use std::{
    collections::{BTreeMap, HashMap},
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

/// Named groups that participated in a match, keyed by group name.
pub type GroupMap = BTreeMap<String, String>;

/// The IRI patterns are large alternations over Unicode ranges.
const SIZE_LIMIT: usize = 64 << 20;

/// RFC 3986, Appendix B. Matches every string.
const SPLIT_TEMPLATE: &str = r"^(?:(?P<scheme>[^:/?#]+):)?(?://(?P<authority>[^/?#]*))?(?P<path>[^?#]*)(?:\?(?P<query>[^#]*))?(?:#(?P<fragment>(?s:.*)))?$";

/// Options a template is compiled with.
///
/// # Examples
///
/// ```
/// use iri_rules::{get_compiled_pattern, Flags};
///
/// let m = get_compiled_pattern("^urn:{segment}$", Flags::new().case_insensitive(true))?;
/// assert!(m.is_match("URN:isbn"));
/// assert!(!get_compiled_pattern("^urn:{segment}$", Flags::new())?.is_match("URN:isbn"));
/// # Ok::<_, iri_rules::CompileError>(())
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Flags {
    case_insensitive: bool,
    multi_line: bool,
    dot_matches_new_line: bool,
}

impl Flags {
    /// Creates flags with every option disabled.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether letters match case-insensitively.
    #[inline]
    pub fn case_insensitive(mut self, value: bool) -> Self {
        self.case_insensitive = value;
        self
    }

    /// Sets whether `^` and `$` match at line boundaries.
    #[inline]
    pub fn multi_line(mut self, value: bool) -> Self {
        self.multi_line = value;
        self
    }

    /// Sets whether `.` matches `\n`.
    #[inline]
    pub fn dot_matches_new_line(mut self, value: bool) -> Self {
        self.dot_matches_new_line = value;
        self
    }
}

/// A compiled template.
///
/// A group name may occur any number of times in a template, typically once
/// per alternation branch. Each occurrence is compiled under a distinct
/// internal name and reported under the original one.
pub struct Matcher {
    regex: Regex,
    // (capture index, group name) in order of the opening parentheses.
    slots: Vec<(usize, String)>,
    template: String,
}

impl Matcher {
    fn compile(template: &str, flags: Flags) -> Result<Matcher, CompileError> {
        let expanded = patterns().expand(template)?;
        let (pattern, names) = rename_groups(&expanded);

        let regex = RegexBuilder::new(&pattern)
            .case_insensitive(flags.case_insensitive)
            .multi_line(flags.multi_line)
            .dot_matches_new_line(flags.dot_matches_new_line)
            .size_limit(SIZE_LIMIT)
            .dfa_size_limit(SIZE_LIMIT)
            .build()?;

        let slots = regex
            .capture_names()
            .enumerate()
            .filter_map(|(i, internal)| Some((i, names.get(internal?)?.clone())))
            .collect();

        Ok(Matcher {
            regex,
            slots,
            template: template.to_string(),
        })
    }

    /// Checks whether the matcher matches anywhere in the input.
    #[inline]
    #[must_use]
    pub fn is_match(&self, input: &str) -> bool {
        self.regex.is_match(input)
    }

    /// Returns the named groups of the leftmost match in the input.
    ///
    /// Only groups that participated in the match are present. When a name
    /// occurs more than once, the first participating occurrence wins.
    #[must_use]
    pub fn captures(&self, input: &str) -> Option<GroupMap> {
        let caps = self.regex.captures(input)?;
        let mut map = GroupMap::new();
        for (i, name) in &self.slots {
            if let Some(m) = caps.get(*i) {
                map.entry(name.clone())
                    .or_insert_with(|| m.as_str().to_string());
            }
        }
        Some(map)
    }

    /// Returns the underlying regex, whose group names are internal.
    #[inline]
    #[must_use]
    pub fn as_regex(&self) -> &Regex {
        &self.regex
    }

    /// Returns the template this matcher was compiled from.
    #[inline]
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }
}

type Cache = HashMap<(String, Flags), Arc<Matcher>>;

static CACHE: Lazy<Mutex<Cache>> = Lazy::new(Default::default);

// Entries are never left half-written, so a poisoned lock is still usable.
fn cache() -> MutexGuard<'static, Cache> {
    CACHE.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Expands a template against [`patterns`] and compiles it.
///
/// Matchers are cached by template and flags for the lifetime of the
/// process: identical requests return the same instance.
///
/// # Errors
///
/// Returns `Err` if the template references an undefined rule or if the
/// expanded pattern is not a valid regex.
///
/// # Examples
///
/// ```
/// use iri_rules::{get_compiled_pattern, Flags};
/// use std::sync::Arc;
///
/// let a = get_compiled_pattern("^{IPv4address}$", Flags::new())?;
/// let b = get_compiled_pattern("^{IPv4address}$", Flags::new())?;
/// assert!(Arc::ptr_eq(&a, &b));
/// assert!(a.is_match("192.0.2.16"));
/// assert!(!a.is_match("192.0.2.256"));
/// # Ok::<_, iri_rules::CompileError>(())
/// ```
pub fn get_compiled_pattern(template: &str, flags: Flags) -> Result<Arc<Matcher>, CompileError> {
    let key = (template.to_string(), flags);
    if let Some(matcher) = cache().get(&key) {
        return Ok(matcher.clone());
    }

    tracing::trace!(template, ?flags, "compiling pattern");
    // Compile outside the lock; whoever inserts first wins a race.
    let matcher = Arc::new(Matcher::compile(template, flags)?);
    Ok(cache().entry(key).or_insert(matcher).clone())
}

/// Returns the anchored matcher of a rule, or `None` if there is no such rule.
pub(crate) fn rule_matcher(rule: &str) -> Option<Arc<Matcher>> {
    if !patterns().contains(rule) {
        return None;
    }
    let matcher = get_compiled_pattern(&format!("^(?:{{{rule}}})$"), Flags::new())
        .expect("built-in rules compile");
    Some(matcher)
}

/// Parses the whole input against a grammar rule.
///
/// IRI components are reported under their URI names, see
/// [`Components::from_groups`].
///
/// # Errors
///
/// Returns `Err` if the input does not match the rule or if there is no
/// such rule.
///
/// # Examples
///
/// ```
/// use iri_rules::parse;
///
/// let c = parse("http://tools.ietf.org/html/rfc3986#appendix-A", "URI")?;
/// assert_eq!(c.scheme.as_deref(), Some("http"));
/// assert_eq!(c.authority.as_deref(), Some("tools.ietf.org"));
/// assert_eq!(c.host.as_deref(), Some("tools.ietf.org"));
/// assert_eq!(c.path.as_deref(), Some("/html/rfc3986"));
/// assert_eq!(c.query, None);
/// assert_eq!(c.fragment.as_deref(), Some("appendix-A"));
///
/// assert!(parse("urn:\u{10300}", "URI").is_err());
/// assert!(parse("urn:\u{10300}", "IRI").is_ok());
/// # Ok::<_, iri_rules::ParseError>(())
/// ```
pub fn parse(input: &str, rule: &str) -> Result<Components, ParseError> {
    let matcher =
        rule_matcher(rule).ok_or_else(|| ParseError::new(ParseErrorKind::UnknownRule, input, rule))?;
    match matcher.captures(input) {
        Some(groups) => Ok(Components::from_groups(&groups)),
        None => Err(ParseError::new(ParseErrorKind::NoMatch, input, rule)),
    }
}

/// Splits a string into components without validating it.
///
/// This is the loose decomposition of RFC 3986, Appendix B. It never fails
/// and never reports `userinfo`, `host` or `port`.
///
/// # Examples
///
/// ```
/// let c = iri_rules::split("http://a b/c d?e f#g h");
/// assert_eq!(c.authority.as_deref(), Some("a b"));
/// assert_eq!(c.path.as_deref(), Some("/c d"));
/// assert_eq!(c.host, None);
/// ```
pub fn split(input: &str) -> Components {
    let matcher =
        get_compiled_pattern(SPLIT_TEMPLATE, Flags::new()).expect("split pattern compiles");
    matcher
        .captures(input)
        .map(|groups| Components::from_groups(&groups))
        .unwrap_or_default()
}

/// Gives every named group a unique name, returning the rewritten pattern
/// and a mapping from the unique names to the original ones.
fn rename_groups(pattern: &str) -> (String, HashMap<String, String>) {
    let mut out = String::with_capacity(pattern.len());
    let mut names = HashMap::new();
    let mut rest = pattern;

    while let Some(i) = rest.find(&['\\', '('][..]) {
        out.push_str(&rest[..i]);
        rest = &rest[i..];

        if rest.starts_with('\\') {
            let len = rest[1..].chars().next().map_or(1, |c| 1 + c.len_utf8());
            out.push_str(&rest[..len]);
            rest = &rest[len..];
            continue;
        }

        let group = rest
            .strip_prefix("(?P<")
            .or_else(|| rest.strip_prefix("(?<"))
            .and_then(|body| body.split_once('>'))
            .filter(|(name, _)| is_group_name(name));

        match group {
            Some((name, after)) => {
                let internal = format!("_{}", names.len());
                out.push_str("(?P<");
                out.push_str(&internal);
                out.push('>');
                names.insert(internal, name.to_string());
                rest = after;
            }
            None => {
                out.push('(');
                rest = &rest[1..];
            }
        }
    }

    out.push_str(rest);
    (out, names)
}

fn is_group_name(name: &str) -> bool {
    name.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '[' | ']'))
}
