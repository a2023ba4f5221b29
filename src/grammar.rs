//! Grammar rules of RFC 3986 and RFC 3987 and their expansion into patterns.
//!
//! Each rule is a template in which `{rule_name}` stands for the ground
//! pattern of another rule. A `{` that does not start an identifier is left
//! alone, so repetition bounds such as `{1,4}` need no escaping. Escapes like
//! `\x{A0}` or `\p{L}` are copied verbatim.

use crate::error::GrammarError;
use once_cell::sync::Lazy;
use ref_cast::{ref_cast_custom, RefCastCustom};
use std::{collections::BTreeMap, sync::Arc};

type Rule = (&'static str, &'static str);

/// Rules shared by the URI and IRI grammars.
///
/// Within each group a rule may only reference rules declared after it
/// or rules of an earlier group.
static COMMON_RULES: &[Rule] = &[
    // Scheme
    ("scheme", r"[a-zA-Z][a-zA-Z0-9+.-]*"),
    // Port
    ("port", r"[0-9]*"),
    // IP addresses
    ("IP_literal", r"\[(?:{IPv6address}|{IPvFuture})\]"),
    (
        "IPv6address",
        concat!(
            r"(?:",
            r"(?:{h16}:){6}{ls32}",
            r"|::(?:{h16}:){5}{ls32}",
            r"|(?:{h16})?::(?:{h16}:){4}{ls32}",
            r"|(?:(?:{h16}:)?{h16})?::(?:{h16}:){3}{ls32}",
            r"|(?:(?:{h16}:){0,2}{h16})?::(?:{h16}:){2}{ls32}",
            r"|(?:(?:{h16}:){0,3}{h16})?::{h16}:{ls32}",
            r"|(?:(?:{h16}:){0,4}{h16})?::{ls32}",
            r"|(?:(?:{h16}:){0,5}{h16})?::{h16}",
            r"|(?:(?:{h16}:){0,6}{h16})?::",
            r")",
        ),
    ),
    ("ls32", r"(?:{h16}:{h16}|{IPv4address})"),
    ("h16", r"[0-9A-Fa-f]{1,4}"),
    ("IPv4address", r"(?:(?:{dec_octet}\.){3}{dec_octet})"),
    ("dec_octet", r"(?:25[0-5]|2[0-4][0-9]|1[0-9][0-9]|[1-9][0-9]|[0-9])"),
    ("IPvFuture", r"[vV][0-9A-Fa-f]+\.(?:{unreserved}|{sub_delims}|:)+"),
    // Character classes
    ("unreserved", r"[a-zA-Z0-9._~-]"),
    ("reserved", r"(?:{gen_delims}|{sub_delims})"),
    ("pct_encoded", r"%[0-9A-Fa-f][0-9A-Fa-f]"),
    ("gen_delims", r"[:/?#\[\]@]"),
    ("sub_delims", r"[!$&'()*+,;=]"),
];

/// Rules of RFC 3986, Appendix A.
static URI_RULES: &[Rule] = &[
    // References
    ("URI_reference", r"(?:{URI}|{relative_ref})"),
    ("URI", r"{absolute_URI}(?:#{fragment})?"),
    ("absolute_URI", r"{scheme}:{hier_part}(?:\?{query})?"),
    ("relative_ref", r"{relative_part}(?:\?{query})?(?:#{fragment})?"),
    (
        "hier_part",
        r"(?://{authority}{path_abempty}|{path_absolute}|{path_rootless}|{path_empty})",
    ),
    (
        "relative_part",
        r"(?://{authority}{path_abempty}|{path_absolute}|{path_noscheme}|{path_empty})",
    ),
    // Authority
    ("authority", r"(?:{userinfo}@)?{host}(?::{port})?"),
    ("host", r"(?:{IP_literal}|{IPv4address}|{reg_name})"),
    ("userinfo", r"(?:{unreserved}|{pct_encoded}|{sub_delims}|:)*"),
    ("reg_name", r"(?:{unreserved}|{pct_encoded}|{sub_delims})*"),
    // Path
    (
        "path",
        r"(?:{path_abempty}|{path_absolute}|{path_noscheme}|{path_rootless}|{path_empty})",
    ),
    ("path_abempty", r"(?:/{segment})*"),
    ("path_absolute", r"/(?:{segment_nz}(?:/{segment})*)?"),
    ("path_noscheme", r"{segment_nz_nc}(?:/{segment})*"),
    ("path_rootless", r"{segment_nz}(?:/{segment})*"),
    ("path_empty", r"(?:)"),
    ("segment", r"{pchar}*"),
    ("segment_nz", r"{pchar}+"),
    ("segment_nz_nc", r"(?:{unreserved}|{pct_encoded}|{sub_delims}|@)+"),
    // Query
    ("query", r"(?:{pchar}|/|\?)*"),
    // Fragment
    ("fragment", r"(?:{pchar}|/|\?)*"),
    // Character classes
    ("pchar", r"(?:{unreserved}|{pct_encoded}|{sub_delims}|:|@)"),
];

/// Rules of RFC 3987, Section 2.2.
static IRI_RULES: &[Rule] = &[
    // References
    ("IRI_reference", r"(?:{IRI}|{irelative_ref})"),
    ("IRI", r"{absolute_IRI}(?:#{ifragment})?"),
    ("absolute_IRI", r"{scheme}:{ihier_part}(?:\?{iquery})?"),
    ("irelative_ref", r"{irelative_part}(?:\?{iquery})?(?:#{ifragment})?"),
    (
        "ihier_part",
        r"(?://{iauthority}{ipath_abempty}|{ipath_absolute}|{ipath_rootless}|{ipath_empty})",
    ),
    (
        "irelative_part",
        r"(?://{iauthority}{ipath_abempty}|{ipath_absolute}|{ipath_noscheme}|{ipath_empty})",
    ),
    // Authority
    ("iauthority", r"(?:{iuserinfo}@)?{ihost}(?::{port})?"),
    ("iuserinfo", r"(?:{iunreserved}|{pct_encoded}|{sub_delims}|:)*"),
    ("ihost", r"(?:{IP_literal}|{IPv4address}|{ireg_name})"),
    ("ireg_name", r"(?:{iunreserved}|{pct_encoded}|{sub_delims})*"),
    // Path
    (
        "ipath",
        r"(?:{ipath_abempty}|{ipath_absolute}|{ipath_noscheme}|{ipath_rootless}|{ipath_empty})",
    ),
    ("ipath_empty", r"(?:)"),
    ("ipath_rootless", r"{isegment_nz}(?:/{isegment})*"),
    ("ipath_noscheme", r"{isegment_nz_nc}(?:/{isegment})*"),
    ("ipath_absolute", r"/(?:{isegment_nz}(?:/{isegment})*)?"),
    ("ipath_abempty", r"(?:/{isegment})*"),
    ("isegment_nz_nc", r"(?:{iunreserved}|{pct_encoded}|{sub_delims}|@)+"),
    ("isegment_nz", r"{ipchar}+"),
    ("isegment", r"{ipchar}*"),
    // Query
    ("iquery", r"(?:{ipchar}|{iprivate}|/|\?)*"),
    // Fragment
    ("ifragment", r"(?:{ipchar}|/|\?)*"),
    // Character classes
    ("ipchar", r"(?:{iunreserved}|{pct_encoded}|{sub_delims}|:|@)"),
    ("iunreserved", r"(?:[a-zA-Z0-9._~-]|{ucschar})"),
    (
        "iprivate",
        "[\u{E000}-\u{F8FF}\u{F0000}-\u{FFFFD}\u{100000}-\u{10FFFD}]",
    ),
    (
        "ucschar",
        concat!(
            "[\u{A0}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFEF}",
            "\u{10000}-\u{1FFFD}\u{20000}-\u{2FFFD}",
            "\u{30000}-\u{3FFFD}\u{40000}-\u{4FFFD}",
            "\u{50000}-\u{5FFFD}\u{60000}-\u{6FFFD}",
            "\u{70000}-\u{7FFFD}\u{80000}-\u{8FFFD}",
            "\u{90000}-\u{9FFFD}\u{A0000}-\u{AFFFD}",
            "\u{B0000}-\u{BFFFD}\u{C0000}-\u{CFFFD}",
            "\u{D0000}-\u{DFFFD}\u{E1000}-\u{EFFFD}]",
        ),
    ),
];

/// Rule groups in expansion order.
static GROUPS: [&[Rule]; 3] = [COMMON_RULES, URI_RULES, IRI_RULES];

/// Default capture groups: components are captured under their own names,
/// and every path variant is captured as `path` (`ipath` for IRIs).
static DEFAULT_CAPTURES: &[(&str, &str)] = &[
    ("scheme", "scheme"),
    ("port", "port"),
    ("authority", "authority"),
    ("userinfo", "userinfo"),
    ("host", "host"),
    ("path_abempty", "path"),
    ("path_absolute", "path"),
    ("path_noscheme", "path"),
    ("path_rootless", "path"),
    ("path_empty", "path"),
    ("query", "query"),
    ("fragment", "fragment"),
    ("iauthority", "iauthority"),
    ("iuserinfo", "iuserinfo"),
    ("ihost", "ihost"),
    ("ipath_abempty", "ipath"),
    ("ipath_absolute", "ipath"),
    ("ipath_noscheme", "ipath"),
    ("ipath_rootless", "ipath"),
    ("ipath_empty", "ipath"),
    ("iquery", "iquery"),
    ("ifragment", "ifragment"),
];

fn is_rule(name: &str) -> bool {
    GROUPS.iter().flat_map(|g| g.iter()).any(|&(n, _)| n == name)
}

/// How a rule is wrapped before rules depending on it are expanded.
#[derive(Clone)]
pub enum Capture {
    /// Wraps the rule in a named capture group.
    Group(String),
    /// Replaces the rule's pattern with the output of a function.
    Transform(Arc<dyn Fn(&str) -> String + Send + Sync>),
}

impl Capture {
    fn apply(&self, pattern: &str) -> String {
        match self {
            Capture::Group(name) => format!("(?P<{name}>{pattern})"),
            Capture::Transform(f) => f(pattern),
        }
    }
}

/// A mapping from rule names to the way they are captured.
///
/// The wrapping of a rule is nested into the patterns of every rule that
/// depends on it, not only applied to the rule itself.
///
/// # Examples
///
/// ```
/// use iri_rules::{format_patterns, CaptureConfig};
///
/// let config = CaptureConfig::none().group("scheme", "s");
/// let patterns = format_patterns(&config)?;
/// assert!(patterns.get("absolute_URI").unwrap().as_str().starts_with("(?P<s>"));
/// # Ok::<_, iri_rules::GrammarError>(())
/// ```
#[derive(Clone)]
pub struct CaptureConfig {
    pub(crate) map: BTreeMap<String, Capture>,
}

impl CaptureConfig {
    /// Creates a configuration that captures nothing.
    pub fn none() -> Self {
        CaptureConfig {
            map: BTreeMap::new(),
        }
    }

    /// Captures the given rule in a group with the given name.
    pub fn group(mut self, rule: &str, name: &str) -> Self {
        self.map
            .insert(rule.to_string(), Capture::Group(name.to_string()));
        self
    }

    /// Replaces the pattern of the given rule with the output of `f`.
    ///
    /// # Examples
    ///
    /// ```
    /// use iri_rules::{format_patterns, CaptureConfig};
    ///
    /// let config = CaptureConfig::none().transform("port", |p| format!("(?:{p})?"));
    /// let patterns = format_patterns(&config)?;
    /// assert_eq!(patterns.get("port").unwrap(), "(?:[0-9]*)?");
    /// # Ok::<_, iri_rules::GrammarError>(())
    /// ```
    pub fn transform<F>(mut self, rule: &str, f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.map
            .insert(rule.to_string(), Capture::Transform(Arc::new(f)));
        self
    }

    /// Stops capturing the given rule.
    pub fn remove(mut self, rule: &str) -> Self {
        self.map.remove(rule);
        self
    }

    /// Returns how the given rule is captured, if at all.
    pub fn get(&self, rule: &str) -> Option<&Capture> {
        self.map.get(rule)
    }
}

impl Default for CaptureConfig {
    fn default() -> Self {
        DEFAULT_CAPTURES
            .iter()
            .fold(CaptureConfig::none(), |config, &(rule, name)| {
                config.group(rule, name)
            })
    }
}

/// A ground pattern with every rule reference substituted.
#[derive(RefCastCustom)]
#[repr(transparent)]
pub struct Pattern {
    inner: str,
}

impl Pattern {
    #[ref_cast_custom]
    #[inline]
    pub(crate) const fn new_validated(pattern: &str) -> &Pattern;

    /// Returns the pattern as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.inner
    }
}

impl AsRef<str> for Pattern {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.inner
    }
}

impl PartialEq for Pattern {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl Eq for Pattern {}

impl PartialEq<str> for Pattern {
    #[inline]
    fn eq(&self, other: &str) -> bool {
        &self.inner == other
    }
}

/// A mapping from rule names to ground patterns.
#[derive(Clone)]
pub struct Patterns {
    map: BTreeMap<&'static str, String>,
}

impl Patterns {
    /// Returns the ground pattern of the given rule.
    #[must_use]
    pub fn get(&self, rule: &str) -> Option<&Pattern> {
        self.map.get(rule).map(|p| Pattern::new_validated(p))
    }

    /// Checks whether the given rule exists.
    #[must_use]
    pub fn contains(&self, rule: &str) -> bool {
        self.map.contains_key(rule)
    }

    /// Returns an iterator over the rule names in lexicographic order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.map.keys().copied()
    }

    /// Returns an iterator over the rules and their patterns, ordered by name.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Pattern)> + '_ {
        self.map
            .iter()
            .map(|(&name, p)| (name, Pattern::new_validated(p)))
    }

    /// Returns the number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Checks whether there are no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Substitutes every `{rule_name}` in the template with its pattern.
    ///
    /// # Examples
    ///
    /// ```
    /// let re = iri_rules::patterns().expand(r"^{h16}(?::{h16})?$")?;
    /// assert_eq!(re, "^[0-9A-Fa-f]{1,4}(?::[0-9A-Fa-f]{1,4})?$");
    /// # Ok::<_, iri_rules::GrammarError>(())
    /// ```
    pub fn expand(&self, template: &str) -> Result<String, GrammarError> {
        expand(template, template, &self.map)
    }
}

/// Expands every rule into a ground pattern, wrapping rules as configured.
///
/// Rules are expanded group by group, each group starting from its leaves,
/// so that every reference is substituted by an already ground pattern.
///
/// # Errors
///
/// Returns `Err` if the configuration names a rule that does not exist.
pub fn format_patterns(config: &CaptureConfig) -> Result<Patterns, GrammarError> {
    if let Some(rule) = config.map.keys().find(|rule| !is_rule(rule)) {
        return Err(GrammarError::undefined("capture configuration", rule));
    }

    let mut map = BTreeMap::new();
    for group in GROUPS {
        for &(name, template) in group.iter().rev() {
            let pattern = expand(name, template, &map)?;
            let pattern = match config.get(name) {
                Some(capture) => capture.apply(&pattern),
                None => pattern,
            };
            map.insert(name, pattern);
        }
    }
    tracing::debug!(rules = map.len(), "expanded grammar rules");
    Ok(Patterns { map })
}

static PATTERNS: Lazy<Patterns> = Lazy::new(|| {
    format_patterns(&CaptureConfig::default()).expect("built-in grammar is well-formed")
});

/// Returns the ground patterns with the default capture groups.
///
/// # Examples
///
/// ```
/// let scheme = iri_rules::patterns().get("scheme").unwrap();
/// assert_eq!(scheme, "(?P<scheme>[a-zA-Z][a-zA-Z0-9+.-]*)");
/// ```
pub fn patterns() -> &'static Patterns {
    &PATTERNS
}

fn expand(
    rule: &str,
    template: &str,
    table: &BTreeMap<&'static str, String>,
) -> Result<String, GrammarError> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(i) = rest.find(&['\\', '{'][..]) {
        out.push_str(&rest[..i]);
        rest = &rest[i..];

        if rest.starts_with('\\') {
            let len = escape_len(rest);
            out.push_str(&rest[..len]);
            rest = &rest[len..];
            continue;
        }

        let body = &rest[1..];
        if !body.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_') {
            // A repetition bound.
            out.push('{');
            rest = body;
            continue;
        }

        let end = body
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .filter(|&end| body[end..].starts_with('}'))
            .ok_or_else(|| GrammarError::malformed(rule, rest))?;
        let name = &body[..end];
        let pattern = table
            .get(name)
            .ok_or_else(|| GrammarError::undefined(rule, name))?;
        out.push_str(pattern);
        rest = &body[end + 1..];
    }

    out.push_str(rest);
    Ok(out)
}

/// Returns the length of the escape sequence at the start of `s`.
fn escape_len(s: &str) -> usize {
    let mut chars = s[1..].chars();
    match chars.next() {
        None => 1,
        Some('x' | 'u' | 'U' | 'p' | 'P') if s[2..].starts_with('{') => {
            s.find('}').map_or(s.len(), |j| j + 1)
        }
        Some(c) => 1 + c.len_utf8(),
    }
}
