//! Error types.

/// Detailed cause of a [`GrammarError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GrammarErrorKind {
    /// A placeholder or a capture configuration names a rule that is not
    /// defined, or not yet expanded at the point of reference.
    UndefinedRule,
    /// A placeholder is opened with `{` but never closed.
    MalformedTemplate,
}

/// An error occurred when expanding grammar rules into ground patterns.
///
/// This indicates a defect in a rule table, a template or a capture
/// configuration, never a problem with an input string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrammarError {
    pub(crate) kind: GrammarErrorKind,
    pub(crate) rule: String,
    pub(crate) reference: String,
}

impl GrammarError {
    pub(crate) fn undefined(rule: &str, reference: &str) -> Self {
        GrammarError {
            kind: GrammarErrorKind::UndefinedRule,
            rule: rule.into(),
            reference: reference.into(),
        }
    }

    pub(crate) fn malformed(rule: &str, reference: &str) -> Self {
        GrammarError {
            kind: GrammarErrorKind::MalformedTemplate,
            rule: rule.into(),
            reference: reference.into(),
        }
    }

    /// Returns the detailed cause of the error.
    #[inline]
    pub fn kind(&self) -> GrammarErrorKind {
        self.kind
    }

    /// Returns the rule or template in which the error occurred.
    #[inline]
    pub fn rule(&self) -> &str {
        &self.rule
    }

    /// Returns the offending reference.
    #[inline]
    pub fn reference(&self) -> &str {
        &self.reference
    }
}

impl std::error::Error for GrammarError {}

/// An error occurred when compiling a template into a [`Matcher`].
///
/// [`Matcher`]: crate::Matcher
#[derive(Clone, Debug)]
pub enum CompileError {
    /// The template references an undefined rule or is malformed.
    Grammar(GrammarError),
    /// The expanded pattern was rejected by the regex engine.
    Regex(regex::Error),
}

impl From<GrammarError> for CompileError {
    #[inline]
    fn from(e: GrammarError) -> Self {
        CompileError::Grammar(e)
    }
}

impl From<regex::Error> for CompileError {
    #[inline]
    fn from(e: regex::Error) -> Self {
        CompileError::Regex(e)
    }
}

impl std::error::Error for CompileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CompileError::Grammar(e) => Some(e),
            CompileError::Regex(e) => Some(e),
        }
    }
}

/// Detailed cause of a [`ParseError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The input does not match the requested rule.
    NoMatch,
    /// The requested rule does not exist.
    UnknownRule,
}

/// An error occurred when parsing a string against a grammar rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub(crate) kind: ParseErrorKind,
    pub(crate) input: String,
    pub(crate) rule: String,
}

impl ParseError {
    pub(crate) fn new(kind: ParseErrorKind, input: &str, rule: &str) -> Self {
        ParseError {
            kind,
            input: input.into(),
            rule: rule.into(),
        }
    }

    /// Returns the detailed cause of the error.
    #[inline]
    pub fn kind(&self) -> ParseErrorKind {
        self.kind
    }

    /// Returns the input that failed to parse.
    #[inline]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Returns the rule the input was parsed against.
    #[inline]
    pub fn rule(&self) -> &str {
        &self.rule
    }

    /// Recovers the input that failed to parse.
    #[inline]
    pub fn into_input(self) -> String {
        self.input
    }
}

impl std::error::Error for ParseError {}

/// An error occurred when resolving a URI/IRI reference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolveError {
    /// The base is not a valid IRI.
    InvalidBase(ParseError),
    /// The base is well-formed but has no scheme.
    MissingScheme,
    /// The reference is not a valid IRI reference.
    InvalidReference(ParseError),
}

impl std::error::Error for ResolveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ResolveError::InvalidBase(e) | ResolveError::InvalidReference(e) => Some(e),
            ResolveError::MissingScheme => None,
        }
    }
}
