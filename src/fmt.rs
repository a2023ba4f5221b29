use crate::{
    component::Components,
    error::{CompileError, GrammarError, GrammarErrorKind, ParseError, ParseErrorKind, ResolveError},
    grammar::{Capture, CaptureConfig, Pattern, Patterns},
    matcher::Matcher,
};
use std::fmt;

impl fmt::Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self.kind {
            GrammarErrorKind::UndefinedRule => "undefined rule",
            GrammarErrorKind::MalformedTemplate => "malformed placeholder",
        };
        write!(f, "{} `{}` in `{}`", msg, self.reference, self.rule)
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::Grammar(e) => fmt::Display::fmt(e, f),
            CompileError::Regex(e) => write!(f, "invalid pattern: {e}"),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ParseErrorKind::NoMatch => {
                write!(f, "input is not a valid `{}`: {:?}", self.rule, self.input)
            }
            ParseErrorKind::UnknownRule => write!(f, "unknown rule `{}`", self.rule),
        }
    }
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::InvalidBase(e) => write!(f, "invalid base: {e}"),
            ResolveError::MissingScheme => f.write_str("base has no scheme"),
            ResolveError::InvalidReference(e) => write!(f, "invalid reference: {e}"),
        }
    }
}

impl fmt::Display for Components {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(scheme) = &self.scheme {
            write!(f, "{scheme}:")?;
        }
        if let Some(authority) = &self.authority {
            write!(f, "//{authority}")?;
        }
        if let Some(path) = &self.path {
            f.write_str(path)?;
        }
        if let Some(query) = &self.query {
            write!(f, "?{query}")?;
        }
        if let Some(fragment) = &self.fragment {
            write!(f, "#{fragment}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Pattern {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_str(), f)
    }
}

impl fmt::Debug for Pattern {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl fmt::Debug for Patterns {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl fmt::Debug for Capture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capture::Group(name) => f.debug_tuple("Group").field(name).finish(),
            Capture::Transform(_) => f.write_str("Transform(..)"),
        }
    }
}

impl fmt::Debug for CaptureConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.map.iter()).finish()
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matcher")
            .field("template", &self.template())
            .finish_non_exhaustive()
    }
}
