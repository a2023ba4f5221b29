//! URI/IRI components.

use crate::{error::ParseError, matcher::GroupMap};
use std::{borrow::Cow, str::FromStr};

/// Pairs of URI group names and their IRI counterparts.
const IRI_FOLD: [(&str, &str); 6] = [
    ("authority", "iauthority"),
    ("userinfo", "iuserinfo"),
    ("host", "ihost"),
    ("path", "ipath"),
    ("query", "iquery"),
    ("fragment", "ifragment"),
];

/// The named components of a URI/IRI reference.
///
/// An absent component is distinct from an empty one: `authority` is `None`
/// when there is no `"//"`, while `Some("")` is an empty authority as in
/// `file:///etc/hosts`.
///
/// # Examples
///
/// ```
/// use iri_rules::Components;
///
/// let c: Components = "file:///etc/hosts".parse()?;
/// assert_eq!(c.authority.as_deref(), Some(""));
/// assert_eq!(c.path.as_deref(), Some("/etc/hosts"));
/// assert_eq!(c.to_string(), "file:///etc/hosts");
/// # Ok::<_, iri_rules::ParseError>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Components {
    /// The [scheme](https://datatracker.ietf.org/doc/html/rfc3986#section-3.1).
    pub scheme: Option<String>,
    /// The [authority](https://datatracker.ietf.org/doc/html/rfc3986#section-3.2).
    pub authority: Option<String>,
    /// The userinfo subcomponent of the authority.
    pub userinfo: Option<String>,
    /// The host subcomponent of the authority.
    pub host: Option<String>,
    /// The port subcomponent of the authority.
    pub port: Option<String>,
    /// The [path](https://datatracker.ietf.org/doc/html/rfc3986#section-3.3).
    ///
    /// Every reference has a path, possibly empty. `None` only occurs for
    /// rules without one.
    pub path: Option<String>,
    /// The [query](https://datatracker.ietf.org/doc/html/rfc3986#section-3.4).
    pub query: Option<String>,
    /// The [fragment](https://datatracker.ietf.org/doc/html/rfc3986#section-3.5).
    pub fragment: Option<String>,
}

impl Components {
    /// Parses an IRI reference into components.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the string is not a valid `IRI_reference`.
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        crate::parse(s, "IRI_reference")
    }

    /// Collects components from the named groups of a match.
    ///
    /// A URI-named group that did not participate is filled from its
    /// `i`-prefixed IRI counterpart, so that an IRI match and a URI match
    /// are read the same way. Other groups are ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use iri_rules::{Components, GroupMap};
    ///
    /// let mut groups = GroupMap::new();
    /// groups.insert("scheme".into(), "urn".into());
    /// groups.insert("ipath".into(), "ä".into());
    ///
    /// let c = Components::from_groups(&groups);
    /// assert_eq!(c.path.as_deref(), Some("ä"));
    /// assert_eq!(c.authority, None);
    /// ```
    pub fn from_groups(groups: &GroupMap) -> Self {
        let get = |name: &str| groups.get(name).cloned();
        let [authority, userinfo, host, path, query, fragment] =
            IRI_FOLD.map(|(uri, iri)| get(uri).or_else(|| get(iri)));

        Components {
            scheme: get("scheme"),
            authority,
            userinfo,
            host,
            port: get("port"),
            path,
            query,
            fragment,
        }
    }

    /// Composes the components into a string.
    ///
    /// This never validates: a marker is emitted for every present
    /// component, even an empty one.
    ///
    /// # Examples
    ///
    /// ```
    /// use iri_rules::Components;
    ///
    /// let c = Components {
    ///     scheme: Some("foo".into()),
    ///     authority: Some("".into()),
    ///     query: Some("".into()),
    ///     ..Default::default()
    /// };
    /// assert_eq!(c.compose(), "foo://?");
    /// ```
    #[must_use]
    pub fn compose(&self) -> String {
        self.to_string()
    }
}

impl FromStr for Components {
    type Err = ParseError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Components::parse(s)
    }
}

/// Composes components into a string, see [`Components::compose`].
#[must_use]
pub fn compose(components: &Components) -> String {
    components.compose()
}

/// Values that can be read as [`Components`].
///
/// Strings are parsed against the given rule; components are taken as they
/// are.
pub trait AsComponents {
    /// Returns the components, parsing against `rule` where needed.
    ///
    /// # Errors
    ///
    /// Returns `Err` if parsing is needed and fails.
    fn as_components(&self, rule: &str) -> Result<Cow<'_, Components>, ParseError>;
}

impl AsComponents for str {
    fn as_components(&self, rule: &str) -> Result<Cow<'_, Components>, ParseError> {
        crate::parse(self, rule).map(Cow::Owned)
    }
}

impl AsComponents for String {
    #[inline]
    fn as_components(&self, rule: &str) -> Result<Cow<'_, Components>, ParseError> {
        self.as_str().as_components(rule)
    }
}

impl AsComponents for Components {
    #[inline]
    fn as_components(&self, _rule: &str) -> Result<Cow<'_, Components>, ParseError> {
        Ok(Cow::Borrowed(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uri_names_take_precedence() {
        let mut groups = GroupMap::new();
        groups.insert("path".to_string(), "/a".to_string());
        groups.insert("ipath".to_string(), "/b".to_string());
        groups.insert("iquery".to_string(), "".to_string());
        let c = Components::from_groups(&groups);
        assert_eq!(c.path.as_deref(), Some("/a"));
        assert_eq!(c.query.as_deref(), Some(""));
        assert_eq!(c.fragment, None);
    }
}
