//! Site domain type.

use core::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

/// A bare domain name identifying a hosted website.
///
/// This is the lookup key for the WMP config API: no scheme, no port, no
/// path, just the host part of a site URL. Construction does not validate
/// beyond host extraction; the API answers unknown domains with an empty
/// response, which callers render as "no data".
///
/// ## Examples
///
/// ```
/// use wmp_core::SiteDomain;
///
/// let domain = SiteDomain::from_site_url("https://www.blogs.fau.de/physik/").unwrap();
/// assert_eq!(domain.as_str(), "www.blogs.fau.de");
///
/// // Relative URLs and scheme-only strings have no host
/// assert!(SiteDomain::from_site_url("www.blogs.fau.de").is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct SiteDomain(String);

impl SiteDomain {
    /// Wrap an already-bare domain name.
    pub fn new(domain: impl Into<String>) -> Self {
        Self(domain.into())
    }

    /// Extract the host from a full site URL.
    ///
    /// Returns `None` when `site_url` does not parse as an absolute URL or
    /// parses to a URL without a host component.
    #[must_use]
    pub fn from_site_url(site_url: &str) -> Option<Self> {
        let url = Url::parse(site_url.trim()).ok()?;
        url.host_str().map(Self::new)
    }

    /// Returns the domain as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `SiteDomain` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for SiteDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for SiteDomain {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
