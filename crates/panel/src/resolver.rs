//! Current-domain resolution.
//!
//! The panel always reports on exactly one domain. In production that is
//! the host part of the configured site URL; everywhere else it is the
//! fixture domain, so development and staging run against known-good WMP
//! data without touching live records.

use tracing::warn;
use wmp_core::SiteDomain;

use crate::config::PanelConfig;

/// Determine the domain the panel reports on.
///
/// Returns `None` only in production, when the configured site URL cannot
/// be reduced to a host. Callers render that as an unknown-domain notice
/// instead of failing the page.
#[must_use]
pub fn resolve(config: &PanelConfig) -> Option<SiteDomain> {
    if !config.environment.is_production() {
        return Some(SiteDomain::new(config.wmp.fixture_domain.clone()));
    }

    let domain = config
        .site_url
        .as_deref()
        .and_then(SiteDomain::from_site_url);

    if domain.is_none() {
        warn!(
            site_url = config.site_url.as_deref().unwrap_or(""),
            "Could not extract a host from SITE_URL"
        );
    }

    domain
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::path::PathBuf;
    use std::time::Duration;

    use super::*;
    use crate::config::{Environment, WmpConfig};

    fn config(environment: Environment, site_url: Option<&str>) -> PanelConfig {
        PanelConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3001,
            environment,
            site_url: site_url.map(str::to_owned),
            wmp: WmpConfig {
                api_base_url: "https://www.wmp.rrze.fau.de/api/cms/config/servername/".to_owned(),
                portal_url: "https://www.wmp.rrze.fau.de".to_owned(),
                fixture_domain: "www.wp.rrze.fau.de".to_owned(),
                http_timeout: Duration::from_secs(10),
                cache_ttl: Duration::from_secs(86400),
            },
            options_path: PathBuf::from("panel-options.json"),
            log_file: None,
            sentry_dsn: None,
        }
    }

    #[test]
    fn test_non_production_reports_fixture_domain() {
        // Even with a perfectly good site URL configured.
        let resolved = resolve(&config(
            Environment::Development,
            Some("https://www.blogs.fau.de"),
        ));
        assert_eq!(resolved.unwrap().as_str(), "www.wp.rrze.fau.de");

        let resolved = resolve(&config(Environment::Staging, None));
        assert_eq!(resolved.unwrap().as_str(), "www.wp.rrze.fau.de");
    }

    #[test]
    fn test_production_extracts_host_from_site_url() {
        let resolved = resolve(&config(
            Environment::Production,
            Some("https://www.blogs.fau.de/physik/"),
        ));
        assert_eq!(resolved.unwrap().as_str(), "www.blogs.fau.de");
    }

    #[test]
    fn test_production_with_unparseable_site_url_is_none() {
        assert!(resolve(&config(Environment::Production, Some("not a url"))).is_none());
        assert!(resolve(&config(Environment::Production, Some("www.blogs.fau.de"))).is_none());
    }

    #[test]
    fn test_production_without_site_url_is_none() {
        // Config loading rejects this combination at boot; the resolver
        // still degrades gracefully when handed it directly.
        assert!(resolve(&config(Environment::Production, None)).is_none());
    }
}
