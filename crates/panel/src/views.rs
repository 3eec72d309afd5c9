//! Shared view models for the panel pages.
//!
//! The widget and the overview page render the same record. These helpers
//! pre-format every field once, so the templates stay declarative and the
//! placeholder rules live in exactly one place (the `wmp-core` accessors).

use wmp_core::{DomainRecord, SiteDomain};

use crate::options::PanelOptions;

/// Pre-formatted record fields shared by the widget and the overview page.
#[derive(Debug, Clone)]
pub struct RecordView {
    pub id: String,
    pub customer_number: String,
    pub servername: String,
    pub server: String,
    pub primary_domain: String,
    pub title: String,
    pub responsible_name: String,
    pub responsible_email: String,
    pub webmaster_name: String,
    pub webmaster_email: String,
    /// Activation date, already formatted as `DD.MM.YYYY` where possible.
    pub active_since: String,
    pub services: Vec<String>,
    pub aliases: Vec<String>,
}

impl From<&DomainRecord> for RecordView {
    fn from(record: &DomainRecord) -> Self {
        Self {
            id: record.id_display(),
            customer_number: record.customer_number_display().to_owned(),
            servername: record.servername_display().to_owned(),
            server: record.server_display().to_owned(),
            primary_domain: record.primary_domain_display().to_owned(),
            title: record.title_display().to_owned(),
            responsible_name: record.responsible_name_display().to_owned(),
            responsible_email: record.responsible_email_display().to_owned(),
            webmaster_name: record.webmaster_name_display().to_owned(),
            webmaster_email: record.webmaster_email_display().to_owned(),
            active_since: record.active_since_display(),
            services: record.services().to_vec(),
            aliases: record.aliases().to_vec(),
        }
    }
}

/// Build the pre-filled support link for a domain.
///
/// The subject embeds the domain and the WMP record ID, so support can
/// place the request without asking back.
#[must_use]
pub fn support_mailto(support_email: &str, domain: &SiteDomain, record: &DomainRecord) -> String {
    let subject = format!(
        "Website support for {domain} (WMP ID {})",
        record.id_display()
    );
    format!(
        "mailto:{support_email}?subject={}",
        urlencoding::encode(&subject)
    )
}

/// Build the deep-link into the WMP portal for `record`.
///
/// Returns `None` when the record has no ID or portal links are disabled
/// in the options.
#[must_use]
pub fn portal_link(
    record: &DomainRecord,
    portal_base: &str,
    options: &PanelOptions,
) -> Option<String> {
    if !options.portal_links {
        return None;
    }

    record
        .id
        .map(|id| format!("{}/domains/{id}", portal_base.trim_end_matches('/')))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn record() -> DomainRecord {
        serde_json::from_value(json!({
            "id": 4711,
            "servername": "www.blogs.fau.de",
            "aktivseit": "2020-01-15",
            "serveralias": ["blogs.fau.de"],
            "instanz": { "kunu": "1000123", "dienste": ["cms"] }
        }))
        .unwrap()
    }

    fn options(portal_links: bool) -> PanelOptions {
        PanelOptions {
            portal_links,
            ..PanelOptions::default()
        }
    }

    #[test]
    fn test_view_formats_known_fields() {
        let view = RecordView::from(&record());

        assert_eq!(view.id, "4711");
        assert_eq!(view.customer_number, "1000123");
        assert_eq!(view.servername, "www.blogs.fau.de");
        assert_eq!(view.active_since, "15.01.2020");
        assert_eq!(view.services, ["cms"]);
        assert_eq!(view.aliases, ["blogs.fau.de"]);
    }

    #[test]
    fn test_view_substitutes_placeholders() {
        let view = RecordView::from(&DomainRecord::default());

        assert_eq!(view.id, DomainRecord::PLACEHOLDER);
        assert_eq!(view.server, DomainRecord::PLACEHOLDER);
        assert_eq!(view.webmaster_email, DomainRecord::PLACEHOLDER);
        assert_eq!(view.active_since, DomainRecord::PLACEHOLDER);
        assert!(view.services.is_empty());
        assert!(view.aliases.is_empty());
    }

    #[test]
    fn test_portal_link_requires_id_and_enabled_option() {
        let base = "https://www.wmp.rrze.fau.de/";

        assert_eq!(
            portal_link(&record(), base, &options(true)).as_deref(),
            Some("https://www.wmp.rrze.fau.de/domains/4711")
        );

        // Option disabled
        assert!(portal_link(&record(), base, &options(false)).is_none());

        // No record ID
        assert!(portal_link(&DomainRecord::default(), base, &options(true)).is_none());
    }

    #[test]
    fn test_support_mailto_embeds_domain_and_id() {
        let domain = SiteDomain::new("www.blogs.fau.de");
        let link = support_mailto("webmaster@fau.de", &domain, &record());

        assert!(link.starts_with("mailto:webmaster@fau.de?subject="));
        assert!(link.contains("www.blogs.fau.de"));
        assert!(link.contains("4711"));
        // Spaces in the subject are percent-encoded.
        assert!(!link.contains(' '));
    }

    #[test]
    fn test_support_mailto_with_empty_record_uses_placeholder() {
        let domain = SiteDomain::new("www.blogs.fau.de");
        let link = support_mailto("webmaster@fau.de", &domain, &DomainRecord::default());

        assert!(link.contains(&urlencoding::encode("N/A").into_owned()));
    }
}
