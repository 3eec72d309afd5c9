//! WMP domain record types.
//!
//! The WMP config API answers a domain lookup with a one-entry JSON object
//! keyed by the internal record ID:
//!
//! ```json
//! { "4711": { "id": 4711, "servername": "www.example.fau.de", "..." : "..." } }
//! ```
//!
//! [`DomainRecord`] models the inner object. Deserialization is deliberately
//! lenient: unknown fields are ignored, missing fields default, and every
//! field is optional so upstream schema drift never fails a whole response.
//! Templates read fields through the `*_display` accessors, which substitute
//! [`DomainRecord::PLACEHOLDER`] for anything absent.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A hosted-domain record from the WMP config API.
///
/// ## Examples
///
/// ```
/// use wmp_core::DomainRecord;
///
/// let record: DomainRecord = serde_json::from_value(serde_json::json!({
///     "id": 4711,
///     "servername": "www.example.fau.de",
///     "aktivseit": "2020-01-15"
/// })).unwrap();
///
/// assert_eq!(record.id_display(), "4711");
/// assert_eq!(record.active_since_display(), "15.01.2020");
/// assert_eq!(record.server_display(), DomainRecord::PLACEHOLDER);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomainRecord {
    /// Internal WMP record ID.
    pub id: Option<i64>,
    /// Canonical server name of the website.
    pub servername: Option<String>,
    /// Physical host serving the website.
    pub server: Option<String>,
    /// ISO 8601 date (`YYYY-MM-DD`) the domain went live.
    pub aktivseit: Option<String>,
    /// Additional domains answering for the same website.
    pub serveralias: Vec<String>,
    /// Hosting instance the domain belongs to.
    pub instanz: Option<Instance>,
    /// Contact persons for the website.
    pub persons: Option<Persons>,
}

/// Hosting instance details nested in a [`DomainRecord`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Instance {
    /// Customer number of the hosting contract.
    pub kunu: Option<String>,
    /// Primary domain of the instance.
    pub primary_domain: Option<String>,
    /// Human-readable website title.
    pub title: Option<String>,
    /// Administrative contact address.
    pub adminemail: Option<String>,
    /// Hostname the instance runs on.
    pub hostname: Option<String>,
    /// Services booked for the instance.
    pub dienste: Vec<String>,
}

/// Contact persons nested in a [`DomainRecord`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Persons {
    /// Person responsible for the website.
    pub responsible: Option<Contact>,
    /// Webmaster of the website.
    pub webmaster: Option<Contact>,
}

/// A single contact person.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    /// Display name.
    pub name: Option<String>,
    /// Email address.
    pub email: Option<String>,
}

impl DomainRecord {
    /// Placeholder shown for missing fields.
    pub const PLACEHOLDER: &'static str = "N/A";

    /// Extract the record from the API's one-entry envelope.
    ///
    /// The envelope is keyed by the record ID; the key itself is discarded.
    /// Returns `None` when `envelope` is not a JSON object, is empty, or its
    /// first value does not deserialize as a record.
    #[must_use]
    pub fn from_envelope(envelope: serde_json::Value) -> Option<Self> {
        let serde_json::Value::Object(map) = envelope else {
            return None;
        };

        map.into_iter()
            .next()
            .and_then(|(_, value)| serde_json::from_value(value).ok())
    }

    /// `true` when the record carries no data at all.
    ///
    /// The API responds with an empty object for domains it does not know;
    /// such responses deserialize to a default record.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Record ID as a string, or the placeholder.
    #[must_use]
    pub fn id_display(&self) -> String {
        self.id
            .map_or_else(|| Self::PLACEHOLDER.to_owned(), |id| id.to_string())
    }

    /// Customer number, or the placeholder.
    #[must_use]
    pub fn customer_number_display(&self) -> &str {
        self.instanz
            .as_ref()
            .and_then(|instanz| instanz.kunu.as_deref())
            .unwrap_or(Self::PLACEHOLDER)
    }

    /// Server name, or the placeholder.
    #[must_use]
    pub fn servername_display(&self) -> &str {
        self.servername.as_deref().unwrap_or(Self::PLACEHOLDER)
    }

    /// Physical server, or the placeholder.
    #[must_use]
    pub fn server_display(&self) -> &str {
        self.server.as_deref().unwrap_or(Self::PLACEHOLDER)
    }

    /// Primary domain of the instance, or the placeholder.
    #[must_use]
    pub fn primary_domain_display(&self) -> &str {
        self.instanz
            .as_ref()
            .and_then(|instanz| instanz.primary_domain.as_deref())
            .unwrap_or(Self::PLACEHOLDER)
    }

    /// Website title, or the placeholder.
    #[must_use]
    pub fn title_display(&self) -> &str {
        self.instanz
            .as_ref()
            .and_then(|instanz| instanz.title.as_deref())
            .unwrap_or(Self::PLACEHOLDER)
    }

    /// Name of the responsible person, or the placeholder.
    #[must_use]
    pub fn responsible_name_display(&self) -> &str {
        self.responsible()
            .and_then(|contact| contact.name.as_deref())
            .unwrap_or(Self::PLACEHOLDER)
    }

    /// Email of the responsible person, or the placeholder.
    #[must_use]
    pub fn responsible_email_display(&self) -> &str {
        self.responsible()
            .and_then(|contact| contact.email.as_deref())
            .unwrap_or(Self::PLACEHOLDER)
    }

    /// Name of the webmaster, or the placeholder.
    #[must_use]
    pub fn webmaster_name_display(&self) -> &str {
        self.webmaster()
            .and_then(|contact| contact.name.as_deref())
            .unwrap_or(Self::PLACEHOLDER)
    }

    /// Email of the webmaster, or the placeholder.
    #[must_use]
    pub fn webmaster_email_display(&self) -> &str {
        self.webmaster()
            .and_then(|contact| contact.email.as_deref())
            .unwrap_or(Self::PLACEHOLDER)
    }

    /// Activation date formatted as `DD.MM.YYYY`.
    ///
    /// Falls back to the raw upstream value when it is not an ISO 8601
    /// date, and to the placeholder when it is absent.
    #[must_use]
    pub fn active_since_display(&self) -> String {
        self.aktivseit.as_ref().map_or_else(
            || Self::PLACEHOLDER.to_owned(),
            |raw| {
                NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .map_or_else(|_| raw.clone(), |date| date.format("%d.%m.%Y").to_string())
            },
        )
    }

    /// Booked services, empty when none are known.
    #[must_use]
    pub fn services(&self) -> &[String] {
        self.instanz
            .as_ref()
            .map_or(&[], |instanz| instanz.dienste.as_slice())
    }

    /// Domain aliases, empty when none are known.
    #[must_use]
    pub fn aliases(&self) -> &[String] {
        &self.serveralias
    }

    fn responsible(&self) -> Option<&Contact> {
        self.persons
            .as_ref()
            .and_then(|persons| persons.responsible.as_ref())
    }

    fn webmaster(&self) -> Option<&Contact> {
        self.persons
            .as_ref()
            .and_then(|persons| persons.webmaster.as_ref())
    }
}
