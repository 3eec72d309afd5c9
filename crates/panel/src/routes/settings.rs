//! Panel settings page.
//!
//! A three-field form persisted through [`crate::options::OptionsStore`].
//! Saves follow the post/redirect/get pattern: the browser is redirected
//! back to the form with a message key in the query string.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Router,
    extract::{Query, State},
    response::Redirect,
    routing::get,
};
use serde::Deserialize;
use tracing::instrument;

use crate::options::{MAX_EMAIL_CHARS, MAX_NOTICE_CHARS, PanelOptions};
use crate::state::AppState;

/// Settings page template.
#[derive(Template, WebTemplate)]
#[template(path = "settings.html")]
pub struct SettingsTemplate {
    pub current_path: String,
    pub options: PanelOptions,
    pub success_message: Option<String>,
    pub error_message: Option<String>,
}

/// Build the settings router.
pub fn router() -> Router<AppState> {
    Router::new().route("/settings", get(settings_page).post(save_settings))
}

#[derive(Debug, Deserialize)]
pub struct SettingsQueryParams {
    pub success: Option<String>,
    pub error: Option<String>,
}

/// Submitted settings form. The checkbox field is absent when unchecked.
#[derive(Debug, Deserialize)]
pub struct SettingsForm {
    #[serde(default)]
    pub portal_links: Option<String>,
    #[serde(default)]
    pub support_email: String,
    #[serde(default)]
    pub support_notice: String,
}

/// Render the settings page.
///
/// GET /settings
#[instrument(skip_all)]
async fn settings_page(
    State(state): State<AppState>,
    Query(params): Query<SettingsQueryParams>,
) -> SettingsTemplate {
    // Map success/error messages
    let success_message = params.success.map(|s| match s.as_str() {
        "saved" => "Settings saved.".to_owned(),
        _ => s,
    });

    let error_message = params.error.map(|e| match e.as_str() {
        "invalid_email" => "The support email address is not valid.".to_owned(),
        "save_failed" => "Settings could not be saved. Please try again.".to_owned(),
        _ => e,
    });

    SettingsTemplate {
        current_path: "/settings".to_owned(),
        options: state.options().get().await,
        success_message,
        error_message,
    }
}

/// Persist the settings form.
///
/// POST /settings
#[instrument(skip_all)]
async fn save_settings(
    State(state): State<AppState>,
    Form(form): Form<SettingsForm>,
) -> Redirect {
    let support_email = form.support_email.trim().to_owned();
    if let Err(reason) = validate_support_email(&support_email) {
        tracing::debug!(reason, "Rejected support email");
        return Redirect::to("/settings?error=invalid_email");
    }

    let options = PanelOptions {
        portal_links: form.portal_links.is_some(),
        support_email,
        support_notice: sanitize_notice(&form.support_notice),
    };

    match state.options().save(options).await {
        Ok(()) => Redirect::to("/settings?success=saved"),
        Err(e) => {
            tracing::error!(error = %e, "Failed to save panel options");
            Redirect::to("/settings?error=save_failed")
        }
    }
}

// =============================================================================
// Form Sanitization
// =============================================================================

/// Validate the support email address.
///
/// Deliberately minimal: a bounded length, no whitespace, and a local part
/// and domain around an @ symbol. Anything stricter rejects real addresses.
fn validate_support_email(email: &str) -> Result<(), &'static str> {
    if email.is_empty() {
        return Err("empty");
    }
    if email.len() > MAX_EMAIL_CHARS {
        return Err("too long");
    }
    if email.chars().any(char::is_whitespace) {
        return Err("contains whitespace");
    }

    let Some(at_pos) = email.find('@') else {
        return Err("missing @ symbol");
    };
    if at_pos == 0 {
        return Err("empty local part");
    }
    if at_pos == email.len() - 1 {
        return Err("empty domain");
    }

    Ok(())
}

/// Strip control characters (keeping line breaks) and cap the length.
fn sanitize_notice(input: &str) -> String {
    let cleaned: String = input
        .chars()
        .filter(|c| *c == '\n' || !c.is_control())
        .collect();

    cleaned.trim().chars().take(MAX_NOTICE_CHARS).collect()
}
