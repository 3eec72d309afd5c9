//! Detailed overview page for the current domain.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Router, extract::State, response::IntoResponse, routing::get};
use tracing::instrument;

use crate::resolver;
use crate::state::AppState;
use crate::views::{RecordView, portal_link, support_mailto};

/// Overview page template.
///
/// Shows everything the widget shows plus server name, primary domain,
/// website title, the web-support contact box, and the alias and service
/// lists.
#[derive(Template, WebTemplate)]
#[template(path = "overview.html")]
pub struct OverviewTemplate {
    pub current_path: String,
    pub domain: Option<String>,
    pub record: Option<RecordView>,
    pub support_mailto: String,
    pub support_notice: String,
    /// Deep-link into the WMP portal, when enabled and the record has an ID.
    pub portal_url: Option<String>,
}

/// Build the overview router.
pub fn router() -> Router<AppState> {
    Router::new().route("/overview", get(overview))
}

/// Render the overview page.
///
/// GET /overview
#[instrument(skip_all)]
async fn overview(State(state): State<AppState>) -> impl IntoResponse {
    let options = state.options().get().await;

    let Some(domain) = resolver::resolve(state.config()) else {
        return OverviewTemplate {
            current_path: "/overview".to_owned(),
            domain: None,
            record: None,
            support_mailto: String::new(),
            support_notice: options.support_notice,
            portal_url: None,
        };
    };

    let record = state.wmp().domain_data(&domain).await;
    let support_mailto = support_mailto(&options.support_email, &domain, &record);
    let portal_url = portal_link(&record, &state.config().wmp.portal_url, &options);
    let view = (!record.is_empty()).then(|| RecordView::from(&record));

    OverviewTemplate {
        current_path: "/overview".to_owned(),
        domain: Some(domain.into_inner()),
        record: view,
        support_mailto,
        support_notice: options.support_notice,
        portal_url,
    }
}
