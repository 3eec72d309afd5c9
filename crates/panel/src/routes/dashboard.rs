//! Dashboard route with the compact domain widget.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Router, extract::State, response::IntoResponse, routing::get};
use tracing::instrument;

use crate::resolver;
use crate::state::AppState;
use crate::views::{RecordView, support_mailto};

/// Dashboard page template.
///
/// `domain` is `None` when the current domain could not be determined,
/// `record` is `None` when WMP has no data for it; the template renders a
/// notice for either case.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub current_path: String,
    pub domain: Option<String>,
    pub record: Option<RecordView>,
    pub support_mailto: String,
}

/// Build the dashboard router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(dashboard))
}

/// Render the dashboard with the domain widget.
///
/// GET /
#[instrument(skip_all)]
async fn dashboard(State(state): State<AppState>) -> impl IntoResponse {
    let options = state.options().get().await;

    let Some(domain) = resolver::resolve(state.config()) else {
        return DashboardTemplate {
            current_path: "/".to_owned(),
            domain: None,
            record: None,
            support_mailto: String::new(),
        };
    };

    let record = state.wmp().domain_data(&domain).await;
    let support_mailto = support_mailto(&options.support_email, &domain, &record);
    let view = (!record.is_empty()).then(|| RecordView::from(&record));

    DashboardTemplate {
        current_path: "/".to_owned(),
        domain: Some(domain.into_inner()),
        record: view,
        support_mailto,
    }
}
