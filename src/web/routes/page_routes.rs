use axum::{
    Router,
    body::Body,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use std::sync::Arc;
use tera::Context;
use tracing::debug;

use crate::version::VERSION;
use crate::web::{AppState, PAGE_TEMPLATE, StaticAssets, error::AppError};

pub fn create_page_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(index_handler))
        .route("/static/{*path}", get(static_asset_handler))
}

async fn index_handler(State(app_state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    let snapshot = app_state.dashboard.lock().await.snapshot();

    let mut context = Context::from_serialize(&snapshot)?;
    context.insert("version", VERSION);
    let page = app_state.templates.render(PAGE_TEMPLATE, &context)?;
    Ok(Html(page))
}

async fn static_asset_handler(Path(path): Path<String>) -> Response {
    match StaticAssets::get(&path) {
        Some(asset) => {
            let mime = mime_guess::from_path(&path).first_or_octet_stream();
            (
                [(header::CONTENT_TYPE, mime.as_ref().to_string())],
                Body::from(asset.data.into_owned()),
            )
                .into_response()
        }
        None => {
            debug!(%path, "Static asset not found.");
            (StatusCode::NOT_FOUND, "Not Found").into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::dashboard::DashboardSettings;
    use crate::dashboard::navigator::{SectionKind, SectionSpec};
    use crate::web::test_support::*;
    use axum::http::{StatusCode, header};
    use serde_json::json;

    #[tokio::test]
    async fn test_page_renders_machine_rows_and_badges() {
        let app = app();
        send(
            &app,
            json_request(
                "POST",
                "/api/machines",
                json!({ "name": "Mesin <Lobi>", "location": "Gedung A", "status": "Maintenance" }),
            ),
        )
        .await;

        let response = send(&app, empty_request("GET", "/")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;

        assert!(html.contains("Mesin &lt;Lobi&gt;"));
        assert!(html.contains("bg-yellow-200 text-yellow-800 px-2 py-1 rounded"));
        assert!(html.contains("tdsChart"));
        assert!(html.contains("TDS (ppm)"));
    }

    #[tokio::test]
    async fn test_page_hides_closed_panels() {
        let app = app();
        let html = body_text(send(&app, empty_request("GET", "/")).await).await;

        assert!(html.contains(r#"id="notificationDropdown" class="hidden"#));
        assert!(html.contains(r#"id="machineModal" class="hidden"#));
        assert!(html.contains(r#"<h2 id="headerTitle""#));
    }

    #[tokio::test]
    async fn test_open_dropdown_is_rendered_visible() {
        let app = app();
        send(
            &app,
            json_request("POST", "/api/notifications/click", json!({ "target": "button" })),
        )
        .await;
        let html = body_text(send(&app, empty_request("GET", "/")).await).await;
        assert!(!html.contains(r#"id="notificationDropdown" class="hidden"#));
    }

    #[tokio::test]
    async fn test_custom_sections_render_by_kind() {
        let app = app_with(DashboardSettings {
            sections: vec![
                SectionSpec::new("overview", SectionKind::Charts),
                SectionSpec::new("machines", SectionKind::Machines),
            ],
            ..Default::default()
        });
        let html = body_text(send(&app, empty_request("GET", "/")).await).await;

        assert!(html.contains(r#"<section id="machines""#));
        assert!(html.contains(r#"id="addMachineButton""#));
        assert!(html.contains(r#"id="machineTableBody""#));
        assert_eq!(html.matches(r#"<canvas id="tdsChart">"#).count(), 1);
        assert_eq!(html.matches(r#"<canvas id="phChart">"#).count(), 1);
        assert!(html.contains(r#"data-section="overview">Overview</a>"#));
    }

    #[tokio::test]
    async fn test_status_select_uses_page_labels() {
        let app = app();
        send(
            &app,
            json_request(
                "POST",
                "/api/machines",
                json!({ "name": "Mesin A", "location": "Lobby", "status": "Aktif" }),
            ),
        )
        .await;
        send(&app, empty_request("POST", "/api/machines/1/edit")).await;
        let html = body_text(send(&app, empty_request("GET", "/")).await).await;

        assert!(html.contains(r#"<option value="Aktif" selected>Aktif</option>"#));
        assert!(html.contains(r#"px-2 py-1 rounded">Aktif</span>"#));
    }

    #[tokio::test]
    async fn test_static_script_is_served() {
        let app = app();
        let response = send(&app, empty_request("GET", "/static/dashboard.js")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
        assert!(content_type.contains("javascript"));

        let response = send(&app, empty_request("GET", "/static/missing.js")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
