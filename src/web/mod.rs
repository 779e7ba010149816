use axum::{
    Router,
    http::Method,
    routing::get,
};
use rust_embed::RustEmbed;
use std::sync::Arc;
use tera::Tera;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};

use crate::dashboard::Dashboard;
use crate::web::{error::AppError, routes::*};

pub mod error;
pub mod models;
pub mod routes;

pub const PAGE_TEMPLATE: &str = "index.html";

#[derive(RustEmbed, Clone)]
#[folder = "assets/templates"]
pub struct Templates;

#[derive(RustEmbed, Clone)]
#[folder = "assets/static"]
pub struct StaticAssets;

#[derive(Clone)]
pub struct AppState {
    pub dashboard: Arc<Mutex<Dashboard>>,
    pub templates: Arc<Tera>,
}

impl AppState {
    pub fn new(dashboard: Dashboard) -> Result<Self, AppError> {
        Ok(AppState {
            dashboard: Arc::new(Mutex::new(dashboard)),
            templates: Arc::new(load_templates()?),
        })
    }
}

fn load_templates() -> Result<Tera, AppError> {
    let page = Templates::get(PAGE_TEMPLATE).ok_or_else(|| {
        AppError::InternalServerError(format!("Embedded template {PAGE_TEMPLATE} is missing"))
    })?;
    let source = std::str::from_utf8(page.data.as_ref())
        .map_err(|e| AppError::InternalServerError(format!("Template is not UTF-8: {e}")))?;

    let mut tera = Tera::default();
    tera.add_raw_template(PAGE_TEMPLATE, source)?;
    Ok(tera)
}

async fn health_check_handler() -> &'static str {
    "OK"
}

pub fn create_axum_router(app_state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(vec![Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(health_check_handler))
        .merge(page_routes::create_page_router())
        .merge(dashboard_routes::create_dashboard_router())
        .nest("/api/machines", machine_routes::create_machine_router())
        .with_state(app_state)
        .layer(cors)
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_health_check() {
        let app = app();
        let response = send(&app, empty_request("GET", "/api/health")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "OK");
    }

    #[test]
    fn test_page_template_is_embedded() {
        assert!(super::load_templates().is_ok());
    }
}
