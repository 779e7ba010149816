use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use std::sync::Arc;

use crate::dashboard::chart::ChartView;
use crate::dashboard::{DashboardSnapshot, NotificationsView};
use crate::web::models::{
    NavigationRequest, NavigationResponse, NotificationClickRequest, NotificationClickResponse,
};
use crate::web::{AppState, error::AppError};

pub fn create_dashboard_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/dashboard", get(get_snapshot_handler))
        .route("/api/notifications", get(get_notifications_handler))
        .route("/api/notifications/click", post(notification_click_handler))
        .route("/api/navigation", post(navigation_handler))
        .route("/api/charts", get(get_charts_handler))
}

async fn get_snapshot_handler(State(app_state): State<Arc<AppState>>) -> Json<DashboardSnapshot> {
    let dashboard = app_state.dashboard.lock().await;
    Json(dashboard.snapshot())
}

async fn get_notifications_handler(
    State(app_state): State<Arc<AppState>>,
) -> Json<NotificationsView> {
    let dashboard = app_state.dashboard.lock().await;
    Json(dashboard.notifications())
}

async fn notification_click_handler(
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<NotificationClickRequest>,
) -> Json<NotificationClickResponse> {
    let mut dashboard = app_state.dashboard.lock().await;
    let open = dashboard.click_notifications(payload.target);
    Json(NotificationClickResponse { open })
}

async fn navigation_handler(
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<NavigationRequest>,
) -> Result<Json<NavigationResponse>, AppError> {
    let section = payload.section.trim();
    if section.is_empty() {
        return Err(AppError::InvalidInput(
            "Navigation link carries no section id".to_string(),
        ));
    }

    let mut dashboard = app_state.dashboard.lock().await;
    let header_title = dashboard.navigate(section);
    Ok(Json(NavigationResponse {
        active_section: section.to_string(),
        header_title,
    }))
}

async fn get_charts_handler(State(app_state): State<Arc<AppState>>) -> Json<Vec<ChartView>> {
    let dashboard = app_state.dashboard.lock().await;
    Json(dashboard.charts().views())
}
