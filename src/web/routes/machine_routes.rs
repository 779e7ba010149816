use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
};
use std::sync::Arc;

use crate::dashboard::SubmitOutcome;
use crate::dashboard::machine::{MachineForm, MachineId, MachineRow};
use crate::dashboard::modal::MachineModal;
use crate::web::models::{DeleteMachineQuery, DeleteMachineResponse, SubmitMachineResponse};
use crate::web::{AppState, error::AppError};

pub fn create_machine_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_machines_handler).post(submit_machine_handler))
        .route("/modal", post(open_add_modal_handler).delete(close_modal_handler))
        .route("/{machine_id}/edit", post(open_edit_modal_handler))
        .route("/{machine_id}", delete(delete_machine_handler))
}

async fn list_machines_handler(
    State(app_state): State<Arc<AppState>>,
) -> Json<Vec<MachineRow>> {
    let dashboard = app_state.dashboard.lock().await;
    Json(dashboard.machines().rows())
}

async fn submit_machine_handler(
    State(app_state): State<Arc<AppState>>,
    Json(form): Json<MachineForm>,
) -> Result<(StatusCode, Json<SubmitMachineResponse>), AppError> {
    let mut dashboard = app_state.dashboard.lock().await;
    let outcome = dashboard.submit_machine(form)?;

    let (status, id) = match outcome {
        SubmitOutcome::Added(id) => (StatusCode::CREATED, id),
        SubmitOutcome::Updated(id) => (StatusCode::OK, id),
    };
    let machine = dashboard
        .machines()
        .row(id)
        .ok_or_else(|| AppError::NotFound(format!("Machine {id} vanished after submit")))?;

    Ok((status, Json(SubmitMachineResponse { outcome, machine })))
}

async fn open_add_modal_handler(State(app_state): State<Arc<AppState>>) -> Json<MachineModal> {
    let mut dashboard = app_state.dashboard.lock().await;
    dashboard.open_add_modal();
    Json(dashboard.modal().clone())
}

async fn open_edit_modal_handler(
    State(app_state): State<Arc<AppState>>,
    Path(machine_id): Path<u32>,
) -> Result<Json<MachineModal>, AppError> {
    let mut dashboard = app_state.dashboard.lock().await;
    dashboard.open_edit_modal(MachineId(machine_id))?;
    Ok(Json(dashboard.modal().clone()))
}

async fn close_modal_handler(State(app_state): State<Arc<AppState>>) -> StatusCode {
    let mut dashboard = app_state.dashboard.lock().await;
    dashboard.close_modal();
    StatusCode::NO_CONTENT
}

async fn delete_machine_handler(
    State(app_state): State<Arc<AppState>>,
    Path(machine_id): Path<u32>,
    Query(query): Query<DeleteMachineQuery>,
) -> Result<Json<DeleteMachineResponse>, AppError> {
    let mut dashboard = app_state.dashboard.lock().await;
    let answer = |_: &str| query.confirm;
    let outcome = dashboard.delete_machine(MachineId(machine_id), &answer)?;

    Ok(Json(DeleteMachineResponse {
        outcome,
        remaining: dashboard.machines().records().len(),
    }))
}
