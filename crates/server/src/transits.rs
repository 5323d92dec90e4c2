//! Transit API endpoints.

use api_types::transit::{
    TransitCreated, TransitListResponse, TransitNew, TransitStatus as ApiStatus, TransitView,
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use engine::{RequestTransitCmd, TransitActionCmd};
use uuid::Uuid;

use crate::{ServerError, charity, server::ServerState};

fn map_status(status: engine::TransitStatus) -> ApiStatus {
    match status {
        engine::TransitStatus::Requested => ApiStatus::Requested,
        engine::TransitStatus::InTransit => ApiStatus::InTransit,
        engine::TransitStatus::Received => ApiStatus::Received,
        engine::TransitStatus::Rejected => ApiStatus::Rejected,
        engine::TransitStatus::Cancelled => ApiStatus::Cancelled,
    }
}

fn map_transit(record: engine::TransitRecord) -> TransitView {
    TransitView {
        id: record.id,
        resource_id: record.resource_id,
        charity_from: record.charity_from,
        charity_to: record.charity_to,
        quantity: record.quantity,
        status: map_status(record.status),
        notes: record.notes,
        can_expire: record.can_expire,
        time_sent: record.time_sent,
        time_received: record.time_received,
        updated_at: record.updated_at,
    }
}

/// Request units of another charity's shareable resource.
pub async fn request(
    Extension(charity): Extension<charity::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<TransitNew>,
) -> Result<(StatusCode, Json<TransitCreated>), ServerError> {
    let mut cmd = RequestTransitCmd::new(
        payload.resource_id,
        charity.id,
        payload.quantity,
        Utc::now(),
    );
    if let Some(notes) = payload.notes {
        cmd = cmd.notes(notes);
    }

    let record = state.engine.request_transit(cmd).await?;

    Ok((StatusCode::CREATED, Json(TransitCreated { id: record.id })))
}

pub async fn dispatch(
    Extension(charity): Extension<charity::Model>,
    State(state): State<ServerState>,
    Path(transit_id): Path<Uuid>,
) -> Result<Json<TransitView>, ServerError> {
    let cmd = TransitActionCmd::new(transit_id, charity.id, Utc::now());
    let record = state.engine.dispatch_transit(cmd).await?;

    Ok(Json(map_transit(record)))
}

pub async fn receive(
    Extension(charity): Extension<charity::Model>,
    State(state): State<ServerState>,
    Path(transit_id): Path<Uuid>,
) -> Result<Json<TransitView>, ServerError> {
    let cmd = TransitActionCmd::new(transit_id, charity.id, Utc::now());
    let record = state.engine.receive_transit(cmd).await?;

    Ok(Json(map_transit(record)))
}

pub async fn reject(
    Extension(charity): Extension<charity::Model>,
    State(state): State<ServerState>,
    Path(transit_id): Path<Uuid>,
) -> Result<Json<TransitView>, ServerError> {
    let cmd = TransitActionCmd::new(transit_id, charity.id, Utc::now());
    let record = state.engine.reject_transit(cmd).await?;

    Ok(Json(map_transit(record)))
}

pub async fn cancel(
    Extension(charity): Extension<charity::Model>,
    State(state): State<ServerState>,
    Path(transit_id): Path<Uuid>,
) -> Result<Json<TransitView>, ServerError> {
    let cmd = TransitActionCmd::new(transit_id, charity.id, Utc::now());
    let record = state.engine.cancel_transit(cmd).await?;

    Ok(Json(map_transit(record)))
}

pub async fn get(
    Extension(charity): Extension<charity::Model>,
    State(state): State<ServerState>,
    Path(transit_id): Path<Uuid>,
) -> Result<Json<TransitView>, ServerError> {
    let record = state.engine.transit(transit_id, &charity.id).await?;

    Ok(Json(map_transit(record)))
}

/// List the transits the authenticated charity is involved in.
pub async fn list(
    Extension(charity): Extension<charity::Model>,
    State(state): State<ServerState>,
) -> Result<Json<TransitListResponse>, ServerError> {
    let records = state.engine.list_transits_for_charity(&charity.id).await?;

    Ok(Json(TransitListResponse {
        transits: records.into_iter().map(map_transit).collect(),
    }))
}
