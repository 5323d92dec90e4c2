//! Resource inventory API endpoints.

use api_types::resource::{
    ResourceCreated, ResourceListResponse, ResourceNew, ResourceView, ShareableUpdate,
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use engine::NewResourceCmd;
use uuid::Uuid;

use crate::{ServerError, charity, server::ServerState};

pub fn map_resource(resource: engine::Resource) -> ResourceView {
    ResourceView {
        id: resource.id,
        charity_id: resource.charity_id,
        name: resource.name,
        description: resource.description,
        category: resource.category,
        quantity: resource.quantity,
        quantity_reserved: resource.quantity_reserved,
        shareable_quantity: resource.shareable_quantity,
        unit: resource.unit,
        expires_at: resource.expires_at,
        updated_at: resource.updated_at,
    }
}

/// Handle requests for creating a new inventory line.
pub async fn create(
    Extension(charity): Extension<charity::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<ResourceNew>,
) -> Result<(StatusCode, Json<ResourceCreated>), ServerError> {
    let mut cmd = NewResourceCmd::new(
        charity.id,
        payload.name,
        payload.category,
        payload.quantity,
        Utc::now(),
    )
    .shareable_quantity(payload.shareable_quantity.unwrap_or(0))
    .unit(payload.unit);

    if let Some(description) = payload.description {
        cmd = cmd.description(description);
    }
    if let Some(expires_at) = payload.expires_at {
        cmd = cmd.expires_at(expires_at);
    }

    let resource = state.engine.new_resource(cmd).await?;

    Ok((StatusCode::CREATED, Json(ResourceCreated { id: resource.id })))
}

/// List the authenticated charity's own inventory.
pub async fn list(
    Extension(charity): Extension<charity::Model>,
    State(state): State<ServerState>,
) -> Result<Json<ResourceListResponse>, ServerError> {
    let resources = state.engine.list_resources(&charity.id).await?;

    Ok(Json(ResourceListResponse {
        resources: resources.into_iter().map(map_resource).collect(),
    }))
}

pub async fn get(
    Extension(_charity): Extension<charity::Model>,
    State(state): State<ServerState>,
    Path(resource_id): Path<Uuid>,
) -> Result<Json<ResourceView>, ServerError> {
    let resource = state.engine.resource(resource_id).await?;

    Ok(Json(map_resource(resource)))
}

/// Change the shareable portion of an owned resource.
pub async fn update_shareable(
    Extension(charity): Extension<charity::Model>,
    State(state): State<ServerState>,
    Path(resource_id): Path<Uuid>,
    Json(payload): Json<ShareableUpdate>,
) -> Result<Json<ResourceView>, ServerError> {
    let resource = state
        .engine
        .set_shareable_quantity(resource_id, &charity.id, payload.shareable_quantity, Utc::now())
        .await?;

    Ok(Json(map_resource(resource)))
}
