//! Charity accounts: the auth entity and the registration endpoint.

use api_types::charity::{CharityCreated, CharityNew};
use axum::{Json, extract::State, http::StatusCode};
use engine::NewCharityCmd;
use sea_orm::entity::prelude::*;

use crate::{ServerError, server::ServerState};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "charities")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub password: String,
    pub primary_category: String,
    pub secondary_categories: String,
    pub tags: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Register a new charity. This is the only unauthenticated endpoint.
pub async fn register(
    State(state): State<ServerState>,
    Json(payload): Json<CharityNew>,
) -> Result<(StatusCode, Json<CharityCreated>), ServerError> {
    let cmd = NewCharityCmd::new(payload.name, payload.password, payload.primary_category)
        .secondary_categories(payload.secondary_categories.unwrap_or_default())
        .tags(payload.tags.unwrap_or_default());

    let id = state.engine.new_charity(cmd).await?;

    Ok((StatusCode::CREATED, Json(CharityCreated { id })))
}
