//! Notification outbox rows.
//!
//! Each transit transition appends one row addressed to the charity that did
//! not act. Rows are append-only; delivery is a collaborator's job and is not
//! part of the engine's transactional boundary.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, util::parse_uuid};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub charity_id: String,
    pub title: String,
    pub body: String,
    pub transit_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(
        charity_id: String,
        title: String,
        body: String,
        transit_id: Uuid,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            charity_id,
            title,
            body,
            transit_id,
            created_at: now,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "notifications")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub charity_id: String,
    pub title: String,
    pub body: String,
    pub transit_id: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Notification> for ActiveModel {
    fn from(notification: &Notification) -> Self {
        Self {
            id: ActiveValue::Set(notification.id.to_string()),
            charity_id: ActiveValue::Set(notification.charity_id.clone()),
            title: ActiveValue::Set(notification.title.clone()),
            body: ActiveValue::Set(notification.body.clone()),
            transit_id: ActiveValue::Set(notification.transit_id.to_string()),
            created_at: ActiveValue::Set(notification.created_at),
        }
    }
}

impl TryFrom<Model> for Notification {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "notification")?,
            charity_id: model.charity_id,
            title: model.title,
            body: model.body,
            transit_id: parse_uuid(&model.transit_id, "transit")?,
            created_at: model.created_at,
        })
    }
}
