//! The module contains the representation of a resource and the ledger
//! arithmetic on its stock counters.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, ResultEngine, util::parse_uuid};

/// One inventory line owned by a charity.
///
/// `quantity` is the total units owned. `quantity_reserved` counts units
/// committed to an outbound transit that has not been dispatched yet, and
/// `shareable_quantity` counts units currently offered to other charities.
///
/// The ledger invariant, which must hold at all times:
///
/// `quantity_reserved + shareable_quantity <= quantity`, both `>= 0`.
///
/// Units available for the owner's own use are
/// `quantity - quantity_reserved - shareable_quantity`.
///
/// The reserved/shareable counters are mutated only through the methods below,
/// and only while the engine holds the per-resource lock inside a database
/// transaction.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Resource {
    pub id: Uuid,
    pub charity_id: String,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub quantity: i64,
    pub quantity_reserved: i64,
    pub shareable_quantity: i64,
    pub unit: String,
    pub expires_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl Resource {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        charity_id: String,
        name: String,
        description: Option<String>,
        category: String,
        quantity: i64,
        shareable_quantity: i64,
        unit: String,
        expires_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> ResultEngine<Self> {
        if quantity < 0 {
            return Err(EngineError::InvalidQuantity(
                "quantity must be >= 0".to_string(),
            ));
        }
        if shareable_quantity < 0 || shareable_quantity > quantity {
            return Err(EngineError::InvalidQuantity(format!(
                "shareable_quantity must be within 0..={quantity}"
            )));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            charity_id,
            name,
            description,
            category,
            quantity,
            quantity_reserved: 0,
            shareable_quantity,
            unit,
            expires_at,
            updated_at: now,
        })
    }

    /// Units not reserved and not offered to other charities.
    pub fn available(&self) -> i64 {
        self.quantity - self.quantity_reserved - self.shareable_quantity
    }

    pub fn can_expire(&self) -> bool {
        self.expires_at.is_some()
    }

    /// Move `delta` units from "offered" to "committed" (transit requested).
    pub fn reserve_for_share(&mut self, delta: i64) -> ResultEngine<()> {
        if delta <= 0 {
            return Err(EngineError::InvalidQuantity(
                "quantity must be > 0".to_string(),
            ));
        }
        if delta > self.shareable_quantity {
            return Err(EngineError::InsufficientStock(format!(
                "'{}' has {} shareable units, requested {delta}",
                self.name, self.shareable_quantity
            )));
        }
        self.shareable_quantity -= delta;
        self.quantity_reserved += delta;
        Ok(())
    }

    /// Clear the reservation on dispatch: the units are in transit.
    pub fn release_reservation(&mut self, delta: i64) -> ResultEngine<()> {
        if delta <= 0 {
            return Err(EngineError::InvalidQuantity(
                "quantity must be > 0".to_string(),
            ));
        }
        if delta > self.quantity_reserved {
            return Err(EngineError::InvalidState(format!(
                "'{}' has {} reserved units, cannot release {delta}",
                self.name, self.quantity_reserved
            )));
        }
        self.quantity_reserved -= delta;
        Ok(())
    }

    /// Inverse of [`reserve_for_share`]: restore shareable stock when a
    /// request is rejected or cancelled before dispatch.
    ///
    /// [`reserve_for_share`]: Resource::reserve_for_share
    pub fn revert_reservation(&mut self, delta: i64) -> ResultEngine<()> {
        if delta <= 0 {
            return Err(EngineError::InvalidQuantity(
                "quantity must be > 0".to_string(),
            ));
        }
        if delta > self.quantity_reserved {
            return Err(EngineError::InvalidState(format!(
                "'{}' has {} reserved units, cannot revert {delta}",
                self.name, self.quantity_reserved
            )));
        }
        self.quantity_reserved -= delta;
        self.shareable_quantity += delta;
        Ok(())
    }

    /// Administrative update of the offered stock by the owner.
    pub fn set_shareable(&mut self, new_shareable: i64) -> ResultEngine<()> {
        if new_shareable < 0 {
            return Err(EngineError::InvalidQuantity(
                "shareable_quantity must be >= 0".to_string(),
            ));
        }
        if self.quantity_reserved + new_shareable > self.quantity {
            return Err(EngineError::InvalidQuantity(format!(
                "'{}': {} reserved + {new_shareable} shareable exceeds {} total units",
                self.name, self.quantity_reserved, self.quantity
            )));
        }
        self.shareable_quantity = new_shareable;
        Ok(())
    }

    /// Add received units to the destination charity's own line.
    pub fn add_stock(&mut self, delta: i64) -> ResultEngine<()> {
        if delta <= 0 {
            return Err(EngineError::InvalidQuantity(
                "quantity must be > 0".to_string(),
            ));
        }
        self.quantity += delta;
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "resources")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub charity_id: String,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub quantity: i64,
    pub quantity_reserved: i64,
    pub shareable_quantity: i64,
    pub unit: String,
    pub expires_at: Option<DateTimeUtc>,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::transits::Entity")]
    Transits,
    #[sea_orm(
        belongs_to = "super::charities::Entity",
        from = "Column::CharityId",
        to = "super::charities::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Charities,
}

impl Related<super::transits::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transits.def()
    }
}

impl Related<super::charities::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Charities.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Resource> for ActiveModel {
    fn from(resource: &Resource) -> Self {
        Self {
            id: ActiveValue::Set(resource.id.to_string()),
            charity_id: ActiveValue::Set(resource.charity_id.clone()),
            name: ActiveValue::Set(resource.name.clone()),
            description: ActiveValue::Set(resource.description.clone()),
            category: ActiveValue::Set(resource.category.clone()),
            quantity: ActiveValue::Set(resource.quantity),
            quantity_reserved: ActiveValue::Set(resource.quantity_reserved),
            shareable_quantity: ActiveValue::Set(resource.shareable_quantity),
            unit: ActiveValue::Set(resource.unit.clone()),
            expires_at: ActiveValue::Set(resource.expires_at),
            updated_at: ActiveValue::Set(resource.updated_at),
        }
    }
}

impl TryFrom<Model> for Resource {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "resource")?,
            charity_id: model.charity_id,
            name: model.name,
            description: model.description,
            category: model.category,
            quantity: model.quantity,
            quantity_reserved: model.quantity_reserved,
            shareable_quantity: model.shareable_quantity,
            unit: model.unit,
            expires_at: model.expires_at,
            updated_at: model.updated_at,
        })
    }
}
