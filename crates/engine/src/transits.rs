//! Transit primitives.
//!
//! A `TransitRecord` tracks one resource transfer between two charities from
//! creation to its terminal outcome.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, Resource, ResultEngine, util::parse_uuid};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransitStatus {
    Requested,
    InTransit,
    Received,
    Rejected,
    Cancelled,
}

impl TransitStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Requested => "REQUESTED",
            Self::InTransit => "IN_TRANSIT",
            Self::Received => "RECEIVED",
            Self::Rejected => "REJECTED",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// RECEIVED, REJECTED and CANCELLED permit no further transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Received | Self::Rejected | Self::Cancelled)
    }
}

impl TryFrom<&str> for TransitStatus {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "REQUESTED" => Ok(Self::Requested),
            "IN_TRANSIT" => Ok(Self::InTransit),
            "RECEIVED" => Ok(Self::Received),
            "REJECTED" => Ok(Self::Rejected),
            "CANCELLED" => Ok(Self::Cancelled),
            other => Err(EngineError::InvalidState(format!(
                "invalid transit status: {other}"
            ))),
        }
    }
}

/// One resource transfer between two charities.
///
/// Allowed edges: `REQUESTED -> IN_TRANSIT -> RECEIVED`,
/// `REQUESTED -> REJECTED`, `REQUESTED -> CANCELLED`. `time_sent` is set only
/// on entering IN_TRANSIT, `time_received` only on entering RECEIVED. A record
/// in a terminal status is immutable.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitRecord {
    pub id: Uuid,
    pub resource_id: Uuid,
    pub charity_from: String,
    pub charity_to: String,
    pub quantity: i64,
    pub status: TransitStatus,
    pub notes: Option<String>,
    pub can_expire: bool,
    pub time_sent: Option<DateTime<Utc>>,
    pub time_received: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl TransitRecord {
    /// Create a REQUESTED record for `quantity` units of `resource`.
    ///
    /// The stock precondition (`quantity <= shareable_quantity`) is enforced by
    /// the ledger when the reservation is taken, not here.
    pub fn new(
        resource: &Resource,
        charity_to: String,
        quantity: i64,
        notes: Option<String>,
        now: DateTime<Utc>,
    ) -> ResultEngine<Self> {
        if quantity <= 0 {
            return Err(EngineError::InvalidQuantity(
                "quantity must be > 0".to_string(),
            ));
        }
        if charity_to == resource.charity_id {
            return Err(EngineError::InvalidState(
                "a charity cannot request its own resource".to_string(),
            ));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            resource_id: resource.id,
            charity_from: resource.charity_id.clone(),
            charity_to,
            quantity,
            status: TransitStatus::Requested,
            notes,
            can_expire: resource.can_expire(),
            time_sent: None,
            time_received: None,
            updated_at: now,
        })
    }

    fn require_status(&self, expected: TransitStatus, action: &str) -> ResultEngine<()> {
        if self.status != expected {
            return Err(EngineError::InvalidState(format!(
                "cannot {action} a transit in status {}",
                self.status.as_str()
            )));
        }
        Ok(())
    }

    /// REQUESTED -> IN_TRANSIT, by the source charity.
    pub fn dispatch(&mut self, now: DateTime<Utc>) -> ResultEngine<()> {
        self.require_status(TransitStatus::Requested, "dispatch")?;
        self.status = TransitStatus::InTransit;
        self.time_sent = Some(now);
        self.updated_at = now;
        Ok(())
    }

    /// IN_TRANSIT -> RECEIVED, by the destination charity.
    pub fn receive(&mut self, now: DateTime<Utc>) -> ResultEngine<()> {
        self.require_status(TransitStatus::InTransit, "receive")?;
        self.status = TransitStatus::Received;
        self.time_received = Some(now);
        self.updated_at = now;
        Ok(())
    }

    /// REQUESTED -> REJECTED, by the source charity before dispatch.
    pub fn reject(&mut self, now: DateTime<Utc>) -> ResultEngine<()> {
        self.require_status(TransitStatus::Requested, "reject")?;
        self.status = TransitStatus::Rejected;
        self.updated_at = now;
        Ok(())
    }

    /// REQUESTED -> CANCELLED, by the requesting charity.
    pub fn cancel(&mut self, now: DateTime<Utc>) -> ResultEngine<()> {
        self.require_status(TransitStatus::Requested, "cancel")?;
        self.status = TransitStatus::Cancelled;
        self.updated_at = now;
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "resource_transit")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub resource_id: String,
    pub charity_from: String,
    pub charity_to: String,
    pub quantity: i64,
    pub status: String,
    pub notes: Option<String>,
    pub can_expire: bool,
    pub time_sent: Option<DateTimeUtc>,
    pub time_received: Option<DateTimeUtc>,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::resources::Entity",
        from = "Column::ResourceId",
        to = "super::resources::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Resources,
}

impl Related<super::resources::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Resources.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&TransitRecord> for ActiveModel {
    fn from(record: &TransitRecord) -> Self {
        Self {
            id: ActiveValue::Set(record.id.to_string()),
            resource_id: ActiveValue::Set(record.resource_id.to_string()),
            charity_from: ActiveValue::Set(record.charity_from.clone()),
            charity_to: ActiveValue::Set(record.charity_to.clone()),
            quantity: ActiveValue::Set(record.quantity),
            status: ActiveValue::Set(record.status.as_str().to_string()),
            notes: ActiveValue::Set(record.notes.clone()),
            can_expire: ActiveValue::Set(record.can_expire),
            time_sent: ActiveValue::Set(record.time_sent),
            time_received: ActiveValue::Set(record.time_received),
            updated_at: ActiveValue::Set(record.updated_at),
        }
    }
}

impl TryFrom<Model> for TransitRecord {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "transit")?,
            resource_id: parse_uuid(&model.resource_id, "resource")?,
            charity_from: model.charity_from,
            charity_to: model.charity_to,
            quantity: model.quantity,
            status: TransitStatus::try_from(model.status.as_str())?,
            notes: model.notes,
            can_expire: model.can_expire,
            time_sent: model.time_sent,
            time_received: model.time_received,
            updated_at: model.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resource() -> Resource {
        Resource::new(
            "charity-a".to_string(),
            "Canned Food".to_string(),
            None,
            "Food".to_string(),
            100,
            50,
            "cans".to_string(),
            None,
            Utc::now(),
        )
        .unwrap()
    }

    fn requested() -> TransitRecord {
        TransitRecord::new(&resource(), "charity-b".to_string(), 20, None, Utc::now()).unwrap()
    }

    #[test]
    fn new_record_starts_requested_with_null_timestamps() {
        let record = requested();

        assert_eq!(record.status, TransitStatus::Requested);
        assert!(record.time_sent.is_none());
        assert!(record.time_received.is_none());
    }

    #[test]
    fn new_rejects_zero_quantity() {
        let err = TransitRecord::new(&resource(), "charity-b".to_string(), 0, None, Utc::now())
            .unwrap_err();

        assert!(matches!(err, EngineError::InvalidQuantity(_)));
    }

    #[test]
    fn new_rejects_request_on_own_resource() {
        let err = TransitRecord::new(&resource(), "charity-a".to_string(), 5, None, Utc::now())
            .unwrap_err();

        assert!(matches!(err, EngineError::InvalidState(_)));
    }

    #[test]
    fn happy_path_sets_timestamps_once() {
        let mut record = requested();
        let sent = Utc::now();
        record.dispatch(sent).unwrap();
        assert_eq!(record.status, TransitStatus::InTransit);
        assert_eq!(record.time_sent, Some(sent));
        assert!(record.time_received.is_none());

        let received = Utc::now();
        record.receive(received).unwrap();
        assert_eq!(record.status, TransitStatus::Received);
        assert_eq!(record.time_received, Some(received));
    }

    #[test]
    fn receive_before_dispatch_fails() {
        let mut record = requested();
        let err = record.receive(Utc::now()).unwrap_err();

        assert!(matches!(err, EngineError::InvalidState(_)));
    }

    #[test]
    fn double_dispatch_fails() {
        let mut record = requested();
        record.dispatch(Utc::now()).unwrap();
        let err = record.dispatch(Utc::now()).unwrap_err();

        assert!(matches!(err, EngineError::InvalidState(_)));
    }

    #[test]
    fn terminal_records_refuse_every_transition() {
        for terminal in [
            TransitStatus::Received,
            TransitStatus::Rejected,
            TransitStatus::Cancelled,
        ] {
            let mut record = requested();
            record.status = terminal;
            assert!(record.status.is_terminal());
            assert!(record.dispatch(Utc::now()).is_err());
            assert!(record.receive(Utc::now()).is_err());
            assert!(record.reject(Utc::now()).is_err());
            assert!(record.cancel(Utc::now()).is_err());
        }
    }

    #[test]
    fn reject_and_cancel_only_from_requested() {
        let mut record = requested();
        record.dispatch(Utc::now()).unwrap();

        assert!(record.reject(Utc::now()).is_err());
        assert!(record.cancel(Utc::now()).is_err());
    }

    #[test]
    fn status_round_trips_through_storage_string() {
        for status in [
            TransitStatus::Requested,
            TransitStatus::InTransit,
            TransitStatus::Received,
            TransitStatus::Rejected,
            TransitStatus::Cancelled,
        ] {
            assert_eq!(TransitStatus::try_from(status.as_str()).unwrap(), status);
        }
    }
}
