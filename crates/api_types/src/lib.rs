use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod charity {
    use super::*;

    /// Request body for registering a charity.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct CharityNew {
        pub name: String,
        pub password: String,
        pub primary_category: String,
        pub secondary_categories: Option<Vec<String>>,
        pub tags: Option<Vec<String>>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CharityCreated {
        pub id: String,
    }
}

pub mod resource {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ResourceNew {
        pub name: String,
        pub description: Option<String>,
        pub category: String,
        pub quantity: i64,
        /// Portion of `quantity` offered to other charities. Defaults to 0.
        pub shareable_quantity: Option<i64>,
        pub unit: String,
        /// RFC3339 timestamp. Absent for non-perishable stock.
        pub expires_at: Option<DateTime<Utc>>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ResourceCreated {
        pub id: Uuid,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ResourceView {
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

    /// Request body for changing the shareable portion of a resource.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ShareableUpdate {
        pub shareable_quantity: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ResourceListResponse {
        pub resources: Vec<ResourceView>,
    }
}

pub mod transit {
    use super::*;

    /// Lifecycle of a transfer request.
    ///
    /// `REQUESTED` may move to `IN_TRANSIT`, `REJECTED` or `CANCELLED`;
    /// `IN_TRANSIT` may only move to `RECEIVED`. Everything else is terminal.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
    pub enum TransitStatus {
        Requested,
        InTransit,
        Received,
        Rejected,
        Cancelled,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransitNew {
        pub resource_id: Uuid,
        pub quantity: i64,
        pub notes: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransitCreated {
        pub id: Uuid,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransitView {
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

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransitListResponse {
        pub transits: Vec<TransitView>,
    }
}

pub mod matching {
    use super::*;

    /// Query for ranked shareable resources.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct CandidateQuery {
        /// Free-text need, e.g. "blankets for winter shelter".
        pub recommendation: Option<String>,
    }

    /// A shareable resource together with its match score (0..=100).
    #[derive(Debug, Serialize, Deserialize)]
    pub struct CandidateView {
        pub resource: super::resource::ResourceView,
        pub score: u8,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CandidateListResponse {
        pub candidates: Vec<CandidateView>,
    }
}

pub mod notification {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct NotificationView {
        pub id: Uuid,
        pub title: String,
        pub body: String,
        pub transit_id: Uuid,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct NotificationListResponse {
        pub notifications: Vec<NotificationView>,
    }
}
