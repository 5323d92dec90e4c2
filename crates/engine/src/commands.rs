//! Command structs for engine operations.
//!
//! These types group parameters for write operations, keeping call sites
//! readable and avoiding long argument lists. The acting charity and the
//! operation timestamp are always explicit so the engine stays deterministic
//! under test.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Create a resource line for a charity.
#[derive(Clone, Debug)]
pub struct NewResourceCmd {
    pub charity_id: String,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub quantity: i64,
    pub shareable_quantity: i64,
    pub unit: String,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl NewResourceCmd {
    #[must_use]
    pub fn new(
        charity_id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        quantity: i64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            charity_id: charity_id.into(),
            name: name.into(),
            description: None,
            category: category.into(),
            quantity,
            shareable_quantity: 0,
            unit: "units".to_string(),
            expires_at: None,
            created_at,
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn shareable_quantity(mut self, shareable_quantity: i64) -> Self {
        self.shareable_quantity = shareable_quantity;
        self
    }

    #[must_use]
    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    #[must_use]
    pub fn expires_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }
}

/// Request a transit of `quantity` units to `charity_to`.
#[derive(Clone, Debug)]
pub struct RequestTransitCmd {
    pub resource_id: Uuid,
    /// The requesting (destination) charity; it is also the acting charity.
    pub charity_to: String,
    pub quantity: i64,
    pub notes: Option<String>,
    pub requested_at: DateTime<Utc>,
}

impl RequestTransitCmd {
    #[must_use]
    pub fn new(
        resource_id: Uuid,
        charity_to: impl Into<String>,
        quantity: i64,
        requested_at: DateTime<Utc>,
    ) -> Self {
        Self {
            resource_id,
            charity_to: charity_to.into(),
            quantity,
            notes: None,
            requested_at,
        }
    }

    #[must_use]
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Act on an existing transit record (dispatch, receive, reject, cancel).
#[derive(Clone, Debug)]
pub struct TransitActionCmd {
    pub transit_id: Uuid,
    /// The acting charity. Which side may act depends on the transition.
    pub charity_id: String,
    pub occurred_at: DateTime<Utc>,
}

impl TransitActionCmd {
    #[must_use]
    pub fn new(transit_id: Uuid, charity_id: impl Into<String>, occurred_at: DateTime<Utc>) -> Self {
        Self {
            transit_id,
            charity_id: charity_id.into(),
            occurred_at,
        }
    }
}

/// Register a charity with its matching profile.
#[derive(Clone, Debug)]
pub struct NewCharityCmd {
    pub name: String,
    pub password: String,
    pub primary_category: String,
    pub secondary_categories: Vec<String>,
    pub tags: Vec<String>,
}

impl NewCharityCmd {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        password: impl Into<String>,
        primary_category: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            password: password.into(),
            primary_category: primary_category.into(),
            secondary_categories: Vec::new(),
            tags: Vec::new(),
        }
    }

    #[must_use]
    pub fn secondary_categories(mut self, secondary_categories: Vec<String>) -> Self {
        self.secondary_categories = secondary_categories;
        self
    }

    #[must_use]
    pub fn tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }
}
