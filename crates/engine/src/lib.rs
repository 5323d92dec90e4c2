//! Resource transit and inventory-reservation engine.
//!
//! The engine owns the `resources` and `resource_transit` tables and is the
//! sole mutator of each resource's reserved/shareable counters. Mutating
//! operations serialize per resource and run inside a single database
//! transaction, so the ledger invariant
//! (`quantity_reserved + shareable_quantity <= quantity`) holds even under
//! concurrent callers.

pub use commands::{NewCharityCmd, NewResourceCmd, RequestTransitCmd, TransitActionCmd};
pub use error::EngineError;
pub use matching::{CharityProfile, score_match};
pub use notifications::Notification;
pub use ops::{Engine, EngineBuilder};
pub use resources::Resource;
pub use transits::{TransitRecord, TransitStatus};

mod charities;
mod commands;
mod error;
mod matching;
mod notifications;
mod ops;
mod resources;
mod transits;
mod util;

type ResultEngine<T> = Result<T, EngineError>;
