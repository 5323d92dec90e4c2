use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

use serde::Serialize;
pub use server::{run, run_with_listener, spawn_with_listener};

mod charity;
mod matching;
mod notifications;
mod resources;
mod server;
mod transits;

pub mod types {
    pub mod charity {
        pub use api_types::charity::{CharityCreated, CharityNew};
    }

    pub mod resource {
        pub use api_types::resource::{
            ResourceCreated, ResourceListResponse, ResourceNew, ResourceView, ShareableUpdate,
        };
    }

    pub mod transit {
        pub use api_types::transit::{
            TransitCreated, TransitListResponse, TransitNew, TransitStatus, TransitView,
        };
    }

    pub mod matching {
        pub use api_types::matching::{CandidateListResponse, CandidateQuery, CandidateView};
    }

    pub mod notification {
        pub use api_types::notification::{NotificationListResponse, NotificationView};
    }
}

pub enum ServerError {
    Engine(EngineError),
    Generic(String),
}

//TODO: Find a better solution
#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::InvalidState(_) => StatusCode::CONFLICT,
        EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        EngineError::InsufficientStock(_)
        | EngineError::InvalidQuantity(_)
        | EngineError::InvalidId(_) => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => {
                (status_for_engine_error(&err), message_for_engine_error(err))
            }
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
        };

        (status, Json(Error { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}
