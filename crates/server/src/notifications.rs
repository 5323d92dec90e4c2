//! Notification inbox API endpoint.

use api_types::notification::{NotificationListResponse, NotificationView};
use axum::{Extension, Json, extract::State};

use crate::{ServerError, charity, server::ServerState};

const DEFAULT_LIMIT: u64 = 50;

/// List the newest notifications addressed to the authenticated charity.
pub async fn list(
    Extension(charity): Extension<charity::Model>,
    State(state): State<ServerState>,
) -> Result<Json<NotificationListResponse>, ServerError> {
    let notifications = state
        .engine
        .list_notifications(&charity.id, DEFAULT_LIMIT)
        .await?;

    Ok(Json(NotificationListResponse {
        notifications: notifications
            .into_iter()
            .map(|notification| NotificationView {
                id: notification.id,
                title: notification.title,
                body: notification.body,
                transit_id: notification.transit_id,
                created_at: notification.created_at,
            })
            .collect(),
    }))
}
