use sea_orm::{QueryFilter, QueryOrder, QuerySelect, prelude::*};

use crate::{Notification, ResultEngine, TransitRecord, notifications};

use super::Engine;

impl Engine {
    /// Append an outbox row for a transit transition.
    ///
    /// Best effort: a failed insert must not undo the committed transition,
    /// so the error is dropped here. Delivery and retries belong to the
    /// outbox relay, not the engine.
    pub(super) async fn emit_transit_notification(
        &self,
        charity_id: &str,
        title: &str,
        body: String,
        record: &TransitRecord,
    ) {
        let notification = Notification::new(
            charity_id.to_string(),
            title.to_string(),
            body,
            record.id,
            record.updated_at,
        );
        let _ = notifications::ActiveModel::from(&notification)
            .insert(&self.database)
            .await;
    }

    /// Display name of a charity for notification bodies. Emission is best
    /// effort, so a failed lookup falls back to the id instead of erroring.
    pub(super) async fn charity_display_name(&self, charity_id: &str) -> String {
        match self.require_charity(&self.database, charity_id).await {
            Ok(model) => model.name,
            Err(_) => charity_id.to_string(),
        }
    }

    /// List the newest notifications addressed to a charity.
    pub async fn list_notifications(
        &self,
        charity_id: &str,
        limit: u64,
    ) -> ResultEngine<Vec<Notification>> {
        let models: Vec<notifications::Model> = notifications::Entity::find()
            .filter(notifications::Column::CharityId.eq(charity_id.to_string()))
            .order_by_desc(notifications::Column::CreatedAt)
            .limit(limit)
            .all(&self.database)
            .await?;

        models.into_iter().map(Notification::try_from).collect()
    }
}
