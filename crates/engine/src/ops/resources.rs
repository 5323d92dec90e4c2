use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveValue, DatabaseTransaction, QueryFilter, QueryOrder, TransactionTrait, prelude::*,
};
use uuid::Uuid;

use crate::{
    NewResourceCmd, Resource, ResultEngine, resources, util::normalize_optional_text,
};

use super::{Engine, with_tx};

impl Engine {
    /// Create a resource line for a charity.
    pub async fn new_resource(&self, cmd: NewResourceCmd) -> ResultEngine<Resource> {
        with_tx!(self, |db_tx| {
            self.require_charity(&db_tx, &cmd.charity_id).await?;
            let resource = Resource::new(
                cmd.charity_id,
                cmd.name.trim().to_string(),
                normalize_optional_text(cmd.description.as_deref()),
                cmd.category.trim().to_string(),
                cmd.quantity,
                cmd.shareable_quantity,
                cmd.unit,
                cmd.expires_at,
                cmd.created_at,
            )?;
            resources::ActiveModel::from(&resource).insert(&db_tx).await?;
            Ok(resource)
        })
    }

    /// Return a [`Resource`].
    pub async fn resource(&self, resource_id: Uuid) -> ResultEngine<Resource> {
        self.require_resource(&self.database, resource_id).await
    }

    /// List the resources a charity owns, most recently updated first.
    pub async fn list_resources(&self, charity_id: &str) -> ResultEngine<Vec<Resource>> {
        let models: Vec<resources::Model> = resources::Entity::find()
            .filter(resources::Column::CharityId.eq(charity_id.to_string()))
            .order_by_desc(resources::Column::UpdatedAt)
            .all(&self.database)
            .await?;

        models.into_iter().map(Resource::try_from).collect()
    }

    /// List other charities' resources with shareable stock.
    ///
    /// Readers take no lock and may observe slightly stale counters.
    pub async fn list_shareable(&self, exclude_charity_id: &str) -> ResultEngine<Vec<Resource>> {
        let models: Vec<resources::Model> = resources::Entity::find()
            .filter(resources::Column::CharityId.ne(exclude_charity_id.to_string()))
            .filter(resources::Column::ShareableQuantity.gt(0))
            .order_by_asc(resources::Column::Name)
            .order_by_asc(resources::Column::Id)
            .all(&self.database)
            .await?;

        models.into_iter().map(Resource::try_from).collect()
    }

    /// Administrative update of the offered stock, by the owner only.
    pub async fn set_shareable_quantity(
        &self,
        resource_id: Uuid,
        charity_id: &str,
        new_shareable: i64,
        now: DateTime<Utc>,
    ) -> ResultEngine<Resource> {
        let _guard = self.lock_resource(resource_id).await;
        with_tx!(self, |db_tx| {
            let mut resource = self
                .require_owned_resource(&db_tx, resource_id, charity_id)
                .await?;
            resource.set_shareable(new_shareable)?;
            resource.updated_at = now;
            self.persist_resource_counters(&db_tx, &resource).await?;
            Ok(resource)
        })
    }

    /// Persist the denormalized stock counters of one resource.
    pub(super) async fn persist_resource_counters(
        &self,
        db_tx: &DatabaseTransaction,
        resource: &Resource,
    ) -> ResultEngine<()> {
        let model = resources::ActiveModel {
            id: ActiveValue::Set(resource.id.to_string()),
            quantity: ActiveValue::Set(resource.quantity),
            quantity_reserved: ActiveValue::Set(resource.quantity_reserved),
            shareable_quantity: ActiveValue::Set(resource.shareable_quantity),
            updated_at: ActiveValue::Set(resource.updated_at),
            ..Default::default()
        };
        model.update(db_tx).await?;
        Ok(())
    }
}
