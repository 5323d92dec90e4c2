use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveValue, Condition, DatabaseTransaction, QueryFilter, QueryOrder, TransactionTrait,
    prelude::*,
};
use uuid::Uuid;

use crate::{
    EngineError, RequestTransitCmd, Resource, ResultEngine, TransitActionCmd, TransitRecord,
    resources, transits,
    util::{normalize_optional_text, parse_uuid},
};

use super::{Engine, with_tx};

impl Engine {
    /// Create a REQUESTED transit and reserve the stock, atomically.
    ///
    /// The requested quantity is re-validated against the current shareable
    /// stock inside the transaction, even when the caller pre-filtered.
    pub async fn request_transit(&self, cmd: RequestTransitCmd) -> ResultEngine<TransitRecord> {
        let _guard = self.lock_resource(cmd.resource_id).await;
        let (record, resource) = with_tx!(self, |db_tx| {
            let mut resource = self.require_resource(&db_tx, cmd.resource_id).await?;
            self.require_charity(&db_tx, &cmd.charity_to).await?;

            let record = TransitRecord::new(
                &resource,
                cmd.charity_to,
                cmd.quantity,
                normalize_optional_text(cmd.notes.as_deref()),
                cmd.requested_at,
            )?;
            resource.reserve_for_share(record.quantity)?;
            resource.updated_at = cmd.requested_at;

            transits::ActiveModel::from(&record).insert(&db_tx).await?;
            self.persist_resource_counters(&db_tx, &resource).await?;
            Ok((record, resource))
        })?;

        let requester = self.charity_display_name(&record.charity_to).await;
        self.emit_transit_notification(
            &record.charity_from,
            "Resource requested",
            format!(
                "{requester} requested {} {} of '{}'",
                record.quantity, resource.unit, resource.name
            ),
            &record,
        )
        .await;
        Ok(record)
    }

    /// REQUESTED -> IN_TRANSIT, by the source charity. Releases the
    /// reservation: the units are on their way.
    pub async fn dispatch_transit(&self, cmd: TransitActionCmd) -> ResultEngine<TransitRecord> {
        let resource_id = self.transit_resource_id(cmd.transit_id).await?;
        let _guard = self.lock_resource(resource_id).await;
        let (record, resource) = with_tx!(self, |db_tx| {
            let mut record = self.require_transit(&db_tx, cmd.transit_id).await?;
            if record.charity_from != cmd.charity_id {
                return Err(EngineError::KeyNotFound("transit not exists".to_string()));
            }
            let mut resource = self.require_resource(&db_tx, record.resource_id).await?;

            record.dispatch(cmd.occurred_at)?;
            resource.release_reservation(record.quantity)?;
            resource.updated_at = cmd.occurred_at;

            self.persist_transit(&db_tx, &record).await?;
            self.persist_resource_counters(&db_tx, &resource).await?;
            Ok((record, resource))
        })?;

        let sender = self.charity_display_name(&record.charity_from).await;
        self.emit_transit_notification(
            &record.charity_to,
            "Resource dispatched",
            format!(
                "{sender} dispatched {} {} of '{}'",
                record.quantity, resource.unit, resource.name
            ),
            &record,
        )
        .await;
        Ok(record)
    }

    /// IN_TRANSIT -> RECEIVED, by the destination charity.
    ///
    /// The destination's own inventory line grows in the same transaction,
    /// guarded by the status check, so a double receive fails and the stock
    /// increase happens exactly once per record. Both the source line and the
    /// destination line (when one already exists) are locked for the duration,
    /// so a concurrent owner update on either line serializes behind this op.
    pub async fn receive_transit(&self, cmd: TransitActionCmd) -> ResultEngine<TransitRecord> {
        let (resource_id, destination_id) = self.receive_lock_keys(cmd.transit_id).await?;
        let _guards = self.lock_resource_pair(resource_id, destination_id).await;
        let (record, resource) = with_tx!(self, |db_tx| {
            let mut record = self.require_transit(&db_tx, cmd.transit_id).await?;
            if record.charity_to != cmd.charity_id {
                return Err(EngineError::KeyNotFound("transit not exists".to_string()));
            }
            let resource = self.require_resource(&db_tx, record.resource_id).await?;

            record.receive(cmd.occurred_at)?;

            self.persist_transit(&db_tx, &record).await?;
            self.add_received_stock(&db_tx, &record, &resource, destination_id, cmd.occurred_at)
                .await?;
            Ok((record, resource))
        })?;

        let receiver = self.charity_display_name(&record.charity_to).await;
        self.emit_transit_notification(
            &record.charity_from,
            "Resource received",
            format!(
                "{receiver} received {} {} of '{}'",
                record.quantity, resource.unit, resource.name
            ),
            &record,
        )
        .await;
        Ok(record)
    }

    /// REQUESTED -> REJECTED, by the source charity. The reservation reversal
    /// is mandatory: shareable stock returns to its pre-request value.
    pub async fn reject_transit(&self, cmd: TransitActionCmd) -> ResultEngine<TransitRecord> {
        let (record, resource) = self
            .close_requested_transit(cmd, RequestClosure::Reject)
            .await?;

        let owner = self.charity_display_name(&record.charity_from).await;
        self.emit_transit_notification(
            &record.charity_to,
            "Request rejected",
            format!(
                "{owner} rejected the request for {} {} of '{}'",
                record.quantity, resource.unit, resource.name
            ),
            &record,
        )
        .await;
        Ok(record)
    }

    /// REQUESTED -> CANCELLED, by the requesting charity. Same reversal as a
    /// rejection.
    pub async fn cancel_transit(&self, cmd: TransitActionCmd) -> ResultEngine<TransitRecord> {
        let (record, resource) = self
            .close_requested_transit(cmd, RequestClosure::Cancel)
            .await?;

        let requester = self.charity_display_name(&record.charity_to).await;
        self.emit_transit_notification(
            &record.charity_from,
            "Request cancelled",
            format!(
                "{requester} cancelled the request for {} {} of '{}'",
                record.quantity, resource.unit, resource.name
            ),
            &record,
        )
        .await;
        Ok(record)
    }

    /// Return a transit record visible to `charity_id`.
    pub async fn transit(&self, transit_id: Uuid, charity_id: &str) -> ResultEngine<TransitRecord> {
        self.require_transit_as(&self.database, transit_id, charity_id)
            .await
    }

    /// List the transits where a charity is either side, most recent first.
    pub async fn list_transits_for_charity(
        &self,
        charity_id: &str,
    ) -> ResultEngine<Vec<TransitRecord>> {
        let models: Vec<transits::Model> = transits::Entity::find()
            .filter(
                Condition::any()
                    .add(transits::Column::CharityFrom.eq(charity_id.to_string()))
                    .add(transits::Column::CharityTo.eq(charity_id.to_string())),
            )
            .order_by_desc(transits::Column::UpdatedAt)
            .all(&self.database)
            .await?;

        models.into_iter().map(TransitRecord::try_from).collect()
    }

    /// Resolve the resource a transit belongs to, for lock keying. The status
    /// itself is re-read under the lock.
    async fn transit_resource_id(&self, transit_id: Uuid) -> ResultEngine<Uuid> {
        let record = self.require_transit(&self.database, transit_id).await?;
        Ok(record.resource_id)
    }

    /// Lock keys for a receive: the source line plus the destination line it
    /// will merge into, if one already exists. Resolved before the locks are
    /// taken; the state of both lines is re-read inside the transaction.
    async fn receive_lock_keys(&self, transit_id: Uuid) -> ResultEngine<(Uuid, Option<Uuid>)> {
        let record = self.require_transit(&self.database, transit_id).await?;
        let source = self.require_resource(&self.database, record.resource_id).await?;

        let destination = resources::Entity::find()
            .filter(resources::Column::CharityId.eq(record.charity_to.clone()))
            .filter(resources::Column::Name.eq(source.name.clone()))
            .filter(resources::Column::Category.eq(source.category.clone()))
            .filter(resources::Column::Unit.eq(source.unit.clone()))
            .one(&self.database)
            .await?;
        let destination_id = destination
            .map(|model| parse_uuid(&model.id, "resource"))
            .transpose()?;

        Ok((record.resource_id, destination_id))
    }

    async fn close_requested_transit(
        &self,
        cmd: TransitActionCmd,
        closure: RequestClosure,
    ) -> ResultEngine<(TransitRecord, Resource)> {
        let resource_id = self.transit_resource_id(cmd.transit_id).await?;
        let _guard = self.lock_resource(resource_id).await;
        with_tx!(self, |db_tx| {
            let mut record = self.require_transit(&db_tx, cmd.transit_id).await?;
            let actor = match closure {
                RequestClosure::Reject => &record.charity_from,
                RequestClosure::Cancel => &record.charity_to,
            };
            if *actor != cmd.charity_id {
                return Err(EngineError::KeyNotFound("transit not exists".to_string()));
            }
            let mut resource = self.require_resource(&db_tx, record.resource_id).await?;

            match closure {
                RequestClosure::Reject => record.reject(cmd.occurred_at)?,
                RequestClosure::Cancel => record.cancel(cmd.occurred_at)?,
            }
            resource.revert_reservation(record.quantity)?;
            resource.updated_at = cmd.occurred_at;

            self.persist_transit(&db_tx, &record).await?;
            self.persist_resource_counters(&db_tx, &resource).await?;
            Ok((record, resource))
        })
    }

    async fn persist_transit(
        &self,
        db_tx: &DatabaseTransaction,
        record: &TransitRecord,
    ) -> ResultEngine<()> {
        let model = transits::ActiveModel {
            id: ActiveValue::Set(record.id.to_string()),
            status: ActiveValue::Set(record.status.as_str().to_string()),
            time_sent: ActiveValue::Set(record.time_sent),
            time_received: ActiveValue::Set(record.time_received),
            updated_at: ActiveValue::Set(record.updated_at),
            ..Default::default()
        };
        model.update(db_tx).await?;
        Ok(())
    }

    /// Grow (or create) the destination charity's own line for the received
    /// units. Matching is by name, category and unit; the matched line was
    /// resolved by [`receive_lock_keys`] and is held locked by the caller.
    ///
    /// [`receive_lock_keys`]: Engine::receive_lock_keys
    async fn add_received_stock(
        &self,
        db_tx: &DatabaseTransaction,
        record: &TransitRecord,
        source: &Resource,
        destination_id: Option<Uuid>,
        now: DateTime<Utc>,
    ) -> ResultEngine<()> {
        match destination_id {
            Some(id) => {
                let mut destination = self.require_resource(db_tx, id).await?;
                destination.add_stock(record.quantity)?;
                destination.updated_at = now;
                self.persist_resource_counters(db_tx, &destination).await
            }
            None => {
                let destination = Resource::new(
                    record.charity_to.clone(),
                    source.name.clone(),
                    source.description.clone(),
                    source.category.clone(),
                    record.quantity,
                    0,
                    source.unit.clone(),
                    None,
                    now,
                )?;
                resources::ActiveModel::from(&destination).insert(db_tx).await?;
                Ok(())
            }
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum RequestClosure {
    Reject,
    Cancel,
}
