use sea_orm::{ConnectionTrait, prelude::*};
use uuid::Uuid;

use crate::{EngineError, Resource, ResultEngine, TransitRecord, charities, resources, transits};

use super::Engine;

impl Engine {
    pub(super) async fn require_resource<C: ConnectionTrait>(
        &self,
        db: &C,
        resource_id: Uuid,
    ) -> ResultEngine<Resource> {
        let model = resources::Entity::find_by_id(resource_id.to_string())
            .one(db)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("resource not exists".to_string()))?;
        Resource::try_from(model)
    }

    /// Look up a resource and hide it from non-owners.
    pub(super) async fn require_owned_resource<C: ConnectionTrait>(
        &self,
        db: &C,
        resource_id: Uuid,
        charity_id: &str,
    ) -> ResultEngine<Resource> {
        let resource = self.require_resource(db, resource_id).await?;
        if resource.charity_id != charity_id {
            return Err(EngineError::KeyNotFound("resource not exists".to_string()));
        }
        Ok(resource)
    }

    pub(super) async fn require_transit<C: ConnectionTrait>(
        &self,
        db: &C,
        transit_id: Uuid,
    ) -> ResultEngine<TransitRecord> {
        let model = transits::Entity::find_by_id(transit_id.to_string())
            .one(db)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("transit not exists".to_string()))?;
        TransitRecord::try_from(model)
    }

    /// Look up a transit and hide it from charities on neither side.
    pub(super) async fn require_transit_as<C: ConnectionTrait>(
        &self,
        db: &C,
        transit_id: Uuid,
        charity_id: &str,
    ) -> ResultEngine<TransitRecord> {
        let record = self.require_transit(db, transit_id).await?;
        if record.charity_from != charity_id && record.charity_to != charity_id {
            return Err(EngineError::KeyNotFound("transit not exists".to_string()));
        }
        Ok(record)
    }

    pub(super) async fn require_charity<C: ConnectionTrait>(
        &self,
        db: &C,
        charity_id: &str,
    ) -> ResultEngine<charities::Model> {
        charities::Entity::find_by_id(charity_id.to_string())
            .one(db)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("charity not exists".to_string()))
    }
}
