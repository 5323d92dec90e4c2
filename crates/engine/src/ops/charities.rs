use sea_orm::{ActiveValue, QueryFilter, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    CharityProfile, EngineError, NewCharityCmd, ResultEngine, charities,
    util::encode_string_list,
};

use super::{Engine, with_tx};

impl Engine {
    /// Register a charity. Names are unique.
    pub async fn new_charity(&self, cmd: NewCharityCmd) -> ResultEngine<String> {
        let name = cmd.name.trim().to_string();
        if name.is_empty() {
            return Err(EngineError::InvalidId(
                "charity name must not be empty".to_string(),
            ));
        }
        with_tx!(self, |db_tx| {
            let existing = charities::Entity::find()
                .filter(charities::Column::Name.eq(name.clone()))
                .one(&db_tx)
                .await?;
            if existing.is_some() {
                return Err(EngineError::InvalidState(format!(
                    "charity '{name}' already registered"
                )));
            }

            let id = Uuid::new_v4().to_string();
            let model = charities::ActiveModel {
                id: ActiveValue::Set(id.clone()),
                name: ActiveValue::Set(name),
                password: ActiveValue::Set(cmd.password),
                primary_category: ActiveValue::Set(cmd.primary_category.trim().to_string()),
                secondary_categories: ActiveValue::Set(encode_string_list(
                    &cmd.secondary_categories,
                )),
                tags: ActiveValue::Set(encode_string_list(&cmd.tags)),
            };
            model.insert(&db_tx).await?;
            Ok(id)
        })
    }

    /// Return the declared matching profile of a charity.
    pub async fn charity_profile(&self, charity_id: &str) -> ResultEngine<CharityProfile> {
        let model = self.require_charity(&self.database, charity_id).await?;
        model.profile()
    }
}
