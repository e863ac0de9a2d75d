use super::db_data::user::{self, ActiveModel, Entity};
use async_trait::async_trait;
use domain::user::{User, UserError};
use sea_orm::*;
use std::sync::Arc;

#[derive(Clone)]
pub struct UserRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl UserRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl domain::user::UserRepository for UserRepositoryImpl {
    async fn find_by_username<'a>(&'a self, username: &'a str) -> Result<Option<User>, UserError> {
        let result = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(self.db.as_ref())
            .await
            .map_err(|e| UserError::DbErr(e.to_string()))?;
        Ok(result.map(|model| model.into()))
    }

    async fn save<'a>(&'a self, agg: &User) -> Result<(), UserError> {
        let mut active_model: ActiveModel = agg.into();
        // select by id
        let existing = user::Entity::find_by_id(agg.id.as_i64())
            .one(self.db.as_ref())
            .await
            .map_err(|e| UserError::DbErr(e.to_string()))?;
        match existing {
            Some(existing) => {
                active_model.version = Set(existing.version + 1);
                let update_condition = Condition::all()
                    .add(user::Column::Id.eq(agg.id.as_i64()))
                    .add(user::Column::Version.lt(agg.version + 1));
                let result = Entity::update_many()
                    .set(active_model)
                    .filter(update_condition)
                    .exec(self.db.as_ref())
                    .await
                    .map_err(|e| UserError::DbErr(e.to_string()))?;
                if result.rows_affected == 0 {
                    return Err(UserError::VersionConflictErr(agg.version));
                }
            }
            None => {
                active_model.version = Set(1);
                Entity::insert(active_model)
                    .exec(self.db.as_ref())
                    .await
                    .map_err(|e| match e.sql_err() {
                        Some(SqlErr::UniqueConstraintViolation(_)) => {
                            UserError::UsernameTaken(agg.username.clone())
                        }
                        _ => UserError::DbErr(e.to_string()),
                    })?;
            }
        }
        Ok(())
    }
}
