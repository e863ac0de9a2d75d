use domain::user::User;
use domain::value::UserId;
use sea_orm::entity::prelude::*;
use sea_orm::Set;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Default)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    #[sea_orm(column_type = "BigInteger")]
    pub id: i64,
    #[sea_orm(unique)]
    pub username: String,
    pub nickname: String,
    pub avatar: Option<String>,
    pub password: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
    #[sea_orm(column_type = "BigInteger")]
    pub version: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&User> for ActiveModel {
    fn from(user: &User) -> Self {
        Self {
            id: Set(user.id.as_i64()),
            username: Set(user.username.clone()),
            nickname: Set(user.nickname.clone()),
            avatar: Set(user.avatar.clone()),
            password: Set(user.password.clone()),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
            version: Set(user.version),
        }
    }
}

impl From<Model> for User {
    fn from(model: Model) -> Self {
        User {
            id: UserId::from(model.id),
            username: model.username,
            nickname: model.nickname,
            avatar: model.avatar,
            password: model.password,
            created_at: model.created_at,
            updated_at: model.updated_at,
            version: model.version,
        }
    }
}
