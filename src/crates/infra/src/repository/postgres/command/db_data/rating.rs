use domain::rating::{Rating, RatingError, Score};
use domain::value::{RatingId, ResourceKind, ResourceRef};
use sea_orm::entity::prelude::*;
use sea_orm::Set;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "rating")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    #[sea_orm(column_type = "BigInteger")]
    pub id: i64,
    pub resource_type: String,
    pub resource_id: String,
    pub username: String,
    #[sea_orm(column_type = "Double")]
    pub score: f64,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Rating> for ActiveModel {
    fn from(rating: &Rating) -> Self {
        Self {
            id: Set(rating.id.as_i64()),
            resource_type: Set(rating.resource.kind.to_string()),
            resource_id: Set(rating.resource.id.clone()),
            username: Set(rating.username.clone()),
            score: Set(rating.score.as_f64()),
            created_at: Set(rating.created_at),
            updated_at: Set(rating.updated_at),
        }
    }
}

impl TryFrom<Model> for Rating {
    type Error = RatingError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let kind = ResourceKind::try_from(model.resource_type.as_str())
            .map_err(RatingError::DbErr)?;
        Ok(Rating {
            id: RatingId::from(model.id),
            resource: ResourceRef::new(kind, &model.resource_id),
            username: model.username,
            score: Score::try_from(model.score)?,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
