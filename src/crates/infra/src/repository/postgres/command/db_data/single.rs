use domain::catalog::Single;
use sea_orm::entity::prelude::*;
use sea_orm::Set;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "single")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name_cn: String,
    pub release_date: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Single> for ActiveModel {
    fn from(single: &Single) -> Self {
        Self {
            id: Set(single.id.clone()),
            name_cn: Set(single.name_cn.clone()),
            release_date: Set(single.release_date.clone()),
            description: Set(single.description.clone()),
        }
    }
}

impl From<Model> for model::catalog::Single {
    fn from(m: Model) -> Self {
        model::catalog::Single {
            id: m.id,
            name_cn: m.name_cn,
            release_date: m.release_date,
            description: m.description,
        }
    }
}
