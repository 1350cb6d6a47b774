use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "gen_edu_categories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub code: String,
    pub name: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::general_courses::Entity")]
    GeneralCourses,
}

impl Related<super::general_courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GeneralCourses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
