use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "departments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub code: String,
    pub name: String,
    pub campus_id: i32,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::campuses::Entity",
        from = "Column::CampusId",
        to = "super::campuses::Column::Id",
        on_delete = "Cascade"
    )]
    Campus,
    #[sea_orm(has_many = "super::department_courses::Entity")]
    DepartmentCourses,
}

impl Related<super::campuses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Campus.def()
    }
}

impl Related<super::department_courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DepartmentCourses.def()
    }
}

// Many-to-many relationship with courses
impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        super::department_courses::Relation::Course.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::department_courses::Relation::Department.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
