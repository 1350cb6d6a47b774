use models::CourseType;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Base row of the course hierarchy; `course_type` tells which subtype table
/// holds the rest of the course
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub code: String,
    #[sea_orm(column_name = "type", column_type = "Text")]
    pub course_type: CourseType,
    pub instructor: Option<String>,
    pub credit: f64,
    pub subject_id: i32,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::subjects::Entity",
        from = "Column::SubjectId",
        to = "super::subjects::Column::Id",
        on_delete = "Cascade"
    )]
    Subject,
    #[sea_orm(has_one = "super::general_courses::Entity")]
    GeneralCourse,
    #[sea_orm(has_one = "super::major_courses::Entity")]
    MajorCourse,
    #[sea_orm(has_many = "super::course_classes::Entity")]
    Classes,
    #[sea_orm(has_many = "super::department_courses::Entity")]
    DepartmentCourses,
}

impl Related<super::subjects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subject.def()
    }
}

impl Related<super::general_courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GeneralCourse.def()
    }
}

impl Related<super::major_courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MajorCourse.def()
    }
}

impl Related<super::course_classes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Classes.def()
    }
}

impl Related<super::department_courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DepartmentCourses.def()
    }
}

// Many-to-many relationship with departments
impl Related<super::departments::Entity> for Entity {
    fn to() -> RelationDef {
        super::department_courses::Relation::Department.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::department_courses::Relation::Course.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
