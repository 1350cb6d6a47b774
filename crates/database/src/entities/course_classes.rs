use models::{ClassPeriod, DayOfWeek, ValidationError};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "course_classes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub course_id: i32,
    pub day_of_week: i32,
    pub start_period: i32,
    pub end_period: i32,
    pub created_at: DateTimeUtc,
}

impl Model {
    pub fn period(&self) -> Result<ClassPeriod, ValidationError> {
        ClassPeriod::new(
            DayOfWeek::new(self.day_of_week)?,
            self.start_period,
            self.end_period,
        )
    }

    /// [`ClassPeriod::conflicts_with`] on stored rows. A row holding an invalid
    /// period conflicts with nothing.
    pub fn conflicts_with(&self, other: &Model) -> bool {
        match (self.period(), other.period()) {
            (Ok(a), Ok(b)) => a.conflicts_with(&b),
            _ => false,
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::courses::Entity",
        from = "Column::CourseId",
        to = "super::courses::Column::Id",
        on_delete = "Cascade"
    )]
    Course,
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
