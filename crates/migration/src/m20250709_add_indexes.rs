use crate::m20250709_create_all_tables::{
    CourseClasses, Courses, DepartmentCourses, Departments, GenEduCategories, GeneralCourses,
    Subjects,
};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Natural keys are matched during every catalog sync
        manager
            .create_index(
                Index::create()
                    .name("idx_departments_campus_id_code")
                    .table(Departments::Table)
                    .col(Departments::CampusId)
                    .col(Departments::Code)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_subjects_code")
                    .table(Subjects::Table)
                    .col(Subjects::Code)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_gen_edu_categories_code")
                    .table(GenEduCategories::Table)
                    .col(GenEduCategories::Code)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_courses_code")
                    .table(Courses::Table)
                    .col(Courses::Code)
                    .to_owned(),
            )
            .await?;

        // Foreign keys used by nested lookups and search subqueries
        manager
            .create_index(
                Index::create()
                    .name("idx_courses_subject_id")
                    .table(Courses::Table)
                    .col(Courses::SubjectId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_courses_type")
                    .table(Courses::Table)
                    .col(Courses::Type)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_general_courses_category_id")
                    .table(GeneralCourses::Table)
                    .col(GeneralCourses::CategoryId)
                    .to_owned(),
            )
            .await?;

        // The composite primary key already covers lookups by department
        manager
            .create_index(
                Index::create()
                    .name("idx_department_courses_course_id")
                    .table(DepartmentCourses::Table)
                    .col(DepartmentCourses::CourseId)
                    .to_owned(),
            )
            .await?;

        // Classes are listed per course ordered by day and start period
        manager
            .create_index(
                Index::create()
                    .name("idx_course_classes_course_id_day_start")
                    .table(CourseClasses::Table)
                    .col(CourseClasses::CourseId)
                    .col(CourseClasses::DayOfWeek)
                    .col(CourseClasses::StartPeriod)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop indexes in reverse order
        manager
            .drop_index(
                Index::drop()
                    .name("idx_course_classes_course_id_day_start")
                    .table(CourseClasses::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_department_courses_course_id")
                    .table(DepartmentCourses::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_general_courses_category_id")
                    .table(GeneralCourses::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_courses_type")
                    .table(Courses::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_courses_subject_id")
                    .table(Courses::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_courses_code")
                    .table(Courses::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_gen_edu_categories_code")
                    .table(GenEduCategories::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_subjects_code")
                    .table(Subjects::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_departments_campus_id_code")
                    .table(Departments::Table)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}
