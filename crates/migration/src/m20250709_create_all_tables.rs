use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create campuses table
        manager
            .create_table(
                Table::create()
                    .table(Campuses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Campuses::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Campuses::Code).string_len(40).not_null())
                    .col(ColumnDef::new(Campuses::Name).string_len(80).not_null())
                    .col(
                        ColumnDef::new(Campuses::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Create departments table
        manager
            .create_table(
                Table::create()
                    .table(Departments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Departments::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Departments::Code).string_len(40).not_null())
                    .col(ColumnDef::new(Departments::Name).string_len(80).not_null())
                    .col(ColumnDef::new(Departments::CampusId).integer().not_null())
                    .col(
                        ColumnDef::new(Departments::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-departments-campus_id")
                            .from(Departments::Table, Departments::CampusId)
                            .to(Campuses::Table, Campuses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create subjects table
        manager
            .create_table(
                Table::create()
                    .table(Subjects::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Subjects::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Subjects::Code).string_len(40).not_null())
                    .col(ColumnDef::new(Subjects::Name).string_len(80).not_null())
                    .col(
                        ColumnDef::new(Subjects::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Create gen_edu_categories table
        manager
            .create_table(
                Table::create()
                    .table(GenEduCategories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GenEduCategories::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(GenEduCategories::Code)
                            .string_len(40)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GenEduCategories::Name)
                            .string_len(80)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GenEduCategories::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Create courses table (base of the general/major hierarchy)
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Courses::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Courses::Code).string_len(40).not_null())
                    .col(ColumnDef::new(Courses::Type).string_len(40).not_null())
                    .col(ColumnDef::new(Courses::Instructor).string_len(80))
                    .col(
                        ColumnDef::new(Courses::Credit)
                            .double()
                            .not_null()
                            .check(Expr::col(Courses::Credit).gte(0.0)),
                    )
                    .col(ColumnDef::new(Courses::SubjectId).integer().not_null())
                    .col(
                        ColumnDef::new(Courses::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-courses-subject_id")
                            .from(Courses::Table, Courses::SubjectId)
                            .to(Subjects::Table, Subjects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create general_courses table (joined subtype of courses)
        manager
            .create_table(
                Table::create()
                    .table(GeneralCourses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GeneralCourses::Id)
                            .integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(GeneralCourses::CategoryId)
                            .integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-general_courses-id")
                            .from(GeneralCourses::Table, GeneralCourses::Id)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-general_courses-category_id")
                            .from(GeneralCourses::Table, GeneralCourses::CategoryId)
                            .to(GenEduCategories::Table, GenEduCategories::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create major_courses table (joined subtype of courses)
        manager
            .create_table(
                Table::create()
                    .table(MajorCourses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MajorCourses::Id)
                            .integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(MajorCourses::TargetGrade)
                            .integer()
                            .null()
                            .check(
                                Expr::col(MajorCourses::TargetGrade)
                                    .is_null()
                                    .or(Expr::col(MajorCourses::TargetGrade).gte(0)),
                            ),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-major_courses-id")
                            .from(MajorCourses::Table, MajorCourses::Id)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create department_courses junction table (many-to-many)
        manager
            .create_table(
                Table::create()
                    .table(DepartmentCourses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DepartmentCourses::DepartmentId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DepartmentCourses::CourseId)
                            .integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(DepartmentCourses::DepartmentId)
                            .col(DepartmentCourses::CourseId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-department_courses-department_id")
                            .from(DepartmentCourses::Table, DepartmentCourses::DepartmentId)
                            .to(Departments::Table, Departments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-department_courses-course_id")
                            .from(DepartmentCourses::Table, DepartmentCourses::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create course_classes table
        manager
            .create_table(
                Table::create()
                    .table(CourseClasses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CourseClasses::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CourseClasses::CourseId).integer().not_null())
                    .col(
                        ColumnDef::new(CourseClasses::DayOfWeek)
                            .integer()
                            .not_null()
                            .check(
                                Expr::col(CourseClasses::DayOfWeek)
                                    .gte(0)
                                    .and(Expr::col(CourseClasses::DayOfWeek).lt(7)),
                            ),
                    )
                    .col(
                        ColumnDef::new(CourseClasses::StartPeriod)
                            .integer()
                            .not_null()
                            .check(Expr::col(CourseClasses::StartPeriod).gte(0)),
                    )
                    .col(
                        ColumnDef::new(CourseClasses::EndPeriod)
                            .integer()
                            .not_null()
                            .check(Expr::col(CourseClasses::EndPeriod).gte(0)),
                    )
                    .col(
                        ColumnDef::new(CourseClasses::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .check(
                        Expr::col(CourseClasses::StartPeriod)
                            .lte(Expr::col(CourseClasses::EndPeriod)),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-course_classes-course_id")
                            .from(CourseClasses::Table, CourseClasses::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop tables in reverse order of dependencies
        manager
            .drop_table(Table::drop().table(CourseClasses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DepartmentCourses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MajorCourses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GeneralCourses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GenEduCategories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Subjects::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Departments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Campuses::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
pub(crate) enum Campuses {
    Table,
    Id,
    Code,
    Name,
    CreatedAt,
}

#[derive(Iden)]
pub(crate) enum Departments {
    Table,
    Id,
    Code,
    Name,
    CampusId,
    CreatedAt,
}

#[derive(Iden)]
pub(crate) enum Subjects {
    Table,
    Id,
    Code,
    Name,
    CreatedAt,
}

#[derive(Iden)]
pub(crate) enum GenEduCategories {
    Table,
    Id,
    Code,
    Name,
    CreatedAt,
}

#[derive(Iden)]
pub(crate) enum Courses {
    Table,
    Id,
    Code,
    Type,
    Instructor,
    Credit,
    SubjectId,
    CreatedAt,
}

#[derive(Iden)]
pub(crate) enum GeneralCourses {
    Table,
    Id,
    CategoryId,
}

#[derive(Iden)]
pub(crate) enum MajorCourses {
    Table,
    Id,
    TargetGrade,
}

#[derive(Iden)]
pub(crate) enum DepartmentCourses {
    Table,
    DepartmentId,
    CourseId,
}

#[derive(Iden)]
pub(crate) enum CourseClasses {
    Table,
    Id,
    CourseId,
    DayOfWeek,
    StartPeriod,
    EndPeriod,
    CreatedAt,
}
