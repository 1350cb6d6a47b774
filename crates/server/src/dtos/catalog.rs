use chrono::{DateTime, Utc};
use database::{
    entities::{campuses, departments, gen_edu_categories, subjects},
    services::catalog::CampusWithDepartments,
};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct CampusResponse {
    pub id: i32,
    pub code: String,
    pub created_at: DateTime<Utc>,
    pub name: String,
    pub departments: Vec<DepartmentResponse>,
}

impl From<CampusWithDepartments> for CampusResponse {
    fn from((campus, departments): CampusWithDepartments) -> Self {
        let campuses::Model {
            id,
            code,
            name,
            created_at,
        } = campus;

        CampusResponse {
            id,
            code,
            created_at,
            name,
            departments: departments.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DepartmentResponse {
    pub id: i32,
    pub code: String,
    pub created_at: DateTime<Utc>,
    pub name: String,
    pub campus_id: i32,
}

impl From<departments::Model> for DepartmentResponse {
    fn from(department: departments::Model) -> Self {
        DepartmentResponse {
            id: department.id,
            code: department.code,
            created_at: department.created_at,
            name: department.name,
            campus_id: department.campus_id,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubjectResponse {
    pub id: i32,
    pub code: String,
    pub created_at: DateTime<Utc>,
    pub name: String,
}

impl From<subjects::Model> for SubjectResponse {
    fn from(subject: subjects::Model) -> Self {
        SubjectResponse {
            id: subject.id,
            code: subject.code,
            created_at: subject.created_at,
            name: subject.name,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GenEduCategoryResponse {
    pub id: i32,
    pub code: String,
    pub created_at: DateTime<Utc>,
    pub name: String,
}

impl From<gen_edu_categories::Model> for GenEduCategoryResponse {
    fn from(category: gen_edu_categories::Model) -> Self {
        GenEduCategoryResponse {
            id: category.id,
            code: category.code,
            created_at: category.created_at,
            name: category.name,
        }
    }
}
