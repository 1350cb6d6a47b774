use crate::{dtos::page::PageParams, error::ApiError};
use chrono::{DateTime, Utc};
use database::{
    entities::course_classes,
    services::query_course::{CourseDetail, CourseFilter, CourseRecord},
};
use models::CourseType;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseResponse {
    pub id: i32,
    pub code: String,
    pub created_at: DateTime<Utc>,
    /// `general` or `major`
    #[serde(rename = "type")]
    pub course_type: String,
    /// Name of the subject
    pub name: String,
    pub subject_id: i32,
    pub subject_code: String,
    pub instructor: Option<String>,
    pub credit: f64,
    pub department_ids: Vec<i32>,
    pub classes: Vec<ClassResponse>,
    #[serde(flatten)]
    pub detail: CourseDetailResponse,
}

/// Fields only present on one subtype
#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum CourseDetailResponse {
    General { category_id: i32 },
    Major { target_grade: Option<i32> },
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ClassResponse {
    pub id: i32,
    /// 0 is Monday
    pub day_of_week: i32,
    pub start_period: i32,
    pub end_period: i32,
}

impl From<course_classes::Model> for ClassResponse {
    fn from(class: course_classes::Model) -> Self {
        ClassResponse {
            id: class.id,
            day_of_week: class.day_of_week,
            start_period: class.start_period,
            end_period: class.end_period,
        }
    }
}

impl From<CourseRecord> for CourseResponse {
    fn from(record: CourseRecord) -> Self {
        let CourseRecord {
            course,
            subject,
            detail,
            classes,
            department_ids,
        } = record;

        let detail = match detail {
            CourseDetail::General(general) => CourseDetailResponse::General {
                category_id: general.category_id,
            },
            CourseDetail::Major(major) => CourseDetailResponse::Major {
                target_grade: major.target_grade,
            },
        };

        CourseResponse {
            id: course.id,
            code: course.code,
            created_at: course.created_at,
            course_type: course.course_type.to_string(),
            name: subject.name,
            subject_id: subject.id,
            subject_code: subject.code,
            instructor: course.instructor,
            credit: course.credit,
            department_ids,
            classes: classes.into_iter().map(Into::into).collect(),
            detail,
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CourseQueryParams {
    /// Words that must all appear in the course name
    pub name: Option<String>,
    /// Words that must all appear in the subject code
    pub subject_code: Option<String>,
    /// Words that must all appear in the instructor
    pub instructor: Option<String>,
    /// `general` or `major`
    #[serde(rename = "type")]
    pub course_type: Option<String>,
    pub category_id: Option<i32>,
    pub target_grade: Option<i32>,
    pub department_id: Option<i32>,
    pub page: Option<u64>,
    pub results_per_page: Option<u64>,
}

impl CourseQueryParams {
    pub fn page_params(&self) -> PageParams {
        PageParams {
            page: self.page,
            results_per_page: self.results_per_page,
        }
    }

    /// Builds the search filter, rejecting an unknown `type`
    pub fn to_filter(&self, campus_id: Option<i32>) -> Result<CourseFilter, ApiError> {
        let course_type = self
            .course_type
            .as_deref()
            .map(CourseType::parse)
            .transpose()?;

        Ok(CourseFilter {
            name: self.name.clone(),
            subject_code: self.subject_code.clone(),
            instructor: self.instructor.clone(),
            course_type,
            category_id: self.category_id,
            target_grade: self.target_grade,
            department_id: self.department_id,
            campus_id,
        })
    }
}
