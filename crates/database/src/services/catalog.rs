use crate::{
    entities::{campuses, departments, gen_edu_categories, subjects},
    error::ServiceError,
    services::pagination::{PageRequest, Paginated, fetch_page},
};
use chrono::Utc;
use log::info;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder,
};
use std::collections::HashMap;

/// A campus together with the departments it owns
pub type CampusWithDepartments = (campuses::Model, Vec<departments::Model>);

pub struct CatalogService;

impl CatalogService {
    pub async fn list_campuses(
        db: &DatabaseConnection,
        request: PageRequest,
    ) -> Result<Paginated<CampusWithDepartments>, ServiceError> {
        let query = campuses::Entity::find().order_by_asc(campuses::Column::Id);
        let mut page = fetch_page(db, query, request).await?;

        let campuses = std::mem::take(&mut page.items);
        let campuses = Self::attach_departments(db, campuses).await?;

        Ok(page.with_items(campuses))
    }

    pub async fn get_campus(
        db: &DatabaseConnection,
        campus_id: i32,
    ) -> Result<CampusWithDepartments, ServiceError> {
        let campus = campuses::Entity::find_by_id(campus_id)
            .one(db)
            .await?
            .ok_or(ServiceError::NotFound)?;

        Self::attach_departments(db, vec![campus])
            .await?
            .pop()
            .ok_or(ServiceError::NotFound)
    }

    /// Returns the first campus with `code`, creating it when none exists
    pub async fn find_or_create_campus(
        db: &DatabaseConnection,
        code: &str,
        name: &str,
    ) -> Result<campuses::Model, ServiceError> {
        let existing = campuses::Entity::find()
            .filter(campuses::Column::Code.eq(code))
            .order_by_asc(campuses::Column::Id)
            .one(db)
            .await?;

        if let Some(campus) = existing {
            return Ok(campus);
        }

        let campus = campuses::ActiveModel {
            code: Set(code.to_string()),
            name: Set(name.to_string()),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(db)
        .await?;

        info!("Created campus {} ({})", campus.code, campus.id);
        Ok(campus)
    }

    /// Batch fetch departments of every campus, keeping the campus order
    async fn attach_departments(
        db: &DatabaseConnection,
        campuses: Vec<campuses::Model>,
    ) -> Result<Vec<CampusWithDepartments>, ServiceError> {
        if campuses.is_empty() {
            return Ok(vec![]);
        }

        let campus_ids: Vec<i32> = campuses.iter().map(|c| c.id).collect();
        let departments = departments::Entity::find()
            .filter(departments::Column::CampusId.is_in(campus_ids))
            .order_by_asc(departments::Column::Id)
            .all(db)
            .await?;

        let mut departments_by_campus: HashMap<i32, Vec<departments::Model>> = HashMap::new();
        for department in departments {
            departments_by_campus
                .entry(department.campus_id)
                .or_default()
                .push(department);
        }

        Ok(campuses
            .into_iter()
            .map(|campus| {
                let departments = departments_by_campus
                    .remove(&campus.id)
                    .unwrap_or_default();
                (campus, departments)
            })
            .collect())
    }

    pub async fn list_departments(
        db: &DatabaseConnection,
        campus_id: Option<i32>,
        request: PageRequest,
    ) -> Result<Paginated<departments::Model>, ServiceError> {
        let mut query = departments::Entity::find().order_by_asc(departments::Column::Id);
        if let Some(campus_id) = campus_id {
            query = query.filter(departments::Column::CampusId.eq(campus_id));
        }

        fetch_page(db, query, request).await
    }

    /// Get a department, optionally requiring it to belong to `campus_id`
    pub async fn get_department(
        db: &DatabaseConnection,
        department_id: i32,
        campus_id: Option<i32>,
    ) -> Result<departments::Model, ServiceError> {
        let mut query = departments::Entity::find_by_id(department_id);
        if let Some(campus_id) = campus_id {
            query = query.filter(departments::Column::CampusId.eq(campus_id));
        }

        query.one(db).await?.ok_or(ServiceError::NotFound)
    }

    pub async fn list_subjects(
        db: &DatabaseConnection,
        request: PageRequest,
    ) -> Result<Paginated<subjects::Model>, ServiceError> {
        let query = subjects::Entity::find().order_by_asc(subjects::Column::Id);
        fetch_page(db, query, request).await
    }

    pub async fn get_subject(
        db: &DatabaseConnection,
        subject_id: i32,
    ) -> Result<subjects::Model, ServiceError> {
        subjects::Entity::find_by_id(subject_id)
            .one(db)
            .await?
            .ok_or(ServiceError::NotFound)
    }

    pub async fn list_gen_edu_categories(
        db: &DatabaseConnection,
        request: PageRequest,
    ) -> Result<Paginated<gen_edu_categories::Model>, ServiceError> {
        let query =
            gen_edu_categories::Entity::find().order_by_asc(gen_edu_categories::Column::Id);
        fetch_page(db, query, request).await
    }

    pub async fn get_gen_edu_category(
        db: &DatabaseConnection,
        category_id: i32,
    ) -> Result<gen_edu_categories::Model, ServiceError> {
        gen_edu_categories::Entity::find_by_id(category_id)
            .one(db)
            .await?
            .ok_or(ServiceError::NotFound)
    }
}
