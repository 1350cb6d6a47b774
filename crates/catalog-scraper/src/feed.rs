//! JSON catalog feed, read from an `http(s)://` URL or a local file.

use crate::{CampusScraper, ScrapeError};
use log::{debug, warn};
use models::{
    Catalog, ClassPeriod, Course, CourseKind, DayOfWeek, Department, GenEduCategory, Subject,
    ValidationError, schedule::find_conflict,
};
use serde::Deserialize;
use std::{collections::HashMap, path::PathBuf};

#[derive(Debug, Deserialize)]
pub struct FeedDocument {
    #[serde(default)]
    pub departments: Vec<FeedEntry>,
    #[serde(default)]
    pub subjects: Vec<FeedEntry>,
    #[serde(default)]
    pub gen_edu_categories: Vec<FeedEntry>,
    #[serde(default)]
    pub courses: Vec<FeedCourse>,
}

/// A department, subject or category
#[derive(Debug, Deserialize)]
pub struct FeedEntry {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct FeedCourse {
    pub code: String,
    /// Code of the subject
    pub subject: String,
    #[serde(default)]
    pub instructor: Option<String>,
    pub credit: f64,
    /// Codes of the departments offering the course
    #[serde(default)]
    pub departments: Vec<String>,
    #[serde(default)]
    pub classes: Vec<FeedClass>,
    #[serde(flatten)]
    pub kind: FeedCourseKind,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FeedCourseKind {
    General {
        category: String,
    },
    Major {
        #[serde(default)]
        target_grade: Option<i32>,
    },
}

#[derive(Debug, Deserialize)]
pub struct FeedClass {
    pub day_of_week: FeedDay,
    pub start_period: i32,
    pub end_period: i32,
}

/// Either the day index (Monday is 0) or its schedule letter (`"MTWRFSU"`)
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum FeedDay {
    Index(i32),
    Letter(String),
}

impl FeedDay {
    pub fn day(&self) -> Result<DayOfWeek, ValidationError> {
        match self {
            FeedDay::Index(index) => DayOfWeek::new(*index),
            FeedDay::Letter(letter) => letter.parse(),
        }
    }
}

impl FeedDocument {
    /// Builds detached entities, wiring course references within the document
    pub fn into_catalog(self, catalog: &mut Catalog) -> Result<(), ScrapeError> {
        let departments: Vec<Department> = self
            .departments
            .into_iter()
            .map(|d| Department::new(d.code, d.name))
            .collect();
        let subjects: Vec<Subject> = self
            .subjects
            .into_iter()
            .map(|s| Subject::new(s.code, s.name))
            .collect();
        let categories: Vec<GenEduCategory> = self
            .gen_edu_categories
            .into_iter()
            .map(|c| GenEduCategory::new(c.code, c.name))
            .collect();

        let department_map: HashMap<&str, &Department> =
            departments.iter().map(|d| (d.code.as_str(), d)).collect();
        let subject_map: HashMap<&str, &Subject> =
            subjects.iter().map(|s| (s.code.as_str(), s)).collect();
        let category_map: HashMap<&str, &GenEduCategory> =
            categories.iter().map(|c| (c.code.as_str(), c)).collect();

        let mut courses = Vec::with_capacity(self.courses.len());
        for feed_course in self.courses {
            let unknown = |kind: &'static str, code: &str| ScrapeError::UnknownReference {
                kind,
                code: code.to_string(),
                course: feed_course.code.clone(),
            };

            let subject = subject_map
                .get(feed_course.subject.as_str())
                .ok_or_else(|| unknown("subject", &feed_course.subject))?;

            let kind = match &feed_course.kind {
                FeedCourseKind::General { category } => {
                    let category = category_map
                        .get(category.as_str())
                        .ok_or_else(|| unknown("gen_edu_category", category))?;
                    CourseKind::general(category)
                }
                FeedCourseKind::Major { target_grade } => CourseKind::major(*target_grade)?,
            };

            let mut course =
                Course::new(feed_course.code.clone(), subject, feed_course.credit, kind)?;
            if let Some(instructor) = &feed_course.instructor {
                course = course.with_instructor(instructor.clone());
            }

            for code in &feed_course.departments {
                let department = department_map
                    .get(code.as_str())
                    .ok_or_else(|| unknown("department", code))?;
                course.add_department(department);
            }

            for class in &feed_course.classes {
                course.add_class(ClassPeriod::new(
                    class.day_of_week.day()?,
                    class.start_period,
                    class.end_period,
                )?);
            }

            if let Some((a, b)) = find_conflict(course.classes()) {
                warn!("Course {} is double-booked: {a} overlaps {b}", course.code);
            }

            courses.push(course);
        }

        debug!(
            "Feed holds {} departments, {} subjects, {} categories, {} courses",
            departments.len(),
            subjects.len(),
            categories.len(),
            courses.len()
        );

        catalog.hold_courses(courses);
        catalog.hold_departments(departments);
        catalog.hold_subjects(subjects);
        catalog.hold_gen_edu_categories(categories);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum FeedSource {
    Url(String),
    File(PathBuf),
}

/// Scrapes a campus from a JSON feed
#[derive(Debug, Clone)]
pub struct FeedScraper {
    source: FeedSource,
}

impl FeedScraper {
    /// `location` is fetched over HTTP when it is an `http(s)://` URL and read
    /// from disk otherwise
    pub fn new(location: &str) -> Self {
        let source = if location.starts_with("http://") || location.starts_with("https://") {
            FeedSource::Url(location.to_string())
        } else {
            FeedSource::File(PathBuf::from(location))
        };

        Self { source }
    }

    pub async fn load(&self) -> Result<FeedDocument, ScrapeError> {
        match &self.source {
            FeedSource::Url(url) => {
                debug!("Fetching catalog feed from {url}");
                let document = reqwest::get(url)
                    .await?
                    .error_for_status()?
                    .json::<FeedDocument>()
                    .await?;
                Ok(document)
            }
            FeedSource::File(path) => {
                debug!("Reading catalog feed from {}", path.display());
                let text = tokio::fs::read_to_string(path).await?;
                Ok(serde_json::from_str(&text)?)
            }
        }
    }
}

impl CampusScraper for FeedScraper {
    async fn scrape(&self, catalog: &mut Catalog) -> Result<(), ScrapeError> {
        self.load().await?.into_catalog(catalog)
    }
}
