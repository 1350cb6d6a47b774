//! Detached catalog entities produced by scrapers.
//!
//! These values are built in memory, with relationships wired to other values
//! of the same batch, and are handed to the catalog sync as one [`Catalog`].
//! Relationships are recorded by natural key (`code`) since nothing here has a
//! database id yet.

use crate::{course_type::CourseType, error::ValidationError, schedule::ClassPeriod};
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Department {
    pub code: String,
    pub name: String,
}

impl Department {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Subject {
    pub code: String,
    pub name: String,
}

impl Subject {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenEduCategory {
    pub code: String,
    pub name: String,
}

impl GenEduCategory {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

/// Subtype-specific part of a course
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CourseKind {
    General { category: String },
    Major { target_grade: Option<i32> },
}

impl CourseKind {
    pub fn general(category: &GenEduCategory) -> Self {
        Self::General {
            category: category.code.clone(),
        }
    }

    pub fn major(target_grade: Option<i32>) -> Result<Self, ValidationError> {
        match target_grade {
            Some(grade) if grade < 0 => Err(ValidationError::NegativeTargetGrade(grade)),
            _ => Ok(Self::Major { target_grade }),
        }
    }

    pub fn course_type(&self) -> CourseType {
        match self {
            Self::General { .. } => CourseType::General,
            Self::Major { .. } => CourseType::Major,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Course {
    pub code: String,
    pub instructor: Option<String>,
    credit: f64,
    subject: String,
    pub kind: CourseKind,
    departments: Vec<String>,
    classes: Vec<ClassPeriod>,
}

impl Course {
    pub fn new(
        code: impl Into<String>,
        subject: &Subject,
        credit: f64,
        kind: CourseKind,
    ) -> Result<Self, ValidationError> {
        if credit.is_nan() || credit < 0.0 {
            return Err(ValidationError::NegativeCredit(credit));
        }

        Ok(Self {
            code: code.into(),
            instructor: None,
            credit,
            subject: subject.code.clone(),
            kind,
            departments: Vec::new(),
            classes: Vec::new(),
        })
    }

    pub fn with_instructor(mut self, instructor: impl Into<String>) -> Self {
        self.instructor = Some(instructor.into());
        self
    }

    /// Associates the course with a department, ignoring repeats
    pub fn add_department(&mut self, department: &Department) {
        if !self.departments.contains(&department.code) {
            self.departments.push(department.code.clone());
        }
    }

    pub fn add_class(&mut self, class: ClassPeriod) {
        self.classes.push(class);
    }

    pub fn credit(&self) -> f64 {
        self.credit
    }

    pub fn subject_code(&self) -> &str {
        &self.subject
    }

    pub fn course_type(&self) -> CourseType {
        self.kind.course_type()
    }

    pub fn department_codes(&self) -> &[String] {
        &self.departments
    }

    pub fn classes(&self) -> &[ClassPeriod] {
        &self.classes
    }
}

/// Entities held for one catalog sync
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    departments: Vec<Department>,
    subjects: Vec<Subject>,
    gen_edu_categories: Vec<GenEduCategory>,
    courses: Vec<Course>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hold_departments(&mut self, departments: impl IntoIterator<Item = Department>) {
        self.departments.extend(departments);
    }

    pub fn hold_subjects(&mut self, subjects: impl IntoIterator<Item = Subject>) {
        self.subjects.extend(subjects);
    }

    pub fn hold_gen_edu_categories(
        &mut self,
        categories: impl IntoIterator<Item = GenEduCategory>,
    ) {
        self.gen_edu_categories.extend(categories);
    }

    /// Holds general and major courses alike
    pub fn hold_courses(&mut self, courses: impl IntoIterator<Item = Course>) {
        self.courses.extend(courses);
    }

    pub fn departments(&self) -> &[Department] {
        &self.departments
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn gen_edu_categories(&self) -> &[GenEduCategory] {
        &self.gen_edu_categories
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn is_empty(&self) -> bool {
        self.departments.is_empty()
            && self.subjects.is_empty()
            && self.gen_edu_categories.is_empty()
            && self.courses.is_empty()
    }

    /// Checks that every held entity has a code unique within its type
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_codes("department", self.departments.iter().map(|d| d.code.as_str()))?;
        check_codes("subject", self.subjects.iter().map(|s| s.code.as_str()))?;
        check_codes(
            "gen_edu_category",
            self.gen_edu_categories.iter().map(|c| c.code.as_str()),
        )?;
        check_codes("course", self.courses.iter().map(|c| c.code.as_str()))
    }
}

fn check_codes<'a>(
    kind: &'static str,
    codes: impl Iterator<Item = &'a str>,
) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();

    for code in codes {
        if code.trim().is_empty() {
            return Err(ValidationError::EmptyCode { kind });
        }
        if !seen.insert(code) {
            return Err(ValidationError::DuplicateCode {
                kind,
                code: code.to_string(),
            });
        }
    }

    Ok(())
}
