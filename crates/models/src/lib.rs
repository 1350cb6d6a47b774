//! Domain types shared by the catalog database, scraper and API crates.

pub mod catalog;
pub mod course_type;
pub mod days;
pub mod error;
pub mod schedule;

pub use catalog::{Catalog, Course, CourseKind, Department, GenEduCategory, Subject};
pub use course_type::CourseType;
pub use days::DayOfWeek;
pub use error::ValidationError;
pub use schedule::ClassPeriod;
