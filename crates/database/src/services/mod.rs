pub mod catalog;
pub mod pagination;
pub mod query_course;
pub mod sync;
