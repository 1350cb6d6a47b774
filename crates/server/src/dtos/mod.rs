pub mod catalog;
pub mod course;
pub mod page;
