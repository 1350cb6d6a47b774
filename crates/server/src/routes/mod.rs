pub mod campus;
pub mod course;
pub mod department;
pub mod gen_edu_category;
pub mod health;
pub mod root;
pub mod subject;
