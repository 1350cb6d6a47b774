pub mod campuses;
pub mod course_classes;
pub mod courses;
pub mod department_courses;
pub mod departments;
pub mod gen_edu_categories;
pub mod general_courses;
pub mod major_courses;
pub mod subjects;
