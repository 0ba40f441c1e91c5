#[path = "teacher.rs"]
pub mod teacher;

#[path = "grade.rs"]
pub mod grade;
