#![allow(dead_code)]

use tempfile::TempDir;

use crate::components::model::teacher::{Department, Gender, Position, Teacher};
use crate::components::service::form::{TeacherFormInput, TeacherManager};

mod form;
mod repl;

pub fn scratch_dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

pub fn sample_input() -> TeacherFormInput {
    TeacherFormInput {
        username: "jdoe".to_string(),
        name: "John".to_string(),
        age: "45".to_string(),
        department: "cse".to_string(),
        password: "x".to_string(),
        gender: "Male".to_string(),
        position: "Lecturer".to_string(),
    }
}

pub fn input(username: &str, name: &str, age: &str, department: &str) -> TeacherFormInput {
    TeacherFormInput {
        username: username.to_string(),
        name: name.to_string(),
        age: age.to_string(),
        department: department.to_string(),
        password: "pw".to_string(),
        gender: "Female".to_string(),
        position: "Professor".to_string(),
    }
}

pub fn sample_teacher() -> Teacher {
    Teacher {
        id: 1,
        username: "jdoe".to_string(),
        name: "John".to_string(),
        age: 45,
        gender: Gender::Male,
        department: Department::Cse,
        password: "x".to_string(),
        position: Position::Lecturer,
    }
}

/// Manager over a scratch directory with the sample teacher registered.
pub fn seeded_manager(dir: &TempDir) -> TeacherManager {
    let manager = TeacherManager::open(dir.path()).unwrap();
    manager.register(&sample_input()).unwrap();
    manager
}
