use crate::components::model::teacher::{Department, Position};
use crate::components::service::form::{FormError, PendingChange, Proposal, TeacherManager};
use crate::components::service::validation::ValidationError;
use crate::components::store::error::StoreError;
use crate::tests::{input, sample_input, scratch_dir, seeded_manager};

#[test]
fn add_canonicalizes_department_and_assigns_id() {
    let dir = scratch_dir();
    let manager = TeacherManager::open(dir.path()).unwrap();

    // username="jdoe", name="John", age="45", department="cse"
    let change = manager.propose_add(&sample_input()).unwrap();
    let message = manager.commit(change).unwrap();
    assert_eq!(message, "Teacher added successfully");

    let all = manager.list(&Default::default()).unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, 1);
    assert_eq!(all[0].username, "jdoe");
    assert_eq!(all[0].department, Department::Cse);
    assert_eq!(all[0].department.code(), "CSE");
    assert_eq!(all[0].age, 45);
}

#[test]
fn add_requires_all_fields() {
    let dir = scratch_dir();
    let manager = TeacherManager::open(dir.path()).unwrap();

    let mut incomplete = sample_input();
    incomplete.password.clear();

    let err = manager.propose_add(&incomplete).unwrap_err();
    assert_eq!(err.to_string(), "Please fill in all fields");
    assert!(manager.list(&Default::default()).unwrap().is_empty());
}

#[test]
fn add_rejects_duplicate_username() {
    let dir = scratch_dir();
    let manager = seeded_manager(&dir);

    let err = manager.propose_add(&sample_input()).unwrap_err();
    assert!(matches!(
        err,
        FormError::Validation(ValidationError::UsernameTaken)
    ));
    assert_eq!(manager.list(&Default::default()).unwrap().len(), 1);
}

#[test]
fn proposing_does_not_write() {
    let dir = scratch_dir();
    let manager = TeacherManager::open(dir.path()).unwrap();

    manager.propose_add(&sample_input()).unwrap();
    assert!(manager.list(&Default::default()).unwrap().is_empty());
}

#[test]
fn update_rejects_username_change() {
    let dir = scratch_dir();
    let manager = seeded_manager(&dir);

    let mut renamed = sample_input();
    renamed.username = "jdoe2".to_string();

    let err = manager.propose_update(1, &renamed).unwrap_err();
    assert_eq!(err.to_string(), "Username must be the same!");

    // No write happened.
    assert_eq!(manager.get(1).unwrap().unwrap().username, "jdoe");
}

#[test]
fn update_with_identical_fields_is_a_noop() {
    let dir = scratch_dir();
    let manager = seeded_manager(&dir);
    let before = manager.list(&Default::default()).unwrap();

    // "cse" canonicalizes to the stored CSE, so nothing changed.
    let proposal = manager.propose_update(1, &sample_input()).unwrap();
    assert!(matches!(proposal, Proposal::NoChanges));

    assert_eq!(manager.list(&Default::default()).unwrap(), before);
}

#[test]
fn update_collects_changed_fields() {
    let dir = scratch_dir();
    let manager = seeded_manager(&dir);

    let mut edited = sample_input();
    edited.name = "Johnny".to_string();
    edited.age = "46".to_string();
    edited.department = "math".to_string();
    edited.position = "Senior Lecturer".to_string();

    let proposal = manager.propose_update(1, &edited).unwrap();
    let change = match proposal {
        Proposal::Change(change) => change,
        Proposal::NoChanges => panic!("expected a pending change"),
    };

    match &change {
        PendingChange::Update { changes, .. } => {
            assert_eq!(
                changes,
                &vec![
                    "Name: Johnny".to_string(),
                    "Age: 46".to_string(),
                    "Department: MATH".to_string(),
                    "Position: Senior Lecturer".to_string(),
                ]
            );
        }
        other => panic!("expected an update, got {:?}", other),
    }

    manager.commit(change).unwrap();

    let stored = manager.get(1).unwrap().unwrap();
    assert_eq!(stored.name, "Johnny");
    assert_eq!(stored.age, 46);
    assert_eq!(stored.department, Department::Math);
    assert_eq!(stored.position, Position::SeniorLecturer);
    assert_eq!(stored.username, "jdoe"); // immutable
}

#[test]
fn update_validates_fields_before_diffing() {
    let dir = scratch_dir();
    let manager = seeded_manager(&dir);

    let mut bad_age = sample_input();
    bad_age.age = "seventeen".to_string();
    let err = manager.propose_update(1, &bad_age).unwrap_err();
    assert_eq!(err.to_string(), "Age must be a number");

    let mut bad_dept = sample_input();
    bad_dept.department = "WXYZ".to_string();
    let err = manager.propose_update(1, &bad_dept).unwrap_err();
    assert_eq!(err.to_string(), "Please input a valid department");
}

#[test]
fn update_on_stale_selection_is_not_found() {
    let dir = scratch_dir();
    let manager = seeded_manager(&dir);

    let err = manager.propose_update(99, &sample_input()).unwrap_err();
    assert!(matches!(err, FormError::Store(StoreError::NotFound(99))));
}

#[test]
fn delete_flow_removes_the_record() {
    let dir = scratch_dir();
    let manager = seeded_manager(&dir);

    let change = manager.propose_delete(1).unwrap();
    assert!(change.describe().contains("jdoe"));

    let message = manager.commit(change).unwrap();
    assert_eq!(message, "Teacher deleted successfully");
    assert!(manager.get(1).unwrap().is_none());
}

#[test]
fn delete_on_missing_id_is_not_found() {
    let dir = scratch_dir();
    let manager = seeded_manager(&dir);

    let err = manager.propose_delete(99).unwrap_err();
    assert!(matches!(err, FormError::Store(StoreError::NotFound(99))));
}

#[test]
fn register_creates_account_without_confirmation() {
    let dir = scratch_dir();
    let manager = TeacherManager::open(dir.path()).unwrap();

    let teacher = manager.register(&input("asmith", "Anna", "30", "math")).unwrap();
    assert_eq!(teacher.id, 1);
    assert_eq!(manager.get(1).unwrap().unwrap().username, "asmith");
}
