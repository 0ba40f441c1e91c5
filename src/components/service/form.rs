use std::path::Path;

use thiserror::Error;

use crate::components::model::teacher::Teacher;
use crate::components::store::{error::StoreError, file_store::FileStore};

use super::filter::TeacherFilter;
use super::validation::{
    validate_age, validate_department, validate_gender, validate_name, validate_position,
    validate_username, ValidationError,
};

/// Raw field values as read off the form, all strings. Empty means the user
/// left the field blank.
#[derive(Debug, Clone, Default)]
pub struct TeacherFormInput {
    pub username: String,
    pub name: String,
    pub age: String,
    pub department: String,
    pub password: String,
    pub gender: String,
    pub position: String,
}

impl TeacherFormInput {
    fn has_empty_field(&self) -> bool {
        self.username.is_empty()
            || self.name.is_empty()
            || self.age.is_empty()
            || self.department.is_empty()
            || self.password.is_empty()
            || self.gender.is_empty()
            || self.position.is_empty()
    }
}

/// A validated mutation waiting for user confirmation. Produced by the
/// `propose_*` methods, applied by [`TeacherManager::commit`]. Nothing is
/// written until commit.
#[derive(Debug, Clone)]
pub enum PendingChange {
    Add {
        teacher: Teacher,
    },
    Update {
        teacher: Teacher,
        changes: Vec<String>,
    },
    Delete {
        id: u64,
        username: String,
    },
}

impl PendingChange {
    /// Human-readable summary shown in the confirmation prompt.
    pub fn describe(&self) -> String {
        match self {
            PendingChange::Add { teacher } => format!(
                "Add Teacher: {} ({}, {})",
                teacher.username, teacher.name, teacher.department
            ),
            PendingChange::Update { teacher, changes } => format!(
                "Update Teacher: {}\n{}",
                teacher.username,
                changes
                    .iter()
                    .map(|c| format!("  - {}", c))
                    .collect::<Vec<_>>()
                    .join("\n")
            ),
            PendingChange::Delete { id, username } => format!(
                "Are you sure you want to delete teacher with username: {} (id {})?",
                username, id
            ),
        }
    }
}

/// Outcome of an update proposal: either something to confirm, or a no-op.
#[derive(Debug, Clone)]
pub enum Proposal {
    NoChanges,
    Change(PendingChange),
}

#[derive(Debug, Error)]
pub enum FormError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Validation-and-persistence workflow behind the teacher management form.
/// Holds no record cache: every operation works on a fresh store snapshot.
pub struct TeacherManager {
    store: FileStore<Teacher>,
}

impl TeacherManager {
    pub fn open(data_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        Ok(TeacherManager {
            store: FileStore::open(data_dir)?,
        })
    }

    /// Fresh snapshot, narrowed by the filter (empty fields are wildcards).
    pub fn list(&self, filter: &TeacherFilter) -> Result<Vec<Teacher>, StoreError> {
        let teachers = self.store.get_all()?;
        if filter.is_empty() {
            return Ok(teachers);
        }
        Ok(teachers.into_iter().filter(|t| filter.matches(t)).collect())
    }

    pub fn get(&self, id: u64) -> Result<Option<Teacher>, StoreError> {
        self.store.get(id)
    }

    /// Validates the add form and yields the change to confirm. The store is
    /// untouched until [`commit`](Self::commit).
    pub fn propose_add(&self, input: &TeacherFormInput) -> Result<PendingChange, FormError> {
        Ok(PendingChange::Add {
            teacher: self.validated_new_teacher(input)?,
        })
    }

    /// Validates the update form against the stored record and computes the
    /// changed-field list. A valid submission that changes nothing is
    /// reported as [`Proposal::NoChanges`] and never writes.
    ///
    /// The username must match the stored one; renames are rejected and
    /// uniqueness is therefore not re-checked here.
    pub fn propose_update(&self, id: u64, input: &TeacherFormInput) -> Result<Proposal, FormError> {
        let current = self.get(id)?.ok_or(StoreError::NotFound(id))?;

        if input.has_empty_field() {
            return Err(ValidationError::MissingFields.into());
        }

        if input.username != current.username {
            return Err(ValidationError::UsernameChanged.into());
        }

        validate_name(&input.name)?;
        let age = validate_age(&input.age)?;
        let department = validate_department(&input.department)?;
        let gender = validate_gender(&input.gender)?;
        let position = validate_position(&input.position)?;

        let mut changes = Vec::new();
        if input.name != current.name {
            changes.push(format!("Name: {}", input.name));
        }
        if age != current.age {
            changes.push(format!("Age: {}", age));
        }
        if department != current.department {
            changes.push(format!("Department: {}", department));
        }
        if input.password != current.password {
            changes.push(format!("Password: {}", input.password));
        }
        if gender != current.gender {
            changes.push(format!("Gender: {}", gender));
        }
        if position != current.position {
            changes.push(format!("Position: {}", position));
        }

        if changes.is_empty() {
            return Ok(Proposal::NoChanges);
        }

        let teacher = Teacher {
            id: current.id,
            username: current.username,
            name: input.name.clone(),
            age,
            gender,
            department,
            password: input.password.clone(),
            position,
        };

        Ok(Proposal::Change(PendingChange::Update { teacher, changes }))
    }

    /// Looks the record up so a stale selection surfaces as NotFound before
    /// the user is even asked to confirm.
    pub fn propose_delete(&self, id: u64) -> Result<PendingChange, FormError> {
        let teacher = self.get(id)?.ok_or(StoreError::NotFound(id))?;
        Ok(PendingChange::Delete {
            id,
            username: teacher.username,
        })
    }

    /// Applies a confirmed change and returns the user-facing message.
    pub fn commit(&self, change: PendingChange) -> Result<String, FormError> {
        match change {
            PendingChange::Add { teacher } => {
                self.store.add(teacher)?;
                Ok("Teacher added successfully".to_string())
            }
            PendingChange::Update { teacher, .. } => {
                self.store.update(teacher)?;
                Ok("Teacher updated successfully".to_string())
            }
            PendingChange::Delete { id, .. } => {
                self.store.delete_by_key(id)?;
                Ok("Teacher deleted successfully".to_string())
            }
        }
    }

    /// Registration: the add pipeline without the confirmation step.
    pub fn register(&self, input: &TeacherFormInput) -> Result<Teacher, FormError> {
        let teacher = self.validated_new_teacher(input)?;
        Ok(self.store.add(teacher)?)
    }

    fn validated_new_teacher(&self, input: &TeacherFormInput) -> Result<Teacher, FormError> {
        if input.has_empty_field() {
            return Err(ValidationError::MissingFields.into());
        }

        validate_name(&input.name)?;
        let age = validate_age(&input.age)?;

        let existing = self.store.get_all()?;
        validate_username(&input.username, &existing)?;

        let department = validate_department(&input.department)?;
        let gender = validate_gender(&input.gender)?;
        let position = validate_position(&input.position)?;

        Ok(Teacher {
            id: 0,
            username: input.username.clone(),
            name: input.name.clone(),
            age,
            gender,
            department,
            password: input.password.clone(),
            position,
        })
    }
}
