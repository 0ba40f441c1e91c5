use crate::components::model::teacher::Teacher;

/// Conjunction of exact-match predicates applied to a store snapshot. Empty
/// fields are wildcards; the department input is uppercased before the
/// comparison so the filter is case-insensitive on that field.
#[derive(Debug, Clone, Default)]
pub struct TeacherFilter {
    pub username: String,
    pub name: String,
    pub department: String,
}

impl TeacherFilter {
    pub fn is_empty(&self) -> bool {
        self.username.is_empty() && self.name.is_empty() && self.department.is_empty()
    }

    pub fn matches(&self, teacher: &Teacher) -> bool {
        (self.username.is_empty() || self.username == teacher.username)
            && (self.name.is_empty() || self.name == teacher.name)
            && (self.department.is_empty()
                || self.department.to_uppercase() == teacher.department.code())
    }
}
