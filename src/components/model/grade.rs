use serde::{Deserialize, Serialize};

use crate::components::store::entity::Entity;

/// A score a student earned on one question. The three payload fields only
/// change together through [`Grade::set_score`]; there is no per-field
/// mutation and no range validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grade {
    pub id: u64,
    pub student_id: u64,
    pub question_id: u64,
    pub score: i64,
}

impl Grade {
    pub fn new(student_id: u64, question_id: u64, score: i64) -> Self {
        Grade {
            id: 0,
            student_id,
            question_id,
            score,
        }
    }

    /// Overwrites all three payload fields at once.
    pub fn set_score(&mut self, student_id: u64, question_id: u64, score: i64) {
        self.student_id = student_id;
        self.question_id = question_id;
        self.score = score;
    }
}

impl Entity for Grade {
    const COLLECTION: &'static str = "grades";

    fn key(&self) -> u64 {
        self.id
    }

    fn set_key(&mut self, key: u64) {
        self.id = key;
    }
}
