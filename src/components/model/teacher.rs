use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::components::store::entity::Entity;

/// A teacher account as stored on disk. The id is assigned by the store on
/// add; the username is fixed for the lifetime of the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    pub id: u64,
    pub username: String,
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub department: Department,
    pub password: String,
    pub position: Position,
}

impl Entity for Teacher {
    const COLLECTION: &'static str = "teachers";

    fn key(&self) -> u64 {
        self.id
    }

    fn set_key(&mut self, key: u64) {
        self.id = key;
    }
}

/// Department codes. Free-text input canonicalizes to uppercase before the
/// membership check, so `cse` and `CSE` both land on `Department::Cse`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Department {
    Ieda,
    Cse,
    Ece,
    Mae,
    Bba,
    Cbe,
    Civl,
    Phys,
    Math,
    Huma,
    Lang,
    Acct,
    Oces,
    Isom,
    Fina,
    Mark,
    Gbus,
    Lifs,
    Bien,
    Chem,
    Envr,
    Sosc,
    Shss,
    Sust,
    Isd,
}

impl Department {
    pub const ALL: [Department; 25] = [
        Department::Ieda,
        Department::Cse,
        Department::Ece,
        Department::Mae,
        Department::Bba,
        Department::Cbe,
        Department::Civl,
        Department::Phys,
        Department::Math,
        Department::Huma,
        Department::Lang,
        Department::Acct,
        Department::Oces,
        Department::Isom,
        Department::Fina,
        Department::Mark,
        Department::Gbus,
        Department::Lifs,
        Department::Bien,
        Department::Chem,
        Department::Envr,
        Department::Sosc,
        Department::Shss,
        Department::Sust,
        Department::Isd,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Department::Ieda => "IEDA",
            Department::Cse => "CSE",
            Department::Ece => "ECE",
            Department::Mae => "MAE",
            Department::Bba => "BBA",
            Department::Cbe => "CBE",
            Department::Civl => "CIVL",
            Department::Phys => "PHYS",
            Department::Math => "MATH",
            Department::Huma => "HUMA",
            Department::Lang => "LANG",
            Department::Acct => "ACCT",
            Department::Oces => "OCES",
            Department::Isom => "ISOM",
            Department::Fina => "FINA",
            Department::Mark => "MARK",
            Department::Gbus => "GBUS",
            Department::Lifs => "LIFS",
            Department::Bien => "BIEN",
            Department::Chem => "CHEM",
            Department::Envr => "ENVR",
            Department::Sosc => "SOSC",
            Department::Shss => "SHSS",
            Department::Sust => "SUST",
            Department::Isd => "ISD",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Department {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let canonical = s.trim().to_uppercase();
        Department::ALL
            .iter()
            .find(|dept| dept.code() == canonical)
            .copied()
            .ok_or_else(|| format!("unknown department code: {}", s))
    }
}

/// Role titles, matching the choices offered by the management form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Position {
    Head,
    AssociateHead,
    ChairProfessor,
    Professor,
    AssociateProfessor,
    AssistantProfessor,
    SeniorLecturer,
    Lecturer,
}

impl Position {
    pub fn title(&self) -> &'static str {
        match self {
            Position::Head => "Head",
            Position::AssociateHead => "Associate Head",
            Position::ChairProfessor => "Chair Professor",
            Position::Professor => "Professor",
            Position::AssociateProfessor => "Associate Professor",
            Position::AssistantProfessor => "Assistant Professor",
            Position::SeniorLecturer => "Senior Lecturer",
            Position::Lecturer => "Lecturer",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "head" => Ok(Position::Head),
            "associate head" => Ok(Position::AssociateHead),
            "chair professor" => Ok(Position::ChairProfessor),
            "professor" => Ok(Position::Professor),
            "associate professor" => Ok(Position::AssociateProfessor),
            "assistant professor" => Ok(Position::AssistantProfessor),
            "senior lecturer" => Ok(Position::SeniorLecturer),
            "lecturer" => Ok(Position::Lecturer),
            _ => Err(format!("unknown position: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        })
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            _ => Err(format!("unknown gender: {}", s)),
        }
    }
}
