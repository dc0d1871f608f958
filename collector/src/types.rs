use serde::{Deserialize, Serialize};

/// List-stage item. Only the id matters, it drives the detail fetch loop.
#[derive(Debug, Clone, Deserialize)]
pub struct VacancyStub {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Area {
    pub name: String,
}

/// Salary range as the API reports it. Either bound may be null, the
/// `only_with_salary` filter upstream makes both-null unexpected but legal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Salary {
    pub from: Option<f64>,
    pub to: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfessionalRole {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KeySkill {
    pub name: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Experience {
    pub id: ExperienceLevel,
}

/// The provider's fixed experience enumeration. An id outside this set is a
/// schema violation and fails the decode at the client boundary.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ExperienceLevel {
    NoExperience,
    Between1And3,
    Between3And6,
    MoreThan6,
}

/// Full detail record for one vacancy. Unknown fields in the response body
/// are ignored, missing required ones surface as a malformed-body error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VacancyDetail {
    pub id: String,
    pub name: String,
    pub area: Area,
    pub salary: Option<Salary>,
    pub professional_roles: Vec<ProfessionalRole>,
    pub key_skills: Vec<KeySkill>,
    pub experience: Experience,
}

/// The persisted shape: id renamed to the store's primary key, area
/// flattened to its name, salary collapsed to a single figure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VacancyRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub area: String,
    pub salary: Option<f64>,
    pub professional_roles: Vec<ProfessionalRole>,
    pub key_skills: Vec<KeySkill>,
    pub experience: Experience,
}
