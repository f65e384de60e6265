use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::models::lenient;

/// Name recorded for candidates whose resume yielded no name.
pub const UNKNOWN_CANDIDATE: &str = "Unknown Candidate";

/// Structured resume, as produced by the resume extraction step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidateProfile {
    #[serde(deserialize_with = "lenient::opt_string")]
    pub candidate_name: Option<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub contact_info: ContactInfo,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub summary: Option<String>,
    pub skills: CandidateSkills,
    #[serde(deserialize_with = "experience_entries")]
    pub experience: Vec<ExperienceEntry>,
    #[serde(deserialize_with = "lenient::records")]
    pub education: Vec<EducationRecord>,
    #[serde(deserialize_with = "lenient::records")]
    pub projects: Vec<ProjectRecord>,
    #[serde(deserialize_with = "lenient::string_vec")]
    pub awards_honors: Vec<String>,
    #[serde(deserialize_with = "lenient::string_vec")]
    pub publications: Vec<String>,
    /// Provenance tag: the resume file this profile was extracted from.
    #[serde(deserialize_with = "lenient::opt_string")]
    pub original_filename: Option<String>,
}

impl CandidateProfile {
    pub fn display_name(&self) -> &str {
        self.candidate_name.as_deref().unwrap_or(UNKNOWN_CANDIDATE)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactInfo {
    #[serde(deserialize_with = "lenient::opt_string")]
    pub email: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub phone: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub linkedin_url: Option<String>,
    /// Any further profile links (GitHub, portfolio, ...).
    #[serde(deserialize_with = "lenient::string_vec")]
    pub links: Vec<String>,
}

/// Candidate skills arrive either as a flat list or grouped by category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CandidateSkills {
    Flat(Vec<String>),
    Categorized(BTreeMap<String, Vec<String>>),
}

impl Default for CandidateSkills {
    fn default() -> Self {
        CandidateSkills::Flat(Vec::new())
    }
}

impl CandidateSkills {
    /// Builds skills from arbitrary JSON. Categories whose value is not a list
    /// are dropped; values that are neither list nor object give no skills.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Array(_) => CandidateSkills::Flat(lenient::strings_from(value)),
            Value::Object(map) => CandidateSkills::Categorized(
                map.iter()
                    .filter(|(_, v)| v.is_array())
                    .map(|(category, v)| (category.clone(), lenient::strings_from(v)))
                    .collect(),
            ),
            _ => CandidateSkills::default(),
        }
    }

    /// All skills across categories, in category order.
    pub fn iter(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        match self {
            CandidateSkills::Flat(skills) => Box::new(skills.iter().map(String::as_str)),
            CandidateSkills::Categorized(groups) => {
                Box::new(groups.values().flatten().map(String::as_str))
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

impl<'de> Deserialize<'de> for CandidateSkills {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(CandidateSkills::from_value(&Value::deserialize(deserializer)?))
    }
}

/// One item of a candidate's work history.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ExperienceEntry {
    Text(String),
    Record(ExperienceRecord),
    /// Anything else the extractor produced; kept for provenance, never scored.
    Other(Value),
}

impl ExperienceEntry {
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::String(text) => ExperienceEntry::Text(text),
            Value::Object(_) => match serde_json::from_value::<ExperienceRecord>(value.clone()) {
                Ok(record) => ExperienceEntry::Record(record),
                Err(_) => ExperienceEntry::Other(value),
            },
            other => ExperienceEntry::Other(other),
        }
    }

    /// The narrative used for semantic matching, if this entry has one.
    pub fn document(&self) -> Option<String> {
        match self {
            ExperienceEntry::Text(text) if !text.trim().is_empty() => Some(text.clone()),
            ExperienceEntry::Record(record) => {
                let lines: Vec<&str> = record
                    .responsibilities
                    .iter()
                    .map(String::as_str)
                    .filter(|line| !line.trim().is_empty())
                    .collect();
                (!lines.is_empty()).then(|| lines.join(" "))
            }
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for ExperienceEntry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(ExperienceEntry::from_value(Value::deserialize(deserializer)?))
    }
}

fn experience_entries<'de, D>(deserializer: D) -> Result<Vec<ExperienceEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items.into_iter().map(ExperienceEntry::from_value).collect(),
        _ => Vec::new(),
    })
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceRecord {
    #[serde(deserialize_with = "lenient::opt_string")]
    pub job_title: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub company_name: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub start_date: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub end_date: Option<String>,
    #[serde(deserialize_with = "lenient::string_vec")]
    pub responsibilities: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationRecord {
    #[serde(deserialize_with = "lenient::opt_string")]
    pub degree: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub institution: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub start_date: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub end_date: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub gpa: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectRecord {
    #[serde(deserialize_with = "lenient::opt_string")]
    pub project_name: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub year: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub description: Option<String>,
}
