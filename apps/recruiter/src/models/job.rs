use serde::{Deserialize, Serialize};

use crate::models::lenient;

/// Structured job description, as produced by the JD extraction step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobProfile {
    #[serde(deserialize_with = "lenient::opt_string")]
    pub job_title: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub company: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub location: Option<String>,
    #[serde(deserialize_with = "lenient::string_vec")]
    pub responsibilities: Vec<String>,
    #[serde(deserialize_with = "lenient::string_vec")]
    pub required_skills: Vec<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub experience_level: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub educational_requirements: Option<String>,
}

impl JobProfile {
    pub fn title_or_default(&self) -> &str {
        self.job_title.as_deref().unwrap_or("N/A")
    }
}
