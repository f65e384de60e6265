pub mod candidate;
pub mod job;
mod lenient;
pub mod scored;

pub use candidate::{CandidateProfile, CandidateSkills, ExperienceEntry};
pub use job::JobProfile;
pub use scored::{ScoredCandidate, ShortlistEntry};
