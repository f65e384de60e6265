//! Profile extraction: document text, then LLM-structured job and candidate profiles.

pub mod document;
pub mod jd_parser;
pub mod prompts;
pub mod resume_parser;

pub use document::read_document;
pub use jd_parser::parse_job_description;
pub use resume_parser::parse_resume;
