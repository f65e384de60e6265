// Prompts for the profile extraction steps.
// Placeholders in `{braces}` are filled with `str::replace` before sending.

pub const JD_PARSE_SYSTEM: &str = crate::llm_client::prompts::JSON_ONLY_SYSTEM;

pub const JD_PARSE_PROMPT_TEMPLATE: &str = "\
You are an expert job parsing agent. Your task is to extract key information \
from the following job description and return it as a structured JSON object.

Extract the following fields:
- job_title: The official title of the job.
- company: The name of the hiring company.
- location: The primary location of the job (e.g., city, country).
- responsibilities: A list of key responsibilities.
- required_skills: A list of essential skills or technologies.
- experience_level: The required years of experience or a general level (e.g., \"5+ years\", \"Entry-level\").
- educational_requirements: The minimum educational qualifications (e.g., \"Bachelor's degree in Computer Science\").

{null_when_absent}
The output MUST be a valid JSON object.

---
Job Description:
{jd_text}
---

JSON Output:";

pub const RESUME_PARSE_SYSTEM: &str = crate::llm_client::prompts::JSON_ONLY_SYSTEM;

pub const RESUME_PARSE_PROMPT_TEMPLATE: &str = r#"You are an expert resume parser. You are given the raw text of a resume, which may be badly laid out:
- Labels and values may be split apart (e.g. "CGPA" on one line, "8.63" on another).
- Content for one section may be spread across the document.
- Job titles, companies and dates may be run together in a single line.

Infer the correct structure and produce a clean JSON object with this schema:

{
  "candidate_name": string,
  "contact_info": {
    "email": string,
    "phone": string,
    "linkedin_url": string,
    "links": [string]
  },
  "summary": string,
  "experience": [
    {
      "job_title": string,
      "company_name": string,
      "start_date": string,
      "end_date": string,
      "responsibilities": [string]
    }
  ],
  "education": [
    {
      "degree": string,
      "institution": string,
      "start_date": string,
      "end_date": string,
      "gpa": string
    }
  ],
  "skills": {
    "languages": [string],
    "frameworks_tools": [string],
    "databases": [string],
    "ai_ml": [string],
    "cloud_devops": [string]
  },
  "projects": [
    {
      "project_name": string,
      "year": string,
      "description": string
    }
  ],
  "awards_honors": [string],
  "publications": [string]
}

Rules:
1. Consolidate: gather every relevant detail (GPA, degree names, dates) from anywhere in the text.
2. Granularize: split long strings into job_title, company_name, start_date and end_date.
3. Use lists: split comma-separated or bulleted skills into arrays of strings.
4. Place each piece of data under the appropriate key of the schema.
5. {null_when_absent}

Resume text:
---
{resume_text}
---

Begin your response with the JSON object."#;
