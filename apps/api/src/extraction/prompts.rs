// LLM prompts for job-description skill extraction.

/// Role half of the extraction system prompt; see `llm_client::prompts::json_system`.
pub const JD_EXTRACT_ROLE: &str =
    "You are an expert technical recruiter who reads job descriptions and lists \
    the concrete skills, tools and technologies they ask for.";

/// Extraction prompt template. Replace `{jd_text}` before sending.
pub const JD_EXTRACT_PROMPT_TEMPLATE: &str = r#"Extract the key technical skills, tools and
technologies from the job description below.

Return a JSON object with this EXACT schema (no extra fields):
{
  "job_title": "Senior Data Engineer",
  "department": "Data Platform",
  "required_skills": [
    {
      "domain": "Data Engineering",
      "category": "Tools and Platforms",
      "sub_category": "Azure Data Factory",
      "description": "Building and orchestrating pipelines in Azure Data Factory."
    }
  ]
}

Rules:
- "category" is exactly one of "Practice and Technologies" or "Tools and Platforms".
- "domain" is a broad area such as Data Engineering, DevOps, Cloud Computing or
  Software Engineering.
- "sub_category" is the skill name itself, as it would appear in a skills matrix.
- "description" is one short sentence; use an empty string if the text gives nothing.
- Use an empty string for "job_title" or "department" when the text does not state them.
- List each skill once.

Job description:
{jd_text}"#;
