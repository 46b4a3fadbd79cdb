// LLM prompts for course recommendations.

pub const COURSE_ADVISOR_ROLE: &str =
    "You are a talent development advisor that specializes in career growth and upskilling.";

/// Course prompt template. Replace `{employee_name}`, `{domains}`, `{weak_skills}`
/// and `{interest_skills}` before sending.
pub const COURSE_PROMPT_TEMPLATE: &str = r#"Write a professional bio and course recommendations
for {employee_name}.

Employee skills:
- Domains: {domains}
- Weak skills: {weak_skills}
- High interest areas: {interest_skills}

Return a JSON object with this EXACT schema (no extra fields):
{
  "bio": "Two or three sentences highlighting the employee's strengths.",
  "courses": [
    {
      "title": "Big Data Processing",
      "platform": "Udemy",
      "description": "One sentence on how the course helps."
    }
  ]
}

Rules:
- Recommend 3 to 5 real courses from Coursera, Udemy, LinkedIn Learning, edX or Pluralsight.
- Courses must address the weak skills or the high interest areas.
- Do not invent strengths that the skills above do not show."#;
