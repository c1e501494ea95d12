// Prompt constants for the LLM extraction backend.
// Templates carry `{placeholder}` markers that are replaced before sending.

/// System prompt for requirement extraction. Enforces JSON-only output.
pub const REQUIREMENTS_SYSTEM: &str = "You are a precise recruiting analyst. \
    You extract the hiring requirements stated in a job description. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Requirement extraction prompt. Replace `{job_description}` before sending.
pub const REQUIREMENTS_PROMPT_TEMPLATE: &str = r#"Extract the requirements from the job description below.

Return a JSON object with this EXACT schema (no extra fields):
{
  "title": "Senior Backend Engineer",
  "requirements": [
    {"kind": "skill", "value": "Python", "category": "required"},
    {"kind": "years", "value": "5", "category": "required"},
    {"kind": "attribute", "value": "degree", "category": "bonus"}
  ]
}

Rules:
- "kind" is exactly one of "skill", "years", "attribute".
- "skill": one concrete technology, tool, language or practice per item. Use its common name.
- "years": minimum years of professional experience, as a whole number in "value". Emit at most one.
- "attribute": one of "degree", "advanced_degree", "leadership", or another short non-skill trait.
- "category" is "required" for must-haves and "bonus" for anything described as preferred,
  nice to have, a plus or a bonus.
- Only include what the text states. Do NOT infer requirements that are not written.
- "title" is the role title if stated, otherwise null.

JOB DESCRIPTION:
{job_description}"#;

/// System prompt for profile extraction. Enforces JSON-only output.
pub const PROFILE_SYSTEM: &str = "You are a precise resume analyst. \
    You extract factual information stated in a resume. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Profile extraction prompt. Replace `{resume_text}` before sending.
pub const PROFILE_PROMPT_TEMPLATE: &str = r#"Extract the candidate profile from the resume below.

Return a JSON object with this EXACT schema (no extra fields):
{
  "name": "Jane Doe",
  "email": "jane@example.com",
  "skills": ["Python", "AWS", "Docker"],
  "years_experience": 6,
  "attributes": {"degree": 1.0, "leadership": 0.8}
}

Rules:
- "skills": every technology, tool, language or practice the candidate lists. Use common names.
- "years_experience": total years of professional experience as a whole number,
  or null if the resume does not state it. Do NOT guess.
- "attributes": confidence between 0.0 and 1.0 for traits such as "degree",
  "advanced_degree", "leadership". Omit traits with no evidence.
- "name" and "email": null when absent.

RESUME:
{resume_text}"#;
