//! LLM extraction backend: structured extraction via Claude.
//!
//! Model output is never trusted as-is: every field is checked and
//! normalised by `validate_requirements` / `validate_profile` before it
//! becomes a `RequirementSet` or `CandidateProfile`. Weights always come from
//! the local `WeightPolicy`.

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::llm_client::{LlmClient, LlmError};
use crate::screening::error::ExtractionError;
use crate::screening::lexicon::{self, ADVANCED_DEGREE, DEGREE, MAX_PLAUSIBLE_YEARS};
use crate::screening::models::{CandidateProfile, Category, ContactInfo, Criterion, RequirementSet};
use crate::screening::profile::{ensure_scoreable, ProfileExtractor};
use crate::screening::prompts::{
    PROFILE_PROMPT_TEMPLATE, PROFILE_SYSTEM, REQUIREMENTS_PROMPT_TEMPLATE, REQUIREMENTS_SYSTEM,
};
use crate::screening::requirements::{
    assemble_requirements, DraftRequirement, RequirementExtractor, WeightPolicy,
};

/// Career length above which a stated total is treated as bad output.
const MAX_PROFILE_YEARS: f64 = 60.0;

impl From<LlmError> for ExtractionError {
    fn from(err: LlmError) -> Self {
        match err {
            e if e.is_transient() => ExtractionError::Transient(e.to_string()),
            e @ (LlmError::Parse(_) | LlmError::EmptyContent) => {
                ExtractionError::Malformed(e.to_string())
            }
            e => ExtractionError::Backend(e.to_string()),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Raw model output
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RawRequirementSet {
    pub title: Option<String>,
    #[serde(default)]
    pub requirements: Vec<RawRequirement>,
}

#[derive(Debug, Deserialize)]
pub struct RawRequirement {
    pub kind: String,
    /// String for skills and attributes; string or number for years.
    pub value: Value,
    pub category: String,
}

#[derive(Debug, Deserialize)]
pub struct RawProfile {
    pub name: Option<String>,
    pub email: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    pub years_experience: Option<f64>,
    #[serde(default)]
    pub attributes: BTreeMap<String, f64>,
}

// ────────────────────────────────────────────────────────────────────────────
// Validation
// ────────────────────────────────────────────────────────────────────────────

pub fn validate_requirements(
    raw: RawRequirementSet,
    policy: &WeightPolicy,
) -> Result<RequirementSet, ExtractionError> {
    let mut drafts = Vec::with_capacity(raw.requirements.len());

    for (index, item) in raw.requirements.into_iter().enumerate() {
        let value = value_text(&item.value).ok_or_else(|| {
            ExtractionError::Malformed(format!("requirement {index} has an empty value"))
        })?;

        let category = match item.category.trim().to_lowercase().as_str() {
            "required" => Category::Required,
            "bonus" => Category::Bonus,
            other => {
                return Err(ExtractionError::Malformed(format!(
                    "requirement {index} has unknown category '{other}'"
                )))
            }
        };

        let criterion = match item.kind.trim().to_lowercase().as_str() {
            "skill" => Criterion::Skill(lexicon::normalize_skill(&value)),
            "attribute" => Criterion::Attribute(lexicon::normalize_attribute(&value)),
            "years" => {
                let years = value
                    .trim_end_matches('+')
                    .trim()
                    .parse::<u32>()
                    .ok()
                    .filter(|y| *y <= MAX_PLAUSIBLE_YEARS)
                    .ok_or_else(|| {
                        ExtractionError::Malformed(format!(
                            "requirement {index} has invalid years '{value}'"
                        ))
                    })?;
                // "0 years" asks for nothing
                if years == 0 {
                    continue;
                }
                Criterion::MinYears(years)
            }
            other => {
                return Err(ExtractionError::Malformed(format!(
                    "requirement {index} has unknown kind '{other}'"
                )))
            }
        };

        drafts.push(DraftRequirement::new(criterion, category));
    }

    let title = raw
        .title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty());
    assemble_requirements(title, drafts, policy)
}

pub fn validate_profile(raw: RawProfile) -> Result<CandidateProfile, ExtractionError> {
    let skills: BTreeSet<String> = raw
        .skills
        .iter()
        .map(|s| lexicon::normalize_skill(s))
        .filter(|s| !s.is_empty())
        .collect();

    let years_experience = match raw.years_experience {
        None => None,
        Some(y) if y.is_finite() && (0.0..=MAX_PROFILE_YEARS).contains(&y) => Some(y.floor() as u32),
        Some(y) => {
            return Err(ExtractionError::Malformed(format!(
                "years_experience {y} is outside 0..={MAX_PROFILE_YEARS}"
            )))
        }
    };

    let mut attributes = BTreeMap::new();
    for (name, confidence) in raw.attributes {
        if !confidence.is_finite() || !(0.0..=1.0).contains(&confidence) {
            return Err(ExtractionError::Malformed(format!(
                "attribute '{name}' has confidence {confidence} outside [0, 1]"
            )));
        }
        let name = lexicon::normalize_attribute(&name);
        if name.is_empty() {
            continue;
        }
        let slot = attributes.entry(name).or_insert(confidence);
        *slot = f64::max(*slot, confidence);
    }
    // An advanced degree implies a degree.
    if let Some(&advanced) = attributes.get(ADVANCED_DEGREE) {
        let slot = attributes.entry(DEGREE.to_string()).or_insert(advanced);
        *slot = f64::max(*slot, advanced);
    }

    let contact = ContactInfo {
        name: non_blank(raw.name),
        email: non_blank(raw.email).map(|e| e.to_lowercase()),
    };

    ensure_scoreable(CandidateProfile {
        skills,
        years_experience,
        attributes,
        contact,
    })
}

fn value_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

// ────────────────────────────────────────────────────────────────────────────
// Extractors
// ────────────────────────────────────────────────────────────────────────────

pub struct LlmRequirementExtractor {
    llm: LlmClient,
    policy: WeightPolicy,
}

impl LlmRequirementExtractor {
    pub fn new(llm: LlmClient, policy: WeightPolicy) -> Self {
        Self { llm, policy }
    }
}

#[async_trait]
impl RequirementExtractor for LlmRequirementExtractor {
    async fn extract(&self, job_description: &str) -> Result<RequirementSet, ExtractionError> {
        if job_description.trim().is_empty() {
            return Err(ExtractionError::Empty);
        }
        let prompt = REQUIREMENTS_PROMPT_TEMPLATE.replace("{job_description}", job_description);
        let raw: RawRequirementSet = self.llm.call_json(&prompt, REQUIREMENTS_SYSTEM).await?;
        debug!(items = raw.requirements.len(), "LLM returned requirements");
        validate_requirements(raw, &self.policy)
    }

    fn backend(&self) -> &'static str {
        "llm"
    }
}

pub struct LlmProfileExtractor {
    llm: LlmClient,
}

impl LlmProfileExtractor {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl ProfileExtractor for LlmProfileExtractor {
    async fn extract(&self, resume_text: &str) -> Result<CandidateProfile, ExtractionError> {
        if resume_text.trim().is_empty() {
            return Err(ExtractionError::Empty);
        }
        let prompt = PROFILE_PROMPT_TEMPLATE.replace("{resume_text}", resume_text);
        let raw: RawProfile = self.llm.call_json(&prompt, PROFILE_SYSTEM).await?;
        validate_profile(raw)
    }

    fn backend(&self) -> &'static str {
        "llm"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screening::lexicon::LEADERSHIP;
    use serde_json::json;

    fn raw_requirements(value: Value) -> RawRequirementSet {
        serde_json::from_value(value).unwrap()
    }

    fn raw_profile(value: Value) -> RawProfile {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_requirements_are_normalized_and_weighted_locally() {
        let set = validate_requirements(
            raw_requirements(json!({
                "title": "  Platform Engineer ",
                "requirements": [
                    {"kind": "skill", "value": "Amazon Web Services", "category": "required"},
                    {"kind": "years", "value": 5, "category": "Required"},
                    {"kind": "skill", "value": "Terraform", "category": "bonus"},
                    {"kind": "attribute", "value": "Bachelor's degree", "category": "bonus"}
                ]
            })),
            &WeightPolicy::default(),
        )
        .unwrap();

        assert_eq!(set.title.as_deref(), Some("Platform Engineer"));
        let criteria: Vec<&Criterion> = set.requirements.iter().map(|r| &r.criterion).collect();
        assert_eq!(
            criteria,
            vec![
                &Criterion::Skill("aws".to_string()),
                &Criterion::MinYears(5),
                &Criterion::Skill("terraform".to_string()),
                &Criterion::Attribute(DEGREE.to_string()),
            ]
        );
        assert_eq!(set.requirements[0].weight, 1.0);
        assert_eq!(set.requirements[2].weight, 0.5);
    }

    #[test]
    fn test_years_given_as_string_with_plus() {
        let set = validate_requirements(
            raw_requirements(json!({
                "title": null,
                "requirements": [{"kind": "years", "value": "3+", "category": "required"}]
            })),
            &WeightPolicy::default(),
        )
        .unwrap();
        assert_eq!(set.requirements[0].criterion, Criterion::MinYears(3));
    }

    #[test]
    fn test_invalid_requirement_items_are_malformed() {
        let cases = [
            json!({"kind": "skill", "value": "  ", "category": "required"}),
            json!({"kind": "skill", "value": "Rust", "category": "mandatory"}),
            json!({"kind": "certification", "value": "CKA", "category": "required"}),
            json!({"kind": "years", "value": 80, "category": "required"}),
            json!({"kind": "years", "value": "several", "category": "required"}),
            json!({"kind": "skill", "value": ["Rust"], "category": "required"}),
        ];
        for item in cases {
            let raw = raw_requirements(json!({"title": null, "requirements": [item.clone()]}));
            let err = validate_requirements(raw, &WeightPolicy::default()).unwrap_err();
            assert!(matches!(err, ExtractionError::Malformed(_)), "{item} -> {err:?}");
        }
    }

    #[test]
    fn test_no_required_items_is_insufficient() {
        let raw = raw_requirements(json!({
            "title": "Engineer",
            "requirements": [{"kind": "skill", "value": "Go", "category": "bonus"}]
        }));
        let err = validate_requirements(raw, &WeightPolicy::default()).unwrap_err();
        assert!(matches!(err, ExtractionError::Insufficient(_)));
    }

    #[test]
    fn test_profile_is_normalized() {
        let profile = validate_profile(raw_profile(json!({
            "name": " Jane Doe ",
            "email": "Jane@Example.com",
            "skills": ["Python", "JS", "k8s", ""],
            "years_experience": 6.5,
            "attributes": {"Leadership": 0.8, "degree": 1.0}
        })))
        .unwrap();

        let skills: Vec<&str> = profile.skills.iter().map(String::as_str).collect();
        assert_eq!(skills, vec!["javascript", "kubernetes", "python"]);
        assert_eq!(profile.years_experience, Some(6));
        assert_eq!(profile.attributes.get(LEADERSHIP), Some(&0.8));
        assert_eq!(profile.attributes.get(DEGREE), Some(&1.0));
        assert_eq!(profile.contact.name.as_deref(), Some("Jane Doe"));
        assert_eq!(profile.contact.email.as_deref(), Some("jane@example.com"));
    }

    #[test]
    fn test_advanced_degree_implies_degree() {
        let profile = validate_profile(raw_profile(json!({
            "skills": ["Python"],
            "attributes": {"advanced_degree": 0.9}
        })))
        .unwrap();
        assert_eq!(profile.attributes.get(ADVANCED_DEGREE), Some(&0.9));
        assert_eq!(profile.attributes.get(DEGREE), Some(&0.9));

        let profile = validate_profile(raw_profile(json!({
            "skills": ["Python"],
            "attributes": {"degree": 0.4, "PhD": 1.0}
        })))
        .unwrap();
        assert_eq!(profile.attributes.get(DEGREE), Some(&1.0));

        let profile = validate_profile(raw_profile(json!({
            "skills": ["Python"],
            "attributes": {"degree": 1.0, "advanced_degree": 0.6}
        })))
        .unwrap();
        assert_eq!(profile.attributes.get(DEGREE), Some(&1.0));
    }

    #[test]
    fn test_profile_null_years_stay_unknown() {
        let profile = validate_profile(raw_profile(json!({
            "skills": ["Rust"],
            "years_experience": null
        })))
        .unwrap();
        assert_eq!(profile.years_experience, None);
        assert_eq!(profile.contact, ContactInfo::default());
    }

    #[test]
    fn test_profile_out_of_range_values_are_malformed() {
        for raw in [
            json!({"skills": ["Rust"], "years_experience": 75}),
            json!({"skills": ["Rust"], "years_experience": -1}),
            json!({"skills": ["Rust"], "attributes": {"leadership": 1.5}}),
            json!({"skills": ["Rust"], "attributes": {"degree": -0.2}}),
        ] {
            let err = validate_profile(raw_profile(raw.clone())).unwrap_err();
            assert!(matches!(err, ExtractionError::Malformed(_)), "{raw}");
        }
    }

    #[test]
    fn test_empty_profile_is_insufficient() {
        let err = validate_profile(raw_profile(json!({"name": "Jane Doe", "skills": []})))
            .unwrap_err();
        assert!(matches!(err, ExtractionError::Insufficient(_)));
    }

    #[test]
    fn test_llm_error_classification() {
        let transient: ExtractionError = LlmError::Api {
            status: 503,
            message: "overloaded".to_string(),
        }
        .into();
        assert!(transient.is_transient());

        let malformed: ExtractionError = LlmError::EmptyContent.into();
        assert!(matches!(malformed, ExtractionError::Malformed(_)));

        let backend: ExtractionError = LlmError::Api {
            status: 401,
            message: "invalid x-api-key".to_string(),
        }
        .into();
        assert!(matches!(backend, ExtractionError::Backend(_)));
    }
}
