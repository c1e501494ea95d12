//! Requirement Extractor: turns a free-text job description into a weighted
//! `RequirementSet`.
//!
//! Backends implement `RequirementExtractor` and only decide *what* is asked
//! for and whether it is required or a bonus. Weights, de-duplication and the
//! "at least one required" rule are applied by `assemble_requirements`, so
//! every backend produces sets with the same invariants.

use async_trait::async_trait;
use serde::Serialize;

use crate::screening::error::{ExtractionError, ScreeningError};
use crate::screening::lexicon;
use crate::screening::models::{Category, Criterion, JobRequirement, RequirementSet};

#[async_trait]
pub trait RequirementExtractor: Send + Sync {
    async fn extract(&self, job_description: &str) -> Result<RequirementSet, ExtractionError>;

    /// Backend label, for logs.
    fn backend(&self) -> &'static str;
}

/// Weights assigned per category. Bonus must stay strictly below required so
/// bonus matches can never outweigh a missing required skill.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct WeightPolicy {
    required: f64,
    bonus: f64,
}

impl Default for WeightPolicy {
    fn default() -> Self {
        Self {
            required: 1.0,
            bonus: 0.5,
        }
    }
}

impl WeightPolicy {
    pub fn new(required: f64, bonus: f64) -> Result<Self, ScreeningError> {
        if !required.is_finite() || !bonus.is_finite() || bonus <= 0.0 || bonus >= required {
            return Err(ScreeningError::Configuration(format!(
                "weights must satisfy 0 < bonus < required (got required={required}, bonus={bonus})"
            )));
        }
        Ok(Self { required, bonus })
    }

    pub fn weight_for(&self, category: Category) -> f64 {
        match category {
            Category::Required => self.required,
            Category::Bonus => self.bonus,
        }
    }
}

/// A requirement before weighting and de-duplication.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftRequirement {
    pub criterion: Criterion,
    pub category: Category,
}

impl DraftRequirement {
    pub fn new(criterion: Criterion, category: Category) -> Self {
        Self {
            criterion,
            category,
        }
    }
}

/// Builds a `RequirementSet` from drafts in mention order.
///
/// - Duplicate criteria collapse into the first mention; required wins over bonus.
/// - At most one `MinYears` survives: the largest figure, required if any mention was.
/// - Fails with `Insufficient` when no required requirement remains.
pub fn assemble_requirements(
    title: Option<String>,
    drafts: Vec<DraftRequirement>,
    policy: &WeightPolicy,
) -> Result<RequirementSet, ExtractionError> {
    let mut merged: Vec<DraftRequirement> = Vec::new();

    for draft in drafts {
        let existing = merged.iter_mut().find(|m| match (&m.criterion, &draft.criterion) {
            (Criterion::MinYears(_), Criterion::MinYears(_)) => true,
            (a, b) => a == b,
        });
        match existing {
            Some(m) => {
                if let (Criterion::MinYears(kept), Criterion::MinYears(new)) =
                    (&mut m.criterion, &draft.criterion)
                {
                    *kept = (*kept).max(*new);
                }
                if draft.category == Category::Required {
                    m.category = Category::Required;
                }
            }
            None => merged.push(draft),
        }
    }

    let requirements: Vec<JobRequirement> = merged
        .into_iter()
        .map(|d| JobRequirement {
            name: d.criterion.display_name(),
            weight: policy.weight_for(d.category),
            category: d.category,
            criterion: d.criterion,
        })
        .collect();

    if !requirements.iter().any(JobRequirement::is_required) {
        return Err(ExtractionError::Insufficient(
            "job description yields no required requirements".to_string(),
        ));
    }

    Ok(RequirementSet {
        title,
        requirements,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// KeywordRequirementExtractor: default backend
// ────────────────────────────────────────────────────────────────────────────

/// Lexicon-driven extractor. Deterministic, no network.
///
/// Section labels ("Requirements:", "Nice to have:", "About us") set the
/// category for the text that follows; a sentence carrying its own bonus
/// marker ("Kafka is a plus") is bonus regardless of section.
pub struct KeywordRequirementExtractor {
    policy: WeightPolicy,
}

impl KeywordRequirementExtractor {
    pub fn new(policy: WeightPolicy) -> Self {
        Self { policy }
    }
}

#[async_trait]
impl RequirementExtractor for KeywordRequirementExtractor {
    async fn extract(&self, job_description: &str) -> Result<RequirementSet, ExtractionError> {
        if job_description.trim().is_empty() {
            return Err(ExtractionError::Empty);
        }
        let title = detect_title(job_description);
        let drafts = extract_drafts(job_description);
        assemble_requirements(title, drafts, &self.policy)
    }

    fn backend(&self) -> &'static str {
        "keyword"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Required,
    Bonus,
    /// Company blurb, benefits: mentions there are not requirements.
    Context,
}

const BONUS_MARKERS: &[&str] = &[
    "nice to have",
    "nice-to-have",
    "good to have",
    "preferred",
    "bonus",
    "a plus",
    "optional",
    "desirable",
];

const REQUIRED_MARKERS: &[&str] = &[
    "requirement",
    "required",
    "must have",
    "must-have",
    "qualifications",
    "what you need",
    "what we're looking for",
    "responsibilities",
    "skills",
];

const CONTEXT_MARKERS: &[&str] = &[
    "about us",
    "about the company",
    "who we are",
    "benefits",
    "perks",
    "what we offer",
];

fn classify_label(label: &str) -> Option<Section> {
    let label = label.trim().to_lowercase();
    if label == "about" {
        return Some(Section::Context);
    }
    if BONUS_MARKERS.iter().any(|m| label.contains(m)) {
        Some(Section::Bonus)
    } else if CONTEXT_MARKERS.iter().any(|m| label.contains(m)) {
        Some(Section::Context)
    } else if REQUIRED_MARKERS.iter().any(|m| label.contains(m)) {
        Some(Section::Required)
    } else {
        None
    }
}

/// Splits text into sentence-like segments: lines, then `;` and ". ".
/// A bare `.` is kept so tokens such as "node.js" survive.
fn segments(text: &str) -> Vec<String> {
    text.lines()
        .flat_map(|line| line.split(';'))
        .flat_map(|part| part.split(". "))
        .map(|s| s.trim().trim_start_matches(['-', '*', '•']).trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Section named by a leading "Label:". Labels are short, and a label that
/// names no section ("Kubernetes: hands-on") is ordinary requirement text.
fn section_label(segment: &str) -> Option<Section> {
    let (label, _) = segment.split_once(':')?;
    if label.split_whitespace().count() > 5 {
        return None;
    }
    classify_label(label)
}

fn extract_drafts(text: &str) -> Vec<DraftRequirement> {
    let mut section = Section::Required;
    let mut drafts = Vec::new();

    for segment in segments(text) {
        if let Some(next) = section_label(&segment) {
            section = next;
        } else if is_header_line(&segment) && lexicon::find_skills(&segment).is_empty() {
            if let Some(next) = classify_label(&segment) {
                section = next;
                continue;
            }
        }

        if section == Section::Context {
            continue;
        }

        let body = segment.as_str();
        let body_lower = body.to_lowercase();
        let category = if BONUS_MARKERS.iter().any(|m| body_lower.contains(m)) {
            Category::Bonus
        } else if section == Section::Bonus {
            Category::Bonus
        } else {
            Category::Required
        };

        // Ordered by position inside the segment.
        let mut found: Vec<(usize, Criterion)> = lexicon::find_skill_positions(body)
            .into_iter()
            .map(|(pos, skill)| (pos, Criterion::Skill(skill.to_string())))
            .collect();
        if let Some((years, pos)) = lexicon::find_years(&body_lower) {
            found.push((pos, Criterion::MinYears(years)));
        }
        for attribute in lexicon::find_requirement_attributes(body) {
            found.push((usize::MAX, Criterion::Attribute(attribute.to_string())));
        }
        found.sort_by_key(|(pos, _)| *pos);

        drafts.extend(
            found
                .into_iter()
                .map(|(_, criterion)| DraftRequirement::new(criterion, category)),
        );
    }

    drafts
}

/// Short line without sentence punctuation, e.g. "Nice to have".
fn is_header_line(segment: &str) -> bool {
    segment.split_whitespace().count() <= 6 && !segment.ends_with('.')
}

/// The first line is taken as the role title when it reads like one.
fn detect_title(text: &str) -> Option<String> {
    let first = text.lines().map(str::trim).find(|l| !l.is_empty())?;
    let words = first.split_whitespace().count();
    let looks_like_title = words <= 10
        && !first.ends_with('.')
        && !first.contains(':')
        && classify_label(first).is_none();
    looks_like_title.then(|| first.to_string())
}
