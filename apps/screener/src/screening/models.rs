use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::screening::decision::Threshold;
use crate::screening::lexicon;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Required,
    Bonus,
}

/// What a requirement tests for.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Criterion {
    /// Canonical skill token, matched by set membership.
    Skill(String),
    /// Minimum years of professional experience.
    MinYears(u32),
    /// Non-skill trait such as `degree` or `leadership`.
    Attribute(String),
}

impl Criterion {
    pub fn display_name(&self) -> String {
        match self {
            Criterion::Skill(token) => lexicon::skill_display_name(token),
            Criterion::MinYears(years) => format!("{years}+ years of experience"),
            Criterion::Attribute(name) => lexicon::attribute_display_name(name),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct JobRequirement {
    pub name: String,
    pub category: Category,
    pub weight: f64,
    pub criterion: Criterion,
}

impl JobRequirement {
    pub fn is_required(&self) -> bool {
        self.category == Category::Required
    }
}

/// Structured form of one job description. Shared read-only across all
/// candidate pipelines of a batch.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RequirementSet {
    pub title: Option<String>,
    pub requirements: Vec<JobRequirement>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ContactInfo {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct CandidateProfile {
    /// Normalized, synonym-folded skill tokens.
    pub skills: BTreeSet<String>,
    /// `None` when the resume does not state it. Never defaulted to zero.
    pub years_experience: Option<u32>,
    /// Trait name -> confidence in [0, 1].
    pub attributes: BTreeMap<String, f64>,
    pub contact: ContactInfo,
}

impl CandidateProfile {
    /// True when nothing scoreable was extracted.
    pub fn is_empty(&self) -> bool {
        self.skills.is_empty() && self.years_experience.is_none() && self.attributes.is_empty()
    }
}

/// Why a requirement received the confidence it did.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Evidence {
    Exact,
    /// Candidate lists an adjacent skill instead.
    Related { skill: String },
    Attribute,
    Years { stated: u32 },
    /// The resume does not say either way.
    Unknown,
    Missing,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RequirementMatch {
    pub requirement: JobRequirement,
    pub matched: bool,
    pub confidence: f64,
    pub evidence: Evidence,
}

impl RequirementMatch {
    /// Contribution of this match before normalization.
    pub fn weighted(&self) -> f64 {
        self.confidence * self.requirement.weight
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Evaluation {
    pub candidate_id: String,
    /// In [0, 10], one decimal.
    pub score: f64,
    /// Same order as the requirement set.
    pub matches: Vec<RequirementMatch>,
    pub rationale: String,
}

impl Evaluation {
    pub fn matched_names(&self) -> Vec<String> {
        self.matches
            .iter()
            .filter(|m| m.matched)
            .map(|m| m.requirement.name.clone())
            .collect()
    }

    pub fn unmatched_names(&self) -> Vec<String> {
        self.matches
            .iter()
            .filter(|m| !m.matched)
            .map(|m| m.requirement.name.clone())
            .collect()
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Selected,
    Rejected,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Decision {
    pub evaluation: Evaluation,
    pub threshold: Threshold,
    pub verdict: Verdict,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Message {
    pub subject: String,
    pub body: String,
}

/// Final per-candidate artifact.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Outcome {
    pub decision: Decision,
    pub message: Message,
}
