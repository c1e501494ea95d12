//! Scorer: measures one candidate profile against a requirement set.
//!
//! Algorithm:
//! 1. Per requirement, a `RequirementMatch` with a confidence in [0, 1]:
//!    - skill: exact token → 1.0, related token → `related_credit`, else 0.0
//!    - years: stated ≥ min → 1.0, stated < min → stated/min, unknown → `unknown_years_credit`
//!    - attribute: the profile's confidence, matched at ≥ `attribute_match_floor`
//! 2. base  = Σ conf×w (required) / Σ w (required) × 10
//! 3. bonus = Σ conf×w (bonus)    / Σ w (required) × 10
//! 4. raw   = clamp(base + min(bonus, max_bonus_uplift, headroom_share × (10 − base)), 0, 10)
//! 5. score = raw rounded to one decimal when every required item is matched,
//!    otherwise raw rounded down and capped at 9.9.
//!
//! Because `headroom_share < 1`, bonus can only close part of the gap left by
//! required requirements. Rounding down keeps that true for the one-decimal
//! score the gate compares: a profile missing a required item never reaches
//! 10.0, the score of one that satisfies all of them.

use serde::Serialize;

use crate::screening::error::ScreeningError;
use crate::screening::lexicon;
use crate::screening::models::{
    CandidateProfile, Criterion, Evaluation, Evidence, JobRequirement, RequirementMatch,
    RequirementSet,
};

pub const MAX_SCORE: f64 = 10.0;

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct ScoringPolicy {
    pub related_credit: f64,
    pub unknown_years_credit: f64,
    pub attribute_match_floor: f64,
    pub max_bonus_uplift: f64,
    pub headroom_share: f64,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            related_credit: 0.5,
            unknown_years_credit: 0.5,
            attribute_match_floor: 0.5,
            max_bonus_uplift: 2.0,
            headroom_share: 0.5,
        }
    }
}

impl ScoringPolicy {
    pub fn validate(&self) -> Result<(), ScreeningError> {
        let unit_open = |v: f64| v.is_finite() && (0.0..1.0).contains(&v);
        if !unit_open(self.related_credit) || !unit_open(self.unknown_years_credit) {
            return Err(ScreeningError::Configuration(
                "partial credits must lie in [0, 1)".to_string(),
            ));
        }
        if !(self.attribute_match_floor.is_finite()
            && self.attribute_match_floor > 0.0
            && self.attribute_match_floor <= 1.0)
        {
            return Err(ScreeningError::Configuration(
                "attribute_match_floor must lie in (0, 1]".to_string(),
            ));
        }
        if !unit_open(self.headroom_share) {
            return Err(ScreeningError::Configuration(
                "headroom_share must lie in [0, 1)".to_string(),
            ));
        }
        if !(self.max_bonus_uplift.is_finite() && self.max_bonus_uplift >= 0.0) {
            return Err(ScreeningError::Configuration(
                "max_bonus_uplift must be a non-negative number".to_string(),
            ));
        }
        Ok(())
    }
}

/// Scores one profile. Pure and deterministic.
pub fn evaluate(
    candidate_id: &str,
    requirements: &RequirementSet,
    profile: &CandidateProfile,
    policy: &ScoringPolicy,
) -> Evaluation {
    let matches: Vec<RequirementMatch> = requirements
        .requirements
        .iter()
        .map(|r| match_requirement(r, profile, policy))
        .collect();
    let score = aggregate_score(&matches, policy);
    let rationale = build_rationale(&matches, score);

    Evaluation {
        candidate_id: candidate_id.to_string(),
        score,
        matches,
        rationale,
    }
}

fn match_requirement(
    requirement: &JobRequirement,
    profile: &CandidateProfile,
    policy: &ScoringPolicy,
) -> RequirementMatch {
    let (matched, confidence, evidence) = match &requirement.criterion {
        Criterion::Skill(token) => {
            if profile.skills.contains(token) {
                (true, 1.0, Evidence::Exact)
            } else if let Some(related) = lexicon::related_skill(token, &profile.skills) {
                (
                    false,
                    policy.related_credit,
                    Evidence::Related {
                        skill: related.to_string(),
                    },
                )
            } else {
                (false, 0.0, Evidence::Missing)
            }
        }
        Criterion::MinYears(min) => match profile.years_experience {
            None => (false, policy.unknown_years_credit, Evidence::Unknown),
            Some(stated) if stated >= *min => (true, 1.0, Evidence::Years { stated }),
            Some(stated) => (
                false,
                stated as f64 / *min as f64,
                Evidence::Years { stated },
            ),
        },
        Criterion::Attribute(name) => match profile.attributes.get(name) {
            Some(&confidence) => (
                confidence >= policy.attribute_match_floor,
                confidence.clamp(0.0, 1.0),
                Evidence::Attribute,
            ),
            None => (false, 0.0, Evidence::Missing),
        },
    };

    RequirementMatch {
        requirement: requirement.clone(),
        matched,
        confidence,
        evidence,
    }
}

/// Aggregate score in [0, 10] for a list of matches, one decimal.
pub fn aggregate_score(matches: &[RequirementMatch], policy: &ScoringPolicy) -> f64 {
    let required_max: f64 = matches
        .iter()
        .filter(|m| m.requirement.is_required())
        .map(|m| m.requirement.weight)
        .sum();
    if required_max <= 0.0 {
        return 0.0;
    }

    let (required_sum, bonus_sum) = matches.iter().fold((0.0, 0.0), |(req, bonus), m| {
        if m.requirement.is_required() {
            (req + m.weighted(), bonus)
        } else {
            (req, bonus + m.weighted())
        }
    });

    let base = (required_sum / required_max * MAX_SCORE).clamp(0.0, MAX_SCORE);
    let bonus = bonus_sum / required_max * MAX_SCORE;
    let uplift = bonus
        .min(policy.max_bonus_uplift)
        .min(policy.headroom_share * (MAX_SCORE - base))
        .max(0.0);

    let raw = (base + uplift).clamp(0.0, MAX_SCORE);
    let all_required_met = matches
        .iter()
        .filter(|m| m.requirement.is_required())
        .all(|m| m.matched);
    if all_required_met {
        round_one_decimal(raw)
    } else {
        floor_one_decimal(raw).min(MAX_SCORE - 0.1)
    }
}

pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

// The epsilon absorbs representation error, e.g. 7.3 stored as 7.2999….
fn floor_one_decimal(value: f64) -> f64 {
    (value * 10.0 + 1e-9).floor() / 10.0
}

fn build_rationale(matches: &[RequirementMatch], score: f64) -> String {
    let required: Vec<&RequirementMatch> =
        matches.iter().filter(|m| m.requirement.is_required()).collect();
    let required_met = required.iter().filter(|m| m.matched).count();
    let partial = required
        .iter()
        .filter(|m| !m.matched && m.confidence > 0.0)
        .count();
    let bonus_met = matches
        .iter()
        .filter(|m| !m.requirement.is_required() && m.matched)
        .count();
    let bonus_total = matches.len() - required.len();

    let mut rationale = format!(
        "Score {score:.1}/10: {required_met} of {} required requirements met",
        required.len()
    );
    if partial > 0 {
        rationale.push_str(&format!(", {partial} partially"));
    }
    if bonus_total > 0 {
        rationale.push_str(&format!("; {bonus_met} of {bonus_total} bonus requirements met"));
    }
    rationale.push('.');
    rationale
}
