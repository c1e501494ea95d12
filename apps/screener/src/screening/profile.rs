//! Profile Extractor: turns resume text into a `CandidateProfile`.

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;

use crate::screening::error::ExtractionError;
use crate::screening::lexicon;
use crate::screening::models::{CandidateProfile, ContactInfo};

#[async_trait]
pub trait ProfileExtractor: Send + Sync {
    async fn extract(&self, resume_text: &str) -> Result<CandidateProfile, ExtractionError>;

    fn backend(&self) -> &'static str;
}

/// Rejects profiles with nothing scoreable. An empty profile would silently
/// score as a total mismatch, so it is an extraction failure instead.
pub fn ensure_scoreable(profile: CandidateProfile) -> Result<CandidateProfile, ExtractionError> {
    if profile.is_empty() {
        return Err(ExtractionError::Insufficient(
            "resume yields no recognizable skills, experience or attributes".to_string(),
        ));
    }
    Ok(profile)
}

/// Lexicon-driven profile extractor. Deterministic, no network.
pub struct KeywordProfileExtractor;

#[async_trait]
impl ProfileExtractor for KeywordProfileExtractor {
    async fn extract(&self, resume_text: &str) -> Result<CandidateProfile, ExtractionError> {
        if resume_text.trim().is_empty() {
            return Err(ExtractionError::Empty);
        }

        let skills: BTreeSet<String> = lexicon::find_skills(resume_text)
            .into_iter()
            .map(str::to_string)
            .collect();
        let attributes: BTreeMap<String, f64> = lexicon::find_profile_attributes(resume_text)
            .into_iter()
            .map(|(name, confidence)| (name.to_string(), confidence))
            .collect();

        ensure_scoreable(CandidateProfile {
            skills,
            years_experience: lexicon::parse_years(resume_text),
            attributes,
            contact: extract_contact(resume_text),
        })
    }

    fn backend(&self) -> &'static str {
        "keyword"
    }
}

fn extract_contact(text: &str) -> ContactInfo {
    ContactInfo {
        name: detect_name(text),
        email: detect_email(text),
    }
}

/// First line when it reads like a personal name: 2-4 capitalised words.
fn detect_name(text: &str) -> Option<String> {
    let first = text.lines().map(str::trim).find(|l| !l.is_empty())?;
    let words: Vec<&str> = first.split_whitespace().collect();
    let is_name = (2..=4).contains(&words.len())
        && words.iter().all(|w| {
            w.chars().next().is_some_and(char::is_uppercase)
                && w.chars().all(|c| c.is_alphabetic() || c == '-' || c == '\'' || c == '.')
        });
    is_name.then(|| words.join(" "))
}

fn detect_email(text: &str) -> Option<String> {
    text.split(|c: char| c.is_whitespace() || matches!(c, ',' | ';' | '<' | '>' | '(' | ')' | '|'))
        .map(|token| token.trim_matches(|c: char| !c.is_alphanumeric()))
        .find(|token| is_email(token))
        .map(str::to_lowercase)
}

fn is_email(token: &str) -> bool {
    let Some((local, domain)) = token.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain
            .rsplit_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && tld.len() >= 2)
}
