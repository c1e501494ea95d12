//! Response Composer: interview invitation or rejection feedback.
//!
//! Invitations cite the candidate's strongest matched requirements.
//! Rejections cite only unmatched *required* requirements: bonus items never
//! drive a rejection, so they are never named as gaps.

use crate::screening::lexicon;
use crate::screening::models::{
    Decision, Evidence, Message, Outcome, RequirementMatch, Verdict,
};

#[derive(Debug, Clone)]
pub struct ComposerSettings {
    pub company_name: String,
    pub sender_name: String,
    /// How many strengths an invitation cites.
    pub highlight_count: usize,
}

impl Default for ComposerSettings {
    fn default() -> Self {
        Self {
            company_name: "Our Company".to_string(),
            sender_name: "The Hiring Team".to_string(),
            highlight_count: 3,
        }
    }
}

/// Extra context for personalising a message. Not used for any decision.
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageContext<'a> {
    pub role_title: Option<&'a str>,
    pub candidate_name: Option<&'a str>,
}

pub fn compose(
    decision: Decision,
    context: MessageContext<'_>,
    settings: &ComposerSettings,
) -> Outcome {
    let message = match decision.verdict {
        Verdict::Selected => invitation(&decision, context, settings),
        Verdict::Rejected => rejection(&decision, context, settings),
    };
    Outcome { decision, message }
}

/// Top-`n` matched requirements by confidence × weight. Ties keep
/// requirement order.
pub fn strongest_matches(matches: &[RequirementMatch], n: usize) -> Vec<&RequirementMatch> {
    let mut matched: Vec<&RequirementMatch> = matches.iter().filter(|m| m.matched).collect();
    matched.sort_by(|a, b| b.weighted().total_cmp(&a.weighted()));
    matched.truncate(n);
    matched
}

/// Unmatched required requirements, in requirement order.
pub fn required_gaps(matches: &[RequirementMatch]) -> Vec<&RequirementMatch> {
    matches
        .iter()
        .filter(|m| m.requirement.is_required() && !m.matched)
        .collect()
}

fn invitation(
    decision: &Decision,
    context: MessageContext<'_>,
    settings: &ComposerSettings,
) -> Message {
    let subject = match context.role_title {
        Some(title) => format!("Interview invitation: {title}"),
        None => "Interview invitation".to_string(),
    };

    let strengths: Vec<String> =
        strongest_matches(&decision.evaluation.matches, settings.highlight_count)
            .into_iter()
            .map(|m| m.requirement.name.clone())
            .collect();

    let mut body = greeting(context);
    body.push_str(&format!(
        "Thank you for your application to {}. ",
        position_at(context, settings)
    ));
    if strengths.is_empty() {
        body.push_str(
            "We enjoyed reading your application and would like to invite you to an interview.\n\n",
        );
    } else {
        body.push_str(&format!(
            "Your background stood out to us, in particular your {}, and we would like to invite you to an interview.\n\n",
            join_natural(&strengths)
        ));
    }
    body.push_str(
        "The interview will take about one hour. We will follow up shortly with proposed \
         times and a meeting link.\n\n\
         We look forward to speaking with you.\n\n",
    );
    body.push_str(&sign_off(settings));

    Message { subject, body }
}

fn rejection(
    decision: &Decision,
    context: MessageContext<'_>,
    settings: &ComposerSettings,
) -> Message {
    let subject = match context.role_title {
        Some(title) => format!("Your application for {title}"),
        None => "Your application".to_string(),
    };

    let mut body = greeting(context);
    body.push_str(&format!(
        "Thank you for your interest in {} and for the time you put into your application. \
         After careful review, we have decided not to move forward with your application at this time.\n\n",
        position_at(context, settings)
    ));

    let gaps = required_gaps(&decision.evaluation.matches);
    if gaps.is_empty() {
        body.push_str(&format!(
            "Your profile covers the core requirements of the role, but your overall fit score of \
             {:.1}/10 fell below the bar of {} for this round.\n\n",
            decision.evaluation.score, decision.threshold
        ));
    } else {
        body.push_str("To be transparent about our decision, the role requires the following, which we could not confirm from your resume:\n");
        for gap in gaps {
            body.push_str(&format!("- {}\n", gap_line(gap)));
        }
        body.push('\n');
    }

    body.push_str("We encourage you to apply again as your experience grows, and we wish you success in your search.\n\n");
    body.push_str(&sign_off(settings));

    Message { subject, body }
}

fn gap_line(gap: &RequirementMatch) -> String {
    let name = &gap.requirement.name;
    match &gap.evidence {
        Evidence::Related { skill } => format!(
            "{name}: you list {}, which is related; consider deepening your {name} experience",
            lexicon::skill_display_name(skill)
        ),
        Evidence::Years { stated } => {
            format!("{name}: your resume indicates {stated} year(s)")
        }
        Evidence::Unknown => format!("{name}: your resume does not state your experience"),
        Evidence::Attribute => format!("{name}: we found only limited evidence of this"),
        Evidence::Exact | Evidence::Missing => name.clone(),
    }
}

fn greeting(context: MessageContext<'_>) -> String {
    format!("Dear {},\n\n", context.candidate_name.unwrap_or("Candidate"))
}

/// "the {title} position at {company}", or just the company.
fn position_at(context: MessageContext<'_>, settings: &ComposerSettings) -> String {
    match context.role_title {
        Some(title) => format!("the {title} position at {}", settings.company_name),
        None => settings.company_name.clone(),
    }
}

fn sign_off(settings: &ComposerSettings) -> String {
    format!(
        "Best regards,\n{}\n{}",
        settings.sender_name, settings.company_name
    )
}

/// "a", "a and b", "a, b and c".
fn join_natural(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} and {last}", init.join(", ")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screening::decision::{decide, Threshold};
    use crate::screening::models::{
        CandidateProfile, Category, Criterion, Evaluation, RequirementSet,
    };
    use crate::screening::requirements::{assemble_requirements, DraftRequirement, WeightPolicy};
    use crate::screening::scorer::{evaluate, ScoringPolicy};

    fn cloud_requirements() -> RequirementSet {
        let skill = |token: &str, category| {
            DraftRequirement::new(Criterion::Skill(token.to_string()), category)
        };
        assemble_requirements(
            Some("Backend Engineer".to_string()),
            vec![
                skill("python", Category::Required),
                skill("aws", Category::Required),
                skill("docker", Category::Required),
                skill("terraform", Category::Bonus),
            ],
            &WeightPolicy::default(),
        )
        .unwrap()
    }

    fn evaluation_for(skills: &[&str]) -> Evaluation {
        let profile = CandidateProfile {
            skills: skills.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        };
        evaluate("c", &cloud_requirements(), &profile, &ScoringPolicy::default())
    }

    fn outcome_for(skills: &[&str], threshold: f64, context: MessageContext<'_>) -> Outcome {
        let decision = decide(evaluation_for(skills), Threshold::new(threshold).unwrap());
        compose(decision, context, &ComposerSettings::default())
    }

    #[test]
    fn test_invitation_cites_strongest_matches() {
        let outcome = outcome_for(
            &["python", "aws", "docker", "terraform"],
            5.0,
            MessageContext {
                role_title: Some("Backend Engineer"),
                candidate_name: Some("Jane Doe"),
            },
        );
        let message = &outcome.message;
        assert_eq!(outcome.decision.verdict, Verdict::Selected);
        assert_eq!(message.subject, "Interview invitation: Backend Engineer");
        assert!(message.body.starts_with("Dear Jane Doe,"));
        assert!(message.body.contains("Python, AWS and Docker"));
        // the bonus match has lower weight and falls outside the top three
        assert!(!message.body.contains("Terraform"));
    }

    #[test]
    fn test_rejection_cites_only_required_gaps() {
        let outcome = outcome_for(&["javascript", "react"], 5.0, MessageContext::default());
        let body = &outcome.message.body;
        assert_eq!(outcome.decision.verdict, Verdict::Rejected);
        assert!(body.starts_with("Dear Candidate,"));
        assert!(body.contains("- Python\n"));
        assert!(body.contains("- AWS\n"));
        assert!(body.contains("- Docker\n"));
        assert!(!body.contains("Terraform"));
    }

    #[test]
    fn test_rejection_explains_related_skill() {
        let outcome = outcome_for(&["python", "gcp"], 9.0, MessageContext::default());
        let body = &outcome.message.body;
        assert!(body.contains("AWS: you list GCP, which is related; consider deepening your AWS experience"));
        assert!(body.contains("- Docker\n"));
    }

    #[test]
    fn test_rejection_with_no_required_gaps_cites_no_gaps() {
        let outcome = outcome_for(&["python", "aws", "docker"], 10.0, MessageContext::default());
        // full required coverage scores 10 and is selected even at the top threshold
        assert_eq!(outcome.decision.verdict, Verdict::Selected);

        let mut evaluation = evaluation_for(&["python", "aws", "docker"]);
        evaluation.score = 9.5;
        let decision = decide(evaluation, Threshold::new(9.8).unwrap());
        let outcome = compose(decision, MessageContext::default(), &ComposerSettings::default());
        let body = &outcome.message.body;
        assert!(body.contains("covers the core requirements"));
        assert!(body.contains("9.5/10"));
        assert!(body.contains("9.8"));
        assert!(!body.contains("- "));
    }

    #[test]
    fn test_sign_off_uses_settings() {
        let settings = ComposerSettings {
            company_name: "Acme".to_string(),
            sender_name: "Dana Recruiter".to_string(),
            highlight_count: 1,
        };
        let decision = decide(
            evaluation_for(&["python", "aws", "docker"]),
            Threshold::new(5.0).unwrap(),
        );
        let outcome = compose(decision, MessageContext::default(), &settings);
        assert!(outcome.message.body.ends_with("Best regards,\nDana Recruiter\nAcme"));
        assert!(outcome.message.body.contains("in particular your Python,"));
    }

    #[test]
    fn test_strongest_matches_ties_keep_requirement_order() {
        let evaluation = evaluation_for(&["python", "aws", "docker"]);
        let top: Vec<&str> = strongest_matches(&evaluation.matches, 2)
            .into_iter()
            .map(|m| m.requirement.name.as_str())
            .collect();
        assert_eq!(top, vec!["Python", "AWS"]);
    }

    #[test]
    fn test_join_natural() {
        let items = |v: &[&str]| v.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        assert_eq!(join_natural(&items(&[])), "");
        assert_eq!(join_natural(&items(&["a"])), "a");
        assert_eq!(join_natural(&items(&["a", "b"])), "a and b");
        assert_eq!(join_natural(&items(&["a", "b", "c"])), "a, b and c");
    }
}
