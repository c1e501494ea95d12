//! Screening Pipeline: one job description, many candidates.
//!
//! Requirements are extracted once and shared read-only. Each candidate then
//! runs its own extract → score → decide → compose pipeline on a task, with at
//! most `max_workers` in flight. A failing, timed-out or panicking candidate
//! becomes a failed record; it never aborts the batch.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::screening::composer::{compose, ComposerSettings, MessageContext};
use crate::screening::decision::{decide, Threshold};
use crate::screening::error::{ExtractionError, ScreeningError};
use crate::screening::models::{Outcome, RequirementSet, Verdict};
use crate::screening::profile::ProfileExtractor;
use crate::screening::requirements::RequirementExtractor;
use crate::screening::scorer::{evaluate, round_one_decimal, ScoringPolicy};

// ────────────────────────────────────────────────────────────────────────────
// Inputs and settings
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct CandidateInput {
    /// Caller-supplied id. A UUID is generated when absent or blank.
    #[serde(default)]
    pub candidate_id: Option<String>,
    pub resume_text: String,
}

#[derive(Debug, Clone, Copy)]
pub struct PipelineSettings {
    pub max_workers: usize,
    /// Budget for one extraction, covering every retry.
    pub extraction_timeout: Duration,
    /// Extra attempts after a transient failure.
    pub extraction_retries: u32,
    /// Linear: the n-th retry waits n × `retry_backoff`.
    pub retry_backoff: Duration,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            max_workers: 4,
            extraction_timeout: Duration::from_secs(30),
            extraction_retries: 2,
            retry_backoff: Duration::from_millis(250),
        }
    }
}

impl PipelineSettings {
    pub fn validate(&self) -> Result<(), ScreeningError> {
        if self.max_workers == 0 {
            return Err(ScreeningError::Configuration(
                "max_workers must be at least 1".to_string(),
            ));
        }
        if self.extraction_timeout.is_zero() {
            return Err(ScreeningError::Configuration(
                "extraction_timeout must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Output records
// ────────────────────────────────────────────────────────────────────────────

/// Flat per-candidate record for callers.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OutcomeRecord {
    pub candidate_id: String,
    pub score: f64,
    pub verdict: Verdict,
    pub subject: String,
    pub message: String,
    pub rationale: String,
    pub matched: Vec<String>,
    pub unmatched: Vec<String>,
}

impl From<Outcome> for OutcomeRecord {
    fn from(outcome: Outcome) -> Self {
        let Outcome { decision, message } = outcome;
        Self {
            matched: decision.evaluation.matched_names(),
            unmatched: decision.evaluation.unmatched_names(),
            candidate_id: decision.evaluation.candidate_id,
            score: decision.evaluation.score,
            verdict: decision.verdict,
            subject: message.subject,
            message: message.body,
            rationale: decision.evaluation.rationale,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    ExtractionFailure,
    ExtractionTimeout,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FailedCandidate {
    pub candidate_id: String,
    pub reason: FailureReason,
    pub detail: String,
}

impl FailedCandidate {
    fn new(candidate_id: String, err: &ScreeningError) -> Self {
        let reason = match err {
            ScreeningError::ExtractionTimeout(_) => FailureReason::ExtractionTimeout,
            _ => FailureReason::ExtractionFailure,
        };
        Self {
            candidate_id,
            reason,
            detail: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CandidateReport {
    Evaluated(OutcomeRecord),
    Failed(FailedCandidate),
}

/// Counts over one batch. Failed candidates are never scored, so they are
/// left out of `mean_score`.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct BatchSummary {
    pub total: usize,
    pub evaluated: usize,
    pub selected: usize,
    pub rejected: usize,
    pub failed: usize,
    pub mean_score: Option<f64>,
}

impl BatchSummary {
    pub fn from_reports(reports: &[CandidateReport]) -> Self {
        let mut summary = reports.iter().fold(
            BatchSummary {
                total: reports.len(),
                ..Default::default()
            },
            |mut acc, report| {
                match report {
                    CandidateReport::Evaluated(record) => {
                        acc.evaluated += 1;
                        match record.verdict {
                            Verdict::Selected => acc.selected += 1,
                            Verdict::Rejected => acc.rejected += 1,
                        }
                    }
                    CandidateReport::Failed(_) => acc.failed += 1,
                }
                acc
            },
        );

        let score_sum: f64 = reports
            .iter()
            .filter_map(|r| match r {
                CandidateReport::Evaluated(record) => Some(record.score),
                CandidateReport::Failed(_) => None,
            })
            .sum();
        summary.mean_score = (summary.evaluated > 0)
            .then(|| round_one_decimal(score_sum / summary.evaluated as f64));
        summary
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub batch_id: Uuid,
    pub evaluated_at: DateTime<Utc>,
    pub threshold: Threshold,
    pub requirements: RequirementSet,
    /// One entry per input candidate, in input order.
    pub outcomes: Vec<CandidateReport>,
    pub summary: BatchSummary,
}

// ────────────────────────────────────────────────────────────────────────────
// Screener
// ────────────────────────────────────────────────────────────────────────────

/// Owns the extraction backends and the policies applied to every batch.
#[derive(Clone)]
pub struct Screener {
    requirement_extractor: Arc<dyn RequirementExtractor>,
    profile_extractor: Arc<dyn ProfileExtractor>,
    scoring: ScoringPolicy,
    composer: Arc<ComposerSettings>,
    settings: PipelineSettings,
}

impl Screener {
    pub fn new(
        requirement_extractor: Arc<dyn RequirementExtractor>,
        profile_extractor: Arc<dyn ProfileExtractor>,
        scoring: ScoringPolicy,
        composer: ComposerSettings,
        settings: PipelineSettings,
    ) -> Result<Self, ScreeningError> {
        scoring.validate()?;
        settings.validate()?;
        Ok(Self {
            requirement_extractor,
            profile_extractor,
            scoring,
            composer: Arc::new(composer),
            settings,
        })
    }

    /// Job-level extraction, with the same timeout and retry policy as candidates.
    pub async fn extract_requirements(
        &self,
        job_description: &str,
    ) -> Result<RequirementSet, ScreeningError> {
        let attempts = with_retries(&self.settings, "job description", || {
            self.requirement_extractor.extract(job_description)
        });
        match tokio::time::timeout(self.settings.extraction_timeout, attempts).await {
            Ok(Ok(requirements)) => Ok(requirements),
            Ok(Err(e)) => Err(ScreeningError::from_job_extraction(e)),
            Err(_) => Err(ScreeningError::ExtractionTimeout(
                self.settings.extraction_timeout,
            )),
        }
    }

    /// Screens every candidate against one job description.
    ///
    /// Fails as a whole only when the job description cannot be turned into
    /// requirements; that happens before any candidate is touched.
    pub async fn screen_batch(
        &self,
        job_description: &str,
        threshold: Threshold,
        candidates: Vec<CandidateInput>,
    ) -> Result<BatchReport, ScreeningError> {
        let requirements = Arc::new(self.extract_requirements(job_description).await?);
        let batch_id = Uuid::new_v4();

        info!(
            %batch_id,
            candidates = candidates.len(),
            requirements = requirements.requirements.len(),
            backend = self.profile_extractor.backend(),
            %threshold,
            "Screening batch started"
        );

        let ids: Vec<String> = candidates
            .iter()
            .map(|c| resolve_candidate_id(c.candidate_id.as_deref()))
            .collect();

        let semaphore = Arc::new(Semaphore::new(self.settings.max_workers));
        let mut tasks = JoinSet::new();

        for (index, (candidate, candidate_id)) in candidates.into_iter().zip(ids.iter()).enumerate()
        {
            let screener = self.clone();
            let requirements = Arc::clone(&requirements);
            let semaphore = Arc::clone(&semaphore);
            let candidate_id = candidate_id.clone();

            tasks.spawn(async move {
                let report = match semaphore.acquire_owned().await {
                    Ok(_permit) => {
                        screener
                            .screen_candidate(
                                candidate_id,
                                &candidate.resume_text,
                                &requirements,
                                threshold,
                            )
                            .await
                    }
                    Err(_) => CandidateReport::Failed(FailedCandidate::new(
                        candidate_id,
                        &ScreeningError::ExtractionFailure("worker pool closed".to_string()),
                    )),
                };
                (index, report)
            });
        }

        let mut slots: Vec<Option<CandidateReport>> = vec![None; ids.len()];
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, report)) => slots[index] = Some(report),
                Err(e) => error!(%batch_id, "Candidate task aborted: {e}"),
            }
        }

        // An empty slot means the task panicked before reporting.
        let outcomes: Vec<CandidateReport> = slots
            .into_iter()
            .zip(ids)
            .map(|(slot, candidate_id)| {
                slot.unwrap_or_else(|| {
                    CandidateReport::Failed(FailedCandidate::new(
                        candidate_id,
                        &ScreeningError::ExtractionFailure(
                            "candidate pipeline aborted unexpectedly".to_string(),
                        ),
                    ))
                })
            })
            .collect();

        let summary = BatchSummary::from_reports(&outcomes);
        info!(
            %batch_id,
            total = summary.total,
            selected = summary.selected,
            rejected = summary.rejected,
            failed = summary.failed,
            "Screening batch finished"
        );

        Ok(BatchReport {
            batch_id,
            evaluated_at: Utc::now(),
            threshold,
            requirements: (*requirements).clone(),
            outcomes,
            summary,
        })
    }

    async fn screen_candidate(
        &self,
        candidate_id: String,
        resume_text: &str,
        requirements: &RequirementSet,
        threshold: Threshold,
    ) -> CandidateReport {
        let attempts = with_retries(&self.settings, &candidate_id, || {
            self.profile_extractor.extract(resume_text)
        });
        let profile = match tokio::time::timeout(self.settings.extraction_timeout, attempts).await
        {
            Ok(Ok(profile)) => profile,
            Ok(Err(e)) => {
                let err = ScreeningError::from_candidate_extraction(e);
                warn!(%candidate_id, "Candidate extraction failed: {err}");
                return CandidateReport::Failed(FailedCandidate::new(candidate_id, &err));
            }
            Err(_) => {
                let err = ScreeningError::ExtractionTimeout(self.settings.extraction_timeout);
                warn!(%candidate_id, "Candidate extraction timed out");
                return CandidateReport::Failed(FailedCandidate::new(candidate_id, &err));
            }
        };

        let evaluation = evaluate(&candidate_id, requirements, &profile, &self.scoring);
        let decision = decide(evaluation, threshold);
        let context = MessageContext {
            role_title: requirements.title.as_deref(),
            candidate_name: profile.contact.name.as_deref(),
        };
        let outcome = compose(decision, context, &self.composer);

        info!(
            %candidate_id,
            score = outcome.decision.evaluation.score,
            verdict = ?outcome.decision.verdict,
            "Candidate evaluated"
        );
        CandidateReport::Evaluated(outcome.into())
    }
}

fn resolve_candidate_id(supplied: Option<&str>) -> String {
    match supplied.map(str::trim) {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => Uuid::new_v4().to_string(),
    }
}

/// Runs `attempt` until it succeeds, fails permanently, or retries run out.
async fn with_retries<T, F, Fut>(
    settings: &PipelineSettings,
    subject: &str,
    mut attempt: F,
) -> Result<T, ExtractionError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ExtractionError>>,
{
    let mut retries = 0;
    loop {
        match attempt().await {
            Err(e) if e.is_transient() && retries < settings.extraction_retries => {
                retries += 1;
                warn!(subject, retry = retries, "Transient extraction error, retrying: {e}");
                tokio::time::sleep(settings.retry_backoff * retries).await;
            }
            result => return result,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::screening::lexicon;
    use crate::screening::models::{CandidateProfile, Category, Criterion};
    use crate::screening::profile::{ensure_scoreable, KeywordProfileExtractor};
    use crate::screening::requirements::{
        assemble_requirements, DraftRequirement, KeywordRequirementExtractor, WeightPolicy,
    };

    const JOB: &str = "Backend Engineer\n\
        Requirements: Python, AWS, Docker\n\
        Nice to have: Terraform";

    struct FixedRequirements;

    #[async_trait]
    impl RequirementExtractor for FixedRequirements {
        async fn extract(&self, job_description: &str) -> Result<RequirementSet, ExtractionError> {
            if job_description.trim().is_empty() {
                return Err(ExtractionError::Empty);
            }
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
        }

        fn backend(&self) -> &'static str {
            "fixed"
        }
    }

    /// Resume words are skills, except for directives:
    /// `slow`, `panic`, `garbage`, `flaky`, `delay=<ms>`.
    #[derive(Default)]
    struct ScriptedProfiles {
        calls: AtomicUsize,
        in_flight: AtomicUsize,
        peak: AtomicUsize,
        transient_failures: AtomicU32,
    }

    impl ScriptedProfiles {
        fn flaky(failures: u32) -> Self {
            Self {
                transient_failures: AtomicU32::new(failures),
                ..Default::default()
            }
        }

        async fn respond(&self, resume_text: &str) -> Result<CandidateProfile, ExtractionError> {
            if resume_text.trim().is_empty() {
                return Err(ExtractionError::Empty);
            }
            let mut profile = CandidateProfile::default();
            for word in resume_text.split_whitespace() {
                match word {
                    "slow" => tokio::time::sleep(Duration::from_secs(3600)).await,
                    "panic" => panic!("scripted panic"),
                    "garbage" => return Err(ExtractionError::Malformed("scripted".to_string())),
                    "flaky" => {
                        let failed = self
                            .transient_failures
                            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                            .is_ok();
                        if failed {
                            return Err(ExtractionError::Transient("503".to_string()));
                        }
                    }
                    w if w.starts_with("delay=") => {
                        let ms: u64 = w["delay=".len()..].parse().unwrap();
                        tokio::time::sleep(Duration::from_millis(ms)).await;
                    }
                    w => {
                        profile.skills.insert(lexicon::normalize_skill(w));
                    }
                }
            }
            ensure_scoreable(profile)
        }
    }

    #[async_trait]
    impl ProfileExtractor for ScriptedProfiles {
        async fn extract(&self, resume_text: &str) -> Result<CandidateProfile, ExtractionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            let result = self.respond(resume_text).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            result
        }

        fn backend(&self) -> &'static str {
            "scripted"
        }
    }

    fn screener(profiles: Arc<ScriptedProfiles>, settings: PipelineSettings) -> Screener {
        Screener::new(
            Arc::new(FixedRequirements),
            profiles,
            ScoringPolicy::default(),
            ComposerSettings::default(),
            settings,
        )
        .unwrap()
    }

    fn candidate(id: &str, resume_text: &str) -> CandidateInput {
        CandidateInput {
            candidate_id: Some(id.to_string()),
            resume_text: resume_text.to_string(),
        }
    }

    fn threshold(value: f64) -> Threshold {
        Threshold::new(value).unwrap()
    }

    fn expect_failed(report: &CandidateReport) -> &FailedCandidate {
        match report {
            CandidateReport::Failed(failed) => failed,
            other => panic!("expected failure, got {other:?}"),
        }
    }

    fn report_id(report: &CandidateReport) -> &str {
        match report {
            CandidateReport::Evaluated(record) => &record.candidate_id,
            CandidateReport::Failed(failed) => &failed.candidate_id,
        }
    }

    fn expect_evaluated(report: &CandidateReport) -> &OutcomeRecord {
        match report {
            CandidateReport::Evaluated(record) => record,
            other => panic!("expected evaluation, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_keyword_batch_with_one_empty_resume() {
        let screener = Screener::new(
            Arc::new(KeywordRequirementExtractor::new(WeightPolicy::default())),
            Arc::new(KeywordProfileExtractor),
            ScoringPolicy::default(),
            ComposerSettings::default(),
            PipelineSettings::default(),
        )
        .unwrap();

        let report = screener
            .screen_batch(
                JOB,
                threshold(5.0),
                vec![
                    candidate("strong", "Python, AWS, Docker and Terraform for 6 years"),
                    candidate("weak", "Frontend work in JavaScript and React"),
                    candidate("blank", "   "),
                ],
            )
            .await
            .unwrap();

        let strong = expect_evaluated(&report.outcomes[0]);
        assert_eq!(strong.score, 10.0);
        assert_eq!(strong.verdict, Verdict::Selected);

        let weak = expect_evaluated(&report.outcomes[1]);
        assert_eq!(weak.verdict, Verdict::Rejected);
        assert!(weak.message.contains("Python"));
        assert!(!weak.message.contains("Terraform"));

        let blank = expect_failed(&report.outcomes[2]);
        assert_eq!(blank.reason, FailureReason::ExtractionFailure);

        assert_eq!(report.summary.total, 3);
        assert_eq!(report.summary.evaluated, 2);
        assert_eq!(report.summary.selected, 1);
        assert_eq!(report.summary.rejected, 1);
        assert_eq!(report.summary.failed, 1);
    }

    #[tokio::test]
    async fn test_empty_job_description_fails_before_candidates() {
        let profiles = Arc::new(ScriptedProfiles::default());
        let screener = screener(profiles.clone(), PipelineSettings::default());

        let err = screener
            .screen_batch("  \n", threshold(5.0), vec![candidate("a", "python")])
            .await
            .unwrap_err();

        assert!(matches!(err, ScreeningError::InsufficientSpecification(_)));
        assert_eq!(profiles.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_extraction_times_out_without_blocking_batch() {
        let screener = screener(Arc::new(ScriptedProfiles::default()), PipelineSettings::default());

        let report = screener
            .screen_batch(
                JOB,
                threshold(5.0),
                vec![candidate("slow", "python slow"), candidate("fast", "python aws docker")],
            )
            .await
            .unwrap();

        let slow = expect_failed(&report.outcomes[0]);
        assert_eq!(slow.reason, FailureReason::ExtractionTimeout);
        assert_eq!(expect_evaluated(&report.outcomes[1]).verdict, Verdict::Selected);
        assert_eq!(report.summary.failed, 1);
        assert_eq!(report.summary.mean_score, Some(10.0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_transient_errors_are_retried() {
        let profiles = Arc::new(ScriptedProfiles::flaky(2));
        let screener = screener(profiles.clone(), PipelineSettings::default());

        let report = screener
            .screen_batch(JOB, threshold(5.0), vec![candidate("a", "flaky python aws docker")])
            .await
            .unwrap();

        assert_eq!(expect_evaluated(&report.outcomes[0]).score, 10.0);
        assert_eq!(profiles.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retries_are_bounded() {
        let profiles = Arc::new(ScriptedProfiles::flaky(5));
        let settings = PipelineSettings {
            extraction_retries: 1,
            ..Default::default()
        };
        let screener = screener(profiles.clone(), settings);

        let report = screener
            .screen_batch(JOB, threshold(5.0), vec![candidate("a", "flaky python")])
            .await
            .unwrap();

        let failed = expect_failed(&report.outcomes[0]);
        assert_eq!(failed.reason, FailureReason::ExtractionFailure);
        assert_eq!(profiles.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_malformed_output_is_not_retried() {
        let profiles = Arc::new(ScriptedProfiles::default());
        let screener = screener(profiles.clone(), PipelineSettings::default());

        let report = screener
            .screen_batch(JOB, threshold(5.0), vec![candidate("a", "python garbage")])
            .await
            .unwrap();

        expect_failed(&report.outcomes[0]);
        assert_eq!(profiles.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_outcomes_keep_input_order() {
        let screener = screener(Arc::new(ScriptedProfiles::default()), PipelineSettings::default());
        let candidates: Vec<CandidateInput> = (0..6)
            .map(|i| candidate(&format!("c{i}"), &format!("python delay={}", (6 - i) * 10)))
            .collect();

        let report = screener
            .screen_batch(JOB, threshold(5.0), candidates)
            .await
            .unwrap();

        let ids: Vec<&str> = report.outcomes.iter().map(report_id).collect();
        assert_eq!(ids, vec!["c0", "c1", "c2", "c3", "c4", "c5"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_worker_pool_bounds_concurrency() {
        let profiles = Arc::new(ScriptedProfiles::default());
        let settings = PipelineSettings {
            max_workers: 3,
            ..Default::default()
        };
        let screener = screener(profiles.clone(), settings);
        let candidates: Vec<CandidateInput> = (0..8)
            .map(|i| candidate(&format!("c{i}"), "python delay=10"))
            .collect();

        let report = screener
            .screen_batch(JOB, threshold(5.0), candidates)
            .await
            .unwrap();

        assert_eq!(report.summary.evaluated, 8);
        assert_eq!(profiles.peak.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_panicking_candidate_becomes_failed_record() {
        let screener = screener(Arc::new(ScriptedProfiles::default()), PipelineSettings::default());

        let report = screener
            .screen_batch(
                JOB,
                threshold(5.0),
                vec![candidate("boom", "python panic"), candidate("ok", "python aws docker")],
            )
            .await
            .unwrap();

        let failed = expect_failed(&report.outcomes[0]);
        assert_eq!(failed.candidate_id, "boom");
        assert_eq!(failed.reason, FailureReason::ExtractionFailure);
        expect_evaluated(&report.outcomes[1]);
    }

    #[tokio::test]
    async fn test_missing_candidate_id_is_generated() {
        let screener = screener(Arc::new(ScriptedProfiles::default()), PipelineSettings::default());
        let candidates = vec![
            CandidateInput {
                candidate_id: None,
                resume_text: "python".to_string(),
            },
            candidate("  ", "python"),
        ];

        let report = screener
            .screen_batch(JOB, threshold(5.0), candidates)
            .await
            .unwrap();

        for outcome in &report.outcomes {
            assert!(Uuid::parse_str(report_id(outcome)).is_ok());
        }
        assert_ne!(report_id(&report.outcomes[0]), report_id(&report.outcomes[1]));
    }

    #[tokio::test]
    async fn test_report_serializes_with_status_tags() {
        let screener = screener(Arc::new(ScriptedProfiles::default()), PipelineSettings::default());

        let report = screener
            .screen_batch(
                JOB,
                threshold(5.0),
                vec![candidate("a", "python aws docker"), candidate("b", "")],
            )
            .await
            .unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["threshold"], 5.0);
        assert_eq!(json["outcomes"][0]["status"], "evaluated");
        assert_eq!(json["outcomes"][0]["verdict"], "selected");
        assert_eq!(json["outcomes"][1]["status"], "failed");
        assert_eq!(json["outcomes"][1]["reason"], "extraction_failure");
        assert_eq!(json["summary"]["failed"], 1);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let settings = PipelineSettings {
            max_workers: 0,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ScreeningError::Configuration(_))
        ));
    }
}
