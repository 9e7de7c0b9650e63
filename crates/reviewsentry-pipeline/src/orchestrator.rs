//! Pipeline orchestrator
//!
//! Drives the category × review double loop strictly sequentially:
//! classification, confirmation, and notification for one pair complete
//! before the next pair begins. The run accumulator is owned exclusively
//! by the orchestrator; the report is written and mailed exactly once, at
//! the end of a fully completed run.
//!
//! Failure semantics: an oracle or delivery error that survives retries
//! aborts the remainder of the run. Records accumulated before the failure
//! are not rolled back, but the report is neither written nor sent.

use crate::confirmation;
use crate::report;
use reviewsentry_categories::{registry, CategoryDefinition};
use reviewsentry_core::{FlagOutcome, Result, Review, ViolationRecord};
use reviewsentry_mailer::{compose_body, compose_subject, report_subject, Attachment, Mailer};
use reviewsentry_oracle::{classification_prompt, review_prompt, Oracle, OutputShape};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// The classification-and-notification pipeline.
pub struct Orchestrator {
    oracle: Arc<dyn Oracle>,
    mailer: Arc<dyn Mailer>,
    categories: Vec<CategoryDefinition>,
    sender_name: String,
}

impl Orchestrator {
    /// Create an orchestrator over the full category registry.
    pub fn new(
        oracle: Arc<dyn Oracle>,
        mailer: Arc<dyn Mailer>,
        sender_name: impl Into<String>,
    ) -> Self {
        Self {
            oracle,
            mailer,
            categories: registry().to_vec(),
            sender_name: sender_name.into(),
        }
    }

    /// Replace the category set (used by tests and partial runs).
    pub fn with_categories(mut self, categories: Vec<CategoryDefinition>) -> Self {
        self.categories = categories;
        self
    }

    /// Run the full pipeline: classify, confirm, notify, then write the
    /// report and mail it as an attachment.
    ///
    /// Returns the accumulated violation records of a completed run.
    pub async fn execute(
        &self,
        reviews: &[Review],
        to_email: &str,
        output_path: &Path,
    ) -> Result<Vec<ViolationRecord>> {
        let records = self.run(reviews, to_email).await?;

        report::write_violations(output_path, &records)?;
        self.send_report(to_email, output_path).await?;

        info!(
            reviews = reviews.len(),
            categories = self.categories.len(),
            violations = records.len(),
            "pipeline run complete"
        );
        Ok(records)
    }

    /// The category × review evaluation loop.
    pub async fn run(&self, reviews: &[Review], to_email: &str) -> Result<Vec<ViolationRecord>> {
        metrics::counter!("reviewsentry_runs_total").increment(1);

        let mut records = Vec::new();

        for category in &self.categories {
            let shape = OutputShape::new(category.function_name, category.shape_description);
            let system_prompt = classification_prompt(category.function_name, category.few_shot);

            for review in reviews {
                let user_prompt = review_prompt(&review.title, &review.body);

                let verdict = self
                    .oracle
                    .classify(&system_prompt, &user_prompt, &shape)
                    .await?;
                metrics::counter!("reviewsentry_classifications_total").increment(1);

                if !verdict.flagged {
                    continue;
                }

                metrics::counter!("reviewsentry_flags_total").increment(1);
                info!(
                    category = category.name,
                    author = %review.author,
                    reason = %verdict.reason,
                    "review tentatively flagged"
                );

                match self
                    .handle_flag(category, review, &verdict.reason, to_email)
                    .await?
                {
                    FlagOutcome::NoViolation => continue,
                    FlagOutcome::Violation {
                        category,
                        email_body,
                    } => {
                        let review_id = review.review_id()?;
                        metrics::counter!("reviewsentry_violations_total").increment(1);
                        records.push(ViolationRecord {
                            review_id,
                            review: review.body.clone(),
                            violation_category: category,
                            flagged_reason: verdict.reason.clone(),
                            email_body,
                        });
                    }
                }
            }
        }

        Ok(records)
    }

    /// The shared post-flag sequence: confirm, then compose and send the
    /// take-down notification.
    ///
    /// Every category runs this same sequence; the definition contributes
    /// only its name and prompts.
    async fn handle_flag(
        &self,
        category: &CategoryDefinition,
        review: &Review,
        reason: &str,
        to_email: &str,
    ) -> Result<FlagOutcome> {
        let confirmed = confirmation::confirm(self.oracle.as_ref(), review, reason).await?;
        if !confirmed {
            warn!(
                category = category.name,
                author = %review.author,
                "tentative flag dropped by confirmation"
            );
            return Ok(FlagOutcome::NoViolation);
        }

        let review_id = review.review_id()?;
        let subject = compose_subject(category.name, &review.variation);
        let body = compose_body(
            &review.variation,
            &review.author,
            &review.body,
            &review_id,
            reason,
            &self.sender_name,
        );

        self.mailer.send(to_email, &subject, &body).await?;
        metrics::counter!("reviewsentry_notifications_total").increment(1);

        Ok(FlagOutcome::Violation {
            category: category.name.to_string(),
            email_body: body,
        })
    }

    /// Mail the written report as a base64 CSV attachment.
    async fn send_report(&self, to_email: &str, output_path: &Path) -> Result<()> {
        let bytes = std::fs::read(output_path)?;
        let filename = output_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "report.csv".to_string());

        let attachment = Attachment::from_bytes(&bytes, filename.clone(), "text/csv");
        self.mailer
            .send_with_attachment(to_email, &report_subject(&filename), &attachment)
            .await?;

        Ok(())
    }
}
