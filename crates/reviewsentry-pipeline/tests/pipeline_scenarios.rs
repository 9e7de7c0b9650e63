//! End-to-end pipeline scenarios over mock oracle and mailer
//!
//! Provides configurable mock implementations of the Oracle and Mailer
//! traits for exercising the orchestrator's record/notify/report behavior
//! without network access.

use async_trait::async_trait;
use reviewsentry_categories::by_name;
use reviewsentry_core::{Error, Result, Review, Verdict};
use reviewsentry_mailer::{Attachment, DeliveryReceipt, Mailer};
use reviewsentry_oracle::{Oracle, OutputShape};
use reviewsentry_pipeline::{read_violations, Orchestrator};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

/// A rule that flags a review for one category when its body matches.
struct FlagRule {
    function_name: &'static str,
    body_contains: &'static str,
    reason: &'static str,
}

/// Configurable mock oracle
#[derive(Default)]
struct MockOracle {
    rules: Vec<FlagRule>,
    confirm_answer: String,
    fail_classification: bool,
    classify_calls: AtomicU32,
    confirm_calls: AtomicU32,
}

impl MockOracle {
    fn new() -> Self {
        Self {
            confirm_answer: "True".to_string(),
            ..Default::default()
        }
    }

    fn with_rule(
        mut self,
        function_name: &'static str,
        body_contains: &'static str,
        reason: &'static str,
    ) -> Self {
        self.rules.push(FlagRule {
            function_name,
            body_contains,
            reason,
        });
        self
    }

    fn with_confirm_answer(mut self, answer: &str) -> Self {
        self.confirm_answer = answer.to_string();
        self
    }

    fn failing() -> Self {
        Self {
            fail_classification: true,
            ..Self::new()
        }
    }
}

#[async_trait]
impl Oracle for MockOracle {
    async fn classify(
        &self,
        _system_prompt: &str,
        user_prompt: &str,
        shape: &OutputShape,
    ) -> Result<Verdict> {
        self.classify_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_classification {
            return Err(Error::oracle("oracle unreachable"));
        }

        for rule in &self.rules {
            if rule.function_name == shape.name && user_prompt.contains(rule.body_contains) {
                return Ok(Verdict {
                    flagged: true,
                    reason: rule.reason.to_string(),
                });
            }
        }

        Ok(Verdict::clean())
    }

    async fn complete(&self, _system_prompt: &str, _user_prompt: &str) -> Result<String> {
        self.confirm_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.confirm_answer.clone())
    }
}

/// Recording mock mailer
#[derive(Default)]
struct MockMailer {
    sent: Mutex<Vec<(String, String, String)>>,
    attachments: Mutex<Vec<(String, String, String)>>,
}

impl MockMailer {
    fn sent(&self) -> Vec<(String, String, String)> {
        self.sent.lock().unwrap().clone()
    }

    fn attachments(&self) -> Vec<(String, String, String)> {
        self.attachments.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for MockMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<DeliveryReceipt> {
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), subject.to_string(), body.to_string()));
        Ok(DeliveryReceipt { status_code: 202 })
    }

    async fn send_with_attachment(
        &self,
        to: &str,
        subject: &str,
        attachment: &Attachment,
    ) -> Result<DeliveryReceipt> {
        self.attachments.lock().unwrap().push((
            to.to_string(),
            subject.to_string(),
            attachment.filename.clone(),
        ));
        Ok(DeliveryReceipt { status_code: 202 })
    }
}

fn clean_review() -> Review {
    Review::new(
        "Five stars",
        "I love this product, 5 stars!",
        "happy-buyer",
        "B000AAA",
        "https://www.amazon.com/a/b/c/R1CLEAN/e",
    )
}

fn link_review() -> Review {
    Review::new(
        "Full review on my blog",
        "Check my write-up at www.notamazon.example/review",
        "blogger-9",
        "B000BBB",
        "https://www.amazon.com/a/b/c/R2LINK/e",
    )
}

fn orchestrator(oracle: MockOracle, mailer: Arc<MockMailer>) -> Orchestrator {
    Orchestrator::new(Arc::new(oracle), mailer, "Trust & Safety @ ReviewSentry")
}

#[tokio::test]
async fn test_clean_run_produces_empty_report_and_one_attachment() {
    let mailer = Arc::new(MockMailer::default());
    let pipeline = orchestrator(MockOracle::new(), mailer.clone());

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("new_output.csv");

    let records = pipeline
        .execute(&[clean_review()], "seller@example.com", &output)
        .await
        .unwrap();

    assert!(records.is_empty());

    // Header-only report on disk.
    let content = std::fs::read_to_string(&output).unwrap();
    assert_eq!(
        content.trim_end(),
        "review_id,review,violation_category,flagged_reason,email_body"
    );

    // No category notifications, exactly one aggregate-report email.
    assert!(mailer.sent().is_empty());
    let attachments = mailer.attachments();
    assert_eq!(attachments.len(), 1);
    assert_eq!(attachments[0].0, "seller@example.com");
    assert_eq!(attachments[0].1, "File: new_output.csv");
    assert_eq!(attachments[0].2, "new_output.csv");
}

#[tokio::test]
async fn test_external_link_produces_one_record_and_one_notification() {
    let oracle = MockOracle::new().with_rule(
        "external_links",
        "www.notamazon.example",
        "User included an external link.",
    );
    let mailer = Arc::new(MockMailer::default());
    let pipeline = orchestrator(oracle, mailer.clone());

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("new_output.csv");

    let records = pipeline
        .execute(&[link_review()], "seller@example.com", &output)
        .await
        .unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].violation_category, "External links");
    assert_eq!(records[0].review_id, "R2LINK");
    assert_eq!(records[0].flagged_reason, "User included an external link.");

    let sent = mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(
        sent[0].1,
        "Request for Review Removal - ASIN: B000BBB - Violated Policy: External links"
    );
    assert!(sent[0].2.contains("Review ID: R2LINK"));
    assert!(sent[0].2.contains("username blogger-9"));

    // The record carries the rendered notification body.
    assert_eq!(records[0].email_body, sent[0].2);
}

#[tokio::test]
async fn test_rejected_confirmation_drops_flag_silently() {
    let oracle = MockOracle::new()
        .with_rule(
            "external_links",
            "www.notamazon.example",
            "User included an external link.",
        )
        .with_confirm_answer("False");
    let mailer = Arc::new(MockMailer::default());
    let pipeline = orchestrator(oracle, mailer.clone());

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("new_output.csv");

    let records = pipeline
        .execute(&[link_review()], "seller@example.com", &output)
        .await
        .unwrap();

    // No record, no category notification, but the run itself succeeds
    // and still mails the (empty) report.
    assert!(records.is_empty());
    assert!(mailer.sent().is_empty());
    assert_eq!(mailer.attachments().len(), 1);
}

#[tokio::test]
async fn test_empty_confirmation_output_also_rejects() {
    let oracle = MockOracle::new()
        .with_rule("external_links", "www.notamazon.example", "external link")
        .with_confirm_answer("   ");
    let mailer = Arc::new(MockMailer::default());
    let pipeline = orchestrator(oracle, mailer.clone());

    let records = pipeline
        .run(&[link_review()], "seller@example.com")
        .await
        .unwrap();

    assert!(records.is_empty());
    assert!(mailer.sent().is_empty());
}

#[tokio::test]
async fn test_oracle_failure_aborts_run_without_report() {
    let mailer = Arc::new(MockMailer::default());
    let pipeline = orchestrator(MockOracle::failing(), mailer.clone());

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("new_output.csv");

    let err = pipeline
        .execute(&[link_review()], "seller@example.com", &output)
        .await
        .unwrap_err();

    assert!(err.is_oracle());
    // No report written, no aggregate email sent.
    assert!(!output.exists());
    assert!(mailer.sent().is_empty());
    assert!(mailer.attachments().is_empty());
}

#[tokio::test]
async fn test_two_categories_flag_same_review_independently() {
    let oracle = MockOracle::new()
        .with_rule(
            "external_links",
            "www.notamazon.example",
            "User included an external link.",
        )
        .with_rule(
            "ads_promotional_content",
            "Check my write-up",
            "User included promotional content.",
        );
    let mailer = Arc::new(MockMailer::default());
    let pipeline = orchestrator(oracle, mailer.clone());

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("new_output.csv");

    let records = pipeline
        .execute(&[link_review()], "seller@example.com", &output)
        .await
        .unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].review_id, "R2LINK");
    assert_eq!(records[1].review_id, "R2LINK");

    // Registry order: external links before ads/promotional content.
    assert_eq!(records[0].violation_category, "External links");
    assert_eq!(
        records[1].violation_category,
        "Ads, conflicts of interest, promotional content"
    );
    assert_ne!(records[0].flagged_reason, records[1].flagged_reason);

    // One notification per confirmed category.
    assert_eq!(mailer.sent().len(), 2);

    // Both rows land in the written report.
    assert_eq!(read_violations(&output).unwrap(), records);
}

#[tokio::test]
async fn test_rerun_yields_identical_record_set() {
    let build = || {
        MockOracle::new().with_rule(
            "external_links",
            "www.notamazon.example",
            "User included an external link.",
        )
    };
    let reviews = vec![clean_review(), link_review()];

    let first = orchestrator(build(), Arc::new(MockMailer::default()))
        .run(&reviews, "seller@example.com")
        .await
        .unwrap();
    let second = orchestrator(build(), Arc::new(MockMailer::default()))
        .run(&reviews, "seller@example.com")
        .await
        .unwrap();

    let keys = |records: &[reviewsentry_core::ViolationRecord]| {
        records
            .iter()
            .map(|r| (r.violation_category.clone(), r.review_id.clone()))
            .collect::<Vec<_>>()
    };
    assert_eq!(keys(&first), keys(&second));
}

#[tokio::test]
async fn test_unflagged_reviews_skip_confirmation_entirely() {
    let oracle = Arc::new(MockOracle::new());
    let mailer = Arc::new(MockMailer::default());

    // Thirteen categories, one clean review: thirteen classifications,
    // zero confirmation calls.
    let pipeline = Orchestrator::new(oracle.clone(), mailer, "sender");
    pipeline
        .run(&[clean_review()], "seller@example.com")
        .await
        .unwrap();

    assert_eq!(oracle.classify_calls.load(Ordering::SeqCst), 13);
    assert_eq!(oracle.confirm_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_malformed_review_url_surfaces_identifiable_error() {
    let oracle = MockOracle::new().with_rule(
        "external_links",
        "www.notamazon.example",
        "User included an external link.",
    );
    let mailer = Arc::new(MockMailer::default());
    let pipeline = orchestrator(oracle, mailer);

    let bad_url_review = Review::new(
        "Full review on my blog",
        "Check my write-up at www.notamazon.example/review",
        "blogger-9",
        "B000BBB",
        "https://www.amazon.com/too-short",
    );

    let err = pipeline
        .run(&[bad_url_review], "seller@example.com")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::ReviewUrl(_)));
}

#[tokio::test]
async fn test_category_subset_runs_only_selected_definitions() {
    let oracle = Arc::new(MockOracle::new());
    let mailer = Arc::new(MockMailer::default());

    let pipeline = Orchestrator::new(oracle.clone(), mailer, "sender").with_categories(vec![
        *by_name("External links").unwrap(),
        *by_name("Hate speech").unwrap(),
    ]);

    pipeline
        .run(&[clean_review()], "seller@example.com")
        .await
        .unwrap();

    assert_eq!(oracle.classify_calls.load(Ordering::SeqCst), 2);
}
