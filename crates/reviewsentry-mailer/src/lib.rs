//! ReviewSentry Mailer
//!
//! The Notification Dispatcher: composes deterministic take-down request
//! subjects/bodies and delivers them through SendGrid, including the
//! end-of-run report as a base64 attachment.
//!
//! Delivery is at-least-once: transient failures retry with the shared
//! backoff policy, and a retried send may duplicate a delivered message.

pub mod mailer;
pub mod sendgrid;
pub mod templates;

pub use mailer::{Attachment, DeliveryReceipt, Mailer};
pub use sendgrid::{SendGridMailer, SenderIdentity};
pub use templates::{compose_body, compose_subject, report_body, report_subject};
