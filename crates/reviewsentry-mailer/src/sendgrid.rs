//! SendGrid v3 delivery client

use crate::mailer::{Attachment, DeliveryReceipt, Mailer};
use crate::templates;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reviewsentry_core::{Error, Result, RetryPolicy};
use serde::Serialize;
use tracing::{debug, info};

const SENDGRID_API_URL: &str = "https://api.sendgrid.com/v3";

/// Sender identity stamped on every outbound notification.
#[derive(Debug, Clone)]
pub struct SenderIdentity {
    /// From address
    pub email: String,

    /// Display name, also used to sign take-down request bodies
    pub name: String,
}

/// SendGrid-backed notification dispatcher
#[derive(Debug)]
pub struct SendGridMailer {
    api_key: String,
    http: reqwest::Client,
    base_url: String,
    sender: SenderIdentity,
    retry: RetryPolicy,
}

impl SendGridMailer {
    /// Create a new mailer. Fails fast on an empty API key.
    pub fn new(api_key: impl Into<String>, sender: SenderIdentity) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(Error::config("empty SendGrid api key"));
        }

        Ok(Self {
            api_key,
            http: reqwest::Client::new(),
            base_url: SENDGRID_API_URL.to_string(),
            sender,
            retry: RetryPolicy::outbound(),
        })
    }

    /// Override the API base URL (for proxies and tests)
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Override the retry policy
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.api_key))
                .map_err(|e| Error::config(format!("invalid api key header: {}", e)))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    /// One mail-send attempt, without retries.
    async fn post_mail(&self, mail: &MailPayload) -> Result<DeliveryReceipt> {
        let url = format!("{}/mail/send", self.base_url);

        debug!(to = %mail.personalizations[0].to[0].email, subject = %mail.subject, "SendGrid send");

        let response = self
            .http
            .post(&url)
            .headers(self.headers()?)
            .json(mail)
            .send()
            .await
            .map_err(|e| Error::delivery(format!("SendGrid request failed: {}", e)))?;

        let status = response.status();
        if status.as_u16() >= 300 {
            let error_text = response.text().await.unwrap_or_default();
            return Err(Error::delivery(format!(
                "SendGrid error ({}): {}",
                status, error_text
            )));
        }

        Ok(DeliveryReceipt {
            status_code: status.as_u16(),
        })
    }

    fn payload(&self, to: &str, subject: &str, body: &str) -> MailPayload {
        MailPayload {
            personalizations: vec![Personalization {
                to: vec![Address {
                    email: to.to_string(),
                    name: None,
                }],
            }],
            from: Address {
                email: self.sender.email.clone(),
                name: Some(self.sender.name.clone()),
            },
            subject: subject.to_string(),
            content: vec![Content {
                content_type: "text/plain".to_string(),
                value: body.to_string(),
            }],
            attachments: None,
        }
    }
}

#[async_trait]
impl Mailer for SendGridMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<DeliveryReceipt> {
        let mail = self.payload(to, subject, body);

        let mail = &mail;
        let receipt = self
            .retry
            .run("mail send", move || self.post_mail(mail))
            .await?;

        info!(to, subject, status = receipt.status_code, "notification delivered");
        Ok(receipt)
    }

    async fn send_with_attachment(
        &self,
        to: &str,
        subject: &str,
        attachment: &Attachment,
    ) -> Result<DeliveryReceipt> {
        let mut mail = self.payload(to, subject, templates::report_body());
        mail.attachments = Some(vec![AttachmentPayload {
            content: attachment.content.clone(),
            filename: attachment.filename.clone(),
            attachment_type: attachment.mime_type.clone(),
            disposition: "attachment".to_string(),
        }]);

        let mail = &mail;
        let receipt = self
            .retry
            .run("mail send attachment", move || self.post_mail(mail))
            .await?;

        info!(
            to,
            subject,
            filename = %attachment.filename,
            status = receipt.status_code,
            "report delivered"
        );
        Ok(receipt)
    }
}

// =============================================================================
// Wire structures
// =============================================================================

#[derive(Debug, Serialize)]
struct MailPayload {
    personalizations: Vec<Personalization>,
    from: Address,
    subject: String,
    content: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    attachments: Option<Vec<AttachmentPayload>>,
}

#[derive(Debug, Serialize)]
struct Personalization {
    to: Vec<Address>,
}

#[derive(Debug, Serialize)]
struct Address {
    email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

#[derive(Debug, Serialize)]
struct Content {
    #[serde(rename = "type")]
    content_type: String,
    value: String,
}

#[derive(Debug, Serialize)]
struct AttachmentPayload {
    content: String,
    filename: String,
    #[serde(rename = "type")]
    attachment_type: String,
    disposition: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mailer() -> SendGridMailer {
        SendGridMailer::new(
            "SG.test-key",
            SenderIdentity {
                email: "moderation@reviewsentry.dev".to_string(),
                name: "Trust & Safety @ ReviewSentry".to_string(),
            },
        )
        .unwrap()
    }

    #[test]
    fn test_empty_api_key_rejected() {
        let err = SendGridMailer::new(
            "",
            SenderIdentity {
                email: "a@b.c".to_string(),
                name: "x".to_string(),
            },
        )
        .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_plain_payload_shape() {
        let mail = mailer().payload("seller@example.com", "subject", "body");
        let value = serde_json::to_value(&mail).unwrap();

        assert_eq!(
            value["personalizations"][0]["to"][0]["email"],
            "seller@example.com"
        );
        assert_eq!(value["from"]["email"], "moderation@reviewsentry.dev");
        assert_eq!(value["from"]["name"], "Trust & Safety @ ReviewSentry");
        assert_eq!(value["subject"], "subject");
        assert_eq!(value["content"][0]["type"], "text/plain");
        assert_eq!(value["content"][0]["value"], "body");
        assert!(value.get("attachments").is_none());
    }

    #[test]
    fn test_attachment_payload_shape() {
        let attachment = Attachment::from_bytes(b"a,b\n1,2\n", "new_output.csv", "text/csv");
        let mut mail = mailer().payload("seller@example.com", "File: new_output.csv", "ignored");
        mail.content[0].value = templates::report_body().to_string();
        mail.attachments = Some(vec![AttachmentPayload {
            content: attachment.content.clone(),
            filename: attachment.filename.clone(),
            attachment_type: attachment.mime_type.clone(),
            disposition: "attachment".to_string(),
        }]);

        let value = serde_json::to_value(&mail).unwrap();
        let att = &value["attachments"][0];
        assert_eq!(att["filename"], "new_output.csv");
        assert_eq!(att["type"], "text/csv");
        assert_eq!(att["disposition"], "attachment");
        // Content survives a base64 round trip.
        use base64::Engine;
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(att["content"].as_str().unwrap())
            .unwrap();
        assert_eq!(decoded, b"a,b\n1,2\n");
    }
}
