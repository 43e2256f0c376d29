// src/infrastructure/pushplus.rs
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, instrument};

use crate::application::{Delivery, Notifier};
use crate::domain::{DomainError, Notification};

/// Posts notifications to the PushPlus webhook
pub struct PushPlusClient {
    url: String,
    client: reqwest::blocking::Client,
}

#[derive(Debug, Deserialize)]
struct PushPlusResponse {
    code: Option<i64>,
    msg: Option<String>,
}

impl PushPlusClient {
    pub fn new(url: &str, timeout: Option<Duration>) -> Result<Self, DomainError> {
        let mut builder = reqwest::blocking::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            url: url.to_string(),
            client: builder.build()?,
        })
    }
}

impl Notifier for PushPlusClient {
    /// Non-200 statuses are returned as a `Delivery`, not as an error
    #[instrument(level = "debug", skip_all, fields(url = %self.url))]
    fn send(&mut self, notification: &Notification) -> Result<Delivery, DomainError> {
        let response = self.client.post(&self.url).json(notification).send()?;
        let status = response.status().as_u16();
        let body = response.text().unwrap_or_default();
        debug!(status, %body, "PushPlus answered");

        let parsed = serde_json::from_str::<PushPlusResponse>(&body).ok();
        Ok(Delivery {
            status,
            code: parsed.as_ref().and_then(|r| r.code),
            message: parsed.and_then(|r| r.msg),
        })
    }
}

/// Logs the notification and prints its content instead of posting it
#[derive(Debug, Default)]
pub struct DryRunNotifier;

impl Notifier for DryRunNotifier {
    fn send(&mut self, notification: &Notification) -> Result<Delivery, DomainError> {
        info!(
            template = %notification.template,
            topic = %notification.topic,
            version = %notification.version,
            "Dry run, not posting notification"
        );
        println!("{}", notification.content);
        Ok(Delivery {
            status: 200,
            code: None,
            message: Some("dry run".to_string()),
        })
    }
}
