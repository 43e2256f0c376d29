// src/domain/notification.rs
use serde::Serialize;

/// PushPlus message body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub token: String,
    pub content: String,
    pub template: String,
    pub topic: String,
    /// PushPlus calls the delivery channel "version"; "personal" sends to the token owner
    pub version: String,
}
