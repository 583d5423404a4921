//! Shared HTTP helpers for the hosted provider adapters.

use std::time::Duration;

use crate::ports::AIError;

/// Retry hint used when the provider gives none.
const DEFAULT_RETRY_AFTER_SECS: u32 = 30;

/// Maps a reqwest send failure to an `AIError`.
pub(super) fn map_send_error(err: reqwest::Error, timeout: Duration) -> AIError {
    if err.is_timeout() {
        AIError::Timeout {
            timeout_secs: timeout.as_secs() as u32,
        }
    } else if err.is_connect() {
        AIError::network(format!("Connection failed: {}", err))
    } else {
        AIError::network(err.to_string())
    }
}

/// Extracts a retry hint from a rate-limit error body.
///
/// Understands OpenAI's "try again in Xs" message and Gemini's
/// `RetryInfo.retryDelay` ("30s").
pub(super) fn parse_retry_after(error_body: &str) -> u32 {
    let Ok(parsed) = serde_json::from_str::<serde_json::Value>(error_body) else {
        return DEFAULT_RETRY_AFTER_SECS;
    };
    let error = &parsed["error"];

    if let Some(details) = error["details"].as_array() {
        for detail in details {
            if let Some(delay) = detail["retryDelay"].as_str() {
                if let Some(secs) = leading_seconds(delay) {
                    return secs;
                }
            }
        }
    }

    if let Some(message) = error["message"].as_str() {
        if let Some(idx) = message.find("try again in ") {
            if let Some(secs) = leading_seconds(&message[idx + 13..]) {
                return secs;
            }
        }
    }

    DEFAULT_RETRY_AFTER_SECS
}

fn leading_seconds(text: &str) -> Option<u32> {
    let end = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    text[..end].parse().ok()
}
