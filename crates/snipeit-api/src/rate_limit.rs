// Rate-limit metadata
//
// Snipe-IT (Laravel throttle middleware) reports its budget in response
// headers. We never retry on 429; the parsed headers are handed back to the
// caller so the host can decide when to come back.

use chrono::{DateTime, Utc};
use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};

const LIMIT: &str = "x-ratelimit-limit";
const REMAINING: &str = "x-ratelimit-remaining";
const RESET: &str = "x-ratelimit-reset";
const RETRY_AFTER: &str = "retry-after";

/// Rate-limit budget reported by the server on a single response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitInfo {
    pub limit: Option<u64>,
    pub remaining: Option<u64>,
    /// When the window resets (from the epoch-seconds `X-RateLimit-Reset`).
    pub reset_at: Option<DateTime<Utc>>,
    pub retry_after_secs: Option<u64>,
}

impl RateLimitInfo {
    /// Parse rate-limit headers. Returns `None` when none are present.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let limit = header_u64(headers, LIMIT);
        let remaining = header_u64(headers, REMAINING);
        let reset_at = headers
            .get(RESET)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse::<i64>().ok())
            .and_then(|ts| DateTime::from_timestamp(ts, 0));
        let retry_after_secs = header_u64(headers, RETRY_AFTER);

        if limit.is_none() && remaining.is_none() && reset_at.is_none() && retry_after_secs.is_none()
        {
            return None;
        }

        Some(Self {
            limit,
            remaining,
            reset_at,
            retry_after_secs,
        })
    }

    /// Budget exhausted for the current window.
    pub fn is_exhausted(&self) -> bool {
        self.remaining == Some(0)
    }
}

fn header_u64(headers: &HeaderMap, name: &str) -> Option<u64> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse().ok())
}
