// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! TikTok token and user records.
//!
//! Both are stored exactly as TikTok returned them; only the few fields the
//! gate needs are read out.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw token exchange response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenRecord(pub Value);

impl TokenRecord {
    /// The bearer token, from `data.access_token` or a top-level
    /// `access_token`. Empty strings are treated as missing.
    pub fn access_token(&self) -> Option<&str> {
        self.0
            .pointer("/data/access_token")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
            .or_else(|| {
                self.0
                    .get("access_token")
                    .and_then(Value::as_str)
                    .filter(|t| !t.is_empty())
            })
    }
}

/// Raw user-info response, shaped `{data:{user:{username, ...}}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserRecord(pub Value);

impl UserRecord {
    pub fn username(&self) -> Option<&str> {
        self.0.pointer("/data/user/username").and_then(Value::as_str)
    }

    /// Exact match against the authorized identity.
    pub fn is_authorized(&self, authorized_username: &str) -> bool {
        self.username() == Some(authorized_username)
    }
}
