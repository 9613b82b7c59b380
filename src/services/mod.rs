// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod brevo;
pub mod bridge;
pub mod heartbeat;
pub mod tiktok;

pub use brevo::BrevoService;
pub use bridge::AgentBridge;
pub use heartbeat::Heartbeat;
pub use tiktok::{TikTokClient, TikTokService};
