// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Ark Gateway: thin proxies and notification glue for third-party platforms
//!
//! The core of this crate links a single authorized TikTok account via
//! OAuth and gates video uploads on it. Around that sit a status echo,
//! a Brevo email notifier, a signed n8n bridge and a Redis heartbeat.

pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use db::TokenStore;
use services::{AgentBridge, BrevoService, TikTokClient, TikTokService};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub tiktok_service: TikTokService,
    pub brevo_service: BrevoService,
    pub agent_bridge: AgentBridge,
}

impl AppState {
    /// Wire every service from `config` over the given token store.
    pub fn new(config: Config, store: TokenStore) -> Self {
        let tiktok_service = TikTokService::new(
            TikTokClient::new(&config),
            store,
            config.authorized_username.clone(),
        );

        Self {
            brevo_service: BrevoService::new(&config),
            agent_bridge: AgentBridge::new(&config),
            tiktok_service,
            config,
        }
    }
}
