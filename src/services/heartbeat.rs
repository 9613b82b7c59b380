// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Redis liveness heartbeat for the orchestrator worker.

use chrono::Utc;
use redis::AsyncCommands;
use std::time::Duration;
use tokio::time::{Interval, MissedTickBehavior};

/// Key other services poll to see whether the worker is alive.
pub const HEARTBEAT_KEY: &str = "jarvis:heartbeat";
/// Expiry on each beat; the key disappears if the worker stops.
pub const HEARTBEAT_TTL_SECS: u64 = 120;
pub const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub enum HeartbeatError {
    #[error("Redis client error: {0}")]
    Client(String),

    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Redis command failed: {0}")]
    Command(String),
}

pub struct Heartbeat {
    client: redis::Client,
    connection: Option<redis::aio::MultiplexedConnection>,
}

impl Heartbeat {
    pub fn new(redis_url: &str) -> Result<Self, HeartbeatError> {
        let client =
            redis::Client::open(redis_url).map_err(|e| HeartbeatError::Client(e.to_string()))?;

        Ok(Self {
            client,
            connection: None,
        })
    }

    async fn connection(&mut self) -> Result<redis::aio::MultiplexedConnection, HeartbeatError> {
        if let Some(conn) = &self.connection {
            return Ok(conn.clone());
        }

        let conn = self
            .client
            .get_multiplexed_tokio_connection()
            .await
            .map_err(|e| HeartbeatError::Connection(e.to_string()))?;
        self.connection = Some(conn.clone());
        Ok(conn)
    }

    /// Write the current Unix time (fractional seconds) with a TTL.
    pub async fn beat(&mut self) -> Result<(), HeartbeatError> {
        let mut conn = self.connection().await?;
        let value = current_timestamp();

        let result: redis::RedisResult<()> =
            conn.set_ex(HEARTBEAT_KEY, value, HEARTBEAT_TTL_SECS).await;

        if let Err(e) = result {
            // Reconnect on the next beat.
            self.connection = None;
            return Err(HeartbeatError::Command(e.to_string()));
        }

        Ok(())
    }

    /// Beat every [`HEARTBEAT_INTERVAL`] forever. Failed beats are logged.
    pub async fn run(mut self) {
        let mut interval = beat_interval();
        loop {
            interval.tick().await;
            match self.beat().await {
                Ok(()) => tracing::debug!(key = HEARTBEAT_KEY, "Heartbeat written"),
                Err(e) => tracing::warn!(error = %e, "Heartbeat failed"),
            }
        }
    }
}

/// Ticker for [`Heartbeat::run`]. A stalled Redis delays the next beat
/// instead of queueing a burst of catch-up beats.
pub fn beat_interval() -> Interval {
    let mut interval = tokio::time::interval(HEARTBEAT_INTERVAL);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}

/// Current Unix time as fractional seconds, e.g. `"1760000000.123456"`.
pub fn current_timestamp() -> String {
    let micros = Utc::now().timestamp_micros();
    format!("{}.{:06}", micros.div_euclid(1_000_000), micros.rem_euclid(1_000_000))
}
