//! Delayed, cancellable reply delivery.
//!
//! Replies are produced after a short simulated "thinking" delay. Only the
//! most recent request is allowed to deliver: scheduling a new one cancels
//! the previous request, and dropping a pending reply cancels it too.

use std::sync::Mutex;
use std::time::Duration;

use rand::Rng;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use studio_core::config::ResponseConfig;
use studio_core::persona::PersonaConfig;
use studio_core::response::{LengthPolicy, ResponseEngine};

pub struct ResponseScheduler {
    config: ResponseConfig,
    engine: ResponseEngine,
    in_flight: Mutex<Option<CancellationToken>>,
}

impl ResponseScheduler {
    pub fn new(config: ResponseConfig) -> Self {
        Self::with_policy(config, LengthPolicy::Verbosity)
    }

    pub fn with_policy(config: ResponseConfig, policy: LengthPolicy) -> Self {
        Self {
            config,
            engine: ResponseEngine::new(policy),
            in_flight: Mutex::new(None),
        }
    }

    /// Schedules a reply to `message`, superseding any request still pending.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule(&self, message: impl Into<String>, persona: PersonaConfig) -> PendingResponse {
        let token = CancellationToken::new();
        if let Ok(mut in_flight) = self.in_flight.lock() {
            if let Some(previous) = in_flight.replace(token.clone()) {
                if !previous.is_cancelled() {
                    tracing::debug!("Superseding pending response");
                }
                previous.cancel();
            }
        }

        let delay = self.thinking_delay();
        let engine = self.engine;
        let message = message.into();
        let cancelled = token.clone();

        let handle = tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = cancelled.cancelled() => None,
                _ = tokio::time::sleep(delay) => {
                    if cancelled.is_cancelled() {
                        None
                    } else {
                        Some(engine.generate(&message, &persona))
                    }
                }
            }
        });

        PendingResponse { handle, token }
    }

    /// Cancels whatever request is pending.
    pub fn cancel_pending(&self) {
        if let Ok(mut in_flight) = self.in_flight.lock() {
            if let Some(token) = in_flight.take() {
                token.cancel();
            }
        }
    }

    fn thinking_delay(&self) -> Duration {
        let jitter = if self.config.jitter_ms == 0 {
            0
        } else {
            rand::thread_rng().gen_range(0..=self.config.jitter_ms)
        };
        Duration::from_millis(self.config.base_delay_ms.saturating_add(jitter))
    }
}

/// A reply that has not been delivered yet. Dropping it cancels the request.
#[derive(Debug)]
pub struct PendingResponse {
    handle: JoinHandle<Option<String>>,
    token: CancellationToken,
}

impl PendingResponse {
    /// Waits for the reply; `None` if the request was cancelled.
    pub async fn wait(mut self) -> Option<String> {
        match (&mut self.handle).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!("Response task failed: {}", e);
                None
            }
        }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }
}

impl Drop for PendingResponse {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
