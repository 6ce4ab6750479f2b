use std::time::Duration;

use pod_core::constants::DEFAULT_SIMULATED_LATENCY_MS;

/// Retardo artificial de los servicios simulados.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency(Duration);

impl Latency {
    pub fn new(delay: Duration) -> Self {
        Self(delay)
    }

    pub fn none() -> Self {
        Self(Duration::ZERO)
    }

    pub fn delay(&self) -> Duration {
        self.0
    }

    pub async fn wait(&self) {
        if !self.0.is_zero() {
            tokio::time::sleep(self.0).await;
        }
    }
}

impl Default for Latency {
    fn default() -> Self {
        Self(Duration::from_millis(DEFAULT_SIMULATED_LATENCY_MS))
    }
}
