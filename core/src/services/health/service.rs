use async_trait::async_trait;
use pz_shared::types::{HealthReport, ServiceHealth};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Probes slower than this are reported unhealthy
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// One external dependency the service needs to be healthy
#[async_trait]
pub trait HealthProbe: Send + Sync {
    fn name(&self) -> &str;

    async fn check(&self) -> ServiceHealth;
}

pub struct HealthService {
    probes: Vec<Arc<dyn HealthProbe>>,
    version: String,
    timeout: Duration,
}

impl HealthService {
    pub fn new(probes: Vec<Arc<dyn HealthProbe>>, version: impl Into<String>) -> Self {
        Self {
            probes,
            version: version.into(),
            timeout: PROBE_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Run every probe; a probe that times out counts as unhealthy
    pub async fn report(&self) -> HealthReport {
        let mut checks = Vec::with_capacity(self.probes.len());

        for probe in &self.probes {
            let started = Instant::now();
            let health = match tokio::time::timeout(self.timeout, probe.check()).await {
                Ok(health) => health,
                Err(_) => {
                    tracing::warn!(probe = probe.name(), "health probe timed out");
                    ServiceHealth::unhealthy("Health check timed out")
                        .with_response_time(started.elapsed().as_millis() as u64)
                }
            };
            checks.push((probe.name().to_string(), health));
        }

        HealthReport::from_checks(self.version.clone(), checks)
    }
}
