//! Health probes backed by infrastructure adapters

use async_trait::async_trait;
use pz_core::services::HealthProbe;
use pz_shared::types::ServiceHealth;

#[cfg(feature = "mysql")]
use crate::database::DatabasePool;

/// `SELECT 1` against the pool; slow round trips are reported as degraded
#[cfg(feature = "mysql")]
pub struct DatabaseProbe {
    pool: DatabasePool,
    slow_threshold_ms: u64,
}

#[cfg(feature = "mysql")]
impl DatabaseProbe {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            pool,
            slow_threshold_ms: 1000,
        }
    }
}

#[cfg(feature = "mysql")]
#[async_trait]
impl HealthProbe for DatabaseProbe {
    fn name(&self) -> &str {
        "database"
    }

    async fn check(&self) -> ServiceHealth {
        match self.pool.health_check().await {
            Ok(elapsed) => {
                let millis = elapsed.as_millis() as u64;
                let health = if millis > self.slow_threshold_ms {
                    ServiceHealth::degraded(format!("Slow response: {millis}ms"))
                } else {
                    ServiceHealth::healthy()
                };
                health.with_response_time(millis)
            }
            Err(e) => ServiceHealth::unhealthy(e.to_string()),
        }
    }
}

/// Reports the media host as unhealthy when no credentials are configured
pub struct UnconfiguredMediaProbe;

#[async_trait]
impl HealthProbe for UnconfiguredMediaProbe {
    fn name(&self) -> &str {
        "media"
    }

    async fn check(&self) -> ServiceHealth {
        ServiceHealth::degraded("Media host credentials are not configured")
    }
}
