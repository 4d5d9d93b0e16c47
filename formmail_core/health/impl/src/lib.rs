use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use formmail_core_health_contracts::{HealthService, HealthStatus};
use formmail_email_contracts::EmailService;
use tokio::sync::RwLock;
use tracing::error;

#[derive(Debug, Clone)]
pub struct HealthServiceImpl<Email> {
    email: Email,
    config: HealthServiceConfig,
    state: Arc<State>,
}

#[derive(Debug, Clone)]
pub struct HealthServiceConfig {
    pub cache_ttl: Duration,
}

#[derive(Debug, Default)]
struct State {
    cache: RwLock<Option<CachedStatus>>,
}

#[derive(Debug)]
struct CachedStatus {
    status: HealthStatus,
    timestamp: Instant,
}

impl CachedStatus {
    fn is_fresh(&self, now: Instant, ttl: Duration) -> bool {
        now < self.timestamp + ttl
    }
}

impl<Email> HealthServiceImpl<Email> {
    pub fn new(email: Email, config: HealthServiceConfig) -> Self {
        Self {
            email,
            config,
            state: Default::default(),
        }
    }
}

impl<Email: EmailService> HealthService for HealthServiceImpl<Email> {
    async fn get_status(&self) -> HealthStatus {
        let now = Instant::now();
        let cache_guard = self.state.cache.read().await;
        if let Some(cached) = cache_guard
            .as_ref()
            .filter(|c| c.is_fresh(now, self.config.cache_ttl))
        {
            return cached.status;
        }
        drop(cache_guard);

        let mut cache_guard = self.state.cache.write().await;
        if let Some(cached) = cache_guard
            .as_ref()
            .filter(|c| c.is_fresh(now, self.config.cache_ttl))
        {
            return cached.status;
        }

        let email = self
            .email
            .ping()
            .await
            .inspect_err(|err| error!("Failed to ping smtp server: {err}"))
            .is_ok();

        cache_guard
            .insert(CachedStatus {
                status: HealthStatus { email },
                timestamp: now,
            })
            .status
    }
}

#[cfg(test)]
mod tests {
    use formmail_email_contracts::MockEmailService;

    use super::*;

    #[tokio::test]
    async fn healthy() {
        // Arrange
        let email = MockEmailService::new().with_ping(true);
        let sut = HealthServiceImpl::new(
            email,
            HealthServiceConfig {
                cache_ttl: Duration::from_secs(60),
            },
        );

        // Act
        let result = sut.get_status().await;

        // Assert
        assert_eq!(result, HealthStatus { email: true });
    }

    #[tokio::test]
    async fn unhealthy() {
        // Arrange
        let email = MockEmailService::new().with_ping(false);
        let sut = HealthServiceImpl::new(
            email,
            HealthServiceConfig {
                cache_ttl: Duration::from_secs(60),
            },
        );

        // Act
        let result = sut.get_status().await;

        // Assert
        assert_eq!(result, HealthStatus { email: false });
    }

    #[tokio::test]
    async fn cached() {
        // Arrange
        let email = MockEmailService::new().with_ping(false);
        let sut = HealthServiceImpl::new(
            email,
            HealthServiceConfig {
                cache_ttl: Duration::from_secs(60),
            },
        );

        // Act
        let first = sut.get_status().await;
        let second = sut.get_status().await;

        // Assert
        assert_eq!(first, HealthStatus { email: false });
        assert_eq!(second, first);
    }

    #[tokio::test]
    async fn expired() {
        // Arrange
        let mut email = MockEmailService::new();
        let mut seq = mockall::Sequence::new();
        email
            .expect_ping()
            .once()
            .in_sequence(&mut seq)
            .return_once(|| Box::pin(std::future::ready(Ok(()))));
        email
            .expect_ping()
            .once()
            .in_sequence(&mut seq)
            .return_once(|| Box::pin(std::future::ready(Err(anyhow::anyhow!("down")))));
        let sut = HealthServiceImpl::new(
            email,
            HealthServiceConfig {
                cache_ttl: Duration::ZERO,
            },
        );

        // Act
        let first = sut.get_status().await;
        let second = sut.get_status().await;

        // Assert
        assert_eq!(first, HealthStatus { email: true });
        assert_eq!(second, HealthStatus { email: false });
    }
}
