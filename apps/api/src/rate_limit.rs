//! Per-client request limiting for the generation endpoints.
//!
//! Fixed one-minute windows keyed by client IP. The limiter is a cheap cloneable handle
//! held in `AppState`; windows live in a concurrent map so checks never serialize.

use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::time::Instant;
use tracing::warn;

use crate::errors::AppError;

const WINDOW: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

#[derive(Debug, Clone)]
pub struct RateLimiter {
    per_minute: u32,
    windows: Arc<DashMap<IpAddr, Window>>,
}

impl RateLimiter {
    pub fn new(per_minute: u32) -> Self {
        Self {
            per_minute,
            windows: Arc::new(DashMap::new()),
        }
    }

    pub fn per_minute(&self) -> u32 {
        self.per_minute
    }

    /// Counts one request from `ip`, rejecting it once the window's quota is spent.
    pub fn check(&self, ip: IpAddr) -> Result<(), AppError> {
        let now = Instant::now();
        let mut entry = self.windows.entry(ip).or_insert(Window {
            started: now,
            count: 0,
        });
        let window = entry.value_mut();

        if now.duration_since(window.started) >= WINDOW {
            *window = Window {
                started: now,
                count: 0,
            };
        }

        if window.count >= self.per_minute {
            let remaining = WINDOW.saturating_sub(now.duration_since(window.started));
            let retry_after_secs = remaining.as_secs().max(1);
            warn!(%ip, retry_after_secs, "Rate limit exceeded");
            return Err(AppError::RateLimited { retry_after_secs });
        }

        window.count += 1;
        Ok(())
    }

    /// Drops windows that have fully elapsed. Keeps the map bounded by active clients.
    pub fn prune(&self) {
        let now = Instant::now();
        self.windows
            .retain(|_, w| now.duration_since(w.started) < WINDOW);
    }

    #[cfg(test)]
    fn tracked_clients(&self) -> usize {
        self.windows.len()
    }
}
