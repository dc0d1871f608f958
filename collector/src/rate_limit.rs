use tokio::time::{sleep, Duration, Instant};

use crate::{Error, Result};

/// Spaces successive permits by at least `1 / requests_per_second`. The
/// pipeline is strictly sequential so a single waiter is all that is needed;
/// `wait` suspends the caller for the remainder of the interval.
pub struct RateLimiter {
    interval: Duration,
    last_permit: Option<Instant>,
}

impl RateLimiter {
    pub fn new(requests_per_second: f64) -> Result<Self> {
        if requests_per_second <= 0.0 || !requests_per_second.is_finite() {
            return Err(Error::InvalidRateLimit(requests_per_second));
        }
        Ok(Self {
            interval: Duration::from_secs_f64(1.0 / requests_per_second),
            last_permit: None,
        })
    }

    pub async fn wait(&mut self) {
        if let Some(last) = self.last_permit {
            let next = last + self.interval;
            let now = Instant::now();
            if next > now {
                sleep(next - now).await;
            }
        }
        self.last_permit = Some(Instant::now());
    }
}
