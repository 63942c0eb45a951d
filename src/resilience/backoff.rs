use std::time::Duration;

/// Exponential backoff schedule: `initial_delay * multiplier^attempt`, capped
/// at `max_delay`, with optional jitter.
#[derive(Debug, Clone, PartialEq)]
pub struct Backoff {
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub multiplier: f64,
    pub jitter: bool,
}

impl Default for Backoff {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_millis(1000),
            max_delay: Duration::from_secs(60),
            multiplier: 2.0,
            jitter: true,
        }
    }
}

impl Backoff {
    pub fn delay(&self, attempt: u32) -> Duration {
        let exponent = attempt.min(i32::MAX as u32) as i32;
        let base_delay = self.initial_delay.as_millis() as f64 * self.multiplier.powi(exponent);

        let delay_ms = base_delay.min(self.max_delay.as_millis() as f64);

        let final_delay = if self.jitter {
            (delay_ms + rand_jitter(delay_ms)).max(0.0)
        } else {
            delay_ms
        };

        Duration::from_millis(final_delay as u64)
    }
}

/// Jitter in `[-base/4, base/4)`, seeded from a fresh `RandomState`.
fn rand_jitter(base: f64) -> f64 {
    use std::collections::hash_map::RandomState;
    use std::hash::{BuildHasher, Hasher};

    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos() as u64;
    let mut hasher = RandomState::new().build_hasher();
    hasher.write_u64(nanos);
    let random = hasher.finish() as f64 / u64::MAX as f64;

    base * 0.5 * (random - 0.5)
}
