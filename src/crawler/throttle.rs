//! Politeness throttle for sequential fetches
//!
//! One throttle belongs to one analysis run. The first fetch goes out
//! immediately; every later fetch waits for the fixed delay, so requests to the
//! site are always separated by at least that much time.

use std::time::Duration;

/// Fixed-delay gate between the fetches of one run
#[derive(Debug)]
pub struct Throttle {
    delay: Duration,
    fetches: u32,
}

impl Throttle {
    /// Creates a throttle that separates fetches by `delay`
    pub fn new(delay: Duration) -> Self {
        Self { delay, fetches: 0 }
    }

    /// Waits until the next fetch may be issued
    pub async fn wait(&mut self) {
        if self.fetches > 0 && !self.delay.is_zero() {
            tracing::trace!("Politeness delay of {:?}", self.delay);
            tokio::time::sleep(self.delay).await;
        }
        self.fetches += 1;
    }

    /// Number of fetches admitted so far
    pub fn fetches(&self) -> u32 {
        self.fetches
    }
}
