//! Monotonic clock adapter.
//!
//! - **`target_os = "espidf"`**: wraps `esp_timer_get_time()` from the
//!   ESP-IDF high-resolution timer (microseconds since boot).
//! - **`not(target_os = "espidf")`**: uses `std::time::Instant` for
//!   host-side simulation.
//!
//! Both are truncated to `u32` milliseconds, so [`SystemClock::now_ms`]
//! wraps every ~49.7 days exactly like the controller expects.

use crate::app::ports::MonotonicClock;
use crate::scheduler::Millis;

pub struct SystemClock {
    /// Added to every reading; lets a simulation start close to rollover.
    offset_ms: Millis,
    #[cfg(not(target_os = "espidf"))]
    start: std::time::Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self::with_offset(0)
    }

    pub fn with_offset(offset_ms: Millis) -> Self {
        Self {
            offset_ms,
            #[cfg(not(target_os = "espidf"))]
            start: std::time::Instant::now(),
        }
    }

    #[cfg(target_os = "espidf")]
    fn raw_ms(&self) -> u64 {
        (unsafe { esp_idf_svc::sys::esp_timer_get_time() }) as u64 / 1_000
    }

    #[cfg(not(target_os = "espidf"))]
    fn raw_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

impl MonotonicClock for SystemClock {
    fn now_ms(&self) -> Millis {
        (self.raw_ms() as Millis).wrapping_add(self.offset_ms)
    }
}
