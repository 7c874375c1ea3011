//! Monotonic-time scheduling primitives.
//!
//! Every timestamp in the firmware is a `u32` millisecond count since
//! boot, which wraps after ~49.7 days.  Comparisons are always made on
//! the *difference* `now - since` computed with `wrapping_sub`, never on
//! absolute timestamps, so a rollover between two samples still yields
//! the small positive duration that actually elapsed.
//!
//! ```text
//!   since ──────────── u32::MAX │ 0 ──────── now
//!         └───── now.wrapping_sub(since) ─────┘
//! ```
//!
//! Three building blocks:
//!
//! - [`elapsed_ms`]: the wrap-safe difference itself.
//! - [`IntervalTimer`]: "has `interval` passed since the last reset?"
//!   Used for the weekly top-up check.
//! - [`PeriodicTicker`]: due-time based cadence for the control loop,
//!   the status report and the indicator LED.  Keeps the core free of
//!   any sleep primitive.

/// Milliseconds since boot, wrapping at `u32::MAX`.
pub type Millis = u32;

/// Wrap-safe elapsed time from `since` to `now`.
#[inline]
pub const fn elapsed_ms(now: Millis, since: Millis) -> Millis {
    now.wrapping_sub(since)
}

// ═══════════════════════════════════════════════════════════════
//  Interval timer
// ═══════════════════════════════════════════════════════════════

/// Fires once `interval_ms` has elapsed since the last reset.
///
/// Firing does not reset the timer by itself; the owner calls
/// [`IntervalTimer::reset`] with the firing time, which keeps the
/// "reset to now" decision next to the action it guards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalTimer {
    interval_ms: Millis,
    last_ms: Millis,
}

impl IntervalTimer {
    pub const fn new(interval_ms: Millis, now: Millis) -> Self {
        Self {
            interval_ms,
            last_ms: now,
        }
    }

    /// True if the full interval has elapsed (inclusive).
    pub fn is_due(&self, now: Millis) -> bool {
        elapsed_ms(now, self.last_ms) >= self.interval_ms
    }

    pub fn reset(&mut self, now: Millis) {
        self.last_ms = now;
    }

    /// Milliseconds left until the timer is due, saturating at zero.
    pub fn remaining_ms(&self, now: Millis) -> Millis {
        self.interval_ms
            .saturating_sub(elapsed_ms(now, self.last_ms))
    }

    /// Timestamp of the last reset.
    pub fn last_ms(&self) -> Millis {
        self.last_ms
    }
}

// ═══════════════════════════════════════════════════════════════
//  Periodic ticker
// ═══════════════════════════════════════════════════════════════

/// Fixed-rate cadence driven by an external clock.
///
/// `poll(now)` returns `true` when the next period boundary has been
/// reached and advances the boundary by one period.  If the caller fell
/// more than one full period behind, the ticker resynchronises to `now`
/// instead of firing a burst of catch-up ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodicTicker {
    period_ms: Millis,
    next_due_ms: Millis,
}

impl PeriodicTicker {
    /// First tick is due one period after `now`.
    pub const fn new(period_ms: Millis, now: Millis) -> Self {
        Self {
            period_ms,
            next_due_ms: now.wrapping_add(period_ms),
        }
    }

    /// First tick is due immediately.
    pub const fn immediate(period_ms: Millis, now: Millis) -> Self {
        Self {
            period_ms,
            next_due_ms: now,
        }
    }

    pub fn poll(&mut self, now: Millis) -> bool {
        if self.until_due_ms(now) > 0 {
            return false;
        }
        let late = elapsed_ms(now, self.next_due_ms);
        self.next_due_ms = if late >= self.period_ms {
            now.wrapping_add(self.period_ms)
        } else {
            self.next_due_ms.wrapping_add(self.period_ms)
        };
        true
    }

    /// Milliseconds until the next tick; zero if already due.
    pub fn until_due_ms(&self, now: Millis) -> Millis {
        let ahead = elapsed_ms(self.next_due_ms, now);
        // A due time in the past shows up as a huge forward distance.
        if ahead > self.period_ms { 0 } else { ahead }
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
