/*
 * Timer Module
 *
 * A periodic driver polled by the host loop. The host passes the current
 * instant to every call, so the timer never reads the clock itself.
 *
 * Overdue ticks are coalesced: a poll fires at most once, and when the host
 * has fallen more than a period behind the next tick is scheduled a full
 * period from now instead of replaying the backlog.
 */

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Timer {
    period: Duration,
    initial_delay: Duration,
    next_fire: Option<Instant>,
}

impl Timer {
    // Create a stopped timer
    pub fn new(period: Duration, initial_delay: Duration) -> Self {
        debug_assert!(!period.is_zero(), "timer period must be positive");
        Self {
            period,
            initial_delay,
            next_fire: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.next_fire.is_some()
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    // Instant of the next scheduled tick, `None` while stopped.
    pub fn next_fire(&self) -> Option<Instant> {
        self.next_fire
    }

    // Start the timer; the first tick comes after the initial delay.
    // Starting a running timer leaves its phase alone.
    pub fn start(&mut self, now: Instant) {
        if self.next_fire.is_none() {
            self.next_fire = Some(now + self.initial_delay);
        }
    }

    pub fn stop(&mut self) {
        self.next_fire = None;
    }

    // Drop any pending tick and re-arm with the initial delay
    pub fn restart(&mut self, now: Instant) {
        self.next_fire = Some(now + self.initial_delay);
    }

    // Takes effect from the tick after the one already scheduled
    pub fn set_period(&mut self, period: Duration) {
        debug_assert!(!period.is_zero(), "timer period must be positive");
        self.period = period;
    }

    // Returns true when a tick is due at `now`.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_fire {
            Some(due) if now >= due => {
                let next = due + self.period;
                self.next_fire = Some(if next > now { next } else { now + self.period });
                true
            }
            _ => false,
        }
    }
}
