//! Time source and the scheduled reset of the gesture indicator

use super::Gesture;
use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// How long a gesture stays visible by default
pub const DEFAULT_GESTURE_DISPLAY: Duration = Duration::from_millis(300);

/// Source of the current instant. Injected into the engine so the gesture
/// timer can be driven without real time passing.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Manually advanced clock. Clones share the same instant.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

/// Holds the last gesture and the instant at which it is due to clear
#[derive(Debug, Clone)]
pub struct GestureTimer {
    gesture: Gesture,
    deadline: Option<Instant>,
    display_for: Duration,
}

impl GestureTimer {
    pub fn new(display_for: Duration) -> Self {
        Self {
            gesture: Gesture::None,
            deadline: None,
            display_for,
        }
    }

    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Shows `gesture` and schedules its reset, replacing any earlier schedule
    pub fn schedule(&mut self, gesture: Gesture, now: Instant) {
        self.gesture = gesture;
        self.deadline = Some(now + self.display_for);
    }

    /// Clears the gesture and drops the pending reset
    pub fn cancel(&mut self) {
        self.gesture = Gesture::None;
        self.deadline = None;
    }

    /// Fires the scheduled reset if it is due. Returns true if the gesture
    /// was cleared by this call.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.cancel();
                true
            }
            _ => false,
        }
    }
}

impl Default for GestureTimer {
    fn default() -> Self {
        Self::new(DEFAULT_GESTURE_DISPLAY)
    }
}
