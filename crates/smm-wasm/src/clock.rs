//! Browser time source for hash-time accounting.

use smm_core::Clock;

/// Milliseconds from `performance.now()`, falling back to `Date.now()`
/// where no `Performance` object is available (e.g. some workers).
#[derive(Debug, Clone, Default)]
pub struct PerformanceClock {
    performance: Option<web_sys::Performance>,
}

impl PerformanceClock {
    pub fn new() -> Self {
        let performance = web_sys::window().and_then(|window| window.performance());
        PerformanceClock { performance }
    }
}

impl Clock for PerformanceClock {
    fn now_millis(&self) -> u64 {
        let now = match &self.performance {
            Some(performance) => performance.now(),
            None => js_sys::Date::now(),
        };
        now.max(0.0) as u64
    }
}
