//! ObservationScope for begin/complete logging
//!
//! - Logs `{name}_BEGIN` on creation
//! - Logs `{name}_COMPLETE` (with `duration_ms`) on `complete`
//! - Logs `{name}_FAILED` on `fail`
//! - Logs `{name}_INCOMPLETE` if dropped first, e.g. when a query future
//!   is cancelled mid-load

use std::time::Instant;

use super::logger::{Logger, Severity};

/// A scope that logs its own start and outcome
///
/// ```ignore
/// let scope = ObservationScope::begin("QUERY", &[("query_id", &id)], true);
/// // ... do work ...
/// scope.complete(&[("rows", "3")]);
/// ```
pub struct ObservationScope {
    name: &'static str,
    enabled: bool,
    completed: bool,
    fields: Vec<(String, String)>,
    timer: Timer,
}

impl ObservationScope {
    /// Opens a scope; logs `{name}_BEGIN` when `enabled`.
    ///
    /// `fields` are repeated on every line the scope logs.
    pub fn begin(name: &'static str, fields: &[(&str, &str)], enabled: bool) -> Self {
        let scope = Self {
            name,
            enabled,
            completed: false,
            fields: fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            timer: Timer::new(),
        };
        scope.emit(Severity::Info, "BEGIN", &[]);
        scope
    }

    /// Marks the scope successful; logs `{name}_COMPLETE`.
    pub fn complete(mut self, extra_fields: &[(&str, &str)]) {
        self.completed = true;
        let elapsed = self.timer.elapsed_ms();
        let mut fields: Vec<(&str, &str)> = extra_fields.to_vec();
        fields.push(("duration_ms", elapsed.as_str()));
        self.emit(Severity::Info, "COMPLETE", &fields);
    }

    /// Marks the scope failed; logs `{name}_FAILED` at ERROR.
    pub fn fail(mut self, reason: &str) {
        self.completed = true;
        self.emit(Severity::Error, "FAILED", &[("reason", reason)]);
    }

    /// Check if the scope has been completed
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    fn emit(&self, severity: Severity, suffix: &str, extra: &[(&str, &str)]) {
        if !self.enabled {
            return;
        }
        let event = format!("{}_{}", self.name, suffix);
        let mut fields: Vec<(&str, &str)> = self
            .fields
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        fields.extend_from_slice(extra);
        Logger::log(severity, &event, &fields);
    }
}

impl Drop for ObservationScope {
    fn drop(&mut self) {
        if !self.completed {
            self.emit(
                Severity::Warn,
                "INCOMPLETE",
                &[("reason", "scope dropped without completion")],
            );
        }
    }
}

/// A simple duration timer for logging elapsed time
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Create a new timer
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Get elapsed milliseconds as a string
    pub fn elapsed_ms(&self) -> String {
        self.start.elapsed().as_millis().to_string()
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_lifecycle() {
        let scope = ObservationScope::begin("TEST", &[("query_id", "q1")], true);
        assert!(!scope.is_completed());
        scope.complete(&[("rows", "2")]);
    }

    #[test]
    fn test_scope_fail() {
        let scope = ObservationScope::begin("TEST", &[], true);
        scope.fail("something went wrong");
    }

    #[test]
    fn test_scope_drop_without_complete() {
        let scope = ObservationScope::begin("TEST", &[], true);
        drop(scope);
    }

    #[test]
    fn test_disabled_scope() {
        let scope = ObservationScope::begin("TEST", &[], false);
        scope.complete(&[]);
    }

    #[test]
    fn test_timer_parses() {
        let timer = Timer::new();
        assert!(timer.elapsed_ms().parse::<u128>().is_ok());
    }
}
