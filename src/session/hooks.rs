//! Confirmation and timing wrappers
//!
//! Both wrap an action explicitly instead of being baked into the session: the
//! CLI decides which commands need a confirmation and whether to time them.

use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::error::Result;

/// Question asked before a destructive action
pub fn confirmation_prompt(action_name: &str) -> String {
    format!("Are you sure you want to perform \"{}\"? [y/n]: ", action_name)
}

/// Only `y` (any case, surrounding whitespace ignored) confirms
pub fn is_affirmative(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}

/// Run `action` only if `confirm` approves the question.
///
/// Returns `Ok(None)` when the user declines; the action is never invoked in
/// that case.
pub fn confirm_action<T, C, A>(action_name: &str, confirm: C, action: A) -> Result<Option<T>>
where
    C: FnOnce(&str) -> bool,
    A: FnOnce() -> Result<T>,
{
    if confirm(&confirmation_prompt(action_name)) {
        action().map(Some)
    } else {
        info!(action = action_name, "action cancelled");
        Ok(None)
    }
}

/// Run `f` and measure how long it took
pub fn timed<T>(label: &str, f: impl FnOnce() -> T) -> (T, Duration) {
    let start = Instant::now();
    let value = f();
    let elapsed = start.elapsed();
    debug!(label, elapsed_ms = elapsed.as_secs_f64() * 1000.0, "timed");
    (value, elapsed)
}

/// Line reported after a timed command
pub fn format_elapsed(label: &str, elapsed: Duration) -> String {
    format!("{} completed in {:.3} seconds.", label, elapsed.as_secs_f64())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::cell::Cell;

    #[test]
    fn test_confirm_runs_action() {
        let mut asked = String::new();
        let result = confirm_action(
            "drop table users",
            |question| {
                asked = question.to_string();
                true
            },
            || Ok(42),
        )
        .unwrap();

        assert_eq!(result, Some(42));
        assert_eq!(
            asked,
            "Are you sure you want to perform \"drop table users\"? [y/n]: "
        );
    }

    #[test]
    fn test_decline_skips_action() {
        let ran = Cell::new(false);
        let result = confirm_action(
            "delete",
            |_| false,
            || {
                ran.set(true);
                Ok(())
            },
        )
        .unwrap();

        assert!(result.is_none());
        assert!(!ran.get());
    }

    #[test]
    fn test_action_error_propagates() {
        let result: Result<Option<()>> =
            confirm_action("delete", |_| true, || Err(Error::syntax("boom")));
        assert!(result.is_err());
    }

    #[test]
    fn test_is_affirmative() {
        assert!(is_affirmative("y"));
        assert!(is_affirmative(" Y \n"));
        assert!(!is_affirmative("yes"));
        assert!(!is_affirmative(""));
        assert!(!is_affirmative("n"));
    }

    #[test]
    fn test_timed() {
        let (value, elapsed) = timed("select", || 2 + 2);
        assert_eq!(value, 4);
        assert!(elapsed < Duration::from_secs(5));
        assert_eq!(
            format_elapsed("select", Duration::from_millis(1500)),
            "select completed in 1.500 seconds."
        );
    }
}
