//! Step-goal notification predicate
//!
//! Pure check for the once-per-day step goal notification. Scheduling and
//! the persisted already-notified flag live with the caller (see
//! `diary::step_goal_notified_on`), so this stays independently testable.

/// True when the notification should fire: the goal is set and reached, and
/// it has not fired yet today.
pub fn should_notify(steps: u32, goal: u32, already_notified: bool) -> bool {
    !already_notified && goal > 0 && steps >= goal
}
