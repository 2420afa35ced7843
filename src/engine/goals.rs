//! Goal progress evaluation and bonus-unlock wording.

use crate::domain::{Goal, GoalScope, Money};

/// Progress of one goal against its pre-aggregated current value.
#[derive(Debug, Clone, PartialEq)]
pub struct GoalProgress {
    pub current: Money,
    pub target: Money,
    /// Clamped to 100 for display; achievement uses the unclamped ratio.
    pub progress_percent: Money,
    /// max(0, target - current).
    pub remaining: Money,
    pub achieved: bool,
}

/// Evaluate a goal against its aggregated current value.
///
/// The caller aggregates `current` upstream according to the goal's scope,
/// metric, and period. A zero target (possible only on rows predating
/// validation) is defined behavior rather than an error: achieved iff
/// anything at all was recorded.
pub fn compute_progress(goal: &Goal, current: Money) -> GoalProgress {
    let target = goal.target;

    if target.is_zero() {
        let achieved = current.is_positive();
        return GoalProgress {
            current,
            target,
            progress_percent: if achieved {
                Money::hundred()
            } else {
                Money::zero()
            },
            remaining: Money::zero(),
            achieved,
        };
    }

    let raw_percent = current / target * Money::hundred();
    let progress_percent = if raw_percent > Money::hundred() {
        Money::hundred()
    } else {
        raw_percent
    };

    let remaining = if current >= target {
        Money::zero()
    } else {
        target - current
    };

    GoalProgress {
        current,
        target,
        progress_percent,
        remaining,
        achieved: current >= target,
    }
}

/// Bonus-unlock narrative for an achieved goal with a bonus attached.
///
/// Creator-scoped goals name the creator and metric; user and global goals
/// use generic wording. Returns None when there is no bonus or the goal is
/// not achieved. Purely presentational; the bonus is never auto-disbursed.
pub fn bonus_description(
    goal: &Goal,
    progress: &GoalProgress,
    creator_name: Option<&str>,
) -> Option<String> {
    let bonus = goal.bonus_amount?;
    if !progress.achieved {
        return None;
    }

    let text = match (&goal.scope, creator_name) {
        (GoalScope::Creator(_), Some(name)) => format!(
            "{} bonus unlocked: {} hit the {} target of {}",
            bonus.to_display_string(),
            name,
            goal.goal_type.metric_label(),
            goal.target.to_display_string()
        ),
        _ => format!(
            "{} bonus unlocked: goal of {} reached",
            bonus.to_display_string(),
            goal.target.to_display_string()
        ),
    };
    Some(text)
}
