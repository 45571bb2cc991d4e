/// Difficulty and scoring arithmetic.
/// Pure functions over the tunables; all session bookkeeping lives in sim.

use crate::config::RulesConfig;

/// Seconds granted for a round at the given cumulative score.
/// Non-increasing in score, floored at `floor_secs`.
pub fn time_limit_for(score: u32, rules: &RulesConfig) -> u32 {
    let step = rules.ramp_step.max(1);
    rules
        .start_secs
        .saturating_sub(score / step)
        .max(rules.floor_secs)
}

/// Points awarded for a correct answer at the given (already incremented)
/// streak. Returns `(points, combo)` where `combo` marks a streak-bonus hit.
pub fn points_for(streak: u32, rules: &RulesConfig) -> (u32, bool) {
    let interval = rules.combo_interval.max(1);
    let combo = streak >= interval && streak % interval == 0;
    let points = if combo {
        rules.base_points + rules.combo_bonus
    } else {
        rules.base_points
    };
    (points, combo)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> RulesConfig {
        RulesConfig::default()
    }

    #[test]
    fn time_limit_reference_points() {
        let r = rules();
        assert_eq!(time_limit_for(0, &r), 10);
        assert_eq!(time_limit_for(25, &r), 5);
        assert_eq!(time_limit_for(100, &r), 4);
    }

    #[test]
    fn time_limit_non_increasing_with_floor() {
        let r = rules();
        let mut prev = time_limit_for(0, &r);
        for score in 1..300 {
            let t = time_limit_for(score, &r);
            assert!(t <= prev);
            assert!(t >= r.floor_secs);
            prev = t;
        }
    }

    #[test]
    fn zero_ramp_step_does_not_divide_by_zero() {
        let mut r = rules();
        r.ramp_step = 0;
        assert_eq!(time_limit_for(1000, &r), 10);
    }

    #[test]
    fn combo_every_third_from_three() {
        let r = rules();
        let expected = [
            (1, 5, false),
            (2, 5, false),
            (3, 15, true),
            (4, 5, false),
            (5, 5, false),
            (6, 15, true),
            (9, 15, true),
        ];
        for (streak, pts, combo) in expected {
            assert_eq!(points_for(streak, &r), (pts, combo), "streak {streak}");
        }
    }
}
