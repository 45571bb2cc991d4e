/// Session transitions: the only code that mutates a SessionState.
///
/// Each function runs one stimulus to completion and returns the cue
/// events it produced. Stimuli delivered outside the Playing phase are
/// no-ops, keeping the state machine total over its input alphabet.

use rand::Rng;

use crate::domain::color::ColorToken;
use crate::domain::round::generate_round;
use crate::domain::rules::{points_for, time_limit_for};
use crate::sim::event::{GameEvent, OverReason};
use crate::sim::session::{Phase, SessionState, UI_TICK_MS};

/// Begin a fresh session. Also serves as restart: the Over → Playing
/// transition is identical to Title → Playing.
pub fn start(s: &mut SessionState, rng: &mut impl Rng) -> Vec<GameEvent> {
    s.phase = Phase::Playing;
    s.score = 0;
    s.streak = 0;
    s.time_left = time_limit_for(0, &s.rules);
    s.message.clear();
    s.message_timer = 0;
    s.round = Some(generate_round(rng));
    vec![GameEvent::Started]
}

/// Judge a picked option.
///
/// Correct: bump streak, score, maybe combo, then roll the next round
/// with the countdown recomputed from the new score. Anything else
/// (wrong option, or a token not even on the board) ends the session
/// with the score untouched.
pub fn choose_answer(
    s: &mut SessionState,
    chosen: ColorToken,
    rng: &mut impl Rng,
) -> Vec<GameEvent> {
    if s.phase != Phase::Playing {
        return vec![];
    }
    let target = match &s.round {
        Some(r) => r.target,
        None => return vec![],
    };

    let mut events = vec![GameEvent::AnswerPicked];

    if chosen == target {
        s.streak += 1;
        let (points, combo) = points_for(s.streak, &s.rules);
        if combo {
            let toast_ticks = (s.rules.combo_msg_ms / UI_TICK_MS) as u32;
            s.set_message(
                &format!("Combo Bonus +{}!", s.rules.combo_bonus),
                toast_ticks,
            );
            events.push(GameEvent::ComboBonus { bonus: s.rules.combo_bonus });
        }
        s.score += points;
        s.round = Some(generate_round(rng));
        s.time_left = time_limit_for(s.score, &s.rules);
        events.push(GameEvent::RoundSolved);
    } else {
        s.phase = Phase::Over;
        events.push(GameEvent::GameOver { reason: OverReason::WrongAnswer });
    }

    events
}

/// Advance the countdown by one second of real time.
///
/// Entering with ≤1 second left clamps to zero and ends the session.
/// Entering inside the urgency window re-triggers the ambient cue.
pub fn tick_countdown(s: &mut SessionState) -> Vec<GameEvent> {
    if s.phase != Phase::Playing {
        return vec![];
    }

    if s.time_left <= 1 {
        s.time_left = 0;
        s.phase = Phase::Over;
        return vec![GameEvent::GameOver { reason: OverReason::TimeUp }];
    }

    let mut events = vec![];
    if s.time_left <= s.rules.urgency_from {
        events.push(GameEvent::UrgencyTick { secs_left: s.time_left });
    }
    s.time_left -= 1;
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RulesConfig;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn fresh() -> (SessionState, ChaCha8Rng) {
        (SessionState::new(RulesConfig::default()), ChaCha8Rng::seed_from_u64(7))
    }

    fn target(s: &SessionState) -> ColorToken {
        s.round.as_ref().unwrap().target
    }

    /// Some token guaranteed wrong: anything that isn't the target.
    fn non_target(s: &SessionState) -> ColorToken {
        let t = target(s);
        *ColorToken::ALL.iter().find(|&&c| c != t).unwrap()
    }

    /// A token not even on the option board (4 of the 10 always remain).
    fn off_board(s: &SessionState) -> ColorToken {
        let opts = &s.round.as_ref().unwrap().options;
        *ColorToken::ALL.iter().find(|c| !opts.contains(c)).unwrap()
    }

    #[test]
    fn start_initializes_session() {
        let (mut s, mut rng) = fresh();
        let events = start(&mut s, &mut rng);
        assert_eq!(events, vec![GameEvent::Started]);
        assert_eq!(s.phase, Phase::Playing);
        assert_eq!(s.score, 0);
        assert_eq!(s.streak, 0);
        assert_eq!(s.time_left, 10);
        assert!(s.round.is_some());
    }

    #[test]
    fn start_respects_time_floor_under_odd_config() {
        // floor_secs above start_secs: the floor still wins on round one.
        let mut rules = RulesConfig::default();
        rules.start_secs = 3;
        rules.floor_secs = 4;
        let mut s = SessionState::new(rules);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        start(&mut s, &mut rng);
        assert_eq!(s.time_left, 4);
    }

    #[test]
    fn three_correct_answers_score_combo() {
        let (mut s, mut rng) = fresh();
        start(&mut s, &mut rng);

        let mut deltas = vec![];
        for i in 0..3 {
            let before = s.score;
            let t = target(&s);
            let events = choose_answer(&mut s, t, &mut rng);
            deltas.push(s.score - before);
            assert_eq!(s.streak, i + 1);
            assert_eq!(s.phase, Phase::Playing);
            assert!(events.contains(&GameEvent::AnswerPicked));
            assert!(s.round.is_some(), "a new round is rolled after a hit");
        }

        assert_eq!(deltas, vec![5, 5, 15]);
        assert_eq!(s.score, 25);
        assert!(!s.message.is_empty(), "combo toast shown");
    }

    #[test]
    fn streak_deltas_repeat_every_three() {
        let (mut s, mut rng) = fresh();
        start(&mut s, &mut rng);
        let mut deltas = vec![];
        for _ in 0..6 {
            let before = s.score;
            let t = target(&s);
            choose_answer(&mut s, t, &mut rng);
            deltas.push(s.score - before);
        }
        assert_eq!(deltas, vec![5, 5, 15, 5, 5, 15]);
    }

    #[test]
    fn combo_event_carries_bonus() {
        let (mut s, mut rng) = fresh();
        start(&mut s, &mut rng);
        for _ in 0..2 {
            let t = target(&s);
            choose_answer(&mut s, t, &mut rng);
        }
        let t = target(&s);
        let before = s.score;
        let events = choose_answer(&mut s, t, &mut rng);
        assert!(events.contains(&GameEvent::ComboBonus { bonus: 10 }));
        assert!(events.contains(&GameEvent::RoundSolved));
        assert_eq!(s.score - before, 15);
    }

    #[test]
    fn wrong_answer_ends_game_score_unchanged() {
        let (mut s, mut rng) = fresh();
        start(&mut s, &mut rng);
        let t = target(&s);
        choose_answer(&mut s, t, &mut rng);
        let before = s.score;

        let wrong = non_target(&s);
        let events = choose_answer(&mut s, wrong, &mut rng);
        assert_eq!(s.phase, Phase::Over);
        assert_eq!(s.score, before);
        assert!(events.contains(&GameEvent::GameOver { reason: OverReason::WrongAnswer }));
    }

    #[test]
    fn off_board_token_is_treated_as_wrong() {
        let (mut s, mut rng) = fresh();
        start(&mut s, &mut rng);
        let stray = off_board(&s);
        choose_answer(&mut s, stray, &mut rng);
        assert_eq!(s.phase, Phase::Over);
        assert_eq!(s.score, 0);
    }

    #[test]
    fn countdown_resets_to_limit_for_new_score() {
        let (mut s, mut rng) = fresh();
        start(&mut s, &mut rng);
        // Drive score to 25: limit becomes max(4, 10 - 25/5) = 5.
        for _ in 0..3 {
            let t = target(&s);
            choose_answer(&mut s, t, &mut rng);
        }
        assert_eq!(s.score, 25);
        assert_eq!(s.time_left, 5);
    }

    #[test]
    fn timer_expiry_ends_game() {
        let (mut s, mut rng) = fresh();
        start(&mut s, &mut rng);
        let mut over = vec![];
        for _ in 0..10 {
            over = tick_countdown(&mut s);
        }
        assert_eq!(s.phase, Phase::Over);
        assert_eq!(s.time_left, 0);
        assert!(over.contains(&GameEvent::GameOver { reason: OverReason::TimeUp }));
    }

    #[test]
    fn urgency_cue_fires_only_inside_window() {
        let (mut s, mut rng) = fresh();
        start(&mut s, &mut rng);
        let mut cued_at = vec![];
        loop {
            let entering = s.time_left;
            let events = tick_countdown(&mut s);
            if events
                .iter()
                .any(|e| matches!(e, GameEvent::UrgencyTick { .. }))
            {
                cued_at.push(entering);
            }
            if s.phase == Phase::Over {
                break;
            }
        }
        // Window is (1, 6]: entering values 6, 5, 4, 3, 2.
        assert_eq!(cued_at, vec![6, 5, 4, 3, 2]);
    }

    #[test]
    fn stimuli_are_noops_once_over() {
        let (mut s, mut rng) = fresh();
        start(&mut s, &mut rng);
        let wrong = non_target(&s);
        choose_answer(&mut s, wrong, &mut rng);
        assert_eq!(s.phase, Phase::Over);

        let score = s.score;
        let time = s.time_left;
        assert!(tick_countdown(&mut s).is_empty());
        assert!(choose_answer(&mut s, ColorToken::Red, &mut rng).is_empty());
        assert_eq!(s.score, score);
        assert_eq!(s.time_left, time);
        assert_eq!(s.phase, Phase::Over);
    }

    #[test]
    fn tick_before_start_is_noop() {
        let (mut s, _) = fresh();
        assert_eq!(s.phase, Phase::Title);
        assert!(tick_countdown(&mut s).is_empty());
        assert_eq!(s.time_left, 10);
    }

    #[test]
    fn restart_reproduces_fresh_init() {
        let (mut s, mut rng) = fresh();
        start(&mut s, &mut rng);
        for _ in 0..4 {
            let t = target(&s);
            choose_answer(&mut s, t, &mut rng);
        }
        let wrong = non_target(&s);
        choose_answer(&mut s, wrong, &mut rng);
        assert_eq!(s.phase, Phase::Over);

        start(&mut s, &mut rng);
        assert_eq!(s.phase, Phase::Playing);
        assert_eq!(s.score, 0);
        assert_eq!(s.streak, 0);
        assert_eq!(s.time_left, 10);
        assert!(s.message.is_empty());
    }

    #[test]
    fn toast_decays_on_ui_clock_without_touching_score() {
        let (mut s, mut rng) = fresh();
        start(&mut s, &mut rng);
        for _ in 0..3 {
            let t = target(&s);
            choose_answer(&mut s, t, &mut rng);
        }
        assert!(!s.message.is_empty());
        let score = s.score;
        for _ in 0..9 {
            s.tick_anim();
        }
        assert!(s.message.is_empty());
        assert_eq!(s.score, score);
        assert_eq!(s.phase, Phase::Playing);
    }
}
