/// Entry point and game loop.

mod config;
mod domain;
mod sim;
mod ui;

use std::time::{Duration, Instant};

use crossterm::event::KeyCode;
use rand::rngs::ThreadRng;

use config::GameConfig;
use sim::event::GameEvent;
use sim::session::{Phase, SessionState, UI_TICK_MS};
use sim::step;
use ui::input::InputState;
use ui::renderer::Renderer;
use ui::sound::SoundEngine;

const FRAME_SLEEP: Duration = Duration::from_millis(5);

/// The countdown cadence is fixed: one second of real time per tick.
const COUNTDOWN_TICK: Duration = Duration::from_secs(1);

const KEYS_CONFIRM: &[KeyCode] = &[KeyCode::Enter, KeyCode::Char(' ')];
const KEYS_QUIT: &[KeyCode] = &[KeyCode::Char('q'), KeyCode::Char('Q')];

fn main() {
    let config = GameConfig::load();
    let mut session = SessionState::new(config.rules.clone());

    let mut renderer = Renderer::new();
    if let Err(e) = renderer.init() {
        eprintln!("Terminal init failed: {e}");
        return;
    }

    let sound = SoundEngine::new();

    let result = game_loop(&mut session, &mut renderer, sound.as_ref());

    if let Err(e) = renderer.cleanup() {
        eprintln!("Terminal cleanup failed: {e}");
    }

    if let Err(e) = result {
        eprintln!("Game error: {e}");
    }

    println!();
    println!("Thanks for playing Reverse Stroop Clash!");
    println!("Final Score: {}", session.score);
}

fn game_loop(
    session: &mut SessionState,
    renderer: &mut Renderer,
    sound: Option<&SoundEngine>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut kb = InputState::new();
    let mut rng = rand::thread_rng();
    let mut last_countdown = Instant::now();
    let mut last_ui = Instant::now();
    let ui_tick = Duration::from_millis(UI_TICK_MS);

    loop {
        kb.drain_events();

        if kb.ctrl_c_pressed() {
            break;
        }
        if handle_meta(session, sound, &kb, &mut rng, &mut last_countdown) {
            break;
        }

        // Countdown only runs while Playing; leaving the phase suspends
        // it, so a stale tick can never mutate a finished session.
        if session.phase == Phase::Playing && last_countdown.elapsed() >= COUNTDOWN_TICK {
            let events = step::tick_countdown(session);
            process_sound_events(sound, &events);
            last_countdown = Instant::now();
        }

        if last_ui.elapsed() >= ui_tick {
            session.tick_anim();
            last_ui = Instant::now();
        }

        renderer.render(session)?;
        std::thread::sleep(FRAME_SLEEP);
    }

    Ok(())
}

/// Map session events to sound cues, in emission order.
fn process_sound_events(sound: Option<&SoundEngine>, events: &[GameEvent]) {
    let sfx = match sound {
        Some(s) => s,
        None => return,
    };
    for event in events {
        match event {
            GameEvent::Started => {
                sfx.stop_urgency();
                sfx.play_start();
            }
            GameEvent::AnswerPicked => {
                sfx.stop_urgency();
                sfx.play_click();
            }
            GameEvent::ComboBonus { .. } => sfx.play_bonus(),
            GameEvent::UrgencyTick { .. } => sfx.play_urgency(),
            GameEvent::GameOver { .. } => sfx.play_wrong(),
            GameEvent::RoundSolved => {}
        }
    }
}

/// Begin (or restart) a session and align the countdown clock so the
/// first second is a full one.
fn start_game(
    session: &mut SessionState,
    sound: Option<&SoundEngine>,
    rng: &mut ThreadRng,
    last_countdown: &mut Instant,
) {
    let events = step::start(session, rng);
    *last_countdown = Instant::now();
    process_sound_events(sound, &events);
}

/// Abandon the current session and return to the title screen.
fn return_to_title(session: &mut SessionState, sound: Option<&SoundEngine>) {
    if let Some(sfx) = sound {
        sfx.stop_urgency();
    }
    *session = SessionState::new(session.rules.clone());
}

/// Handle phase-level input. Returns true to quit the program.
fn handle_meta(
    session: &mut SessionState,
    sound: Option<&SoundEngine>,
    kb: &InputState,
    rng: &mut ThreadRng,
    last_countdown: &mut Instant,
) -> bool {
    let confirm = kb.any_pressed(KEYS_CONFIRM);
    let esc = kb.any_pressed(&[KeyCode::Esc]);

    match session.phase {
        // ── Title Screen ──
        Phase::Title => {
            if confirm {
                start_game(session, sound, rng, last_countdown);
            } else if kb.any_pressed(KEYS_QUIT) || esc {
                return true;
            }
        }

        // ── Playing ──
        Phase::Playing => {
            if let Some(idx) = kb.digit_pressed() {
                let token = session
                    .round
                    .as_ref()
                    .and_then(|r| r.options.get(idx))
                    .copied();
                if let Some(token) = token {
                    let events = step::choose_answer(session, token, rng);
                    process_sound_events(sound, &events);
                }
            } else if esc {
                return_to_title(session, sound);
            }
        }

        // ── Game Over ──
        Phase::Over => {
            if confirm {
                start_game(session, sound, rng, last_countdown);
            } else if esc {
                return_to_title(session, sound);
            } else if kb.any_pressed(KEYS_QUIT) {
                return true;
            }
        }
    }

    false
}
