mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        ModifierKeyCode, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use musou_shooter::assets::SpriteSheet;
use musou_shooter::config::GameConfig;
use musou_shooter::entities::GameStatus;
use musou_shooter::input::{Action, HeldKeys, InputSnapshot, KeyFrames};
use musou_shooter::{Director, GameError};

/// How long the win/loss overlay stays up before the program exits.
const END_SCREEN: Duration = Duration::from_secs(2);

// ── Held-key tracking ─────────────────────────────────────────────────────────

/// Synthetic key under which the Shift modifier is tracked.
const BOOST_KEY: KeyCode = KeyCode::Modifier(ModifierKeyCode::LeftShift);

/// Letters arrive upper-case while Shift is down; track them as lower-case.
fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        KeyCode::Modifier(ModifierKeyCode::RightShift) => BOOST_KEY,
        other => other,
    }
}

fn held_keys(key_frame: &KeyFrames<KeyCode>, frame: u64) -> HeldKeys {
    let any = |keys: &[KeyCode]| keys.iter().any(|k| key_frame.is_held(k, frame));
    HeldKeys {
        up: any(&[KeyCode::Up, KeyCode::Char('w')]),
        down: any(&[KeyCode::Down, KeyCode::Char('s')]),
        left: any(&[KeyCode::Left, KeyCode::Char('a')]),
        right: any(&[KeyCode::Right, KeyCode::Char('d')]),
        boost: any(&[BOOST_KEY]),
    }
}

/// One-shot action bound to a key press, if any.
fn action_for(code: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
        KeyCode::Char(' ') => Some(Action::FireBeam),
        KeyCode::Char('h') => Some(Action::EnterEnhanced),
        KeyCode::Char('e') => Some(Action::TriggerPulse),
        KeyCode::Enter => Some(Action::TriggerAreaEffect),
        _ => None,
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the game ends; returns the final status.
///
/// Input model: a `key_frame` map records the frame number of the last
/// press/repeat event for every key. Each frame the keys still "fresh"
/// (within `HOLD_WINDOW` frames) form the held-key snapshot, and presses of
/// keys that were not already held form the action queue.
///
/// Works on two classes of terminal:
/// * **Keyboard-enhancement capable** (Ghostty, kitty, etc.): proper
///   `Press` / `Repeat` / `Release` events → keys are removed on release.
/// * **Classic terminals**: only `Press` events (OS key-repeat shows as
///   repeated `Press`). Keys expire naturally after `HOLD_WINDOW` frames of
///   silence.
fn game_loop<W: Write>(
    out: &mut W,
    director: &mut Director<StdRng>,
    rx: &mpsc::Receiver<Event>,
    sprites: &SpriteSheet,
    tick: Duration,
) -> std::io::Result<GameStatus> {
    // Maps each held key → the frame it was last seen (press or repeat).
    let mut key_frame: KeyFrames<KeyCode> = KeyFrames::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        let mut actions = Vec::new();
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) = ev
            else {
                continue;
            };
            let code = normalize(code);
            match kind {
                KeyEventKind::Press => {
                    let fresh = key_frame.press(code, frame);
                    if modifiers.contains(KeyModifiers::SHIFT) {
                        key_frame.refresh(BOOST_KEY, frame);
                    }
                    // Auto-repeat arrives as Press here; only a fresh press acts
                    if fresh {
                        if let Some(action) = action_for(code, modifiers) {
                            actions.push(action);
                        }
                    }
                }
                // Repeat: refresh timestamp so key stays "held"
                KeyEventKind::Repeat => {
                    key_frame.refresh(code, frame);
                    if modifiers.contains(KeyModifiers::SHIFT) {
                        key_frame.refresh(BOOST_KEY, frame);
                    }
                }
                // Release: remove key immediately (keyboard-enhancement path)
                KeyEventKind::Release => {
                    key_frame.release(&code);
                }
            }
        }

        let input = InputSnapshot {
            held: held_keys(&key_frame, frame),
            actions,
        };
        let rendered = director.step(&input);
        display::render(out, &rendered, sprites)?;

        match director.status() {
            GameStatus::Playing => {}
            GameStatus::Quit => return Ok(GameStatus::Quit),
            status @ (GameStatus::Lost | GameStatus::Won) => {
                thread::sleep(END_SCREEN);
                return Ok(status);
            }
        }

        let elapsed = frame_start.elapsed();
        if elapsed < tick {
            thread::sleep(tick - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Logging goes to a file, if configured; the terminal belongs to the game.
fn init_logging(config: &GameConfig) -> Result<(), GameError> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };
    let file = File::create(path).map_err(|e| GameError::config(path.display().to_string(), e))?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> Result<(), GameError> {
    // Everything that can fail at startup fails before the terminal changes
    let config = GameConfig::load_or_default()?;
    init_logging(&config)?;
    let sprites = SpriteSheet::load(config.sprite_sheet.as_deref())?;

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = run(&mut out, &rx, &config, &sprites);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: &GameConfig,
    sprites: &SpriteSheet,
) -> Result<(), GameError> {
    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut director = Director::new(config.initial_score, rng);
    info!("game start, score {}", config.initial_score);

    let status = game_loop(out, &mut director, rx, sprites, config.tick_duration())?;
    info!(
        "game ended: {:?} at tick {} with {}",
        status,
        director.state().tick,
        director.state().score.text()
    );
    Ok(())
}
