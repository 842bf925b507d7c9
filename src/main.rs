mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use pollo_loco::audio::LogSink;
use pollo_loco::clock::SystemClock;
use pollo_loco::config::GameConfig;
use pollo_loco::error::GameError;
use pollo_loco::input::{Control, InputState};
use pollo_loco::level::build_level;
use pollo_loco::world::World;

use display::TerminalSurface;

/// A key counts as held if its last press/repeat event arrived within this
/// many frames.  Terminals without release events fall back to key-repeat,
/// which refreshes well inside this window.
const HOLD_WINDOW: u64 = 4;

fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|key| is_held(key_frame, key, frame))
}

#[derive(Parser, Debug)]
#[command(name = "pollo_loco", about = "Side-scrolling platformer in the terminal")]
struct Cli {
    /// INI file with level, display and audio settings.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Seed for level generation; random when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Start with sound off.
    #[arg(long)]
    muted: bool,
    /// Write logs here instead of discarding them (the terminal is in use).
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn init_logging(log_file: Option<&PathBuf>) -> Result<(), GameError> {
    match log_file {
        Some(path) => {
            let file = File::create(path)?;
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
                .target(env_logger::Target::Pipe(Box::new(file)))
                .init();
        }
        None => {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off"))
                .init();
        }
    }
    Ok(())
}

// ── Session ───────────────────────────────────────────────────────────────────

enum SessionEnd {
    Quit,
    Restart,
}

struct Session {
    config: GameConfig,
    rng: StdRng,
    muted: bool,
}

impl Session {
    fn new_world(&mut self, keyboard: &InputState) -> World {
        keyboard.release_all();
        let level = build_level(&self.config.level, &mut self.rng);
        let mut world = World::new(level, keyboard.clone(), SystemClock::new(), LogSink);
        if self.muted {
            world.set_muted(true);
        }
        world
    }
}

/// Block on the start screen until Enter (true) or quit (false).
fn wait_for_start<W: Write>(
    out: &mut W,
    surface: &mut TerminalSurface,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<bool> {
    display::render_start(out, surface)?;
    loop {
        match rx.recv() {
            Ok(Event::Key(KeyEvent { code, kind: KeyEventKind::Press, modifiers, .. })) => {
                match code {
                    KeyCode::Enter => return Ok(true),
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(false),
                    KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                        return Ok(false)
                    }
                    _ => {}
                }
            }
            Ok(Event::Resize(..)) => display::render_start(out, surface)?,
            Ok(_) => {}
            Err(_) => return Ok(false),
        }
    }
}

/// Frame loop for one world.  Input is sampled every frame from the held
/// key set and written into the shared [`InputState`]; the world runs its
/// own tasks against the system clock.
fn game_loop<W: Write>(
    out: &mut W,
    surface: &mut TerminalSurface,
    session: &mut Session,
    world: &mut World,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<SessionEnd> {
    let frame_time = session.config.frame_duration();
    let keyboard = world.keyboard().clone();
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code, frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            return Ok(SessionEnd::Quit);
                        }
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(SessionEnd::Quit);
                        }
                        KeyCode::Char('m') | KeyCode::Char('M') => {
                            session.muted = world.toggle_mute();
                        }
                        KeyCode::Char('r') | KeyCode::Char('R') if world.is_stopped() => {
                            return Ok(SessionEnd::Restart);
                        }
                        _ => {}
                    }
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        keyboard.set(Control::Left, any_held(&key_frame, &[KeyCode::Left], frame));
        keyboard.set(Control::Right, any_held(&key_frame, &[KeyCode::Right], frame));
        keyboard.set(
            Control::Jump,
            any_held(&key_frame, &[KeyCode::Char(' '), KeyCode::Up], frame),
        );
        keyboard.set(
            Control::Throw,
            any_held(&key_frame, &[KeyCode::Char('d'), KeyCode::Char('D')], frame),
        );
        keyboard.set(Control::Confirm, any_held(&key_frame, &[KeyCode::Enter], frame));
        if world.is_stopped() && keyboard.is_pressed(Control::Confirm) {
            return Ok(SessionEnd::Restart);
        }

        world.update();
        display::render(out, surface, world)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    mut session: Session,
) -> std::io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let mut surface = TerminalSurface::new(cols, rows);

    if !wait_for_start(out, &mut surface, rx)? {
        return Ok(());
    }

    let keyboard = InputState::new();
    loop {
        let mut world = session.new_world(&keyboard);
        match game_loop(out, &mut surface, &mut session, &mut world, rx)? {
            SessionEnd::Quit => {
                world.shutdown();
                break;
            }
            SessionEnd::Restart => info!("restarting"),
        }
    }
    Ok(())
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<(), GameError> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_ref())?;

    let mut config = match &cli.config {
        Some(path) => GameConfig::with_path(path),
        None => GameConfig::new(),
    };
    config.load_from_file()?;

    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let muted = cli.muted || config.muted;
    let session = Session { config, rng, muted };

    let mut out = BufWriter::new(stdout());
    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Blocking reads live on their own thread so the frame loop never waits.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    });

    let result = run(&mut out, &rx, session);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(err) = &result {
        warn!("terminal loop failed: {}", err);
    }
    result.map_err(GameError::from)
}
