//! Terminal Russian Blocks runner (default binary).
//!
//! One thread runs the whole game: it waits for a key event or the next
//! gravity deadline, whichever comes first, feeds the session controller and
//! redraws. Rendering goes through the framebuffer renderer in `term`.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use log::{info, LevelFilter};

use russian_blocks::input::{should_quit, KeyInput, KeyTracker};
use russian_blocks::session::{Effect, SessionController};
use russian_blocks::term::{FrameBuffer, SessionView, TerminalRenderer, TickScheduler, Viewport};
use russian_blocks::types::Difficulty;

/// Falling-block puzzle for the terminal.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Seed for the piece sequence (default: taken from the clock)
    #[arg(long)]
    seed: Option<u32>,

    /// Write log records to this file; the terminal itself shows the game
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Skip the main menu and start at this difficulty
    #[arg(long, value_parser = parse_difficulty)]
    difficulty: Option<Difficulty>,
}

fn parse_difficulty(s: &str) -> Result<Difficulty, String> {
    Difficulty::from_str(s).ok_or_else(|| format!("unknown difficulty '{s}' (easy, medium, hard)"))
}

fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let seed = args.seed.unwrap_or_else(clock_seed);
    info!("seed {seed}");

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, seed, args.difficulty);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .filter_module("crossterm", LevelFilter::Warn)
        .init();
    Ok(())
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u32)
        .unwrap_or(1)
}

fn run(term: &mut TerminalRenderer, seed: u32, difficulty: Option<Difficulty>) -> Result<()> {
    let mut session = SessionController::new(seed);
    if let Some(difficulty) = difficulty {
        session.start(difficulty);
    }

    let view = SessionView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut keys = KeyTracker::new();
    let mut ticks = TickScheduler::new();
    let started = Instant::now();
    let now_ms = || started.elapsed().as_millis() as u64;

    let mut show_credits = false;
    let mut dirty = true;

    info!(
        "terminal key releases {}",
        if term.reports_key_releases() {
            "reported"
        } else {
            "synthesized"
        }
    );

    loop {
        ticks.sync(session.timer(), now_ms());

        if dirty {
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            let viewport = Viewport::new(w, h);
            if show_credits {
                view.render_credits_into(viewport, &mut fb);
            } else {
                view.render_into(&session.snapshot(), viewport, &mut fb);
            }
            term.draw_swap(&mut fb)?;
            dirty = false;
        }

        // Wake for the next gravity tick or to expire held keys, whichever is sooner.
        let mut wait_ms = keys.release_timeout_ms() as u64;
        if let Some(until_tick) = ticks.time_until(now_ms()) {
            wait_ms = wait_ms.min(until_tick);
        }

        if event::poll(Duration::from_millis(wait_ms))? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Press && should_quit(key) {
                        return Ok(());
                    }
                    if show_credits {
                        if key.kind == KeyEventKind::Press {
                            show_credits = false;
                            dirty = true;
                        }
                        continue;
                    }
                    match keys.handle_event(key, now_ms()) {
                        Some(KeyInput::Pressed(k)) => {
                            match apply(session.on_key(k), &mut show_credits) {
                                Flow::Quit => return Ok(()),
                                Flow::Redraw => dirty = true,
                                Flow::Idle => {}
                            }
                        }
                        Some(KeyInput::Released(k)) => session.on_key_release(k),
                        None => {}
                    }
                }
                Event::Resize(_, _) => {
                    term.invalidate();
                    dirty = true;
                }
                _ => {}
            }
        }

        for k in keys.expire(now_ms()) {
            session.on_key_release(k);
        }

        ticks.sync(session.timer(), now_ms());
        if ticks.take_due(now_ms()) {
            match apply(session.on_tick(), &mut show_credits) {
                Flow::Quit => return Ok(()),
                Flow::Redraw => dirty = true,
                Flow::Idle => {}
            }
        }
    }
}

enum Flow {
    Idle,
    Redraw,
    Quit,
}

fn apply(effect: Effect, show_credits: &mut bool) -> Flow {
    match effect {
        Effect::None => Flow::Idle,
        Effect::Redraw | Effect::TimerRestarted { .. } | Effect::TimerStopped => Flow::Redraw,
        Effect::ShowCredits => {
            *show_credits = true;
            Flow::Redraw
        }
        Effect::Quit => Flow::Quit,
    }
}
