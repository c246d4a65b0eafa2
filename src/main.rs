mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{self, Event},
    terminal, ExecutableCommand,
};

use pipe_runner::input::command_for;
use pipe_runner::{GameConfig, Session};

#[derive(Parser, Debug)]
#[command(name = "pipe_runner")]
#[command(about = "Flap through an endless stream of pipes in your terminal")]
struct Cli {
    /// JSON file overriding the default tunables
    #[arg(long)]
    config: Option<PathBuf>,
    /// Fixed RNG seed for a reproducible pipe layout
    #[arg(long)]
    seed: Option<u64>,
    /// Target ticks per second
    #[arg(long)]
    fps: Option<u32>,
    /// Vertical opening between pipes (world units)
    #[arg(long)]
    gap: Option<u32>,
    /// Pipe scroll speed (world units per tick)
    #[arg(long)]
    speed: Option<f32>,
    /// Write logs here; the terminal itself is taken by the game
    #[arg(long)]
    log_file: Option<PathBuf>,
    /// Print the effective config as JSON and exit
    #[arg(long)]
    dump_config: bool,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(fps) = self.fps {
            config.fps = fps;
        }
        if let Some(gap) = self.gap {
            config.gap = gap;
        }
        if let Some(speed) = self.speed {
            config.speed = speed;
        }
        Ok(config)
    }
}

fn init_logging(path: Option<&PathBuf>) -> Result<()> {
    // stderr would scribble over the alternate screen, so no file means no logs
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// One fixed timestep per frame: drain input, tick, render, sleep out the
/// rest of the frame budget. Stops after the tick in which the session exits.
fn game_loop<W: Write>(
    out: &mut W,
    session: &mut Session,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<()> {
    let frame = Duration::from_secs_f64(1.0 / f64::from(session.config().fps));

    while !session.is_exited() {
        let frame_start = Instant::now();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            if let Event::Key(key) = ev {
                if let Some(command) = command_for(session.status(), &key) {
                    session.handle(command);
                }
            }
        }

        let outcome = session.tick();
        if outcome.scored > 0 {
            log::debug!("score {}", session.score().score());
        }

        if session.is_exited() {
            break;
        }
        display::render(out, session)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame {
            thread::sleep(frame - elapsed);
        }
    }
    Ok(())
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.game_config()?;

    if cli.dump_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    init_logging(cli.log_file.as_ref())?;
    let mut session = Session::new(config).context("invalid game configuration")?;
    log::info!("starting with {:?}", session.config());

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode().context("cannot enable raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = game_loop(&mut out, &mut session, &rx);

    // Always restore the terminal
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    log::info!(
        "exiting, best score this session: {}",
        session.score().high_score()
    );
    result.context("terminal error")
}
