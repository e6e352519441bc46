mod app;
mod config;
mod error;
mod event;
mod game;
mod highscore;
mod oracle;
mod ui;

use std::fs::File;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::info;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use app::App;
use config::{ColorScheme, Config};
use event::EventHandler;
use game::Game;
use highscore::{FileHighScore, HighScoreStore, MemoryHighScore};
use oracle::{EmbeddingOracle, SimilarityOracle};
use ui::Palette;

#[derive(Parser)]
#[command(name = "word-drift")]
#[command(about = "Dodge asteroids by steering with the meaning of words")]
struct Args {
    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Plain-text word vector file (word2vec or GloVe text format)
    #[arg(short, long)]
    vectors: Option<PathBuf>,

    /// Starting word; prompted for when omitted
    #[arg(short, long)]
    seed: Option<String>,

    /// Seconds between asteroid spawns
    #[arg(long)]
    spawn_interval: Option<f32>,

    /// Skip the countdown before each round
    #[arg(long)]
    no_countdown: bool,

    /// Keep the high score in memory only
    #[arg(long)]
    no_persist: bool,

    /// classic, amber or mono
    #[arg(long, value_parser = parse_scheme)]
    color_scheme: Option<ColorScheme>,

    /// Only load the first N words from the vector file
    #[arg(long)]
    limit: Option<usize>,
}

fn parse_scheme(s: &str) -> Result<ColorScheme, String> {
    s.parse()
}

impl Args {
    fn apply(&self, config: &mut Config) {
        if let Some(path) = &self.vectors {
            config.vectors_path = path.clone();
        }
        if let Some(secs) = self.spawn_interval {
            config.spawn_interval_seconds = secs;
        }
        if self.no_countdown {
            config.show_countdown = false;
        }
        if self.no_persist {
            config.persist_high_score = false;
        }
        if let Some(scheme) = self.color_scheme {
            config.color_scheme = scheme;
        }
        if self.limit.is_some() {
            config.vocabulary_limit = self.limit;
        }
    }
}

fn fail(msg: impl std::fmt::Display) -> ! {
    eprintln!("word-drift: {msg}");
    process::exit(1);
}

fn init_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

/// Ask on stdin until the player gives a word the oracle knows.
fn prompt_seed_word(oracle: &dyn SimilarityOracle) -> io::Result<String> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    write!(stdout, "Enter a seed word to start: ")?;
    stdout.flush()?;
    for line in stdin.lock().lines() {
        let word = line?.trim().to_string();
        if !word.is_empty() && oracle.contains(&word) {
            return Ok(word);
        }
        write!(stdout, "Word not found in vocabulary. Try another word: ")?;
        stdout.flush()?;
    }
    Err(io::Error::new(io::ErrorKind::UnexpectedEof, "no seed word given"))
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load(path).unwrap_or_else(|e| fail(e)),
        None => Config::default(),
    };
    args.apply(&mut config);
    if let Err(e) = config.validate() {
        fail(e);
    }
    if let Err(e) = init_logging(&config.log_path) {
        fail(format!("cannot open log file {}: {e}", config.log_path.display()));
    }
    info!("Starting word-drift with {:?}", config);

    println!("Loading word vectors... (this may take a minute)");
    let oracle = EmbeddingOracle::load(&config.vectors_path, config.vocabulary_limit)
        .unwrap_or_else(|e| fail(format!("{}: {e}", config.vectors_path.display())));
    println!("Word vectors loaded!");

    let seed_word = match &args.seed {
        Some(word) if oracle.contains(word) => word.clone(),
        Some(word) => fail(format!("seed word {word:?} is not in the vocabulary")),
        None => prompt_seed_word(&oracle)?,
    };
    info!("Seed word: {seed_word}");

    let store: Box<dyn HighScoreStore> = if config.persist_high_score {
        Box::new(FileHighScore::new(config.high_score_path.clone()))
    } else {
        Box::new(MemoryHighScore::default())
    };
    let palette = Palette::for_scheme(config.color_scheme);
    let tick_rate = config.tick_interval();
    let game = Game::new(config, Box::new(oracle), store, &seed_word);
    let mut app = App::new(game, palette);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run(&mut terminal, &mut app, tick_rate);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    app.shutdown();
    info!("Exiting");
    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    tick_rate: std::time::Duration,
) -> io::Result<()> {
    let mut events = EventHandler::new(tick_rate);
    loop {
        let (dt, keys) = events.next_frame()?;
        for key in keys {
            app.on_key(key);
            if app.should_quit {
                return Ok(());
            }
        }
        app.on_tick(dt);
        terminal.draw(|frame| app.render(frame))?;
    }
}
