pub mod asteroid;
pub mod collision;
pub mod ship;
pub mod steering;

#[cfg(test)]
pub mod testing;

use std::time::Duration;

use log::{debug, info, warn};

use crate::config::Config;
use crate::error::SteerError;
use crate::event::InputEvent;
use crate::highscore::HighScoreStore;
use crate::oracle::SimilarityOracle;

use asteroid::{Asteroid, AsteroidSet, SpawnScheduler};
use ship::Ship;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Counting down before the round starts
    Countdown,
    Playing,
    /// Round over, waiting for restart or quit
    GameOver,
}

/// Read-only view of one frame, handed to the renderer.
pub struct Snapshot<'a> {
    pub phase: Phase,
    pub field_width: f32,
    pub field_height: f32,
    pub ship: &'a Ship,
    pub asteroids: &'a [Asteroid],
    pub current_word: &'a str,
    pub input: &'a str,
    pub lives: u32,
    pub elapsed: f64,
    pub high_score: f64,
    /// Number to show during the countdown.
    pub countdown: Option<u32>,
    pub rejection: Option<&'a SteerError>,
}

pub struct Game {
    config: Config,
    oracle: Box<dyn SimilarityOracle>,
    store: Box<dyn HighScoreStore>,
    ship: Ship,
    asteroids: AsteroidSet,
    spawner: SpawnScheduler,
    phase: Phase,
    seed_word: String,
    current_word: String,
    input: String,
    countdown: i32,
    countdown_timer: f32,
    elapsed: f64,
    high_score: f64,
    pending_save: Option<f64>,
    rejection: Option<SteerError>,
    should_quit: bool,
}

impl Game {
    pub fn new(
        config: Config,
        oracle: Box<dyn SimilarityOracle>,
        store: Box<dyn HighScoreStore>,
        seed_word: &str,
    ) -> Self {
        let high_score = store.load();
        let ship = Ship::new(
            config.field_width / 2.0,
            config.field_height / 2.0,
            config.ship_speed,
            config.ship_radius,
            config.starting_lives,
        );
        let spawner = SpawnScheduler::new(
            config.spawn_interval_seconds,
            config.asteroid_min_radius..=config.asteroid_max_radius,
            config.rng_seed,
        );
        let mut game = Self {
            config,
            oracle,
            store,
            ship,
            asteroids: AsteroidSet::new(),
            spawner,
            phase: Phase::Countdown,
            seed_word: seed_word.to_string(),
            current_word: seed_word.to_string(),
            input: String::new(),
            countdown: 0,
            countdown_timer: 0.0,
            elapsed: 0.0,
            high_score,
            pending_save: None,
            rejection: None,
            should_quit: false,
        };
        game.begin_round();
        game
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn ship(&self) -> &Ship {
        &self.ship
    }

    pub fn asteroids(&self) -> &[Asteroid] {
        self.asteroids.as_slice()
    }

    pub fn current_word(&self) -> &str {
        &self.current_word
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn high_score(&self) -> f64 {
        self.high_score
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            phase: self.phase,
            field_width: self.config.field_width,
            field_height: self.config.field_height,
            ship: self.ship(),
            asteroids: self.asteroids(),
            current_word: self.current_word(),
            input: self.input(),
            lives: self.ship().lives,
            elapsed: self.elapsed(),
            high_score: self.high_score(),
            countdown: match self.phase {
                Phase::Countdown => Some((self.countdown + 1).max(0) as u32),
                _ => None,
            },
            rejection: self.rejection.as_ref(),
        }
    }

    /// Advance the simulation by one frame of `dt` wall-clock time.
    pub fn tick(&mut self, dt: Duration) {
        let secs = dt.as_secs_f32();
        match self.phase {
            Phase::Countdown => {
                self.countdown_timer += secs;
                while self.countdown_timer >= 1.0 {
                    self.countdown_timer -= 1.0;
                    self.countdown -= 1;
                    if self.countdown < 0 {
                        self.start_playing();
                        break;
                    }
                }
            }
            Phase::Playing => self.step_playing(dt),
            Phase::GameOver => {}
        }
    }

    pub fn handle(&mut self, event: InputEvent) {
        match (event, self.phase) {
            (InputEvent::Quit, _) => {
                info!("Quit requested");
                self.should_quit = true;
            }
            (InputEvent::Restart, Phase::GameOver) => self.restart(),
            (InputEvent::Char(c), Phase::Playing) => self.input.push(c),
            (InputEvent::Backspace, Phase::Playing) => {
                self.input.pop();
            }
            (InputEvent::Submit, Phase::Playing) => self.submit(),
            _ => {}
        }
    }

    /// Try to steer with the typed word. The buffer is cleared either way.
    fn submit(&mut self) {
        let word = self.input.trim().to_string();
        self.input.clear();
        if word.is_empty() {
            return;
        }

        match steering::steer(
            self.oracle.as_ref(),
            &self.current_word,
            &word,
            self.config.angle_multiplier,
        ) {
            Ok(heading) => {
                debug!(
                    "Steer {} -> {}: heading {:.1} -> {:.1}",
                    self.current_word,
                    word,
                    self.ship.heading(),
                    heading
                );
                self.ship.set_heading(heading);
                self.current_word = word;
                self.rejection = None;
            }
            Err(err) => {
                debug!("Rejected {word:?}: {err}");
                self.rejection = Some(err);
            }
        }
    }

    fn step_playing(&mut self, dt: Duration) {
        let (w, h) = (self.config.field_width, self.config.field_height);
        self.elapsed += dt.as_secs_f64();
        self.ship.advance(w, h);

        if let Some(asteroid) = self.spawner.update(dt.as_secs_f32(), w, h) {
            debug!(
                "Spawned asteroid at ({:.0}, {:.0}) r={}",
                asteroid.x, asteroid.y, asteroid.radius
            );
            self.asteroids.push(asteroid);
        }

        let report = collision::step_asteroids(&mut self.ship, &mut self.asteroids, w, h);
        if report.hits > 0 {
            debug!("Ship hit {} time(s), {} lives left", report.hits, self.ship.lives);
        }
        if report.ship_destroyed {
            self.game_over();
        }
    }

    fn game_over(&mut self) {
        debug_assert_eq!(self.ship.lives, 0);
        self.phase = Phase::GameOver;
        info!("Game over after {:.2}s (best {:.2}s)", self.elapsed, self.high_score);

        if self.elapsed > self.high_score {
            self.high_score = self.elapsed;
            info!("New high score: {:.2}s", self.high_score);
            if let Err(err) = self.store.save(self.high_score) {
                warn!("Could not save high score: {err}");
                self.pending_save = Some(self.high_score);
            }
        }
    }

    /// Retry a high score save that failed earlier.
    pub fn flush(&mut self) {
        if let Some(score) = self.pending_save.take() {
            match self.store.save(score) {
                Ok(()) => info!("Saved pending high score {score:.2}s"),
                Err(err) => warn!("Could not save high score on exit: {err}"),
            }
        }
    }

    fn restart(&mut self) {
        info!("Restarting round with seed word {:?}", self.seed_word);
        let (w, h) = (self.config.field_width, self.config.field_height);
        self.ship.reset(w / 2.0, h / 2.0, self.config.starting_lives);
        self.asteroids.clear();
        self.spawner.reset();
        self.current_word = self.seed_word.clone();
        self.input.clear();
        self.elapsed = 0.0;
        self.rejection = None;
        self.begin_round();
    }

    fn begin_round(&mut self) {
        if self.config.show_countdown {
            self.phase = Phase::Countdown;
            self.countdown = i32::try_from(self.config.countdown_seconds).unwrap_or(i32::MAX);
            self.countdown_timer = 0.0;
        } else {
            self.start_playing();
        }
    }

    fn start_playing(&mut self) {
        debug!("Round started");
        self.phase = Phase::Playing;
        self.elapsed = 0.0;
        self.spawner.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use testing::{MockOracle, RecordingStore};

    const FRAME: Duration = Duration::from_micros(16_667);

    fn oracle() -> Box<MockOracle> {
        Box::new(MockOracle::new(&[
            ("cat", "dog", 1.0),
            ("cat", "stone", -1.0),
            ("cat", "idea", 0.0),
            ("dog", "idea", 0.5),
        ]))
    }

    fn config() -> Config {
        Config {
            rng_seed: Some(99),
            ..Config::default()
        }
    }

    fn game_with(config: Config, store: RecordingStore) -> Game {
        Game::new(config, oracle(), Box::new(store), "cat")
    }

    fn playing_game() -> Game {
        game_with(quiet_config(), RecordingStore::default())
    }

    /// Starts in play and never spawns on its own.
    fn quiet_config() -> Config {
        Config {
            show_countdown: false,
            spawn_interval_seconds: 1000.0,
            ..config()
        }
    }

    fn type_word(game: &mut Game, word: &str) {
        for c in word.chars() {
            game.handle(InputEvent::Char(c));
        }
        game.handle(InputEvent::Submit);
    }

    fn rock_on_ship(game: &Game) -> Asteroid {
        Asteroid {
            x: game.ship.x,
            y: game.ship.y,
            dx: 0.0,
            dy: 0.0,
            radius: 10.0,
        }
    }

    #[test]
    fn test_countdown_runs_four_seconds() {
        let mut game = game_with(config(), RecordingStore::default());
        assert_eq!(game.phase(), Phase::Countdown);
        assert_eq!(game.snapshot().countdown, Some(4));

        game.tick(Duration::from_secs(1));
        assert_eq!(game.snapshot().countdown, Some(3));
        game.tick(Duration::from_secs(2));
        assert_eq!(game.snapshot().countdown, Some(1));
        assert_eq!(game.phase(), Phase::Countdown);

        game.tick(Duration::from_millis(999));
        assert_eq!(game.phase(), Phase::Countdown);
        game.tick(Duration::from_millis(2));
        assert_eq!(game.phase(), Phase::Playing);
        assert_eq!(game.snapshot().countdown, None);
        assert_eq!(game.elapsed(), 0.0);
    }

    #[test]
    fn test_countdown_accumulates_small_frames() {
        let mut game = game_with(config(), RecordingStore::default());
        for _ in 0..(60 * 4 + 5) {
            game.tick(FRAME);
        }
        assert_eq!(game.phase(), Phase::Playing);
    }

    #[test]
    fn test_no_countdown_starts_playing() {
        let game = playing_game();
        assert_eq!(game.phase(), Phase::Playing);
    }

    #[test]
    fn test_typing_is_ignored_during_countdown() {
        let mut game = game_with(config(), RecordingStore::default());
        type_word(&mut game, "dog");
        assert_eq!(game.input(), "");
        assert_eq!(game.current_word(), "cat");
    }

    #[test]
    fn test_ship_moves_three_units_per_tick() {
        let mut game = playing_game();
        game.tick(FRAME);
        assert_abs_diff_eq!(game.ship().x, 403.0, epsilon = 1e-3);
        assert_abs_diff_eq!(game.ship().y, 300.0, epsilon = 1e-3);
    }

    #[test]
    fn test_identical_word_keeps_heading_zero() {
        let mut game = playing_game();
        type_word(&mut game, "dog");
        assert_eq!(game.ship().heading(), 0.0);
        assert_eq!(game.current_word(), "dog");
        assert_eq!(game.input(), "");
    }

    #[test]
    fn test_opposite_word_turns_around() {
        let mut game = playing_game();
        type_word(&mut game, "stone");
        assert_abs_diff_eq!(game.ship().heading(), 180.0, epsilon = 1e-3);
        assert_eq!(game.current_word(), "stone");
    }

    #[test]
    fn test_similarity_is_measured_from_current_word() {
        let mut game = playing_game();
        type_word(&mut game, "dog");
        type_word(&mut game, "idea");
        // acos(0.5) = 60 degrees, times 5 = 300
        assert_abs_diff_eq!(game.ship().heading(), 300.0, epsilon = 1e-2);
    }

    #[test]
    fn test_unknown_word_is_rejected_idempotently() {
        let mut game = playing_game();
        type_word(&mut game, "stone");
        let heading = game.ship().heading();

        for _ in 0..3 {
            type_word(&mut game, "zebra");
            assert_eq!(game.ship().heading(), heading);
            assert_eq!(game.current_word(), "stone");
            assert_eq!(game.input(), "");
            assert_eq!(
                game.snapshot().rejection,
                Some(&SteerError::UnknownWord("zebra".into()))
            );
        }

        type_word(&mut game, "cat");
        assert!(game.snapshot().rejection.is_none());
    }

    #[test]
    fn test_unknown_pair_is_rejected() {
        let mut game = playing_game();
        type_word(&mut game, "stone");
        // stone and dog are both known, but never paired
        type_word(&mut game, "dog");
        assert_eq!(game.current_word(), "stone");
        assert_abs_diff_eq!(game.ship().heading(), 180.0, epsilon = 1e-3);
    }

    #[test]
    fn test_backspace_and_whitespace() {
        let mut game = playing_game();
        for c in "  dogx".chars() {
            game.handle(InputEvent::Char(c));
        }
        game.handle(InputEvent::Backspace);
        assert_eq!(game.input(), "  dog");
        game.handle(InputEvent::Submit);
        assert_eq!(game.current_word(), "dog");

        game.handle(InputEvent::Backspace);
        assert_eq!(game.input(), "");
        game.handle(InputEvent::Submit);
        assert!(game.snapshot().rejection.is_none());
    }

    #[test]
    fn test_spawns_follow_interval() {
        let config = Config {
            show_countdown: false,
            ..config()
        };
        let mut game = game_with(config, RecordingStore::default());
        game.ship.speed = 0.0;
        for _ in 0..50 {
            game.tick(FRAME);
        }
        assert!(game.asteroids().is_empty());

        // One asteroid per elapsed interval, even for a long frame
        game.tick(Duration::from_millis(1200));
        assert_eq!(game.asteroids().len(), 1);
        game.tick(Duration::from_millis(1000));
        game.tick(Duration::from_millis(1000));
        assert_eq!(game.asteroids().len(), 3);
    }

    #[test]
    fn test_collision_costs_a_life() {
        let mut game = playing_game();
        let rock = rock_on_ship(&game);
        game.asteroids.push(rock);
        game.tick(FRAME);
        assert_eq!(game.snapshot().lives, 4);
        assert_eq!(game.phase(), Phase::Playing);
        assert!(game.asteroids().is_empty());
    }

    #[test]
    fn test_last_life_ends_game_and_saves_record() {
        let store = RecordingStore {
            initial: 1.0,
            ..Default::default()
        };
        let saves = store.saves.clone();
        let mut game = game_with(quiet_config(), store);
        game.ship.lives = 1;
        for _ in 0..3 {
            game.tick(Duration::from_secs(1));
        }
        let rock = rock_on_ship(&game);
        game.asteroids.push(rock);
        game.tick(FRAME);

        assert_eq!(game.snapshot().lives, 0);
        assert_eq!(game.phase(), Phase::GameOver);
        assert!(game.high_score() > 2.0);
        assert_eq!(saves.borrow().as_slice(), &[game.high_score()]);

        // Frozen: time and positions no longer change, nothing saved twice
        let elapsed = game.elapsed();
        let x = game.ship().x;
        game.tick(Duration::from_secs(5));
        assert_eq!(game.elapsed(), elapsed);
        assert_eq!(game.ship().x, x);
        assert_eq!(saves.borrow().len(), 1);
    }

    #[test]
    fn test_short_round_keeps_old_record() {
        let store = RecordingStore {
            initial: 100.0,
            ..Default::default()
        };
        let saves = store.saves.clone();
        let mut game = game_with(quiet_config(), store);
        game.ship.lives = 1;
        let rock = rock_on_ship(&game);
        game.asteroids.push(rock);
        game.tick(FRAME);

        assert_eq!(game.phase(), Phase::GameOver);
        assert_eq!(game.high_score(), 100.0);
        assert!(saves.borrow().is_empty());
    }

    #[test]
    fn test_failed_save_is_retried_on_flush() {
        let store = RecordingStore::default();
        store.failures.set(1);
        let saves = store.saves.clone();
        let mut game = game_with(quiet_config(), store);
        game.ship.lives = 1;
        game.tick(FRAME);
        let rock = rock_on_ship(&game);
        game.asteroids.push(rock);
        game.tick(FRAME);

        assert_eq!(game.phase(), Phase::GameOver);
        assert!(saves.borrow().is_empty());
        game.flush();
        assert_eq!(saves.borrow().len(), 1);
        game.flush();
        assert_eq!(saves.borrow().len(), 1);
    }

    #[test]
    fn test_restart_resets_round() {
        let mut game = game_with(config(), RecordingStore::default());
        game.tick(Duration::from_secs(4));
        assert_eq!(game.phase(), Phase::Playing);
        type_word(&mut game, "stone");
        for _ in 0..200 {
            game.tick(FRAME);
        }
        game.ship.lives = 1;
        let rock = rock_on_ship(&game);
        game.asteroids.push(rock);
        game.asteroids.push(Asteroid {
            x: 10.0,
            y: 10.0,
            dx: 0.0,
            dy: 0.0,
            radius: 10.0,
        });
        game.tick(FRAME);
        assert_eq!(game.phase(), Phase::GameOver);
        let best = game.high_score();

        game.handle(InputEvent::Restart);
        assert_eq!(game.phase(), Phase::Countdown);
        assert_eq!((game.ship().x, game.ship().y), (400.0, 300.0));
        assert_eq!(game.ship().heading(), 0.0);
        assert_eq!(game.snapshot().lives, 5);
        assert!(game.asteroids().is_empty());
        assert_eq!(game.current_word(), "cat");
        assert_eq!(game.input(), "");
        assert_eq!(game.elapsed(), 0.0);
        assert_eq!(game.high_score(), best);
        assert_eq!(game.snapshot().countdown, Some(4));
    }

    #[test]
    fn test_restart_only_from_game_over() {
        let mut game = playing_game();
        game.tick(FRAME);
        game.handle(InputEvent::Restart);
        assert_eq!(game.phase(), Phase::Playing);
        assert!(game.elapsed() > 0.0);
    }

    #[test]
    fn test_quit_from_any_phase() {
        let mut game = game_with(config(), RecordingStore::default());
        assert!(!game.should_quit());
        game.handle(InputEvent::Quit);
        assert!(game.should_quit());
    }
}
