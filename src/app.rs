use std::time::Duration;

use crossterm::event::KeyEvent;
use ratatui::Frame;

use crate::event::InputEvent;
use crate::game::Game;
use crate::ui::{self, Palette};

pub struct App {
    pub should_quit: bool,
    game: Game,
    palette: Palette,
}

impl App {
    pub fn new(game: Game, palette: Palette) -> Self {
        Self {
            should_quit: false,
            game,
            palette,
        }
    }

    pub fn on_tick(&mut self, dt: Duration) {
        self.game.tick(dt);
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        if let Some(event) = InputEvent::from_key(key, self.game.phase()) {
            self.game.handle(event);
        }
        if self.game.should_quit() {
            self.should_quit = true;
        }
    }

    pub fn render(&self, frame: &mut Frame) {
        ui::render(frame, &self.game.snapshot(), &self.palette);
    }

    /// Called once on the way out.
    pub fn shutdown(&mut self) {
        self.game.flush();
    }
}
