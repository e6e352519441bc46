use std::io;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::game::Phase;

/// Longest frame delta handed to the simulation. A suspended terminal
/// would otherwise resume with one huge step.
pub const MAX_FRAME_DT: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Char(char),
    Backspace,
    Submit,
    Quit,
    Restart,
}

impl InputEvent {
    /// Map a terminal key to a game event for the given phase.
    pub fn from_key(key: KeyEvent, phase: Phase) -> Option<Self> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(InputEvent::Quit);
        }
        if key.code == KeyCode::Esc {
            return Some(InputEvent::Quit);
        }

        match phase {
            Phase::Countdown => None,
            Phase::Playing => match key.code {
                KeyCode::Enter => Some(InputEvent::Submit),
                KeyCode::Backspace => Some(InputEvent::Backspace),
                KeyCode::Char(c)
                    if !c.is_control() && !key.modifiers.contains(KeyModifiers::CONTROL) =>
                {
                    Some(InputEvent::Char(c))
                }
                _ => None,
            },
            Phase::GameOver => match key.code {
                KeyCode::Char('r') | KeyCode::Char('R') => Some(InputEvent::Restart),
                KeyCode::Char('q') | KeyCode::Char('Q') => Some(InputEvent::Quit),
                _ => None,
            },
        }
    }
}

/// Fixed-rate frame pacing on the main thread. Each call to `next_frame`
/// sleeps out the rest of the frame, then drains every pending key press
/// without blocking.
pub struct EventHandler {
    tick_rate: Duration,
    last_frame: Instant,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        Self {
            tick_rate,
            last_frame: Instant::now(),
        }
    }

    /// Returns the time since the previous frame (capped at
    /// `MAX_FRAME_DT`) and the keys pressed in the meantime, oldest first.
    pub fn next_frame(&mut self) -> io::Result<(Duration, Vec<KeyEvent>)> {
        let since = self.last_frame.elapsed();
        if since < self.tick_rate {
            thread::sleep(self.tick_rate - since);
        }

        let mut keys = Vec::new();
        while event::poll(Duration::ZERO)? {
            if let event::Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    keys.push(key);
                }
            }
        }

        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).min(MAX_FRAME_DT);
        self.last_frame = now;
        Ok((dt, keys))
    }
}
