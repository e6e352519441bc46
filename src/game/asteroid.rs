use std::ops::RangeInclusive;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// How far past an edge an asteroid's center may drift before it is pruned.
pub const OFFSCREEN_MARGIN: f32 = 50.0;
/// Spawned asteroids start this far outside the field.
const SPAWN_OFFSET: f32 = 20.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Asteroid {
    pub x: f32,
    pub y: f32,
    pub dx: f32,
    pub dy: f32,
    pub radius: f32,
}

impl Asteroid {
    pub fn advance(&mut self) {
        self.x += self.dx;
        self.y += self.dy;
    }

    pub fn is_offscreen(&self, width: f32, height: f32) -> bool {
        self.x < -OFFSCREEN_MARGIN
            || self.x > width + OFFSCREEN_MARGIN
            || self.y < -OFFSCREEN_MARGIN
            || self.y > height + OFFSCREEN_MARGIN
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

impl Edge {
    const ALL: [Edge; 4] = [Edge::Left, Edge::Right, Edge::Top, Edge::Bottom];
}

/// Live asteroids. Order is not meaningful; removal swaps the last
/// element into the hole.
#[derive(Debug, Default, Clone)]
pub struct AsteroidSet {
    items: Vec<Asteroid>,
}

impl AsteroidSet {
    pub fn new() -> Self {
        Self { items: Vec::with_capacity(32) }
    }

    pub fn push(&mut self, asteroid: Asteroid) {
        self.items.push(asteroid);
    }

    pub fn swap_remove(&mut self, index: usize) -> Asteroid {
        self.items.swap_remove(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Asteroid> {
        self.items.get_mut(index)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn as_slice(&self) -> &[Asteroid] {
        &self.items
    }
}

/// Drops one asteroid on a random edge every `interval` seconds of play.
pub struct SpawnScheduler {
    interval: f32,
    timer: f32,
    radius: RangeInclusive<u32>,
    rng: StdRng,
}

impl SpawnScheduler {
    pub fn new(interval: f32, radius: RangeInclusive<u32>, seed: Option<u64>) -> Self {
        debug_assert!(interval > 0.0);
        debug_assert!(!radius.is_empty());
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Self {
            interval,
            timer: 0.0,
            radius,
            rng,
        }
    }

    pub fn reset(&mut self) {
        self.timer = 0.0;
    }

    #[cfg(test)]
    pub fn timer(&self) -> f32 {
        self.timer
    }

    /// Accumulate `dt` seconds. Returns an asteroid when the interval has
    /// elapsed; at most one per call.
    pub fn update(&mut self, dt: f32, width: f32, height: f32) -> Option<Asteroid> {
        self.timer += dt;
        if self.timer >= self.interval {
            self.timer = 0.0;
            Some(self.spawn(width, height))
        } else {
            None
        }
    }

    pub fn spawn(&mut self, width: f32, height: f32) -> Asteroid {
        let edge = Edge::ALL[self.rng.gen_range(0..Edge::ALL.len())];
        self.spawn_on(edge, width, height)
    }

    pub fn spawn_on(&mut self, edge: Edge, width: f32, height: f32) -> Asteroid {
        let rng = &mut self.rng;
        let (x, y, dx, dy): (f32, f32, f32, f32) = match edge {
            Edge::Left => (
                -SPAWN_OFFSET,
                rng.gen_range(0..=height as u32) as f32,
                rng.gen_range(1.0..=3.0),
                rng.gen_range(-2.0..=2.0),
            ),
            Edge::Right => (
                width + SPAWN_OFFSET,
                rng.gen_range(0..=height as u32) as f32,
                rng.gen_range(-3.0..=-1.0),
                rng.gen_range(-2.0..=2.0),
            ),
            Edge::Top => (
                rng.gen_range(0..=width as u32) as f32,
                -SPAWN_OFFSET,
                rng.gen_range(-2.0..=2.0),
                rng.gen_range(1.0..=3.0),
            ),
            Edge::Bottom => (
                rng.gen_range(0..=width as u32) as f32,
                height + SPAWN_OFFSET,
                rng.gen_range(-2.0..=2.0),
                rng.gen_range(-3.0..=-1.0),
            ),
        };
        let radius = rng.gen_range(self.radius.clone()) as f32;
        Asteroid { x, y, dx, dy, radius }
    }
}
