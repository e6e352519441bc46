use super::asteroid::Asteroid;

#[derive(Debug, Clone)]
pub struct Ship {
    pub x: f32,
    pub y: f32,
    /// Degrees, 0 = +x, counter-clockwise. Always in [0, 360).
    heading: f32,
    pub speed: f32,
    pub radius: f32,
    pub lives: u32,
}

impl Ship {
    pub fn new(x: f32, y: f32, speed: f32, radius: f32, lives: u32) -> Self {
        Self {
            x,
            y,
            heading: 0.0,
            speed,
            radius,
            lives,
        }
    }

    pub fn heading(&self) -> f32 {
        self.heading
    }

    pub fn set_heading(&mut self, degrees: f32) {
        self.heading = wrap(degrees, 360.0);
    }

    /// Move one step along the heading, then wrap into the field.
    /// Screen y grows downward, so a positive sine moves the ship up.
    pub fn advance(&mut self, width: f32, height: f32) {
        let rad = self.heading.to_radians();
        self.x = wrap(self.x + rad.cos() * self.speed, width);
        self.y = wrap(self.y - rad.sin() * self.speed, height);
    }

    /// Touching circles do not collide.
    pub fn collides_with(&self, asteroid: &Asteroid) -> bool {
        let dx = self.x - asteroid.x;
        let dy = self.y - asteroid.y;
        (dx * dx + dy * dy).sqrt() < self.radius + asteroid.radius
    }

    /// Drop one life. Returns true when that was the last one.
    pub fn lose_life(&mut self) -> bool {
        self.lives = self.lives.saturating_sub(1);
        self.lives == 0
    }

    pub fn reset(&mut self, x: f32, y: f32, lives: u32) {
        self.x = x;
        self.y = y;
        self.heading = 0.0;
        self.lives = lives;
    }
}

/// Euclidean remainder into [0, m). `rem_euclid` can round up to `m`
/// itself for tiny negative inputs.
pub fn wrap(v: f32, m: f32) -> f32 {
    let r = v.rem_euclid(m);
    if r >= m { 0.0 } else { r }
}
