use std::collections::HashMap;

use ratatui::prelude::*;

use crate::game::Snapshot;

use super::Palette;

const ASTEROID_SEGMENTS: usize = 16;
/// Half-angle between the ship's nose and each wing, in degrees.
const WING_ANGLE: f32 = 140.0;

/// Braille dot bits indexed by `[column][row]` inside a 2x4 cell.
const BRAILLE_BITS: [[u8; 4]; 2] = [[0x01, 0x02, 0x04, 0x40], [0x08, 0x10, 0x20, 0x80]];

/// Dot-level canvas: each terminal cell holds a 2x4 braille block.
struct DotMap {
    dots: HashMap<(usize, usize), u8>,
    bw: i32,
    bh: i32,
}

impl DotMap {
    fn new(bw: i32, bh: i32) -> Self {
        Self { dots: HashMap::new(), bw, bh }
    }

    fn set(&mut self, bx: i32, by: i32) {
        if bx < 0 || by < 0 || bx >= self.bw || by >= self.bh {
            return;
        }
        let cell = (bx as usize / 2, by as usize / 4);
        *self.dots.entry(cell).or_insert(0) |= BRAILLE_BITS[bx as usize % 2][by as usize % 4];
    }

    /// Plot a segment dot by dot, both ends included.
    fn segment(&mut self, from: (i32, i32), to: (i32, i32)) {
        let (dx, dy) = ((to.0 - from.0).abs(), (to.1 - from.1).abs());
        let step = ((to.0 - from.0).signum(), (to.1 - from.1).signum());
        let mut err = dx - dy;
        let mut at = from;
        self.set(at.0, at.1);
        while at != to {
            let twice = err * 2;
            if twice > -dy {
                err -= dy;
                at.0 += step.0;
            }
            if twice < dx {
                err += dx;
                at.1 += step.1;
            }
            self.set(at.0, at.1);
        }
    }

    fn polyline(&mut self, points: &[(i32, i32)], closed: bool) {
        for pair in points.windows(2) {
            self.segment(pair[0], pair[1]);
        }
        if let (true, Some(&first), Some(&last)) = (closed, points.first(), points.last()) {
            self.segment(last, first);
        }
    }

    /// Merge into the grid, combining with braille already in a cell.
    fn write(&self, grid: &mut [Vec<(char, Style)>], style: Style) {
        for (&(cx, cy), &bits) in &self.dots {
            let Some(cell) = grid.get_mut(cy).and_then(|row| row.get_mut(cx)) else {
                continue;
            };
            let existing = cell.0 as u32;
            let merged = if (0x2800..0x2900).contains(&existing) {
                (existing - 0x2800) as u8 | bits
            } else {
                bits
            };
            let ch = char::from_u32(0x2800 + merged as u32).unwrap_or(' ');
            *cell = (ch, style);
        }
    }
}

/// Draw the playfield into `width` x `height` terminal cells, scaling
/// field units to braille dots.
pub fn render_field(snap: &Snapshot, palette: &Palette, width: usize, height: usize) -> Vec<Line<'static>> {
    let bw = (width * 2) as i32;
    let bh = (height * 4) as i32;
    let sx = bw as f32 / snap.field_width;
    let sy = bh as f32 / snap.field_height;
    let to_dot = |x: f32, y: f32| ((x * sx).round() as i32, (y * sy).round() as i32);

    let bg = Style::default().bg(palette.background);
    let mut grid: Vec<Vec<(char, Style)>> = vec![vec![(' ', bg); width]; height];

    // Sparse background stars
    for (yi, row) in grid.iter_mut().enumerate() {
        for (xi, cell) in row.iter_mut().enumerate() {
            if ((xi * 7 + yi * 13 + 37) * 31) % 250 < 2 {
                *cell = ('.', bg.fg(palette.dim));
            }
        }
    }

    let mut rocks = DotMap::new(bw, bh);
    for a in snap.asteroids {
        let points: Vec<(i32, i32)> = (0..ASTEROID_SEGMENTS)
            .map(|i| {
                let t = i as f32 / ASTEROID_SEGMENTS as f32 * std::f32::consts::TAU;
                to_dot(a.x + t.cos() * a.radius, a.y + t.sin() * a.radius)
            })
            .collect();
        rocks.polyline(&points, true);
    }
    rocks.write(&mut grid, bg.fg(palette.asteroid));

    let ship = snap.ship;
    let corner = |offset: f32| {
        let rad = (ship.heading() + offset).to_radians();
        to_dot(ship.x + ship.radius * rad.cos(), ship.y - ship.radius * rad.sin())
    };
    let mut hull = DotMap::new(bw, bh);
    hull.polyline(&[corner(0.0), corner(WING_ANGLE), corner(-WING_ANGLE)], true);
    hull.write(&mut grid, bg.fg(palette.ship).add_modifier(Modifier::BOLD));

    grid.into_iter()
        .map(|row| {
            let spans: Vec<Span<'static>> = row
                .into_iter()
                .map(|(ch, style)| Span::styled(String::from(ch), style))
                .collect();
            Line::from(spans)
        })
        .collect()
}
