use super::asteroid::AsteroidSet;
use super::ship::Ship;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CollisionReport {
    pub pruned: usize,
    pub hits: usize,
    pub ship_destroyed: bool,
}

/// Move every asteroid one step, prune the ones that left the field and
/// resolve hits against the ship.
///
/// Pruning is checked first, so an asteroid can never both leave the
/// field and cost a life in the same step. Each hit removes its asteroid
/// immediately. The pass stops once the last life is gone.
pub fn step_asteroids(
    ship: &mut Ship,
    asteroids: &mut AsteroidSet,
    width: f32,
    height: f32,
) -> CollisionReport {
    let mut report = CollisionReport::default();
    let mut i = 0;
    while let Some(asteroid) = asteroids.get_mut(i) {
        asteroid.advance();
        if asteroid.is_offscreen(width, height) {
            asteroids.swap_remove(i);
            report.pruned += 1;
            continue;
        }
        if ship.collides_with(asteroid) {
            asteroids.swap_remove(i);
            report.hits += 1;
            if ship.lose_life() {
                report.ship_destroyed = true;
                break;
            }
            continue;
        }
        i += 1;
    }
    report
}
