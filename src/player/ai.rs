use std::time::Duration;

use rand::{rngs::SmallRng, Rng, SeedableRng};

use crate::{
    config::GameConfig,
    core::{Coordinate, Gameboard, ShotGrid, BOARD_SIZE},
};

use super::MoveSource;

/// Draw random cells until one is not hit; `None` once every cell is hit.
fn pick_unhit<R, F>(rng: &mut R, is_hit: F) -> Option<Coordinate>
where
    R: Rng + ?Sized,
    F: Fn(Coordinate) -> bool,
{
    let size = BOARD_SIZE as i32;
    if (0..size)
        .flat_map(|y| (0..size).map(move |x| Coordinate::new(x, y)))
        .all(&is_hit)
    {
        return None;
    }
    loop {
        let target = Coordinate::new(rng.random_range(0..size), rng.random_range(0..size));
        if !is_hit(target) {
            return Some(target);
        }
    }
}

/// The computer opponent's targeting: uniformly random over unhit cells.
#[derive(Debug, Clone, Copy, Default)]
pub struct Computer;

impl Computer {
    /// Pick a random cell of `board` that has not been hit yet.
    pub fn choose_next_move<R: Rng + ?Sized>(board: &Gameboard, rng: &mut R) -> Option<Coordinate> {
        pick_unhit(rng, |c| board.is_hit(c))
    }

    /// Thinking time before a move, uniform in `[min_delay, max_delay)`.
    pub fn think_delay<R: Rng + ?Sized>(rng: &mut R, config: &GameConfig) -> Duration {
        if config.max_delay <= config.min_delay {
            return config.min_delay;
        }
        rng.random_range(config.min_delay..config.max_delay)
    }
}

/// Stand-in for a human that fires at random unhit cells.
#[derive(Debug)]
pub struct RandomShooter {
    rng: SmallRng,
}

impl RandomShooter {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

#[async_trait::async_trait]
impl MoveSource for RandomShooter {
    async fn next_target(&mut self, shots: &ShotGrid) -> anyhow::Result<Option<Coordinate>> {
        Ok(pick_unhit(&mut self.rng, |c| shots[c.y as usize][c.x as usize]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_the_only_unhit_cell() {
        let mut board = Gameboard::new();
        for y in 0..BOARD_SIZE as i32 {
            for x in 1..BOARD_SIZE as i32 {
                board.receive_hit(Coordinate::new(x, y)).unwrap();
            }
        }
        let mut rng = SmallRng::seed_from_u64(11);
        for _ in 0..20 {
            let target = Computer::choose_next_move(&board, &mut rng).unwrap();
            assert_eq!(target.x, 0);
            assert!(!board.is_hit(target));
        }
    }

    #[test]
    fn full_board_has_no_move() {
        let mut board = Gameboard::new();
        for y in 0..BOARD_SIZE as i32 {
            for x in 0..BOARD_SIZE as i32 {
                board.receive_hit(Coordinate::new(x, y)).unwrap();
            }
        }
        let mut rng = SmallRng::seed_from_u64(11);
        assert_eq!(Computer::choose_next_move(&board, &mut rng), None);
    }

    #[test]
    fn think_delay_stays_in_range() {
        let mut rng = SmallRng::seed_from_u64(5);
        let config = GameConfig::default();
        for _ in 0..100 {
            let d = Computer::think_delay(&mut rng, &config);
            assert!(d >= config.min_delay && d < config.max_delay);
        }
        assert_eq!(
            Computer::think_delay(&mut rng, &GameConfig::instant()),
            Duration::ZERO
        );
    }

    #[tokio::test]
    async fn random_shooter_avoids_shot_cells() {
        let mut shots = [[true; BOARD_SIZE]; BOARD_SIZE];
        shots[7][2] = false;
        let mut shooter = RandomShooter::new(9);
        let target = shooter.next_target(&shots).await.unwrap();
        assert_eq!(target, Some(Coordinate::new(2, 7)));
    }
}
