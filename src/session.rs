//! The game session: turn order, win detection and event fan-out.
//!
//! A [`Session`] owns both players and is the single authority on whose turn
//! it is. Turn state changes only through [`Session::start_game`] and
//! [`Session::end_of_move`]; everything else resolves shots and asks those
//! two to move the game on.

use std::time::Duration;

use log::{debug, info};
use rand::{rngs::SmallRng, SeedableRng};
use serde::Serialize;
use thiserror::Error;

use crate::{
    config::GameConfig,
    core::{BoardError, Coordinate, HitError, HitOutcome},
    events::{GameEvent, GameListener},
    player::{Computer, Party, Player},
};

/// Where the game currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    NotStarted,
    PlayerTurn,
    ComputerTurn,
    GameOver,
}

/// What [`Session::end_of_move`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The turn passed to this party.
    Turn(Party),
    /// The mover won.
    GameOver { winner: Party },
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    #[error("no game is running")]
    NotStarted,
    #[error("a game is already running")]
    AlreadyStarted,
    #[error("it is not {0:?}'s turn")]
    NotYourTurn(Party),
    #[error("cell {0} was already fired at")]
    CellAlreadyHit(Coordinate),
    #[error("the player's fleet is not placed")]
    ShipsNotPlaced,
    #[error("no unhit cells left to target")]
    NoMovesLeft,
    #[error(transparent)]
    Hit(#[from] HitError),
    #[error(transparent)]
    Board(#[from] BoardError),
}

/// True iff the party opposing `mover` has lost every ship.
pub fn check_for_win(mover: Party, player: &Player, computer: &Player) -> bool {
    let other = match mover.other() {
        Party::Player => player,
        Party::Computer => computer,
    };
    other.gameboard().all_sunk()
}

/// A single human-versus-computer game and its listeners.
pub struct Session {
    player: Player,
    computer: Player,
    current_player: Option<Party>,
    phase: Phase,
    config: GameConfig,
    rng: SmallRng,
    listeners: Vec<Box<dyn GameListener>>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("phase", &self.phase)
            .field("current_player", &self.current_player)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Create a session with both fleets placed at random.
    pub fn new(config: GameConfig) -> Result<Self, SessionError> {
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_rng(&mut rand::rng()),
        };
        let mut session = Self {
            player: Player::human(),
            computer: Player::computer(),
            current_player: None,
            phase: Phase::NotStarted,
            config,
            rng,
            listeners: Vec::new(),
        };
        session.randomize_ships(Party::Player)?;
        session.randomize_ships(Party::Computer)?;
        Ok(session)
    }

    /// Register a listener for all future events.
    pub fn subscribe<L: GameListener + 'static>(&mut self, listener: L) {
        self.listeners.push(Box::new(listener));
    }

    fn emit(&mut self, event: GameEvent) {
        debug!("event: {:?}", event);
        for listener in self.listeners.iter_mut() {
            listener.on_event(&event);
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn computer(&self) -> &Player {
        &self.computer
    }

    pub fn party(&self, party: Party) -> &Player {
        match party {
            Party::Player => &self.player,
            Party::Computer => &self.computer,
        }
    }

    /// Direct access to a side's board, e.g. for arranging a position.
    /// Turn state is not affected.
    pub fn party_mut(&mut self, party: Party) -> &mut Player {
        match party {
            Party::Player => &mut self.player,
            Party::Computer => &mut self.computer,
        }
    }

    pub fn current_player(&self) -> Option<Party> {
        self.current_player
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn game_started(&self) -> bool {
        matches!(self.phase, Phase::PlayerTurn | Phase::ComputerTurn)
    }

    /// The winner once the game is over.
    pub fn winner(&self) -> Option<Party> {
        match self.phase {
            Phase::GameOver => self.current_player,
            _ => None,
        }
    }

    pub fn check_for_win(&self, mover: Party) -> bool {
        check_for_win(mover, &self.player, &self.computer)
    }

    /// Clear `party`'s board. Does nothing while a game is running.
    pub fn clear(&mut self, party: Party) -> bool {
        if self.game_started() {
            return false;
        }
        self.party_mut(party).gameboard_mut().clear();
        true
    }

    /// Clear `party`'s board and place a fresh random fleet. Does nothing
    /// while a game is running.
    pub fn randomize_ships(&mut self, party: Party) -> Result<bool, SessionError> {
        if !self.clear(party) {
            return Ok(false);
        }
        let attempts = self.config.max_placement_attempts;
        let board = match party {
            Party::Player => self.player.gameboard_mut(),
            Party::Computer => self.computer.gameboard_mut(),
        };
        board.place_ships_randomly(&mut self.rng, attempts)?;
        Ok(true)
    }

    /// Begin a game with the human moving first.
    ///
    /// The computer gets a new fleet; the human keeps theirs but loses any
    /// damage from a previous game.
    pub fn start_game(&mut self) -> Result<(), SessionError> {
        if self.game_started() {
            return Err(SessionError::AlreadyStarted);
        }
        if !self.player.gameboard().is_fleet_placed() {
            return Err(SessionError::ShipsNotPlaced);
        }
        self.randomize_ships(Party::Computer)?;
        self.player.gameboard_mut().clear_hits();
        self.phase = Phase::PlayerTurn;
        self.current_player = Some(Party::Player);
        info!("game started");
        self.emit(GameEvent::TurnChanged(Party::Player));
        Ok(())
    }

    /// Finish the current party's move: end the game if they won, otherwise
    /// hand the turn to the other side.
    pub fn end_of_move(&mut self) -> Result<Transition, SessionError> {
        let mover = match (self.game_started(), self.current_player) {
            (true, Some(mover)) => mover,
            _ => return Err(SessionError::NotStarted),
        };
        if self.check_for_win(mover) {
            self.phase = Phase::GameOver;
            info!("game over, {:?} won", mover);
            self.emit(GameEvent::GameEnded {
                winner: mover,
                loser: mover.other(),
            });
            return Ok(Transition::GameOver { winner: mover });
        }
        let next = mover.other();
        self.current_player = Some(next);
        self.phase = match next {
            Party::Player => Phase::PlayerTurn,
            Party::Computer => Phase::ComputerTurn,
        };
        self.emit(GameEvent::TurnChanged(next));
        Ok(Transition::Turn(next))
    }

    fn ensure_turn(&self, party: Party) -> Result<(), SessionError> {
        if !self.game_started() {
            return Err(SessionError::NotStarted);
        }
        if self.current_player != Some(party) {
            return Err(SessionError::NotYourTurn(party));
        }
        Ok(())
    }

    /// Shoot at `target`'s board and report it to listeners.
    fn resolve_shot(
        &mut self,
        target: Party,
        coordinate: Coordinate,
    ) -> Result<HitOutcome, SessionError> {
        let board = self.party_mut(target).gameboard_mut();
        let outcome = board.receive_hit(coordinate)?;
        let sunk_cells = match outcome {
            HitOutcome::Sunk => board.ship_cells_of(coordinate).unwrap_or_default(),
            _ => Vec::new(),
        };
        debug!("shot at {:?} {}: {:?}", target, coordinate, outcome);
        self.emit(GameEvent::CellHit {
            target,
            coordinate,
            outcome,
            sunk_cells,
        });
        Ok(outcome)
    }

    /// The human fires at the computer's board.
    pub fn player_move(&mut self, coordinate: Coordinate) -> Result<Transition, SessionError> {
        self.ensure_turn(Party::Player)?;
        if !coordinate.in_bounds() {
            return Err(HitError::OutOfRange(coordinate).into());
        }
        if self.computer.gameboard().is_hit(coordinate) {
            return Err(SessionError::CellAlreadyHit(coordinate));
        }
        self.resolve_shot(Party::Computer, coordinate)?;
        self.end_of_move()
    }

    /// The computer picks a random unhit cell of the human's board and fires.
    pub fn computer_move(&mut self) -> Result<Transition, SessionError> {
        self.ensure_turn(Party::Computer)?;
        let target = Computer::choose_next_move(self.player.gameboard(), &mut self.rng)
            .ok_or(SessionError::NoMovesLeft)?;
        self.resolve_shot(Party::Player, target)?;
        self.end_of_move()
    }

    /// How long the computer should pretend to think before its next move.
    pub fn think_delay(&mut self) -> Duration {
        Computer::think_delay(&mut self.rng, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Orientation, BOARD_SIZE};
    use crate::events::EventLog;

    fn session() -> Session {
        Session::new(GameConfig::instant().with_seed(42)).unwrap()
    }

    fn sink_fleet(player: &mut Player) {
        let cells: Vec<_> = player
            .gameboard()
            .ships()
            .iter()
            .flat_map(|s| s.cells())
            .collect();
        for c in cells {
            player.gameboard_mut().receive_hit(c).unwrap();
        }
    }

    fn empty_cell(player: &Player) -> Coordinate {
        let board = player.gameboard();
        (0..BOARD_SIZE as i32)
            .flat_map(|y| (0..BOARD_SIZE as i32).map(move |x| Coordinate::new(x, y)))
            .find(|&c| {
                let cell = board.cell(c).unwrap();
                !cell.is_occupied() && !cell.is_hit()
            })
            .unwrap()
    }

    #[test]
    fn new_session_has_both_fleets_and_no_game() {
        let s = session();
        assert!(s.player().gameboard().is_fleet_placed());
        assert!(s.computer().gameboard().is_fleet_placed());
        assert!(s.computer().is_computer());
        assert!(!s.player().is_computer());
        assert_eq!(s.phase(), Phase::NotStarted);
        assert_eq!(s.current_player(), None);
        assert!(!s.game_started());
    }

    #[test]
    fn start_game_gives_player_the_first_turn() {
        let mut s = session();
        let log = EventLog::new();
        s.subscribe(log.clone());
        s.start_game().unwrap();
        assert_eq!(s.current_player(), Some(Party::Player));
        assert!(s.game_started());
        assert_eq!(log.events(), vec![GameEvent::TurnChanged(Party::Player)]);
        assert_eq!(s.start_game(), Err(SessionError::AlreadyStarted));
    }

    #[test]
    fn start_game_requires_player_fleet() {
        let mut s = session();
        assert!(s.clear(Party::Player));
        assert_eq!(s.start_game(), Err(SessionError::ShipsNotPlaced));
    }

    #[test]
    fn end_of_move_before_start_fails() {
        let mut s = session();
        assert_eq!(s.end_of_move(), Err(SessionError::NotStarted));
    }

    #[test]
    fn board_edits_are_locked_during_a_game() {
        let mut s = session();
        s.start_game().unwrap();
        let before = s.player().gameboard().clone();
        assert!(!s.clear(Party::Player));
        assert_eq!(s.randomize_ships(Party::Player), Ok(false));
        assert_eq!(s.player().gameboard(), &before);
    }

    #[test]
    fn turns_alternate_through_end_of_move() {
        let mut s = session();
        let log = EventLog::new();
        s.subscribe(log.clone());
        s.start_game().unwrap();
        let target = empty_cell(s.computer());
        assert_eq!(s.player_move(target), Ok(Transition::Turn(Party::Computer)));
        assert_eq!(s.phase(), Phase::ComputerTurn);
        assert_eq!(
            s.player_move(empty_cell(s.computer())),
            Err(SessionError::NotYourTurn(Party::Player))
        );
        assert_eq!(s.computer_move(), Ok(Transition::Turn(Party::Player)));
        assert_eq!(s.current_player(), Some(Party::Player));
        assert_eq!(log.shots_at(Party::Computer), 1);
        assert_eq!(log.shots_at(Party::Player), 1);
        assert!(matches!(
            log.events()[1],
            GameEvent::CellHit {
                target: Party::Computer,
                outcome: HitOutcome::Miss,
                ..
            }
        ));
    }

    #[test]
    fn player_move_rejects_bad_targets() {
        let mut s = session();
        assert_eq!(
            s.player_move(Coordinate::new(0, 0)),
            Err(SessionError::NotStarted)
        );
        s.start_game().unwrap();
        assert_eq!(
            s.player_move(Coordinate::new(0, 10)),
            Err(SessionError::Hit(HitError::OutOfRange(Coordinate::new(0, 10))))
        );
        let target = empty_cell(s.computer());
        s.party_mut(Party::Computer)
            .gameboard_mut()
            .receive_hit(target)
            .unwrap();
        assert_eq!(
            s.player_move(target),
            Err(SessionError::CellAlreadyHit(target))
        );
        assert_eq!(s.current_player(), Some(Party::Player));
    }

    #[test]
    fn win_depends_only_on_the_other_side() {
        let mut player = Player::human();
        let mut computer = Player::computer();
        let mut rng = SmallRng::seed_from_u64(1);
        player.gameboard_mut().place_ships_randomly(&mut rng, 100).unwrap();
        computer.gameboard_mut().place_ships_randomly(&mut rng, 100).unwrap();

        assert!(!check_for_win(Party::Player, &player, &computer));
        sink_fleet(&mut player);
        assert!(!check_for_win(Party::Player, &player, &computer));
        assert!(check_for_win(Party::Computer, &player, &computer));
        sink_fleet(&mut computer);
        assert!(check_for_win(Party::Player, &player, &computer));
    }

    #[test]
    fn sinking_the_last_ship_ends_the_game() {
        let mut s = session();
        let log = EventLog::new();
        s.subscribe(log.clone());
        s.start_game().unwrap();

        let computer = s.party_mut(Party::Computer).gameboard_mut();
        computer.clear();
        computer
            .place_ship(4, Coordinate::new(2, 2), Orientation::Right)
            .unwrap();
        // the rest of the fleet is already gone
        for (i, (x, y)) in [(0, 5), (0, 6), (0, 7), (0, 8)].into_iter().enumerate() {
            computer
                .place_ship(i, Coordinate::new(x, y), Orientation::Right)
                .unwrap();
        }
        for i in 0..4 {
            for c in computer.ships()[i].cells() {
                computer.receive_hit(c).unwrap();
            }
        }

        let result = s.player_move(Coordinate::new(2, 2));
        assert_eq!(result, Ok(Transition::GameOver { winner: Party::Player }));
        assert_eq!(s.phase(), Phase::GameOver);
        assert!(!s.game_started());
        assert_eq!(s.winner(), Some(Party::Player));
        assert_eq!(
            log.events().last(),
            Some(&GameEvent::GameEnded {
                winner: Party::Player,
                loser: Party::Computer
            })
        );
        assert_eq!(s.end_of_move(), Err(SessionError::NotStarted));
    }

    #[test]
    fn computer_finishes_the_last_ship_cell() {
        let mut s = session();
        let log = EventLog::new();
        s.subscribe(log.clone());
        s.start_game().unwrap();

        // leave one cell of the human's board unhit: a ship cell
        let last = s.player().gameboard().ships()[4].cells()[0];
        let board = s.party_mut(Party::Player).gameboard_mut();
        for y in 0..BOARD_SIZE as i32 {
            for x in 0..BOARD_SIZE as i32 {
                let c = Coordinate::new(x, y);
                if c != last {
                    board.receive_hit(c).unwrap();
                }
            }
        }

        let miss = empty_cell(s.computer());
        assert_eq!(s.player_move(miss), Ok(Transition::Turn(Party::Computer)));
        assert_eq!(
            s.computer_move(),
            Ok(Transition::GameOver { winner: Party::Computer })
        );
        assert!(matches!(
            log.events().last(),
            Some(GameEvent::GameEnded {
                winner: Party::Computer,
                loser: Party::Player
            })
        ));
        let sunk = log.events().into_iter().find_map(|e| match e {
            GameEvent::CellHit {
                target: Party::Player,
                outcome: HitOutcome::Sunk,
                sunk_cells,
                ..
            } => Some(sunk_cells),
            _ => None,
        });
        assert_eq!(sunk, Some(vec![last]));
    }

    #[test]
    fn restart_keeps_player_fleet_but_clears_damage() {
        let mut s = session();
        s.start_game().unwrap();
        let fleet: Vec<_> = s
            .player()
            .gameboard()
            .ships()
            .iter()
            .map(|ship| ship.cells())
            .collect();
        let target = empty_cell(s.computer());
        s.player_move(target).unwrap();
        s.computer_move().unwrap();

        // force an early finish so a new game may start
        sink_fleet(s.party_mut(Party::Computer));
        s.player_move(empty_cell(s.computer())).unwrap();
        assert_eq!(s.phase(), Phase::GameOver);

        s.start_game().unwrap();
        let board = s.player().gameboard();
        assert!(board.shot_grid().iter().flatten().all(|hit| !hit));
        let again: Vec<_> = board.ships().iter().map(|ship| ship.cells()).collect();
        assert_eq!(fleet, again);
        assert!(!s.computer().gameboard().all_sunk());
    }
}
