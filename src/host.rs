//! Async driver around a [`Session`].
//!
//! The host shares the session behind a mutex so the computer's delayed move
//! can run as a [`DeferredTask`]. The lock is never held across an await and
//! at most one computer move is pending at a time.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{info, warn};
use serde::Serialize;

use crate::{
    config::GameConfig,
    core::Coordinate,
    events::EventLog,
    player::{MoveSource, Party, RandomShooter},
    schedule::DeferredTask,
    session::{Phase, Session, SessionError, Transition},
};

fn lock(session: &Mutex<Session>) -> MutexGuard<'_, Session> {
    session.lock().unwrap_or_else(PoisonError::into_inner)
}

pub struct Host {
    session: Arc<Mutex<Session>>,
    pending: Option<DeferredTask>,
}

impl Host {
    pub fn new(session: Session) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
            pending: None,
        }
    }

    /// Read access to the session.
    pub fn with_session<T>(&self, f: impl FnOnce(&Session) -> T) -> T {
        f(&lock(&self.session))
    }

    /// Write access to the session, e.g. to re-roll ships before a game.
    pub fn with_session_mut<T>(&self, f: impl FnOnce(&mut Session) -> T) -> T {
        f(&mut lock(&self.session))
    }

    /// Start a game. A running game is left alone, pending move included.
    pub fn start_game(&mut self) -> Result<(), SessionError> {
        if self.with_session(Session::game_started) {
            return Err(SessionError::AlreadyStarted);
        }
        self.shutdown();
        lock(&self.session).start_game()
    }

    /// Apply a human move. When the turn passes to the computer its move is
    /// scheduled after the configured thinking delay.
    pub fn player_move(&mut self, target: Coordinate) -> Result<Transition, SessionError> {
        let transition = lock(&self.session).player_move(target)?;
        self.follow_up(transition);
        Ok(transition)
    }

    /// End the current party's move without a shot, scheduling the
    /// computer's move if the turn passes to it.
    pub fn end_of_move(&mut self) -> Result<Transition, SessionError> {
        let transition = lock(&self.session).end_of_move()?;
        self.follow_up(transition);
        Ok(transition)
    }

    fn follow_up(&mut self, transition: Transition) {
        // a move still queued belongs to a turn that is over
        self.shutdown();
        if transition == Transition::Turn(Party::Computer) {
            self.schedule_computer_move();
        }
    }

    fn schedule_computer_move(&mut self) {
        let delay = lock(&self.session).think_delay();
        let session = Arc::clone(&self.session);
        self.pending = Some(DeferredTask::schedule(delay, move || {
            if let Err(e) = lock(&session).computer_move() {
                warn!("computer move failed: {}", e);
            }
        }));
    }

    pub fn has_pending_move(&self) -> bool {
        self.pending.as_ref().is_some_and(DeferredTask::is_pending)
    }

    /// Wait for a scheduled computer move to settle.
    pub async fn wait_idle(&mut self) {
        if let Some(task) = self.pending.take() {
            task.join().await;
        }
    }

    /// Cancel a pending computer move. Returns `true` if one was cancelled.
    pub fn shutdown(&mut self) -> bool {
        self.pending.take().is_some_and(|task| task.cancel())
    }

    /// Start a game and play it out, taking the human's moves from `source`.
    ///
    /// Returns the winner, or `None` if the source gave up.
    pub async fn run<S: MoveSource + ?Sized>(
        &mut self,
        source: &mut S,
    ) -> anyhow::Result<Option<Party>> {
        self.start_game()?;
        loop {
            let (phase, shots) =
                self.with_session(|s| (s.phase(), s.computer().gameboard().shot_grid()));
            match phase {
                Phase::PlayerTurn => {
                    let Some(target) = source.next_target(&shots).await? else {
                        info!("player left the game");
                        self.shutdown();
                        return Ok(None);
                    };
                    match self.player_move(target) {
                        Ok(_) => {}
                        Err(e @ (SessionError::CellAlreadyHit(_) | SessionError::Hit(_))) => {
                            warn!("rejected move {}: {}", target, e);
                        }
                        Err(e) => return Err(e.into()),
                    }
                }
                Phase::ComputerTurn => {
                    if self.pending.is_none() {
                        anyhow::bail!("computer's turn without a scheduled move");
                    }
                    self.wait_idle().await;
                }
                Phase::GameOver => return Ok(self.with_session(Session::winner)),
                Phase::NotStarted => anyhow::bail!("game stopped unexpectedly"),
            }
        }
    }
}

impl Drop for Host {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Outcome of one simulated game.
#[derive(Debug, Clone, Serialize)]
pub struct GameSummary {
    pub seed: u64,
    pub winner: Option<Party>,
    pub player_shots: usize,
    pub computer_shots: usize,
}

/// Play one game with a random shooter in the human's seat.
pub async fn simulate(seed: u64) -> anyhow::Result<GameSummary> {
    let mut session = Session::new(GameConfig::instant().with_seed(seed))?;
    let log = EventLog::new();
    session.subscribe(log.clone());
    let mut host = Host::new(session);
    let mut shooter = RandomShooter::new(seed.wrapping_add(1));
    let winner = host.run(&mut shooter).await?;
    Ok(GameSummary {
        seed,
        winner,
        player_shots: log.shots_at(Party::Computer),
        computer_shots: log.shots_at(Party::Player),
    })
}
