//! Typed game events and the listeners that receive them.

use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use tokio::sync::mpsc::UnboundedSender;

use crate::core::{Coordinate, HitOutcome};
use crate::player::Party;

/// Notifications emitted by a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum GameEvent {
    /// It is now `Party`'s turn.
    TurnChanged(Party),
    /// A shot was resolved on `target`'s board.
    CellHit {
        target: Party,
        coordinate: Coordinate,
        outcome: HitOutcome,
        /// Every cell of the sunk ship when `outcome` is `Sunk`, else empty.
        sunk_cells: Vec<Coordinate>,
    },
    /// The game is over.
    GameEnded { winner: Party, loser: Party },
}

/// Receiver of [`GameEvent`]s.
pub trait GameListener: Send {
    fn on_event(&mut self, event: &GameEvent);
}

impl<F> GameListener for F
where
    F: FnMut(&GameEvent) + Send,
{
    fn on_event(&mut self, event: &GameEvent) {
        self(event)
    }
}

/// Forwards events into a tokio channel.
pub struct ChannelListener(pub UnboundedSender<GameEvent>);

impl GameListener for ChannelListener {
    fn on_event(&mut self, event: &GameEvent) {
        if self.0.send(event.clone()).is_err() {
            log::debug!("event receiver dropped, discarding {:?}", event);
        }
    }
}

/// Shared, append-only record of events. Clones see the same log.
#[derive(Debug, Clone, Default)]
pub struct EventLog(Arc<Mutex<Vec<GameEvent>>>);

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events recorded so far.
    pub fn events(&self) -> Vec<GameEvent> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of `CellHit` events on `target`'s board.
    pub fn shots_at(&self, target: Party) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, GameEvent::CellHit { target: t, .. } if *t == target))
            .count()
    }
}

impl GameListener for EventLog {
    fn on_event(&mut self, event: &GameEvent) {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
    }
}
