//! Commonly used types and utilities for ease of import.

pub use crate::{
    Coordinate, GameConfig, GameEvent, GameListener, Gameboard, HitOutcome, Host, MoveSource,
    Party, Phase, Session, SessionError, Transition,
};
