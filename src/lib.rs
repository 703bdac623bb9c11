pub mod cli;
mod config;
pub mod core;
pub mod events;
pub mod host;
mod logging;
pub mod player;
pub mod prelude;
pub mod schedule;
pub mod session;

pub use config::GameConfig;
pub use crate::core::*;
pub use events::{ChannelListener, EventLog, GameEvent, GameListener};
pub use host::{simulate, GameSummary, Host};
pub use logging::init_logging;
pub use player::{Computer, MoveSource, Party, Player, RandomShooter, StdinSource};
pub use schedule::DeferredTask;
pub use session::{check_for_win, Phase, Session, SessionError, Transition};
