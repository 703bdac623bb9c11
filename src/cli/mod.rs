//! Command-line front-end: coordinate parsing, board rendering and a
//! narrating event listener. The game core never depends on this module.

pub mod interface;

// Re-export interface functions
pub use interface::*;
