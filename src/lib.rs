#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod ai;
mod common;
mod config;
mod game;
mod grid;
mod history;
#[cfg(feature = "std")]
mod logging;
pub mod prelude;

pub use ai::{best_move, evaluate_all, evaluate_move, rank_moves, MoveEfficiency};
pub use common::*;
pub use config::*;
pub use game::*;
pub use grid::*;
pub use history::*;
#[cfg(feature = "std")]
pub use logging::init_logging;
