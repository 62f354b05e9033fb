//! Game engine logic and state management.
//!
//! This module drives the core data structures through one game:
//!
//! - [`GameConfig`] - Board size and spawn behavior
//! - [`Spawner`] - Random piece selection from an injectable generator
//! - [`GameState`] - The state machine: gravity ticks and player actions
//! - [`GameStats`] - Score and per-action / per-clear counters
//! - [`Observation`] - Two-layer numeric encoding for learning agents
//! - [`Placement`] - Decoded "rotate, shift, drop" actions
//!
//! # Game Flow
//!
//! 1. Create a [`GameState`] with [`GameState::new_game`] or [`GameState::with_seed`]
//! 2. Between ticks, issue actions (move, rotate, soft drop, hard drop)
//! 3. Call [`GameState::tick`] at the driver's cadence; a resting piece freezes,
//!    full rows clear and the queued piece is staged
//! 4. Repeat until staging fails and the status becomes terminated
//!
//! # Example
//!
//! ```
//! use blockfall_engine::{GameConfig, GameState, MoveDirection, PieceSeed};
//!
//! let seed: PieceSeed = "000102030405060708090a0b0c0d0e0f".parse().unwrap();
//! let mut state = GameState::with_seed(GameConfig::default(), seed).unwrap();
//!
//! state.apply_move(MoveDirection::Left);
//! state.apply_rotate();
//! state.apply_hard_drop();
//! state.tick();
//!
//! assert_eq!(state.stats().completed_pieces(), 1);
//! assert!(state.status().is_running());
//! ```

pub use self::{
    game_config::*, game_state::*, game_stats::*, observation::*, piece_seed::*, placement::*,
    spawner::*,
};

mod game_config;
mod game_state;
mod game_stats;
mod observation;
mod piece_seed;
mod placement;
mod spawner;
