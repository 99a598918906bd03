//! # Connect Four
//!
//! Rules engine for Connect Four: a 7x6 grid, two players taking turns, and
//! detection of four in a row along rows, columns and both diagonals.
//!
//! ## Modules
//!
//! - [`game`] — Core game logic: board, player, game state
//! - [`session`] — Turn policy for front ends: insert, check win, rotate
//! - [`save`] — JSON snapshots of a game in progress
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod config;
pub mod error;
pub mod game;
pub mod save;
pub mod session;
