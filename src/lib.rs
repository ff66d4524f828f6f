//! # courtside
//!
//! Client for the fantasy-basketball backend: session and token lifecycle,
//! a typed REST client, and the view models behind the player browser,
//! team builder, leaderboard and admin screens.
//!
//! The crate is renderer-agnostic. `src/main.rs` drives it from a terminal;
//! a UI layer would hold the same [`state::session::Session`] and views.

pub mod config;
pub mod net;
pub mod state;
pub mod storage;

#[cfg(test)]
pub(crate) mod testing;
