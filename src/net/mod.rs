//! Backend communication: the typed REST client and its wire types.

pub mod api;
pub mod types;
