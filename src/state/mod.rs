//! Client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by screen (`players`, `team`, `leaderboard`, ...) so a
//! renderer can depend on small focused models. Every view follows the same
//! cycle: fetch through the API client, keep the data locally, re-derive
//! filtered/sorted/paginated projections from that local copy, and re-fetch
//! after a mutation instead of patching in place.
//!
//! All views are owned and mutated through `&mut self` by a single task;
//! nothing here is shared across threads.

pub mod admin;
pub mod forms;
pub mod leaderboard;
pub mod pagination;
pub mod players;
pub mod roster_picker;
pub mod scores;
pub mod session;
pub mod team;

use crate::net::api::ApiError;
use forms::ValidationError;

/// Failure of a view action.
#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    /// Input rejected before any network call.
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("you do not have a team yet")]
    NoTeam,

    #[error("administrator rights required")]
    NotAdmin,

    #[error("sign in first")]
    NotSignedIn,
}
