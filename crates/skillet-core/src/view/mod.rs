//! The recipe list view-model.
//!
//! [`ViewState`] is an immutable snapshot of everything the screen shows;
//! [`ViewState::apply`] folds events into the next snapshot. The
//! [`pipeline`] module derives the visible list from the cached page, and
//! [`ListViewModel`] wires the state to a [`crate::store::RecipeStore`]
//! for loads and writes.

mod model;
mod pager;
pub mod pipeline;
pub mod reorder;
mod state;

pub use model::ListViewModel;
pub use pager::{Pager, DEFAULT_PAGE_SIZE};
pub use pipeline::{Controls, SortOption};
pub use reorder::MovePolicy;
pub use state::{Event, ViewState};
