pub mod contact;
pub mod error;
pub mod share;
pub mod store;
pub mod types;
pub mod view;

pub use contact::{ContactClient, ContactMessage, ContactStatus};
pub use error::StoreError;
pub use store::{
    Backend, ConfigError, Direction, ListQuery, MemoryStore, RecipeStore, RestStore, SortField,
    StoreConfig, TableStore,
};
pub use types::{Difficulty, Recipe, RecipeData, RecipeForm};
pub use view::{
    Controls, Event, ListViewModel, MovePolicy, Pager, SortOption, ViewState, DEFAULT_PAGE_SIZE,
};
