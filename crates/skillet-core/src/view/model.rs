use std::sync::Arc;

use chrono::Utc;

use crate::error::StoreError;
use crate::store::{ListQuery, RecipeStore};
use crate::types::{Difficulty, Recipe, RecipeData, RecipeForm};
use crate::view::pipeline::SortOption;
use crate::view::reorder::{self, MovePolicy};
use crate::view::state::{Event, ViewState};

/// Drives the recipe list: owns the current [`ViewState`] and a store
/// handle, and turns user intents into events and store calls.
///
/// Failed store calls are logged and returned to the caller; the state
/// keeps its last good contents, so readers see a stale page rather than a
/// cleared one.
pub struct ListViewModel {
    store: Arc<dyn RecipeStore>,
    state: ViewState,
}

impl ListViewModel {
    pub fn new(store: Arc<dyn RecipeStore>) -> Self {
        Self::with_state(store, ViewState::default())
    }

    /// Start from a prepared state, for callers that set controls before
    /// the first load.
    pub fn with_state(store: Arc<dyn RecipeStore>, state: ViewState) -> Self {
        Self { store, state }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn visible(&self) -> Vec<Recipe> {
        self.state.visible()
    }

    fn apply(&mut self, event: Event) {
        self.state = self.state.apply(event);
    }

    // Control intents. These stay local: the cached page is re-derived,
    // never refetched.

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.apply(Event::SearchChanged(query.into()));
    }

    pub fn set_difficulty(&mut self, difficulty: Option<Difficulty>) {
        self.apply(Event::DifficultyChanged(difficulty));
    }

    pub fn set_tag_filter(&mut self, tag: impl Into<String>) {
        self.apply(Event::TagFilterChanged(tag.into()));
    }

    pub fn set_sort(&mut self, sort: SortOption) {
        self.apply(Event::SortChanged(sort));
    }

    pub fn toggle_selected(&mut self, id: impl Into<String>) {
        self.apply(Event::SelectionToggled(id.into()));
    }

    pub fn edit_form(&mut self, form: RecipeForm) {
        self.apply(Event::FormChanged(form));
    }

    // Paging and loading.

    /// Jump to a page and reload it.
    pub async fn set_page(&mut self, page: u32) -> Result<(), StoreError> {
        self.apply(Event::PageChanged(page));
        self.refresh().await
    }

    /// Change the page size, snap back to page 1, and reload.
    pub async fn set_page_size(&mut self, page_size: u32) -> Result<(), StoreError> {
        self.apply(Event::PageSizeChanged(page_size));
        self.refresh().await
    }

    /// Load the current page: one read for the total count, one for the
    /// slice. A load that finishes after a newer paging change carries a
    /// stale generation and is discarded by the reducer.
    pub async fn refresh(&mut self) -> Result<(), StoreError> {
        let generation = self.state.generation;
        let query = ListQuery::page(
            self.state.pager.offset(),
            u64::from(self.state.pager.page_size),
        );
        let total = match self.store.count().await {
            Ok(total) => total,
            Err(e) => {
                tracing::error!(error = %e, "count failed, keeping the cached page");
                return Err(e);
            }
        };
        let recipes = match self.store.list(&query).await {
            Ok(recipes) => recipes,
            Err(e) => {
                tracing::error!(error = %e, "page load failed, keeping the cached page");
                return Err(e);
            }
        };
        self.apply(Event::PageLoaded {
            generation,
            total,
            recipes,
        });
        Ok(())
    }

    // Writes.

    /// Create a recipe from the current form draft and append it to the
    /// cache. On failure the draft is kept so nothing typed is lost.
    ///
    /// The new record's order is the current count plus one. The count and
    /// insert are separate calls, so two concurrent writers can mint the
    /// same order.
    pub async fn create(&mut self) -> Result<Recipe, StoreError> {
        let total = match self.store.count().await {
            Ok(total) => total,
            Err(e) => {
                tracing::error!(error = %e, "count failed, keeping the draft");
                return Err(e);
            }
        };
        let data = self.state.form.to_insert(total as i64 + 1, Utc::now());
        match self.store.insert(&data).await {
            Ok(recipe) => {
                tracing::info!(id = %recipe.id, title = %recipe.title, "created recipe");
                self.apply(Event::Created(recipe.clone()));
                Ok(recipe)
            }
            Err(e) => {
                tracing::error!(error = %e, "create failed, keeping the draft");
                Err(e)
            }
        }
    }

    /// Save every field of an existing record and swap the result into the
    /// cache. Build the payload with [`RecipeForm::to_update`] so the
    /// timestamp reflects the save.
    pub async fn update(&mut self, id: &str, data: RecipeData) -> Result<Recipe, StoreError> {
        match self.store.update(id, &data).await {
            Ok(recipe) => {
                tracing::info!(id = %recipe.id, "updated recipe");
                self.apply(Event::Updated(recipe.clone()));
                Ok(recipe)
            }
            Err(e) => {
                tracing::error!(id = %id, error = %e, "update failed");
                Err(e)
            }
        }
    }

    /// Delete a record and drop it from the cache and the selection.
    pub async fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        match self.store.delete(id).await {
            Ok(()) => {
                tracing::info!(id = %id, "deleted recipe");
                self.apply(Event::Deleted(id.to_string()));
                Ok(())
            }
            Err(e) => {
                tracing::error!(id = %id, error = %e, "delete failed");
                Err(e)
            }
        }
    }

    /// Move a record within the cached page and persist the new numbering.
    ///
    /// The page is rearranged locally first, then each changed record's
    /// order is written one at a time. If any write fails the local page
    /// snaps back to the pre-move snapshot; records already written keep
    /// their new order on the service.
    pub async fn move_recipe(
        &mut self,
        from: usize,
        to: usize,
        policy: MovePolicy,
    ) -> Result<(), StoreError> {
        let before = self.state.recipes.clone();
        let mut page = before.clone();
        if !reorder::apply_move(&mut page, from, to, policy) {
            return Ok(());
        }
        reorder::renumber(&mut page, self.state.pager.offset());
        let changes = reorder::changed_orders(&before, &page);
        self.apply(Event::PageReordered(page));
        for (id, order) in &changes {
            if let Err(e) = self.store.set_order(id, *order).await {
                tracing::error!(id = %id, error = %e, "reorder write failed, rolling back the page");
                self.apply(Event::PageReordered(before));
                return Err(e);
            }
        }
        Ok(())
    }

    /// Mailto link for the current selection, or `None` when nothing is
    /// selected.
    pub fn share_link(&self) -> Option<String> {
        let selected = self.state.selected_recipes();
        if selected.is_empty() {
            return None;
        }
        Some(crate::share::mailto_link(&selected))
    }
}
