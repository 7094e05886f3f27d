use std::collections::BTreeSet;

use crate::types::{Difficulty, Recipe, RecipeForm};
use crate::view::pager::Pager;
use crate::view::pipeline::{self, Controls, SortOption};

/// Everything the list screen derives from, as one value.
///
/// State never mutates in place: [`ViewState::apply`] folds an [`Event`]
/// into a fresh copy, so two snapshots can always be compared.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    /// The cached page of records, exactly as the service returned it.
    pub recipes: Vec<Recipe>,
    /// Collection size as of the last completed load.
    pub total: u64,
    pub pager: Pager,
    pub controls: Controls,
    /// Ids ticked for sharing.
    pub selection: BTreeSet<String>,
    /// Draft for the next create.
    pub form: RecipeForm,
    /// Incremented on every paging change; a page load carrying a stale
    /// generation is discarded.
    pub generation: u64,
}

/// A single user or network event folded into the view state.
#[derive(Debug, Clone)]
pub enum Event {
    SearchChanged(String),
    DifficultyChanged(Option<Difficulty>),
    TagFilterChanged(String),
    SortChanged(SortOption),
    PageChanged(u32),
    PageSizeChanged(u32),
    SelectionToggled(String),
    FormChanged(RecipeForm),
    PageLoaded {
        generation: u64,
        total: u64,
        recipes: Vec<Recipe>,
    },
    Created(Recipe),
    Updated(Recipe),
    Deleted(String),
    PageReordered(Vec<Recipe>),
}

impl ViewState {
    /// Fold one event into the state, producing the next state.
    #[must_use]
    pub fn apply(&self, event: Event) -> ViewState {
        let mut next = self.clone();
        match event {
            Event::SearchChanged(query) => next.controls.search = query,
            Event::DifficultyChanged(difficulty) => next.controls.difficulty = difficulty,
            Event::TagFilterChanged(tag) => next.controls.tag = tag,
            Event::SortChanged(sort) => next.controls.sort = sort,
            Event::PageChanged(page) => {
                next.pager.set_page(page);
                next.generation += 1;
            }
            Event::PageSizeChanged(size) => {
                next.pager.set_page_size(size);
                next.generation += 1;
            }
            Event::SelectionToggled(id) => {
                if !next.selection.remove(&id) {
                    next.selection.insert(id);
                }
            }
            Event::FormChanged(form) => next.form = form,
            Event::PageLoaded {
                generation,
                total,
                recipes,
            } => {
                if generation == next.generation {
                    next.total = total;
                    next.recipes = recipes;
                }
            }
            Event::Created(recipe) => {
                next.total += 1;
                next.recipes.push(recipe);
                next.form = RecipeForm::default();
            }
            Event::Updated(recipe) => {
                if let Some(slot) = next.recipes.iter_mut().find(|r| r.id == recipe.id) {
                    *slot = recipe;
                }
            }
            Event::Deleted(id) => {
                next.recipes.retain(|r| r.id != id);
                next.selection.remove(&id);
                next.total = next.total.saturating_sub(1);
            }
            Event::PageReordered(recipes) => next.recipes = recipes,
        }
        next
    }

    /// The list as the user sees it: cached page run through search,
    /// filters, and sort.
    pub fn visible(&self) -> Vec<Recipe> {
        pipeline::derive(&self.recipes, &self.controls)
    }

    pub fn total_pages(&self) -> u32 {
        self.pager.total_pages(self.total)
    }

    pub fn can_go_next(&self) -> bool {
        self.pager.has_next(self.total)
    }

    pub fn can_go_prev(&self) -> bool {
        self.pager.has_prev()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selection.contains(id)
    }

    /// Selected records in page order.
    pub fn selected_recipes(&self) -> Vec<Recipe> {
        self.recipes
            .iter()
            .filter(|r| self.selection.contains(&r.id))
            .cloned()
            .collect()
    }
}
