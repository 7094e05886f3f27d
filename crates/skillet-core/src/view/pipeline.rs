//! Derivation of the visible list from the cached page.
//!
//! The stages run in a fixed order: text search, difficulty filter, tag
//! filter, then sort. Filters only ever narrow the set, and the sort is
//! applied last over whatever survives.

use crate::types::{Difficulty, Recipe};

/// The user-adjustable controls that shape the derived list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Controls {
    /// Case-insensitive needle matched against title, description, and
    /// ingredients. Empty means no filtering.
    pub search: String,
    /// Exact difficulty to keep. `None` means no filtering.
    pub difficulty: Option<Difficulty>,
    /// Case-insensitive substring matched against each tag. Empty means no
    /// filtering.
    pub tag: String,
    pub sort: SortOption,
}

/// Sort applied as the final pipeline stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOption {
    #[default]
    None,
    TitleAsc,
    TitleDesc,
    DiffAsc,
    DiffDesc,
    UpdatedAsc,
    UpdatedDesc,
}

impl SortOption {
    pub const ALL: &'static [SortOption] = &[
        SortOption::None,
        SortOption::TitleAsc,
        SortOption::TitleDesc,
        SortOption::DiffAsc,
        SortOption::DiffDesc,
        SortOption::UpdatedAsc,
        SortOption::UpdatedDesc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::None => "none",
            SortOption::TitleAsc => "title-asc",
            SortOption::TitleDesc => "title-desc",
            SortOption::DiffAsc => "diff-asc",
            SortOption::DiffDesc => "diff-desc",
            SortOption::UpdatedAsc => "updated-asc",
            SortOption::UpdatedDesc => "updated-desc",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "none" => Some(SortOption::None),
            "title-asc" => Some(SortOption::TitleAsc),
            "title-desc" => Some(SortOption::TitleDesc),
            "diff-asc" => Some(SortOption::DiffAsc),
            "diff-desc" => Some(SortOption::DiffDesc),
            "updated-asc" => Some(SortOption::UpdatedAsc),
            "updated-desc" => Some(SortOption::UpdatedDesc),
            _ => None,
        }
    }
}

/// Run the full pipeline over a page of records. The input is never
/// mutated; `SortOption::None` preserves the incoming order.
pub fn derive(recipes: &[Recipe], controls: &Controls) -> Vec<Recipe> {
    let mut out: Vec<Recipe> = recipes
        .iter()
        .filter(|r| matches_search(r, &controls.search))
        .filter(|r| matches_difficulty(r, controls.difficulty))
        .filter(|r| matches_tag(r, &controls.tag))
        .cloned()
        .collect();
    sort_records(&mut out, controls.sort);
    out
}

fn matches_search(recipe: &Recipe, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    recipe.title.to_lowercase().contains(&needle)
        || recipe.description.to_lowercase().contains(&needle)
        || recipe
            .ingredients
            .iter()
            .any(|i| i.to_lowercase().contains(&needle))
}

fn matches_difficulty(recipe: &Recipe, filter: Option<Difficulty>) -> bool {
    filter.map_or(true, |difficulty| recipe.difficulty == difficulty)
}

fn matches_tag(recipe: &Recipe, filter: &str) -> bool {
    if filter.is_empty() {
        return true;
    }
    let needle = filter.to_lowercase();
    recipe.tags.iter().any(|t| t.to_lowercase().contains(&needle))
}

// Difficulty compares by its display string, so ascending runs
// Easy < Hard < Medium. Descending swaps the operands, which keeps ties in
// their incoming order under the stable sort.
fn sort_records(records: &mut [Recipe], sort: SortOption) {
    match sort {
        SortOption::None => {}
        SortOption::TitleAsc => records.sort_by(|a, b| a.title.cmp(&b.title)),
        SortOption::TitleDesc => records.sort_by(|a, b| b.title.cmp(&a.title)),
        SortOption::DiffAsc => {
            records.sort_by(|a, b| a.difficulty.as_str().cmp(b.difficulty.as_str()))
        }
        SortOption::DiffDesc => {
            records.sort_by(|a, b| b.difficulty.as_str().cmp(a.difficulty.as_str()))
        }
        SortOption::UpdatedAsc => records.sort_by(|a, b| a.last_updated.cmp(&b.last_updated)),
        SortOption::UpdatedDesc => records.sort_by(|a, b| b.last_updated.cmp(&a.last_updated)),
    }
}
