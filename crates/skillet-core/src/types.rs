use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Difficulty rating carried by every recipe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: &'static [Difficulty] = &[Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

// The wire value is the capitalized variant name, but rows written by hand
// show up in any casing.
impl<'de> Deserialize<'de> for Difficulty {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Difficulty::from_str(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown difficulty: {raw}")))
    }
}

/// A recipe record as the data service returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Opaque service-assigned id. Some backends hand out numbers, some
    /// strings; both decode to a string here.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub steps: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub difficulty: Difficulty,
    pub last_updated: DateTime<Utc>,
    /// Manual position in the collection, 1-based.
    #[serde(default)]
    pub order: i64,
}

impl Recipe {
    pub fn from_data(id: impl Into<String>, data: RecipeData) -> Self {
        Self {
            id: id.into(),
            title: data.title,
            description: data.description,
            ingredients: data.ingredients,
            steps: data.steps,
            tags: data.tags,
            difficulty: data.difficulty,
            last_updated: data.last_updated,
            order: data.order,
        }
    }

    pub fn data(&self) -> RecipeData {
        RecipeData {
            title: self.title.clone(),
            description: self.description.clone(),
            ingredients: self.ingredients.clone(),
            steps: self.steps.clone(),
            tags: self.tags.clone(),
            difficulty: self.difficulty,
            last_updated: self.last_updated,
            order: self.order,
        }
    }
}

/// Every recipe field except the id. This is what create and update send;
/// the service owns id assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeData {
    pub title: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    pub tags: Vec<String>,
    pub difficulty: Difficulty,
    pub last_updated: DateTime<Utc>,
    pub order: i64,
}

/// Draft state behind the recipe form. List fields hold raw comma-separated
/// text exactly as typed; nothing is validated here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeForm {
    pub title: String,
    pub description: String,
    pub ingredients: String,
    pub steps: String,
    pub tags: String,
    pub difficulty: Difficulty,
}

impl RecipeForm {
    /// Prefill the form from an existing record, joining list fields back
    /// into comma-separated text.
    pub fn from_recipe(recipe: &Recipe) -> Self {
        Self {
            title: recipe.title.clone(),
            description: recipe.description.clone(),
            ingredients: recipe.ingredients.join(", "),
            steps: recipe.steps.join(", "),
            tags: recipe.tags.join(", "),
            difficulty: recipe.difficulty,
        }
    }

    /// Build the insert payload. List fields are split on commas, trimmed,
    /// and empty segments dropped.
    pub fn to_insert(&self, order: i64, now: DateTime<Utc>) -> RecipeData {
        RecipeData {
            title: self.title.clone(),
            description: self.description.clone(),
            ingredients: split_list(&self.ingredients),
            steps: split_list(&self.steps),
            tags: split_list(&self.tags),
            difficulty: self.difficulty,
            last_updated: now,
            order,
        }
    }

    /// Build the full-record save payload for an existing record. List
    /// fields are split and trimmed but empty segments are kept, unlike the
    /// create path.
    pub fn to_update(&self, existing: &Recipe, now: DateTime<Utc>) -> RecipeData {
        RecipeData {
            title: self.title.clone(),
            description: self.description.clone(),
            ingredients: split_list_keeping_empties(&self.ingredients),
            steps: split_list_keeping_empties(&self.steps),
            tags: split_list_keeping_empties(&self.tags),
            difficulty: self.difficulty,
            last_updated: now,
            order: existing.order,
        }
    }
}

/// Split comma-separated form text into trimmed segments, dropping empties.
pub fn split_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|segment| segment.trim().to_string())
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// Split comma-separated form text into trimmed segments, keeping empties.
/// Splitting an empty string yields one empty segment.
pub fn split_list_keeping_empties(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|segment| segment.trim().to_string())
        .collect()
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_recipe() -> Recipe {
        Recipe {
            id: "r1".to_string(),
            title: "Apple Pie".to_string(),
            description: "Classic dessert".to_string(),
            ingredients: vec!["Apples".to_string(), "Flour".to_string()],
            steps: vec!["Mix".to_string(), "Bake".to_string()],
            tags: vec!["dessert".to_string()],
            difficulty: Difficulty::Medium,
            last_updated: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            order: 1,
        }
    }

    #[test]
    fn test_split_list_trims_and_drops_empties() {
        assert_eq!(split_list("Egg, Flour ,Milk"), vec!["Egg", "Flour", "Milk"]);
        assert_eq!(split_list("Egg,, ,Milk"), vec!["Egg", "Milk"]);
        assert_eq!(split_list(""), Vec::<String>::new());
    }

    #[test]
    fn test_split_list_keeping_empties_trims_only() {
        assert_eq!(
            split_list_keeping_empties("Egg,, Milk "),
            vec!["Egg", "", "Milk"]
        );
        assert_eq!(split_list_keeping_empties(""), vec![""]);
    }

    #[test]
    fn test_difficulty_from_str_ignores_case() {
        assert_eq!(Difficulty::from_str("easy"), Some(Difficulty::Easy));
        assert_eq!(Difficulty::from_str("MEDIUM"), Some(Difficulty::Medium));
        assert_eq!(Difficulty::from_str("Hard"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_str("brutal"), None);
    }

    #[test]
    fn test_difficulty_round_trips_through_as_str() {
        for difficulty in Difficulty::ALL {
            assert_eq!(Difficulty::from_str(difficulty.as_str()), Some(*difficulty));
        }
    }

    #[test]
    fn test_recipe_decodes_camel_case_wire_format() {
        let body = r#"{
            "id": "abc",
            "title": "Toast",
            "description": "Bread, but better",
            "ingredients": ["Bread"],
            "steps": ["Toast it"],
            "tags": ["breakfast"],
            "difficulty": "easy",
            "lastUpdated": "2024-05-01T12:00:00Z",
            "order": 3
        }"#;
        let recipe: Recipe = serde_json::from_str(body).unwrap();
        assert_eq!(recipe.id, "abc");
        assert_eq!(recipe.difficulty, Difficulty::Easy);
        assert_eq!(recipe.order, 3);
        assert_eq!(
            recipe.last_updated,
            Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_recipe_decodes_numeric_id_and_missing_fields() {
        let body = r#"{
            "id": 7,
            "title": "Toast",
            "difficulty": "Easy",
            "lastUpdated": "2024-05-01T12:00:00Z"
        }"#;
        let recipe: Recipe = serde_json::from_str(body).unwrap();
        assert_eq!(recipe.id, "7");
        assert_eq!(recipe.description, "");
        assert!(recipe.ingredients.is_empty());
        assert!(recipe.tags.is_empty());
        assert_eq!(recipe.order, 0);
    }

    #[test]
    fn test_recipe_rejects_unknown_difficulty() {
        let body = r#"{
            "id": "x",
            "title": "Toast",
            "difficulty": "impossible",
            "lastUpdated": "2024-05-01T12:00:00Z"
        }"#;
        assert!(serde_json::from_str::<Recipe>(body).is_err());
    }

    #[test]
    fn test_recipe_serializes_camel_case() {
        let value = serde_json::to_value(sample_recipe()).unwrap();
        assert_eq!(value["lastUpdated"], "2024-05-01T12:00:00Z");
        assert_eq!(value["difficulty"], "Medium");
        assert!(value.get("last_updated").is_none());
    }

    #[test]
    fn test_form_to_insert_splits_and_stamps() {
        let form = RecipeForm {
            title: "Pancakes".to_string(),
            description: "Weekend staple".to_string(),
            ingredients: "Egg, Flour ,Milk".to_string(),
            steps: "Mix, Fry".to_string(),
            tags: "breakfast,".to_string(),
            difficulty: Difficulty::Easy,
        };
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap();
        let data = form.to_insert(4, now);
        assert_eq!(data.ingredients, vec!["Egg", "Flour", "Milk"]);
        assert_eq!(data.tags, vec!["breakfast"]);
        assert_eq!(data.order, 4);
        assert_eq!(data.last_updated, now);
    }

    #[test]
    fn test_form_to_update_keeps_empty_segments_and_order() {
        let existing = sample_recipe();
        let mut form = RecipeForm::from_recipe(&existing);
        form.ingredients = "Apples,, Sugar".to_string();
        let now = Utc.with_ymd_and_hms(2024, 6, 2, 9, 0, 0).unwrap();
        let data = form.to_update(&existing, now);
        assert_eq!(data.ingredients, vec!["Apples", "", "Sugar"]);
        assert_eq!(data.order, existing.order);
        assert_eq!(data.last_updated, now);
    }

    #[test]
    fn test_form_from_recipe_joins_lists() {
        let form = RecipeForm::from_recipe(&sample_recipe());
        assert_eq!(form.ingredients, "Apples, Flour");
        assert_eq!(form.difficulty, Difficulty::Medium);
    }
}
