//! Plain-text sharing of selected recipes over a mailto link.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::types::Recipe;

/// Bytes escaped in the mailto body. Everything non-alphanumeric except
/// `- _ . ! ~ * ' ( )`, which mail clients and browsers leave bare; space
/// becomes `%20`, never `+`.
const MAILTO_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// One text block for a recipe: every field on its own labelled line,
/// list fields joined with commas.
pub fn summary(recipe: &Recipe) -> String {
    format!(
        "Title: {}\nDescription: {}\nIngredients: {}\nSteps: {}\nTags: {}\nDifficulty: {}\nLast Updated: {}",
        recipe.title,
        recipe.description,
        recipe.ingredients.join(", "),
        recipe.steps.join(", "),
        recipe.tags.join(", "),
        recipe.difficulty.as_str(),
        recipe.last_updated.to_rfc3339(),
    )
}

/// Compose the mail body for a selection and wrap it in a mailto link.
/// Blocks are joined by blank lines; the link sets only the body, leaving
/// recipient and subject to the mail client.
pub fn mailto_link(recipes: &[Recipe]) -> String {
    let body = recipes
        .iter()
        .map(summary)
        .collect::<Vec<_>>()
        .join("\n\n");
    format!("mailto:?body={}", utf8_percent_encode(&body, MAILTO_SET))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Difficulty;
    use chrono::{TimeZone, Utc};

    fn recipe(title: &str) -> Recipe {
        Recipe {
            id: title.to_lowercase(),
            title: title.to_string(),
            description: "Quick & easy".to_string(),
            ingredients: vec!["Egg".to_string(), "Milk".to_string()],
            steps: vec!["Mix".to_string()],
            tags: vec!["breakfast".to_string()],
            difficulty: Difficulty::Easy,
            last_updated: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            order: 1,
        }
    }

    #[test]
    fn test_summary_labels_every_field() {
        let text = summary(&recipe("Pancakes"));
        assert_eq!(
            text,
            "Title: Pancakes\n\
             Description: Quick & easy\n\
             Ingredients: Egg, Milk\n\
             Steps: Mix\n\
             Tags: breakfast\n\
             Difficulty: Easy\n\
             Last Updated: 2024-05-01T12:00:00+00:00"
        );
    }

    #[test]
    fn test_mailto_link_encodes_the_body() {
        let link = mailto_link(&[recipe("Pancakes")]);
        assert!(link.starts_with("mailto:?body=Title%3A%20Pancakes%0A"));
        // Spaces never become '+'.
        assert!(!link.contains('+'));
        assert!(link.contains("Quick%20%26%20easy"));
    }

    #[test]
    fn test_mailto_link_joins_blocks_with_blank_lines() {
        let link = mailto_link(&[recipe("A"), recipe("B")]);
        assert_eq!(link.matches("%0A%0ATitle%3A").count(), 1);
    }

    #[test]
    fn test_mailto_encoding_keeps_unreserved_marks() {
        let mut r = recipe("Don't (over)mix!");
        r.description = "a-b_c.d~e*f".to_string();
        let link = mailto_link(&[r]);
        assert!(link.contains("Don't%20(over)mix!"));
        assert!(link.contains("a-b_c.d~e*f"));
    }
}
