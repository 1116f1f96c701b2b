//! Prefix suggestions over the tag vocabulary and aliases.

use std::collections::HashSet;

use crate::models::{normalize, Alias, Tag};

pub const DEFAULT_SUGGESTION_LIMIT: usize = 10;

/// Suggest canonical tag strings for a partially typed query.
///
/// Tags in `category` (any category when `None`) whose string starts with
/// the query come first, followed by the canonical strings of matching
/// aliases. Results are de-duplicated in order and capped at `limit`.
pub fn suggest(
    tags: &[Tag],
    aliases: &[Alias],
    query: &str,
    category: Option<&str>,
    limit: usize,
) -> Vec<String> {
    let query = normalize(query);
    if query.is_empty() {
        return Vec::new();
    }

    let tag_matches = tags
        .iter()
        .filter(|t| category.map_or(true, |c| t.category() == c))
        .filter_map(|t| t.string.as_deref())
        .filter(|s| s.to_lowercase().starts_with(&query));

    let alias_matches = aliases
        .iter()
        .filter(|a| a.alias.to_lowercase().starts_with(&query))
        .filter_map(|a| {
            tags.iter()
                .find(|t| t.id.to_string() == a.id)
                .and_then(|t| t.string.as_deref())
        });

    let mut seen = HashSet::new();
    tag_matches
        .chain(alias_matches)
        .filter(|s| seen.insert(*s))
        .take(limit)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TagId;

    fn vocabulary() -> Vec<Tag> {
        vec![
            Tag::new(TagId::Standard(1), "predefined", "Catalog"),
            Tag::new(TagId::Standard(2), "vocab", "Cat"),
            Tag::new(TagId::Standard(3), "predefined", "Dog"),
            Tag::new(TagId::custom(1), "custom", "Caterpillar"),
        ]
    }

    #[test]
    fn test_filters_by_category() {
        let result = suggest(&vocabulary(), &[], "ca", Some("predefined"), 10);
        assert_eq!(result, vec!["Catalog"]);
    }

    #[test]
    fn test_alias_matches_follow_tags_and_dedupe() {
        let aliases = vec![Alias::new("canine", "3"), Alias::new("catalogue", "1")];
        let result = suggest(&vocabulary(), &aliases, " CA", Some("predefined"), 10);
        assert_eq!(result, vec!["Catalog", "Dog"]);
    }

    #[test]
    fn test_empty_query_and_limit() {
        assert!(suggest(&vocabulary(), &[], "   ", None, 10).is_empty());
        assert_eq!(suggest(&vocabulary(), &[], "c", None, 2).len(), 2);
    }
}
