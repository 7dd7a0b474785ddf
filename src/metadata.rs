use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize};

/// Frontmatter of a post.
///
/// Field order here is the order fields are written out. Empty optional
/// fields are omitted; `title` is always written.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Metadata {
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub categories: Vec<String>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub tags: Vec<String>,
    /// `YYYY-MM-DD`, or empty when not set.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
}

/// `key: null`, `key: ~` and `key:` decode like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Overrides applied by `blogtool update`.
///
/// Empty fields mean "leave unchanged".
#[derive(Debug, Clone, Default)]
pub(crate) struct MetadataUpdate {
    pub date: Option<String>,
    pub tags: Vec<String>,
    pub categories: Vec<String>,
    /// Union with existing tags/categories instead of replacing them.
    pub append: bool,
}

impl Metadata {
    pub fn new(title: String, tags: Vec<String>, categories: Vec<String>, date: String) -> Self {
        Self {
            categories: dedup_preserve_order(categories),
            tags: dedup_preserve_order(tags),
            date,
            title,
        }
    }

    pub fn apply(&mut self, update: &MetadataUpdate) -> &mut Self {
        if let Some(date) = update.date.as_deref().filter(|d| !d.is_empty()) {
            self.date = date.to_string();
        }
        if !update.tags.is_empty() {
            self.tags = merge_values(&self.tags, &update.tags, update.append);
        }
        if !update.categories.is_empty() {
            self.categories = merge_values(&self.categories, &update.categories, update.append);
        }
        self
    }
}

fn merge_values(current: &[String], new: &[String], append: bool) -> Vec<String> {
    let merged = if append {
        current.iter().chain(new).cloned().collect()
    } else {
        new.to_vec()
    };
    dedup_preserve_order(merged)
}

/// Drops repeated values, keeping the first occurrence of each.
pub(crate) fn dedup_preserve_order(values: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .into_iter()
        .filter(|value| seen.insert(value.clone()))
        .collect()
}
