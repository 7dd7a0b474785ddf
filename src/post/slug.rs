use std::sync::OnceLock;

use regex::Regex;

fn hyphen_runs() -> &'static Regex {
    static HYPHEN_RUNS: OnceLock<Regex> = OnceLock::new();
    HYPHEN_RUNS.get_or_init(|| Regex::new("-{2,}").unwrap())
}

fn map_char(c: char) -> Option<char> {
    match c {
        ' ' | '_' | '-' => Some('-'),
        c if c.is_alphabetic() => Some(c),
        _ => None,
    }
}

/// Turns a post title into a directory/branch-safe identifier.
///
/// Letters are kept, spaces, underscores and hyphens become a single hyphen,
/// everything else (digits included) is dropped. The result is cut to
/// `max_len` characters and may be empty.
pub(crate) fn slugify(title: &str, max_len: usize) -> String {
    let mapped: String = title.to_lowercase().chars().filter_map(map_char).collect();
    hyphen_runs()
        .replace_all(&mapped, "-")
        .chars()
        .take(max_len)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn punctuation_is_dropped_and_separators_collapse() {
        assert_eq!(slugify("Hello, World!  Foo_Bar", 30), "hello-world-foo-bar");
    }

    #[test]
    fn truncates_to_max_len() {
        assert_eq!(slugify("abcdefghij", 5), "abcde");
        assert_eq!(slugify("Truncated mid word", 12), "truncated-mi");
    }

    #[test]
    fn dropped_characters_join_words() {
        assert_eq!(slugify("don't stop", 30), "dont-stop");
        assert_eq!(slugify("Top 10 Tips", 30), "top-tips");
    }

    #[test]
    fn non_ascii_letters_pass_through() {
        assert_eq!(slugify("Crème Brûlée", 30), "crème-brûlée");
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        assert_eq!(slugify("ééé", 2), "éé");
    }

    #[test]
    fn punctuation_only_title_is_empty() {
        assert_eq!(slugify("?!.,;:42", 30), "");
    }

    #[test]
    fn is_deterministic() {
        let title = "Some -- Title __ with  separators";
        assert_eq!(slugify(title, 20), slugify(title, 20));
        assert_eq!(slugify(title, 40), "some-title-with-separators");
    }

    proptest! {
        #[test]
        fn ascii_titles_yield_lowercase_hyphenated_slugs(title in "[ -~]{0,80}", max_len in 1usize..64) {
            let slug = slugify(&title, max_len);
            prop_assert!(slug.chars().all(|c| c.is_ascii_lowercase() || c == '-'));
            prop_assert!(!slug.contains("--"));
            prop_assert!(slug.chars().count() <= max_len);
        }
    }
}
