use once_cell::sync::Lazy;
use regex::Regex;

/// Matches #word where word contains letters, numbers, underscores
/// (minimum 2 chars).
static HASHTAG_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"#(\w{2,})").expect("Failed to compile hashtag regex"));

/// Extract hashtags from post text.
///
/// Returns unique hashtag names (without the # prefix) in order of first
/// appearance, normalized to lowercase. Interests are stored lowercase too,
/// so interest matching never depends on how the author typed the tag.
pub fn extract_hashtags(text: &str) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut hashtags = Vec::new();

    for cap in HASHTAG_REGEX.captures_iter(text) {
        let tag = cap[1].to_lowercase();
        if seen.insert(tag.clone()) {
            hashtags.push(tag);
        }
    }

    hashtags
}
