//! Mention extraction: @username references in post text.

use once_cell::sync::Lazy;
use regex::Regex;

// Must be preceded by start of string or a non-word character so email
// addresses don't produce mentions.
static MENTION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|[^@\w])@([a-zA-Z0-9_]+)").expect("Failed to compile mention regex")
});

/// Extract all @username mentions from text.
///
/// Returns unique usernames (without the @) in order of first appearance,
/// lowercased. Resolution to user ids happens at post-creation time;
/// unknown usernames are skipped there.
pub fn extract_mentions(text: &str) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut mentions = Vec::new();

    for cap in MENTION_REGEX.captures_iter(text) {
        if let Some(username) = cap.get(1) {
            let username = username.as_str().to_lowercase();
            if seen.insert(username.clone()) {
                mentions.push(username);
            }
        }
    }

    mentions
}
