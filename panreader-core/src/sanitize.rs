//! Repair of link placeholders that pandoc percent-encodes.
//!
//! The site generator resolves intra-site links written as `{attach}img.png`,
//! `{filename}post.md`, `{tag}rust` and `{category}notes`. Pandoc escapes the
//! braces inside URLs, turning `{attach}` into `%7Battach%7D`.

use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;

/// Placeholder names restored by [`sanitize`]
pub const PLACEHOLDERS: [&str; 4] = ["attach", "filename", "tag", "category"];

static ENCODED_PLACEHOLDER: OnceLock<Regex> = OnceLock::new();

fn encoded_placeholder() -> &'static Regex {
    ENCODED_PLACEHOLDER
        .get_or_init(|| Regex::new(r"%7B(attach|filename|tag|category)%7D").unwrap())
}

/// Restore percent-encoded placeholders to their literal `{name}` form.
///
/// ```
/// use panreader_core::sanitize;
///
/// assert_eq!(sanitize("link %7Battach%7D img.png"), "link {attach} img.png");
/// ```
pub fn sanitize(raw: &str) -> String {
    restore(raw).into_owned()
}

fn restore(raw: &str) -> Cow<'_, str> {
    encoded_placeholder().replace_all(raw, "{$1}")
}
