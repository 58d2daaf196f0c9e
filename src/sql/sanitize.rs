//! Sanitization of model-generated SQL.
//!
//! Models wrap queries in markdown fences and sprinkle `--` commentary even
//! when told not to. This strips both so the remainder can be handed to the
//! executor verbatim. Purely cosmetic: no syntax validation happens here.

use regex::Regex;
use std::sync::OnceLock;

/// Matches an opening or closing fence marker, with or without a language tag.
fn fence_marker() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    FENCE.get_or_init(|| Regex::new(r"(?i)```(?:sql)?").unwrap())
}

/// Cleans model output into an executable SQL string.
///
/// Removes every fence marker (the markers only, never their content), drops
/// each line whose first non-whitespace characters are `--`, and trims the
/// result. Total and idempotent: `clean_sql(clean_sql(s)) == clean_sql(s)`
/// for any input.
pub fn clean_sql(raw: &str) -> String {
    let without_fences = fence_marker().replace_all(raw, "");

    let without_comments: Vec<&str> = without_fences
        .lines()
        .filter(|line| !line.trim_start().starts_with("--"))
        .collect();

    without_comments.join("\n").trim().to_string()
}
