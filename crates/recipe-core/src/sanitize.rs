//! Pure cleanup functions for loosely formatted AI output.
//!
//! Models occasionally wrap the requested payload in prose, code fences or
//! stray control bytes. These functions recover the usable part and fall
//! back to an empty result instead of surfacing a parse error. Same input
//! always yields the same output; no side effects, no network access.

use crate::types::Recipe;

/// Literal response meaning "no food recognized", short-circuiting cleanup.
pub const EMPTY_SENTINEL: &str = "EMPTY";

/// Introductory phrases models prepend despite being told not to.
/// Matched case-insensitively, anchored at the start of the response.
const INTRO_PHRASES: &[&str] = &[
    "her er en liste over matvarene i kjøleskapet",
    "her er en liste over matvarene",
    "her er listen over",
    "her er varene",
    "jeg ser følgende",
    "i kjøleskapet finnes",
    "here is a list of",
    "i can see",
    "the ingredients are",
];

/// Leftover intro fragment that disqualifies an item after splitting.
const LEFTOVER_FRAGMENT: &str = "her er";

/// Extract a clean ingredient list from a comma-separated model response.
///
/// The primary heuristic: if the text contains a colon, only the suffix
/// after the last colon is kept. Otherwise any known introductory phrase is
/// stripped from the start. The remainder is split on commas, trimmed, a
/// single trailing period removed, and items outside (1, 60) characters or
/// still containing an intro fragment are discarded.
///
/// A response of exactly [`EMPTY_SENTINEL`] (any case) yields an empty list.
pub fn clean_ingredient_list(text: &str) -> Vec<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(EMPTY_SENTINEL) {
        return Vec::new();
    }

    let mut cleaned = trimmed;
    if let Some((_, suffix)) = cleaned.rsplit_once(':') {
        cleaned = suffix;
    } else {
        for phrase in INTRO_PHRASES {
            if let Some(rest) = strip_prefix_ignore_case(cleaned, phrase) {
                cleaned = rest;
                break;
            }
        }
    }

    cleaned
        .split(',')
        .map(str::trim)
        .map(|item| item.strip_suffix('.').unwrap_or(item))
        .filter(|item| {
            let len = item.chars().count();
            len > 1 && len < 60 && !item.to_lowercase().contains(LEFTOVER_FRAGMENT)
        })
        .map(ToString::to_string)
        .collect()
}

/// Extract the JSON array embedded in a model response.
///
/// Takes the substring from the first `[` to the last `]` inclusive, with
/// C0/C1 control characters removed. When either bracket is absent, falls
/// back to stripping code-fence markers and surrounding whitespace.
pub fn extract_json_array(text: &str) -> String {
    if text.is_empty() {
        return "[]".to_string();
    }

    if let (Some(start), Some(end)) = (text.find('['), text.rfind(']')) {
        if start < end {
            return strip_control_chars(&text[start..=end]);
        }
    }

    text.replace("```json", "").replace("```", "").trim().to_string()
}

/// Parse a recipe array out of a model response.
///
/// Applies [`extract_json_array`] first; any decode failure after cleanup
/// is treated as "no recipes", never an error.
pub fn parse_recipes(text: &str) -> Vec<Recipe> {
    let cleaned = extract_json_array(text);
    serde_json::from_str(&cleaned).unwrap_or_default()
}

/// Case-insensitive, start-anchored prefix strip.
///
/// Returns the remainder with leading whitespace trimmed, or `None` when
/// the text does not start with the prefix.
fn strip_prefix_ignore_case<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let mut offset = 0;
    let mut chars = text.chars();
    for expected in prefix.chars() {
        let actual = chars.next()?;
        if !actual.to_lowercase().eq(expected.to_lowercase()) {
            return None;
        }
        offset += actual.len_utf8();
    }
    Some(text[offset..].trim_start())
}

/// Remove C0 and C1 control characters that break strict JSON parsing.
fn strip_control_chars(text: &str) -> String {
    text.chars()
        .filter(|c| {
            let code = *c as u32;
            code > 0x1F && !(0x7F..=0x9F).contains(&code)
        })
        .collect()
}
