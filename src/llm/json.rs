//! JSON extraction for completion responses.
//!
//! Models often wrap their JSON in markdown code fences or surround it with
//! conversational text even when told not to. This module finds the JSON
//! value (array or object) inside such a response, handling nested brackets
//! and string escaping correctly.

/// Extract a JSON array or object from a response that may be wrapped in markdown.
///
/// Tries, in order:
/// 1. The whole response, if it already parses
/// 2. Markdown ` ```json ... ``` ` fenced block
/// 3. Bare ` ``` ... ``` ` fenced block (if the content starts with `[` or `{`)
/// 4. Balanced-bracket extraction from surrounding text
/// 5. Returns the trimmed input unchanged as a last resort
pub fn extract_json(response: &str) -> String {
    let trimmed = response.trim();

    if serde_json::from_str::<serde_json::Value>(trimmed).is_ok() {
        return trimmed.to_string();
    }

    if let Some(start) = trimmed.find("```json")
        && let Some(end) = trimmed[start + 7..].find("```")
    {
        return trimmed[start + 7..start + 7 + end].trim().to_string();
    }

    if let Some(start) = trimmed.find("```")
        && let Some(end) = trimmed[start + 3..].find("```")
    {
        let inner = trimmed[start + 3..start + 3 + end].trim();
        if inner.starts_with('[') || inner.starts_with('{') {
            return inner.to_string();
        }
    }

    if let Some(json_str) = find_valid_json_value(trimmed) {
        return json_str;
    }

    trimmed.to_string()
}

/// Find the first valid JSON array or object embedded in `text`.
fn find_valid_json_value(text: &str) -> Option<String> {
    for (start_idx, _) in text.match_indices(['[', '{']) {
        let candidate = &text[start_idx..];

        if let Some(json_str) = extract_balanced(candidate)
            && serde_json::from_str::<serde_json::Value>(json_str).is_ok()
        {
            return Some(json_str.to_string());
        }
    }

    None
}

/// Extract the prefix of `text` whose brackets balance, starting at its first byte.
///
/// Tracks depth while respecting JSON string literals (including escaped
/// characters), so `["use [ and ] carefully"]` is handled correctly.
fn extract_balanced(text: &str) -> Option<&str> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape_next = false;

    for (idx, ch) in text.char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match ch {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            '[' | '{' if !in_string => depth += 1,
            ']' | '}' if !in_string => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(&text[..=idx]);
                }
            }
            _ => {}
        }
    }

    None
}
