//! Pull a listing object out of free-form model output

use listsmith_core::{ListingContent, Platform};

use crate::LlmError;

/// Find the first balanced `{...}` region in `text`
///
/// Braces inside JSON string literals (including escaped quotes) do not
/// count toward nesting. Returns `None` when the first object never
/// closes.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    let end = start + offset + ch.len_utf8();
                    return Some(&text[start..end]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Parse a model reply into listing content for `platform`
///
/// Amazon replies without bullet points are rejected so the caller falls
/// back to content that has them.
pub fn parse_listing(reply: &str, platform: Platform) -> Result<ListingContent, LlmError> {
    let json = extract_json_object(reply).ok_or(LlmError::NoJson)?;
    let content: ListingContent = serde_json::from_str(json)?;

    if platform.uses_bullet_points() && content.bullet_points.as_ref().is_none_or(Vec::is_empty) {
        return Err(LlmError::MissingBulletPoints { platform });
    }

    Ok(content)
}
