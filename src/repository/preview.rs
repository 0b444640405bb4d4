// ============================================================================
// Preview extraction: first paragraph of the overview section
// ============================================================================

/// Heading that introduces the descriptive paragraph of a heuristic.
pub const PREVIEW_MARKER: &str = "## Overview";

/// Maximum preview length in characters, ellipsis included.
pub const PREVIEW_MAX_CHARS: usize = 150;

const ELLIPSIS: &str = "...";

/// Extract a short plain-text preview from a heuristic body.
///
/// Returns `None` when the marker heading is absent or is not followed by a
/// paragraph.
pub fn extract_preview(body: &str) -> Option<String> {
    let mut lines = body.lines();

    lines.find(|line| line.trim_end().eq_ignore_ascii_case(PREVIEW_MARKER))?;

    let paragraph: Vec<&str> = lines
        .skip_while(|line| line.trim().is_empty())
        .take_while(|line| !line.trim().is_empty() && !line.trim_start().starts_with('#'))
        .map(str::trim)
        .collect();

    let text = collapse_whitespace(&strip_inline_markdown(&paragraph.join(" ")));
    if text.is_empty() {
        return None;
    }

    Some(truncate_at_word(&text, PREVIEW_MAX_CHARS))
}

/// Remove link targets and emphasis/code markers, keeping visible text.
fn strip_inline_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '*' | '_' | '`' => {}
            ']' if chars.peek() == Some(&'(') => {
                // Skip "(url)"
                let mut depth = 0;
                for next in chars.by_ref() {
                    match next {
                        '(' => depth += 1,
                        ')' => {
                            depth -= 1;
                            if depth == 0 {
                                break;
                            }
                        }
                        _ => {}
                    }
                }
            }
            '[' | ']' => {}
            _ => out.push(c),
        }
    }

    out
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncate to at most `max_chars` characters, cutting at a word boundary
/// and appending an ellipsis.
pub fn truncate_at_word(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let budget = max_chars.saturating_sub(ELLIPSIS.len());
    let head: String = text.chars().take(budget).collect();

    // Cut on the last space only when the budget split a word
    let next_is_boundary = text
        .chars()
        .nth(budget)
        .is_some_and(char::is_whitespace);
    let cut = if next_is_boundary {
        head.as_str()
    } else {
        match head.rfind(' ') {
            Some(pos) if pos > 0 => &head[..pos],
            _ => head.as_str(),
        }
    };

    let trimmed = cut.trim_end_matches(|c: char| c.is_whitespace() || matches!(c, ',' | ';' | ':' | '.'));
    format!("{}{}", trimmed, ELLIPSIS)
}
