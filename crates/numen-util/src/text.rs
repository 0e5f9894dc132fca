//! Markdown text helpers.
//!
//! Section splitting and large-content condensing shared by the note
//! store (per-section edits) and the AI providers (prompt size limits).

use tracing::debug;

/// Marker inserted where content was dropped by [`condense`].
pub const TRIM_MARKER: &str = "[...content trimmed for size...]";

/// Split Markdown content into whole sections.
///
/// A new section starts at every line beginning with `#`. Content before
/// the first heading forms its own section. Sections are 0-indexed by
/// callers. Empty content yields no sections.
pub fn split_sections(content: &str) -> Vec<String> {
    let mut sections = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in content.split('\n') {
        if line.starts_with('#') && !current.is_empty() {
            sections.push(current.join("\n"));
            current.clear();
        }
        current.push(line);
    }

    if !current.is_empty() {
        sections.push(current.join("\n"));
    }

    if sections.is_empty() && !content.trim().is_empty() {
        sections.push(content.trim().to_string());
    }

    // A single all-whitespace section counts as no content.
    if sections.len() == 1 && sections[0].trim().is_empty() {
        return Vec::new();
    }

    sections
}

/// Split Markdown content into (heading, body) pairs.
///
/// The heading is the `#` line itself (empty for leading content without
/// a heading); the body is the trimmed text up to the next heading.
pub fn extract_sections(content: &str) -> Vec<(String, String)> {
    if content.trim().is_empty() {
        return vec![(String::new(), String::new())];
    }

    let mut sections = Vec::new();
    let mut heading = String::new();
    let mut body: Vec<&str> = Vec::new();
    let mut seen_any = false;

    for line in content.split('\n') {
        let level = line.chars().take_while(|c| *c == '#').count();
        if (1..=6).contains(&level) && line[level..].starts_with(' ') {
            if seen_any {
                sections.push((heading.clone(), body.join("\n").trim().to_string()));
            }
            heading = line.to_string();
            body.clear();
            seen_any = true;
        } else {
            body.push(line);
            seen_any = true;
        }
    }

    if seen_any {
        sections.push((heading, body.join("\n").trim().to_string()));
    }

    sections
}

/// Roughly estimate the number of tokens in a text.
///
/// Very basic approximation; good enough for sizing prompts.
pub fn estimate_tokens(text: &str) -> usize {
    text.len() / 4
}

/// Condense oversized content to fit within `max_size` characters.
///
/// Keeps the first and last sections intact and fills the middle with the
/// smallest sections that fit; inserts [`TRIM_MARKER`] where content was
/// dropped. Content already under the limit is returned unchanged.
pub fn condense(content: &str, max_size: usize) -> String {
    if content.len() <= max_size {
        return content.to_string();
    }

    debug!(
        original = content.len(),
        max = max_size,
        "condensing oversized content"
    );

    let sections = extract_sections(content);

    if sections.len() <= 1 {
        let half = max_size / 2;
        let head_end = floor_char_boundary(content, half);
        let tail_start = floor_char_boundary(content, content.len().saturating_sub(half));
        return format!(
            "{}\n\n{}\n\n{}",
            &content[..head_end],
            TRIM_MARKER,
            &content[tail_start..]
        );
    }

    let first = &sections[0];
    let last = &sections[sections.len() - 1];
    let fixed = section_len(first) + section_len(last) + 50;
    let middle_budget = max_size.saturating_sub(fixed);

    let mut middle: Vec<&(String, String)> = sections[1..sections.len() - 1].iter().collect();
    middle.sort_by_key(|s| s.1.len());

    let mut kept = Vec::new();
    let mut used = 0;
    for section in middle {
        let size = section_len(section);
        if used + size > middle_budget {
            break;
        }
        kept.push(render_section(section));
        used += size;
    }

    let mut parts = vec![render_section(first)];
    if kept.is_empty() {
        parts.push(TRIM_MARKER.to_string());
    } else {
        parts.extend(kept);
    }
    parts.push(render_section(last));

    parts.join("\n\n")
}

fn section_len((heading, body): &(String, String)) -> usize {
    heading.len() + body.len()
}

fn render_section((heading, body): &(String, String)) -> String {
    if heading.is_empty() {
        body.clone()
    } else if body.is_empty() {
        heading.clone()
    } else {
        format!("{heading}\n{body}")
    }
}

/// Largest char boundary at or below `index`.
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    let mut i = index;
    while !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sections_basic() {
        let content = "intro\n# One\nbody one\n# Two\nbody two";
        let sections = split_sections(content);
        assert_eq!(sections.len(), 3);
        assert_eq!(sections[0], "intro");
        assert_eq!(sections[1], "# One\nbody one");
        assert_eq!(sections[2], "# Two\nbody two");
    }

    #[test]
    fn test_split_sections_empty() {
        assert!(split_sections("").is_empty());
        assert!(split_sections("   \n  ").is_empty());
    }

    #[test]
    fn test_split_sections_no_headings() {
        let sections = split_sections("just some text\nmore text");
        assert_eq!(sections.len(), 1);
    }

    #[test]
    fn test_extract_sections_pairs() {
        let content = "# Title\nhello\n\n## Sub\nworld";
        let sections = extract_sections(content);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].0, "# Title");
        assert_eq!(sections[0].1, "hello");
        assert_eq!(sections[1].0, "## Sub");
        assert_eq!(sections[1].1, "world");
    }

    #[test]
    fn test_estimate_tokens() {
        assert_eq!(estimate_tokens("abcdefgh"), 2);
        assert_eq!(estimate_tokens(""), 0);
    }

    #[test]
    fn test_condense_small_content_unchanged() {
        let content = "short note";
        assert_eq!(condense(content, 1000), content);
    }

    #[test]
    fn test_condense_no_sections_trims_middle() {
        let content = "x".repeat(200);
        let out = condense(&content, 100);
        assert!(out.len() < content.len() + TRIM_MARKER.len() + 4);
        assert!(out.contains(TRIM_MARKER));
    }

    #[test]
    fn test_condense_keeps_first_and_last_sections() {
        let mut content = String::from("# First\nkeep me\n\n");
        content.push_str(&format!("# Middle\n{}\n\n", "m".repeat(500)));
        content.push_str("# Last\nkeep me too");
        let out = condense(&content, 120);
        assert!(out.contains("# First"));
        assert!(out.contains("# Last"));
        assert!(out.contains(TRIM_MARKER));
        assert!(!out.contains(&"m".repeat(500)));
    }
}
