//! Prompt construction for the built-in text transformations.

use numen_util::text;

/// Content larger than this is condensed before being sent to a provider.
const MAX_CONTENT_SIZE: usize = 100_000;

const EXPAND_PROMPT: &str = "You're a professional writer. Expand on the following text into 2\u{2013}3 cohesive paragraphs of prose while keeping the original voice and tone. Return only the expanded text without any explanations:";

const SUMMARIZE_PROMPT: &str = "Summarize the following note into bullet points with key takeaways. Keep technical details if present. Return only the summary without any explanations:";

const POETIC_PROMPT: &str = "Rewrite this text in the form of a metaphorical poem, keeping the meaning but transforming the tone. Return only the poem without any explanations:";

/// A text transformation to apply to note content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transform {
    /// Expand the text into fuller prose.
    Expand,
    /// Summarize the text into bullet points.
    Summarize,
    /// Rewrite the text as a poem.
    Poetic,
    /// A free-form instruction supplied by the user.
    Custom(String),
}

impl Transform {
    /// Build the full prompt for this transformation.
    ///
    /// Oversized input is condensed first so the request stays within
    /// provider limits.
    pub fn prompt(&self, content: &str) -> String {
        let content = text::condense(content, MAX_CONTENT_SIZE);
        let instruction = match self {
            Self::Expand => EXPAND_PROMPT,
            Self::Summarize => SUMMARIZE_PROMPT,
            Self::Poetic => POETIC_PROMPT,
            Self::Custom(instruction) => {
                return format!(
                    "{instruction}. Return only the transformed text without any explanations:\n\n{content}\n"
                );
            }
        };
        format!("{instruction}\n\n{content}\n")
    }

    /// Short name for logging and section headings.
    pub fn name(&self) -> &str {
        match self {
            Self::Expand => "expand",
            Self::Summarize => "summarize",
            Self::Poetic => "poetic",
            Self::Custom(_) => "custom",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_prompts_embed_content() {
        let prompt = Transform::Expand.prompt("some idea");
        assert!(prompt.starts_with("You're a professional writer."));
        assert!(prompt.contains("some idea"));

        let prompt = Transform::Summarize.prompt("notes here");
        assert!(prompt.contains("bullet points"));
        assert!(prompt.contains("notes here"));

        let prompt = Transform::Poetic.prompt("plain words");
        assert!(prompt.contains("metaphorical poem"));
        assert!(prompt.contains("plain words"));
    }

    #[test]
    fn test_custom_prompt() {
        let transform = Transform::Custom("Translate to French".to_string());
        let prompt = transform.prompt("hello");
        assert!(prompt.starts_with("Translate to French."));
        assert!(prompt.contains("hello"));
    }

    #[test]
    fn test_oversized_content_is_condensed() {
        let content = "# Heading\n\n".to_string() + &"x".repeat(2 * MAX_CONTENT_SIZE);
        let prompt = Transform::Summarize.prompt(&content);
        assert!(prompt.len() < MAX_CONTENT_SIZE + 1024);
    }

    #[test]
    fn test_names() {
        assert_eq!(Transform::Expand.name(), "expand");
        assert_eq!(Transform::Custom("x".into()).name(), "custom");
    }
}
