#![forbid(unsafe_code)]

//! Prompt construction for transform actions.
//!
//! Pure functions producing the system/user prompt pair handed to an
//! invocation capability. The request text is otherwise opaque to the
//! session core; only the translate action consumes configuration (the
//! target language).

use crate::pipeline::ActionKind;

/// The system/user prompt pair for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    /// Instructions framing every transform.
    pub system: String,
    /// The per-action request wrapping the source text.
    pub user: String,
}

/// System prompt shared by all actions.
const SYSTEM_PROMPT: &str = "You are a helpful writing assistant that enhances markdown content.\n\
Your responses should:\n\
- Preserve markdown formatting where appropriate\n\
- Be clear and well-structured\n\
- Maintain the original meaning while improving the content\n\
- Return ONLY the enhanced text without any explanations or meta-commentary";

/// Build the prompt pair for an action over `text`.
///
/// `translate_language` is only consulted by [`ActionKind::Translate`].
#[must_use]
pub fn prompt_for_action(kind: ActionKind, text: &str, translate_language: &str) -> Prompt {
    let user = match kind {
        ActionKind::Rewrite => format!(
            "Rewrite the following text to improve clarity, flow, and readability while \
             maintaining the original meaning and any markdown formatting:\n\n{text}"
        ),
        ActionKind::Summarize => format!(
            "Create a concise summary of the following text, capturing the key points in a \
             clear and organized manner. Use markdown formatting if appropriate:\n\n{text}"
        ),
        ActionKind::Expand => format!(
            "Expand on the following text by adding more detail, examples, and depth while \
             maintaining the original tone and structure. Preserve any markdown \
             formatting:\n\n{text}"
        ),
        ActionKind::Bulletify => format!(
            "Convert the following text into a well-organized bullet point list. Group \
             related items and use proper markdown list formatting:\n\n{text}"
        ),
        ActionKind::Formalize => format!(
            "Rewrite the following text in a more professional, formal tone suitable for \
             business or academic contexts. Maintain any markdown formatting:\n\n{text}"
        ),
        ActionKind::Shorten => format!(
            "Make the following text more concise while preserving the key information and \
             meaning. Remove unnecessary words and redundancies:\n\n{text}"
        ),
        ActionKind::Translate => format!(
            "Translate the following text to {translate_language}. Preserve any markdown \
             formatting and maintain the original structure:\n\n{text}"
        ),
        ActionKind::FixGrammar => format!(
            "Fix any grammar, spelling, and punctuation errors in the following text. Make \
             minimal changes to preserve the original style and voice:\n\n{text}"
        ),
    };

    Prompt {
        system: SYSTEM_PROMPT.to_string(),
        user,
    }
}
