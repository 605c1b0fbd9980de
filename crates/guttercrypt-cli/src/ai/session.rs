use guttercrypt_core::{build_prompt_context, GutterError, Memory, MemoryStore};
use tracing::warn;

use super::{AiError, Assistant, SYSTEM_PROMPT};

/// Result of a question.
#[derive(Debug)]
pub struct AskOutcome {
    pub response: String,
    /// Set when the answer arrived but the exchange could not be recorded.
    pub memory_warning: Option<GutterError>,
}

/// Persona prompt with memory context appended.
pub fn system_prompt(memory: Option<&Memory>) -> String {
    let context = memory.map(build_prompt_context).unwrap_or_default();
    format!("{}{}", SYSTEM_PROMPT, context)
}

/// Ask `assistant`, then record the exchange when `memory` is given.
///
/// `memory` carries the store, the already loaded memory and the passphrase
/// that opened it. Recording failures do not fail the question.
pub fn ask(
    assistant: &dyn Assistant,
    question: &str,
    memory: Option<(&MemoryStore, &Memory, &str)>,
) -> Result<AskOutcome, AiError> {
    let system = system_prompt(memory.map(|(_, loaded, _)| loaded));
    let response = assistant.complete(&system, question)?;

    let memory_warning = memory.and_then(|(store, _, passphrase)| {
        store
            .add_conversation(question, &response, passphrase)
            .err()
    });
    if let Some(err) = &memory_warning {
        warn!(error = %err, "failed to record conversation");
    }

    Ok(AskOutcome {
        response,
        memory_warning,
    })
}
