use super::Memory;

const NOTES_HEADER: &str = "\n\n--- USER NOTES (things the user wants you to remember) ---\n";
const HISTORY_HEADER: &str = "\n\n--- RECENT CONVERSATION HISTORY ---\n";

/// Format notes and conversation history as extra system context.
///
/// Returns an empty string when memory holds nothing.
pub fn build_prompt_context(memory: &Memory) -> String {
    let mut prompt = String::new();

    if !memory.notes.is_empty() {
        prompt.push_str(NOTES_HEADER);
        for (i, note) in memory.notes.iter().enumerate() {
            prompt.push_str(&format!("{}. {}\n", i + 1, note.text));
        }
    }

    if !memory.conversations.is_empty() {
        prompt.push_str(HISTORY_HEADER);
        for exchange in &memory.conversations {
            prompt.push_str(&format!("Q: {}\nA: {}\n\n", exchange.question, exchange.answer));
        }
    }

    prompt
}
