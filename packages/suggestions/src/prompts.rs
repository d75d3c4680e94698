//! LLM prompts for suggestion extraction.
//!
//! The extraction prompt leans hard on deduplication instructions because the
//! model sees overlapping context windows on every statement; the novelty
//! filter is the backstop for whatever the model repeats anyway.

/// Prompt for extracting suggestions from a transcript excerpt.
pub const EXTRACT_SUGGESTIONS_PROMPT: &str = r#"Given the following incident transcript, extract suggestions that are actionable, novel, and important for incident response.

STRICT DEDUPLICATION RULES:
- DO NOT return any suggestion that is a duplicate, near-duplicate, rephrasing, or restatement of any previous suggestion, even if the wording is different.
- DO NOT split the same action into multiple suggestions. Only return the most concise, clear, and unique version of each action.
- If two suggestions are about the same action, only return the best, most specific one.
- If you are unsure if a suggestion is too similar to a previous one, DO NOT include it.
- If a suggestion is already covered by a previous suggestion, DO NOT include it.
- Only return suggestions that are truly unique and not covered by any previous suggestion.

{previous_section}Transcript:
{transcript}

For each suggestion, return:
- type: One of "action_item", "root_cause", or "trigger_event". Only use "metadata" if there is truly no action, root cause, or trigger event.
- title: A concise, 1-3 word summary of the suggestion. This must NOT be a duplicate or near-duplicate of the description or referenced_message. Make it specific and meaningful.
- description: A short, user-facing, specific summary of the suggestion.
- referenced_message: The message text or index that supports the suggestion.

**Good Example:**
[
  { "type": "action_item", "title": "Rollback Playbook", "description": "Update the rollback playbook to reflect the new deployment pipeline.", "referenced_message": "Okay, found the rollback playbook. It's in Confluence, but it looks... really outdated." },
  { "type": "root_cause", "title": "Database Spike", "description": "Postgres database CPU is at 100%, likely due to a new query pattern after deploy #341.", "referenced_message": "Whoa - 100% CPU on postgres." }
]

**Bad Example:**
- { "type": "metadata", "title": "Error Rate", "description": "Error rate on the web tier has spiked.", "referenced_message": "Error rate on the web tier has spiked." }
- { "type": "metadata", "title": "Check the logs", "description": "Check the logs.", "referenced_message": "Users can't even load the homepage." }

Only return a JSON array of objects as shown in the Good Example. Do NOT use Markdown code fences, do NOT return a string, and do NOT return an array of strings.

Only return an empty array if there is truly nothing actionable, novel, or useful in the transcript."#;

/// Format the extraction prompt from a transcript excerpt and the recent
/// suggestion descriptions the model must not repeat.
pub fn format_extract_prompt(context: &[&str], previous_descriptions: &[&str]) -> String {
    let transcript = context
        .iter()
        .enumerate()
        .map(|(i, text)| format!("{}. {}", i + 1, text))
        .collect::<Vec<_>>()
        .join("\n");

    let previous_section = if previous_descriptions.is_empty() {
        String::new()
    } else {
        let bullets = previous_descriptions
            .iter()
            .map(|d| format!("- \"{d}\""))
            .collect::<Vec<_>>()
            .join("\n");
        format!(
            "Previous suggestions (DO NOT repeat, rephrase, or restate any of these):\n{bullets}\n\n"
        )
    };

    EXTRACT_SUGGESTIONS_PROMPT
        .replace("{previous_section}", &previous_section)
        .replace("{transcript}", &transcript)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_transcript_lines_from_one() {
        let prompt = format_extract_prompt(&["pages are firing", "rolling back now"], &[]);
        assert!(prompt.contains("Transcript:\n1. pages are firing\n2. rolling back now"));
    }

    #[test]
    fn test_omits_previous_section_when_empty() {
        let prompt = format_extract_prompt(&["hello"], &[]);
        assert!(!prompt.contains("Previous suggestions"));
        assert!(!prompt.contains("{previous_section}"));
    }

    #[test]
    fn test_quotes_previous_descriptions() {
        let prompt = format_extract_prompt(
            &["hello"],
            &["Update the rollback playbook", "Page the on-call"],
        );
        assert!(prompt.contains(
            "Previous suggestions (DO NOT repeat, rephrase, or restate any of these):\n- \"Update the rollback playbook\"\n- \"Page the on-call\"\n\nTranscript:"
        ));
    }

    #[test]
    fn test_no_placeholders_survive_formatting() {
        let prompt = format_extract_prompt(&["a statement"], &["a description"]);
        assert!(!prompt.contains("{transcript}"));
        assert!(!prompt.contains("{previous_section}"));
    }
}
