//! Pulls the user-story JSON object out of free-form model output

use crate::analysis::UserStory;
use crate::LlmError;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct StoryEnvelope {
    #[serde(rename = "userStories", default)]
    user_stories: Option<Vec<Value>>,
}

/// Returns the first balanced `{...}` span of `text`
///
/// Braces inside JSON string literals (including escaped quotes) do not
/// count towards the balance. If the object opened by the first `{` never
/// closes, scanning resumes at the next `{`.
///
/// # Example
///
/// ```
/// use site_story::narrative::extract_json_object;
///
/// let text = "Sure! ```json\n{\"a\": {\"b\": \"}\"}}\n``` Anything else?";
/// assert_eq!(extract_json_object(text), Some("{\"a\": {\"b\": \"}\"}}"));
/// ```
pub fn extract_json_object(text: &str) -> Option<&str> {
    let mut search_from = 0;

    while let Some(offset) = text[search_from..].find('{') {
        let start = search_from + offset;
        if let Some(end) = balanced_end(&text[start..]) {
            return Some(&text[start..start + end]);
        }
        search_from = start + 1;
    }

    None
}

/// Byte length of the balanced object at the start of `text`, if it closes
fn balanced_end(text: &str) -> Option<usize> {
    let mut depth: usize = 0;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i + c.len_utf8());
                }
            }
            _ => {}
        }
    }

    None
}

/// Parses the `userStories` list out of a model response
///
/// # Returns
///
/// * `Ok(stories)` - The parsed list; empty if the object has no `userStories`
/// * `Err(LlmError::MalformedResponse)` - No JSON object, invalid JSON, or a
///   `userStories` value that is not a list
///
/// A single entry that cannot be read as a story is skipped with a warning;
/// the rest of the list is kept.
pub fn parse_user_stories(text: &str) -> Result<Vec<UserStory>, LlmError> {
    let json = extract_json_object(text)
        .ok_or_else(|| LlmError::MalformedResponse("No valid JSON found in response".into()))?;

    let envelope: StoryEnvelope = serde_json::from_str(json)
        .map_err(|e| LlmError::MalformedResponse(format!("Invalid user story JSON: {e}")))?;

    let stories = envelope
        .user_stories
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value::<UserStory>(entry) {
            Ok(story) => Some(story),
            Err(e) => {
                tracing::warn!("Skipping user story {} in model reply: {}", index + 1, e);
                None
            }
        })
        .collect();

    Ok(stories)
}
