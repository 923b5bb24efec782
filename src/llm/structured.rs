// Structured generation - prompt in, schema-conforming value out
//
// The model is asked for bare JSON but routinely wraps it in markdown
// fences or surrounding prose. Parsing strips fences, tries a direct
// parse, then falls back to the outermost JSON object slice. Anything
// less is a GenerationError; the caller decides that the run halts.

use serde::de::DeserializeOwned;

use super::types::MessageRequest;
use super::LanguageModel;
use crate::config::constants::DEFAULT_MAX_TOKENS;
use crate::error::GenerationError;

/// One structured generation call: send `prompt`, parse the reply as `T`.
pub async fn generate_structured<T: DeserializeOwned>(
    model: &dyn LanguageModel,
    prompt: &str,
) -> Result<T, GenerationError> {
    let request = MessageRequest::new(model.model(), DEFAULT_MAX_TOKENS, prompt);
    let response = model
        .send_message(&request)
        .await
        .map_err(GenerationError::Request)?;

    let text = response.text();
    if text.trim().is_empty() {
        return Err(GenerationError::Empty);
    }

    parse_structured(&text)
}

/// Parse model output into `T`, tolerating fences and surrounding prose.
pub fn parse_structured<T: DeserializeOwned>(text: &str) -> Result<T, GenerationError> {
    let stripped = strip_markdown_fences(text.trim());

    // Try direct parse
    let direct_err = match serde_json::from_str::<T>(stripped) {
        Ok(value) => return Ok(value),
        Err(e) => e,
    };

    // Try the outermost JSON object within the text
    if let Some(start) = stripped.find('{') {
        if let Some(end) = stripped.rfind('}') {
            if start < end {
                if let Ok(value) = serde_json::from_str::<T>(&stripped[start..=end]) {
                    return Ok(value);
                }
            }
        }
    }

    Err(GenerationError::Schema(direct_err))
}

/// Strip leading/trailing markdown code fences (```json ... ``` or ``` ... ```)
fn strip_markdown_fences(s: &str) -> &str {
    let s = s.trim();
    let s = if let Some(rest) = s.strip_prefix("```json") {
        rest
    } else if let Some(rest) = s.strip_prefix("```") {
        rest
    } else {
        s
    };
    if let Some(rest) = s.strip_suffix("```") {
        rest.trim()
    } else {
        s.trim()
    }
}
