use thiserror::Error;

/// Every way a food analysis can fail. The display text is what the caller sees.
#[derive(Error, Debug)]
pub enum AnalyzeError {
    #[error("User not authenticated")]
    Unauthenticated,

    #[error("No image file provided")]
    MissingImage,

    #[error("API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API request failed: {status} {reason}")]
    UpstreamStatus { status: u16, reason: String },

    #[error("Invalid response format from API")]
    InvalidResponse,

    #[error("API response does not contain a valid JSON object")]
    NoJsonObject,

    #[error("Analysis is not valid JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),

    #[error("Analysis does not match the expected format: {0}")]
    Schema(String),

    #[error("Failed to save meal: {0}")]
    Persistence(#[source] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_status_message_carries_code_and_reason() {
        let err = AnalyzeError::UpstreamStatus {
            status: 429,
            reason: "Too Many Requests".into(),
        };
        assert_eq!(err.to_string(), "API request failed: 429 Too Many Requests");
    }

    #[test]
    fn schema_message_names_the_field() {
        let err = AnalyzeError::Schema("macros.fat: expected number or null".into());
        assert!(err.to_string().ends_with("macros.fat: expected number or null"));
    }
}
