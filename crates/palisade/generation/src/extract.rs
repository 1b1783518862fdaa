//! Strict structured extraction from provider responses.
//!
//! The contract is parse-or-fallback: the provider content must yield a JSON
//! artifact payload whose required fields exist and are non-empty, otherwise
//! the whole backend call counts as failed and the chain advances to the
//! next link. No partially-populated artifacts ever leave this module.

use serde::Deserialize;

use crate::error::{GenerationError, GenerationResult};

/// Confidence assigned to artifacts produced by a remote provider.
pub const REMOTE_CONFIDENCE: f64 = 0.85;

/// The structured payload every provider is prompted to return.
#[derive(Debug, Clone, Deserialize)]
pub struct ArtifactPayload {
    pub name: String,
    pub description: String,
    pub source: String,
}

/// Parse provider content into a validated [`ArtifactPayload`].
///
/// Accepts either a bare JSON object or one wrapped in a fenced code block.
pub fn parse_artifact_payload(content: &str) -> GenerationResult<ArtifactPayload> {
    let json = strip_code_fence(content);

    let payload: ArtifactPayload = serde_json::from_str(json)
        .map_err(|e| GenerationError::Malformed(format!("artifact payload is not JSON: {e}")))?;

    if payload.name.trim().is_empty() {
        return Err(GenerationError::Malformed("empty artifact name".to_owned()));
    }
    if payload.source.trim().is_empty() {
        return Err(GenerationError::Malformed(
            "empty artifact source".to_owned(),
        ));
    }
    if is_error_echo(&payload.source) {
        return Err(GenerationError::Malformed(
            "provider echoed an error instead of source".to_owned(),
        ));
    }

    Ok(payload)
}

/// Strip a single ```/```json fence when present.
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.trim_start_matches(['\r', '\n']);
    rest.strip_suffix("```").map_or(rest, str::trim)
}

/// Whether the "source" is actually a provider error message echoed back.
fn is_error_echo(source: &str) -> bool {
    let lowered = source.trim().to_ascii_lowercase();
    lowered.starts_with("error") || lowered.starts_with("i cannot") || lowered.starts_with("sorry")
}

/// Structural scan for known safety idioms in contract source.
///
/// Absence of every idiom yields a minimal default feature set rather than
/// an empty one, so downstream risk scoring always has something to work
/// with.
pub fn scan_security_features(source: &str) -> Vec<String> {
    let mut features = Vec::new();

    if source.contains("nonReentrant") || source.contains("ReentrancyGuard") {
        features.push("reentrancy-guard".to_owned());
    }
    if source.contains("onlyOwner") || source.contains("Ownable") || source.contains("AccessControl")
    {
        features.push("access-control".to_owned());
    }
    if source.contains("require(") || source.contains("revert") {
        features.push("input-validation".to_owned());
    }
    if source.contains("emit ") {
        features.push("event-emission".to_owned());
    }

    if features.is_empty() {
        features.push("basic-validation".to_owned());
    }
    features
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_json_payload() {
        let content = r#"{"name":"FundCaptureGuard","description":"traps attackers","source":"contract FundCaptureGuard {}"}"#;
        let payload = parse_artifact_payload(content).unwrap();
        assert_eq!(payload.name, "FundCaptureGuard");
    }

    #[test]
    fn parses_fenced_json_payload() {
        let content = "```json\n{\"name\":\"G\",\"description\":\"d\",\"source\":\"contract G {}\"}\n```";
        let payload = parse_artifact_payload(content).unwrap();
        assert_eq!(payload.source, "contract G {}");
    }

    #[test]
    fn rejects_missing_fields() {
        let content = r#"{"name":"G"}"#;
        assert!(matches!(
            parse_artifact_payload(content),
            Err(GenerationError::Malformed(_))
        ));
    }

    #[test]
    fn rejects_empty_source() {
        let content = r#"{"name":"G","description":"d","source":"   "}"#;
        assert!(matches!(
            parse_artifact_payload(content),
            Err(GenerationError::Malformed(_))
        ));
    }

    #[test]
    fn rejects_error_echo() {
        let content = r#"{"name":"G","description":"d","source":"Error: model overloaded"}"#;
        assert!(matches!(
            parse_artifact_payload(content),
            Err(GenerationError::Malformed(_))
        ));
    }

    #[test]
    fn scan_finds_known_idioms() {
        let source = r#"
            contract G is ReentrancyGuard, Ownable {
                function take() external onlyOwner nonReentrant {
                    require(msg.sender != address(0), "bad sender");
                    emit Taken(msg.sender);
                }
            }
        "#;
        let features = scan_security_features(source);
        assert!(features.contains(&"reentrancy-guard".to_owned()));
        assert!(features.contains(&"access-control".to_owned()));
        assert!(features.contains(&"input-validation".to_owned()));
        assert!(features.contains(&"event-emission".to_owned()));
    }

    #[test]
    fn scan_defaults_when_nothing_found() {
        let features = scan_security_features("contract Bare {}");
        assert_eq!(features, vec!["basic-validation".to_owned()]);
    }
}
