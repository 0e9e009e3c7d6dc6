//! Parsing of `bd create` confirmations
//!
//! bd answers a successful create with text shaped like
//! `Created bd-42f1: Day 1: Environment Setup`. That line is the only
//! contract: exit status and stderr content are not consulted.

use super::TrackerId;

/// Word that must appear in successful output
pub const SUCCESS_MARKER: &str = "Created";

/// Why output could not be turned into an id
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    /// Output lacks the success marker
    #[error("output does not contain 'Created'")]
    MissingMarker,

    /// Success marker present but no token carries an id
    #[error("no '{prefix}' id in output")]
    MissingId {
        /// Prefix that was searched for
        prefix: String,
    },
}

/// Extract the created id from tracker output
///
/// The first whitespace-delimited token starting with `prefix` is taken,
/// minus trailing punctuation. A token that is nothing but the prefix does
/// not count as an id.
pub fn extract_tracker_id(output: &str, prefix: &str) -> Result<TrackerId, ExtractError> {
    if !output.contains(SUCCESS_MARKER) {
        return Err(ExtractError::MissingMarker);
    }

    output
        .split_whitespace()
        .find(|token| token.starts_with(prefix))
        .map(|token| token.trim_end_matches(|c: char| c.is_ascii_punctuation()))
        .filter(|id| id.len() > prefix.len())
        .map(TrackerId::new)
        .ok_or_else(|| ExtractError::MissingId {
            prefix: prefix.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(output: &str) -> Result<TrackerId, ExtractError> {
        extract_tracker_id(output, "bd-")
    }

    #[test]
    fn test_extracts_id_and_strips_colon() {
        let id = extract("Created bd-42f1: Day 1: Environment Setup").unwrap();
        assert_eq!(id.as_str(), "bd-42f1");
    }

    #[test]
    fn test_marker_required() {
        assert_eq!(
            extract("Updated bd-42f1: something"),
            Err(ExtractError::MissingMarker)
        );
        assert_eq!(extract(""), Err(ExtractError::MissingMarker));
    }

    #[test]
    fn test_marker_without_prefixed_token() {
        assert!(matches!(
            extract("Created : something"),
            Err(ExtractError::MissingId { .. })
        ));
    }

    #[test]
    fn test_prefix_inside_token_does_not_match() {
        // Token must start with the prefix
        assert!(matches!(
            extract("Created issue-bd-1 ok"),
            Err(ExtractError::MissingId { .. })
        ));
    }

    #[test]
    fn test_bare_prefix_is_not_an_id() {
        assert!(matches!(
            extract("Created bd-: untitled"),
            Err(ExtractError::MissingId { .. })
        ));
    }

    #[test]
    fn test_first_matching_token_wins() {
        let id = extract("Created bd-a1 (child of bd-b2)").unwrap();
        assert_eq!(id.as_str(), "bd-a1");
    }

    #[test]
    fn test_multiline_output() {
        let output = "Warning: daemon not running, using direct mode\n✓ Created bd-7c.1: Install deps\n";
        let id = extract(output).unwrap();
        assert_eq!(id.as_str(), "bd-7c.1");
    }

    #[test]
    fn test_custom_prefix() {
        let id = extract_tracker_id("Created poc-9x, priority 1", "poc-").unwrap();
        assert_eq!(id.as_str(), "poc-9x");
    }
}
