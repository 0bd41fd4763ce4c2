//! JSON rendering for fragments.

use crate::error::{Error, Result};

use super::Fragment;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert fragments to JSON.
pub fn to_json(fragments: &[Fragment], format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(fragments),
        JsonFormat::Compact => serde_json::to_string(fragments),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

/// Read fragments back from JSON produced by [`to_json`].
pub fn from_json(json: &str) -> Result<Vec<Fragment>> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{Inline, ListEntry, ListKind};

    fn sample() -> Vec<Fragment> {
        vec![
            Fragment::paragraph(vec![Inline::text("Hello")]),
            Fragment::List {
                style: ListKind::Ordered,
                items: vec![ListEntry::new(vec![Inline::text("one")])],
            },
        ]
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&sample(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"kind\": \"paragraph\""));
        assert!(json.contains("\"style\": \"ordered\""));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&sample(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
        assert!(json.starts_with("[{\"kind\":\"paragraph\""));
    }

    #[test]
    fn test_from_json() {
        let json = to_json(&sample(), JsonFormat::Compact).unwrap();
        assert_eq!(from_json(&json).unwrap(), sample());
        assert!(from_json("{").is_err());
    }
}
