//! Shared types used across hostgen crates.

use serde::{Deserialize, Serialize};

/// Node digit used when a request does not name one.
pub const DEFAULT_NODE: &str = "0";

/// Input to a hostname allocation.
///
/// None of the fields are validated here; the prefix resolver accepts any
/// OS text and the codes are embedded verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationRequest {
    /// Free-form OS identifier ("Windows Server 2022", "centos-7", ...).
    pub os: String,
    /// Environment code, e.g. `P` or `D`.
    pub environment: String,
    /// Server-function code, e.g. `APP` or `SQL`.
    #[serde(alias = "serverFunction")]
    pub server_function: String,
    /// Trailing node digit.
    #[serde(default = "default_node")]
    pub node: String,
}

fn default_node() -> String {
    DEFAULT_NODE.to_string()
}

impl AllocationRequest {
    pub fn new(
        os: impl Into<String>,
        environment: impl Into<String>,
        server_function: impl Into<String>,
    ) -> Self {
        Self {
            os: os.into(),
            environment: environment.into(),
            server_function: server_function.into(),
            node: default_node(),
        }
    }

    pub fn with_node(mut self, node: impl Into<String>) -> Self {
        self.node = node.into();
        self
    }
}

/// How the numeric segment is read back out of an issued hostname.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SegmentParsing {
    /// Always characters 2..=6 (a 5-character window after the prefix).
    #[default]
    FixedWindow,
    /// The run of ASCII digits that starts right after the prefix.
    DigitRun,
}

impl SegmentParsing {
    pub fn label(&self) -> &'static str {
        match self {
            SegmentParsing::FixedWindow => "fixed-window",
            SegmentParsing::DigitRun => "digit-run",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_defaults_node_to_zero() {
        let req: AllocationRequest = serde_json::from_str(
            r#"{"os":"centos-7","environment":"P","serverFunction":"SQL"}"#,
        )
        .unwrap();
        assert_eq!(req.node, "0");
        assert_eq!(req.server_function, "SQL");
    }

    #[test]
    fn segment_parsing_uses_kebab_case() {
        let parsed: SegmentParsing = serde_json::from_str(r#""digit-run""#).unwrap();
        assert_eq!(parsed, SegmentParsing::DigitRun);
        assert_eq!(SegmentParsing::default().label(), "fixed-window");
    }
}
