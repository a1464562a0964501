//! Rendering of events for output

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::types::Event;

/// How events are written to the output stream
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `key=value` pairs separated by spaces
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

impl OutputFormat {
    /// Render a single event as one output line
    pub fn render(&self, event: &Event) -> Result<String, serde_json::Error> {
        match self {
            Self::Text => Ok(event.to_string()),
            Self::Json => serde_json::to_string(event),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        debug!(%s, "OutputFormat::from_str: called");
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => {
                debug!(%s, "OutputFormat::from_str: unknown format");
                Err(format!("Unknown format: {}. Use: text or json", s))
            }
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}
