//! Timeboard and screenboard documents.
//!
//! The two board kinds carry the same information under different field
//! names. Both are normalized into [`Board`] on the way in and written from
//! a [`BoardDefinition`] on the way out.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::ResourceKind;

/// Remote identifier of a board.
///
/// The remote hands out integer ids, but older boards and fixtures use
/// strings, so either form is accepted and kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct BoardId(String);

impl BoardId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BoardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for BoardId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(u64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Number(n) => BoardId(n.to_string()),
            RawId::Text(s) => BoardId(s),
        })
    }
}

/// Which dashboard API a board lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoardKind {
    Timeboard,
    Screenboard,
}

impl BoardKind {
    pub fn resource(&self) -> ResourceKind {
        match self {
            BoardKind::Timeboard => ResourceKind::Timeboard,
            BoardKind::Screenboard => ResourceKind::Screenboard,
        }
    }

    /// Name of the field holding the board's content items.
    pub fn content_field(&self) -> &'static str {
        match self {
            BoardKind::Timeboard => "graphs",
            BoardKind::Screenboard => "widgets",
        }
    }
}

impl fmt::Display for BoardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.resource().fmt(f)
    }
}

/// An entry of a board listing. Both kinds list `id` and `title`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BoardSummary {
    pub id: BoardId,
    pub title: String,
}

/// Response of the timeboard listing.
#[derive(Debug, Clone, Deserialize)]
pub struct TimeboardList {
    pub dashes: Vec<BoardSummary>,
}

/// Response of the screenboard listing.
#[derive(Debug, Clone, Deserialize)]
pub struct ScreenboardList {
    pub screenboards: Vec<BoardSummary>,
}

/// Full timeboard, as nested under `dash` by the remote.
#[derive(Debug, Clone, Deserialize)]
pub struct TimeboardRecord {
    pub id: BoardId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub graphs: Vec<Value>,
}

/// Envelope of a single-timeboard response.
#[derive(Debug, Clone, Deserialize)]
pub struct TimeboardEnvelope {
    pub dash: TimeboardRecord,
}

/// Full screenboard.
#[derive(Debug, Clone, Deserialize)]
pub struct ScreenboardRecord {
    pub id: BoardId,
    pub board_title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub widgets: Vec<Value>,
}

/// A board of either kind, normalized for diffing.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    pub id: BoardId,
    pub title: String,
    pub description: Option<String>,
    pub content: Vec<Value>,
}

impl From<TimeboardEnvelope> for Board {
    fn from(envelope: TimeboardEnvelope) -> Self {
        let dash = envelope.dash;
        Board {
            id: dash.id,
            title: dash.title,
            description: dash.description,
            content: dash.graphs,
        }
    }
}

impl From<ScreenboardRecord> for Board {
    fn from(record: ScreenboardRecord) -> Self {
        Board {
            id: record.id,
            title: record.board_title,
            description: record.description,
            content: record.widgets,
        }
    }
}

/// Desired state of a board of either kind.
///
/// Content items (graphs or widgets) are opaque and passed through verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardDefinition {
    pub title: String,
    pub description: String,
    pub content: Vec<Value>,
}

impl BoardDefinition {
    /// The request body for the given board kind.
    pub fn to_body(&self, kind: BoardKind) -> Value {
        let title_field = match kind {
            BoardKind::Timeboard => "title",
            BoardKind::Screenboard => "board_title",
        };
        let mut body = serde_json::Map::new();
        body.insert(title_field.to_string(), Value::String(self.title.clone()));
        body.insert(
            "description".to_string(),
            Value::String(self.description.clone()),
        );
        body.insert(
            kind.content_field().to_string(),
            Value::Array(self.content.clone()),
        );
        Value::Object(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_board_id_accepts_numbers_and_strings() {
        let numeric: BoardId = serde_json::from_value(json!(1234)).unwrap();
        assert_eq!(numeric.as_str(), "1234");
        let text: BoardId = serde_json::from_value(json!("dash1")).unwrap();
        assert_eq!(text, BoardId::new("dash1"));
    }

    #[test]
    fn test_timeboard_normalizes() {
        let envelope: TimeboardEnvelope = serde_json::from_value(json!({
            "resource": "/api/v1/dash/1",
            "dash": {
                "id": 1,
                "title": "t",
                "description": "d",
                "graphs": [1, 2]
            }
        }))
        .unwrap();
        let board = Board::from(envelope);
        assert_eq!(board.id.as_str(), "1");
        assert_eq!(board.title, "t");
        assert_eq!(board.description.as_deref(), Some("d"));
        assert_eq!(board.content, vec![json!(1), json!(2)]);
    }

    #[test]
    fn test_screenboard_normalizes_without_description() {
        let record: ScreenboardRecord = serde_json::from_value(json!({
            "id": "sb1",
            "board_title": "s",
            "widgets": [{"type": "note"}]
        }))
        .unwrap();
        let board = Board::from(record);
        assert_eq!(board.title, "s");
        assert!(board.description.is_none());
        assert_eq!(board.content.len(), 1);
    }

    #[test]
    fn test_definition_body_uses_kind_field_names() {
        let def = BoardDefinition {
            title: "t".to_string(),
            description: "d".to_string(),
            content: vec![json!(1)],
        };
        assert_eq!(
            def.to_body(BoardKind::Timeboard),
            json!({"title": "t", "description": "d", "graphs": [1]})
        );
        assert_eq!(
            def.to_body(BoardKind::Screenboard),
            json!({"board_title": "t", "description": "d", "widgets": [1]})
        );
    }
}
