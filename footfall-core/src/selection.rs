// Click handling and the single-selection state machine

use crate::model::PoiId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// A click as delivered by the rendering runtime.
///
/// The POI id arrives either as a bare scalar or as the first element of a
/// `[id, raw_visit_count]` tuple. Objects carrying a `customdata` key, or a
/// `points` list of such objects, are unwrapped first.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub enum ClickPayload {
    Tuple(Vec<Value>),
    Scalar(Value),
}

impl From<Value> for ClickPayload {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(items) => ClickPayload::Tuple(items),
            Value::Object(map) => {
                if let Some(inner) = map.get("customdata") {
                    return ClickPayload::from(inner.clone());
                }
                if let Some(Value::Array(points)) = map.get("points")
                    && let Some(point) = points.first()
                {
                    return ClickPayload::from(point.clone());
                }
                ClickPayload::Scalar(Value::Object(map))
            }
            other => ClickPayload::Scalar(other),
        }
    }
}

impl From<&str> for ClickPayload {
    fn from(id: &str) -> Self {
        ClickPayload::Scalar(Value::String(id.to_string()))
    }
}

impl ClickPayload {
    /// Parse one line of input. Lines that are not JSON are taken as a bare id.
    ///
    /// Blank lines carry no click and yield `None`.
    pub fn parse_line(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        Some(match serde_json::from_str::<Value>(line) {
            Ok(value) => ClickPayload::from(value),
            Err(_) => ClickPayload::from(line),
        })
    }

    pub fn with_raw_count(id: &str, raw_visit_count: u64) -> Self {
        ClickPayload::Tuple(vec![Value::String(id.to_string()), Value::from(raw_visit_count)])
    }

    /// Reduce either shape to an id plus an optional raw visit count.
    pub fn to_selection(&self) -> Selection {
        match self {
            ClickPayload::Tuple(items) => match items.first() {
                Some(first) if is_scalar(first) => {
                    let selection = Selection::new(&scalar_text(first));
                    match items.get(1).and_then(count_value) {
                        Some(raw) => selection.with_raw_count(raw),
                        None => selection,
                    }
                }
                _ => Selection::new(&Value::Array(items.clone()).to_string()),
            },
            ClickPayload::Scalar(value) => Selection::new(&scalar_text(value)),
        }
    }
}

fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Array(_) | Value::Object(_))
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn count_value(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| *f >= 0.0 && *f < u64::MAX as f64 && f.fract() == 0.0)
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Selection {
    pub poi_id: PoiId,
    /// The id as it was clicked, trimmed but with its casing intact.
    #[serde(skip)]
    pub clicked: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_visit_count: Option<u64>,
}

impl Selection {
    pub fn new(poi_id: &str) -> Self {
        Self {
            poi_id: PoiId::canonical(poi_id),
            clicked: poi_id.trim().to_string(),
            raw_visit_count: None,
        }
    }

    /// Spelling used in user-facing text.
    pub fn display_id(&self) -> &str {
        &self.clicked
    }

    pub fn with_raw_count(mut self, raw_visit_count: u64) -> Self {
        self.raw_visit_count = Some(raw_visit_count);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SelectionState {
    #[default]
    NoSelection,
    Selected(Selection),
}

impl SelectionState {
    pub fn selected_id(&self) -> Option<&PoiId> {
        match self {
            SelectionState::NoSelection => None,
            SelectionState::Selected(selection) => Some(&selection.poi_id),
        }
    }

    pub fn is_selected(&self, id: &PoiId) -> bool {
        self.selected_id() == Some(id)
    }
}

/// Tracks the one POI (if any) the user last clicked.
#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    state: SelectionState,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// Every click replaces the previous selection outright.
    pub fn on_click(&mut self, payload: &ClickPayload) -> &SelectionState {
        self.select(payload.to_selection())
    }

    pub fn select(&mut self, selection: Selection) -> &SelectionState {
        debug!(
            "Selection {:?} -> {}",
            self.state.selected_id().map(PoiId::as_str),
            selection.poi_id
        );
        self.state = SelectionState::Selected(selection);
        &self.state
    }
}
