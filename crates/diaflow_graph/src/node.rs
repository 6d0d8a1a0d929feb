// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node definitions for the diagram model.

use crate::cell::CellId;
use crate::geometry::{Point, Rect, Size};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A node in a diagram
///
/// The size is optional: a node created from raw data may not have been
/// measured yet. Consumers that need a size substitute their own default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Unique cell ID
    pub id: CellId,
    /// Top-left position
    pub position: Point,
    /// Measured size, if known
    pub size: Option<Size>,
    /// Display label
    pub label: Option<String>,
    /// Opaque style/attribute payload
    #[serde(default)]
    pub attrs: Map<String, Value>,
}

impl Node {
    /// Create a new node with a generated id at the origin
    pub fn new() -> Self {
        Self {
            id: CellId::new(),
            position: Point::default(),
            size: None,
            label: None,
            attrs: Map::new(),
        }
    }

    /// Create a node with a specific id
    pub fn with_id(id: impl Into<CellId>) -> Self {
        Self {
            id: id.into(),
            ..Self::new()
        }
    }

    /// Set the position
    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.position = Point::new(x, y);
        self
    }

    /// Set the size
    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.size = Some(Size::new(width, height));
        self
    }

    /// Set the label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set an attribute value
    pub fn with_attr(mut self, key: impl Into<String>, value: Value) -> Self {
        self.attrs.insert(key.into(), value);
        self
    }

    /// Move the node to a new position
    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    /// The node's bounding rectangle; zero-sized when unmeasured
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size.unwrap_or_default())
    }

    /// Render the whole node as a JSON value, e.g. for payload embedding
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new()
    }
}
