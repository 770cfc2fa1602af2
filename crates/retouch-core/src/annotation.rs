//! Text notes pinned to normalized image positions.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::error::{RetouchError, Result};
use crate::geometry::{Point, Size};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub id: u64,
    /// Normalized position in `[0, 1]`.
    pub x: f32,
    pub y: f32,
    pub text: String,
}

impl Annotation {
    /// Position in canvas pixels on an image of `image` pixels.
    pub fn canvas_position(&self, image: Size) -> Point {
        Point::new(self.x * image.width, self.y * image.height)
    }
}

/// Ordered annotations. Ids are never reused within one layer.
#[derive(Clone, Debug, Default)]
pub struct AnnotationLayer {
    items: Vec<Annotation>,
    next_id: u64,
    /// Annotation whose text is being edited.
    editing: Option<u64>,
}

impl AnnotationLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an empty annotation at `canvas` (pixels on an image of `image`
    /// pixels). Points outside the image are rejected.
    pub fn add_at(&mut self, canvas: Point, image: Size) -> Option<u64> {
        if image.is_empty() {
            return None;
        }
        let x = canvas.x / image.width;
        let y = canvas.y / image.height;
        if !((0.0..=1.0).contains(&x) && (0.0..=1.0).contains(&y)) {
            trace!(x, y, "annotation outside image ignored");
            return None;
        }

        let id = self.next_id;
        let Some(next) = id.checked_add(1) else {
            warn!("annotation ids exhausted");
            return None;
        };
        self.next_id = next;
        self.items.push(Annotation {
            id,
            x,
            y,
            text: String::new(),
        });
        self.editing = Some(id);
        debug!(id, x, y, "annotation added");
        Some(id)
    }

    /// Returns `false` for an unknown id.
    pub fn update_text(&mut self, id: u64, text: impl Into<String>) -> bool {
        match self.items.iter_mut().find(|a| a.id == id) {
            Some(a) => {
                a.text = text.into();
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: u64) -> Option<Annotation> {
        let idx = self.items.iter().position(|a| a.id == id)?;
        if self.editing == Some(id) {
            self.editing = None;
        }
        debug!(id, "annotation removed");
        Some(self.items.remove(idx))
    }

    /// The annotation being edited, if any.
    pub fn pending(&self) -> Option<u64> {
        self.editing
    }

    pub fn finish_editing(&mut self) -> Option<u64> {
        self.editing.take()
    }

    pub fn get(&self, id: u64) -> Option<&Annotation> {
        self.items.iter().find(|a| a.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Annotation> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.editing = None;
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.items)?)
    }

    /// Load a list written by [`to_json`](Self::to_json). New ids continue
    /// after the largest loaded one. Duplicate ids and an id of `u64::MAX`
    /// (which leaves no room for new ones) are rejected.
    pub fn from_json(s: &str) -> Result<Self> {
        let items: Vec<Annotation> = serde_json::from_str(s)?;

        let mut seen = HashSet::with_capacity(items.len());
        let mut next_id = 0u64;
        for a in &items {
            if !seen.insert(a.id) {
                return Err(RetouchError::InvalidAnnotations(format!("duplicate id {}", a.id)));
            }
            let after = a.id.checked_add(1).ok_or_else(|| {
                RetouchError::InvalidAnnotations(format!("id {} leaves no room for new annotations", a.id))
            })?;
            next_id = next_id.max(after);
        }
        Ok(Self {
            items,
            next_id,
            editing: None,
        })
    }
}
