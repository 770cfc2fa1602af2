//! Scripted event replay.
//!
//! A script is a TOML document listing host events. Replaying it against an
//! [`EditSession`] drives the engine exactly as an interactive host would,
//! which is how the CLI edits images headlessly.
//!
//! ```toml
//! coordinates = "canvas"
//!
//! [container]
//! width = 800
//! height = 600
//!
//! [[events]]
//! type = "mode"
//! mode = "brush"
//!
//! [[events]]
//! type = "pointer_down"
//! x = 100.0
//! y = 100.0
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::crop::AspectRatio;
use crate::error::{RetouchError, Result};
use crate::geometry::{Point, Size};
use crate::input::{Key, Mode};
use crate::session::{Commit, EditSession};

/// How event positions are interpreted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordinateSpace {
    /// Container pixels, as a host would report them.
    #[default]
    Screen,
    /// Image pixels, mapped through the live viewport before dispatch.
    Canvas,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContainerSize {
    pub width: f32,
    pub height: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptEvent {
    Mode { mode: Mode },
    BrushSize { size: f32 },
    Aspect { ratio: AspectRatio },
    Container { width: f32, height: f32 },
    PointerDown { x: f32, y: f32 },
    PointerMove { x: f32, y: f32 },
    PointerUp { x: f32, y: f32 },
    PointerLeave,
    Wheel { x: f32, y: f32, delta: f32 },
    KeyDown { key: String },
    KeyUp { key: String },
    /// Set the text of the annotation being edited and finish editing it.
    AnnotateText { text: String },
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub container: Option<ContainerSize>,
    #[serde(default)]
    pub coordinates: CoordinateSpace,
    #[serde(default)]
    pub events: Vec<ScriptEvent>,
}

impl Script {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let s = std::fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }
}

/// Counts gathered during a replay.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub events: usize,
    pub mask_commits: usize,
    pub crop_commits: usize,
    pub annotations_added: usize,
}

impl ReplaySummary {
    fn record(&mut self, commit: Option<Commit>) {
        match commit {
            Some(Commit::Mask(_)) => self.mask_commits += 1,
            Some(Commit::Crop(_)) => self.crop_commits += 1,
            Some(Commit::Annotation(_)) => self.annotations_added += 1,
            None => {}
        }
    }
}

/// Feed every event of `script` to `session`. `progress(done, total)` is
/// called after each event.
pub fn replay(
    session: &mut EditSession,
    script: &Script,
    mut progress: impl FnMut(usize, usize),
) -> Result<ReplaySummary> {
    if session.image().is_none() {
        return Err(RetouchError::NoImage);
    }
    if let Some(c) = script.container {
        session.set_container_size(Size::new(c.width, c.height));
        session.fit_view();
    }

    let total = script.events.len();
    let mut summary = ReplaySummary::default();

    for (i, event) in script.events.iter().enumerate() {
        debug!(index = i, ?event, "replaying event");
        let space = script.coordinates;

        match event {
            ScriptEvent::Mode { mode } => session.set_mode(*mode),
            ScriptEvent::BrushSize { size } => session.set_brush_size(*size),
            ScriptEvent::Aspect { ratio } => session.set_crop_aspect_ratio(*ratio),
            ScriptEvent::Container { width, height } => {
                session.set_container_size(Size::new(*width, *height));
                session.fit_view();
            }
            ScriptEvent::PointerDown { x, y } => {
                let p = to_screen(session, space, *x, *y);
                session.on_pointer_down(p);
            }
            ScriptEvent::PointerMove { x, y } => {
                let p = to_screen(session, space, *x, *y);
                session.on_pointer_move(p);
            }
            ScriptEvent::PointerUp { x, y } => {
                let p = to_screen(session, space, *x, *y);
                summary.record(session.on_pointer_up(p));
            }
            ScriptEvent::PointerLeave => summary.record(session.on_pointer_leave()),
            ScriptEvent::Wheel { x, y, delta } => {
                let p = to_screen(session, space, *x, *y);
                session.on_wheel(p, *delta);
            }
            ScriptEvent::KeyDown { key } => session.on_key_down(&Key::from_code(key)),
            ScriptEvent::KeyUp { key } => session.on_key_up(&Key::from_code(key)),
            ScriptEvent::AnnotateText { text } => {
                let layer = session.annotations_mut();
                let id = layer.pending().ok_or_else(|| {
                    RetouchError::Script(format!("event {}: no annotation is being edited", i + 1))
                })?;
                layer.update_text(id, text.clone());
                layer.finish_editing();
            }
        }

        summary.events += 1;
        progress(i + 1, total);
    }

    info!(
        events = summary.events,
        masks = summary.mask_commits,
        crops = summary.crop_commits,
        annotations = summary.annotations_added,
        "replay finished"
    );
    Ok(summary)
}

fn to_screen(session: &EditSession, space: CoordinateSpace, x: f32, y: f32) -> Point {
    let p = Point::new(x, y);
    match space {
        CoordinateSpace::Screen => p,
        CoordinateSpace::Canvas => session.viewport().to_screen(p),
    }
}
