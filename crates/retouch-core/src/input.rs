//! Pointer and keyboard routing.
//!
//! Deciding who receives a pointer-down is a pure function of
//! [`RouteContext`]; [`InputRouter`] only tracks the modifier state and the
//! single gesture in progress.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::InputConfig;
use crate::crop::Handle;
use crate::error::RetouchError;
use crate::geometry::Point;
use crate::mask::DrawTool;

/// Editing mode selected by the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Mode {
    Draw(DrawTool),
    Crop,
    #[default]
    Annotate,
}

impl Mode {
    pub const ALL: [Mode; 4] = [
        Mode::Draw(DrawTool::Brush),
        Mode::Draw(DrawTool::Lasso),
        Mode::Crop,
        Mode::Annotate,
    ];

    pub fn is_draw(self) -> bool {
        matches!(self, Mode::Draw(_))
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Draw(DrawTool::Brush) => write!(f, "brush"),
            Mode::Draw(DrawTool::Lasso) => write!(f, "lasso"),
            Mode::Crop => write!(f, "crop"),
            Mode::Annotate => write!(f, "annotate"),
        }
    }
}

impl FromStr for Mode {
    type Err = RetouchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "brush" | "draw" => Ok(Mode::Draw(DrawTool::Brush)),
            "lasso" => Ok(Mode::Draw(DrawTool::Lasso)),
            "crop" => Ok(Mode::Crop),
            "annotate" | "text" => Ok(Mode::Annotate),
            _ => Err(RetouchError::InvalidMode(s.to_string())),
        }
    }
}

impl TryFrom<String> for Mode {
    type Error = RetouchError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Mode> for String {
    fn from(mode: Mode) -> Self {
        mode.to_string()
    }
}

/// Keys the editor reacts to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Key {
    Space,
    Escape,
    Other(String),
}

impl Key {
    /// Map a DOM-style key code or name (`"Space"`, `" "`, `"Escape"`).
    pub fn from_code(code: &str) -> Self {
        match code {
            " " => Key::Space,
            c if c.eq_ignore_ascii_case("space") => Key::Space,
            c if c.eq_ignore_ascii_case("escape") || c.eq_ignore_ascii_case("esc") => Key::Escape,
            c => Key::Other(c.to_string()),
        }
    }
}

/// Receiver of a pointer-down.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    Pan,
    Mask(DrawTool),
    Crop(Handle),
    Annotation,
    /// Pass-through: nothing reacts.
    None,
}

/// Everything the routing decision depends on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouteContext {
    pub mode: Mode,
    pub space_held: bool,
    /// Crop handle under the pointer, when in crop mode.
    pub crop_handle: Option<Handle>,
    pub annotation_pending: bool,
}

/// Pick the single receiver of a pointer-down.
///
/// Priority: space-drag pan, then the mask in draw modes, then a hit crop
/// handle, then a new annotation when none is being edited.
pub fn route_pointer_down(ctx: &RouteContext) -> Target {
    if ctx.space_held {
        return Target::Pan;
    }
    match ctx.mode {
        Mode::Draw(tool) => Target::Mask(tool),
        Mode::Crop => ctx.crop_handle.map_or(Target::None, Target::Crop),
        Mode::Annotate if !ctx.annotation_pending => Target::Annotation,
        Mode::Annotate => Target::None,
    }
}

/// Gesture in progress between pointer-down and pointer-up.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Gesture {
    #[default]
    Idle,
    /// `last` is the previous pointer position in screen pixels.
    Panning { last: Point },
    Stroke,
    CropDrag,
    /// Candidate annotation click; `down` in screen pixels.
    Click { down: Point, moved: bool },
}

#[derive(Clone, Debug)]
pub struct InputRouter {
    mode: Mode,
    space_held: bool,
    gesture: Gesture,
    click_tolerance: f32,
}

impl InputRouter {
    pub fn new(config: &InputConfig) -> Self {
        Self {
            mode: Mode::default(),
            space_held: false,
            gesture: Gesture::Idle,
            click_tolerance: config.click_tolerance,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Callers complete any open gesture before switching.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    pub fn space_held(&self) -> bool {
        self.space_held
    }

    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    pub fn is_busy(&self) -> bool {
        self.gesture != Gesture::Idle
    }

    pub fn context(&self, crop_handle: Option<Handle>, annotation_pending: bool) -> RouteContext {
        RouteContext {
            mode: self.mode,
            space_held: self.space_held,
            crop_handle,
            annotation_pending,
        }
    }

    /// Start the gesture for `target` at `screen`.
    pub fn begin(&mut self, target: Target, screen: Point) {
        self.gesture = match target {
            Target::Pan => Gesture::Panning { last: screen },
            Target::Mask(_) => Gesture::Stroke,
            Target::Crop(_) => Gesture::CropDrag,
            Target::Annotation => Gesture::Click {
                down: screen,
                moved: false,
            },
            Target::None => Gesture::Idle,
        };
        debug!(?target, "gesture started");
    }

    /// Pointer delta since the last pan update, when panning.
    pub fn track_pan(&mut self, screen: Point) -> Option<Point> {
        let Gesture::Panning { last } = &mut self.gesture else {
            return None;
        };
        let delta = screen - *last;
        *last = screen;
        Some(delta)
    }

    /// Mark a click candidate as a drag once it leaves the tolerance.
    pub fn track_click(&mut self, screen: Point) {
        if let Gesture::Click { down, moved } = &mut self.gesture {
            if !*moved && down.distance_to(screen) > self.click_tolerance {
                *moved = true;
                trace!("click became a drag");
            }
        }
    }

    /// End the gesture and return what it was.
    pub fn finish(&mut self) -> Gesture {
        std::mem::take(&mut self.gesture)
    }

    pub fn key_down(&mut self, key: &Key) {
        if *key == Key::Space && !self.space_held {
            self.space_held = true;
            trace!("space down");
        }
    }

    /// Returns `true` when releasing Space ended a pan.
    pub fn key_up(&mut self, key: &Key) -> bool {
        if *key != Key::Space {
            return false;
        }
        self.space_held = false;
        if matches!(self.gesture, Gesture::Panning { .. }) {
            self.gesture = Gesture::Idle;
            debug!("pan ended by space release");
            return true;
        }
        false
    }
}
