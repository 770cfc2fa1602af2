use retouch_core::crop::{AspectRatio, CropRegion};
use retouch_core::error::RetouchError;
use retouch_core::input::Mode;
use retouch_core::mask::DrawTool;
use retouch_core::script::{replay, CoordinateSpace, Script, ScriptEvent};
use retouch_core::session::EditSession;

mod common;

const BRUSH_SCRIPT: &str = r#"
coordinates = "canvas"

[container]
width = 400
height = 300

[[events]]
type = "mode"
mode = "brush"

[[events]]
type = "brush_size"
size = 10.0

[[events]]
type = "pointer_down"
x = 20.0
y = 20.0

[[events]]
type = "pointer_move"
x = 60.0
y = 20.0

[[events]]
type = "pointer_up"
x = 60.0
y = 20.0
"#;

#[test]
fn test_parse_tagged_events() {
    let script = Script::from_toml_str(BRUSH_SCRIPT).unwrap();
    assert_eq!(script.coordinates, CoordinateSpace::Canvas);
    assert_eq!(script.events.len(), 5);
    assert_eq!(
        script.events[0],
        ScriptEvent::Mode {
            mode: Mode::Draw(DrawTool::Brush)
        }
    );
    assert_eq!(script.events[2], ScriptEvent::PointerDown { x: 20.0, y: 20.0 });
}

#[test]
fn test_unknown_event_type_fails() {
    let err = Script::from_toml_str("[[events]]\ntype = \"teleport\"\n").unwrap_err();
    assert!(matches!(err, RetouchError::TomlParse(_)));
}

#[test]
fn test_replay_canvas_coordinates() {
    let mut session = EditSession::default();
    session.load_image(common::gray_image(800, 600)).unwrap();
    let script = Script::from_toml_str(BRUSH_SCRIPT).unwrap();

    let mut calls = Vec::new();
    let summary = replay(&mut session, &script, |done, total| calls.push((done, total))).unwrap();

    assert_eq!(summary.events, 5);
    assert_eq!(summary.mask_commits, 1);
    assert_eq!(calls.len(), 5);
    assert_eq!(calls.last(), Some(&(5, 5)));

    // Canvas coordinates survive the 0.475 fit zoom.
    let mask = session.mask().unwrap();
    assert!(mask.is_selected(40, 20));
    assert!(!mask.is_selected(40, 40));
}

#[test]
fn test_replay_crop_and_annotation() {
    let mut session = common::identity_session(100, 100);
    let script = Script {
        container: None,
        coordinates: CoordinateSpace::Screen,
        events: vec![
            ScriptEvent::PointerDown { x: 10.0, y: 10.0 },
            ScriptEvent::PointerUp { x: 10.0, y: 10.0 },
            ScriptEvent::AnnotateText {
                text: "dust spot".into(),
            },
            ScriptEvent::Aspect {
                ratio: AspectRatio::Free,
            },
            ScriptEvent::Mode { mode: Mode::Crop },
            ScriptEvent::PointerDown { x: 100.0, y: 100.0 },
            ScriptEvent::PointerMove { x: 50.0, y: 80.0 },
            ScriptEvent::PointerLeave,
        ],
    };

    let summary = replay(&mut session, &script, |_, _| {}).unwrap();
    assert_eq!(summary.annotations_added, 1);
    assert_eq!(summary.crop_commits, 1);
    assert_eq!(session.crop_region(), Some(CropRegion::new(0.0, 0.0, 0.5, 0.8)));

    let note = session.annotations().iter().next().unwrap();
    assert_eq!(note.text, "dust spot");
    assert_eq!(session.annotations().pending(), None);
}

#[test]
fn test_annotate_text_without_pending_fails() {
    let mut session = common::identity_session(50, 50);
    let script = Script {
        events: vec![ScriptEvent::AnnotateText { text: "x".into() }],
        ..Script::default()
    };
    let err = replay(&mut session, &script, |_, _| {}).unwrap_err();
    assert!(matches!(err, RetouchError::Script(_)));
}

#[test]
fn test_replay_requires_image() {
    let mut session = EditSession::default();
    let script = Script::default();
    assert!(matches!(
        replay(&mut session, &script, |_, _| {}),
        Err(RetouchError::NoImage)
    ));
}

#[test]
fn test_script_serializes_back_to_toml() {
    let script = Script::from_toml_str(BRUSH_SCRIPT).unwrap();
    let text = toml::to_string(&script).unwrap();
    assert_eq!(Script::from_toml_str(&text).unwrap(), script);
}
