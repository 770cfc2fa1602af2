use retouch_core::config::InputConfig;
use retouch_core::crop::Handle;
use retouch_core::geometry::Point;
use retouch_core::input::{route_pointer_down, Gesture, InputRouter, Key, Mode, RouteContext, Target};
use retouch_core::mask::DrawTool;

fn ctx(mode: Mode) -> RouteContext {
    RouteContext {
        mode,
        space_held: false,
        crop_handle: None,
        annotation_pending: false,
    }
}

#[test]
fn test_space_wins_over_every_mode() {
    for mode in Mode::ALL {
        let c = RouteContext {
            space_held: true,
            crop_handle: Some(Handle::Move),
            ..ctx(mode)
        };
        assert_eq!(route_pointer_down(&c), Target::Pan, "{mode}");
    }
}

#[test]
fn test_draw_modes_route_to_mask() {
    assert_eq!(
        route_pointer_down(&ctx(Mode::Draw(DrawTool::Brush))),
        Target::Mask(DrawTool::Brush)
    );
    assert_eq!(
        route_pointer_down(&ctx(Mode::Draw(DrawTool::Lasso))),
        Target::Mask(DrawTool::Lasso)
    );
}

#[test]
fn test_crop_requires_handle_hit() {
    assert_eq!(route_pointer_down(&ctx(Mode::Crop)), Target::None);
    let c = RouteContext {
        crop_handle: Some(Handle::TopLeft),
        ..ctx(Mode::Crop)
    };
    assert_eq!(route_pointer_down(&c), Target::Crop(Handle::TopLeft));
}

#[test]
fn test_annotate_blocked_while_pending() {
    assert_eq!(route_pointer_down(&ctx(Mode::Annotate)), Target::Annotation);
    let c = RouteContext {
        annotation_pending: true,
        ..ctx(Mode::Annotate)
    };
    assert_eq!(route_pointer_down(&c), Target::None);
}

#[test]
fn test_mode_parse_and_display() {
    for mode in Mode::ALL {
        assert_eq!(mode.to_string().parse::<Mode>().unwrap(), mode);
    }
    assert_eq!("Lasso".parse::<Mode>().unwrap(), Mode::Draw(DrawTool::Lasso));
    assert!("erase".parse::<Mode>().is_err());
    assert_eq!(Mode::default(), Mode::Annotate);
}

#[test]
fn test_key_codes() {
    assert_eq!(Key::from_code("Space"), Key::Space);
    assert_eq!(Key::from_code(" "), Key::Space);
    assert_eq!(Key::from_code("Escape"), Key::Escape);
    assert_eq!(Key::from_code("esc"), Key::Escape);
    assert_eq!(Key::from_code("KeyA"), Key::Other("KeyA".into()));
}

#[test]
fn test_pan_tracking_yields_deltas() {
    let mut router = InputRouter::new(&InputConfig::default());
    router.key_down(&Key::Space);
    assert!(router.space_held());

    router.begin(Target::Pan, Point::new(10.0, 10.0));
    assert_eq!(router.track_pan(Point::new(15.0, 8.0)), Some(Point::new(5.0, -2.0)));
    assert_eq!(router.track_pan(Point::new(20.0, 8.0)), Some(Point::new(5.0, 0.0)));
}

#[test]
fn test_space_release_ends_pan() {
    let mut router = InputRouter::new(&InputConfig::default());
    router.key_down(&Key::Space);
    router.begin(Target::Pan, Point::ZERO);

    assert!(router.key_up(&Key::Space));
    assert!(!router.space_held());
    assert!(!router.is_busy());
    assert_eq!(router.track_pan(Point::new(5.0, 5.0)), None);
}

#[test]
fn test_click_tolerance() {
    let mut router = InputRouter::new(&InputConfig { click_tolerance: 4.0 });
    router.begin(Target::Annotation, Point::new(100.0, 100.0));
    router.track_click(Point::new(103.0, 100.0));
    assert_eq!(
        router.finish(),
        Gesture::Click {
            down: Point::new(100.0, 100.0),
            moved: false,
        }
    );

    router.begin(Target::Annotation, Point::new(100.0, 100.0));
    router.track_click(Point::new(110.0, 100.0));
    router.track_click(Point::new(100.0, 100.0));
    assert!(matches!(router.finish(), Gesture::Click { moved: true, .. }));
    assert_eq!(router.gesture(), Gesture::Idle);
}
