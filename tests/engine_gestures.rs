use egui::{Vec2, pos2};
use gridpaint::{
    CanvasContext, CanvasEngine, CanvasResponse, GestureConfig, InputEvent, PixelBuffer,
    PixelColor, Point, Snapshot, Tool, UndoHistory,
};

fn bytes_of(color: PixelColor, width: usize, height: usize) -> Vec<u8> {
    [color.r, color.g, color.b, color.a].repeat(width * height)
}

fn ctx(tool: Tool) -> CanvasContext {
    CanvasContext {
        tool,
        color: PixelColor::BLACK,
        zoom: 1.0,
        config: GestureConfig::default(),
    }
}

#[test]
fn pen_paints_on_press_and_while_dragging() {
    let mut data = bytes_of(PixelColor::TRANSPARENT, 4, 4);
    let mut buffer = PixelBuffer::new(&mut data, 4, 4).unwrap();
    let mut engine = CanvasEngine::new();
    let ctx = ctx(Tool::Pen);

    let responses = engine.handle_event(&ctx, &mut buffer, &InputEvent::PointerDown {
        pos: pos2(0.5, 0.5),
    });
    assert_eq!(responses, vec![CanvasResponse::Edited]);

    engine.handle_event(&ctx, &mut buffer, &InputEvent::PointerMove {
        pos: pos2(2.5, 0.5),
    });
    assert_eq!(buffer.color_at(Point::new(0, 0)), Some(PixelColor::BLACK));
    assert_eq!(buffer.color_at(Point::new(2, 0)), Some(PixelColor::BLACK));
}

#[test]
fn pointer_move_without_press_does_not_paint() {
    let mut data = bytes_of(PixelColor::TRANSPARENT, 4, 4);
    let mut buffer = PixelBuffer::new(&mut data, 4, 4).unwrap();
    let mut engine = CanvasEngine::new();

    let responses = engine.handle_event(&ctx(Tool::Pen), &mut buffer, &InputEvent::PointerMove {
        pos: pos2(0.5, 0.5),
    });
    assert!(responses.is_empty());
    assert_eq!(
        buffer.color_at(Point::new(0, 0)),
        Some(PixelColor::TRANSPARENT)
    );
}

#[test]
fn pen_clips_to_the_canvas() {
    let mut data = bytes_of(PixelColor::TRANSPARENT, 2, 2);
    let mut buffer = PixelBuffer::new(&mut data, 2, 2).unwrap();
    let mut engine = CanvasEngine::new();

    let responses = engine.handle_event(&ctx(Tool::Pen), &mut buffer, &InputEvent::PointerDown {
        pos: pos2(10.0, 10.0),
    });
    assert!(responses.is_empty());
    assert!(data.iter().all(|&b| b == 0));
}

#[test]
fn pencil_paints_at_cell_center_but_not_near_the_edge() {
    let mut data = bytes_of(PixelColor::TRANSPARENT, 2, 2);
    let mut buffer = PixelBuffer::new(&mut data, 2, 2).unwrap();
    let mut engine = CanvasEngine::new();
    let ctx = ctx(Tool::Pencil);

    let responses = engine.handle_event(&ctx, &mut buffer, &InputEvent::PointerDown {
        pos: pos2(0.5, 0.5),
    });
    assert_eq!(responses, vec![CanvasResponse::Edited]);
    assert_eq!(buffer.color_at(Point::new(0, 0)), Some(PixelColor::BLACK));

    let responses = engine.handle_event(&ctx, &mut buffer, &InputEvent::PointerMove {
        pos: pos2(1.1, 1.1),
    });
    assert!(responses.is_empty());
    assert_eq!(
        buffer.color_at(Point::new(1, 1)),
        Some(PixelColor::TRANSPARENT)
    );
}

#[test]
fn eraser_clears_the_cell_under_the_zoomed_pointer() {
    let mut data = bytes_of(PixelColor::WHITE, 2, 2);
    let mut buffer = PixelBuffer::new(&mut data, 2, 2).unwrap();
    let mut engine = CanvasEngine::new();
    let mut ctx = ctx(Tool::Eraser);
    ctx.zoom = 2.0;

    // Device (3,3) at zoom 2 lands on grid cell (1,1).
    engine.handle_event(&ctx, &mut buffer, &InputEvent::PointerDown {
        pos: pos2(3.0, 3.0),
    });
    assert_eq!(
        buffer.color_at(Point::new(1, 1)),
        Some(PixelColor::TRANSPARENT)
    );
    assert_eq!(buffer.color_at(Point::new(0, 0)), Some(PixelColor::WHITE));
}

#[test]
fn bucket_fills_through_the_event_path() {
    let mut data = bytes_of(PixelColor::WHITE, 4, 4);
    let mut buffer = PixelBuffer::new(&mut data, 4, 4).unwrap();
    let mut engine = CanvasEngine::new();

    let responses = engine.handle_event(&ctx(Tool::Bucket), &mut buffer, &InputEvent::PointerDown {
        pos: pos2(1.5, 1.5),
    });
    assert_eq!(responses, vec![CanvasResponse::Edited]);
    assert_eq!(data, bytes_of(PixelColor::BLACK, 4, 4));
}

#[test]
fn dropper_reports_the_color_on_release_without_mutating() {
    let mut data = bytes_of(PixelColor::WHITE, 2, 2);
    let red = PixelColor::new(255, 0, 0, 255);
    let mut buffer = PixelBuffer::new(&mut data, 2, 2).unwrap();
    buffer.set(Point::new(1, 0), red);
    let mut engine = CanvasEngine::new();
    let ctx = ctx(Tool::Dropper);

    engine.handle_event(&ctx, &mut buffer, &InputEvent::PointerDown {
        pos: pos2(1.5, 0.5),
    });
    let responses = engine.handle_event(&ctx, &mut buffer, &InputEvent::PointerUp {
        pos: pos2(1.5, 0.5),
    });
    assert_eq!(responses, vec![
        CanvasResponse::ColorPicked(red),
        CanvasResponse::GestureEnded,
    ]);
    assert_eq!(buffer.color_at(Point::new(1, 0)), Some(red));
}

#[test]
fn pick_color_is_a_plain_bounds_checked_read() {
    let mut data = bytes_of(PixelColor::WHITE, 2, 2);
    let mut buffer = PixelBuffer::new(&mut data, 2, 2).unwrap();
    let red = PixelColor::new(255, 0, 0, 255);
    buffer.set(Point::new(0, 1), red);
    let engine = CanvasEngine::new();

    assert_eq!(engine.pick_color(&buffer, pos2(1.0, 3.0), 2.0), Some(red));
    assert_eq!(engine.pick_color(&buffer, pos2(9.0, 9.0), 2.0), None);
}

#[test]
fn dropper_clamps_out_of_canvas_picks_to_the_edge() {
    let mut data = bytes_of(PixelColor::WHITE, 2, 2);
    let mut buffer = PixelBuffer::new(&mut data, 2, 2).unwrap();
    let mut engine = CanvasEngine::new();

    let responses = engine.handle_event(&ctx(Tool::Dropper), &mut buffer, &InputEvent::PointerUp {
        pos: pos2(50.0, -3.0),
    });
    assert_eq!(responses, vec![
        CanvasResponse::ColorPicked(PixelColor::WHITE),
        CanvasResponse::GestureEnded,
    ]);
}

#[test]
fn release_ends_the_gesture_and_undo_restores_the_stroke() {
    let mut data = bytes_of(PixelColor::TRANSPARENT, 2, 2);
    let mut buffer = PixelBuffer::new(&mut data, 2, 2).unwrap();
    let mut engine = CanvasEngine::new();
    let ctx = ctx(Tool::Pen);
    let mut history = UndoHistory::new(Snapshot::capture(&buffer).unwrap());

    engine.handle_event(&ctx, &mut buffer, &InputEvent::PointerDown {
        pos: pos2(0.5, 0.5),
    });
    let responses = engine.handle_event(&ctx, &mut buffer, &InputEvent::PointerUp {
        pos: pos2(0.5, 0.5),
    });
    assert!(responses.contains(&CanvasResponse::GestureEnded));
    history.tick(Snapshot::capture(&buffer).unwrap());

    let restored = history.undo().unwrap().clone();
    restored.restore(&mut buffer).unwrap();
    assert_eq!(
        buffer.color_at(Point::new(0, 0)),
        Some(PixelColor::TRANSPARENT)
    );

    let redone = history.redo().unwrap().clone();
    redone.restore(&mut buffer).unwrap();
    assert_eq!(buffer.color_at(Point::new(0, 0)), Some(PixelColor::BLACK));
}

#[test]
fn two_finger_pinch_previews_then_commits_zoom_atomically() {
    let mut data = bytes_of(PixelColor::TRANSPARENT, 4, 4);
    let mut buffer = PixelBuffer::new(&mut data, 4, 4).unwrap();
    let mut engine = CanvasEngine::new();
    let mut ctx = ctx(Tool::Pen);
    ctx.zoom = 2.0;

    let start = vec![pos2(0.0, 0.0), pos2(0.0, 1.0)];
    let responses = engine.handle_event(&ctx, &mut buffer, &InputEvent::TouchStart {
        touches: start.clone(),
    });
    assert_eq!(responses, vec![CanvasResponse::PanZoomPreview {
        pan: Vec2::ZERO,
        scale: 1.0,
    }]);

    // Fingers spread by 10 device units: spread 1.1 at the default
    // sensitivity, previewed but not yet committed.
    let spread_out = vec![pos2(0.0, -5.0), pos2(0.0, 6.0)];
    let responses = engine.handle_event(&ctx, &mut buffer, &InputEvent::TouchMove {
        touches: spread_out,
    });
    match responses.as_slice() {
        [CanvasResponse::PanZoomPreview { pan, scale }] => {
            assert_eq!(*pan, Vec2::new(0.0, 0.0));
            assert!((scale - 1.1).abs() < 1e-5);
        }
        other => panic!("expected a pan/zoom preview, got {other:?}"),
    }
    assert!((engine.gesture().scale - 1.1).abs() < 1e-5);

    let responses = engine.handle_event(&ctx, &mut buffer, &InputEvent::TouchEnd);
    match responses.as_slice() {
        [CanvasResponse::PanZoomCommitted { pan, zoom }, CanvasResponse::GestureEnded] => {
            assert_eq!(*pan, Vec2::new(0.0, 0.0));
            assert!((zoom - 2.2).abs() < 1e-5);
        }
        other => panic!("expected a pan/zoom commit, got {other:?}"),
    }
    // Provisional scale resets once the zoom is committed.
    assert_eq!(engine.gesture().scale, 1.0);
    assert!(engine.gesture().initial_touches.is_none());
}

#[test]
fn single_touch_paints_like_a_pointer() {
    let mut data = bytes_of(PixelColor::TRANSPARENT, 2, 2);
    let mut buffer = PixelBuffer::new(&mut data, 2, 2).unwrap();
    let mut engine = CanvasEngine::new();

    let responses = engine.handle_event(&ctx(Tool::Pen), &mut buffer, &InputEvent::TouchStart {
        touches: vec![pos2(0.5, 0.5)],
    });
    assert_eq!(responses, vec![CanvasResponse::Edited]);
    assert_eq!(buffer.color_at(Point::new(0, 0)), Some(PixelColor::BLACK));
}

#[test]
fn three_finger_touches_are_ignored() {
    let mut data = bytes_of(PixelColor::TRANSPARENT, 2, 2);
    let mut buffer = PixelBuffer::new(&mut data, 2, 2).unwrap();
    let mut engine = CanvasEngine::new();

    let responses = engine.handle_event(&ctx(Tool::Pen), &mut buffer, &InputEvent::TouchStart {
        touches: vec![pos2(0.0, 0.0), pos2(1.0, 0.0), pos2(0.0, 1.0)],
    });
    assert!(responses.is_empty());
    assert!(data.iter().all(|&b| b == 0));
}

#[test]
fn move_tool_translates_the_buffer_on_tool_switch() {
    let red = PixelColor::new(255, 0, 0, 255);
    let mut data = bytes_of(PixelColor::TRANSPARENT, 4, 4);
    let mut buffer = PixelBuffer::new(&mut data, 4, 4).unwrap();
    buffer.set(Point::new(0, 0), red);

    let mut engine = CanvasEngine::new();
    let move_ctx = ctx(Tool::Move);
    assert!(!engine.select_tool(&move_ctx, &mut buffer));

    engine.handle_event(&move_ctx, &mut buffer, &InputEvent::PointerDown {
        pos: pos2(0.0, 0.0),
    });
    engine.handle_event(&move_ctx, &mut buffer, &InputEvent::PointerMove {
        pos: pos2(1.0, 2.0),
    });
    assert_eq!(engine.gesture().translate, Some(Vec2::new(1.0, 2.0)));
    // The base buffer stays pristine while the drag is in flight.
    assert_eq!(buffer.color_at(Point::new(0, 0)), Some(red));

    let edited = engine.select_tool(&ctx(Tool::Pen), &mut buffer);
    assert!(edited);
    assert_eq!(buffer.color_at(Point::new(1, 2)), Some(red));
    assert_eq!(
        buffer.color_at(Point::new(0, 0)),
        Some(PixelColor::TRANSPARENT)
    );
    assert!(engine.gesture().translate.is_none());
}

#[test]
fn move_drag_anchors_on_the_grid_cell_under_the_pointer() {
    let mut data = bytes_of(PixelColor::TRANSPARENT, 4, 4);
    let mut buffer = PixelBuffer::new(&mut data, 4, 4).unwrap();
    let mut engine = CanvasEngine::new();
    let mut move_ctx = ctx(Tool::Move);
    move_ctx.zoom = 2.0;
    engine.select_tool(&move_ctx, &mut buffer);
    assert_eq!(engine.gesture().move_origin, Some(Point::ZERO));

    // At zoom 2 the device point (3, 5) sits in cell (1, 2); the drag
    // anchors there, not on the fractional device position.
    engine.handle_event(&move_ctx, &mut buffer, &InputEvent::PointerDown {
        pos: pos2(3.0, 5.0),
    });
    assert_eq!(engine.gesture().move_origin, Some(Point::new(1, 2)));

    // point (3.5, 4.5) minus origin (1, 2), times zoom 2: (5, 5).
    engine.handle_event(&move_ctx, &mut buffer, &InputEvent::PointerMove {
        pos: pos2(7.0, 9.0),
    });
    assert_eq!(engine.gesture().translate, Some(Vec2::new(5.0, 5.0)));
}

#[test]
fn repeated_move_drags_compose_additively() {
    let mut data = bytes_of(PixelColor::TRANSPARENT, 4, 4);
    let mut buffer = PixelBuffer::new(&mut data, 4, 4).unwrap();
    let mut engine = CanvasEngine::new();
    let move_ctx = ctx(Tool::Move);
    engine.select_tool(&move_ctx, &mut buffer);

    for _ in 0..2 {
        engine.handle_event(&move_ctx, &mut buffer, &InputEvent::PointerDown {
            pos: pos2(0.0, 0.0),
        });
        engine.handle_event(&move_ctx, &mut buffer, &InputEvent::PointerMove {
            pos: pos2(10.0, 10.0),
        });
        engine.handle_event(&move_ctx, &mut buffer, &InputEvent::PointerUp {
            pos: pos2(10.0, 10.0),
        });
    }
    assert_eq!(engine.gesture().translate, Some(Vec2::new(20.0, 20.0)));
}

#[test]
fn leaving_move_without_dragging_keeps_the_buffer() {
    let red = PixelColor::new(255, 0, 0, 255);
    let mut data = bytes_of(PixelColor::TRANSPARENT, 2, 2);
    let mut buffer = PixelBuffer::new(&mut data, 2, 2).unwrap();
    buffer.set(Point::new(1, 1), red);

    let mut engine = CanvasEngine::new();
    engine.select_tool(&ctx(Tool::Move), &mut buffer);
    engine.select_tool(&ctx(Tool::Pen), &mut buffer);
    assert_eq!(buffer.color_at(Point::new(1, 1)), Some(red));
}
