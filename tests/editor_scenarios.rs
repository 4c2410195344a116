use frameflow_core::{
    EditorContext, EditorEvent, EditorSettings, Keyframe, Point2D, ShapeKind, Size, StrokeStyle,
    ToolMode,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn p(x: f64, y: f64) -> Point2D {
    Point2D::new(x, y)
}

fn record_events(editor: &EditorContext) -> Arc<Mutex<Vec<EditorEvent>>> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    editor.subscribe(Box::new(move |event: &EditorEvent| {
        sink.lock().unwrap().push(event.clone());
    }));
    events
}

fn draw(editor: &mut EditorContext, points: &[Point2D]) -> bool {
    for point in points {
        editor.append_stroke_point(*point);
    }
    editor.commit_stroke()
}

#[test]
fn test_triangle_stroke_undo_redo_keeps_identity() {
    let mut editor = EditorContext::default();
    let triangle = [p(100.0, 100.0), p(150.0, 200.0), p(50.0, 200.0)];

    assert!(draw(&mut editor, &triangle));
    let frame = editor.session().frame(0).unwrap();
    assert_eq!(frame.len(), 1);
    assert_eq!(frame.strokes()[0].points(), &triangle);
    let id = frame.strokes()[0].id();

    assert!(editor.undo());
    assert!(editor.session().frame(0).unwrap().is_empty());

    assert!(editor.redo());
    let frame = editor.session().frame(0).unwrap();
    assert_eq!(frame.len(), 1);
    assert_eq!(frame.strokes()[0].points(), &triangle);
    assert_eq!(frame.strokes()[0].id(), id);
}

#[test]
fn test_points_outside_canvas_margin_are_dropped() {
    let mut editor = EditorContext::default();
    editor.set_line_width(10.0);

    assert!(!editor.append_stroke_point(p(2.0, 100.0)));
    assert!(editor.state().is_drawing());
    assert!(editor.append_stroke_point(p(5.0, 100.0)));
    assert!(!editor.append_stroke_point(p(100.0, 638.0)));
    assert!(editor.commit_stroke());

    assert_eq!(editor.session().current_frame().strokes()[0].points(), &[p(5.0, 100.0)]);
}

#[test]
fn test_commit_without_points_does_nothing() {
    let mut editor = EditorContext::default();
    assert!(!editor.commit_stroke());

    editor.begin_stroke(p(0.0, 0.0));
    assert!(!editor.commit_stroke());
    assert!(editor.state().is_idle());
    assert!(!editor.can_undo());
}

#[test]
fn test_brush_draws_soft_strokes() {
    let mut editor = EditorContext::default();
    editor.set_tool(ToolMode::Brush);
    editor.begin_stroke(p(40.0, 40.0));
    editor.append_stroke_point(p(80.0, 40.0));
    assert_eq!(editor.stroke_preview().map(|s| s.points().len()), Some(2));
    editor.commit_stroke();

    assert_eq!(editor.session().current_frame().strokes()[0].style(), StrokeStyle::Soft);
}

#[test]
fn test_eraser_mode_cuts_strokes_as_one_step() {
    let mut editor = EditorContext::default();
    draw(&mut editor, &[p(20.0, 100.0), p(60.0, 100.0), p(100.0, 100.0), p(140.0, 100.0)]);
    let events = record_events(&editor);

    editor.set_tool(ToolMode::Eraser);
    editor.begin_stroke(p(80.0, 50.0));
    editor.append_stroke_point(p(80.0, 150.0));
    assert_eq!(editor.eraser_path().map(<[Point2D]>::len), Some(2));
    assert!(editor.commit_stroke());

    let strokes = editor.session().current_frame().strokes();
    assert_eq!(strokes.len(), 2);
    assert!(events.lock().unwrap().contains(&EditorEvent::StrokesErased {
        frame_index: 0,
        erased: 1,
    }));

    assert!(editor.undo());
    assert_eq!(editor.session().current_frame().len(), 1);
}

#[test]
fn test_eraser_missing_everything_is_not_an_undo_step() {
    let mut editor = EditorContext::default();
    draw(&mut editor, &[p(20.0, 100.0), p(60.0, 100.0)]);

    editor.set_tool(ToolMode::Eraser);
    editor.begin_stroke(p(200.0, 400.0));
    editor.append_stroke_point(p(220.0, 420.0));
    assert!(!editor.commit_stroke());
    assert_eq!(editor.document().history().undo_len(), 1);
}

#[test]
fn test_shape_lifecycle_commits_one_undo_step() {
    let mut editor = EditorContext::default();
    let events = record_events(&editor);

    assert!(editor.begin_shape(ShapeKind::Circle, p(195.0, 320.0)));
    assert!(editor.update_shape_preview(p(195.0, 260.0)));
    let preview = editor.shape_preview().unwrap();
    assert!(preview.len() >= 18);
    assert!(editor.commit_shape());

    let frame = editor.session().current_frame();
    assert!(frame.len() > preview.len());
    assert!(events.lock().unwrap().contains(&EditorEvent::ShapeCommitted {
        frame_index: 0,
        kind: ShapeKind::Circle,
    }));

    assert!(editor.undo());
    assert!(editor.session().current_frame().is_empty());
    assert!(!editor.can_undo());
}

#[test]
fn test_switching_tools_discards_unfinished_gesture() {
    let mut editor = EditorContext::default();
    editor.begin_stroke(p(50.0, 50.0));
    editor.set_tool(ToolMode::Shape);
    assert!(editor.state().is_idle());

    // Shape tool has no freehand stroke.
    assert!(!editor.begin_stroke(p(50.0, 50.0)));
    assert!(!editor.commit_stroke());
    assert!(!editor.can_undo());
}

#[test]
fn test_edits_are_refused_while_playing() {
    let mut editor = EditorContext::default();
    draw(&mut editor, &[p(20.0, 20.0), p(40.0, 40.0)]);
    editor.append_frame();
    assert!(editor.play());

    let before = editor.session().clone();
    let undo_len = editor.document().history().undo_len();

    assert!(!editor.begin_stroke(p(60.0, 60.0)));
    assert!(!editor.append_stroke_point(p(70.0, 70.0)));
    assert!(!editor.commit_stroke());
    assert!(!editor.place_shape(ShapeKind::Square, p(100.0, 100.0)));
    editor.insert_frame_after_current();
    editor.append_frame();
    editor.duplicate_current_frame();
    editor.delete_current_frame();
    editor.clear_all_frames();
    editor.switch_to_frame(0);
    assert!(!editor.undo());
    assert!(!editor.redo());

    assert_eq!(editor.session(), &before);
    assert_eq!(editor.document().history().undo_len(), undo_len);

    editor.stop();
    assert!(editor.undo());
}

#[test]
fn test_frame_operations_report_cursor_and_emit_events() {
    let mut editor = EditorContext::default();
    let events = record_events(&editor);

    let cursor = editor.append_frame();
    assert_eq!((cursor.current, cursor.count), (1, 2));
    let cursor = editor.delete_current_frame();
    assert_eq!((cursor.current, cursor.count), (0, 1));
    // Refused: nothing emitted.
    editor.delete_current_frame();

    let events = events.lock().unwrap();
    let frames_changed: Vec<_> = events
        .iter()
        .filter(|e| matches!(e, EditorEvent::FramesChanged { .. }))
        .collect();
    assert_eq!(
        frames_changed,
        vec![
            &EditorEvent::FramesChanged { current: 1, count: 2 },
            &EditorEvent::FramesChanged { current: 0, count: 1 },
        ]
    );
    assert_eq!(
        events.last(),
        Some(&EditorEvent::HistoryChanged {
            can_undo: true,
            can_redo: false,
        })
    );
}

#[test]
fn test_playback_events() {
    let mut editor = EditorContext::default();
    editor.append_frame();
    editor.append_frame();
    editor.switch_to_frame(0);
    let events = record_events(&editor);

    editor.play();
    editor.tick(Duration::from_millis(100));
    editor.stop();

    assert_eq!(
        *events.lock().unwrap(),
        vec![
            EditorEvent::PlaybackStarted { from: 0 },
            EditorEvent::FrameAdvanced { index: 1 },
            EditorEvent::PlaybackStopped { index: 2 },
        ]
    );
}

#[test]
fn test_generated_sequence_replaces_frames_in_one_step() {
    let mut editor = EditorContext::default();
    draw(&mut editor, &[p(20.0, 20.0), p(40.0, 40.0)]);

    let mut step = 0.0;
    let mut waypoints = move || {
        step += 1.0;
        Keyframe::new(p(50.0 * step, 60.0 * step), 0.3 * step, (1.0, 1.0 + 0.1 * step))
    };
    let cursor = editor.generate_sequence(ShapeKind::Triangle, 60, &mut waypoints);
    assert_eq!((cursor.current, cursor.count), (59, 60));
    assert!(editor.session().frames().iter().all(|frame| !frame.is_empty()));

    assert!(editor.undo());
    assert_eq!(editor.cursor().count, 1);
    assert_eq!(editor.session().current_frame().len(), 1);
}

#[test]
fn test_settings_drive_new_context() {
    let settings = EditorSettings {
        line_width: 8.0,
        shape_size: 60.0,
        canvas_size: Size::new(300.0, 300.0),
        stroke_color: [255, 0, 0, 255],
        ..EditorSettings::default()
    };
    let mut editor = EditorContext::new(settings);

    editor.begin_shape(ShapeKind::Square, p(150.0, 150.0));
    let draft = *editor.state().shape_draft().unwrap();
    assert_eq!(draft.size, Size::square(60.0));
    assert_eq!(draft.line_width, 8.0);
    assert_eq!(draft.color, frameflow_core::Color32::RED);
}

#[test]
fn test_unsubscribed_handlers_stop_receiving() {
    let mut editor = EditorContext::default();
    let count = Arc::new(Mutex::new(0));
    let sink = Arc::clone(&count);
    let id = editor.subscribe(Box::new(move |_: &EditorEvent| {
        *sink.lock().unwrap() += 1;
    }));

    editor.append_frame();
    let seen = *count.lock().unwrap();
    assert!(seen > 0);

    assert!(editor.unsubscribe(id));
    assert!(!editor.unsubscribe(id));
    editor.append_frame();
    assert_eq!(*count.lock().unwrap(), seen);
}

#[test]
fn test_undo_and_redo_report_the_frame_they_touched() {
    let mut editor = EditorContext::default();
    editor.append_frame();
    draw(&mut editor, &[p(20.0, 20.0), p(40.0, 40.0)]);
    let events = record_events(&editor);

    assert!(editor.undo());
    assert!(editor.redo());
    // Frame operations touch no strokes.
    editor.switch_to_frame(0);
    assert!(editor.undo());

    let touched: Vec<_> = events
        .lock()
        .unwrap()
        .iter()
        .filter_map(|e| match e {
            EditorEvent::StrokesChanged { frame_index } => Some(*frame_index),
            _ => None,
        })
        .collect();
    assert_eq!(touched, vec![1, 1]);
}

#[test]
fn test_only_pencil_and_brush_draw_strokes() {
    assert!(ToolMode::Pencil.draws_strokes());
    assert!(ToolMode::Brush.draws_strokes());
    assert!(!ToolMode::Eraser.draws_strokes());
    assert!(!ToolMode::Shape.draws_strokes());
}
