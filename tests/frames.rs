use frameflow_core::{Color32, Document, FrameCursor, Point2D, Stroke, StrokeStyle};

fn stroke() -> Stroke {
    Stroke::new(
        vec![Point2D::new(20.0, 20.0), Point2D::new(60.0, 20.0)],
        Color32::BLACK,
        3.0,
        StrokeStyle::Plain,
    )
}

fn cursor(current: usize, count: usize) -> FrameCursor {
    FrameCursor { current, count }
}

#[test]
fn test_new_document_has_one_empty_frame() {
    let document = Document::new();
    assert_eq!(document.cursor(), cursor(0, 1));
    assert!(document.current_frame().is_empty());
    assert!(!document.can_undo());
}

#[test]
fn test_insert_goes_after_current_and_becomes_current() {
    let mut document = Document::new();
    document.append_frame();
    document.append_frame();
    document.switch_to_frame(0);

    assert_eq!(document.insert_frame_after_current(), cursor(1, 4));
    assert!(document.current_frame().is_empty());
}

#[test]
fn test_append_moves_to_the_end() {
    let mut document = Document::new();
    document.append_frame();
    document.switch_to_frame(0);
    assert_eq!(document.append_frame(), cursor(2, 3));

    assert!(document.undo());
    assert_eq!(document.cursor(), cursor(0, 2));
}

#[test]
fn test_duplicate_copies_strokes_with_same_ids() {
    let mut document = Document::new();
    let original = stroke();
    document.add_stroke(original.clone());

    assert_eq!(document.duplicate_current_frame(), cursor(1, 2));
    let copy = document.session().frame(1).unwrap();
    assert_eq!(copy.strokes(), std::slice::from_ref(&original));
}

#[test]
fn test_deleting_the_only_frame_is_refused() {
    let mut document = Document::new();
    document.add_stroke(stroke());
    let before = document.session().clone();
    let undo_len = document.history().undo_len();

    assert_eq!(document.delete_current_frame(), cursor(0, 1));
    assert_eq!(document.session(), &before);
    assert_eq!(document.history().undo_len(), undo_len);
}

#[test]
fn test_delete_before_cursor_keeps_the_same_frame_current() {
    let mut document = Document::new();
    document.append_frame();
    document.append_frame();
    document.add_stroke(stroke());

    assert_eq!(document.delete_frame(0), cursor(1, 2));
    assert_eq!(document.current_frame().len(), 1);
}

#[test]
fn test_delete_last_frame_clamps_cursor() {
    let mut document = Document::new();
    document.append_frame();
    document.append_frame();

    assert_eq!(document.delete_current_frame(), cursor(1, 2));
}

#[test]
fn test_delete_out_of_range_is_ignored() {
    let mut document = Document::new();
    document.append_frame();
    assert_eq!(document.delete_frame(7), cursor(1, 2));
    assert_eq!(document.history().undo_len(), 1);
}

#[test]
fn test_clear_all_leaves_one_empty_frame() {
    let mut document = Document::new();
    document.add_stroke(stroke());
    document.append_frame();
    document.add_stroke(stroke());

    assert_eq!(document.clear_all_frames(), cursor(0, 1));
    assert!(document.current_frame().is_empty());

    assert!(document.undo());
    assert_eq!(document.cursor(), cursor(1, 2));
    assert_eq!(document.current_frame().len(), 1);
}

#[test]
fn test_switch_ignores_out_of_range_and_same_frame() {
    let mut document = Document::new();
    document.append_frame();
    let undo_len = document.history().undo_len();

    assert_eq!(document.switch_to_frame(1), cursor(1, 2));
    assert_eq!(document.switch_to_frame(9), cursor(1, 2));
    assert_eq!(document.history().undo_len(), undo_len);

    assert_eq!(document.switch_to_frame(0), cursor(0, 2));
    assert_eq!(document.history().undo_len(), undo_len + 1);
}

#[test]
fn test_empty_strokes_are_refused() {
    let mut document = Document::new();
    let empty = Stroke::new(Vec::new(), Color32::BLACK, 3.0, StrokeStyle::Plain);
    assert!(!document.add_stroke(empty.clone()));
    assert!(!document.add_shape(vec![empty]));
    assert!(!document.can_undo());
}

#[test]
fn test_missed_erase_records_nothing() {
    let mut document = Document::new();
    document.add_stroke(stroke());
    let undo_len = document.history().undo_len();

    let outcome = document.erase(&[Point2D::new(200.0, 300.0), Point2D::new(220.0, 300.0)], 5.0);
    assert!(!outcome.changed());
    assert_eq!(document.history().undo_len(), undo_len);
}
