//! Integration tests: editor operations, undo/redo history, and persistence.

use fe_core::*;
use fe_editor::{ActionKind, Editor, EditorConfig, EditorError};
use pretty_assertions::assert_eq;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn three_shapes() -> Editor {
    init_logging();
    let mut editor = Editor::new();
    editor
        .load_str(include_str!("fixtures/three_shapes.txt"))
        .unwrap();
    editor
}

// ─── Reference scenarios ────────────────────────────────────────────────

#[test]
fn create_undo_redo_circle() {
    init_logging();
    let mut editor = Editor::new();
    let index = editor.create_default(ShapeKind::Circle, Vec2::new(400.0, 300.0), Color::GREEN);
    assert_eq!(index, 0);
    let original = editor.shape(0).unwrap().clone();
    assert_eq!(original.radius(), Some(50.0));

    assert_eq!(editor.undo().unwrap(), Some(ActionKind::Add));
    assert!(editor.is_empty());

    assert_eq!(editor.redo().unwrap(), Some(ActionKind::Add));
    assert_eq!(editor.len(), 1);
    assert_eq!(editor.shape(0).unwrap(), &original);
}

#[test]
fn four_quarter_turn_ticks_wrap_to_zero() {
    init_logging();
    let mut editor = Editor::new();
    editor.create_default(ShapeKind::Circle, Vec2::new(400.0, 300.0), Color::GREEN);
    editor.set_rotation_speed(0, 90.0).unwrap();
    editor.set_animated(0, true).unwrap();

    for _ in 0..4 {
        editor.advance(1.0);
    }
    assert_eq!(editor.rotation(0).unwrap(), 0.0);
}

#[test]
fn remove_middle_then_undo_restores_it() {
    let mut editor = three_shapes();
    let original = editor.scene().clone();
    let middle = editor.shape(1).unwrap().clone();

    editor.delete(1).unwrap();
    assert_eq!(editor.len(), 2);
    assert_eq!(editor.kind(1).unwrap(), ShapeKind::Triangle);

    assert_eq!(editor.undo().unwrap(), Some(ActionKind::Remove));
    assert_eq!(editor.len(), 3);
    assert_eq!(editor.shape(1).unwrap(), &middle);
    assert_eq!(editor.scene(), &original);
}

// ─── Round-trip law ─────────────────────────────────────────────────────

fn assert_undo_redo_roundtrip(editor: &mut Editor, mutate: impl FnOnce(&mut Editor)) {
    let before = editor.scene().clone();
    mutate(editor);
    let after = editor.scene().clone();
    assert_ne!(before, after, "mutation should change the scene");

    editor.undo().unwrap().expect("something to undo");
    assert_eq!(editor.scene(), &before);

    editor.redo().unwrap().expect("something to redo");
    assert_eq!(editor.scene(), &after);
}

#[test]
fn add_roundtrips() {
    let mut editor = three_shapes();
    assert_undo_redo_roundtrip(&mut editor, |e| {
        e.create_default(ShapeKind::Polygon, Vec2::new(500.0, 400.0), Color::MAGENTA);
    });
}

#[test]
fn insert_roundtrips() {
    let mut editor = three_shapes();
    assert_undo_redo_roundtrip(&mut editor, |e| {
        let text = Shape::with_defaults(ShapeKind::Text, Vec2::ZERO, Color::WHITE);
        e.insert_shape(1, text).unwrap();
    });
    assert_eq!(editor.kind(1).unwrap(), ShapeKind::Text);
}

#[test]
fn remove_roundtrips() {
    let mut editor = three_shapes();
    assert_undo_redo_roundtrip(&mut editor, |e| e.delete(0).unwrap());
}

#[test]
fn modify_roundtrips_for_each_setter() {
    let mut editor = three_shapes();
    assert_undo_redo_roundtrip(&mut editor, |e| e.set_position(0, Vec2::new(1.0, 2.0)).unwrap());
    assert_undo_redo_roundtrip(&mut editor, |e| e.set_rotation(1, 725.0).unwrap());
    assert_undo_redo_roundtrip(&mut editor, |e| e.set_scale(2, Vec2::new(2.0, 3.0)).unwrap());
    assert_undo_redo_roundtrip(&mut editor, |e| e.set_color(0, Color::RED).unwrap());
    assert_undo_redo_roundtrip(&mut editor, |e| e.set_radius(0, 75.0).unwrap());
    assert_undo_redo_roundtrip(&mut editor, |e| e.set_rect_size(1, Vec2::new(10.0, 20.0)).unwrap());
    assert_undo_redo_roundtrip(&mut editor, |e| e.set_triangle_size(2, 40.0).unwrap());
    assert_undo_redo_roundtrip(&mut editor, |e| e.set_animated(2, true).unwrap());
}

#[test]
fn cube_rotation_roundtrips() {
    init_logging();
    let mut editor = Editor::new();
    editor.create_default(ShapeKind::Cube, Vec2::new(300.0, 300.0), Color::WHITE);
    assert_undo_redo_roundtrip(&mut editor, |e| e.rotate_cube(0, 30.0).unwrap());
    assert_eq!(editor.shape(0).unwrap().cube_angle(), Some(30.0));
}

#[test]
fn undo_alone_restores_pre_mutation_state() {
    let mut editor = three_shapes();
    let before = editor.scene().clone();
    editor.set_position(1, Vec2::new(-10.0, 5.0)).unwrap();
    editor.set_rotation(1, 90.0).unwrap();
    editor.delete(0).unwrap();

    while editor.can_undo() {
        editor.undo().unwrap();
    }
    assert_eq!(editor.scene(), &before);
}

// ─── History bookkeeping ────────────────────────────────────────────────

#[test]
fn empty_history_is_a_no_op() {
    init_logging();
    let mut editor = Editor::new();
    assert!(!editor.can_undo());
    assert!(!editor.can_redo());
    assert_eq!(editor.undo().unwrap(), None);
    assert_eq!(editor.redo().unwrap(), None);
}

#[test]
fn new_action_clears_redo() {
    let mut editor = three_shapes();
    editor.set_color(0, Color::RED).unwrap();
    editor.undo().unwrap();
    assert!(editor.can_redo());

    editor.set_color(1, Color::YELLOW).unwrap();
    assert!(!editor.can_redo());
    assert_eq!(editor.redo().unwrap(), None);
}

#[test]
fn history_depth_is_bounded() {
    init_logging();
    let mut editor = Editor::with_config(EditorConfig::default().with_max_history(2));
    for i in 0..5 {
        editor.create_default(ShapeKind::Ellipse, Vec2::new(i as f32, 0.0), Color::CYAN);
    }
    assert_eq!(editor.history().undo_len(), 2);

    editor.undo().unwrap();
    editor.undo().unwrap();
    assert_eq!(editor.undo().unwrap(), None);
    assert_eq!(editor.len(), 3);
}

#[test]
fn selection_and_animation_ticks_are_not_history() {
    let mut editor = three_shapes();
    editor.select(2).unwrap();
    editor.advance(0.5);
    assert!(!editor.can_undo());
}

#[test]
fn undo_keeps_current_selection() {
    let mut editor = three_shapes();
    editor.select(0).unwrap();
    editor.set_color(0, Color::RED).unwrap();
    editor.select(1).unwrap();

    editor.undo().unwrap();
    let selected: Vec<bool> = editor.list().iter().map(|s| s.selected).collect();
    assert_eq!(selected, vec![false, true, false]);
    assert_eq!(editor.selected(), Some(1));

    editor.redo().unwrap();
    assert_eq!(editor.color(0).unwrap(), Color::RED);
    assert_eq!(editor.selected(), Some(1));
}

#[test]
fn undo_delete_restores_shape_unselected() {
    let mut editor = three_shapes();
    editor.select(2).unwrap();
    editor.delete(2).unwrap();
    editor.select(0).unwrap();

    editor.undo().unwrap();
    assert_eq!(editor.len(), 3);
    assert!(!editor.shape(2).unwrap().is_selected());
    assert_eq!(editor.selected(), Some(0));
}

// ─── Gestures ───────────────────────────────────────────────────────────

#[test]
fn drag_gesture_is_one_undo_step() {
    let mut editor = three_shapes();
    let start = editor.position(0).unwrap();

    editor.begin_gesture(0).unwrap();
    for step in 1..=10 {
        editor
            .set_position(0, start + Vec2::new(step as f32 * 5.0, 0.0))
            .unwrap();
    }
    assert!(!editor.history().can_undo());
    editor.end_gesture();

    assert_eq!(editor.history().undo_len(), 1);
    assert_eq!(editor.position(0).unwrap(), start + Vec2::new(50.0, 0.0));

    editor.undo().unwrap();
    assert_eq!(editor.position(0).unwrap(), start);
    editor.redo().unwrap();
    assert_eq!(editor.position(0).unwrap(), start + Vec2::new(50.0, 0.0));
}

#[test]
fn unchanged_gesture_records_nothing() {
    let mut editor = three_shapes();
    editor.begin_gesture(1).unwrap();
    editor.end_gesture();
    assert!(!editor.can_undo());
    assert!(!editor.in_gesture());
}

#[test]
fn nested_gestures_close_at_outermost() {
    let mut editor = three_shapes();
    editor.begin_gesture(2).unwrap();
    editor.begin_gesture(2).unwrap();
    editor.set_rotation(2, 45.0).unwrap();
    editor.end_gesture();
    assert!(editor.in_gesture());
    editor.set_rotation(2, 90.0).unwrap();
    editor.end_gesture();

    assert!(!editor.in_gesture());
    assert_eq!(editor.history().undo_len(), 1);
    editor.undo().unwrap();
    assert_eq!(editor.rotation(2).unwrap(), 0.0);
}

#[test]
fn undo_during_gesture_closes_it_first() {
    let mut editor = three_shapes();
    editor.begin_gesture(0).unwrap();
    editor.set_scale(0, Vec2::new(3.0, 3.0)).unwrap();
    assert!(editor.can_undo());

    assert_eq!(editor.undo().unwrap(), Some(ActionKind::Modify));
    assert!(!editor.in_gesture());
    assert_eq!(editor.scale(0).unwrap(), Vec2::ONE);
}

// ─── Persistence ────────────────────────────────────────────────────────

#[test]
fn save_then_load_reproduces_scene() {
    let mut editor = three_shapes();
    editor.create_default(ShapeKind::Text, Vec2::new(20.0, 20.0), Color::WHITE);
    editor.set_content(3, "Saved").unwrap();
    editor.set_rotation_speed(0, 45.0).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scene.txt");
    editor.save(&path).unwrap();

    let mut reloaded = Editor::new();
    reloaded.load(&path).unwrap();
    assert_eq!(reloaded.scene(), editor.scene());
    assert!(!reloaded.can_undo());
}

#[test]
fn save_rejects_whitespace_text() {
    init_logging();
    let mut editor = Editor::new();
    editor.create_default(ShapeKind::Text, Vec2::ZERO, Color::WHITE);
    editor.set_content(0, "two words").unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scene.txt");
    assert!(matches!(
        editor.save(&path),
        Err(EditorError::Format(FormatError::UnencodableText { record: 0, .. }))
    ));
    assert!(!path.exists());
}

#[test]
fn load_missing_file_is_io_error() {
    let mut editor = three_shapes();
    let dir = tempfile::tempdir().unwrap();
    let result = editor.load(dir.path().join("missing.txt"));
    assert!(matches!(result, Err(EditorError::Io(_))));
    assert_eq!(editor.len(), 3);
}
