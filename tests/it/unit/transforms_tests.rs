//! Unit tests for the box transform library.

use crate::helpers::assert_close;
use arrowboard::constants::MIN_BOUNDS_SIZE;
use arrowboard::transforms::{
    CornerResizer, EdgeResizer, SelectionSnapshot, align, distribute, stretch,
};
use arrowboard::types::{Alignment, Axis, CanvasBox, Corner, Edge, Point, Rect};
use proptest::prelude::*;

fn boxes(rects: &[(f64, f64, f64, f64)]) -> Vec<CanvasBox> {
    rects
        .iter()
        .enumerate()
        .map(|(i, r)| CanvasBox::new(format!("b{i}"), Rect::new(r.0, r.1, r.2, r.3), i as i64))
        .collect()
}

#[test]
fn test_align_left_uses_shared_minimum() {
    let mut set = boxes(&[(10.0, 0.0, 10.0, 10.0), (40.0, 30.0, 20.0, 5.0), (25.0, 60.0, 5.0, 5.0)]);
    align(&mut set, Alignment::Left);
    assert!(set.iter().all(|b| b.x == 10.0));
    // Other axes are untouched.
    assert_eq!(set[1].y, 30.0);
    assert_eq!(set[1].width, 20.0);
}

#[test]
fn test_align_right_and_center() {
    let mut set = boxes(&[(0.0, 0.0, 10.0, 10.0), (50.0, 0.0, 30.0, 10.0)]);
    align(&mut set, Alignment::Right);
    assert_eq!(set[0].max_x(), 80.0);
    assert_eq!(set[1].max_x(), 80.0);

    let mut set = boxes(&[(0.0, 0.0, 10.0, 10.0), (0.0, 90.0, 10.0, 10.0)]);
    align(&mut set, Alignment::CenterY);
    assert!(set.iter().all(|b| b.y == 45.0));
}

#[test]
fn test_stretch_x_spans_envelope() {
    let mut set = boxes(&[(0.0, 0.0, 10.0, 10.0), (100.0, 0.0, 10.0, 10.0)]);
    stretch(&mut set, Axis::X);
    for b in &set {
        assert_eq!(b.x, 0.0);
        assert_eq!(b.width, 110.0);
        assert_eq!(b.height, 10.0);
    }
}

#[test]
fn test_distribute_spaces_centers_evenly() {
    let mut set = boxes(&[(0.0, 0.0, 10.0, 10.0), (20.0, 0.0, 10.0, 10.0), (90.0, 0.0, 10.0, 10.0)]);
    distribute(&mut set, Axis::X);
    assert_close(set[0].x, 0.0);
    assert_close(set[1].x, 45.0);
    assert_close(set[2].x, 90.0);
}

#[test]
fn test_distribute_needs_three_boxes() {
    let mut set = boxes(&[(0.0, 0.0, 10.0, 10.0), (20.0, 0.0, 10.0, 10.0)]);
    let before = set.clone();
    distribute(&mut set, Axis::X);
    assert_eq!(set, before);
}

#[test]
fn test_edge_resize_only_touches_one_axis() {
    let mut set = boxes(&[(0.0, 0.0, 50.0, 50.0), (50.0, 50.0, 50.0, 50.0)]);
    let snapshot = SelectionSnapshot::capture(&set).unwrap();
    let resizer = EdgeResizer::new(Edge::Right, snapshot);

    let bounds = resizer.resize(Point::new(200.0, 999.0), &mut set);
    assert_eq!(bounds, Rect::new(0.0, 0.0, 200.0, 100.0));
    assert_eq!(set[0].rect(), Rect::new(0.0, 0.0, 100.0, 50.0));
    assert_eq!(set[1].rect(), Rect::new(100.0, 50.0, 100.0, 50.0));
}

#[test]
fn test_edge_resize_clamps_instead_of_flipping() {
    let mut set = boxes(&[(0.0, 0.0, 50.0, 50.0)]);
    let resizer = EdgeResizer::new(Edge::Left, SelectionSnapshot::capture(&set).unwrap());
    let bounds = resizer.resize(Point::new(500.0, 0.0), &mut set);
    assert_eq!(bounds.width, MIN_BOUNDS_SIZE);
    assert_eq!(bounds.max_x(), 50.0);
}

#[test]
fn test_resize_is_absolute_from_gesture_start() {
    let mut set = boxes(&[(0.0, 0.0, 40.0, 40.0)]);
    let resizer = CornerResizer::new(Corner::BottomRight, SelectionSnapshot::capture(&set).unwrap());
    resizer.resize(Point::new(400.0, 400.0), &mut set);
    resizer.resize(Point::new(80.0, 60.0), &mut set);
    assert_eq!(set[0].rect(), Rect::new(0.0, 0.0, 80.0, 60.0));
}

fn arb_box() -> impl Strategy<Value = (f64, f64, f64, f64)> {
    (-500.0f64..500.0, -500.0f64..500.0, 1.0f64..200.0, 1.0f64..200.0)
}

proptest! {
    #[test]
    fn corner_resize_preserves_normalized_offsets(
        rects in prop::collection::vec(arb_box(), 1..8),
        corner in 0usize..4,
        px in -1000.0f64..1000.0,
        py in -1000.0f64..1000.0,
    ) {
        let mut set = boxes(&rects);
        let snapshot = SelectionSnapshot::capture(&set).unwrap();
        let captured = snapshot.boxes.clone();
        let resizer = CornerResizer::new(Corner::ALL[corner], snapshot);

        let bounds = resizer.resize(Point::new(px, py), &mut set);
        prop_assert!(bounds.width >= MIN_BOUNDS_SIZE - 1e-9);
        prop_assert!(bounds.height >= MIN_BOUNDS_SIZE - 1e-9);

        for (b, s) in set.iter().zip(&captured) {
            prop_assert!(((b.x - bounds.x) / bounds.width - s.nx).abs() < 1e-6);
            prop_assert!(((b.y - bounds.y) / bounds.height - s.ny).abs() < 1e-6);
            prop_assert!(((b.max_x() - bounds.x) / bounds.width - s.nmx).abs() < 1e-6);
            prop_assert!(((b.max_y() - bounds.y) / bounds.height - s.nmy).abs() < 1e-6);
        }
    }

    #[test]
    fn align_is_idempotent(rects in prop::collection::vec(arb_box(), 1..8), which in 0usize..6) {
        let alignment = [
            Alignment::Left,
            Alignment::Right,
            Alignment::CenterX,
            Alignment::Top,
            Alignment::Bottom,
            Alignment::CenterY,
        ][which];
        let mut once = boxes(&rects);
        align(&mut once, alignment);
        let mut twice = once.clone();
        align(&mut twice, alignment);
        for (a, b) in once.iter().zip(&twice) {
            prop_assert!((a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9);
        }
    }
}
