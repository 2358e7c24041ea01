
extern crate polyscan;

use glam::Vec2;
use polyscan::{find_intersection, Segment};

fn seg(x1: f32, y1: f32, x2: f32, y2: f32) -> Segment {
    Segment::new(Vec2::new(x1, y1), Vec2::new(x2, y2))
}

#[test]
fn crossing_segments() {
    let p = find_intersection(&seg(0., 0., 10., 10.), &seg(0., 10., 10., 0.));
    assert_eq!(p, Some(Vec2::new(5., 5.)));
    let p = seg(5., -5., 5., 15.).intersect(&seg(0., 10., 10., 10.));
    assert_eq!(p, Some(Vec2::new(5., 10.)));
}

#[test]
fn parallel_segments() {
    assert_eq!(find_intersection(&seg(0., 0., 10., 0.), &seg(0., 1., 10., 1.)), None);
    assert_eq!(find_intersection(&seg(0., 0., 10., 0.), &seg(2., 0., 12., 0.)), None);
}

#[test]
fn determinant_below_epsilon() {
    // Perpendicular but so short the determinant is 1e-4
    assert_eq!(find_intersection(&seg(0., 0., 0.01, 0.), &seg(0., 0., 0., 0.01)), None);
}

#[test]
fn containment_tolerance() {
    let probe = seg(2., -1., 2., 1.);
    assert_eq!(find_intersection(&seg(0., 0., 1., 0.), &probe), None);
    assert_eq!(find_intersection(&seg(0., 0., 1.9, 0.), &probe), Some(Vec2::new(2., 0.)));
}

#[test]
fn order_does_not_matter() {
    let a = seg(3., 7., 120., 33.);
    let b = seg(40., -10., 60., 90.);
    assert_eq!(find_intersection(&a, &b), find_intersection(&b, &a));
}

#[test]
fn degenerate_segment() {
    assert!(seg(1., 1., 1., 1.).is_degenerate());
    assert!(!seg(1., 1., 1., 2.).is_degenerate());
    assert_eq!(seg(1., 1., 4., 5.).vector(), Vec2::new(3., 4.));
}
