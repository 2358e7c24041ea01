
extern crate polyscan;

use glam::Vec2;
use polyscan::{clip, ComplexPolygon, Error, Polygon, Region, ShapeRegion};

fn v(x: f32, y: f32) -> Vec2 {
    Vec2::new(x, y)
}

fn triangle() -> Polygon {
    Polygon::new(vec![v(10., 10.), v(200., 150.), v(50., 300.)]).unwrap()
}

fn hole() -> Polygon {
    Polygon::new(vec![v(37., 85.), v(130., 40.), v(65., 137.)]).unwrap()
}

#[test]
fn rectangle_top_edge() {
    let region = ShapeRegion::new(&Polygon::rectangle(10., 10., 90., 90.));
    let b = region.bounds();
    assert_eq!((b.x1, b.y1, b.x2, b.y2), (10, 10, 100, 100));
    assert_eq!(region.scan_sorted(10.).unwrap(), vec![10., 100.]);
    assert_eq!(region.scan_sorted(50.).unwrap(), vec![10., 100.]);
    assert!(region.scan_sorted(101.).unwrap().is_empty());
}

#[test]
fn vertex_crossings() {
    let region = ShapeRegion::new(&triangle());
    // Pass through the right vertex
    assert_eq!(region.scan_sorted(150.).unwrap().len(), 2);
    // Touch the bottom vertex
    assert_eq!(region.scan_sorted(300.).unwrap().len(), 2);
    assert_eq!(region.scan_sorted(10.).unwrap().len(), 2);
}

#[test]
fn flat_top_is_even() {
    let region = ShapeRegion::new(&Polygon::new(vec![v(10., 10.), v(100., 10.), v(50., 300.)]).unwrap());
    let xs = region.scan_sorted(10.).unwrap();
    assert_eq!(xs.len() % 2, 0);
    assert_eq!(xs.len(), 2);
}

#[test]
fn triangle_with_hole() {
    let shape = ComplexPolygon::merge(vec![ComplexPolygon::from(triangle()), ComplexPolygon::from(hole())]);
    let region = ShapeRegion::new(&shape);
    assert_eq!(region.scan_sorted(137.).unwrap().len(), 4);
    assert_eq!(region.scan_sorted(85.).unwrap().len(), 4);
    assert_eq!(region.scan_sorted(300.).unwrap().len(), 2);
}

#[test]
fn clipped_triangle_with_hole() {
    let shape = clip(&triangle(), &[hole()]).unwrap();
    let region = ShapeRegion::new(&shape);
    assert_eq!(region.scan_sorted(137.).unwrap().len(), 4);
    assert_eq!(region.scan_sorted(85.).unwrap().len(), 4);
    assert_eq!(region.scan_sorted(300.).unwrap().len(), 2);
}

#[test]
fn clipped_corner_along_scanline() {
    let rect = Polygon::rectangle(10., 10., 100., 100.);
    let shape = clip(&rect, &[Polygon::rectangle(20., 0., 20., 20.)]).unwrap();
    let region = ShapeRegion::new(&shape);
    assert_eq!(region.scan_sorted(20.).unwrap(), vec![10., 20., 40., 110.]);
}

#[test]
fn clip_without_holes_scans_the_same() {
    let holes : Vec<Polygon> = vec![];
    let original = ShapeRegion::new(&triangle());
    let clipped = ShapeRegion::new(&clip(&triangle(), &holes).unwrap());
    for y in [10., 55.5, 137., 150., 222.25, 300.].iter() {
        assert_eq!(original.scan_sorted(*y).unwrap(), clipped.scan_sorted(*y).unwrap());
    }
}

/// Star with a horizontal edge along y = 14
fn star_points() -> Vec<Vec2> {
    vec![v(1., 14.), v(8., 14.), v(18., 1.), v(34., 3.), v(22., 12.),
         v(27., 33.), v(20., 24.), v(0., 32.), v(6., 21.)]
}

fn rows() -> impl Iterator<Item=f32> {
    (0 .. 70).map(|k| k as f32 * 0.5)
}

#[test]
fn horizontal_run_scans_the_same_when_clipped() {
    let holes : Vec<Polygon> = vec![];
    let star = Polygon::new(star_points()).unwrap();
    let original = ShapeRegion::new(&star);
    let clipped = ShapeRegion::new(&clip(&star, &holes).unwrap());

    let xs = original.scan_sorted(14.).unwrap();
    assert_eq!(xs.len(), 2);
    assert_eq!(xs[0], 1.0);
    for y in rows() {
        assert_eq!(original.scan_sorted(y).unwrap(), clipped.scan_sorted(y).unwrap(), "y = {}", y);
    }
}

#[test]
fn start_and_direction_do_not_matter() {
    let pts = star_points();
    let original = ShapeRegion::new(&Polygon::new(pts.clone()).unwrap());
    for r in 0 .. pts.len() {
        let mut rotated = pts.clone();
        rotated.rotate_left(r);
        let mut reversed = rotated.clone();
        reversed.reverse();
        for p in vec![rotated, reversed] {
            let region = ShapeRegion::new(&Polygon::new(p).unwrap());
            for y in rows() {
                assert_eq!(original.scan_sorted(y).unwrap(), region.scan_sorted(y).unwrap(),
                           "start {} y = {}", r, y);
            }
        }
    }
}

#[test]
fn buffer_too_small() {
    let region = ShapeRegion::new(&triangle());
    let mut buf = [0.0; 2];
    match region.scan(100., &mut buf, 0) {
        Err(Error::BufferTooSmall { required, available }) => {
            assert_eq!(required, 3);
            assert_eq!(available, 2);
        },
        other => panic!("unexpected {:?}", other),
    }
    let mut buf = [0.0; 4];
    assert!(region.scan(100., &mut buf, 2).is_err());
    assert!(region.scan(100., &mut buf, 5).is_err());
}

#[test]
fn scan_at_offset() {
    let region = ShapeRegion::new(&Polygon::rectangle(10., 10., 90., 90.));
    let mut buf = [-1.0; 6];
    let n = region.scan(50., &mut buf, 2).unwrap();
    assert_eq!(n, 2);
    assert_eq!(&buf[..2], &[-1.0, -1.0]);
    let mut xs = buf[2..4].to_vec();
    xs.sort_by(|a, b| a.total_cmp(b));
    assert_eq!(xs, vec![10., 100.]);
}

#[test]
fn scan_from_many_threads() {
    let region = ShapeRegion::new(&clip(&triangle(), &[hole()]).unwrap());
    let expected : Vec<_> = (10 .. 300).map(|y| region.scan_sorted(y as f32).unwrap()).collect();
    std::thread::scope(|s| {
        let handles : Vec<_> = (0 .. 4).map(|t| {
            let region = &region;
            s.spawn(move || {
                (10 .. 300).filter(|y| y % 4 == t)
                    .map(|y| (y, region.scan_sorted(y as f32).unwrap()))
                    .collect::<Vec<_>>()
            })
        }).collect();
        for h in handles {
            for (y, xs) in h.join().unwrap() {
                assert_eq!(xs, expected[(y - 10) as usize]);
            }
        }
    });
}
