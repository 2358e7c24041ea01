
extern crate polyscan;

use polyscan::{clip, mask_diff, rasterize_mask, scanline_spans, write_mask,
               Polygon, ShapeRegion, Span};

#[test]
fn rectangle_spans() {
    let region = ShapeRegion::new(&Polygon::rectangle(10., 10., 20., 10.));
    assert_eq!(scanline_spans(&region, 10).unwrap(), vec![Span { x: 10, len: 20 }]);
    assert_eq!(scanline_spans(&region, 19).unwrap(), vec![Span { x: 10, len: 20 }]);
    assert!(scanline_spans(&region, 20).unwrap().is_empty());
    assert!(scanline_spans(&region, 9).unwrap().is_empty());
    assert_eq!(Span { x: 10, len: 20 }.end(), 30);
}

#[test]
fn hole_splits_spans() {
    let shape = clip(&Polygon::rectangle(0., 0., 30., 30.),
                     &[Polygon::rectangle(10., 10., 10., 10.)]).unwrap();
    let region = ShapeRegion::new(&shape);
    assert_eq!(scanline_spans(&region, 15).unwrap(),
               vec![Span { x: 0, len: 10 }, Span { x: 20, len: 10 }]);
    assert_eq!(scanline_spans(&region, 5).unwrap(), vec![Span { x: 0, len: 30 }]);
}

#[test]
fn mask() {
    let region = ShapeRegion::new(&Polygon::rectangle(10., 10., 20., 10.));
    let img = rasterize_mask(&region, 40, 40).unwrap();
    assert_eq!(img.dimensions(), (40, 40));
    assert_eq!(img.pixels().filter(|p| p[0] == 255).count(), 200);
    assert_eq!(img.get_pixel(10, 10)[0], 255);
    assert_eq!(img.get_pixel(30, 10)[0], 0);

    // Clipped to the image
    let small = rasterize_mask(&region, 15, 15).unwrap();
    assert_eq!(small.pixels().filter(|p| p[0] == 255).count(), 25);
}

#[test]
fn mask_differences() {
    let a = rasterize_mask(&ShapeRegion::new(&Polygon::rectangle(0., 0., 10., 10.)), 20, 20).unwrap();
    let b = rasterize_mask(&ShapeRegion::new(&Polygon::rectangle(0., 0., 10., 11.)), 20, 20).unwrap();
    let c = rasterize_mask(&ShapeRegion::new(&Polygon::rectangle(0., 0., 10., 10.)), 10, 20).unwrap();
    assert_eq!(mask_diff(&a, &a), Some(0));
    assert_eq!(mask_diff(&a, &b), Some(10));
    assert_eq!(mask_diff(&a, &c), None);
}

#[test]
fn mask_round_trip() {
    let region = ShapeRegion::new(&Polygon::rectangle(3., 4., 12., 7.));
    let img = rasterize_mask(&region, 32, 32).unwrap();
    let path = std::env::temp_dir().join("polyscan_mask_round_trip.png");
    write_mask(&img, &path).unwrap();
    let back = image::open(&path).unwrap().to_luma8();
    assert_eq!(mask_diff(&img, &back), Some(0));
    let _ = std::fs::remove_file(&path);
}
