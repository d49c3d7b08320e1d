use super::*;

fn quad(c: [(f64, f64); 4]) -> Quad {
    Quad::new(c.map(|(x, y)| Point::new(x, y)))
}

fn gradient(w: u32, h: u32) -> RgbaImage {
    RgbaImage::from_fn(w, h, |x, y| Rgba([x as u8 * 30, y as u8 * 30, 77, 255]))
}

#[test]
fn identity_quad_reproduces_source() {
    let img = gradient(6, 4);
    let q = quad([(0.0, 0.0), (0.0, 4.0), (6.0, 4.0), (6.0, 0.0)]);
    let out = warp_quad(&img, &q).unwrap();
    assert_eq!(out, img);
}

#[test]
fn output_spans_to_ceiled_max_corner() {
    let img = gradient(4, 4);
    let q = quad([(0.0, 0.0), (0.0, 7.2), (9.5, 7.2), (9.5, 0.0)]);
    let out = warp_quad(&img, &q).unwrap();
    assert_eq!(out.dimensions(), (10, 8));
}

#[test]
fn trapezoid_leaves_outside_transparent() {
    let img = RgbaImage::from_pixel(10, 10, Rgba([200, 10, 10, 255]));
    let q = quad([(8.0, 0.0), (0.0, 20.0), (20.0, 20.0), (12.0, 0.0)]);
    assert!(is_convex(&q));
    let out = warp_quad(&img, &q).unwrap();
    assert_eq!(out.dimensions(), (20, 20));
    assert_eq!(out.get_pixel(0, 0).0[3], 0);
    assert_eq!(out.get_pixel(19, 0).0[3], 0);
    assert_eq!(out.get_pixel(10, 15).0, [200, 10, 10, 255]);
}

#[test]
fn concave_quad_uses_bilinear_mapping() {
    let img = RgbaImage::from_pixel(8, 8, Rgba([0, 0, 255, 255]));
    let q = quad([(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (3.0, 6.0)]);
    assert!(!is_convex(&q));
    let out = warp_quad(&img, &q).unwrap();
    assert_eq!(out.dimensions(), (10, 10));
    assert!(out.get_pixel(1, 8).0[3] > 0);
    assert_eq!(out.get_pixel(9, 1).0[3], 0);
}

#[test]
fn negative_corners_are_clipped() {
    let img = gradient(4, 4);
    let q = quad([(-4.0, -4.0), (-4.0, 4.0), (4.0, 4.0), (4.0, -4.0)]);
    let out = warp_quad(&img, &q).unwrap();
    assert_eq!(out.dimensions(), (4, 4));
    assert_eq!(out.get_pixel(0, 0).0[3], 255);
}

#[test]
fn zero_area_is_geometry_error() {
    let img = gradient(2, 2);
    let q = quad([(0.0, 0.0), (0.0, 0.0), (5.0, 0.0), (5.0, 0.0)]);
    assert!(matches!(warp_quad(&img, &q), Err(PetpetError::Geometry(_))));
}

#[test]
fn bowtie_is_geometry_error() {
    let img = gradient(2, 2);
    let q = quad([(0.0, 0.0), (0.0, 10.0), (30.0, 0.0), (10.0, 20.0)]);
    assert!(q.signed_area().abs() > 1.0);
    let err = warp_quad(&img, &q).unwrap_err();
    assert!(matches!(err, PetpetError::Geometry(_)));
    assert!(err.to_string().starts_with("geometry error:"));
}

#[test]
fn non_finite_is_geometry_error() {
    let q = quad([(0.0, 0.0), (0.0, f64::NAN), (5.0, 5.0), (5.0, 0.0)]);
    assert!(matches!(validate_quad(&q), Err(PetpetError::Geometry(_))));
}

#[test]
fn homography_round_trips_corners() {
    let q = quad([(2.0, 1.0), (0.0, 9.0), (11.0, 8.0), (9.0, 0.0)]);
    let fwd = Homography::square_to_quad(&q).unwrap();
    let inv = fwd.inverse().unwrap();
    for (uv, p) in [(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]
        .into_iter()
        .zip(q.corners)
    {
        let (x, y) = fwd.apply(Point::new(uv.0, uv.1)).unwrap();
        assert!((x - p.x).abs() < 1e-9 && (y - p.y).abs() < 1e-9);
        let (u, v) = inv.apply(p).unwrap();
        assert!((u - uv.0).abs() < 1e-9 && (v - uv.1).abs() < 1e-9);
    }
}

#[test]
fn straight_corner_falls_back_to_bilinear() {
    let img = RgbaImage::from_pixel(8, 8, Rgba([0, 200, 0, 255]));
    let q = quad([(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (5.0, 5.0)]);
    assert!(validate_quad(&q).is_ok());
    let out = warp_quad(&img, &q).unwrap();
    assert_eq!(out.dimensions(), (10, 10));
    assert!(out.get_pixel(2, 8).0[3] > 0);
    assert_eq!(out.get_pixel(8, 2).0[3], 0);
}

#[test]
fn repeated_corner_falls_back_to_bilinear() {
    let img = RgbaImage::from_pixel(8, 8, Rgba([0, 200, 0, 255]));
    let q = quad([(5.0, 0.0), (0.0, 10.0), (10.0, 10.0), (5.0, 0.0)]);
    assert!(validate_quad(&q).is_ok());
    let out = warp_quad(&img, &q).unwrap();
    assert_eq!(out.dimensions(), (10, 10));
    assert!(out.get_pixel(5, 8).0[3] > 0);
    assert_eq!(out.get_pixel(0, 0).0[3], 0);
}

#[test]
fn oversized_output_is_configuration_error() {
    let img = gradient(2, 2);
    let m = f64::from(i32::MAX);
    let q = quad([(0.0, 0.0), (0.0, m), (m, m), (m, 0.0)]);
    let err = warp_quad(&img, &q).unwrap_err();
    assert!(err.is_configuration());
}
