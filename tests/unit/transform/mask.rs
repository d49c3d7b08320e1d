use super::*;

fn opaque(w: u32, h: u32) -> RgbaImage {
    RgbaImage::from_pixel(w, h, Rgba([10, 200, 30, 255]))
}

#[test]
fn corners_become_transparent_center_stays() {
    let out = convert_circular(&opaque(20, 20), false);
    assert_eq!(out.dimensions(), (20, 20));
    for (x, y) in [(0, 0), (19, 0), (0, 19), (19, 19)] {
        assert_eq!(out.get_pixel(x, y).0[3], 0);
    }
    assert_eq!(out.get_pixel(10, 10).0, [10, 200, 30, 255]);
    assert_eq!(out.get_pixel(0, 10).0[3], 255);
}

#[test]
fn ellipse_follows_non_square_bounds() {
    let out = convert_circular(&opaque(40, 10), false);
    assert_eq!(out.get_pixel(1, 5).0[3], 255);
    assert_eq!(out.get_pixel(20, 0).0[3], 255);
    assert_eq!(out.get_pixel(2, 0).0[3], 0);
}

#[test]
fn antialias_produces_partial_edge_alpha() {
    let hard = convert_circular(&opaque(32, 32), false);
    let soft = convert_circular(&opaque(32, 32), true);
    let partial = soft
        .pixels()
        .filter(|p| p.0[3] != 0 && p.0[3] != 255)
        .count();
    assert!(partial > 0);
    assert!(hard.pixels().all(|p| p.0[3] == 0 || p.0[3] == 255));
    assert_eq!(soft.get_pixel(16, 16).0[3], 255);
    assert_eq!(soft.get_pixel(0, 0).0[3], 0);
}
