use image::Rgba;

use super::*;

#[test]
fn over_opacity_0_is_noop() {
    let dst = [1, 2, 3, 4];
    let src = [200, 200, 200, 200];
    assert_eq!(over(dst, src, 0.0), dst);
}

#[test]
fn over_src_alpha_0_is_noop() {
    let dst = [10, 20, 30, 40];
    let src = [255, 255, 255, 0];
    assert_eq!(over(dst, src, 1.0), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    let dst = [0, 0, 0, 255];
    let src = [255, 0, 0, 255];
    assert_eq!(over(dst, src, 1.0), src);
}

#[test]
fn premultiply_roundtrip_is_exact_for_opaque() {
    for c in [0u8, 1, 77, 254, 255] {
        let px = [c, 255 - c, c / 2, 255];
        assert_eq!(unpremultiply(premultiply(px)), px);
    }
    assert_eq!(premultiply([9, 9, 9, 0]), [0, 0, 0, 0]);
}

#[test]
fn blit_over_clips_to_destination() {
    let mut dst = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255]));
    let src = RgbaImage::from_pixel(3, 3, Rgba([255, 255, 255, 255]));
    blit_over(&mut dst, &src, -1, 2, 1.0);

    assert_eq!(dst.get_pixel(0, 2).0, [255, 255, 255, 255]);
    assert_eq!(dst.get_pixel(1, 3).0, [255, 255, 255, 255]);
    assert_eq!(dst.get_pixel(2, 2).0, [0, 0, 0, 255]);
    assert_eq!(dst.get_pixel(0, 1).0, [0, 0, 0, 255]);
}

#[test]
fn blit_over_applies_opacity() {
    let mut dst = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 255]));
    let src = RgbaImage::from_pixel(1, 1, Rgba([255, 255, 255, 255]));
    blit_over(&mut dst, &src, 0, 0, 0.5);
    let px = dst.get_pixel(0, 0).0;
    assert_eq!(px[3], 255);
    assert!((127..=129).contains(&px[0]));
}

#[test]
fn blit_over_fully_outside_is_noop() {
    let mut dst = RgbaImage::from_pixel(2, 2, Rgba([1, 2, 3, 4]));
    let before = dst.clone();
    let src = RgbaImage::from_pixel(2, 2, Rgba([255, 255, 255, 255]));
    blit_over(&mut dst, &src, 5, 0, 1.0);
    blit_over(&mut dst, &src, 0, -2, 1.0);
    assert_eq!(dst, before);
}
