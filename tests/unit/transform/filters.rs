use super::*;

fn noisy(w: u32, h: u32) -> RgbaImage {
    RgbaImage::from_fn(w, h, |x, y| {
        let v = x * 31 + y * 17;
        Rgba([
            (v % 256) as u8,
            ((v * 7) % 256) as u8,
            ((v * 13) % 256) as u8,
            (255 - (v % 200)) as u8,
        ])
    })
}

#[test]
fn mirror_and_flip_reflect_pixels() {
    let img = noisy(5, 3);
    let m = mirror_image(&img);
    let f = flip_image(&img);
    assert_eq!(m.dimensions(), (5, 3));
    assert_eq!(f.dimensions(), (5, 3));
    assert_eq!(m.get_pixel(0, 1), img.get_pixel(4, 1));
    assert_eq!(f.get_pixel(2, 0), img.get_pixel(2, 2));
    assert_eq!(mirror_image(&m), img);
    assert_eq!(flip_image(&f), img);
}

#[test]
fn gray_uses_bt601_weights_and_keeps_alpha() {
    let img = RgbaImage::from_pixel(1, 1, Rgba([200, 100, 50, 90]));
    let out = gray_image(&img);
    let l = ((200 * 299 + 100 * 587 + 50 * 114) / 1000) as u8;
    assert_eq!(out.get_pixel(0, 0).0, [l, l, l, 90]);
}

#[test]
fn gray_is_idempotent() {
    let once = gray_image(&noisy(16, 16));
    assert_eq!(gray_image(&once), once);
}

#[test]
fn binarize_threshold_is_inclusive() {
    let img = RgbaImage::from_fn(2, 1, |x, _| {
        if x == 0 {
            Rgba([128, 128, 127, 255])
        } else {
            Rgba([128, 127, 127, 255])
        }
    });
    let out = binarize_image(&img);
    assert_eq!(out.get_pixel(0, 0).0, [255, 255, 255, 255]);
    assert_eq!(out.get_pixel(1, 0).0, [0, 0, 0, 255]);
}

#[test]
fn binarize_is_idempotent_and_two_valued() {
    let once = binarize_image(&gray_image(&noisy(16, 16)));
    assert!(
        once.pixels()
            .all(|p| p.0[..3] == [0, 0, 0] || p.0[..3] == [255, 255, 255])
    );
    assert_eq!(binarize_image(&once), once);
}

#[test]
fn style_filter_dispatch_matches_functions() {
    let img = noisy(4, 4);
    assert_eq!(StyleFilter::Mirror.apply(&img), mirror_image(&img));
    assert_eq!(StyleFilter::Flip.apply(&img), flip_image(&img));
    assert_eq!(StyleFilter::Gray.apply(&img), gray_image(&img));
    assert_eq!(StyleFilter::Binarization.apply(&img), binarize_image(&img));
}
