use image::Rgba;

use super::*;
use crate::avatar::source::ProviderMap;
use crate::transform::crop::CropType;
use crate::transform::filters::StyleFilter;

fn pool() -> WorkerPool {
    WorkerPool::new(Some(2)).unwrap()
}

fn solid(w: u32, h: u32, v: u8) -> RgbaImage {
    RgbaImage::from_pixel(w, h, Rgba([v, 255 - v, 0, 255]))
}

fn data_with_pos(pos: &str) -> AvatarData {
    let mut data = AvatarData::new(AvatarType::To);
    data.pos = serde_json::from_str(pos).unwrap();
    data
}

fn build(data: &AvatarData, frames: Vec<RgbaImage>, template: TemplateType) -> AvatarModel {
    AvatarModel::build(
        data,
        AvatarSource::new(frames).unwrap(),
        template,
        &PipelineConfig::default(),
        &pool(),
    )
    .unwrap()
}

#[test]
fn expressions_bind_raw_first_frame_size() {
    let data = data_with_pos(r#"[[0, 0, "width/2", "height"], [0, 0, 50, 30]]"#);
    let model = build(&data, vec![solid(200, 100, 9)], TemplateType::Gif);
    assert_eq!(model.rect(0), Some(PosRect::new(0, 0, 100, 100)));
    assert_eq!(model.rect(1), Some(PosRect::new(0, 0, 50, 30)));
    assert_eq!(model.rect(7), Some(PosRect::new(0, 0, 50, 30)));
    assert_eq!(model.rect_len(), 2);
    assert_eq!((model.image_width(), model.image_height()), (100, 100));
}

#[test]
fn batch_resize_keeps_order_and_sizes() {
    let data = data_with_pos("[[0, 0, 40, 10], [0, 0, 20, 30]]");
    let frames = vec![solid(16, 16, 10), solid(16, 16, 120), solid(16, 16, 240)];
    let model = build(&data, frames, TemplateType::Gif);

    assert_eq!(model.frame_count(), 3);
    assert!(model.is_animated());
    for (i, v) in [10u8, 120, 240].into_iter().enumerate() {
        let f = model.frame(i);
        assert_eq!(f.dimensions(), (40, 30));
        assert_eq!(f.get_pixel(20, 15).0[0], v);
    }
}

#[test]
fn resampling_disabled_keeps_source_size() {
    let mut data = data_with_pos("[0, 0, 40, 40]");
    data.resampling = Some(false);
    let model = build(&data, vec![solid(16, 8, 1)], TemplateType::Img);
    assert_eq!(model.frame(0).dimensions(), (16, 8));

    let cfg = PipelineConfig {
        resampling: false,
        ..PipelineConfig::default()
    };
    data.resampling = Some(true);
    let model = AvatarModel::build(
        &data,
        AvatarSource::single(solid(16, 8, 1)),
        TemplateType::Img,
        &cfg,
        &pool(),
    )
    .unwrap();
    assert_eq!(model.frame(0).dimensions(), (40, 40));
}

#[test]
fn margin_mode_is_not_resampled() {
    let mut data = data_with_pos("[0, 0, 40, 40]");
    data.pos_type = PositionMode::Margin;
    let model = build(&data, vec![solid(16, 8, 1)], TemplateType::Img);
    assert_eq!(model.frame(0).dimensions(), (16, 8));
    assert_eq!(model.pos_mode(), PositionMode::Margin);
}

#[test]
fn crop_runs_before_resize() {
    let mut data = data_with_pos("[[0, 0, 10, 10]]");
    data.resampling = Some(false);
    data.crop = Some(PosTokens::scalars(["width/4", "height/4"]));
    data.crop_type = CropType::Pixel;
    let model = build(&data, vec![solid(200, 100, 3)], TemplateType::Img);
    assert_eq!(model.frame(0).dimensions(), (50, 25));

    data.crop = Some(PosTokens::List(Vec::new()));
    let model = build(&data, vec![solid(200, 100, 3)], TemplateType::Img);
    assert_eq!(model.frame(0).dimensions(), (200, 100));
}

#[test]
fn styles_and_mask_apply_to_every_frame() {
    let mut data = data_with_pos("[[0, 0, 10, 10]]");
    data.resampling = Some(false);
    data.style = vec![StyleFilter::Gray];
    data.round = true;
    let model = build(&data, vec![solid(20, 20, 50), solid(20, 20, 200)], TemplateType::Gif);
    for f in model.frames() {
        let c = f.get_pixel(10, 10).0;
        assert_eq!(c[0], c[1]);
        assert_eq!(c[1], c[2]);
        assert_eq!(f.get_pixel(0, 0).0[3], 0);
    }
    assert!(model.is_round());
    assert!(model.is_antialias());
}

#[test]
fn angle_policies() {
    let mut data = data_with_pos("[[0,0,1,1],[0,0,1,1],[0,0,1,1],[0,0,1,1]]");
    data.angle = 10;
    let model = build(&data, vec![solid(4, 4, 0)], TemplateType::Gif);
    assert_eq!(model.angle(3), 10.0);

    data.rotate = true;
    let model = build(&data, vec![solid(4, 4, 0)], TemplateType::Gif);
    assert_eq!(model.angle(0), 10.0);
    assert_eq!(model.angle(2), 190.0);

    let mut data = data_with_pos("[0, 0, 1, 1]");
    data.rotate = true;
    let model = build(&data, vec![solid(4, 4, 0)], TemplateType::Img);
    for _ in 0..50 {
        let a = model.angle(0);
        assert!((0.0..360.0).contains(&a) && a.fract() == 0.0);
    }

    data.angle = -30;
    let model = build(&data, vec![solid(4, 4, 0)], TemplateType::Img);
    for _ in 0..50 {
        assert!((0.0..30.0).contains(&model.angle(0)));
    }
}

#[test]
fn step_uses_integer_division() {
    let groups = vec!["[0,0,1,1]"; 7].join(",");
    let mut data = data_with_pos(&format!("[{groups}]"));
    data.rotate = true;
    let model = build(&data, vec![solid(4, 4, 0)], TemplateType::Gif);
    assert_eq!(model.angle(1), 51.0);
    assert_eq!(model.angle(6), 306.0);
}

#[test]
fn frame_index_wraps_and_cursor_cycles() {
    let mut data = data_with_pos("[0, 0, 4, 4]");
    data.resampling = Some(false);
    let mut model = build(
        &data,
        vec![solid(4, 4, 1), solid(4, 4, 2), solid(4, 4, 3)],
        TemplateType::Img,
    );
    assert_eq!(model.frame(4).get_pixel(0, 0).0[0], 2);

    let seen: Vec<u8> = (0..5).map(|_| model.next_frame().get_pixel(0, 0).0[0]).collect();
    assert_eq!(seen, vec![1, 2, 3, 1, 2]);
}

#[test]
fn deform_model_wraps_records() {
    let mut data = data_with_pos(
        "[[[0,0],[0,10],[10,10],[10,0],[1,1]], [[0,0],[0,5],[5,5],[5,0],[2,2]]]",
    );
    data.pos_type = PositionMode::Deform;
    let model = build(&data, vec![solid(8, 8, 0)], TemplateType::Gif);
    assert_eq!(model.rect(0), None);
    assert_eq!(model.deform(3).map(|r| r.anchor.x), Some(2));
    assert_eq!(model.frame(0).dimensions(), (8, 8));

    let mut canvas = RgbaImage::new(20, 20);
    model.draw_onto(&mut canvas, 0, 1.0).unwrap();
    assert_eq!(canvas.get_pixel(5, 5).0[3], 255);
    assert_eq!(canvas.get_pixel(15, 15).0[3], 0);

    data.rotate = true;
    let model = build(&data, vec![solid(8, 8, 0)], TemplateType::Gif);
    assert_eq!(model.angle(1), 180.0);
}

#[test]
fn zoom_draw_onto_uses_rect() {
    let data = data_with_pos("[2, 2, 6, 6]");
    let model = build(&data, vec![solid(12, 12, 0)], TemplateType::Img);
    let mut canvas = RgbaImage::new(10, 10);
    model.draw_onto(&mut canvas, 0, 1.0).unwrap();
    assert_eq!(canvas.get_pixel(1, 1).0[3], 0);
    assert_eq!(canvas.get_pixel(4, 4).0[3], 255);
    assert_eq!(canvas.get_pixel(8, 8).0[3], 0);
}

#[test]
fn malformed_zoom_fails_build() {
    let data = data_with_pos("[[0, 0, 100, 100], [0, 0, 100]]");
    let err = AvatarModel::build(
        &data,
        AvatarSource::single(solid(4, 4, 0)),
        TemplateType::Gif,
        &PipelineConfig::default(),
        &pool(),
    )
    .unwrap_err();
    assert!(matches!(err, PetpetError::MalformedPosition(_)));
}

#[test]
fn from_provider_reports_missing_role() {
    let provider = ProviderMap::new().with(AvatarType::From, vec![solid(4, 4, 0)]);
    let err = AvatarModel::from_provider(
        &AvatarData::new(AvatarType::Group),
        &provider,
        TemplateType::Img,
        &PipelineConfig::default(),
        &pool(),
    )
    .unwrap_err();
    assert!(matches!(err, PetpetError::Acquisition(_)));
}

#[test]
fn passthrough_accessors() {
    let mut data = data_with_pos("[0, 0, 4, 4]");
    data.opacity = 0.25;
    data.fit = FitType::Contain;
    data.avatar_on_top = false;
    data.antialias = Some(false);
    let model = build(&data, vec![solid(4, 4, 0)], TemplateType::Img);
    assert_eq!(model.kind(), AvatarType::To);
    assert_eq!(model.template_type(), TemplateType::Img);
    assert_eq!(model.fit(), FitType::Contain);
    assert_eq!(model.opacity(), 0.25);
    assert!(!model.is_on_top());
    assert!(!model.is_antialias());
    assert!(!model.is_rotate());
    assert_eq!(model.position(), &[Position::Left, Position::Top]);
    let params = model.zoom_params(0, 2.0).unwrap();
    assert_eq!(params.rect, PosRect::new(0, 0, 4, 4));
    assert_eq!(params.multiple, 2.0);
}
