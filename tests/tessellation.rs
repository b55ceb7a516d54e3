mod common;

use common::FlatProjector;
use sectorvg::color::PackedSrgb;
use sectorvg::geo::LatLng;
use sectorvg::options::SectorOptions;
use sectorvg::tessellation::Tessellator;
use sectorvg::{animated_sector, CanvasRenderer};

fn tessellate(options: SectorOptions) -> Tessellator {
    let layer = animated_sector(LatLng::new(200.0, 200.0), 100.0, options).unwrap();
    let mut renderer = CanvasRenderer::new();
    let mut tessellator = Tessellator::new();

    renderer.begin_frame(None);
    renderer.update_layer(&layer, &mut tessellator, &FlatProjector);
    renderer.end_frame();

    tessellator
}

#[test]
fn squashed_half_disc_has_half_the_height() {
    let tessellator = tessellate(
        SectorOptions::default()
            .pixel_radius(false)
            .direction_angle(90.0)
            .view_angle_range(180.0),
    );

    assert_eq!(tessellator.saved_states(), 0);
    assert_eq!(tessellator.meshes().len(), 1);

    let bounds = tessellator.meshes()[0].bounds().unwrap();
    assert!((bounds.min.x - 100.0).abs() < 0.5, "{:?}", bounds);
    assert!((bounds.max.x - 300.0).abs() < 0.5, "{:?}", bounds);
    assert!((bounds.min.y - 150.0).abs() < 0.5, "{:?}", bounds);
    assert!((bounds.max.y - 200.0).abs() < 0.5, "{:?}", bounds);
}

#[test]
fn gradient_starts_at_fill_color_in_the_center() {
    let options = SectorOptions::default();
    let expected = PackedSrgb::from(options.fill_color).mul_alpha(options.fill_opacity);
    let tessellator = tessellate(options);

    let mesh = &tessellator.meshes()[0];
    let center = mesh
        .buffers
        .vertices
        .iter()
        .find(|v| v.position == [200.0, 200.0])
        .unwrap();

    for (a, b) in center.color.0.iter().zip(expected.0.iter()) {
        assert!((a - b).abs() < 1e-4, "{:?} != {:?}", center.color, expected);
    }
}

#[test]
fn dashed_border_adds_a_stroke_mesh() {
    let tessellator = tessellate(
        SectorOptions::default()
            .border(2.0)
            .border_dash_line(true),
    );

    let meshes = tessellator.meshes();
    assert_eq!(meshes.len(), 2);
    assert!(!meshes[1].is_empty());

    let indices: &[u32] = bytemuck::cast_slice(meshes[1].index_bytes());
    assert_eq!(indices, &meshes[1].buffers.indices[..]);
    assert_eq!(indices.len() % 3, 0);
}
