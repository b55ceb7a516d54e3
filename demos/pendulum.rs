//! Simulates a few seconds of a swinging and a spinning sector, tessellating
//! every frame that changed.
//!
//! Run with `RUST_LOG=debug cargo run --example pendulum` to see the timer
//! and renderer logs.

use std::time::Duration;

use sectorvg::geo::{LatLng, Projector};
use sectorvg::math::{Point, Rect, Size, Vector};
use sectorvg::options::SectorOptions;
use sectorvg::tessellation::Tessellator;
use sectorvg::timer::Timers;
use sectorvg::{animated_sector, CanvasRenderer, VectorLayer};

const FRAME: Duration = Duration::from_millis(16);

/// An equirectangular projection around a fixed origin.
struct Equirectangular {
    origin: LatLng,
    pixels_per_degree: f64,
}

impl Projector for Equirectangular {
    fn lat_lng_to_layer_point(&self, lat_lng: LatLng) -> Point {
        Point::new(
            ((lat_lng.lng - self.origin.lng) * self.pixels_per_degree) as f32,
            ((self.origin.lat - lat_lng.lat) * self.pixels_per_degree) as f32,
        )
    }

    fn meters_to_pixels(&self, center: LatLng, meters: f64) -> Vector {
        const METERS_PER_DEGREE: f64 = 111_320.0;
        let ry = meters / METERS_PER_DEGREE * self.pixels_per_degree;
        let rx = ry / center.lat.to_radians().cos().max(1e-6);
        Vector::new(rx as f32, ry as f32)
    }
}

fn main() {
    env_logger::init();

    let projector = Equirectangular {
        origin: LatLng::new(52.53, 13.38),
        pixels_per_degree: 20_000.0,
    };

    let mut timers = Timers::new();
    let mut renderer = CanvasRenderer::new();
    renderer.set_fill_pattern(|_surface, layer| {
        log::debug!("fill pattern hook for {:?}", layer.id());
    });

    let mut camera = animated_sector(
        [52.52, 13.40],
        250.0,
        SectorOptions::default()
            .pixel_radius(false)
            .direction_angle(45.0)
            .view_angle_range(60.0)
            .border(1.0)
            .border_dash_line(true)
            .fill_pattern(true),
    )
    .unwrap();
    camera.pendulum(&mut timers, 5.0, 0.0, 90.0, None);

    let mut radar = animated_sector(
        [52.525, 13.39],
        80.0,
        SectorOptions::default().view_angle_range(30.0),
    )
    .unwrap();
    radar.spin(&mut timers, 12.0, Some(Duration::from_millis(100)));

    let view = Rect::new(Point::zero(), Size::new(1024.0, 768.0));
    let mut tessellator = Tessellator::new();
    let mut frames = 0;

    while timers.now() < Duration::from_secs(3) {
        timers.advance(FRAME);

        renderer.begin_frame(Some(view));
        let layers: [&dyn VectorLayer; 2] = [&camera, &radar];
        let drawn = renderer.update_dirty(layers, &mut tessellator, &projector);
        renderer.end_frame();

        if drawn > 0 {
            frames += 1;
            let meshes = tessellator.take_meshes();
            let triangles: usize = meshes.iter().map(|m| m.buffers.indices.len() / 3).sum();
            log::info!(
                "t={:?} camera={:.1} radar={:.1} meshes={} triangles={}",
                timers.now(),
                camera.direction_angle(),
                radar.direction_angle(),
                meshes.len(),
                triangles
            );
        }
    }

    println!("redrew {} frames", frames);

    camera.remove(&mut timers);
    radar.remove(&mut timers);
}
