//! Headless Frames Example
//!
//! Drives a handful of animated shapes through the shape renderer against the
//! recording backend and logs what each frame cost.
//!
//! Features demonstrated:
//! - Polylines with round joins and per-point colors
//! - Rings, arcs and lines animated through uniforms only
//! - A polyline edited every frame (mesh regeneration)
//! - Puffin scopes around every frame
//!
//! Run with: cargo run -p vectis-geometry --example headless_frames

use glam::Vec3;
use vectis_core::logging;
use vectis_core::profiling::{ProfilingBackend, init_profiling, new_frame, profile_scope};
use vectis_geometry::{
    ArcEndCap, Disc, DiscKind, Line, LineEndCap, Polyline, PolylineJoins, PolylinePoint, Renderable, ShapeRenderer,
};
use vectis_render::Color;
use vectis_render::mock::MockBackend;

const FRAMES: usize = 120;

fn wave(phase: f32) -> Vec<PolylinePoint> {
    (0..64)
        .map(|i| {
            let x = i as f32 * 0.1;
            let hue = i as f32 / 63.0;
            PolylinePoint::new(Vec3::new(x, (x + phase).sin(), 0.0))
                .with_color(Color::RED.lerp(Color::BLUE, hue))
                .with_thickness(1.0 + hue)
        })
        .collect()
}

fn main() {
    logging::init();
    init_profiling(ProfilingBackend::InProcess);
    vectis_render::init_properties();

    let mut renderer = match ShapeRenderer::new(MockBackend::new()) {
        Ok(renderer) => renderer,
        Err(e) => {
            tracing::error!("Failed to create shape renderer: {}", e);
            return;
        }
    };

    let mut wave_line = Polyline::from_points(wave(0.0));
    wave_line.set_closed(false);
    wave_line.set_joins(PolylineJoins::Round);

    let mut ring = Disc::new(DiscKind::Arc, 2.0);
    ring.set_arc_end_caps(ArcEndCap::Round);
    ring.base_mut().set_sort_order(-1);

    let mut axis = Line::new(Vec3::new(-3.0, 0.0, 0.0), Vec3::new(3.0, 0.0, 0.0));
    axis.set_end_caps(LineEndCap::Square);
    axis.set_dashed(true);

    let mut totals = (0, 0, 0);
    for frame in 0..FRAMES {
        new_frame();
        profile_scope!("frame");

        let t = frame as f32 / 60.0;
        ring.set_thickness(0.25 + 0.2 * t.sin().abs());
        ring.set_angle_end(t * std::f32::consts::TAU);
        axis.set_thickness(0.05 + 0.02 * t.cos());
        if frame % 4 == 0 {
            wave_line.replace_all(wave(t));
        }

        let stats = renderer.render(&mut [&mut wave_line, &mut ring, &mut axis]);
        renderer.backend_mut().clear_calls();
        totals.0 += stats.regenerated;
        totals.1 += stats.parameter_updates;
        totals.2 += stats.draws;
    }

    let bounds = renderer.frame_bounds([&wave_line as &dyn Renderable, &ring, &axis]);
    tracing::info!(
        "{} frames: {} regenerations, {} uniform updates, {} draws, bounds {:?}",
        FRAMES,
        totals.0,
        totals.1,
        totals.2,
        bounds
    );

    renderer.release_all();
}
