//! Frame loop tests against the recording backend.

use glam::Vec3;
use vectis_geometry::{Disc, DiscKind, Line, MeshGenConfig, Polyline, PolylinePoint, Renderable, ShapeRenderer};
use vectis_render::mock::MockBackend;
use vectis_render::{MaterialKind, MaterialParameter, MeshHandle, ShapeProperty};

fn renderer() -> ShapeRenderer<MockBackend> {
    vectis_render::init_properties();
    ShapeRenderer::new(MockBackend::new()).unwrap()
}

fn handle(shape: &dyn Renderable) -> MeshHandle {
    MeshHandle(shape.id().0)
}

#[test]
fn test_first_frame_uploads_and_draws() {
    let mut renderer = renderer();
    let table = vectis_render::properties().unwrap();
    let mut polyline = Polyline::new();
    let uniforms = polyline.material_parameters(&table, &MeshGenConfig::default()).len();

    let stats = renderer.render(&mut [&mut polyline]);
    assert_eq!(stats.shapes, 1);
    assert_eq!(stats.regenerated, 1);
    assert_eq!(stats.uploads, 1);
    assert_eq!(stats.parameter_updates, uniforms);
    assert_eq!(stats.draws, 1);
    assert!(renderer.is_resident(polyline.id()));

    let draws = renderer.backend().draws();
    assert_eq!(draws[0].material.kind, MaterialKind::Polyline);
    assert_eq!(draws[0].handle, handle(&polyline));
}

#[test]
fn test_thickness_change_only_pushes_uniforms() {
    let mut renderer = renderer();
    let table = vectis_render::properties().unwrap();
    let mut polyline = Polyline::new();
    renderer.render(&mut [&mut polyline]);
    renderer.backend_mut().clear_calls();

    assert!(polyline.set_thickness(0.5));
    assert!(!polyline.is_dirty());

    let stats = renderer.render(&mut [&mut polyline]);
    assert_eq!(stats.regenerated, 0);
    assert_eq!(stats.uploads, 0);
    assert!(stats.parameter_updates > 0);
    assert_eq!(renderer.backend().count_uploads(), 0);
    assert_eq!(
        renderer
            .backend()
            .parameter(handle(&polyline), table.id(ShapeProperty::Thickness)),
        Some(MaterialParameter::Float(0.5))
    );
}

#[test]
fn test_clean_shape_only_draws() {
    let mut renderer = renderer();
    let mut line = Line::new(Vec3::ZERO, Vec3::X);
    renderer.render(&mut [&mut line]);
    renderer.backend_mut().clear_calls();

    let stats = renderer.render(&mut [&mut line]);
    assert_eq!(stats.regenerated, 0);
    assert_eq!(renderer.backend().count_uploads(), 0);
    assert_eq!(renderer.backend().count_parameter_sets(), 0);
    assert_eq!(stats.draws, 1);
}

#[test]
fn test_geometry_change_reuploads() {
    let mut renderer = renderer();
    let mut polyline = Polyline::new();
    renderer.render(&mut [&mut polyline]);
    renderer.backend_mut().clear_calls();

    polyline.add_point(Vec3::new(2.0, 2.0, 0.0));
    let stats = renderer.render(&mut [&mut polyline]);
    assert_eq!(stats.regenerated, 1);
    assert_eq!(stats.uploads, 1);
    assert_eq!(renderer.backend().count_parameter_sets(), 0);

    let resident = renderer.backend().mesh(handle(&polyline)).unwrap();
    assert_eq!(resident[0].index_count, 4 * 6);
}

#[test]
fn test_draws_follow_sort_order() {
    let mut renderer = renderer();
    let mut polyline = Polyline::new();
    let mut disc = Disc::new(DiscKind::Disc, 1.0);
    let mut line = Line::new(Vec3::ZERO, Vec3::Y);
    disc.base_mut().set_sort_order(-1);
    line.base_mut().set_sort_order(5);

    renderer.render(&mut [&mut line, &mut polyline, &mut disc]);
    let kinds: Vec<_> = renderer.backend().draws().iter().map(|d| d.material.kind).collect();
    assert_eq!(kinds, vec![MaterialKind::Disc, MaterialKind::Polyline, MaterialKind::Line]);

    let orders: Vec<_> = renderer.backend().draws().iter().map(|d| d.sort_order).collect();
    assert_eq!(orders, vec![-1, 0, 5]);
}

#[test]
fn test_empty_submeshes_are_skipped() {
    let mut renderer = renderer();
    let mut polyline = Polyline::from_points([PolylinePoint::new(Vec3::ZERO)]);

    let stats = renderer.render(&mut [&mut polyline]);
    assert_eq!(stats.draws, 0);
    assert_eq!(stats.skipped_empty, 1);
    assert!(renderer.backend().draws().is_empty());
}

#[test]
fn test_failed_upload_is_retried() {
    let mut renderer = renderer();
    let mut polyline = Polyline::new();
    renderer.backend_mut().set_fail_uploads(true);

    let stats = renderer.render(&mut [&mut polyline]);
    assert_eq!(stats.upload_failures, 1);
    assert_eq!(stats.draws, 0);
    assert!(polyline.is_dirty());
    assert!(!renderer.is_resident(polyline.id()));

    renderer.backend_mut().set_fail_uploads(false);
    let stats = renderer.render(&mut [&mut polyline]);
    assert_eq!(stats.regenerated, 1);
    assert_eq!(stats.uploads, 1);
    assert!(stats.parameter_updates > 0);
    assert_eq!(stats.draws, 1);
}

#[test]
fn test_release_forces_fresh_upload() {
    let mut renderer = renderer();
    let mut polyline = Polyline::new();
    renderer.render(&mut [&mut polyline]);

    assert!(renderer.release(polyline.id()));
    assert!(!renderer.release(polyline.id()));
    assert_eq!(renderer.backend().resident_meshes(), 0);
    renderer.backend_mut().clear_calls();

    let stats = renderer.render(&mut [&mut polyline]);
    assert_eq!(stats.regenerated, 0);
    assert_eq!(stats.uploads, 1);
    assert!(stats.parameter_updates > 0);

    renderer.release_all();
    assert_eq!(renderer.backend().resident_meshes(), 0);
    assert!(!renderer.is_resident(polyline.id()));
}

#[test]
fn test_frame_bounds() {
    let renderer = renderer();
    assert!(renderer.frame_bounds(std::iter::empty()).is_none());

    let line = Line::new(Vec3::ZERO, Vec3::X);
    let disc = Disc::new(DiscKind::Disc, 2.0);
    let bounds = renderer.frame_bounds([&line as &dyn Renderable, &disc]).unwrap();
    assert!(bounds.contains(Vec3::new(-2.0, 0.0, 0.0)));
    assert!(bounds.contains(Vec3::new(1.0, 0.0, 0.0)));
    assert!(!bounds.contains(Vec3::new(3.0, 0.0, 0.0)));
}

#[test]
fn test_frame_bounds_ignore_shapes_that_draw_nothing() {
    let renderer = renderer();
    let far = Polyline::from_points([
        PolylinePoint::new(Vec3::new(100.0, 100.0, 0.0)),
        PolylinePoint::new(Vec3::new(101.0, 100.0, 0.0)),
    ]);
    let empty = Polyline::from_points(Vec::new());
    let collapsed = Line::new(Vec3::ZERO, Vec3::ZERO);

    let bounds = renderer
        .frame_bounds([&far as &dyn Renderable, &empty, &collapsed])
        .unwrap();
    assert!(bounds.min.x >= 99.0);
    assert!(bounds.min.y >= 99.0);
    assert!(!bounds.contains(Vec3::ZERO));

    assert!(renderer.frame_bounds([&empty as &dyn Renderable, &collapsed]).is_none());
}

#[test]
fn test_cloned_shape_gets_its_own_mesh() {
    let mut renderer = renderer();
    let mut original = Polyline::new();
    renderer.render(&mut [&mut original]);
    let uploaded = renderer.backend().mesh(handle(&original)).unwrap()[0].vertex_bytes.clone();
    renderer.backend_mut().clear_calls();

    let mut copy = original.clone();
    assert_ne!(copy.id(), original.id());
    assert!(copy.is_dirty());
    copy.set_point_position(0, Vec3::new(10.0, 10.0, 0.0)).unwrap();

    let stats = renderer.render(&mut [&mut original, &mut copy]);
    assert_eq!(stats.regenerated, 1);
    assert_eq!(stats.uploads, 1);
    assert_eq!(renderer.backend().resident_meshes(), 2);

    let handles: Vec<_> = renderer.backend().draws().iter().map(|d| d.handle).collect();
    assert_eq!(handles, vec![handle(&original), handle(&copy)]);
    assert_eq!(
        renderer.backend().mesh(handle(&original)).unwrap()[0].vertex_bytes,
        uploaded
    );
    assert_ne!(
        renderer.backend().mesh(handle(&copy)).unwrap()[0].vertex_bytes,
        uploaded
    );
}

#[test]
fn test_dropped_shape_is_released_by_id() {
    let mut renderer = renderer();
    let mut kept = Line::default();
    let dropped = {
        let mut temporary = Polyline::new();
        renderer.render(&mut [&mut kept, &mut temporary]);
        temporary.id()
    };
    assert_eq!(renderer.resident_count(), 2);

    assert!(renderer.release(dropped));
    assert_eq!(renderer.resident_count(), 1);
    assert_eq!(renderer.backend().resident_meshes(), 1);
    assert!(renderer.is_resident(kept.id()));
}

#[test]
fn test_dashed_line_renders_without_rebuild() {
    let mut renderer = renderer();
    let table = vectis_render::properties().unwrap();
    let mut line = Line::new(Vec3::ZERO, Vec3::new(4.0, 0.0, 0.0));
    renderer.render(&mut [&mut line]);
    renderer.backend_mut().clear_calls();

    line.set_dashed(true);
    line.set_dash_style(vectis_geometry::DashStyle::new(0.5, 0.25));
    let stats = renderer.render(&mut [&mut line]);
    assert_eq!(stats.regenerated, 0);
    assert_eq!(stats.uploads, 0);
    assert_eq!(
        renderer
            .backend()
            .parameter(handle(&line), table.id(ShapeProperty::DashSize)),
        Some(MaterialParameter::Float(0.5))
    );
}
