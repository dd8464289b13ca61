//! Raycast demo application
//!
//! Builds both spatial index variants over the same deterministic scene,
//! casts a fan of rays through it, and logs how far each index narrows the
//! candidate set. Run with `RUST_LOG=debug` to see build statistics.

use broadphase2d::prelude::*;

/// Region the scene lives in
fn scene_bounds() -> Aabb {
    Aabb::new(Point2::new(0.0, 0.0), Point2::new(640.0, 480.0))
}

/// A deterministic field of boxes and triangles
fn build_scene() -> Vec<ConvexPolygon> {
    let mut shapes = Vec::new();
    for row in 0..6 {
        for col in 0..8 {
            let x = 40.0 + col as f32 * 75.0;
            let y = 40.0 + row as f32 * 75.0;
            if (row + col) % 3 == 0 {
                shapes.push(ConvexPolygon::from_vertices(vec![
                    Point2::new(x, y),
                    Point2::new(x + 30.0, y),
                    Point2::new(x + 15.0, y + 25.0),
                ]));
            } else {
                shapes.push(ConvexPolygon::rect(
                    Point2::new(x, y),
                    Point2::new(x + 24.0, y + 24.0),
                ));
            }
        }
    }
    shapes
}

/// A fan of rays from the lower-left corner across the scene
fn build_rays() -> Vec<Ray> {
    (0..10)
        .map(|i| {
            let target = Point2::new(640.0, 48.0 * i as f32);
            Ray::between(Point2::new(0.0, 0.0), target)
        })
        .collect()
}

fn main() -> Result<(), BuildError> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Starting raycast demo");

    let shapes = build_scene();
    log::info!("Scene holds {} convex shapes", shapes.len());

    let center_split = CenterSplitIndex::build(&shapes, 5, scene_bounds())?;
    let overlap_quad = OverlapQuadIndex::build(&shapes, 4, scene_bounds())?;
    log::info!(
        "Built center-split index ({} nodes) and overlap-quad index ({} nodes)",
        center_split.node_count(),
        overlap_quad.node_count()
    );

    let mut total_split = 0;
    let mut total_quad = 0;
    for (i, ray) in build_rays().iter().enumerate() {
        let split_candidates = center_split.query(ray);
        let quad_candidates = overlap_quad.query(ray);
        total_split += split_candidates.len();
        total_quad += quad_candidates.len();
        log::info!(
            "ray {:2}: center-split {:2} candidates, overlap-quad {:2} candidates (of {})",
            i,
            split_candidates.len(),
            quad_candidates.len(),
            shapes.len()
        );
    }

    log::info!(
        "Totals across all rays: center-split {}, overlap-quad {}",
        total_split,
        total_quad
    );
    log::info!("Raycast demo completed");
    Ok(())
}
