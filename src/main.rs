use std::fs::File;
use std::io::prelude::*;
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Duration;

use base64::prelude::*;
use clap::{Parser, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;

use labelfit::geometry::{
    rect_overlap_area, seg_rect_sqr_overlap_len, sqr_distance, Point, Rect, Size,
};
use labelfit::optimizers::{RayCastOptimizer, SimAnnealingOptimizer};
use labelfit::simulation::{random_scene, Scene, SceneParams};
use labelfit::{Obstacle, ObstacleRef, PointFeature, PositionsOptimizer};

const DT: f64 = 1.0 / 60.0;

/// Runs an optimizer over an animated scene and records per-frame
/// placement quality to a CSV file.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Number of moving features in the scene.
    #[arg(long, default_value_t = 20)]
    features: usize,
    /// Number of static obstacles in the scene.
    #[arg(long, default_value_t = 10)]
    obstacles: usize,
    /// Number of animation frames to simulate.
    #[arg(long, default_value_t = 300)]
    frames: u32,
    /// Per-frame optimization budget in milliseconds.
    #[arg(long, default_value_t = 10)]
    budget_ms: u64,
    /// Optimizer to drive.
    #[arg(long, value_enum, default_value = "annealing")]
    optimizer: OptimizerKind,
    /// Seed for the scene and the annealing draws; random when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Output CSV path.
    #[arg(long, default_value = "out.csv")]
    out: PathBuf,
    /// Field width in pixels.
    #[arg(long, default_value_t = 800)]
    field_width: i32,
    /// Field height in pixels.
    #[arg(long, default_value_t = 600)]
    field_height: i32,
    /// Fraction of features whose labels never move.
    #[arg(long, default_value_t = 0.1)]
    fixed_fraction: f64,
}

#[derive(Clone, Copy, ValueEnum)]
enum OptimizerKind {
    Annealing,
    Raycast,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    check_field(&args)?;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let params = SceneParams {
        features: args.features,
        obstacles: args.obstacles,
        field: Size::new(args.field_width, args.field_height),
        fixed_fraction: args.fixed_fraction,
    };
    let mut scene = random_scene(&params, &mut rng);
    log::info!(
        "scene: {} features, {} obstacles, {}x{} field",
        args.features,
        args.obstacles,
        args.field_width,
        args.field_height
    );

    let mut optimizer: Box<dyn PositionsOptimizer> = match args.optimizer {
        OptimizerKind::Annealing => match args.seed {
            Some(seed) => Box::new(SimAnnealingOptimizer::seeded(seed)),
            None => Box::new(SimAnnealingOptimizer::new()),
        },
        OptimizerKind::Raycast => Box::new(RayCastOptimizer::new()),
    };
    scene.register_into(optimizer.as_mut());

    let budget = Duration::from_millis(args.budget_ms);
    let mut output = BufWriter::with_capacity(65536, File::create(&args.out)?);

    let mut overlap_sum = 0_i64;
    let mut obstacle_sum = 0_i64;
    let mut distance_sum = 0.0_f64;

    for frame in 0..args.frames {
        scene.update(DT);
        optimizer.best_fit(budget);

        let rects: Vec<Rect> = scene
            .features
            .iter()
            .map(|f| f.borrow().label_rect())
            .collect();
        let pivots: Vec<Point> = scene
            .features
            .iter()
            .map(|f| f.borrow().screen_pivot())
            .collect();

        let overlap = label_overlap(&rects);
        let against = obstacle_overlap(&rects, &scene.obstacles);
        let distance = mean_preference_distance(&scene);
        overlap_sum += overlap;
        obstacle_sum += against;
        distance_sum += distance;

        output.write_all(frame.to_string().as_bytes())?;
        output.write_all(b",")?;
        output.write_all(overlap.to_string().as_bytes())?;
        output.write_all(b",")?;
        output.write_all(against.to_string().as_bytes())?;
        output.write_all(b",")?;
        output.write_all(format!("{distance:.2}").as_bytes())?;
        output.write_all(b",")?;
        output.write_all(serialize_rects(&rects)?.as_bytes())?;
        output.write_all(b",")?;
        output.write_all(serialize_pivots(&pivots)?.as_bytes())?;
        output.write_all(b"\n")?;
    }

    let frames = args.frames.max(1) as f64;
    println!(
        "{} frames: mean label overlap {:.1}, mean obstacle overlap {:.1}, mean preference distance {:.1}",
        args.frames,
        overlap_sum as f64 / frames,
        obstacle_sum as f64 / frames,
        distance_sum / frames,
    );
    Ok(())
}

/// Rejects field dimensions the scene generator cannot sample positions
/// from.
fn check_field(args: &Args) -> anyhow::Result<()> {
    if args.field_width <= 0 || args.field_height <= 0 {
        anyhow::bail!(
            "field must be positive, got {}x{}",
            args.field_width,
            args.field_height
        );
    }
    Ok(())
}

/// Total pairwise overlap area between the placed labels.
fn label_overlap(rects: &[Rect]) -> i64 {
    let mut total = 0;
    for (i, a) in rects.iter().enumerate() {
        for b in &rects[i + 1..] {
            total += rect_overlap_area(a, b);
        }
    }
    total
}

/// Total overlap between labels and obstacles: area against boxes,
/// squared clipped length against segments.
fn obstacle_overlap(rects: &[Rect], obstacles: &[ObstacleRef]) -> i64 {
    let mut total = 0;
    for rect in rects {
        for obstacle in obstacles {
            total += match obstacle.as_ref() {
                Obstacle::Box(b) => rect_overlap_area(rect, b),
                Obstacle::Segment(s) => seg_rect_sqr_overlap_len(s, rect),
            };
        }
    }
    total
}

/// Mean distance between each label offset and its nearest preferred
/// offset.
fn mean_preference_distance(scene: &Scene) -> f64 {
    let mut total = 0.0;
    let mut count = 0;
    for feature in &scene.features {
        let feature = feature.borrow();
        let offset = feature.label_offset();
        let nearest = feature
            .preferred_positions()
            .iter()
            .map(|p| sqr_distance(offset, p.offset) as f64)
            .fold(f64::INFINITY, f64::min);
        if nearest.is_finite() {
            total += nearest.sqrt();
            count += 1;
        }
    }
    if count == 0 {
        0.0
    } else {
        total / count as f64
    }
}

fn serialize_rects(rects: &[Rect]) -> anyhow::Result<String> {
    Ok(BASE64_STANDARD.encode(serde_json::to_string(rects)?))
}

fn serialize_pivots(pivots: &[Point]) -> anyhow::Result<String> {
    Ok(BASE64_STANDARD.encode(serde_json::to_string(pivots)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_field_dimensions_are_rejected() {
        let args = Args::parse_from(["labelfit", "--field-width", "0"]);
        assert!(check_field(&args).is_err());

        let args = Args::parse_from(["labelfit", "--field-height=-600"]);
        assert!(check_field(&args).is_err());

        let args = Args::parse_from(["labelfit"]);
        assert!(check_field(&args).is_ok());
    }
}
