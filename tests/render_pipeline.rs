//! Optimizer result document through parsing, sampling and both render modes.

use serde_json::json;
use std::time::Duration;
use swarmin_viz::history::OptimizationRecord;
use swarmin_viz::visualization::sample;
use swarmin_viz::{
    parse, parse_json, Benchmark, Canvas, Domain, Error, HistoryError, LeaderPolicy, Objective,
    Parameters, PlottersCanvas, Point2, RecordingCanvas, RenderConfig, RenderError, Rgb,
    TrajectoryRenderer,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn entry(position: [f64; 2]) -> serde_json::Value {
    json!({ "position": position, "dim": 2 })
}

/// Three particles converging on the Rosenbrock minimizer over four iterations
fn result_document() -> serde_json::Value {
    let steps = [
        [[-1.5, 2.0], [0.5, -0.5], [1.5, 2.5]],
        [[-0.5, 1.0], [0.8, 0.2], [1.2, 1.8]],
        [[0.3, 0.5], [0.9, 0.8], [1.1, 1.3]],
        [[0.8, 0.7], [1.0, 1.0], [1.0, 1.1]],
    ];
    let objective = Benchmark::Rosenbrock.resolve(&Parameters::new());

    let mut best = (f64::INFINITY, [0.0; 2]);
    let history: Vec<_> = steps
        .iter()
        .map(|particles| {
            for p in particles {
                let v = objective.value(p).unwrap();
                if v < best.0 {
                    best = (v, *p);
                }
            }
            json!({
                "particles": particles.iter().map(|p| entry(*p)).collect::<Vec<_>>(),
                "velocities": particles.iter().map(|_| entry([0.1, -0.1])).collect::<Vec<_>>(),
                "particle_bests": particles
                    .iter()
                    .map(|p| json!([entry(*p), objective.value(p).unwrap()]))
                    .collect::<Vec<_>>(),
                "global_best_x": entry(best.1),
                "global_best_value": best.0,
            })
        })
        .collect();

    json!({
        "swarm_size": 3,
        "lower_bound": entry([-2.0, -1.0]),
        "upper_bound": entry([2.0, 3.0]),
        "solution": entry(best.1),
        "history": history,
    })
}

fn small_config() -> RenderConfig {
    RenderConfig::default()
        .with_resolution(41)
        .with_size(160, 160)
        .without_text()
}

#[test]
fn history_round_trips_through_json() {
    let parsed = parse_json(&result_document().to_string()).unwrap();
    assert_eq!(parsed.len(), 4);
    assert_eq!(parsed.swarm_size, 3);
    assert_eq!(parsed.domain, Domain::new((-2.0, 2.0), (-1.0, 3.0)));
    assert_eq!(parsed.final_best().unwrap().0, &[1.0, 1.0][..]);

    let values = parsed.best_values();
    assert!(values.windows(2).all(|w| w[1] <= w[0]));
}

#[test]
fn swarm_size_mismatch_is_reported_per_iteration() {
    let mut doc = result_document();
    doc["swarm_size"] = json!(4);
    let record = OptimizationRecord::from_value(doc).unwrap();
    assert!(matches!(
        parse(&record),
        Err(HistoryError::SwarmSizeMismatch {
            iteration: 0,
            field: "particles",
            expected: 4,
            found: 3,
        })
    ));
}

#[test]
fn reference_landscape_is_enclosed_by_its_levels() {
    let objective = Benchmark::Rosenbrock.resolve(&Parameters::new());
    let land = sample(&objective, &Domain::new((-2.0, 2.0), (-1.0, 3.0)), 21).unwrap();
    assert_eq!(land.shape(), (21, 21));
    assert_eq!(land.levels().len(), 20);
    assert!(land.levels()[0] < land.min());
    assert!(land.levels()[19] > land.max());
}

#[test]
fn animation_yields_one_frame_per_iteration() {
    init_tracing();
    let parsed = parse_json(&result_document().to_string()).unwrap();
    let objective = Benchmark::Rosenbrock.resolve(&Parameters::new());
    let renderer = TrajectoryRenderer::new(&objective, small_config());

    let mut canvas = RecordingCanvas::new();
    let animation = renderer.animate(&parsed, &mut canvas).unwrap();

    assert_eq!(animation.len(), 4);
    assert_eq!(canvas.frames().len(), 4);
    assert_eq!(animation.duration(), Duration::from_millis(1200));
    assert!(animation.figure.path.is_empty());

    let background = canvas.background().unwrap();
    assert_eq!(background.shape, (41, 41));
    assert_eq!(background.domain, parsed.domain);

    // The last iteration's particle 1 sits exactly on the global best
    let last = animation.frame(3).unwrap();
    assert_eq!(last.leaders(), vec![1]);
    assert_eq!(last.markers[1].color, Rgb::BLUE);
    assert_eq!(last.markers[0].color, Rgb::RED);
    assert_eq!(last.markers[2].position, Point2::new(1.0, 1.1));

    // Iteration 1 improves on nothing, so the incumbent from iteration 0 is
    // held by no current particle and that frame has no leader
    let leaders: Vec<Vec<usize>> = animation.frames.iter().map(|f| f.leaders()).collect();
    assert_eq!(leaders, vec![vec![2], vec![], vec![1], vec![1]]);

    for (frame, snapshot) in animation.frames.iter().zip(parsed.iter()) {
        let best = Point2::from_position(&snapshot.global_best_x).unwrap();
        for marker in &frame.markers {
            assert_eq!(marker.leader, marker.position == best);
            let expected = if marker.leader { Rgb::BLUE } else { Rgb::RED };
            assert_eq!(marker.color, expected);
        }
    }

    for (recorded, frame) in canvas.frames().iter().zip(&animation.frames) {
        assert!(recorded.paths.is_empty());
        assert_eq!(recorded.markers, frame.markers);
    }
    assert!(matches!(
        animation.frame(4),
        Err(RenderError::FrameOutOfRange { index: 4, len: 4 })
    ));
}

#[test]
fn pulled_frames_match_random_access() {
    let parsed = parse_json(&result_document().to_string()).unwrap();
    let objective = Benchmark::Rosenbrock.resolve(&Parameters::new());
    let config = small_config().with_leader_policy(LeaderPolicy::PersonalBestHolder);
    let renderer = TrajectoryRenderer::new(&objective, config);

    let frames = renderer.frames(&parsed);
    assert_eq!(frames.len(), 4);
    for frame in frames {
        let frame = frame.unwrap();
        assert_eq!(frame, renderer.frame(&parsed, frame.index).unwrap());
    }
}

#[test]
fn static_mode_draws_the_best_path_once() {
    let parsed = parse_json(&result_document().to_string()).unwrap();
    let objective = Benchmark::Rosenbrock.resolve(&Parameters::new());
    let renderer = TrajectoryRenderer::new(&objective, small_config());

    let mut canvas = RecordingCanvas::new();
    let figure = renderer.plot_best_path(&parsed, &mut canvas).unwrap();

    assert_eq!(canvas.frames().len(), 1);
    let (path, color) = &canvas.frames()[0].paths[0];
    assert_eq!(*color, Rgb::BLUE);
    assert_eq!(path.len(), 4);
    assert_eq!(*path, figure.path);
    assert_eq!(path[3], Point2::new(1.0, 1.0));
}

#[test]
fn invalid_resolution_surfaces_as_crate_error() {
    let parsed = parse_json(&result_document().to_string()).unwrap();
    let objective = Benchmark::Rosenbrock.resolve(&Parameters::new());
    let mut config = small_config();
    config.resolution = 1;
    let renderer = TrajectoryRenderer::new(&objective, config);

    let err: Error = renderer
        .plot_best_path(&parsed, &mut RecordingCanvas::new())
        .unwrap_err()
        .into();
    assert!(err.to_string().contains("resolution"));
}

#[test]
fn bitmap_outputs_are_written() {
    init_tracing();
    let parsed = parse_json(&result_document().to_string()).unwrap();
    let objective = Benchmark::Himmelblau.resolve(&Parameters::new());
    let config = small_config().with_frame_interval(Duration::from_millis(50));
    let renderer = TrajectoryRenderer::new(&objective, config.clone());

    let dir = std::env::temp_dir().join(format!("swarmin-viz-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();

    let png = dir.join("best_path.png");
    {
        let mut canvas = PlottersCanvas::png(&png, &config);
        renderer.plot_best_path(&parsed, &mut canvas).unwrap();
        assert_eq!(canvas.presented(), 1);
    }
    assert!(std::fs::metadata(&png).unwrap().len() > 0);

    let gif = dir.join("swarm.gif");
    {
        let mut canvas = PlottersCanvas::gif(&gif, &config).unwrap();
        renderer.animate(&parsed, &mut canvas).unwrap();
        assert_eq!(canvas.presented(), 4);
    }
    assert!(std::fs::metadata(&gif).unwrap().len() > 0);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn present_without_background_fails() {
    let dir = std::env::temp_dir().join(format!("swarmin-viz-empty-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let png = dir.join("empty.png");
    let mut canvas = PlottersCanvas::png(&png, &small_config());
    assert!(matches!(canvas.present(), Err(RenderError::Backend(_))));
    drop(canvas);
    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn empty_history_renders_background_only() {
    let mut doc = result_document();
    doc["history"] = json!([]);
    let parsed = parse_json(&doc.to_string()).unwrap();
    let objective = Benchmark::Rastrigin.resolve(&Parameters::new());
    let renderer = TrajectoryRenderer::new(&objective, small_config());

    let mut still = RecordingCanvas::new();
    let figure = renderer.plot_best_path(&parsed, &mut still).unwrap();
    assert!(figure.path.is_empty());
    assert_eq!(still.frames().len(), 1);
    assert!(still.frames()[0].paths.is_empty());

    let mut moving = RecordingCanvas::new();
    let animation = renderer.animate(&parsed, &mut moving).unwrap();
    assert!(animation.is_empty());
    assert!(moving.frames().is_empty());
    assert!(moving.background().is_some());
}
