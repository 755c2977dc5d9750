pub mod test_utils;

use geo_types::MultiPolygon;
use trajectory_builder::config::GeneratorConfig;
use trajectory_builder::coord_transform::CoordSystem;
use trajectory_builder::fence::Fence;
use trajectory_builder::road_network::{GeoJsonRoadNetwork, NoRoadNetwork, RoadGraph};
use trajectory_builder::trajectory::parse_trajectory;
use trajectory_builder::{TrajectoryError, TrajectoryGenerator, TrajectoryRequest};

fn fallback_generator() -> TrajectoryGenerator {
    test_utils::init_logging();
    TrajectoryGenerator::new(GeneratorConfig::default(), NoRoadNetwork)
}

#[test]
fn square_fence_without_roads() {
    let generator = fallback_generator();
    let mut request = generator.request(test_utils::shanghai_fence());
    request.num_points = 10;
    request.total_distance = 1000;
    request.error_margin = 0.00001;

    let fence = Fence::parse(&request.fence, CoordSystem::Bd09).unwrap();
    for seed in 0..20 {
        let output = generator
            .generate_string(&request, &mut test_utils::rng(seed))
            .unwrap();
        assert!(output.ends_with(';'));

        let trajectory = parse_trajectory(&output).unwrap();
        assert!(!trajectory.is_empty());
        assert!(trajectory.len() <= 10);
        for point in &trajectory.points {
            assert!(fence.contains(*point), "{point:?} is outside the fence");
        }
    }
}

#[test]
fn same_seed_same_trajectory() {
    let generator = fallback_generator();
    let request = generator.request(test_utils::shanghai_fence());
    let a = generator.generate(&request, &mut test_utils::rng(42)).unwrap();
    let b = generator.generate(&request, &mut test_utils::rng(42)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn trajectory_follows_roads() {
    let network = GeoJsonRoadNetwork::from_geojson_str(&test_utils::zigzag_roads_geojson()).unwrap();
    let generator = TrajectoryGenerator::new(GeneratorConfig::default(), network);
    let request = TrajectoryRequest {
        fence: test_utils::square_fence(121.40, 31.20, 0.01),
        num_points: 30,
        total_distance: 3000,
        error_margin: 0.00001,
        coord_system: CoordSystem::Wgs84,
    };
    let fence = Fence::parse(&request.fence, CoordSystem::Wgs84).unwrap();

    for seed in 0..10 {
        let trajectory = generator.generate(&request, &mut test_utils::rng(seed)).unwrap();
        assert!(!trajectory.is_empty());
        assert!(trajectory.len() <= 30);
        for point in &trajectory.points {
            assert!(fence.contains(*point));
            assert!(
                test_utils::near_zigzag_road(*point, request.error_margin),
                "{point:?} is off the road"
            );
        }
    }
}

#[test]
fn empty_road_graph_falls_back_to_the_fence() {
    let empty = |_: &MultiPolygon<f64>| -> anyhow::Result<RoadGraph> { Ok(RoadGraph::default()) };
    let generator = TrajectoryGenerator::new(GeneratorConfig::default(), empty);
    let mut request = generator.request(test_utils::shanghai_fence());
    request.total_distance = 1000;
    let trajectory = generator.generate(&request, &mut test_utils::rng(1)).unwrap();
    assert!(!trajectory.is_empty());
}

#[test]
fn zero_points() {
    let generator = fallback_generator();
    let mut request = generator.request(test_utils::shanghai_fence());
    request.num_points = 0;
    request.total_distance = 1000;
    let output = generator
        .generate_string(&request, &mut test_utils::rng(1))
        .unwrap();
    assert_eq!(output, ";");
}

#[test]
fn zero_margin_stays_on_the_centerline() {
    let generator = fallback_generator();
    let request = TrajectoryRequest {
        fence: "0,0;0.001,0;0.002,0;0.003,0;0.003,0.001;0.002,0.001;0.001,0.001;0,0.001"
            .to_owned(),
        num_points: 5,
        total_distance: 200,
        error_margin: 0.0,
        coord_system: CoordSystem::Wgs84,
    };
    for seed in 0..10 {
        let trajectory = generator.generate(&request, &mut test_utils::rng(seed)).unwrap();
        assert_eq!(trajectory.len(), 5);
        for point in &trajectory.points {
            assert!((point.y - 0.0005).abs() < 1e-12, "{point:?}");
        }
    }
}

#[test]
fn malformed_requests() {
    let generator = fallback_generator();
    let mut rng = test_utils::rng(0);

    let request = generator.request("1.0;2.0");
    assert!(matches!(
        generator.generate(&request, &mut rng),
        Err(TrajectoryError::Parse(_))
    ));

    let request = generator.request("121.47,31.23;121.48,31.23");
    assert!(matches!(
        generator.generate(&request, &mut rng),
        Err(TrajectoryError::Parse(_))
    ));

    let mut request = generator.request(test_utils::shanghai_fence());
    request.error_margin = f64::NAN;
    assert!(matches!(
        generator.generate(&request, &mut rng),
        Err(TrajectoryError::Parse(_))
    ));
}

#[test]
fn num_points_is_capped() {
    let generator = fallback_generator();
    let mut request = generator.request(test_utils::shanghai_fence());
    request.num_points = 1usize << 42;
    let err = generator
        .generate(&request, &mut test_utils::rng(0))
        .unwrap_err();
    assert!(matches!(err, TrajectoryError::Parse(_)));
    assert_eq!(err.status_code(), 400);

    let config = GeneratorConfig {
        max_num_points: 5,
        ..GeneratorConfig::default()
    };
    let generator = TrajectoryGenerator::new(config, NoRoadNetwork);
    let mut request = generator.request(test_utils::shanghai_fence());
    request.total_distance = 1000;
    request.num_points = 5;
    assert!(generator.generate(&request, &mut test_utils::rng(0)).is_ok());
    request.num_points = 6;
    assert!(matches!(
        generator.generate(&request, &mut test_utils::rng(0)),
        Err(TrajectoryError::Parse(_))
    ));
}

#[test]
fn degenerate_centerline_is_a_generation_error() {
    let generator = fallback_generator();
    // an open square pairs up into a single midpoint
    let request = TrajectoryRequest {
        fence: "0,0;0.01,0;0.01,0.01;0,0.01".to_owned(),
        num_points: 10,
        total_distance: 1000,
        error_margin: 0.00001,
        coord_system: CoordSystem::Wgs84,
    };
    let err = generator
        .generate(&request, &mut test_utils::rng(0))
        .unwrap_err();
    assert!(matches!(err, TrajectoryError::Generation(_)));
    assert_eq!(err.status_code(), 500);
}

#[test]
fn request_defaults_come_from_config() {
    let config = GeneratorConfig {
        num_points: 7,
        total_distance: 1234,
        ..GeneratorConfig::default()
    };
    let generator = TrajectoryGenerator::new(config, NoRoadNetwork);
    let request = generator.request("1,1;2,1;2,2");
    assert_eq!(request.num_points, 7);
    assert_eq!(request.total_distance, 1234);
    assert_eq!(request.coord_system, CoordSystem::Bd09);
}
