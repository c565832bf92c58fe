#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use std::collections::HashSet;

use boids::simulation::error::SimulationError;
use boids::simulation::event_log::{EventKind, EventLog};
use boids::simulation::flock::Flock;
use boids::simulation::geometric_utils::{magnitude, vec2};
use boids::simulation::params::Params;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn create_test_params() -> Params {
    Params {
        n_boids: 30,
        box_width: 1000.0,
        box_height: 1000.0,
        spawn_mass: 20.0,
        mass_to_size: 1.0,
        ..Params::default()
    }
}

#[test]
fn test_flock_creation() {
    let params = create_test_params();
    let mut rng = StdRng::seed_from_u64(7);
    let flock = Flock::new(&params, &mut rng).unwrap();

    assert_eq!(flock.population.len(), params.n_boids);
    assert_eq!(flock.time, 0.0);
    assert_eq!(flock.tick, 0);

    let ids: HashSet<usize> = flock.population.boids().iter().map(|b| b.id).collect();
    assert_eq!(ids.len(), params.n_boids);

    for boid in flock.population.boids() {
        assert!(boid.is_alive());
        assert_eq!(boid.mass(), params.spawn_mass);
        assert!(boid.pos()[0] >= 0.0 && boid.pos()[0] < params.box_width);
        assert!(boid.pos()[1] >= 0.0 && boid.pos()[1] < params.box_height);
        assert!(boid.vel()[0].abs() <= params.max_speed);
        assert!(boid.vel()[1].abs() <= params.max_speed);
    }
}

#[test]
fn test_same_seed_same_flock() {
    let params = create_test_params();
    let a = Flock::new(&params, &mut StdRng::seed_from_u64(42)).unwrap();
    let b = Flock::new(&params, &mut StdRng::seed_from_u64(42)).unwrap();

    for (x, y) in a.population.boids().iter().zip(b.population.boids()) {
        assert_eq!(x.id, y.id);
        assert_eq!(x.pos(), y.pos());
        assert_eq!(x.vel(), y.vel());
    }
}

#[test]
fn test_invalid_params_are_rejected() {
    let params = Params {
        min_speed: 1.0,
        max_speed: 0.5,
        ..create_test_params()
    };
    assert!(matches!(
        params.validate(),
        Err(SimulationError::InvalidParams(_))
    ));
    assert!(Flock::new(&params, &mut StdRng::seed_from_u64(1)).is_err());

    for edge_margin_pct in [-1.0, 50.0, 75.0] {
        let params = Params {
            edge_margin_pct,
            ..create_test_params()
        };
        assert!(matches!(
            params.validate(),
            Err(SimulationError::InvalidParams(_))
        ));
    }

    for edge_margin_pct in [0.0, 49.9] {
        let params = Params {
            edge_margin_pct,
            ..create_test_params()
        };
        assert!(params.validate().is_ok());
    }
}

#[test]
fn test_spawn_into_empty_world_is_rejected() {
    let params = create_test_params();
    let mut flock = Flock::empty(&params).unwrap();
    let flat = Params {
        box_width: 0.0,
        ..create_test_params()
    };

    let result = flock.spawn(&flat, &mut StdRng::seed_from_u64(5));

    assert!(matches!(result, Err(SimulationError::InvalidParams(_))));
    assert!(flock.population.is_empty());
    assert_eq!(flock.population.ids_issued(), 0);
}

#[test]
fn test_simulation_step() {
    let params = create_test_params();
    let mut flock = Flock::new(&params, &mut StdRng::seed_from_u64(3)).unwrap();

    let dt = 16.0;
    let report = flock.step(&params, dt).unwrap();

    assert_eq!(report.tick, 1);
    assert_eq!(flock.tick, 1);
    assert!((flock.time - dt).abs() < 1e-6);
    assert_eq!(report.population, flock.population.len());
}

#[test]
fn test_predator_eats_prey_within_one_tick() {
    let params = create_test_params();
    let mut flock = Flock::empty(&params).unwrap();

    let predator = flock
        .spawn_at(vec2(100.0, 100.0), vec2(0.01, 0.0), 100.0, &params)
        .unwrap();
    let prey = flock
        .spawn_at(vec2(105.0, 100.0), vec2(0.01, 0.0), 25.0, &params)
        .unwrap();

    let report = flock.step(&params, 16.0).unwrap();

    assert_eq!(report.meals.len(), 1);
    assert_eq!(report.meals[0].predator_id, predator);
    assert_eq!(report.meals[0].prey_id, prey);
    assert_eq!(report.population, 1);

    assert!(flock.population.get(prey).is_none());
    let survivor = flock.population.get(predator).unwrap();
    assert_eq!(survivor.mass(), 125.0);

    // the prey stays gone on later ticks
    flock.step(&params, 16.0).unwrap();
    assert!(flock.population.get(prey).is_none());
    assert_eq!(flock.population.len(), 1);
}

#[test]
fn test_heavier_boid_eats_regardless_of_order() {
    let params = create_test_params();
    let mut flock = Flock::empty(&params).unwrap();

    let small = flock
        .spawn_at(vec2(100.0, 100.0), vec2(0.0, 0.0), 25.0, &params)
        .unwrap();
    let large = flock
        .spawn_at(vec2(101.0, 100.0), vec2(0.0, 0.0), 100.0, &params)
        .unwrap();

    let report = flock.step(&params, 16.0).unwrap();

    assert_eq!(report.meals.len(), 1);
    assert_eq!(report.meals[0].predator_id, large);
    assert_eq!(report.meals[0].prey_id, small);
}

#[test]
fn test_first_predator_in_order_drains_the_group() {
    let params = create_test_params();
    let mut flock = Flock::empty(&params).unwrap();

    let big = flock
        .spawn_at(vec2(100.0, 100.0), vec2(0.0, 0.0), 100.0, &params)
        .unwrap();
    let medium = flock
        .spawn_at(vec2(105.0, 100.0), vec2(0.0, 0.0), 50.0, &params)
        .unwrap();
    let tiny = flock
        .spawn_at(vec2(110.0, 100.0), vec2(0.0, 0.0), 5.0, &params)
        .unwrap();

    let report = flock.step(&params, 16.0).unwrap();

    let meals: Vec<(usize, usize)> = report
        .meals
        .iter()
        .map(|m| (m.predator_id, m.prey_id))
        .collect();
    assert_eq!(meals, vec![(big, medium), (big, tiny)]);
    assert_eq!(report.population, 1);
    assert_eq!(flock.population.get(big).unwrap().mass(), 155.0);
}

#[test]
fn test_eaten_predator_loses_its_own_meal() {
    let params = create_test_params();
    let mut flock = Flock::empty(&params).unwrap();

    // the medium boid scans first and eats the tiny one, then gets eaten itself
    let medium = flock
        .spawn_at(vec2(105.0, 100.0), vec2(0.0, 0.0), 50.0, &params)
        .unwrap();
    let tiny = flock
        .spawn_at(vec2(110.0, 100.0), vec2(0.0, 0.0), 5.0, &params)
        .unwrap();
    let big = flock
        .spawn_at(vec2(100.0, 100.0), vec2(0.0, 0.0), 100.0, &params)
        .unwrap();

    let report = flock.step(&params, 16.0).unwrap();

    let meals: Vec<(usize, usize)> = report
        .meals
        .iter()
        .map(|m| (m.predator_id, m.prey_id))
        .collect();
    assert_eq!(meals, vec![(medium, tiny), (big, medium)]);
    assert_eq!(report.population, 1);
    assert_eq!(flock.population.get(big).unwrap().mass(), 155.0);
}

#[test]
fn test_ids_are_never_reused() {
    let params = create_test_params();
    let mut flock = Flock::empty(&params).unwrap();

    flock
        .spawn_at(vec2(100.0, 100.0), vec2(0.0, 0.0), 100.0, &params)
        .unwrap();
    let prey = flock
        .spawn_at(vec2(103.0, 100.0), vec2(0.0, 0.0), 10.0, &params)
        .unwrap();
    flock.step(&params, 16.0).unwrap();
    assert!(flock.population.get(prey).is_none());

    let newcomer = flock
        .spawn_at(vec2(500.0, 500.0), vec2(0.0, 0.0), 10.0, &params)
        .unwrap();
    assert_eq!(newcomer, 2);
    assert_eq!(flock.population.ids_issued(), 3);
}

#[test]
fn test_lone_boid_without_wrap_steers_from_edge() {
    let params = Params {
        can_wrap: false,
        ..create_test_params()
    };
    let mut flock = Flock::empty(&params).unwrap();
    let id = flock
        .spawn_at(vec2(10.0, 10.0), vec2(0.01, 0.0), 20.0, &params)
        .unwrap();

    let report = flock.step(&params, 16.0).unwrap();
    assert!(report.meals.is_empty());

    let boid = flock.population.get(id).unwrap();
    assert!(boid.vel()[0] > 0.0);
    assert!(boid.vel()[1] > 0.0);
    assert!((magnitude(boid.vel()) - params.max_speed).abs() < 1e-6);
}

#[test]
fn test_lone_boid_in_the_middle_keeps_heading() {
    let params = Params {
        can_wrap: false,
        ..create_test_params()
    };
    let mut flock = Flock::empty(&params).unwrap();
    let id = flock
        .spawn_at(vec2(500.0, 500.0), vec2(0.01, 0.0), 20.0, &params)
        .unwrap();

    flock.step(&params, 16.0).unwrap();

    let boid = flock.population.get(id).unwrap();
    assert_eq!(boid.vel(), &vec2(0.01, 0.0));
    assert!((boid.pos()[0] - 500.16).abs() < 1e-3);
}

#[test]
fn test_predation_is_logged() {
    let params = create_test_params();
    let mut flock = Flock::empty(&params).unwrap();
    flock
        .spawn_at(vec2(100.0, 100.0), vec2(0.0, 0.0), 100.0, &params)
        .unwrap();
    flock
        .spawn_at(vec2(103.0, 100.0), vec2(0.0, 0.0), 10.0, &params)
        .unwrap();

    flock.step(&params, 16.0).unwrap();

    let newest = flock.event_log.events().front().unwrap();
    assert_eq!(newest.kind, EventKind::Predation);
    assert!(newest.description.contains("boid 0 ate boid 1"));
    assert_eq!(flock.event_log.events().len(), 3);
}

#[test]
fn test_event_log_drops_oldest_entries() {
    let mut log = EventLog::new(2);
    log.log(1.0, "first", EventKind::Spawn);
    log.log(2.0, "second", EventKind::Spawn);
    log.log(3.0, "third", EventKind::Predation);

    assert_eq!(log.capacity(), 2);
    assert_eq!(log.events().len(), 2);

    let descriptions: Vec<&str> = log
        .events()
        .iter()
        .map(|event| event.description.as_str())
        .collect();
    assert_eq!(descriptions, vec!["third", "second"]);
    assert!(log.events().iter().all(|event| event.time != 1.0));
}

#[test]
fn test_crowded_flock_conserves_mass_and_invariants() {
    let params = Params {
        box_width: 120.0,
        box_height: 120.0,
        ..create_test_params()
    };
    let mut rng = StdRng::seed_from_u64(11);
    let mut flock = Flock::empty(&params).unwrap();
    for i in 0..40 {
        flock.spawn(&params, &mut rng).unwrap();
        // vary masses so that predation can happen
        let id = flock
            .spawn_at(
                vec2(3.0 * i as f32, 3.0 * i as f32),
                vec2(0.01, -0.01),
                5.0 + i as f32,
                &params,
            )
            .unwrap();
        assert_eq!(id, 2 * i + 1);
    }

    let initial_mass = flock.stats().total_mass;
    let mut eaten: HashSet<usize> = HashSet::new();

    for _ in 0..200 {
        let report = flock.step(&params, 16.0).unwrap();

        for meal in &report.meals {
            // each boid is eaten at most once
            assert!(eaten.insert(meal.prey_id));
            assert!(!eaten.contains(&meal.predator_id));
        }

        for boid in flock.population.boids() {
            assert!(boid.is_alive());
            assert!(!eaten.contains(&boid.id));
            assert!((boid.radius() - boid.mass().sqrt() * params.mass_to_size).abs() < 1e-3);
            assert_eq!(boid.shape.radius, boid.radius());

            let speed = magnitude(boid.vel());
            assert!(speed >= params.min_speed * 0.999);
            assert!(speed <= params.max_speed * 1.001);
        }

        let stats = flock.stats();
        assert_eq!(stats.population, flock.population.len());
        assert!((stats.total_mass - initial_mass).abs() / initial_mass < 1e-4);
    }

    assert!(!eaten.is_empty());
}

#[test]
fn test_empty_flock_stats() {
    let params = create_test_params();
    let mut flock = Flock::empty(&params).unwrap();
    flock.step(&params, 16.0).unwrap();

    let stats = flock.stats();
    assert_eq!(stats.population, 0);
    assert_eq!(stats.total_mass, 0.0);
    assert_eq!(stats.largest_mass, 0.0);
    assert_eq!(stats.mean_speed, 0.0);
}

#[test]
fn test_params_save_and_load() {
    let params = Params {
        n_boids: 7,
        high_crowding: 12.5,
        can_wrap: false,
        ..create_test_params()
    };

    let path = std::env::temp_dir().join("boids_params_roundtrip.json");
    let path = path.to_str().unwrap();
    params.save_to_file(path).unwrap();

    let loaded = Params::load_from_file(path).unwrap();
    assert_eq!(loaded.n_boids, 7);
    assert_eq!(loaded.high_crowding, 12.5);
    assert!(!loaded.can_wrap);

    std::fs::remove_file(path).unwrap();
}

#[test]
fn test_partial_params_file_uses_defaults() {
    let path = std::env::temp_dir().join("boids_params_partial.json");
    let path = path.to_str().unwrap();
    std::fs::write(path, r#"{ "n_boids": 3, "debug": true }"#).unwrap();

    let loaded = Params::load_from_file(path).unwrap();
    let defaults = Params::default();
    assert_eq!(loaded.n_boids, 3);
    assert!(loaded.debug);
    assert_eq!(loaded.max_speed, defaults.max_speed);
    assert_eq!(loaded.perception_radius, defaults.perception_radius);

    std::fs::remove_file(path).unwrap();
}

#[test]
fn test_invalid_params_file_is_rejected() {
    let path = std::env::temp_dir().join("boids_params_invalid.json");
    let path = path.to_str().unwrap();
    std::fs::write(path, r#"{ "edge_margin_pct": 75.0 }"#).unwrap();

    assert!(Params::load_from_file(path).is_err());

    std::fs::remove_file(path).unwrap();
}
