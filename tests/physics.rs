mod common;

use common::{body, canvas_center, demo_config, field};
use threebody::diagnostics::{angular_momentum, momentum, total_energy};
use threebody::orbit::circular_ring;
use threebody::vector::magnitude;
use threebody::{ConfigError, ForceLaw, SimulationConfig, SimulationLoop, SimulationState, Vec2};

// ==================================================================================
// Gravity tests
// ==================================================================================

#[test]
fn newtonian_magnitude_and_direction() {
    let g = 5.0;
    let f = field(g, ForceLaw::Newtonian);
    let mut bodies = vec![
        body(3.0, 2.0, 100.0, 100.0, 0.0, 0.0),
        body(7.0, 2.0, 130.0, 140.0, 0.0, 0.0),
    ];
    f.compute_accelerations(&mut bodies);

    let r = 50.0;
    let a = bodies[0].acceleration;
    assert!((magnitude(a) - g * 7.0 / (r * r)).abs() < 1e-12);

    let toward = (bodies[1].position - bodies[0].position) / r;
    assert!((a / magnitude(a) - toward).norm() < 1e-12);
}

#[test]
fn product_law_matches_newton_for_a_unit_mass_probe() {
    let g = 5.0;
    let f = field(g, ForceLaw::Product);
    let mut bodies = vec![
        body(1.0, 1.0, 0.0, 0.0, 0.0, 0.0),
        body(4.0, 1.0, -20.0, 0.0, 0.0, 0.0),
    ];
    f.compute_accelerations(&mut bodies);
    let a = bodies[0].acceleration;
    assert!((a.x + g * 4.0 / 400.0).abs() < 1e-12);
    assert_eq!(a.y, 0.0);
}

#[test]
fn inverse_square_law() {
    let f = field(1.0, ForceLaw::Newtonian);
    let mut near = vec![body(1.0, 0.5, 0.0, 0.0, 0.0, 0.0), body(1.0, 0.5, 10.0, 0.0, 0.0, 0.0)];
    let mut far = vec![body(1.0, 0.5, 0.0, 0.0, 0.0, 0.0), body(1.0, 0.5, 20.0, 0.0, 0.0, 0.0)];
    f.compute_accelerations(&mut near);
    f.compute_accelerations(&mut far);
    let ratio = near[0].acceleration.norm() / far[0].acceleration.norm();
    assert!((ratio - 4.0).abs() < 1e-9, "Expected 4x, got {}", ratio);
}

#[test]
fn collision_floor_clamps_close_encounters() {
    let g = 5.0;
    let f = field(g, ForceLaw::Newtonian);
    // radii sum to 4, actual separation 1
    let mut bodies = vec![body(1.0, 2.0, 0.0, 0.0, 0.0, 0.0), body(3.0, 2.0, 1.0, 0.0, 0.0, 0.0)];
    f.compute_accelerations(&mut bodies);
    let a = magnitude(bodies[0].acceleration);
    let floor = 4.0_f64;
    assert!(a.is_finite());
    assert!((a - g * 3.0 * 1.0 / floor.powi(3)).abs() < 1e-12);
    assert!(a <= g * 3.0 / (floor * floor));
}

#[test]
fn coincident_bodies_do_not_produce_nan() {
    let f = field(5.0, ForceLaw::Product);
    let mut bodies = vec![body(1.0, 2.0, 3.0, 3.0, 0.0, 0.0), body(1.0, 2.0, 3.0, 3.0, 0.0, 0.0)];
    f.compute_accelerations(&mut bodies);
    for b in &bodies {
        assert!(b.acceleration.iter().all(|c| c.is_finite()));
    }
}

#[test]
fn summation_order_is_the_slice_order() {
    let f = field(5.0, ForceLaw::Newtonian);
    let bodies = vec![
        body(1.0, 1.0, 0.0, 0.0, 0.0, 0.0),
        body(2.0, 1.0, 10.0, 3.0, 0.0, 0.0),
        body(3.0, 1.0, -7.0, 11.0, 0.0, 0.0),
        body(4.0, 1.0, 5.0, -9.0, 0.0, 0.0),
    ];
    let expected = (1..4)
        .map(|j| {
            let d = bodies[j].position - bodies[0].position;
            d * (5.0 * bodies[j].mass / d.norm().powi(3))
        })
        .fold(Vec2::zeros(), |acc, a| acc + a);
    assert!((f.acceleration_on(0, &bodies) - expected).norm() < 1e-15);
}

// ==================================================================================
// Integrator tests
// ==================================================================================

#[test]
fn integrate_literal_example() {
    let mut b = body(1.0, 1.0, 0.0, 0.0, 1.0, 0.0);
    b.acceleration = Vec2::new(0.0, 1.0);
    b.integrate();
    assert_eq!(b.velocity, Vec2::new(1.0, 1.0));
    assert_eq!(b.position, Vec2::new(1.0, 1.0));
}

#[test]
fn momentum_is_conserved_across_one_tick() {
    let f = field(5.0, ForceLaw::Newtonian);
    let bodies = vec![
        body(1.0, 1.0, 0.0, 0.0, 0.1, 0.0),
        body(5.0, 1.0, 30.0, 10.0, 0.0, -0.2),
        body(2.5, 1.0, -12.0, 25.0, 0.05, 0.3),
    ];
    let mut state = SimulationState::new(bodies, f).unwrap();
    let before = momentum(state.bodies(), &f);
    state.step();
    let after = momentum(state.bodies(), &f);
    assert!((after - before).norm() < 1e-12, "Net momentum changed: {:?}", after - before);
}

#[test]
fn product_law_conserves_unweighted_momentum() {
    let f = field(5.0, ForceLaw::Product);
    let bodies = vec![
        body(1.0, 1.0, 0.0, 0.0, 0.1, 0.0),
        body(5.0, 1.0, 30.0, 10.0, 0.0, -0.2),
    ];
    let mut state = SimulationState::new(bodies, f).unwrap();
    let before = momentum(state.bodies(), &f);
    for _ in 0..10 {
        state.step();
    }
    assert!((momentum(state.bodies(), &f) - before).norm() < 1e-12);
}

#[test]
fn energy_and_angular_momentum_hold_over_100_ticks() {
    let mut sim = SimulationLoop::new(demo_config()).unwrap();
    sim.initialize().unwrap();
    let f = *sim.state().unwrap().field();
    let e0 = total_energy(sim.bodies(), &f);
    let l0 = angular_momentum(sim.bodies(), &f, canvas_center());

    for _ in 0..100 {
        sim.tick();
    }

    let e = total_energy(sim.bodies(), &f);
    let l = angular_momentum(sim.bodies(), &f, canvas_center());
    assert!(((e - e0) / e0).abs() < 1e-4, "energy drift {}", (e - e0) / e0);
    assert!(((l - l0) / l0).abs() < 1e-10, "angular momentum drift {}", (l - l0) / l0);

    let monitor = sim.monitor().unwrap();
    assert_eq!(monitor.samples(), 100);
    assert_eq!(monitor.first_exceeded(0.01), None);
}

#[test]
fn symmetric_triangle_stays_on_its_circle() {
    let mut sim = SimulationLoop::new(demo_config()).unwrap();
    sim.initialize().unwrap();
    for _ in 0..10 {
        sim.tick();
    }
    for b in sim.bodies() {
        let r = (b.position - canvas_center()).norm();
        assert!((r - 100.0).abs() / 100.0 < 0.01, "radius drifted to {}", r);
    }
}

#[test]
fn ship_glyph_does_not_change_the_physics() {
    let mut glow = SimulationLoop::new(demo_config()).unwrap();
    let mut ship = SimulationLoop::new(SimulationConfig {
        glyph: threebody::GlyphKind::Ship,
        ..demo_config()
    })
    .unwrap();
    glow.initialize().unwrap();
    ship.initialize().unwrap();
    for _ in 0..20 {
        glow.tick();
        ship.tick();
    }
    for (a, b) in glow.bodies().iter().zip(ship.bodies()) {
        assert_eq!(a.position, b.position);
        assert_eq!(a.velocity, b.velocity);
    }
}

// ==================================================================================
// Construction errors
// ==================================================================================

#[test]
fn invalid_parameters_fail_at_initialization() {
    let bad_mass = SimulationConfig { mass: -1.0, ..demo_config() };
    assert_eq!(SimulationLoop::new(bad_mass).err(), Some(ConfigError::InvalidMass(-1.0)));

    let bad_g = SimulationConfig { g: f64::NAN, ..demo_config() };
    assert!(matches!(
        SimulationLoop::new(bad_g).err(),
        Some(ConfigError::InvalidGravitationalConstant(_))
    ));

    let mut sim = SimulationLoop::new(demo_config()).unwrap();
    assert_eq!(sim.initialize_with(vec![]), Err(ConfigError::NoBodies));

    let none = SimulationConfig { body_count: 0, ..demo_config() };
    assert_eq!(circular_ring(&none), Err(ConfigError::NoBodies));
}
