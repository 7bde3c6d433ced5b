use orrery::{
    Body, Bounds, Comet, Scene, SimConfig, Simulation, Vector2,
    seeder::place_orbiter,
    vector,
};

fn two_body(gravity: f64) -> Simulation {
    let center = Vector2::new(400.0, 300.0);
    let (pos, vel) = place_orbiter(center, 1000.0, 100.0, 0.0, gravity);
    assert_eq!(pos, Vector2::new(500.0, 300.0));

    let bodies = vec![
        Body::new("star", center, 1000.0, 10.0, 2000).stationary(),
        Body::new("planet", pos, 1.0, 2.0, 2000).with_velocity(vel),
    ];
    Simulation::with_bodies(bodies, gravity, 0.0).unwrap()
}

#[test]
fn circular_orbit_stays_near_its_radius() {
    let mut sim = two_body(1e-4);
    let center = Vector2::new(400.0, 300.0);

    for _ in 0..1000 {
        sim.tick();
        let r = vector::distance(center, sim.body(1).unwrap().pos);
        assert!((80.0..=120.0).contains(&r), "orbit drifted to r = {r}");
    }

    // The planet actually moved along the orbit rather than sitting still.
    let planet = sim.body(1).unwrap();
    assert!(planet.pos.y > 300.0 + 20.0);
    assert_eq!(sim.body(0).unwrap().pos, center);
}

#[test]
fn stationary_body_ignores_ticks_but_follows_drags() {
    let mut scene = Scene::new(SimConfig::compact(), 800.0, 600.0, 5).unwrap();
    let sun_start = scene.simulation().body(0).unwrap().pos;

    for _ in 0..100 {
        scene.tick();
    }
    assert_eq!(scene.simulation().body(0).unwrap().pos, sun_start);

    assert_eq!(scene.drag_start(sun_start.x + 1.0, sun_start.y), Some(0));
    scene.drag_move(101.0, 50.0);
    for _ in 0..10 {
        scene.tick();
    }
    scene.drag_end();
    assert_eq!(scene.simulation().body(0).unwrap().pos, Vector2::new(100.0, 50.0));
}

#[test]
fn dragged_planet_is_frozen_until_release() {
    let mut sim = two_body(1e-4);
    let mut ctl = orrery::InteractionController::default();

    assert_eq!(ctl.on_drag_start(&mut sim, Vector2::new(500.5, 300.0)), Some(1));
    ctl.on_drag_move(&mut sim, Vector2::new(600.5, 300.0));
    for _ in 0..20 {
        sim.tick();
    }
    assert_eq!(sim.body(1).unwrap().pos, Vector2::new(600.0, 300.0));

    ctl.on_drag_end(&mut sim);
    sim.tick();
    assert_ne!(sim.body(1).unwrap().pos, Vector2::new(600.0, 300.0));
}

#[test]
fn long_run_keeps_every_trail_bounded_and_finite() {
    let mut config = SimConfig::compact();
    config.trail_cap = 64;
    config.star_count = 10;
    let mut scene = Scene::new(config, 1200.0, 900.0, 99).unwrap();

    for _ in 0..500 {
        scene.tick();
    }
    for body in scene.simulation().bodies() {
        assert!(body.trail.len() <= 64, "{} trail overflowed", body.name);
        assert!(vector::is_finite(body.pos));
        assert!(body.display_radius >= 0.0);
    }
    assert_eq!(scene.simulation().body(1).unwrap().trail.len(), 64);
}

#[test]
fn hover_leave_cycles_never_drift() {
    let mut scene = Scene::new(SimConfig::classic(), 800.0, 600.0, 8).unwrap();
    let base = scene.simulation().body(0).unwrap().base_radius;

    for _ in 0..50 {
        scene.hover(400.0, 300.0);
        assert!(scene.simulation().body(0).unwrap().display_radius > base);
        scene.hover(-1000.0, -1000.0);
        assert_eq!(scene.simulation().body(0).unwrap().display_radius, base);
    }
}

#[test]
fn comet_on_last_tick_respawns_on_an_edge() {
    let bounds = Bounds::new(640.0, 480.0);
    let mut rng = fastrand::Rng::with_seed(21);
    let mut comet = Comet::new(bounds, 6, &mut rng);
    comet.pos = Vector2::new(320.0, 240.0);
    comet.vel = Vector2::new(-2.0, 3.0);
    comet.lifespan = 1;

    assert!(comet.update(bounds, &mut rng));
    assert!(bounds.on_edge(comet.pos));
    assert!(comet.lifespan >= 20);
}
