use serde::Serialize;

use crate::{
    catalog::InfoTable,
    config::SimConfig,
    ephemera::{Bounds, EphemeraField},
    error::Result,
    interaction::InteractionController,
    seeder::{self, SceneSeeder},
    simulation::Simulation,
    vector::Vector2,
};

/// What the host needs to draw one body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodySnapshot {
    pub name: String,
    pub position: [f64; 2],
    pub display_radius: f64,
    pub color: String,
    pub trail_len: usize,
}

/// Single owner of all kernel state: bodies, ephemera and interaction.
///
/// The host calls [`Scene::tick`] once per frame and forwards pointer input in
/// simulation coordinates between ticks.
#[derive(Debug, Clone)]
pub struct Scene {
    config: SimConfig,
    sim: Simulation,
    ephemera: EphemeraField,
    interaction: InteractionController,
    info: InfoTable,
    bounds: Bounds,
    sun_scaled: bool,
    rng: fastrand::Rng,
}

impl Scene {
    /// Validates `config` and seeds a scene for a `width` x `height` canvas.
    /// The same seed always produces the same scene.
    pub fn new(config: SimConfig, width: f64, height: f64, seed: u64) -> Result<Self> {
        config.validate()?;
        seeder::check_canvas(width, height)?;

        let mut rng = fastrand::Rng::with_seed(seed);
        let bodies = SceneSeeder::new(&config).seed(width, height, &mut rng)?;
        let sim = Simulation::with_bodies(bodies, config.gravity, config.gravity_bias)?;
        let bounds = Bounds::new(width, height);
        let ephemera = EphemeraField::new(&config, bounds, fastrand::Rng::with_seed(rng.u64(..)));

        log::info!(
            "scene seeded: {} bodies, {} stars, {} comets on {}x{}",
            sim.len(),
            ephemera.stars.len(),
            ephemera.comets.len(),
            width,
            height
        );

        Ok(Self {
            interaction: InteractionController::from_config(&config),
            config,
            sim,
            ephemera,
            info: InfoTable::solar(),
            bounds,
            sun_scaled: false,
            rng,
        })
    }

    /// Advances stars, comets and bodies by one frame.
    pub fn tick(&mut self) {
        self.ephemera.tick();
        self.sim.tick();
    }

    /// Rebuilds bodies and stars for a new canvas size.
    ///
    /// The replacement sets are built in full before anything is swapped, so on
    /// error the scene is unchanged. Selection, drag and sun scaling are reset.
    pub fn resize(&mut self, width: f64, height: f64) -> Result<()> {
        seeder::check_canvas(width, height)?;
        let bodies = SceneSeeder::new(&self.config).seed(width, height, &mut self.rng)?;
        self.sim.replace_bodies(bodies)?;

        self.bounds = Bounds::new(width, height);
        self.ephemera.resize(self.bounds);
        self.interaction.reset();
        self.sun_scaled = false;

        log::info!("scene reseeded for {}x{}", width, height);
        Ok(())
    }

    /// Selects the body under the pointer. Returns its name.
    pub fn click(&mut self, x: f64, y: f64) -> Option<String> {
        self.interaction.on_click(&mut self.sim, Vector2::new(x, y))
    }

    pub fn close_selection(&mut self) {
        self.interaction.close_selection(&mut self.sim);
    }

    pub fn hover(&mut self, x: f64, y: f64) -> bool {
        self.interaction.on_hover(&mut self.sim, Vector2::new(x, y))
    }

    pub fn hit_test(&self, x: f64, y: f64) -> Option<usize> {
        self.interaction.hit_test(&self.sim, Vector2::new(x, y))
    }

    pub fn drag_start(&mut self, x: f64, y: f64) -> Option<usize> {
        self.interaction.on_drag_start(&mut self.sim, Vector2::new(x, y))
    }

    pub fn drag_move(&mut self, x: f64, y: f64) {
        self.interaction.on_drag_move(&mut self.sim, Vector2::new(x, y));
    }

    pub fn drag_end(&mut self) {
        self.interaction.on_drag_end(&mut self.sim);
    }

    /// Switches the central body between its display radius and its true
    /// radius at planet scale. Returns whether it is now shown to scale.
    pub fn toggle_sun_scale(&mut self) -> bool {
        let central = &self.config.central;
        let Some(index) = self.sim.find(&central.name) else {
            log::warn!("central body {} not found", central.name);
            return self.sun_scaled;
        };

        self.sun_scaled = !self.sun_scaled;
        let divisor = if self.sun_scaled {
            self.config.sun_scaled_radius_divisor
        } else {
            self.config.sun_radius_divisor
        };
        self.interaction
            .set_base_radius(&mut self.sim, index, central.radius / divisor);
        self.sun_scaled
    }

    /// Descriptive text for a body name, if the info table knows it.
    pub fn describe(&self, name: &str) -> Option<&str> {
        self.info.lookup(name)
    }

    pub fn set_info_table(&mut self, info: InfoTable) {
        self.info = info;
    }

    pub fn snapshot(&self) -> Vec<BodySnapshot> {
        self.sim
            .bodies()
            .iter()
            .map(|body| BodySnapshot {
                name: body.name.clone(),
                position: [body.pos.x, body.pos.y],
                display_radius: body.display_radius,
                color: body.color.clone(),
                trail_len: body.trail.len(),
            })
            .collect()
    }

    pub fn snapshot_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.snapshot())?)
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    pub fn ephemera(&self) -> &EphemeraField {
        &self.ephemera
    }

    pub fn interaction(&self) -> &InteractionController {
        &self.interaction
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn is_sun_scaled(&self) -> bool {
        self.sun_scaled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OrreryError;

    fn scene() -> Scene {
        Scene::new(SimConfig::compact(), 1000.0, 800.0, 42).unwrap()
    }

    #[test]
    fn seeding_is_reproducible() {
        let a = scene();
        let b = scene();
        assert_eq!(a.snapshot(), b.snapshot());
        assert_eq!(a.ephemera().stars, b.ephemera().stars);
    }

    #[test]
    fn invalid_setups_are_rejected() {
        let mut config = SimConfig::compact();
        config.planets[4].name = "Earth".to_string();
        assert!(matches!(
            Scene::new(config, 1000.0, 800.0, 1),
            Err(OrreryError::DuplicateName(_))
        ));
        assert!(matches!(
            Scene::new(SimConfig::compact(), -1.0, 800.0, 1),
            Err(OrreryError::InvalidConfig(_))
        ));
    }

    #[test]
    fn click_then_describe() {
        let mut scene = scene();
        let name = scene.click(500.0, 400.0).expect("the sun sits at the centre");
        assert_eq!(name, "Sun");
        assert!(scene.describe(&name).is_some());
        assert_eq!(scene.describe("Nemesis"), None);
    }

    #[test]
    fn sun_scale_toggles_back_and_forth() {
        let mut scene = scene();
        let resting = scene.simulation().body(0).unwrap().base_radius;

        assert!(scene.toggle_sun_scale());
        let scaled = scene.simulation().body(0).unwrap();
        assert!((scaled.base_radius - 695_508.0 / 1500.0).abs() < 1e-9);
        assert_eq!(scaled.display_radius, scaled.base_radius);

        assert!(!scene.toggle_sun_scale());
        assert_eq!(scene.simulation().body(0).unwrap().base_radius, resting);
    }

    #[test]
    fn resize_reseeds_and_clears_interaction() {
        let mut scene = scene();
        scene.click(500.0, 400.0);
        scene.drag_start(500.0, 400.0);
        for _ in 0..10 {
            scene.tick();
        }

        scene.resize(400.0, 300.0).unwrap();
        assert_eq!(scene.bounds(), Bounds::new(400.0, 300.0));
        assert_eq!(scene.simulation().frame, 0);
        assert_eq!(scene.interaction().active(), None);
        assert_eq!(scene.interaction().dragging(), None);
        let sun = scene.simulation().body(0).unwrap();
        assert_eq!(sun.pos, Vector2::new(200.0, 150.0));
        assert!(!sun.is_selected && !sun.is_dragged);
    }

    #[test]
    fn failed_resize_leaves_scene_untouched() {
        let mut scene = scene();
        let before = scene.snapshot();
        assert!(scene.resize(0.0, 0.0).is_err());
        assert_eq!(scene.snapshot(), before);
        assert_eq!(scene.bounds(), Bounds::new(1000.0, 800.0));
    }

    #[test]
    fn snapshot_json_lists_every_body() {
        let scene = scene();
        let json = scene.snapshot_json().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.as_array().map(Vec::len), Some(10));
        assert_eq!(parsed[0]["name"], "Sun");
    }
}
