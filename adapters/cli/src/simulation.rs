//! Per-tick orchestration of the world, the ship and the overlays.

use seafarer_core::{ControllerButton, Event, PositionVector, TextureError, TextureLookup};
use seafarer_rendering::{FrameInput, HealthBarPresentation, Scene, ShipPresentation};
use seafarer_system_controller::Controller;
use seafarer_system_helm::{MoveOutcome, Ship, MAX_HEALTH};
use seafarer_system_overlays::{CosmeticRng, HazardOverlay, ItemOverlay, TerrainOverlay};
use seafarer_world::{self as world, query, World};

/// Game state advanced once per rendered frame.
pub(crate) struct Session<H, R> {
    world: World,
    controller: Controller,
    ship: Ship,
    terrain: TerrainOverlay<H>,
    hazards: HazardOverlay<H>,
    items: ItemOverlay<H>,
    cosmetics: R,
    overlays_built: bool,
    paused: bool,
}

impl<H: Clone, R: CosmeticRng> Session<H, R> {
    pub(crate) fn new(world: World, ship_start: PositionVector, cosmetics: R) -> Self {
        Self {
            world,
            controller: Controller::new(),
            ship: Ship::new(ship_start),
            terrain: TerrainOverlay::default(),
            hazards: HazardOverlay::default(),
            items: ItemOverlay::default(),
            cosmetics,
            overlays_built: false,
            paused: false,
        }
    }

    /// Empty scene sized for the active section.
    pub(crate) fn initial_scene(&self) -> Scene<H> {
        let section = query::current_section(&self.world);
        let health = self.ship.health();
        let mut scene = Scene::new(
            section.columns(),
            section.rows(),
            HealthBarPresentation::new(health.current(), health.max()),
        );
        scene.section = query::current_section_coord(&self.world);
        scene
    }

    /// Advances the game by one tick and refreshes `scene`.
    ///
    /// Overlays are built on the first tick, once textures can be resolved,
    /// and again whenever the ship enters another section. Pausing freezes
    /// the ship; a wreck only stops it from accepting directions.
    pub(crate) fn tick<L>(
        &mut self,
        input: &FrameInput,
        lookup: &L,
        scene: &mut Scene<H>,
    ) -> Result<(), TextureError>
    where
        L: TextureLookup<Handle = H>,
    {
        self.read_controls(input);

        if !self.overlays_built {
            self.rebuild_overlays(lookup, scene)?;
        }

        if !self.paused {
            self.sail(lookup, scene)?;
        }

        self.present(lookup, scene)
    }

    fn read_controls(&mut self, input: &FrameInput) {
        for button in ControllerButton::ALL {
            self.controller.set_user_pressed(button, input.held.is_down(button));
        }
        self.controller.update();

        if self.controller.is_pause_pressed() {
            self.paused = !self.paused;
            tracing::info!(paused = self.paused, "pause toggled");
        }
    }

    fn sail<L>(&mut self, lookup: &L, scene: &mut Scene<H>) -> Result<(), TextureError>
    where
        L: TextureLookup<Handle = H>,
    {
        // A wrecked ship finishes its current move but takes no new orders.
        let direction = if self.ship.is_wrecked() {
            None
        } else {
            self.controller.direction_down()
        };
        let mut commands = Vec::new();
        let outcome = self.ship.update(direction, &self.world, &mut commands);

        let mut events = Vec::new();
        for command in commands {
            world::apply(&mut self.world, command, &mut events);
        }
        for event in events {
            match event {
                Event::SectionChanged { from, to } => {
                    tracing::info!(%from, %to, "entered section");
                    self.rebuild_overlays(lookup, scene)?;
                }
            }
        }

        if let MoveOutcome::Departed(departure) = outcome {
            let key = departure.destination.serialized();
            let hazard = self.hazards.get_at(&key).is_some();
            let item = self.items.get_at(&key).is_some();
            let health = self.ship.apply_arrival(hazard, item);
            if hazard || item {
                tracing::debug!(hazard, item, health = health.current(), "arrival effects");
            }
        }
        Ok(())
    }

    fn rebuild_overlays<L>(&mut self, lookup: &L, scene: &mut Scene<H>) -> Result<(), TextureError>
    where
        L: TextureLookup<Handle = H>,
    {
        let section = query::current_section(&self.world);
        self.terrain.build(&self.world, lookup, &mut self.cosmetics)?;
        self.hazards.build(section, lookup)?;
        self.items.build(section, lookup)?;

        self.terrain.publish(scene);
        self.hazards.publish(scene);
        self.items.publish(scene);
        scene.section = query::current_section_coord(&self.world);
        scene.columns = section.columns();
        scene.rows = section.rows();

        self.overlays_built = true;
        Ok(())
    }

    fn present<L>(&self, lookup: &L, scene: &mut Scene<H>) -> Result<(), TextureError>
    where
        L: TextureLookup<Handle = H>,
    {
        scene.ship = Some(ShipPresentation {
            position: self.ship.visual_position(),
            texture: lookup.texture(self.ship.texture_key())?,
        });
        scene.health_bar = HealthBarPresentation::new(self.ship.health().current(), MAX_HEALTH);
        scene.paused = self.paused;
        scene.wrecked = self.ship.is_wrecked();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use seafarer_core::{OverlayLayer, TextureKey};
    use seafarer_rendering::{HeldButtons, TextureRegistry};
    use seafarer_system_helm::{ShipState, HAZARD_DAMAGE, TOTAL_ANIMATION_FRAMES};
    use seafarer_world::{LevelData, SectionData};

    struct CalmSea;

    impl CosmeticRng for CalmSea {
        fn roll_waves(&mut self) -> bool {
            false
        }
    }

    fn registry() -> TextureRegistry<TextureKey> {
        TextureRegistry::complete(TextureKey::ALL.into_iter().map(|key| (key, key)))
            .expect("every key registered")
    }

    fn section(rows: &[&str]) -> SectionData {
        SectionData {
            rows: rows.iter().map(|row| (*row).to_owned()).collect(),
        }
    }

    fn session(sections: Vec<Vec<SectionData>>) -> Session<TextureKey, CalmSea> {
        let world = World::from_level(&LevelData { sections }).expect("valid level");
        Session::new(world, PositionVector::ORIGIN, CalmSea)
    }

    fn holding(buttons: &[ControllerButton]) -> FrameInput {
        let held = buttons
            .iter()
            .fold(HeldButtons::default(), |held, button| held.with(*button));
        FrameInput { held, quit: false }
    }

    #[test]
    fn first_tick_publishes_every_layer() {
        let mut session = session(vec![vec![section(&["_-` _W` _-H", "_-` 0-` _-M"])]]);
        let mut scene = session.initial_scene();
        assert!(scene.layer(OverlayLayer::Terrain).is_empty());

        session
            .tick(&holding(&[]), &registry(), &mut scene)
            .expect("tick succeeds");

        assert_eq!(scene.layer(OverlayLayer::Terrain).len(), 6);
        assert_eq!(scene.layer(OverlayLayer::Hazards).len(), 1);
        assert_eq!(scene.layer(OverlayLayer::Items).len(), 2);
        let ship = scene.ship.as_ref().expect("ship presented");
        assert_eq!(ship.texture, TextureKey::ShipRight);
        assert_eq!(ship.position, Vec2::ZERO);
        assert_eq!(scene.health_bar.health, MAX_HEALTH);
    }

    #[test]
    fn departing_onto_a_hazard_costs_health_immediately() {
        let mut session = session(vec![vec![section(&["_-` _W` _-`"])]]);
        let mut scene = session.initial_scene();

        session
            .tick(&holding(&[ControllerButton::Right]), &registry(), &mut scene)
            .expect("tick succeeds");

        assert_eq!(session.ship.position(), PositionVector::new(1, 0));
        assert_eq!(scene.health_bar.health, MAX_HEALTH - HAZARD_DAMAGE);
    }

    #[test]
    fn pausing_freezes_the_ship_until_pressed_again() {
        let mut session = session(vec![vec![section(&["_-` _-` _-`"])]]);
        let mut scene = session.initial_scene();
        let lookup = registry();

        session
            .tick(&holding(&[ControllerButton::Pause]), &lookup, &mut scene)
            .expect("tick succeeds");
        assert!(scene.paused);

        for _ in 0..3 {
            session
                .tick(
                    &holding(&[ControllerButton::Pause, ControllerButton::Right]),
                    &lookup,
                    &mut scene,
                )
                .expect("tick succeeds");
        }
        assert!(scene.paused, "holding pause does not toggle again");
        assert_eq!(session.ship.position(), PositionVector::ORIGIN);

        session
            .tick(&holding(&[]), &lookup, &mut scene)
            .expect("tick succeeds");
        session
            .tick(&holding(&[ControllerButton::Pause]), &lookup, &mut scene)
            .expect("tick succeeds");
        assert!(!scene.paused);
    }

    #[test]
    fn entering_a_section_rebuilds_the_overlays() {
        let mut session = session(vec![vec![
            section(&["_-` _-`"]),
            section(&["_-H _W` _-`"]),
        ]]);
        let mut scene = session.initial_scene();
        let lookup = registry();
        assert!(scene.layer(OverlayLayer::Hazards).is_empty());

        for _ in 0..=TOTAL_ANIMATION_FRAMES {
            session
                .tick(&holding(&[ControllerButton::Right]), &lookup, &mut scene)
                .expect("tick succeeds");
        }

        assert_eq!(scene.section, PositionVector::new(1, 0));
        assert_eq!((scene.columns, scene.rows), (3, 1));
        assert_eq!(scene.layer(OverlayLayer::Terrain).len(), 3);
        assert_eq!(scene.layer(OverlayLayer::Hazards).len(), 1);
        assert_eq!(scene.layer(OverlayLayer::Items).len(), 1);
        assert_eq!(session.ship.position(), PositionVector::ORIGIN);
        assert_eq!(
            scene.health_bar.health,
            MAX_HEALTH,
            "the barrel at the entry tile heals a full ship to the cap"
        );
    }

    #[test]
    fn ticks_fail_until_textures_are_available() {
        let mut session = session(vec![vec![section(&["_-`"])]]);
        let mut scene = session.initial_scene();

        let error = session
            .tick(&holding(&[]), &TextureRegistry::<TextureKey>::new(), &mut scene)
            .expect_err("no textures registered");

        assert_eq!(error, TextureError::NotInitialized);
        assert!(scene.layer(OverlayLayer::Terrain).is_empty());
    }

    #[test]
    fn a_wreck_finishes_its_last_move_and_then_holds_still() {
        let row = vec!["_W`"; 16].join(" ");
        let mut session = session(vec![vec![section(&[row.as_str()])]]);
        let mut scene = session.initial_scene();
        let lookup = registry();

        for _ in 0..200 {
            session
                .tick(&holding(&[ControllerButton::Right]), &lookup, &mut scene)
                .expect("tick succeeds");
        }
        for _ in 0..=TOTAL_ANIMATION_FRAMES {
            session
                .tick(&holding(&[]), &lookup, &mut scene)
                .expect("tick succeeds");
        }

        assert!(scene.wrecked);
        assert_eq!(session.ship.state(), ShipState::Idle);
        let resting = session.ship.position();
        assert_eq!(resting, PositionVector::new(10, 0));
        let ship = scene.ship.as_ref().expect("ship presented");
        assert_eq!(ship.position, Vec2::new(10.0, 0.0));

        for _ in 0..20 {
            session
                .tick(&holding(&[ControllerButton::Right]), &lookup, &mut scene)
                .expect("tick succeeds");
        }
        assert_eq!(session.ship.position(), resting, "a wreck takes no orders");
    }
}
