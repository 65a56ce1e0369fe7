#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Seafarer adapters.

use anyhow::Result as AnyResult;
use glam::Vec2;
use seafarer_core::{
    ControllerButton, OverlayLayer, Placement, PlacementSink, PositionVector, TextureError,
    TextureKey, TextureLookup,
};
use std::{collections::HashMap, error::Error, fmt, time::Duration};

/// Edge length of a sprite tile in pixels.
pub const TILE_PIXELS: f32 = 16.0;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: f32::from(red) / 255.0,
            green: f32::from(green) / 255.0,
            blue: f32::from(blue) / 255.0,
            alpha: 1.0,
        }
    }

    /// Converts the color into RGBA bytes.
    #[must_use]
    pub fn to_rgba_u8(self) -> [u8; 4] {
        [self.red, self.green, self.blue, self.alpha].map(|channel| {
            // Clamped into byte range before the cast.
            (channel.clamp(0.0, 1.0) * 255.0).round() as u8
        })
    }
}

/// Buttons the player holds during a frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeldButtons {
    up: bool,
    down: bool,
    left: bool,
    right: bool,
    pause: bool,
}

impl HeldButtons {
    /// Marks `button` as held or released.
    pub fn set(&mut self, button: ControllerButton, held: bool) {
        *self.slot(button) = held;
    }

    /// Returns a copy with `button` held.
    #[must_use]
    pub fn with(mut self, button: ControllerButton) -> Self {
        self.set(button, true);
        self
    }

    /// Whether `button` is held.
    #[must_use]
    pub const fn is_down(&self, button: ControllerButton) -> bool {
        match button {
            ControllerButton::Up => self.up,
            ControllerButton::Down => self.down,
            ControllerButton::Left => self.left,
            ControllerButton::Right => self.right,
            ControllerButton::Pause => self.pause,
        }
    }

    fn slot(&mut self, button: ControllerButton) -> &mut bool {
        match button {
            ControllerButton::Up => &mut self.up,
            ControllerButton::Down => &mut self.down,
            ControllerButton::Left => &mut self.left,
            ControllerButton::Right => &mut self.right,
            ControllerButton::Pause => &mut self.pause,
        }
    }
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    /// Buttons held while the frame was polled.
    pub held: HeldButtons,
    /// Whether the player asked to close the game.
    pub quit: bool,
}

/// Texture handles registered by a rendering backend.
#[derive(Clone, Debug)]
pub struct TextureRegistry<H> {
    textures: HashMap<TextureKey, H>,
}

impl<H> Default for TextureRegistry<H> {
    fn default() -> Self {
        Self {
            textures: HashMap::new(),
        }
    }
}

impl<H: Clone> TextureRegistry<H> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry holding a handle for every [`TextureKey`].
    pub fn complete<I>(entries: I) -> Result<Self, RenderingError>
    where
        I: IntoIterator<Item = (TextureKey, H)>,
    {
        let registry = Self {
            textures: entries.into_iter().collect(),
        };
        let missing = registry.missing_keys();
        if missing.is_empty() {
            Ok(registry)
        } else {
            Err(RenderingError::MissingTextures { keys: missing })
        }
    }

    /// Registers `handle` for `key`, returning the handle it replaced.
    pub fn insert(&mut self, key: TextureKey, handle: H) -> Option<H> {
        self.textures.insert(key, handle)
    }

    /// Number of registered textures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    /// Whether no texture has been registered yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// Keys without a registered handle, in [`TextureKey::ALL`] order.
    #[must_use]
    pub fn missing_keys(&self) -> Vec<TextureKey> {
        TextureKey::ALL
            .into_iter()
            .filter(|key| !self.textures.contains_key(key))
            .collect()
    }
}

impl<H: Clone> TextureLookup for TextureRegistry<H> {
    type Handle = H;

    fn texture(&self, key: TextureKey) -> Result<H, TextureError> {
        if self.textures.is_empty() {
            return Err(TextureError::NotInitialized);
        }
        self.textures
            .get(&key)
            .cloned()
            .ok_or(TextureError::Missing(key))
    }
}

/// Ship sprite drawn above the overlays.
#[derive(Clone, Debug, PartialEq)]
pub struct ShipPresentation<H> {
    /// Interpolated position in tile units.
    pub position: Vec2,
    /// Sprite matching the ship's heading.
    pub texture: H,
}

/// Health readout shown in the HUD.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HealthBarPresentation {
    /// Remaining health.
    pub health: u32,
    /// Health of an undamaged ship.
    pub max_health: u32,
}

impl HealthBarPresentation {
    /// Pixel position of the "Health:" label.
    pub const LABEL_ORIGIN: Vec2 = Vec2::new(8.0, 5.0);
    /// Pixel position of the bar outline.
    pub const OUTLINE_ORIGIN: Vec2 = Vec2::new(8.0, 16.0);
    /// Pixel size of the bar outline.
    pub const OUTLINE_SIZE: Vec2 = Vec2::new(102.0, 10.0);
    /// Pixel position of the bar background and fill.
    pub const BAR_ORIGIN: Vec2 = Vec2::new(9.0, 17.0);
    /// Pixel size of a completely filled bar.
    pub const BAR_SIZE: Vec2 = Vec2::new(100.0, 8.0);

    /// Creates a readout.
    #[must_use]
    pub const fn new(health: u32, max_health: u32) -> Self {
        Self { health, max_health }
    }

    /// Width of the filled part of the bar in pixels.
    #[must_use]
    pub fn bar_width(&self) -> f32 {
        if self.max_health == 0 {
            return 0.0;
        }
        let clamped = self.health.min(self.max_health);
        Self::BAR_SIZE.x * clamped as f32 / self.max_health as f32
    }
}

/// Everything the backend draws in a frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene<H> {
    /// Grid coordinate of the section being shown.
    pub section: PositionVector,
    /// Number of tile columns in the section.
    pub columns: u32,
    /// Number of tile rows in the section.
    pub rows: u32,
    terrain: Vec<Placement<H>>,
    hazards: Vec<Placement<H>>,
    items: Vec<Placement<H>>,
    /// Ship sprite, once textures are available.
    pub ship: Option<ShipPresentation<H>>,
    /// Health readout.
    pub health_bar: HealthBarPresentation,
    /// Whether the simulation is paused.
    pub paused: bool,
    /// Whether the ship has sunk.
    pub wrecked: bool,
}

impl<H> Scene<H> {
    /// Creates an empty scene for a section of the provided size.
    #[must_use]
    pub fn new(columns: u32, rows: u32, health_bar: HealthBarPresentation) -> Self {
        Self {
            section: PositionVector::ORIGIN,
            columns,
            rows,
            terrain: Vec::new(),
            hazards: Vec::new(),
            items: Vec::new(),
            ship: None,
            health_bar,
            paused: false,
            wrecked: false,
        }
    }

    /// Placements currently held by `layer`.
    #[must_use]
    pub fn layer(&self, layer: OverlayLayer) -> &[Placement<H>] {
        match layer {
            OverlayLayer::Terrain => &self.terrain,
            OverlayLayer::Hazards => &self.hazards,
            OverlayLayer::Items => &self.items,
        }
    }

    /// Width of the section in pixels before scaling.
    #[must_use]
    pub fn pixel_width(&self) -> f32 {
        self.columns as f32 * TILE_PIXELS
    }

    /// Height of the section in pixels before scaling.
    #[must_use]
    pub fn pixel_height(&self) -> f32 {
        self.rows as f32 * TILE_PIXELS
    }
}

impl<H> PlacementSink<H> for Scene<H> {
    fn replace_layer(&mut self, layer: OverlayLayer, placements: Vec<Placement<H>>) {
        let slot = match layer {
            OverlayLayer::Terrain => &mut self.terrain,
            OverlayLayer::Hazards => &mut self.hazards,
            OverlayLayer::Items => &mut self.items,
        };
        *slot = placements;
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation<H> {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Integer zoom applied to every pixel.
    pub scale: f32,
    /// Scene content that should be displayed.
    pub scene: Scene<H>,
}

impl<H> Presentation<H> {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scale: f32, scene: Scene<H>) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scale,
            scene,
        }
    }

    /// Window size in physical pixels.
    #[must_use]
    pub fn window_size(&self) -> Vec2 {
        Vec2::new(self.scene.pixel_width(), self.scene.pixel_height()) * self.scale
    }
}

/// Rendering backend capable of presenting Seafarer scenes.
pub trait RenderingBackend {
    /// Texture handle type produced by the backend.
    type Handle: Clone;

    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the frame delta, the input
    /// polled by the adapter and the backend's textures, and may mutate the
    /// scene before it is rendered.
    fn run<F>(self, presentation: Presentation<Self::Handle>, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(
                Duration,
                FrameInput,
                &TextureRegistry<Self::Handle>,
                &mut Scene<Self::Handle>,
            ) -> AnyResult<()>
            + 'static;
}

/// Errors that can occur when assembling rendering resources.
#[derive(Debug, PartialEq, Eq)]
pub enum RenderingError {
    /// A texture registry was built without handles for some keys.
    MissingTextures {
        /// Keys left without a handle.
        keys: Vec<TextureKey>,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingTextures { keys } => {
                let names: Vec<_> = keys.iter().map(|key| key.name()).collect();
                write!(f, "no texture registered for {}", names.join(", "))
            }
        }
    }
}

impl Error for RenderingError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_registry() -> TextureRegistry<TextureKey> {
        TextureRegistry::complete(TextureKey::ALL.into_iter().map(|key| (key, key)))
            .expect("every key registered")
    }

    #[test]
    fn empty_registry_reports_not_initialised() {
        let registry = TextureRegistry::<u8>::new();
        assert_eq!(
            registry.texture(TextureKey::ShipUp),
            Err(TextureError::NotInitialized)
        );
    }

    #[test]
    fn partial_registry_reports_missing_keys() {
        let mut registry = TextureRegistry::new();
        assert_eq!(registry.insert(TextureKey::ShipUp, 1_u8), None);

        assert_eq!(registry.texture(TextureKey::ShipUp), Ok(1));
        assert_eq!(
            registry.texture(TextureKey::ShipDown),
            Err(TextureError::Missing(TextureKey::ShipDown))
        );
        assert_eq!(registry.missing_keys().len(), TextureKey::ALL.len() - 1);
    }

    #[test]
    fn complete_registry_requires_every_key() {
        assert_eq!(full_registry().len(), TextureKey::ALL.len());

        let error = TextureRegistry::complete([(TextureKey::ShipUp, 0_u8)])
            .expect_err("registry is incomplete");
        let RenderingError::MissingTextures { keys } = &error;
        assert!(!keys.contains(&TextureKey::ShipUp));
        assert!(error.to_string().contains("ItemSpeedBoost"));
    }

    #[test]
    fn health_bar_width_is_clamped() {
        assert_eq!(HealthBarPresentation::new(80, 100).bar_width(), 80.0);
        assert_eq!(HealthBarPresentation::new(0, 100).bar_width(), 0.0);
        assert_eq!(HealthBarPresentation::new(140, 100).bar_width(), 100.0);
        assert_eq!(HealthBarPresentation::new(25, 50).bar_width(), 50.0);
        assert_eq!(HealthBarPresentation::new(10, 0).bar_width(), 0.0);
    }

    #[test]
    fn scene_layers_are_replaced_wholesale() {
        let mut scene = Scene::new(20, 15, HealthBarPresentation::new(100, 100));
        scene.replace_layer(
            OverlayLayer::Items,
            vec![
                Placement::new(PositionVector::new(1, 1), 'a'),
                Placement::new(PositionVector::new(2, 1), 'b'),
            ],
        );
        scene.replace_layer(
            OverlayLayer::Items,
            vec![Placement::new(PositionVector::new(3, 3), 'c')],
        );

        assert_eq!(
            scene.layer(OverlayLayer::Items),
            &[Placement::new(PositionVector::new(3, 3), 'c')]
        );
        assert!(scene.layer(OverlayLayer::Terrain).is_empty());
    }

    #[test]
    fn window_size_scales_the_section() {
        let scene = Scene::<u8>::new(20, 15, HealthBarPresentation::new(100, 100));
        let presentation = Presentation::new("Seafarer", Color::from_rgb_u8(0, 0, 0), 4.0, scene);
        assert_eq!(presentation.window_size(), Vec2::new(1280.0, 960.0));
    }

    #[test]
    fn held_buttons_track_each_button() {
        let held = HeldButtons::default()
            .with(ControllerButton::Up)
            .with(ControllerButton::Pause);

        assert!(held.is_down(ControllerButton::Up));
        assert!(held.is_down(ControllerButton::Pause));
        assert!(!held.is_down(ControllerButton::Left));
    }

    #[test]
    fn colors_convert_to_bytes() {
        assert_eq!(Color::from_rgb_u8(255, 0, 128).to_rgba_u8(), [255, 0, 128, 255]);
        assert_eq!(Color::new(2.0, -1.0, 0.5, 1.0).to_rgba_u8(), [255, 0, 128, 255]);
    }
}
