#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Seafarer.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature.

mod sprites;

use anyhow::{Context, Result};
use glam::Vec2;
use macroquad::{
    color::{BLACK, RED, WHITE},
    input::{is_key_down, is_key_pressed, KeyCode},
    math::Vec2 as MacroquadVec2,
    shapes::draw_rectangle,
    text::{draw_text, measure_text},
    texture::{draw_texture_ex, DrawTextureParams, Texture2D},
};
use seafarer_core::{ControllerButton, OverlayLayer, Placement};
use seafarer_rendering::{
    Color, FrameInput, HealthBarPresentation, HeldButtons, Presentation, RenderingBackend, Scene,
    TextureRegistry, TILE_PIXELS,
};
use std::{path::PathBuf, sync::mpsc, time::Duration};

use self::sprites::SpriteAtlas;

const HUD_FONT_SIZE: f32 = 8.0;
const BANNER_FONT_SIZE: f32 = 16.0;

/// Rendering backend implemented on top of macroquad.
#[derive(Debug)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
    load_sprites: bool,
    manifest_path: PathBuf,
}

impl Default for MacroquadBackend {
    fn default() -> Self {
        Self {
            swap_interval: None,
            show_fps: false,
            load_sprites: true,
            manifest_path: Self::default_manifest_path(),
        }
    }
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the default manifest path relative to the repository root.
    #[must_use]
    pub fn default_manifest_path() -> PathBuf {
        PathBuf::from("assets/manifest.toml")
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend prints frame timing once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }

    /// Configures whether sprites are loaded from the manifest or replaced by flat swatches.
    #[must_use]
    pub fn with_sprite_loading(mut self, enabled: bool) -> Self {
        self.load_sprites = enabled;
        self
    }

    /// Overrides the sprite manifest location.
    #[must_use]
    pub fn with_manifest_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.manifest_path = path.into();
        self
    }
}

#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
}

impl FpsCounter {
    /// Records a rendered frame and returns the average once a second has elapsed.
    fn record_frame(&mut self, frame: Duration) -> Option<f32> {
        self.elapsed += frame;
        self.frames = self.frames.saturating_add(1);

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let per_second = self.frames as f32 / self.elapsed.as_secs_f32();
        self.elapsed = Duration::ZERO;
        self.frames = 0;
        Some(per_second)
    }
}

impl RenderingBackend for MacroquadBackend {
    type Handle = Texture2D;

    fn run<F>(self, presentation: Presentation<Texture2D>, mut update_scene: F) -> Result<()>
    where
        F: FnMut(
                Duration,
                FrameInput,
                &TextureRegistry<Texture2D>,
                &mut Scene<Texture2D>,
            ) -> Result<()>
            + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
            load_sprites,
            manifest_path,
        } = self;

        let window_size = presentation.window_size();
        let Presentation {
            window_title,
            clear_color,
            scale,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: window_size.x.round() as i32,
            window_height: window_size.y.round() as i32,
            window_resizable: false,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        let (outcome_sender, outcome_receiver) = mpsc::channel::<Result<()>>();

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let atlas = if load_sprites {
                SpriteAtlas::from_manifest_path(&manifest_path).with_context(|| {
                    format!("failed to initialise sprite atlas from {}", manifest_path.display())
                })
            } else {
                Ok(SpriteAtlas::placeholders())
            };
            let registry = match atlas.and_then(|atlas| {
                tracing::info!(textures = atlas.texture_count(), "sprite atlas loaded");
                atlas.into_registry()
            }) {
                Ok(registry) => registry,
                Err(error) => {
                    let _ = outcome_sender.send(Err(error));
                    return;
                }
            };

            let background = to_macroquad_color(clear_color);
            let mut fps_counter = FpsCounter::default();

            loop {
                let frame_input = poll_frame_input();
                if frame_input.quit {
                    break;
                }

                let frame_dt =
                    Duration::from_secs_f32(macroquad::time::get_frame_time().max(0.0));
                if let Err(error) = update_scene(frame_dt, frame_input, &registry, &mut scene) {
                    let _ = outcome_sender.send(Err(error));
                    return;
                }

                macroquad::window::clear_background(background);
                draw_scene(&scene, scale);

                if let Some(per_second) = fps_counter.record_frame(frame_dt) {
                    if show_fps {
                        println!("FPS: {per_second:.2}");
                    }
                }

                macroquad::window::next_frame().await;
            }

            let _ = outcome_sender.send(Ok(()));
        });

        outcome_receiver.recv().unwrap_or_else(|_| Ok(()))
    }
}

fn poll_frame_input() -> FrameInput {
    let mut held = HeldButtons::default();
    for button in ControllerButton::ALL {
        held.set(button, button_keys(button).iter().any(|key| is_key_down(*key)));
    }

    FrameInput {
        held,
        quit: is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q),
    }
}

fn button_keys(button: ControllerButton) -> &'static [KeyCode] {
    match button {
        ControllerButton::Up => &[KeyCode::W, KeyCode::Up],
        ControllerButton::Down => &[KeyCode::S, KeyCode::Down],
        ControllerButton::Left => &[KeyCode::A, KeyCode::Left],
        ControllerButton::Right => &[KeyCode::D, KeyCode::Right],
        ControllerButton::Pause => &[KeyCode::Space],
    }
}

fn draw_scene(scene: &Scene<Texture2D>, scale: f32) {
    for layer in [OverlayLayer::Terrain, OverlayLayer::Hazards, OverlayLayer::Items] {
        for placement in scene.layer(layer) {
            draw_placement(placement, scale);
        }
    }

    if let Some(ship) = &scene.ship {
        draw_tile(ship.texture, tile_origin(ship.position, scale), scale);
    }

    draw_health_bar(&scene.health_bar, scale);

    if scene.wrecked {
        draw_banner("SHIPWRECKED", scene, scale);
    } else if scene.paused {
        draw_banner("PAUSED", scene, scale);
    }
}

fn draw_placement(placement: &Placement<Texture2D>, scale: f32) {
    let position = Vec2::new(
        placement.position.x() as f32,
        placement.position.y() as f32,
    );
    draw_tile(placement.texture, tile_origin(position, scale), scale);
}

fn tile_origin(position: Vec2, scale: f32) -> Vec2 {
    position * TILE_PIXELS * scale
}

fn draw_tile(texture: Texture2D, origin: Vec2, scale: f32) {
    let side = TILE_PIXELS * scale;
    draw_texture_ex(
        texture,
        origin.x,
        origin.y,
        WHITE,
        DrawTextureParams {
            dest_size: Some(MacroquadVec2::new(side, side)),
            ..DrawTextureParams::default()
        },
    );
}

fn draw_health_bar(bar: &HealthBarPresentation, scale: f32) {
    let label = HealthBarPresentation::LABEL_ORIGIN * scale;
    // Text is positioned by its baseline.
    let font_size = HUD_FONT_SIZE * scale;
    let _ = draw_text("Health:", label.x, label.y + font_size, font_size, WHITE);

    let outline = HealthBarPresentation::OUTLINE_ORIGIN * scale;
    let outline_size = HealthBarPresentation::OUTLINE_SIZE * scale;
    draw_rectangle(outline.x, outline.y, outline_size.x, outline_size.y, WHITE);

    let origin = HealthBarPresentation::BAR_ORIGIN * scale;
    let size = HealthBarPresentation::BAR_SIZE * scale;
    draw_rectangle(origin.x, origin.y, size.x, size.y, BLACK);
    draw_rectangle(origin.x, origin.y, bar.bar_width() * scale, size.y, RED);
}

fn draw_banner(text: &str, scene: &Scene<Texture2D>, scale: f32) {
    let font_size = BANNER_FONT_SIZE * scale;
    let dimensions = measure_text(text, None, font_size as u16, 1.0);
    let centre = Vec2::new(scene.pixel_width(), scene.pixel_height()) * scale * 0.5;
    let _ = draw_text(
        text,
        centre.x - dimensions.width * 0.5,
        centre.y + dimensions.height * 0.5,
        font_size,
        WHITE,
    );
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_button_has_keys() {
        for button in ControllerButton::ALL {
            assert!(!button_keys(button).is_empty(), "{button:?} has no keys");
        }
        assert!(button_keys(ControllerButton::Up).contains(&KeyCode::W));
        assert!(button_keys(ControllerButton::Right).contains(&KeyCode::Right));
    }

    #[test]
    fn tiles_are_placed_on_a_scaled_grid() {
        assert_eq!(tile_origin(Vec2::new(3.0, 2.0), 4.0), Vec2::new(192.0, 128.0));
        assert_eq!(tile_origin(Vec2::new(0.5, 0.0), 1.0), Vec2::new(8.0, 0.0));
    }

    #[test]
    fn fps_counter_reports_once_per_second() {
        let mut counter = FpsCounter::default();
        for _ in 0..59 {
            assert!(counter.record_frame(Duration::from_millis(16)).is_none());
        }
        let per_second = counter
            .record_frame(Duration::from_millis(100))
            .expect("a second has elapsed");
        assert!(per_second > 50.0 && per_second < 70.0);
    }

    #[test]
    fn colours_convert_channel_for_channel() {
        let converted = to_macroquad_color(Color::new(0.25, 0.5, 0.75, 1.0));
        assert_eq!(
            (converted.r, converted.g, converted.b, converted.a),
            (0.25, 0.5, 0.75, 1.0)
        );
    }

    #[test]
    fn backend_builder_overrides_defaults() {
        let backend = MacroquadBackend::new()
            .with_vsync(false)
            .with_show_fps(true)
            .with_sprite_loading(false)
            .with_manifest_path("custom/manifest.toml");

        assert_eq!(backend.swap_interval, Some(0));
        assert!(backend.show_fps);
        assert!(!backend.load_sprites);
        assert_eq!(backend.manifest_path, PathBuf::from("custom/manifest.toml"));
    }
}
