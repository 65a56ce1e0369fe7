#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that launches Seafarer in a macroquad window.

mod simulation;

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use seafarer_core::PositionVector;
use seafarer_rendering::{Color, Presentation, RenderingBackend};
use seafarer_rendering_macroquad::MacroquadBackend;
use seafarer_system_overlays::ChaChaCosmetics;
use seafarer_world::{levels, query, LevelData, World};
use tracing_subscriber::EnvFilter;

use self::simulation::Session;

const SHIP_START: PositionVector = PositionVector::ORIGIN;
const DEFAULT_LOG_FILTER: &str = "info";

/// Sail a small ship across a tiled sea.
#[derive(Debug, Parser)]
#[command(name = "seafarer", version)]
struct CliArgs {
    /// Level file to load instead of the built-in overworld
    #[arg(long, value_name = "TOML")]
    level: Option<PathBuf>,

    /// Sprite manifest describing every texture
    #[arg(
        long,
        value_name = "TOML",
        default_value_os_t = MacroquadBackend::default_manifest_path()
    )]
    manifest: PathBuf,

    /// Draw flat colour swatches instead of loading sprites
    #[arg(long)]
    no_sprites: bool,

    /// Seed for cosmetic randomness such as wave placement
    #[arg(long)]
    seed: Option<u64>,

    /// Synchronise presentation with the display refresh rate
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    vsync: bool,

    /// Print frames per second to stdout once a second
    #[arg(long)]
    show_fps: bool,

    /// Pixel zoom applied to the sixteen pixel tiles
    #[arg(long, default_value = "4")]
    scale: f32,

    /// Tracing filter directives; overrides RUST_LOG
    #[arg(long, value_name = "DIRECTIVES")]
    log_filter: Option<String>,
}

/// Entry point for the Seafarer command-line interface.
fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_tracing(args.log_filter.as_deref())?;

    let level = load_level(args.level.as_deref())?;
    let world = World::from_level(&level).context("level does not describe a playable world")?;
    tracing::info!("{}", query::welcome_banner(&world));

    let seed = args.seed.unwrap_or_else(rand::random);
    tracing::debug!(seed, "cosmetic rng seeded");

    let mut session = Session::new(world, SHIP_START, ChaChaCosmetics::seeded(seed));
    let presentation = Presentation::new(
        "Seafarer",
        Color::from_rgb_u8(0x66, 0x66, 0xff),
        args.scale,
        session.initial_scene(),
    );

    MacroquadBackend::new()
        .with_vsync(args.vsync)
        .with_show_fps(args.show_fps)
        .with_sprite_loading(!args.no_sprites)
        .with_manifest_path(args.manifest)
        .run(presentation, move |_dt, input, registry, scene| {
            session
                .tick(&input, registry, scene)
                .context("failed to advance the simulation")
        })
}

fn init_tracing(directives: Option<&str>) -> Result<()> {
    let filter = match directives {
        Some(directives) => EnvFilter::try_new(directives)
            .with_context(|| format!("invalid log filter `{directives}`"))?,
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn load_level(path: Option<&Path>) -> Result<LevelData> {
    let Some(path) = path else {
        return Ok(levels::starting_level());
    };

    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read level file {}", path.display()))?;
    LevelData::from_toml_str(&contents)
        .with_context(|| format!("failed to parse level file {}", path.display()))
}
