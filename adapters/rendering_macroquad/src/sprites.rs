use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use macroquad::texture::{FilterMode, Texture2D};
use seafarer_core::TextureKey;
use seafarer_rendering::{Color, TextureRegistry};

const SUPPORTED_MANIFEST_VERSION: u32 = 1;

/// Cache of textures loaded from the sprite manifest.
#[derive(Debug)]
pub(crate) struct SpriteAtlas {
    textures: HashMap<TextureKey, Texture2D>,
}

impl SpriteAtlas {
    /// Loads sprites from the manifest located at the provided path.
    pub(crate) fn from_manifest_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_manifest_with_loader(path, default_loader)
    }

    /// Builds an atlas of flat one-pixel swatches, one colour per texture.
    pub(crate) fn placeholders() -> Self {
        let textures = TextureKey::ALL
            .into_iter()
            .map(|key| {
                let texture =
                    Texture2D::from_rgba8(1, 1, &placeholder_color(key).to_rgba_u8());
                texture.set_filter(FilterMode::Nearest);
                (key, texture)
            })
            .collect();
        Self { textures }
    }

    /// Returns the number of textures stored in the atlas.
    pub(crate) fn texture_count(&self) -> usize {
        self.textures.len()
    }

    /// Moves every texture into a registry, failing if any key is absent.
    pub(crate) fn into_registry(self) -> Result<TextureRegistry<Texture2D>> {
        TextureRegistry::complete(self.textures).context("sprite atlas is incomplete")
    }

    fn from_manifest_with_loader(
        path: impl AsRef<Path>,
        mut loader: impl FnMut(TextureKey, &Path) -> Result<Texture2D>,
    ) -> Result<Self> {
        let manifest_path = path.as_ref();
        let contents = fs::read_to_string(manifest_path).with_context(|| {
            format!(
                "failed to read sprite manifest at {}",
                manifest_path.display()
            )
        })?;
        let base = manifest_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let entries = parse_manifest(&contents, &base)?;
        Self::from_entries(entries, &mut loader)
    }

    fn from_entries(
        entries: Vec<(TextureKey, PathBuf)>,
        loader: &mut impl FnMut(TextureKey, &Path) -> Result<Texture2D>,
    ) -> Result<Self> {
        let mut textures = HashMap::with_capacity(entries.len());
        for (key, path) in entries {
            let texture = loader(key, &path)
                .with_context(|| format!("failed to load sprite {key} from {}", path.display()))?;
            if textures.insert(key, texture).is_some() {
                bail!("duplicate sprite entry for {key}");
            }
        }
        Ok(Self { textures })
    }
}

fn default_loader(_key: TextureKey, path: &Path) -> Result<Texture2D> {
    let bytes = fs::read(path)
        .with_context(|| format!("failed to read sprite asset at {}", path.display()))?;
    let texture = Texture2D::from_file_with_format(&bytes, None);
    texture.set_filter(FilterMode::Nearest);
    Ok(texture)
}

#[derive(Debug, serde::Deserialize)]
struct Manifest {
    version: u32,
    sprites: HashMap<String, String>,
}

fn parse_manifest(contents: &str, base_path: &Path) -> Result<Vec<(TextureKey, PathBuf)>> {
    let manifest: Manifest =
        toml::from_str(contents).context("failed to parse sprite manifest toml contents")?;
    if manifest.version != SUPPORTED_MANIFEST_VERSION {
        bail!(
            "unsupported sprite manifest version {}; expected {}",
            manifest.version,
            SUPPORTED_MANIFEST_VERSION
        );
    }

    let mut resolved = HashMap::new();
    for (name, relative_path) in manifest.sprites {
        let key: TextureKey = name
            .parse()
            .with_context(|| format!("unknown sprite key `{name}` in manifest"))?;
        let path = base_path.join(relative_path);
        if resolved.insert(key, path).is_some() {
            bail!("sprite manifest contains duplicate entry for {key}");
        }
    }

    let mut ordered = Vec::with_capacity(TextureKey::ALL.len());
    for key in TextureKey::ALL {
        let Some(path) = resolved.remove(&key) else {
            bail!("sprite manifest missing entry for {key}");
        };
        ordered.push((key, path));
    }

    Ok(ordered)
}

/// Flat colour standing in for a texture when sprites are disabled.
pub(crate) fn placeholder_color(key: TextureKey) -> Color {
    match key {
        TextureKey::TerrainWater => Color::from_rgb_u8(0x3b, 0x6e, 0xc9),
        TextureKey::TerrainWaterWithWaves => Color::from_rgb_u8(0x6a, 0x94, 0xe0),
        TextureKey::TerrainLandCenterCenter => Color::from_rgb_u8(0x5f, 0x9e, 0x3a),
        TextureKey::TerrainLandTopLeft
        | TextureKey::TerrainLandTopCenter
        | TextureKey::TerrainLandTopRight
        | TextureKey::TerrainLandCenterLeft
        | TextureKey::TerrainLandCenterRight
        | TextureKey::TerrainLandBottomLeft
        | TextureKey::TerrainLandBottomCenter
        | TextureKey::TerrainLandBottomRight => Color::from_rgb_u8(0xd8, 0xc4, 0x7a),
        TextureKey::TerrainLandPeninsulaLeft
        | TextureKey::TerrainLandPeninsulaTop
        | TextureKey::TerrainLandPeninsulaRight
        | TextureKey::TerrainLandPeninsulaBottom => Color::from_rgb_u8(0xc2, 0xa8, 0x5c),
        TextureKey::ShipUp
        | TextureKey::ShipRight
        | TextureKey::ShipDown
        | TextureKey::ShipLeft => Color::from_rgb_u8(0x8b, 0x4a, 0x22),
        TextureKey::HazardWhirlpool => Color::from_rgb_u8(0x1b, 0x1f, 0x5e),
        TextureKey::ItemHealthBarrel => Color::from_rgb_u8(0xc9, 0x2a, 0x2a),
        TextureKey::ItemMapPiece => Color::from_rgb_u8(0xf2, 0xe8, 0xc9),
        TextureKey::ItemSpeedBoost => Color::from_rgb_u8(0xf5, 0xd0, 0x1e),
    }
}
