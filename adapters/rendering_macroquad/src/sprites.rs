use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use hexhunt_core::all_sprite_names;
use macroquad::texture::Texture2D;
use thiserror::Error;

const SUPPORTED_MANIFEST_VERSION: u32 = 1;

/// Errors detected while validating the sprite manifest.
#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum ManifestError {
    /// The manifest's declared format version is not understood.
    #[error("unsupported sprite manifest version {found}; expected {SUPPORTED_MANIFEST_VERSION}")]
    UnsupportedVersion {
        /// Version number found in the manifest.
        found: u32,
    },
}

/// Cache of tile, prop, and character textures loaded from the manifest.
///
/// Missing or unreadable image files are skipped with a warning instead of
/// failing the whole game: the affected sprites are simply not drawn, so a
/// partial asset set still produces a playable (if bare) board.
#[derive(Debug)]
pub(crate) struct SpriteLibrary {
    textures: HashMap<&'static str, Texture2D>,
}

impl SpriteLibrary {
    /// Loads the default sprite manifest from disk.
    pub(crate) fn from_default_manifest() -> Result<Self> {
        Self::from_manifest_path(Self::default_manifest_path())
    }

    /// Loads sprites from the manifest located at the provided path.
    pub(crate) fn from_manifest_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_manifest_with_loader(path, default_loader)
    }

    /// Returns the default manifest path relative to the repository root.
    #[must_use]
    pub(crate) fn default_manifest_path() -> PathBuf {
        PathBuf::from("assets/manifest.toml")
    }

    /// Retrieves the texture associated with the provided sprite name.
    #[must_use]
    pub(crate) fn texture(&self, name: &str) -> Option<Texture2D> {
        self.textures.get(name).copied()
    }

    /// Returns the number of textures stored in the library.
    #[must_use]
    pub(crate) fn len(&self) -> usize {
        self.textures.len()
    }

    fn from_manifest_with_loader(
        path: impl AsRef<Path>,
        loader: impl FnMut(&Path) -> Result<Texture2D>,
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
        let asset_root = parse_manifest(&contents, &base)?;
        Ok(Self::from_asset_root(&asset_root, loader))
    }

    fn from_asset_root(
        asset_root: &Path,
        mut loader: impl FnMut(&Path) -> Result<Texture2D>,
    ) -> Self {
        let names = all_sprite_names();
        let mut textures = HashMap::with_capacity(names.len());
        for name in names {
            let path = asset_root.join(name);
            match loader(&path) {
                Ok(texture) => {
                    let _ = textures.insert(name, texture);
                }
                Err(error) => {
                    eprintln!(
                        "warning: skipping sprite {name}: {error:#} ({})",
                        path.display()
                    );
                }
            }
        }
        Self { textures }
    }
}

fn default_loader(path: &Path) -> Result<Texture2D> {
    let bytes = fs::read(path)
        .with_context(|| format!("failed to read sprite asset at {}", path.display()))?;
    Ok(Texture2D::from_file_with_format(&bytes, None))
}

#[derive(Debug, serde::Deserialize)]
struct Manifest {
    version: u32,
    asset_root: String,
}

fn parse_manifest(contents: &str, base_path: &Path) -> Result<PathBuf> {
    let manifest: Manifest =
        toml::from_str(contents).context("failed to parse sprite manifest toml contents")?;
    if manifest.version != SUPPORTED_MANIFEST_VERSION {
        return Err(ManifestError::UnsupportedVersion {
            found: manifest.version,
        }
        .into());
    }
    Ok(base_path.join(manifest.asset_root))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn parse_manifest_resolves_the_asset_root_against_the_base() {
        let manifest = r#"
            version = 1
            asset_root = "tiles"
        "#;

        let root = parse_manifest(manifest, Path::new("assets")).expect("manifest should parse");
        assert_eq!(root, PathBuf::from("assets/tiles"));
    }

    #[test]
    fn parse_manifest_rejects_unsupported_versions() {
        let manifest = r#"
            version = 2
            asset_root = "tiles"
        "#;

        let error = parse_manifest(manifest, Path::new("assets"))
            .expect_err("future versions must be rejected");
        assert_eq!(
            error.downcast::<ManifestError>().expect("manifest error"),
            ManifestError::UnsupportedVersion { found: 2 }
        );
    }

    #[test]
    fn library_requests_every_catalogued_sprite_exactly_once() {
        let requested = RefCell::new(Vec::new());
        let library = SpriteLibrary::from_asset_root(Path::new("tiles"), |path| {
            requested.borrow_mut().push(path.to_path_buf());
            Ok(Texture2D::empty())
        });

        let names = all_sprite_names();
        assert_eq!(library.len(), names.len());
        assert_eq!(requested.borrow().len(), names.len());
        for name in &names {
            assert!(library.texture(name).is_some());
            assert!(requested
                .borrow()
                .contains(&PathBuf::from("tiles").join(name)));
        }
    }

    #[test]
    fn failed_loads_are_skipped_without_aborting_the_rest() {
        let library = SpriteLibrary::from_asset_root(Path::new("tiles"), |path| {
            if path.ends_with("tileGrass.png") {
                anyhow::bail!("simulated missing file")
            }
            Ok(Texture2D::empty())
        });

        assert_eq!(library.len(), all_sprite_names().len() - 1);
        assert!(library.texture("tileGrass.png").is_none());
        assert!(library.texture("tileSnow.png").is_some());
    }
}
