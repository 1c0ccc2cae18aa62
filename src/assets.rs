//! Sprite sheet: maps logical image handles to terminal glyphs.
//!
//! The built-in sheet covers every image. A JSON file of
//! `{"name": "glyph"}` pairs can override individual entries; the result is
//! validated before the game starts, since the game has no fallback art.

use std::collections::HashMap;
use std::path::Path;

use log::info;

use crate::consts::ENEMY_VARIANTS;
use crate::entities::{Backdrop, Direction, ImageId, Mood};
use crate::error::{GameError, Result};

/// Stable name of an image, used as the key in sprite sheet files.
pub fn asset_name(image: ImageId) -> String {
    match image {
        ImageId::Player(d) => format!("player.{}", d.name()),
        ImageId::PlayerFace(Mood::Joy) => "player.joy".to_string(),
        ImageId::PlayerFace(Mood::Sorrow) => "player.sorrow".to_string(),
        ImageId::Beam(d) => format!("beam.{}", d.name()),
        ImageId::Projectile => "projectile".to_string(),
        ImageId::Enemy(n) => format!("enemy.{n}"),
        ImageId::Boss => "boss".to_string(),
        ImageId::Explosion => "explosion".to_string(),
        ImageId::AreaEffect => "gravity".to_string(),
        ImageId::PulseFlash => "emp".to_string(),
        ImageId::Background(Backdrop::Field) => "background.field".to_string(),
        ImageId::Background(Backdrop::Space) => "background.space".to_string(),
    }
}

/// Every image the game can ask for.
pub fn required_images() -> Vec<ImageId> {
    let mut images = Vec::new();
    images.extend(Direction::ALL.map(ImageId::Player));
    images.extend([Mood::Joy, Mood::Sorrow].map(ImageId::PlayerFace));
    images.extend(Direction::ALL.map(ImageId::Beam));
    images.extend((1..=ENEMY_VARIANTS).map(ImageId::Enemy));
    images.extend([
        ImageId::Projectile,
        ImageId::Boss,
        ImageId::Explosion,
        ImageId::AreaEffect,
        ImageId::PulseFlash,
        ImageId::Background(Backdrop::Field),
        ImageId::Background(Backdrop::Space),
    ]);
    images
}

fn builtin_glyph(image: ImageId) -> &'static str {
    match image {
        ImageId::Player(Direction::East) => "(ᐛ)>",
        ImageId::Player(Direction::NorthEast) => "(ᐛ)╱",
        ImageId::Player(Direction::North) => "^(ᐛ)^",
        ImageId::Player(Direction::NorthWest) => "╲(ᐛ)",
        ImageId::Player(Direction::West) => "<(ᐛ)",
        ImageId::Player(Direction::SouthWest) => "╱(ᐛ)",
        ImageId::Player(Direction::South) => "v(ᐛ)v",
        ImageId::Player(Direction::SouthEast) => "(ᐛ)╲",
        ImageId::PlayerFace(Mood::Joy) => "(^o^)",
        ImageId::PlayerFace(Mood::Sorrow) => "(T_T)",
        ImageId::Beam(Direction::East | Direction::West) => "══",
        ImageId::Beam(Direction::North | Direction::South) => "║",
        ImageId::Beam(Direction::NorthEast | Direction::SouthWest) => "╱",
        ImageId::Beam(Direction::NorthWest | Direction::SouthEast) => "╲",
        ImageId::Projectile => "●",
        ImageId::Enemy(1) => "«▼»",
        ImageId::Enemy(2) => "(◎)",
        ImageId::Enemy(_) => "[¤]",
        ImageId::Boss => "<<[ ☠ BOSS ☠ ]>>",
        ImageId::Explosion => "✺",
        ImageId::AreaEffect => "░",
        ImageId::PulseFlash => "≋",
        ImageId::Background(Backdrop::Field) => " ",
        ImageId::Background(Backdrop::Space) => "·",
    }
}

#[derive(Debug, Clone)]
pub struct SpriteSheet {
    glyphs: HashMap<String, String>,
}

impl SpriteSheet {
    pub fn builtin() -> Self {
        let glyphs = required_images()
            .into_iter()
            .map(|image| (asset_name(image), builtin_glyph(image).to_string()))
            .collect();
        SpriteSheet { glyphs }
    }

    /// Built-in sheet with overrides from `path` applied, validated.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut sheet = Self::builtin();
        if let Some(path) = path {
            let display = path.display().to_string();
            let text =
                std::fs::read_to_string(path).map_err(|e| GameError::asset_load(&display, e))?;
            let overrides: HashMap<String, String> =
                serde_json::from_str(&text).map_err(|e| GameError::asset_load(&display, e))?;
            info!("{} sprite overrides from {}", overrides.len(), display);
            sheet = sheet.with_overrides(overrides)?;
        }
        sheet.validate()?;
        Ok(sheet)
    }

    /// Replace glyphs by name. Names the game does not know are rejected.
    pub fn with_overrides(mut self, overrides: HashMap<String, String>) -> Result<Self> {
        for (name, glyph) in overrides {
            if !self.glyphs.contains_key(&name) {
                return Err(GameError::AssetInvalid {
                    name,
                    reason: "unknown image name".to_string(),
                });
            }
            self.glyphs.insert(name, glyph);
        }
        Ok(self)
    }

    /// Every required image, including all eight player orientations, must
    /// have a non-empty glyph.
    pub fn validate(&self) -> Result<()> {
        for image in required_images() {
            let name = asset_name(image);
            match self.glyphs.get(&name) {
                None => return Err(GameError::AssetMissing(name)),
                Some(glyph) if glyph.is_empty() => {
                    return Err(GameError::AssetInvalid {
                        name,
                        reason: "empty glyph".to_string(),
                    })
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    pub fn glyph(&self, image: ImageId) -> &str {
        self.glyphs
            .get(&asset_name(image))
            .map(String::as_str)
            .unwrap_or("?")
    }

    /// Drop an entry; lets callers (and tests) build incomplete sheets.
    pub fn without(mut self, image: ImageId) -> Self {
        self.glyphs.remove(&asset_name(image));
        self
    }
}
