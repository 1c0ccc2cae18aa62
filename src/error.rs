//! Error types for startup: configuration, sprite sheet and terminal I/O.
//!
//! The simulation itself cannot fail; everything here is fatal before (or
//! around) the game loop.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    /// An image the game needs has no sprite
    #[error("Missing sprite for '{0}'")]
    AssetMissing(String),

    /// A sprite exists but cannot be used
    #[error("Invalid sprite '{name}': {reason}")]
    AssetInvalid { name: String, reason: String },

    /// The sprite sheet file could not be read or parsed
    #[error("Failed to load sprite sheet '{path}': {reason}")]
    AssetLoad { path: String, reason: String },

    /// The configuration file could not be read or parsed
    #[error("Failed to load config '{path}': {reason}")]
    Config { path: String, reason: String },

    #[error("Terminal I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl GameError {
    pub fn asset_load(path: impl Into<String>, reason: impl ToString) -> Self {
        GameError::AssetLoad {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn config(path: impl Into<String>, reason: impl ToString) -> Self {
        GameError::Config {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GameError>;
