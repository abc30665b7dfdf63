//! Errors raised while loading a world description.
//!
//! A load either yields a complete, fully resolved [`crate::World`] or one
//! of these. Runtime refusals are not errors of this kind; see
//! [`crate::TransitionFailure`] and [`crate::CommandError`].

use std::path::PathBuf;

use thiserror::Error;

/// Why a world description could not be turned into a world.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read world file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("unsupported world file format: {path}")]
    UnsupportedFormat { path: PathBuf },

    #[error("invalid JSON world description: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid TOML world description: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("the world has no locations")]
    NoLocations,

    #[error("object names must not be empty")]
    EmptyName,

    #[error("'{name}' cannot be referred to; names may not end in '.N' or carry outer spaces")]
    UnreferenceableName { name: String },

    #[error("'{name}' is defined more than once")]
    DuplicateName { name: String },

    #[error("'{object}' has no descriptions")]
    NoDescriptions { object: String },

    #[error("a transition on '{object}' lists no actions")]
    NoActions { object: String },

    #[error("malformed reference '{value}' in {referrer}")]
    InvalidReference { referrer: String, value: String },

    #[error("{referrer} refers to unknown item '{name}'")]
    UnknownItem { referrer: String, name: String },

    #[error("{referrer} refers to unknown location '{name}'")]
    UnknownLocation { referrer: String, name: String },

    #[error("{referrer} refers to unknown object '{name}'")]
    UnknownObject { referrer: String, name: String },

    #[error("a transition on '{object}' uses state {state} of '{target}', which has only {count}")]
    StateOutOfRange {
        object: String,
        target: String,
        state: u32,
        count: usize,
    },

    #[error("item '{item}' is placed in both '{first}' and '{second}'")]
    ItemPlacedTwice {
        item: String,
        first: String,
        second: String,
    },
}

impl LoadError {
    pub(crate) fn invalid_reference(referrer: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidReference {
            referrer: referrer.into(),
            value: value.into(),
        }
    }
}
