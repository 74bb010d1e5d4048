//! Configuration module for slidecraft
//!
//! Handles loading and managing application settings from TOML files.

mod settings;

pub use settings::{
    default_model_for, mask_secret, GeneralSettings, ImageSettings, LlmSettings,
    PresentationSettings, Settings, GEMINI_KEY_VARS, OPENAI_KEY_VARS,
};
