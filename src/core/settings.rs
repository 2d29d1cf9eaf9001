//! # Display Settings
//!
//! Session-wide preferences. Lives for the whole process and is only changed
//! through [`AppSettings::merge`], which applies a sparse [`SettingsPatch`].

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::core::i18n::{self, Translations};

/// Smallest font size the settings overlay allows.
pub const FONT_SIZE_MIN: u8 = 12;
/// Largest font size the settings overlay allows.
pub const FONT_SIZE_MAX: u8 = 22;

pub const DEFAULT_FONT_SIZE: u8 = 14;
pub const DEFAULT_WALLPAPER: &str = "https://picsum.photos/1200/800?grayscale";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    #[default]
    Ru,
}

impl Language {
    /// Cycles to the other language (only two exist).
    pub fn next(self) -> Self {
        match self {
            Language::En => Language::Ru,
            Language::Ru => Language::En,
        }
    }

    /// Native name shown in the language picker.
    pub fn label(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Ru => "Русский",
        }
    }

    pub fn strings(self) -> &'static Translations {
        i18n::translations(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSettings {
    pub theme: Theme,
    pub font_size: u8,
    pub wallpaper: String,
    pub notifications: bool,
    pub animations: bool,
    pub language: Language,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            font_size: DEFAULT_FONT_SIZE,
            wallpaper: DEFAULT_WALLPAPER.to_string(),
            notifications: true,
            animations: true,
            language: Language::default(),
        }
    }
}

/// Sparse update: `None` fields leave the current value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsPatch {
    pub theme: Option<Theme>,
    pub font_size: Option<u8>,
    pub wallpaper: Option<String>,
    pub notifications: Option<bool>,
    pub animations: Option<bool>,
    pub language: Option<Language>,
}

impl AppSettings {
    /// Shallow merge. Values are taken as given; bounds are the caller's job.
    pub fn merge(&mut self, patch: SettingsPatch) {
        if let Some(theme) = patch.theme {
            self.theme = theme;
        }
        if let Some(size) = patch.font_size {
            self.font_size = size;
        }
        if let Some(wallpaper) = patch.wallpaper {
            self.wallpaper = wallpaper;
        }
        if let Some(on) = patch.notifications {
            self.notifications = on;
        }
        if let Some(on) = patch.animations {
            self.animations = on;
        }
        if let Some(language) = patch.language {
            self.language = language;
        }
    }

    pub fn strings(&self) -> &'static Translations {
        self.language.strings()
    }
}

/// Step the font size by `delta`, staying inside the slider bounds.
pub fn step_font_size(current: u8, delta: i8) -> u8 {
    let stepped = i16::from(current) + i16::from(delta);
    stepped.clamp(i16::from(FONT_SIZE_MIN), i16::from(FONT_SIZE_MAX)) as u8
}
