use std::{
    fs,
    path::{Path, PathBuf},
};

use lvl_engine::{Extent, SaveOptions, ZoomSettings, DEFAULT_SECTION_HEIGHT, DEFAULT_SECTION_WIDTH};
use serde::{Deserialize, Serialize};

const OPTIONS_FILE: &str = "options.toml";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Options {
    /// Canvas size in pixels used for viewport calculations
    pub viewport_width: f32,
    pub viewport_height: f32,

    /// Size in cells of levels created with `new`
    pub section_width: i32,
    pub section_height: i32,

    /// Palette for JSON exports, empty exports without colors
    pub theme: String,

    /// Write `.lvl` files with magic and version header
    pub versioned: bool,

    pub zoom: ZoomSettings,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            viewport_width: 800.0,
            viewport_height: 600.0,
            section_width: DEFAULT_SECTION_WIDTH,
            section_height: DEFAULT_SECTION_HEIGHT,
            theme: "SMB1".to_string(),
            versioned: false,
            zoom: ZoomSettings::default(),
        }
    }
}

impl Options {
    pub fn load_options() -> Self {
        let Some(config_dir) = Self::get_config_dir() else {
            return Self::default();
        };
        let options_file = config_dir.join(OPTIONS_FILE);
        if options_file.exists() {
            Self::load_from(&options_file)
        } else {
            Self::default()
        }
    }

    /// Reads an options file, anything unreadable falls back to the defaults.
    pub fn load_from(file: &Path) -> Self {
        match fs::read_to_string(file) {
            Ok(txt) => match toml::from_str::<Self>(&txt) {
                Ok(mut result) => {
                    result.zoom = result.zoom.validated();
                    result
                }
                Err(err) => {
                    log::error!("Error parsing options file {}: {}", file.display(), err);
                    Self::default()
                }
            },
            Err(err) => {
                log::error!("Error reading options file: {}", err);
                Self::default()
            }
        }
    }

    /// Writes the options into the configuration directory and returns the file written.
    pub fn store_options(&self) -> anyhow::Result<PathBuf> {
        let Some(config_dir) = Self::get_config_dir() else {
            anyhow::bail!("No configuration directory available");
        };
        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)?;
        }
        let file_name = config_dir.join(OPTIONS_FILE);
        self.store_to(&file_name)?;
        Ok(file_name)
    }

    pub fn store_to(&self, file: &Path) -> anyhow::Result<()> {
        fs::write(file, self.to_toml()?)?;
        log::info!("Wrote options to {}", file.display());
        Ok(())
    }

    pub fn to_toml(&self) -> anyhow::Result<String> {
        Ok(toml::to_string(self)?)
    }

    /// Returns the configuration directory path
    pub fn get_config_dir() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "GitHub", "lvl_tool").map(|proj_dirs| proj_dirs.config_dir().to_path_buf())
    }

    /// Returns the log directory path, creating it if needed
    pub fn get_log_dir() -> Option<PathBuf> {
        let dir = Self::get_config_dir()?;
        if !dir.exists() {
            fs::create_dir_all(&dir).ok()?;
        }
        Some(dir)
    }

    pub fn viewport_size(&self) -> Extent {
        Extent::new(self.viewport_width, self.viewport_height)
    }

    pub fn save_options(&self) -> SaveOptions {
        SaveOptions { versioned: self.versioned }
    }
}
