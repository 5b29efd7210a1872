use serde::{Deserialize, Serialize};

/// Smallest font size the settings dialog offers.
pub const FONT_SIZE_MIN: u16 = 8;
/// Largest font size the settings dialog offers.
pub const FONT_SIZE_MAX: u16 = 20;

/// Persisted application settings. Field defaults cover documents written
/// before a field existed; `font_size` is only range-checked in the dialog,
/// never on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub dark_theme: bool,
    #[serde(default = "default_font_size")]
    pub font_size: u16,
    #[serde(default)]
    pub annotations: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dark_theme: false,
            font_size: default_font_size(),
            annotations: String::new(),
        }
    }
}

fn default_font_size() -> u16 {
    10
}
