use std::{collections::HashMap, fs};

#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: storage::DEFAULT_DATABASE_URL.into(),
        }
    }
}

/// Layered lookup: defaults, then an optional `panel.toml` next to the
/// binary, then environment overrides.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("panel.toml") {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(&raw) {
            if let Some(v) = file_cfg.get("database_url") {
                settings.database_url = v.clone();
            }
        }
    }

    if let Ok(v) = std::env::var("PANEL__DATABASE_URL") {
        settings.database_url = v;
    }

    settings
}
