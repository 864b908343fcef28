//! Tool settings: where the document, the delegate binary, and the
//! identity-lookup endpoint live.
//!
//! Layered defaults < optional settings file < `ROSTR_`-prefixed
//! environment, so tests can point everything at temporary paths.

use std::path::{Path, PathBuf};

use anyhow::Result;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub config_path: PathBuf,
    pub xray_binary: PathBuf,
    pub lookup_url: String,
}

impl Settings {
    pub fn load(conf: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder()
            .set_default("config_path", "xray_server.json")?
            .set_default("xray_binary", "./xray")?
            .set_default("lookup_url", "https://ipinfo.io/json")?;
        if let Some(path) = conf {
            builder = builder.add_source(config::File::with_name(
                path.to_str().expect("invalid pathname"),
            ));
        }
        let settings = builder
            .add_source(config::Environment::with_prefix("ROSTR"))
            .build()?;
        Ok(settings.try_deserialize()?)
    }
}
