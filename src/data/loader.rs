use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

use super::{ContentFile, EngineConfig};

const BUNDLED_CONTENT_RELATIVE_PATH: &str = "data/layers.json";

pub fn bundled_content_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(BUNDLED_CONTENT_RELATIVE_PATH)
}

pub fn load_bundled_content() -> Result<ContentFile> {
    load_content_from_path(bundled_content_path())
}

pub fn load_content_from_path(path: impl AsRef<Path>) -> Result<ContentFile> {
    read_json(path.as_ref(), "content")
}

pub fn load_config_from_path(path: impl AsRef<Path>) -> Result<EngineConfig> {
    read_json(path.as_ref(), "engine config")
}

fn read_json<T>(path: &Path, label: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed reading {label} file: {}", path.display()))?;

    serde_json::from_str(&raw)
        .with_context(|| format!("failed parsing {label} file as JSON: {}", path.display()))
}
