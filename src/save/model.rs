use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::decimal::Decimal;

pub const SAVE_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SaveResource {
    pub value: Decimal,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveData {
    pub version: u32,
    pub resources: BTreeMap<String, SaveResource>,
    pub tick_index: u64,
    pub elapsed_seconds: f64,
    pub paused: bool,
}

impl Default for SaveData {
    fn default() -> Self {
        Self {
            version: SAVE_VERSION,
            resources: BTreeMap::new(),
            tick_index: 0,
            elapsed_seconds: 0.0,
            paused: false,
        }
    }
}
