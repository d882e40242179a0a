//! Test fixtures for SWAP: an in-memory classification and gold store, and
//! loaders for the JSON scenarios under `data/`.

mod store;

pub use store::InMemoryStore;

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use swap_core::models::{Classification, Label, SubjectId};

/// Root directory of the fixture data.
fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixture_path(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Load a fixture file as raw JSON Value.
pub fn load_fixture_value(relative_path: &str) -> serde_json::Value {
    load_fixture(relative_path)
}

/// Get the absolute path to a fixture file.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

/// List all JSON files in a fixture subdirectory, sorted.
pub fn list_fixtures(subdir: &str) -> Vec<PathBuf> {
    let dir = fixtures_root().join(subdir);
    if !dir.exists() {
        return Vec::new();
    }
    let mut paths: Vec<PathBuf> = std::fs::read_dir(&dir)
        .unwrap_or_else(|e| panic!("Failed to read directory {}: {}", dir.display(), e))
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            path.extension().is_some_and(|ext| ext == "json").then_some(path)
        })
        .collect();
    paths.sort();
    paths
}

/// A classification scenario: export-style rows plus expert labels.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub description: String,
    #[serde(default)]
    pub golds: BTreeMap<String, i64>,
    #[serde(default)]
    pub historical: Vec<serde_json::Value>,
    #[serde(default)]
    pub live: Vec<serde_json::Value>,
    /// Free-form expectations checked by the test using the scenario.
    #[serde(default)]
    pub expected: serde_json::Value,
}

impl Scenario {
    /// Parse every row and label into a store.
    ///
    /// # Panics
    /// Panics on a malformed row or label.
    pub fn into_store(self) -> InMemoryStore {
        let parse = |row: &serde_json::Value| {
            Classification::from_json(row)
                .unwrap_or_else(|e| panic!("Bad row in scenario '{}': {e}", self.description))
        };
        let mut store = InMemoryStore::new();
        for row in &self.historical {
            store.push(parse(row));
        }
        for row in &self.live {
            store.push_live(parse(row));
        }
        for (id, gold) in &self.golds {
            let label = Label::parse("gold", *gold)
                .unwrap_or_else(|e| panic!("Bad gold for {id} in '{}': {e}", self.description));
            store.set_gold(SubjectId::from(id.as_str()), label);
        }
        store
    }
}

/// Load `data/scenarios/<name>.json`.
pub fn load_scenario(name: &str) -> Scenario {
    load_fixture(&format!("scenarios/{name}.json"))
}
