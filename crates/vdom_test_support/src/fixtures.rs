//! TOML fixture files describing reconciliation cases.
//!
//! ```toml
//! [[case]]
//! name = "grow"
//! old = '{"tagName":"ul","children":["a"]}'
//! new = '{"tagName":"ul","children":["a","b"]}'
//! expect = "update"
//!
//! [case.config]
//! attribute-values = "presence-only"
//! ```
//!
//! Descriptions are JSON strings in the shape `vdom::json` decodes. `old` may be omitted
//! (absent previous description). `result` is the expected live
//! tree after applying the patch; it defaults to `new`. `attribute_ops` and `mutations`
//! pin planned-operation counts when present.

use serde::{Deserialize, Deserializer};
use std::fs;
use std::path::{Path, PathBuf};
use vdom::{Description, DiffConfig};

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub enum ExpectedPatch {
    Keep,
    Remove,
    Replace,
    Update,
}

#[derive(Debug, Deserialize)]
pub struct FixtureCase {
    pub name: String,
    #[serde(default, deserialize_with = "optional_json_description")]
    pub old: Option<Description>,
    #[serde(deserialize_with = "json_description")]
    pub new: Description,
    pub expect: ExpectedPatch,
    #[serde(default, deserialize_with = "optional_json_description")]
    pub result: Option<Description>,
    #[serde(default)]
    pub detached: bool,
    #[serde(default)]
    pub attribute_ops: Option<usize>,
    #[serde(default)]
    pub mutations: Option<usize>,
    #[serde(default)]
    pub config: DiffConfig,
    #[serde(skip)]
    pub source: PathBuf,
}

impl FixtureCase {
    /// The live tree expected after applying the patch.
    pub fn expected_result(&self) -> &Description {
        self.result.as_ref().unwrap_or(&self.new)
    }
}

#[derive(Debug, Deserialize)]
struct FixtureFile {
    #[serde(default)]
    case: Vec<FixtureCase>,
}

/// Load every `*.toml` file in `dir`, in file-name order.
pub fn load_fixture_dir(dir: &Path) -> Vec<FixtureCase> {
    let mut paths = fs::read_dir(dir)
        .unwrap_or_else(|err| panic!("failed to read fixture dir {dir:?}: {err}"))
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "toml"))
        .collect::<Vec<_>>();
    paths.sort();
    paths.iter().flat_map(|path| load_fixture_file(path)).collect()
}

pub fn load_fixture_file(path: &Path) -> Vec<FixtureCase> {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|err| panic!("failed to read fixture file {path:?}: {err}"));
    let file: FixtureFile = toml::from_str(&content)
        .unwrap_or_else(|err| panic!("invalid fixture file {path:?}: {err}"));
    file.case
        .into_iter()
        .map(|mut case| {
            case.source = path.to_path_buf();
            case
        })
        .collect()
}

fn json_description<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Description, D::Error> {
    let raw = String::deserialize(deserializer)?;
    vdom::json::from_json_str(&raw).map_err(serde::de::Error::custom)
}

fn optional_json_description<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Description>, D::Error> {
    Option::<String>::deserialize(deserializer)?
        .map(|raw| vdom::json::from_json_str(&raw).map_err(serde::de::Error::custom))
        .transpose()
}
