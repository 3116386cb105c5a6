// Variables file: YAML or JSON mapping of variable names to values

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value as YamlValue};
use std::path::Path;
use tracing::debug;

use crate::domain::{Value, VariableStore};
use crate::validation::validate_variable_name;

/// A variables file: a YAML (or JSON) mapping from variable name to value.
///
/// ```yaml
/// var: value
/// list: [red, green, blue]
/// keys: { semi: ";", dot: "." }
/// pairs: [[k, "1"], [k, "2"]]
/// ```
#[derive(Serialize, Deserialize, Debug, PartialEq, Default)]
#[serde(transparent)]
pub struct VariablesFile {
    pub variables: Mapping,
}

impl VariablesFile {
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read variables file {}", path.display()))?;
        Self::from_str(&text).with_context(|| format!("Invalid variables file {}", path.display()))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    /// Add every variable to `store`, in file order. Returns how many were added.
    ///
    /// Empty sequences and mappings are skipped, like empty list/map literals.
    pub fn apply(&self, store: &mut VariableStore) -> Result<usize> {
        let mut added = 0;

        for (key, value) in &self.variables {
            let name = scalar_text(key).context("Variable names must be scalars")?;
            validate_variable_name(&name)?;

            let value = convert_value(&name, value)?;
            if !matches!(value, Value::String(_)) && value.is_empty() {
                debug!(name = %name, "empty list/map in variables file ignored");
                continue;
            }

            store.insert(name, value);
            added += 1;
        }

        Ok(added)
    }
}

/// Load `path` into `store`
pub fn load_variables_file(path: &Path, store: &mut VariableStore) -> Result<usize> {
    let file = VariablesFile::from_path(path)?;
    let added = file.apply(store)?;
    debug!(path = %path.display(), added, "variables file loaded");
    Ok(added)
}

fn convert_value(name: &str, value: &YamlValue) -> Result<Value> {
    if let Some(text) = scalar_text(value) {
        return Ok(Value::String(text));
    }

    match value {
        YamlValue::Sequence(items) => {
            if let Some(list) = items.iter().map(scalar_text).collect::<Option<Vec<_>>>() {
                return Ok(Value::List(list));
            }
            match items.iter().map(pair_of_scalars).collect::<Option<Vec<_>>>() {
                Some(pairs) => Ok(Value::Map(pairs)),
                None => bail!(
                    "Variable '{}': a sequence must hold only scalars or only [key, value] pairs",
                    name
                ),
            }
        }
        YamlValue::Mapping(mapping) => {
            let mut pairs = Vec::with_capacity(mapping.len());
            for (k, v) in mapping {
                match (scalar_text(k), scalar_text(v)) {
                    (Some(k), Some(v)) => pairs.push((k, v)),
                    _ => bail!("Variable '{}': map keys and values must be scalars", name),
                }
            }
            Ok(Value::Map(pairs))
        }
        YamlValue::Tagged(tagged) => convert_value(name, &tagged.value),
        _ => bail!("Variable '{}': unsupported value", name),
    }
}

/// Text form of a scalar; `~`/null reads as an empty string
fn scalar_text(value: &YamlValue) -> Option<String> {
    match value {
        YamlValue::String(s) => Some(s.clone()),
        YamlValue::Number(n) => Some(n.to_string()),
        YamlValue::Bool(b) => Some(b.to_string()),
        YamlValue::Null => Some(String::new()),
        _ => None,
    }
}

fn pair_of_scalars(value: &YamlValue) -> Option<(String, String)> {
    match value.as_sequence()?.as_slice() {
        [k, v] => Some((scalar_text(k)?, scalar_text(v)?)),
        _ => None,
    }
}
