// Variable store: name -> value, in insertion order

use std::fmt;

use tracing::debug;

use super::template::literal::{parse_list, parse_map};
use super::value::{Value, ValueKind};
use crate::error::UritError;
use crate::validation::validate_variable_name;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    name: String,
    value: Value,
}

impl Variable {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

/// Variables available to an expansion.
///
/// Adding a name that already exists replaces its value but keeps its place in the
/// listing order. Expansion only reads the store, so it can be shared between
/// concurrent expansions as long as nothing is adding to it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableStore {
    vars: Vec<Variable>,
}

impl VariableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable from its flat textual form.
    ///
    /// A value starting with `(` is a list literal, one starting with `[` a map
    /// literal, anything else a plain string. A literal that parses to zero entries
    /// is ignored and the store is left as it was.
    pub fn add_variable(&mut self, name: &str, raw_value: &str) -> Result<(), UritError> {
        validate_variable_name(name)?;

        let value = if raw_value.starts_with('(') {
            let items =
                parse_list(raw_value).ok_or_else(|| UritError::MalformedList(name.to_string()))?;
            Value::List(items)
        } else if raw_value.starts_with('[') {
            let pairs =
                parse_map(raw_value).ok_or_else(|| UritError::MalformedMap(name.to_string()))?;
            Value::Map(pairs)
        } else {
            Value::String(raw_value.to_string())
        };

        if value.kind() != ValueKind::String && value.is_empty() {
            debug!(name, "empty list/map literal ignored");
            return Ok(());
        }

        self.insert(name.to_string(), value);
        Ok(())
    }

    pub fn add_string(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.insert(name.into(), Value::String(value.into()));
    }

    pub fn add_list<I, S>(&mut self, name: impl Into<String>, items: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(name.into(), Value::list(items));
    }

    pub fn add_map<I, K, V>(&mut self, name: impl Into<String>, pairs: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.insert(name.into(), Value::map(pairs));
    }

    /// Insert or replace, keeping the original position of a replaced variable
    pub fn insert(&mut self, name: String, value: Value) {
        match self.vars.iter_mut().find(|var| var.name == name) {
            Some(existing) => {
                debug!(name = %name, kind = ?value.kind(), "replacing variable");
                existing.value = value;
            }
            None => {
                debug!(name = %name, kind = ?value.kind(), "adding variable");
                self.vars.push(Variable { name, value });
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.vars.iter().find(|var| var.name == name)
    }

    pub fn value(&self, name: &str) -> Option<&Value> {
        self.get(name).map(Variable::value)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Variable> {
        self.vars.iter()
    }
}

/// One `name: value` line per variable
impl fmt::Display for VariableStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for var in &self.vars {
            writeln!(f, "{}: {}", var.name, var.value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_variable_string() {
        let mut store = VariableStore::new();
        store.add_variable("var", "value").unwrap();
        assert_eq!(store.value("var"), Some(&Value::string("value")));
    }

    #[test]
    fn test_add_variable_list_and_map() {
        let mut store = VariableStore::new();
        store
            .add_variable("count", r#"("one","two","three")"#)
            .unwrap();
        store
            .add_variable("keys", r#"[("semi",";"),("dot",".")]"#)
            .unwrap();

        assert_eq!(
            store.value("count"),
            Some(&Value::list(["one", "two", "three"]))
        );
        assert_eq!(
            store.value("keys"),
            Some(&Value::map([("semi", ";"), ("dot", ".")]))
        );
    }

    #[test]
    fn test_add_variable_malformed_list_leaves_store_unchanged() {
        let mut store = VariableStore::new();
        let result = store.add_variable("x", r#"("a",)"#);
        assert_eq!(result, Err(UritError::MalformedList("x".to_string())));
        assert!(store.get("x").is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_variable_malformed_map() {
        let mut store = VariableStore::new();
        store.add_string("m", "before");
        let result = store.add_variable("m", r#"[("k")]"#);
        assert_eq!(result, Err(UritError::MalformedMap("m".to_string())));
        assert_eq!(store.value("m"), Some(&Value::string("before")));
    }

    #[test]
    fn test_add_variable_invalid_name() {
        let mut store = VariableStore::new();
        let result = store.add_variable("bad name", "x");
        assert_eq!(
            result,
            Err(UritError::InvalidVariableName("bad name".to_string()))
        );
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_variable_empty_literal_is_ignored() {
        let mut store = VariableStore::new();
        store.add_variable("list", "()").unwrap();
        store.add_variable("map", "[]").unwrap();
        assert!(store.is_empty());

        store.add_string("list", "kept");
        store.add_variable("list", "( )").unwrap();
        assert_eq!(store.value("list"), Some(&Value::string("kept")));
    }

    #[test]
    fn test_empty_string_is_stored() {
        let mut store = VariableStore::new();
        store.add_variable("empty", "").unwrap();
        assert_eq!(store.value("empty"), Some(&Value::string("")));
    }

    #[test]
    fn test_replace_keeps_position() {
        let mut store = VariableStore::new();
        store.add_string("a", "1");
        store.add_string("b", "2");
        store.add_list("a", ["x", "y"]);

        let names: Vec<&str> = store.iter().map(Variable::name).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(store.len(), 2);
        assert_eq!(store.value("a"), Some(&Value::list(["x", "y"])));
    }

    #[test]
    fn test_lookup_is_exact() {
        let mut store = VariableStore::new();
        store.add_string("Var", "1");
        assert!(store.get("var").is_none());
        assert!(store.get("Var").is_some());
    }

    #[test]
    fn test_display_listing() {
        let mut store = VariableStore::new();
        store.add_string("var", "value");
        store.add_list("list", ["red", "green"]);
        store.add_map("keys", [("semi", ";"), ("dot", ".")]);

        assert_eq!(
            store.to_string(),
            "var: value\nlist: red, green\nkeys: semi=;, dot=.\n"
        );
    }
}
