// Expression expansion against a variable store

use tracing::trace;

use super::ast::{OperatorRule, VarSpec};
use super::buffer::OutputBuffer;
use super::charclass::encode_into;
use super::parser::{VarSpecError, VarSpecParser};
use crate::domain::value::Value;
use crate::domain::variables::VariableStore;

/// Expands single expressions. Never mutates the store.
pub struct ExpressionResolver<'a> {
    store: &'a VariableStore,
}

impl<'a> ExpressionResolver<'a> {
    pub fn new(store: &'a VariableStore) -> Self {
        Self { store }
    }

    /// Expand an expression body (operator already removed) into `out`.
    ///
    /// All varspecs are parsed before anything is written, so a rejected expression
    /// leaves `out` untouched. The error offset is relative to `body`.
    pub fn resolve(
        &self,
        body: &str,
        rule: &OperatorRule,
        out: &mut OutputBuffer,
    ) -> Result<(), VarSpecError> {
        let specs = VarSpecParser::parse_expression(body)?;
        let mut first = true;

        for spec in &specs {
            let Some(value) = self.store.value(&spec.name) else {
                trace!(name = %spec.name, "undefined variable skipped");
                continue;
            };

            if first {
                if let Some(c) = rule.first {
                    out.append_char(c);
                }
                first = false;
            } else {
                out.append_char(rule.separator);
            }

            match value {
                Value::String(s) => expand_string(out, spec, s, rule),
                Value::List(items) if spec.explode() => expand_list_exploded(out, spec, items, rule),
                Value::Map(pairs) if spec.explode() => expand_map_exploded(out, pairs, rule),
                Value::List(items) => expand_list(out, spec, items, rule),
                Value::Map(pairs) => expand_map(out, spec, pairs, rule),
            }
        }

        Ok(())
    }
}

fn encode_value(out: &mut OutputBuffer, value: &str, spec: &VarSpec, rule: &OperatorRule) {
    encode_into(out, value, rule.allow_reserved, spec.max_chars());
}

fn expand_string(out: &mut OutputBuffer, spec: &VarSpec, value: &str, rule: &OperatorRule) {
    if rule.named {
        out.append_str(&spec.name);
        if !value.is_empty() || rule.if_empty_equals {
            out.append_char('=');
        }
    }
    encode_value(out, value, spec, rule);
}

/// `name=` for a composite value. Returns false when nothing else should be written.
fn named_prefix(out: &mut OutputBuffer, spec: &VarSpec, is_empty: bool, rule: &OperatorRule) -> bool {
    if !rule.named {
        return true;
    }
    out.append_str(&spec.name);
    if !is_empty || rule.if_empty_equals {
        out.append_char('=');
    }
    !is_empty
}

fn expand_list(out: &mut OutputBuffer, spec: &VarSpec, items: &[String], rule: &OperatorRule) {
    if !named_prefix(out, spec, items.is_empty(), rule) {
        return;
    }
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.append_char(',');
        }
        encode_value(out, item, spec, rule);
    }
}

fn expand_map(
    out: &mut OutputBuffer,
    spec: &VarSpec,
    pairs: &[(String, String)],
    rule: &OperatorRule,
) {
    if !named_prefix(out, spec, pairs.is_empty(), rule) {
        return;
    }
    for (i, (key, value)) in pairs.iter().enumerate() {
        if i > 0 {
            out.append_char(',');
        }
        encode_value(out, key, spec, rule);
        out.append_char(',');
        encode_value(out, value, spec, rule);
    }
}

fn expand_list_exploded(
    out: &mut OutputBuffer,
    spec: &VarSpec,
    items: &[String],
    rule: &OperatorRule,
) {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.append_char(rule.separator);
        }
        if rule.named {
            out.append_str(&spec.name);
            if !item.is_empty() || rule.if_empty_equals {
                out.append_char('=');
            }
        }
        encode_value(out, item, spec, rule);
    }
}

/// Exploded maps are always `key=value`; the key takes the place of the name
fn expand_map_exploded(out: &mut OutputBuffer, pairs: &[(String, String)], rule: &OperatorRule) {
    for (i, (key, value)) in pairs.iter().enumerate() {
        if i > 0 {
            out.append_char(rule.separator);
        }
        encode_into(out, key, rule.allow_reserved, 0);
        if !rule.named || !value.is_empty() || rule.if_empty_equals {
            out.append_char('=');
        }
        encode_into(out, value, rule.allow_reserved, 0);
    }
}
