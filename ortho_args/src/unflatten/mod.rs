//! Reconstruction of the nested model shape from the flat parse result.
//!
//! The grammar flattens a model tree onto one namespace of flags. After
//! parsing, [`unflatten`] walks the schema again to rebuild the nesting,
//! prunes every branch the user left untouched, and keeps only the
//! subcommand variant that was actually selected.

mod flat;

pub use flat::FlatArgs;
pub(crate) use flat::collect;

use serde_json::{Map, Value};
use tracing::debug;

use crate::schema::ModelSchema;

/// Rebuilds the nested tree for `schema` from `flat`.
///
/// Models without nested fields are returned as the flat mapping itself.
/// Otherwise the tree is rebuilt, pruned with [`prune`], and, when a
/// subcommand field was traversed, narrowed to the selected variants.
#[must_use]
pub fn unflatten(schema: &ModelSchema, flat: &FlatArgs) -> Map<String, Value> {
    if !schema.has_nested_models() {
        debug!(model = schema.name(), "flat model; skipping rebuild");
        return flat.values().clone();
    }
    let mut rebuild = Rebuild {
        flat,
        has_subcommand: false,
    };
    let mut tree = prune_map(rebuild.model(schema, &[]));
    if rebuild.has_subcommand {
        resolve_exclusivity(schema, &mut tree, flat, &[]);
    }
    debug!(model = schema.name(), keys = tree.len(), "tree rebuilt");
    tree
}

/// Removes `null` values and empty containers, bottom-up.
///
/// Returns `None` when `value` itself prunes away.
#[must_use]
pub fn prune(value: Value) -> Option<Value> {
    match value {
        Value::Null => None,
        Value::Object(map) => {
            let kept = prune_map(map);
            (!kept.is_empty()).then_some(Value::Object(kept))
        }
        Value::Array(items) => {
            let kept: Vec<Value> = items.into_iter().filter_map(prune).collect();
            (!kept.is_empty()).then_some(Value::Array(kept))
        }
        other => Some(other),
    }
}

fn prune_map(map: Map<String, Value>) -> Map<String, Value> {
    map.into_iter()
        .filter_map(|(key, value)| prune(value).map(|kept| (key, kept)))
        .collect()
}

fn extend(path: &[String], name: &str) -> Vec<String> {
    let mut extended = path.to_vec();
    extended.push(name.to_owned());
    extended
}

struct Rebuild<'a> {
    flat: &'a FlatArgs,
    has_subcommand: bool,
}

impl Rebuild<'_> {
    fn model(&mut self, schema: &ModelSchema, path: &[String]) -> Map<String, Value> {
        let flat = self.flat;
        let mut tree = Map::new();
        for field in schema.fields() {
            let field_path = extend(path, field.name());
            let value = field.model_schema().map_or_else(
                || flat.lookup(&field_path).cloned().unwrap_or(Value::Null),
                |child| {
                    self.has_subcommand |= child.is_subcommand();
                    Value::Object(self.model(&child, &field_path))
                },
            );
            tree.insert(field.name().to_owned(), value);
        }
        tree
    }
}

/// Drops unselected variants at every level and makes sure each selected
/// variant is present, even when none of its flags were given.
fn resolve_exclusivity(
    schema: &ModelSchema,
    tree: &mut Map<String, Value>,
    flat: &FlatArgs,
    path: &[String],
) {
    for field in schema.fields() {
        let Some(child) = field.model_schema() else {
            continue;
        };
        let field_path = extend(path, field.name());
        if !child.is_subcommand() {
            if let Some(Value::Object(branch)) = tree.get_mut(field.name()) {
                resolve_exclusivity(&child, branch, flat, &field_path);
            }
            continue;
        }
        if flat.is_selected(&field_path.join(".")) {
            let entry = tree
                .entry(field.name())
                .or_insert_with(|| Value::Object(Map::new()));
            if let Value::Object(branch) = entry {
                resolve_exclusivity(&child, branch, flat, &field_path);
            }
        } else if tree.remove(field.name()).is_some() {
            debug!(variant = field.name(), "discarded unselected subcommand");
        }
    }
}

#[cfg(test)]
mod tests;
