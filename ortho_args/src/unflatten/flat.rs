//! The flat mapping produced by one parse.

use clap::ArgMatches;
use clap::parser::ValueSource;
use serde_json::{Map, Value};
use tracing::trace;

use crate::grammar::{CommandSurface, FlagShape};

/// Values supplied on the command line, keyed by dotted field path.
///
/// Flags the user did not pass are absent rather than `null`; insertion
/// order follows the order in which the grammar declared the flags. The
/// chain of selected subcommands is kept alongside as dotted field paths,
/// outermost first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FlatArgs {
    values: Map<String, Value>,
    selected: Vec<String>,
}

impl FlatArgs {
    /// Creates an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `value` for the field at dotted `path`.
    pub fn insert(&mut self, path: impl Into<String>, value: Value) {
        self.values.insert(path.into(), value);
    }

    /// Records that the subcommand field at dotted `path` was selected.
    pub fn select(&mut self, path: impl Into<String>) {
        self.selected.push(path.into());
    }

    /// Value stored under the exact dotted `path`.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Value> {
        self.values.get(path)
    }

    /// Looks a field up by its path segments.
    ///
    /// The full dotted path is tried first; when that yields nothing and the
    /// path is deeper than one segment, the two-segment path made of the
    /// first segment and the field name is tried.
    #[must_use]
    pub fn lookup(&self, path: &[String]) -> Option<&Value> {
        let full = self.values.get(&path.join("."));
        full.or_else(|| match path {
            [first, .., name] if path.len() > 2 => self.values.get(&format!("{first}.{name}")),
            _ => None,
        })
    }

    /// Returns `true` when the subcommand field at dotted `path` was chosen.
    #[must_use]
    pub fn is_selected(&self, path: &str) -> bool {
        self.selected.iter().any(|selected| selected == path)
    }

    /// Selected subcommand field paths, outermost first.
    #[must_use]
    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    /// Number of recorded values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` when nothing was supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The underlying map.
    #[must_use]
    pub const fn values(&self) -> &Map<String, Value> {
        &self.values
    }

    /// Consumes the mapping, returning the values.
    #[must_use]
    pub fn into_values(self) -> Map<String, Value> {
        self.values
    }
}

/// Reads everything the user typed out of `matches`.
///
/// Defaults clap fills in on its own are ignored: only values whose source
/// is the command line are recorded.
pub(crate) fn collect(matches: &ArgMatches, surface: &CommandSurface) -> FlatArgs {
    let mut flat = FlatArgs::new();
    collect_level(matches, surface, &mut flat);
    flat
}

fn collect_level(matches: &ArgMatches, surface: &CommandSurface, flat: &mut FlatArgs) {
    for flag in &surface.flags {
        if matches.value_source(&flag.id) != Some(ValueSource::CommandLine) {
            continue;
        }
        let value = match flag.shape {
            FlagShape::Value => matches
                .get_one::<String>(&flag.id)
                .map(|raw| Value::String(raw.clone())),
            FlagShape::Values => matches.get_many::<String>(&flag.id).map(|raws| {
                Value::Array(raws.map(|raw| Value::String(raw.clone())).collect())
            }),
            FlagShape::Enable => Some(Value::Bool(true)),
            FlagShape::Disable => Some(Value::Bool(false)),
        };
        if let Some(collected) = value {
            trace!(id = %flag.id, "collected flag");
            flat.insert(flag.path.join("."), collected);
        }
    }
    let Some((name, sub_matches)) = matches.subcommand() else {
        return;
    };
    if let Some(binding) = surface.command(name) {
        trace!(command = name, field = %binding.field, "following subcommand");
        flat.select(binding.path.join("."));
        collect_level(sub_matches, &binding.surface, flat);
    }
}
