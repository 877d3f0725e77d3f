//! Multi-source variable store.
//!
//! Responsibilities:
//! - Fold definitions from ordered sources into one `VariableMap`.
//! - Expand each definition against everything merged before it.
//!
//! Does NOT handle:
//! - Locating sources (paths and globs belong to the caller).
//! - Building a child process environment (see `VariableMap::to_process_env`).
//!
//! Invariants / Assumptions:
//! - Sources are processed in caller order, definitions in source order.
//! - Forward references are rejected: a definition may only reference names
//!   merged earlier in the same or a previous source.
//! - Duplicate names are last-write-wins; overwrites are logged, never errors.
//! - The first failure stops the merge; the partially built map is not
//!   returned by `merge`.
//! - Logs carry names and origins only, never values.

use crate::error::EnvError;
use crate::expander::Expander;
use crate::model::{VariableMap, Variables};
use crate::parser::DefinitionParser;
use crate::settings::Settings;
use crate::source::Source;

/// Accumulates resolved variables from one or more sources.
#[derive(Debug, Default)]
pub struct VariableStore {
    parser: DefinitionParser,
    expander: Expander,
    map: VariableMap,
}

impl VariableStore {
    pub fn new(settings: &Settings) -> Self {
        Self {
            parser: DefinitionParser::new(&settings.parse),
            expander: Expander::new(&settings.expand),
            map: VariableMap::new(),
        }
    }

    /// Parse `source` completely, then merge its definitions in order.
    pub fn merge_source(&mut self, source: Source<'_>) -> Result<(), EnvError> {
        let origin = source.origin();
        tracing::debug!(origin = %origin, "Merging source");
        let vars = self.parser.parse_source(source)?;
        self.merge_variables(vars, &origin)
    }

    /// Merge already-parsed definitions attributed to `origin`.
    pub fn merge_variables(&mut self, vars: Variables, origin: &str) -> Result<(), EnvError> {
        let count = vars.len();
        for var in vars {
            let outcome = self.expander.expand(var.value(), &self.map)?;
            if !outcome.is_fully_resolved() {
                return Err(EnvError::UndefinedReference {
                    name: Some(var.name().to_string()),
                    origin: origin.to_string(),
                    missing: outcome.missing,
                });
            }

            let (name, _) = var.into_parts();
            if self.map.contains(&name) {
                tracing::info!(name = %name, origin, "Overwriting previously defined variable");
            } else {
                tracing::debug!(name = %name, origin, "Defined variable");
            }
            self.map.insert(name, outcome.text);
        }
        tracing::debug!(origin, count, total = self.map.len(), "Merged source");
        Ok(())
    }

    pub fn map(&self) -> &VariableMap {
        &self.map
    }

    pub fn into_map(self) -> VariableMap {
        self.map
    }
}

/// Merge `sources` in order into a fresh map.
pub fn merge<'a, I>(sources: I, settings: &Settings) -> Result<VariableMap, EnvError>
where
    I: IntoIterator<Item = Source<'a>>,
{
    let mut store = VariableStore::new(settings);
    for source in sources {
        store.merge_source(source)?;
    }
    Ok(store.into_map())
}
