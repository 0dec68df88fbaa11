//! Alias resolution: group bindings of one class object under its
//! canonical record.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use symcat_core::ClassRecord;

use crate::ExtractRules;
use crate::namespace::{ClassId, ClassRef};

/// Pick the canonical binding of every class object.
///
/// Among the bindings that satisfy the naming rule, the one equal to the
/// class's declared name wins, otherwise the first one seen. Classes with no
/// qualifying binding are absent from the result.
pub fn canonical_bindings<'a>(
    bindings: impl IntoIterator<Item = (&'a str, &'a ClassRef)>,
    rules: &ExtractRules,
) -> HashMap<ClassId, &'a str> {
    let mut canonical: HashMap<ClassId, &'a str> = HashMap::new();
    for (name, class) in bindings {
        if !rules.is_canonical_name(name) {
            continue;
        }
        let id = class.id();
        let replace = match canonical.get(&id) {
            None => true,
            Some(current) => *current != class.name() && name == class.name(),
        };
        if replace {
            canonical.insert(id, name);
        }
    }
    canonical
}

/// Side table of non-canonical bindings, keyed by class identity.
#[derive(Debug, Default)]
pub struct AliasTable {
    entries: HashMap<ClassId, Vec<String>>,
    /// First-seen order of class ids, for deterministic reporting.
    order: Vec<ClassId>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, class: ClassId, alias: impl Into<String>) {
        let aliases = self.entries.entry(class).or_insert_with(|| {
            self.order.push(class);
            Vec::new()
        });
        aliases.push(alias.into());
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Attach aliases to the canonical records of their class objects.
    ///
    /// Returns the aliases whose class produced no record; they are not
    /// part of the catalog.
    pub fn attach(mut self, records: &mut [(ClassId, ClassRecord)]) -> Vec<String> {
        for (id, record) in records.iter_mut() {
            if let Some(aliases) = self.entries.remove(id) {
                for alias in aliases {
                    record.add_alias(alias);
                }
            }
        }

        let mut orphaned = Vec::new();
        for id in &self.order {
            if let Some(aliases) = self.entries.remove(id) {
                orphaned.extend(aliases);
            }
        }
        orphaned
    }
}

/// Post-hoc alias change for a finished record.
///
/// Covers alternate exports the identity-based pass cannot see, e.g. a
/// factory function exported next to the class it builds.
///
/// ```toml
/// [[categories.patches]]
/// target = "L1L2"
/// aliases = ["l1l2"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AliasPatch {
    /// Name of the record to patch.
    pub target: String,
    pub aliases: Vec<String>,
    /// Extend the existing aliases instead of replacing them.
    #[serde(default)]
    pub append: bool,
}

impl AliasPatch {
    pub fn new<I, S>(target: impl Into<String>, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            target: target.into(),
            aliases: aliases.into_iter().map(Into::into).collect(),
            append: false,
        }
    }

    pub fn appending(mut self) -> Self {
        self.append = true;
        self
    }

    /// Parse `TARGET=alias1,alias2` (replace) or `TARGET+=alias1` (append).
    pub fn parse(spec: &str) -> Option<Self> {
        let (target, aliases, append) = if let Some((target, rest)) = spec.split_once("+=") {
            (target, rest, true)
        } else {
            let (target, rest) = spec.split_once('=')?;
            (target, rest, false)
        };
        let target = target.trim();
        if target.is_empty() {
            return None;
        }
        let aliases: Vec<String> = aliases
            .split(',')
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(str::to_string)
            .collect();
        Some(Self {
            target: target.to_string(),
            aliases,
            append,
        })
    }

    /// Apply to one record; returns whether it matched.
    pub fn apply_to(&self, record: &mut ClassRecord) -> bool {
        if record.name != self.target {
            return false;
        }
        if self.append {
            for alias in &self.aliases {
                record.add_alias(alias.clone());
            }
        } else {
            record.set_aliases(self.aliases.iter().cloned());
        }
        true
    }

    /// Apply to every matching record; returns how many matched.
    pub fn apply<'a>(&self, records: impl IntoIterator<Item = &'a mut ClassRecord>) -> usize {
        records
            .into_iter()
            .filter_map(|record| self.apply_to(record).then_some(()))
            .count()
    }
}

/// Apply patches in order.
pub fn apply_patches(records: &mut [ClassRecord], patches: &[AliasPatch]) {
    for patch in patches {
        if patch.apply(records.iter_mut()) == 0 {
            tracing::debug!(record = %patch.target, "alias patch matched no record");
        }
    }
}
