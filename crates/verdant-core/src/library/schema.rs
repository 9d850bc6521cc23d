use crate::model::ReagentFactor;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// On-disk shape of a reagent library file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReagentLibraryDef {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub version: String,
    pub reagents: Vec<ReagentFactor>,
}

/// A validated library with a case-insensitive name index.
#[derive(Debug, Clone)]
pub struct ReagentLibrary {
    name: String,
    version: String,
    reagents: Vec<ReagentFactor>,
    index: BTreeMap<String, usize>,
}

pub(crate) fn index_key(name: &str) -> String {
    name.trim().to_lowercase()
}

impl ReagentLibrary {
    /// Build from an already-validated definition.
    pub(crate) fn from_def(def: ReagentLibraryDef) -> Self {
        let index = def
            .reagents
            .iter()
            .enumerate()
            .map(|(i, r)| (index_key(&r.name), i))
            .collect();
        Self {
            name: def.name,
            version: def.version,
            reagents: def.reagents,
            index,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn len(&self) -> usize {
        self.reagents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reagents.is_empty()
    }

    /// Reagents in file order.
    pub fn reagents(&self) -> &[ReagentFactor] {
        &self.reagents
    }

    pub fn get(&self, name: &str) -> Option<&ReagentFactor> {
        self.index
            .get(&index_key(name))
            .and_then(|&i| self.reagents.get(i))
    }

    /// Layer `other` over this library. Entries in `other` replace same-named
    /// entries here; new names are appended.
    pub fn merged_with(&self, other: &ReagentLibrary) -> ReagentLibrary {
        let mut reagents = self.reagents.clone();
        let mut index = self.index.clone();
        for reagent in &other.reagents {
            let key = index_key(&reagent.name);
            match index.get(&key) {
                Some(&i) => reagents[i] = reagent.clone(),
                None => {
                    index.insert(key, reagents.len());
                    reagents.push(reagent.clone());
                }
            }
        }
        ReagentLibrary {
            name: format!("{} + {}", self.name, other.name),
            version: other.version.clone(),
            reagents,
            index,
        }
    }
}
