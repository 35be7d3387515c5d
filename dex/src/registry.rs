//! The closed display-name to identifier mapping

use std::collections::HashMap;
use std::sync::OnceLock;

use thiserror::Error;

use crate::{Category, DexId, normalize};

static BUNDLED_DATA: &str = include_str!("../data/dex.json");

static BUNDLED: OnceLock<Dex> = OnceLock::new();

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DexError {
    #[error("Unknown {category} identifier: {name:?}")]
    UnknownIdentifier { category: Category, name: String },

    #[error("Invalid registry data: {0}")]
    InvalidData(String),
}

/// Read-only mapping from cleaned display names to identifiers
#[derive(Debug, Clone, Default)]
pub struct Dex {
    ids: HashMap<String, DexId>,
    names: HashMap<DexId, String>,
    entries: Vec<(Category, String, DexId)>,
}

impl Dex {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a JSON object of `category -> [[display name, id], ...]`
    pub fn from_json(json: &str) -> Result<Self, DexError> {
        let raw: HashMap<String, Vec<(String, u32)>> =
            serde_json::from_str(json).map_err(|e| DexError::InvalidData(e.to_string()))?;

        if let Some(key) = raw.keys().find(|key| Category::parse(key).is_none()) {
            return Err(DexError::InvalidData(format!("unknown category {key:?}")));
        }

        let mut dex = Dex::new();
        for category in Category::all() {
            let Some(entries) = raw.get(category.as_str()) else {
                continue;
            };

            for (name, value) in entries {
                dex.insert(*category, name, *value)?;
            }
        }

        tracing::debug!(
            entries = dex.entries.len(),
            species = dex.count(Category::Species),
            moves = dex.count(Category::Move),
            "Identifier registry built"
        );

        Ok(dex)
    }

    /// Add one `(category, display name, id)` triple.
    ///
    /// Several display names may share an id, but one cleaned key may not
    /// point at two different ids.
    pub fn insert(
        &mut self,
        category: Category,
        name: &str,
        value: u32,
    ) -> Result<DexId, DexError> {
        let cleaned = normalize(Some(name)).ok_or_else(|| {
            DexError::InvalidData(format!("{category} name {name:?} has no registry key"))
        })?;

        let key = format!("{}_{}", category.prefix(), cleaned);
        let id = DexId::new(category, value);

        match self.ids.get(&key) {
            Some(existing) if *existing != id => {
                return Err(DexError::InvalidData(format!(
                    "{key} maps to both {} and {}",
                    existing.value, value
                )));
            }
            Some(_) => {}
            None => {
                self.ids.insert(key, id);
            }
        }

        self.names.entry(id).or_insert_with(|| name.to_string());
        self.entries.push((category, name.to_string(), id));

        Ok(id)
    }

    /// Resolve an optional display name.
    ///
    /// Absent (or empty) names resolve to `Ok(None)`. A present name with no
    /// registry entry is an [`DexError::UnknownIdentifier`].
    pub fn lookup(
        &self,
        name: Option<&str>,
        category: Category,
    ) -> Result<Option<DexId>, DexError> {
        match name.filter(|s| !s.is_empty()) {
            Some(name) => self.resolve(name, category).map(Some),
            None => Ok(None),
        }
    }

    /// Resolve a display name that must be present
    pub fn resolve(&self, name: &str, category: Category) -> Result<DexId, DexError> {
        normalize(Some(name))
            .and_then(|cleaned| self.ids.get(&format!("{}_{}", category.prefix(), cleaned)))
            .copied()
            .ok_or_else(|| DexError::UnknownIdentifier {
                category,
                name: name.to_string(),
            })
    }

    /// First display name registered for an identifier
    pub fn name_of(&self, id: DexId) -> Option<&str> {
        self.names.get(&id).map(|s| s.as_str())
    }

    /// Every `(category, display name, id)` triple, in insertion order
    pub fn entries(&self) -> impl Iterator<Item = (Category, &str, DexId)> {
        self.entries
            .iter()
            .map(|(category, name, id)| (*category, name.as_str(), *id))
    }

    /// Number of triples in one category
    pub fn count(&self, category: Category) -> usize {
        self.entries.iter().filter(|(c, _, _)| *c == category).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The process-wide registry built from the bundled reference data.
///
/// Built on first use. Bundled data that fails to load leaves an empty
/// registry behind (every lookup then reports an unknown identifier).
pub fn dex() -> &'static Dex {
    BUNDLED.get_or_init(|| match Dex::from_json(BUNDLED_DATA) {
        Ok(dex) => dex,
        Err(e) => {
            tracing::error!(error = %e, "Bundled identifier registry failed to load");
            Dex::new()
        }
    })
}

/// Resolve a display name against the bundled registry
pub fn lookup(name: Option<&str>, category: Category) -> Result<Option<DexId>, DexError> {
    dex().lookup(name, category)
}
