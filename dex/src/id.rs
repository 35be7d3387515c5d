//! Stable numeric identifiers

use std::fmt;

use crate::Category;

/// A resolved registry identifier.
///
/// Species, move and ability values pack a base entity id and a forme suffix,
/// so every variant of one entity sorts next to its base forme
/// (`Scizor` is 212000, `Scizor-Mega` is 212001).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DexId {
    pub category: Category,
    pub value: u32,
}

impl DexId {
    pub fn new(category: Category, value: u32) -> Self {
        Self { category, value }
    }

    /// Identifier of the canonical base forme
    pub fn base(&self) -> DexId {
        let divisor = self.category.forme_divisor();
        DexId::new(self.category, self.value / divisor * divisor)
    }

    /// The forme/variant suffix (always 0 for unsuffixed categories)
    pub fn forme(&self) -> u32 {
        self.value % self.category.forme_divisor()
    }

    pub fn is_base_forme(&self) -> bool {
        self.forme() == 0
    }
}

impl fmt::Display for DexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.category.prefix(), self.value)
    }
}
