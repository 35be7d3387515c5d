//! Registry categories and their key prefixes

use std::fmt;

/// A closed family of identifiers in the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Category {
    Ability,
    Condition,
    Gen,
    Item,
    Move,
    MoveCategory,
    MoveTarget,
    Nature,
    Species,
    Stat,
    Status,
    Type,
    Weather,
}

impl Category {
    /// All 13 categories, in registry order
    pub const ALL: [Category; 13] = [
        Category::Ability,
        Category::Condition,
        Category::Gen,
        Category::Item,
        Category::Move,
        Category::MoveCategory,
        Category::MoveTarget,
        Category::Nature,
        Category::Species,
        Category::Stat,
        Category::Status,
        Category::Type,
        Category::Weather,
    ];

    pub fn all() -> &'static [Category] {
        &Self::ALL
    }

    /// Prefix of every registry key in this category (`POKEMON` in `POKEMON_TOXICROAK`)
    pub fn prefix(&self) -> &'static str {
        match self {
            Category::Ability => "ABILITY",
            Category::Condition => "CONDITION",
            Category::Gen => "GEN",
            Category::Item => "ITEM",
            Category::Move => "MOVE",
            Category::MoveCategory => "MOVECATEGORY",
            Category::MoveTarget => "MOVETARGET",
            Category::Nature => "NATURE",
            Category::Species => "POKEMON",
            Category::Stat => "STAT",
            Category::Status => "STATUS",
            Category::Type => "TYPE",
            Category::Weather => "WEATHER",
        }
    }

    /// Key of this category in the bundled data file
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Ability => "ability",
            Category::Condition => "condition",
            Category::Gen => "gen",
            Category::Item => "item",
            Category::Move => "move",
            Category::MoveCategory => "move_category",
            Category::MoveTarget => "move_target",
            Category::Nature => "nature",
            Category::Species => "species",
            Category::Stat => "stat",
            Category::Status => "status",
            Category::Type => "type",
            Category::Weather => "weather",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.as_str() == s)
    }

    /// Divisor separating the base id from the forme suffix.
    ///
    /// Species carry a 3-digit forme suffix, moves and abilities a 2-digit one.
    /// Every other category has no suffix.
    pub fn forme_divisor(&self) -> u32 {
        match self {
            Category::Species => 1000,
            Category::Move | Category::Ability => 100,
            _ => 1,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixes_are_distinct() {
        let mut prefixes: Vec<&str> = Category::ALL.iter().map(|c| c.prefix()).collect();
        prefixes.sort();
        prefixes.dedup();
        assert_eq!(prefixes.len(), Category::ALL.len());
    }

    #[test]
    fn test_parse_round_trip() {
        for category in Category::all() {
            assert_eq!(Category::parse(category.as_str()), Some(*category));
        }
        assert_eq!(Category::parse("pokedex"), None);
    }

    #[test]
    fn test_species_prefix() {
        assert_eq!(Category::Species.prefix(), "POKEMON");
        assert_eq!(Category::MoveTarget.prefix(), "MOVETARGET");
    }
}
