//! Shared types for battle protocol messages

use pokeline_dex::{Category, Dex, DexId};

use super::line::Line;
use crate::ParseError;

/// Player in a battle (p1, p2, p3, p4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    P1,
    P2,
    P3,
    P4,
}

impl Player {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "p1" => Some(Player::P1),
            "p2" => Some(Player::P2),
            "p3" => Some(Player::P3),
            "p4" => Some(Player::P4),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Player::P1 => "p1",
            Player::P2 => "p2",
            Player::P3 => "p3",
            Player::P4 => "p4",
        }
    }

    /// Parse the player prefix of a side or identifier string (`p1: Red` gives `P1`)
    pub fn from_prefix(s: &str) -> Option<Self> {
        s.get(..2).and_then(Player::parse)
    }
}

/// Pokemon identifier in the form "POSITION: NAME" (e.g., "p1a: Pikachu")
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PokemonIdentifier {
    /// Player who owns this pokemon
    pub player: Player,
    /// Position letter (a, b, c), absent when the identifier carried no slot
    pub slot: Option<char>,
    /// Upper-cased nickname
    pub identity: String,
}

impl PokemonIdentifier {
    /// Parse either form, picking the slotted parser when the position part is 3 characters
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        let position = s.split(':').next().unwrap_or_default();
        if position.chars().count() == 3 {
            Self::from_slotted(s)
        } else {
            Self::from_unslotted(s)
        }
    }

    /// Parse "p1a: Arcanine"
    pub fn from_slotted(s: &str) -> Result<Self, ParseError> {
        let (position, identity) = split_identifier(s)?;
        let mut chars = position.chars();
        let player = chars.by_ref().take(2).collect::<String>();
        let player = Player::parse(&player).ok_or_else(|| malformed(s))?;
        let slot = chars.next();

        Ok(PokemonIdentifier {
            player,
            slot,
            identity,
        })
    }

    /// Parse "p1: Arcanine"
    pub fn from_unslotted(s: &str) -> Result<Self, ParseError> {
        let (position, identity) = split_identifier(s)?;
        let player = Player::parse(position.trim()).ok_or_else(|| malformed(s))?;

        Ok(PokemonIdentifier {
            player,
            slot: None,
            identity,
        })
    }
}

fn split_identifier(s: &str) -> Result<(&str, String), ParseError> {
    let (position, identity) = s.split_once(':').ok_or_else(|| malformed(s))?;
    Ok((position, identity.trim().to_uppercase()))
}

fn malformed(s: &str) -> ParseError {
    ParseError::MalformedIdentifier(s.to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
}

/// Pokemon details string (species, level, gender, shiny, tera)
#[derive(Debug, Clone, PartialEq)]
pub struct PokemonDetails {
    pub species: DexId,
    pub level: u8,
    pub gender: Option<Gender>,
    pub shiny: bool,
    pub tera_type: Option<DexId>,
}

impl PokemonDetails {
    /// Parse a details string like "Pikachu, L50, M, shiny" or "Arceus-*"
    pub fn parse(s: &str, dex: &Dex) -> anyhow::Result<Self> {
        let mut tokens = s.split(',').map(str::trim);

        let species = tokens
            .next()
            .filter(|species| !species.is_empty())
            .ok_or_else(|| ParseError::MissingField("species".to_string()))?;

        let mut details = PokemonDetails {
            species: resolve(dex, species, Category::Species)?,
            level: 100,
            gender: None,
            shiny: false,
            tera_type: None,
        };

        for token in tokens {
            if let Some(tera) = token.strip_prefix("tera:") {
                details.tera_type = lookup(dex, Some(tera.trim()), Category::Type)?;
            } else if token == "shiny" {
                details.shiny = true;
            } else if let Some(level) = token.strip_prefix('L') {
                details.level = level
                    .parse()
                    .map_err(|_| ParseError::InvalidFormat(format!("invalid level {token:?}")))?;
            } else if token == "M" {
                details.gender = Some(Gender::Male);
            } else if token == "F" {
                details.gender = Some(Gender::Female);
            }
        }

        Ok(details)
    }
}

/// HP and status condition (e.g., "100/100", "50/100 slp", "0 fnt")
#[derive(Debug, Clone, PartialEq)]
pub struct HpStatus {
    /// Current HP (as raw value or percentage depending on context)
    pub current: u32,
    /// Max HP. Absent when the pokemon has fainted, not when it is at full HP.
    pub max: Option<u32>,
    pub status: Option<DexId>,
}

impl HpStatus {
    /// Parse an HP status string like "100/100", "50/100 slp", or "0 fnt"
    pub fn parse(s: &str, dex: &Dex) -> anyhow::Result<Self> {
        let s = s.trim();
        let (hp_part, rest) = s.split_once(' ').unwrap_or((s, ""));
        let status = rest.split_whitespace().next();

        let invalid = || ParseError::InvalidFormat(format!("invalid hp {hp_part:?}"));

        let (current, max) = match hp_part.split_once('/') {
            Some((current, max)) => (
                current.parse().map_err(|_| invalid())?,
                Some(max.parse().map_err(|_| invalid())?),
            ),
            None => (hp_part.parse().map_err(|_| invalid())?, None),
        };

        Ok(HpStatus {
            current,
            max,
            status: lookup(dex, status, Category::Status)?,
        })
    }

    pub fn is_fainted(&self) -> bool {
        self.max.is_none()
    }
}

/// Game type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameType {
    Singles,
    Doubles,
    Triples,
    Multi,
    FreeForAll,
}

impl GameType {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "singles" => Some(GameType::Singles),
            "doubles" => Some(GameType::Doubles),
            "triples" => Some(GameType::Triples),
            "multi" => Some(GameType::Multi),
            "freeforall" => Some(GameType::FreeForAll),
            _ => None,
        }
    }
}

/// Stat abbreviation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stat {
    Hp,
    Atk,
    Def,
    Spa,
    Spd,
    Spe,
    Accuracy,
    Evasion,
}

impl Stat {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "hp" => Some(Stat::Hp),
            "atk" => Some(Stat::Atk),
            "def" => Some(Stat::Def),
            "spa" => Some(Stat::Spa),
            "spd" => Some(Stat::Spd),
            "spe" => Some(Stat::Spe),
            "accuracy" => Some(Stat::Accuracy),
            "evasion" => Some(Stat::Evasion),
            _ => None,
        }
    }
}

/// A player's avatar: a numbered sprite or a custom name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Avatar {
    Id(u32),
    Custom(String),
}

impl Avatar {
    pub fn parse(s: &str) -> Self {
        match s.parse() {
            Ok(id) => Avatar::Id(id),
            Err(_) => Avatar::Custom(s.to_string()),
        }
    }
}

/// The category of an effect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectType {
    Ability,
    Item,
    Move,
    Status,
    Weather,
    Condition,
    Volatile,
    Pokemon,
}

impl EffectType {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ability" => Some(EffectType::Ability),
            "item" => Some(EffectType::Item),
            "move" => Some(EffectType::Move),
            "status" => Some(EffectType::Status),
            "weather" => Some(EffectType::Weather),
            "condition" => Some(EffectType::Condition),
            "volatile" => Some(EffectType::Volatile),
            "pokemon" => Some(EffectType::Pokemon),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EffectType::Ability => "ability",
            EffectType::Item => "item",
            EffectType::Move => "move",
            EffectType::Status => "status",
            EffectType::Weather => "weather",
            EffectType::Condition => "condition",
            EffectType::Volatile => "volatile",
            EffectType::Pokemon => "pokemon",
        }
    }
}

/// What caused an observed outcome
#[derive(Debug, Clone, PartialEq)]
pub struct Effect {
    pub effect_type: Option<EffectType>,
    /// Never empty
    pub name: String,
    /// The effect acted upon, when two causes are named
    pub secondary: Option<String>,
    /// The pokemon the effect came from (`[of]`)
    pub source: Option<PokemonIdentifier>,
}

impl Effect {
    pub fn new(effect_type: Option<EffectType>, name: &str) -> Result<Self, ParseError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ParseError::MissingField("effect name".to_string()));
        }

        Ok(Effect {
            effect_type,
            name: name.to_string(),
            secondary: None,
            source: None,
        })
    }

    /// Parse a `TYPE: NAME` clause. Without a colon the whole text is the name
    /// and `default` is the type.
    pub fn from_clause(text: &str, default: Option<EffectType>) -> Result<Self, ParseError> {
        match text.split_once(':') {
            Some((label, name)) => {
                let effect_type = EffectType::parse(label).ok_or_else(|| {
                    ParseError::InvalidFormat(format!("unknown effect type {:?}", label.trim()))
                })?;
                Effect::new(Some(effect_type), name)
            }
            None => Effect::new(default, text),
        }
    }

    pub fn with_secondary(mut self, secondary: Option<&str>) -> Self {
        self.secondary = secondary
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        self
    }

    pub fn with_source(mut self, source: Option<PokemonIdentifier>) -> Self {
        self.source = source;
        self
    }
}

/// Resolve a display name that must be in the registry
pub fn resolve(dex: &Dex, name: &str, category: Category) -> Result<DexId, ParseError> {
    Ok(dex.resolve(name.trim(), category)?)
}

/// Resolve an optional display name (absent or empty stays absent)
pub fn lookup(
    dex: &Dex,
    name: Option<&str>,
    category: Category,
) -> Result<Option<DexId>, ParseError> {
    Ok(dex.lookup(name.map(str::trim), category)?)
}

/// Helper to parse a required PokemonIdentifier from a positional field
pub fn parse_pokemon(line: &Line, index: usize) -> anyhow::Result<PokemonIdentifier> {
    let field = line.require(index, "pokemon")?;
    Ok(PokemonIdentifier::parse(field)?)
}

/// Helper to parse an optional PokemonIdentifier (`""` and `null` are absent)
pub fn parse_opt_pokemon(line: &Line, index: usize) -> anyhow::Result<Option<PokemonIdentifier>> {
    match line.opt_arg(index) {
        Some("null") | None => Ok(None),
        Some(field) => Ok(Some(PokemonIdentifier::parse(field)?)),
    }
}

/// Helper to parse PokemonDetails from a positional field
pub fn parse_details(line: &Line, index: usize, dex: &Dex) -> anyhow::Result<PokemonDetails> {
    PokemonDetails::parse(line.require(index, "details")?, dex)
}

/// Helper to parse HpStatus from a positional field
pub fn parse_hp_status(line: &Line, index: usize, dex: &Dex) -> anyhow::Result<HpStatus> {
    HpStatus::parse(line.require(index, "hp status")?, dex)
}

pub fn parse_opt_hp_status(
    line: &Line,
    index: usize,
    dex: &Dex,
) -> anyhow::Result<Option<HpStatus>> {
    line.opt_arg(index)
        .map(|s| HpStatus::parse(s, dex))
        .transpose()
}

/// Helper to parse a required integer field
pub fn parse_number<T: std::str::FromStr>(
    line: &Line,
    index: usize,
    name: &str,
) -> anyhow::Result<T> {
    let field = line.require(index, name)?;
    field
        .parse()
        .map_err(|_| ParseError::InvalidFormat(format!("invalid {name} {field:?}")).into())
}

/// The `[of]` source, if any
pub fn parse_source(line: &Line) -> anyhow::Result<Option<PokemonIdentifier>> {
    line.tag("of")
        .filter(|s| !s.is_empty())
        .map(PokemonIdentifier::parse)
        .transpose()
        .map_err(Into::into)
}

/// The `[from]` clause with its `[of]` source, if any
pub fn parse_from(line: &Line, default: Option<EffectType>) -> anyhow::Result<Option<Effect>> {
    let Some(from) = line.tag("from") else {
        return Ok(None);
    };

    let effect = Effect::from_clause(from, default)?.with_source(parse_source(line)?);
    Ok(Some(effect))
}

/// Strip a `label: ` prefix (`move: Protect` gives `Protect`)
pub fn strip_label(s: &str) -> &str {
    s.split_once(':').map(|(_, name)| name).unwrap_or(s).trim()
}
