//! Battle request types
//!
//! A `|request|` payload is JSON. It is first deserialized into the wire
//! structs below, then resolved against the registry into [`BattleRequest`].

use super::battle::{self, HpStatus, Player, PokemonDetails, PokemonIdentifier};
use crate::ParseError;
use anyhow::Result;
use pokeline_dex::{Category, Dex, DexId};
use serde::Deserialize;
use serde::de::IgnoredAny;

/// What the request asks the player to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestType {
    TeamPreview,
    ForceSwitch,
    Active,
    Wait,
}

/// A battle request asking the player to make a decision
#[derive(Debug, Clone, PartialEq)]
pub struct BattleRequest {
    pub request_type: RequestType,
    /// Player's display name
    pub username: String,
    pub player: Player,
    /// Request ID for synchronization
    pub rqid: Option<u64>,
    /// Every pokemon on the player's side
    pub pokemon: Vec<RequestPoke>,
    /// Options per active slot. Only present for [`RequestType::Active`].
    pub active: Option<Vec<ActiveOption>>,
    /// Which slots need to switch (for doubles/triples)
    pub force_switch: Option<Vec<bool>>,
}

impl BattleRequest {
    /// Parse a request from its JSON payload
    pub fn from_json(json: &str, dex: &Dex) -> Result<Self> {
        let raw: RawRequest = serde_json::from_str(json)
            .map_err(|e| ParseError::InvalidFormat(format!("invalid request json: {e}")))?;
        Self::from_raw(raw, dex)
    }

    fn from_raw(raw: RawRequest, dex: &Dex) -> Result<Self> {
        let request_type = if raw.team_preview {
            RequestType::TeamPreview
        } else if raw.force_switch.is_some() {
            RequestType::ForceSwitch
        } else if !raw.active.is_empty() {
            RequestType::Active
        } else {
            RequestType::Wait
        };

        let side = raw
            .side
            .ok_or_else(|| ParseError::MissingField("side".to_string()))?;
        let player = Player::parse(&side.id)
            .ok_or_else(|| ParseError::InvalidFormat(format!("invalid player {:?}", side.id)))?;

        let active = match request_type {
            RequestType::Active => Some(
                raw.active
                    .into_iter()
                    .map(|a| ActiveOption::from_raw(a, dex))
                    .collect::<Result<Vec<_>>>()?,
            ),
            _ => None,
        };

        let pokemon = side
            .pokemon
            .into_iter()
            .map(|p| RequestPoke::from_raw(p, dex))
            .collect::<Result<Vec<_>>>()?;

        Ok(BattleRequest {
            request_type,
            username: side.name,
            player,
            rqid: raw.rqid,
            pokemon,
            active,
            force_switch: raw.force_switch,
        })
    }

    /// Check if this request requires a decision
    pub fn needs_decision(&self) -> bool {
        self.request_type != RequestType::Wait
    }

    /// Check if any slot is forced to switch
    pub fn is_force_switch(&self) -> bool {
        self.force_switch
            .as_ref()
            .map(|fs| fs.iter().any(|&b| b))
            .unwrap_or(false)
    }

    /// Get available pokemon to switch to
    pub fn available_switches(&self) -> Vec<&RequestPoke> {
        self.pokemon
            .iter()
            .filter(|p| !p.active && !p.hp_status.is_fainted())
            .collect()
    }
}

/// Choices for one active slot
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveOption {
    pub moves: Vec<MoveData>,
    pub can_mega: bool,
    pub can_zmove: bool,
    pub can_dynamax: bool,
    pub can_tera: bool,
    pub trapped: bool,
}

impl ActiveOption {
    fn from_raw(raw: RawActive, dex: &Dex) -> Result<Self> {
        let moves = raw
            .moves
            .into_iter()
            .map(|m| MoveData::from_raw(m, dex))
            .collect::<Result<Vec<_>>>()?;

        let can_zmove = match raw.can_z_move {
            Some(serde_json::Value::Array(options)) => !options.is_empty(),
            Some(serde_json::Value::Null) | None => false,
            Some(_) => true,
        };

        Ok(ActiveOption {
            moves,
            can_mega: raw.can_mega_evo,
            can_zmove,
            can_dynamax: raw.can_dynamax,
            can_tera: raw.can_terastallize.is_some_and(|t| !t.is_empty()),
            trapped: raw.trapped,
        })
    }

    /// Get available (non-disabled, with PP) moves
    pub fn available_moves(&self) -> Vec<(usize, &MoveData)> {
        self.moves
            .iter()
            .enumerate()
            .filter(|(_, m)| m.disabled != Some(true) && m.pp.is_none_or(|pp| pp > 0))
            .collect()
    }
}

/// A move slot on an active pokemon. Trapped slots carry only the name and id.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveData {
    /// Display name of the move
    pub name: String,
    pub id: DexId,
    /// Current PP
    pub pp: Option<u32>,
    /// Maximum PP
    pub max_pp: Option<u32>,
    /// Target type (normal, self, allySide, etc.)
    pub target: Option<String>,
    /// A disabled reason string counts as disabled
    pub disabled: Option<bool>,
}

impl MoveData {
    fn from_raw(raw: RawMoveSlot, dex: &Dex) -> Result<Self> {
        Ok(MoveData {
            id: battle::resolve(dex, &raw.id, Category::Move)?,
            name: raw.name,
            pp: raw.pp,
            max_pp: raw.max_pp,
            target: raw.target,
            disabled: raw.disabled.map(|d| match d {
                Disabled::Flag(flag) => flag,
                Disabled::Reason(_) => true,
            }),
        })
    }
}

/// A pokemon on the player's side
#[derive(Debug, Clone, PartialEq)]
pub struct RequestPoke {
    pub ident: PokemonIdentifier,
    pub details: PokemonDetails,
    pub hp_status: HpStatus,
    /// Whether this pokemon is currently active
    pub active: bool,
    pub stats: PokemonStats,
    /// Known moves, without PP
    pub moves: Vec<DexId>,
    pub base_ability: Option<DexId>,
    pub ability: Option<DexId>,
    /// Held item, absent when nothing is held
    pub item: Option<DexId>,
    pub pokeball: Option<String>,
    /// Absent in generations without Commander
    pub commanding: Option<bool>,
    pub reviving: Option<bool>,
    /// The type this pokemon can terastallize into
    pub tera_type: Option<DexId>,
    /// The type this pokemon has terastallized into
    pub terastallized: Option<DexId>,
}

impl RequestPoke {
    fn from_raw(raw: RawSidePokemon, dex: &Dex) -> Result<Self> {
        let moves = raw
            .moves
            .iter()
            .map(|m| battle::resolve(dex, m, Category::Move))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(RequestPoke {
            ident: PokemonIdentifier::parse(&raw.ident)?,
            details: PokemonDetails::parse(&raw.details, dex)?,
            hp_status: HpStatus::parse(&raw.condition, dex)?,
            active: raw.active,
            stats: raw.stats,
            moves,
            base_ability: battle::lookup(dex, raw.base_ability.as_deref(), Category::Ability)?,
            ability: battle::lookup(dex, raw.ability.as_deref(), Category::Ability)?,
            item: battle::lookup(dex, raw.item.as_deref(), Category::Item)?,
            pokeball: raw.pokeball.filter(|p| !p.is_empty()),
            commanding: raw.commanding,
            reviving: raw.reviving,
            tera_type: battle::lookup(dex, raw.tera_type.as_deref(), Category::Type)?,
            terastallized: battle::lookup(dex, raw.terastallized.as_deref(), Category::Type)?,
        })
    }
}

/// Pokemon stats
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct PokemonStats {
    pub atk: u32,
    pub def: u32,
    pub spa: u32,
    pub spd: u32,
    pub spe: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRequest {
    rqid: Option<u64>,

    #[serde(default)]
    active: Vec<RawActive>,

    side: Option<RawSide>,

    #[serde(default)]
    force_switch: Option<Vec<bool>>,

    #[serde(default)]
    team_preview: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawActive {
    #[serde(default)]
    moves: Vec<RawMoveSlot>,

    #[serde(default)]
    trapped: bool,

    #[serde(default)]
    can_mega_evo: bool,

    #[serde(default, rename = "canZMove")]
    can_z_move: Option<serde_json::Value>,

    #[serde(default)]
    can_dynamax: bool,

    #[serde(default)]
    can_terastallize: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawMoveSlot {
    #[serde(rename = "move")]
    name: String,

    id: String,

    #[serde(default)]
    pp: Option<u32>,

    #[serde(default, rename = "maxpp")]
    max_pp: Option<u32>,

    #[serde(default)]
    target: Option<String>,

    #[serde(default)]
    disabled: Option<Disabled>,
}

/// `disabled` is either a flag or the name of the disabling effect
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Disabled {
    Flag(bool),
    Reason(IgnoredAny),
}

#[derive(Debug, Deserialize)]
struct RawSide {
    name: String,
    id: String,

    #[serde(default)]
    pokemon: Vec<RawSidePokemon>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSidePokemon {
    ident: String,
    details: String,
    condition: String,

    #[serde(default)]
    active: bool,

    #[serde(default)]
    stats: PokemonStats,

    #[serde(default)]
    moves: Vec<String>,

    #[serde(default)]
    base_ability: Option<String>,

    #[serde(default)]
    ability: Option<String>,

    #[serde(default)]
    item: Option<String>,

    #[serde(default)]
    pokeball: Option<String>,

    #[serde(default)]
    commanding: Option<bool>,

    #[serde(default)]
    reviving: Option<bool>,

    #[serde(default)]
    tera_type: Option<String>,

    #[serde(default)]
    terastallized: Option<String>,
}
