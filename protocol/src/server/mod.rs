mod tests;

pub mod battle;
mod battle_init;
mod battle_major;
mod battle_minor;
mod battle_progress;
mod battle_room;
pub mod general;
mod global;
mod kind;
pub mod line;
pub mod request;
mod room;

pub use battle::{
    Avatar, Effect, EffectType, GameType, Gender, HpStatus, Player, PokemonDetails,
    PokemonIdentifier, Stat,
};
pub use kind::{ErrorState, MessageKind};
pub use request::{ActiveOption, BattleRequest, MoveData, RequestPoke, RequestType};

use crate::ParseError;
use anyhow::Result;
use line::Line;
use pokeline_dex::{Dex, DexId};

/// One parsed battle line
#[derive(Debug, Clone, PartialEq)]
pub struct BattleMessage {
    /// The line as received, without its trailing newline
    pub raw: String,
    pub event: BattleEvent,
}

impl BattleMessage {
    pub fn kind(&self) -> MessageKind {
        self.event.kind()
    }

    pub fn error_state(&self) -> Option<ErrorState> {
        match &self.event {
            BattleEvent::Unknown { error, .. } => Some(*error),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.error_state().is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BattleEvent {
    // Initialization
    BattlePlayer {
        player: Player,
        username: String,
        avatar: Option<Avatar>,
        rating: Option<u32>,
    },
    TeamSize {
        player: Player,
        size: u32,
    },
    GameType(GameType),
    Gen(DexId),
    Tier(String),
    Rated(Option<String>),
    Rule {
        name: String,
        description: String,
    },
    ClearPoke,
    Poke {
        player: Player,
        details: PokemonDetails,
        has_item: bool,
    },
    BattleStart,
    TeamPreview(Option<u32>),

    // Progress
    Request(Box<BattleRequest>),
    Inactive(String),
    InactiveOff(String),
    Upkeep,
    Turn(u32),
    Win(String),
    Tie,
    Expire,
    Timestamp(i64),

    // Major actions
    Move {
        pokemon: PokemonIdentifier,
        move_name: String,
        target: Option<PokemonIdentifier>,
        miss: bool,
        still: bool,
        anim: Option<String>,
        effect: Option<Effect>,
    },
    Switch {
        pokemon: PokemonIdentifier,
        details: PokemonDetails,
        hp_status: HpStatus,
    },
    Drag {
        pokemon: PokemonIdentifier,
        details: PokemonDetails,
        hp_status: HpStatus,
    },
    DetailsChange {
        pokemon: PokemonIdentifier,
        details: PokemonDetails,
        hp_status: Option<HpStatus>,
    },
    Replace {
        pokemon: PokemonIdentifier,
        details: PokemonDetails,
        hp_status: Option<HpStatus>,
    },
    Swap {
        pokemon: PokemonIdentifier,
        position: u8,
        effect: Option<Effect>,
    },
    Cant {
        pokemon: PokemonIdentifier,
        reason: String,
        move_name: Option<String>,
    },
    Faint(PokemonIdentifier),

    // Minor actions
    Fail {
        pokemon: PokemonIdentifier,
        effect: Option<Effect>,
    },
    Block {
        pokemon: PokemonIdentifier,
        effect: Effect,
        move_name: Option<String>,
    },
    NoTarget(Option<PokemonIdentifier>),
    Miss {
        source: PokemonIdentifier,
        target: Option<PokemonIdentifier>,
    },
    Damage {
        pokemon: PokemonIdentifier,
        hp_status: HpStatus,
        effect: Option<Effect>,
    },
    Heal {
        pokemon: PokemonIdentifier,
        hp_status: HpStatus,
        effect: Option<Effect>,
    },
    SetHp {
        pokemon: PokemonIdentifier,
        hp_status: HpStatus,
        effect: Option<Effect>,
    },
    Status {
        pokemon: PokemonIdentifier,
        status: DexId,
        effect: Option<Effect>,
    },
    CureStatus {
        pokemon: PokemonIdentifier,
        status: DexId,
        effect: Option<Effect>,
    },
    CureTeam(Effect),
    Boost {
        pokemon: PokemonIdentifier,
        stat: Stat,
        amount: i32,
        effect: Option<Effect>,
    },
    Unboost {
        pokemon: PokemonIdentifier,
        stat: Stat,
        amount: i32,
        effect: Option<Effect>,
    },
    SetBoost {
        pokemon: PokemonIdentifier,
        stat: Stat,
        amount: i32,
        effect: Option<Effect>,
    },
    SwapBoost {
        source: PokemonIdentifier,
        target: PokemonIdentifier,
        stats: Vec<Stat>,
        effect: Option<Effect>,
    },
    InvertBoost {
        pokemon: PokemonIdentifier,
        effect: Option<Effect>,
    },
    ClearBoost {
        pokemon: PokemonIdentifier,
        effect: Option<Effect>,
    },
    ClearAllBoost,
    ClearPositiveBoost {
        pokemon: PokemonIdentifier,
        effect: Effect,
    },
    ClearNegativeBoost {
        pokemon: PokemonIdentifier,
        effect: Option<Effect>,
    },
    CopyBoost {
        source: PokemonIdentifier,
        target: PokemonIdentifier,
        effect: Option<Effect>,
    },
    Weather {
        weather: DexId,
        upkeep: bool,
        effect: Option<Effect>,
    },
    FieldStart(Effect),
    FieldEnd(Effect),
    SideStart {
        player: Player,
        condition: String,
    },
    SideEnd {
        player: Player,
        condition: String,
        effect: Option<Effect>,
    },
    SwapSideConditions,
    VolatileStart {
        pokemon: PokemonIdentifier,
        effect: Effect,
    },
    VolatileEnd {
        pokemon: PokemonIdentifier,
        effect: Effect,
        silent: bool,
    },
    Crit(PokemonIdentifier),
    SuperEffective(PokemonIdentifier),
    Resisted(PokemonIdentifier),
    Immune {
        pokemon: PokemonIdentifier,
        effect: Option<Effect>,
    },
    Item {
        pokemon: PokemonIdentifier,
        item: String,
        effect: Option<Effect>,
    },
    EndItem {
        pokemon: PokemonIdentifier,
        item: String,
        eat: bool,
        effect: Option<Effect>,
    },
    Ability {
        pokemon: PokemonIdentifier,
        ability: DexId,
        effect: Option<Effect>,
    },
    EndAbility {
        pokemon: PokemonIdentifier,
        effect: Option<Effect>,
    },
    Transform {
        source: PokemonIdentifier,
        target: PokemonIdentifier,
        effect: Option<Effect>,
    },
    Mega {
        pokemon: PokemonIdentifier,
        species: DexId,
        megastone: Option<String>,
    },
    Primal {
        pokemon: PokemonIdentifier,
        item: Option<String>,
    },
    Burst {
        pokemon: PokemonIdentifier,
        species: DexId,
        item: Option<String>,
    },
    ZPower(PokemonIdentifier),
    ZBroken(PokemonIdentifier),
    Activate {
        pokemon: Option<PokemonIdentifier>,
        effect: Effect,
    },
    Hint(String),
    Center,
    Message(String),
    Combine,
    Waiting {
        source: PokemonIdentifier,
        target: PokemonIdentifier,
    },
    Prepare {
        attacker: PokemonIdentifier,
        move_name: String,
        defender: Option<PokemonIdentifier>,
    },
    MustRecharge(PokemonIdentifier),
    Nothing,
    HitCount {
        pokemon: PokemonIdentifier,
        count: u32,
    },
    SingleMove {
        pokemon: PokemonIdentifier,
        move_id: DexId,
    },
    SingleTurn {
        pokemon: PokemonIdentifier,
        move_id: DexId,
    },
    FormeChange {
        pokemon: PokemonIdentifier,
        species: DexId,
        hp_status: Option<HpStatus>,
        effect: Option<Effect>,
    },
    Terastallize {
        pokemon: PokemonIdentifier,
        tera_type: DexId,
    },
    FieldActivate(Effect),
    Anim {
        source: PokemonIdentifier,
        move_id: DexId,
        target: Option<PokemonIdentifier>,
        notarget: bool,
    },

    // Room
    Error(String),
    BigError(String),
    Init(Option<String>),
    Deinit,
    Title(String),
    Join(String),
    Leave(String),
    Raw(String),

    Empty,
    Unknown {
        error: ErrorState,
        /// What went wrong, for diagnostics
        detail: Option<String>,
    },
}

impl BattleEvent {
    pub fn kind(&self) -> MessageKind {
        match self {
            BattleEvent::BattlePlayer { .. } => MessageKind::Player,
            BattleEvent::TeamSize { .. } => MessageKind::TeamSize,
            BattleEvent::GameType(_) => MessageKind::GameType,
            BattleEvent::Gen(_) => MessageKind::Gen,
            BattleEvent::Tier(_) => MessageKind::Tier,
            BattleEvent::Rated(_) => MessageKind::Rated,
            BattleEvent::Rule { .. } => MessageKind::Rule,
            BattleEvent::ClearPoke => MessageKind::ClearPoke,
            BattleEvent::Poke { .. } => MessageKind::Poke,
            BattleEvent::BattleStart => MessageKind::Start,
            BattleEvent::TeamPreview(_) => MessageKind::TeamPreview,
            BattleEvent::Request(_) => MessageKind::Request,
            BattleEvent::Inactive(_) => MessageKind::Inactive,
            BattleEvent::InactiveOff(_) => MessageKind::InactiveOff,
            BattleEvent::Upkeep => MessageKind::Upkeep,
            BattleEvent::Turn(_) => MessageKind::Turn,
            BattleEvent::Win(_) => MessageKind::Win,
            BattleEvent::Tie => MessageKind::Tie,
            BattleEvent::Expire => MessageKind::Expire,
            BattleEvent::Timestamp(_) => MessageKind::Timestamp,
            BattleEvent::Move { .. } => MessageKind::Move,
            BattleEvent::Switch { .. } => MessageKind::Switch,
            BattleEvent::Drag { .. } => MessageKind::Drag,
            BattleEvent::DetailsChange { .. } => MessageKind::DetailsChange,
            BattleEvent::Replace { .. } => MessageKind::Replace,
            BattleEvent::Swap { .. } => MessageKind::Swap,
            BattleEvent::Cant { .. } => MessageKind::Cant,
            BattleEvent::Faint(_) => MessageKind::Faint,
            BattleEvent::Fail { .. } => MessageKind::Fail,
            BattleEvent::Block { .. } => MessageKind::Block,
            BattleEvent::NoTarget(_) => MessageKind::NoTarget,
            BattleEvent::Miss { .. } => MessageKind::Miss,
            BattleEvent::Damage { .. } => MessageKind::Damage,
            BattleEvent::Heal { .. } => MessageKind::Heal,
            BattleEvent::SetHp { .. } => MessageKind::SetHp,
            BattleEvent::Status { .. } => MessageKind::Status,
            BattleEvent::CureStatus { .. } => MessageKind::CureStatus,
            BattleEvent::CureTeam(_) => MessageKind::CureTeam,
            BattleEvent::Boost { .. } => MessageKind::Boost,
            BattleEvent::Unboost { .. } => MessageKind::Unboost,
            BattleEvent::SetBoost { .. } => MessageKind::SetBoost,
            BattleEvent::SwapBoost { .. } => MessageKind::SwapBoost,
            BattleEvent::InvertBoost { .. } => MessageKind::InvertBoost,
            BattleEvent::ClearBoost { .. } => MessageKind::ClearBoost,
            BattleEvent::ClearAllBoost => MessageKind::ClearAllBoost,
            BattleEvent::ClearPositiveBoost { .. } => MessageKind::ClearPositiveBoost,
            BattleEvent::ClearNegativeBoost { .. } => MessageKind::ClearNegativeBoost,
            BattleEvent::CopyBoost { .. } => MessageKind::CopyBoost,
            BattleEvent::Weather { .. } => MessageKind::Weather,
            BattleEvent::FieldStart(_) => MessageKind::FieldStart,
            BattleEvent::FieldEnd(_) => MessageKind::FieldEnd,
            BattleEvent::SideStart { .. } => MessageKind::SideStart,
            BattleEvent::SideEnd { .. } => MessageKind::SideEnd,
            BattleEvent::SwapSideConditions => MessageKind::SwapSideConditions,
            BattleEvent::VolatileStart { .. } => MessageKind::VolatileStart,
            BattleEvent::VolatileEnd { .. } => MessageKind::VolatileEnd,
            BattleEvent::Crit(_) => MessageKind::Crit,
            BattleEvent::SuperEffective(_) => MessageKind::SuperEffective,
            BattleEvent::Resisted(_) => MessageKind::Resisted,
            BattleEvent::Immune { .. } => MessageKind::Immune,
            BattleEvent::Item { .. } => MessageKind::Item,
            BattleEvent::EndItem { .. } => MessageKind::EndItem,
            BattleEvent::Ability { .. } => MessageKind::Ability,
            BattleEvent::EndAbility { .. } => MessageKind::EndAbility,
            BattleEvent::Transform { .. } => MessageKind::Transform,
            BattleEvent::Mega { .. } => MessageKind::Mega,
            BattleEvent::Primal { .. } => MessageKind::Primal,
            BattleEvent::Burst { .. } => MessageKind::Burst,
            BattleEvent::ZPower(_) => MessageKind::ZPower,
            BattleEvent::ZBroken(_) => MessageKind::ZBroken,
            BattleEvent::Activate { .. } => MessageKind::Activate,
            BattleEvent::Hint(_) => MessageKind::Hint,
            BattleEvent::Center => MessageKind::Center,
            BattleEvent::Message(_) => MessageKind::Message,
            BattleEvent::Combine => MessageKind::Combine,
            BattleEvent::Waiting { .. } => MessageKind::Waiting,
            BattleEvent::Prepare { .. } => MessageKind::Prepare,
            BattleEvent::MustRecharge(_) => MessageKind::MustRecharge,
            BattleEvent::Nothing => MessageKind::Nothing,
            BattleEvent::HitCount { .. } => MessageKind::HitCount,
            BattleEvent::SingleMove { .. } => MessageKind::SingleMove,
            BattleEvent::SingleTurn { .. } => MessageKind::SingleTurn,
            BattleEvent::FormeChange { .. } => MessageKind::FormeChange,
            BattleEvent::Terastallize { .. } => MessageKind::Terastallize,
            BattleEvent::FieldActivate(_) => MessageKind::FieldActivate,
            BattleEvent::Anim { .. } => MessageKind::Anim,
            BattleEvent::Error(_) => MessageKind::Error,
            BattleEvent::BigError(_) => MessageKind::BigError,
            BattleEvent::Init(_) => MessageKind::Init,
            BattleEvent::Deinit => MessageKind::Deinit,
            BattleEvent::Title(_) => MessageKind::Title,
            BattleEvent::Join(_) => MessageKind::Join,
            BattleEvent::Leave(_) => MessageKind::Leave,
            BattleEvent::Raw(_) => MessageKind::Raw,
            BattleEvent::Empty => MessageKind::Empty,
            BattleEvent::Unknown { .. } => MessageKind::Unknown,
        }
    }
}

/// Parses battle lines against one identifier registry
#[derive(Debug, Clone, Copy)]
pub struct Parser<'d> {
    dex: &'d Dex,
}

impl Default for Parser<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser<'static> {
    /// A parser using the bundled registry
    pub fn new() -> Self {
        Parser {
            dex: pokeline_dex::dex(),
        }
    }
}

impl<'d> Parser<'d> {
    pub fn with_dex(dex: &'d Dex) -> Self {
        Parser { dex }
    }

    pub fn dex(&self) -> &'d Dex {
        self.dex
    }

    /// Classify a line without extracting its fields
    pub fn classify(&self, line: &str) -> MessageKind {
        classify(line)
    }

    /// Parse one line. Never fails: problems are reported through
    /// [`BattleMessage::error_state`].
    pub fn parse(&self, line: &str) -> BattleMessage {
        let raw = line.trim_end_matches(['\r', '\n']);
        let event = self.parse_event(raw);

        BattleMessage {
            raw: raw.to_string(),
            event,
        }
    }

    fn parse_event(&self, raw: &str) -> BattleEvent {
        let line = Line::new(raw);
        let kind = classify(raw);
        if kind == MessageKind::Unknown {
            let kind = line.kind.unwrap_or_default();
            tracing::debug!(kind, line = raw, "Unknown message kind");
            return BattleEvent::Unknown {
                error: ErrorState::UnknownKind,
                detail: line.kind.map(str::to_string),
            };
        }

        match extract(kind, &line, self.dex) {
            Ok(event) => event,
            Err(e) => {
                let error = match e.downcast_ref::<ParseError>() {
                    Some(ParseError::NotImplemented(_)) => ErrorState::NotImplemented,
                    _ => ErrorState::ParseError,
                };
                tracing::warn!(kind = %kind, error = %e, line = raw, "Failed to extract message");

                BattleEvent::Unknown {
                    error,
                    detail: Some(e.to_string()),
                }
            }
        }
    }
}

/// Classify a line by its kind tag.
///
/// Blank lines and `request` lines with no payload are [`MessageKind::Empty`].
pub fn classify(line: &str) -> MessageKind {
    if line.trim().is_empty() {
        return MessageKind::Empty;
    }

    let line = Line::new(line);
    match line.kind.and_then(MessageKind::from_tag) {
        Some(MessageKind::Request) if line.field(0).unwrap_or_default().trim().is_empty() => {
            MessageKind::Empty
        }
        Some(kind) => kind,
        None => MessageKind::Unknown,
    }
}

/// Parse one line with the bundled registry
pub fn parse(line: &str) -> BattleMessage {
    Parser::new().parse(line)
}

fn extract(kind: MessageKind, line: &Line, dex: &Dex) -> Result<BattleEvent> {
    match kind {
        MessageKind::Player => battle_init::parse_player(line, dex),
        MessageKind::TeamSize => battle_init::parse_teamsize(line, dex),
        MessageKind::GameType => battle_init::parse_gametype(line, dex),
        MessageKind::Gen => battle_init::parse_gen(line, dex),
        MessageKind::Tier => battle_init::parse_tier(line, dex),
        MessageKind::Rated => battle_init::parse_rated(line, dex),
        MessageKind::Rule => battle_init::parse_rule(line, dex),
        MessageKind::ClearPoke => battle_init::parse_clearpoke(line, dex),
        MessageKind::Poke => battle_init::parse_poke(line, dex),
        MessageKind::Start => battle_init::parse_start(line, dex),
        MessageKind::TeamPreview => battle_init::parse_teampreview(line, dex),
        MessageKind::Request => battle_progress::parse_request(line, dex),
        MessageKind::Inactive => battle_progress::parse_inactive(line, dex),
        MessageKind::InactiveOff => battle_progress::parse_inactiveoff(line, dex),
        MessageKind::Upkeep => battle_progress::parse_upkeep(line, dex),
        MessageKind::Turn => battle_progress::parse_turn(line, dex),
        MessageKind::Win => battle_progress::parse_win(line, dex),
        MessageKind::Tie => battle_progress::parse_tie(line, dex),
        MessageKind::Expire => battle_progress::parse_expire(line, dex),
        MessageKind::Timestamp => battle_progress::parse_timestamp(line, dex),
        MessageKind::Move => battle_major::parse_move(line, dex),
        MessageKind::Switch => battle_major::parse_switch(line, dex),
        MessageKind::Drag => battle_major::parse_drag(line, dex),
        MessageKind::DetailsChange => battle_major::parse_detailschange(line, dex),
        MessageKind::Replace => battle_major::parse_replace(line, dex),
        MessageKind::Swap => battle_major::parse_swap(line, dex),
        MessageKind::Cant => battle_major::parse_cant(line, dex),
        MessageKind::Faint => battle_major::parse_faint(line, dex),
        MessageKind::Fail => battle_minor::parse_fail(line, dex),
        MessageKind::Block => battle_minor::parse_block(line, dex),
        MessageKind::NoTarget => battle_minor::parse_notarget(line, dex),
        MessageKind::Miss => battle_minor::parse_miss(line, dex),
        MessageKind::Damage => battle_minor::parse_damage(line, dex),
        MessageKind::Heal => battle_minor::parse_heal(line, dex),
        MessageKind::SetHp => battle_minor::parse_sethp(line, dex),
        MessageKind::Status => battle_minor::parse_status(line, dex),
        MessageKind::CureStatus => battle_minor::parse_curestatus(line, dex),
        MessageKind::CureTeam => battle_minor::parse_cureteam(line, dex),
        MessageKind::Boost => battle_minor::parse_boost(line, dex),
        MessageKind::Unboost => battle_minor::parse_unboost(line, dex),
        MessageKind::SetBoost => battle_minor::parse_setboost(line, dex),
        MessageKind::SwapBoost => battle_minor::parse_swapboost(line, dex),
        MessageKind::InvertBoost => battle_minor::parse_invertboost(line, dex),
        MessageKind::ClearBoost => battle_minor::parse_clearboost(line, dex),
        MessageKind::ClearAllBoost => battle_minor::parse_clearallboost(line, dex),
        MessageKind::ClearPositiveBoost => battle_minor::parse_clearpositiveboost(line, dex),
        MessageKind::ClearNegativeBoost => battle_minor::parse_clearnegativeboost(line, dex),
        MessageKind::CopyBoost => battle_minor::parse_copyboost(line, dex),
        MessageKind::Weather => battle_minor::parse_weather(line, dex),
        MessageKind::FieldStart => battle_minor::parse_fieldstart(line, dex),
        MessageKind::FieldEnd => battle_minor::parse_fieldend(line, dex),
        MessageKind::SideStart => battle_minor::parse_sidestart(line, dex),
        MessageKind::SideEnd => battle_minor::parse_sideend(line, dex),
        MessageKind::SwapSideConditions => battle_minor::parse_swapsideconditions(line, dex),
        MessageKind::VolatileStart => battle_minor::parse_start(line, dex),
        MessageKind::VolatileEnd => battle_minor::parse_end(line, dex),
        MessageKind::Crit => battle_minor::parse_crit(line, dex),
        MessageKind::SuperEffective => battle_minor::parse_supereffective(line, dex),
        MessageKind::Resisted => battle_minor::parse_resisted(line, dex),
        MessageKind::Immune => battle_minor::parse_immune(line, dex),
        MessageKind::Item => battle_minor::parse_item(line, dex),
        MessageKind::EndItem => battle_minor::parse_enditem(line, dex),
        MessageKind::Ability => battle_minor::parse_ability(line, dex),
        MessageKind::EndAbility => battle_minor::parse_endability(line, dex),
        MessageKind::Transform => battle_minor::parse_transform(line, dex),
        MessageKind::Mega => battle_minor::parse_mega(line, dex),
        MessageKind::Primal => battle_minor::parse_primal(line, dex),
        MessageKind::Burst => battle_minor::parse_burst(line, dex),
        MessageKind::ZPower => battle_minor::parse_zpower(line, dex),
        MessageKind::ZBroken => battle_minor::parse_zbroken(line, dex),
        MessageKind::Activate => battle_minor::parse_activate(line, dex),
        MessageKind::Hint => battle_minor::parse_hint(line, dex),
        MessageKind::Center => battle_minor::parse_center(line, dex),
        MessageKind::Message => battle_minor::parse_message(line, dex),
        MessageKind::Combine => battle_minor::parse_combine(line, dex),
        MessageKind::Waiting => battle_minor::parse_waiting(line, dex),
        MessageKind::Prepare => battle_minor::parse_prepare(line, dex),
        MessageKind::MustRecharge => battle_minor::parse_mustrecharge(line, dex),
        MessageKind::Nothing => battle_minor::parse_nothing(line, dex),
        MessageKind::HitCount => battle_minor::parse_hitcount(line, dex),
        MessageKind::SingleMove => battle_minor::parse_singlemove(line, dex),
        MessageKind::SingleTurn => battle_minor::parse_singleturn(line, dex),
        MessageKind::FormeChange => battle_minor::parse_formechange(line, dex),
        MessageKind::Terastallize => battle_minor::parse_terastallize(line, dex),
        MessageKind::FieldActivate => battle_minor::parse_fieldactivate(line, dex),
        MessageKind::Anim => battle_minor::parse_anim(line, dex),
        MessageKind::Error => battle_room::parse_error(line, dex),
        MessageKind::BigError => battle_room::parse_bigerror(line, dex),
        MessageKind::Init => battle_room::parse_init(line, dex),
        MessageKind::Deinit => battle_room::parse_deinit(line, dex),
        MessageKind::Title => battle_room::parse_title(line, dex),
        MessageKind::Join => battle_room::parse_join(line, dex),
        MessageKind::Leave => battle_room::parse_leave(line, dex),
        MessageKind::Raw => battle_room::parse_raw(line, dex),
        MessageKind::Empty => Ok(BattleEvent::Empty),
        MessageKind::Unknown => {
            Err(ParseError::InvalidFormat("unclassified line".to_string()).into())
        }
    }
}

/// A block of lines as sent over the websocket
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub room_id: Option<String>,
    pub messages: Vec<BattleMessage>,
}

/// Parse a complete WebSocket frame into structured messages
pub fn parse_frame(frame: &str) -> Frame {
    let mut lines = frame.lines();
    let mut room_id = None;

    // Check if first line is >ROOMID
    if let Some(first_line) = lines.clone().next() {
        if let Some(room) = first_line.strip_prefix('>') {
            room_id = Some(room.trim().to_string());
            lines.next();
        }
    }

    let parser = Parser::new();
    let messages = lines
        .filter(|line| !line.trim().is_empty())
        .map(|line| parser.parse(line))
        .collect();

    Frame { room_id, messages }
}

/// Parse a stored battle log, one message per non-blank line
pub fn parse_log(log: &str) -> Vec<BattleMessage> {
    let parser = Parser::new();
    log.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| parser.parse(line))
        .collect()
}
