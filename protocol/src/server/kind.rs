//! Message kind tags and error states

use std::fmt;

/// Why a line came back as [`super::BattleEvent::Unknown`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorState {
    /// The kind tag is not one this parser knows
    UnknownKind,
    /// The kind is known but has no extractor. The dispatcher is exhaustive, so
    /// this is never produced.
    MissingExtractor,
    /// The kind is known but deliberately not extracted
    NotImplemented,
    /// Field extraction failed
    ParseError,
}

impl ErrorState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorState::UnknownKind => "UNKNOWN_KIND",
            ErrorState::MissingExtractor => "MISSING_EXTRACTOR",
            ErrorState::NotImplemented => "NOT_IMPLEMENTED",
            ErrorState::ParseError => "PARSE_ERROR",
        }
    }
}

impl fmt::Display for ErrorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

macro_rules! message_kinds {
    ($($variant:ident => $tag:literal $(| $alias:literal)*),* $(,)?) => {
        /// The closed set of battle message kinds
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum MessageKind {
            $($variant,)*
            /// A blank line, or a `request` with no payload
            Empty,
            /// A line that failed to classify or extract
            Unknown,
        }

        impl MessageKind {
            /// Every kind with a wire tag
            pub const TAGGED: &'static [MessageKind] = &[$(MessageKind::$variant,)*];

            /// Classify a wire tag (`"-damage"`, `"j"`, ...)
            pub fn from_tag(tag: &str) -> Option<Self> {
                match tag {
                    "" => Some(MessageKind::Empty),
                    $($tag $(| $alias)* => Some(MessageKind::$variant),)*
                    _ => None,
                }
            }

            /// The canonical wire tag
            pub fn as_tag(&self) -> &'static str {
                match self {
                    $(MessageKind::$variant => $tag,)*
                    MessageKind::Empty => "",
                    MessageKind::Unknown => "unknown",
                }
            }
        }
    };
}

message_kinds! {
    // Initialization
    Player => "player",
    TeamSize => "teamsize",
    GameType => "gametype",
    Gen => "gen",
    Tier => "tier",
    Rated => "rated",
    Rule => "rule",
    ClearPoke => "clearpoke",
    Poke => "poke",
    Start => "start",
    TeamPreview => "teampreview",

    // Progress
    Request => "request",
    Inactive => "inactive",
    InactiveOff => "inactiveoff",
    Upkeep => "upkeep",
    Turn => "turn",
    Win => "win",
    Tie => "tie",
    Expire => "expire",
    Timestamp => "t:",

    // Major actions
    Move => "move",
    Switch => "switch",
    Drag => "drag",
    DetailsChange => "detailschange",
    Replace => "replace",
    Swap => "swap",
    Cant => "cant",
    Faint => "faint",

    // Minor actions
    Fail => "-fail",
    Block => "-block",
    NoTarget => "-notarget",
    Miss => "-miss",
    Damage => "-damage",
    Heal => "-heal",
    SetHp => "-sethp",
    Status => "-status",
    CureStatus => "-curestatus",
    CureTeam => "-cureteam",
    Boost => "-boost",
    Unboost => "-unboost",
    SetBoost => "-setboost",
    SwapBoost => "-swapboost",
    InvertBoost => "-invertboost",
    ClearBoost => "-clearboost",
    ClearAllBoost => "-clearallboost",
    ClearPositiveBoost => "-clearpositiveboost",
    ClearNegativeBoost => "-clearnegativeboost",
    CopyBoost => "-copyboost",
    Weather => "-weather",
    FieldStart => "-fieldstart",
    FieldEnd => "-fieldend",
    SideStart => "-sidestart",
    SideEnd => "-sideend",
    SwapSideConditions => "-swapsideconditions",
    VolatileStart => "-start",
    VolatileEnd => "-end",
    Crit => "-crit",
    SuperEffective => "-supereffective",
    Resisted => "-resisted",
    Immune => "-immune",
    Item => "-item",
    EndItem => "-enditem",
    Ability => "-ability",
    EndAbility => "-endability",
    Transform => "-transform",
    Mega => "-mega",
    Primal => "-primal",
    Burst => "-burst",
    ZPower => "-zpower",
    ZBroken => "-zbroken",
    Activate => "-activate",
    Hint => "-hint",
    Center => "-center",
    Message => "-message" | "message",
    Combine => "-combine",
    Waiting => "-waiting",
    Prepare => "-prepare",
    MustRecharge => "-mustrecharge",
    Nothing => "-nothing",
    HitCount => "-hitcount",
    SingleMove => "-singlemove",
    SingleTurn => "-singleturn",
    FormeChange => "-formechange",
    Terastallize => "-terastallize",
    FieldActivate => "-fieldactivate",
    Anim => "-anim",

    // Room
    Error => "error",
    BigError => "bigerror",
    Init => "init",
    Deinit => "deinit",
    Title => "title",
    Join => "join" | "j" | "J",
    Leave => "leave" | "l" | "L",
    Raw => "raw",
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}
