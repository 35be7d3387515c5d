//! General (non-battle) server messages
//!
//! Lobby, chat room and account lines: `|challstr|...`, `|updateuser|...`,
//! `|pm|...`, `|c|...` and so on. Parsed with the same contract as battle lines:
//! [`parse_general`] never fails and reports problems through [`ErrorState`].

use std::collections::HashMap;

use super::battle::Avatar;
use super::kind::ErrorState;
use super::{global, room};
use crate::ParseError;
use anyhow::Result;
use serde::Deserialize;

/// A user as shown in room and global messages (`@Zarel@!`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Rank symbol, absent for regular users
    pub rank: Option<char>,
    pub name: String,
    /// The `@!` suffix (away or busy)
    pub away: bool,
}

impl User {
    pub fn parse(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        let first = chars.next()?;

        let (rank, rest) = if first.is_alphanumeric() {
            (None, s)
        } else {
            let rank = (first != ' ').then_some(first);
            (rank, chars.as_str())
        };

        let (name, away) = match rest.strip_suffix("@!") {
            Some(name) => (name, true),
            None => (rest, false),
        };

        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        Some(User {
            rank,
            name: name.to_string(),
            away,
        })
    }
}

/// Fail unless the split line has at least `count` parts
pub(super) fn expect_parts(parts: &[&str], count: usize, what: &str) -> Result<(), ParseError> {
    if parts.len() < count {
        return Err(ParseError::MissingField(what.to_string()));
    }
    Ok(())
}

pub(super) fn parse_user(field: &str) -> Result<User, ParseError> {
    User::parse(field).ok_or_else(|| ParseError::InvalidFormat(format!("invalid user {field:?}")))
}

pub(super) fn parse_timestamp(field: &str) -> Result<i64, ParseError> {
    field
        .trim()
        .parse()
        .map_err(|_| ParseError::InvalidFormat(format!("invalid timestamp {field:?}")))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomType {
    Chat,
    Battle,
}

/// One playable format from `|formats|`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Format {
    pub name: String,
    pub random_team: bool,
    pub search_show: bool,
    pub challenge_show: bool,
    pub tournament_show: bool,
    pub level_50: bool,
    pub best_of: bool,
    pub tera_preview: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatSection {
    pub column: u32,
    pub name: String,
    pub formats: Vec<Format>,
}

/// Account settings sent with `|updateuser|`
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserSettings {
    pub block_challenges: bool,
    #[serde(rename = "blockPMs")]
    pub block_pms: bool,
    pub ignore_tickets: bool,
    pub hide_battles_from_trainer_card: bool,
    pub block_invites: bool,
    pub do_not_disturb: bool,
    pub block_friend_requests: bool,
    pub allow_friend_notifications: bool,
    pub display_battles_to_friends: bool,
    pub hide_logins: bool,
    pub hidden_next_battle: bool,
    pub invite_only_next_battle: bool,
    pub language: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CustomGroup {
    pub symbol: String,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub group_type: String,
}

/// Ladder searches in progress
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct SearchState {
    /// Formats being searched for
    pub searching: Vec<String>,
    /// Ongoing games, room id to title
    pub games: Option<HashMap<String, String>>,
}

/// Pending challenges, username to format
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChallengeState {
    pub incoming: HashMap<String, String>,
    pub outgoing: HashMap<String, String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GeneralEvent {
    // Room
    Init(RoomType),
    Title(String),
    Users {
        count: u32,
        users: Vec<User>,
    },
    Html(String),
    Uhtml {
        name: String,
        html: String,
    },
    UhtmlChange {
        name: String,
        html: String,
    },
    Join {
        user: User,
        quiet: bool,
    },
    Leave {
        user: User,
        quiet: bool,
    },
    Name {
        user: User,
        old_id: String,
        quiet: bool,
    },
    Chat {
        user: User,
        message: String,
        timestamp: Option<i64>,
    },
    Timestamp(i64),
    Battle {
        room_id: String,
        user1: User,
        user2: User,
    },
    Notify {
        title: String,
        message: Option<String>,
        highlight_token: Option<String>,
    },

    // Global
    Popup(String),
    Pm {
        sender: User,
        receiver: User,
        message: String,
        is_challenge: bool,
        challenge_format: Option<String>,
    },
    Usercount(u32),
    NameTaken {
        username: String,
        message: String,
    },
    Challstr(String),
    UpdateUser {
        user: User,
        named: bool,
        avatar: Avatar,
        settings: Option<UserSettings>,
    },
    Formats(Vec<FormatSection>),
    CustomGroups(Vec<CustomGroup>),
    UpdateSearch(SearchState),
    UpdateChallenges(ChallengeState),
    QueryResponse {
        query_type: String,
        data: serde_json::Value,
    },

    /// A line with no `|` prefix, shown as-is in the room
    Raw(String),
    Empty,
    Unknown {
        error: ErrorState,
        detail: Option<String>,
    },
}

/// One parsed general server line
#[derive(Debug, Clone, PartialEq)]
pub struct GeneralMessage {
    pub raw: String,
    pub event: GeneralEvent,
}

impl GeneralMessage {
    pub fn error_state(&self) -> Option<ErrorState> {
        match &self.event {
            GeneralEvent::Unknown { error, .. } => Some(*error),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.error_state().is_some()
    }
}

/// Parse one general server line. Never fails.
pub fn parse_general(line: &str) -> GeneralMessage {
    let raw = line.trim_end_matches(['\r', '\n']);

    let event = match parse_general_event(raw) {
        Ok(event) => event,
        Err(e) => {
            let error = match e.downcast_ref::<ParseError>() {
                Some(ParseError::NotImplemented(_)) => ErrorState::NotImplemented,
                _ => ErrorState::ParseError,
            };
            let kind = raw.split('|').nth(1).unwrap_or_default();
            tracing::warn!(kind, error = %e, line = raw, "Failed to extract general message");

            GeneralEvent::Unknown {
                error,
                detail: Some(e.to_string()),
            }
        }
    };

    GeneralMessage {
        raw: raw.to_string(),
        event,
    }
}

fn parse_general_event(line: &str) -> Result<GeneralEvent> {
    if line.trim().is_empty() {
        return Ok(GeneralEvent::Empty);
    }

    if !line.starts_with('|') {
        return Ok(GeneralEvent::Raw(line.to_string()));
    }

    let parts: Vec<&str> = line.split('|').collect();

    match parts[1] {
        "" => Ok(GeneralEvent::Empty),
        "init" => room::parse_init(&parts),
        "title" => room::parse_title(&parts),
        "users" => room::parse_users(&parts),
        "html" => room::parse_html(&parts),
        "uhtml" => room::parse_uhtml(&parts),
        "uhtmlchange" => room::parse_uhtmlchange(&parts),
        "join" | "j" => room::parse_join(&parts, false),
        "J" => room::parse_join(&parts, true),
        "leave" | "l" => room::parse_leave(&parts, false),
        "L" => room::parse_leave(&parts, true),
        "name" | "n" => room::parse_name(&parts, false),
        "N" => room::parse_name(&parts, true),
        "chat" | "c" => room::parse_chat(&parts, None),
        "c:" => room::parse_timestamped_chat(&parts),
        ":" => room::parse_timestamp(&parts),
        "battle" | "b" => room::parse_battle(&parts),
        "notify" => room::parse_notify(&parts),
        "popup" => global::parse_popup(&parts),
        "pm" => global::parse_pm(&parts),
        "usercount" => global::parse_usercount(&parts),
        "nametaken" => global::parse_nametaken(&parts),
        "challstr" => global::parse_challstr(&parts),
        "updateuser" => global::parse_updateuser(&parts),
        "formats" => global::parse_formats(&parts),
        "customgroups" => global::parse_customgroups(&parts),
        "updatesearch" => global::parse_updatesearch(&parts),
        "updatechallenges" => global::parse_updatechallenges(&parts),
        "queryresponse" => global::parse_queryresponse(&parts),
        "tournament" => Err(ParseError::NotImplemented("tournament".to_string()).into()),
        kind => {
            tracing::debug!(kind, line, "Unknown general message kind");
            Ok(GeneralEvent::Unknown {
                error: ErrorState::UnknownKind,
                detail: Some(kind.to_string()),
            })
        }
    }
}
