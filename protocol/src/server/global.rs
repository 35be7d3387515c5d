//! Global message parsers
//!
//! Account and lobby lines that are not tied to a room.

use std::collections::HashMap;

use super::battle::Avatar;
use super::general::{
    ChallengeState, CustomGroup, Format, FormatSection, GeneralEvent, SearchState, UserSettings,
    expect_parts, parse_user,
};
use crate::ParseError;
use anyhow::Result;
use serde::Deserialize;

/// Parse |challstr|CHALLSTR
pub fn parse_challstr(parts: &[&str]) -> Result<GeneralEvent> {
    expect_parts(parts, 3, "challstr value")?;

    // CHALLSTR can contain | characters, so join everything after parts[1]
    let challstr = parts[2..].join("|");
    if challstr.is_empty() {
        return Err(ParseError::InvalidFormat("challstr cannot be empty".to_string()).into());
    }

    Ok(GeneralEvent::Challstr(challstr))
}

/// Parse |updateuser|USER|NAMED|AVATAR|SETTINGS
pub fn parse_updateuser(parts: &[&str]) -> Result<GeneralEvent> {
    expect_parts(parts, 4, "updateuser fields")?;

    let user = parse_user(parts[2])?;

    let named = parts[3] == "1";
    let avatar = Avatar::parse(parts.get(4).copied().unwrap_or_default());

    let settings = match parts.get(5..).map(|s| s.join("|")) {
        Some(json) if !json.trim().is_empty() => {
            Some(serde_json::from_str::<UserSettings>(&json).map_err(|e| {
                ParseError::InvalidFormat(format!("invalid user settings json: {e}"))
            })?)
        }
        _ => None,
    };

    Ok(GeneralEvent::UpdateUser {
        user,
        named,
        avatar,
        settings,
    })
}

/// Parse |nametaken|USERNAME|MESSAGE
pub fn parse_nametaken(parts: &[&str]) -> Result<GeneralEvent> {
    expect_parts(parts, 4, "nametaken fields")?;

    Ok(GeneralEvent::NameTaken {
        username: parts[2].to_string(),
        message: parts[3..].join("|"),
    })
}

/// Parse |popup|MESSAGE
pub fn parse_popup(parts: &[&str]) -> Result<GeneralEvent> {
    expect_parts(parts, 3, "popup message")?;

    // MESSAGE can contain | characters
    Ok(GeneralEvent::Popup(parts[2..].join("|")))
}

/// Parse |pm|SENDER|RECEIVER|MESSAGE
///
/// A message starting with `/challenge` is a battle challenge. The format is the
/// next field, or the text after the command when the server inlines it.
pub fn parse_pm(parts: &[&str]) -> Result<GeneralEvent> {
    expect_parts(parts, 5, "pm fields")?;

    let sender = parse_user(parts[2])?;
    let receiver = parse_user(parts[3])?;

    // MESSAGE can contain | characters
    let message = parts[4..].join("|");

    let command = parts[4].strip_prefix("/challenge");
    let is_challenge = command.is_some();
    let challenge_format = command.and_then(|inline| {
        parts
            .get(5)
            .map(|f| f.trim())
            .filter(|f| !f.is_empty())
            .or_else(|| Some(inline.trim()).filter(|f| !f.is_empty()))
            .map(str::to_string)
    });

    Ok(GeneralEvent::Pm {
        sender,
        receiver,
        message,
        is_challenge,
        challenge_format,
    })
}

/// Parse |usercount|COUNT
pub fn parse_usercount(parts: &[&str]) -> Result<GeneralEvent> {
    expect_parts(parts, 3, "usercount value")?;

    let count = parts[2]
        .parse::<u32>()
        .map_err(|_| ParseError::InvalidFormat("invalid usercount".to_string()))?;

    Ok(GeneralEvent::Usercount(count))
}

/// Parse |formats|FORMATSLIST
pub fn parse_formats(parts: &[&str]) -> Result<GeneralEvent> {
    let mut sections = Vec::new();
    let mut current_section: Option<FormatSection> = None;

    // Sections start with ",#" where # is the column number, followed by the
    // section name. Empty parts (from ||) close the current section.
    for part in parts.iter().skip(2) {
        if part.is_empty() {
            if let Some(section) = current_section.take() {
                sections.push(section);
            }
            continue;
        }

        if let Some(col_str) = part.strip_prefix(',') {
            if let Some(section) = current_section.take() {
                sections.push(section);
            }

            if let Ok(column) = col_str.parse::<u32>() {
                current_section = Some(FormatSection {
                    column,
                    name: String::new(),
                    formats: Vec::new(),
                });
            }
            continue;
        }

        if let Some(ref mut section) = current_section {
            if section.name.is_empty() {
                section.name = part.to_string();
                continue;
            }

            section.formats.push(parse_format_entry(part));
        }
    }

    if let Some(section) = current_section {
        sections.push(section);
    }

    Ok(GeneralEvent::Formats(sections))
}

fn parse_format_entry(entry: &str) -> Format {
    // Entries end with ,HEX display flags
    let (name, flags) = match entry.rsplit_once(',') {
        Some((name, hex)) => (name, u8::from_str_radix(hex, 16).unwrap_or(0)),
        None => (entry, 0),
    };

    Format {
        name: name.to_string(),
        random_team: flags & 1 != 0,
        search_show: flags & 2 != 0,
        challenge_show: flags & 4 != 0,
        tournament_show: flags & 8 != 0,
        level_50: flags & 16 != 0,
        best_of: flags & 64 != 0,
        tera_preview: flags & 128 != 0,
    }
}

/// Parse |customgroups|JSON
pub fn parse_customgroups(parts: &[&str]) -> Result<GeneralEvent> {
    expect_parts(parts, 3, "customgroups json")?;

    let json_str = parts[2..].join("|");
    let groups: Vec<CustomGroup> = serde_json::from_str(&json_str)
        .map_err(|e| ParseError::InvalidFormat(format!("invalid customgroups json: {e}")))?;

    Ok(GeneralEvent::CustomGroups(groups))
}

/// Parse |updatesearch|JSON
pub fn parse_updatesearch(parts: &[&str]) -> Result<GeneralEvent> {
    expect_parts(parts, 3, "updatesearch json")?;

    // JSON can contain | characters
    let json_str = parts[2..].join("|");
    let state: SearchState = serde_json::from_str(&json_str)
        .map_err(|e| ParseError::InvalidFormat(format!("invalid updatesearch json: {e}")))?;

    Ok(GeneralEvent::UpdateSearch(state))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawChallenges {
    #[serde(default)]
    challenges_from: HashMap<String, String>,

    #[serde(default)]
    challenges_to: Option<Vec<RawOutgoing>>,
}

#[derive(Debug, Deserialize)]
struct RawOutgoing {
    to: String,
    format: String,
}

/// Parse |updatechallenges|JSON
pub fn parse_updatechallenges(parts: &[&str]) -> Result<GeneralEvent> {
    expect_parts(parts, 3, "updatechallenges json")?;

    let json_str = parts[2..].join("|");
    let raw: RawChallenges = serde_json::from_str(&json_str)
        .map_err(|e| ParseError::InvalidFormat(format!("invalid updatechallenges json: {e}")))?;

    let outgoing = raw
        .challenges_to
        .unwrap_or_default()
        .into_iter()
        .map(|c| (c.to, c.format))
        .collect();

    Ok(GeneralEvent::UpdateChallenges(ChallengeState {
        incoming: raw.challenges_from,
        outgoing,
    }))
}

/// Parse |queryresponse|QUERYTYPE|JSON
pub fn parse_queryresponse(parts: &[&str]) -> Result<GeneralEvent> {
    expect_parts(parts, 4, "queryresponse fields")?;

    let json_str = parts[3..].join("|");
    let data = serde_json::from_str(&json_str)
        .map_err(|e| ParseError::InvalidFormat(format!("invalid queryresponse json: {e}")))?;

    Ok(GeneralEvent::QueryResponse {
        query_type: parts[2].to_string(),
        data,
    })
}
