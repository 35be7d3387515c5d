//! Chat room message parsers
//!
//! Lines sent to a chat room: presence, chat, and HTML boxes. Free text fields
//! (titles, chat, HTML) may contain `|`, so they take every part to the end.

use super::general::{
    GeneralEvent, RoomType, User, expect_parts, parse_timestamp as parse_time, parse_user,
};
use crate::ParseError;
use anyhow::Result;

/// Parse |join|USER, |j|USER or |J|USER
pub fn parse_join(parts: &[&str], quiet: bool) -> Result<GeneralEvent> {
    expect_parts(parts, 3, "joining user")?;
    Ok(GeneralEvent::Join {
        user: parse_user(parts[2])?,
        quiet,
    })
}

/// Parse |leave|USER, |l|USER or |L|USER
pub fn parse_leave(parts: &[&str], quiet: bool) -> Result<GeneralEvent> {
    expect_parts(parts, 3, "leaving user")?;
    Ok(GeneralEvent::Leave {
        user: parse_user(parts[2])?,
        quiet,
    })
}

/// Parse |name|USER|OLDID, |n|USER|OLDID or |N|USER|OLDID
pub fn parse_name(parts: &[&str], quiet: bool) -> Result<GeneralEvent> {
    expect_parts(parts, 4, "renamed user")?;
    Ok(GeneralEvent::Name {
        user: parse_user(parts[2])?,
        old_id: parts[3].to_string(),
        quiet,
    })
}

/// Parse |init|ROOMTYPE
pub fn parse_init(parts: &[&str]) -> Result<GeneralEvent> {
    expect_parts(parts, 3, "room type")?;

    let room_type = match parts[2].trim() {
        "chat" => RoomType::Chat,
        "battle" => RoomType::Battle,
        other => {
            return Err(ParseError::InvalidFormat(format!("unknown room type {other:?}")).into());
        }
    };

    Ok(GeneralEvent::Init(room_type))
}

/// Parse |title|TITLE
pub fn parse_title(parts: &[&str]) -> Result<GeneralEvent> {
    expect_parts(parts, 3, "title")?;
    Ok(GeneralEvent::Title(parts[2..].join("|")))
}

/// Parse |users|USERLIST
///
/// The list is comma-separated and starts with the user count.
pub fn parse_users(parts: &[&str]) -> Result<GeneralEvent> {
    expect_parts(parts, 3, "user list")?;

    let mut entries = parts[2].split(',');
    let count = entries
        .next()
        .and_then(|c| c.trim().parse::<u32>().ok())
        .ok_or_else(|| ParseError::InvalidFormat(format!("invalid user list {:?}", parts[2])))?;
    let users: Vec<User> = entries.filter_map(User::parse).collect();

    Ok(GeneralEvent::Users { count, users })
}

/// Parse |chat|USER|MESSAGE or |c|USER|MESSAGE
pub fn parse_chat(parts: &[&str], timestamp: Option<i64>) -> Result<GeneralEvent> {
    expect_parts(parts, 4, "chat message")?;
    Ok(GeneralEvent::Chat {
        user: parse_user(parts[2])?,
        message: parts[3..].join("|"),
        timestamp,
    })
}

/// Parse |c:|TIMESTAMP|USER|MESSAGE
pub fn parse_timestamped_chat(parts: &[&str]) -> Result<GeneralEvent> {
    expect_parts(parts, 5, "timestamped chat message")?;
    let timestamp = parse_time(parts[2])?;
    parse_chat(&parts[1..], Some(timestamp))
}

/// Parse |:|TIMESTAMP
pub fn parse_timestamp(parts: &[&str]) -> Result<GeneralEvent> {
    expect_parts(parts, 3, "timestamp")?;
    Ok(GeneralEvent::Timestamp(parse_time(parts[2])?))
}

/// Parse |battle|ROOMID|USER1|USER2 or |b|ROOMID|USER1|USER2
pub fn parse_battle(parts: &[&str]) -> Result<GeneralEvent> {
    expect_parts(parts, 5, "battle players")?;
    Ok(GeneralEvent::Battle {
        room_id: parts[2].to_string(),
        user1: parse_user(parts[3])?,
        user2: parse_user(parts[4])?,
    })
}

/// Parse |notify|TITLE|MESSAGE|HIGHLIGHTTOKEN
pub fn parse_notify(parts: &[&str]) -> Result<GeneralEvent> {
    expect_parts(parts, 3, "notification title")?;

    let optional = |i: usize| {
        parts
            .get(i)
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string())
    };

    Ok(GeneralEvent::Notify {
        title: parts[2].to_string(),
        message: optional(3),
        highlight_token: optional(4),
    })
}

/// Parse |html|HTML
pub fn parse_html(parts: &[&str]) -> Result<GeneralEvent> {
    expect_parts(parts, 3, "html")?;
    Ok(GeneralEvent::Html(parts[2..].join("|")))
}

/// Parse |uhtml|NAME|HTML
pub fn parse_uhtml(parts: &[&str]) -> Result<GeneralEvent> {
    expect_parts(parts, 4, "uhtml box")?;
    Ok(GeneralEvent::Uhtml {
        name: parts[2].to_string(),
        html: parts[3..].join("|"),
    })
}

/// Parse |uhtmlchange|NAME|HTML
pub fn parse_uhtmlchange(parts: &[&str]) -> Result<GeneralEvent> {
    expect_parts(parts, 4, "uhtml box")?;
    Ok(GeneralEvent::UhtmlChange {
        name: parts[2].to_string(),
        html: parts[3..].join("|"),
    })
}
