//! Battle initialization message parsers
//!
//! These messages are sent at the start of a battle to set up the game state.

use super::BattleEvent;
use super::battle::{self, Avatar, GameType, Player, PokemonDetails};
use super::line::Line;
use crate::ParseError;
use anyhow::Result;
use pokeline_dex::{Category, Dex};

fn parse_player_field(line: &Line, index: usize) -> Result<Player> {
    let field = line.require(index, "player")?;
    Player::parse(field.trim())
        .ok_or_else(|| ParseError::InvalidFormat(format!("invalid player {field:?}")).into())
}

/// Parse |player|PLAYER|USERNAME|AVATAR|RATING
pub fn parse_player(line: &Line, _dex: &Dex) -> Result<BattleEvent> {
    let player = parse_player_field(line, 0)?;
    let username = line.arg(1).unwrap_or_default().to_string();
    let avatar = line.opt_arg(2).map(Avatar::parse);
    let rating = match line.opt_arg(3) {
        Some(_) => Some(battle::parse_number(line, 3, "rating")?),
        None => None,
    };

    Ok(BattleEvent::BattlePlayer {
        player,
        username,
        avatar,
        rating,
    })
}

/// Parse |teamsize|PLAYER|NUMBER
pub fn parse_teamsize(line: &Line, _dex: &Dex) -> Result<BattleEvent> {
    let player = parse_player_field(line, 0)?;
    let size = battle::parse_number(line, 1, "team size")?;

    Ok(BattleEvent::TeamSize { player, size })
}

/// Parse |gametype|GAMETYPE
pub fn parse_gametype(line: &Line, _dex: &Dex) -> Result<BattleEvent> {
    let field = line.require(0, "game type")?;
    let game_type = GameType::parse(field)
        .ok_or_else(|| ParseError::InvalidFormat(format!("unknown game type {field:?}")))?;

    Ok(BattleEvent::GameType(game_type))
}

/// Parse |gen|GENNUM
pub fn parse_gen(line: &Line, dex: &Dex) -> Result<BattleEvent> {
    let generation = line.require(0, "generation")?;
    Ok(BattleEvent::Gen(battle::resolve(dex, generation, Category::Gen)?))
}

/// Parse |tier|FORMATNAME
pub fn parse_tier(line: &Line, _dex: &Dex) -> Result<BattleEvent> {
    Ok(BattleEvent::Tier(line.require(0, "format")?.to_string()))
}

/// Parse |rated| or |rated|MESSAGE
pub fn parse_rated(line: &Line, _dex: &Dex) -> Result<BattleEvent> {
    Ok(BattleEvent::Rated(line.opt_arg(0).map(str::to_string)))
}

/// Parse |rule|RULE: DESCRIPTION
pub fn parse_rule(line: &Line, _dex: &Dex) -> Result<BattleEvent> {
    let rule = line.require(0, "rule")?;
    let (name, description) = rule.split_once(':').unwrap_or((rule, ""));

    Ok(BattleEvent::Rule {
        name: name.trim().to_string(),
        description: description.trim().to_string(),
    })
}

/// Parse |clearpoke
pub fn parse_clearpoke(_line: &Line, _dex: &Dex) -> Result<BattleEvent> {
    Ok(BattleEvent::ClearPoke)
}

/// Parse |poke|PLAYER|DETAILS|ITEM
pub fn parse_poke(line: &Line, dex: &Dex) -> Result<BattleEvent> {
    let player = parse_player_field(line, 0)?;
    let details = PokemonDetails::parse(line.require(1, "details")?, dex)?;
    let has_item = line.opt_arg(2) == Some("item");

    Ok(BattleEvent::Poke {
        player,
        details,
        has_item,
    })
}

/// Parse |teampreview or |teampreview|NUMBER
pub fn parse_teampreview(line: &Line, _dex: &Dex) -> Result<BattleEvent> {
    let count = match line.opt_arg(0) {
        Some(_) => Some(battle::parse_number(line, 0, "team preview count")?),
        None => None,
    };

    Ok(BattleEvent::TeamPreview(count))
}

/// Parse |start
pub fn parse_start(_line: &Line, _dex: &Dex) -> Result<BattleEvent> {
    Ok(BattleEvent::BattleStart)
}
