//! Major battle action message parsers
//!
//! These are the primary actions in battle: moves, switches, faints, etc.

use super::BattleEvent;
use super::battle::{
    EffectType, parse_details, parse_from, parse_hp_status, parse_number, parse_opt_hp_status,
    parse_opt_pokemon, parse_pokemon,
};
use super::line::Line;
use crate::ParseError;
use anyhow::Result;
use pokeline_dex::Dex;

/// Parse |move|POKEMON|MOVE|TARGET with optional tags
pub fn parse_move(line: &Line, _dex: &Dex) -> Result<BattleEvent> {
    let pokemon = parse_pokemon(line, 0)?;
    let move_name = line.require(1, "move")?.to_string();
    // A bracketed field in the target position is a tag, so it never lands here
    let target = parse_opt_pokemon(line, 2)?;

    Ok(BattleEvent::Move {
        pokemon,
        move_name,
        target,
        miss: line.has_tag("miss"),
        still: line.has_tag("still"),
        anim: line.tag("anim").filter(|s| !s.is_empty()).map(str::to_string),
        effect: parse_from(line, Some(EffectType::Move))?,
    })
}

/// Parse |switch|POKEMON|DETAILS|HP STATUS
pub fn parse_switch(line: &Line, dex: &Dex) -> Result<BattleEvent> {
    Ok(BattleEvent::Switch {
        pokemon: parse_pokemon(line, 0)?,
        details: parse_details(line, 1, dex)?,
        hp_status: parse_hp_status(line, 2, dex)?,
    })
}

/// Parse |drag|POKEMON|DETAILS|HP STATUS
pub fn parse_drag(line: &Line, dex: &Dex) -> Result<BattleEvent> {
    Ok(BattleEvent::Drag {
        pokemon: parse_pokemon(line, 0)?,
        details: parse_details(line, 1, dex)?,
        hp_status: parse_hp_status(line, 2, dex)?,
    })
}

/// Parse |detailschange|POKEMON|DETAILS|HP STATUS
pub fn parse_detailschange(line: &Line, dex: &Dex) -> Result<BattleEvent> {
    Ok(BattleEvent::DetailsChange {
        pokemon: parse_pokemon(line, 0)?,
        details: parse_details(line, 1, dex)?,
        hp_status: parse_opt_hp_status(line, 2, dex)?,
    })
}

/// Parse |replace|POKEMON|DETAILS|HP STATUS
pub fn parse_replace(line: &Line, dex: &Dex) -> Result<BattleEvent> {
    Ok(BattleEvent::Replace {
        pokemon: parse_pokemon(line, 0)?,
        details: parse_details(line, 1, dex)?,
        hp_status: parse_opt_hp_status(line, 2, dex)?,
    })
}

/// Parse |swap|POKEMON|POSITION
pub fn parse_swap(line: &Line, _dex: &Dex) -> Result<BattleEvent> {
    let pokemon = parse_pokemon(line, 0)?;
    let position: u8 = parse_number(line, 1, "position")?;
    if position > 2 {
        return Err(ParseError::InvalidFormat(format!("position {position} out of range")).into());
    }

    Ok(BattleEvent::Swap {
        pokemon,
        position,
        effect: parse_from(line, None)?,
    })
}

/// Parse |cant|POKEMON|REASON or |cant|POKEMON|REASON|MOVE
pub fn parse_cant(line: &Line, _dex: &Dex) -> Result<BattleEvent> {
    Ok(BattleEvent::Cant {
        pokemon: parse_pokemon(line, 0)?,
        reason: line.require(1, "reason")?.to_string(),
        move_name: line.opt_arg(2).map(str::to_string),
    })
}

/// Parse |faint|POKEMON
pub fn parse_faint(line: &Line, _dex: &Dex) -> Result<BattleEvent> {
    Ok(BattleEvent::Faint(parse_pokemon(line, 0)?))
}
