//! Battle progress message parsers
//!
//! These messages track the flow and state of a battle.

use super::BattleEvent;
use super::battle;
use super::line::Line;
use super::request::BattleRequest;
use crate::ParseError;
use anyhow::Result;
use pokeline_dex::Dex;

/// Parse |request|REQUEST (JSON)
pub fn parse_request(line: &Line, dex: &Dex) -> Result<BattleEvent> {
    let json = line.rest(0);
    if json.trim().is_empty() {
        return Err(ParseError::EmptyMessage.into());
    }

    let request = BattleRequest::from_json(&json, dex)?;
    Ok(BattleEvent::Request(Box::new(request)))
}

/// Parse |inactive|MESSAGE
pub fn parse_inactive(line: &Line, _dex: &Dex) -> Result<BattleEvent> {
    Ok(BattleEvent::Inactive(line.rest(0)))
}

/// Parse |inactiveoff|MESSAGE
pub fn parse_inactiveoff(line: &Line, _dex: &Dex) -> Result<BattleEvent> {
    Ok(BattleEvent::InactiveOff(line.rest(0)))
}

/// Parse |upkeep
pub fn parse_upkeep(_line: &Line, _dex: &Dex) -> Result<BattleEvent> {
    Ok(BattleEvent::Upkeep)
}

/// Parse |turn|NUMBER
pub fn parse_turn(line: &Line, _dex: &Dex) -> Result<BattleEvent> {
    Ok(BattleEvent::Turn(battle::parse_number(line, 0, "turn")?))
}

/// Parse |win|USER
pub fn parse_win(line: &Line, _dex: &Dex) -> Result<BattleEvent> {
    Ok(BattleEvent::Win(line.arg(0).unwrap_or_default().to_string()))
}

/// Parse |tie
pub fn parse_tie(_line: &Line, _dex: &Dex) -> Result<BattleEvent> {
    Ok(BattleEvent::Tie)
}

/// Parse |expire
pub fn parse_expire(_line: &Line, _dex: &Dex) -> Result<BattleEvent> {
    Ok(BattleEvent::Expire)
}

/// Parse |t:|TIMESTAMP
pub fn parse_timestamp(line: &Line, _dex: &Dex) -> Result<BattleEvent> {
    Ok(BattleEvent::Timestamp(battle::parse_number(line, 0, "timestamp")?))
}
