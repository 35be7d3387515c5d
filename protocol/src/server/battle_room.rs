//! Room lines inside a battle stream
//!
//! Battle rooms share these with chat rooms; here they are kept as plain text.

use super::BattleEvent;
use super::line::Line;
use anyhow::Result;
use pokeline_dex::Dex;

/// Parse |error|MESSAGE
pub fn parse_error(line: &Line, _dex: &Dex) -> Result<BattleEvent> {
    Ok(BattleEvent::Error(line.rest(0)))
}

/// Parse |bigerror|MESSAGE
pub fn parse_bigerror(line: &Line, _dex: &Dex) -> Result<BattleEvent> {
    Ok(BattleEvent::BigError(line.rest(0)))
}

/// Parse |init|ROOMTYPE
pub fn parse_init(line: &Line, _dex: &Dex) -> Result<BattleEvent> {
    Ok(BattleEvent::Init(line.opt_arg(0).map(str::to_string)))
}

/// Parse |deinit
pub fn parse_deinit(_line: &Line, _dex: &Dex) -> Result<BattleEvent> {
    Ok(BattleEvent::Deinit)
}

/// Parse |title|TITLE
pub fn parse_title(line: &Line, _dex: &Dex) -> Result<BattleEvent> {
    Ok(BattleEvent::Title(line.rest(0)))
}

/// Parse |join|USER
pub fn parse_join(line: &Line, _dex: &Dex) -> Result<BattleEvent> {
    Ok(BattleEvent::Join(line.require(0, "user")?.to_string()))
}

/// Parse |leave|USER
pub fn parse_leave(line: &Line, _dex: &Dex) -> Result<BattleEvent> {
    Ok(BattleEvent::Leave(line.require(0, "user")?.to_string()))
}

/// Parse |raw|HTML
pub fn parse_raw(line: &Line, _dex: &Dex) -> Result<BattleEvent> {
    Ok(BattleEvent::Raw(line.rest(0)))
}
