//! Minor battle action message parsers
//!
//! These are secondary effects in battle: damage, stat changes, status, etc.
//! In the official client, they're usually displayed in smaller font.
//!
//! Most of them carry an optional cause in the `[from] TYPE: NAME` / `[of] POKEMON`
//! grammar. A few kinds (`-fail`, `-start`, `-end`, `-activate`, `-enditem`) name
//! two causes and decide which one is primary by the shape of their fields.

use super::BattleEvent;
use super::battle::{
    Effect, EffectType, Player, PokemonIdentifier, Stat, parse_from, parse_hp_status,
    parse_number, parse_opt_hp_status, parse_opt_pokemon, parse_pokemon, parse_source, resolve,
    strip_label,
};
use super::line::{Line, Token, is_lowercase};
use crate::ParseError;
use anyhow::Result;
use pokeline_dex::{Category, Dex};

fn parse_stat(line: &Line, index: usize) -> Result<Stat> {
    let field = line.require(index, "stat")?;
    Stat::parse(field)
        .ok_or_else(|| ParseError::InvalidFormat(format!("unknown stat {field:?}")).into())
}

fn parse_side(line: &Line, index: usize) -> Result<Player> {
    let field = line.require(index, "side")?;
    Player::from_prefix(field)
        .ok_or_else(|| ParseError::InvalidFormat(format!("invalid side {field:?}")).into())
}

/// The raw field right after the `index`th positional field
fn field_after_arg<'a>(line: &Line<'a>, index: usize) -> Option<&'a str> {
    line.arg_position(index)
        .and_then(|position| line.field(position + 1))
}

/// Parse |-fail|POKEMON|ACTION
pub fn parse_fail(line: &Line, _dex: &Dex) -> Result<BattleEvent> {
    let pokemon = parse_pokemon(line, 0)?;

    if line.fields().len() < 2 {
        return Ok(BattleEvent::Fail {
            pokemon,
            effect: None,
        });
    }

    let effect = if let Some(from) = line.tag("from") {
        // Weather failures come without a label
        Some(
            Effect::from_clause(from, Some(EffectType::Weather))?
                .with_secondary(line.arg(1))
                .with_source(parse_source(line)?),
        )
    } else if let Some(action) = line.opt_arg(1) {
        if is_lowercase(action) {
            let effect_type = if action.chars().count() == 3 {
                EffectType::Status
            } else {
                EffectType::Volatile
            };
            Some(Effect::new(Some(effect_type), action)?)
        } else {
            let name = action.strip_prefix("move:").unwrap_or(action);
            Some(
                Effect::new(Some(EffectType::Move), name)?
                    .with_secondary(field_after_arg(line, 1)),
            )
        }
    } else {
        None
    };

    Ok(BattleEvent::Fail { pokemon, effect })
}

/// Parse |-block|POKEMON|EFFECT|MOVE|ATTACKER
pub fn parse_block(line: &Line, _dex: &Dex) -> Result<BattleEvent> {
    let pokemon = parse_pokemon(line, 0)?;
    let source = match parse_source(line)? {
        Some(source) => Some(source),
        None => parse_opt_pokemon(line, 3)?,
    };
    let effect = Effect::from_clause(line.require(1, "effect")?, None)?.with_source(source);

    Ok(BattleEvent::Block {
        pokemon,
        effect,
        move_name: line.opt_arg(2).map(str::to_string),
    })
}

/// Parse |-notarget|POKEMON
pub fn parse_notarget(line: &Line, _dex: &Dex) -> Result<BattleEvent> {
    Ok(BattleEvent::NoTarget(parse_opt_pokemon(line, 0)?))
}

/// Parse |-miss|SOURCE|TARGET
pub fn parse_miss(line: &Line, _dex: &Dex) -> Result<BattleEvent> {
    Ok(BattleEvent::Miss {
        source: parse_pokemon(line, 0)?,
        target: parse_opt_pokemon(line, 1)?,
    })
}

/// Parse |-damage|POKEMON|HP STATUS
pub fn parse_damage(line: &Line, dex: &Dex) -> Result<BattleEvent> {
    Ok(BattleEvent::Damage {
        pokemon: parse_pokemon(line, 0)?,
        hp_status: parse_hp_status(line, 1, dex)?,
        effect: parse_from(line, None)?,
    })
}

/// Parse |-heal|POKEMON|HP STATUS
pub fn parse_heal(line: &Line, dex: &Dex) -> Result<BattleEvent> {
    Ok(BattleEvent::Heal {
        pokemon: parse_pokemon(line, 0)?,
        hp_status: parse_hp_status(line, 1, dex)?,
        effect: parse_from(line, None)?,
    })
}

/// Parse |-sethp|POKEMON|HP
pub fn parse_sethp(line: &Line, dex: &Dex) -> Result<BattleEvent> {
    Ok(BattleEvent::SetHp {
        pokemon: parse_pokemon(line, 0)?,
        hp_status: parse_hp_status(line, 1, dex)?,
        effect: parse_from(line, None)?,
    })
}

/// Parse |-status|POKEMON|STATUS
pub fn parse_status(line: &Line, dex: &Dex) -> Result<BattleEvent> {
    Ok(BattleEvent::Status {
        pokemon: parse_pokemon(line, 0)?,
        status: resolve(dex, line.require(1, "status")?, Category::Status)?,
        effect: parse_from(line, None)?,
    })
}

/// Parse |-curestatus|POKEMON|STATUS
pub fn parse_curestatus(line: &Line, dex: &Dex) -> Result<BattleEvent> {
    Ok(BattleEvent::CureStatus {
        pokemon: parse_pokemon(line, 0)?,
        status: resolve(dex, line.require(1, "status")?, Category::Status)?,
        effect: parse_from(line, None)?,
    })
}

/// Parse |-cureteam|POKEMON|[from] EFFECT
pub fn parse_cureteam(line: &Line, _dex: &Dex) -> Result<BattleEvent> {
    let source = parse_pokemon(line, 0)?;
    let from = line
        .tag("from")
        .ok_or_else(|| ParseError::MissingField("[from]".to_string()))?;

    Ok(BattleEvent::CureTeam(
        Effect::from_clause(from, None)?.with_source(Some(source)),
    ))
}

/// Parse |-boost|POKEMON|STAT|AMOUNT
pub fn parse_boost(line: &Line, _dex: &Dex) -> Result<BattleEvent> {
    Ok(BattleEvent::Boost {
        pokemon: parse_pokemon(line, 0)?,
        stat: parse_stat(line, 1)?,
        amount: parse_number(line, 2, "amount")?,
        effect: parse_from(line, None)?,
    })
}

/// Parse |-unboost|POKEMON|STAT|AMOUNT
pub fn parse_unboost(line: &Line, _dex: &Dex) -> Result<BattleEvent> {
    Ok(BattleEvent::Unboost {
        pokemon: parse_pokemon(line, 0)?,
        stat: parse_stat(line, 1)?,
        amount: parse_number(line, 2, "amount")?,
        effect: parse_from(line, None)?,
    })
}

/// Parse |-setboost|POKEMON|STAT|AMOUNT
pub fn parse_setboost(line: &Line, _dex: &Dex) -> Result<BattleEvent> {
    Ok(BattleEvent::SetBoost {
        pokemon: parse_pokemon(line, 0)?,
        stat: parse_stat(line, 1)?,
        amount: parse_number(line, 2, "amount")?,
        effect: parse_from(line, None)?,
    })
}

/// Parse |-swapboost|SOURCE|TARGET|STATS
pub fn parse_swapboost(line: &Line, _dex: &Dex) -> Result<BattleEvent> {
    let source = parse_pokemon(line, 0)?;
    let target = parse_pokemon(line, 1)?;

    let stats = line
        .opt_arg(2)
        .map(|stats| {
            stats
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| {
                    Stat::parse(s)
                        .ok_or_else(|| ParseError::InvalidFormat(format!("unknown stat {s:?}")))
                })
                .collect::<Result<Vec<_>, _>>()
        })
        .transpose()?
        .unwrap_or_default();

    Ok(BattleEvent::SwapBoost {
        source,
        target,
        stats,
        effect: parse_from(line, None)?,
    })
}

/// Parse |-invertboost|POKEMON
pub fn parse_invertboost(line: &Line, _dex: &Dex) -> Result<BattleEvent> {
    Ok(BattleEvent::InvertBoost {
        pokemon: parse_pokemon(line, 0)?,
        effect: parse_from(line, None)?,
    })
}

/// Parse |-clearboost|POKEMON
pub fn parse_clearboost(line: &Line, _dex: &Dex) -> Result<BattleEvent> {
    Ok(BattleEvent::ClearBoost {
        pokemon: parse_pokemon(line, 0)?,
        effect: parse_from(line, None)?,
    })
}

/// Parse |-clearallboost
pub fn parse_clearallboost(_line: &Line, _dex: &Dex) -> Result<BattleEvent> {
    Ok(BattleEvent::ClearAllBoost)
}

/// Parse |-clearpositiveboost|TARGET|POKEMON|EFFECT
pub fn parse_clearpositiveboost(line: &Line, _dex: &Dex) -> Result<BattleEvent> {
    let pokemon = parse_pokemon(line, 0)?;
    let source = parse_pokemon(line, 1)?;
    let effect = Effect::from_clause(line.require(2, "effect")?, None)?.with_source(Some(source));

    Ok(BattleEvent::ClearPositiveBoost { pokemon, effect })
}

/// Parse |-clearnegativeboost|POKEMON
pub fn parse_clearnegativeboost(line: &Line, _dex: &Dex) -> Result<BattleEvent> {
    Ok(BattleEvent::ClearNegativeBoost {
        pokemon: parse_pokemon(line, 0)?,
        effect: parse_from(line, None)?,
    })
}

/// Parse |-copyboost|SOURCE|TARGET
pub fn parse_copyboost(line: &Line, _dex: &Dex) -> Result<BattleEvent> {
    Ok(BattleEvent::CopyBoost {
        source: parse_pokemon(line, 0)?,
        target: parse_pokemon(line, 1)?,
        effect: parse_from(line, None)?,
    })
}

/// Parse |-weather|WEATHER
pub fn parse_weather(line: &Line, dex: &Dex) -> Result<BattleEvent> {
    let weather = resolve(dex, line.require(0, "weather")?, Category::Weather)?;
    let upkeep = line.has_tag("upkeep");
    let effect = if upkeep { None } else { parse_from(line, None)? };

    Ok(BattleEvent::Weather {
        weather,
        upkeep,
        effect,
    })
}

/// Parse |-fieldstart|CONDITION
pub fn parse_fieldstart(line: &Line, _dex: &Dex) -> Result<BattleEvent> {
    let effect = Effect::from_clause(line.require(0, "condition")?, None)?
        .with_secondary(line.tag("from"))
        .with_source(parse_source(line)?);

    Ok(BattleEvent::FieldStart(effect))
}

/// Parse |-fieldend|CONDITION
pub fn parse_fieldend(line: &Line, _dex: &Dex) -> Result<BattleEvent> {
    let effect = Effect::from_clause(line.require(0, "condition")?, Some(EffectType::Move))?;
    Ok(BattleEvent::FieldEnd(effect))
}

/// Parse |-sidestart|SIDE|CONDITION
pub fn parse_sidestart(line: &Line, _dex: &Dex) -> Result<BattleEvent> {
    Ok(BattleEvent::SideStart {
        player: parse_side(line, 0)?,
        condition: strip_label(line.require(1, "condition")?).to_string(),
    })
}

/// Parse |-sideend|SIDE|CONDITION
pub fn parse_sideend(line: &Line, _dex: &Dex) -> Result<BattleEvent> {
    let player = parse_side(line, 0)?;
    let condition = strip_label(line.require(1, "condition")?).to_string();

    // A condition ending with only a source was removed by that pokemon being there
    let effect = if line.has_tag("of") && !line.has_tag("from") {
        Some(Effect::new(Some(EffectType::Volatile), "existence")?.with_source(parse_source(line)?))
    } else {
        parse_from(line, None)?
    };

    Ok(BattleEvent::SideEnd {
        player,
        condition,
        effect,
    })
}

/// Parse |-swapsideconditions
pub fn parse_swapsideconditions(_line: &Line, _dex: &Dex) -> Result<BattleEvent> {
    Ok(BattleEvent::SwapSideConditions)
}

/// Parse |-start|POKEMON|EFFECT
///
/// The effect fields come in several shapes, tried in order:
///
/// - `typechange|TYPE`: the new type is the secondary
/// - a lower-case volatile (`confusion`), demoted to secondary by a `[from]`
/// - a labelled effect (`move: Yawn`)
/// - one or two capitalized moves (`Disable|Tackle`), both demoted by a `[from]`
pub fn parse_start(line: &Line, _dex: &Dex) -> Result<BattleEvent> {
    let pokemon = parse_pokemon(line, 0)?;
    let token = line.require(1, "effect")?;
    let from = line.tag("from");
    let source = parse_source(line)?;

    let effect = if token == "typechange" {
        let effect = match from {
            Some(from) => Effect::from_clause(from, None)?,
            None => Effect::new(Some(EffectType::Volatile), "typechange")?,
        };
        effect.with_secondary(line.arg(2)).with_source(source)
    } else if is_lowercase(token) {
        match from {
            Some(from) => Effect::from_clause(from, None)?
                .with_secondary(Some(token))
                .with_source(source),
            None => Effect::new(Some(EffectType::Volatile), token)?,
        }
    } else if token.contains(':') {
        Effect::from_clause(token, None)?.with_source(source)
    } else {
        let effect = match from {
            Some(from) => Effect::from_clause(from, None)?.with_secondary(Some(token)),
            None => Effect::new(Some(EffectType::Move), token)?.with_secondary(line.arg(2)),
        };
        effect.with_source(source)
    };

    Ok(BattleEvent::VolatileStart { pokemon, effect })
}

/// Parse |-end|POKEMON|EFFECT
pub fn parse_end(line: &Line, _dex: &Dex) -> Result<BattleEvent> {
    let pokemon = parse_pokemon(line, 0)?;
    let token = line.require(1, "effect")?;
    let from = line.tag("from");
    let silent = line.has_tag("silent");

    let effect = if is_lowercase(token) {
        match from {
            Some(from) => Effect::from_clause(from, None)?
                .with_secondary(Some(token))
                .with_source(parse_source(line)?),
            None => Effect::new(Some(EffectType::Volatile), token)?,
        }
    } else if token.contains(':') {
        Effect::from_clause(token, None)?.with_source(parse_source(line)?)
    } else {
        match from {
            Some(from) => Effect::from_clause(from, None)?
                .with_secondary(Some(token))
                .with_source(parse_source(line)?),
            None => Effect::new(Some(EffectType::Move), token)?.with_secondary(end_detail(line)),
        }
    };

    Ok(BattleEvent::VolatileEnd {
        pokemon,
        effect,
        silent,
    })
}

/// The detail following an ended move, brackets stripped (`[partiallytrapped]`)
fn end_detail<'a>(line: &Line<'a>) -> Option<&'a str> {
    let position = line.arg_position(1)?;
    match line.tokens().get(position + 1)? {
        Token::Arg(detail) => Some(*detail),
        Token::Tag { name, .. } if !matches!(*name, "from" | "of" | "silent") => Some(*name),
        Token::Tag { .. } => None,
    }
}

/// Parse |-crit|POKEMON
pub fn parse_crit(line: &Line, _dex: &Dex) -> Result<BattleEvent> {
    Ok(BattleEvent::Crit(parse_pokemon(line, 0)?))
}

/// Parse |-supereffective|POKEMON
pub fn parse_supereffective(line: &Line, _dex: &Dex) -> Result<BattleEvent> {
    Ok(BattleEvent::SuperEffective(parse_pokemon(line, 0)?))
}

/// Parse |-resisted|POKEMON
pub fn parse_resisted(line: &Line, _dex: &Dex) -> Result<BattleEvent> {
    Ok(BattleEvent::Resisted(parse_pokemon(line, 0)?))
}

/// Parse |-immune|POKEMON
pub fn parse_immune(line: &Line, _dex: &Dex) -> Result<BattleEvent> {
    Ok(BattleEvent::Immune {
        pokemon: parse_pokemon(line, 0)?,
        effect: parse_from(line, None)?,
    })
}

/// Parse |-item|POKEMON|ITEM
pub fn parse_item(line: &Line, _dex: &Dex) -> Result<BattleEvent> {
    Ok(BattleEvent::Item {
        pokemon: parse_pokemon(line, 0)?,
        item: line.require(1, "item")?.to_string(),
        effect: parse_from(line, None)?,
    })
}

/// Parse |-enditem|POKEMON|ITEM
///
/// Besides the usual `[from] TYPE: NAME`, a stolen or eaten item can be reported
/// as `[from] stealeat|[move] Bug Bite`: the move is the cause and the
/// unlabelled attribute is kept as the secondary. An unlabelled `[from]` with no
/// `[move]` carries no effect.
pub fn parse_enditem(line: &Line, _dex: &Dex) -> Result<BattleEvent> {
    let pokemon = parse_pokemon(line, 0)?;
    let item = line.require(1, "item")?.to_string();

    let effect = match line.tag("from") {
        None => None,
        Some(from) if from.contains(':') => Some(Effect::from_clause(from, None)?),
        Some(from) => match line.tag("move").filter(|m| !m.is_empty()) {
            Some(move_name) => {
                Some(Effect::new(Some(EffectType::Move), move_name)?.with_secondary(Some(from)))
            }
            None => None,
        },
    };
    let effect = match effect {
        Some(effect) => Some(effect.with_source(parse_source(line)?)),
        None => None,
    };

    Ok(BattleEvent::EndItem {
        pokemon,
        item,
        eat: line.has_tag("eat"),
        effect,
    })
}

/// Parse |-ability|POKEMON|ABILITY
pub fn parse_ability(line: &Line, dex: &Dex) -> Result<BattleEvent> {
    Ok(BattleEvent::Ability {
        pokemon: parse_pokemon(line, 0)?,
        ability: resolve(dex, line.require(1, "ability")?, Category::Ability)?,
        effect: parse_from(line, None)?,
    })
}

/// Parse |-endability|POKEMON
pub fn parse_endability(line: &Line, _dex: &Dex) -> Result<BattleEvent> {
    Ok(BattleEvent::EndAbility {
        pokemon: parse_pokemon(line, 0)?,
        effect: parse_from(line, None)?,
    })
}

/// Parse |-transform|POKEMON|SPECIES
pub fn parse_transform(line: &Line, _dex: &Dex) -> Result<BattleEvent> {
    Ok(BattleEvent::Transform {
        source: parse_pokemon(line, 0)?,
        target: parse_pokemon(line, 1)?,
        effect: parse_from(line, None)?,
    })
}

/// Parse |-mega|POKEMON|MEGASTONE
pub fn parse_mega(line: &Line, dex: &Dex) -> Result<BattleEvent> {
    Ok(BattleEvent::Mega {
        pokemon: parse_pokemon(line, 0)?,
        species: resolve(dex, line.require(1, "species")?, Category::Species)?,
        megastone: line.opt_arg(2).map(str::to_string),
    })
}

/// Parse |-primal|POKEMON
pub fn parse_primal(line: &Line, _dex: &Dex) -> Result<BattleEvent> {
    Ok(BattleEvent::Primal {
        pokemon: parse_pokemon(line, 0)?,
        item: line.opt_arg(1).map(str::to_string),
    })
}

/// Parse |-burst|POKEMON|SPECIES|ITEM
pub fn parse_burst(line: &Line, dex: &Dex) -> Result<BattleEvent> {
    Ok(BattleEvent::Burst {
        pokemon: parse_pokemon(line, 0)?,
        species: resolve(dex, line.require(1, "species")?, Category::Species)?,
        item: line.opt_arg(2).map(str::to_string),
    })
}

/// Parse |-zpower|POKEMON
pub fn parse_zpower(line: &Line, _dex: &Dex) -> Result<BattleEvent> {
    Ok(BattleEvent::ZPower(parse_pokemon(line, 0)?))
}

/// Parse |-zbroken|POKEMON
pub fn parse_zbroken(line: &Line, _dex: &Dex) -> Result<BattleEvent> {
    Ok(BattleEvent::ZBroken(parse_pokemon(line, 0)?))
}

/// Parse |-activate|EFFECT (with optional Pokemon and other fields)
pub fn parse_activate(line: &Line, _dex: &Dex) -> Result<BattleEvent> {
    // First part might be a Pokemon or an effect
    let (pokemon, index) = match parse_opt_pokemon(line, 0) {
        Ok(Some(pokemon)) => (Some(pokemon), 1),
        Ok(None) => (None, 1),
        Err(_) => (None, 0),
    };
    let token = line.require(index, "effect")?;

    if is_lowercase(token) {
        return Ok(BattleEvent::Activate {
            pokemon,
            effect: Effect::new(Some(EffectType::Volatile), token)?,
        });
    }

    let effect = Effect::from_clause(token, Some(EffectType::Move))?;
    let next = line
        .arg_position(index)
        .and_then(|position| line.tokens().get(position + 1));

    // Any other field, bracketed or not, is kept raw as the secondary
    let effect = match next {
        None => effect,
        Some(token) if token.is_tag("of") => effect.with_source(parse_source(line)?),
        // Reported again by a later line
        Some(token) if token.is_tag("damage") || token.is_tag("consumed") => effect,
        Some(_) => effect
            .with_secondary(field_after_arg(line, index))
            .with_source(parse_source(line)?),
    };

    Ok(BattleEvent::Activate { pokemon, effect })
}

/// Parse |-hint|MESSAGE
pub fn parse_hint(line: &Line, _dex: &Dex) -> Result<BattleEvent> {
    Ok(BattleEvent::Hint(line.rest(0)))
}

/// Parse |-center
pub fn parse_center(_line: &Line, _dex: &Dex) -> Result<BattleEvent> {
    Ok(BattleEvent::Center)
}

/// Parse |-message|MESSAGE
pub fn parse_message(line: &Line, _dex: &Dex) -> Result<BattleEvent> {
    Ok(BattleEvent::Message(line.rest(0)))
}

/// Parse |-combine
pub fn parse_combine(_line: &Line, _dex: &Dex) -> Result<BattleEvent> {
    Ok(BattleEvent::Combine)
}

/// Parse |-waiting|SOURCE|TARGET
pub fn parse_waiting(line: &Line, _dex: &Dex) -> Result<BattleEvent> {
    Ok(BattleEvent::Waiting {
        source: parse_pokemon(line, 0)?,
        target: parse_pokemon(line, 1)?,
    })
}

/// Parse |-prepare|ATTACKER|MOVE or |-prepare|ATTACKER|MOVE|DEFENDER
pub fn parse_prepare(line: &Line, _dex: &Dex) -> Result<BattleEvent> {
    Ok(BattleEvent::Prepare {
        attacker: parse_pokemon(line, 0)?,
        move_name: line.require(1, "move")?.to_string(),
        defender: parse_opt_pokemon(line, 2)?,
    })
}

/// Parse |-mustrecharge|POKEMON
pub fn parse_mustrecharge(line: &Line, _dex: &Dex) -> Result<BattleEvent> {
    Ok(BattleEvent::MustRecharge(parse_pokemon(line, 0)?))
}

/// Parse |-nothing
pub fn parse_nothing(_line: &Line, _dex: &Dex) -> Result<BattleEvent> {
    Ok(BattleEvent::Nothing)
}

/// Parse |-hitcount|POKEMON|NUM
pub fn parse_hitcount(line: &Line, _dex: &Dex) -> Result<BattleEvent> {
    Ok(BattleEvent::HitCount {
        pokemon: parse_pokemon(line, 0)?,
        count: parse_number(line, 1, "hit count")?,
    })
}

/// Parse |-singlemove|POKEMON|MOVE
pub fn parse_singlemove(line: &Line, dex: &Dex) -> Result<BattleEvent> {
    Ok(BattleEvent::SingleMove {
        pokemon: parse_pokemon(line, 0)?,
        move_id: resolve(dex, line.require(1, "move")?, Category::Move)?,
    })
}

/// Parse |-singleturn|POKEMON|MOVE
pub fn parse_singleturn(line: &Line, dex: &Dex) -> Result<BattleEvent> {
    let move_name = strip_label(line.require(1, "move")?);

    Ok(BattleEvent::SingleTurn {
        pokemon: parse_pokemon(line, 0)?,
        move_id: resolve(dex, move_name, Category::Move)?,
    })
}

/// Parse |-formechange|POKEMON|SPECIES|HP STATUS
pub fn parse_formechange(line: &Line, dex: &Dex) -> Result<BattleEvent> {
    Ok(BattleEvent::FormeChange {
        pokemon: parse_pokemon(line, 0)?,
        species: resolve(dex, line.require(1, "species")?, Category::Species)?,
        hp_status: parse_opt_hp_status(line, 2, dex)?,
        effect: parse_from(line, None)?,
    })
}

/// Parse |-terastallize|POKEMON|TYPE
pub fn parse_terastallize(line: &Line, dex: &Dex) -> Result<BattleEvent> {
    Ok(BattleEvent::Terastallize {
        pokemon: parse_pokemon(line, 0)?,
        tera_type: resolve(dex, line.require(1, "type")?, Category::Type)?,
    })
}

/// Parse |-fieldactivate|EFFECT
pub fn parse_fieldactivate(line: &Line, _dex: &Dex) -> Result<BattleEvent> {
    let effect = Effect::from_clause(line.require(0, "effect")?, None)?;
    Ok(BattleEvent::FieldActivate(effect))
}

/// Parse |-anim|SOURCE|MOVE|TARGET
pub fn parse_anim(line: &Line, dex: &Dex) -> Result<BattleEvent> {
    let source = parse_pokemon(line, 0)?;
    let move_id = resolve(dex, line.require(1, "move")?, Category::Move)?;
    let notarget = line.has_tag("notarget");

    let target = if notarget {
        line.opt_arg(2)
            .map(PokemonIdentifier::from_slotted)
            .transpose()?
    } else {
        parse_opt_pokemon(line, 2)?
    };

    Ok(BattleEvent::Anim {
        source,
        move_id,
        target,
        notarget,
    })
}
