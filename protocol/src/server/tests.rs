#[cfg(test)]
mod tests {
    use crate::server::general::{GeneralEvent, RoomType, User, parse_general};
    use crate::server::{
        Avatar, BattleEvent, Effect, EffectType, ErrorState, Gender, HpStatus, MessageKind,
        Parser, Player, PokemonDetails, PokemonIdentifier, RequestType, Stat, classify, parse,
        parse_frame, parse_log,
    };
    use pokeline_dex::{Category, Dex, DexId, dex};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn event(line: &str) -> BattleEvent {
        parse(line).event
    }

    fn ident(s: &str) -> PokemonIdentifier {
        PokemonIdentifier::parse(s).unwrap()
    }

    fn id(name: &str, category: Category) -> DexId {
        dex().resolve(name, category).unwrap()
    }

    fn effect(
        effect_type: Option<EffectType>,
        name: &str,
        secondary: Option<&str>,
        source: Option<&str>,
    ) -> Effect {
        Effect {
            effect_type,
            name: name.to_string(),
            secondary: secondary.map(str::to_string),
            source: source.map(ident),
        }
    }

    fn error_state(line: &str) -> Option<ErrorState> {
        parse(line).error_state()
    }

    #[test]
    fn test_parse_switch() {
        let message = parse("|switch|p2a: Toxicroak|Toxicroak, L81, F|100/100");

        assert_eq!(message.kind(), MessageKind::Switch);
        assert_eq!(
            message.event,
            BattleEvent::Switch {
                pokemon: PokemonIdentifier {
                    player: Player::P2,
                    slot: Some('a'),
                    identity: "TOXICROAK".to_string(),
                },
                details: PokemonDetails {
                    species: DexId::new(Category::Species, 454000),
                    level: 81,
                    gender: Some(Gender::Female),
                    shiny: false,
                    tera_type: None,
                },
                hp_status: HpStatus {
                    current: 100,
                    max: Some(100),
                    status: None,
                },
            }
        );
    }

    #[test]
    fn test_parse_damage_from_status() {
        let message = parse("|-damage|p2a: Leavanny|180/281 tox|[from] psn");

        assert_eq!(
            message.event,
            BattleEvent::Damage {
                pokemon: ident("p2a: Leavanny"),
                hp_status: HpStatus {
                    current: 180,
                    max: Some(281),
                    status: Some(DexId::new(Category::Status, 5)),
                },
                effect: Some(effect(None, "psn", None, None)),
            }
        );
    }

    #[test]
    fn test_parse_fainted_hp() {
        let BattleEvent::Damage { hp_status, .. } = event("|-damage|p1a: Pikachu|0 fnt") else {
            panic!("expected damage");
        };

        assert_eq!(hp_status.current, 0);
        assert_eq!(hp_status.max, None);
        assert_eq!(hp_status.status, Some(DexId::new(Category::Status, 1)));
        assert!(hp_status.is_fainted());
    }

    #[test]
    fn test_parse_unknown_kind() {
        let message = parse("|totallymadeupkind|foo");

        assert_eq!(message.kind(), MessageKind::Unknown);
        assert_eq!(
            message.event,
            BattleEvent::Unknown {
                error: ErrorState::UnknownKind,
                detail: Some("totallymadeupkind".to_string()),
            }
        );
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(event(""), BattleEvent::Empty);
        assert_eq!(event("|"), BattleEvent::Empty);
        assert_eq!(event("|request|"), BattleEvent::Empty);
        assert_eq!(classify("|request|"), MessageKind::Empty);
        assert!(!parse("|request|").is_error());
        assert_eq!(classify("|request| "), MessageKind::Empty);
        assert_eq!(event("|request|  "), BattleEvent::Empty);
    }

    #[test]
    fn test_trailing_newline_stripped() {
        let message = parse("|turn|4\r\n");
        assert_eq!(message.raw, "|turn|4");
        assert_eq!(message.event, BattleEvent::Turn(4));
    }

    #[test]
    fn test_classify_aliases() {
        assert_eq!(classify("|j|Red"), MessageKind::Join);
        assert_eq!(classify("|L|Red"), MessageKind::Leave);
        assert_eq!(classify("|message|hi"), MessageKind::Message);
        assert_eq!(classify("|-message|hi"), MessageKind::Message);
        assert_eq!(classify("|t:|1700000000"), MessageKind::Timestamp);
        assert_eq!(classify("|nope|"), MessageKind::Unknown);
    }

    #[test]
    fn test_every_tag_round_trips() {
        for kind in MessageKind::TAGGED {
            assert_eq!(MessageKind::from_tag(kind.as_tag()), Some(*kind));
        }
    }

    #[test]
    fn test_malformed_fields_are_parse_errors() {
        assert_eq!(error_state("|turn|abc"), Some(ErrorState::ParseError));
        assert_eq!(error_state("|switch|p2a: Toxicroak"), Some(ErrorState::ParseError));
        assert_eq!(error_state("|faint|Toxicroak"), Some(ErrorState::ParseError));
        assert_eq!(error_state("|-boost|p1a: Scizor|atk|lots"), Some(ErrorState::ParseError));
        assert_eq!(error_state("|-weather|Cloudy"), Some(ErrorState::ParseError));
        assert_eq!(error_state("|swap|p1a: Scizor|7"), Some(ErrorState::ParseError));
        assert_eq!(error_state("|request|{not json"), Some(ErrorState::ParseError));
    }

    #[test]
    fn test_parse_error_detail() {
        let BattleEvent::Unknown { detail, .. } = event("|-weather|Cloudy") else {
            panic!("expected unknown");
        };

        assert!(detail.is_some_and(|d| d.contains("Cloudy")));
    }

    #[test]
    fn test_entity_outside_registry() {
        let line = "|-singlemove|p1a: Banette|Grudge";
        assert_eq!(error_state(line), Some(ErrorState::ParseError));

        let custom = Dex::from_json(r#"{"move": [["Grudge", 28800]]}"#).unwrap();
        assert_eq!(
            Parser::with_dex(&custom).parse(line).event,
            BattleEvent::SingleMove {
                pokemon: ident("p1a: Banette"),
                move_id: DexId::new(Category::Move, 28800),
            }
        );
    }

    #[test]
    fn test_parse_player() {
        assert_eq!(
            event("|player|p1|Red|lucas|1500"),
            BattleEvent::BattlePlayer {
                player: Player::P1,
                username: "Red".to_string(),
                avatar: Some(Avatar::Custom("lucas".to_string())),
                rating: Some(1500),
            }
        );

        assert_eq!(
            event("|player|p2|Blue|266|"),
            BattleEvent::BattlePlayer {
                player: Player::P2,
                username: "Blue".to_string(),
                avatar: Some(Avatar::Id(266)),
                rating: None,
            }
        );
    }

    #[test]
    fn test_parse_init_messages() {
        assert_eq!(event("|gen|9"), BattleEvent::Gen(DexId::new(Category::Gen, 9)));
        assert_eq!(
            event("|teamsize|p2|6"),
            BattleEvent::TeamSize {
                player: Player::P2,
                size: 6,
            }
        );
        assert_eq!(
            event("|rule|Sleep Clause Mod: Limit one foe put to sleep"),
            BattleEvent::Rule {
                name: "Sleep Clause Mod".to_string(),
                description: "Limit one foe put to sleep".to_string(),
            }
        );
        assert_eq!(event("|rated|"), BattleEvent::Rated(None));
        assert_eq!(event("|teampreview|4"), BattleEvent::TeamPreview(Some(4)));
        assert_eq!(event("|teampreview"), BattleEvent::TeamPreview(None));
    }

    #[test]
    fn test_parse_poke() {
        let BattleEvent::Poke {
            player,
            details,
            has_item,
        } = event("|poke|p1|Pikachu, L50, M|item")
        else {
            panic!("expected poke");
        };

        assert_eq!(player, Player::P1);
        assert_eq!(details.species, id("Pikachu", Category::Species));
        assert_eq!(details.level, 50);
        assert!(has_item);

        let BattleEvent::Poke { has_item, .. } = event("|poke|p2|Scizor, F|") else {
            panic!("expected poke");
        };
        assert!(!has_item);
    }

    #[test]
    fn test_parse_move() {
        assert_eq!(
            event("|move|p1a: Pikachu|Thunderbolt|p2a: Gengar|[miss]"),
            BattleEvent::Move {
                pokemon: ident("p1a: Pikachu"),
                move_name: "Thunderbolt".to_string(),
                target: Some(ident("p2a: Gengar")),
                miss: true,
                still: false,
                anim: None,
                effect: None,
            }
        );

        let BattleEvent::Move { target, effect, .. } =
            event("|move|p2a: Kyogre|Tackle|p1a: Gengar|[from]Metronome")
        else {
            panic!("expected move");
        };
        assert_eq!(target, Some(ident("p1a: Gengar")));
        assert_eq!(effect, Some(effect_of(EffectType::Move, "Metronome")));
    }

    fn effect_of(effect_type: EffectType, name: &str) -> Effect {
        effect(Some(effect_type), name, None, None)
    }

    #[test]
    fn test_parse_move_without_target() {
        let BattleEvent::Move { target, still, .. } =
            event("|move|p1a: Scizor|Bullet Punch||[still]")
        else {
            panic!("expected move");
        };

        assert_eq!(target, None);
        assert!(still);
    }

    #[test]
    fn test_parse_cant() {
        assert_eq!(
            event("|cant|p1a: Gengar|Disable|Hyper Beam"),
            BattleEvent::Cant {
                pokemon: ident("p1a: Gengar"),
                reason: "Disable".to_string(),
                move_name: Some("Hyper Beam".to_string()),
            }
        );
    }

    #[test]
    fn test_parse_boosts() {
        assert_eq!(
            event("|-boost|p1a: Scizor|atk|2"),
            BattleEvent::Boost {
                pokemon: ident("p1a: Scizor"),
                stat: Stat::Atk,
                amount: 2,
                effect: None,
            }
        );

        let BattleEvent::SwapBoost { stats, .. } =
            event("|-swapboost|p1a: Gengar|p2a: Scizor|atk, spa")
        else {
            panic!("expected swapboost");
        };
        assert_eq!(stats, vec![Stat::Atk, Stat::Spa]);
    }

    #[test]
    fn test_parse_status_resolves_registry() {
        let BattleEvent::Status { status, .. } = event("|-status|p2a: Gengar|par") else {
            panic!("expected status");
        };
        assert_eq!(status, DexId::new(Category::Status, 3));
    }

    #[test]
    fn test_parse_weather() {
        assert_eq!(
            event("|-weather|RainDance|[from] ability: Drizzle|[of] p2a: Kyogre"),
            BattleEvent::Weather {
                weather: DexId::new(Category::Weather, 2),
                upkeep: false,
                effect: Some(effect(
                    Some(EffectType::Ability),
                    "Drizzle",
                    None,
                    Some("p2a: Kyogre")
                )),
            }
        );

        let BattleEvent::Weather { upkeep, effect, .. } = event("|-weather|RainDance|[upkeep]")
        else {
            panic!("expected weather");
        };
        assert!(upkeep);
        assert_eq!(effect, None);
    }

    #[test]
    fn test_parse_volatile_start() {
        let cases = [
            (
                "|-start|p1a: Gengar|Substitute",
                effect(Some(EffectType::Move), "Substitute", None, None),
            ),
            (
                "|-start|p2a: Scizor|Disable|Tackle",
                effect(Some(EffectType::Move), "Disable", Some("Tackle"), None),
            ),
            (
                "|-start|p2a: Kyogre|Substitute|[from] move: Metronome",
                effect(Some(EffectType::Move), "Metronome", Some("Substitute"), None),
            ),
            (
                "|-start|p1a: Gengar|typechange|Electric",
                effect(Some(EffectType::Volatile), "typechange", Some("Electric"), None),
            ),
            (
                "|-start|p1a: Gengar|typechange|Fire|[from] ability: Protean",
                effect(Some(EffectType::Ability), "Protean", Some("Fire"), None),
            ),
            (
                "|-start|p2a: Pikachu|confusion",
                effect(Some(EffectType::Volatile), "confusion", None, None),
            ),
            (
                "|-start|p1a: Ditto|perish3|[silent]",
                effect(Some(EffectType::Volatile), "perish3", None, None),
            ),
            (
                "|-start|p2a: Pikachu|confusion|[from] item: Berry Juice",
                effect(Some(EffectType::Item), "Berry Juice", Some("confusion"), None),
            ),
            (
                "|-start|p1a: Pikachu|move: Yawn|[of] p2a: Gengar",
                effect(Some(EffectType::Move), "Yawn", None, Some("p2a: Gengar")),
            ),
            (
                "|-start|p1a: Gengar|Disable|Tackle|[from] ability: Cursed Body|[of] p2a: Pikachu",
                effect(
                    Some(EffectType::Ability),
                    "Cursed Body",
                    Some("Disable"),
                    Some("p2a: Pikachu"),
                ),
            ),
        ];

        for (line, expected) in cases {
            let BattleEvent::VolatileStart { effect, .. } = event(line) else {
                panic!("expected volatile start for {line}");
            };
            assert_eq!(effect, expected, "{line}");
        }
    }

    #[test]
    fn test_parse_volatile_end() {
        let cases = [
            (
                "|-end|p1a: Gengar|Substitute",
                effect(Some(EffectType::Move), "Substitute", None, None),
                false,
            ),
            (
                "|-end|p1a: Gengar|confusion",
                effect(Some(EffectType::Volatile), "confusion", None, None),
                false,
            ),
            (
                "|-end|p2a: Kyogre|Bind|[partiallytrapped]",
                effect(Some(EffectType::Move), "Bind", Some("partiallytrapped"), None),
                false,
            ),
            (
                "|-end|p1a: Pikachu|move: Yawn|[silent]",
                effect(Some(EffectType::Move), "Yawn", None, None),
                true,
            ),
            (
                "|-end|p2a: Scizor|Substitute|[from] move: Knock Off|[of] p1a: Pikachu",
                effect(
                    Some(EffectType::Move),
                    "Knock Off",
                    Some("Substitute"),
                    Some("p1a: Pikachu"),
                ),
                false,
            ),
        ];

        for (line, expected, expected_silent) in cases {
            let BattleEvent::VolatileEnd { effect, silent, .. } = event(line) else {
                panic!("expected volatile end for {line}");
            };
            assert_eq!(effect, expected, "{line}");
            assert_eq!(silent, expected_silent, "{line}");
        }
    }

    #[test]
    fn test_parse_field_conditions() {
        assert_eq!(
            event("|-fieldstart|move: Electric Terrain|[from] ability: Electric Surge|[of] p1a: Pikachu"),
            BattleEvent::FieldStart(effect(
                Some(EffectType::Move),
                "Electric Terrain",
                Some("ability: Electric Surge"),
                Some("p1a: Pikachu"),
            ))
        );
        assert_eq!(
            event("|-fieldend|move: Electric Terrain"),
            BattleEvent::FieldEnd(effect_of(EffectType::Move, "Electric Terrain"))
        );
        assert_eq!(
            event("|-fieldend|Trick Room"),
            BattleEvent::FieldEnd(effect_of(EffectType::Move, "Trick Room"))
        );
    }

    #[test]
    fn test_parse_side_conditions() {
        assert_eq!(
            event("|-sidestart|p1: Red|move: Stealth Rock"),
            BattleEvent::SideStart {
                player: Player::P1,
                condition: "Stealth Rock".to_string(),
            }
        );
        assert_eq!(
            event("|-sideend|p1: Red|move: Stealth Rock|[from] move: Rapid Spin|[of] p1a: Scizor"),
            BattleEvent::SideEnd {
                player: Player::P1,
                condition: "Stealth Rock".to_string(),
                effect: Some(effect(
                    Some(EffectType::Move),
                    "Rapid Spin",
                    None,
                    Some("p1a: Scizor")
                )),
            }
        );
        assert_eq!(
            event("|-sideend|p2: Blue|Reflect|[of] p1a: Pikachu"),
            BattleEvent::SideEnd {
                player: Player::P2,
                condition: "Reflect".to_string(),
                effect: Some(effect(
                    Some(EffectType::Volatile),
                    "existence",
                    None,
                    Some("p1a: Pikachu")
                )),
            }
        );
    }

    #[test]
    fn test_parse_activate() {
        assert_eq!(
            event("|-activate|p2a: Gengar|move: Protect"),
            BattleEvent::Activate {
                pokemon: Some(ident("p2a: Gengar")),
                effect: effect_of(EffectType::Move, "Protect"),
            }
        );
        assert_eq!(
            event("|-activate|p1a: Pikachu|confusion"),
            BattleEvent::Activate {
                pokemon: Some(ident("p1a: Pikachu")),
                effect: effect_of(EffectType::Volatile, "confusion"),
            }
        );
        assert_eq!(
            event("|-activate|p1a: Blissey|ability: Mummy|Intimidate|[of] p2a: Gengar"),
            BattleEvent::Activate {
                pokemon: Some(ident("p1a: Blissey")),
                effect: effect(
                    Some(EffectType::Ability),
                    "Mummy",
                    Some("Intimidate"),
                    Some("p2a: Gengar")
                ),
            }
        );
        assert_eq!(
            event("|-activate|p1a: Ditto|item: Leftovers|[consumed]"),
            BattleEvent::Activate {
                pokemon: Some(ident("p1a: Ditto")),
                effect: effect_of(EffectType::Item, "Leftovers"),
            }
        );
        assert_eq!(
            event("|-activate||move: Celebrate"),
            BattleEvent::Activate {
                pokemon: None,
                effect: effect_of(EffectType::Move, "Celebrate"),
            }
        );
        assert_eq!(
            event("|-activate|move: Court Change"),
            BattleEvent::Activate {
                pokemon: None,
                effect: effect_of(EffectType::Move, "Court Change"),
            }
        );
        assert_eq!(
            event("|-activate|p1a: Pikachu|move: Protect|[silent]"),
            BattleEvent::Activate {
                pokemon: Some(ident("p1a: Pikachu")),
                effect: effect(Some(EffectType::Move), "Protect", Some("[silent]"), None),
            }
        );
    }

    #[test]
    fn test_parse_enditem() {
        assert_eq!(
            event("|-enditem|p1a: Pikachu|Sitrus Berry|[eat]"),
            BattleEvent::EndItem {
                pokemon: ident("p1a: Pikachu"),
                item: "Sitrus Berry".to_string(),
                eat: true,
                effect: None,
            }
        );

        let cases = [
            (
                "|-enditem|p2a: Gengar|Leftovers|[from] move: Knock Off|[of] p1a: Scizor",
                effect(Some(EffectType::Move), "Knock Off", None, Some("p1a: Scizor")),
            ),
            (
                "|-enditem|p2a: Blissey|Sitrus Berry|[from] stealeat|[move] Bug Bite|[of] p1a: Scizor",
                effect(
                    Some(EffectType::Move),
                    "Bug Bite",
                    Some("stealeat"),
                    Some("p1a: Scizor"),
                ),
            ),
        ];

        for (line, expected) in cases {
            let BattleEvent::EndItem { effect, .. } = event(line) else {
                panic!("expected enditem for {line}");
            };
            assert_eq!(effect, Some(expected), "{line}");
        }

        // An unlabelled [from] without [move] carries no effect
        let BattleEvent::EndItem { effect, eat, .. } =
            event("|-enditem|p2a: Blissey|Sitrus Berry|[from] stealeat")
        else {
            panic!("expected enditem");
        };
        assert_eq!(effect, None);
        assert!(!eat);
    }

    #[test]
    fn test_parse_fail() {
        let cases = [
            ("|-fail|p1a: Pikachu", None),
            (
                "|-fail|p1a: Pikachu|tox",
                Some(effect_of(EffectType::Status, "tox")),
            ),
            (
                "|-fail|p1a: Pikachu|move: Substitute",
                Some(effect_of(EffectType::Move, "Substitute")),
            ),
            (
                "|-fail|p1a: Pikachu|move: Substitute|[weak]",
                Some(effect(Some(EffectType::Move), "Substitute", Some("[weak]"), None)),
            ),
            (
                "|-fail|p2a: Gengar|unboost|[from] ability: Clear Body|[of] p2a: Gengar",
                Some(effect(
                    Some(EffectType::Ability),
                    "Clear Body",
                    Some("unboost"),
                    Some("p2a: Gengar"),
                )),
            ),
            (
                "|-fail|p1a: Kyogre|move: Sunny Day|[from] Primordial Sea",
                Some(effect(
                    Some(EffectType::Weather),
                    "Primordial Sea",
                    Some("move: Sunny Day"),
                    None,
                )),
            ),
        ];

        for (line, expected) in cases {
            let BattleEvent::Fail { effect, .. } = event(line) else {
                panic!("expected fail for {line}");
            };
            assert_eq!(effect, expected, "{line}");
        }
    }

    #[test]
    fn test_parse_block() {
        assert_eq!(
            event("|-block|p2a: Gengar|move: Protect|Tackle|p1a: Pikachu"),
            BattleEvent::Block {
                pokemon: ident("p2a: Gengar"),
                effect: effect(Some(EffectType::Move), "Protect", None, Some("p1a: Pikachu")),
                move_name: Some("Tackle".to_string()),
            }
        );
    }

    #[test]
    fn test_parse_cureteam() {
        assert_eq!(
            event("|-cureteam|p1a: Blissey|[from] move: Heal Bell"),
            BattleEvent::CureTeam(effect(
                Some(EffectType::Move),
                "Heal Bell",
                None,
                Some("p1a: Blissey")
            ))
        );
        assert_eq!(error_state("|-cureteam|p1a: Blissey"), Some(ErrorState::ParseError));
    }

    #[test]
    fn test_parse_registry_backed_kinds() {
        let BattleEvent::Ability { ability, .. } =
            event("|-ability|p2a: Kyogre|Drizzle|[from] ability: Trace|[of] p1a: Gengar")
        else {
            panic!("expected ability");
        };
        assert_eq!(ability, id("Drizzle", Category::Ability));

        let BattleEvent::Mega { species, megastone, .. } =
            event("|-mega|p1a: Venusaur|Venusaur-Mega|Venusaurite")
        else {
            panic!("expected mega");
        };
        assert_eq!(species, DexId::new(Category::Species, 3001));
        assert_eq!(megastone.as_deref(), Some("Venusaurite"));

        let BattleEvent::SingleTurn { move_id, .. } = event("|-singleturn|p2a: Scizor|move: Protect")
        else {
            panic!("expected singleturn");
        };
        assert_eq!(move_id, DexId::new(Category::Move, 18200));

        let BattleEvent::Terastallize { tera_type, .. } =
            event("|-terastallize|p1a: Pikachu|Electric")
        else {
            panic!("expected terastallize");
        };
        assert_eq!(tera_type, DexId::new(Category::Type, 4));
    }

    #[test]
    fn test_parse_anim() {
        assert_eq!(
            event("|-anim|p1a: Scizor|Bullet Punch|p2a: Gengar"),
            BattleEvent::Anim {
                source: ident("p1a: Scizor"),
                move_id: DexId::new(Category::Move, 41800),
                target: Some(ident("p2a: Gengar")),
                notarget: false,
            }
        );

        let BattleEvent::Anim { target, notarget, .. } =
            event("|-anim|p1a: Scizor|Bullet Punch||[notarget]")
        else {
            panic!("expected anim");
        };
        assert_eq!(target, None);
        assert!(notarget);
    }

    #[test]
    fn test_parse_room_lines() {
        assert_eq!(
            event("|raw|<b>a|b</b>"),
            BattleEvent::Raw("<b>a|b</b>".to_string())
        );
        assert_eq!(event("|J|Red"), BattleEvent::Join("Red".to_string()));
        assert_eq!(event("|init|battle"), BattleEvent::Init(Some("battle".to_string())));
        assert_eq!(event("|deinit"), BattleEvent::Deinit);
    }

    const REQUEST: &str = r#"{"active":[{"moves":[{"move":"Thunderbolt","id":"thunderbolt","pp":24,"maxpp":24,"target":"normal","disabled":false},{"move":"Volt Switch","id":"voltswitch","pp":0,"maxpp":32,"target":"normal","disabled":false},{"move":"Quick Attack","id":"quickattack","pp":48,"maxpp":48,"target":"normal","disabled":"Disable"}],"canTerastallize":"Electric"}],"side":{"name":"Red","id":"p1","pokemon":[{"ident":"p1: Pikachu","details":"Pikachu, L50, M","condition":"100/100","active":true,"stats":{"atk":100,"def":80,"spa":100,"spd":90,"spe":150},"moves":["thunderbolt","voltswitch","quickattack"],"baseAbility":"static","item":"leftovers","pokeball":"pokeball","ability":"static","teraType":"Electric","terastallized":""},{"ident":"p1: Scizor","details":"Scizor, L50, F","condition":"0 fnt","active":false,"stats":{"atk":200,"def":150,"spa":80,"spd":120,"spe":90},"moves":["bulletpunch"],"baseAbility":"technician","item":"","ability":"technician"}]},"rqid":3}"#;

    #[test]
    fn test_parse_request() {
        let BattleEvent::Request(request) = event(&format!("|request|{REQUEST}")) else {
            panic!("expected request");
        };

        assert_eq!(request.request_type, RequestType::Active);
        assert_eq!(request.player, Player::P1);
        assert_eq!(request.username, "Red");
        assert_eq!(request.rqid, Some(3));
        assert!(request.needs_decision());
        assert!(!request.is_force_switch());

        let active = request.active.as_ref().unwrap();
        assert_eq!(active.len(), 1);
        assert!(active[0].can_tera);
        assert!(!active[0].can_zmove);

        let available = active[0].available_moves();
        assert_eq!(available.len(), 1);
        assert_eq!(available[0].1.id, id("Thunderbolt", Category::Move));
        assert_eq!(active[0].moves[2].disabled, Some(true));

        assert_eq!(request.pokemon.len(), 2);
        let pikachu = &request.pokemon[0];
        assert_eq!(pikachu.ident, ident("p1: Pikachu"));
        assert_eq!(pikachu.item, Some(DexId::new(Category::Item, 235)));
        assert_eq!(pikachu.tera_type, Some(DexId::new(Category::Type, 4)));
        assert_eq!(pikachu.terastallized, None);
        assert_eq!(pikachu.stats.spe, 150);
        assert_eq!(pikachu.moves.len(), 3);

        let scizor = &request.pokemon[1];
        assert_eq!(scizor.item, None);
        assert!(scizor.hp_status.is_fainted());
        assert!(request.available_switches().is_empty());
    }

    #[test]
    fn test_parse_request_types() {
        let side = r#""side":{"name":"Red","id":"p1","pokemon":[]}"#;

        let BattleEvent::Request(request) =
            event(&format!("|request|{{\"forceSwitch\":[true],{side},\"rqid\":5}}"))
        else {
            panic!("expected request");
        };
        assert_eq!(request.request_type, RequestType::ForceSwitch);
        assert!(request.is_force_switch());
        assert_eq!(request.active, None);

        let BattleEvent::Request(request) = event(&format!("|request|{{\"wait\":true,{side}}}"))
        else {
            panic!("expected request");
        };
        assert_eq!(request.request_type, RequestType::Wait);
        assert!(!request.needs_decision());

        let BattleEvent::Request(request) =
            event(&format!("|request|{{\"teamPreview\":true,{side}}}"))
        else {
            panic!("expected request");
        };
        assert_eq!(request.request_type, RequestType::TeamPreview);

        assert_eq!(
            error_state("|request|{\"wait\":true}"),
            Some(ErrorState::ParseError)
        );
    }

    #[test]
    fn test_parse_frame() {
        let frame = ">battle-gen9ou-1\n|\n|turn|3\n\n|-damage|p2a: Leavanny|180/281 tox|[from] psn\n";
        let frame = parse_frame(frame);

        assert_eq!(frame.room_id.as_deref(), Some("battle-gen9ou-1"));
        let kinds: Vec<_> = frame.messages.iter().map(|m| m.kind()).collect();
        assert_eq!(
            kinds,
            vec![MessageKind::Empty, MessageKind::Turn, MessageKind::Damage]
        );

        let frame = parse_frame("|turn|1\n|upkeep");
        assert_eq!(frame.room_id, None);
        assert_eq!(frame.messages.len(), 2);
    }

    #[test]
    fn test_parse_log() {
        let log = "|player|p1|Red|1\n|player|p2|Blue|2\n\n|gen|9\n|bogus|x\n|start\n";
        let messages = parse_log(log);

        assert_eq!(messages.len(), 5);
        assert_eq!(messages[2].event, BattleEvent::Gen(DexId::new(Category::Gen, 9)));
        assert_eq!(messages[3].error_state(), Some(ErrorState::UnknownKind));
        assert_eq!(messages[4].event, BattleEvent::BattleStart);
    }

    const FRAGMENTS: &[&str] = &[
        "p1a: Pikachu",
        "p2: Blue",
        "p3b:",
        ":",
        "Toxicroak, L81, F",
        "Pikachu, L, shiny",
        "100/100",
        "0 fnt",
        "12/ brn",
        "[from] item: Leftovers",
        "[from]",
        "[of] p2a: Gengar",
        "[of] nobody",
        "[silent]",
        "[",
        "]",
        "move: Protect",
        "ability:",
        "confusion",
        "Substitute",
        "atk",
        "-3",
        "99999999999",
        "{\"side\":",
        "null",
        "",
        " ",
        "ÿ",
        "漢字",
    ];

    #[test]
    fn test_parse_never_panics() {
        let mut rng = StdRng::seed_from_u64(0x5eed);

        for _ in 0..5000 {
            let kind = MessageKind::TAGGED[rng.gen_range(0..MessageKind::TAGGED.len())];
            let mut line = format!("|{}", kind.as_tag());
            for _ in 0..rng.gen_range(0..6) {
                line.push('|');
                if rng.gen_bool(0.2) {
                    let bytes: Vec<u8> = (0..rng.gen_range(0..12)).map(|_| rng.r#gen()).collect();
                    line.push_str(&String::from_utf8_lossy(&bytes).replace(['\r', '\n'], ""));
                } else {
                    line.push_str(FRAGMENTS[rng.gen_range(0..FRAGMENTS.len())]);
                }
            }

            let message = parse(&line);
            assert_eq!(message.raw, line);
            let _ = parse_general(&line);
        }
    }

    #[test]
    fn test_parse_challstr() {
        let message = parse_general("|challstr|4|1234abc");
        assert_eq!(message.event, GeneralEvent::Challstr("4|1234abc".into()));

        let message = parse_general("|challstr|");
        assert_eq!(message.error_state(), Some(ErrorState::ParseError));
    }

    #[test]
    fn test_parse_general_fallbacks() {
        assert_eq!(parse_general("").event, GeneralEvent::Empty);
        assert_eq!(
            parse_general("some plain text").event,
            GeneralEvent::Raw("some plain text".to_string())
        );
        assert_eq!(
            parse_general("|someunknown|data").event,
            GeneralEvent::Unknown {
                error: ErrorState::UnknownKind,
                detail: Some("someunknown".to_string()),
            }
        );
        assert_eq!(
            parse_general("|tournament|create|gen9ou").error_state(),
            Some(ErrorState::NotImplemented)
        );
        assert_eq!(
            parse_general("|usercount|many").error_state(),
            Some(ErrorState::ParseError)
        );
    }

    #[test]
    fn test_parse_updateuser() {
        let message = parse_general(
            r#"|updateuser| Guest 1|0|170|{"blockChallenges":true,"blockPMs":false,"language":"english"}"#,
        );
        let GeneralEvent::UpdateUser {
            user,
            named,
            avatar,
            settings,
        } = message.event
        else {
            panic!("expected updateuser");
        };

        assert_eq!(user.name, "Guest 1");
        assert_eq!(user.rank, None);
        assert!(!named);
        assert_eq!(avatar, Avatar::Id(170));

        let settings = settings.unwrap();
        assert!(settings.block_challenges);
        assert!(!settings.block_pms);
        assert_eq!(settings.language.as_deref(), Some("english"));
    }

    #[test]
    fn test_parse_pm() {
        let GeneralEvent::Pm {
            sender,
            is_challenge,
            challenge_format,
            ..
        } = parse_general("|pm|~Zarel| Red|/challenge|gen9randombattle").event
        else {
            panic!("expected pm");
        };
        assert_eq!(sender.rank, Some('~'));
        assert_eq!(sender.name, "Zarel");
        assert!(is_challenge);
        assert_eq!(challenge_format.as_deref(), Some("gen9randombattle"));

        let GeneralEvent::Pm {
            message,
            is_challenge,
            challenge_format,
            ..
        } = parse_general("|pm| Red| Blue|hi|there").event
        else {
            panic!("expected pm");
        };
        assert_eq!(message, "hi|there");
        assert!(!is_challenge);
        assert_eq!(challenge_format, None);
    }

    #[test]
    fn test_parse_formats() {
        let GeneralEvent::Formats(sections) = parse_general(
            "|formats|,1|S/V Singles|[Gen 9] Random Battle,f|[Gen 9] OU,e|,1|S/V Doubles|[Gen 9] Random Doubles Battle,f",
        )
        .event
        else {
            panic!("expected formats");
        };

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].name, "S/V Singles");
        assert_eq!(sections[0].formats.len(), 2);
        assert!(sections[0].formats[0].random_team);
        assert_eq!(sections[0].formats[1].name, "[Gen 9] OU");
        assert!(!sections[0].formats[1].random_team);
        assert!(sections[0].formats[1].search_show);
        assert_eq!(sections[1].formats[0].name, "[Gen 9] Random Doubles Battle");
    }

    #[test]
    fn test_parse_room_messages() {
        assert_eq!(
            parse_general("|init|chat").event,
            GeneralEvent::Init(RoomType::Chat)
        );

        let GeneralEvent::Users { count, users } = parse_general("|users|3, Red,@Zarel,#Bob@!").event
        else {
            panic!("expected users");
        };
        assert_eq!(count, 3);
        assert_eq!(users.len(), 3);
        assert_eq!(users[1].rank, Some('@'));
        assert!(users[2].away);

        assert_eq!(
            parse_general("|c:|1700000000|+Red@!|hello|world").event,
            GeneralEvent::Chat {
                user: User {
                    rank: Some('+'),
                    name: "Red".to_string(),
                    away: true,
                },
                message: "hello|world".to_string(),
                timestamp: Some(1700000000),
            }
        );

        let GeneralEvent::Join { user, quiet } = parse_general("|J| Red").event else {
            panic!("expected join");
        };
        assert_eq!(user.name, "Red");
        assert!(quiet);
    }

    #[test]
    fn test_parse_updatechallenges() {
        let GeneralEvent::UpdateChallenges(state) = parse_general(
            r#"|updatechallenges|{"challengesFrom":{"zarel":"gen9ou"},"challengesTo":[{"to":"bob","format":"gen9ubers"}]}"#,
        )
        .event
        else {
            panic!("expected updatechallenges");
        };

        assert_eq!(state.incoming.get("zarel").map(String::as_str), Some("gen9ou"));
        assert_eq!(state.outgoing.get("bob").map(String::as_str), Some("gen9ubers"));
    }
}
