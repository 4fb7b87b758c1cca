mod common;

use common::{FixedRng, ScriptedRng, engine, engine_with_config, last_text};
use game_core::{
    AttackError, AttackResolution, EnemyAction, EnemyKind, EntityId, ExecuteError, GameConfig,
    GameEngine, GameError, ItemKind, LevelLayout, MessageCategory, MoveError, MoveOutcome,
    NpcKind, PcgRng, PlayerStart, Position, TileKind, TrapKind, TurnPhase,
};

fn enemy_id(engine: &GameEngine, position: Position) -> EntityId {
    engine
        .state()
        .occupancy
        .enemy_at(&position)
        .expect("enemy spawned at position")
}

#[test]
fn fresh_engine_spawns_fixed_catalog() {
    let engine = GameEngine::new(1234).expect("default layout is valid");
    let state = engine.state();

    assert_eq!(state.turn.turn, 1);
    assert_eq!(state.turn.phase, TurnPhase::Player);
    assert_eq!(state.player.position, Position::new(8, 8));
    assert_eq!(state.grid.tile(Position::new(8, 8)), Some(TileKind::Floor));
    assert!(state.grid.has_walled_border());

    let kinds: Vec<_> = state.entities.enemies.values().map(|e| e.kind).collect();
    assert_eq!(kinds, [EnemyKind::Goblin, EnemyKind::Orc, EnemyKind::Skeleton]);
    assert_eq!(state.entities.items.len(), 3);
    assert_eq!(state.entities.npcs.len(), 2);
    assert!(state.entities.traps.is_empty());

    let texts: Vec<_> = state.log.entries().iter().map(|e| e.text.as_str()).collect();
    assert_eq!(
        texts,
        ["Welcome to the Dungeon!", "Use arrow keys or buttons to move."]
    );
}

#[test]
fn same_seed_generates_same_walls() {
    let first = GameEngine::new(99).unwrap();
    let second = GameEngine::new(99).unwrap();
    assert_eq!(first.state().grid, second.state().grid);
}

#[test]
fn moving_into_wall_keeps_position_and_logs_error() {
    let mut engine = engine(LevelLayout::empty(), PcgRng);
    for _ in 0..7 {
        engine.move_player(-1, 0).expect("open floor");
    }
    assert_eq!(engine.state().player.position, Position::new(1, 8));
    assert_eq!(last_text(&engine), "Moved to (1, 8)");

    let error = engine.move_player(-1, 0).unwrap_err();
    assert!(matches!(
        error,
        ExecuteError::Move(ref failure) if matches!(failure.error, MoveError::Blocked { .. })
    ));
    assert!(error.severity().is_recoverable());
    assert_eq!(engine.state().player.position, Position::new(1, 8));

    let last = engine.state().log.last().unwrap();
    assert_eq!(last.text, "Cannot move there!");
    assert_eq!(last.category, MessageCategory::Error);
}

#[test]
fn oversized_step_is_rejected() {
    let mut engine = engine(LevelLayout::empty(), PcgRng);
    let error = engine.move_player(2, 0).unwrap_err();
    assert_eq!(error.error_code(), "MOVE_INVALID_STEP");
    assert_eq!(engine.state().player.position, Position::new(8, 8));
}

#[test]
fn bumping_goblin_deals_bounded_damage() {
    let layout = LevelLayout::empty().with_enemy(EnemyKind::Goblin, Position::new(9, 8));

    for seed in 0..32 {
        let mut engine = GameEngine::builder()
            .config(GameConfig::open_floor())
            .layout(layout.clone())
            .seed(seed)
            .build()
            .unwrap();
        let goblin = enemy_id(&engine, Position::new(9, 8));

        let outcome = engine.move_player(1, 0).unwrap();
        let MoveOutcome::Attacked(attack) = outcome else {
            panic!("expected an attack");
        };
        assert_eq!(attack.target, goblin);

        let health = engine.state().entities.enemy(goblin).unwrap().health.current;
        assert!((17..=27).contains(&health), "goblin health {health}");
        assert_eq!(engine.state().player.position, Position::new(8, 8));
        assert!(
            engine
                .state()
                .log
                .entries()
                .iter()
                .any(|entry| entry.text.contains("damage"))
        );

        let AttackResolution::Countered(strike) = attack.resolution else {
            panic!("goblin cannot die from one hit");
        };
        assert!((1..=5).contains(&strike.damage));
        assert_eq!(engine.state().player.health.current, 100 - strike.damage);
    }
}

#[test]
fn slain_enemy_rewards_exactly_once() {
    let layout = LevelLayout::empty().with_enemy(EnemyKind::Goblin, Position::new(2, 2));
    // Every roll is 14: the player hits for 14 - 2 = 12, the goblin for 14 % 5 = 4.
    let mut engine = engine(layout, FixedRng(14));
    let goblin = enemy_id(&engine, Position::new(2, 2));

    engine.attack(goblin).unwrap();
    engine.attack(goblin).unwrap();
    assert_eq!(engine.state().player.health.current, 92);

    let outcome = engine.attack(goblin).unwrap();
    assert_eq!(
        outcome.resolution,
        AttackResolution::Slain {
            experience: 25,
            gold: 60,
            levels_gained: 0,
        }
    );
    assert!(engine.state().entities.enemy(goblin).is_none());
    assert!(engine.state().occupancy.enemy_at(&Position::new(2, 2)).is_none());
    assert_eq!(engine.state().player.experience, 25);
    assert_eq!(engine.state().player.gold, 210);
    assert_eq!(last_text(&engine), "Victory! +25 EXP, +60 Gold");

    let error = engine.attack(goblin).unwrap_err();
    assert!(matches!(
        error,
        ExecuteError::Attack(ref failure) if failure.error == AttackError::EnemyNotFound(goblin)
    ));
    assert_eq!(engine.state().player.experience, 25);
    assert_eq!(engine.state().player.gold, 210);
}

#[test]
fn kill_can_level_up() {
    let config = GameConfig {
        experience_base: 20,
        ..GameConfig::open_floor()
    };
    let layout = LevelLayout::empty().with_enemy(EnemyKind::Skeleton, Position::new(3, 3));
    let mut engine = engine_with_config(config, layout, FixedRng(14));
    let skeleton = enemy_id(&engine, Position::new(3, 3));

    // 13 damage per hit against 25 health.
    engine.attack(skeleton).unwrap();
    let outcome = engine.attack(skeleton).unwrap();

    assert!(matches!(
        outcome.resolution,
        AttackResolution::Slain { levels_gained: 1, .. }
    ));
    assert_eq!(engine.state().player.level, 2);
    let last = engine.state().log.last().unwrap();
    assert_eq!(last.text, "Level up! You are now level 2.");
    assert_eq!(last.category, MessageCategory::Success);
}

#[test]
fn defeat_is_terminal_until_new_run() {
    let config = GameConfig {
        player: PlayerStart {
            max_health: 3,
            ..PlayerStart::default()
        },
        ..GameConfig::open_floor()
    };
    let layout = LevelLayout::empty().with_enemy(EnemyKind::Orc, Position::new(9, 8));
    let mut engine = engine_with_config(config, layout, FixedRng(4));

    let outcome = engine.move_player(1, 0).unwrap();
    let MoveOutcome::Attacked(attack) = outcome else {
        panic!("expected an attack");
    };
    let AttackResolution::Countered(strike) = attack.resolution else {
        panic!("orc survives a 2 damage hit");
    };
    assert!(strike.player_defeated);
    assert!(engine.is_defeated());
    assert_eq!(engine.state().player.health.current, 0);
    assert_eq!(last_text(&engine), "You have been defeated!");

    let before = engine.state().clone();
    assert_eq!(engine.move_player(0, 1), Err(ExecuteError::Defeated));
    assert_eq!(engine.end_turn(), Err(ExecuteError::Defeated));
    assert_eq!(engine.state().turn, before.turn);
    assert_eq!(engine.state().player, before.player);
    assert_eq!(engine.state().log.len(), before.log.len() + 2);
    assert_eq!(
        engine.state().log.last().unwrap().category,
        MessageCategory::Error
    );

    assert_eq!(engine.initialize_level(), Err(ExecuteError::Defeated));
    assert!(engine.is_defeated());

    engine.new_run().unwrap();
    assert!(!engine.is_defeated());
    assert_eq!(engine.state().player.health.current, 3);
    assert_eq!(engine.state().player.position, Position::new(8, 8));
    assert_eq!(engine.state().turn.turn, 1);
    assert_eq!(engine.state().turn.phase, TurnPhase::Player);
    assert_eq!(last_text(&engine), "Use arrow keys or buttons to move.");
}

#[test]
fn next_level_keeps_the_run_going() {
    let layout = LevelLayout::empty()
        .with_enemy(EnemyKind::Goblin, Position::new(2, 2))
        .with_item(ItemKind::Gold, 50, Position::new(9, 8));
    let mut engine = engine(layout, PcgRng);

    engine.move_player(1, 0).unwrap();
    engine.place_trap(Position::new(4, 4), TrapKind::Fire).unwrap();
    engine.end_turn().unwrap();
    assert!(engine.state().occupancy.enemy_at(&Position::new(2, 2)).is_none());
    let player = engine.state().player.clone();
    assert_eq!(player.gold, 150);

    engine.initialize_level().unwrap();
    let state = engine.state();

    assert_eq!(state.turn.turn, 2);
    assert_eq!(state.player.position, Position::new(8, 8));
    assert_eq!(state.player.gold, 150);
    assert_eq!(state.player.health, player.health);
    assert_eq!(state.player.level, player.level);
    assert_eq!(state.player.experience, player.experience);
    assert_eq!(state.player.inventory, player.inventory);
    assert_eq!(state.entities.traps_at(Position::new(4, 4)).count(), 1);
    assert_eq!(state.entities.traps.len(), 1);
    assert_eq!(state.entities.items.len(), 1);
    assert_eq!(state.entities.enemies.len(), 1);
    assert!(state.occupancy.enemy_at(&Position::new(2, 2)).is_some());
    assert_eq!(last_text(&engine), "Use arrow keys or buttons to move.");
}

#[test]
fn end_turn_advances_counter_and_enemies_pursue() {
    let layout = LevelLayout::empty().with_enemy(EnemyKind::Goblin, Position::new(2, 2));
    let mut engine = engine(layout, PcgRng);
    let goblin = enemy_id(&engine, Position::new(2, 2));
    let player = engine.state().player.position;

    let report = engine.end_turn().unwrap();
    assert_eq!(report.turn, 2);
    assert!(!report.player_defeated);
    assert_eq!(
        report.enemies[0].action,
        EnemyAction::Moved {
            from: Position::new(2, 2),
            to: Position::new(3, 3),
        }
    );

    let enemy = engine.state().entities.enemy(goblin).unwrap();
    assert_eq!(enemy.position.chebyshev_distance(player), 5);
    assert_eq!(engine.state().occupancy.enemy_at(&Position::new(3, 3)), Some(goblin));
    assert_eq!(engine.state().turn.phase, TurnPhase::Player);

    let last = engine.state().log.last().unwrap();
    assert_eq!(last.text, "Turn 2");
    assert_eq!(last.category, MessageCategory::Action);
}

#[test]
fn adjacent_enemy_attacks_within_its_stat() {
    let layout = LevelLayout::empty().with_enemy(EnemyKind::Orc, Position::new(9, 9));
    let mut engine = engine(layout, ScriptedRng::new([6, 0, 13]));

    for expected in [6, 1, 5] {
        let before = engine.state().player.health.current;
        let report = engine.end_turn().unwrap();
        let EnemyAction::Attacked(strike) = report.enemies[0].action else {
            panic!("adjacent orc must attack");
        };
        assert_eq!(strike.damage, expected);
        assert_eq!(engine.state().player.health.current, before - expected);
        assert_eq!(
            engine.state().entities.enemy(strike.attacker).unwrap().position,
            Position::new(9, 9)
        );
    }
}

#[test]
fn defeat_mid_resolution_stops_remaining_enemies() {
    let config = GameConfig {
        player: PlayerStart {
            max_health: 1,
            ..PlayerStart::default()
        },
        ..GameConfig::open_floor()
    };
    let layout = LevelLayout::empty()
        .with_enemy(EnemyKind::Goblin, Position::new(7, 7))
        .with_enemy(EnemyKind::Skeleton, Position::new(2, 2));
    let mut engine = engine_with_config(config, layout, FixedRng(3));
    let entries_before = engine.state().log.len();

    let report = engine.end_turn().unwrap();

    assert!(report.player_defeated);
    assert_eq!(report.enemies.len(), 1);
    assert_eq!(report.turn, 1);
    assert_eq!(engine.state().turn.turn, 1);
    assert_eq!(engine.state().turn.phase, TurnPhase::Defeated);
    assert_eq!(
        engine.state().entities.enemies.values().nth(1).unwrap().position,
        Position::new(2, 2)
    );
    assert!(
        engine.state().log.entries()[entries_before..]
            .iter()
            .all(|entry| !entry.text.starts_with("Turn"))
    );
}

#[test]
fn enemies_wait_behind_walls() {
    let layout = LevelLayout::empty().with_enemy(EnemyKind::Goblin, Position::new(5, 8));
    let mut engine = engine(layout, PcgRng);
    let goblin = enemy_id(&engine, Position::new(5, 8));

    // Wall off the greedy step through a snapshot edit.
    let mut snapshot = engine.export_state();
    snapshot.grid.set(Position::new(6, 8), TileKind::Wall);
    engine.import_state(snapshot).unwrap();

    let report = engine.end_turn().unwrap();
    assert_eq!(report.enemies[0].action, EnemyAction::Held);
    assert_eq!(
        engine.state().entities.enemy(goblin).unwrap().position,
        Position::new(5, 8)
    );
}

#[test]
fn picking_up_gold_moves_player() {
    let layout = LevelLayout::empty().with_item(ItemKind::Gold, 50, Position::new(9, 8));
    let mut engine = engine(layout, PcgRng);

    let outcome = engine.move_player(1, 0).unwrap();
    let MoveOutcome::Moved { to, pickup } = outcome else {
        panic!("expected a move");
    };
    assert_eq!(to, Position::new(9, 8));
    assert_eq!(pickup.map(|p| (p.kind, p.amount)), Some((ItemKind::Gold, 50)));
    assert_eq!(engine.state().player.gold, 200);
    assert!(engine.state().entities.items.is_empty());

    let texts: Vec<_> = engine.state().log.recent(2).map(|e| e.text.as_str()).collect();
    assert_eq!(texts, ["Moved to (9, 8)", "+50 Gold!"]);
}

#[test]
fn ground_potion_heals_up_to_maximum() {
    let layout = LevelLayout::empty().with_item(ItemKind::Potion, 20, Position::new(8, 9));
    let mut engine = engine(layout, PcgRng);

    engine.move_player(0, 1).unwrap();
    assert_eq!(engine.state().player.health.current, 100);
    assert_eq!(engine.state().player.position, Position::new(8, 9));
}

#[test]
fn bumping_npc_talks_without_moving() {
    let layout =
        LevelLayout::empty().with_npc("Merchant", NpcKind::Merchant, Position::new(8, 7));
    let mut engine = engine(layout, PcgRng);

    let outcome = engine.move_player(0, -1).unwrap();
    assert!(matches!(outcome, MoveOutcome::Talked { pickup: None, .. }));
    assert_eq!(engine.state().player.position, Position::new(8, 8));
    assert_eq!(last_text(&engine), "You talk to Merchant...");
}

#[test]
fn talking_still_collects_the_item_underfoot() {
    let spot = Position::new(8, 9);
    let layout = LevelLayout::empty()
        .with_item(ItemKind::Gold, 50, spot)
        .with_npc("Merchant", NpcKind::Merchant, spot);
    let mut engine = engine(layout, PcgRng);

    let outcome = engine.move_player(0, 1).unwrap();
    let MoveOutcome::Talked { pickup, .. } = outcome else {
        panic!("expected a conversation");
    };
    assert_eq!(pickup.map(|p| (p.kind, p.amount)), Some((ItemKind::Gold, 50)));
    assert_eq!(engine.state().player.position, Position::new(8, 8));
    assert_eq!(engine.state().player.gold, 200);
    assert!(engine.state().entities.items.is_empty());
    assert!(engine.state().occupancy.npc_at(&spot).is_some());

    let texts: Vec<_> = engine.state().log.recent(2).map(|e| e.text.as_str()).collect();
    assert_eq!(texts, ["You talk to Merchant...", "+50 Gold!"]);
}

#[test]
fn potions_heal_and_run_out() {
    let mut engine = engine(LevelLayout::empty(), PcgRng);
    let mut snapshot = engine.export_state();
    snapshot.player.health.current = 50;
    engine.import_state(snapshot).unwrap();

    let outcome = engine.use_item(game_core::InventoryKind::Potion).unwrap();
    assert_eq!(outcome.healed, 30);
    assert_eq!(outcome.remaining, 2);
    assert_eq!(engine.state().player.health.current, 80);
    assert_eq!(last_text(&engine), "Potion used! +30 HP");

    let outcome = engine.use_item(game_core::InventoryKind::Potion).unwrap();
    assert_eq!(outcome.healed, 20);
    engine.use_item(game_core::InventoryKind::Potion).unwrap();

    let player = engine.state().player.clone();
    let error = engine.use_item(game_core::InventoryKind::Potion).unwrap_err();
    assert_eq!(error.error_code(), "USE_ITEM_NOT_AVAILABLE");
    assert_eq!(engine.state().player, player);
    let last = engine.state().log.last().unwrap();
    assert_eq!(last.text, "Item not available!");
    assert_eq!(last.category, MessageCategory::Error);
}

#[test]
fn trap_items_cannot_be_used_directly() {
    let mut engine = engine(LevelLayout::empty(), PcgRng);
    let inventory = engine.state().player.inventory.clone();

    let error = engine
        .use_item(game_core::InventoryKind::TrapSpike)
        .unwrap_err();
    assert_eq!(error.error_code(), "USE_ITEM_NOT_USABLE");
    assert_eq!(engine.state().player.inventory, inventory);
    assert_eq!(
        engine.state().log.last().unwrap().category,
        MessageCategory::Info
    );
}

#[test]
fn traps_cost_gold_until_broke() {
    let mut engine = engine(LevelLayout::empty(), PcgRng);
    let spot = Position::new(4, 4);

    for kind in [TrapKind::Spike, TrapKind::Fire, TrapKind::Electric] {
        engine.place_trap(spot, kind).unwrap();
        assert_eq!(last_text(&engine), "Trap placed!");
    }
    assert_eq!(engine.state().player.gold, 0);

    let error = engine.place_trap(spot, TrapKind::Ice).unwrap_err();
    assert_eq!(error.error_code(), "PLACE_TRAP_INSUFFICIENT_GOLD");
    assert_eq!(last_text(&engine), "Not enough gold!");

    let traps: Vec<_> = engine.state().entities.traps_at(spot).collect();
    assert_eq!(traps.len(), 3);
    assert!(traps.iter().all(|trap| trap.active && trap.damage == 20));
    assert_eq!(
        engine
            .state()
            .player
            .inventory
            .count(game_core::InventoryKind::TrapSpike),
        5
    );
}

#[test]
fn rejected_action_only_appends_a_log_entry() {
    let mut engine = engine(LevelLayout::empty(), PcgRng);
    engine.place_trap(Position::new(2, 2), TrapKind::Spike).unwrap();
    engine.place_trap(Position::new(2, 2), TrapKind::Spike).unwrap();
    engine.place_trap(Position::new(2, 2), TrapKind::Spike).unwrap();

    let before = engine.export_state();
    engine.place_trap(Position::new(3, 3), TrapKind::Fire).unwrap_err();
    let after = engine.export_state();

    assert_eq!(after.log.len(), before.log.len() + 1);
    assert_eq!(
        game_core::Snapshot {
            log: before.log.clone(),
            ..after
        },
        before
    );
}

#[test]
fn rollback_keeps_earlier_log_entries() {
    let mut engine = engine(LevelLayout::empty(), PcgRng);
    engine.move_player(1, 0).unwrap();
    engine.end_turn().unwrap();

    let mut snapshot = engine.export_state();
    snapshot.grid.set(Position::new(10, 8), TileKind::Wall);
    engine.import_state(snapshot).unwrap();
    let earlier = engine.state().log.entries().to_vec();

    engine.move_player(1, 0).unwrap_err();

    let entries = engine.state().log.entries();
    assert_eq!(entries.len(), earlier.len() + 1);
    assert_eq!(&entries[..earlier.len()], earlier.as_slice());
    assert_eq!(last_text(&engine), "Cannot move there!");
}
