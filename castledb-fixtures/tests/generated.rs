//! End-to-end tests over the generated fixture types.

use castledb_fixtures::{GAME_DATABASE, Row, game, game_binary};
use castledb_core::{Color, Error, from_bytes, from_json_str, to_bytes};

fn load() -> game::GameDatabase {
    from_json_str(GAME_DATABASE).expect("Failed to load database")
}

#[test]
fn test_load_json_scalars() {
    let db = load();
    assert_eq!(db.items.len(), 3);
    assert_eq!(db.monsters.len(), 2);
    assert_eq!(db.settings.len(), 1);

    let sword = &db.items[0];
    assert_eq!(sword.id, "sword");
    assert_eq!(sword.name, "Sword");
    assert!(!sword.stackable);
    assert_eq!(sword.price, 100);
    assert_eq!(sword.weight, 3.5);
    assert_eq!(sword.kind, game::ItemsKind::Weapon.ordinal());
    assert_eq!(sword.effects, game::items_effects::FIRE);
    assert_eq!(sword.tint, Color::from_rgb(255, 0, 0));
    assert_eq!(sword.model, "models/sword.fbx");

    assert_eq!(db.settings[0].name, "difficulty");
    assert_eq!(db.settings[0].value, 2);
}

#[test]
fn test_load_json_optional_columns() {
    let db = load();
    let potion = &db.items[2];

    assert!(potion.stackable);
    assert_eq!(potion.weight, 0.0);
    assert_eq!(db.items[1].upgrade_key(), "");
    assert_eq!(db.items[1].upgrade, None);
}

#[test]
fn test_references_resolve_after_load() {
    let db = load();

    assert_eq!(db.items[0].upgrade, Some(1));
    assert_eq!(
        db.items[0].upgrade_row(&db).map(|row| row.id.as_str()),
        Some("greatsword")
    );
    assert_eq!(db.monsters[0].loot, Some(2));
    assert_eq!(db.monsters[1].loot, Some(1));
}

#[test]
fn test_references_across_sheets_in_both_directions() {
    let db = load();

    // items is loaded before monsters yet points into it, and monsters
    // points back into items.
    assert_eq!(db.items[0].dropped_by, Some(0));
    assert_eq!(db.items[1].dropped_by, Some(1));
    assert_eq!(db.items[2].dropped_by, None);
    assert_eq!(db.items[2].dropped_by_key(), "");

    let orc = db.items[0].dropped_by_row(&db).expect("sword is dropped by a monster");
    assert_eq!(orc.name, "Orc");
    assert_eq!(
        orc.loot_row(&db).map(|row| row.id.as_str()),
        Some("potion")
    );
    let dragon = db.items[1].dropped_by_row(&db).expect("greatsword is dropped by a monster");
    assert_eq!(dragon.loot, Some(1));
}

#[test]
fn test_unmatched_reference_stays_unset() {
    let db = load();
    let potion = &db.items[2];

    assert_eq!(potion.upgrade_key(), "elixir");
    assert_eq!(potion.upgrade, None);
    assert!(potion.upgrade_row(&db).is_none());
}

#[test]
fn test_references_resolve_inside_lists() {
    let db = load();
    let orc = &db.monsters[0];

    assert_eq!(orc.drops.len(), 2);
    assert_eq!(orc.drops[0].item, Some(0));
    assert_eq!(orc.drops[0].chance, 0.5);
    assert_eq!(orc.drops[1].item, Some(2));
    assert_eq!(
        orc.drops[1].rarity,
        game::MonstersDropsRarity::Rare.ordinal()
    );
    assert_eq!(
        orc.drops[1].item_row(&db).map(|row| row.name.as_str()),
        Some("Potion")
    );
    assert!(db.monsters[1].drops.is_empty());
}

#[test]
fn test_first_matching_row_wins() {
    let mut db = load();
    let mut duplicate = game::Items::default();
    duplicate.id = "sword".to_string();
    db.items.push(duplicate);

    db.items[2].set_upgrade_key("sword");
    assert_eq!(db.items[2].upgrade, None);
    db.resolve_references();

    assert_eq!(db.items[2].upgrade, Some(0));
    assert_eq!(db.monsters[0].drops[0].item, Some(0));
}

#[test]
fn test_empty_key_never_matches() {
    let mut db = load();
    let mut blank = game::Items::default();
    blank.name = "Blank".to_string();
    db.items.push(blank);
    db.resolve_references();

    assert_eq!(db.items[1].upgrade_key(), "");
    assert_eq!(db.items[1].upgrade, None);
}

#[test]
fn test_unknown_sheets_are_skipped() {
    let json = r#"{"sheets":[
        {"name":"quests","columns":[],"lines":[{"title":"Intro"}]},
        {"name":"settings","columns":[],"lines":[{"name":"volume","value":7}]}
    ]}"#;
    let db: game::GameDatabase = from_json_str(json).expect("Failed to load database");

    assert!(db.items.is_empty());
    assert_eq!(db.settings[0].value, 7);
}

#[test]
fn test_missing_field_is_reported() {
    let json = r#"{"sheets":[{"name":"settings","columns":[],"lines":[{"name":"volume"}]}]}"#;
    let result = from_json_str::<game::GameDatabase>(json);

    assert!(matches!(result, Err(Error::MissingField { ref field }) if field == "value"));
}

#[test]
fn test_binary_round_trip() {
    let db = load();
    let bytes = to_bytes(&db).expect("Failed to save");
    let reloaded: game::GameDatabase = from_bytes(&bytes).expect("Failed to reload");

    assert_eq!(reloaded.items[0], db.items[0]);
    assert_eq!(reloaded.items[1], db.items[1]);
    assert_eq!(reloaded.monsters, db.monsters);
    assert_eq!(reloaded.settings, db.settings);
    assert_eq!(
        to_bytes(&reloaded).expect("Failed to save reloaded"),
        bytes
    );
}

#[test]
fn test_unresolved_reference_saves_empty_key() {
    let db = load();
    let bytes = to_bytes(&db).expect("Failed to save");
    let reloaded: game::GameDatabase = from_bytes(&bytes).expect("Failed to reload");

    assert_eq!(reloaded.items[2].upgrade_key(), "");
    assert_eq!(reloaded.items[2].upgrade, None);
    assert_eq!(reloaded.items[2].name, "Potion");
}

#[test]
fn test_truncated_binary_input() {
    let bytes = to_bytes(&load()).expect("Failed to save");
    let result = from_bytes::<game::GameDatabase>(&bytes[..bytes.len() - 1]);

    assert!(matches!(result, Err(Error::UnexpectedEof { .. })));
}

#[test]
fn test_oversized_row_count_is_rejected() {
    let mut bytes = to_bytes(&load()).expect("Failed to save").to_vec();
    bytes[..4].copy_from_slice(&u32::MAX.to_le_bytes());
    let result = from_bytes::<game::GameDatabase>(&bytes);

    assert!(matches!(
        result,
        Err(Error::CountExceedsInput { count, .. }) if count == u32::MAX as usize
    ));
}

#[test]
fn test_clear() {
    let mut db = load();

    db.monsters[0].clear();
    assert!(db.monsters[0].drops.is_empty());
    assert_eq!(db.monsters[0].loot, None);
    assert_eq!(db.monsters[0].loot_key(), "potion");

    db.clear();
    assert!(db.items.is_empty());
    assert!(db.monsters.is_empty());
    assert!(db.settings.is_empty());
}

#[test]
fn test_enum_ordinals() {
    use game::ItemsKind;

    assert_eq!(ItemsKind::ALL.len(), 3);
    assert_eq!(ItemsKind::Potion as i32, 2);
    assert_eq!(ItemsKind::from_ordinal(1), Some(ItemsKind::Armor));
    assert_eq!(ItemsKind::from_ordinal(3), None);
    assert_eq!(ItemsKind::from_ordinal(-1), None);
    assert_eq!(ItemsKind::Armor.label(), "Armor");
    assert_eq!(load().items[2].kind, ItemsKind::Potion.ordinal());
}

#[test]
fn test_flag_bits() {
    use game::items_effects::{FIRE, ICE, POISON};

    assert_eq!(FIRE, 1);
    assert_eq!(ICE, 2);
    assert_eq!(POISON, 4);

    let db = load();
    assert_eq!(db.items[1].effects, FIRE | ICE);
    assert_eq!(db.items[2].effects & POISON, POISON);
}

#[test]
fn test_sheet_names() {
    assert_eq!(game::Items::SHEET_NAME, "items");
    assert_eq!(game::MonstersDrops::SHEET_NAME, "monsters@drops");
}

#[test]
fn test_generated_types_implement_row() {
    fn assert_row<T: Row>() {}

    assert_row::<game::Items>();
    assert_row::<game::Monsters>();
    assert_row::<game::MonstersDrops>();
    assert_row::<game::Settings>();
    assert_row::<game::GameDatabase>();
}

#[test]
fn test_binary_only_round_trip() {
    use game_binary::{BinaryDatabase, Items, Monsters, MonstersDrops};

    let mut db = BinaryDatabase::default();

    let mut sword = Items::default();
    sword.id = "sword".to_string();
    sword.price = 100;
    sword.tint = Color::from_rgb(0, 128, 255);
    let mut axe = Items::default();
    axe.id = "axe".to_string();
    axe.set_upgrade_key("sword");
    axe.set_dropped_by_key("orc");
    db.items.push(sword);
    db.items.push(axe);

    let mut loot_drop = MonstersDrops::default();
    loot_drop.set_item_key("axe");
    loot_drop.chance = 0.75;
    let mut orc = Monsters::default();
    orc.id = "orc".to_string();
    orc.set_loot_key("sword");
    orc.drops.push(loot_drop);
    db.monsters.push(orc);

    db.resolve_references();
    assert_eq!(db.items[1].upgrade, Some(0));
    assert_eq!(db.items[1].dropped_by, Some(0));
    assert_eq!(db.monsters[0].drops[0].item, Some(1));

    let bytes = to_bytes(&db).expect("Failed to save");
    let reloaded: BinaryDatabase = from_bytes(&bytes).expect("Failed to reload");
    assert_eq!(reloaded, db);
}
