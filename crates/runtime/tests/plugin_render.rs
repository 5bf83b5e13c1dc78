//! Whole-note rendering through the plugin registry.

use std::sync::Arc;

use serde_json::json;

use sheet_core::{ConsumableAction, HealthAction};
use sheet_runtime::{
    InMemoryStore, KeyValueStore, MountedWidget, Plugin, PluginConfig, RuntimeError, Settings,
};

const NOTE: &str = r#"---
level: 3
proficiency_bonus: 2
speed: 40
---
# Brakka

```ability
abilities:
  strength: 16
  dexterity: 12
  constitution: 14
  intelligence: 8
  wisdom: 10
  charisma: 13
```

```savingthrows
proficient: [strength, constitution]
```

```stats
items:
  - label: Level
    value: "{{frontmatter.level}}"
  - label: Carry
    value: "{{multiply abilities.strength 15}} lb"
```

```healthpoints
state_key: brakka-hp
health: 28
hitdice:
  dice: d12
  value: 3
reset_on: long-rest
```

```consumable
items:
  - label: Rage
    state_key: brakka-rage
    uses: 3
    reset_on: long-rest
  - label: Forgotten
    uses: 1
  - label: Second Wind
    state_key: brakka-wind
    uses: 1
    reset_on:
      - event: short-rest
        amount: 1
```

```initiative
state_key: brakka-fight
items:
  - name: Brakka
    ac: 15
    hp: 28
```

```skills
proficiencies: [Athletics, Intimidation]
```

```badges
items:
  - label: Speed
    value: "{{frontmatter.speed}} ft"
  - value: Raging
```

```python
print("not ours")
```
"#;

async fn plugin(store: Arc<dyn KeyValueStore>) -> Plugin {
    let _ = sheet_runtime::logging::try_init();
    Plugin::builder()
        .config(PluginConfig {
            persistence: false,
            ..PluginConfig::default()
        })
        .store(store)
        .build()
        .await
        .unwrap()
}

// ============================================================================
// Registry
// ============================================================================

#[tokio::test]
async fn test_registers_every_block_kind() {
    let plugin = plugin(Arc::new(InMemoryStore::new())).await;
    let mut codeblocks = plugin.codeblocks();
    codeblocks.sort_unstable();
    assert_eq!(
        codeblocks,
        [
            "ability",
            "badges",
            "consumable",
            "healthpoints",
            "initiative",
            "savingthrows",
            "skills",
            "stats"
        ]
    );
    assert!(!plugin.handles("python"));
}

#[tokio::test]
async fn test_render_block_rejects_unknown_language() {
    let plugin = plugin(Arc::new(InMemoryStore::new())).await;
    let document = sheet_content::Document::parse("");
    let result = plugin.render_block("python", "print()", &document).await;
    assert!(matches!(result, Err(RuntimeError::UnknownCodeblock(lang)) if lang == "python"));
}

// ============================================================================
// Document rendering
// ============================================================================

#[tokio::test]
async fn test_renders_each_block_independently() {
    let store: Arc<dyn KeyValueStore> = Arc::new(InMemoryStore::new());
    let plugin = plugin(store.clone()).await;
    let blocks = plugin.render_document(NOTE).await;

    let languages: Vec<&str> = blocks.iter().map(|block| block.language.as_str()).collect();
    assert_eq!(
        languages,
        [
            "ability",
            "savingthrows",
            "stats",
            "healthpoints",
            "consumable",
            "initiative",
            "skills",
            "badges"
        ]
    );

    let ability = &blocks[0];
    assert!(ability.is_ok());
    assert!(ability.html.contains(r#"<p class="ability-name">STR</p><p class="ability-value">16</p>"#));

    let saves = &blocks[1];
    assert!(saves.html.contains(
        r#"<p class="generic-card-label">Strength Save</p><p class="generic-card-value">+5</p><p class="generic-card-sublabel">Proficient</p>"#
    ));

    let stats = &blocks[2];
    assert!(stats.html.contains(r#"<p class="generic-card-value">3</p>"#));
    assert!(stats.html.contains(r#"<p class="generic-card-value">240 lb</p>"#));

    let health = &blocks[3];
    assert_eq!(health.widgets.len(), 1);
    assert!(health.html.contains("Hit Dice (d12)"));

    let consumables = &blocks[4];
    assert_eq!(consumables.widgets.len(), 2);
    assert_eq!(consumables.errors.len(), 1);
    assert!(consumables.html.starts_with(
        r#"<div class="consumables-column" style="--consumable-label-width: 6.05em">"#
    ));
    assert!(consumables.html.contains(
        r#"<div class="sheet-error">Consumable item at index 1 must contain a &#39;state_key&#39; property.</div>"#
    ));
    assert!(consumables.html.contains("Second Wind"));

    let initiative = &blocks[5];
    assert!(initiative.is_ok());
    assert!(initiative.html.contains("Round 1"));

    // STR 16 (+3) plus proficiency 2.
    let skills = &blocks[6];
    assert!(skills.html.contains(
        r#"<span class="skill-proficiency proficient"></span><span class="skill-name">Athletics</span><span class="skill-ability">STR</span><span class="skill-value">+5</span>"#
    ));

    let badges = &blocks[7];
    assert!(badges.html.contains(r#"<span class="badge-value">40 ft</span>"#));
    assert_eq!(badges.html.matches("badge-item").count(), 2);

    let mut keys = store.keys().await.unwrap();
    keys.sort_unstable();
    assert_eq!(
        keys,
        ["brakka-fight", "brakka-hp", "brakka-rage", "brakka-wind"]
    );
    assert_eq!(plugin.mounted().await.len(), 4);
}

#[tokio::test]
async fn test_rerender_loads_saved_state() {
    let store: Arc<dyn KeyValueStore> = Arc::new(InMemoryStore::new());
    let plugin = plugin(store.clone()).await;

    let blocks = plugin.render_document(NOTE).await;
    let MountedWidget::Health(health) = &blocks[3].widgets[0] else {
        panic!("expected a health widget");
    };
    health.dispatch(HealthAction::Damage(10)).await;
    assert!(health.rendered().contains("18<span"));

    let again = plugin.render_document(NOTE).await;
    assert!(again[3].html.contains("18<span class=\"health-max\"> / 28</span>"));
}

// ============================================================================
// Reset events
// ============================================================================

#[tokio::test]
async fn test_long_rest_resets_matching_widgets() {
    let store: Arc<dyn KeyValueStore> = Arc::new(InMemoryStore::new());
    let plugin = plugin(store.clone()).await;
    let blocks = plugin.render_document(NOTE).await;

    let MountedWidget::Health(health) = &blocks[3].widgets[0] else {
        panic!("expected a health widget");
    };
    let [MountedWidget::Consumable(rage), MountedWidget::Consumable(wind)] =
        blocks[4].widgets.as_slice()
    else {
        panic!("expected two consumables");
    };

    health.dispatch(HealthAction::Damage(20)).await;
    health.dispatch(HealthAction::ToggleHitDie(1)).await;
    rage.dispatch(ConsumableAction::Toggle(2)).await;
    wind.dispatch(ConsumableAction::Toggle(0)).await;

    // Only the second-wind rule listens for short rests.
    assert_eq!(plugin.broadcast_event("short-rest").await, 1);
    assert_eq!(store.get("brakka-wind").await.unwrap(), Some(json!({"value": 0})));
    assert_eq!(store.get("brakka-rage").await.unwrap(), Some(json!({"value": 3})));

    assert_eq!(plugin.broadcast_event("long-rest").await, 2);
    assert_eq!(
        store.get("brakka-hp").await.unwrap(),
        Some(json!({"current": 28, "temporary": 0, "hitdiceUsed": 0}))
    );
    assert_eq!(store.get("brakka-rage").await.unwrap(), Some(json!({"value": 0})));

    assert_eq!(plugin.broadcast_event("dawn").await, 0);

    plugin.unmount_all().await;
    assert!(plugin.mounted().await.is_empty());
}

#[tokio::test]
async fn test_rerender_supersedes_previous_handles() {
    const WAND: &str = r#"
items:
  - label: Wand
    state_key: wand-charges
    uses: 4
    reset_on:
      - event: short-rest
        amount: 1
"#;
    let store: Arc<dyn KeyValueStore> = Arc::new(InMemoryStore::new());
    let plugin = plugin(store.clone()).await;
    let document = sheet_content::Document::parse("");

    let first = plugin.render_block("consumable", WAND, &document).await.unwrap();
    let [MountedWidget::Consumable(old)] = first.widgets.as_slice() else {
        panic!("expected one consumable");
    };
    old.dispatch(ConsumableAction::Toggle(2)).await;
    assert_eq!(store.get("wand-charges").await.unwrap(), Some(json!({"value": 3})));

    let second = plugin.render_block("consumable", WAND, &document).await.unwrap();
    let [MountedWidget::Consumable(new)] = second.widgets.as_slice() else {
        panic!("expected one consumable");
    };
    new.dispatch(ConsumableAction::Toggle(0)).await;
    assert_eq!(store.get("wand-charges").await.unwrap(), Some(json!({"value": 0})));

    // The first handle still remembers 3 uses; it must not answer the event.
    assert_eq!(plugin.mounted().await.len(), 1);
    assert_eq!(plugin.broadcast_event("short-rest").await, 0);
    assert_eq!(store.get("wand-charges").await.unwrap(), Some(json!({"value": 0})));
}

// ============================================================================
// Settings and file persistence
// ============================================================================

#[tokio::test]
async fn test_settings_load_and_save_through_the_store() {
    let store: Arc<dyn KeyValueStore> = Arc::new(InMemoryStore::with_values([(
        Settings::STORE_KEY,
        json!({"mySetting": "loud"}),
    )]));
    let mut plugin = plugin(store.clone()).await;
    assert_eq!(plugin.settings().my_setting, "loud");

    plugin
        .update_settings(Settings {
            my_setting: "quiet".into(),
        })
        .await
        .unwrap();
    assert_eq!(
        store.get(Settings::STORE_KEY).await.unwrap(),
        Some(json!({"mySetting": "quiet"}))
    );
}

#[tokio::test]
async fn test_file_store_survives_plugin_restart() {
    let dir = tempfile::tempdir().unwrap();
    let config = PluginConfig {
        data_dir: dir.path().to_path_buf(),
        store_file: "data.json".into(),
        persistence: true,
    };

    let plugin = Plugin::builder().config(config.clone()).build().await.unwrap();
    let blocks = plugin.render_document(NOTE).await;
    let MountedWidget::Initiative(fight) = &blocks[5].widgets[0] else {
        panic!("expected an initiative widget");
    };
    fight.dispatch(sheet_core::InitiativeAction::Next).await;
    drop(plugin);

    let restarted = Plugin::builder().config(config).build().await.unwrap();
    let blocks = restarted.render_document(NOTE).await;
    assert!(
        blocks[5]
            .html
            .contains(r#"<tr class="initiative-row active" data-index="0">"#)
    );
    assert!(dir.path().join("data.json").exists());
}
