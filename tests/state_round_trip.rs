//! Save and reload a tracker through the state file.

use std::fs;

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use randotrack::io::state::StateStore;
use randotrack::model::config::TrackerConfig;
use randotrack::model::hints::HintKind;
use randotrack::tracker::Tracker;
use randotrack::tracker::action::Action;

fn builtin() -> Tracker {
    Tracker::new(TrackerConfig::builtin().unwrap()).unwrap()
}

fn hint(t: &mut Tracker, kind: HintKind, text: &str) {
    t.input_action(Action::StartHintInput(kind));
    t.input(text);
    t.submit();
}

/// A tracker with some of everything: staged, countable and toggle items,
/// each hint category and a pending redo
fn played() -> Tracker {
    let mut t = builtin();
    t.input("011");
    t.input("011");
    let token = t.item_index("Gold Skulltula Token").unwrap();
    for _ in 0..5 {
        t.click_left(token);
    }
    let hookshot = t.item_index("Progressive Hookshot").unwrap();
    t.click_left(hookshot);
    t.click_left(hookshot);
    hint(&mut t, HintKind::Woth, "kak");
    hint(&mut t, HintKind::Woth, "kak");
    hint(&mut t, HintKind::Goal, "gold skulls in fire");
    hint(&mut t, HintKind::Barren, "lw");
    hint(&mut t, HintKind::Sometimes, "skull kid: bombchus");
    hint(&mut t, HintKind::Always, "frog din's fire");
    t.undo();
    t
}

#[test]
fn saved_tracker_reloads_identically() {
    let dir = TempDir::new().unwrap();
    let store = StateStore::new(dir.path().join("state.json"));
    let before = played();
    before.save(&store).unwrap();

    let mut after = builtin();
    assert!(after.load(&store));
    assert_eq!(after.snapshot(), before.snapshot());
    assert!(after.is_idle());
}

#[test]
fn reloaded_history_still_undoes() {
    let dir = TempDir::new().unwrap();
    let store = StateStore::new(dir.path().join("state.json"));
    let mut original = played();
    original.save(&store).unwrap();

    let mut reloaded = builtin();
    reloaded.load(&store);

    reloaded.redo();
    original.redo();
    assert_eq!(reloaded.snapshot(), original.snapshot());

    let n = reloaded.ledger().undo_entries().len();
    for _ in 0..n {
        reloaded.undo();
    }
    let fresh = builtin();
    assert_eq!(reloaded.items(), fresh.items());
    assert_eq!(reloaded.hints(), fresh.hints());
}

#[test]
fn missing_state_keeps_fresh_tracker() {
    let dir = TempDir::new().unwrap();
    let store = StateStore::new(dir.path().join("absent.json"));
    let mut t = builtin();
    assert!(!t.load(&store));
    assert_eq!(t.snapshot(), builtin().snapshot());
}

#[test]
fn corrupt_state_keeps_current_tracker() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("state.json");
    fs::write(&path, "{\"items\": [").unwrap();

    let mut t = played();
    let before = t.snapshot();
    assert!(!t.load(&StateStore::new(path)));
    assert_eq!(t.snapshot(), before);
}

#[test]
fn state_from_another_catalog_is_rejected() {
    let dir = TempDir::new().unwrap();
    let store = StateStore::new(dir.path().join("state.json"));
    played().save(&store).unwrap();

    let small = TrackerConfig::from_toml(
        r#"
[[items]]
name = "Bow"

[[items]]
name = "Hammer"
"#,
    )
    .unwrap();
    let mut t = Tracker::new(small).unwrap();
    let before = t.snapshot();
    assert!(!t.load(&store));
    assert_eq!(t.snapshot(), before);
}

#[test]
fn state_file_is_plain_json() {
    let dir = TempDir::new().unwrap();
    let store = StateStore::new(dir.path().join("state.json"));
    played().save(&store).unwrap();

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
    assert_eq!(json["woths"][0]["location"], "Kakariko Village");
    assert_eq!(json["woths"][0]["doubled"], true);
    assert_eq!(json["barrens"][0], "Lost Woods");
    assert!(json["saved_at"].is_string());
    assert_eq!(json["redo_stack"].as_array().unwrap().len(), 1);
}
