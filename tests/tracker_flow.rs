use pretty_assertions::assert_eq;

use randotrack::model::config::TrackerConfig;
use randotrack::model::hints::HintKind;
use randotrack::tracker::Tracker;
use randotrack::tracker::action::Action;
use randotrack::tracker::input::InputState;
use randotrack::tracker::undo::LedgerEntry;

const BINDS: &str = r#"
[binds]
"0" = "StartItemInput"
"." = "DowngradeNext"
"-" = "Undo"
"+" = "Redo"
"w" = "StartWothInput"
"g" = "StartGoalInput"
"b" = "StartBarrenInput"
"a" = "StartAlwaysInput"
"7" = "TopLeft"
"8" = "Top"
"9" = "TopRight"
"4" = "Left"
"5" = "Middle"
"6" = "Right"
"1" = "BottomLeft"
"2" = "Bottom"
"3" = "BottomRight"
"#;

/// Lens of Truth sits at zone 3, item 4 and is catalog index 7
fn lens_config() -> TrackerConfig {
    let mut doc = String::from(BINDS);
    doc.push_str(
        r#"
[item_tracker]
zone_items = [
    ["Deku Stick", "Deku Nut", "Bomb Bag"],
    ["Bow", "Progressive Hookshot"],
    ["", "", "", "Lens of Truth"],
    [],
    ["Gold Skulltula Token"],
]

[hint_tracker]
locations = ["Fire Temple", "Lake Hylia", "Kakariko Village", "Lost Woods", "Dodongo's Cavern"]
always_locations = ["Skull Mask", "Biggoron Sword", "30 Gold Skulltulas", "Ocarina of Time", "Frog 2"]

[hint_tracker.abbreviations]
dc = "Dodongo's Cavern"
"#,
    );
    for name in [
        "Deku Stick",
        "Deku Nut",
        "Bow",
        "Slingshot",
        "Boomerang",
        "Hammer",
        "Magic Bean",
    ] {
        doc.push_str(&format!("\n[[items]]\nname = \"{name}\"\n"));
    }
    doc.push_str(
        r#"
[[items]]
name = "Lens of Truth"

[[items]]
name = "Bomb Bag"
capacity_progression = [20, 30, 40]

[[items]]
name = "Progressive Hookshot"
item_progression = ["Hookshot", "Longshot"]

[[items]]
name = "Gold Skulltula Token"
count_max = 100
count_step = 3
"#,
    );
    TrackerConfig::from_toml(&doc).unwrap()
}

fn tracker() -> Tracker {
    Tracker::new(lens_config()).unwrap()
}

fn hint(t: &mut Tracker, kind: HintKind, text: &str) {
    t.input_action(Action::StartHintInput(kind));
    t.input(text);
    t.submit();
}

fn woths(t: &Tracker) -> Vec<String> {
    t.hints().woths.iter().map(|w| w.location.clone()).collect()
}

// ---------------------------------------------------------------------------
// Keypad gestures
// ---------------------------------------------------------------------------

#[test]
fn start_zone_item_enables_lens() {
    let mut t = tracker();
    assert_eq!(t.item_index("Lens of Truth"), Some(7));
    assert!(t.is_idle());

    for key in ["0", "3", "4"] {
        t.input(key);
    }

    assert!(t.items()[7].enabled);
    assert_eq!(
        t.ledger().undo_entries(),
        &[LedgerEntry::Item {
            index: 7,
            upgrade: true
        }]
    );
    assert!(t.is_idle());
}

#[test]
fn bad_addresses_abort_without_mutation() {
    let mut t = tracker();
    let before = t.items().to_vec();
    // empty cell, missing row, then a non-digit in place of the item key
    t.input("031");
    t.input("099");
    t.input("03-");
    assert_eq!(t.items(), before.as_slice());
    assert!(t.ledger().undo_entries().is_empty());
    assert!(t.is_idle());
}

#[test]
fn downgrade_gesture_disables_at_stage_zero() {
    let mut t = tracker();
    t.input("034");
    t.input(".34");
    assert!(!t.items()[7].enabled);
    assert_eq!(t.ledger().undo_entries().len(), 2);
    t.undo();
    assert!(t.items()[7].enabled);
}

#[test]
fn start_key_aborts_midway() {
    let mut t = tracker();
    t.input("03");
    assert_eq!(*t.input_state(), InputState::ItemInput { zone: 3 });
    t.input("0");
    assert!(t.is_idle());
    t.input("4");
    assert_eq!(*t.input_state(), InputState::ItemInput { zone: 4 });
}

// ---------------------------------------------------------------------------
// Hints
// ---------------------------------------------------------------------------

#[test]
fn always_hint_overwrites_its_slot() {
    let mut t = tracker();
    assert_eq!(t.hints().always[0], "");

    hint(&mut t, HintKind::Always, "mask ");
    assert_eq!(t.hints().always[0], "");
    assert_eq!(
        t.ledger().undo_entries().last(),
        Some(&LedgerEntry::Always {
            slot: 0,
            text: String::new()
        })
    );

    hint(&mut t, HintKind::Always, "mask bombchus");
    assert_eq!(t.hints().always[0], "bombchus");
    hint(&mut t, HintKind::Always, "mask light arrows");
    assert_eq!(t.hints().always[0], "light arrows");
    assert_eq!(t.hints().always.iter().filter(|s| !s.is_empty()).count(), 1);
}

#[test]
fn always_targets_other_slots() {
    let mut t = tracker();
    hint(&mut t, HintKind::Always, "frog din's fire");
    hint(&mut t, HintKind::Always, "30 hammer");
    assert_eq!(t.hints().always[4], "din's fire");
    assert_eq!(t.hints().always[2], "hammer");
}

#[test]
fn three_woths_then_undo() {
    let mut t = tracker();
    assert!(t.hints().woths.is_empty());

    hint(&mut t, HintKind::Woth, "fire");
    hint(&mut t, HintKind::Woth, "lake");
    hint(&mut t, HintKind::Woth, "kak");
    assert_eq!(
        woths(&t),
        vec!["Fire Temple", "Lake Hylia", "Kakariko Village"]
    );

    t.undo();
    assert_eq!(woths(&t), vec!["Fire Temple", "Lake Hylia"]);
}

#[test]
fn abbreviation_expands_before_matching() {
    let mut t = tracker();
    hint(&mut t, HintKind::Barren, "DC");
    assert_eq!(t.hints().barrens, vec!["Dodongo's Cavern".to_string()]);
}

#[test]
fn goals_are_kept_verbatim() {
    let mut t = tracker();
    hint(&mut t, HintKind::Goal, "fire");
    assert_eq!(t.hints().goals, vec!["fire".to_string()]);
}

#[test]
fn doubled_woth_undoes_in_two_steps() {
    let mut t = tracker();
    hint(&mut t, HintKind::Woth, "lost");
    hint(&mut t, HintKind::Woth, "woods");
    assert!(t.hints().woths[0].doubled);

    t.undo();
    assert_eq!(woths(&t), vec!["Lost Woods"]);
    assert!(!t.hints().woths[0].doubled);
    t.undo();
    assert!(t.hints().woths.is_empty());
}

// ---------------------------------------------------------------------------
// Ledger properties
// ---------------------------------------------------------------------------

#[test]
fn full_undo_restores_initial_state() {
    let mut t = tracker();
    let initial = t.snapshot();

    t.input("034");
    t.input("012");
    t.input("012");
    t.input("012");
    t.input("051");
    t.input("051");
    t.input(".11");
    t.click_left(3);
    t.wheel(8, true);
    hint(&mut t, HintKind::Woth, "fire");
    hint(&mut t, HintKind::Woth, "fire");
    hint(&mut t, HintKind::Barren, "lost");
    hint(&mut t, HintKind::Always, "oot bow");
    t.click_right(7);

    let n = t.ledger().undo_entries().len();
    assert!(n >= 10);
    for _ in 0..n {
        t.undo();
    }
    assert_eq!(t.items(), initial.items.as_slice());
    assert_eq!(t.hints(), &initial.hints);
}

#[test]
fn undo_redo_undo_equals_single_undo() {
    let mut t = tracker();
    t.input("012");
    t.input("012");
    hint(&mut t, HintKind::Goal, "gold skulls");

    let mut once = t.clone();
    once.undo();

    t.undo();
    t.redo();
    t.undo();

    assert_eq!(t.snapshot(), once.snapshot());
}

#[test]
fn new_action_after_undo_clears_redo() {
    let mut t = tracker();
    t.input("034");
    t.undo();
    t.input("011");
    let after = t.snapshot();

    t.redo();
    assert_eq!(t.snapshot(), after);
    assert!(!t.ledger().can_redo());
}

#[test]
fn undo_keys_drive_the_ledger() {
    let mut t = tracker();
    t.input("034");
    t.input("-");
    assert!(!t.items()[7].enabled);
    t.input("+");
    assert!(t.items()[7].enabled);
    // empty stacks are absorbed
    t.input("+++");
    t.input("----");
    assert!(!t.items()[7].enabled);
}

#[test]
fn counts_stay_in_bounds() {
    let mut t = tracker();
    let token = t.item_index("Gold Skulltula Token").unwrap();
    let mut seed: u32 = 0x2545_f491;
    for _ in 0..2000 {
        seed ^= seed << 13;
        seed ^= seed >> 17;
        seed ^= seed << 5;
        if seed % 3 == 0 {
            t.click_right(token);
        } else {
            t.click_left(token);
        }
        let item = &t.items()[token];
        assert!(item.count <= item.count_max);
    }
}

#[test]
fn text_input_ignores_bindings_until_submit() {
    let mut t = tracker();
    t.input("w0-+34");
    assert!(t.eats_text());
    assert_eq!(t.text_buffer(), "0-+34");
    t.cancel();
    assert!(t.is_idle());
    assert!(t.ledger().undo_entries().is_empty());
}
