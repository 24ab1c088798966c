use serde::Serialize;

use crate::model::hints::HintKind;
use crate::model::item::{Item, ProgressionKind};
use crate::tracker::Tracker;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct StatusJson {
    pub items: Vec<ItemJson>,
    pub woths: Vec<String>,
    pub goals: Vec<String>,
    pub barrens: Vec<String>,
    pub sometimes: Vec<String>,
    pub always: Vec<AlwaysJson>,
    pub undo: usize,
    pub redo: usize,
}

#[derive(Serialize)]
pub struct ItemJson {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reward: Option<String>,
}

#[derive(Serialize)]
pub struct AlwaysJson {
    pub location: String,
    pub text: String,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn item_to_json(tracker: &Tracker, item: &Item) -> ItemJson {
    let countable = item.kind() == ProgressionKind::Countable;
    ItemJson {
        name: item.name.clone(),
        stage: (item.kind() == ProgressionKind::Staged && !item.item_progression.is_empty())
            .then(|| item.stage_name().to_string()),
        count: countable.then_some(item.count),
        capacity: item.capacity(),
        reward: tracker.reward_name(item).map(str::to_string),
    }
}

/// Enabled items plus every hint; medallions with a reward are listed even
/// when not collected
pub fn status_to_json(tracker: &Tracker) -> StatusJson {
    let hints = tracker.hints();
    StatusJson {
        items: tracker
            .items()
            .iter()
            .filter(|i| i.enabled || i.dungeon_index != 0)
            .map(|i| item_to_json(tracker, i))
            .collect(),
        woths: hints.lines(HintKind::Woth),
        goals: hints.goals.clone(),
        barrens: hints.barrens.clone(),
        sometimes: hints.sometimes.clone(),
        always: always_entries(tracker)
            .into_iter()
            .map(|(location, text)| AlwaysJson {
                location: location.to_string(),
                text: text.to_string(),
            })
            .collect(),
        undo: tracker.ledger().undo_entries().len(),
        redo: tracker.ledger().redo_entries().len(),
    }
}

/// Filled always slots as (location, text)
fn always_entries(tracker: &Tracker) -> Vec<(&str, &str)> {
    let locations = tracker.config().hint_tracker.always_locations.iter();
    locations
        .zip(tracker.hints().always.iter())
        .filter(|(_, text)| !text.is_empty())
        .map(|(loc, text)| (loc.as_str(), text.as_str()))
        .collect()
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

/// Short progress suffix: stage name, count or capacity
pub fn item_detail(item: &Item) -> Option<String> {
    match item.kind() {
        ProgressionKind::Countable => Some(format!("{}/{}", item.count, item.count_max)),
        ProgressionKind::Staged if !item.item_progression.is_empty() => {
            let stage = item.stage_name();
            match item.capacity() {
                Some(cap) => Some(format!("{stage} ({cap})")),
                None => Some(stage.to_string()),
            }
        }
        ProgressionKind::Staged => item.capacity().map(|c| c.to_string()),
        ProgressionKind::Toggle => None,
    }
}

/// One line per item: name, progress and assigned reward
pub fn format_item_line(tracker: &Tracker, item: &Item) -> String {
    let mut line = item.name.clone();
    if let Some(detail) = item_detail(item) {
        line.push_str(": ");
        line.push_str(&detail);
    }
    if let Some(reward) = tracker.reward_name(item) {
        line.push_str(" -> ");
        line.push_str(reward);
    }
    line
}

pub fn format_status(tracker: &Tracker) -> Vec<String> {
    let mut lines = vec!["Items:".to_string()];
    for item in tracker
        .items()
        .iter()
        .filter(|i| i.enabled || i.dungeon_index != 0)
    {
        lines.push(format!("  {}", format_item_line(tracker, item)));
    }

    for kind in [
        HintKind::Woth,
        HintKind::Goal,
        HintKind::Barren,
        HintKind::Sometimes,
    ] {
        let entries = tracker.hints().lines(kind);
        if entries.is_empty() {
            continue;
        }
        lines.push(format!("{}:", kind.label()));
        lines.extend(entries.iter().map(|e| format!("  {e}")));
    }

    let always = always_entries(tracker);
    if !always.is_empty() {
        lines.push("always:".to_string());
        lines.extend(always.iter().map(|(loc, text)| format!("  {loc}: {text}")));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::config::TrackerConfig;
    use insta::assert_snapshot;

    fn tracker() -> Tracker {
        let config = TrackerConfig::from_toml(
            r#"
[item_tracker]
dungeon_rewards = ["Deku Tree", "Fire Temple"]

[hint_tracker]
locations = ["Fire Temple", "Lost Woods"]
always_locations = ["Skull Mask", "Frog 2"]

[[items]]
name = "Bow"
capacity_progression = [30, 40, 50]

[[items]]
name = "Progressive Hookshot"
item_progression = ["Hookshot", "Longshot"]

[[items]]
name = "Gold Skulltula Token"
count_max = 100
count_step = 1

[[items]]
name = "Forest Medallion"
is_medallion = true

[[items]]
name = "Lens of Truth"
"#,
        )
        .unwrap();
        let mut t = Tracker::new(config).unwrap();
        t.change_item(0, true);
        t.change_item(0, true);
        t.change_item(1, true);
        t.change_item(1, true);
        for _ in 0..4 {
            t.change_item(2, true);
        }
        t.wheel(3, true);
        for text in ["woth fire", "woth fire", "barren lost", "sometimes bombchus"] {
            let (cat, body) = text.split_once(' ').unwrap();
            t.input_action(crate::tracker::action::Action::StartHintInput(
                HintKind::from_label(cat).unwrap(),
            ));
            t.input(body);
            t.submit();
        }
        t.input_action(crate::tracker::action::Action::StartHintInput(HintKind::Always));
        t.input("frog light arrows");
        t.submit();
        t
    }

    #[test]
    fn item_details() {
        let mut bag = Item::new("Bomb Bag");
        bag.capacity_progression = vec![20, 30, 40];
        bag.enabled = true;
        assert_eq!(item_detail(&bag), Some("20".to_string()));
        assert_eq!(item_detail(&Item::new("Lens of Truth")), None);
    }

    #[test]
    fn status_text() {
        let t = tracker();
        assert_snapshot!(format_status(&t).join("\n"), @r"
        Items:
          Bow: 40
          Progressive Hookshot: Longshot
          Gold Skulltula Token: 3/100
          Forest Medallion -> Deku Tree
        woth:
          Fire Temple (x2)
        barren:
          Lost Woods
        sometimes:
          bombchus
        always:
          Frog 2: light arrows
        ");
    }

    #[test]
    fn status_json() {
        let json = serde_json::to_value(status_to_json(&tracker())).unwrap();
        assert_eq!(json["items"][0]["capacity"], 40);
        assert_eq!(json["items"][1]["stage"], "Longshot");
        assert_eq!(json["items"][2]["count"], 3);
        assert_eq!(json["items"][3]["reward"], "Deku Tree");
        assert_eq!(json["woths"][0], "Fire Temple (x2)");
        assert_eq!(json["always"][0]["location"], "Frog 2");
        assert_eq!(json["undo"], 13);
    }
}
