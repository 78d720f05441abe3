//! Loads data directories from disk.

use std::fs;
use std::path::{Path, PathBuf};

use mon_content::ContentFactory;
use mon_core::{CurseId, Effectiveness, ModifierKey, MonType, TypeChart};

fn bundled_data() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data")
}

#[test]
fn bundled_content_loads() {
    let content = ContentFactory::new(bundled_data())
        .load()
        .expect("bundled content");

    assert_eq!(content.config.validate(), Ok(()));
    assert_eq!(content.curses.len(), 3);
    assert_eq!(content.chart, TypeChart::standard());

    let weakened = content.curses.get(CurseId(2)).expect("WeakenedPlayer");
    assert_eq!(weakened.name, "WeakenedPlayer");
    assert!(weakened.effects.get(ModifierKey::PlayerAttack).is_some());
}

#[test]
fn chart_overrides_are_picked_up() {
    let dir = tempfile::tempdir().expect("tempdir");
    for file in ["config.toml", "curses.ron"] {
        fs::copy(bundled_data().join(file), dir.path().join(file)).expect("copy");
    }
    fs::write(
        dir.path().join("chart.ron"),
        "(overrides: [(attack: dragon, defense: fairy, effectiveness: neutral)])",
    )
    .expect("write chart");

    let content = ContentFactory::new(dir.path()).load().expect("content");
    assert_eq!(
        content.chart.matchup(MonType::Dragon, MonType::Fairy),
        Effectiveness::Neutral
    );
}

#[test]
fn missing_curses_file_names_the_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("config.toml"), "").expect("write config");

    let err = ContentFactory::new(dir.path())
        .load()
        .expect_err("no curses.ron");
    assert!(format!("{err:#}").contains("curses.ron"));
}

#[test]
fn duplicate_curse_ids_are_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(
        dir.path().join("curses.ron"),
        r#"(curses: [
            (id: 1, name: "A", effects: []),
            (id: 1, name: "B", effects: []),
        ])"#,
    )
    .expect("write curses");

    let err = ContentFactory::new(dir.path())
        .load_curses()
        .expect_err("duplicate id");
    assert!(format!("{err:#}").contains("more than once"));
}
