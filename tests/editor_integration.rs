//! Editor persistence round-trip tests

use wildmarch::core::error::SimError;
use wildmarch::editor::RosterEditor;
use wildmarch::entity::{Npc, NpcKind};
use wildmarch::observer::ObserverRegistry;

const BOUND: f64 = 100.0;

fn npc(kind: NpcKind, name: &str, x: f64, y: f64) -> Npc {
    Npc::new(kind, name, x, y, BOUND).unwrap()
}

#[test]
fn test_save_then_load_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dungeon.txt");

    let mut editor = RosterEditor::new(BOUND);
    editor.add(npc(NpcKind::Orc, "Grom", 10.0, 10.0)).unwrap();
    editor.add(npc(NpcKind::Knight, "Arthur", 12.0, 10.5)).unwrap();
    editor.add(npc(NpcKind::Bear, "Mishka", 25.0, 25.0)).unwrap();
    editor.save(&path).unwrap();

    let loaded = RosterEditor::load(&path, BOUND).unwrap();
    assert_eq!(loaded.len(), 3);
    for original in editor.npcs() {
        let copy = loaded.find(original.name()).unwrap();
        assert_eq!(copy.kind(), original.kind());
        assert_eq!(copy.pos(), original.pos());
        assert!(copy.is_alive());
    }
}

#[test]
fn test_save_skips_the_dead() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dungeon.txt");

    let mut editor = RosterEditor::new(BOUND);
    editor.add(npc(NpcKind::Knight, "Arthur", 10.0, 10.0)).unwrap();
    editor.add(npc(NpcKind::Orc, "Grom", 11.0, 10.0)).unwrap();
    editor.run_melee(5.0, &ObserverRegistry::new());
    editor.save(&path).unwrap();

    let loaded = RosterEditor::load(&path, BOUND).unwrap();
    assert_eq!(loaded.len(), 1);
    assert!(loaded.find("Arthur").is_some());
}

#[test]
fn test_load_rejects_unknown_kind() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dungeon.txt");
    std::fs::write(&path, "Dragon Smaug 10 10\n").unwrap();

    assert!(matches!(
        RosterEditor::load(&path, BOUND),
        Err(SimError::UnknownKind(_))
    ));
}

#[test]
fn test_load_rejects_malformed_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dungeon.txt");
    std::fs::write(&path, "Orc Grom 10 10\nKnight Arthur ten 10\n").unwrap();

    assert!(matches!(
        RosterEditor::load(&path, BOUND),
        Err(SimError::MalformedLine { line: 2, .. })
    ));
}

#[test]
fn test_load_rejects_out_of_bounds_coordinates() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dungeon.txt");
    std::fs::write(&path, "Orc Grom 500 500\n").unwrap();

    assert!(matches!(
        RosterEditor::load(&path, BOUND),
        Err(SimError::InvalidCoordinates { .. })
    ));
}
