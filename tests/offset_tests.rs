use pratac::{Configuration, PersonOffset, PratacError, RoomOffset};
use std::collections::{BTreeMap, BTreeSet};

fn household() -> Configuration {
    Configuration {
        participants: vec!["Alice".into(), "Bob".into(), "Charlie".into()],
        participant_aliases: BTreeMap::from([
            ("Alice".to_string(), vec!["Al".to_string()]),
            ("Bob".to_string(), vec!["Bobby".to_string()]),
        ]),
        cleaning_areas: vec!["bathroom".into(), "kitchen".into(), "living_room".into()],
        start_date: "2024-01-01".into(),
    }
}

#[test]
fn person_offset_matches_household_layout() {
    let offsets = PersonOffset::build(&household()).unwrap();
    let expected: Vec<(Vec<String>, usize)> = vec![
        (vec!["alice".into(), "al".into()], 0),
        (vec!["bob".into(), "bobby".into()], 1),
        (vec!["charlie".into()], 2),
        (vec!["all".into()], 3),
    ];
    assert_eq!(offsets.key_sets(), expected);
    assert_eq!(offsets.len(), 4);
    assert_eq!(offsets.get("all"), Some(3));
}

#[test]
fn room_offset_keeps_configured_order() {
    let rooms = RoomOffset::build(&household());
    let got: Vec<(usize, &str)> = rooms.iter().collect();
    assert_eq!(
        got,
        vec![(0, "bathroom"), (1, "kitchen"), (2, "living_room")]
    );
}

#[test]
fn indices_are_dense_for_any_size() {
    for n in 1..8 {
        let mut config = household();
        config.participants = (0..n).map(|i| format!("P{}", (b'z' - i as u8) as char)).collect();
        config.participant_aliases.clear();
        config.cleaning_areas = (0..n + 2).map(|i| format!("area{i}")).collect();

        let persons = PersonOffset::build(&config).unwrap();
        assert_eq!(persons.len(), n + 1);
        let indices: BTreeSet<usize> = persons.key_sets().into_iter().map(|(_, i)| i).collect();
        assert_eq!(indices, (0..=n).collect::<BTreeSet<_>>());

        let rooms = RoomOffset::build(&config);
        assert_eq!(rooms.len(), n + 2);
        let room_indices: Vec<usize> = rooms.iter().map(|(i, _)| i).collect();
        assert_eq!(room_indices, (0..n + 2).collect::<Vec<_>>());
    }
}

#[test]
fn aliases_resolve_like_primary_name() {
    let offsets = PersonOffset::build(&household()).unwrap();
    for key in ["alice", "ALICE", "Al", "aL"] {
        assert_eq!(offsets.get(key), Some(0), "key {key}");
    }
    assert_eq!(offsets.get("Bobby"), offsets.get("bob"));
    assert_eq!(offsets.get("dave"), None);
}

#[test]
fn alias_shared_by_two_participants_is_rejected() {
    let mut config = household();
    config
        .participant_aliases
        .insert("Charlie".into(), vec!["al".into()]);
    match PersonOffset::build(&config) {
        Err(PratacError::DuplicateKey { key, first, second }) => {
            assert_eq!(key, "al");
            assert_eq!(first, "Alice");
            assert_eq!(second, "Charlie");
        }
        other => panic!("expected duplicate key error, got {other:?}"),
    }
}

#[test]
fn alias_equal_to_other_participant_name_is_rejected() {
    let mut config = household();
    config
        .participant_aliases
        .insert("Charlie".into(), vec!["BOB".into()]);
    assert!(matches!(
        PersonOffset::build(&config),
        Err(PratacError::DuplicateKey { .. })
    ));
}
