use std::collections::BTreeSet;

use playlist_cover::error::ValidationError;
use playlist_cover::management::{RANDOM_PICK, TrackSelection};

#[test]
fn test_select_all_and_none() {
    let mut selection = TrackSelection::new(5);
    assert!(selection.is_empty());
    assert_eq!(selection.available(), 5);

    selection.select_all();
    assert_eq!(selection.len(), 5);
    assert_eq!(selection.indices(), vec![0, 1, 2, 3, 4]);

    selection.select_none();
    assert!(selection.is_empty());
}

#[test]
fn test_toggle() {
    let mut selection = TrackSelection::new(3);

    selection.toggle(1).unwrap();
    assert!(selection.contains(1));

    selection.toggle(1).unwrap();
    assert!(!selection.contains(1));

    assert_eq!(
        selection.toggle(3),
        Err(ValidationError::TrackOutOfRange {
            index: 3,
            available: 3
        })
    );
}

#[test]
fn test_select_is_all_or_nothing() {
    let mut selection = TrackSelection::new(4);
    selection.select(&[2, 0, 2]).unwrap();
    assert_eq!(selection.indices(), vec![0, 2]);

    assert!(selection.select(&[1, 9]).is_err());
    assert_eq!(selection.indices(), vec![0, 2]);
}

#[test]
fn test_select_random_picks_distinct_tracks() {
    for available in [0, 1, 2, 3, 4, 10, 50] {
        let mut selection = TrackSelection::new(available);
        selection.select_all();
        selection.select_random();

        let picked = selection.indices();
        assert_eq!(picked.len(), RANDOM_PICK.min(available));
        assert_eq!(picked.iter().collect::<BTreeSet<_>>().len(), picked.len());
        assert!(picked.iter().all(|i| *i < available));
    }
}

#[test]
fn test_select_random_varies() {
    // 1140 possible picks out of 20, twenty draws are all equal with
    // negligible probability
    let mut picks = BTreeSet::new();
    for _ in 0..20 {
        let mut selection = TrackSelection::new(20);
        selection.select_random();
        picks.insert(selection.indices());
    }
    assert!(picks.len() > 1);
}
