use std::collections::HashMap;

use hexhunt_core::{
    AxialCoord, Command, Event, Level, ScanError, ScanFeedback, StatusMessage, TARGET_SPRITES,
};
use hexhunt_world::{self as world, query, World};

fn begin(world_state: &mut World, advance: bool) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(
        world_state,
        Command::BeginMission { advance },
        &mut events,
    );
    events
}

fn scan(world_state: &mut World, cell: AxialCoord) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(world_state, Command::ScanCell { cell }, &mut events);
    events
}

/// Groups unscanned cell coordinates by their hex distance to the target.
fn cells_by_distance(world_state: &World) -> HashMap<u32, Vec<AxialCoord>> {
    let target = query::target_cell(world_state).expect("active mission has a target");
    let mut buckets: HashMap<u32, Vec<AxialCoord>> = HashMap::new();
    for cell in query::cells(world_state) {
        if !cell.scanned() {
            buckets
                .entry(cell.coord().distance(target))
                .or_default()
                .push(cell.coord());
        }
    }
    buckets
}

#[test]
fn first_mission_starts_at_level_one_with_nineteen_cells() {
    let mut session = World::new(0xc0ffee);
    let events = begin(&mut session, false);

    assert_eq!(
        events,
        vec![Event::MissionStarted {
            level: Level::first(),
            radius: 2,
        }]
    );
    assert_eq!(query::cells(&session).len(), 19);
    assert_eq!(query::scans(&session), 0);
    assert_eq!(query::status(&session), StatusMessage::FindTheAlien);
    assert!(!query::mission_complete(&session));
    assert!(TARGET_SPRITES.contains(&query::target_sprite(&session)));
}

#[test]
fn sessions_with_equal_seeds_generate_identical_missions() {
    let mut left = World::new(0xabad_cafe);
    let mut right = World::new(0xabad_cafe);
    let _ = begin(&mut left, false);
    let _ = begin(&mut right, false);

    assert_eq!(query::cells(&left), query::cells(&right));
    assert_eq!(query::target_cell(&left), query::target_cell(&right));
    assert_eq!(query::target_sprite(&left), query::target_sprite(&right));
}

#[test]
fn scanning_a_cell_increments_the_counter_exactly_once() {
    let mut session = World::new(7);
    let _ = begin(&mut session, false);
    let target = query::target_cell(&session).expect("target");
    let probe = query::cells(&session)
        .iter()
        .map(|cell| cell.coord())
        .find(|coord| *coord != target)
        .expect("a non-target cell exists");

    let events = scan(&mut session, probe);
    assert_eq!(query::scans(&session), 1);
    assert!(matches!(
        events.as_slice(),
        [Event::CellScanned { scans: 1, .. }]
    ));

    let repeat = scan(&mut session, probe);
    assert_eq!(query::scans(&session), 1, "re-scan must not count");
    assert_eq!(
        repeat,
        vec![Event::ScanRejected {
            cell: probe,
            reason: ScanError::AlreadyScanned,
        }]
    );
}

#[test]
fn scanning_outside_the_grid_is_rejected() {
    let mut session = World::new(7);
    let _ = begin(&mut session, false);

    let outside = AxialCoord::new(10, 10);
    let events = scan(&mut session, outside);
    assert_eq!(
        events,
        vec![Event::ScanRejected {
            cell: outside,
            reason: ScanError::OutsideGrid,
        }]
    );
    assert_eq!(query::scans(&session), 0);
}

#[test]
fn feedback_sequence_tracks_warmer_colder_and_neutral() {
    let mut session = World::new(0x5ca1);
    let _ = begin(&mut session, false);

    let buckets = cells_by_distance(&session);
    let near = buckets.get(&1).expect("target has in-grid neighbors")[0];
    let (&far_distance, far) = buckets
        .iter()
        .find(|(distance, coords)| **distance >= 2 && coords.len() >= 3)
        .expect("radius-2 grids always hold three equidistant far cells");
    assert!(far_distance > 1);

    // First scan has no prior distance: neutral, prompt unchanged.
    let events = scan(&mut session, far[0]);
    assert!(matches!(
        events.as_slice(),
        [Event::CellScanned {
            feedback: ScanFeedback::Neutral,
            ..
        }]
    ));
    assert_eq!(query::status(&session), StatusMessage::FindTheAlien);

    // Closer than before: warmer.
    let events = scan(&mut session, near);
    assert!(matches!(
        events.as_slice(),
        [Event::CellScanned {
            feedback: ScanFeedback::Warmer,
            distance: 1,
            ..
        }]
    ));
    assert_eq!(query::status(&session), StatusMessage::Warmer);

    // Farther than before: colder.
    let events = scan(&mut session, far[1]);
    assert!(matches!(
        events.as_slice(),
        [Event::CellScanned {
            feedback: ScanFeedback::Colder,
            ..
        }]
    ));
    assert_eq!(query::status(&session), StatusMessage::Colder);

    // Equal distance: neutral again, and the colder message stays put.
    let events = scan(&mut session, far[2]);
    assert!(matches!(
        events.as_slice(),
        [Event::CellScanned {
            feedback: ScanFeedback::Neutral,
            ..
        }]
    ));
    assert_eq!(query::status(&session), StatusMessage::Colder);
}

#[test]
fn scanning_the_target_completes_the_mission_exactly_once() {
    let mut session = World::new(0xbee);
    let _ = begin(&mut session, false);
    let target = query::target_cell(&session).expect("target");

    let events = scan(&mut session, target);
    match events.as_slice() {
        [Event::TargetFound {
            cell,
            scans,
            best,
            improved,
        }] => {
            assert_eq!(*cell, target);
            assert_eq!(*scans, 1);
            assert!(*improved, "first win always sets the record");
            assert_eq!(best.scans(), 1);
            assert_eq!(best.level(), Level::first());
        }
        other => panic!("unexpected events: {other:?}"),
    }

    assert!(query::mission_complete(&session));
    assert_eq!(query::status(&session), StatusMessage::MissionSuccess);

    // Every further scan is refused until a new mission begins.
    let other_cell = query::cells(&session)
        .iter()
        .map(|cell| cell.coord())
        .find(|coord| *coord != target)
        .expect("non-target cell");
    let events = scan(&mut session, other_cell);
    assert_eq!(
        events,
        vec![Event::ScanRejected {
            cell: other_cell,
            reason: ScanError::MissionComplete,
        }]
    );
    assert_eq!(query::scans(&session), 1);
}

#[test]
fn best_score_only_improves_on_strictly_better_ratios() {
    let mut session = World::new(0x900d);
    let _ = begin(&mut session, false);

    // Lose some ground first: two wasted scans before the win.
    let target = query::target_cell(&session).expect("target");
    let wasted: Vec<AxialCoord> = query::cells(&session)
        .iter()
        .map(|cell| cell.coord())
        .filter(|coord| *coord != target)
        .take(2)
        .collect();
    for coord in wasted {
        let _ = scan(&mut session, coord);
    }
    let _ = scan(&mut session, target);
    let first_best = query::best(&session).expect("record after first win");
    assert_eq!(first_best.scans(), 3);

    // Second mission, won on the first scan: strictly better ratio.
    let _ = begin(&mut session, true);
    let target = query::target_cell(&session).expect("target");
    let events = scan(&mut session, target);
    match events.as_slice() {
        [Event::TargetFound { improved, best, .. }] => {
            assert!(*improved);
            assert_eq!(best.scans(), 1);
        }
        other => panic!("unexpected events: {other:?}"),
    }

    // Third mission, deliberately worse: the record must stand.
    let _ = begin(&mut session, true);
    let best_before = query::best(&session).expect("record");
    let target = query::target_cell(&session).expect("target");
    let radius = query::radius(&session);
    let wasted: Vec<AxialCoord> = query::cells(&session)
        .iter()
        .map(|cell| cell.coord())
        .filter(|coord| *coord != target)
        .take(radius as usize * 2)
        .collect();
    for coord in wasted {
        let _ = scan(&mut session, coord);
    }
    let events = scan(&mut session, target);
    match events.as_slice() {
        [Event::TargetFound { improved, best, .. }] => {
            assert!(!*improved);
            assert_eq!(*best, best_before);
        }
        other => panic!("unexpected events: {other:?}"),
    }
    assert_eq!(query::best(&session), Some(best_before));
}

#[test]
fn level_advances_only_between_missions_and_caps_at_maximum() {
    let mut session = World::new(0xface);
    let _ = begin(&mut session, false);
    assert_eq!(query::level(&session), Level::first());

    // Requesting a new mission mid-play regenerates at the same level.
    let _ = begin(&mut session, true);
    assert_eq!(query::level(&session), Level::first());

    for _ in 0..12 {
        let target = query::target_cell(&session).expect("target");
        let _ = scan(&mut session, target);
        let _ = begin(&mut session, true);
    }

    assert_eq!(query::level(&session), Level::MAX);
    assert_eq!(query::radius(&session), Level::MAX.radius());
}

#[test]
fn new_mission_resets_scan_state_but_keeps_the_record() {
    let mut session = World::new(0x1dea);
    let _ = begin(&mut session, false);
    let target = query::target_cell(&session).expect("target");
    let _ = scan(&mut session, target);
    let best = query::best(&session);
    assert!(best.is_some());

    let events = begin(&mut session, true);
    assert!(matches!(
        events.as_slice(),
        [Event::MissionStarted { .. }]
    ));
    assert_eq!(query::scans(&session), 0);
    assert!(!query::mission_complete(&session));
    assert_eq!(query::status(&session), StatusMessage::FindTheAlien);
    assert_eq!(query::best(&session), best);
    assert!(query::cells(&session).iter().all(|cell| !cell.scanned()));
}
