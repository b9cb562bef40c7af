mod common;

use std::collections::BTreeMap;

use common::{Call, RecordingHost};
use navigation::{Session, SessionError, ViewerConfig};
use pretty_assertions::assert_eq;
use tour::{ViewpointId, default_tour};

fn session() -> (Session<RecordingHost>, RecordingHost) {
    let host = RecordingHost::default();
    let graph = default_tour("./").expect("bundled tour is valid");
    let session = Session::new(graph, ViewerConfig::default(), host.clone());
    (session, host)
}

#[test]
fn initialize_creates_dome_then_buttons() {
    let (mut session, host) = session();
    let report = session.initialize().expect("initialize");
    assert_eq!(report.from, None);
    assert_eq!(report.created, 2);

    let calls = host.calls();
    assert_eq!(calls[0], Call::CreatePanorama("./textures/corridor.webp".to_string()));
    assert_eq!(calls[1], Call::ShowLoading);
    assert_eq!(
        calls[2],
        Call::SetTexture("./textures/corridor.webp".to_string(), report.ticket)
    );
    let labels: Vec<&str> = calls
        .iter()
        .filter_map(|call| match call {
            Call::CreateButton { label, .. } => Some(label.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(labels, vec!["Main hall", "Old room"]);
}

#[test]
fn old_set_is_fully_disposed_before_the_new_set_exists() {
    let (mut session, host) = session();
    session.initialize().expect("initialize");
    host.clear();

    let report = session
        .transition_to(&ViewpointId::new("mainHall"))
        .expect("transition");
    assert_eq!(report.disposed, 2);
    assert_eq!(report.created, 1);

    let calls = host.calls();
    let last_dispose = calls
        .iter()
        .rposition(|c| matches!(c, Call::DisposeButton { .. }))
        .expect("disposes");
    let swap = calls
        .iter()
        .position(|c| matches!(c, Call::SetTexture(..)))
        .expect("swap");
    let first_create = calls
        .iter()
        .position(|c| matches!(c, Call::CreateButton { .. }))
        .expect("creates");
    assert!(last_dispose < swap);
    assert!(swap < first_create);
}

#[test]
fn every_button_is_disposed_exactly_once() {
    let (mut session, host) = session();
    session.initialize().expect("initialize");
    for id in ["mainHall", "corridor", "oldRoom", "corridor"] {
        session
            .transition_to(&ViewpointId::new(id))
            .expect("transition");
    }
    session.shutdown();

    let mut created = 0;
    let mut disposals: BTreeMap<usize, usize> = BTreeMap::new();
    for call in host.calls() {
        match call {
            Call::CreateButton { .. } => created += 1,
            Call::DisposeButton { id } => *disposals.entry(id).or_default() += 1,
            _ => {}
        }
    }
    assert_eq!(disposals.len(), created);
    assert!(disposals.values().all(|&n| n == 1));
    assert_eq!(
        host.calls()
            .iter()
            .filter(|c| **c == Call::DisposePanorama)
            .count(),
        1
    );
}

#[test]
fn unknown_target_makes_no_host_calls() {
    let (mut session, host) = session();
    session.initialize().expect("initialize");
    host.clear();

    let err = session
        .transition_to(&ViewpointId::new("attic"))
        .expect_err("unknown");
    assert_eq!(err, SessionError::UnknownViewpoint(ViewpointId::new("attic")));
    assert!(host.calls().is_empty());
    assert_eq!(session.current_viewpoint(), Some(&ViewpointId::new("corridor")));
    assert_eq!(session.active_hotspots().len(), 2);
}

#[test]
fn stale_completion_makes_no_host_calls() {
    let (mut session, host) = session();
    let first = session.initialize().expect("initialize").ticket;
    session
        .transition_to(&ViewpointId::new("oldRoom"))
        .expect("transition");
    host.clear();

    session.texture_loaded(first, Ok(()));
    assert!(host.calls().is_empty());
    assert!(session.is_busy());
}

#[test]
fn dropping_the_session_releases_everything() {
    let (mut session, host) = session();
    session.initialize().expect("initialize");
    drop(session);

    let calls = host.calls();
    let disposed = calls
        .iter()
        .filter(|c| matches!(c, Call::DisposeButton { .. }))
        .count();
    assert_eq!(disposed, 2);
    assert!(calls.contains(&Call::DisposePanorama));
}
