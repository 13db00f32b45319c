//! Autosave end-to-end behavior: debounce, change detection, the disabled
//! guard, and coalescing of edits that land during an in-flight save.

mod fixtures;

use std::time::{Duration, Instant};

use inkstream::core::DraftFields;
use inkstream::remote::{DraftRemote, RemoteError};
use inkstream::sync::{Autosave, SaveStatus};

use fixtures::identity::blog_id;
use fixtures::remotes::RecordingDraftRemote;

const DELAY: Duration = Duration::from_millis(100);
const SAVED_DISPLAY: Duration = Duration::from_millis(2_000);

fn draft(content: &str) -> DraftFields {
    DraftFields {
        title: "My Post".into(),
        content: content.into(),
        ..Default::default()
    }
}

/// Drive the machine the way a client driver would: check the deadline,
/// hand the due value to the remote, report the outcome.
fn pump(
    autosave: &mut Autosave<DraftFields>,
    remote: &mut RecordingDraftRemote,
    now: Instant,
) -> Option<Result<(), RemoteError>> {
    let fields = autosave.take_due(now)?;
    match remote.persist(blog_id(1), &fields) {
        Ok(_) => {
            autosave.complete_success(now);
            Some(Ok(()))
        }
        Err(err) => {
            autosave.complete_failure(now);
            Some(Err(err))
        }
    }
}

#[test]
fn n_edits_in_one_window_persist_once_with_the_last_value() {
    let mut autosave = Autosave::new(draft(""), DELAY, SAVED_DISPLAY);
    let mut remote = RecordingDraftRemote::new();
    let base = Instant::now();

    for (i, step) in [10u64, 30, 50, 70].iter().enumerate() {
        autosave.update(draft(&format!("revision {i}")), base + Duration::from_millis(*step));
    }

    // Nothing is due before the quiet window of the *last* edit elapses.
    assert!(pump(&mut autosave, &mut remote, base + Duration::from_millis(100)).is_none());

    let due_at = base + Duration::from_millis(170);
    pump(&mut autosave, &mut remote, due_at).expect("due").expect("persist ok");

    assert_eq!(remote.persisted.len(), 1, "exactly one persist call");
    assert_eq!(remote.persisted[0].1.content, "revision 3");
}

#[test]
fn resubmitting_the_same_value_never_persists_twice() {
    let mut autosave = Autosave::new(draft(""), DELAY, SAVED_DISPLAY);
    let mut remote = RecordingDraftRemote::new();
    let base = Instant::now();

    autosave.update(draft("v1"), base);
    pump(&mut autosave, &mut remote, base + DELAY).expect("first save");

    // Same content scheduled again: change detection is content-based.
    autosave.update(draft("v1"), base + Duration::from_millis(300));
    assert!(autosave.next_deadline().is_none());
    assert!(pump(&mut autosave, &mut remote, base + Duration::from_millis(900)).is_none());
    assert_eq!(remote.persisted.len(), 1);
}

#[test]
fn disabled_guard_never_persists() {
    let mut autosave = Autosave::new(draft(""), DELAY, SAVED_DISPLAY);
    let mut remote = RecordingDraftRemote::new();
    let base = Instant::now();

    // No draft id exists yet: the editor keeps autosave disabled.
    autosave.set_enabled(false);
    autosave.update(draft("typed before draft exists"), base);
    autosave.update(draft("more typing"), base + Duration::from_millis(50));

    assert!(pump(&mut autosave, &mut remote, base + Duration::from_millis(10_000)).is_none());
    assert!(remote.persisted.is_empty());
    assert_eq!(autosave.save_now(), None, "manual save is guarded too");
}

#[test]
fn edit_during_save_is_coalesced_into_a_second_save() {
    let mut autosave = Autosave::new(draft(""), DELAY, SAVED_DISPLAY);
    let mut remote = RecordingDraftRemote::new();
    let base = Instant::now();

    autosave.update(draft("v1"), base);
    let due_at = base + DELAY;
    let fields = autosave.take_due(due_at).expect("v1 due");

    // Mid-save edit: must not start a second concurrent save, must not be
    // dropped.
    autosave.update(draft("v2"), due_at + Duration::from_millis(5));
    assert!(autosave.take_due(due_at + Duration::from_millis(5)).is_none());

    remote.persist(blog_id(1), &fields).expect("persist v1");
    let done = due_at + Duration::from_millis(10);
    autosave.complete_success(done);

    // The queued edit gets its own quiet window from completion.
    pump(&mut autosave, &mut remote, done + DELAY).expect("v2 due").expect("ok");
    assert_eq!(remote.persisted.len(), 2, "v1 then v2, never concurrent");
    assert_eq!(remote.persisted[1].1.content, "v2");
    assert_eq!(autosave.persisted().content, "v2");
}

#[test]
fn undo_during_save_persists_the_reverted_content() {
    let mut autosave = Autosave::new(draft("original"), DELAY, SAVED_DISPLAY);
    let mut remote = RecordingDraftRemote::new();
    let base = Instant::now();

    autosave.update(draft("edited"), base);
    let due_at = base + DELAY;
    let fields = autosave.take_due(due_at).expect("edited due");

    // Undo back to the pre-edit content while "edited" is saving. Once
    // "edited" lands, the remote and the editor genuinely differ.
    autosave.update(draft("original"), due_at + Duration::from_millis(5));

    remote.persist(blog_id(1), &fields).expect("persist edited");
    let done = due_at + Duration::from_millis(10);
    autosave.complete_success(done);

    assert!(autosave.is_dirty(), "the revert is a real difference");
    assert!(autosave.next_deadline().is_some());
    pump(&mut autosave, &mut remote, done + DELAY).expect("revert due").expect("ok");
    assert_eq!(remote.persisted.len(), 2);
    assert_eq!(remote.persisted[1].1.content, "original");
    assert_eq!(autosave.persisted().content, "original");
}

#[test]
fn edit_queued_during_failed_save_fires_on_its_own_window() {
    let mut autosave = Autosave::new(draft(""), DELAY, SAVED_DISPLAY);
    let mut remote = RecordingDraftRemote::new();
    let base = Instant::now();

    autosave.update(draft("v1"), base);
    let due_at = base + DELAY;
    let fields = autosave.take_due(due_at).expect("v1 due");
    autosave.update(draft("v2"), due_at + Duration::from_millis(5));

    remote.fail_next = Some(RemoteError::Transient {
        reason: "gateway timeout".into(),
    });
    remote.persist(blog_id(1), &fields).expect_err("v1 fails");
    let done = due_at + Duration::from_millis(10);
    autosave.complete_failure(done);

    assert_eq!(autosave.status(done), SaveStatus::Error);
    // v2 superseded the failed v1; it saves on its own window without a
    // manual retry.
    pump(&mut autosave, &mut remote, done + DELAY).expect("v2 due").expect("ok");
    assert_eq!(remote.persisted.len(), 1);
    assert_eq!(remote.persisted[0].1.content, "v2");
}

#[test]
fn failed_save_surfaces_error_and_allows_manual_retry() {
    let mut autosave = Autosave::new(draft(""), DELAY, SAVED_DISPLAY);
    let mut remote = RecordingDraftRemote::new();
    let base = Instant::now();

    autosave.update(draft("v1"), base);
    remote.fail_next = Some(RemoteError::Transient {
        reason: "gateway timeout".into(),
    });
    let due_at = base + DELAY;
    let result = pump(&mut autosave, &mut remote, due_at).expect("due");
    assert!(result.is_err());
    assert_eq!(autosave.status(due_at), SaveStatus::Error);

    // No automatic retry...
    assert!(pump(&mut autosave, &mut remote, due_at + Duration::from_millis(5_000)).is_none());

    // ...but save_now picks the failed value back up.
    let fields = autosave.save_now().expect("manual retry");
    assert_eq!(fields.content, "v1");
    remote.persist(blog_id(1), &fields).expect("persist ok");
    let done = due_at + Duration::from_millis(20);
    autosave.complete_success(done);
    assert_eq!(autosave.status(done), SaveStatus::Saved);
}

#[test]
fn wakeup_timer_drives_the_machine() {
    use crossbeam::channel;
    use inkstream::sync::WakeupTimer;

    let delay = Duration::from_millis(20);
    let mut autosave = Autosave::new(draft(""), delay, SAVED_DISPLAY);
    let mut remote = RecordingDraftRemote::new();
    let (tx, rx) = channel::unbounded();
    let mut timer = WakeupTimer::new(tx);

    // Two edits in quick succession: the second reschedule supersedes the
    // first wakeup.
    autosave.update(draft("v1"), Instant::now());
    timer.schedule("draft", delay);
    autosave.update(draft("v2"), Instant::now());
    timer.schedule("draft", delay);

    let mut saves = 0;
    while saves == 0 {
        let token = rx
            .recv_timeout(Duration::from_secs(2))
            .expect("wakeup delivered");
        if !timer.should_fire(&token) {
            continue; // stale wakeup from the superseded schedule
        }
        if pump(&mut autosave, &mut remote, Instant::now()).is_some() {
            saves += 1;
        }
    }

    assert_eq!(remote.persisted.len(), 1);
    assert_eq!(remote.persisted[0].1.content, "v2");
}

#[test]
fn status_walks_idle_saving_saved_idle() {
    let mut autosave = Autosave::new(draft(""), DELAY, SAVED_DISPLAY);
    let base = Instant::now();
    assert_eq!(autosave.status(base), SaveStatus::Idle);

    autosave.update(draft("v1"), base);
    assert_eq!(autosave.status(base), SaveStatus::Idle, "armed is not saving");

    let due_at = base + DELAY;
    autosave.take_due(due_at).expect("due");
    assert_eq!(autosave.status(due_at), SaveStatus::Saving);

    autosave.complete_success(due_at);
    assert_eq!(autosave.status(due_at), SaveStatus::Saved);
    assert_eq!(
        autosave.status(due_at + Duration::from_millis(1_999)),
        SaveStatus::Saved
    );
    assert_eq!(autosave.status(due_at + SAVED_DISPLAY), SaveStatus::Idle);
}
