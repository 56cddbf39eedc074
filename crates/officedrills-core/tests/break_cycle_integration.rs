//! Integration tests for the full break cycle.
//!
//! Runs the timer to expiry, walks through a break, records it against an
//! on-disk store, and checks what the next break is allowed to offer.

use chrono::{TimeZone, Utc};
use officedrills_core::notify::RecordingNotifier;
use officedrills_core::session::WalkthroughStatus;
use officedrills_core::{
    BreakScheduler, Category, CategoryFilter, Clock, Event, ManualClock, Period, Settings, SqliteStore,
    TimerPhase,
};
use rand::SeedableRng;
use rand_pcg::Mcg128Xsl64;

fn clock() -> ManualClock {
    ManualClock::new(Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap())
}

#[test]
fn test_full_break_cycle_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("officedrills.db");
    let clock = clock();
    let notifier = RecordingNotifier::new();
    let settings = Settings {
        interval: 1,
        cooldown_exercises: 3,
        selected_category: CategoryFilter::Only(Category::Neck),
        ..Settings::default()
    };
    let mut rng = Mcg128Xsl64::seed_from_u64(11);

    let first_completed = {
        let store = SqliteStore::open_at(&path).unwrap();
        let mut sched =
            BreakScheduler::with_clock(settings.clone(), store, &notifier, clock.clone());

        sched.timer_mut().start();
        let mut due = Vec::new();
        for _ in 0..60 {
            clock.advance_secs(1);
            let handle = sched.timer().tick_handle().unwrap();
            due.extend(sched.timer_mut().tick(handle));
        }
        assert!(matches!(due.as_slice(), [Event::BreakDue { .. }]));
        assert_eq!(sched.timer().phase(), TimerPhase::Expired);
        sched.on_break_due();
        let sent = notifier.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].sound, Some(settings.sound_volume));

        let mut walk = sched.begin_break(&mut rng).unwrap();
        assert_eq!(walk.exercises().len(), 2);
        let completed = walk.exercises()[0].id.clone();

        walk.play();
        let handle = walk.tick_handle().unwrap();
        for _ in 0..30 {
            clock.advance_secs(1);
            walk.tick(handle);
        }
        walk.skip();
        assert_eq!(walk.status(), WalkthroughStatus::Finished);

        sched
            .record_completion(walk.into_completed_break().unwrap())
            .unwrap();
        assert_eq!(sched.timer().time_remaining(), 60);
        completed
    };

    // Reopen: state survived, and the completed exercise is held back.
    let store = SqliteStore::open_at(&path).unwrap();
    let sched = BreakScheduler::with_clock(settings, store, &notifier, clock.clone());
    let history = sched.history().unwrap();
    assert_eq!(history.len(), 1);
    let session = &history.sessions()[0];
    assert_eq!(session.completed_ids(), vec![first_completed.clone()]);
    assert_eq!(session.skipped_count(), 1);
    assert_eq!(session.total_duration, 60);
    assert_eq!(sched.cooldown().unwrap().ids(), [first_completed.clone()]);

    for seed in 0..20 {
        let next = sched
            .preview_break(&mut Mcg128Xsl64::seed_from_u64(seed))
            .unwrap();
        assert_eq!(next.len(), 2);
        assert!(next.iter().all(|e| e.id != first_completed));
    }

    let stats = history.stats(Period::Today, clock.now().date_naive());
    assert_eq!(stats.total_sessions, 1);
    assert_eq!(stats.completion_rate, 50);
    assert_eq!(stats.total_duration_min, 1);

    let csv = history.export_csv();
    assert_eq!(csv.lines().count(), 3);
    assert!(csv.lines().nth(1).unwrap().starts_with("2024-03-01,09:01:30,Neck,"));
}

#[test]
fn test_cancelled_break_leaves_store_untouched() {
    let store = SqliteStore::open_memory().unwrap();
    let notifier = RecordingNotifier::new();
    let sched = BreakScheduler::with_clock(Settings::default(), store, &notifier, clock());

    let mut walk = sched.begin_break(&mut Mcg128Xsl64::seed_from_u64(4)).unwrap();
    walk.complete();
    walk.cancel();
    assert!(walk.into_completed_break().is_none());

    assert!(sched.history().unwrap().is_empty());
    assert!(sched.cooldown().unwrap().is_empty());
}

#[test]
fn test_imported_catalog_drives_selection() {
    let store = SqliteStore::open_memory().unwrap();
    let notifier = RecordingNotifier::new();
    let sched = BreakScheduler::with_clock(Settings::default(), store, &notifier, clock());

    let mut catalog = sched.catalog().unwrap();
    catalog.reset_to_defaults();
    let report = catalog
        .import_json(r#"[{"name": "Wall Angels", "category": "Back"}, {"name": ""}]"#)
        .unwrap();
    assert_eq!(report.accepted, 1);
    sched.save_catalog(&catalog).unwrap();
    assert_eq!(sched.catalog().unwrap().len(), 31);

    let backup: serde_json::Value = serde_json::from_str(&sched.backup_json().unwrap()).unwrap();
    assert_eq!(backup["exercises"].as_array().unwrap().len(), 31);
}
