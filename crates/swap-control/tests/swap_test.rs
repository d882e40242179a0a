use swap_agents::Agent;
use swap_control::{ClassifyOutcome, GoldOutcome, Swap};
use swap_core::config::SwapConfig;
use swap_core::models::{Classification, Label, SubjectId, UserId};
use swap_core::traits::GoldSource;
use test_fixtures::load_scenario;

fn swap() -> Swap {
    Swap::new(SwapConfig::default()).unwrap()
}

fn static_swap() -> Swap {
    Swap::new(SwapConfig {
        back_update: true,
        ..SwapConfig::default()
    })
    .unwrap()
}

fn cl(user: &str, subject: &str, annotation: Label) -> Classification {
    Classification::new(user, subject, annotation)
}

fn score(swap: &mut Swap, subject: &str) -> f64 {
    swap.subject_score(&SubjectId::from(subject)).unwrap().score
}

#[test]
fn rejects_invalid_config() {
    let config = SwapConfig {
        p0: 1.0,
        ..SwapConfig::default()
    };
    assert!(Swap::new(config).is_err());
}

#[test]
fn two_subject_scenario() {
    let scenario = load_scenario("two_subjects");
    let expected = scenario.expected.clone();
    let store = scenario.into_store();

    let mut swap = swap();
    swap.set_gold_labels(store.all_golds().unwrap(), false).unwrap();
    let ingested = swap.run(store.historical().to_vec()).unwrap();

    assert_eq!(ingested.processed, 2);
    assert_eq!(ingested.user_updates, 1);
    assert_eq!(ingested.skipped, 1);

    let s2 = expected["s2"].as_f64().unwrap();
    assert!((score(&mut swap, "s2") - s2).abs() < 1e-4);

    let rows = swap.export_user_scores().unwrap();
    assert_eq!(rows.len(), 1);
    assert!((rows[0].score_real - expected["u_real"].as_f64().unwrap()).abs() < 1e-12);
    assert!((rows[0].score_bogus - expected["u_bogus"].as_f64().unwrap()).abs() < 1e-12);
    assert_eq!(rows[0].classifications, 2);
}

#[test]
fn late_gold_reaches_the_unlabelled_subject() {
    let mut swap = swap();
    swap.process_one(&cl("u", "s1", Label::Real)).unwrap();
    swap.process_one(&cl("u", "s2", Label::Real)).unwrap();
    assert!((score(&mut swap, "s2") - 0.12).abs() < 1e-9);

    let outcome = swap
        .set_gold_label(&SubjectId::from("s1"), Label::Real, false)
        .unwrap();
    assert_eq!(outcome, GoldOutcome::Assigned);
    assert!((score(&mut swap, "s2") - 0.08 / 0.52).abs() < 1e-9);
}

#[test]
fn embedded_gold_trains_user_but_not_subject() {
    let mut swap = swap();
    let classification = cl("u", "s1", Label::Real).with_gold(Label::Real);

    assert_eq!(swap.process_one(&classification).unwrap(), ClassifyOutcome::UserUpdated);
    assert_eq!(swap.subject_score(&SubjectId::from("s1")).unwrap().gold, None);

    let rows = swap.export_user_scores().unwrap();
    assert!((rows[0].score_real - 2.0 / 3.0).abs() < 1e-12);
}

fn no_gold_updates() -> Swap {
    Swap::new(SwapConfig {
        gold_updates: false,
        ..SwapConfig::default()
    })
    .unwrap()
}

#[test]
fn gold_updates_off_defers_user_training() {
    let mut swap = no_gold_updates();
    swap.set_gold_label(&SubjectId::from("s1"), Label::Real, false).unwrap();

    let outcome = swap.process_one(&cl("u", "s1", Label::Real)).unwrap();
    assert_eq!(outcome, ClassifyOutcome::Skipped);
    assert_eq!(swap.deferred_golds(), 1);
    let user = swap.users().get(&UserId::from("u")).unwrap();
    assert_eq!(user.ledger().n_resolved(), 0);
    assert_eq!(user.ledger().cached_score().real, 0.5);

    let rows = swap.export_user_scores().unwrap();
    assert!((rows[0].score_real - 2.0 / 3.0).abs() < 1e-12);
    assert_eq!(swap.deferred_golds(), 0);
}

#[test]
fn gold_updates_off_skill_ignores_gold_timing() {
    let mut before = no_gold_updates();
    before.set_gold_label(&SubjectId::from("s1"), Label::Real, false).unwrap();
    before.process_one(&cl("u", "s1", Label::Real)).unwrap();
    before.process_one(&cl("u", "s2", Label::Real)).unwrap();
    before.process_changes().unwrap();

    let mut after = no_gold_updates();
    after.process_one(&cl("u", "s1", Label::Real)).unwrap();
    after.process_one(&cl("u", "s2", Label::Real)).unwrap();
    after.set_gold_label(&SubjectId::from("s1"), Label::Real, false).unwrap();
    after.process_changes().unwrap();

    assert_eq!(before.export_user_scores().unwrap(), after.export_user_scores().unwrap());
    assert_eq!(score(&mut before, "s2"), score(&mut after, "s2"));
    assert!((score(&mut before, "s2") - 0.08 / 0.52).abs() < 1e-9);
}

#[test]
fn embedded_gold_is_ignored_when_gold_updates_are_off() {
    let mut swap = no_gold_updates();
    swap.process_one(&cl("u", "s1", Label::Real).with_gold(Label::Real)).unwrap();

    assert_eq!(swap.deferred_golds(), 0);
    assert_eq!(swap.export_user_scores().unwrap()[0].score_real, 0.5);
}

#[test]
fn conflicting_gold_needs_overwrite() {
    let mut swap = swap();
    let id = SubjectId::from("s1");
    swap.process_one(&cl("u", "s1", Label::Real)).unwrap();

    assert_eq!(swap.set_gold_label(&id, Label::Real, false).unwrap(), GoldOutcome::Assigned);
    assert_eq!(swap.set_gold_label(&id, Label::Real, false).unwrap(), GoldOutcome::Unchanged);
    assert_eq!(swap.set_gold_label(&id, Label::Bogus, false).unwrap(), GoldOutcome::Conflict);
    assert_eq!(swap.subject_score(&id).unwrap().gold, Some(Label::Real));

    assert_eq!(swap.set_gold_label(&id, Label::Bogus, true).unwrap(), GoldOutcome::Assigned);
    assert_eq!(swap.subject_score(&id).unwrap().gold, Some(Label::Bogus));

    let row = &swap.export_user_scores().unwrap()[0];
    assert!((row.score_bogus - 1.0 / 3.0).abs() < 1e-12);
    assert_eq!(row.score_real, 0.5);
}

#[test]
fn set_gold_labels_counts_outcomes() {
    let mut swap = swap();
    swap.set_gold_label(&SubjectId::from("a"), Label::Real, false).unwrap();
    swap.set_gold_label(&SubjectId::from("b"), Label::Real, false).unwrap();

    let stats = swap
        .set_gold_labels(
            [
                (SubjectId::from("a"), Label::Real),
                (SubjectId::from("b"), Label::Bogus),
                (SubjectId::from("c"), Label::Bogus),
            ],
            false,
        )
        .unwrap();
    assert_eq!((stats.assigned, stats.unchanged, stats.conflicts), (1, 1, 1));
}

#[test]
fn static_mode_pushes_latest_skill_everywhere() {
    let mut swap = static_swap();
    swap.process_one(&cl("u", "s1", Label::Real)).unwrap();
    swap.process_one(&cl("u", "s2", Label::Real)).unwrap();
    swap.process_one(&cl("u", "s3", Label::Real)).unwrap();

    swap.set_gold_label(&SubjectId::from("s3"), Label::Real, false).unwrap();
    swap.process_changes().unwrap();

    for subject in ["s1", "s2", "s3"] {
        assert!((score(&mut swap, subject) - 0.08 / 0.52).abs() < 1e-9, "{subject}");
    }
}

#[test]
fn dynamic_mode_keeps_earlier_snapshots() {
    let mut swap = swap();
    swap.process_one(&cl("u", "s1", Label::Real)).unwrap();
    swap.process_one(&cl("u", "s2", Label::Real)).unwrap();
    swap.set_gold_label(&SubjectId::from("s2"), Label::Real, false).unwrap();

    assert!((score(&mut swap, "s1") - 0.12).abs() < 1e-9);
    assert!((score(&mut swap, "s2") - 0.08 / 0.52).abs() < 1e-9);
}

#[test]
fn classify_returns_current_score_in_static_mode() {
    let mut swap = static_swap();
    swap.set_gold_label(&SubjectId::from("g"), Label::Real, false).unwrap();
    swap.classify(&cl("u", "g", Label::Real)).unwrap();

    let result = swap.classify(&cl("u", "s", Label::Real)).unwrap();
    assert_eq!(result.id, SubjectId::from("s"));
    assert!((result.score - 0.08 / 0.52).abs() < 1e-9);
}

#[test]
fn unknown_subject_score_is_an_error() {
    let mut swap = swap();
    assert!(swap.subject_score(&SubjectId::from("ghost")).is_err());
}

#[test]
fn user_export_is_sorted_by_id() {
    let mut swap = swap();
    for user in ["zoe", "adam", "mia"] {
        swap.process_one(&cl(user, "s1", Label::Real)).unwrap();
    }
    swap.process_one(&cl("mia", "s2", Label::Bogus)).unwrap();

    let rows = swap.export_user_scores().unwrap();
    let ids: Vec<&UserId> = rows.iter().map(|row| &row.id).collect();
    assert_eq!(ids, [&UserId::from("adam"), &UserId::from("mia"), &UserId::from("zoe")]);
    assert_eq!(rows[1].classifications, 2);
}

#[test]
fn history_export_starts_at_prior() {
    let mut swap = swap();
    swap.process_one(&cl("u", "s1", Label::Real)).unwrap();
    swap.process_one(&cl("v", "s1", Label::Bogus)).unwrap();

    let history = swap.history_export().unwrap();
    let trace = &history.get(&SubjectId::from("s1")).unwrap().scores;
    assert_eq!(trace.len(), 3);
    assert_eq!(trace[0], 0.12);
}

#[test]
fn score_export_covers_every_subject() {
    let mut swap = swap();
    swap.set_gold_label(&SubjectId::from("g"), Label::Bogus, false).unwrap();
    swap.process_one(&cl("u", "s1", Label::Real)).unwrap();

    let export = swap.score_export().unwrap();
    assert_eq!(export.len(), 2);
    assert_eq!(export.get(&SubjectId::from("g")).unwrap().gold, Some(Label::Bogus));
    assert_eq!(export.class_counts().unknown, 1);
}

#[test]
fn controversial_and_consensus_subjects() {
    let mut swap = swap();
    for (user, subject, annotation) in [
        ("a", "split", Label::Real),
        ("b", "split", Label::Bogus),
        ("a", "sure", Label::Real),
        ("b", "sure", Label::Real),
        ("c", "sure", Label::Real),
        ("a", "lean", Label::Real),
        ("b", "lean", Label::Real),
        ("c", "lean", Label::Bogus),
    ] {
        swap.process_one(&cl(user, subject, annotation)).unwrap();
    }
    swap.set_gold_label(&SubjectId::from("unvoted"), Label::Real, false).unwrap();

    let controversial = swap.controversial_subjects(2);
    assert_eq!(controversial, vec![SubjectId::from("split"), SubjectId::from("lean")]);
    assert_eq!(swap.consensus_subjects(1), vec![SubjectId::from("sure")]);
    assert_eq!(swap.controversial_subjects(10).len(), 3);
}

#[test]
fn stats_count_agents() {
    let mut swap = swap();
    swap.process_one(&cl("u", "s1", Label::Real)).unwrap();
    swap.process_one(&cl("v", "s2", Label::Real)).unwrap();

    let stats = swap.stats();
    assert_eq!((stats.subjects, stats.users, stats.classifications), (2, 2, 2));
    assert_eq!(stats.subject_scores.unwrap().count, 2);
    assert!(swap.users().iter().all(|user| !user.is_stale()));
}
