use proptest::prelude::*;
use swap_agents::ledger::Ledger;
use swap_agents::subject::{SubjectLedger, SubjectTransaction};
use swap_agents::user::{UserLedger, UserTransaction};
use swap_core::config::{Priors, SkillMode};
use swap_core::models::{Label, SubjectId, UserId, UserScore};

fn arb_label() -> impl Strategy<Value = Label> {
    prop_oneof![Just(Label::Bogus), Just(Label::Real)]
}

fn arb_skill() -> impl Strategy<Value = UserScore> {
    (0.05f64..0.95, 0.05f64..0.95).prop_map(|(bogus, real)| UserScore::new(bogus, real))
}

fn subject_ledger(entries: &[(Label, UserScore)]) -> SubjectLedger {
    let mut ledger = SubjectLedger::new(SubjectId::from("s"), 0.12);
    for (i, (annotation, skill)) in entries.iter().enumerate() {
        ledger.add(SubjectTransaction::new(UserId::from(i as u64), 0, *annotation, *skill));
    }
    ledger
}

proptest! {
    #[test]
    fn incremental_subject_score_matches_full_recompute(
        entries in prop::collection::vec((arb_label(), arb_skill()), 1..40),
        updates in prop::collection::vec((any::<prop::sample::Index>(), arb_skill()), 0..10),
    ) {
        let mut incremental = SubjectLedger::new(SubjectId::from("s"), 0.12);
        for (i, (annotation, skill)) in entries.iter().enumerate() {
            incremental.add(SubjectTransaction::new(UserId::from(i as u64), 0, *annotation, *skill));
            incremental.recalculate();
        }

        let mut final_entries = entries.clone();
        for (index, skill) in &updates {
            let order = index.index(entries.len());
            incremental.notify(order, *skill).unwrap();
            incremental.recalculate();
            final_entries[order].1 = *skill;
        }

        let mut full = subject_ledger(&final_entries);
        let expected = full.history();
        let actual = incremental.history();
        prop_assert_eq!(expected.len(), actual.len());
        for (a, b) in expected.iter().zip(&actual) {
            prop_assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn subject_scores_stay_in_unit_interval(
        entries in prop::collection::vec((arb_label(), arb_skill()), 0..60),
    ) {
        let mut ledger = subject_ledger(&entries);
        for score in ledger.history() {
            prop_assert!((0.0..=1.0).contains(&score));
        }
    }

    #[test]
    fn recalculate_is_idempotent(
        entries in prop::collection::vec((arb_label(), arb_skill()), 0..30),
    ) {
        let mut ledger = subject_ledger(&entries);
        let first = ledger.recalculate();
        let metrics = ledger.metrics();
        prop_assert_eq!(ledger.recalculate(), first);
        prop_assert_eq!(ledger.metrics(), metrics);
        prop_assert!(!ledger.is_stale());
    }

    #[test]
    fn late_gold_matches_gold_known_upfront(
        entries in prop::collection::vec((arb_label(), arb_label()), 1..40),
        resolved in prop::collection::vec(any::<bool>(), 40),
    ) {
        let priors = Priors { mode: SkillMode::Dynamic, ..Priors::default() };

        let mut upfront = UserLedger::new(UserId::from("u"), &priors);
        let mut late = UserLedger::new(UserId::from("u"), &priors);
        for (i, (annotation, gold)) in entries.iter().enumerate() {
            let subject = SubjectId::from(i as u64);
            let known = resolved[i].then_some(*gold);
            upfront.add(UserTransaction::new(subject.clone(), 0, *annotation, known));
            late.add(UserTransaction::new(subject, 0, *annotation, None));
            late.recalculate();
        }
        for (i, (_, gold)) in entries.iter().enumerate().rev() {
            if resolved[i] {
                late.resolve_gold(i, &SubjectId::from(i as u64), *gold).unwrap();
            }
        }

        prop_assert_eq!(upfront.recalculate(), late.recalculate());
        for order in 0..entries.len() {
            prop_assert_eq!(upfront.get(order).unwrap().counts(), late.get(order).unwrap().counts());
        }
    }
}
