use proptest::prelude::*;
use swap_control::export::{Score, ScoreExport};
use swap_control::Swap;
use swap_core::config::{ExportConfig, SwapConfig};
use swap_core::models::{Classification, Label, SubjectId};

fn arb_label() -> impl Strategy<Value = Label> {
    prop_oneof![Just(Label::Bogus), Just(Label::Real)]
}

fn arb_scores() -> impl Strategy<Value = Vec<Score>> {
    prop::collection::vec((prop::option::of(arb_label()), 0.0f64..=1.0), 0..50).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (gold, p))| Score::new(SubjectId::from(i as u64), gold, p))
            .collect()
    })
}

fn arb_classifications() -> impl Strategy<Value = Vec<Classification>> {
    prop::collection::vec((0u64..5, 0u64..12, arb_label()), 1..80).prop_map(|rows| {
        rows.into_iter()
            .map(|(user, subject, annotation)| {
                Classification::new(format!("u{user}"), SubjectId::from(subject), annotation)
            })
            .collect()
    })
}

fn arb_golds() -> impl Strategy<Value = Vec<(SubjectId, Label)>> {
    prop::collection::btree_map(0u64..12, arb_label(), 0..6)
        .prop_map(|golds| golds.into_iter().map(|(id, gold)| (SubjectId::from(id), gold)).collect())
}

proptest! {
    #[test]
    fn counts_shrink_as_threshold_rises(scores in arb_scores(), a in 0.0f64..=1.0, b in 0.0f64..=1.0) {
        let export = ScoreExport::new(scores, &ExportConfig::default());
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let below = export.counts(low);
        let above = export.counts(high);
        prop_assert!(above.unknown <= below.unknown);
        prop_assert!(above.bogus <= below.bogus);
        prop_assert!(above.real <= below.real);
    }

    #[test]
    fn roc_is_sorted_and_gold_only(scores in arb_scores()) {
        let export = ScoreExport::new(scores, &ExportConfig::default());
        let roc = export.roc();
        prop_assert_eq!(roc.len(), export.class_counts().gold());
        for pair in roc.windows(2) {
            prop_assert!(pair[0].1 <= pair[1].1);
        }
    }

    #[test]
    fn purity_threshold_is_a_score_or_one(scores in arb_scores(), target in 0.0f64..1.0) {
        let export = ScoreExport::new(scores, &ExportConfig::default());
        let threshold = export.find_purity(target);
        prop_assert!(threshold == 1.0 || export.sorted_scores().any(|s| s.p == threshold));
    }

    #[test]
    fn gold_timing_does_not_change_scores(
        classifications in arb_classifications(),
        golds in arb_golds(),
        back_update in any::<bool>(),
        gold_updates in any::<bool>(),
    ) {
        let config = SwapConfig { back_update, gold_updates, ..SwapConfig::default() };

        let mut upfront = Swap::new(config.clone()).unwrap();
        upfront.set_gold_labels(golds.clone(), false).unwrap();
        upfront.run(classifications.clone()).unwrap();

        let mut late = Swap::new(config).unwrap();
        late.run(classifications).unwrap();
        late.set_gold_labels(golds, false).unwrap();

        let expected = upfront.score_export().unwrap().to_map();
        let actual = late.score_export().unwrap().to_map();
        prop_assert_eq!(expected.len(), actual.len());
        for ((id, (gold_a, p_a)), (_, (gold_b, p_b))) in expected.iter().zip(&actual) {
            prop_assert_eq!(gold_a, gold_b);
            prop_assert!((p_a - p_b).abs() < 1e-12, "{}: {} vs {}", id, p_a, p_b);
        }
    }
}
