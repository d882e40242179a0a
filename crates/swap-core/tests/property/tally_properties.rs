use proptest::prelude::*;
use swap_core::models::{ControversyVersion, Label, VoteTally};

fn arb_version() -> impl Strategy<Value = ControversyVersion> {
    prop_oneof![Just(ControversyVersion::Pow), Just(ControversyVersion::Multiply)]
}

proptest! {
    #[test]
    fn measures_ignore_which_side_holds_the_majority(
        a in 0u64..200,
        b in 0u64..200,
        version in arb_version(),
    ) {
        let t1 = VoteTally { real: a, bogus: b };
        let t2 = VoteTally { real: b, bogus: a };
        prop_assert_eq!(t1.controversy(version), t2.controversy(version));
        prop_assert_eq!(t1.consensus(version), t2.consensus(version));
    }

    #[test]
    fn measures_exist_iff_there_are_votes(
        a in 0u64..50,
        b in 0u64..50,
        version in arb_version(),
    ) {
        let tally = VoteTally { real: a, bogus: b };
        prop_assert_eq!(tally.controversy(version).is_some(), a + b > 0);
        prop_assert_eq!(tally.consensus(version).is_some(), a + b > 0);
    }

    #[test]
    fn tally_counts_every_vote(votes in prop::collection::vec(any::<bool>(), 0..100)) {
        let mut tally = VoteTally::default();
        for &v in &votes {
            tally.add(if v { Label::Real } else { Label::Bogus });
        }
        prop_assert_eq!(tally.total(), votes.len() as u64);
        prop_assert_eq!(tally.real, votes.iter().filter(|v| **v).count() as u64);
    }
}
