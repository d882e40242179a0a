use swap_agents::{Agent, AgentRecord, Subject, User};
use swap_core::config::Priors;
use swap_core::errors::AgentError;
use swap_core::models::{AgentKind, Classification, Label, SubjectId, UserId, UserScore};
use swap_core::SwapError;

#[test]
fn subject_classify_checks_routing() {
    let mut subject = Subject::spawn(SubjectId::from("s1"), &Priors::default());
    let wrong = Classification::new("u1", "s2", Label::Real);

    let err = subject.classify(&wrong, 0, UserScore::uniform(0.5)).unwrap_err();
    assert!(matches!(
        err,
        SwapError::Agent(AgentError::SubjectMismatch { .. })
    ));
    assert_eq!(subject.n_classifications(), 0);
}

#[test]
fn user_classify_checks_routing() {
    let mut user = User::spawn(UserId::from("u1"), &Priors::default());
    let wrong = Classification::new("u2", "s1", Label::Real);

    let err = user.classify(&wrong, 0, None).unwrap_err();
    assert!(matches!(err, SwapError::Agent(AgentError::UserMismatch { .. })));
}

#[test]
fn subject_scores_with_skilled_user() {
    let mut subject = Subject::spawn(SubjectId::from("s2"), &Priors::default());
    let cl = Classification::new("u1", "s2", Label::Real);

    subject.classify(&cl, 1, UserScore::new(0.5, 2.0 / 3.0)).unwrap();
    assert!((subject.score() - 0.08 / 0.52).abs() < 1e-9);
}

#[test]
fn tally_counts_annotations() {
    let mut subject = Subject::spawn(SubjectId::from("s1"), &Priors::default());
    for (user, annotation) in [("a", Label::Real), ("b", Label::Real), ("c", Label::Bogus)] {
        let cl = Classification::new(user, "s1", annotation);
        subject.classify(&cl, 0, UserScore::uniform(0.5)).unwrap();
    }
    let tally = subject.tally();
    assert_eq!((tally.real, tally.bogus), (2, 1));
}

#[test]
fn user_score_follows_gold_agreement() {
    let mut user = User::spawn(UserId::from("u1"), &Priors::default());
    user.classify(&Classification::new("u1", "s1", Label::Real), 0, Some(Label::Real))
        .unwrap();
    user.classify(&Classification::new("u1", "s2", Label::Bogus), 0, Some(Label::Real))
        .unwrap();
    user.classify(&Classification::new("u1", "s3", Label::Bogus), 0, None)
        .unwrap();

    let score = user.score();
    assert_eq!(score.bogus, 0.5);
    assert_eq!(score.real, 0.5);
    assert_eq!(user.n_classifications(), 3);
    assert_eq!(user.ledger().n_resolved(), 2);
}

#[test]
fn record_knows_its_kind() {
    let subject = Subject::spawn(SubjectId::from("s1"), &Priors::default());
    let record = subject.into_record();
    assert_eq!(record.kind(), AgentKind::Subject);
    assert_eq!(record.id(), "s1");
    assert!(User::from_record(record).is_err());
}

#[test]
fn record_survives_json() {
    let mut user = User::spawn(UserId::from("u7"), &Priors::default());
    user.classify(&Classification::new("u7", "s1", Label::Real), 0, Some(Label::Real))
        .unwrap();
    let before = user.score();

    let json = serde_json::to_value(AgentRecord::from(user)).unwrap();
    assert_eq!(json["kind"], "user");

    let record: AgentRecord = serde_json::from_value(json).unwrap();
    let mut restored = User::from_record(record).unwrap();
    assert_eq!(restored.score(), before);
    assert_eq!(restored.n_classifications(), 1);
}
