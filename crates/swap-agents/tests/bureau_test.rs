use swap_agents::{Agent, AgentRecord, Bureau, Subject, User};
use swap_core::config::Priors;
use swap_core::errors::AgentError;
use swap_core::models::{AgentKind, Classification, Label, SubjectId, UserId, UserScore};
use swap_core::SwapError;

fn subjects() -> Bureau<Subject> {
    Bureau::new(Priors::default())
}

#[test]
fn get_or_create_returns_the_same_agent() {
    let mut bureau = subjects();
    let id = SubjectId::from("s1");
    bureau.get_or_create(&id);
    bureau.get_or_create(&id);

    assert_eq!(bureau.len(), 1);
    assert!(bureau.has(&id));
    assert!(std::ptr::eq(bureau.get(&id).unwrap(), bureau.get(&id).unwrap()));
}

#[test]
fn spawned_agents_use_bureau_priors() {
    let priors = Priors {
        p0: 0.3,
        ..Priors::default()
    };
    let mut bureau: Bureau<Subject> = Bureau::new(priors);
    assert_eq!(bureau.get_or_create(&SubjectId::from("s1")).score(), 0.3);
}

#[test]
fn missing_agent_is_a_missing_reference() {
    let bureau = subjects();
    let err = bureau.get(&SubjectId::from("nope")).unwrap_err();
    assert_eq!(
        err,
        SwapError::Agent(AgentError::MissingReference {
            kind: AgentKind::Subject,
            id: "nope".into(),
        })
    );
}

#[test]
fn add_rejects_duplicate_ids() {
    let mut bureau = subjects();
    let priors = Priors::default();
    bureau.add(Subject::spawn(SubjectId::from("s1"), &priors)).unwrap();

    let err = bureau
        .add(Subject::spawn(SubjectId::from("s1"), &priors))
        .unwrap_err();
    assert!(matches!(
        err,
        SwapError::Agent(AgentError::AlreadyRegistered { kind: AgentKind::Subject, .. })
    ));
}

#[test]
fn adopt_rejects_wrong_kind() {
    let mut bureau = subjects();
    let user = User::spawn(UserId::from("u1"), &Priors::default());

    let err = bureau.adopt(AgentRecord::from(user)).unwrap_err();
    assert_eq!(
        err,
        SwapError::Agent(AgentError::KindMismatch {
            expected: AgentKind::Subject,
            found: AgentKind::User,
        })
    );
    assert!(bureau.is_empty());
}

#[test]
fn remove_then_adopt_restores_state() {
    let mut bureau = subjects();
    let id = SubjectId::from("s1");
    let cl = Classification::new("u1", "s1", Label::Real);
    bureau
        .get_or_create(&id)
        .classify(&cl, 0, UserScore::new(0.6, 0.9))
        .unwrap();
    let score = bureau.get_mut(&id).unwrap().score();

    let evicted = bureau.remove(&id).unwrap();
    assert!(!bureau.has(&id));
    assert!(bureau.remove(&id).is_none());

    bureau.adopt(evicted.into_record()).unwrap();
    assert_eq!(bureau.get_mut(&id).unwrap().score(), score);
}

#[test]
fn process_changes_recomputes_only_stale_agents() {
    let mut bureau = subjects();
    for id in ["a", "b", "c"] {
        let cl = Classification::new("u1", id, Label::Real);
        bureau
            .get_or_create(&SubjectId::from(id))
            .classify(&cl, 0, UserScore::new(0.6, 0.9))
            .unwrap();
    }
    assert_eq!(bureau.process_changes(), 3);
    assert_eq!(bureau.process_changes(), 0);
    assert!(bureau.iter().all(|subject| !subject.is_stale()));
}

#[test]
fn ids_are_sorted() {
    let mut bureau: Bureau<User> = Bureau::new(Priors::default());
    for id in ["zed", "amy", "kim"] {
        bureau.get_or_create(&UserId::from(id));
    }
    let ids: Vec<String> = bureau.ids().into_iter().map(|id| id.to_string()).collect();
    assert_eq!(ids, ["amy", "kim", "zed"]);
}

#[test]
fn subject_stats_summarize_scores() {
    let mut bureau = subjects();
    assert!(bureau.stats().is_none());

    bureau.get_or_create(&SubjectId::from("a"));
    bureau.get_or_create(&SubjectId::from("b"));
    let stats = bureau.stats().unwrap();
    assert_eq!(stats.count, 2);
    assert!((stats.mean - 0.12).abs() < 1e-12);
    assert!(stats.stdev.abs() < 1e-12);
}
