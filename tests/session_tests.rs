mod common;

use std::cell::RefCell;
use std::rc::Rc;

use wandersync::api::AuthResponse;
use wandersync::db::LocalStorage;
use wandersync::error::PlannerError;
use wandersync::model::*;
use wandersync::session::{SessionStore, SESSION_KEY};

use common::{user, FakeApi, Failure};

fn store() -> SessionStore {
    SessionStore::new(LocalStorage::in_memory().unwrap(), true)
}

fn accepting_api(name: &str) -> FakeApi {
    let api = FakeApi::new();
    *api.auth.borrow_mut() = AuthResponse {
        success: true,
        user: Some(user(name)),
        error: None,
    };
    api
}

fn stored(store_storage: &LocalStorage) -> Option<Session> {
    store_storage
        .get_item(SESSION_KEY)
        .unwrap()
        .map(|raw| serde_json::from_str(&raw).unwrap())
}

// ==========================================================================
// SIGN IN
// ==========================================================================

#[test]
fn sign_in_stores_session_in_memory_and_storage() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.db");
    let api = accepting_api("Dana");

    let mut sessions = SessionStore::new(LocalStorage::open(&path).unwrap(), true);
    let session = sessions.sign_in(&api, Some("google-credential")).unwrap().clone();

    assert_eq!(session.user, user("Dana"));
    assert_eq!(session.token.as_deref(), Some("google-credential"));
    assert_eq!(sessions.current(), Some(&session));
    assert_eq!(api.calls(), vec!["verify_google_token google-credential"]);

    drop(sessions);
    assert_eq!(stored(&LocalStorage::open(&path).unwrap()), Some(session));
}

#[test]
fn sign_in_notifies_subscribers() {
    let api = accepting_api("Dana");
    let mut sessions = store();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    sessions.subscribe(move |s| sink.borrow_mut().push(s.map(|s| s.user.name.clone())));

    sessions.sign_in(&api, Some("cred")).unwrap();

    assert_eq!(*seen.borrow(), vec![Some("Dana".to_string())]);
}

#[test]
fn missing_credential_fails_without_request() {
    let api = accepting_api("Dana");
    let mut sessions = store();
    assert!(matches!(sessions.sign_in(&api, None), Err(PlannerError::AuthFailed(_))));
    assert!(matches!(sessions.sign_in(&api, Some("  ")), Err(PlannerError::AuthFailed(_))));
    assert!(api.calls().is_empty());
    assert!(sessions.current().is_none());
}

#[test]
fn unsuccessful_response_surfaces_server_error() {
    let api = FakeApi::new();
    *api.auth.borrow_mut() = AuthResponse {
        success: false,
        user: None,
        error: Some("Invalid token".into()),
    };
    let mut sessions = store();

    match sessions.sign_in(&api, Some("cred")) {
        Err(PlannerError::AuthFailed(msg)) => assert_eq!(msg, "Invalid token"),
        other => panic!("expected AuthFailed, got {:?}", other.map(|s| s.clone())),
    }
}

#[test]
fn failed_sign_in_keeps_existing_session() {
    let mut sessions = store();
    sessions.sign_in(&accepting_api("Dana"), Some("first")).unwrap();

    let failing = FakeApi::new();
    failing.fail("verify_google_token", Failure::Transport);
    let err = sessions.sign_in(&failing, Some("second")).unwrap_err();
    assert!(matches!(err, PlannerError::AuthFailed(_)));

    let current = sessions.current().unwrap();
    assert_eq!(current.user.name, "Dana");
    assert_eq!(current.token.as_deref(), Some("first"));
}

#[test]
fn server_failure_becomes_auth_failure() {
    let api = FakeApi::new();
    api.fail("verify_google_token", Failure::Server(401));
    let mut sessions = store();
    let err = sessions.sign_in(&api, Some("cred")).unwrap_err();
    assert!(matches!(err, PlannerError::AuthFailed(_)));
}

#[test]
fn success_without_user_is_a_failure() {
    let api = FakeApi::new();
    *api.auth.borrow_mut() = AuthResponse {
        success: true,
        user: None,
        error: None,
    };
    let mut sessions = store();
    assert!(sessions.sign_in(&api, Some("cred")).is_err());
    assert!(sessions.current().is_none());
}

#[test]
fn login_disabled_without_client_id() {
    let api = accepting_api("Dana");
    let mut sessions = SessionStore::new(LocalStorage::in_memory().unwrap(), false);
    assert!(!sessions.login_enabled());
    assert!(matches!(sessions.sign_in(&api, Some("cred")), Err(PlannerError::LoginDisabled)));
    assert!(api.calls().is_empty());
}

// ==========================================================================
// RESTORE / SIGN OUT
// ==========================================================================

#[test]
fn restore_adopts_stored_session_without_verifying() {
    let storage = LocalStorage::in_memory().unwrap();
    let session = Session::new(user("Eli"), Some("tok".into()));
    storage
        .set_item(SESSION_KEY, &serde_json::to_string(&session).unwrap())
        .unwrap();

    let mut sessions = SessionStore::new(storage, true);
    let seen = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&seen);
    sessions.subscribe(move |_| *sink.borrow_mut() += 1);

    let restored = sessions.restore().unwrap().cloned();
    assert_eq!(restored, Some(session));
    assert_eq!(*seen.borrow(), 1);
}

#[test]
fn restore_accepts_plain_user_record() {
    let storage = LocalStorage::in_memory().unwrap();
    storage
        .set_item(
            SESSION_KEY,
            r#"{"name":"Eli","email":"eli@example.com","google_id":"g-eli"}"#,
        )
        .unwrap();

    let mut sessions = SessionStore::new(storage, true);
    let restored = sessions.restore().unwrap().cloned().unwrap();
    assert_eq!(restored.user, user("Eli"));
    assert_eq!(restored.token, None);
}

#[test]
fn restore_discards_corrupted_payload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.db");
    LocalStorage::open(&path)
        .unwrap()
        .set_item(SESSION_KEY, "{not json")
        .unwrap();

    let mut sessions = SessionStore::new(LocalStorage::open(&path).unwrap(), true);
    assert!(sessions.restore().unwrap().is_none());
    assert!(sessions.current().is_none());
    drop(sessions);

    assert_eq!(LocalStorage::open(&path).unwrap().get_item(SESSION_KEY).unwrap(), None);
}

#[test]
fn restore_with_nothing_stored_is_signed_out() {
    let mut sessions = store();
    assert!(sessions.restore().unwrap().is_none());
}

#[test]
fn sign_out_clears_memory_and_storage() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.db");
    let mut sessions = SessionStore::new(LocalStorage::open(&path).unwrap(), true);
    sessions.sign_in(&accepting_api("Dana"), Some("cred")).unwrap();

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    sessions.subscribe(move |s| sink.borrow_mut().push(s.is_some()));

    sessions.sign_out().unwrap();
    assert!(sessions.current().is_none());
    assert_eq!(*seen.borrow(), vec![false]);
    drop(sessions);

    let mut reopened = SessionStore::new(LocalStorage::open(&path).unwrap(), true);
    assert!(reopened.restore().unwrap().is_none());
}

#[test]
fn unsubscribe_stops_notifications() {
    let mut sessions = store();
    let seen = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&seen);
    let id = sessions.subscribe(move |_| *sink.borrow_mut() += 1);
    assert!(sessions.unsubscribe(id));
    assert!(!sessions.unsubscribe(id));

    sessions.sign_in(&accepting_api("Dana"), Some("cred")).unwrap();
    assert_eq!(*seen.borrow(), 0);
}
