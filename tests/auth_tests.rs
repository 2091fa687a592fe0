// Copyright (c) 2025 Spendbook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::Connection;
use spendbook::error::Error;
use spendbook::{auth, db, store::accounts};
use tracing_subscriber::EnvFilter;

fn setup() -> Connection {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
    db::open_in_memory().unwrap()
}

#[test]
fn register_then_authenticate() {
    let conn = setup();
    let id = auth::register(&conn, "alice", "hunter2hunter2").unwrap();
    let authed = auth::authenticate(&conn, "alice", "hunter2hunter2").unwrap();
    assert_eq!(id, authed);
}

#[test]
fn unknown_user_is_not_found_never_wrong_credentials() {
    let conn = setup();
    auth::register(&conn, "alice", "pw-alice").unwrap();
    let err = auth::authenticate(&conn, "bob", "x").unwrap_err();
    assert!(matches!(err, Error::NotFound(_)), "got {:?}", err);
}

#[test]
fn wrong_password_is_wrong_credentials() {
    let conn = setup();
    auth::register(&conn, "alice", "right-password").unwrap();
    let err = auth::authenticate(&conn, "alice", "wrong-password").unwrap_err();
    assert!(matches!(err, Error::WrongCredentials), "got {:?}", err);
}

#[test]
fn duplicate_username_rejected_and_count_unchanged() {
    let conn = setup();
    auth::register(&conn, "alice", "first-password").unwrap();
    let err = auth::register(&conn, "alice", "second-password").unwrap_err();
    assert!(matches!(err, Error::Duplicate(_)), "got {:?}", err);
    assert_eq!(accounts::list_all(&conn).unwrap().len(), 1);
}

#[test]
fn empty_credentials_rejected() {
    let conn = setup();
    let err = auth::register(&conn, "", "pw").unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    let err = auth::register(&conn, "user", "").unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

#[test]
fn stored_digest_is_salted_and_opaque() {
    let conn = setup();
    let alice = auth::register(&conn, "alice", "shared-password").unwrap();
    let bob = auth::register(&conn, "bob", "shared-password").unwrap();
    let alice_digest = accounts::get_password_digest(&conn, alice).unwrap();
    let bob_digest = accounts::get_password_digest(&conn, bob).unwrap();
    // same password, different salts, different stored values
    assert_ne!(alice_digest, bob_digest);
    assert!(!alice_digest.contains("shared-password"));
}

#[test]
fn digest_lookup_for_missing_account_is_not_found() {
    let conn = setup();
    let err = accounts::get_password_digest(&conn, 4242).unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[test]
fn list_all_reports_usernames_in_insertion_order() {
    let conn = setup();
    auth::register(&conn, "alice", "pw1").unwrap();
    auth::register(&conn, "bob", "pw2").unwrap();
    let all = accounts::list_all(&conn).unwrap();
    let names: Vec<&str> = all.iter().map(|a| a.username.as_str()).collect();
    assert_eq!(names, ["alice", "bob"]);
}
