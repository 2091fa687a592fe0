// Copyright (c) 2025 Spendbook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Login and registration on top of the account store.
//!
//! A login attempt resolves to an account id, fails with `WrongCredentials`
//! for a bad password, or fails with `NotFound` when the username does not
//! exist. The two failures are deliberately distinct: `NotFound` is the
//! caller's cue to offer registration, and must never be the answer to a
//! mistyped password.

use rusqlite::Connection;
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::hasher;
use crate::store::accounts;

/// Verify a username/password pair against the store.
///
/// No format validation is applied beyond non-empty; any non-empty strings
/// are acceptable credentials.
pub fn authenticate(conn: &Connection, username: &str, password: &str) -> Result<i64> {
    let Some(account_id) = accounts::find_by_username(conn, username)? else {
        info!("Authentication: username '{}' not found", username);
        return Err(Error::NotFound(format!("Account '{}'", username)));
    };
    let stored = accounts::get_password_digest(conn, account_id)?;
    if hasher::verify(password, &stored) {
        info!("Authentication successful for '{}'", username);
        Ok(account_id)
    } else {
        warn!("Authentication failed: wrong password for '{}'", username);
        Err(Error::WrongCredentials)
    }
}

/// Create the account. Callers confirm intent first, typically after
/// `authenticate` came back with `NotFound`.
pub fn register(conn: &Connection, username: &str, password: &str) -> Result<i64> {
    let account_id = accounts::create(conn, username, password)?;
    info!("Registered account '{}' with id {}", username, account_id);
    Ok(account_id)
}
