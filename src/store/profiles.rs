// Copyright (c) 2025 Spendbook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;

use chrono::Utc;
use rusqlite::{Connection, params};
use tracing::info;

use crate::error::{Error, Result};
use crate::store::{is_foreign_key_violation, is_unique_violation};

/// Create a profile under an account. `(account_id, name)` is unique per the
/// storage constraint, so the duplicate check and the insert are one logical
/// operation and two racing creates cannot both succeed.
pub fn create(conn: &Connection, account_id: i64, name: &str) -> Result<i64> {
    if name.is_empty() {
        return Err(Error::Validation("Profile name must not be empty".into()));
    }
    let res = conn.execute(
        "INSERT INTO profiles(account_id, name, created_at) VALUES (?1, ?2, ?3)",
        params![account_id, name, Utc::now()],
    );
    match res {
        Ok(_) => {
            let id = conn.last_insert_rowid();
            info!("Created profile {} ('{}') under account {}", id, name, account_id);
            Ok(id)
        }
        Err(e) if is_unique_violation(&e) => Err(Error::Duplicate(format!(
            "Profile '{}' already exists under account {}",
            name, account_id
        ))),
        Err(e) if is_foreign_key_violation(&e) => {
            Err(Error::NotFound(format!("Account {}", account_id)))
        }
        Err(e) => Err(e.into()),
    }
}

/// Profile id to name for one account. Keys are unique; order is irrelevant.
pub fn list_by_account(conn: &Connection, account_id: i64) -> Result<HashMap<i64, String>> {
    let mut stmt = conn.prepare("SELECT id, name FROM profiles WHERE account_id=?1")?;
    let rows = stmt.query_map(params![account_id], |r| {
        Ok((r.get::<_, i64>(0)?, r.get::<_, String>(1)?))
    })?;
    let mut profiles = HashMap::new();
    for row in rows {
        let (id, name) = row?;
        profiles.insert(id, name);
    }
    Ok(profiles)
}
