// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row access for the local store.
//!
//! A user's cart, orders, bills, and activity live together in one JSON
//! document so that a write is a single row replacement.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use swadesi_domain::{BillRecord, Cart, Order, User};
use swadesi_ledger::PointsActivity;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use super::schema::{local_records, local_users};
use crate::error::PersistenceError;

/// The stored document. Lists are most recent first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataRecord {
    #[serde(default)]
    pub cart: Cart,
    #[serde(default)]
    pub orders: Vec<Order>,
    #[serde(default)]
    pub bills: Vec<BillRecord>,
    #[serde(default)]
    pub points_activity: Vec<PointsActivity>,
}

#[derive(Insertable)]
#[diesel(table_name = local_records)]
struct RecordRow<'a> {
    namespace: &'a str,
    user_id: &'a str,
    record_json: &'a str,
    updated_at: &'a str,
}

#[derive(Insertable)]
#[diesel(table_name = local_users)]
struct UserRow<'a> {
    namespace: &'a str,
    user_id: &'a str,
    profile_json: &'a str,
    updated_at: &'a str,
}

fn timestamp() -> Result<String, PersistenceError> {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_err(|e| PersistenceError::Serialization(e.to_string()))
}

/// Loads the document for a user, or an empty one if none is stored.
pub fn load_record(
    conn: &mut SqliteConnection,
    namespace: &str,
    user_id: &str,
) -> Result<DataRecord, PersistenceError> {
    let json: Option<String> = local_records::table
        .filter(local_records::namespace.eq(namespace))
        .filter(local_records::user_id.eq(user_id))
        .select(local_records::record_json)
        .first::<String>(conn)
        .optional()?;

    match json {
        Some(json) => Ok(serde_json::from_str(&json)?),
        None => Ok(DataRecord::default()),
    }
}

pub fn store_record(
    conn: &mut SqliteConnection,
    namespace: &str,
    user_id: &str,
    record: &DataRecord,
) -> Result<(), PersistenceError> {
    let record_json: String = serde_json::to_string(record)?;
    let updated_at: String = timestamp()?;
    diesel::replace_into(local_records::table)
        .values(&RecordRow {
            namespace,
            user_id,
            record_json: &record_json,
            updated_at: &updated_at,
        })
        .execute(conn)?;
    Ok(())
}

/// Applies `change` to a user's document inside one transaction.
pub fn modify_record<T, F>(
    conn: &mut SqliteConnection,
    namespace: &str,
    user_id: &str,
    change: F,
) -> Result<T, PersistenceError>
where
    F: FnOnce(&mut DataRecord) -> Result<T, PersistenceError>,
{
    conn.transaction(|conn| {
        let mut record: DataRecord = load_record(conn, namespace, user_id)?;
        let outcome: T = change(&mut record)?;
        store_record(conn, namespace, user_id, &record)?;
        Ok(outcome)
    })
}

pub fn load_user(
    conn: &mut SqliteConnection,
    namespace: &str,
    user_id: &str,
) -> Result<Option<User>, PersistenceError> {
    let json: Option<String> = local_users::table
        .filter(local_users::namespace.eq(namespace))
        .filter(local_users::user_id.eq(user_id))
        .select(local_users::profile_json)
        .first::<String>(conn)
        .optional()?;

    json.map(|json| serde_json::from_str(&json).map_err(PersistenceError::from))
        .transpose()
}

pub fn store_user(
    conn: &mut SqliteConnection,
    namespace: &str,
    user: &User,
) -> Result<(), PersistenceError> {
    let profile_json: String = serde_json::to_string(user)?;
    let updated_at: String = timestamp()?;
    diesel::replace_into(local_users::table)
        .values(&UserRow {
            namespace,
            user_id: user.id(),
            profile_json: &profile_json,
            updated_at: &updated_at,
        })
        .execute(conn)?;
    Ok(())
}
