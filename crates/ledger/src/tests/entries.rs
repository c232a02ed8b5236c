// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    ActivityKind, ActivitySource, LedgerEntry, LedgerError, LedgerTotals, PointsActivity,
    short_order_ref,
};
use time::macros::datetime;

fn create_test_activity(id: &str, kind: ActivityKind, amount: u64) -> PointsActivity {
    let entry: LedgerEntry = match kind {
        ActivityKind::Earned => LedgerEntry::earned(amount, ActivitySource::Order, "earned"),
        ActivityKind::Redeemed => LedgerEntry::redeemed(amount, ActivitySource::Order, "spent"),
    }
    .unwrap();
    entry.into_activity(id, datetime!(2026-03-14 10:00 UTC))
}

#[test]
fn test_zero_amount_rejected() {
    let result = LedgerEntry::earned(0, ActivitySource::BillUpload, "nothing");
    assert_eq!(
        result,
        Err(LedgerError::ZeroAmount {
            source: ActivitySource::BillUpload
        })
    );
}

#[test]
fn test_entry_carries_back_references() {
    let entry: LedgerEntry = LedgerEntry::earned(25, ActivitySource::DailyChallenge, "Daily login completed")
        .unwrap()
        .with_challenge("daily_login")
        .with_order("order-1");

    let activity: PointsActivity = entry.into_activity("act-1", datetime!(2026-03-14 10:00 UTC));
    assert_eq!(activity.id(), "act-1");
    assert_eq!(activity.kind(), ActivityKind::Earned);
    assert_eq!(activity.amount(), 25);
    assert_eq!(activity.challenge_id(), Some("daily_login"));
    assert_eq!(activity.order_id(), Some("order-1"));
    assert_eq!(activity.achievement_id(), None);
}

#[test]
fn test_activity_serializes_type_field() {
    let activity: PointsActivity = LedgerEntry::redeemed(50, ActivitySource::Order, "Points used for order 123456")
        .unwrap()
        .with_order("demo_order_123456")
        .into_activity("act-2", datetime!(2026-03-14 10:00 UTC));

    let value: serde_json::Value = serde_json::to_value(&activity).unwrap();
    assert_eq!(value["type"], "redeemed");
    assert_eq!(value["source"], "order");
    assert_eq!(value["orderId"], "demo_order_123456");
    assert_eq!(value["date"], "2026-03-14T10:00:00Z");
    assert!(value.get("challengeId").is_none());

    let parsed: PointsActivity = serde_json::from_value(value).unwrap();
    assert_eq!(parsed, activity);
}

#[test]
fn test_sources_serialize_snake_case() {
    let json: String = serde_json::to_string(&ActivitySource::WeeklyChallenge).unwrap();
    assert_eq!(json, "\"weekly_challenge\"");
    assert_eq!(ActivitySource::FirstPurchase.as_str(), "first_purchase");
}

#[test]
fn test_totals_split_by_kind() {
    let activities: Vec<PointsActivity> = vec![
        create_test_activity("a", ActivityKind::Earned, 150),
        create_test_activity("b", ActivityKind::Redeemed, 40),
        create_test_activity("c", ActivityKind::Earned, 25),
    ];
    let totals: LedgerTotals = LedgerTotals::from_activities(&activities);

    assert_eq!(totals.earned, 175);
    assert_eq!(totals.redeemed, 40);
    assert_eq!(totals.net(), 135);
}

#[test]
fn test_short_order_ref_takes_last_six() {
    assert_eq!(short_order_ref("demo_order_1700000123456"), "123456");
    assert_eq!(short_order_ref("abc"), "abc");
    assert_eq!(short_order_ref(""), "");
}
