// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::config::{PricingConfig, RewardsConfig};
use crate::error::CoreError;
use crate::placement::authorize_redemption;
use crate::state::{BillVerification, PointsTransition};
use swadesi_domain::{BillRecord, Money, Tier, User};
use swadesi_ledger::{ActivitySource, LedgerEntry};
use time::{Date, OffsetDateTime};

/// Points for a bill of `amount` at `tier`, floored.
#[must_use]
pub fn bill_points(amount: Money, tier: Tier, config: &PricingConfig) -> u64 {
    let scaled: u128 = u128::from(amount.paise())
        * u128::from(config.bill_points_per_mille)
        * u128::from(tier.multiplier().per_mille())
        / 100_000_000;
    u64::try_from(scaled).unwrap_or(u64::MAX)
}

/// Builds an unverified bill with its points fixed at upload time.
#[must_use]
pub fn prepare_bill(
    user: &User,
    vendor_name: &str,
    amount: Money,
    now: OffsetDateTime,
    config: &PricingConfig,
) -> BillRecord {
    let points: u64 = bill_points(amount, user.points_tier(), config);
    BillRecord::new(vendor_name, amount, points, now)
}

/// Marks a bill verified and credits its points.
///
/// Returns `None` if the bill was already verified.
///
/// # Errors
///
/// Returns a ledger error only if entry construction fails.
pub fn verify_bill(user: &User, bill: &BillRecord) -> Result<Option<BillVerification>, CoreError> {
    if bill.verified {
        return Ok(None);
    }

    let mut new_bill: BillRecord = bill.clone();
    new_bill.verified = true;

    let mut new_user: User = user.clone();
    new_user.record_bill_upload();

    let entry: Option<LedgerEntry> = if bill.points_earned > 0 {
        new_user.credit(bill.points_earned);
        Some(LedgerEntry::earned(
            bill.points_earned,
            ActivitySource::BillUpload,
            format!("Bill from {} verified", bill.vendor_name),
        )?)
    } else {
        None
    };

    Ok(Some(BillVerification {
        bill: new_bill,
        award: PointsTransition {
            user: new_user,
            points: bill.points_earned,
            entry,
        },
    }))
}

fn calendar_day(at: OffsetDateTime, config: &RewardsConfig) -> Date {
    at.to_offset(config.calendar_offset).date()
}

/// Whether the daily-login challenge can be awarded at `now`.
///
/// Both must hold: the last login fell on a different calendar day, and
/// the challenge has never been completed.
#[must_use]
pub fn daily_login_eligible(user: &User, now: OffsetDateTime, config: &RewardsConfig) -> bool {
    let same_day: bool = user
        .last_login_date()
        .is_some_and(|last| calendar_day(last, config) == calendar_day(now, config));
    !same_day && !user.has_completed(&config.daily_login_challenge_id)
}

/// Awards the daily-login challenge if eligible.
///
/// # Errors
///
/// Returns a ledger error if the configured challenge is worth zero points.
pub fn daily_login(
    user: &User,
    now: OffsetDateTime,
    config: &RewardsConfig,
) -> Result<Option<PointsTransition>, CoreError> {
    if !daily_login_eligible(user, now, config) {
        return Ok(None);
    }

    let entry: LedgerEntry = LedgerEntry::earned(
        config.daily_login_points,
        ActivitySource::DailyChallenge,
        "Daily login completed",
    )?
    .with_challenge(config.daily_login_challenge_id.as_str());

    let mut new_user: User = user.clone();
    new_user.complete_challenge(&config.daily_login_challenge_id);
    new_user.credit(config.daily_login_points);
    new_user.record_daily_login(now);

    Ok(Some(PointsTransition {
        user: new_user,
        points: config.daily_login_points,
        entry: Some(entry),
    }))
}

/// Spends points on a reward.
///
/// # Errors
///
/// Returns `DomainError::InsufficientPoints` if `cost` exceeds the balance,
/// or a ledger error if `cost` is zero.
pub fn redeem_reward(user: &User, reward_id: &str, cost: u64) -> Result<PointsTransition, CoreError> {
    authorize_redemption(user, cost)?;

    let entry: LedgerEntry = LedgerEntry::redeemed(
        cost,
        ActivitySource::Bonus,
        format!("Redeemed reward: {reward_id}"),
    )?;

    let mut new_user: User = user.clone();
    new_user.debit(cost)?;

    Ok(PointsTransition {
        user: new_user,
        points: cost,
        entry: Some(entry),
    })
}

/// The user after clearing all data: balance and lifetime reset, bronze tier.
#[must_use]
pub fn reset_standing(user: &User, config: &RewardsConfig) -> User {
    let mut new_user: User = user.clone();
    new_user.reset_points(config.reset_points);
    new_user
}
