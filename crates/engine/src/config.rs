// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::time::Duration;
use swadesi::{PricingConfig, RewardsConfig};
use swadesi_domain::OrderStatus;

/// Session engine settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// When each post-placement status applies, measured from placement.
    pub advancement_offsets: Vec<(OrderStatus, Duration)>,
    /// Time between a bill upload and its verification.
    pub bill_verification_delay: Duration,
    pub pricing: PricingConfig,
    pub rewards: RewardsConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            advancement_offsets: vec![
                (OrderStatus::Confirmed, Duration::from_secs(3)),
                (OrderStatus::Preparing, Duration::from_secs(8)),
                (OrderStatus::OutForDelivery, Duration::from_secs(15)),
                (OrderStatus::Delivered, Duration::from_secs(25)),
            ],
            bill_verification_delay: Duration::from_secs(4),
            pricing: PricingConfig::default(),
            rewards: RewardsConfig::default(),
        }
    }
}
