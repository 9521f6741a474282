//! Token staking cost for a manuscript submission.
//!
//! `cost = (BASE_COST + reviewers * PER_REVIEWER_COST) * multiplier(tier)`

use crate::wizard::{PriorityTier, ReviewerCount};

pub const BASE_COST: u32 = 50;
pub const PER_REVIEWER_COST: u32 = 15;

pub struct StakingCostCalculator;

impl StakingCostCalculator {
    pub fn priority_multiplier(tier: PriorityTier) -> u32 {
        match tier {
            PriorityTier::Standard => 1,
            PriorityTier::Urgent => 2,
        }
    }

    /// Tokens staked for a submission with the given review settings.
    pub fn cost(reviewers: ReviewerCount, tier: PriorityTier) -> u32 {
        (BASE_COST + u32::from(reviewers.get()) * PER_REVIEWER_COST)
            * Self::priority_multiplier(tier)
    }

    /// Standard-tier cost shown next to each reviewer count option.
    pub fn option_preview() -> Vec<(ReviewerCount, u32)> {
        ReviewerCount::all()
            .map(|count| (count, Self::cost(count, PriorityTier::Standard)))
            .collect()
    }
}
