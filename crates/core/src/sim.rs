//! Simulation state and its update operations.
//!
//! All mutation goes through [`SimState`] methods so the front-end stays a
//! thin render/input layer and every rule is unit-testable without a
//! terminal. Randomness is injected by the caller; see
//! [`SimState::resolve_wish`] for the deterministic entry point.

use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::energy::CosmicEnergy;
use crate::models::{EraId, Wish};

/// Energy cost of submitting a wish.
pub const WISH_COST: u8 = 10;
/// Energy cost of traveling to an era.
pub const TRAVEL_COST: u8 = 5;
/// Energy restored by one passive regeneration tick.
pub const REGEN_AMOUNT: u8 = 1;
/// Probability that a submitted wish is granted.
pub const GRANT_PROBABILITY: f64 = 0.7;
/// Inclusive bounds of the rolled wish reward.
pub const REWARD_RANGE: (u8, u8) = (10, 59);

/// Why a wish submission was refused. Refusals leave the state untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WishRejection {
    /// The trimmed wish text was empty.
    #[error("wish text is empty")]
    EmptyText,
    /// The meter cannot cover the submission cost.
    #[error("not enough cosmic energy ({have}/{need})")]
    InsufficientEnergy {
        /// Current meter value.
        have: u8,
        /// Required meter value.
        need: u8,
    },
}

/// Result of an accepted wish submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WishOutcome {
    /// Identifier of the newly created wish.
    pub id: i64,
    /// Whether the wish was granted.
    pub granted: bool,
    /// Rolled reward. Applied later, and only for granted wishes.
    pub reward: u8,
}

/// The whole in-memory state of the simulator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimState {
    energy: CosmicEnergy,
    wishes: Vec<Wish>,
    selected_era: EraId,
    last_wish_id: i64,
}

impl Default for SimState {
    fn default() -> Self {
        Self::new(CosmicEnergy::default())
    }
}

impl SimState {
    /// Create a fresh state with the given starting energy and the
    /// default era selection.
    pub fn new(energy: CosmicEnergy) -> Self {
        Self {
            energy,
            wishes: Vec::new(),
            selected_era: EraId::Present,
            last_wish_id: 0,
        }
    }

    /// Current energy meter.
    pub fn energy(&self) -> CosmicEnergy {
        self.energy
    }

    /// Wish ledger, newest first.
    pub fn wishes(&self) -> &[Wish] {
        &self.wishes
    }

    /// Currently selected era.
    pub fn selected_era(&self) -> EraId {
        self.selected_era
    }

    /// Submit a wish, rolling outcome and reward from `rng`.
    ///
    /// The outcome is granted with probability [`GRANT_PROBABILITY`] and
    /// the reward is uniform in [`REWARD_RANGE`].
    pub fn submit_wish(
        &mut self,
        text: &str,
        rng: &mut impl Rng,
    ) -> Result<WishOutcome, WishRejection> {
        let granted = rng.gen_bool(GRANT_PROBABILITY);
        let reward = rng.gen_range(REWARD_RANGE.0..=REWARD_RANGE.1);
        self.resolve_wish(text, granted, reward)
    }

    /// Submit a wish with a pre-determined outcome and reward.
    ///
    /// This is the deterministic core of [`SimState::submit_wish`]: it
    /// validates the text and the energy cost, deducts [`WISH_COST`],
    /// and prepends the new wish to the ledger. The delayed reward is
    /// *not* applied here; the caller schedules it for granted wishes
    /// and feeds it back through [`SimState::apply_reward`].
    pub fn resolve_wish(
        &mut self,
        text: &str,
        granted: bool,
        reward: u8,
    ) -> Result<WishOutcome, WishRejection> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            debug!("wish rejected: empty text");
            return Err(WishRejection::EmptyText);
        }
        if !self.energy.can_afford(WISH_COST) {
            debug!(have = self.energy.value(), "wish rejected: low energy");
            return Err(WishRejection::InsufficientEnergy {
                have: self.energy.value(),
                need: WISH_COST,
            });
        }

        let id = self.next_wish_id();
        self.energy.drain(WISH_COST);
        self.wishes.insert(
            0,
            Wish {
                id,
                text: trimmed.to_string(),
                granted,
                energy: reward,
            },
        );
        info!(id, granted, reward, "wish resolved");
        Ok(WishOutcome {
            id,
            granted,
            reward,
        })
    }

    /// Travel to an era. Always charges [`TRAVEL_COST`] (clamped at
    /// zero), including when re-selecting the active era.
    pub fn travel_to(&mut self, era: EraId) {
        self.selected_era = era;
        self.energy.drain(TRAVEL_COST);
        info!(%era, energy = self.energy.value(), "era selected");
    }

    /// Passive regeneration step: +[`REGEN_AMOUNT`], clamped at 100.
    pub fn regen_tick(&mut self) {
        self.energy.gain(REGEN_AMOUNT);
    }

    /// Apply a delayed wish reward, clamped at 100.
    pub fn apply_reward(&mut self, amount: u8) {
        self.energy.gain(amount);
        info!(amount, energy = self.energy.value(), "wish reward applied");
    }

    /// Timestamp-derived id, forced strictly monotonic so two wishes in
    /// the same millisecond cannot collide.
    fn next_wish_id(&mut self) -> i64 {
        let now = Utc::now().timestamp_millis();
        self.last_wish_id = now.max(self.last_wish_id + 1);
        self.last_wish_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn state_with(energy: u8) -> SimState {
        SimState::new(CosmicEnergy::new(energy))
    }

    #[test]
    fn whitespace_only_wish_changes_nothing() {
        let mut state = state_with(100);
        let mut rng = StdRng::seed_from_u64(7);
        let result = state.submit_wish("   \t ", &mut rng);
        assert_eq!(result, Err(WishRejection::EmptyText));
        assert!(state.wishes().is_empty());
        assert_eq!(state.energy().value(), 100);
    }

    #[test]
    fn low_energy_wish_changes_nothing() {
        let mut state = state_with(5);
        let mut rng = StdRng::seed_from_u64(7);
        let result = state.submit_wish("more energy", &mut rng);
        assert_eq!(
            result,
            Err(WishRejection::InsufficientEnergy { have: 5, need: 10 })
        );
        assert!(state.wishes().is_empty());
        assert_eq!(state.energy().value(), 5);
    }

    #[test]
    fn accepted_wish_costs_ten_and_prepends_once() {
        let mut state = state_with(100);
        let mut rng = StdRng::seed_from_u64(42);
        let outcome = state.submit_wish("  a starship  ", &mut rng).unwrap();
        assert_eq!(state.energy().value(), 90);
        assert_eq!(state.wishes().len(), 1);
        let wish = &state.wishes()[0];
        assert_eq!(wish.text, "a starship");
        assert_eq!(wish.id, outcome.id);
        assert!((10..=59).contains(&wish.energy));
    }

    #[test]
    fn ledger_is_newest_first_with_increasing_ids() {
        let mut state = state_with(100);
        let mut rng = StdRng::seed_from_u64(1);
        let first = state.submit_wish("first", &mut rng).unwrap();
        let second = state.submit_wish("second", &mut rng).unwrap();
        assert_eq!(state.wishes()[0].id, second.id);
        assert_eq!(state.wishes()[1].id, first.id);
        assert!(second.id > first.id);
    }

    #[test]
    fn era_travel_always_charges_five() {
        let mut state = state_with(100);
        state.travel_to(EraId::Future);
        assert_eq!(state.selected_era(), EraId::Future);
        assert_eq!(state.energy().value(), 95);

        // Re-selecting the active era still charges.
        state.travel_to(EraId::Future);
        assert_eq!(state.energy().value(), 90);
    }

    #[test]
    fn era_travel_clamps_at_zero() {
        let mut state = state_with(3);
        state.travel_to(EraId::Ancient);
        assert_eq!(state.selected_era(), EraId::Ancient);
        assert_eq!(state.energy().value(), 0);
    }

    #[test]
    fn regen_accumulates_and_clamps() {
        let mut state = state_with(40);
        for _ in 0..30 {
            state.regen_tick();
        }
        assert_eq!(state.energy().value(), 70);
        for _ in 0..200 {
            state.regen_tick();
        }
        assert_eq!(state.energy().value(), 100);
    }

    #[test]
    fn granted_reward_scenario_clamps_instead_of_overflowing() {
        let mut state = state_with(100);
        let outcome = state.resolve_wish("test", true, 20).unwrap();
        assert!(outcome.granted);
        assert_eq!(state.energy().value(), 90);

        state.apply_reward(outcome.reward);
        assert_eq!(state.energy().value(), 100);
    }

    #[test]
    fn energy_stays_bounded_under_mixed_operations() {
        let mut state = state_with(100);
        let mut rng = StdRng::seed_from_u64(99);
        for step in 0..500 {
            match step % 4 {
                0 => {
                    let _ = state.submit_wish("wish", &mut rng);
                }
                1 => state.travel_to(EraId::Ancient),
                2 => state.regen_tick(),
                _ => state.apply_reward(59),
            }
            assert!(state.energy().value() <= 100);
        }
    }
}
