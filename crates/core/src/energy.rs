//! Cosmic energy accounting.
//!
//! Every energy mutation in the simulator funnels through this type so
//! the `0..=100` invariant holds after every observable step.

use serde::{Deserialize, Serialize};

/// Upper bound of the energy meter.
pub const ENERGY_MAX: u8 = 100;

/// Bounded numeric resource gating user actions.
///
/// Invariant: the stored value is always within `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CosmicEnergy(u8);

impl Default for CosmicEnergy {
    fn default() -> Self {
        CosmicEnergy(ENERGY_MAX)
    }
}

impl CosmicEnergy {
    /// Create a meter clamped to the valid range.
    pub fn new(value: u8) -> Self {
        CosmicEnergy(value.min(ENERGY_MAX))
    }

    /// Current value as a percentage point in `0..=100`.
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Whether the meter can cover a fixed cost.
    pub fn can_afford(&self, cost: u8) -> bool {
        self.0 >= cost
    }

    /// Add energy, clamped at the maximum.
    pub fn gain(&mut self, amount: u8) {
        self.0 = self.0.saturating_add(amount).min(ENERGY_MAX);
    }

    /// Remove energy, clamped at zero.
    pub fn drain(&mut self, amount: u8) {
        self.0 = self.0.saturating_sub(amount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gain_clamps_at_maximum() {
        let mut energy = CosmicEnergy::new(95);
        energy.gain(20);
        assert_eq!(energy.value(), 100);
    }

    #[test]
    fn drain_clamps_at_zero() {
        let mut energy = CosmicEnergy::new(3);
        energy.drain(5);
        assert_eq!(energy.value(), 0);
    }

    #[test]
    fn new_rejects_out_of_range_values() {
        assert_eq!(CosmicEnergy::new(250).value(), 100);
    }

    #[test]
    fn affordability_is_inclusive() {
        let energy = CosmicEnergy::new(10);
        assert!(energy.can_afford(10));
        assert!(!energy.can_afford(11));
    }
}
