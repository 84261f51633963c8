//! Fixed catalog data for eras, planets, and discoveries.
//!
//! Nothing in these catalogs is ever created or destroyed at runtime;
//! they exist purely for display and for era selection.

use once_cell::sync::Lazy;

use crate::models::{Discovery, EraId, Planet, TimePeriod};

static TIME_PERIODS: Lazy<Vec<TimePeriod>> = Lazy::new(|| {
    vec![
        TimePeriod {
            id: EraId::Ancient,
            name: "Ancient Civilizations",
            description: "The age of magic and artifacts",
            icon: "🏰",
            discoveries: 3,
        },
        TimePeriod {
            id: EraId::Present,
            name: "Present Day",
            description: "The era of technology and science",
            icon: "🏙",
            discoveries: 5,
        },
        TimePeriod {
            id: EraId::Future,
            name: "Distant Future",
            description: "The time of quantum engineering",
            icon: "🚀",
            discoveries: 7,
        },
    ]
});

static PLANETS: Lazy<Vec<Planet>> = Lazy::new(|| {
    vec![
        Planet {
            name: "Earth",
            kind: "Home world",
            resources: "Life, water",
            icon: "🌍",
        },
        Planet {
            name: "Kepler-442b",
            kind: "Exoplanet",
            resources: "Time crystals",
            icon: "✨",
        },
        Planet {
            name: "Proxima b",
            kind: "Under survey",
            resources: "Energy ores",
            icon: "⚡",
        },
    ]
});

static DISCOVERIES: Lazy<Vec<Discovery>> = Lazy::new(|| {
    vec![
        Discovery {
            id: 1,
            name: "Quantum Resonator",
            description: "A device that amplifies wishes through quantum fluctuations",
            era: EraId::Future,
            impact: 85,
        },
        Discovery {
            id: 2,
            name: "Temporal Spiral",
            description: "An ancient artifact that stabilizes time paradoxes",
            era: EraId::Ancient,
            impact: 92,
        },
    ]
});

/// The three selectable time periods, in display order.
pub fn time_periods() -> &'static [TimePeriod] {
    &TIME_PERIODS
}

/// The fixed planet catalog.
pub fn planets() -> &'static [Planet] {
    &PLANETS
}

/// The fixed discovery catalog.
pub fn discoveries() -> &'static [Discovery] {
    &DISCOVERIES
}

/// Look up the catalog entry for an era.
pub fn time_period(id: EraId) -> &'static TimePeriod {
    TIME_PERIODS
        .iter()
        .find(|period| period.id == id)
        .unwrap_or(&TIME_PERIODS[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exactly_three_eras_in_fixed_order() {
        let ids: Vec<EraId> = time_periods().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![EraId::Ancient, EraId::Present, EraId::Future]);
    }

    #[test]
    fn discovery_impacts_stay_in_gauge_range() {
        assert!(discoveries().iter().all(|d| d.impact <= 100));
    }

    #[test]
    fn every_discovery_references_a_cataloged_era() {
        for discovery in discoveries() {
            assert_eq!(time_period(discovery.era).id, discovery.era);
        }
    }
}
