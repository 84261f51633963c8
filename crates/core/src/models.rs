//! Shared domain models.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of one of the three fixed narrative eras.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EraId {
    /// The age of magic and artifacts.
    Ancient,
    /// The era of technology and science.
    Present,
    /// The time of quantum engineering.
    Future,
}

impl EraId {
    /// All eras in display order.
    pub const ALL: [EraId; 3] = [EraId::Ancient, EraId::Present, EraId::Future];
}

impl fmt::Display for EraId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EraId::Ancient => "ancient",
            EraId::Present => "present",
            EraId::Future => "future",
        };
        write!(f, "{label}")
    }
}

/// A user-submitted wish with its resolved outcome.
///
/// Immutable once created; the ledger only ever grows and keeps
/// newest-first ordering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wish {
    /// Time-derived unique identifier, strictly increasing per session.
    pub id: i64,
    /// Trimmed wish text; never empty.
    pub text: String,
    /// Whether the wish was granted when it was resolved.
    pub granted: bool,
    /// Energy reward rolled at submission, in `10..=59`.
    pub energy: u8,
}

/// One of the three selectable time periods.
#[derive(Debug, Clone, Serialize)]
pub struct TimePeriod {
    /// Era identifier.
    pub id: EraId,
    /// Human-readable era name.
    pub name: &'static str,
    /// Short flavor description.
    pub description: &'static str,
    /// Glyph shown next to the name.
    pub icon: &'static str,
    /// Number of discoveries advertised for this era.
    pub discoveries: u32,
}

/// A fictional planet shown in the planets catalog.
#[derive(Debug, Clone, Serialize)]
pub struct Planet {
    /// Planet name.
    pub name: &'static str,
    /// Classification label ("Home world", "Exoplanet", ...).
    pub kind: &'static str,
    /// Notable resources, display only.
    pub resources: &'static str,
    /// Glyph shown next to the name.
    pub icon: &'static str,
}

/// A fictional scientific discovery shown in the discoveries catalog.
#[derive(Debug, Clone, Serialize)]
pub struct Discovery {
    /// Stable catalog identifier.
    pub id: u32,
    /// Discovery name.
    pub name: &'static str,
    /// Short flavor description.
    pub description: &'static str,
    /// Era the discovery belongs to.
    pub era: EraId,
    /// Impact on reality, `0..=100`, rendered as a gauge.
    pub impact: u8,
}
