//! The four principal lunar phases.

use std::fmt::{Display, Formatter};

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One of the four principal lunar phases.
///
/// Each phase carries a stable wire id (0..=3) and a target fraction on the
/// [0, 1) phase ring. Closed set; there are no intermediate phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Phase {
    /// Phase value 0.00, wire id 0.
    NewMoon,
    /// Phase value 0.25, wire id 1.
    FirstQuarter,
    /// Phase value 0.50, wire id 2.
    FullMoon,
    /// Phase value 0.75, wire id 3.
    LastQuarter,
}

/// All four phases in cycle order.
pub const ALL_PHASES: [Phase; 4] = [
    Phase::NewMoon,
    Phase::FirstQuarter,
    Phase::FullMoon,
    Phase::LastQuarter,
];

impl Phase {
    /// Wire id used by the JSON event format.
    pub fn id(self) -> u8 {
        match self {
            Self::NewMoon => 0,
            Self::FirstQuarter => 1,
            Self::FullMoon => 2,
            Self::LastQuarter => 3,
        }
    }

    /// Target fraction on the [0, 1) phase ring.
    pub fn target(self) -> f64 {
        match self {
            Self::NewMoon => 0.0,
            Self::FirstQuarter => 0.25,
            Self::FullMoon => 0.5,
            Self::LastQuarter => 0.75,
        }
    }

    /// Look up a phase by wire id.
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            0 => Some(Self::NewMoon),
            1 => Some(Self::FirstQuarter),
            2 => Some(Self::FullMoon),
            3 => Some(Self::LastQuarter),
            _ => None,
        }
    }

    /// English display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::NewMoon => "New Moon",
            Self::FirstQuarter => "First Quarter",
            Self::FullMoon => "Full Moon",
            Self::LastQuarter => "Last Quarter",
        }
    }

    /// Console glyph, ASCII on purpose.
    pub fn glyph(self) -> &'static str {
        match self {
            Self::NewMoon => "[   ]",
            Self::FirstQuarter => "[=  ]",
            Self::FullMoon => "[###]",
            Self::LastQuarter => "[  =]",
        }
    }
}

impl Display for Phase {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// Wire format carries the phase as a bare integer, not a string variant.

impl Serialize for Phase {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.id())
    }
}

impl<'de> Deserialize<'de> for Phase {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let id = u8::deserialize(deserializer)?;
        Self::from_id(id).ok_or_else(|| D::Error::custom(format!("invalid phase id {id}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_stable() {
        assert_eq!(Phase::NewMoon.id(), 0);
        assert_eq!(Phase::FirstQuarter.id(), 1);
        assert_eq!(Phase::FullMoon.id(), 2);
        assert_eq!(Phase::LastQuarter.id(), 3);
    }

    #[test]
    fn targets_quarter_spaced() {
        for (i, phase) in ALL_PHASES.iter().enumerate() {
            assert!((phase.target() - i as f64 * 0.25).abs() < 1e-12);
        }
    }

    #[test]
    fn from_id_round_trips() {
        for phase in ALL_PHASES {
            assert_eq!(Phase::from_id(phase.id()), Some(phase));
        }
    }

    #[test]
    fn from_id_rejects_unknown() {
        assert_eq!(Phase::from_id(4), None);
        assert_eq!(Phase::from_id(255), None);
    }

    #[test]
    fn display_name() {
        assert_eq!(Phase::FullMoon.to_string(), "Full Moon");
    }

    #[test]
    fn serializes_as_integer() {
        let json = serde_json::to_string(&Phase::FullMoon).unwrap();
        assert_eq!(json, "2");
    }

    #[test]
    fn deserialize_rejects_out_of_range() {
        assert!(serde_json::from_str::<Phase>("4").is_err());
        assert!(serde_json::from_str::<Phase>("\"FullMoon\"").is_err());
    }
}
