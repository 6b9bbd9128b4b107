use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};
use tracing::warn;

// ============================================================================
// Climate zones
// ============================================================================

/// Thermal climate zone, `A` mildest through `I` most severe.
///
/// The derived ordering follows severity. Zones are lookup keys only.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum ClimateZone {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
}

// ============================================================================
// Envelope elements
// ============================================================================

/// Kind of envelope element a limit or a surface resistance applies to.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ElementKind {
    Wall,
    Roof,
    VentilatedFloor,
    Door,
}

impl ElementKind {
    /// Whether the regulation also asks for insulated foundation walls
    /// when this element is part of the envelope.
    pub fn needs_foundation_check(&self) -> bool {
        matches!(self, ElementKind::Wall | ElementKind::VentilatedFloor)
    }
}

// ============================================================================
// Façade orientation
// ============================================================================

/// Cardinal façade orientation.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Orientation {
    North,
    South,
    East,
    West,
}

impl Orientation {
    /// Most restrictive orientation; used whenever the real one is unknown.
    pub const FALLBACK: Orientation = Orientation::South;

    /// Parses a façade label, falling back to [`Orientation::FALLBACK`] for
    /// anything that is not one of the four cardinal directions.
    pub fn from_label(label: &str) -> Self {
        match label.parse() {
            Ok(orientation) => orientation,
            Err(_) => {
                warn!(label, fallback = %Self::FALLBACK, "unknown orientation, using fallback");
                Self::FALLBACK
            }
        }
    }
}

impl std::str::FromStr for Orientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "north" | "n" | "norte" => Ok(Orientation::North),
            "south" | "s" | "sur" => Ok(Orientation::South),
            "east" | "e" | "oriente" => Ok(Orientation::East),
            "west" | "w" | "poniente" => Ok(Orientation::West),
            _ => Err(format!("Unknown orientation: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_zone_order_follows_severity() {
        let zones: Vec<ClimateZone> = ClimateZone::iter().collect();
        assert_eq!(zones.len(), 9);
        assert!(zones.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(zones.first(), Some(&ClimateZone::A));
        assert_eq!(zones.last(), Some(&ClimateZone::I));
    }

    #[test]
    fn test_zone_parsing() {
        assert_eq!("D".parse::<ClimateZone>().unwrap(), ClimateZone::D);
        assert_eq!("h".parse::<ClimateZone>().unwrap(), ClimateZone::H);
        assert!("Z".parse::<ClimateZone>().is_err());
        assert_eq!(ClimateZone::F.to_string(), "F");
    }

    #[test]
    fn test_element_kind_codes() {
        assert_eq!(ElementKind::VentilatedFloor.to_string(), "ventilated_floor");
        assert_eq!(
            "ventilated_floor".parse::<ElementKind>().unwrap(),
            ElementKind::VentilatedFloor
        );
        assert_eq!("Roof".parse::<ElementKind>().unwrap(), ElementKind::Roof);
    }

    #[test]
    fn test_foundation_check_kinds() {
        assert!(ElementKind::Wall.needs_foundation_check());
        assert!(ElementKind::VentilatedFloor.needs_foundation_check());
        assert!(!ElementKind::Roof.needs_foundation_check());
        assert!(!ElementKind::Door.needs_foundation_check());
    }

    #[test]
    fn test_orientation_labels() {
        assert_eq!(Orientation::from_label("north"), Orientation::North);
        assert_eq!(Orientation::from_label("Oriente"), Orientation::East);
        assert_eq!(Orientation::from_label("poniente"), Orientation::West);
        assert_eq!(Orientation::from_label(" SUR "), Orientation::South);
    }

    #[test]
    fn test_unknown_orientation_falls_back_to_south() {
        assert_eq!(Orientation::from_label("north-east"), Orientation::South);
        assert_eq!(Orientation::from_label(""), Orientation::South);
    }
}
