use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

use crate::domain::{ClimateZone, Orientation};
use crate::error::EnvelopeError;

/// Glazing threshold above which a window counts as high-loss (W/(m²K))
pub const DEFAULT_HIGH_LOSS_THRESHOLD_U: f64 = 3.6;

/// Maximum glazing percentage of a façade for one zone/orientation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowCap {
    /// Cap for windows at or below the high-loss threshold (%)
    pub standard: f64,
    /// Cap for windows above the high-loss threshold (%)
    pub high_loss: f64,
}

impl WindowCap {
    pub fn flat(percent: f64) -> Self {
        Self {
            standard: percent,
            high_loss: percent,
        }
    }

    fn validate(&self, context: &str) -> Result<(), EnvelopeError> {
        for value in [self.standard, self.high_loss] {
            if !value.is_finite() || !(0.0..=100.0).contains(&value) {
                return Err(EnvelopeError::Configuration(format!(
                    "{}: window percentage {} outside 0-100",
                    context, value
                )));
            }
        }
        Ok(())
    }
}

/// Caps of one zone keyed by façade orientation.
///
/// The south cap is mandatory: it is the fallback for any orientation the
/// row does not list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrientationCaps {
    caps: BTreeMap<Orientation, WindowCap>,
}

impl OrientationCaps {
    pub fn new(caps: BTreeMap<Orientation, WindowCap>) -> Result<Self, EnvelopeError> {
        if !caps.contains_key(&Orientation::FALLBACK) {
            return Err(EnvelopeError::Configuration(format!(
                "window rule row lacks the {} fallback cap",
                Orientation::FALLBACK
            )));
        }
        for (orientation, cap) in &caps {
            cap.validate(orientation.as_ref())?;
        }
        Ok(Self { caps })
    }

    /// Same cap for every orientation.
    pub fn uniform(cap: WindowCap) -> Result<Self, EnvelopeError> {
        use strum::IntoEnumIterator;
        Self::new(Orientation::iter().map(|o| (o, cap)).collect())
    }

    fn from_raw(raw: BTreeMap<String, WindowCap>) -> Result<Self, EnvelopeError> {
        let caps = raw
            .into_iter()
            .map(|(label, cap)| {
                label
                    .parse::<Orientation>()
                    .map(|o| (o, cap))
                    .map_err(EnvelopeError::Configuration)
            })
            .collect::<Result<BTreeMap<_, _>, _>>()?;
        Self::new(caps)
    }

    pub fn cap(&self, orientation: Orientation) -> WindowCap {
        match self.caps.get(&orientation) {
            Some(cap) => *cap,
            None => self.caps[&Orientation::FALLBACK],
        }
    }
}

/// Raw rule table as stored in a reference file.
#[derive(Debug, Clone, Deserialize)]
pub struct RawWindowRules {
    #[serde(default = "default_threshold")]
    pub high_loss_threshold_u: f64,
    pub default: BTreeMap<String, WindowCap>,
    #[serde(default)]
    pub zones: BTreeMap<String, BTreeMap<String, WindowCap>>,
}

fn default_threshold() -> f64 {
    DEFAULT_HIGH_LOSS_THRESHOLD_U
}

/// Maximum window percentage rules.
///
/// This is a simplified rendition of the tabulated standard; the whole table
/// is data so a complete one can be dropped in without touching the engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowRuleTable {
    high_loss_threshold_u: f64,
    default_caps: OrientationCaps,
    zones: BTreeMap<ClimateZone, OrientationCaps>,
}

impl WindowRuleTable {
    pub fn new(
        high_loss_threshold_u: f64,
        default_caps: OrientationCaps,
    ) -> Result<Self, EnvelopeError> {
        if !high_loss_threshold_u.is_finite() || high_loss_threshold_u <= 0.0 {
            return Err(EnvelopeError::Configuration(format!(
                "high-loss threshold must be positive, got {}",
                high_loss_threshold_u
            )));
        }
        Ok(Self {
            high_loss_threshold_u,
            default_caps,
            zones: BTreeMap::new(),
        })
    }

    pub fn with_zone(mut self, zone: ClimateZone, caps: OrientationCaps) -> Self {
        self.zones.insert(zone, caps);
        self
    }

    pub fn from_raw(raw: RawWindowRules) -> Result<Self, EnvelopeError> {
        let table = Self::new(raw.high_loss_threshold_u, OrientationCaps::from_raw(raw.default)?)?;
        raw.zones.into_iter().try_fold(table, |table, (code, row)| {
            let zone: ClimateZone = code.parse().map_err(|_| {
                EnvelopeError::Configuration(format!(
                    "unknown zone code '{}' in window rules",
                    code
                ))
            })?;
            Ok(table.with_zone(zone, OrientationCaps::from_raw(row)?))
        })
    }

    pub fn high_loss_threshold_u(&self) -> f64 {
        self.high_loss_threshold_u
    }

    /// Maximum window percentage allowed for a façade.
    ///
    /// Windows with `window_u` strictly above the high-loss threshold get the
    /// tighter cap. Zones absent from the table use the default row.
    pub fn max_percentage(
        &self,
        zone: ClimateZone,
        orientation: Orientation,
        window_u: f64,
    ) -> f64 {
        let caps = match self.zones.get(&zone) {
            Some(caps) => caps,
            None => {
                warn!(%zone, "zone missing from window rules, using default row");
                &self.default_caps
            }
        };
        let cap = caps.cap(orientation);
        if window_u <= self.high_loss_threshold_u {
            cap.standard
        } else {
            cap.high_loss
        }
    }
}
