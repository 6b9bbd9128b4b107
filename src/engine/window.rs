use serde::Serialize;
use tracing::{debug, info};

use crate::domain::{ClimateZone, ElementKind, Orientation, WindowLedger, WindowUnit};
use crate::reference::{TransmittanceLimitTable, WindowRuleTable};

/// How a window was judged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowVerdict {
    /// Glazing share within the tabulated maximum
    PassedByPercentage,
    /// Over the maximum, compensated by the façade weighted average
    PassedByWeightedAverage,
    Failed,
}

impl WindowVerdict {
    /// True for both passing tiers
    pub fn passed(&self) -> bool {
        !matches!(self, WindowVerdict::Failed)
    }
}

/// Weighted window-wall check, only run when the percentage check fails.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeightedAverageCheck {
    pub opaque_area_m2: f64,
    /// Area-weighted façade transmittance Upvm (W/(m²K))
    pub weighted_u: f64,
    /// Estimated weighted limit; `None` when the zone has no wall limit
    pub estimated_limit: Option<f64>,
    pub passed: bool,
}

/// Outcome of both tiers for one window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowComplianceResult {
    pub window_id: String,
    pub zone: ClimateZone,
    pub orientation: Orientation,
    pub window_area_m2: f64,
    pub facade_area_m2: f64,
    pub window_u: f64,
    pub wall_u: f64,
    pub real_percent: f64,
    pub max_percent: f64,
    pub percentage_passed: bool,
    pub weighted: Option<WeightedAverageCheck>,
    pub verdict: WindowVerdict,
}

impl WindowComplianceResult {
    pub fn passed(&self) -> bool {
        self.verdict.passed()
    }
}

/// Two-tier window check: glazing percentage first, weighted average second.
pub struct WindowComplianceEngine<'a> {
    rules: &'a WindowRuleTable,
    limits: &'a TransmittanceLimitTable,
}

impl<'a> WindowComplianceEngine<'a> {
    pub fn new(rules: &'a WindowRuleTable, limits: &'a TransmittanceLimitTable) -> Self {
        Self { rules, limits }
    }

    /// Maximum glazing share (%) for the zone, orientation and window U.
    pub fn lookup_max_window_percentage(
        &self,
        zone: ClimateZone,
        orientation: Orientation,
        window_u: f64,
    ) -> f64 {
        self.rules.max_percentage(zone, orientation, window_u)
    }

    /// Runs the percentage tier and, when it fails, the weighted tier.
    pub fn evaluate(&self, window: &WindowUnit, zone: ClimateZone) -> WindowComplianceResult {
        let window_area = window.window_area_m2();
        let facade_area = window.facade_area_m2();
        let real_percent = 100.0 * window_area / facade_area;
        let max_percent =
            self.lookup_max_window_percentage(zone, window.orientation(), window.window_u());
        let percentage_passed = real_percent <= max_percent;

        let (weighted, verdict) = if percentage_passed {
            (None, WindowVerdict::PassedByPercentage)
        } else {
            let check = self.weighted_check(window, zone, max_percent);
            let verdict = if check.passed {
                WindowVerdict::PassedByWeightedAverage
            } else {
                WindowVerdict::Failed
            };
            (Some(check), verdict)
        };

        debug!(
            window = window.id(),
            %zone,
            orientation = %window.orientation(),
            real_percent,
            max_percent,
            ?verdict,
            "evaluated window"
        );

        WindowComplianceResult {
            window_id: window.id().to_string(),
            zone,
            orientation: window.orientation(),
            window_area_m2: window_area,
            facade_area_m2: facade_area,
            window_u: window.window_u(),
            wall_u: window.wall_u(),
            real_percent,
            max_percent,
            percentage_passed,
            weighted,
            verdict,
        }
    }

    /// The limit is an estimate: the opaque wall limit and the window U
    /// blended at the maximum allowed percentage, standing in for the
    /// tabulated weighted limit of the standard.
    fn weighted_check(
        &self,
        window: &WindowUnit,
        zone: ClimateZone,
        max_percent: f64,
    ) -> WeightedAverageCheck {
        let opaque_area_m2 = window.opaque_area_m2();
        let weighted_u = window.facade_loss_w_k() / window.facade_area_m2();

        let estimated_limit = self.limits.limit(zone, ElementKind::Wall).map(|wall_limit| {
            let share = max_percent / 100.0;
            wall_limit * (1.0 - share) + window.window_u() * share
        });
        let passed = estimated_limit.map_or(true, |limit| weighted_u <= limit);

        WeightedAverageCheck {
            opaque_area_m2,
            weighted_u,
            estimated_limit,
            passed,
        }
    }

    /// Evaluates every window of the ledger independently, in ledger order.
    pub fn evaluate_all(
        &self,
        ledger: &WindowLedger,
        zone: ClimateZone,
    ) -> Vec<WindowComplianceResult> {
        let results: Vec<_> = ledger.iter().map(|w| self.evaluate(w, zone)).collect();
        let failed = results.iter().filter(|r| !r.passed()).count();
        info!(%zone, windows = results.len(), failed, "evaluated window ledger");
        results
    }
}

/// Area-weighted U across every façade of a project (W/(m²K)).
///
/// Informational only. `None` for an empty set.
pub fn aggregate_weighted_u<'w>(
    windows: impl IntoIterator<Item = &'w WindowUnit>,
) -> Option<f64> {
    let (loss, area) = windows.into_iter().fold((0.0, 0.0), |(loss, area), w| {
        (loss + w.facade_loss_w_k(), area + w.facade_area_m2())
    });
    (area > 0.0).then(|| loss / area)
}
