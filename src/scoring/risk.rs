use std::fmt;

/// Percentage at which a customer stops being low risk
pub const MODERATE_THRESHOLD_PCT: f64 = 30.0;
/// Percentage at which a customer becomes high risk
pub const HIGH_THRESHOLD_PCT: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Low => "low",
            RiskTier::Medium => "medium",
            RiskTier::High => "high",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskTier::Low => "Low Risk",
            RiskTier::Medium => "Moderate Risk",
            RiskTier::High => "High Risk",
        }
    }

    /// Semantic tone used to colour the tier when displayed.
    pub fn tone(&self) -> Tone {
        match self {
            RiskTier::Low => Tone::Success,
            RiskTier::Medium => Tone::Warning,
            RiskTier::High => Tone::Destructive,
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Warning,
    Destructive,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Success => "success",
            Tone::Warning => "warning",
            Tone::Destructive => "destructive",
        }
    }
}

/// Map a churn probability in [0, 1] to its risk tier.
///
/// Thresholds apply to the unrounded percentage and are inclusive on their
/// lower bound: 30.0 is medium, 60.0 is high.
pub fn classify(probability: f64) -> RiskTier {
    let pct = probability * 100.0;

    if pct < MODERATE_THRESHOLD_PCT {
        RiskTier::Low
    } else if pct < HIGH_THRESHOLD_PCT {
        RiskTier::Medium
    } else {
        RiskTier::High
    }
}

/// Verdict line from the backend's boolean. Never derived from the tier.
pub fn verdict_text(will_churn: bool) -> &'static str {
    if will_churn {
        "Will churn"
    } else {
        "Will not churn"
    }
}

/// Percentage with one decimal place, e.g. `0.15` -> `"15.0%"`
pub fn format_percentage(probability: f64) -> String {
    format!("{:.1}%", probability * 100.0)
}
