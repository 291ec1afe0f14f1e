use chrono::{DateTime, Local, NaiveDateTime};
use std::fmt;
use crate::data::types::PredictionResponse;
use crate::scoring::risk::{classify, format_percentage, verdict_text, RiskTier};

/// Result screen input. Without a response there is nothing to show and the
/// caller is sent back to the overview.
pub enum ResultScreen<'a> {
    Ready(ResultView<'a>),
    Redirect,
}

impl<'a> ResultScreen<'a> {
    pub fn new(response: Option<&'a PredictionResponse>) -> Self {
        match response {
            Some(response) => ResultScreen::Ready(ResultView { response }),
            None => ResultScreen::Redirect,
        }
    }
}

pub struct ResultView<'a> {
    response: &'a PredictionResponse,
}

impl ResultView<'_> {
    pub fn tier(&self) -> RiskTier {
        classify(self.response.churn_probability)
    }

    pub fn percentage(&self) -> String {
        format_percentage(self.response.churn_probability)
    }

    pub fn verdict(&self) -> &'static str {
        verdict_text(self.response.will_churn)
    }

    pub fn analyzed_at(&self) -> String {
        display_timestamp(&self.response.predicted_at)
    }
}

impl fmt::Display for ResultView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tier = self.tier();

        writeln!(f, "Analysis result")?;
        writeln!(f)?;
        writeln!(f, "  Churn probability  {}", self.percentage())?;
        writeln!(f, "  Risk               {} [{}]", tier.label(), tier.tone().as_str())?;
        writeln!(f, "  Verdict            {}", self.verdict())?;
        write!(f, "  Analyzed at        {}", self.analyzed_at())
    }
}

/// Format an ISO-8601 timestamp for display in local time.
///
/// Offset-less timestamps are shown as given; anything unparseable is shown
/// verbatim.
pub fn display_timestamp(raw: &str) -> String {
    const DISPLAY: &str = "%Y-%m-%d %H:%M:%S";

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Local).format(DISPLAY).to_string();
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return naive.format(DISPLAY).to_string();
    }

    raw.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(probability: f64, will_churn: bool) -> PredictionResponse {
        PredictionResponse {
            churn_probability: probability,
            will_churn,
            predicted_at: "2025-03-14T09:26:53.120".to_string(),
        }
    }

    #[test]
    fn test_high_risk_result() {
        let response = response(0.82, true);
        let ResultScreen::Ready(view) = ResultScreen::new(Some(&response)) else {
            panic!("expected a rendered result");
        };

        assert_eq!(view.tier(), RiskTier::High);
        assert_eq!(view.percentage(), "82.0%");
        assert_eq!(view.verdict(), "Will churn");

        let screen = view.to_string();
        assert!(screen.contains("High Risk [destructive]"));
        assert!(screen.contains("Analyzed at        2025-03-14 09:26:53"));
    }

    #[test]
    fn test_verdict_follows_backend_not_tier() {
        let response = response(0.45, true);
        let ResultScreen::Ready(view) = ResultScreen::new(Some(&response)) else {
            panic!("expected a rendered result");
        };

        assert_eq!(view.tier(), RiskTier::Medium);
        assert_eq!(view.percentage(), "45.0%");
        assert_eq!(view.verdict(), "Will churn");
    }

    #[test]
    fn test_missing_response_redirects() {
        assert!(matches!(ResultScreen::new(None), ResultScreen::Redirect));
    }

    #[test]
    fn test_display_timestamp() {
        assert_eq!(display_timestamp("2025-03-14T09:26:53"), "2025-03-14 09:26:53");
        assert_eq!(display_timestamp("yesterday"), "yesterday");

        // Offset timestamps parse; exact text depends on the local zone
        let shown = display_timestamp("2025-03-14T09:26:53Z");
        assert!(shown.starts_with("2025-03-1"));
        assert_eq!(shown.len(), "2025-03-14 09:26:53".len());
    }
}
