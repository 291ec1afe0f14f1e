use std::fmt;
use crate::data::prediction_api::ApiError;
use crate::data::types::StatsResponse;
use crate::scoring::risk::format_percentage;

pub const PLACEHOLDER: &str = "Unavailable";

/// Landing screen: aggregate figures plus the call to action.
///
/// A stats failure only blanks the two figures.
pub struct OverviewView<'a> {
    stats: Result<&'a StatsResponse, &'a ApiError>,
}

impl<'a> OverviewView<'a> {
    pub fn new(stats: &'a Result<StatsResponse, ApiError>) -> Self {
        Self {
            stats: stats.as_ref(),
        }
    }

    pub fn total_predictions(&self) -> String {
        match self.stats {
            Ok(stats) => stats.number_of_predictions.to_string(),
            Err(_) => PLACEHOLDER.to_string(),
        }
    }

    pub fn mean_churn(&self) -> String {
        match self.stats {
            Ok(stats) => format_percentage(stats.mean_churn_probability),
            Err(_) => PLACEHOLDER.to_string(),
        }
    }
}

impl fmt::Display for OverviewView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ChurnInsight")?;
        writeln!(f, "Churn prediction for bank customers")?;
        writeln!(f)?;
        writeln!(f, "  Total predictions  {}", self.total_predictions())?;
        writeln!(f, "  Mean churn         {}", self.mean_churn())?;
        writeln!(f)?;
        write!(f, "New prediction: churn-insight predict")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::prediction_api::FailureCause;

    #[test]
    fn test_overview_with_stats() {
        let stats = Ok(StatsResponse {
            number_of_predictions: 1204,
            mean_churn_probability: 0.2374,
        });
        let view = OverviewView::new(&stats);

        assert_eq!(view.total_predictions(), "1204");
        assert_eq!(view.mean_churn(), "23.7%");

        let screen = view.to_string();
        assert!(screen.contains("Total predictions  1204"));
        assert!(screen.contains("Mean churn         23.7%"));
    }

    #[test]
    fn test_overview_degrades_to_placeholder() {
        let stats = Err(ApiError::StatsUnavailable(FailureCause::OutOfRange {
            field: "meanChurnProbability",
            value: 4.0,
        }));
        let view = OverviewView::new(&stats);

        assert_eq!(view.total_predictions(), PLACEHOLDER);
        assert_eq!(view.mean_churn(), PLACEHOLDER);

        // Rest of the screen still renders
        let screen = view.to_string();
        assert!(screen.starts_with("ChurnInsight"));
        assert!(screen.contains("New prediction"));
    }
}
