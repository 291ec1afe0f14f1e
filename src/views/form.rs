use std::fmt;
use crate::data::types::PredictionRequest;
use crate::form::draft::PredictionDraft;

/// Text summary of a draft, grouped like the input form.
pub struct DraftSummary<'a> {
    request: &'a PredictionRequest,
}

impl<'a> DraftSummary<'a> {
    pub fn new(draft: &'a PredictionDraft) -> Self {
        Self {
            request: draft.request(),
        }
    }
}

/// Shown when a submission fails: the notice plus the draft, still intact
/// for another attempt.
pub struct SubmissionFailed<'a> {
    draft: &'a PredictionDraft,
}

impl<'a> SubmissionFailed<'a> {
    pub const NOTICE: &'static str = "Prediction failed. Check that the API is running.";

    pub fn new(draft: &'a PredictionDraft) -> Self {
        Self { draft }
    }
}

impl fmt::Display for SubmissionFailed<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", Self::NOTICE)?;
        writeln!(f)?;
        write!(f, "{}", DraftSummary::new(self.draft))
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

impl fmt::Display for DraftSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.request;

        writeln!(f, "Personal")?;
        writeln!(f, "  gender          {}", r.gender)?;
        writeln!(f, "  age             {}", r.age)?;
        writeln!(f, "  geography       {}", r.geography)?;
        writeln!(f, "Financial")?;
        writeln!(f, "  creditScore     {}", r.credit_score)?;
        writeln!(f, "  balance         {:.2}", r.balance)?;
        writeln!(f, "  estimatedSalary {:.2}", r.estimated_salary)?;
        writeln!(f, "Relationship")?;
        writeln!(f, "  tenure          {}", r.tenure)?;
        writeln!(f, "  numOfProducts   {}", r.num_of_products)?;
        writeln!(f, "  pointsEarned    {}", r.points_earned)?;
        writeln!(f, "  cardType        {}", r.card_type)?;
        writeln!(f, "  hasCrCard       {}", yes_no(r.has_cr_card))?;
        writeln!(f, "  isActiveMember  {}", yes_no(r.is_active_member))?;
        write!(f, "  satisfaction    {} / 5", r.satisfaction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::draft::FIELDS;

    #[test]
    fn test_summary_lists_every_field() {
        let draft = PredictionDraft::default();
        let text = DraftSummary::new(&draft).to_string();

        for field in FIELDS {
            assert!(text.contains(field), "missing {}", field);
        }
        assert!(text.contains("cardType        SILVER"));
        assert!(text.contains("balance         50000.00"));
        assert!(text.contains("satisfaction    3 / 5"));
    }

    #[test]
    fn test_submission_failed_shows_notice_and_draft() {
        let mut draft = PredictionDraft::default();
        draft.set("age", "61").unwrap();
        draft.set("cardType", "gold").unwrap();

        let text = SubmissionFailed::new(&draft).to_string();

        assert!(text.starts_with("Prediction failed. Check that the API is running.\n\n"));
        assert!(text.ends_with(&DraftSummary::new(&draft).to_string()));
        assert!(text.contains("age             61"));
        assert!(text.contains("cardType        GOLD"));
    }
}
