//! The five assist request types and their per-type model settings.

use std::fmt;
use std::str::FromStr;

use crate::error::AssistError;

/// A supported assist request `type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssistKind {
    TaskSuggestions,
    SmartCategorization,
    ProductivityInsights,
    TimeEstimation,
    DailySummary,
}

impl AssistKind {
    pub const ALL: [AssistKind; 5] = [
        AssistKind::TaskSuggestions,
        AssistKind::SmartCategorization,
        AssistKind::ProductivityInsights,
        AssistKind::TimeEstimation,
        AssistKind::DailySummary,
    ];

    /// Wire name used in the request body.
    pub fn as_str(self) -> &'static str {
        match self {
            AssistKind::TaskSuggestions => "task_suggestions",
            AssistKind::SmartCategorization => "smart_categorization",
            AssistKind::ProductivityInsights => "productivity_insights",
            AssistKind::TimeEstimation => "time_estimation",
            AssistKind::DailySummary => "daily_summary",
        }
    }

    /// Sampling temperature. Analytical types run cooler than generative ones.
    pub fn temperature(self) -> f32 {
        match self {
            AssistKind::TaskSuggestions => 0.7,
            AssistKind::SmartCategorization => 0.3,
            AssistKind::ProductivityInsights => 0.4,
            AssistKind::TimeEstimation => 0.2,
            AssistKind::DailySummary => 0.6,
        }
    }

    /// System message establishing the model's role for this type.
    pub fn system_prompt(self) -> &'static str {
        match self {
            AssistKind::TaskSuggestions => {
                "You are a productivity assistant that proposes useful next tasks from a \
                 user's current workload and projects. Reply with valid JSON only."
            }
            AssistKind::SmartCategorization => {
                "You are a task categorization assistant. Reply with valid JSON only."
            }
            AssistKind::ProductivityInsights => {
                "You are a productivity analyst. Reply with valid JSON only."
            }
            AssistKind::TimeEstimation => {
                "You are an expert at estimating how long tasks take. Reply with valid JSON only."
            }
            AssistKind::DailySummary => {
                "You are an encouraging productivity coach. Reply with valid JSON only."
            }
        }
    }

    /// Whether the parsed reply is returned under a `suggestions` key rather
    /// than as the response body itself.
    pub fn wraps_reply(self) -> bool {
        matches!(self, AssistKind::TaskSuggestions)
    }
}

impl FromStr for AssistKind {
    type Err = AssistError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| AssistError::InvalidRequest("Invalid AI suggestion type".into()))
    }
}

impl fmt::Display for AssistKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn parses_every_wire_name() {
        for kind in AssistKind::ALL {
            assert_eq!(kind.as_str().parse::<AssistKind>().unwrap(), kind);
        }
    }

    #[test]
    fn unknown_type_is_invalid_request() {
        assert_matches!("bogus".parse::<AssistKind>(), Err(AssistError::InvalidRequest(_)));
        assert_matches!(
            "Task_Suggestions".parse::<AssistKind>(),
            Err(AssistError::InvalidRequest(_))
        );
    }

    #[test]
    fn temperatures_per_type() {
        assert_eq!(AssistKind::TaskSuggestions.temperature(), 0.7);
        assert_eq!(AssistKind::SmartCategorization.temperature(), 0.3);
        assert_eq!(AssistKind::ProductivityInsights.temperature(), 0.4);
        assert_eq!(AssistKind::TimeEstimation.temperature(), 0.2);
        assert_eq!(AssistKind::DailySummary.temperature(), 0.6);
    }

    #[test]
    fn only_suggestions_are_wrapped() {
        let wrapped: Vec<_> = AssistKind::ALL
            .into_iter()
            .filter(|k| k.wraps_reply())
            .collect();
        assert_eq!(wrapped, vec![AssistKind::TaskSuggestions]);
    }
}
