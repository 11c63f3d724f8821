use crate::types::PredictionResponse;

/// Visual weight of the rendered verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Danger,
    Success,
}

impl Severity {
    pub fn icon(self) -> &'static str {
        match self {
            Severity::Danger => "⚠",
            Severity::Success => "✔",
        }
    }
}

pub const RETENTION_ACTIONS: [&str; 4] = [
    "Immediate outreach to customer required",
    "Consider offering retention incentives",
    "Review customer satisfaction and service quality",
    "Analyze transaction patterns for concerns",
];

pub const MAINTENANCE_ACTIONS: [&str; 4] = [
    "Continue maintaining current service quality",
    "Consider upselling opportunities",
    "Monitor for any changes in behavior",
    "Maintain regular engagement",
];

/// View-model for one prediction. Every value arrives pre-formatted; the UI
/// layer only places and colours it.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultView {
    pub severity: Severity,
    pub title: String,
    pub attrition_probability: String,
    pub retention_probability: String,
    /// Server-supplied risk label embedded in the badge text.
    pub risk_badge: String,
    pub recommendations: [&'static str; 4],
}

pub fn format_percent(probability: f64) -> String {
    format!("{:.2}%", probability * 100.0)
}

pub fn render(response: &PredictionResponse) -> ResultView {
    let severity = if response.prediction == 1 {
        Severity::Danger
    } else {
        Severity::Success
    };

    let (title, recommendations) = match severity {
        Severity::Danger => ("High Attrition Risk", RETENTION_ACTIONS),
        Severity::Success => ("Low Attrition Risk", MAINTENANCE_ACTIONS),
    };

    ResultView {
        severity,
        title: title.to_string(),
        attrition_probability: format_percent(response.attrition_probability),
        retention_probability: format_percent(response.retention_probability),
        risk_badge: format!("{} Risk", response.risk_level),
        recommendations,
    }
}
