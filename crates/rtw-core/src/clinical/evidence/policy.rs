use serde::{Deserialize, Serialize};

/// Day thresholds applied by the evidence rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvidencePolicy {
    /// A certificate issued longer ago than this is no longer current evidence.
    pub certificate_currency_days: i64,
    pub expiring_soon_days: i64,
    /// Overdue follow-ups beyond this many days escalate to high risk.
    pub follow_up_escalation_days: i64,
    pub disengaged_days: i64,
    pub disengaged_escalation_days: i64,
    pub long_tail_days: i64,
    pub specialist_report_currency_days: i64,
}

impl Default for EvidencePolicy {
    fn default() -> Self {
        Self {
            certificate_currency_days: 42,
            expiring_soon_days: 7,
            follow_up_escalation_days: 14,
            disengaged_days: 30,
            disengaged_escalation_days: 60,
            long_tail_days: 180,
            specialist_report_currency_days: 90,
        }
    }
}
