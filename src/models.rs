use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::InvalidArgument;

/// Shape of value loss over the weeks of a delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UrgencyProfile {
    Standard,
    Expedite,
    FixedDate,
    Intangible,
}

impl UrgencyProfile {
    pub const ALL: [UrgencyProfile; 4] = [
        UrgencyProfile::Standard,
        UrgencyProfile::Expedite,
        UrgencyProfile::FixedDate,
        UrgencyProfile::Intangible,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            UrgencyProfile::Standard => "standard",
            UrgencyProfile::Expedite => "expedite",
            UrgencyProfile::FixedDate => "fixed-date",
            UrgencyProfile::Intangible => "intangible",
        }
    }
}

impl fmt::Display for UrgencyProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UrgencyProfile {
    type Err = InvalidArgument;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        UrgencyProfile::ALL
            .into_iter()
            .find(|profile| profile.as_str() == value)
            .ok_or_else(|| InvalidArgument::UnknownUrgencyProfile(value.to_string()))
    }
}

/// One work item as seen by both the delay aggregator and the employee cost model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkItemInput {
    pub weekly_value: f64,
    pub development_weeks: f64,
    pub delay_weeks: f64,
    pub urgency_profile: UrgencyProfile,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmployeeCostInput {
    pub annual_salary: f64,
    pub team_size: f64,
    pub benefits_multiplier: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LossBreakdown {
    /// One entry per whole delay week, week 1 first.
    pub weekly_losses: Vec<f64>,
    pub total_cost_of_delay: f64,
    pub peak_weekly_loss: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostOfDelayResult {
    pub total_cost_of_delay: f64,
    pub cd3: f64,
    pub peak_weekly_loss: f64,
    pub weekly_losses: Vec<f64>,
    /// Percentage of annualized value lost. `None` when the item has no weekly value.
    pub opportunity_cost: Option<f64>,
    pub weekly_value: f64,
    pub development_weeks: f64,
    pub delay_weeks: f64,
    pub urgency_profile: UrgencyProfile,
    pub normal_payback_weeks: f64,
    pub delayed_payback_weeks: f64,
    pub additional_payback_time: f64,
    pub total_project_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeCosts {
    pub annual_salary: f64,
    pub team_size: f64,
    pub benefits_multiplier: f64,
    pub true_cost_per_person: f64,
    pub hourly_rate: f64,
    pub daily_rate: f64,
    pub weekly_rate: f64,
    pub team_daily_cost: f64,
    pub team_weekly_cost: f64,
    pub total_development_cost: f64,
    pub total_delay_cost: f64,
    pub total_project_cost: f64,
    pub cost_per_week_delay: f64,
}

/// Output of the employee cost model.
///
/// Serializes to `{"hasEmployeeCosts": false}` when no salary or team is configured, and to the
/// flag plus every [`EmployeeCosts`] field otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeCostResult {
    has_employee_costs: bool,
    #[serde(flatten)]
    costs: Option<EmployeeCosts>,
}

impl EmployeeCostResult {
    pub fn not_configured() -> Self {
        Self {
            has_employee_costs: false,
            costs: None,
        }
    }

    pub fn configured(costs: EmployeeCosts) -> Self {
        Self {
            has_employee_costs: true,
            costs: Some(costs),
        }
    }

    pub fn has_employee_costs(&self) -> bool {
        self.has_employee_costs
    }

    pub fn costs(&self) -> Option<&EmployeeCosts> {
        self.costs.as_ref()
    }
}

/// Everything computed for one work item; the record exporters, reports and the comparison set
/// consume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkItemResult {
    pub project_name: String,
    #[serde(flatten)]
    pub cost_of_delay: CostOfDelayResult,
    #[serde(flatten)]
    pub employee: EmployeeCostResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_launch_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revised_launch_date: Option<NaiveDate>,
}

impl WorkItemResult {
    /// Employee cost burned while the item is delayed, 0 when not configured.
    pub fn total_delay_cost(&self) -> f64 {
        self.employee
            .costs()
            .map_or(0.0, |costs| costs.total_delay_cost)
    }

    pub fn total_economic_impact(&self) -> f64 {
        self.cost_of_delay.total_cost_of_delay + self.total_delay_cost()
    }

    pub fn team_size(&self) -> Option<f64> {
        self.employee.costs().map(|costs| costs.team_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_parse_from_wire_names() {
        for profile in UrgencyProfile::ALL {
            assert_eq!(profile.as_str().parse::<UrgencyProfile>(), Ok(profile));
        }
        assert_eq!(
            "fixed-date".parse::<UrgencyProfile>(),
            Ok(UrgencyProfile::FixedDate)
        );
    }

    #[test]
    fn unknown_profile_names_value_and_options() {
        let err = "urgent!!".parse::<UrgencyProfile>().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("'urgent!!'"), "{message}");
        for name in ["standard", "expedite", "fixed-date", "intangible"] {
            assert!(message.contains(name), "{message} should list {name}");
        }
    }

    #[test]
    fn profile_serializes_kebab_case() {
        let json = serde_json::to_string(&UrgencyProfile::FixedDate).unwrap();
        assert_eq!(json, "\"fixed-date\"");
    }

    #[test]
    fn not_configured_employee_costs_serialize_to_flag_only() {
        let value = serde_json::to_value(EmployeeCostResult::not_configured()).unwrap();
        assert_eq!(value, serde_json::json!({ "hasEmployeeCosts": false }));
    }
}
