use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::delay;
use crate::employee::{self, DEFAULT_BENEFITS_MULTIPLIER};
use crate::error::InvalidArgument;
use crate::models::{EmployeeCostInput, EmployeeCostResult, WorkItemInput, WorkItemResult};

pub const UNNAMED_PROJECT: &str = "Unnamed Project";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SalaryBasis {
    #[default]
    Annual,
    Hourly,
}

/// Raw form values for one work item, as entered and as saved.
///
/// Saved result records carry the same camelCase keys, so they deserialize into this type too;
/// that is how stale records get re-evaluated on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInputs {
    #[serde(default)]
    pub project_name: String,
    pub weekly_value: f64,
    pub development_weeks: f64,
    pub delay_weeks: f64,
    pub urgency_profile: String,
    #[serde(default)]
    pub salary_type: SalaryBasis,
    #[serde(default)]
    pub annual_salary: f64,
    #[serde(default)]
    pub hourly_rate: f64,
    #[serde(default)]
    pub team_size: f64,
    #[serde(default = "default_benefits_multiplier")]
    pub benefits_multiplier: f64,
    #[serde(default)]
    pub target_launch_date: Option<NaiveDate>,
    #[serde(default)]
    pub revised_launch_date: Option<NaiveDate>,
}

fn default_benefits_multiplier() -> f64 {
    DEFAULT_BENEFITS_MULTIPLIER
}

impl ProjectInputs {
    pub fn project_name(&self) -> &str {
        let name = self.project_name.trim();
        if name.is_empty() {
            UNNAMED_PROJECT
        } else {
            name
        }
    }

    /// Parses the urgency profile; scalar validation happens in the aggregator.
    pub fn work_item(&self) -> Result<WorkItemInput, InvalidArgument> {
        Ok(WorkItemInput {
            weekly_value: self.weekly_value,
            development_weeks: self.development_weeks,
            delay_weeks: self.delay_weeks,
            urgency_profile: self.urgency_profile.trim().parse()?,
        })
    }

    pub fn staffing(&self) -> EmployeeCostInput {
        let annual_salary = match self.salary_type {
            SalaryBasis::Annual => self.annual_salary,
            SalaryBasis::Hourly => employee::annual_salary_from_hourly(self.hourly_rate),
        };
        let benefits_multiplier = if self.benefits_multiplier > 0.0 {
            self.benefits_multiplier
        } else {
            DEFAULT_BENEFITS_MULTIPLIER
        };

        EmployeeCostInput {
            annual_salary,
            team_size: self.team_size,
            benefits_multiplier,
        }
    }

    pub fn evaluate(&self) -> Result<WorkItemResult, InvalidArgument> {
        let item = self.work_item()?;
        let mut result = evaluate(self.project_name(), &item, Some(&self.staffing()))?;
        result.target_launch_date = self.target_launch_date;
        result.revised_launch_date = self.revised_launch_date;
        Ok(result)
    }
}

/// Runs both models on one work item and merges their records.
pub fn evaluate(
    project_name: &str,
    item: &WorkItemInput,
    staffing: Option<&EmployeeCostInput>,
) -> Result<WorkItemResult, InvalidArgument> {
    let cost_of_delay = delay::cost_of_delay(item)?;
    let employee = match staffing {
        Some(staffing) => employee::employee_costs(item, staffing),
        None => EmployeeCostResult::not_configured(),
    };

    Ok(WorkItemResult {
        project_name: project_name.to_string(),
        cost_of_delay,
        employee,
        target_launch_date: None,
        revised_launch_date: None,
    })
}
