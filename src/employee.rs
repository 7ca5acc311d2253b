use crate::delay::WEEKS_PER_YEAR;
use crate::models::{EmployeeCostInput, EmployeeCostResult, EmployeeCosts, WorkItemInput};

pub const WORK_HOURS_PER_YEAR: f64 = 2080.0;
pub const HOURS_PER_DAY: f64 = 8.0;
pub const DEFAULT_BENEFITS_MULTIPLIER: f64 = 1.5;

pub fn annual_salary_from_hourly(hourly_rate: f64) -> f64 {
    hourly_rate * WORK_HOURS_PER_YEAR
}

/// Team burn-rate figures for the given work item.
pub fn employee_costs(item: &WorkItemInput, staffing: &EmployeeCostInput) -> EmployeeCostResult {
    calculate_employee_costs(
        staffing.annual_salary,
        staffing.team_size,
        staffing.benefits_multiplier,
        item.development_weeks,
        item.delay_weeks,
    )
}

/// Converts salary and team inputs into hourly, daily, weekly and project-level costs.
///
/// Returns [`EmployeeCostResult::not_configured`] unless both salary and team size are
/// positive.
pub fn calculate_employee_costs(
    annual_salary: f64,
    team_size: f64,
    benefits_multiplier: f64,
    development_weeks: f64,
    delay_weeks: f64,
) -> EmployeeCostResult {
    if !(annual_salary > 0.0 && team_size > 0.0) {
        return EmployeeCostResult::not_configured();
    }

    let true_cost_per_person = annual_salary * benefits_multiplier;
    let hourly_rate = true_cost_per_person / WORK_HOURS_PER_YEAR;
    let daily_rate = hourly_rate * HOURS_PER_DAY;
    let weekly_rate = true_cost_per_person / WEEKS_PER_YEAR;

    let team_daily_cost = daily_rate * team_size;
    let team_weekly_cost = weekly_rate * team_size;

    let total_development_cost = team_weekly_cost * development_weeks;
    let total_delay_cost = team_weekly_cost * delay_weeks;

    EmployeeCostResult::configured(EmployeeCosts {
        annual_salary,
        team_size,
        benefits_multiplier,
        true_cost_per_person,
        hourly_rate,
        daily_rate,
        weekly_rate,
        team_daily_cost,
        team_weekly_cost,
        total_development_cost,
        total_delay_cost,
        total_project_cost: total_development_cost + total_delay_cost,
        cost_per_week_delay: team_weekly_cost,
    })
}
