use crate::error::InvalidArgument;
use crate::models::{CostOfDelayResult, UrgencyProfile, WorkItemInput};
use crate::urgency;

pub const WEEKS_PER_YEAR: f64 = 52.0;

pub use crate::urgency::MAX_DELAY_WEEKS;

impl WorkItemInput {
    pub fn validate(&self) -> Result<(), InvalidArgument> {
        check_scalar("weeklyValue", self.weekly_value)?;
        check_scalar("developmentWeeks", self.development_weeks)?;
        check_delay_weeks(self.delay_weeks)?;

        if self.development_weeks == 0.0 {
            return Err(InvalidArgument::ZeroDevelopmentWeeks);
        }

        Ok(())
    }
}

/// Rejects NaN, infinities and negative values.
pub fn check_scalar(field: &'static str, value: f64) -> Result<(), InvalidArgument> {
    if !value.is_finite() {
        return Err(InvalidArgument::NotFinite { field });
    }
    if value < 0.0 {
        return Err(InvalidArgument::Negative { field, value });
    }
    Ok(())
}

/// [`check_scalar`] plus the [`MAX_DELAY_WEEKS`] ceiling.
pub fn check_delay_weeks(value: f64) -> Result<(), InvalidArgument> {
    let field = "delayWeeks";
    check_scalar(field, value)?;
    if value > MAX_DELAY_WEEKS {
        return Err(InvalidArgument::TooLarge {
            field,
            max: MAX_DELAY_WEEKS,
            value,
        });
    }
    Ok(())
}

/// Validates the profile name and scalars, then computes the cost-of-delay metrics.
pub fn calculate_cost_of_delay(
    weekly_value: f64,
    development_weeks: f64,
    delay_weeks: f64,
    urgency_profile: &str,
) -> Result<CostOfDelayResult, InvalidArgument> {
    let urgency_profile: UrgencyProfile = urgency_profile.parse()?;
    cost_of_delay(&WorkItemInput {
        weekly_value,
        development_weeks,
        delay_weeks,
        urgency_profile,
    })
}

pub fn cost_of_delay(input: &WorkItemInput) -> Result<CostOfDelayResult, InvalidArgument> {
    input.validate()?;

    let breakdown = urgency::compute_losses(
        input.urgency_profile,
        input.weekly_value,
        input.delay_weeks,
    );

    let cd3 = breakdown.total_cost_of_delay / input.development_weeks;
    let total_project_value = input.weekly_value * WEEKS_PER_YEAR;
    let opportunity_cost = (total_project_value > 0.0)
        .then(|| breakdown.total_cost_of_delay / total_project_value * 100.0);

    Ok(CostOfDelayResult {
        total_cost_of_delay: breakdown.total_cost_of_delay,
        cd3,
        peak_weekly_loss: breakdown.peak_weekly_loss,
        weekly_losses: breakdown.weekly_losses,
        opportunity_cost,
        weekly_value: input.weekly_value,
        development_weeks: input.development_weeks,
        delay_weeks: input.delay_weeks,
        urgency_profile: input.urgency_profile,
        normal_payback_weeks: input.development_weeks,
        delayed_payback_weeks: input.development_weeks + input.delay_weeks,
        additional_payback_time: input.delay_weeks,
        total_project_value,
    })
}
