use crate::models::{LossBreakdown, UrgencyProfile};

/// Fraction of the delay after which a fixed-date item is past its deadline.
const DEADLINE_FRACTION: f64 = 0.7;
const PRE_DEADLINE_MULTIPLIER: f64 = 0.5;
const POST_DEADLINE_MULTIPLIER: f64 = 2.0;
const EXPEDITE_DECAY_RATE: f64 = 0.5;
const INTANGIBLE_BASE: f64 = 0.3;
const INTANGIBLE_SLOPE: f64 = 0.7;

/// Longest delay expanded week by week (about 200 years).
pub const MAX_DELAY_WEEKS: f64 = 10_000.0;

/// One point of the delay chart series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LossPoint {
    /// 1-based week number.
    pub week: usize,
    pub loss: f64,
    pub cumulative: f64,
}

impl UrgencyProfile {
    /// Value lost in week `week` (0-based) of a delay lasting `delay_weeks`.
    pub fn weekly_loss(self, weekly_value: f64, week: usize, delay_weeks: f64) -> f64 {
        let i = week as f64;
        match self {
            UrgencyProfile::Standard => weekly_value,
            UrgencyProfile::Expedite => {
                let span = if delay_weeks == 0.0 { 1.0 } else { delay_weeks };
                weekly_value * (-i / span * EXPEDITE_DECAY_RATE).exp()
            }
            UrgencyProfile::FixedDate => {
                if week < deadline_week(delay_weeks) {
                    weekly_value * PRE_DEADLINE_MULTIPLIER
                } else {
                    weekly_value * POST_DEADLINE_MULTIPLIER
                }
            }
            UrgencyProfile::Intangible => {
                weekly_value * (INTANGIBLE_BASE + (i / delay_weeks) * INTANGIBLE_SLOPE)
            }
        }
    }
}

/// Computes the weekly loss sequence for a delay and its totals.
///
/// Only whole weeks are iterated; a delay of 0 (or less) yields an empty sequence. At most
/// [`MAX_DELAY_WEEKS`] weeks are produced.
pub fn compute_losses(
    profile: UrgencyProfile,
    weekly_value: f64,
    delay_weeks: f64,
) -> LossBreakdown {
    let weekly_losses: Vec<f64> = (0..whole_weeks(delay_weeks))
        .map(|week| profile.weekly_loss(weekly_value, week, delay_weeks))
        .collect();
    let total_cost_of_delay: f64 = weekly_losses.iter().sum();

    let peak_weekly_loss = match profile {
        UrgencyProfile::Standard => weekly_value,
        UrgencyProfile::Expedite => weekly_losses.first().copied().unwrap_or(0.0),
        // the post-deadline rate, whether or not any week reached it
        UrgencyProfile::FixedDate => weekly_value * POST_DEADLINE_MULTIPLIER,
        UrgencyProfile::Intangible => weekly_losses.last().copied().unwrap_or(0.0),
    };

    LossBreakdown {
        weekly_losses,
        total_cost_of_delay,
        peak_weekly_loss,
    }
}

/// Per-week and running totals of a loss sequence, for charting.
pub fn loss_curve(weekly_losses: &[f64]) -> Vec<LossPoint> {
    weekly_losses
        .iter()
        .scan(0.0, |cumulative, &loss| {
            *cumulative += loss;
            Some((loss, *cumulative))
        })
        .enumerate()
        .map(|(index, (loss, cumulative))| LossPoint {
            week: index + 1,
            loss,
            cumulative,
        })
        .collect()
}

fn whole_weeks(delay_weeks: f64) -> usize {
    if delay_weeks.is_finite() && delay_weeks > 0.0 {
        delay_weeks.min(MAX_DELAY_WEEKS).floor() as usize
    } else {
        0
    }
}

fn deadline_week(delay_weeks: f64) -> usize {
    whole_weeks(delay_weeks * DEADLINE_FRACTION)
}
