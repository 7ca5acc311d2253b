use std::fmt::Write;

use chrono::{DateTime, Utc};

use crate::comparison::ComparisonSet;
use crate::executive;
use crate::format;
use crate::models::{UrgencyProfile, WorkItemResult};
use crate::urgency;

pub(crate) const WEEKS_PER_MONTH: f64 = 4.33;
pub(crate) const PORTFOLIO_PRIORITY_CD3: f64 = 50_000.0;

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileSummary {
    pub urgency_profile: UrgencyProfile,
    pub count: usize,
    pub avg_cd3: f64,
}

pub fn summarize_by_profile(projects: &[WorkItemResult]) -> Vec<ProfileSummary> {
    let mut map: std::collections::HashMap<UrgencyProfile, (usize, f64)> =
        std::collections::HashMap::new();

    for project in projects {
        let entry = map
            .entry(project.cost_of_delay.urgency_profile)
            .or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += project.cost_of_delay.cd3;
    }

    let mut summaries: Vec<ProfileSummary> = map
        .into_iter()
        .map(|(urgency_profile, (count, total_cd3))| ProfileSummary {
            urgency_profile,
            count,
            avg_cd3: if count == 0 {
                0.0
            } else {
                total_cd3 / count as f64
            },
        })
        .collect();

    summaries.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.urgency_profile.as_str().cmp(b.urgency_profile.as_str()))
    });
    summaries
}

pub fn recommendations(result: &WorkItemResult) -> Vec<&'static str> {
    let mut recs = vec!["Prioritize based on CD3 to maximize value recovered per week."];

    match result.cost_of_delay.urgency_profile {
        UrgencyProfile::Expedite => {
            recs.push("Expedite: consider immediate resource allocation or scope reduction.")
        }
        UrgencyProfile::FixedDate => {
            recs.push("Fixed-date: identify critical-path dependencies and negotiate deadlines.")
        }
        UrgencyProfile::Standard | UrgencyProfile::Intangible => {}
    }
    if result.employee.has_employee_costs() {
        recs.push("Evaluate reallocation or temporary scaling to reduce delay weeks.");
    }
    recs.push("Consider incremental delivery to capture partial value earlier.");

    if result.cost_of_delay.cd3 > PORTFOLIO_PRIORITY_CD3 {
        recs.push("This high CD3 indicates this should be a portfolio priority.");
    } else {
        recs.push("Compare this CD3 to other initiatives to optimize portfolio allocation.");
    }

    recs
}

pub fn build_report(
    result: &WorkItemResult,
    comparison: &ComparisonSet,
    generated_at: DateTime<Utc>,
) -> String {
    let cod = &result.cost_of_delay;
    let mut output = String::new();

    let _ = writeln!(output, "# Cost of Delay Report: {}", result.project_name);
    let _ = writeln!(
        output,
        "Generated {} ({} dev, {} delay, {:.1} months)",
        generated_at.format("%Y-%m-%d %H:%M UTC"),
        format::weeks(cod.development_weeks),
        format::weeks(cod.delay_weeks),
        cod.delay_weeks / WEEKS_PER_MONTH
    );
    if let Some(target) = result.target_launch_date {
        let _ = write!(output, "Target launch {target}");
        match result.revised_launch_date {
            Some(revised) => {
                let _ = writeln!(output, ", revised to {revised}");
            }
            None => {
                let _ = writeln!(output);
            }
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Key Metrics");
    let _ = writeln!(output, "- Urgency profile: {}", cod.urgency_profile);
    let _ = writeln!(
        output,
        "- Total cost of delay: {}",
        format::currency(cod.total_cost_of_delay)
    );
    let _ = writeln!(output, "- CD3: {}/wk", format::currency(cod.cd3));
    let _ = writeln!(
        output,
        "- Peak weekly loss: {}",
        format::currency(cod.peak_weekly_loss)
    );
    let _ = writeln!(
        output,
        "- Opportunity cost: {} of annual value ({})",
        format::percent(cod.opportunity_cost, 1),
        format::currency(cod.total_project_value)
    );
    let _ = writeln!(
        output,
        "- Payback: {} planned, {} with delay",
        format::weeks(cod.normal_payback_weeks),
        format::weeks(cod.delayed_payback_weeks)
    );
    let _ = writeln!(
        output,
        "- Total economic impact: {}",
        format::currency(result.total_economic_impact())
    );

    let _ = writeln!(output);
    let _ = writeln!(output, "## Team Burn");
    match result.employee.costs() {
        Some(costs) => {
            let _ = writeln!(
                output,
                "- {} people at {} loaded cost each ({}x benefits)",
                costs.team_size,
                format::currency(costs.true_cost_per_person),
                costs.benefits_multiplier
            );
            let _ = writeln!(
                output,
                "- Rates per person: {}/hr, {}/day, {}/wk",
                format::currency_detailed(costs.hourly_rate),
                format::currency_detailed(costs.daily_rate),
                format::currency(costs.weekly_rate)
            );
            let _ = writeln!(
                output,
                "- Team burn: {}/day, {}/wk",
                format::currency(costs.team_daily_cost),
                format::currency(costs.team_weekly_cost)
            );
            let _ = writeln!(
                output,
                "- Development cost {}, delay cost {}, total {}",
                format::currency(costs.total_development_cost),
                format::currency(costs.total_delay_cost),
                format::currency(costs.total_project_cost)
            );
            let _ = writeln!(
                output,
                "- Person-weeks spent waiting: {}",
                cod.delay_weeks * costs.team_size
            );
        }
        None => {
            let _ = writeln!(
                output,
                "Team costs not entered. Provide salary and team size to include burn rate."
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Cost Accumulation");
    let curve = urgency::loss_curve(&cod.weekly_losses);
    if curve.is_empty() {
        let _ = writeln!(output, "No whole weeks of delay to chart.");
    } else {
        let _ = writeln!(output, "| Week | Weekly Loss | Cumulative |");
        let _ = writeln!(output, "|---:|---:|---:|");
        for point in curve {
            let _ = writeln!(
                output,
                "| {} | {} | {} |",
                point.week,
                format::currency(point.loss),
                format::currency(point.cumulative)
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Recommendations");
    for rec in recommendations(result) {
        let _ = writeln!(output, "- {rec}");
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Executive Perspectives");
    for perspective in executive::perspectives(result) {
        let _ = writeln!(output);
        let _ = writeln!(output, "### {}", perspective.role);
        let _ = writeln!(output, "{}", perspective.summary);
        for point in &perspective.points {
            let _ = writeln!(output, "- {point}");
        }
        let _ = writeln!(output, "**Recommendation:** {}", perspective.recommendation);
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Urgency Mix");
    let summaries = summarize_by_profile(comparison.projects());
    if summaries.is_empty() {
        let _ = writeln!(output, "No projects in comparison.");
    } else {
        for summary in summaries.iter() {
            let _ = writeln!(
                output,
                "- {}: {} projects (avg CD3 {}/wk)",
                summary.urgency_profile,
                summary.count,
                format::currency(summary.avg_cd3)
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Portfolio Ranking");
    let ranked = comparison.ranked();
    if ranked.is_empty() {
        let _ = writeln!(output, "No projects in comparison.");
    } else {
        for (rank, project) in ranked.iter().take(10).enumerate() {
            let _ = writeln!(
                output,
                "{}. {} CD3 {}/wk, cost of delay {}, total impact {}",
                rank + 1,
                project.project_name,
                format::currency(project.cost_of_delay.cd3),
                format::currency(project.cost_of_delay.total_cost_of_delay),
                format::currency(project.total_economic_impact())
            );
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluate::tests::sample_inputs;
    use chrono::TimeZone;

    fn generated_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 1, 9, 30, 0).unwrap()
    }

    #[test]
    fn recommendations_follow_profile_and_staffing() {
        let fixed = sample_inputs("Fixed", 100_000.0, "fixed-date")
            .evaluate()
            .unwrap();
        assert_eq!(
            recommendations(&fixed),
            vec![
                "Prioritize based on CD3 to maximize value recovered per week.",
                "Fixed-date: identify critical-path dependencies and negotiate deadlines.",
                "Evaluate reallocation or temporary scaling to reduce delay weeks.",
                "Consider incremental delivery to capture partial value earlier.",
                "Compare this CD3 to other initiatives to optimize portfolio allocation.",
            ]
        );

        let mut solo = sample_inputs("Solo", 200_000.0, "standard");
        solo.team_size = 0.0;
        let recs = recommendations(&solo.evaluate().unwrap());
        assert_eq!(recs.len(), 3);
        assert_eq!(
            recs[2],
            "This high CD3 indicates this should be a portfolio priority."
        );
    }

    #[test]
    fn summary_groups_by_profile() {
        let projects = vec![
            sample_inputs("A", 1000.0, "standard").evaluate().unwrap(),
            sample_inputs("B", 3000.0, "standard").evaluate().unwrap(),
            sample_inputs("C", 1000.0, "expedite").evaluate().unwrap(),
        ];
        let summaries = summarize_by_profile(&projects);
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].urgency_profile, UrgencyProfile::Standard);
        assert_eq!(summaries[0].count, 2);
        assert_eq!(summaries[0].avg_cd3, 800.0);
        assert_eq!(summaries[1].urgency_profile, UrgencyProfile::Expedite);
    }

    #[test]
    fn report_covers_metrics_curve_and_ranking() {
        let current = sample_inputs("Checkout", 100_000.0, "standard")
            .evaluate()
            .unwrap();
        let comparison = ComparisonSet::from_projects([
            sample_inputs("Search", 5_000.0, "expedite").evaluate().unwrap(),
            current.clone(),
        ]);

        let report = build_report(&current, &comparison, generated_at());

        assert!(report.starts_with("# Cost of Delay Report: Checkout\n"));
        assert!(report.contains("Generated 2026-02-01 09:30 UTC (10w dev, 4w delay, 0.9 months)"));
        assert!(report.contains("- Total cost of delay: $400,000"));
        assert!(report.contains("- CD3: $40,000/wk"));
        assert!(report.contains("- Opportunity cost: 7.7% of annual value ($5,200,000)"));
        assert!(report.contains("- Total economic impact: $469,231"));
        assert!(report.contains("- Rates per person: $86.54/hr, $692.31/day, $3,462/wk"));
        assert!(report.contains("| 4 | $100,000 | $400,000 |"));
        assert!(report.contains("## Executive Perspectives\n\n### CEO\n"));
        assert!(report.contains(
            "### COO\nThis 4-week delay is costing $40,000 per week in economic value."
        ));
        assert!(report.contains("**Recommendation:** Prioritize technical impediments"));
        assert!(report.contains("1. Checkout CD3 $40,000/wk"));
        assert!(report.contains("2. Search CD3"));
    }

    #[test]
    fn report_handles_missing_team_and_comparison() {
        let mut inputs = sample_inputs("Quiet", 0.0, "intangible");
        inputs.team_size = 0.0;
        inputs.delay_weeks = 0.0;
        let result = inputs.evaluate().unwrap();

        let report = build_report(&result, &ComparisonSet::default(), generated_at());

        assert!(report.contains("Team costs not entered."));
        assert!(report.contains("No whole weeks of delay to chart."));
        assert!(report.contains("- Opportunity cost: N/A of annual value ($0)"));
        assert!(report.contains("## Portfolio Ranking\nNo projects in comparison."));
    }
}
