//! Role-by-role narrative of a work item's delay, for leadership audiences.

use std::fmt::{self, Write};

use chrono::{DateTime, Utc};

use crate::format;
use crate::models::{UrgencyProfile, WorkItemResult};
use crate::report::{PORTFOLIO_PRIORITY_CD3, WEEKS_PER_MONTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Ceo,
    Cfo,
    Cmo,
    Cto,
    Coo,
}

impl Role {
    pub const ALL: [Role; 5] = [Role::Ceo, Role::Cfo, Role::Cmo, Role::Cto, Role::Coo];

    pub fn title(self) -> &'static str {
        match self {
            Role::Ceo => "CEO",
            Role::Cfo => "CFO",
            Role::Cmo => "CMO",
            Role::Cto => "CTO",
            Role::Coo => "COO",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Perspective {
    pub role: Role,
    pub summary: String,
    pub points: Vec<String>,
    pub recommendation: String,
}

/// One perspective per [`Role`], in [`Role::ALL`] order.
pub fn perspectives(result: &WorkItemResult) -> Vec<Perspective> {
    Role::ALL
        .into_iter()
        .map(|role| perspective(role, result))
        .collect()
}

pub fn perspective(role: Role, result: &WorkItemResult) -> Perspective {
    let cod = &result.cost_of_delay;
    let costs = result.employee.costs();
    let delay = cod.delay_weeks;
    let months = format!("{:.1}", delay / WEEKS_PER_MONTH);
    let weekly = format::currency(cod.weekly_value);
    let cd3 = format::currency(cod.cd3);
    let impact = format::currency(result.total_economic_impact());

    let (summary, points, recommendation) = match role {
        Role::Ceo => (
            format!(
                "{} has an estimated total economic impact of {impact} due to a {delay}-week delay.",
                result.project_name
            ),
            vec![format!(
                "The delay affects top-line growth and market timing. Each week recovered returns {weekly} in potential value."
            )],
            "Evaluate this initiative relative to portfolio CD3 values; accelerate or remove blockers for high-impact items.".to_string(),
        ),
        Role::Cfo => {
            let employee = match costs {
                Some(costs) => format!(
                    "{} in continued employee costs",
                    format::currency(costs.total_delay_cost)
                ),
                None => "additional employee costs not calculated".to_string(),
            };
            let mut points = vec![
                format!(
                    "Cash flow: the {months}-month delay postpones revenue recognition; each additional week costs {weekly} in unrealized value."
                ),
                format!(
                    "Direct cost of delay: {} in foregone revenue or cost savings.",
                    format::currency(cod.total_cost_of_delay)
                ),
                format!(
                    "Annual impact ratio: {} of projected annual value lost to this delay.",
                    format::percent(cod.opportunity_cost, 1)
                ),
                format!("Cost per week: {cd3} average weekly economic impact (CD3)."),
            ];
            match costs {
                Some(costs) => {
                    points.push(format!(
                        "Team burn rate: {} per week in employee costs during delay.",
                        format::currency(costs.team_weekly_cost)
                    ));
                    points.push(format!(
                        "ROI: the {}-week build requires {}; the delay adds {} to total cost.",
                        cod.development_weeks,
                        format::currency(costs.total_development_cost),
                        format::currency(costs.total_delay_cost)
                    ));
                }
                None => points.push(format!(
                    "ROI: the {}-week build cost is calculated once team size is provided.",
                    cod.development_weeks
                )),
            }
            let priority = if cod.cd3 > PORTFOLIO_PRIORITY_CD3 {
                "This high CD3 indicates this should be a portfolio priority."
            } else {
                "Compare this CD3 to other initiatives to optimize portfolio allocation."
            };
            (
                format!(
                    "This {delay}-week delay represents a total economic impact of {impact}, comprising {} in lost revenue/savings and {employee}.",
                    format::currency(cod.total_cost_of_delay)
                ),
                points,
                format!(
                    "Prioritize this initiative based on its CD3 value of {cd3} per week. Every week saved recovers {weekly} in value. {priority}"
                ),
            )
        }
        Role::Cmo => {
            let urgency = match cod.urgency_profile {
                UrgencyProfile::Expedite => {
                    "The expedite profile indicates rapidly declining value; immediate action is critical."
                }
                UrgencyProfile::FixedDate => {
                    "Missing the fixed deadline will result in severe market penalties."
                }
                UrgencyProfile::Standard | UrgencyProfile::Intangible => {
                    "Consistent execution builds brand trust and market momentum."
                }
            };
            (
                format!(
                    "A {delay}-week delay in delivering \"{}\" closes the market window at {weekly} per week in potential value.",
                    result.project_name
                ),
                vec![
                    format!("Competitors gain {months} months to capture market share."),
                    format!("Each week of delay lets competitors serve {weekly} worth of customer needs."),
                    "Missed commitments erode customer trust and raise churn risk.".to_string(),
                ],
                format!(
                    "Accelerate delivery to capture first-mover advantage. {urgency} Consider interim releases or an MVP to capture value sooner."
                ),
            )
        }
        Role::Cto => (
            format!(
                "Delay of {delay} weeks increases technical risk and may compound technical debt if rushed."
            ),
            vec![
                "Assess critical-path dependencies and technical blockers.".to_string(),
                "Consider scope reduction or parallelization to shorten delivery.".to_string(),
                "Protect quality; rushed work increases rework.".to_string(),
            ],
            "Prioritize technical impediments and enable the team with clear decisions and required resources.".to_string(),
        ),
        Role::Coo => {
            let (burn, points, savings) = match costs {
                Some(costs) => (
                    format!(
                        " The team of {} is burning {} per week during this delay.",
                        costs.team_size,
                        format::currency(costs.team_weekly_cost)
                    ),
                    vec![
                        format!(
                            "Team composition: {} full-time equivalents.",
                            costs.team_size
                        ),
                        format!(
                            "True cost per FTE: {} annually ({}x loaded cost).",
                            format::currency(costs.true_cost_per_person),
                            costs.benefits_multiplier
                        ),
                        format!(
                            "Daily burn rate: {} per day in team costs.",
                            format::currency(costs.team_daily_cost)
                        ),
                        format!(
                            "Delay cost: {} spent on a team that is not delivering value.",
                            format::currency(costs.total_delay_cost)
                        ),
                        format!(
                            "Productivity loss: {} person-weeks unproductively allocated.",
                            delay * costs.team_size
                        ),
                    ],
                    format!(
                        "{} in team costs",
                        format::currency(costs.team_weekly_cost)
                    ),
                ),
                None => (
                    String::new(),
                    vec!["Team resource costs have not been entered; add team size and salary to size the burn.".to_string()],
                    "reduces resource burn".to_string(),
                ),
            };
            (
                format!("This {delay}-week delay is costing {cd3} per week in economic value.{burn}"),
                points,
                format!(
                    "With a CD3 of {cd3}, prioritize using Weighted Shortest Job First: limit work in progress and clear approval bottlenecks. Each week saved recovers {weekly} in value and {savings}."
                ),
            )
        }
    };

    Perspective {
        role,
        summary,
        points,
        recommendation,
    }
}

/// Plain-text analysis with every role's perspective.
pub fn build_executive_analysis(result: &WorkItemResult, generated_at: DateTime<Utc>) -> String {
    let mut output = String::new();

    let _ = writeln!(
        output,
        "Executive Analysis - {}",
        generated_at.format("%Y-%m-%d %H:%M UTC")
    );
    let _ = writeln!(output, "Project: {}", result.project_name);

    for perspective in perspectives(result) {
        let _ = writeln!(output);
        let _ = writeln!(output, "{} Perspective:", perspective.role);
        let _ = writeln!(output, "{}", perspective.summary);
        for point in &perspective.points {
            let _ = writeln!(output, "- {point}");
        }
        let _ = writeln!(
            output,
            "{} Recommendation: {}",
            perspective.role, perspective.recommendation
        );
    }

    output
}
