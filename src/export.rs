use std::io::Write;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::comparison::ComparisonSet;
use crate::models::WorkItemResult;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonExport<'a> {
    export_date: DateTime<Utc>,
    project: &'a WorkItemResult,
    comparison: Vec<&'a WorkItemResult>,
}

#[derive(Serialize)]
struct CsvRow<'a> {
    #[serde(rename = "Rank")]
    rank: usize,
    #[serde(rename = "Project Name")]
    project_name: &'a str,
    #[serde(rename = "CD3 ($/week)")]
    cd3: String,
    #[serde(rename = "Total Cost of Delay")]
    total_cost_of_delay: String,
    #[serde(rename = "Employee Cost During Delay")]
    employee_cost: String,
    #[serde(rename = "Total Economic Impact")]
    total_impact: String,
    #[serde(rename = "Development Time (weeks)")]
    development_weeks: String,
    #[serde(rename = "Delay Period (weeks)")]
    delay_weeks: String,
    #[serde(rename = "Team Size")]
    team_size: String,
    #[serde(rename = "Weekly Value")]
    weekly_value: String,
    #[serde(rename = "Urgency Profile")]
    urgency_profile: &'static str,
    #[serde(rename = "Opportunity Cost %")]
    opportunity_cost: String,
}

/// The current result plus the comparison set (ranked by CD3) as pretty JSON.
pub fn to_json(
    current: &WorkItemResult,
    comparison: &ComparisonSet,
    exported_at: DateTime<Utc>,
) -> anyhow::Result<String> {
    let export = JsonExport {
        export_date: exported_at,
        project: current,
        comparison: comparison.ranked(),
    };
    Ok(serde_json::to_string_pretty(&export)?)
}

/// Writes one CSV row per project, in the given order, ranked from 1.
pub fn write_csv<W: Write>(writer: W, projects: &[&WorkItemResult]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_writer(writer);

    for (index, project) in projects.iter().enumerate() {
        let cod = &project.cost_of_delay;
        writer.serialize(CsvRow {
            rank: index + 1,
            project_name: &project.project_name,
            cd3: format!("{:.2}", cod.cd3),
            total_cost_of_delay: format!("{:.2}", cod.total_cost_of_delay),
            employee_cost: format!("{:.2}", project.total_delay_cost()),
            total_impact: format!("{:.2}", project.total_economic_impact()),
            development_weeks: cod.development_weeks.to_string(),
            delay_weeks: cod.delay_weeks.to_string(),
            team_size: project
                .team_size()
                .map_or_else(|| "N/A".to_string(), |size| size.to_string()),
            weekly_value: format!("{:.2}", cod.weekly_value),
            urgency_profile: cod.urgency_profile.as_str(),
            opportunity_cost: cod
                .opportunity_cost
                .map_or_else(|| "N/A".to_string(), |cost| format!("{cost:.2}")),
        })?;
    }

    writer.flush()?;
    Ok(())
}

pub fn to_csv(projects: &[&WorkItemResult]) -> anyhow::Result<String> {
    let mut buffer = Vec::new();
    write_csv(&mut buffer, projects)?;
    Ok(String::from_utf8(buffer)?)
}

pub fn json_file_name(project_name: &str, at: DateTime<Utc>) -> String {
    format!(
        "cost-of-delay-{}-{}.json",
        dashed(project_name),
        at.timestamp_millis()
    )
}

pub fn csv_file_name(at: DateTime<Utc>) -> String {
    format!("cost-of-delay-analysis-{}.csv", at.timestamp_millis())
}

pub fn report_file_name(project_name: &str, at: DateTime<Utc>) -> String {
    format!(
        "cost-of-delay-report-{}-{}.md",
        dashed(project_name),
        at.timestamp_millis()
    )
}

pub fn executive_file_name(project_name: &str, at: DateTime<Utc>) -> String {
    format!(
        "executive-analysis-{}-{}.txt",
        dashed(project_name),
        at.timestamp_millis()
    )
}

fn dashed(project_name: &str) -> String {
    let dashed = project_name.split_whitespace().collect::<Vec<_>>().join("-");
    if dashed.is_empty() {
        "export".to_string()
    } else {
        dashed
    }
}
