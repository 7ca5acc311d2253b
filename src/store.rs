use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::comparison::ComparisonSet;
use crate::evaluate::ProjectInputs;
use crate::models::WorkItemResult;
use crate::session::Session;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SaveFileOut<'a> {
    saved_date: DateTime<Utc>,
    inputs: Option<&'a ProjectInputs>,
    project_data: Option<&'a WorkItemResult>,
    comparison_projects: &'a ComparisonSet,
}

/// Only the raw inputs of a save file are read back; computed fields are recomputed.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SaveFileIn {
    #[serde(default)]
    saved_date: Option<DateTime<Utc>>,
    #[serde(default)]
    inputs: Option<ProjectInputs>,
    #[serde(default)]
    project_data: Option<ProjectInputs>,
    #[serde(default)]
    comparison_projects: Vec<ProjectInputs>,
}

pub fn to_json(session: &Session, saved_at: DateTime<Utc>) -> anyhow::Result<String> {
    let file = SaveFileOut {
        saved_date: saved_at,
        inputs: session.inputs.as_ref(),
        project_data: session.current.as_ref(),
        comparison_projects: &session.comparison,
    };
    Ok(serde_json::to_string_pretty(&file)?)
}

/// Rebuilds a session from save-file JSON, re-evaluating every work item.
pub fn from_json(json: &str) -> anyhow::Result<Session> {
    let file: SaveFileIn =
        serde_json::from_str(json).context("not a valid Cost of Delay save file")?;

    if let Some(saved_date) = file.saved_date {
        debug!(%saved_date, "restoring saved session");
    }

    let inputs = file.inputs.or(file.project_data);
    let current = inputs
        .as_ref()
        .map(|inputs| {
            inputs
                .evaluate()
                .with_context(|| format!("failed to recalculate \"{}\"", inputs.project_name()))
        })
        .transpose()?;

    let mut projects = Vec::with_capacity(file.comparison_projects.len());
    for project in &file.comparison_projects {
        let result = project.evaluate().with_context(|| {
            format!(
                "failed to recalculate comparison project \"{}\"",
                project.project_name()
            )
        })?;
        projects.push(result);
    }

    Ok(Session {
        inputs,
        current,
        comparison: ComparisonSet::from_projects(projects),
    })
}

pub fn save(path: &Path, session: &Session) -> anyhow::Result<()> {
    let json = to_json(session, Utc::now())?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write session file {}", path.display()))?;
    info!(path = %path.display(), projects = session.comparison.len(), "session saved");
    Ok(())
}

pub fn load(path: &Path) -> anyhow::Result<Session> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read session file {}", path.display()))?;
    let session =
        from_json(&json).with_context(|| format!("failed to load {}", path.display()))?;
    info!(
        path = %path.display(),
        current = session.current.is_some(),
        projects = session.comparison.len(),
        "session loaded and recalculated"
    );
    Ok(session)
}

/// Loads the session file, or starts an empty session when it does not exist yet.
pub fn load_or_default(path: &Path) -> anyhow::Result<Session> {
    if path.exists() {
        load(path)
    } else {
        debug!(path = %path.display(), "no session file, starting empty");
        Ok(Session::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluate::tests::sample_inputs;

    fn populated_session() -> Session {
        let mut session = Session::default();
        session
            .calculate(sample_inputs("Alpha", 100_000.0, "standard"))
            .unwrap();
        session.compare_current();
        session
            .calculate(sample_inputs("Beta", 20_000.0, "expedite"))
            .unwrap();
        session.compare_current();
        session
    }

    #[test]
    fn session_round_trips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let session = populated_session();

        save(&path, &session).unwrap();
        let restored = load(&path).unwrap();

        assert_eq!(restored, session);
    }

    #[test]
    fn save_file_uses_camel_case_sections() {
        let json = to_json(&populated_session(), Utc::now()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["savedDate"].is_string());
        assert_eq!(value["inputs"]["projectName"], "Beta");
        assert_eq!(value["projectData"]["hasEmployeeCosts"], true);
        assert_eq!(value["comparisonProjects"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn stale_computed_fields_are_recalculated() {
        let json = r#"{
            "savedDate": "2026-01-15T10:00:00Z",
            "comparisonProjects": [{
                "projectName": "Legacy",
                "weeklyValue": 1000,
                "developmentWeeks": 5,
                "delayWeeks": 10,
                "urgencyProfile": "fixed-date",
                "totalCostOfDelay": 1,
                "cd3": 99999999,
                "hasEmployeeCosts": false
            }]
        }"#;

        let session = from_json(json).unwrap();
        assert!(session.current.is_none());
        let legacy = &session.comparison.projects()[0];
        assert_eq!(legacy.cost_of_delay.total_cost_of_delay, 9500.0);
        assert_eq!(legacy.cost_of_delay.cd3, 1900.0);
        assert!(!legacy.employee.has_employee_costs());
    }

    #[test]
    fn project_data_stands_in_for_missing_inputs() {
        let json = r#"{
            "projectData": {
                "projectName": "Only Result",
                "weeklyValue": 100000,
                "developmentWeeks": 10,
                "delayWeeks": 4,
                "urgencyProfile": "standard"
            }
        }"#;
        let session = from_json(json).unwrap();
        assert_eq!(session.current.unwrap().cost_of_delay.cd3, 40_000.0);
    }

    #[test]
    fn invalid_saved_inputs_are_reported() {
        let json = r#"{
            "inputs": {
                "projectName": "Broken",
                "weeklyValue": 10,
                "developmentWeeks": 0,
                "delayWeeks": 1,
                "urgencyProfile": "standard"
            }
        }"#;
        let err = from_json(json).unwrap_err();
        assert!(format!("{err:#}").contains("developmentWeeks must be greater than zero"));
    }

    #[test]
    fn missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let session = load_or_default(&dir.path().join("absent.json")).unwrap();
        assert_eq!(session, Session::default());
    }
}
