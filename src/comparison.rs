use std::cmp::Ordering;
use std::collections::HashSet;

use serde::Serialize;

use crate::models::WorkItemResult;

/// Outcome of adding a work item to the comparison set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Added,
    Replaced,
}

/// Work items being compared, unique by project name, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ComparisonSet {
    projects: Vec<WorkItemResult>,
}

impl ComparisonSet {
    pub fn from_projects(projects: impl IntoIterator<Item = WorkItemResult>) -> Self {
        let mut set = Self::default();
        for project in projects {
            set.upsert(project);
        }
        set
    }

    /// Adds the result, replacing any entry with the same project name.
    pub fn upsert(&mut self, result: WorkItemResult) -> Upsert {
        match self
            .projects
            .iter_mut()
            .find(|project| project.project_name == result.project_name)
        {
            Some(existing) => {
                *existing = result;
                Upsert::Replaced
            }
            None => {
                self.projects.push(result);
                Upsert::Added
            }
        }
    }

    pub fn remove(&mut self, project_name: &str) -> bool {
        let before = self.projects.len();
        self.projects
            .retain(|project| project.project_name != project_name);
        self.projects.len() != before
    }

    /// Removes every project and returns how many there were.
    pub fn clear(&mut self) -> usize {
        let removed = self.projects.len();
        self.projects.clear();
        removed
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn projects(&self) -> &[WorkItemResult] {
        &self.projects
    }

    /// Projects by CD3, highest first.
    pub fn ranked(&self) -> Vec<&WorkItemResult> {
        let mut ranked: Vec<&WorkItemResult> = self.projects.iter().collect();
        rank_by_cd3(&mut ranked);
        ranked
    }
}

/// Sorts by CD3 descending; the sort is stable so ties keep their order.
pub fn rank_by_cd3(projects: &mut [&WorkItemResult]) {
    projects.sort_by(|a, b| {
        b.cost_of_delay
            .cd3
            .partial_cmp(&a.cost_of_delay.cd3)
            .unwrap_or(Ordering::Equal)
    });
}

/// Projects an export should cover: the comparison set when it has entries, otherwise the
/// current result. Identical records are dropped and the rest ranked by CD3.
pub fn export_selection<'a>(
    current: Option<&'a WorkItemResult>,
    comparison: &'a ComparisonSet,
) -> Vec<&'a WorkItemResult> {
    let source: Vec<&WorkItemResult> = if comparison.is_empty() {
        current.into_iter().collect()
    } else {
        comparison.projects.iter().collect()
    };

    let mut seen = HashSet::new();
    let mut selection: Vec<&WorkItemResult> = source
        .into_iter()
        .filter(|project| seen.insert(dedup_key(project)))
        .collect();
    rank_by_cd3(&mut selection);
    selection
}

fn dedup_key(project: &WorkItemResult) -> String {
    let cod = &project.cost_of_delay;
    format!(
        "{}|{}|{}|{}|{}|{}|{}|{}|{}|{:?}",
        project.project_name,
        cod.cd3,
        cod.total_cost_of_delay,
        project.total_delay_cost(),
        cod.development_weeks,
        cod.delay_weeks,
        project.team_size().unwrap_or(0.0),
        cod.weekly_value,
        cod.urgency_profile,
        cod.opportunity_cost,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluate::tests::sample_inputs;

    fn result(name: &str, weekly_value: f64) -> WorkItemResult {
        sample_inputs(name, weekly_value, "standard")
            .evaluate()
            .unwrap()
    }

    #[test]
    fn upsert_replaces_by_name() {
        let mut set = ComparisonSet::default();
        assert_eq!(set.upsert(result("Alpha", 1000.0)), Upsert::Added);
        assert_eq!(set.upsert(result("Beta", 2000.0)), Upsert::Added);
        assert_eq!(set.upsert(result("Alpha", 5000.0)), Upsert::Replaced);

        assert_eq!(set.len(), 2);
        assert_eq!(set.projects()[0].project_name, "Alpha");
        assert_eq!(set.projects()[0].cost_of_delay.weekly_value, 5000.0);
    }

    #[test]
    fn ranks_by_cd3_descending() {
        let set = ComparisonSet::from_projects([
            result("Low", 100.0),
            result("High", 9000.0),
            result("Mid", 3000.0),
        ]);
        let names: Vec<&str> = set
            .ranked()
            .iter()
            .map(|project| project.project_name.as_str())
            .collect();
        assert_eq!(names, vec!["High", "Mid", "Low"]);
    }

    #[test]
    fn remove_and_clear() {
        let mut set = ComparisonSet::from_projects([result("A", 1.0), result("B", 2.0)]);
        assert!(set.remove("A"));
        assert!(!set.remove("A"));
        assert_eq!(set.len(), 1);
        assert_eq!(set.clear(), 1);
        assert!(set.is_empty());
    }

    #[test]
    fn export_selection_falls_back_to_current() {
        let current = result("Only", 100.0);
        let empty = ComparisonSet::default();
        let selection = export_selection(Some(&current), &empty);
        assert_eq!(selection.len(), 1);
        assert_eq!(selection[0].project_name, "Only");

        assert!(export_selection(None, &empty).is_empty());
    }

    #[test]
    fn export_selection_prefers_comparison_and_ranks() {
        let current = result("Current", 100_000.0);
        let set = ComparisonSet::from_projects([result("Small", 10.0), result("Big", 500.0)]);
        let selection = export_selection(Some(&current), &set);
        let names: Vec<&str> = selection
            .iter()
            .map(|project| project.project_name.as_str())
            .collect();
        assert_eq!(names, vec!["Big", "Small"]);
    }

    #[test]
    fn dedup_key_distinguishes_projects() {
        let a = result("A", 10.0);
        let b = result("B", 10.0);
        assert_ne!(dedup_key(&a), dedup_key(&b));
        assert_eq!(dedup_key(&a), dedup_key(&a.clone()));
    }
}
