use crate::comparison::{ComparisonSet, Upsert};
use crate::error::InvalidArgument;
use crate::evaluate::ProjectInputs;
use crate::models::WorkItemResult;

/// Caller-owned state: the last evaluated work item and the comparison set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub inputs: Option<ProjectInputs>,
    pub current: Option<WorkItemResult>,
    pub comparison: ComparisonSet,
}

impl Session {
    /// Evaluates the inputs and makes them the current work item.
    ///
    /// On a validation error the session is left untouched.
    pub fn calculate(&mut self, inputs: ProjectInputs) -> Result<&WorkItemResult, InvalidArgument> {
        let result = inputs.evaluate()?;
        self.inputs = Some(inputs);
        Ok(&*self.current.insert(result))
    }

    /// Copies the current result into the comparison set, if there is one.
    pub fn compare_current(&mut self) -> Option<Upsert> {
        let current = self.current.clone()?;
        Some(self.comparison.upsert(current))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluate::tests::sample_inputs;

    #[test]
    fn calculate_sets_current_result() {
        let mut session = Session::default();
        let cd3 = session
            .calculate(sample_inputs("Alpha", 100_000.0, "standard"))
            .unwrap()
            .cost_of_delay
            .cd3;
        assert_eq!(cd3, 40_000.0);
        assert_eq!(session.inputs.as_ref().unwrap().project_name, "Alpha");
        assert!(session.comparison.is_empty());
    }

    #[test]
    fn failed_calculation_keeps_previous_state() {
        let mut session = Session::default();
        session
            .calculate(sample_inputs("Alpha", 100.0, "standard"))
            .unwrap();
        let mut bad = sample_inputs("Beta", 100.0, "standard");
        bad.development_weeks = 0.0;

        assert_eq!(
            session.calculate(bad).unwrap_err(),
            InvalidArgument::ZeroDevelopmentWeeks
        );
        assert_eq!(session.current.as_ref().unwrap().project_name, "Alpha");
    }

    #[test]
    fn compare_current_requires_a_result() {
        let mut session = Session::default();
        assert_eq!(session.compare_current(), None);

        session
            .calculate(sample_inputs("Alpha", 100.0, "standard"))
            .unwrap();
        assert_eq!(session.compare_current(), Some(Upsert::Added));
        assert_eq!(session.compare_current(), Some(Upsert::Replaced));
        assert_eq!(session.comparison.len(), 1);
    }
}
