use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

use crate::validation::{FieldError, FieldResult};

/// A form that can be split into validated steps.
pub trait StepForm {
    type Field: Copy + Ord + fmt::Debug;

    /// Fields validated before leaving each step, in step order.
    fn fields_by_step() -> Vec<Vec<Self::Field>>;

    fn validate_field(&self, field: Self::Field) -> FieldResult;
}

/// What a navigation request did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Moved { from: usize, to: usize },
    /// Nothing to move to (same step, or a valid last step).
    Stayed,
    /// Validation failed; the wizard now shows `step`.
    Blocked { step: usize },
    /// Target is not unlocked yet.
    Rejected,
    /// Back was pressed on the first step; the caller should leave the flow.
    Exit,
}

/// Multi-step form controller with forward gating.
///
/// `current_step` never exceeds `furthest_unlocked_step`, and a step is only
/// unlocked after every step before it validated.
#[derive(Debug, Clone)]
pub struct StepWizard<F: StepForm> {
    form: F,
    fields_by_step: Vec<Vec<F::Field>>,
    current_step: usize,
    furthest_unlocked_step: usize,
    errors: BTreeMap<F::Field, FieldError>,
}

impl<F: StepForm> StepWizard<F> {
    pub fn new(form: F) -> Self {
        Self {
            form,
            fields_by_step: F::fields_by_step(),
            current_step: 0,
            furthest_unlocked_step: 0,
            errors: BTreeMap::new(),
        }
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut F {
        &mut self.form
    }

    pub fn into_form(self) -> F {
        self.form
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn furthest_unlocked_step(&self) -> usize {
        self.furthest_unlocked_step
    }

    pub fn step_count(&self) -> usize {
        self.fields_by_step.len()
    }

    fn last_step(&self) -> usize {
        self.fields_by_step.len().saturating_sub(1)
    }

    pub fn is_last_step(&self) -> bool {
        self.current_step == self.last_step()
    }

    /// Whether the step tab can be pressed.
    pub fn is_step_enabled(&self, step: usize) -> bool {
        step <= self.last_step() && step <= self.furthest_unlocked_step + 1
    }

    pub fn errors(&self) -> &BTreeMap<F::Field, FieldError> {
        &self.errors
    }

    pub fn error(&self, field: F::Field) -> Option<&FieldError> {
        self.errors.get(&field)
    }

    /// Validates the fields of one step, replacing their previous errors.
    pub fn validate_step(&mut self, step: usize) -> bool {
        let Some(fields) = self.fields_by_step.get(step) else {
            return true;
        };

        let mut valid = true;
        for &field in fields {
            match self.form.validate_field(field) {
                Ok(()) => {
                    self.errors.remove(&field);
                }
                Err(error) => {
                    self.errors.insert(field, error);
                    valid = false;
                }
            }
        }
        valid
    }

    /// Validates a single field, as when its value changes outside the
    /// current step.
    pub fn revalidate_field(&mut self, field: F::Field) -> bool {
        match self.form.validate_field(field) {
            Ok(()) => {
                self.errors.remove(&field);
                true
            }
            Err(error) => {
                self.errors.insert(field, error);
                false
            }
        }
    }

    /// Validates every step, recording errors for all of them.
    pub fn validate_all(&mut self) -> bool {
        (0..self.fields_by_step.len()).fold(true, |valid, step| self.validate_step(step) && valid)
    }

    /// Returns the form when every step validates.
    pub fn submit(&mut self) -> Option<&F> {
        if self.validate_all() {
            Some(&self.form)
        } else {
            None
        }
    }

    pub fn go_to_next_step(&mut self) -> StepOutcome {
        let step = self.current_step;
        if !self.validate_step(step) {
            debug!(step, errors = self.errors.len(), "Step validation failed");
            return StepOutcome::Blocked { step };
        }
        if step >= self.last_step() {
            return StepOutcome::Stayed;
        }

        let next = step + 1;
        self.current_step = next;
        self.furthest_unlocked_step = self.furthest_unlocked_step.max(next);
        debug!(from = step, to = next, "Advanced to next step");
        StepOutcome::Moved { from: step, to: next }
    }

    pub fn go_to_previous_step(&mut self) -> StepOutcome {
        if self.current_step == 0 {
            return StepOutcome::Exit;
        }
        let from = self.current_step;
        self.current_step -= 1;
        StepOutcome::Moved {
            from,
            to: self.current_step,
        }
    }

    pub fn go_to_step(&mut self, target: usize) -> StepOutcome {
        let from = self.current_step;
        if target <= from {
            self.current_step = target;
            if target == from {
                return StepOutcome::Stayed;
            }
            return StepOutcome::Moved { from, to: target };
        }

        if target > self.furthest_unlocked_step + 1 || target > self.last_step() {
            debug!(target, furthest = self.furthest_unlocked_step, "Step is locked");
            return StepOutcome::Rejected;
        }

        for step in 0..target {
            if !self.validate_step(step) {
                self.current_step = step;
                debug!(target, failing_step = step, "Earlier step failed validation");
                return StepOutcome::Blocked { step };
            }
        }

        self.current_step = target;
        self.furthest_unlocked_step = self.furthest_unlocked_step.max(target);
        StepOutcome::Moved { from, to: target }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::required;

    #[derive(Debug, Default, Clone)]
    struct Profile {
        name: String,
        city: String,
        phone: String,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
    enum ProfileField {
        Name,
        City,
        Phone,
    }

    impl StepForm for Profile {
        type Field = ProfileField;

        fn fields_by_step() -> Vec<Vec<ProfileField>> {
            vec![
                vec![ProfileField::Name],
                vec![ProfileField::City],
                vec![ProfileField::Phone],
            ]
        }

        fn validate_field(&self, field: ProfileField) -> FieldResult {
            match field {
                ProfileField::Name => required(&self.name, "name is required"),
                ProfileField::City => required(&self.city, "city is required"),
                ProfileField::Phone => required(&self.phone, "phone is required"),
            }
        }
    }

    #[test]
    fn next_step_is_blocked_by_invalid_fields() {
        let mut wizard = StepWizard::new(Profile::default());

        assert_eq!(wizard.go_to_next_step(), StepOutcome::Blocked { step: 0 });
        assert_eq!(wizard.current_step(), 0);
        assert_eq!(
            wizard.error(ProfileField::Name).map(FieldError::message),
            Some("name is required")
        );

        wizard.form_mut().name = "Moussa".into();
        assert_eq!(wizard.go_to_next_step(), StepOutcome::Moved { from: 0, to: 1 });
        assert!(wizard.error(ProfileField::Name).is_none());
        assert_eq!(wizard.furthest_unlocked_step(), 1);
    }

    #[test]
    fn valid_last_step_stays() {
        let mut wizard = StepWizard::new(Profile {
            name: "a".into(),
            city: "b".into(),
            phone: "c".into(),
        });
        wizard.go_to_next_step();
        wizard.go_to_next_step();
        assert!(wizard.is_last_step());
        assert_eq!(wizard.go_to_next_step(), StepOutcome::Stayed);
        assert_eq!(wizard.current_step(), 2);
    }

    #[test]
    fn previous_on_first_step_exits() {
        let mut wizard = StepWizard::new(Profile::default());
        assert_eq!(wizard.go_to_previous_step(), StepOutcome::Exit);
        assert_eq!(wizard.current_step(), 0);
    }

    #[test]
    fn jump_beyond_unlocked_step_is_ignored() {
        let mut wizard = StepWizard::new(Profile::default());
        assert!(!wizard.is_step_enabled(2));
        assert_eq!(wizard.go_to_step(2), StepOutcome::Rejected);
        assert_eq!(wizard.current_step(), 0);
        assert!(wizard.errors().is_empty());
    }

    #[test]
    fn jump_lands_on_first_failing_step() {
        let mut wizard = StepWizard::new(Profile {
            name: "Awa".into(),
            city: "Bamako".into(),
            ..Default::default()
        });
        wizard.go_to_next_step();
        wizard.go_to_next_step();
        assert_eq!(wizard.furthest_unlocked_step(), 2);

        wizard.go_to_step(0);
        wizard.form_mut().city.clear();

        assert_eq!(wizard.go_to_step(2), StepOutcome::Blocked { step: 1 });
        assert_eq!(wizard.current_step(), 1);
        assert!(wizard.error(ProfileField::City).is_some());
    }

    #[test]
    fn jump_to_next_unlocked_step_validates_and_unlocks() {
        let mut wizard = StepWizard::new(Profile {
            name: "Awa".into(),
            ..Default::default()
        });
        assert!(wizard.is_step_enabled(1));
        assert_eq!(wizard.go_to_step(1), StepOutcome::Moved { from: 0, to: 1 });
        assert_eq!(wizard.furthest_unlocked_step(), 1);
    }

    #[test]
    fn submit_reports_every_invalid_field() {
        let mut wizard = StepWizard::new(Profile::default());
        assert!(wizard.submit().is_none());
        assert_eq!(wizard.errors().len(), 3);

        let form = wizard.form_mut();
        form.name = "Awa".into();
        form.city = "Bamako".into();
        form.phone = "70001111".into();
        assert!(wizard.submit().is_some());
        assert!(wizard.errors().is_empty());
    }
}
