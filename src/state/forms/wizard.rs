//! Linear multi-step wizard gated by per-step validity
//!
//! The wizard owns only its cursor. Form values live in whatever store
//! the caller uses and are passed in on every query, so "can advance" is
//! always computed from the current state and never cached.

use thiserror::Error;

/// One screen of a wizard and the predicate that must hold to leave it
pub struct Step<S> {
    pub title: &'static str,
    pub description: &'static str,
    pub index: usize,
    validate: fn(&S) -> bool,
}

impl<S> Step<S> {
    pub fn new(title: &'static str, description: &'static str, validate: fn(&S) -> bool) -> Self {
        Self {
            title,
            description,
            index: 0,
            validate,
        }
    }

    pub fn is_valid(&self, state: &S) -> bool {
        (self.validate)(state)
    }
}

impl<S> std::fmt::Debug for Step<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Step")
            .field("title", &self.title)
            .field("index", &self.index)
            .finish()
    }
}

/// Why a transition was refused. The cursor is unchanged in every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("a wizard needs at least one step")]
    NoSteps,
    #[error("step {index} is not complete")]
    StepInvalid { index: usize },
    #[error("already at the first step")]
    AtFirstStep,
    #[error("already at the last step")]
    AtLastStep,
    #[error("finish is only available on the last step (at step {index})")]
    NotAtLastStep { index: usize },
}

/// Progress marker for rendering a stepper
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Complete,
    Active,
    Incomplete,
}

#[derive(Debug)]
pub struct Wizard<S> {
    steps: Vec<Step<S>>,
    active_index: usize,
}

/// A refused `finish`: the wizard is handed back untouched
#[derive(Debug)]
pub struct Unfinished<S> {
    pub wizard: Wizard<S>,
    pub error: WizardError,
}

impl<S> Wizard<S> {
    /// Build a wizard positioned on the first step. Indices are assigned
    /// from the order of `steps`.
    pub fn new(mut steps: Vec<Step<S>>) -> Result<Self, WizardError> {
        if steps.is_empty() {
            return Err(WizardError::NoSteps);
        }
        for (index, step) in steps.iter_mut().enumerate() {
            step.index = index;
        }
        Ok(Self {
            steps,
            active_index: 0,
        })
    }

    pub fn steps(&self) -> &[Step<S>] {
        &self.steps
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn active_step(&self) -> &Step<S> {
        &self.steps[self.active_index]
    }

    pub fn is_first_step(&self) -> bool {
        self.active_index == 0
    }

    pub fn is_last_step(&self) -> bool {
        self.active_index + 1 == self.steps.len()
    }

    pub fn is_current_step_valid(&self, state: &S) -> bool {
        self.active_step().is_valid(state)
    }

    /// Whether Next is enabled
    pub fn can_advance(&self, state: &S) -> bool {
        !self.is_last_step() && self.is_current_step_valid(state)
    }

    /// Whether Previous is enabled
    pub fn can_go_back(&self) -> bool {
        !self.is_first_step()
    }

    /// Whether Done is enabled
    pub fn can_finish(&self, state: &S) -> bool {
        self.is_last_step() && self.is_current_step_valid(state)
    }

    pub fn step_status(&self, index: usize) -> StepStatus {
        match index.cmp(&self.active_index) {
            std::cmp::Ordering::Less => StepStatus::Complete,
            std::cmp::Ordering::Equal => StepStatus::Active,
            std::cmp::Ordering::Greater => StepStatus::Incomplete,
        }
    }

    /// Move forward one step if the current one is valid
    pub fn next(&mut self, state: &S) -> Result<usize, WizardError> {
        if self.is_last_step() {
            return Err(WizardError::AtLastStep);
        }
        if !self.is_current_step_valid(state) {
            return Err(WizardError::StepInvalid {
                index: self.active_index,
            });
        }
        self.active_index += 1;
        Ok(self.active_index)
    }

    /// Move back one step; no validation needed
    pub fn previous(&mut self) -> Result<usize, WizardError> {
        if self.is_first_step() {
            return Err(WizardError::AtFirstStep);
        }
        self.active_index -= 1;
        Ok(self.active_index)
    }

    /// Complete the wizard, handing the final state to `on_complete`.
    ///
    /// The wizard is consumed on success, so the handler runs at most once
    /// per instance. On refusal the wizard comes back in `Unfinished`.
    pub fn finish<R>(self, state: &S, on_complete: impl FnOnce(&S) -> R) -> Result<R, Unfinished<S>> {
        if !self.is_last_step() {
            let index = self.active_index;
            return Err(Unfinished {
                wizard: self,
                error: WizardError::NotAtLastStep { index },
            });
        }
        if !self.is_current_step_valid(state) {
            let index = self.active_index;
            return Err(Unfinished {
                wizard: self,
                error: WizardError::StepInvalid { index },
            });
        }
        Ok(on_complete(state))
    }
}
