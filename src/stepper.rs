//! Step counter reserved for animated tonnage changes.
//!
//! Only the counter exists. Nothing drives an animation from it yet, and
//! [`TonnageStepper::evaluate`] deliberately does nothing.

/// Number of animation steps.
pub const STEP_COUNT: u8 = 16;

/// Saturating step counter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TonnageStepper {
    step: u8,
}

impl TonnageStepper {
    /// Creates a stepper at step 0.
    pub const fn new() -> Self {
        Self { step: 0 }
    }

    /// Current step, `0..STEP_COUNT`.
    pub const fn current_step(&self) -> u8 {
        self.step
    }

    /// True once the last step is reached.
    pub const fn is_finished(&self) -> bool {
        self.step == STEP_COUNT - 1
    }

    /// Advances one step, holding at the last.
    pub fn step(&mut self) {
        if self.step < STEP_COUNT - 1 {
            self.step += 1;
        }
    }

    /// Returns to step 0.
    pub fn reset(&mut self) {
        self.step = 0;
    }

    /// Hook for applying the current step. Currently a no-op.
    pub fn evaluate(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn holds_at_fifteen() {
        let mut stepper = TonnageStepper::new();
        for _ in 0..40 {
            stepper.step();
        }
        assert_eq!(stepper.current_step(), 15);
        assert!(stepper.is_finished());
    }

    #[test]
    fn evaluate_changes_nothing() {
        let mut stepper = TonnageStepper::new();
        stepper.step();
        stepper.evaluate();
        assert_eq!(stepper.current_step(), 1);
    }

    #[test]
    fn reset_returns_to_start() {
        let mut stepper = TonnageStepper::new();
        stepper.step();
        stepper.step();
        stepper.reset();
        assert_eq!(stepper, TonnageStepper::default());
        assert!(!stepper.is_finished());
    }
}
