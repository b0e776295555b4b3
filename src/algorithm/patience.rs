//! Draw budget shared by every item of one layout attempt

/// Signal that an attempt used up its draw budget
///
/// Never leaves the orchestrator; it always turns into a restart.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PatienceExhausted {
    /// Draws made in the abandoned attempt
    pub draws: usize,
}

/// Counts candidate draws across a whole attempt
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Patience {
    budget: usize,
    draws: usize,
}

impl Patience {
    /// Create a counter allowing `budget` draws per attempt
    pub const fn new(budget: usize) -> Self {
        Self { budget, draws: 0 }
    }

    /// Account for one candidate draw
    ///
    /// Called after the candidate is drawn and before it is validated, whether
    /// or not it will be accepted.
    ///
    /// # Errors
    ///
    /// Returns [`PatienceExhausted`] once the number of draws exceeds the budget
    pub const fn record_draw(&mut self) -> Result<(), PatienceExhausted> {
        self.draws += 1;
        if self.draws > self.budget {
            Err(PatienceExhausted { draws: self.draws })
        } else {
            Ok(())
        }
    }

    /// Start a fresh attempt
    pub const fn reset(&mut self) {
        self.draws = 0;
    }

    /// Draws made so far in this attempt
    pub const fn draws(&self) -> usize {
        self.draws
    }

    /// Draws still allowed in this attempt
    pub const fn remaining(&self) -> usize {
        self.budget.saturating_sub(self.draws)
    }

    /// Configured budget
    pub const fn budget(&self) -> usize {
        self.budget
    }
}
