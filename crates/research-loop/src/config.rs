/// Step budget for one research cycle sequence.
///
/// The soft limit counts log turns, two per step (an action and its result). Past it
/// a single limit-marker turn asks the oracle to wrap up; `hard_limit_margin` turns
/// later the loop is cut off regardless.
#[derive(Debug, Clone)]
pub struct ResearchLoopConfig {
    pub max_steps: usize,
    pub hard_limit_margin: usize,
}

impl ResearchLoopConfig {
    pub fn soft_limit(&self) -> usize {
        self.max_steps.saturating_mul(2)
    }

    pub fn hard_limit(&self) -> usize {
        self.soft_limit().saturating_add(self.hard_limit_margin)
    }
}

impl Default for ResearchLoopConfig {
    fn default() -> Self {
        Self {
            max_steps: 4,
            hard_limit_margin: 4,
        }
    }
}
