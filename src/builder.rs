use crate::engine::CostTableEngine;
use crate::frontier::solve_rolling;
use crate::model::TrackModel;
use crate::utils::{default_strategy, Strategy};

pub struct SolverBuilder<'m> {
    model: &'m TrackModel,
    strategy: Option<Strategy>,
}

impl<'m> SolverBuilder<'m> {
    pub fn new(model: &'m TrackModel) -> Self {
        Self {
            model,
            strategy: None,
        }
    }
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = Some(strategy);
        self
    }
    pub fn build(self) -> Solver<'m> {
        let strategy = match self.strategy {
            Some(s) => s,
            None => {
                let window = self.model.max_piece_length().max(1);
                default_strategy(self.model.target_length(), window)
            }
        };
        Solver {
            model: self.model,
            strategy,
        }
    }
}

/// A model paired with the strategy used to price it.
pub struct Solver<'m> {
    model: &'m TrackModel,
    strategy: Strategy,
}

impl Solver<'_> {
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn solve(&self) -> Option<u64> {
        let span = tracing::info_span!("solve", strategy = ?self.strategy);
        let _enter = span.enter();
        match self.strategy {
            Strategy::Dense => CostTableEngine::new(self.model).solve(),
            Strategy::Rolling => solve_rolling(self.model),
        }
    }
}
