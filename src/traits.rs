//! Layered dynamic programs.
//!
//! A layered DP advances a *frontier* from layer 0 to layer `T`, one layer at
//! a time. The frontier holds only the values later layers still need, which
//! is what lets [`crate::frontier::TrackProblem`] price a track without the
//! dense table.
//!
//! Semantics:
//! - There are `T = num_layers()` steps.
//! - `forward_step(i, frontier)` turns the frontier at layer `i` into the
//!   frontier at layer `i + 1`, in place.
//! - After `T` steps, `extract_cost` reads the objective off the final frontier.

pub trait LayeredProblem {
    /// Representation of the DP values kept live between layers.
    type Frontier;

    /// Objective type.
    type Cost;

    /// Number of steps `T`.
    fn num_layers(&self) -> usize;

    /// Frontier at layer 0.
    fn init_frontier(&self) -> Self::Frontier;

    /// Advance from layer `layer` to `layer + 1`.
    ///
    /// Must only depend on the frontier and fixed problem data.
    fn forward_step(&self, layer: usize, frontier: &mut Self::Frontier);

    /// Objective at layer `T`.
    fn extract_cost(&self, frontier: &Self::Frontier) -> Self::Cost;

    /// Run every layer and return the objective.
    fn run(&self) -> Self::Cost {
        let t = self.num_layers();
        let mut frontier = self.init_frontier();
        for layer in 0..t {
            self.forward_step(layer, &mut frontier);
        }
        self.extract_cost(&frontier)
    }
}

#[cfg(test)]
mod tests {
    use super::LayeredProblem;

    /// Counts layers; cost is the final counter.
    struct Counter(usize);

    impl LayeredProblem for Counter {
        type Frontier = usize;
        type Cost = usize;

        fn num_layers(&self) -> usize {
            self.0
        }
        fn init_frontier(&self) -> usize {
            0
        }
        fn forward_step(&self, layer: usize, frontier: &mut usize) {
            assert_eq!(*frontier, layer, "layers must run in order");
            *frontier += 1;
        }
        fn extract_cost(&self, frontier: &usize) -> usize {
            *frontier
        }
    }

    #[test]
    fn zero_layers_returns_initial_frontier() {
        assert_eq!(Counter(0).run(), 0);
    }

    #[test]
    fn visits_every_layer_in_order() {
        assert_eq!(Counter(17).run(), 17);
    }
}
