//! Railway Planner
//!
//! Finds the cheapest way to lay a straight track of an exact length from a
//! catalog of prefabricated pieces. Every piece has a price, a length and a
//! connector symbol on each end; two pieces may only be joined where the
//! right connector of one equals the left connector of the next.
//!
//! ## Core idea
//! A partial track is fully described, for the purpose of extending it, by
//! its length and the connector exposed at its open end. The engine fills a
//! table over *(length, connector)* bottom-up and reads the answer off the
//! row of the target length.
//!
//! ## Quick start
//! ```
//! use railway_planner::{parse::parse_description, solve};
//!
//! let model = parse_description("2\n2\nA,B\nA,B,1,5\nB,A,1,3\n").unwrap();
//! assert_eq!(solve(&model), Some(8));
//! ```
//!
//! ## Solvers
//! - [`CostTableEngine`]: dense `(L+1) × C` table; also reconstructs a plan.
//! - [`frontier::solve_rolling`]: keeps only the last `max piece length` rows.
//! - [`SolverBuilder`]: picks one of the two, explicitly or by a size heuristic.
//!
//! Enable the `parallel` feature to fill the cells of each row with rayon.

pub mod builder;
pub mod engine;
pub mod frontier;
pub mod model;
pub mod parse;
pub mod report;
pub mod table;
pub mod traits;
pub mod utils;

pub use crate::builder::{Solver, SolverBuilder};
pub use crate::engine::{solve, CostTableEngine, TrackPlan};
pub use crate::model::{Alphabet, Connector, Piece, TrackModel};
pub use crate::traits::LayeredProblem;
pub use crate::utils::Strategy;
