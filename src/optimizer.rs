//! The boundary between the constraint model and a weighted MaxSAT backend.
//!
//! A [`Problem`] is a set of boolean unknowns plus weighted soft
//! constraints, each an [`Expr`] the backend should try to make true. An
//! [`Optimizer`] answers `check()` and, on success, exposes a [`Solution`].

use std::fmt;

use crate::expr::{Expr, Unknown, Valuation};
use crate::view::ViewDirection;

/// One weighted preference: `expr` should evaluate to true.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoftConstraint {
    pub view: ViewDirection,
    pub row: usize,
    pub col: usize,
    pub expr: Expr,
    pub weight: u64,
}

#[derive(Debug, Clone, Default)]
pub struct Problem {
    pub num_unknowns: usize,
    pub soft: Vec<SoftConstraint>,
}

impl Problem {
    pub fn total_weight(&self) -> u64 {
        self.soft.iter().map(|s| s.weight).sum()
    }

    /// Sum of the weights of the soft constraints `valuation` satisfies.
    pub fn satisfied_weight<V: Valuation + ?Sized>(&self, valuation: &V) -> u64 {
        self.soft
            .iter()
            .filter(|s| s.expr.eval(valuation))
            .map(|s| s.weight)
            .sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckResult {
    Satisfiable,
    Unsatisfiable,
    Unknown,
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CheckResult::Satisfiable => "sat",
            CheckResult::Unsatisfiable => "unsat",
            CheckResult::Unknown => "unknown",
        })
    }
}

/// A concrete value for every unknown plus the objective it achieves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    values: Vec<bool>,
    satisfied_weight: u64,
    total_weight: u64,
}

impl Solution {
    /// Wrap `values` and score them against `problem`.
    pub fn evaluate(problem: &Problem, values: Vec<bool>) -> Self {
        assert_eq!(
            values.len(),
            problem.num_unknowns,
            "solution must assign every unknown"
        );
        let satisfied_weight = problem.satisfied_weight(&values);
        Solution {
            values,
            satisfied_weight,
            total_weight: problem.total_weight(),
        }
    }

    pub fn values(&self) -> &[bool] {
        &self.values
    }

    pub fn satisfied_weight(&self) -> u64 {
        self.satisfied_weight
    }

    pub fn total_weight(&self) -> u64 {
        self.total_weight
    }

    pub fn violated_weight(&self) -> u64 {
        self.total_weight - self.satisfied_weight
    }
}

impl Valuation for Solution {
    fn value(&self, unknown: Unknown) -> bool {
        self.values[unknown.index()]
    }
}

pub trait Optimizer {
    /// Search for an assignment maximizing the satisfied soft weight.
    fn check(&mut self, problem: &Problem) -> anyhow::Result<CheckResult>;

    /// The assignment found by the last `check()` that returned `Satisfiable`.
    fn model(&self) -> Option<Solution>;

    /// Why the last `check()` returned `Unknown`, if it did.
    fn reason_unknown(&self) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::IllusionModel;

    fn problem_1x1(targets: &[(bool, u64)]) -> Problem {
        let model = IllusionModel::new(1, 1).unwrap();
        let color = Expr::var(model.color_at(0, 0));
        Problem {
            num_unknowns: model.num_unknowns(),
            soft: targets
                .iter()
                .map(|&(target, weight)| SoftConstraint {
                    view: ViewDirection::Direct,
                    row: 0,
                    col: 0,
                    expr: color.clone().equals(Expr::from(target)),
                    weight,
                })
                .collect(),
        }
    }

    #[test]
    fn test_solution_scores_against_problem() {
        let problem = problem_1x1(&[(true, 3), (false, 1)]);

        // unknowns: [elevation, color]
        let colored = Solution::evaluate(&problem, vec![false, true]);
        assert_eq!(colored.satisfied_weight(), 3);
        assert_eq!(colored.violated_weight(), 1);
        assert_eq!(colored.total_weight(), 4);

        let blank = Solution::evaluate(&problem, vec![true, false]);
        assert_eq!(blank.satisfied_weight(), 1);
    }

    #[test]
    #[should_panic(expected = "must assign every unknown")]
    fn test_solution_requires_full_assignment() {
        let problem = problem_1x1(&[(true, 1)]);
        Solution::evaluate(&problem, vec![true]);
    }
}
