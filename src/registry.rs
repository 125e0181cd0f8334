use std::num::NonZeroU32;

use crate::error::{IllusionError, Result};
use crate::expr::Expr;
use crate::model::IllusionModel;
use crate::optimizer::{CheckResult, Optimizer, Problem, SoftConstraint, Solution};
use crate::pattern::Pattern;
use crate::project::observed_color;
use crate::view::ViewDirection;

/// A target pattern registered against one view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    pub view: ViewDirection,
    pub target: Pattern,
    pub weight: NonZeroU32,
}

/// Append-only collection of weighted targets for one model.
///
/// Every registered target becomes one soft constraint per cell. Nothing is
/// solved until [`ConstraintRegistry::solve`] is called.
#[derive(Debug, Clone)]
pub struct ConstraintRegistry {
    model: IllusionModel,
    constraints: Vec<Constraint>,
    soft: Vec<SoftConstraint>,
    views: Vec<ViewDirection>,
}

impl ConstraintRegistry {
    pub fn new(model: IllusionModel) -> Self {
        ConstraintRegistry {
            model,
            constraints: Vec::new(),
            soft: Vec::new(),
            views: Vec::new(),
        }
    }

    pub fn add_constraint(&mut self, view: ViewDirection, target: &Pattern) -> Result<()> {
        self.add_weighted_constraint(view, target, NonZeroU32::MIN)
    }

    pub fn add_weighted_constraint(
        &mut self,
        view: ViewDirection,
        target: &Pattern,
        weight: NonZeroU32,
    ) -> Result<()> {
        if target.dimensions() != self.model.dimensions() {
            return Err(IllusionError::DimensionMismatch {
                expected: self.model.dimensions(),
                found: target.dimensions(),
            });
        }

        let weight_value = u64::from(weight.get());
        for (row, col) in self.model.cells() {
            let observed = observed_color(&self.model, row, col, view);
            self.soft.push(SoftConstraint {
                view,
                row,
                col,
                expr: observed.equals(Expr::from(target.get(row, col))),
                weight: weight_value,
            });
        }

        if !self.views.contains(&view) {
            self.views.push(view);
        }
        self.constraints.push(Constraint {
            view,
            target: target.clone(),
            weight,
        });

        log::debug!(
            "registered {} target ({} foreground cells, weight {}), {} soft constraints total",
            view,
            target.count_foreground(),
            weight,
            self.soft.len()
        );
        Ok(())
    }

    pub fn model(&self) -> &IllusionModel {
        &self.model
    }

    /// Distinct constrained views, in the order they were first registered.
    pub fn views(&self) -> &[ViewDirection] {
        &self.views
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn soft_constraints(&self) -> &[SoftConstraint] {
        &self.soft
    }

    pub fn total_weight(&self) -> u64 {
        self.soft.iter().map(|s| s.weight).sum()
    }

    pub fn problem(&self) -> Problem {
        Problem {
            num_unknowns: self.model.num_unknowns(),
            soft: self.soft.clone(),
        }
    }

    /// Hand every soft constraint to `optimizer` and return its best
    /// assignment.
    pub fn solve<O: Optimizer + ?Sized>(&self, optimizer: &mut O) -> Result<Solution> {
        let problem = self.problem();
        match optimizer.check(&problem)? {
            CheckResult::Satisfiable => optimizer.model().ok_or_else(|| IllusionError::SolverUnknown {
                reason: "optimizer reported sat without a model".to_string(),
            }),
            CheckResult::Unsatisfiable => Err(IllusionError::Unsatisfiable),
            CheckResult::Unknown => Err(IllusionError::SolverUnknown {
                reason: optimizer
                    .reason_unknown()
                    .unwrap_or_else(|| "no reason given".to_string()),
            }),
        }
    }
}
