//! Weighted MaxSAT over `rustsat` with the MiniSat backend.
//!
//! The search is a binary search on the violated weight. Each round builds
//! a fresh CNF instance: the Tseitin encoding of every soft constraint plus
//! a pseudo-boolean bound on the weight of the violated ones, then asks
//! MiniSat whether that bound is achievable.
//!
//! A first, unbounded round gives an upper bound `hi` (the cost of whatever
//! model MiniSat returns). The lower bound starts at zero. A satisfiable
//! round lowers `hi` to the actual cost of its model; an unsatisfiable one
//! raises `lo` past the tested bound. When they meet the last model is
//! optimal.
//!
//! The time budget is a deadline for the whole search. It is checked before
//! every round, and a MiniSat call still running when it passes is
//! interrupted.

mod bound;
mod tseitin;

use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use rustsat::instances::{BasicVarManager, ManageVars, SatInstance};
use rustsat::solvers::{Interrupt, InterruptSolver, Solve, SolverResult};
use rustsat::types::{Lit, TernaryVal};
use rustsat_minisat::core::Minisat;

use crate::optimizer::{CheckResult, Optimizer, Problem, Solution};

use bound::encode_at_most;
use tseitin::TseitinEncoder;

#[derive(Debug, Clone, Default)]
pub struct SolveConfig {
    /// Wall-clock limit for the whole search.
    pub time_budget: Option<Duration>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolveStats {
    pub rounds: usize,
    /// Size of the largest CNF instance handed to MiniSat.
    pub max_vars: u64,
    pub max_clauses: usize,
    pub elapsed: Duration,
}

enum RoundOutcome {
    Sat(Vec<bool>),
    Unsat,
    Interrupted,
}

#[derive(Debug, Default)]
pub struct MinisatOptimizer {
    config: SolveConfig,
    solution: Option<Solution>,
    unknown_reason: Option<String>,
    stats: SolveStats,
}

impl MinisatOptimizer {
    pub fn new(config: SolveConfig) -> Self {
        MinisatOptimizer {
            config,
            ..Default::default()
        }
    }

    pub fn stats(&self) -> &SolveStats {
        &self.stats
    }

    fn unknown(&mut self, reason: String) -> CheckResult {
        log::warn!("optimization stopped: {}", reason);
        self.unknown_reason = Some(reason);
        CheckResult::Unknown
    }

    // One SAT call: is there an assignment violating at most `bound`
    // (scaled) weight? `None` means no bound.
    fn solve_round(
        &mut self,
        problem: &Problem,
        weights: &[u64],
        bound: Option<u64>,
        deadline: Option<Instant>,
    ) -> anyhow::Result<RoundOutcome> {
        let mut instance: SatInstance<BasicVarManager> = SatInstance::new();
        let mut encoder = TseitinEncoder::new(&mut instance, problem.num_unknowns);

        let soft_lits: Vec<Lit> = problem.soft.iter().map(|s| encoder.encode(&s.expr)).collect();
        let unknown_lits = encoder.unknown_lits().to_vec();

        let (mut cnf, mut vars) = instance.into_cnf();
        if let Some(bound) = bound {
            let violations: Vec<(Lit, u64)> = soft_lits
                .iter()
                .zip(weights)
                .map(|(&lit, &w)| (!lit, w))
                .collect();
            encode_at_most(&mut cnf, &mut vars, &violations, bound)?;
        }

        let num_vars = u64::from(vars.n_used());
        let num_clauses = cnf.len();
        self.stats.rounds += 1;
        self.stats.max_vars = self.stats.max_vars.max(num_vars);
        self.stats.max_clauses = self.stats.max_clauses.max(num_clauses);

        if deadline.is_some_and(|d| Instant::now() >= d) {
            return Ok(RoundOutcome::Interrupted);
        }

        let mut solver = Minisat::default();
        // MiniSat only sizes its model to variables that occur in clauses;
        // unknowns no clause mentions still need a value.
        if let Some(max_var) = vars.max_var() {
            solver.reserve(max_var)?;
        }
        solver.add_cnf(cnf)?;

        let round_start = Instant::now();
        let result = solve_until(&mut solver, deadline)?;
        log::debug!(
            "round {}: bound {:?}, {} vars, {} clauses -> {:?} in {:.3}ms",
            self.stats.rounds,
            bound,
            num_vars,
            num_clauses,
            result,
            round_start.elapsed().as_secs_f64() * 1000.0
        );

        match result {
            SolverResult::Sat => {
                let mut values = Vec::with_capacity(unknown_lits.len());
                for lit in unknown_lits {
                    // Unconstrained unknowns may come back unassigned
                    values.push(solver.lit_val(lit)? == TernaryVal::True);
                }
                Ok(RoundOutcome::Sat(values))
            }
            SolverResult::Unsat => Ok(RoundOutcome::Unsat),
            SolverResult::Interrupted => Ok(RoundOutcome::Interrupted),
        }
    }
}

/// Run `solver`, interrupting it if `deadline` passes first.
fn solve_until(solver: &mut Minisat, deadline: Option<Instant>) -> anyhow::Result<SolverResult> {
    let Some(deadline) = deadline else {
        return solver.solve();
    };

    let interrupter = solver.interrupter();
    let (done, finished) = mpsc::channel::<()>();
    // The watchdog is joined before the scope ends, so it never outlives
    // the solver its interrupter points into.
    thread::scope(|scope| {
        scope.spawn(move || {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if let Err(RecvTimeoutError::Timeout) = finished.recv_timeout(remaining) {
                interrupter.interrupt();
            }
        });
        let result = solver.solve();
        drop(done);
        result
    })
}

impl Optimizer for MinisatOptimizer {
    fn check(&mut self, problem: &Problem) -> anyhow::Result<CheckResult> {
        self.solution = None;
        self.unknown_reason = None;
        self.stats = SolveStats::default();

        let start = Instant::now();
        let deadline = self.config.time_budget.map(|budget| start + budget);

        // Dividing by the common factor keeps the bound's weights small
        let scale = problem.soft.iter().map(|s| s.weight).fold(0, gcd).max(1);
        let weights: Vec<u64> = problem.soft.iter().map(|s| s.weight / scale).collect();
        let violated = |values: &[bool]| -> u64 {
            problem
                .soft
                .iter()
                .zip(&weights)
                .filter(|(s, _)| !s.expr.eval(values))
                .map(|(_, &w)| w)
                .sum()
        };

        let mut best = match self.solve_round(problem, &weights, None, deadline)? {
            RoundOutcome::Sat(values) => values,
            RoundOutcome::Unsat => {
                self.stats.elapsed = start.elapsed();
                return Ok(CheckResult::Unsatisfiable);
            }
            RoundOutcome::Interrupted => {
                self.stats.elapsed = start.elapsed();
                return Ok(self.unknown(
                    "time budget exhausted before any model was found".to_string(),
                ));
            }
        };
        let mut hi = violated(&best);
        let mut lo = 0;

        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            let outcome = if deadline.is_some_and(|d| Instant::now() >= d) {
                RoundOutcome::Interrupted
            } else {
                self.solve_round(problem, &weights, Some(mid), deadline)?
            };

            match outcome {
                RoundOutcome::Sat(values) => {
                    hi = violated(&values);
                    best = values;
                }
                RoundOutcome::Unsat => lo = mid + 1,
                RoundOutcome::Interrupted => {
                    self.stats.elapsed = start.elapsed();
                    return Ok(self.unknown(format!(
                        "time budget exhausted with violated weight between {} and {}",
                        lo * scale,
                        hi * scale
                    )));
                }
            }
        }

        self.stats.elapsed = start.elapsed();
        let solution = Solution::evaluate(problem, best);
        log::info!(
            "optimal: satisfied weight {} of {} after {} rounds ({:.3}ms)",
            solution.satisfied_weight(),
            solution.total_weight(),
            self.stats.rounds,
            self.stats.elapsed.as_secs_f64() * 1000.0
        );
        self.solution = Some(solution);
        Ok(CheckResult::Satisfiable)
    }

    fn model(&self) -> Option<Solution> {
        self.solution.clone()
    }

    fn reason_unknown(&self) -> Option<String> {
        self.unknown_reason.clone()
    }
}

fn gcd(a: u64, b: u64) -> u64 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}
