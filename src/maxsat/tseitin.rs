// Tseitin encoding of `Expr` trees into CNF.
//
// Every unknown gets a literal up front, in handle order, so unknown `i`
// is always `unknown_lits[i]`. Structurally equal subexpressions share one
// literal; the occlusion test for a neighbor pair is built once per cell
// and view, and repeated targets on the same view rebuild the same trees.

use std::collections::HashMap;

use rustsat::instances::{BasicVarManager, SatInstance};
use rustsat::types::Lit;

use crate::expr::{Expr, Unknown};

pub(crate) struct TseitinEncoder<'a> {
    instance: &'a mut SatInstance<BasicVarManager>,
    unknown_lits: Vec<Lit>,
    cache: HashMap<Expr, Lit>,
    true_lit: Option<Lit>,
}

impl<'a> TseitinEncoder<'a> {
    pub(crate) fn new(instance: &'a mut SatInstance<BasicVarManager>, num_unknowns: usize) -> Self {
        let unknown_lits = (0..num_unknowns).map(|_| instance.new_lit()).collect();
        TseitinEncoder {
            instance,
            unknown_lits,
            cache: HashMap::new(),
            true_lit: None,
        }
    }

    pub(crate) fn unknown_lit(&self, unknown: Unknown) -> Lit {
        self.unknown_lits[unknown.index()]
    }

    pub(crate) fn unknown_lits(&self) -> &[Lit] {
        &self.unknown_lits
    }

    /// A literal that is true exactly when `expr` is.
    pub(crate) fn encode(&mut self, expr: &Expr) -> Lit {
        match expr {
            Expr::Const(b) => {
                let t = self.true_lit();
                if *b {
                    t
                } else {
                    !t
                }
            }
            Expr::Var(u) => self.unknown_lit(*u),
            Expr::Not(e) => !self.encode(e),
            // Comparing against a constant needs no auxiliary variable
            Expr::Eq(a, b) if matches!(**b, Expr::Const(_)) => {
                let lit = self.encode(a);
                if let Expr::Const(true) = **b {
                    lit
                } else {
                    !lit
                }
            }
            Expr::Eq(a, b) if matches!(**a, Expr::Const(_)) => {
                let lit = self.encode(b);
                if let Expr::Const(true) = **a {
                    lit
                } else {
                    !lit
                }
            }
            _ => {
                if let Some(&lit) = self.cache.get(expr) {
                    return lit;
                }
                let lit = self.encode_gate(expr);
                self.cache.insert(expr.clone(), lit);
                lit
            }
        }
    }

    fn encode_gate(&mut self, expr: &Expr) -> Lit {
        match expr {
            Expr::And(a, b) => {
                let a = self.encode(a);
                let b = self.encode(b);
                let x = self.instance.new_lit();
                // x <-> (a & b)
                self.instance.add_binary(!x, a);
                self.instance.add_binary(!x, b);
                self.instance.add_clause(vec![!a, !b, x].into_iter().collect());
                x
            }
            Expr::Ite(c, t, e) => {
                let c = self.encode(c);
                let t = self.encode(t);
                let e = self.encode(e);
                let x = self.instance.new_lit();
                // c => (x <-> t)
                self.instance.add_clause(vec![!c, !t, x].into_iter().collect());
                self.instance.add_clause(vec![!c, t, !x].into_iter().collect());
                // !c => (x <-> e)
                self.instance.add_clause(vec![c, !e, x].into_iter().collect());
                self.instance.add_clause(vec![c, e, !x].into_iter().collect());
                // Redundant but helps propagation when t and e agree
                self.instance.add_clause(vec![!t, !e, x].into_iter().collect());
                self.instance.add_clause(vec![t, e, !x].into_iter().collect());
                x
            }
            Expr::Eq(a, b) => {
                let a = self.encode(a);
                let b = self.encode(b);
                let x = self.instance.new_lit();
                // x <-> (a <-> b)
                self.instance.add_clause(vec![!x, !a, b].into_iter().collect());
                self.instance.add_clause(vec![!x, a, !b].into_iter().collect());
                self.instance.add_clause(vec![x, a, b].into_iter().collect());
                self.instance.add_clause(vec![x, !a, !b].into_iter().collect());
                x
            }
            Expr::Const(_) | Expr::Var(_) | Expr::Not(_) => {
                unreachable!("leaf expressions are encoded without a gate")
            }
        }
    }

    fn true_lit(&mut self) -> Lit {
        if let Some(lit) = self.true_lit {
            return lit;
        }
        let lit = self.instance.new_lit();
        self.instance.add_unit(lit);
        self.true_lit = Some(lit);
        lit
    }
}
