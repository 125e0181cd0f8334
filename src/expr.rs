//! Symbolic boolean expressions over unsolved unknowns.
//!
//! An [`Expr`] is data: it is built while constraints are registered, handed
//! to an optimizer to be encoded, and only becomes a concrete `bool` when
//! folded against a [`Valuation`] such as a solved assignment.

use std::ops::Not;

/// Handle naming one boolean unknown. Not a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Unknown(u32);

impl Unknown {
    pub(crate) fn new(index: usize) -> Self {
        Unknown(u32::try_from(index).expect("unknown index exceeds u32"))
    }

    /// Dense index of this unknown, `0..model.num_unknowns()`.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Concrete values for unknowns.
pub trait Valuation {
    fn value(&self, unknown: Unknown) -> bool;
}

impl Valuation for [bool] {
    fn value(&self, unknown: Unknown) -> bool {
        self[unknown.index()]
    }
}

impl Valuation for Vec<bool> {
    fn value(&self, unknown: Unknown) -> bool {
        self[unknown.index()]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    Const(bool),
    Var(Unknown),
    Not(Box<Expr>),
    And(Box<Expr>, Box<Expr>),
    /// `if cond then a else b`
    Ite(Box<Expr>, Box<Expr>, Box<Expr>),
    Eq(Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn var(unknown: Unknown) -> Self {
        Expr::Var(unknown)
    }

    pub fn and(self, other: Expr) -> Self {
        Expr::And(Box::new(self), Box::new(other))
    }

    pub fn select(cond: Expr, then: Expr, otherwise: Expr) -> Self {
        Expr::Ite(Box::new(cond), Box::new(then), Box::new(otherwise))
    }

    pub fn equals(self, other: Expr) -> Self {
        Expr::Eq(Box::new(self), Box::new(other))
    }

    /// Fold the expression against concrete values.
    pub fn eval<V: Valuation + ?Sized>(&self, valuation: &V) -> bool {
        match self {
            Expr::Const(b) => *b,
            Expr::Var(u) => valuation.value(*u),
            Expr::Not(e) => !e.eval(valuation),
            Expr::And(a, b) => a.eval(valuation) && b.eval(valuation),
            Expr::Ite(c, a, b) => {
                if c.eval(valuation) {
                    a.eval(valuation)
                } else {
                    b.eval(valuation)
                }
            }
            Expr::Eq(a, b) => a.eval(valuation) == b.eval(valuation),
        }
    }

    /// Every unknown the expression mentions, in first-occurrence order.
    pub fn unknowns(&self) -> Vec<Unknown> {
        let mut out = Vec::new();
        self.collect_unknowns(&mut out);
        out
    }

    fn collect_unknowns(&self, out: &mut Vec<Unknown>) {
        match self {
            Expr::Const(_) => {}
            Expr::Var(u) => {
                if !out.contains(u) {
                    out.push(*u);
                }
            }
            Expr::Not(e) => e.collect_unknowns(out),
            Expr::And(a, b) | Expr::Eq(a, b) => {
                a.collect_unknowns(out);
                b.collect_unknowns(out);
            }
            Expr::Ite(c, a, b) => {
                c.collect_unknowns(out);
                a.collect_unknowns(out);
                b.collect_unknowns(out);
            }
        }
    }
}

impl Not for Expr {
    type Output = Expr;

    fn not(self) -> Expr {
        Expr::Not(Box::new(self))
    }
}

impl From<bool> for Expr {
    fn from(value: bool) -> Self {
        Expr::Const(value)
    }
}

impl From<Unknown> for Expr {
    fn from(unknown: Unknown) -> Self {
        Expr::Var(unknown)
    }
}
