//! The occlusion rule.
//!
//! Tilting the view one step toward `(dy, dx)` lets a raised neighbor in
//! that direction hide a lower cell: the viewer then sees the neighbor's
//! color in place of the cell's own. Constraint building and rendering both
//! go through [`observed_color`], so a rendered view always shows exactly
//! what was constrained.

use crate::expr::Expr;
use crate::model::IllusionModel;
use crate::view::ViewDirection;

/// Color seen at `(row, col)` from `view`, as an expression over the
/// model's unknowns.
pub fn observed_color(model: &IllusionModel, row: usize, col: usize, view: ViewDirection) -> Expr {
    let own = Expr::var(model.color_at(row, col));
    let (height, width) = model.dimensions();

    // Direct views and cells on the grid edge have nothing in front of them
    let Some((r, c)) = view.neighbor(row, col, height, width) else {
        return own;
    };

    let obscured = Expr::var(model.elevation_at(r, c)).and(!Expr::var(model.elevation_at(row, col)));
    Expr::select(obscured, Expr::var(model.color_at(r, c)), own)
}

/// Observed color for every cell, row-major.
pub fn project(model: &IllusionModel, view: ViewDirection) -> Vec<Expr> {
    model
        .cells()
        .map(|(row, col)| observed_color(model, row, col, view))
        .collect()
}
