//! SAT-based search for height-field illusions.
//!
//! A grid of cells, each either raised or flat and either painted or blank,
//! can look like different pictures depending on where it is viewed from:
//! tilting the view one cell toward a direction lets a raised cell hide the
//! flat cell behind it. Given one target [`Pattern`] per [`ViewDirection`],
//! this crate searches for the single elevation/color assignment that
//! matches the targets as well as possible.
//!
//! # Pipeline
//!
//! 1. Parse targets into [`Pattern`]s (or take a [`presets`] pattern).
//! 2. Create an [`IllusionModel`] of the same size and wrap it in a
//!    [`ConstraintRegistry`].
//! 3. Register each target against its view. Every cell becomes one
//!    weighted soft constraint: "the color observed here equals the
//!    target". Observed colors are symbolic [`Expr`]s built by
//!    [`project::observed_color`].
//! 4. Solve once with an [`Optimizer`], normally [`MinisatOptimizer`],
//!    which maximizes the satisfied weight.
//! 5. Render the [`Solution`] with [`render::render_direct`] and
//!    [`render::render_view`], which fold the same observed-color
//!    expressions over the solved values.

pub mod error;
pub mod expr;
pub mod maxsat;
pub mod model;
pub mod optimizer;
pub mod pattern;
pub mod presets;
pub mod project;
pub mod registry;
pub mod render;
mod suggest;
pub mod view;

pub use error::{FormatError, IllusionError, Result};
pub use expr::{Expr, Unknown, Valuation};
pub use maxsat::{MinisatOptimizer, SolveConfig, SolveStats};
pub use model::IllusionModel;
pub use optimizer::{CheckResult, Optimizer, Problem, SoftConstraint, Solution};
pub use pattern::Pattern;
pub use registry::{Constraint, ConstraintRegistry};
pub use view::ViewDirection;
