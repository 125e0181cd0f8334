// Weighted "at most k" over literals.
//
// The bound is a dynamic polynomial watchdog from `rustsat`, whose size grows
// with the number of distinct inputs and the bit width of the weights, not
// with the weight values themselves. Literals that occur more than once are
// merged into one input carrying the summed weight.

use std::collections::BTreeMap;

use rustsat::encodings::pb::{BoundUpper, DynamicPolyWatchdog};
use rustsat::instances::{BasicVarManager, Cnf};
use rustsat::types::Lit;

/// Require the total weight of true `inputs` to be at most `bound`.
pub(crate) fn encode_at_most(
    cnf: &mut Cnf,
    vars: &mut BasicVarManager,
    inputs: &[(Lit, u64)],
    bound: u64,
) -> anyhow::Result<()> {
    let total: u64 = inputs.iter().map(|&(_, w)| w).sum();
    if total <= bound {
        // Trivially satisfied
        return Ok(());
    }

    let mut merged: BTreeMap<Lit, usize> = BTreeMap::new();
    for &(lit, weight) in inputs.iter().filter(|&&(_, w)| w > 0) {
        *merged.entry(lit).or_default() += usize::try_from(weight)?;
    }
    let bound = usize::try_from(bound)?;

    let mut watchdog: DynamicPolyWatchdog = merged.into_iter().collect();
    watchdog.encode_ub(bound..=bound, cnf, vars)?;
    for unit in watchdog.enforce_ub(bound)? {
        cnf.add_unit(unit);
    }
    Ok(())
}
