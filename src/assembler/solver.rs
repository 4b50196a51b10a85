//! Bounded portioning in two phases.
//!
//! The first phase minimizes, over grams `q_i` in `[min_serving_g, max_serving_g]`:
//!
//! ```text
//! sum_k (achieved_k - target_k)^2 / band_k^2  +  RIDGE * sum_i ((q_i - mid) / span)^2
//! ```
//!
//! where `band_k = max(tolerance_fraction * target_k, tolerance_floor_g)` is the
//! tolerance band of macro `k`. The small ridge term pulls portions toward the
//! middle of the serving range and makes the optimum unique, so cyclic
//! coordinate descent with exact clamped line steps converges to the same
//! point on every run.
//!
//! A least-squares optimum can miss one band while another in-range point
//! meets them all. When the first phase lands outside tolerance, the second
//! phase solves the linear program
//!
//! ```text
//! minimize t  subject to  |achieved_k - target_k| <= t * band_k,  q_i in range
//! ```
//!
//! which finds a portioning within tolerance whenever one exists (`t <= 1`).

use log::debug;
use minilp::{ComparisonOp, LinearExpr, OptimizationDirection, Problem};

use crate::config::SolverConfig;
use crate::model::{Ingredient, MacroTotals};

/// Regularization toward mid-range portions
const RIDGE: f64 = 1e-6;
/// Sweeps stop once no portion moves more than this many grams
const CONVERGENCE_G: f64 = 1e-7;
const MAX_SWEEPS: usize = 20_000;
/// Tolerance check slack for floating point noise
const EPSILON: f64 = 1e-9;

/// Portions chosen by the solver and what they add up to
#[derive(Debug, Clone, PartialEq)]
pub struct Portioning {
    pub grams: Vec<f64>,
    pub totals: MacroTotals,
    pub within_tolerance: bool,
}

/// Allowed deviation for each of protein, carbs, fat
pub fn tolerance_bands(target: &MacroTotals, config: &SolverConfig) -> [f64; 3] {
    target
        .as_array()
        .map(|t| (t * config.tolerance_fraction).max(config.tolerance_floor_g))
}

/// Whether `achieved` is inside every tolerance band around `target`
pub fn within_tolerance(achieved: &MacroTotals, target: &MacroTotals, config: &SolverConfig) -> bool {
    let bands = tolerance_bands(target, config);
    let achieved = achieved.as_array();
    let target = target.as_array();
    (0..3).all(|k| (achieved[k] - target[k]).abs() <= bands[k] + EPSILON)
}

/// Macro grams contributed per gram of each ingredient
fn macro_columns(ingredients: &[Ingredient]) -> Vec<[f64; 3]> {
    ingredients
        .iter()
        .map(|i| [i.protein / 100.0, i.carbs / 100.0, i.fat / 100.0])
        .collect()
}

pub fn solve(ingredients: &[Ingredient], target: &MacroTotals, config: &SolverConfig) -> Portioning {
    let columns = macro_columns(ingredients);

    let closest = portioning(ingredients, least_squares(&columns, target, config), target, config);
    if closest.within_tolerance {
        return closest;
    }

    match min_max(&columns, target, config) {
        Some(grams) => {
            let banded = portioning(ingredients, grams, target, config);
            if banded.within_tolerance {
                banded
            } else {
                closest
            }
        }
        None => closest,
    }
}

/// First phase: band-weighted least squares by cyclic coordinate descent
fn least_squares(columns: &[[f64; 3]], target: &MacroTotals, config: &SolverConfig) -> Vec<f64> {
    let lo = config.min_serving_g;
    let hi = config.max_serving_g;
    let mid = (lo + hi) / 2.0;
    let span = (hi - lo).max(1.0);
    let ridge = RIDGE / (span * span);

    let bands = tolerance_bands(target, config);
    // Guard against a zero floor with a zero target
    let weights = bands.map(|band| 1.0 / band.max(EPSILON).powi(2));
    let wanted = target.as_array();

    let mut grams = vec![mid; columns.len()];
    let mut residual = [0.0; 3];
    for (column, q) in columns.iter().zip(&grams) {
        for k in 0..3 {
            residual[k] += column[k] * q;
        }
    }
    for k in 0..3 {
        residual[k] -= wanted[k];
    }

    let mut sweeps = 0;
    while sweeps < MAX_SWEEPS {
        sweeps += 1;
        let mut largest_move: f64 = 0.0;

        for (i, column) in columns.iter().enumerate() {
            let mut gradient = ridge * (grams[i] - mid);
            let mut curvature = ridge;
            for k in 0..3 {
                gradient += weights[k] * column[k] * residual[k];
                curvature += weights[k] * column[k] * column[k];
            }

            let next = (grams[i] - gradient / curvature).clamp(lo, hi);
            let delta = next - grams[i];
            if delta != 0.0 {
                for k in 0..3 {
                    residual[k] += column[k] * delta;
                }
                grams[i] = next;
                largest_move = largest_move.max(delta.abs());
            }
        }

        if largest_move < CONVERGENCE_G {
            break;
        }
    }

    debug!("Least-squares phase finished after {} sweeps", sweeps);
    grams
}

/// Second phase: minimize the largest band-scaled deviation.
///
/// Returns `None` when the program has no solution, which only happens with a
/// zero-width band that no in-range portioning can hit exactly.
fn min_max(columns: &[[f64; 3]], target: &MacroTotals, config: &SolverConfig) -> Option<Vec<f64>> {
    let bands = tolerance_bands(target, config);
    let wanted = target.as_array();

    let mut problem = Problem::new(OptimizationDirection::Minimize);
    let portions: Vec<_> = columns
        .iter()
        .map(|_| problem.add_var(0.0, (config.min_serving_g, config.max_serving_g)))
        .collect();
    let slack = problem.add_var(1.0, (0.0, f64::INFINITY));

    for k in 0..3 {
        // achieved_k - band_k * t <= target_k
        let mut upper = LinearExpr::empty();
        // achieved_k + band_k * t >= target_k
        let mut lower = LinearExpr::empty();
        for (column, var) in columns.iter().zip(&portions) {
            upper.add(*var, column[k]);
            lower.add(*var, column[k]);
        }
        upper.add(slack, -bands[k]);
        lower.add(slack, bands[k]);
        problem.add_constraint(upper, ComparisonOp::Le, wanted[k]);
        problem.add_constraint(lower, ComparisonOp::Ge, wanted[k]);
    }

    match problem.solve() {
        Ok(solution) => {
            debug!("Min-max phase reached {:.3} of the tolerance band", solution[slack]);
            Some(portions.iter().map(|var| solution[*var]).collect())
        }
        Err(e) => {
            debug!("Min-max phase found no portioning: {:?}", e);
            None
        }
    }
}

/// Round to tenths of a gram and check tolerance on what is reported
fn portioning(
    ingredients: &[Ingredient],
    mut grams: Vec<f64>,
    target: &MacroTotals,
    config: &SolverConfig,
) -> Portioning {
    for q in grams.iter_mut() {
        *q = ((*q * 10.0).round() / 10.0).clamp(config.min_serving_g, config.max_serving_g);
    }

    let mut totals = MacroTotals::default();
    for (ingredient, q) in ingredients.iter().zip(&grams) {
        totals.add_portion(ingredient, *q);
    }
    let within = within_tolerance(&totals, target, config);

    debug!(
        "Portioned {:.1}g protein, {:.1}g carbs, {:.1}g fat (within tolerance: {})",
        totals.protein, totals.carbs, totals.fat, within
    );

    Portioning {
        grams,
        totals,
        within_tolerance: within,
    }
}
