//! Quantity-to-color binning.
//!
//! This module maps a sequence of numeric quantities onto a discrete color
//! palette, either by equal-width bins anchored through a midpoint
//! (proportional) or by equal-population bins (quantile). It also derives
//! the display metadata choropleth legends need: fenceposts, labels and
//! per-bin counts.

use tracing::debug;

use crate::color::{greyscale, parse_hex_rgb};
use crate::error::{MinardError, Result};

/// Bins quantities into palette colors and keeps the derived metadata.
///
/// The derived fields (`fenceposts`, `labels`, `fencepost_labels`,
/// `colors_out`, `bin_counts`) are computed at construction. Mutating
/// `proportional`, `bin_min`, `bin_mid`, `bin_max`, `decimals` or `palette`
/// leaves them stale until [`ColorBinner::recalc`] is called; the object
/// remains valid, just out of date.
#[derive(Debug, Clone)]
pub struct ColorBinner {
    /// Input quantities, one per entity; duplicates allowed
    pub quantities: Vec<f64>,
    /// One color per bin, in `#rrggbb` form
    pub palette: Vec<String>,
    /// Equal-width bins if true, equal-population bins if false
    pub proportional: bool,
    /// Lower bound of the binned range
    pub bin_min: f64,
    /// Anchor for the middle fencepost of proportional binning
    pub bin_mid: f64,
    /// Upper bound of the binned range
    pub bin_max: f64,
    /// Round fenceposts to this many decimal places, if set
    pub decimals: Option<u32>,
    /// Bin boundaries, `palette.len() + 1` entries, non-decreasing
    pub fenceposts: Vec<f64>,
    /// One `"{lower}-{upper}"` label per bin
    pub labels: Vec<String>,
    /// One stringified boundary per fencepost
    pub fencepost_labels: Vec<String>,
    /// Output colors, parallel to `quantities`
    pub colors_out: Vec<String>,
    /// Number of quantities landing in each bin
    pub bin_counts: Vec<usize>,
    /// Two-tone companion colors from [`ColorBinner::calc_complements`]
    pub complements: Option<Vec<String>>,
}

impl ColorBinner {
    /// Create a binner and immediately compute fenceposts, labels and colors.
    ///
    /// Fails if `quantities` or `palette` is empty: an empty quantity
    /// sequence has no min/max to bin over.
    pub fn new(
        quantities: Vec<f64>,
        palette: Vec<String>,
        proportional: bool,
        decimals: Option<u32>,
    ) -> Result<Self> {
        if quantities.is_empty() {
            return Err(MinardError::InvalidParameter {
                param: "quantities".to_string(),
                message: "cannot bin an empty quantity sequence".to_string(),
            });
        }
        if palette.is_empty() {
            return Err(MinardError::InvalidParameter {
                param: "palette".to_string(),
                message: "palette must contain at least one color".to_string(),
            });
        }

        let bin_min = quantities.iter().cloned().fold(f64::INFINITY, f64::min);
        let bin_max = quantities.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

        let mut binner = Self {
            quantities,
            palette,
            proportional,
            bin_min,
            bin_mid: (bin_min + bin_max) / 2.0,
            bin_max,
            decimals,
            fenceposts: Vec::new(),
            labels: Vec::new(),
            fencepost_labels: Vec::new(),
            colors_out: Vec::new(),
            bin_counts: Vec::new(),
            complements: None,
        };
        binner.recalc(true);
        Ok(binner)
    }

    /// Recompute derived state from the current attributes.
    ///
    /// Must be called explicitly after mutating `proportional`,
    /// `bin_min`/`bin_mid`/`bin_max`, `decimals` or `palette`. With
    /// `recompute_fenceposts == false` only labels and colors are rebuilt
    /// from the existing fenceposts.
    ///
    /// Quantile binning degrades on duplicate-heavy data: clustered values
    /// can produce equal adjacent fenceposts and therefore empty bins. This
    /// is inherent to the method and is not repaired here.
    pub fn recalc(&mut self, recompute_fenceposts: bool) {
        if recompute_fenceposts {
            self.calc_fenceposts();
        }
        self.calc_labels();
        self.calc_colors();
        debug!(
            bins = self.palette.len(),
            proportional = self.proportional,
            "Recalculated binning"
        );
    }

    /// Set the rounding precision for fenceposts.
    ///
    /// Takes effect on the next [`ColorBinner::recalc`]. Aggressive rounding
    /// may create tied or inverted fenceposts; that is accepted behavior.
    pub fn set_decimals(&mut self, decimals: Option<u32>) {
        self.decimals = decimals;
    }

    fn calc_fenceposts(&mut self) {
        let n = self.palette.len();
        self.fenceposts = if self.proportional {
            // Equal-width bins anchored through bin_mid. The fencepost at
            // index n/2 (integer floor) is pinned to bin_mid exactly, so odd
            // palettes get a single coincident fencepost as well.
            let half = n / 2;
            let step_lo = (self.bin_mid - self.bin_min) / n as f64 * 2.0;
            let step_hi = (self.bin_max - self.bin_mid) / n as f64 * 2.0;
            (0..=n)
                .map(|i| {
                    if i < half {
                        self.bin_min + i as f64 * step_lo
                    } else if i == half {
                        self.bin_mid
                    } else {
                        self.bin_max - (n - i) as f64 * step_hi
                    }
                })
                .collect()
        } else {
            let mut sorted = self.quantities.clone();
            sorted.sort_by(f64::total_cmp);
            let len = sorted.len();
            let mut posts: Vec<f64> = (0..n).map(|i| sorted[i * len / n]).collect();
            posts.push(sorted[len - 1]);
            posts
        };

        if let Some(decimals) = self.decimals {
            let factor = 10f64.powi(decimals as i32);
            for post in &mut self.fenceposts {
                *post = (*post * factor).round() / factor;
            }
        }
    }

    fn calc_labels(&mut self) {
        self.labels = self
            .fenceposts
            .windows(2)
            .map(|pair| format!("{}-{}", fmt_quantity(pair[0]), fmt_quantity(pair[1])))
            .collect();
        self.fencepost_labels = self.fenceposts.iter().map(|q| fmt_quantity(*q)).collect();
    }

    fn calc_colors(&mut self) {
        let n = self.palette.len();
        self.colors_out = Vec::with_capacity(self.quantities.len());
        self.bin_counts = vec![0; n];
        for qty in &self.quantities {
            // Highest interior fencepost the quantity meets or exceeds. The
            // final fencepost is never checked, which closes the top bin.
            let mut bin = 0;
            for i in 1..n {
                if *qty >= self.fenceposts[i] {
                    bin = i;
                }
            }
            self.colors_out.push(self.palette[bin].clone());
            self.bin_counts[bin] += 1;
        }
    }

    /// The bin index a quantity falls into, given the current fenceposts.
    pub fn bin_assignment(&self, quantity: f64) -> usize {
        let mut bin = 0;
        for i in 1..self.palette.len() {
            if quantity >= self.fenceposts[i] {
                bin = i;
            }
        }
        bin
    }

    /// Assign a two-tone companion color for each output color.
    ///
    /// Colors whose greyscale weight falls below `cutoff` (darker) receive
    /// `color_below`, the rest `color_above`. Typical use is picking a
    /// readable label color for each cell. Fails on malformed hex colors.
    pub fn calc_complements(
        &mut self,
        cutoff: f64,
        color_below: &str,
        color_above: &str,
    ) -> Result<()> {
        let mut complements = Vec::with_capacity(self.colors_out.len());
        for color in &self.colors_out {
            let grey = greyscale(parse_hex_rgb(color)?);
            if grey < cutoff {
                complements.push(color_below.to_string());
            } else {
                complements.push(color_above.to_string());
            }
        }
        self.complements = Some(complements);
        Ok(())
    }

    /// Render the count-per-bin table as text, one row per bin.
    pub fn bin_summary(&self) -> String {
        let mut out = String::from("count  label\n=====  =====\n");
        for (label, count) in self.labels.iter().zip(&self.bin_counts) {
            out.push_str(&format!("{:5}  {}\n", count, label));
        }
        out
    }
}

/// Format a quantity for labels. Default float formatting writes integral
/// values without a trailing `.0`, so `1.0` labels as `1`.
fn fmt_quantity(q: f64) -> String {
    format!("{}", q)
}
