use super::Modifier;
use crate::core::models::system::System;
use crate::core::models::vector::Vec3;
use tracing::debug;

/// Saturation applied to the summed coupling of a single monomer.
pub const DEFAULT_CLAMP: f64 = 10.0;

/// Global pairwise hydrodynamic coupling through the Oseen mobility kernel.
///
/// Couples every monomer of every chain to every other monomer, O(N²) in the
/// total monomer count. For a target monomer `i` and each source `j ≠ i`, with
/// `d = loc[j] - loc[i]`:
///
/// ```text
/// term = (k / |d|) · (rate[j] + d · (d·rate[j]) / |d|²)
/// ```
///
/// Each term is rescaled so its magnitude never exceeds `|rate[j]|`, coincident
/// pairs (`|d| = 0`) are skipped, and the summed coupling is rescaled so its
/// magnitude never exceeds the clamp. The new rate of `i` is its current rate
/// plus the summed coupling.
///
/// Unlike every other modifier this one *replaces* the rate field. All new rates
/// are computed into an owned scratch buffer before any of them is written back,
/// so the pairwise pass only ever reads the rates as they were on entry.
#[derive(Debug, Clone, PartialEq)]
pub struct OseenTensor {
    pub coupling: f64,
    pub clamp: f64,
    scratch: Vec<Vec3>,
}

impl OseenTensor {
    pub fn new(coupling: f64) -> Self {
        Self {
            coupling,
            clamp: DEFAULT_CLAMP,
            scratch: Vec::new(),
        }
    }

    pub fn with_clamp(mut self, clamp: f64) -> Self {
        self.clamp = clamp;
        self
    }

    /// Coupling carried from a source monomer to a target monomer.
    ///
    /// Returns `None` for coincident monomers.
    pub(crate) fn pair_term(&self, target_loc: Vec3, source_loc: Vec3, source_rate: Vec3) -> Option<Vec3> {
        let d = source_loc - target_loc;
        let dist2 = d.dot(&d);
        if dist2 == 0.0 {
            return None;
        }
        let kernel = source_rate + d * (d.dot(&source_rate) / dist2);
        let scale = self.coupling / dist2.sqrt();
        let (kernel_norm, max) = (kernel.norm(), source_rate.norm());
        // Clamp before scaling: `scale` is unbounded as the monomers close in.
        if kernel_norm * scale.abs() > max {
            Some(kernel * (scale.signum() * max / kernel_norm))
        } else {
            Some(kernel * scale)
        }
    }

    /// Summed, clamped coupling received by the monomer at flat index `target`.
    pub(crate) fn coupling_sum(&self, stage: &System, target: usize, target_loc: Vec3) -> Vec3 {
        let mut sum = Vec3::zeros();
        for (source, (loc, rate)) in stage.locations().zip(stage.rates()).enumerate() {
            if source == target {
                continue;
            }
            if let Some(term) = self.pair_term(target_loc, *loc, *rate) {
                sum += term;
            }
        }
        clamp_magnitude(sum, self.clamp)
    }
}

#[inline]
fn clamp_magnitude(v: Vec3, max: f64) -> Vec3 {
    if v.norm() > max {
        v.normalize() * max
    } else {
        v
    }
}

impl Modifier for OseenTensor {
    fn name(&self) -> &'static str {
        "oseen"
    }

    fn initialize(&mut self, system: &System) {
        self.scratch = vec![Vec3::zeros(); system.monomer_count()];
        debug!(
            monomers = self.scratch.len(),
            "Allocated hydrodynamic scratch buffer."
        );
    }

    fn apply(&mut self, stage: &mut System) {
        // The buffer is sized once, at initialization.
        assert_eq!(
            self.scratch.len(),
            stage.monomer_count(),
            "oseen scratch buffer does not match the stage's monomer count"
        );

        for (target, (loc, rate)) in stage.locations().zip(stage.rates()).enumerate() {
            let coupled = *rate + self.coupling_sum(stage, target, *loc);
            self.scratch[target] = coupled;
        }

        let mut values = self.scratch.iter();
        for chain in stage.chains_mut() {
            for (rate, value) in chain.rates_mut().iter_mut().zip(values.by_ref()) {
                rate.copy_from(value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::forces::test_utils::*;
    use crate::core::models::chain::Chain;

    fn initialized(coupling: f64, system: &System) -> OseenTensor {
        let mut oseen = OseenTensor::new(coupling);
        oseen.initialize(system);
        oseen
    }

    fn set_rates(system: &mut System, rates: &[Vec3]) {
        let mut values = rates.iter();
        for chain in system.chains_mut() {
            for (rate, value) in chain.rates_mut().iter_mut().zip(values.by_ref()) {
                *rate = *value;
            }
        }
    }

    #[test]
    fn single_monomer_passes_its_rate_through() {
        let mut system = single_chain_system(vec![Vec3::new(1.0, 2.0, 3.0)]);
        set_rates(&mut system, &[Vec3::new(40.0, -3.0, 0.5)]);
        let mut oseen = initialized(0.1, &system);
        oseen.apply(&mut system);

        assert_eq!(system.chains()[0].rates()[0], Vec3::new(40.0, -3.0, 0.5));
    }

    #[test]
    fn pair_term_matches_oseen_kernel() {
        let oseen = OseenTensor::new(0.5);
        // d = (2,0,0), |d| = 2, rate = (1,1,0): d·rate = 2, d·(d·rate)/|d|² = (1,0,0).
        // (k/|d|)·((1,1,0) + (1,0,0)) = 0.25·(2,1,0) = (0.5,0.25,0); |term| < |rate|.
        let term = oseen
            .pair_term(Vec3::zeros(), Vec3::new(2.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 0.0))
            .unwrap();
        assert!(vec_approx_equal(term, Vec3::new(0.5, 0.25, 0.0)));
    }

    #[test]
    fn pair_term_never_exceeds_source_rate_magnitude() {
        let oseen = OseenTensor::new(1000.0);
        let source_rate = Vec3::new(0.3, -0.4, 0.0);
        let term = oseen
            .pair_term(Vec3::zeros(), Vec3::new(0.1, 0.2, 0.0), source_rate)
            .unwrap();

        assert!(term.norm() <= source_rate.norm() + TOLERANCE);
        assert!((term.norm() - source_rate.norm()).abs() < TOLERANCE);
    }

    #[test]
    fn nearly_coincident_monomers_stay_finite() {
        let oseen = OseenTensor::new(0.1);
        let source_rate = Vec3::new(0.0, 2.0, 0.0);
        for gap in [1e-100, 1e-155, 1e-160, 1e-161] {
            let term = oseen
                .pair_term(Vec3::zeros(), Vec3::new(gap, 0.0, 0.0), source_rate)
                .unwrap();
            assert!(term.is_finite(), "gap {gap} gave {term}");
            assert!((term.norm() - source_rate.norm()).abs() < 1e-9, "gap {gap} gave {term}");
        }
        assert!(
            oseen
                .pair_term(Vec3::zeros(), Vec3::new(1e-170, 0.0, 0.0), source_rate)
                .is_none()
        );
    }

    #[test]
    fn coincident_monomers_are_skipped() {
        let oseen = OseenTensor::new(1.0);
        assert!(
            oseen
                .pair_term(Vec3::new(1.0, 1.0, 1.0), Vec3::new(1.0, 1.0, 1.0), Vec3::new(5.0, 0.0, 0.0))
                .is_none()
        );

        let mut system = single_chain_system(vec![Vec3::zeros(), Vec3::zeros()]);
        set_rates(&mut system, &[Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 2.0, 0.0)]);
        let mut oseen = initialized(1.0, &system);
        oseen.apply(&mut system);

        assert_eq!(system.chains()[0].rates()[0], Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(system.chains()[0].rates()[1], Vec3::new(0.0, 2.0, 0.0));
    }

    #[test]
    fn summed_coupling_never_exceeds_clamp() {
        let sources: Vec<Vec3> = (1..=30).map(|i| Vec3::new(i as f64 * 0.01, 0.0, 0.0)).collect();
        let mut locations = vec![Vec3::zeros()];
        locations.extend(sources);
        let mut system = single_chain_system(locations);
        let rates: Vec<Vec3> = std::iter::once(Vec3::zeros())
            .chain((0..30).map(|_| Vec3::new(100.0, 0.0, 0.0)))
            .collect();
        set_rates(&mut system, &rates);

        let oseen = initialized(50.0, &system);
        let sum = oseen.coupling_sum(&system, 0, Vec3::zeros());
        assert!((sum.norm() - DEFAULT_CLAMP).abs() < TOLERANCE);

        let small = OseenTensor::new(50.0).with_clamp(2.5);
        assert!(small.coupling_sum(&system, 0, Vec3::zeros()).norm() <= 2.5 + TOLERANCE);
    }

    #[test]
    fn coupling_spans_chains_and_replaces_rates() {
        let mut system = System::from_chains(vec![
            Chain::from_locations(vec![Vec3::zeros()]),
            Chain::from_locations(vec![Vec3::new(2.0, 0.0, 0.0)]),
        ]);
        set_rates(&mut system, &[Vec3::zeros(), Vec3::new(1.0, 1.0, 0.0)]);
        let mut oseen = initialized(0.5, &system);
        oseen.apply(&mut system);

        // The first monomer receives the kernel from the second; the second has a
        // zero-rate source, so only its own rate survives. Replacement means no
        // doubling of the input rate.
        assert!(vec_approx_equal(system.chains()[0].rates()[0], Vec3::new(0.5, 0.25, 0.0)));
        assert!(vec_approx_equal(system.chains()[1].rates()[0], Vec3::new(1.0, 1.0, 0.0)));
    }

    #[test]
    fn write_back_happens_after_all_sums_are_computed() {
        let mut system = single_chain_system(vec![Vec3::zeros(), Vec3::new(1.0, 0.0, 0.0)]);
        set_rates(&mut system, &[Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 1.0, 0.0)]);
        let mut oseen = initialized(0.5, &system);
        oseen.apply(&mut system);

        // Both see the other's entry rate (0,1,0), d ⟂ rate: term = 0.5·(0,1,0).
        // A partially updated buffer would give monomer 1 a larger term.
        let rates = system.chains()[0].rates();
        assert!(vec_approx_equal(rates[0], Vec3::new(0.0, 1.5, 0.0)));
        assert!(vec_approx_equal(rates[1], Vec3::new(0.0, 1.5, 0.0)));
    }
}
