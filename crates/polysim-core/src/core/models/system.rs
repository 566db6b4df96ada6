use super::chain::Chain;
use super::vector::Vec3;

/// The full ordered collection of chains being simulated.
///
/// A chain's identity is its index, which is its insertion order. Once the
/// integrator adopts a system, no chain can be added or removed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct System {
    chains: Vec<Chain>,
}

impl System {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_chains(chains: Vec<Chain>) -> Self {
        Self { chains }
    }

    /// Appends a chain and returns its index.
    pub fn add_chain(&mut self, chain: Chain) -> usize {
        self.chains.push(chain);
        self.chains.len() - 1
    }

    pub fn chains(&self) -> &[Chain] {
        &self.chains
    }

    pub fn chains_mut(&mut self) -> &mut [Chain] {
        &mut self.chains
    }

    pub fn chain(&self, index: usize) -> Option<&Chain> {
        self.chains.get(index)
    }

    pub fn chain_mut(&mut self, index: usize) -> Option<&mut Chain> {
        self.chains.get_mut(index)
    }

    #[inline]
    pub fn chain_count(&self) -> usize {
        self.chains.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    /// Total number of monomers across all chains.
    pub fn monomer_count(&self) -> usize {
        self.chains.iter().map(Chain::len).sum()
    }

    /// Chain lengths in index order.
    pub fn shape(&self) -> Vec<usize> {
        self.chains.iter().map(Chain::len).collect()
    }

    /// Whether `other` has the same chain count and chain lengths.
    pub fn same_shape(&self, other: &System) -> bool {
        self.chains.len() == other.chains.len()
            && self
                .chains
                .iter()
                .zip(other.chains.iter())
                .all(|(a, b)| a.len() == b.len())
    }

    /// A system of the same shape with every monomer at the origin and zero rates.
    pub fn zeroed_like(&self) -> Self {
        Self {
            chains: self.chains.iter().map(|c| Chain::new(c.len())).collect(),
        }
    }

    pub fn zero_rates(&mut self) {
        self.chains.iter_mut().for_each(Chain::zero_rates);
    }

    /// Iterates over every monomer location, chain by chain.
    pub fn locations(&self) -> impl Iterator<Item = &Vec3> + '_ {
        self.chains.iter().flat_map(|c| c.locations().iter())
    }

    /// Index of the first chain holding a NaN or infinite location.
    pub fn first_non_finite_chain(&self) -> Option<usize> {
        self.chains
            .iter()
            .position(|c| !c.locations().iter().all(Vec3::is_finite))
    }

    /// Iterates over every monomer rate, chain by chain.
    pub fn rates(&self) -> impl Iterator<Item = &Vec3> + '_ {
        self.chains.iter().flat_map(|c| c.rates().iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_chain_system() -> System {
        let mut system = System::new();
        system.add_chain(Chain::from_locations(vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
        ]));
        system.add_chain(Chain::from_locations(vec![
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(2.0, 1.0, 0.0),
        ]));
        system
    }

    #[test]
    fn add_chain_returns_insertion_index() {
        let mut system = System::new();
        assert_eq!(system.add_chain(Chain::new(3)), 0);
        assert_eq!(system.add_chain(Chain::new(4)), 1);
        assert_eq!(system.chain_count(), 2);
    }

    #[test]
    fn monomer_count_sums_chain_lengths() {
        assert_eq!(two_chain_system().monomer_count(), 5);
    }

    #[test]
    fn shape_lists_chain_lengths_in_order() {
        assert_eq!(two_chain_system().shape(), vec![2, 3]);
    }

    #[test]
    fn zeroed_like_preserves_shape_only() {
        let system = two_chain_system();
        let scratch = system.zeroed_like();
        assert!(system.same_shape(&scratch));
        assert!(scratch.locations().all(|l| *l == Vec3::zeros()));
    }

    #[test]
    fn same_shape_detects_length_mismatch() {
        let system = two_chain_system();
        let other = System::from_chains(vec![Chain::new(2), Chain::new(4)]);
        assert!(!system.same_shape(&other));

        let fewer = System::from_chains(vec![Chain::new(2)]);
        assert!(!system.same_shape(&fewer));
    }

    #[test]
    fn locations_iterate_chain_by_chain() {
        let xs: Vec<f64> = two_chain_system().locations().map(|l| l.x()).collect();
        assert_eq!(xs, vec![0.0, 1.0, 0.0, 1.0, 2.0]);
    }

    #[test]
    fn first_non_finite_chain_finds_the_diverged_chain() {
        let mut system = two_chain_system();
        assert_eq!(system.first_non_finite_chain(), None);

        system.chain_mut(1).unwrap().locations_mut()[2] = Vec3::new(f64::NAN, 0.0, 0.0);
        assert_eq!(system.first_non_finite_chain(), Some(1));
    }

    #[test]
    fn chain_lookup_out_of_range_is_none() {
        assert!(two_chain_system().chain(5).is_none());
    }
}
