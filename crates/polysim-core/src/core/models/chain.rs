use super::vector::Vec3;
use rand::Rng;

/// A single bead-chain polymer.
///
/// Monomers are stored as two parallel arrays: the location of every bead and
/// its rate (the derivative of location in the overdamped model). Index order
/// is backbone order, and the length is fixed at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Chain {
    locations: Vec<Vec3>,
    rates: Vec<Vec3>,
}

impl Chain {
    /// Creates a chain with every monomer at the origin and a zero rate.
    pub fn new(length: usize) -> Self {
        Self {
            locations: vec![Vec3::zeros(); length],
            rates: vec![Vec3::zeros(); length],
        }
    }

    /// Creates a chain by random walk from the origin.
    ///
    /// Every monomer is one random unit step away from its predecessor (monomer 0
    /// from the origin), and every rate is an independent random unit vector.
    pub fn random_walk<R: Rng + ?Sized>(length: usize, rng: &mut R) -> Self {
        let mut chain = Self::new(length);
        let mut last = Vec3::zeros();
        for (location, rate) in chain.locations.iter_mut().zip(chain.rates.iter_mut()) {
            *location = last + Vec3::random_unit(rng);
            last = *location;
            *rate = Vec3::random_unit(rng);
        }
        chain
    }

    /// Re-seeds the locations in place by random walk starting at `origin`.
    ///
    /// Monomer 0 is placed one random unit step from `origin`, every later
    /// monomer one random unit step from the previous one. Rates are untouched.
    pub fn random_walk_from<R: Rng + ?Sized>(&mut self, origin: Vec3, rng: &mut R) -> &mut Self {
        let mut last = origin;
        for location in self.locations.iter_mut() {
            *location = last + Vec3::random_unit(rng);
            last = *location;
        }
        self
    }

    /// Replaces every rate with an independent random unit vector.
    pub fn randomize_rates<R: Rng + ?Sized>(&mut self, rng: &mut R) -> &mut Self {
        for rate in self.rates.iter_mut() {
            *rate = Vec3::random_unit(rng);
        }
        self
    }

    /// Builds a chain from explicit locations, with zero rates.
    pub fn from_locations(locations: Vec<Vec3>) -> Self {
        let rates = vec![Vec3::zeros(); locations.len()];
        Self { locations, rates }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn locations(&self) -> &[Vec3] {
        &self.locations
    }

    pub fn rates(&self) -> &[Vec3] {
        &self.rates
    }

    pub fn locations_mut(&mut self) -> &mut [Vec3] {
        &mut self.locations
    }

    pub fn rates_mut(&mut self) -> &mut [Vec3] {
        &mut self.rates
    }

    /// Borrows the locations for reading and the rates for writing at once.
    #[inline]
    pub fn split_mut(&mut self) -> (&[Vec3], &mut [Vec3]) {
        (&self.locations, &mut self.rates)
    }

    /// Borrows the locations for writing and the rates for reading at once.
    #[inline]
    pub fn split_locations_mut(&mut self) -> (&mut [Vec3], &[Vec3]) {
        (&mut self.locations, &self.rates)
    }

    pub fn zero_rates(&mut self) {
        self.rates.iter_mut().for_each(Vec3::zero);
    }
}
