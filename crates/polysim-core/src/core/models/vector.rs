use nalgebra::Vector3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// A three-component `f64` vector used for monomer locations and rates.
///
/// Addition, subtraction and scaling go through the `std::ops` operators and,
/// like `dot`, `norm` and `normalize`, return new values; [`Vec3::zero`] and
/// [`Vec3::copy_from`] mutate in place. The type is
/// `Copy` and serializes as a plain `[x, y, z]` array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct Vec3(Vector3<f64>);

impl Vec3 {
    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self(Vector3::new(x, y, z))
    }

    #[inline]
    pub fn zeros() -> Self {
        Self(Vector3::zeros())
    }

    /// Draws a random direction.
    ///
    /// Each component is sampled uniformly in `[-0.5, 0.5)` and the result is
    /// normalized. The (practically unreachable) all-zero draw comes back as the
    /// zero vector, following [`Vec3::normalize`].
    pub fn random_unit<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::new(
            rng.gen_range(-0.5..0.5),
            rng.gen_range(-0.5..0.5),
            rng.gen_range(-0.5..0.5),
        )
        .normalize()
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.0.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.0.y
    }

    #[inline]
    pub fn z(&self) -> f64 {
        self.0.z
    }

    /// True when no component is NaN or infinite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|c| c.is_finite())
    }

    /// Sum of componentwise products.
    #[inline]
    pub fn dot(&self, other: &Vec3) -> f64 {
        self.0.dot(&other.0)
    }

    /// Euclidean length.
    #[inline]
    pub fn norm(&self) -> f64 {
        self.0.norm()
    }

    /// Returns the unit vector with the same direction.
    ///
    /// A zero-length vector is returned unchanged.
    #[inline]
    pub fn normalize(&self) -> Vec3 {
        let norm = self.norm();
        if norm == 0.0 {
            return *self;
        }
        Self(self.0 / norm)
    }

    #[inline]
    pub fn zero(&mut self) {
        self.0.fill(0.0);
    }

    #[inline]
    pub fn copy_from(&mut self, other: &Vec3) {
        self.0.copy_from(&other.0);
    }

    pub fn as_array(&self) -> [f64; 3] {
        [self.0.x, self.0.y, self.0.z]
    }
}

impl Default for Vec3 {
    fn default() -> Self {
        Self::zeros()
    }
}

impl From<[f64; 3]> for Vec3 {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<Vec3> for [f64; 3] {
    fn from(v: Vec3) -> Self {
        v.as_array()
    }
}

impl From<Vector3<f64>> for Vec3 {
    fn from(v: Vector3<f64>) -> Self {
        Self(v)
    }
}

impl From<Vec3> for Vector3<f64> {
    fn from(v: Vec3) -> Self {
        v.0
    }
}

impl Add for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Vec3;

    fn mul(self, rhs: f64) -> Self::Output {
        Self(self.0 * rhs)
    }
}

impl Mul<Vec3> for f64 {
    type Output = Vec3;

    fn mul(self, rhs: Vec3) -> Self::Output {
        Vec3(rhs.0 * self)
    }
}

impl Neg for Vec3 {
    type Output = Vec3;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Vec3 {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.0.x, self.0.y, self.0.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const TOLERANCE: f64 = 1e-12;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    #[test]
    fn add_and_sub_are_componentwise() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(0.5, -1.0, 4.0);
        assert_eq!(a + b, Vec3::new(1.5, 1.0, 7.0));
        assert_eq!(a - b, Vec3::new(0.5, 3.0, -1.0));

        let mut c = a;
        c += b;
        c -= b;
        assert_eq!(c, a);
        assert_eq!(-a, Vec3::new(-1.0, -2.0, -3.0));
    }

    #[test]
    fn mul_scales_every_component() {
        let v = Vec3::new(1.0, -2.0, 0.5);
        assert_eq!(v * 2.0, Vec3::new(2.0, -4.0, 1.0));
        assert_eq!(2.0 * v, v * 2.0);
    }

    #[test]
    fn dot_is_sum_of_componentwise_products() {
        let a = Vec3::new(2.0, 3.0, 4.0);
        let b = Vec3::new(5.0, 6.0, 7.0);
        // 10 + 18 + 28
        assert_eq!(a.dot(&b), 56.0);
    }

    #[test]
    fn dot_of_orthogonal_vectors_is_zero() {
        let a = Vec3::new(1.0, 0.0, 0.0);
        let b = Vec3::new(0.0, 5.0, -3.0);
        assert_eq!(a.dot(&b), 0.0);
    }

    #[test]
    fn norm_returns_euclidean_length() {
        assert!(f64_approx_equal(Vec3::new(3.0, 4.0, 12.0).norm(), 13.0));
    }

    #[test]
    fn normalize_returns_unit_vector() {
        let n = Vec3::new(0.0, 3.0, 4.0).normalize();
        assert!(f64_approx_equal(n.norm(), 1.0));
        assert!(f64_approx_equal(n.y(), 0.6));
        assert!(f64_approx_equal(n.z(), 0.8));
    }

    #[test]
    fn normalize_of_zero_vector_returns_it_unchanged() {
        let v = Vec3::zeros();
        assert_eq!(v.normalize(), v);
    }

    #[test]
    fn zero_and_copy_from_mutate_in_place() {
        let mut v = Vec3::new(1.0, 2.0, 3.0);
        v.zero();
        assert_eq!(v, Vec3::zeros());

        v.copy_from(&Vec3::new(-1.0, 0.5, 9.0));
        assert_eq!(v, Vec3::new(-1.0, 0.5, 9.0));
    }

    #[test]
    fn random_unit_has_unit_length() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            assert!(f64_approx_equal(Vec3::random_unit(&mut rng).norm(), 1.0));
        }
    }

    #[test]
    fn is_finite_rejects_nan_and_infinity() {
        assert!(Vec3::new(1.0, -2.0, 3.0).is_finite());
        assert!(!Vec3::new(f64::NAN, 0.0, 0.0).is_finite());
        assert!(!Vec3::new(0.0, f64::INFINITY, 0.0).is_finite());
    }

    #[test]
    fn display_is_comma_separated() {
        assert_eq!(Vec3::new(1.0, -2.5, 0.0).to_string(), "1,-2.5,0");
    }

    #[test]
    fn converts_to_and_from_arrays() {
        let v: Vec3 = [1.0, 2.0, 3.0].into();
        let arr: [f64; 3] = v.into();
        assert_eq!(arr, [1.0, 2.0, 3.0]);
    }
}
