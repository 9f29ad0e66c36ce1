//! Greatest common divisor and Bezout coefficients.

use std::cmp::Ordering;

use crate::integer_cache::ONE;
use crate::integer_constants::Limb;
use crate::limb;
use crate::Integer;

/// Result of [`Integer::xgcd`]: `s * a + t * b == g`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Xgcd {
    pub g: Integer,
    pub s: Integer,
    pub t: Integer,
}

impl Integer {
    /// Odd part of the magnitude, as a normalized limb vector.
    fn odd_magnitude(&self, twos: u64) -> Vec<Limb> {
        self.abs().shr_mag(twos).limbs().to_vec()
    }

    /// Greatest common divisor. Always non-negative; `gcd(0, 0) == 0`.
    pub fn gcd(&self, other: &Integer) -> Integer {
        if self.is_zero() {
            return other.abs();
        }
        if other.is_zero() {
            return self.abs();
        }

        let self_twos = self.trailing_zeros();
        let other_twos = other.trailing_zeros();
        let u = self.odd_magnitude(self_twos);
        let v = other.odd_magnitude(other_twos);
        // the kernel takes the larger magnitude first
        let (u, v) = if limb::cmp_mag(&u, &v) == Ordering::Less { (v, u) } else { (u, v) };

        let g = Integer::from_limbs(limb::gcd(u, v), false);
        match g.shl_mag(self_twos.min(other_twos)) {
            Ok(g) => g,
            Err(err) => panic!("{}", err),
        }
    }

    /// Extended GCD: `g == gcd(self, other)` together with `s`, `t` such that
    /// `s * self + t * other == g`.
    pub fn xgcd(&self, other: &Integer) -> Xgcd {
        if self.cmp_abs(other) == Ordering::Less {
            let Xgcd { g, s, t } = other.xgcd(self);
            return Xgcd { g, s: t, t: s };
        }
        if other.is_zero() {
            let s = if self.is_negative() { -&*ONE } else { ONE.clone() };
            return Xgcd { g: self.abs(), s, t: Integer::ZERO };
        }

        let (g, s_mag, s_negative) = limb::gcdext(self.limbs(), other.limbs());
        let g = Integer::from_limbs(g, false);
        // the kernel cofactor belongs to |self|
        let s = Integer::from_limbs(s_mag, s_negative != self.is_negative());
        // exact, so the floor quotient is the true quotient
        let (t, _r) = (&g - &(self * &s)).floor_divrem(other);
        debug_assert!(_r.is_zero());
        Xgcd { g, s, t }
    }

    /// Least common multiple. Non-negative; zero if either operand is zero.
    pub fn lcm(&self, other: &Integer) -> Integer {
        if self.is_zero() || other.is_zero() {
            return Integer::ZERO;
        }
        let g = self.gcd(other);
        (self / &g * other).abs()
    }
}

#[cfg(test)]
fn int(s: &str) -> Integer {
    s.parse().unwrap()
}

#[test]
fn test_gcd() {
    assert_eq!(Integer::from(48).gcd(&Integer::from(18)), Integer::from(6));
    assert_eq!(Integer::from(-48).gcd(&Integer::from(18)), Integer::from(6));
    assert_eq!(Integer::from(0).gcd(&Integer::from(-5)), Integer::from(5));
    assert_eq!(Integer::from(-5).gcd(&Integer::ZERO), Integer::from(5));
    assert_eq!(Integer::ZERO.gcd(&Integer::ZERO), Integer::ZERO);
    assert_eq!(Integer::from(1 << 20).gcd(&Integer::from(3 << 7)), Integer::from(1 << 7));
    let a = int("340282366920938463463374607431768211456");
    let b = &a * &int("3");
    assert_eq!(a.gcd(&b), a);
    assert_eq!(int("123456789012345678901234567890").gcd(&int("987654321098765432109876543210")), int("9000000000900000000090"));
}

#[test]
fn test_xgcd() {
    let a = Integer::from(35);
    let b = Integer::from(15);
    let Xgcd { g, s, t } = a.xgcd(&b);
    assert_eq!(g, Integer::from(5));
    assert_eq!(&s * &a + &t * &b, g);

    for (a, b) in [(240, 46), (46, 240), (-240, 46), (240, -46), (-240, -46), (0, 7), (7, 0), (-7, 0), (0, 0), (17, 17)] {
        let (a, b) = (Integer::from(a), Integer::from(b));
        let Xgcd { g, s, t } = a.xgcd(&b);
        assert_eq!(g, a.gcd(&b), "gcd of {} and {}", a, b);
        assert_eq!(&s * &a + &t * &b, g, "bezout for {} and {}", a, b);
    }
}

#[test]
fn test_xgcd_big() {
    let a = int("-123456789012345678901234567890123456789");
    let b = int("98765432109876543210987654321");
    let Xgcd { g, s, t } = a.xgcd(&b);
    assert_eq!(g, a.gcd(&b));
    assert_eq!(&s * &a + &t * &b, g);
}

#[test]
fn test_lcm() {
    assert_eq!(Integer::from(4).lcm(&Integer::from(-6)), Integer::from(12));
    assert_eq!(Integer::from(0).lcm(&Integer::from(6)), Integer::ZERO);
}
