//! Bigz \
//! This crate provides:
//! - [`Integer`]: arbitrary-precision signed integers in sign-magnitude form, stored in a grow-only buffer of 64-bit limbs.
//! - [`IntegerRing`]: the zero-sized descriptor of the ring of integers, reachable through [`Parent`].
//!
//! Division and modulo round toward negative infinity. Shifts act on the
//! magnitude and keep the sign.

mod error;
mod integer;
mod integer_arith;
mod integer_cache;
mod integer_constants;
mod integer_div;
mod integer_gcd;
pub mod limb;
mod ring;

pub use error::{IntegerError, Result};
pub use integer::Integer;
pub use integer_constants::{DoubleLimb, Limb, LIMB_BITS};
pub use integer_gcd::Xgcd;
pub use ring::{IntegerRing, Parent};

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::{Integer, Xgcd};

    #[test]
    fn it_works() {
        let a: Integer = "10000000000000".parse().unwrap();
        let b: Integer = "900000000000".parse().unwrap();
        println!("a = {}", a);
        println!("a + b = {}", &a + &b);
        println!("a - b = {}", &a - &b);
        println!("a * b = {}", &a * &b);
        println!("a / b = {}", &a / &b);
        println!("a % b = {}", &a % &b);
        println!("a << 10 = {}", &a << 10_i64);
        println!("a >> 10 = {}", &a >> 10_i64);
    }

    #[test]
    fn scenarios() {
        let int = |s: &str| s.parse::<Integer>().unwrap();
        assert_eq!(int("123") * int("456"), int("56088"));
        assert_eq!(Integer::from(-7) / Integer::from(2), Integer::from(-4));
        assert_eq!(Integer::from(-7) % Integer::from(2), Integer::from(1));
        assert_eq!(Integer::from(48).gcd(&Integer::from(18)), Integer::from(6));
        let Xgcd { g, s, t } = Integer::from(35).xgcd(&Integer::from(15));
        assert_eq!(g, Integer::from(5));
        assert_eq!(s * Integer::from(35) + t * Integer::from(15), Integer::from(5));
        assert_eq!((Integer::from(1) << 64_i64).to_string(), "18446744073709551616");
        assert_eq!(int("0").to_string(), "0");
        assert_eq!(Integer::from(0), int("0"));
    }

    fn decimal() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("0".to_string()),
            "-?[1-9][0-9]{0,80}",
        ]
    }

    fn integer() -> impl Strategy<Value = Integer> {
        decimal().prop_map(|s| s.parse().unwrap())
    }

    fn reference_gcd(mut a: i128, mut b: i128) -> i128 {
        while b != 0 {
            let r = a % b;
            a = b;
            b = r;
        }
        a.abs()
    }

    proptest! {
        #[test]
        fn decimal_round_trip(s in decimal()) {
            prop_assert_eq!(s.parse::<Integer>().unwrap().to_string(), s);
        }

        #[test]
        fn additive_inverse(a in integer()) {
            prop_assert!((&a + &(-&a)).is_zero());
            prop_assert_eq!(-(-a.clone()), a);
        }

        #[test]
        fn word_identities(a in integer()) {
            prop_assert_eq!(&a * 1_i64, a.clone());
            prop_assert!((&a * 0_i64).is_zero());
        }

        #[test]
        fn sub_matches_add_of_negation(a in integer(), b in integer()) {
            prop_assert_eq!(&a - &b, &a + &(-&b));
            let mut c = a.clone();
            c -= &b;
            prop_assert_eq!(c, &a - &b);
        }

        #[test]
        fn compound_matches_fresh(a in integer(), b in integer()) {
            let mut c = a.clone();
            c += &b;
            prop_assert_eq!(&c, &(&a + &b));
            let mut d = a.clone();
            d *= &b;
            prop_assert_eq!(d, &a * &b);
        }

        #[test]
        fn floor_division(a in integer(), b in integer()) {
            prop_assume!(!b.is_zero());
            let (q, r) = a.divrem(&b).unwrap();
            prop_assert_eq!(&(&b * &q) + &r, a.clone());
            prop_assert!(r.is_zero() || r.sign() == b.sign());
            prop_assert!(r.abs() < b.abs());
            prop_assert_eq!(&a / &b, q);
            prop_assert_eq!(&a % &b, r);
        }

        #[test]
        fn floor_division_by_word(a in integer(), d in any::<i64>()) {
            prop_assume!(d != 0);
            let (q, r) = a.divrem_word(d).unwrap();
            prop_assert_eq!(&q * d + r, a.clone());
            prop_assert!(r == 0 || (r < 0) == (d < 0));
            prop_assert_eq!(&a / d, q);
            prop_assert_eq!(&a % d, Integer::from(r));
        }

        #[test]
        fn gcd_matches_reference(a in any::<i64>(), b in any::<i64>()) {
            let g = Integer::from(a).gcd(&Integer::from(b));
            prop_assert_eq!(g.to_string(), reference_gcd(a as i128, b as i128).to_string());
        }

        #[test]
        fn gcd_divides(a in integer(), b in integer()) {
            prop_assume!(!(a.is_zero() && b.is_zero()));
            let g = a.gcd(&b);
            prop_assert!(!g.is_negative() && !g.is_zero());
            prop_assert!((&a % &g).is_zero());
            prop_assert!((&b % &g).is_zero());
            // the cofactors are coprime, so nothing larger divides both
            prop_assert_eq!((&a / &g).gcd(&(&b / &g)), Integer::from(1));
        }

        #[test]
        fn bezout(a in integer(), b in integer()) {
            let Xgcd { g, s, t } = a.xgcd(&b);
            prop_assert_eq!(&(&s * &a) + &(&t * &b), g.clone());
            prop_assert_eq!(g, a.gcd(&b));
        }

        #[test]
        fn shift_round_trip(a in integer(), k in 0_i64..300) {
            let a = a.abs();
            prop_assert_eq!(&(&a << k) >> k, a.clone());
            let mut b = a.clone();
            b <<= k;
            prop_assert_eq!(&b, &(&a << k));
            b >>= k;
            prop_assert_eq!(b, a);
        }

        #[test]
        fn shift_is_power_of_two(a in integer(), k in 0_u32..200) {
            let p = Integer::from(2).pow(k);
            prop_assert_eq!(&a << k as i64, &a * &p);
            prop_assert_eq!(&a.abs() >> k as i64, &a.abs() / &p);
        }
    }
}
