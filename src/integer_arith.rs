//! Addition, subtraction and multiplication.
//!
//! Every operator splits on the signs of its operands: equal signs add
//! magnitudes, opposite signs subtract the smaller magnitude from the larger
//! and take the sign of the larger. Subtraction is addition of the negation.
//! Compound forms grow the receiver first and then write into its buffer.

use std::cmp::Ordering;
use std::ops::{Add, AddAssign, Mul, MulAssign, Sub, SubAssign};

use crate::integer_constants::*;
use crate::limb;
use crate::Integer;

// 实现加法
impl Integer {
    /// `a + b`, or `a - b` when `negate_b` is set, into a fresh Integer.
    fn add_signed(a: &Integer, b: &Integer, negate_b: bool) -> Integer {
        if b.is_zero() {
            return a.clone();
        }
        if a.is_zero() {
            let mut ret = b.clone();
            if negate_b {
                ret.negate();
            }
            return ret;
        }

        let a_neg = a.is_negative();
        let b_neg = b.is_negative() != negate_b;

        if a_neg == b_neg {
            let (x, y) = if a.abs_size() >= b.abs_size() {
                (a.limbs(), b.limbs())
            } else {
                (b.limbs(), a.limbs())
            };
            let n = x.len();
            let mut out = Integer::with_capacity(n + 1);
            out.data[n] = limb::add(&mut out.data, x, y);
            out.set_normalized(n + 1, a_neg);
            return out;
        }

        let (x, y, negative) = match a.cmp_abs(b) {
            Ordering::Equal => return Integer::ZERO,
            Ordering::Greater => (a.limbs(), b.limbs(), a_neg),
            Ordering::Less => (b.limbs(), a.limbs(), b_neg),
        };
        let n = x.len();
        let mut out = Integer::with_capacity(n);
        let _borrow = limb::sub(&mut out.data, x, y);
        debug_assert_eq!(_borrow, 0);
        out.set_normalized(n, negative);
        out
    }

    /// `self += b`, or `self -= b` when `negate_b` is set, in place.
    fn add_signed_assign(&mut self, b: &Integer, negate_b: bool) {
        if b.is_zero() {
            return;
        }
        let b_neg = b.is_negative() != negate_b;
        if self.is_zero() {
            self.assign(b);
            if negate_b {
                self.negate();
            }
            return;
        }

        let a_neg = self.is_negative();
        let an = self.abs_size();
        let bn = b.abs_size();

        if a_neg == b_neg {
            let n = an.max(bn);
            self.ensure_capacity(n + 1);
            // zero-extend up to the longer operand
            self.data[an..n].fill(0);
            self.data[n] = limb::add_in_place(&mut self.data[..n], b.limbs());
            self.set_normalized(n + 1, a_neg);
            return;
        }

        match self.cmp_abs(b) {
            Ordering::Equal => self.size = 0,
            Ordering::Greater => {
                let _borrow = limb::sub_in_place(&mut self.data[..an], b.limbs());
                debug_assert_eq!(_borrow, 0);
                self.set_normalized(an, a_neg);
            }
            Ordering::Less => {
                self.ensure_capacity(bn);
                self.data[an..bn].fill(0);
                let _borrow = limb::rsub_in_place(&mut self.data[..bn], b.limbs());
                debug_assert_eq!(_borrow, 0);
                self.set_normalized(bn, b_neg);
            }
        }
    }

    /// `self += w`, or `self -= w` when `negate_w` is set. `w` is a magnitude.
    fn add_word_assign(&mut self, w: Limb, negate_w: bool) {
        if w == 0 {
            return;
        }
        if self.is_zero() {
            self.ensure_capacity(1);
            self.data[0] = w;
            self.size = if negate_w { -1 } else { 1 };
            return;
        }

        let a_neg = self.is_negative();
        let an = self.abs_size();

        if a_neg == negate_w {
            self.ensure_capacity(an + 1);
            self.data[an] = limb::add_1_in_place(&mut self.data[..an], w);
            self.set_normalized(an + 1, a_neg);
        } else if an > 1 || self.data[0] >= w {
            let _borrow = limb::sub_1_in_place(&mut self.data[..an], w);
            debug_assert_eq!(_borrow, 0);
            self.set_normalized(an, a_neg);
        } else {
            self.data[0] = w - self.data[0];
            self.set_normalized(1, negate_w);
        }
    }

    /// `self + w` for an unsigned machine word.
    pub fn add_word(&self, w: u64) -> Integer {
        let mut ret = Integer::with_capacity(self.abs_size() + 1);
        ret.assign(self);
        ret.add_word_assign(w, false);
        ret
    }

    /// `self - w` for an unsigned machine word.
    pub fn sub_word(&self, w: u64) -> Integer {
        let mut ret = Integer::with_capacity(self.abs_size() + 1);
        ret.assign(self);
        ret.add_word_assign(w, true);
        ret
    }

    // a negative right-hand side is rewritten as the opposite operation on its magnitude
    pub(crate) fn add_i64_assign(&mut self, w: i64) {
        self.add_word_assign(w.unsigned_abs(), w < 0);
    }

    pub(crate) fn sub_i64_assign(&mut self, w: i64) {
        self.add_word_assign(w.unsigned_abs(), w >= 0);
    }

    pub(crate) fn add_u64_assign(&mut self, w: u64) {
        self.add_word_assign(w, false);
    }

    fn sub_u64_assign(&mut self, w: u64) {
        self.add_word_assign(w, true);
    }
}

impl<'a, 'b> Add<&'a Integer> for &'b Integer {
    type Output = Integer;

    fn add(self, rhs: &'a Integer) -> Integer {
        Integer::add_signed(self, rhs, false)
    }
}

impl<'a> AddAssign<&'a Integer> for Integer {
    fn add_assign(&mut self, rhs: &'a Integer) {
        self.add_signed_assign(rhs, false);
    }
}

// 实现减法
impl<'a, 'b> Sub<&'a Integer> for &'b Integer {
    type Output = Integer;

    fn sub(self, rhs: &'a Integer) -> Integer {
        Integer::add_signed(self, rhs, true)
    }
}

impl<'a> SubAssign<&'a Integer> for Integer {
    fn sub_assign(&mut self, rhs: &'a Integer) {
        self.add_signed_assign(rhs, true);
    }
}

// 实现乘法
impl Integer {
    fn mul_integers(a: &Integer, b: &Integer) -> Integer {
        if a.is_zero() || b.is_zero() {
            return Integer::ZERO;
        }
        let negative = a.is_negative() != b.is_negative();
        // the kernel wants the longer operand first
        let (x, y) = if a.abs_size() >= b.abs_size() {
            (a.limbs(), b.limbs())
        } else {
            (b.limbs(), a.limbs())
        };
        let n = x.len() + y.len();
        let mut out = Integer::with_capacity(n);
        limb::mul(&mut out.data, x, y);
        // Top limb may be zero
        let len = if out.data[n - 1] == 0 { n - 1 } else { n };
        out.size = if negative { -(len as isize) } else { len as isize };
        out
    }

    /// `self *= w` where `w` is a magnitude and `negate_w` its sign.
    fn mul_word_assign(&mut self, w: Limb, negate_w: bool) {
        if w == 0 || self.is_zero() {
            self.size = 0;
            return;
        }
        let negative = self.is_negative() != negate_w;
        let an = self.abs_size();
        self.ensure_capacity(an + 1);
        self.data[an] = limb::mul_1_in_place(&mut self.data[..an], w);
        self.set_normalized(an + 1, negative);
    }

    /// `self * w` for an unsigned machine word.
    pub fn mul_word(&self, w: u64) -> Integer {
        if w == 0 || self.is_zero() {
            return Integer::ZERO;
        }
        let mut ret = Integer::with_capacity(self.abs_size() + 1);
        ret.assign(self);
        ret.mul_word_assign(w, false);
        ret
    }

    pub(crate) fn mul_i64_assign(&mut self, w: i64) {
        self.mul_word_assign(w.unsigned_abs(), w < 0);
    }

    fn mul_u64_assign(&mut self, w: u64) {
        self.mul_word_assign(w, false);
    }

    /// `self` raised to `exp` by repeated squaring. `0^0` is 1.
    pub fn pow(&self, mut exp: u32) -> Integer {
        let mut base = self.clone();
        let mut ret = Integer::from(1);
        while exp > 0 {
            if exp & 1 == 1 {
                ret *= &base;
            }
            exp >>= 1;
            if exp > 0 {
                base = &base * &base;
            }
        }
        ret
    }
}

impl<'a, 'b> Mul<&'a Integer> for &'b Integer {
    type Output = Integer;

    fn mul(self, rhs: &'a Integer) -> Integer {
        Integer::mul_integers(self, rhs)
    }
}

impl<'a> MulAssign<&'a Integer> for Integer {
    fn mul_assign(&mut self, rhs: &'a Integer) {
        if rhs.abs_size() == 1 {
            let w = rhs.data[0];
            self.mul_word_assign(w, rhs.is_negative());
            return;
        }
        // the product cannot share a buffer with its operands
        let product = Integer::mul_integers(self, rhs);
        self.assign(&product);
    }
}

/// Fills in the owned and mixed-reference forms of a binary operator from
/// its `&Integer op &Integer` and `Integer op= &Integer` impls.
macro_rules! forward_binop {
    ($imp: ident, $method: ident, $assign_imp: ident, $assign_method: ident) => {
        impl<'a> $imp<&'a Integer> for Integer {
            type Output = Integer;

            fn $method(mut self, rhs: &'a Integer) -> Integer {
                $assign_imp::$assign_method(&mut self, rhs);
                self
            }
        }

        impl $imp<Integer> for Integer {
            type Output = Integer;

            fn $method(mut self, rhs: Integer) -> Integer {
                $assign_imp::$assign_method(&mut self, &rhs);
                self
            }
        }

        impl<'a> $imp<Integer> for &'a Integer {
            type Output = Integer;

            fn $method(self, rhs: Integer) -> Integer {
                <&Integer as $imp<&Integer>>::$method(self, &rhs)
            }
        }

        impl $assign_imp<Integer> for Integer {
            fn $assign_method(&mut self, rhs: Integer) {
                $assign_imp::$assign_method(self, &rhs)
            }
        }
    };
}
pub(crate) use forward_binop;

/// Operators with a machine-word right-hand side, built on an in-place helper.
macro_rules! forward_word_binop {
    ($imp: ident, $method: ident, $assign_imp: ident, $assign_method: ident, $t: ty, $helper: ident) => {
        impl $assign_imp<$t> for Integer {
            fn $assign_method(&mut self, rhs: $t) {
                self.$helper(rhs);
            }
        }

        impl $imp<$t> for Integer {
            type Output = Integer;

            fn $method(mut self, rhs: $t) -> Integer {
                self.$helper(rhs);
                self
            }
        }

        impl<'a> $imp<$t> for &'a Integer {
            type Output = Integer;

            fn $method(self, rhs: $t) -> Integer {
                let mut ret = Integer::with_capacity(self.abs_size() + 1);
                ret.assign(self);
                ret.$helper(rhs);
                ret
            }
        }
    };
}
pub(crate) use forward_word_binop;

forward_binop!(Add, add, AddAssign, add_assign);
forward_binop!(Sub, sub, SubAssign, sub_assign);
forward_binop!(Mul, mul, MulAssign, mul_assign);

forward_word_binop!(Add, add, AddAssign, add_assign, i64, add_i64_assign);
forward_word_binop!(Sub, sub, SubAssign, sub_assign, i64, sub_i64_assign);
forward_word_binop!(Mul, mul, MulAssign, mul_assign, i64, mul_i64_assign);

forward_word_binop!(Add, add, AddAssign, add_assign, u64, add_u64_assign);
forward_word_binop!(Sub, sub, SubAssign, sub_assign, u64, sub_u64_assign);
forward_word_binop!(Mul, mul, MulAssign, mul_assign, u64, mul_u64_assign);

#[cfg(test)]
fn int(s: &str) -> Integer {
    s.parse().unwrap()
}

#[test]
fn test_add() {
    assert_eq!(&int("18446744073709551615") + &int("1"), int("18446744073709551616"));
    assert_eq!(&int("-18446744073709551616") + &int("1"), int("-18446744073709551615"));
    assert_eq!(&int("5") + &int("-18446744073709551616"), int("-18446744073709551611"));
    assert_eq!(&int("123456789") + &int("-123456789"), Integer::ZERO);
    assert_eq!(&Integer::ZERO + &int("-3"), int("-3"));
}

#[test]
fn test_add_assign() {
    let mut a = int("1");
    a += &int("340282366920938463463374607431768211455");
    assert_eq!(a, int("340282366920938463463374607431768211456"));
    a -= &int("340282366920938463463374607431768211457");
    assert_eq!(a, int("-1"));
    a += int("-18446744073709551616");
    assert_eq!(a, int("-18446744073709551617"));
    let same = a.clone();
    a -= same;
    assert!(a.is_zero());
    a -= int("7");
    assert_eq!(a, int("-7"));
}

#[test]
fn test_sub() {
    assert_eq!(int("10000000000000") - int("900000000000"), int("9100000000000"));
    assert_eq!(&int("3") - &int("5"), int("-2"));
    assert_eq!(&int("-3") - &int("-5"), int("2"));
    assert_eq!(&int("-3") - &int("5"), int("-8"));
    assert_eq!(int("18446744073709551616") - 1_i64, int("18446744073709551615"));
}

#[test]
fn test_word_ops() {
    let a = int("18446744073709551615");
    assert_eq!(&a + 1_i64, int("18446744073709551616"));
    assert_eq!(&a + -1_i64, int("18446744073709551614"));
    assert_eq!(&a - -1_i64, int("18446744073709551616"));
    assert_eq!(int("3") - 5_i64, int("-2"));
    assert_eq!(int("-3") + 5_i64, int("2"));
    assert_eq!(int("-3") - 5_i64, int("-8"));
    assert_eq!(a.add_word(u64::MAX), int("36893488147419103230"));
    assert_eq!(Integer::ZERO.sub_word(9), int("-9"));
    let mut b = int("-1");
    b += 1_i64;
    assert!(b.is_zero());
    b -= i64::MIN;
    assert_eq!(b, int("9223372036854775808"));

    assert_eq!(&a + u64::MAX, int("36893488147419103230"));
    assert_eq!(int("-5") + 3_u64, int("-2"));
    assert_eq!(int("5") - 8_u64, int("-3"));
    assert_eq!(&int("-18446744073709551616") - u64::MAX, int("-36893488147419103231"));
    assert_eq!(int("-2") * u64::MAX, int("-36893488147419103230"));
    let mut c = int("1");
    c += u64::MAX;
    assert_eq!(c, int("18446744073709551616"));
    c -= 1_u64;
    assert_eq!(c, a);
    c *= 2_u64;
    assert_eq!(c, int("36893488147419103230"));
}

#[test]
fn test_mul() {
    assert_eq!(&int("123") * &int("456"), int("56088"));
    assert_eq!(
        &int("-18446744073709551616") * &int("18446744073709551616"),
        int("-340282366920938463463374607431768211456")
    );
    assert_eq!(&int("3") * &int("-340282366920938463463374607431768211456"), int("-1020847100762815390390123822295304634368"));
    assert_eq!(&int("0") * &int("-5"), Integer::ZERO);
    assert_eq!(int("-7") * -3_i64, int("21"));
    assert_eq!(int("-7") * 0_i64, Integer::ZERO);
    assert_eq!(int("18446744073709551615").mul_word(u64::MAX), int("340282366920938463426481119284349108225"));
}

#[test]
fn test_mul_assign() {
    let mut a = int("-99999999999999999999");
    a *= &int("99999999999999999999");
    assert_eq!(a, int("-9999999999999999999800000000000000000001"));
    a *= int("-1");
    assert_eq!(a, int("9999999999999999999800000000000000000001"));
    a *= 0_i64;
    assert!(a.is_zero());
}

#[test]
fn test_pow() {
    assert_eq!(int("2").pow(64), int("18446744073709551616"));
    assert_eq!(int("-3").pow(3), int("-27"));
    assert_eq!(int("0").pow(0), int("1"));
    assert_eq!(int("10").pow(40), int("10000000000000000000000000000000000000000"));
}
