//! Floor division, modulo and shifts.
//!
//! The kernel divides with truncation toward zero. Floor semantics come from
//! one correction: when the operand signs differ and the remainder is
//! non-zero, the quotient drops by one and the divisor is added to the
//! remainder, which leaves the remainder with the sign of the divisor.
//!
//! `/=` and `%=` by a machine word divide the receiver's own limbs in place.
//! Division by a multi-limb Integer goes through a scratch quotient, since
//! the kernel's quotient and dividend slices cannot overlap.

use std::ops::{Div, DivAssign, Rem, RemAssign, Shl, ShlAssign, Shr, ShrAssign};

use log::debug;

use crate::error::{IntegerError, Result};
use crate::integer_arith::{forward_binop, forward_word_binop};
use crate::integer_constants::*;
use crate::limb;
use crate::Integer;

// 实现除法
impl Integer {
    /// Floor quotient and remainder; `d` must be non-zero.
    pub(crate) fn floor_divrem(&self, d: &Integer) -> (Integer, Integer) {
        debug_assert!(!d.is_zero());
        if self.is_zero() {
            return (Integer::ZERO, Integer::ZERO);
        }

        let an = self.abs_size();
        let dn = d.abs_size();
        let a_neg = self.is_negative();
        let q_neg = a_neg != d.is_negative();

        let (mut q, mut r) = if an < dn {
            (Integer::ZERO, self.clone())
        } else if dn == 1 {
            let mut q = Integer::with_capacity(an);
            let rem = limb::divrem_1(&mut q.data, self.limbs(), d.data[0]);
            q.set_normalized(an, q_neg);
            (q, Integer::value_of(rem, a_neg))
        } else {
            let mut q = Integer::with_capacity(an - dn + 1);
            let mut r = Integer::with_capacity(dn);
            limb::divrem(&mut q.data, &mut r.data, self.limbs(), d.limbs());
            q.set_normalized(an - dn + 1, q_neg);
            r.set_normalized(dn, a_neg);
            (q, r)
        };

        if q_neg && !r.is_zero() {
            q.sub_i64_assign(1);
            r += d;
        }
        (q, r)
    }

    /// Floor quotient and remainder: `self == q * d + r` with `r` zero or
    /// carrying the sign of `d`.
    pub fn divrem(&self, d: &Integer) -> Result<(Integer, Integer)> {
        if d.is_zero() {
            debug!("divrem of {} by zero", self);
            return Err(IntegerError::DivisionByZero);
        }
        Ok(self.floor_divrem(d))
    }

    /// Floor quotient, `self / d`.
    pub fn checked_div(&self, d: &Integer) -> Result<Integer> {
        self.divrem(d).map(|(q, _)| q)
    }

    /// Floor remainder, `self % d`. Zero or of the same sign as `d`.
    pub fn checked_rem(&self, d: &Integer) -> Result<Integer> {
        self.divrem(d).map(|(_, r)| r)
    }

    /// Divides `self` in place by the word `d` (a magnitude, negated when
    /// `d_neg` is set), returning the floor remainder.
    fn div_limb_assign(&mut self, d: Limb, d_neg: bool) -> Result<i128> {
        if d == 0 {
            debug!("division of {} by zero word", self);
            return Err(IntegerError::DivisionByZero);
        }
        if self.is_zero() {
            return Ok(0);
        }
        let an = self.abs_size();
        let a_neg = self.is_negative();
        let q_neg = a_neg != d_neg;

        let rem = limb::divrem_1_in_place(&mut self.data[..an], d);
        self.set_normalized(an, q_neg);

        if q_neg && rem != 0 {
            self.sub_i64_assign(1);
        }
        Ok(Integer::floor_rem_limb(rem, a_neg, d, d_neg))
    }

    /// Floor remainder by the word `d` without computing the quotient.
    fn rem_limb(&self, d: Limb, d_neg: bool) -> Result<i128> {
        if d == 0 {
            return Err(IntegerError::DivisionByZero);
        }
        let rem = limb::mod_1(self.limbs(), d);
        Ok(Integer::floor_rem_limb(rem, self.is_negative(), d, d_neg))
    }

    // |rem| < |d|, so both the truncated and the corrected value fit the divisor's type
    fn floor_rem_limb(rem: Limb, a_neg: bool, d: Limb, d_neg: bool) -> i128 {
        let r = if a_neg { -(rem as i128) } else { rem as i128 };
        if a_neg != d_neg && rem != 0 {
            r + if d_neg { -(d as i128) } else { d as i128 }
        } else {
            r
        }
    }

    /// Floor quotient and remainder by a machine word.
    pub fn divrem_word(&self, d: i64) -> Result<(Integer, i64)> {
        let mut q = self.clone();
        let r = q.div_limb_assign(d.unsigned_abs(), d < 0)?;
        Ok((q, r as i64))
    }

    pub fn checked_div_word(&self, d: i64) -> Result<Integer> {
        self.divrem_word(d).map(|(q, _)| q)
    }

    pub fn checked_rem_word(&self, d: i64) -> Result<i64> {
        self.rem_limb(d.unsigned_abs(), d < 0).map(|r| r as i64)
    }

    /// Floor quotient and remainder by an unsigned machine word.
    pub fn divrem_u64(&self, d: u64) -> Result<(Integer, u64)> {
        let mut q = self.clone();
        let r = q.div_limb_assign(d, false)?;
        Ok((q, r as u64))
    }

    fn div_i64_assign(&mut self, d: i64) {
        if let Err(err) = self.div_limb_assign(d.unsigned_abs(), d < 0) {
            panic!("{}", err);
        }
    }

    fn div_u64_assign(&mut self, d: u64) {
        if let Err(err) = self.div_limb_assign(d, false) {
            panic!("{}", err);
        }
    }

    fn rem_i64_assign(&mut self, d: i64) {
        match self.checked_rem_word(d) {
            Ok(r) => {
                self.size = 0;
                self.add_i64_assign(r);
            }
            Err(err) => panic!("{}", err),
        }
    }

    fn rem_u64_assign(&mut self, d: u64) {
        match self.rem_limb(d, false) {
            Ok(r) => {
                self.size = 0;
                self.add_u64_assign(r as u64);
            }
            Err(err) => panic!("{}", err),
        }
    }
}

impl<'a, 'b> Div<&'a Integer> for &'b Integer {
    type Output = Integer;

    fn div(self, rhs: &'a Integer) -> Integer {
        match self.checked_div(rhs) {
            Ok(q) => q,
            Err(err) => panic!("{}", err),
        }
    }
}

impl<'a> DivAssign<&'a Integer> for Integer {
    fn div_assign(&mut self, rhs: &'a Integer) {
        if rhs.abs_size() == 1 {
            if let Err(err) = self.div_limb_assign(rhs.data[0], rhs.is_negative()) {
                panic!("{}", err);
            }
            return;
        }
        let q = &*self / rhs;
        self.assign(&q);
    }
}

impl<'a, 'b> Rem<&'a Integer> for &'b Integer {
    type Output = Integer;

    fn rem(self, rhs: &'a Integer) -> Integer {
        match self.checked_rem(rhs) {
            Ok(r) => r,
            Err(err) => panic!("{}", err),
        }
    }
}

impl<'a> RemAssign<&'a Integer> for Integer {
    fn rem_assign(&mut self, rhs: &'a Integer) {
        let r = &*self % rhs;
        self.assign(&r);
    }
}

forward_binop!(Div, div, DivAssign, div_assign);
forward_binop!(Rem, rem, RemAssign, rem_assign);

forward_word_binop!(Div, div, DivAssign, div_assign, i64, div_i64_assign);
forward_word_binop!(Rem, rem, RemAssign, rem_assign, i64, rem_i64_assign);
forward_word_binop!(Div, div, DivAssign, div_assign, u64, div_u64_assign);
forward_word_binop!(Rem, rem, RemAssign, rem_assign, u64, rem_u64_assign);

// 实现移位
impl Integer {
    fn check_shift(shift: i64) -> Result<u64> {
        if shift < 0 {
            debug!("rejecting shift by {}", shift);
            return Err(IntegerError::InvalidShift { shift });
        }
        Ok(shift as u64)
    }

    /// Splits a shift into whole limbs and residual bits. A limb count that
    /// does not fit `usize` can only come up on targets narrower than 64 bits;
    /// it is reported as `OutOfMemory` with the count saturated to `usize::MAX`.
    fn split_shift(shift: u64) -> Result<(usize, u32)> {
        let limbs = usize::try_from(shift / LIMB_BITS as u64)
            .map_err(|_| IntegerError::OutOfMemory { limbs: usize::MAX })?;
        Ok((limbs, (shift % LIMB_BITS as u64) as u32))
    }

    fn shifted_capacity(an: usize, limbs: usize) -> Result<usize> {
        an.checked_add(limbs)
            .and_then(|n| n.checked_add(1))
            .ok_or(IntegerError::OutOfMemory { limbs: usize::MAX })
    }

    pub(crate) fn shl_mag(&self, shift: u64) -> Result<Integer> {
        if shift == 0 || self.is_zero() {
            return Ok(self.clone());
        }
        let (limbs, bits) = Integer::split_shift(shift)?;
        let an = self.abs_size();
        let cap = Integer::shifted_capacity(an, limbs)?;

        // a fresh buffer is zero-filled, which covers the low whole limbs
        let mut out = Integer::ZERO;
        out.try_ensure_capacity(cap)?;
        let len = if bits == 0 {
            out.data[limbs..limbs + an].copy_from_slice(self.limbs());
            limbs + an
        } else {
            out.data[limbs + an] = limb::shl(&mut out.data[limbs..], self.limbs(), bits);
            limbs + an + 1
        };
        out.set_normalized(len, self.is_negative());
        Ok(out)
    }

    pub(crate) fn shr_mag(&self, shift: u64) -> Integer {
        if shift == 0 || self.is_zero() {
            return self.clone();
        }
        if shift >= self.bit_length() {
            return Integer::ZERO;
        }
        let limbs = (shift / LIMB_BITS as u64) as usize;
        let bits = (shift % LIMB_BITS as u64) as u32;
        let src = &self.limbs()[limbs..];
        let n = src.len();
        let mut out = Integer::with_capacity(n);
        if bits == 0 {
            out.data[..n].copy_from_slice(src);
        } else {
            limb::shr(&mut out.data, src, bits);
        }
        out.set_normalized(n, self.is_negative());
        out
    }

    /// `self * 2^shift`. Fails on a negative shift.
    pub fn checked_shl(&self, shift: i64) -> Result<Integer> {
        let shift = Integer::check_shift(shift)?;
        self.shl_mag(shift)
    }

    /// `self / 2^shift` truncated toward zero; the sign is kept. Fails on a
    /// negative shift.
    pub fn checked_shr(&self, shift: i64) -> Result<Integer> {
        let shift = Integer::check_shift(shift)?;
        Ok(self.shr_mag(shift))
    }

    /// In-place `<<=`: grows the buffer, moves the limbs up, then shifts the bits.
    pub fn shl_assign_checked(&mut self, shift: i64) -> Result<()> {
        let shift = Integer::check_shift(shift)?;
        if shift == 0 || self.is_zero() {
            return Ok(());
        }
        let (limbs, bits) = Integer::split_shift(shift)?;
        let an = self.abs_size();
        let cap = Integer::shifted_capacity(an, limbs)?;
        self.try_ensure_capacity(cap)?;

        self.data.copy_within(0..an, limbs);
        self.data[..limbs].fill(0);
        let len = if bits == 0 {
            limbs + an
        } else {
            self.data[limbs + an] = limb::shl_in_place(&mut self.data[limbs..limbs + an], bits);
            limbs + an + 1
        };
        let negative = self.is_negative();
        self.set_normalized(len, negative);
        Ok(())
    }

    /// In-place `>>=`: moves the limbs down, then shifts the bits.
    pub fn shr_assign_checked(&mut self, shift: i64) -> Result<()> {
        let shift = Integer::check_shift(shift)?;
        if shift == 0 || self.is_zero() {
            return Ok(());
        }
        if shift >= self.bit_length() {
            self.size = 0;
            return Ok(());
        }
        let limbs = (shift / LIMB_BITS as u64) as usize;
        let bits = (shift % LIMB_BITS as u64) as u32;
        let an = self.abs_size();
        let n = an - limbs;
        self.data.copy_within(limbs..an, 0);
        if bits != 0 {
            limb::shr_in_place(&mut self.data[..n], bits);
        }
        let negative = self.is_negative();
        self.set_normalized(n, negative);
        Ok(())
    }
}

macro_rules! impl_shift {
    ($imp: ident, $method: ident, $assign_imp: ident, $assign_method: ident, $checked: ident, $checked_assign: ident) => {
        impl $imp<i64> for &Integer {
            type Output = Integer;

            fn $method(self, shift: i64) -> Integer {
                match self.$checked(shift) {
                    Ok(ret) => ret,
                    Err(err) => panic!("{}", err),
                }
            }
        }

        impl $imp<i64> for Integer {
            type Output = Integer;

            fn $method(mut self, shift: i64) -> Integer {
                $assign_imp::$assign_method(&mut self, shift);
                self
            }
        }

        impl $assign_imp<i64> for Integer {
            fn $assign_method(&mut self, shift: i64) {
                if let Err(err) = self.$checked_assign(shift) {
                    panic!("{}", err);
                }
            }
        }
    };
}

impl_shift!(Shl, shl, ShlAssign, shl_assign, checked_shl, shl_assign_checked);
impl_shift!(Shr, shr, ShrAssign, shr_assign, checked_shr, shr_assign_checked);

#[cfg(test)]
fn int(s: &str) -> Integer {
    s.parse().unwrap()
}

#[test]
fn test_div() {
    assert_eq!(Integer::from(-7) / Integer::from(2), Integer::from(-4));
    assert_eq!(Integer::from(7) / Integer::from(-2), Integer::from(-4));
    assert_eq!(Integer::from(-7) / Integer::from(-2), Integer::from(3));
    assert_eq!(Integer::from(-6) / Integer::from(2), Integer::from(-3));
    assert_eq!(Integer::from(1) / Integer::from(-5), Integer::from(-1));
    assert_eq!(int("10000000000000") / int("900000000000"), int("11"));
    assert_eq!(
        int("340282366920938463463374607431768211457") / int("18446744073709551617"),
        int("18446744073709551615")
    );
}

#[test]
fn test_mod() {
    assert_eq!(Integer::from(-7) % Integer::from(2), Integer::from(1));
    assert_eq!(Integer::from(7) % Integer::from(-2), Integer::from(-1));
    assert_eq!(Integer::from(-7) % Integer::from(-2), Integer::from(-1));
    assert_eq!(int("10000000000000") % int("900000000000"), int("100000000000"));
    assert_eq!(
        int("-340282366920938463463374607431768211457") % int("18446744073709551617"),
        int("18446744073709551615")
    );
}

#[test]
fn test_divrem() {
    let a = int("-100000000000000000000000000000000000001");
    let b = int("12345678901234567890123");
    let (q, r) = a.divrem(&b).unwrap();
    assert_eq!(&(&q * &b) + &r, a);
    assert!(!r.is_negative() && r < b);

    let (q, r) = a.divrem_word(-97).unwrap();
    assert_eq!(&q * &Integer::from(-97) + Integer::from(r), a);
    assert!(r <= 0 && r > -97);
    assert_eq!(a.checked_rem_word(-97), Ok(r));
}

#[test]
fn test_division_by_zero() {
    let a = int("42");
    assert_eq!(a.divrem(&Integer::ZERO), Err(IntegerError::DivisionByZero));
    assert_eq!(a.checked_div(&Integer::ZERO), Err(IntegerError::DivisionByZero));
    assert_eq!(a.checked_rem_word(0), Err(IntegerError::DivisionByZero));
    assert_eq!(a.divrem_word(0), Err(IntegerError::DivisionByZero));
}

#[test]
#[should_panic(expected = "division by zero")]
fn test_div_operator_by_zero_panics() {
    let _ = Integer::from(1) / Integer::ZERO;
}

#[test]
fn test_word_div_assign() {
    let mut a = int("-18446744073709551617");
    a /= 2_i64;
    assert_eq!(a, int("-9223372036854775809"));
    a %= 10_i64;
    assert_eq!(a, int("1"));
    let mut b = int("-7");
    b /= &int("2");
    assert_eq!(b, int("-4"));
    b %= &int("-3");
    assert_eq!(b, int("-1"));
}

#[test]
fn test_u64_div_rem() {
    let a = int("-36893488147419103231");
    assert_eq!(&a / u64::MAX, int("-3"));
    assert_eq!(&a % u64::MAX, int("18446744073709551614"));
    assert_eq!(int("36893488147419103231") / u64::MAX, int("2"));
    assert_eq!(int("36893488147419103231") % u64::MAX, int("1"));
    assert_eq!(a.divrem_u64(u64::MAX), Ok((int("-3"), u64::MAX - 1)));
    assert_eq!(a.divrem_u64(0), Err(IntegerError::DivisionByZero));

    let mut b = int("-7");
    b /= 2_u64;
    assert_eq!(b, int("-4"));
    b %= 3_u64;
    assert_eq!(b, int("2"));

    // a single-limb divisor above i64::MAX goes through the word path too
    let mut c = a.clone();
    c /= &int("18446744073709551615");
    assert_eq!(c, int("-3"));
    assert_eq!(&a % &int("-18446744073709551615"), int("-1"));
}

#[test]
#[should_panic(expected = "division by zero")]
fn test_u64_rem_by_zero_panics() {
    let _ = Integer::from(5) % 0_u64;
}

#[test]
fn test_shl() {
    assert_eq!((Integer::from(1) << 64_i64).to_string(), "18446744073709551616");
    assert_eq!(&int("-3") << 1_i64, int("-6"));
    assert_eq!(&int("5") << 0_i64, int("5"));
    assert_eq!(&int("12345") << 130_i64, int("16803143278555941325821438114980714281697280"));
    let mut a = int("12345");
    a <<= 130_i64;
    assert_eq!(a, int("16803143278555941325821438114980714281697280"));
    a <<= 64_i64;
    assert_eq!(a, &int("16803143278555941325821438114980714281697280") * &int("18446744073709551616"));
}

#[test]
fn test_shr() {
    let a = int("16803143278555941325821438114980714281697280");
    assert_eq!(&a >> 130_i64, int("12345"));
    assert_eq!(&a >> 131_i64, int("6172"));
    assert_eq!(&a >> 1000_i64, Integer::ZERO);
    assert_eq!(&int("-7") >> 1_i64, int("-3"));
    let mut b = a.clone();
    b >>= 128_i64;
    assert_eq!(b, int("49380"));
    b >>= 64_i64;
    assert!(b.is_zero());
}

#[test]
fn test_invalid_shift() {
    let a = int("1");
    assert_eq!(a.checked_shl(-1), Err(IntegerError::InvalidShift { shift: -1 }));
    assert_eq!(a.checked_shr(-2), Err(IntegerError::InvalidShift { shift: -2 }));
    let mut b = a.clone();
    assert!(b.shl_assign_checked(-3).is_err());
    assert_eq!(b, a);
}

#[test]
fn test_shift_out_of_memory() {
    let a = int("-12345678901234567890123");
    assert!(matches!(Integer::from(1).checked_shl(i64::MAX), Err(IntegerError::OutOfMemory { .. })));
    assert!(matches!(a.checked_shl(i64::MAX - 63), Err(IntegerError::OutOfMemory { .. })));
    let mut b = a.clone();
    let cap = b.capacity();
    assert!(matches!(b.shl_assign_checked(i64::MAX), Err(IntegerError::OutOfMemory { .. })));
    assert_eq!(b, a);
    assert_eq!(b.capacity(), cap);
    // the receiver is still usable
    b <<= 1_i64;
    assert_eq!(b, int("-24691357802469135780246"));
}
