//! The ring descriptor: a zero-sized tag naming the algebraic structure an
//! [`Integer`] belongs to, for use by generic algebra code.

use std::fmt;

use crate::Integer;

/// The ring of integers, ℤ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct IntegerRing;

impl IntegerRing {
    pub fn zero(&self) -> Integer {
        Integer::ZERO
    }

    pub fn one(&self) -> Integer {
        Integer::from(1)
    }

    /// ℤ has characteristic zero.
    pub fn characteristic(&self) -> Integer {
        Integer::ZERO
    }

    pub fn element(&self, value: i64) -> Integer {
        Integer::from(value)
    }
}

impl fmt::Display for IntegerRing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Integer Ring")
    }
}

/// Values that know which algebraic structure they live in.
pub trait Parent {
    type Ring;

    fn parent(&self) -> Self::Ring;
}

impl Parent for Integer {
    type Ring = IntegerRing;

    fn parent(&self) -> IntegerRing {
        IntegerRing
    }
}

#[test]
fn test_parent() {
    let a = Integer::from(-3);
    let ring = a.parent();
    assert_eq!(ring, IntegerRing);
    assert_eq!(ring.to_string(), "Integer Ring");
    assert_eq!(std::mem::size_of::<IntegerRing>(), 0);
    assert_eq!(&ring.one() + &ring.element(-1), ring.zero());
    assert!(ring.characteristic().is_zero());
}
