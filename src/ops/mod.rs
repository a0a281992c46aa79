//! Leaf operations: the per-element functions behind every tensor operator.
//!
//! Each operator is a marker type implementing [`UnaryOp`] or [`BinaryOp`]. The transform engine
//! in [`crate::loom::transform`] is generic over these, so adding an operator never touches the
//! engine.

use std::marker::PhantomData;

use crate::loom::num::Step;

pub mod frontend;
pub mod scalar;

pub trait UnaryOp<T> {
    type Output;

    fn call(x: &T) -> Self::Output;
}

pub trait BinaryOp<L, R> {
    type Output;

    fn call(lhs: &L, rhs: &R) -> Self::Output;
}

macro_rules! impl_arithmetic_op {
    ($name:ident, $f:ident) => {
        #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name;

        impl<L, R> BinaryOp<L, R> for $name
        where
            L: Clone + std::ops::$name<R>,
            R: Clone,
        {
            type Output = <L as std::ops::$name<R>>::Output;

            #[inline]
            fn call(lhs: &L, rhs: &R) -> Self::Output {
                std::ops::$name::$f(lhs.clone(), rhs.clone())
            }
        }
    };
}

impl_arithmetic_op!(Add, add);
impl_arithmetic_op!(Sub, sub);
impl_arithmetic_op!(Mul, mul);
impl_arithmetic_op!(Div, div);
impl_arithmetic_op!(Rem, rem);
impl_arithmetic_op!(Shl, shl);
impl_arithmetic_op!(Shr, shr);
impl_arithmetic_op!(BitAnd, bitand);
impl_arithmetic_op!(BitOr, bitor);
impl_arithmetic_op!(BitXor, bitxor);

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pow;

impl<L, R> BinaryOp<L, R> for Pow
where
    L: Clone + crate::loom::num::Pow<R>,
    R: Clone,
{
    type Output = <L as crate::loom::num::Pow<R>>::Output;

    #[inline]
    fn call(lhs: &L, rhs: &R) -> Self::Output {
        lhs.clone().pow(rhs.clone())
    }
}

macro_rules! impl_comparison_op {
    ($name:ident, $bound:ident, $f:ident) => {
        #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name;

        impl<L: $bound<R>, R> BinaryOp<L, R> for $name {
            type Output = bool;

            #[inline]
            fn call(lhs: &L, rhs: &R) -> Self::Output {
                lhs.$f(rhs)
            }
        }
    };
}

impl_comparison_op!(Equal, PartialEq, eq);
impl_comparison_op!(NotEqual, PartialEq, ne);
impl_comparison_op!(Greater, PartialOrd, gt);
impl_comparison_op!(GreaterEqual, PartialOrd, ge);
impl_comparison_op!(Less, PartialOrd, lt);
impl_comparison_op!(LessEqual, PartialOrd, le);

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Neg;

impl<T: Clone + std::ops::Neg> UnaryOp<T> for Neg {
    type Output = T::Output;

    #[inline]
    fn call(x: &T) -> Self::Output {
        -x.clone()
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Not;

impl<T: Clone + std::ops::Not> UnaryOp<T> for Not {
    type Output = T::Output;

    #[inline]
    fn call(x: &T) -> Self::Output {
        !x.clone()
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Increment;

impl<T: Clone + Step> UnaryOp<T> for Increment {
    type Output = T;

    #[inline]
    fn call(x: &T) -> Self::Output {
        x.clone().increment()
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Decrement;

impl<T: Clone + Step> UnaryOp<T> for Decrement {
    type Output = T;

    #[inline]
    fn call(x: &T) -> Self::Output {
        x.clone().decrement()
    }
}

/// Element conversion into `U`, used by converting copies and assignment.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Convert<U>(PhantomData<U>);

impl<T: Clone + Into<U>, U> UnaryOp<T> for Convert<U> {
    type Output = U;

    #[inline]
    fn call(x: &T) -> Self::Output {
        x.clone().into()
    }
}
