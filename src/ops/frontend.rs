//! Operator surface of [`Tensor`].
//!
//! Every operator forwards its leaf operation to [`transform`]. The right-hand side of a binary
//! operator is any [`Operand`]: a primitive scalar or `bool`, a tensor of the same shape, or a
//! tensor with a single component, the latter two owned or borrowed.
//!
//! ```
//! use mia_tensor::Vector;
//!
//! let x = Vector::<i32, 3>::new([1, 2, 3]);
//! assert_eq!((x + 10i32).as_slice(), &[11, 12, 13]);
//! assert_eq!((10i32 - x).as_slice(), &[9, 8, 7]);
//! assert_eq!(x.greater(1i32).as_slice(), &[false, true, true]);
//! ```
//!
//! Operands of a different shape do not compile:
//!
//! ```compile_fail
//! use mia_tensor::Vector;
//!
//! let x = Vector::<i32, 3>::new([1, 2, 3]);
//! let y = Vector::<i32, 2>::new([1, 2]);
//! let _ = x + y;
//! ```

use super::{
    BinaryOp, Convert, Decrement, Equal, Greater, GreaterEqual, Increment, Less, LessEqual,
    NotEqual, Pow, UnaryOp,
};
use crate::loom::{
    shape::Shape,
    tensor::Tensor,
    transform::{self, Operand},
};

macro_rules! impl_binary_op {
    ($name:ident, $f:ident, $assign:ident, $f_assign:ident) => {
        impl<T, S, R> std::ops::$name<R> for Tensor<T, S>
        where
            S: Shape,
            R: Operand,
            super::$name: BinaryOp<T, R::Item>,
        {
            type Output = Tensor<<super::$name as BinaryOp<T, R::Item>>::Output, S>;

            #[inline]
            fn $f(self, rhs: R) -> Self::Output {
                transform::binary(&self, &rhs, <super::$name as BinaryOp<T, R::Item>>::call)
            }
        }

        impl<T, S, R> std::ops::$name<R> for &Tensor<T, S>
        where
            S: Shape,
            R: Operand,
            super::$name: BinaryOp<T, R::Item>,
        {
            type Output = Tensor<<super::$name as BinaryOp<T, R::Item>>::Output, S>;

            #[inline]
            fn $f(self, rhs: R) -> Self::Output {
                transform::binary(self, &rhs, <super::$name as BinaryOp<T, R::Item>>::call)
            }
        }

        impl<T, S, R> std::ops::$assign<R> for Tensor<T, S>
        where
            S: Shape,
            R: Operand,
            super::$name: BinaryOp<T, R::Item, Output = T>,
        {
            #[inline]
            fn $f_assign(&mut self, rhs: R) {
                transform::binary_assign(self, &rhs, <super::$name as BinaryOp<T, R::Item>>::call)
            }
        }
    };
}

impl_binary_op!(Add, add, AddAssign, add_assign);
impl_binary_op!(Sub, sub, SubAssign, sub_assign);
impl_binary_op!(Mul, mul, MulAssign, mul_assign);
impl_binary_op!(Div, div, DivAssign, div_assign);
impl_binary_op!(Rem, rem, RemAssign, rem_assign);
impl_binary_op!(Shl, shl, ShlAssign, shl_assign);
impl_binary_op!(Shr, shr, ShrAssign, shr_assign);
impl_binary_op!(BitAnd, bitand, BitAndAssign, bitand_assign);
impl_binary_op!(BitOr, bitor, BitOrAssign, bitor_assign);
impl_binary_op!(BitXor, bitxor, BitXorAssign, bitxor_assign);

macro_rules! impl_unary_op {
    ($name:ident, $f:ident) => {
        impl<T, S> std::ops::$name for Tensor<T, S>
        where
            S: Shape,
            super::$name: UnaryOp<T>,
        {
            type Output = Tensor<<super::$name as UnaryOp<T>>::Output, S>;

            #[inline]
            fn $f(self) -> Self::Output {
                transform::unary(&self, <super::$name as UnaryOp<T>>::call)
            }
        }

        impl<T, S> std::ops::$name for &Tensor<T, S>
        where
            S: Shape,
            super::$name: UnaryOp<T>,
        {
            type Output = Tensor<<super::$name as UnaryOp<T>>::Output, S>;

            #[inline]
            fn $f(self) -> Self::Output {
                transform::unary(self, <super::$name as UnaryOp<T>>::call)
            }
        }
    };
}

impl_unary_op!(Neg, neg);
impl_unary_op!(Not, not);

macro_rules! impl_comparison {
    ($(#[$attr:meta])* $f:ident, $op:ty) => {
        $(#[$attr])*
        #[inline]
        pub fn $f<R>(&self, rhs: R) -> Tensor<bool, S>
        where
            R: Operand,
            $op: BinaryOp<T, R::Item, Output = bool>,
        {
            transform::binary(self, &rhs, <$op as BinaryOp<T, R::Item>>::call)
        }
    };
}

impl<T, S: Shape> Tensor<T, S> {
    impl_comparison!(
        /// Elementwise `==`. Use [`PartialEq`] to compare whole tensors.
        equal,
        Equal
    );
    impl_comparison!(not_equal, NotEqual);
    impl_comparison!(
        /// Elementwise `>`.
        greater,
        Greater
    );
    impl_comparison!(greater_equal, GreaterEqual);
    impl_comparison!(less, Less);
    impl_comparison!(less_equal, LessEqual);

    /// Raises each element to the matching power in `rhs`.
    #[inline]
    pub fn pow<R>(&self, rhs: R) -> Tensor<<Pow as BinaryOp<T, R::Item>>::Output, S>
    where
        R: Operand,
        Pow: BinaryOp<T, R::Item>,
    {
        transform::binary(self, &rhs, <Pow as BinaryOp<T, R::Item>>::call)
    }

    #[inline]
    pub fn pow_assign<R>(&mut self, rhs: R) -> &mut Self
    where
        R: Operand,
        Pow: BinaryOp<T, R::Item, Output = T>,
    {
        transform::binary_assign(self, &rhs, <Pow as BinaryOp<T, R::Item>>::call);
        self
    }

    /// Adds one to every element in place.
    #[inline]
    pub fn increment(&mut self) -> &mut Self
    where
        Increment: UnaryOp<T, Output = T>,
    {
        transform::unary_assign(self, <Increment as UnaryOp<T>>::call);
        self
    }

    /// Subtracts one from every element in place.
    #[inline]
    pub fn decrement(&mut self) -> &mut Self
    where
        Decrement: UnaryOp<T, Output = T>,
    {
        transform::unary_assign(self, <Decrement as UnaryOp<T>>::call);
        self
    }

    /// Overwrites every element with the converted element of `other`.
    #[inline]
    pub fn assign<U>(&mut self, other: &Tensor<U, S>) -> &mut Self
    where
        Convert<T>: UnaryOp<U, Output = T>,
    {
        transform::unary_into(self, other, <Convert<T> as UnaryOp<U>>::call);
        self
    }

    /// Returns a copy with every element converted into `U`.
    #[inline]
    pub fn convert<U>(&self) -> Tensor<U, S>
    where
        Convert<U>: UnaryOp<T, Output = U>,
    {
        transform::unary(self, <Convert<U> as UnaryOp<T>>::call)
    }

    #[inline]
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Tensor<U, S> {
        transform::unary(self, f)
    }

    /// Combines `self` with `rhs` position by position; `rhs` broadcasts like an operator operand.
    #[inline]
    pub fn zip_map<R: Operand, U>(
        &self,
        rhs: R,
        f: impl FnMut(&T, &R::Item) -> U,
    ) -> Tensor<U, S> {
        transform::binary(self, &rhs, f)
    }
}
