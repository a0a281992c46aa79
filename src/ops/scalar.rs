//! Binary operators with a primitive scalar on the left, such as `10 - tensor`.

use half::{bf16, f16};

use super::BinaryOp;
use crate::loom::{shape::Shape, tensor::Tensor, transform};

macro_rules! impl_scalar_lhs {
    (@op $ty:ty, $name:ident, $f:ident) => {
        impl<U, S> std::ops::$name<Tensor<U, S>> for $ty
        where
            S: Shape,
            super::$name: BinaryOp<$ty, U>,
        {
            type Output = Tensor<<super::$name as BinaryOp<$ty, U>>::Output, S>;

            #[inline]
            fn $f(self, rhs: Tensor<U, S>) -> Self::Output {
                transform::binary(&self, &rhs, <super::$name as BinaryOp<$ty, U>>::call)
            }
        }

        impl<U, S> std::ops::$name<&Tensor<U, S>> for $ty
        where
            S: Shape,
            super::$name: BinaryOp<$ty, U>,
        {
            type Output = Tensor<<super::$name as BinaryOp<$ty, U>>::Output, S>;

            #[inline]
            fn $f(self, rhs: &Tensor<U, S>) -> Self::Output {
                transform::binary(&self, rhs, <super::$name as BinaryOp<$ty, U>>::call)
            }
        }
    };
    ($($ty:ty),+ $(,)?) => {
        $(
            impl_scalar_lhs!(@op $ty, Add, add);
            impl_scalar_lhs!(@op $ty, Sub, sub);
            impl_scalar_lhs!(@op $ty, Mul, mul);
            impl_scalar_lhs!(@op $ty, Div, div);
            impl_scalar_lhs!(@op $ty, Rem, rem);
            impl_scalar_lhs!(@op $ty, Shl, shl);
            impl_scalar_lhs!(@op $ty, Shr, shr);
            impl_scalar_lhs!(@op $ty, BitAnd, bitand);
            impl_scalar_lhs!(@op $ty, BitOr, bitor);
            impl_scalar_lhs!(@op $ty, BitXor, bitxor);
        )+
    };
}

impl_scalar_lhs!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f16, bf16, f32, f64
);
