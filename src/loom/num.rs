use std::fmt::{Debug, Display};

use bytemuck::Pod;
use derive_more::Display;
use half::{bf16, f16};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DataType {
    I8,
    I16,
    I32,
    I64,
    I128,
    ISize,
    U8,
    U16,
    U32,
    U64,
    U128,
    USize,
    F16,
    BF16,
    F32,
    F64,
}

impl DataType {
    /// Returns the number of bytes one value of this type occupies.
    pub const fn size(self) -> usize {
        match self {
            DataType::I8 | DataType::U8 => 1,
            DataType::I16 | DataType::U16 | DataType::F16 | DataType::BF16 => 2,
            DataType::I32 | DataType::U32 | DataType::F32 => 4,
            DataType::I64 | DataType::U64 | DataType::F64 => 8,
            DataType::I128 | DataType::U128 => 16,
            DataType::ISize | DataType::USize => size_of::<usize>(),
        }
    }

    /// Returns `true` for the floating point types.
    pub const fn is_float(self) -> bool {
        matches!(
            self,
            DataType::F16 | DataType::BF16 | DataType::F32 | DataType::F64
        )
    }
}

pub trait Zero {
    fn zero() -> Self;
}

pub trait One {
    fn one() -> Self;
}

/// Raises a value to a power. Integers take `u32` exponents, floats take their own type or `i32`.
pub trait Pow<Rhs = Self> {
    type Output;

    fn pow(self, rhs: Rhs) -> Self::Output;
}

/// Moves a value one unit up or down. Integers wrap at their bounds.
pub trait Step {
    fn increment(self) -> Self;

    fn decrement(self) -> Self;
}

/// A primitive element type: plain old data that can be broadcast and serialized in bulk.
pub trait Scalar:
    Sized
    + Pod
    + Zero
    + One
    + Step
    + PartialEq
    + PartialOrd
    + Debug
    + Display
    + Send
    + Sync
    + sealed::Sealed
{
    const DATA_TYPE: DataType;
}

macro_rules! impl_scalar {
    ($ty:ty, $data_type:ident, $zero:expr, $one:expr) => {
        impl Zero for $ty {
            #[inline]
            fn zero() -> Self {
                $zero
            }
        }

        impl One for $ty {
            #[inline]
            fn one() -> Self {
                $one
            }
        }

        impl Scalar for $ty {
            const DATA_TYPE: DataType = DataType::$data_type;
        }

        impl sealed::Sealed for $ty {}
    };
}

impl_scalar!(i8, I8, 0, 1);
impl_scalar!(i16, I16, 0, 1);
impl_scalar!(i32, I32, 0, 1);
impl_scalar!(i64, I64, 0, 1);
impl_scalar!(i128, I128, 0, 1);
impl_scalar!(isize, ISize, 0, 1);
impl_scalar!(u8, U8, 0, 1);
impl_scalar!(u16, U16, 0, 1);
impl_scalar!(u32, U32, 0, 1);
impl_scalar!(u64, U64, 0, 1);
impl_scalar!(u128, U128, 0, 1);
impl_scalar!(usize, USize, 0, 1);
impl_scalar!(f16, F16, f16::ZERO, f16::ONE);
impl_scalar!(bf16, BF16, bf16::ZERO, bf16::ONE);
impl_scalar!(f32, F32, 0.0, 1.0);
impl_scalar!(f64, F64, 0.0, 1.0);

macro_rules! impl_pow_int {
    ($($ty:ty),+) => {
        $(
            impl Pow<u32> for $ty {
                type Output = $ty;

                #[inline]
                fn pow(self, rhs: u32) -> Self::Output {
                    <$ty>::pow(self, rhs)
                }
            }
        )+
    };
}

impl_pow_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! impl_step_int {
    ($($ty:ty),+) => {
        $(
            impl Step for $ty {
                #[inline]
                fn increment(self) -> Self {
                    self.wrapping_add(1)
                }

                #[inline]
                fn decrement(self) -> Self {
                    self.wrapping_sub(1)
                }
            }
        )+
    };
}

impl_step_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! impl_step_float {
    ($($ty:ty),+) => {
        $(
            impl Step for $ty {
                #[inline]
                fn increment(self) -> Self {
                    self + <$ty>::one()
                }

                #[inline]
                fn decrement(self) -> Self {
                    self - <$ty>::one()
                }
            }
        )+
    };
}

impl_step_float!(f16, bf16, f32, f64);

macro_rules! impl_pow_float {
    ($($ty:ty),+) => {
        $(
            impl Pow for $ty {
                type Output = $ty;

                #[inline]
                fn pow(self, rhs: $ty) -> Self::Output {
                    self.powf(rhs)
                }
            }

            impl Pow<i32> for $ty {
                type Output = $ty;

                #[inline]
                fn pow(self, rhs: i32) -> Self::Output {
                    self.powi(rhs)
                }
            }
        )+
    };
}

impl_pow_float!(f32, f64);

macro_rules! impl_pow_half {
    ($($ty:ty),+) => {
        $(
            impl Pow for $ty {
                type Output = $ty;

                #[inline]
                fn pow(self, rhs: $ty) -> Self::Output {
                    <$ty>::from_f32(self.to_f32().powf(rhs.to_f32()))
                }
            }

            impl Pow<i32> for $ty {
                type Output = $ty;

                #[inline]
                fn pow(self, rhs: i32) -> Self::Output {
                    <$ty>::from_f32(self.to_f32().powi(rhs))
                }
            }
        )+
    };
}

impl_pow_half!(f16, bf16);

mod sealed {
    pub trait Sealed {}
}
