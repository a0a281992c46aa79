//! Raw element buffer codec.
//!
//! The wire format of a tensor is its elements in row-major order with no framing. Primitive
//! elements are written as one native-endian byte range per tensor; tensors of tensors recurse
//! and issue one range per inner tensor. A `bool` is one byte, 0 or 1, and decodes any nonzero
//! byte as `true`. A failure of the writer or reader is returned as is and
//! ends the operation.

use std::io::{Read, Write};

use super::{
    num::Scalar,
    shape::Shape,
    tensor::{Tensor, TensorError},
};

/// A sink of byte ranges.
pub trait Writer {
    type Error;

    fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;
}

impl<F, E> Writer for F
where
    F: FnMut(&[u8]) -> Result<(), E>,
{
    type Error = E;

    #[inline]
    fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        self(bytes)
    }
}

/// A source of byte ranges. Each call must fill the whole range.
pub trait Reader {
    type Error;

    fn read(&mut self, bytes: &mut [u8]) -> Result<(), Self::Error>;
}

impl<F, E> Reader for F
where
    F: FnMut(&mut [u8]) -> Result<(), E>,
{
    type Error = E;

    #[inline]
    fn read(&mut self, bytes: &mut [u8]) -> Result<(), Self::Error> {
        self(bytes)
    }
}

pub trait Codec: Sized {
    /// Number of bytes a value occupies on the wire.
    const BYTES: usize;

    fn encode<W: Writer>(&self, writer: &mut W) -> Result<(), W::Error>;

    fn decode<R: Reader>(&mut self, reader: &mut R) -> Result<(), R::Error>;

    /// Encodes consecutive values, one at a time unless the type knows better.
    fn encode_slice<W: Writer>(values: &[Self], writer: &mut W) -> Result<(), W::Error> {
        values.iter().try_for_each(|value| value.encode(writer))
    }

    fn decode_slice<R: Reader>(values: &mut [Self], reader: &mut R) -> Result<(), R::Error> {
        values.iter_mut().try_for_each(|value| value.decode(reader))
    }
}

impl<T: Scalar> Codec for T {
    const BYTES: usize = size_of::<T>();

    #[inline]
    fn encode<W: Writer>(&self, writer: &mut W) -> Result<(), W::Error> {
        writer.write(bytemuck::bytes_of(self))
    }

    #[inline]
    fn decode<R: Reader>(&mut self, reader: &mut R) -> Result<(), R::Error> {
        reader.read(bytemuck::bytes_of_mut(self))
    }

    #[inline]
    fn encode_slice<W: Writer>(values: &[Self], writer: &mut W) -> Result<(), W::Error> {
        writer.write(bytemuck::cast_slice(values))
    }

    #[inline]
    fn decode_slice<R: Reader>(values: &mut [Self], reader: &mut R) -> Result<(), R::Error> {
        reader.read(bytemuck::cast_slice_mut(values))
    }
}

impl Codec for bool {
    const BYTES: usize = 1;

    #[inline]
    fn encode<W: Writer>(&self, writer: &mut W) -> Result<(), W::Error> {
        writer.write(&[u8::from(*self)])
    }

    #[inline]
    fn decode<R: Reader>(&mut self, reader: &mut R) -> Result<(), R::Error> {
        let mut byte = [0u8; 1];
        reader.read(&mut byte)?;
        *self = byte[0] != 0;
        Ok(())
    }

    #[inline]
    fn encode_slice<W: Writer>(values: &[Self], writer: &mut W) -> Result<(), W::Error> {
        writer.write(bytemuck::cast_slice(values))
    }

    fn decode_slice<R: Reader>(values: &mut [Self], reader: &mut R) -> Result<(), R::Error> {
        let mut bytes = vec![0u8; values.len()];
        reader.read(&mut bytes)?;
        for (value, byte) in values.iter_mut().zip(bytes) {
            *value = byte != 0;
        }
        Ok(())
    }
}

impl<T: Codec, S: Shape> Codec for Tensor<T, S> {
    const BYTES: usize = T::BYTES * S::SIZE;

    #[inline]
    fn encode<W: Writer>(&self, writer: &mut W) -> Result<(), W::Error> {
        T::encode_slice(self.as_slice(), writer)
    }

    #[inline]
    fn decode<R: Reader>(&mut self, reader: &mut R) -> Result<(), R::Error> {
        T::decode_slice(self.as_mut_slice(), reader)
    }
}

/// Writes the buffer of `source` through `writer`.
#[inline]
pub fn serialize<C: Codec, W: Writer>(source: &C, mut writer: W) -> Result<(), W::Error> {
    source.encode(&mut writer)
}

/// Overwrites the buffer of `destination` with bytes from `reader`.
#[inline]
pub fn deserialize<C: Codec, R: Reader>(
    mut reader: R,
    destination: &mut C,
) -> Result<(), R::Error> {
    destination.decode(&mut reader)
}

impl<T: Codec, S: Shape> Tensor<T, S> {
    /// Writes the elements to an [`std::io::Write`].
    pub fn write_to(&self, mut writer: impl Write) -> std::io::Result<()> {
        serialize(self, |bytes: &[u8]| writer.write_all(bytes)).inspect_err(|err| {
            log::error!("failed to write tensor of {} bytes: {err}", Self::BYTES)
        })
    }

    /// Overwrites the elements from an [`std::io::Read`].
    pub fn read_from(&mut self, mut reader: impl Read) -> std::io::Result<()> {
        deserialize(|bytes: &mut [u8]| reader.read_exact(bytes), self).inspect_err(|err| {
            log::error!("failed to read tensor of {} bytes: {err}", Self::BYTES)
        })
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut output = Vec::with_capacity(Self::BYTES);
        let Ok(()) = serialize(self, |bytes: &[u8]| {
            output.extend_from_slice(bytes);
            Ok::<_, std::convert::Infallible>(())
        });
        output
    }
}

impl<T: Codec + Default, S: Shape> Tensor<T, S> {
    /// Decodes a tensor from exactly [`Codec::BYTES`] bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TensorError> {
        if bytes.len() != Self::BYTES {
            return Err(TensorError::Bytes(Self::BYTES, bytes.len()));
        }
        let mut output = Self::default();
        let mut rest = bytes;
        deserialize(
            |data: &mut [u8]| -> Result<(), TensorError> {
                let (head, tail) = rest
                    .split_at_checked(data.len())
                    .ok_or(TensorError::Bytes(Self::BYTES, bytes.len()))?;
                data.copy_from_slice(head);
                rest = tail;
                Ok(())
            },
            &mut output,
        )?;
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use half::{bf16, f16};

    use super::{Codec, deserialize, serialize};
    use crate::loom::{
        shape::{Rank0, Rank2, Rank3},
        tensor::{Matrix, Tensor, TensorError, Vector},
    };

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Full(usize);

    #[test]
    fn test_round_trip() -> Result<(), Box<dyn Error>> {
        let mut rng = fastrand::Rng::with_seed(42);

        let x = Tensor::<i64, Rank3<2, 3, 4>>::from_fn(|index| match index {
            0 => 0,
            1 => i64::MIN,
            2 => i64::MAX,
            3 => -1,
            _ => rng.i64(..),
        });
        let mut y = Tensor::<i64, Rank3<2, 3, 4>>::zeros();
        let bytes = x.to_bytes();
        assert_eq!(bytes.len(), 2 * 3 * 4 * 8);
        y.read_from(bytes.as_slice())?;
        assert_eq!(x, y);

        let x = Matrix::<f32, 3, 3>::from_fn(|index| match index {
            0 => f32::MIN,
            1 => f32::MAX,
            2 => -0.0,
            _ => rng.f32() - 0.5,
        });
        let y = Matrix::<f32, 3, 3>::from_bytes(&x.to_bytes())?;
        assert_eq!(x.map(|x| x.to_bits()), y.map(|y| y.to_bits()));

        let x = Vector::<u8, 5>::new([0, 1, 127, 128, 255]);
        assert_eq!(Vector::<u8, 5>::from_bytes(&x.to_bytes())?, x);

        let x = Vector::<f16, 2>::new([f16::MIN, f16::MAX]);
        assert_eq!(Vector::<f16, 2>::from_bytes(&x.to_bytes())?, x);
        let x = Vector::<bf16, 2>::new([bf16::MIN_POSITIVE, bf16::NEG_ONE]);
        assert_eq!(Vector::<bf16, 2>::from_bytes(&x.to_bytes())?, x);

        let x = Tensor::<u16, Rank0>::splat(u16::MAX);
        assert_eq!(x.to_bytes(), u16::MAX.to_ne_bytes());

        Ok(())
    }

    #[test]
    fn test_native_layout() {
        let x = Vector::<u32, 2>::new([1, 0x0102_0304]);
        let expected = [1u32.to_ne_bytes(), 0x0102_0304u32.to_ne_bytes()].concat();
        assert_eq!(x.to_bytes(), expected);
        assert_eq!(<Vector<u32, 2> as Codec>::BYTES, 8);
    }

    #[test]
    fn test_primitive_writes_once() {
        let x = Matrix::<u16, 4, 4>::from_fn(|index| index as u16);
        let mut calls = vec![];
        serialize(&x, |bytes: &[u8]| {
            calls.push(bytes.len());
            Ok::<_, Full>(())
        })
        .unwrap();
        assert_eq!(calls, vec![32]);
    }

    #[test]
    fn test_composite_writes_per_element() -> Result<(), Box<dyn Error>> {
        let x = Vector::<Vector<i32, 3>, 4>::from_fn(|index| Vector::splat(index as i32));
        let mut calls = 0;
        let mut bytes = vec![];
        serialize(&x, |data: &[u8]| {
            calls += 1;
            bytes.extend_from_slice(data);
            Ok::<_, Full>(())
        })
        .unwrap();
        assert_eq!(calls, 4);
        assert_eq!(bytes.len(), <Vector<Vector<i32, 3>, 4> as Codec>::BYTES);

        let y = Vector::<Vector<i32, 3>, 4>::from_bytes(&bytes)?;
        assert_eq!(x, y);

        let mut z = Vector::<Vector<i32, 3>, 4>::default();
        let mut reads = 0;
        let mut rest = bytes.as_slice();
        deserialize(
            |data: &mut [u8]| {
                reads += 1;
                let (head, tail) = rest.split_at(data.len());
                data.copy_from_slice(head);
                rest = tail;
                Ok::<_, Full>(())
            },
            &mut z,
        )
        .unwrap();
        assert_eq!(reads, 4);
        assert_eq!(z, x);
        Ok(())
    }

    #[test]
    fn test_first_failure_stops() {
        let x = Matrix::<Vector<u8, 2>, 2, 2>::default();
        let mut calls = 0;
        let result = serialize(&x, |_: &[u8]| {
            calls += 1;
            match calls {
                2 => Err(Full(calls)),
                _ => Ok(()),
            }
        });
        assert_eq!(result, Err(Full(2)));
        assert_eq!(calls, 2);

        let mut y = Tensor::<f64, Rank2<2, 2>>::ones();
        let result = deserialize(|_: &mut [u8]| Err::<(), _>(Full(0)), &mut y);
        assert_eq!(result, Err(Full(0)));
        assert_eq!(y, Tensor::<f64, Rank2<2, 2>>::ones());
    }

    #[test]
    fn test_bool_round_trip() -> Result<(), Box<dyn Error>> {
        let x = Vector::<bool, 3>::new([true, false, true]);
        assert_eq!(x.to_bytes(), vec![1, 0, 1]);
        assert_eq!(<Vector<bool, 3> as Codec>::BYTES, 3);

        let mask = Matrix::<i32, 2, 3>::new([1, 5, -2, 7, 0, 3]).greater(2i32);
        let y = Matrix::<bool, 2, 3>::from_bytes(&mask.to_bytes())?;
        assert_eq!(y, mask);
        assert_eq!(y.as_slice(), &[false, true, false, true, false, true]);

        let z = Vector::<bool, 3>::from_bytes(&[0, 2, 1])?;
        assert_eq!(z.as_slice(), &[false, true, true]);

        let mut calls = vec![];
        serialize(&mask, |bytes: &[u8]| {
            calls.push(bytes.len());
            Ok::<_, Full>(())
        })
        .unwrap();
        assert_eq!(calls, vec![6]);

        let mut w = Tensor::<bool, Rank0>::default();
        w.read_from(&[255u8][..])?;
        assert!(w[0]);
        Ok(())
    }

    #[test]
    fn test_length_mismatch() {
        let result = Vector::<u32, 4>::from_bytes(&[0; 15]);
        assert_eq!(result, Err(TensorError::Bytes(16, 15)));

        let mut x = Vector::<u32, 4>::zeros();
        let error = x.read_from(&[0u8; 15][..]).unwrap_err();
        assert_eq!(error.kind(), std::io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_write_to() -> Result<(), Box<dyn Error>> {
        let x = Vector::<i16, 3>::new([-1, 0, 1]);
        let mut buffer = vec![];
        x.write_to(&mut buffer)?;
        assert_eq!(buffer, x.to_bytes());

        let mut full = [0u8; 4];
        let error = x.write_to(&mut full[..]).unwrap_err();
        assert_eq!(error.kind(), std::io::ErrorKind::WriteZero);
        Ok(())
    }
}
