use crate::{ByteReader, ByteWrite, SerdeErr};

/// A type that can be written to and read from an explicit little-endian
/// byte stream.
pub trait ByteSerde: Sized {
    fn ser(&self, writer: &mut dyn ByteWrite);

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr>;

    fn byte_length(&self) -> usize;
}

pub trait ConstByteLength {
    fn const_byte_length() -> usize;
}

macro_rules! impl_unsigned {
    ($ty:ty, $write:ident, $read:ident, $len:expr) => {
        impl ByteSerde for $ty {
            fn ser(&self, writer: &mut dyn ByteWrite) {
                writer.$write(*self);
            }

            fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
                reader.$read()
            }

            fn byte_length(&self) -> usize {
                $len
            }
        }

        impl ConstByteLength for $ty {
            fn const_byte_length() -> usize {
                $len
            }
        }
    };
}

macro_rules! impl_signed {
    ($ty:ty, $unsigned:ty, $len:expr) => {
        impl ByteSerde for $ty {
            fn ser(&self, writer: &mut dyn ByteWrite) {
                // two's complement bit pattern, not a numeric conversion
                (*self as $unsigned).ser(writer);
            }

            fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
                Ok(<$unsigned>::de(reader)? as $ty)
            }

            fn byte_length(&self) -> usize {
                $len
            }
        }

        impl ConstByteLength for $ty {
            fn const_byte_length() -> usize {
                $len
            }
        }
    };
}

impl_unsigned!(u8, write_byte, read_byte, 1);
impl_unsigned!(u16, write_u16, read_u16, 2);
impl_unsigned!(u32, write_u32, read_u32, 4);
impl_unsigned!(u64, write_u64, read_u64, 8);
impl_signed!(i8, u8, 1);
impl_signed!(i16, u16, 2);
impl_signed!(i32, u32, 4);
impl_signed!(i64, u64, 8);

impl ByteSerde for bool {
    fn ser(&self, writer: &mut dyn ByteWrite) {
        writer.write_byte(u8::from(*self));
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        match reader.read_byte()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(SerdeErr::InvalidValue {
                type_name: "bool",
                value: u64::from(other),
            }),
        }
    }

    fn byte_length(&self) -> usize {
        1
    }
}

impl<const N: usize> ByteSerde for [u8; N] {
    fn ser(&self, writer: &mut dyn ByteWrite) {
        writer.write_bytes(self);
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        let mut out = [0u8; N];
        out.copy_from_slice(reader.read_bytes(N)?);
        Ok(out)
    }

    fn byte_length(&self) -> usize {
        N
    }
}
