use crate::fixed::FixedPoint;

/// A borrowed column of component values in host memory layout.
///
/// Element `i` starts at byte `i * stride`. The stride may exceed the element
/// size, which lets a source point into an array of structs. The number of
/// elements is derived from the slice length, so a source can never be read
/// past its end.
#[derive(Debug, Clone, Copy)]
pub struct FieldSource<'a> {
    pub data: &'a [u8],
    pub stride: usize,
}

impl<'a> FieldSource<'a> {
    pub fn new(data: &'a [u8], stride: usize) -> Self {
        Self { data, stride }
    }

    /// How many whole elements of `element_size` bytes the source holds.
    pub fn element_count(&self, element_size: usize) -> usize {
        if self.stride == 0 || self.data.len() < element_size {
            return 0;
        }
        (self.data.len() - element_size) / self.stride + 1
    }

    /// Reads element `index` in host byte order, zero-extended to 64 bits.
    /// The caller has already checked `index < element_count(element_size)`.
    pub(crate) fn read_raw(&self, index: usize, element_size: usize) -> u64 {
        let start = index * self.stride;
        let bytes = &self.data[start..start + element_size];
        match element_size {
            1 => u64::from(bytes[0]),
            2 => u64::from(u16::from_ne_bytes([bytes[0], bytes[1]])),
            4 => u64::from(u32::from_ne_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])),
            _ => u64::from_ne_bytes([
                bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
            ]),
        }
    }
}

/// An owned, tightly packed column in host memory layout, for callers that
/// do not already keep their components in contiguous arrays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnData {
    bytes: Vec<u8>,
    stride: usize,
}

macro_rules! column_from {
    ($fn_name:ident, $ty:ty) => {
        pub fn $fn_name(values: &[$ty]) -> Self {
            let stride = std::mem::size_of::<$ty>();
            let mut bytes = Vec::with_capacity(values.len() * stride);
            for value in values {
                bytes.extend_from_slice(&value.to_ne_bytes());
            }
            Self { bytes, stride }
        }
    };
}

impl ColumnData {
    column_from!(from_u8, u8);
    column_from!(from_i8, i8);
    column_from!(from_u16, u16);
    column_from!(from_i16, i16);
    column_from!(from_u32, u32);
    column_from!(from_i32, i32);
    column_from!(from_u64, u64);
    column_from!(from_i64, i64);

    pub fn from_fixed<T: FixedPoint>(values: &[T]) -> Self {
        let stride = T::BYTES;
        let mut bytes = Vec::with_capacity(values.len() * stride);
        for value in values {
            let raw = value.raw_i64();
            match stride {
                2 => bytes.extend_from_slice(&(raw as i16).to_ne_bytes()),
                4 => bytes.extend_from_slice(&(raw as i32).to_ne_bytes()),
                _ => bytes.extend_from_slice(&raw.to_ne_bytes()),
            }
        }
        Self { bytes, stride }
    }

    pub fn len(&self) -> usize {
        self.bytes.len() / self.stride.max(1)
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn source(&self) -> FieldSource<'_> {
        FieldSource::new(&self.bytes, self.stride)
    }
}
