/// Scalar kinds a packed column may hold. Fixed-point kinds pack their raw
/// integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
    U64,
    I64,
    Q4_12,
    Q16_16,
    Q24_8,
    Q48_16,
    Q32_32,
}

impl ElementType {
    pub fn size(&self) -> u8 {
        match self {
            ElementType::U8 | ElementType::I8 => 1,
            ElementType::U16 | ElementType::I16 | ElementType::Q4_12 => 2,
            ElementType::U32 | ElementType::I32 | ElementType::Q16_16 | ElementType::Q24_8 => 4,
            ElementType::U64 | ElementType::I64 | ElementType::Q48_16 | ElementType::Q32_32 => 8,
        }
    }

    pub fn is_signed(&self) -> bool {
        match self {
            ElementType::U8 | ElementType::U16 | ElementType::U32 | ElementType::U64 => false,
            ElementType::I8
            | ElementType::I16
            | ElementType::I32
            | ElementType::I64
            | ElementType::Q4_12
            | ElementType::Q16_16
            | ElementType::Q24_8
            | ElementType::Q48_16
            | ElementType::Q32_32 => true,
        }
    }

    pub fn bits(&self) -> u32 {
        u32::from(self.size()) * 8
    }
}

/// Describes one scalar column to be packed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PackedField {
    pub component_id: u32,
    pub field_id: u32,
    pub element_type: ElementType,
    /// Must equal `element_type.size()`; checked when a view is created.
    pub element_size: u8,
    /// Caller-defined bits, carried along untouched.
    pub flags: u32,
    /// Number of low-order bits cleared before packing. 0 packs exactly.
    pub quant_bits: u8,
}

impl PackedField {
    pub fn new(component_id: u32, field_id: u32, element_type: ElementType) -> Self {
        Self {
            component_id,
            field_id,
            element_type,
            element_size: element_type.size(),
            flags: 0,
            quant_bits: 0,
        }
    }

    pub fn with_flags(mut self, flags: u32) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_quant_bits(mut self, quant_bits: u8) -> Self {
        self.quant_bits = quant_bits;
        self
    }

    pub(crate) fn sort_key(&self) -> (u32, u32) {
        (self.component_id, self.field_id)
    }

    /// Mask applied to a raw value before it is packed.
    pub(crate) fn quant_mask(&self) -> u64 {
        if self.quant_bits == 0 {
            u64::MAX
        } else {
            !((1u64 << self.quant_bits) - 1)
        }
    }
}
