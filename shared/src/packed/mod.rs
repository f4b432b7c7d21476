//! # Packed ECS view
//!
//! A column-packed, byte-order-explicit snapshot of selected component fields
//! for a set of entities. Two views built from the same field set and the
//! same source data hold identical bytes on every machine, however the work
//! was split into rebuild steps.

use std::ops::Range;

mod error;
mod field;
mod source;
mod view;

pub use error::PackedError;
pub use field::{ElementType, PackedField};
pub use source::{ColumnData, FieldSource};
pub use view::{PackedView, StepStatus, ViewDescriptor, ViewFlags};

use view::{pack_rows, validate_sources};

/// Row width in bytes: the sum of every field's element size.
pub fn calc_stride(fields: &[PackedField]) -> usize {
    fields
        .iter()
        .map(|field| usize::from(field.element_size))
        .sum()
}

/// Whether fields are in ascending `(component_id, field_id)` order.
pub fn fields_are_sorted(fields: &[PackedField]) -> bool {
    fields
        .windows(2)
        .all(|pair| pair[0].sort_key() <= pair[1].sort_key())
}

pub(crate) fn validate_fields(fields: &[PackedField]) -> Result<(), PackedError> {
    for (index, pair) in fields.windows(2).enumerate() {
        if pair[0].sort_key() > pair[1].sort_key() {
            return Err(PackedError::UnsortedFields {
                index: index + 1,
                component_id: pair[1].component_id,
                field_id: pair[1].field_id,
            });
        }
    }
    for (index, field) in fields.iter().enumerate() {
        if !matches!(field.element_size, 1 | 2 | 4 | 8) {
            return Err(PackedError::UnsupportedElementSize {
                index,
                element_size: field.element_size,
            });
        }
        let expected = field.element_type.size();
        if field.element_size != expected {
            return Err(PackedError::ElementSizeMismatch {
                index,
                element_type: field.element_type,
                element_size: field.element_size,
                expected,
            });
        }
        if u32::from(field.quant_bits) >= field.element_type.bits() {
            return Err(PackedError::InvalidQuantization {
                index,
                quant_bits: field.quant_bits,
                element_bits: field.element_type.bits(),
            });
        }
    }
    Ok(())
}

/// Packs entities `first..first + rows_out.len() / stride` straight into
/// `rows_out`, without a view. Several callers may pack disjoint ranges of
/// one buffer concurrently; the result equals a single full rebuild.
pub fn pack_range(
    fields: &[PackedField],
    sources: &[FieldSource],
    first: u32,
    rows_out: &mut [u8],
) -> Result<(), PackedError> {
    validate_fields(fields)?;
    let stride = calc_stride(fields);
    if stride == 0 {
        if rows_out.is_empty() {
            return Ok(());
        }
        return Err(PackedError::RowBufferMisaligned {
            len: rows_out.len(),
            stride,
        });
    }
    if rows_out.len() % stride != 0 {
        return Err(PackedError::RowBufferMisaligned {
            len: rows_out.len(),
            stride,
        });
    }
    let required = first as usize + rows_out.len() / stride;
    validate_sources(fields, sources, required)?;
    pack_rows(fields, sources, first, rows_out, stride);
    Ok(())
}

/// Splits `0..entity_count` into at most `parts` contiguous ranges of
/// near-equal size, purely by index. Earlier ranges take the remainder.
pub fn partition_ranges(entity_count: u32, parts: usize) -> Vec<Range<u32>> {
    if entity_count == 0 {
        return Vec::new();
    }
    let parts = parts.clamp(1, entity_count as usize) as u32;
    let base = entity_count / parts;
    let extra = entity_count % parts;
    let mut ranges = Vec::with_capacity(parts as usize);
    let mut start = 0;
    for part in 0..parts {
        let len = base + u32::from(part < extra);
        ranges.push(start..start + len);
        start += len;
    }
    ranges
}
