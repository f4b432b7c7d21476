use log::debug;

use lockstep_serde::le;

use super::{calc_stride, validate_fields, FieldSource, PackedError, PackedField};
use crate::status;

bitflags::bitflags! {
    /// View status bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ViewFlags: u32 {
        /// Every entity has been packed since the last reset
        const VALID = 1 << 0;
        /// A rebuild is in progress
        const STALE = 1 << 1;
    }
}

/// Outcome of a successful rebuild step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    /// All entities are packed; the view is VALID
    Complete,
    /// More steps are needed; the view is STALE
    Pending,
}

impl StepStatus {
    pub fn code(&self) -> i32 {
        match self {
            StepStatus::Complete => status::COMPLETE,
            StepStatus::Pending => status::PENDING,
        }
    }
}

/// Everything needed to lay out a view, apart from its storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewDescriptor {
    pub view_id: u64,
    pub baseline_id: u64,
    /// Must be sorted by `(component_id, field_id)`.
    pub fields: Vec<PackedField>,
}

impl ViewDescriptor {
    pub fn new(view_id: u64, baseline_id: u64, fields: Vec<PackedField>) -> Self {
        Self {
            view_id,
            baseline_id,
            fields,
        }
    }
}

/// A packed snapshot of selected component fields over caller-owned bytes.
///
/// Row `i` holds entity `i`: the concatenation of every field in descriptor
/// order, each little-endian. The view is built incrementally with
/// [`PackedView::rebuild_step`]; it is complete once every entity has been
/// packed since the last reset.
#[derive(Debug)]
pub struct PackedView<'a> {
    view_id: u64,
    baseline_id: u64,
    fields: Vec<PackedField>,
    entity_count: u32,
    stride: usize,
    byte_count: usize,
    bytes: &'a mut [u8],
    next_index: u32,
    flags: ViewFlags,
}

struct Layout {
    stride: usize,
    byte_count: usize,
}

fn layout(
    descriptor: &ViewDescriptor,
    entity_count: u32,
    provided: usize,
) -> Result<Layout, PackedError> {
    validate_fields(&descriptor.fields)?;
    let stride = calc_stride(&descriptor.fields);
    let byte_count = stride
        .checked_mul(entity_count as usize)
        .ok_or(PackedError::ByteCountOverflow {
            entity_count,
            stride,
        })?;
    if provided < byte_count {
        return Err(PackedError::StorageTooSmall {
            required: byte_count,
            provided,
        });
    }
    Ok(Layout { stride, byte_count })
}

impl<'a> PackedView<'a> {
    /// Validates the descriptor and lays the view out over `storage`.
    /// Nothing is written to `storage` until the first rebuild step.
    pub fn new(
        descriptor: ViewDescriptor,
        entity_count: u32,
        storage: &'a mut [u8],
    ) -> Result<Self, PackedError> {
        let Layout { stride, byte_count } = layout(&descriptor, entity_count, storage.len())?;

        debug!(
            "PackedView {}: {} fields, {} entities, stride {}, {} bytes",
            descriptor.view_id,
            descriptor.fields.len(),
            entity_count,
            stride,
            byte_count
        );

        Ok(Self {
            view_id: descriptor.view_id,
            baseline_id: descriptor.baseline_id,
            fields: descriptor.fields,
            entity_count,
            stride,
            byte_count,
            bytes: storage,
            next_index: 0,
            flags: ViewFlags::STALE,
        })
    }

    /// Re-lays the view out with a new descriptor over the same storage.
    /// On error the view is left exactly as it was.
    pub fn reconfigure(
        &mut self,
        descriptor: ViewDescriptor,
        entity_count: u32,
    ) -> Result<(), PackedError> {
        let Layout { stride, byte_count } = layout(&descriptor, entity_count, self.bytes.len())?;
        self.view_id = descriptor.view_id;
        self.baseline_id = descriptor.baseline_id;
        self.fields = descriptor.fields;
        self.entity_count = entity_count;
        self.stride = stride;
        self.byte_count = byte_count;
        self.reset();
        Ok(())
    }

    pub fn view_id(&self) -> u64 {
        self.view_id
    }

    pub fn baseline_id(&self) -> u64 {
        self.baseline_id
    }

    pub fn set_baseline_id(&mut self, baseline_id: u64) {
        self.baseline_id = baseline_id;
    }

    pub fn fields(&self) -> &[PackedField] {
        &self.fields
    }

    pub fn entity_count(&self) -> u32 {
        self.entity_count
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn byte_count(&self) -> usize {
        self.byte_count
    }

    pub fn next_index(&self) -> u32 {
        self.next_index
    }

    pub fn flags(&self) -> ViewFlags {
        self.flags
    }

    pub fn is_complete(&self) -> bool {
        self.next_index >= self.entity_count
    }

    /// The packed rows. Only meaningful once the view is complete.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes[..self.byte_count]
    }

    pub fn row(&self, entity: u32) -> Result<&[u8], PackedError> {
        if entity >= self.entity_count {
            return Err(PackedError::EntityOutOfRange {
                entity,
                entity_count: self.entity_count,
            });
        }
        let start = entity as usize * self.stride;
        Ok(&self.bytes[start..start + self.stride])
    }

    /// Byte offset of `field` within a row.
    pub fn field_offset(&self, field: usize) -> Result<usize, PackedError> {
        if field >= self.fields.len() {
            return Err(PackedError::FieldOutOfRange {
                field,
                field_count: self.fields.len(),
            });
        }
        Ok(calc_stride(&self.fields[..field]))
    }

    /// Decodes one packed element, zero-extended.
    pub fn read_field(&self, entity: u32, field: usize) -> Result<u64, PackedError> {
        let offset = self.field_offset(field)?;
        let size = usize::from(self.fields[field].element_size);
        let row = self.row(entity)?;
        Ok(le::decode_width(&row[offset..offset + size]))
    }

    /// Decodes one packed element, sign-extended for signed element types.
    pub fn read_field_i64(&self, entity: u32, field: usize) -> Result<i64, PackedError> {
        let raw = self.read_field(entity, field)?;
        let element_type = self.fields[field].element_type;
        let bits = element_type.bits();
        if !element_type.is_signed() || bits == 64 {
            return Ok(raw as i64);
        }
        let shift = 64 - bits;
        Ok(((raw << shift) as i64) >> shift)
    }

    /// Drops progress; the next step starts again at entity 0.
    pub fn reset(&mut self) {
        self.next_index = 0;
        self.flags.remove(ViewFlags::VALID);
        self.flags.insert(ViewFlags::STALE);
    }

    /// Packs every entity in one call.
    pub fn rebuild(&mut self, sources: &[FieldSource]) -> Result<StepStatus, PackedError> {
        self.check_sources(sources)?;
        self.reset();
        self.rebuild_step(sources, self.entity_count.max(1))
    }

    /// Packs up to `max_entities` entities starting at `next_index`.
    ///
    /// Every source is validated before any byte is written. The bytes
    /// produced do not depend on how the work is split into steps.
    pub fn rebuild_step(
        &mut self,
        sources: &[FieldSource],
        max_entities: u32,
    ) -> Result<StepStatus, PackedError> {
        self.check_sources(sources)?;

        if self.is_complete() {
            self.mark_complete();
            return Ok(StepStatus::Complete);
        }
        if max_entities == 0 {
            return Err(PackedError::ZeroStepBudget);
        }

        let first = self.next_index;
        let end = first.saturating_add(max_entities).min(self.entity_count);
        let rows = &mut self.bytes[first as usize * self.stride..end as usize * self.stride];
        pack_rows(&self.fields, sources, first, rows, self.stride);
        self.next_index = end;

        if self.is_complete() {
            self.mark_complete();
            debug!(
                "PackedView {}: rebuilt {} entities ({} bytes)",
                self.view_id, self.entity_count, self.byte_count
            );
            Ok(StepStatus::Complete)
        } else {
            self.flags.remove(ViewFlags::VALID);
            self.flags.insert(ViewFlags::STALE);
            Ok(StepStatus::Pending)
        }
    }

    fn mark_complete(&mut self) {
        self.flags.remove(ViewFlags::STALE);
        self.flags.insert(ViewFlags::VALID);
    }

    fn check_sources(&self, sources: &[FieldSource]) -> Result<(), PackedError> {
        if self.stride == 0 && self.entity_count > 0 {
            return Err(PackedError::ZeroStride {
                entity_count: self.entity_count,
            });
        }
        validate_sources(&self.fields, sources, self.entity_count as usize)
    }
}

pub(crate) fn validate_sources(
    fields: &[PackedField],
    sources: &[FieldSource],
    required: usize,
) -> Result<(), PackedError> {
    if sources.len() != fields.len() {
        return Err(PackedError::SourceCountMismatch {
            expected: fields.len(),
            provided: sources.len(),
        });
    }
    for (index, (field, source)) in fields.iter().zip(sources).enumerate() {
        let element_size = usize::from(field.element_size);
        if source.stride < element_size {
            return Err(PackedError::SourceStrideTooSmall {
                index,
                stride: source.stride,
                element_size,
            });
        }
        let available = source.element_count(element_size);
        if available < required {
            return Err(PackedError::SourceTooShort {
                index,
                available,
                required,
            });
        }
    }
    Ok(())
}

/// Packs rows for entities `first..first + rows.len() / stride`.
/// Sources, stride and `rows` length have already been validated.
pub(crate) fn pack_rows(
    fields: &[PackedField],
    sources: &[FieldSource],
    first: u32,
    rows: &mut [u8],
    stride: usize,
) {
    for (row_index, row) in rows.chunks_exact_mut(stride).enumerate() {
        let entity = first as usize + row_index;
        let mut offset = 0;
        for (field, source) in fields.iter().zip(sources) {
            let size = usize::from(field.element_size);
            let raw = source.read_raw(entity, size) & field.quant_mask();
            le::encode_width(raw, &mut row[offset..offset + size]);
            offset += size;
        }
    }
}
