//! # Delta codec
//!
//! Encodes the rows that changed between two packed views of the same shape
//! as `header | bitmask | payload`. Bit `i % 8` of bitmask byte `i / 8` is set
//! iff entity `i` changed; the payload holds the changed rows in ascending
//! entity order.

mod error;
mod header;

pub use error::DeltaError;
pub use header::{DeltaHeader, DeltaInfo};

use log::debug;

use lockstep_serde::{ByteReader, ByteSerde, ByteWrite, SliceWriter};

use crate::packed::PackedView;
use header::bitmask_bytes;

fn check_pair(baseline: &PackedView, current: &PackedView) -> Result<(), DeltaError> {
    if baseline.view_id() != current.view_id() {
        return Err(DeltaError::IdMismatch {
            baseline: baseline.view_id(),
            current: current.view_id(),
        });
    }
    if baseline.entity_count() != current.entity_count() || baseline.stride() != current.stride() {
        return Err(DeltaError::ShapeMismatch {
            baseline_entities: baseline.entity_count(),
            baseline_stride: baseline.stride(),
            current_entities: current.entity_count(),
            current_stride: current.stride(),
        });
    }
    Ok(())
}

fn changed_rows<'b>(
    baseline: &'b [u8],
    current: &'b [u8],
    stride: usize,
) -> impl Iterator<Item = bool> + 'b {
    let rows = if stride == 0 { 0 } else { baseline.len() / stride };
    (0..rows).map(move |i| {
        let range = i * stride..(i + 1) * stride;
        baseline[range.clone()] != current[range]
    })
}

fn sizes(entity_count: u32, stride: usize, changed_count: u32) -> Result<DeltaInfo, DeltaError> {
    let overflow = DeltaError::SizeOverflow {
        entity_count,
        stride,
    };
    if u32::try_from(stride).is_err() {
        return Err(overflow);
    }
    let bitmask_bytes = bitmask_bytes(entity_count);
    let payload_bytes = (changed_count as usize)
        .checked_mul(stride)
        .ok_or_else(|| overflow.clone())?;
    let total_bytes = DeltaHeader::SIZE
        .checked_add(bitmask_bytes)
        .and_then(|n| n.checked_add(payload_bytes))
        .ok_or(overflow)?;
    Ok(DeltaInfo {
        view_id: 0,
        baseline_id: 0,
        entity_count,
        stride,
        changed_count,
        bitmask_bytes,
        payload_bytes,
        total_bytes,
    })
}

fn measure(baseline: &PackedView, current: &PackedView) -> Result<DeltaInfo, DeltaError> {
    check_pair(baseline, current)?;
    let stride = current.stride();
    let changed_count = changed_rows(baseline.bytes(), current.bytes(), stride)
        .filter(|changed| *changed)
        .count() as u32;
    let mut info = sizes(current.entity_count(), stride, changed_count)?;
    info.view_id = current.view_id();
    info.baseline_id = baseline.baseline_id();
    Ok(info)
}

/// Exact number of bytes [`delta_build`] will write for these views.
pub fn delta_required_bytes(
    baseline: &PackedView,
    current: &PackedView,
) -> Result<usize, DeltaError> {
    Ok(measure(baseline, current)?.total_bytes)
}

/// Encodes the rows of `current` that differ from `baseline` into `out`.
///
/// Views must share `view_id`, `entity_count` and `stride`. The total size is
/// computed first; if `out` is too small nothing is written. The header's
/// `baseline_id` is taken from the baseline view.
pub fn delta_build(
    baseline: &PackedView,
    current: &PackedView,
    out: &mut [u8],
) -> Result<DeltaInfo, DeltaError> {
    let info = measure(baseline, current)?;
    if out.len() < info.total_bytes {
        return Err(DeltaError::InsufficientCapacity {
            required: info.total_bytes,
            capacity: out.len(),
        });
    }

    let stride = info.stride;
    let mut bitmask = vec![0u8; info.bitmask_bytes];
    for (i, changed) in changed_rows(baseline.bytes(), current.bytes(), stride).enumerate() {
        if changed {
            bitmask[i / 8] |= 1 << (i % 8);
        }
    }

    let header = DeltaHeader {
        view_id: info.view_id,
        baseline_id: info.baseline_id,
        entity_count: info.entity_count,
        stride: stride as u32,
    };

    let mut writer = SliceWriter::new(&mut out[..info.total_bytes]);
    header.ser(&mut writer);
    for byte in &bitmask {
        writer.write_byte(*byte);
    }
    for (i, changed) in changed_rows(baseline.bytes(), current.bytes(), stride).enumerate() {
        if changed {
            writer.write_bytes(&current.bytes()[i * stride..(i + 1) * stride]);
        }
    }
    writer.finish()?;

    debug!(
        "Delta view {} (baseline {}): {}/{} rows changed, {} bytes",
        info.view_id, info.baseline_id, info.changed_count, info.entity_count, info.total_bytes
    );

    Ok(info)
}

/// Rebuilds the current rows into `out` from `baseline` rows and a delta
/// produced by [`delta_build`]. The whole delta is validated before `out`
/// is touched.
pub fn delta_apply(
    baseline: &[u8],
    delta: &[u8],
    out: &mut [u8],
) -> Result<DeltaInfo, DeltaError> {
    let mut reader = ByteReader::new(delta);
    let header = DeltaHeader::de(&mut reader)?;
    let stride = header.stride as usize;
    let row_bytes = header.row_bytes().ok_or(DeltaError::SizeOverflow {
        entity_count: header.entity_count,
        stride,
    })?;
    if baseline.len() != row_bytes {
        return Err(DeltaError::BaselineSizeMismatch {
            expected: row_bytes,
            provided: baseline.len(),
        });
    }
    if out.len() < row_bytes {
        return Err(DeltaError::InsufficientCapacity {
            required: row_bytes,
            capacity: out.len(),
        });
    }

    let bitmask = reader.read_bytes(header.bitmask_bytes())?;
    let mut changed_count: u32 = 0;
    for (byte_index, byte) in bitmask.iter().enumerate() {
        for bit in 0..8 {
            if byte & (1 << bit) == 0 {
                continue;
            }
            let entity = (byte_index * 8 + bit) as u32;
            if entity >= header.entity_count {
                return Err(DeltaError::StrayBitmaskBit {
                    entity,
                    entity_count: header.entity_count,
                });
            }
            changed_count += 1;
        }
    }

    let mut info = sizes(header.entity_count, stride, changed_count)?;
    info.view_id = header.view_id;
    info.baseline_id = header.baseline_id;
    if delta.len() != info.total_bytes {
        return Err(DeltaError::LengthMismatch {
            expected: info.total_bytes,
            provided: delta.len(),
        });
    }

    out[..row_bytes].copy_from_slice(baseline);
    let mut payload = delta[DeltaHeader::SIZE + info.bitmask_bytes..].chunks_exact(stride.max(1));
    for entity in 0..header.entity_count as usize {
        if bitmask[entity / 8] & (1 << (entity % 8)) != 0 {
            if let Some(row) = payload.next() {
                out[entity * stride..(entity + 1) * stride].copy_from_slice(row);
            }
        }
    }

    Ok(info)
}
