//! # Lockstep Shared
//! Deterministic state-replication core: fixed-point math, ordered
//! reductions, packed ECS views, a delta codec, a work-stealing pool and a
//! chunk container for persisting codec output.
//!
//! Everything that produces bytes does so in explicit little-endian order,
//! so the same inputs give the same bytes on every machine.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

pub mod delta;
pub mod fixed;
pub mod job;
pub mod ordering;
pub mod packed;
pub mod reduce;
pub mod status;
pub mod tlv;

pub use lockstep_serde::{
    ByteReader, ByteSerde, ByteWrite, ConstByteLength, SerdeErr, SliceWriter, StreamWriter,
};

pub use delta::{
    delta_apply, delta_build, delta_required_bytes, DeltaError, DeltaHeader, DeltaInfo,
};
pub use fixed::{FixedError, FixedPoint, Q16_16, Q24_8, Q32_32, Q48_16, Q4_12};
pub use job::{JobError, PoolConfig, PoolStats, TaskId, ThreadPool, WorkDeque};
pub use ordering::{
    order_item_cmp, order_item_cmp_i32, order_sort, stable_sort_by, DetHeap, OrderError,
    OrderItem,
};
pub use packed::{
    calc_stride, fields_are_sorted, pack_range, partition_ranges, ColumnData, ElementType,
    FieldSource, PackedError, PackedField, PackedView, StepStatus, ViewDescriptor, ViewFlags,
};
pub use reduce::{
    dist_merge, dist_merge_vec, hist_merge, hist_merge_vec, max_i64, max_u64, min_i64, min_u64,
    sort_dist, sort_hist, sort_i64, sort_keyed, sort_u64, sum_i64, sum_u64, DistBucket,
    HistBucket, Keyed, KeyedI64, KeyedU64, ReduceError,
};
pub use tlv::{ChunkEntry, ContainerReader, ContainerWriter, TlvError};
