/// Deterministic entity data for packing tests
/// Columns are plain host-layout arrays, the way an ECS stores them

use lockstep_shared::{
    calc_stride, ColumnData, FieldSource, PackedField, ViewDescriptor, Q16_16, Q4_12,
};

use crate::{schema, schema_descriptor};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TestEntity {
    pub net_id: u64,
    pub x: Q16_16,
    pub y: Q16_16,
    pub health: u16,
    pub team: u8,
    pub dx: Q4_12,
    pub dy: Q4_12,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TestWorld {
    pub entities: Vec<TestEntity>,
}

/// Owned columns in schema order.
pub struct WorldColumns {
    columns: Vec<ColumnData>,
}

impl WorldColumns {
    pub fn sources(&self) -> Vec<FieldSource<'_>> {
        self.columns.iter().map(ColumnData::source).collect()
    }
}

impl TestWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds `count` entities from `seed`. Same seed, same world.
    pub fn generate(count: usize, seed: u64) -> Self {
        let mut rng = fastrand::Rng::with_seed(seed);
        let entities = (0..count)
            .map(|index| TestEntity {
                net_id: 1000 + index as u64,
                x: Q16_16::from_raw(rng.i32(..)),
                y: Q16_16::from_raw(rng.i32(..)),
                health: rng.u16(..=100),
                team: rng.u8(..4),
                dx: Q4_12::from_raw(rng.i16(..)),
                dy: Q4_12::from_raw(rng.i16(..)),
            })
            .collect();
        Self { entities }
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn fields(&self) -> Vec<PackedField> {
        schema()
    }

    pub fn descriptor(&self, view_id: u64, baseline_id: u64) -> ViewDescriptor {
        schema_descriptor(view_id, baseline_id)
    }

    pub fn stride(&self) -> usize {
        calc_stride(&schema())
    }

    pub fn byte_count(&self) -> usize {
        self.stride() * self.len()
    }

    /// Moves an entity and drops its health, as a game tick would.
    pub fn touch(&mut self, index: usize) {
        let entity = &mut self.entities[index];
        entity.x = entity.x + Q16_16::ONE;
        entity.health = entity.health.wrapping_add(1);
    }

    pub fn columns(&self) -> WorldColumns {
        let e = &self.entities;
        let columns = vec![
            ColumnData::from_u64(&e.iter().map(|e| e.net_id).collect::<Vec<_>>()),
            ColumnData::from_fixed(&e.iter().map(|e| e.x).collect::<Vec<_>>()),
            ColumnData::from_fixed(&e.iter().map(|e| e.y).collect::<Vec<_>>()),
            ColumnData::from_u16(&e.iter().map(|e| e.health).collect::<Vec<_>>()),
            ColumnData::from_u8(&e.iter().map(|e| e.team).collect::<Vec<_>>()),
            ColumnData::from_fixed(&e.iter().map(|e| e.dx).collect::<Vec<_>>()),
            ColumnData::from_fixed(&e.iter().map(|e| e.dy).collect::<Vec<_>>()),
        ];
        WorldColumns { columns }
    }
}
