/// Field layout shared by the integration tests

use lockstep_shared::{ElementType, PackedField, ViewDescriptor};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum Component {
    NetId = 0,
    Position = 1,
    Health = 2,
    Team = 3,
    Velocity = 4,
}

/// Every packed field, already in `(component_id, field_id)` order.
pub fn schema() -> Vec<PackedField> {
    vec![
        PackedField::new(Component::NetId as u32, 0, ElementType::U64),
        PackedField::new(Component::Position as u32, 0, ElementType::Q16_16),
        PackedField::new(Component::Position as u32, 1, ElementType::Q16_16),
        PackedField::new(Component::Health as u32, 0, ElementType::U16),
        PackedField::new(Component::Team as u32, 0, ElementType::U8),
        PackedField::new(Component::Velocity as u32, 0, ElementType::Q4_12).with_quant_bits(4),
        PackedField::new(Component::Velocity as u32, 1, ElementType::Q4_12).with_quant_bits(4),
    ]
}

pub fn schema_descriptor(view_id: u64, baseline_id: u64) -> ViewDescriptor {
    ViewDescriptor::new(view_id, baseline_id, schema())
}
