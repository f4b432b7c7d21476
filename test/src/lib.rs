pub mod helpers;
pub mod test_schema;
pub mod test_world;

pub use helpers::*;
pub use test_schema::{schema, schema_descriptor, Component};
pub use test_world::{TestEntity, TestWorld, WorldColumns};
