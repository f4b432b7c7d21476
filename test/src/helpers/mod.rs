pub mod assertions;

pub use packing::{pack_all, pack_in_steps, pack_parallel};

/// Installs a debug-level test logger once per test binary.
pub fn init_logging() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init()
        .ok();
}
