/// Snapshot and delta chunks survive a trip through the chunk container

use lockstep_shared::{
    delta_apply, delta_build, delta_required_bytes, ContainerReader, ContainerWriter,
    PackedView,
};
use lockstep_test::{assert_bytes_eq, init_logging, TestWorld};

const SNAPSHOT_CHUNK: u32 = 1;
const DELTA_CHUNK: u32 = 2;

#[test]
fn snapshot_and_delta_in_one_container() {
    init_logging();

    let before = TestWorld::generate(32, 77);
    let mut after = before.clone();
    for index in [0, 5, 31] {
        after.touch(index);
    }

    let before_columns = before.columns();
    let after_columns = after.columns();
    let mut s1 = vec![0u8; before.byte_count()];
    let mut s2 = vec![0u8; after.byte_count()];
    let mut baseline = PackedView::new(before.descriptor(4, 0), 32, &mut s1).unwrap();
    baseline.rebuild(&before_columns.sources()).unwrap();
    let mut current = PackedView::new(after.descriptor(4, 1), 32, &mut s2).unwrap();
    current.rebuild(&after_columns.sources()).unwrap();

    let mut delta = vec![0u8; delta_required_bytes(&baseline, &current).unwrap()];
    let info = delta_build(&baseline, &current, &mut delta).unwrap();
    assert_eq!(info.changed_count, 3);

    let mut writer = ContainerWriter::new();
    writer.begin_chunk(SNAPSHOT_CHUNK, 1, 0).unwrap();
    // stream the snapshot row by row
    for entity in 0..baseline.entity_count() {
        writer.append(baseline.row(entity).unwrap()).unwrap();
    }
    writer.end_chunk().unwrap();
    writer.write_chunk(DELTA_CHUNK, 1, 0, &delta).unwrap();
    let file = writer.finish().unwrap();

    let reader = ContainerReader::parse(&file).unwrap();
    assert_eq!(reader.entries().len(), 2);
    let snapshot = reader.chunk(SNAPSHOT_CHUNK).unwrap();
    assert_bytes_eq!(snapshot, baseline.bytes());

    let mut restored = vec![0u8; snapshot.len()];
    delta_apply(snapshot, reader.chunk(DELTA_CHUNK).unwrap(), &mut restored).unwrap();
    assert_bytes_eq!(restored, current.bytes());
}

#[test]
fn container_bytes_are_reproducible() {
    let build = || {
        let world = TestWorld::generate(16, 9);
        let bytes = lockstep_test::pack_all(&world, 1);
        let mut writer = ContainerWriter::new();
        writer.write_chunk(SNAPSHOT_CHUNK, 3, 1, &bytes).unwrap();
        writer.finish().unwrap()
    };
    assert_eq!(build(), build());
}
