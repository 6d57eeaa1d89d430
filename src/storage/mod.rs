/// Snapshot file codec
pub mod snapshot;

pub use snapshot::{SnapshotIndex, SnapshotWriter, load, snapshot_path};
