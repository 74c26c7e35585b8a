pub mod fixtures;
pub mod pg_source;
pub mod source;
pub mod store;

pub use fixtures::FixtureSource;
pub use pg_source::PgSource;
pub use source::SnapshotSource;
pub use store::{SnapshotStore, WriteDurability, WriteReceipt};
