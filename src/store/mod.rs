pub mod disk;
pub mod memory;

pub use disk::DiskRecordStore;
pub use memory::MemoryRecordStore;
