// storage/src/lib.rs

pub mod sequence;
pub mod sled_store;
pub mod store;

pub use sequence::SequenceAllocator;
pub use sled_store::SledStore;
pub use store::ClinicStore;
