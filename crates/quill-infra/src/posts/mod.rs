//! Post persistence on top of a key-value store.

mod allocator;
pub mod codec;
mod keys;
mod repository;

pub use allocator::KvIdAllocator;
pub use keys::KeySpace;
pub use repository::KvPostRepository;

#[cfg(test)]
mod test_support;
