//! Post storage that needs no external services.

mod memory;

pub use memory::InMemoryPostRepository;
