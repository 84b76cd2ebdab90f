//! Post infrastructure: storage

mod repository;

pub use repository::InMemoryPostRepository;
