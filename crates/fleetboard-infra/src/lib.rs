//! Infrastructure layer - id generation, file loaders, snapshot persistence

pub mod id_gen;
pub mod persistence;
pub mod seed_loader;
pub mod text_source;

pub use id_gen::UuidIdGenerator;
