//! Domain model: repository descriptors, status rows and their value objects

pub mod entities;
pub mod value_objects;
