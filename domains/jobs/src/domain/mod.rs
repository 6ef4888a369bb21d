//! Jobs domain layer: entities and their invariants

pub mod entities;
