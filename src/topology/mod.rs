//! Topological identity for kernel faces and edges.
//!
//! This module provides:
//! - Typed dense ids ([`FaceId`], [`EdgeId`]) used as arena indices
//! - The hash-bucketed [`EntityIndex`] that collapses kernel handles to ids
//! - [`FaceOrientation`], the winding flag carried by each face

pub mod entity;
pub mod identity;
pub mod orientation;

pub use entity::{EdgeId, EntityKey, FaceId};
pub use identity::EntityIndex;
pub use orientation::FaceOrientation;
