//! `FaceId` / `EdgeId`: dense, typed handles for topological entities
//!
//! Every face and edge discovered during one stitch run receives a
//! zero-based id in discovery order from the
//! [`EntityIndex`](crate::topology::identity::EntityIndex). The ids double as
//! indices into the per-face / per-edge arenas and result vectors, so they
//! are `repr(transparent)` over `u32` and convert to `usize` for free.

use std::fmt;

/// Common interface of the typed id newtypes, so arenas can be generic.
pub trait EntityKey: Copy + Eq + fmt::Debug + fmt::Display {
    /// Builds the id for arena slot `index`.
    fn from_index(index: u32) -> Self;
    /// Arena slot of this id.
    fn index(self) -> usize;
}

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(
            Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
        )]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Wraps a raw arena index.
            #[inline]
            pub const fn new(raw: u32) -> Self {
                $name(raw)
            }

            /// Returns the raw `u32` value.
            #[inline]
            pub const fn get(self) -> u32 {
                self.0
            }

            /// Returns the id as an arena index.
            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($name)).field(&self.0).finish()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($label, "#{}"), self.0)
            }
        }

        impl EntityKey for $name {
            #[inline]
            fn from_index(index: u32) -> Self {
                $name(index)
            }

            #[inline]
            fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl From<$name> for usize {
            #[inline]
            fn from(id: $name) -> usize {
                id.index()
            }
        }
    };
}

entity_id!(
    /// Identifier of a topological face.
    FaceId,
    "face"
);

entity_id!(
    /// Identifier of a topological edge.
    EdgeId,
    "edge"
);

#[cfg(test)]
mod layout_tests {
    use super::*;
    use static_assertions::assert_eq_size;

    assert_eq_size!(FaceId, u32);
    assert_eq_size!(EdgeId, u32);
}
