//! Structural self-checks for stitched output.
//!
//! Implemented by [`GlobalMesh`](crate::mesh::GlobalMesh) and
//! [`StitchedModel`](crate::algs::stitch::StitchedModel). The stitch driver
//! calls [`DebugInvariants::validate_invariants`] when
//! [`StitchOptions::check_invariants`](crate::options::StitchOptions) is set;
//! the macro form is for internal hot paths.

use crate::mesh_error::MeshStitchError;

/// Invariant validation for mesh structures.
pub trait DebugInvariants {
    /// Validate invariants and return the first violation found.
    fn validate_invariants(&self) -> Result<(), MeshStitchError>;

    /// Panic on the first violation when invariant checking is compiled in.
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "stitched mesh");
    }
}

/// Run a fallible check and panic with context on error, only in debug builds
/// or with `strict-invariants` / `check-invariants` enabled.
#[macro_export]
macro_rules! debug_invariants {
    ($expr:expr, $($ctx:tt)*) => {
        #[cfg(any(debug_assertions, feature = "strict-invariants", feature = "check-invariants"))]
        if let Err(e) = $expr {
            panic!(concat!("[invariants] ", $($ctx)*, ": {}"), e);
        }
    };
}
