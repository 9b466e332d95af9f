//! Face orientation relative to the outward normal of the solid.
//!
//! A B-rep face may use its underlying surface reversed; the kernel's
//! triangulation is always wound with respect to the surface, so reversed
//! faces must flip every triangle to keep outward winding in the global
//! mesh. This is the 1-bit (C₂) orientation group: compose = XOR.

/// Orientation flag reported by the kernel for a face.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
pub enum FaceOrientation {
    /// Triangles already wind counter-clockwise around the outward normal.
    #[default]
    Forward,
    /// Triangles wind against the outward normal and must be flipped.
    Reversed,
}

impl FaceOrientation {
    /// `true` for [`FaceOrientation::Reversed`].
    #[inline]
    pub fn is_reversed(self) -> bool {
        matches!(self, FaceOrientation::Reversed)
    }

    /// Group composition: two reversals cancel.
    #[inline]
    pub fn compose(self, other: Self) -> Self {
        if self.is_reversed() ^ other.is_reversed() {
            FaceOrientation::Reversed
        } else {
            FaceOrientation::Forward
        }
    }

    /// Orders a triangle's corners for this orientation.
    ///
    /// Reversal swaps the last two corners, keeping the first corner in
    /// place so the flipped triangle is a rotation of the fully reversed one.
    #[inline]
    pub fn orient(self, [a, b, c]: [u32; 3]) -> [u32; 3] {
        match self {
            FaceOrientation::Forward => [a, b, c],
            FaceOrientation::Reversed => [a, c, b],
        }
    }
}
