//! Run-time configuration for a stitch run.

/// How the kernel's overlay node order is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlayOrder {
    /// Stable-sort every overlay by parameter before merging. Kernels report
    /// overlays along the edge's own direction, which runs backwards for
    /// faces that use the edge reversed.
    #[default]
    SortByParameter,
    /// Take the kernel order as given. Overlays that are not ascending are
    /// rejected as invalid.
    Trust,
}

/// What to do with a triangle whose remapped corners are not distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DegenerateHandling {
    /// Drop and count.
    #[default]
    Drop,
    /// Drop, count, and log a warning per triangle.
    Warn,
}

/// Options for [`stitch_model`](crate::algs::stitch::stitch_model).
#[derive(Debug, Clone, Copy)]
pub struct StitchOptions {
    /// Run the orphan compaction pass after assembly.
    pub remove_orphans: bool,
    /// Validate the finished model before returning it.
    pub check_invariants: bool,
    /// Overlay normalisation policy.
    pub overlay_order: OverlayOrder,
    /// Degenerate triangle policy.
    pub degenerate_triangles: DegenerateHandling,
}

impl Default for StitchOptions {
    fn default() -> Self {
        Self {
            remove_orphans: true,
            check_invariants: true,
            overlay_order: OverlayOrder::SortByParameter,
            degenerate_triangles: DegenerateHandling::Drop,
        }
    }
}

impl StitchOptions {
    /// Assembly only: no compaction, no final validation. Useful to inspect
    /// the raw welded mesh including orphans.
    pub fn raw() -> Self {
        Self {
            remove_orphans: false,
            check_invariants: false,
            ..Self::default()
        }
    }

    /// Default pipeline with warnings for every dropped triangle.
    pub fn verbose() -> Self {
        Self {
            degenerate_triangles: DegenerateHandling::Warn,
            ..Self::default()
        }
    }
}
