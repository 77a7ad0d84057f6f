//! # copingkit Layout
//!
//! This crate tiles a ring of rectangular coping pavers around a pool
//! outline and lets a host grow that ring interactively, row by row, up to
//! the boundaries of the surrounding property.
//!
//! ## Core Components
//!
//! - **Pavers**: Immutable paver records tagged with edge, row and column
//! - **Layout**: Corner-first generator with centered stripe cuts
//! - **Extension**: Drag distance to full rows plus one continuous cut row
//! - **Boundary**: Drag clamping and commit-time filtering against boundaries
//! - **Selection**: Caller-owned selection state and corner directions
//! - **Drag**: Preview, commit and cancel of an extension gesture
//! - **Serialization**: Persisted JSON layout
//!
//! ## Architecture
//!
//! ```text
//! Outline + PaverConfig
//!   └── Layout generator ──> paver collection
//!         └── SelectionState
//!               └── Drag (clamp ─> row builder ─> boundary filter)
//!                     └── committed pavers ──> PersistedLayout (JSON)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use copingkit_core::{PaverConfig, PaverSize, Point};
//! use copingkit_layout::generate_layout;
//!
//! let outline = vec![
//!     Point::new(0.0, 0.0),
//!     Point::new(7000.0, 0.0),
//!     Point::new(7000.0, 3000.0),
//!     Point::new(0.0, 3000.0),
//! ];
//! let config = PaverConfig::uniform(PaverSize::new(400.0, 400.0));
//! let layout = generate_layout(&outline, &config);
//! assert_eq!(layout.corner_pavers.len(), 4);
//! ```

pub mod boundary;
pub mod drag;
pub mod extension;
pub mod layout;
pub mod paver;
pub mod selection_manager;
pub mod serialization;

pub use boundary::{
    clamp_drag_distance, filter_pavers, max_extension_distance, BoundaryFilterResult,
    BoundaryKind, BoundaryPolygon, ClampResult,
};
pub use drag::{cancel_extension, commit_extension, preview_extension, CommitResult, ExtensionPreview};
pub use extension::{
    build_row_pavers, can_extend, extend_selection, extension_direction, row_depth,
    rows_from_drag_distance, selection_direction, shared_edge, ExtensionResult, ExtensionSense,
    RowPlan,
};
pub use layout::{
    generate_from_option, generate_layout, generate_layout_with_params, CopingLayout,
    LayoutValidation, Measurements,
};
pub use paver::{Edge, Paver, PaverCategory};
pub use selection_manager::{
    toggle_selection, CornerDirectionOverrides, ResolvedSelection, SelectionState,
};
pub use serialization::{PersistedLayout, PersistedMetadata, PersistedPaver, PersistedPaverType};
