//! # copingkit
//!
//! Coping paver layout engine for swimming pool outlines:
//! - Corner, full and center stripe placement around a polygon
//! - Selection of rows and edges, with outward or inward row extension
//! - Boundary clamping so extensions stop short of fences and obstacles
//! - Persisted JSON layouts with measurements and validation
//!
//! ## Architecture
//!
//! copingkit is organized as a workspace with multiple crates:
//!
//! 1. **copingkit-core** - Constants, errors, units, geometry, engine parameters
//! 2. **copingkit-layout** - Paver model, generator, extension, boundary, selection, persistence
//! 3. **copingkit-settings** - JSON/TOML engine configuration
//! 4. **copingkit** - Facade that re-exports the crates above

pub use copingkit_core::{constants, geometry, units};
pub use copingkit_layout as layout;
pub use copingkit_settings as settings;

pub use copingkit_core::{
    CopingParams, Error, GeometryError, LayoutError, MeasurementSystem, PaverConfig, PaverOption,
    PaverSize, Point, Result, SelectionError,
};

pub use copingkit_layout::{
    build_row_pavers, can_extend, cancel_extension, clamp_drag_distance, commit_extension,
    extend_selection, extension_direction, filter_pavers, generate_from_option, generate_layout,
    generate_layout_with_params, max_extension_distance, preview_extension, row_depth,
    rows_from_drag_distance, selection_direction, shared_edge, toggle_selection,
    BoundaryFilterResult, BoundaryKind, BoundaryPolygon, ClampResult, CommitResult, CopingLayout,
    CornerDirectionOverrides, Edge, ExtensionPreview, ExtensionResult, ExtensionSense,
    LayoutValidation, Measurements, Paver, PaverCategory, PersistedLayout, PersistedMetadata,
    PersistedPaver, PersistedPaverType, ResolvedSelection, RowPlan, SelectionState,
};

pub use copingkit_settings::{Config, LayoutDefaults, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
///
/// Fails if a global subscriber is already installed.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

/// Generate a layout for `outline` using the preset and tunables in `config`.
///
/// Fails with `LayoutError::CopingDisabled` when the configured preset is `none`.
pub fn generate_with_config(outline: &[Point], config: &Config) -> Result<CopingLayout> {
    generate_from_option(outline, config.defaults.paver_option, &config.coping)
}

/// Material summary of `layout` in the display units chosen in `config`.
pub fn describe_layout(layout: &CopingLayout, config: &Config) -> String {
    layout
        .measurements
        .summary(config.defaults.measurement_system)
}
