//! Default values for archmetrics configuration.
//!
//! All hardcoded defaults are centralized here for easy maintenance.

use crate::metrics::PartitionStrategy;
use crate::traversal::ContainmentMode;

use super::ReportFormat;

// ============================================================================
// Analysis Defaults
// ============================================================================

/// Pre-flattened CHILDREN_OF relations are read literally.
pub const DEFAULT_CONTAINMENT: ContainmentMode = ContainmentMode::Flattened;

/// Module children are clustered in a single non-merging pass.
pub const DEFAULT_PARTITION: PartitionStrategy = PartitionStrategy::Greedy;

/// Metrics run on the calling thread.
pub const DEFAULT_PARALLEL: bool = false;

// ============================================================================
// Report Defaults
// ============================================================================

pub const DEFAULT_REPORT_FORMAT: ReportFormat = ReportFormat::Console;

/// Decimal places of percentages in console reports.
pub const DEFAULT_PRECISION: usize = 2;

// ============================================================================
// File Locations
// ============================================================================

/// Project-local config file name.
pub const PROJECT_CONFIG_FILE: &str = "archmetrics.toml";

/// Directory under the user config dir.
pub const USER_CONFIG_DIR: &str = "archmetrics";

/// File name inside [`USER_CONFIG_DIR`].
pub const USER_CONFIG_FILE: &str = "config.toml";

// ============================================================================
// Environment Overrides
// ============================================================================

pub const ENV_CONTAINMENT: &str = "ARCHMETRICS_CONTAINMENT";
pub const ENV_PARTITION: &str = "ARCHMETRICS_PARTITION";
pub const ENV_PARALLEL: &str = "ARCHMETRICS_PARALLEL";
pub const ENV_REPORT_FORMAT: &str = "ARCHMETRICS_REPORT_FORMAT";
