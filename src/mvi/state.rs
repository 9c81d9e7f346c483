//! Base trait for feature state in MVI architecture.

use std::fmt;

/// Marker trait for feature state objects.
///
/// States should be:
/// - Value-typed (Clone to snapshot for observers)
/// - Self-contained (all data needed to render the view)
/// - Comparable (PartialEq for detecting changes)
pub trait FeatureState: Clone + PartialEq + fmt::Debug + Send + Sync + 'static {}
