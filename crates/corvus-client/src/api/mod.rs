//! Per-resource API surfaces.

pub mod clusters;

pub use clusters::ClustersApi;
