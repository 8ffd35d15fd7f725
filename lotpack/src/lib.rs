//! Scan-line packing of parking stalls inside a drawn lot boundary, together with
//! planning-level capacity estimation and multi-level extrusion of the packed result.

/// Geometric primitives, traits and the local projection between degrees and meters
pub mod geometry;

/// Entities describing lots, stall dimensions, packed stalls and layouts
pub mod entities;

/// Unit systems and per-parking-type dimension presets
pub mod units;

/// Planning-level capacity estimation from the lot area
pub mod estimate;

/// The scan-line stall packing engine and its layout strategies
pub mod packing;

/// Vertical replication of a packed level into a multi-level structure
pub mod extrude;

/// Importing drawn boundaries into and exporting layouts out of this library
pub mod io;

/// Helper functions which do not belong to any specific module
pub mod util;
