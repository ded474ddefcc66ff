#![warn(missing_docs)]

//! Polygon-mesh fold analysis for foldmesh.
//!
//! Re-exports the math, geometry and topology crates and adds
//! [`analyze_folds`], which measures every interior edge of a
//! [`Topology`] and checks it against a bend window.
//!
//! # Example
//!
//! ```
//! use foldmesh::{analyze_folds, FoldClass, FoldSettings, Point3, Topology};
//!
//! let points: Vec<Point3> = (0..8)
//!     .map(|i| Point3::new((i & 1) as f64, ((i >> 1) & 1) as f64, ((i >> 2) & 1) as f64))
//!     .collect();
//! let loops = vec![
//!     vec![0, 2, 3, 1],
//!     vec![4, 5, 7, 6],
//!     vec![0, 1, 5, 4],
//!     vec![2, 6, 7, 3],
//!     vec![0, 4, 6, 2],
//!     vec![1, 3, 7, 5],
//! ];
//! let mut cube = Topology::from_polygons(&points, &loops, Default::default()).unwrap();
//! let report = analyze_folds(&mut cube, &FoldSettings::default()).unwrap();
//! assert_eq!(report.count(FoldClass::Convex), 12);
//! ```

pub mod analysis;
pub mod error;

pub use foldmesh_geom;
pub use foldmesh_math;
pub use foldmesh_topo;

pub use analysis::{analyze_folds, EdgeFold, FaceFold, FoldClass, FoldReport, FoldSettings};
pub use error::{FoldError, Result};
pub use foldmesh_math::{Point3, Tolerance, Vec3};
pub use foldmesh_topo::{EdgeId, FaceId, Fold, Topology, VertexId};
