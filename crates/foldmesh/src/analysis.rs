//! Fold classification and bend-window checks.

use crate::{FoldError, Result};
use foldmesh_math::Tolerance;
use foldmesh_topo::{EdgeId, FaceId, Topology};
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};
use std::fmt;
use tracing::debug;

/// Fold analysis settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FoldSettings {
    /// Tolerance for calling a fold flat or closed.
    pub tolerance: Tolerance,
    /// Smallest dihedral angle allowed (degrees).
    pub min_fold_angle_deg: f64,
    /// Largest dihedral angle allowed (degrees).
    pub max_fold_angle_deg: f64,
}

impl Default for FoldSettings {
    fn default() -> Self {
        Self {
            tolerance: Tolerance::DEFAULT,
            min_fold_angle_deg: 0.0,
            max_fold_angle_deg: 360.0,
        }
    }
}

impl FoldSettings {
    /// Validate settings.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=360.0).contains(&self.min_fold_angle_deg) {
            return Err(FoldError::InvalidSettings(
                "min_fold_angle_deg must be between 0 and 360".into(),
            ));
        }
        if !(0.0..=360.0).contains(&self.max_fold_angle_deg) {
            return Err(FoldError::InvalidSettings(
                "max_fold_angle_deg must be between 0 and 360".into(),
            ));
        }
        if self.min_fold_angle_deg > self.max_fold_angle_deg {
            return Err(FoldError::InvalidSettings(
                "min_fold_angle_deg must not exceed max_fold_angle_deg".into(),
            ));
        }
        if self.tolerance.angular < 0.0 {
            return Err(FoldError::InvalidSettings(
                "angular tolerance must not be negative".into(),
            ));
        }
        Ok(())
    }

    /// Whether a dihedral angle in degrees lies inside the bend window.
    pub fn allows(&self, degrees: f64) -> bool {
        (self.min_fold_angle_deg..=self.max_fold_angle_deg).contains(&degrees)
    }
}

/// Shape of a fold seen from the side the face normals point to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FoldClass {
    /// Coplanar faces (`π`).
    Flat,
    /// Outside corner (below `π`).
    Convex,
    /// Inside corner (above `π`).
    Concave,
    /// Faces folded onto each other (`0`).
    Closed,
}

impl FoldClass {
    /// Classify a dihedral angle in radians.
    pub fn classify(angle: f64, tol: &Tolerance) -> Self {
        if angle <= tol.angular || TAU - angle <= tol.angular {
            FoldClass::Closed
        } else if (angle - PI).abs() <= tol.angular {
            FoldClass::Flat
        } else if angle < PI {
            FoldClass::Convex
        } else {
            FoldClass::Concave
        }
    }
}

/// One interior edge's fold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeFold {
    /// The folded edge.
    pub edge: EdgeId,
    /// Faces on either side.
    pub faces: [FaceId; 2],
    /// Dihedral angle (degrees).
    pub degrees: f64,
    /// Classification of the angle.
    pub class: FoldClass,
}

/// Sharpest fold around one face.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FaceFold {
    /// The face.
    pub face: FaceId,
    /// Smallest dihedral angle over its interior edges (degrees).
    pub min_degrees: f64,
}

/// Result of [`analyze_folds`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FoldReport {
    /// Every interior edge with a measurable fold.
    pub folds: Vec<EdgeFold>,
    /// Faces with at least one interior edge.
    pub faces: Vec<FaceFold>,
    /// Edges whose fold falls outside the bend window.
    pub violations: Vec<EdgeId>,
}

impl FoldReport {
    /// Number of folds of one class.
    pub fn count(&self, class: FoldClass) -> usize {
        self.folds.iter().filter(|f| f.class == class).count()
    }

    /// Fold across an edge, if it was measured.
    pub fn fold(&self, edge: EdgeId) -> Option<&EdgeFold> {
        self.folds.iter().find(|f| f.edge == edge)
    }

    /// Fold with the smallest angle.
    pub fn sharpest(&self) -> Option<&EdgeFold> {
        self.folds.iter().min_by(|a, b| a.degrees.total_cmp(&b.degrees))
    }

    /// Whether every fold lies inside the bend window.
    pub fn is_within_window(&self) -> bool {
        self.violations.is_empty()
    }
}

impl fmt::Display for FoldReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Fold Report:")?;
        writeln!(f, "  Folds: {}", self.folds.len())?;
        writeln!(f, "    flat {}", self.count(FoldClass::Flat))?;
        writeln!(f, "    convex {}", self.count(FoldClass::Convex))?;
        writeln!(f, "    concave {}", self.count(FoldClass::Concave))?;
        writeln!(f, "    closed {}", self.count(FoldClass::Closed))?;
        if let Some(sharpest) = self.sharpest() {
            writeln!(f, "  Sharpest: {:.3} deg", sharpest.degrees)?;
        }
        write!(f, "  Outside bend window: {}", self.violations.len())
    }
}

/// Measure every interior edge of `topo` and check it against the bend window.
///
/// Dihedral angles are cached on the topology as a side effect. Edges whose
/// geometry is degenerate are skipped.
pub fn analyze_folds(topo: &mut Topology, settings: &FoldSettings) -> Result<FoldReport> {
    settings.validate()?;

    let mut report = FoldReport::default();
    for (edge, fold) in topo.compute_all_dihedrals() {
        let faces = topo.edge_faces(edge);
        let [a, b] = faces[..] else {
            continue;
        };
        let degrees = fold.degrees();
        if !settings.allows(degrees) {
            debug!(?edge, degrees, "fold outside bend window");
            report.violations.push(edge);
        }
        report.folds.push(EdgeFold {
            edge,
            faces: [a, b],
            degrees,
            class: FoldClass::classify(fold.angle, &settings.tolerance),
        });
    }

    report.faces = topo
        .faces()
        .keys()
        .filter_map(|face| {
            topo.min_edge_angle(face).map(|min| FaceFold {
                face,
                min_degrees: min.to_degrees(),
            })
        })
        .collect();

    debug!(
        folds = report.folds.len(),
        violations = report.violations.len(),
        "analyzed folds"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use foldmesh_math::Point3;

    fn cube() -> Topology {
        let points: Vec<Point3> = (0..8)
            .map(|i| Point3::new((i & 1) as f64, ((i >> 1) & 1) as f64, ((i >> 2) & 1) as f64))
            .collect();
        let loops = vec![
            vec![0, 2, 3, 1],
            vec![4, 5, 7, 6],
            vec![0, 1, 5, 4],
            vec![2, 6, 7, 3],
            vec![0, 4, 6, 2],
            vec![1, 3, 7, 5],
        ];
        Topology::from_polygons(&points, &loops, Tolerance::DEFAULT).unwrap()
    }

    /// A floor square with a flat extension on one side and a wall rising
    /// from the other, the wall facing back over the floor.
    fn step_points() -> Vec<Point3> {
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(-1.0, 0.0, 0.0),
            Point3::new(-1.0, 1.0, 0.0),
        ]
    }

    fn step() -> Topology {
        let loops = vec![vec![0, 1, 2, 3], vec![2, 1, 4, 5], vec![6, 0, 3, 7]];
        Topology::from_polygons(&step_points(), &loops, Tolerance::DEFAULT).unwrap()
    }

    #[test]
    fn test_default_settings() {
        let settings = FoldSettings::default();
        assert!(settings.validate().is_ok());
        assert!(settings.allows(0.0));
        assert!(settings.allows(360.0));
    }

    #[test]
    fn test_settings_from_partial_json() {
        let settings: FoldSettings =
            serde_json::from_str(r#"{ "max_fold_angle_deg": 200.0 }"#).unwrap();
        assert_eq!(settings.max_fold_angle_deg, 200.0);
        assert_eq!(settings.min_fold_angle_deg, 0.0);
        assert_eq!(settings.tolerance, Tolerance::DEFAULT);
    }

    #[test]
    fn test_invalid_settings() {
        let inverted = FoldSettings {
            min_fold_angle_deg: 100.0,
            max_fold_angle_deg: 90.0,
            ..Default::default()
        };
        assert!(matches!(
            inverted.validate(),
            Err(FoldError::InvalidSettings(_))
        ));

        let too_wide = FoldSettings {
            max_fold_angle_deg: 400.0,
            ..Default::default()
        };
        assert!(too_wide.validate().is_err());

        let mut topo = cube();
        assert!(analyze_folds(&mut topo, &inverted).is_err());
    }

    #[test]
    fn test_classify() {
        let tol = Tolerance::DEFAULT;
        assert_eq!(FoldClass::classify(0.0, &tol), FoldClass::Closed);
        assert_eq!(FoldClass::classify(PI, &tol), FoldClass::Flat);
        assert_eq!(FoldClass::classify(PI / 2.0, &tol), FoldClass::Convex);
        assert_eq!(FoldClass::classify(1.5 * PI, &tol), FoldClass::Concave);
        assert_eq!(FoldClass::classify(TAU - 1e-12, &tol), FoldClass::Closed);

        let loose = Tolerance {
            angular: 0.01,
            ..Tolerance::DEFAULT
        };
        assert_eq!(FoldClass::classify(PI + 0.005, &loose), FoldClass::Flat);
        assert_eq!(FoldClass::classify(PI + 0.005, &tol), FoldClass::Concave);
    }

    #[test]
    fn test_cube_is_all_convex() {
        let mut topo = cube();
        let report = analyze_folds(&mut topo, &FoldSettings::default()).unwrap();
        assert_eq!(report.folds.len(), 12);
        assert_eq!(report.count(FoldClass::Convex), 12);
        assert!(report.is_within_window());

        assert_eq!(report.faces.len(), 6);
        for face in &report.faces {
            assert_relative_eq!(face.min_degrees, 90.0, epsilon = 1e-7);
        }
        // Cached on the topology
        let edge = report.folds[0].edge;
        assert!(topo.edge(edge).unwrap().fold().is_some());
    }

    #[test]
    fn test_bend_window_violations() {
        let mut topo = cube();
        let settings = FoldSettings {
            min_fold_angle_deg: 100.0,
            ..Default::default()
        };
        let report = analyze_folds(&mut topo, &settings).unwrap();
        assert_eq!(report.violations.len(), 12);
        assert!(!report.is_within_window());
    }

    #[test]
    fn test_step_mixes_flat_and_concave() {
        let mut topo = step();
        let settings = FoldSettings {
            max_fold_angle_deg: 200.0,
            ..Default::default()
        };
        let report = analyze_folds(&mut topo, &settings).unwrap();
        assert_eq!(report.folds.len(), 2);
        assert_eq!(report.count(FoldClass::Flat), 1);
        assert_eq!(report.count(FoldClass::Concave), 1);

        let pts = step_points();
        let v1 = topo.find_vertex(&pts[1]).unwrap();
        let v2 = topo.find_vertex(&pts[2]).unwrap();
        let wall = topo.edge_between(v1, v2).unwrap();
        assert_eq!(report.violations, vec![wall]);
        assert_relative_eq!(report.fold(wall).unwrap().degrees, 270.0, epsilon = 1e-7);
        assert_relative_eq!(report.sharpest().unwrap().degrees, 180.0, epsilon = 1e-7);

        // Floor touches both folds, the wall and the extension one each
        let mut mins: Vec<f64> = report.faces.iter().map(|f| f.min_degrees).collect();
        mins.sort_by(f64::total_cmp);
        assert_eq!(mins.len(), 3);
        assert_relative_eq!(mins[0], 180.0, epsilon = 1e-7);
        assert_relative_eq!(mins[1], 180.0, epsilon = 1e-7);
        assert_relative_eq!(mins[2], 270.0, epsilon = 1e-7);
    }

    #[test]
    fn test_report_serializes() {
        let mut topo = step();
        let report = analyze_folds(&mut topo, &FoldSettings::default()).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["folds"].as_array().unwrap().len(), 2);
        assert!(json["violations"].as_array().unwrap().is_empty());

        let text = report.to_string();
        assert!(text.contains("concave 1"));
        assert!(text.contains("flat 1"));
    }

    #[test]
    fn test_open_sheet_has_no_folds() {
        let mut topo = Topology::from_polygons(
            &step_points()[..4],
            &[vec![0, 1, 2, 3]],
            Tolerance::DEFAULT,
        )
        .unwrap();
        let report = analyze_folds(&mut topo, &FoldSettings::default()).unwrap();
        assert!(report.folds.is_empty());
        assert!(report.faces.is_empty());
        assert!(report.sharpest().is_none());
    }
}
