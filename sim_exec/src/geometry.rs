//! # Track geometry
//!
//! Implicit-function tests for points against an ellipse, and against the
//! "thick" ellipse (annulus) that forms the track.
//!
//! The free functions take raw coordinates so they can be used without
//! building an [`Ellipse`]. The typed wrappers carry the same semantics.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use nalgebra::Point2;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// An axis-aligned ellipse.
///
/// Units: centimeters
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ellipse {
    /// Centre of the ellipse
    pub centre_cm: Point2<f64>,

    /// Semi-axis along X
    pub semi_axis_a_cm: f64,

    /// Semi-axis along Y
    pub semi_axis_b_cm: f64,
}

/// An annulus of constant thickness centred on a nominal ellipse.
///
/// The outer boundary is the centreline grown by half the thickness on both
/// semi-axes, the inner boundary is the centreline shrunk by the same amount.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ThickEllipse {
    /// The nominal ellipse running down the middle of the annulus
    pub centreline: Ellipse,

    /// Total thickness of the annulus
    ///
    /// Units: centimeters
    pub thickness_cm: f64,
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Evaluate the canonical ellipse implicit function at `(x, y)`.
///
/// Zero on the boundary, positive outside and negative inside. `a` and `b`
/// must be non-zero.
pub fn where_point(x: f64, y: f64, a: f64, b: f64, x0: f64, y0: f64) -> f64 {
    (x - x0).powi(2) / a.powi(2) + (y - y0).powi(2) / b.powi(2) - 1.0
}

/// Score a point against the annulus of the given thickness centred on the
/// ellipse `(a, b, x0, y0)`.
///
/// - Beyond the outer boundary: the (positive) outer ellipse score.
/// - Inside the inner boundary: the (negative) inner ellipse score.
/// - Anywhere in between, boundaries included: exactly `0.0`.
pub fn where_point_thick(x: f64, y: f64, a: f64, b: f64, x0: f64, y0: f64, thickness: f64) -> f64 {
    let half = thickness / 2.0;

    let outer = where_point(x, y, a + half, b + half, x0, y0);
    if outer > 0.0 {
        return outer;
    }

    let inner = where_point(x, y, a - half, b - half, x0, y0);
    if inner < 0.0 {
        return inner;
    }

    0.0
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Ellipse {
    pub fn new(centre_cm: Point2<f64>, semi_axis_a_cm: f64, semi_axis_b_cm: f64) -> Self {
        Self {
            centre_cm,
            semi_axis_a_cm,
            semi_axis_b_cm,
        }
    }

    /// Implicit function value for the point, see [`where_point`].
    pub fn where_point(&self, point_cm: &Point2<f64>) -> f64 {
        where_point(
            point_cm.x,
            point_cm.y,
            self.semi_axis_a_cm,
            self.semi_axis_b_cm,
            self.centre_cm.x,
            self.centre_cm.y,
        )
    }

    /// Return an ellipse with the same centre and both semi-axes grown by
    /// `delta_cm` (shrunk if negative).
    pub fn offset(&self, delta_cm: f64) -> Self {
        Self {
            centre_cm: self.centre_cm,
            semi_axis_a_cm: self.semi_axis_a_cm + delta_cm,
            semi_axis_b_cm: self.semi_axis_b_cm + delta_cm,
        }
    }

    /// Point on the ellipse at parametric angle `t_rad`.
    pub fn point_at(&self, t_rad: f64) -> Point2<f64> {
        Point2::new(
            self.centre_cm.x + self.semi_axis_a_cm * t_rad.cos(),
            self.centre_cm.y + self.semi_axis_b_cm * t_rad.sin(),
        )
    }

    /// Signed distance from the point to the ellipse, measured along the ray
    /// from the centre through the point.
    ///
    /// Positive outside, negative inside. The ray is undefined at the centre
    /// itself, where the distance along the vertical (`-b`) is returned.
    pub fn radial_deviation(&self, point_cm: &Point2<f64>) -> f64 {
        let diff = point_cm - self.centre_cm;

        // Scale factor s.t. centre + diff / sqrt(k) lies on the ellipse
        let k = (diff.x / self.semi_axis_a_cm).powi(2) + (diff.y / self.semi_axis_b_cm).powi(2);

        if k <= 0.0 {
            return -self.semi_axis_b_cm;
        }

        let dist_cm = (1.0 - 1.0 / k.sqrt()).abs() * diff.norm();

        if k < 1.0 {
            -dist_cm
        } else {
            dist_cm
        }
    }
}

impl ThickEllipse {
    pub fn new(centreline: Ellipse, thickness_cm: f64) -> Self {
        Self {
            centreline,
            thickness_cm,
        }
    }

    /// The inner boundary of the annulus.
    pub fn inner(&self) -> Ellipse {
        self.centreline.offset(-self.thickness_cm / 2.0)
    }

    /// The outer boundary of the annulus.
    pub fn outer(&self) -> Ellipse {
        self.centreline.offset(self.thickness_cm / 2.0)
    }

    /// Track-deviation score for the point, see [`where_point_thick`].
    pub fn where_point_thick(&self, point_cm: &Point2<f64>) -> f64 {
        where_point_thick(
            point_cm.x,
            point_cm.y,
            self.centreline.semi_axis_a_cm,
            self.centreline.semi_axis_b_cm,
            self.centreline.centre_cm.x,
            self.centreline.centre_cm.y,
            self.thickness_cm,
        )
    }

    /// True if the point lies on the track surface, boundaries included.
    pub fn contains(&self, point_cm: &Point2<f64>) -> bool {
        self.where_point_thick(point_cm) == 0.0
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
