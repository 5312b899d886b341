use crate::Pt3D;

/// How many samples approximate the curve's arc length.
const ARC_LENGTH_DIVISIONS: usize = 200;
/// Step used for the finite-difference tangent, in curve parameter space.
const TANGENT_DELTA: f64 = 0.0001;

/// A smooth open curve passing through every control point, using centripetal Catmull-Rom
/// interpolation (knot spacing by the square root of chord length), so there are no cusps or
/// self-intersections within a segment.
///
/// The curve is queried either by raw parameter (`point`) or by fraction of arc length
/// (`point_at`, `tangent_at`). The arc length is approximated once, on construction.
#[derive(Clone, Debug)]
pub struct CatmullRomCurve {
    pts: Vec<Pt3D>,
    /// Cumulative length at each of the evenly spaced raw parameter samples
    arc_lengths: Vec<f64>,
}

impl CatmullRomCurve {
    /// Returns None for fewer than 2 points.
    pub fn new(pts: Vec<Pt3D>) -> Option<CatmullRomCurve> {
        if pts.len() < 2 {
            return None;
        }
        let mut curve = CatmullRomCurve {
            pts,
            arc_lengths: Vec::new(),
        };
        curve.arc_lengths = curve.compute_arc_lengths();
        Some(curve)
    }

    pub fn points(&self) -> &Vec<Pt3D> {
        &self.pts
    }

    pub fn length(&self) -> f64 {
        *self.arc_lengths.last().unwrap_or(&0.0)
    }

    /// Evaluates the curve at raw parameter t in [0, 1]. The parameter is spread evenly over the
    /// segments, not by distance.
    pub fn point(&self, t: f64) -> Pt3D {
        let t = t.clamp(0.0, 1.0);
        let l = self.pts.len();
        let p = (l - 1) as f64 * t;
        let mut int_point = p.floor() as usize;
        let mut weight = p - int_point as f64;
        if int_point >= l - 1 {
            int_point = l - 2;
            weight = 1.0;
        }

        let p1 = self.pts[int_point];
        let p2 = self.pts[int_point + 1];
        // Past the ends, extrapolate a phantom control point
        let p0 = if int_point > 0 {
            self.pts[int_point - 1]
        } else {
            p1 * 2.0 - p2
        };
        let p3 = if int_point + 2 < l {
            self.pts[int_point + 2]
        } else {
            p2 * 2.0 - p1
        };

        let mut dt0 = p0.dist_to(p1).sqrt();
        let mut dt1 = p1.dist_to(p2).sqrt();
        let mut dt2 = p2.dist_to(p3).sqrt();
        // Safety check for repeated points
        if dt1 < 1e-4 {
            dt1 = 1.0;
        }
        if dt0 < 1e-4 {
            dt0 = dt1;
        }
        if dt2 < 1e-4 {
            dt2 = dt1;
        }

        Pt3D::new(
            CubicPoly::nonuniform(p0.x, p1.x, p2.x, p3.x, dt0, dt1, dt2).calc(weight),
            CubicPoly::nonuniform(p0.y, p1.y, p2.y, p3.y, dt0, dt1, dt2).calc(weight),
            CubicPoly::nonuniform(p0.z, p1.z, p2.z, p3.z, dt0, dt1, dt2).calc(weight),
        )
    }

    /// Evaluates the curve at fraction `u` of its arc length, so that advancing u at a constant
    /// rate moves at a constant speed.
    pub fn point_at(&self, u: f64) -> Pt3D {
        self.point(self.u_to_t(u))
    }

    /// The unit tangent at fraction `u` of the arc length, pointing toward the end of the curve.
    pub fn tangent_at(&self, u: f64) -> Pt3D {
        self.tangent(self.u_to_t(u))
    }

    fn tangent(&self, t: f64) -> Pt3D {
        let t1 = (t - TANGENT_DELTA).max(0.0);
        let t2 = (t + TANGENT_DELTA).min(1.0);
        (self.point(t2) - self.point(t1)).normalized()
    }

    fn compute_arc_lengths(&self) -> Vec<f64> {
        let mut lengths = Vec::with_capacity(ARC_LENGTH_DIVISIONS + 1);
        let mut sum = 0.0;
        let mut last = self.point(0.0);
        lengths.push(0.0);
        for i in 1..=ARC_LENGTH_DIVISIONS {
            let current = self.point(i as f64 / ARC_LENGTH_DIVISIONS as f64);
            sum += current.dist_to(last);
            lengths.push(sum);
            last = current;
        }
        lengths
    }

    /// Maps an arc-length fraction to the raw curve parameter.
    fn u_to_t(&self, u: f64) -> f64 {
        let arc_lengths = &self.arc_lengths;
        let il = arc_lengths.len();
        let target = u.clamp(0.0, 1.0) * self.length();

        // Find the last sample not past the target
        let mut low = 0;
        let mut high = il - 1;
        while low <= high {
            let i = low + (high - low) / 2;
            let comparison = arc_lengths[i] - target;
            if comparison < 0.0 {
                low = i + 1;
            } else if comparison > 0.0 {
                if i == 0 {
                    break;
                }
                high = i - 1;
            } else {
                high = i;
                break;
            }
        }
        let i = high;

        if arc_lengths[i] == target || i + 1 >= il {
            return i as f64 / (il - 1) as f64;
        }

        let length_before = arc_lengths[i];
        let length_after = arc_lengths[i + 1];
        let segment_length = length_after - length_before;
        let segment_fraction = if segment_length > 0.0 {
            (target - length_before) / segment_length
        } else {
            0.0
        };
        (i as f64 + segment_fraction) / (il - 1) as f64
    }
}

/// A cubic polynomial segment of one coordinate: c0 + c1*t + c2*t^2 + c3*t^3.
struct CubicPoly {
    c0: f64,
    c1: f64,
    c2: f64,
    c3: f64,
}

impl CubicPoly {
    /// Hermite form through x0 and x1 with tangents t0 and t1.
    fn hermite(x0: f64, x1: f64, t0: f64, t1: f64) -> CubicPoly {
        CubicPoly {
            c0: x0,
            c1: t0,
            c2: -3.0 * x0 + 3.0 * x1 - 2.0 * t0 - t1,
            c3: 2.0 * x0 - 2.0 * x1 + t0 + t1,
        }
    }

    /// Catmull-Rom between x1 and x2 with non-uniform knot spacing.
    fn nonuniform(
        x0: f64,
        x1: f64,
        x2: f64,
        x3: f64,
        dt0: f64,
        dt1: f64,
        dt2: f64,
    ) -> CubicPoly {
        let t1 = ((x1 - x0) / dt0 - (x2 - x0) / (dt0 + dt1) + (x2 - x1) / dt1) * dt1;
        let t2 = ((x2 - x1) / dt1 - (x3 - x1) / (dt1 + dt2) + (x3 - x2) / dt2) * dt1;
        CubicPoly::hermite(x1, x2, t1, t2)
    }

    fn calc(&self, t: f64) -> f64 {
        let t2 = t * t;
        let t3 = t2 * t;
        self.c0 + self.c1 * t + self.c2 * t2 + self.c3 * t3
    }
}
