//! Distance metrics for cellular noise
//!
//! Distances are sampled against the offset from the sample position to a
//! feature point, so a derivative with respect to the sample position is the
//! negated derivative with respect to the offset.

use crate::sample::Sample;

use super::VoronoiData;

pub trait VoronoiDistance: Default + Copy + Send + Sync + 'static {
    fn distance_1d(x: f32) -> Sample;

    /// Distance on the xz plane
    fn distance_2d(x: f32, z: f32) -> Sample;

    fn distance_3d(x: f32, y: f32, z: f32) -> Sample;

    fn finalize_1d(data: VoronoiData) -> VoronoiData;

    fn finalize_2d(data: VoronoiData) -> VoronoiData;

    fn finalize_3d(data: VoronoiData) -> VoronoiData;

    /// Fold one candidate distance into the running minima
    fn update(data: VoronoiData, sample: Sample) -> VoronoiData;

    fn initial_data() -> VoronoiData;
}

#[inline]
fn sign_toward(x: f32) -> f32 {
    if x < 0.0 { 1.0 } else { -1.0 }
}

/// Euclidean distance.
///
/// The search compares squared distances; the square root is taken once in
/// the finalize step, where distances of 1 and above are clamped to 1.
#[derive(Clone, Copy, Debug, Default)]
pub struct Worley;

impl Worley {
    #[inline]
    fn finalize_distance(s: Sample) -> Sample {
        if s.v >= 1.0 {
            return Sample::from_value(1.0);
        }
        let v = s.v.sqrt();
        if v > 0.0 {
            Sample {
                v,
                dx: -s.dx / v,
                dy: -s.dy / v,
                dz: -s.dz / v,
            }
        } else {
            Sample::ZERO
        }
    }
}

impl VoronoiDistance for Worley {
    #[inline]
    fn distance_1d(x: f32) -> Sample {
        Sample {
            v: x.abs(),
            dx: sign_toward(x),
            ..Sample::ZERO
        }
    }

    #[inline]
    fn distance_2d(x: f32, z: f32) -> Sample {
        Self::distance_3d(x, 0.0, z)
    }

    #[inline]
    fn distance_3d(x: f32, y: f32, z: f32) -> Sample {
        Sample {
            v: x * x + y * y + z * z,
            dx: x,
            dy: y,
            dz: z,
        }
    }

    #[inline]
    fn finalize_1d(data: VoronoiData) -> VoronoiData {
        data
    }

    #[inline]
    fn finalize_2d(data: VoronoiData) -> VoronoiData {
        Self::finalize_3d(data)
    }

    #[inline]
    fn finalize_3d(data: VoronoiData) -> VoronoiData {
        VoronoiData {
            a: Self::finalize_distance(data.a),
            b: Self::finalize_distance(data.b),
        }
    }

    #[inline]
    fn update(data: VoronoiData, sample: Sample) -> VoronoiData {
        if sample.v < data.a.v {
            VoronoiData {
                a: sample,
                b: data.a,
            }
        } else if sample.v < data.b.v {
            VoronoiData { a: data.a, b: sample }
        } else {
            data
        }
    }

    #[inline]
    fn initial_data() -> VoronoiData {
        VoronoiData {
            a: Sample::from_value(2.0),
            b: Sample::from_value(2.0),
        }
    }
}

/// Euclidean distance with smoothed minima.
///
/// F1 is a log-sum-exp blend over every candidate, F2 a polynomial smooth
/// minimum. Both are smoothstepped in the finalize step.
#[derive(Clone, Copy, Debug, Default)]
pub struct SmoothWorley;

impl SmoothWorley {
    const SMOOTH_LSE: f32 = 10.0;
    const SMOOTH_POLY: f32 = 0.25;

    #[inline]
    fn resolve_exponential_sum(a: Sample) -> Sample {
        let mut a = a.scale_derivatives(a.v.recip());
        a.v = a.v.ln() / -Self::SMOOTH_LSE;
        a
    }
}

impl VoronoiDistance for SmoothWorley {
    #[inline]
    fn distance_1d(x: f32) -> Sample {
        Worley::distance_1d(x)
    }

    #[inline]
    fn distance_2d(x: f32, z: f32) -> Sample {
        Self::distance_3d(x, 0.0, z)
    }

    #[inline]
    fn distance_3d(x: f32, y: f32, z: f32) -> Sample {
        let v = (x * x + y * y + z * z).sqrt();
        if v > 0.0 {
            Sample {
                v,
                dx: x / -v,
                dy: y / -v,
                dz: z / -v,
            }
        } else {
            Sample::ZERO
        }
    }

    #[inline]
    fn finalize_1d(data: VoronoiData) -> VoronoiData {
        let a = Self::resolve_exponential_sum(data.a);
        VoronoiData {
            a: Sample::select(Sample::ZERO, a.smoothstep(), a.v > 0.0),
            b: Sample::select(Sample::ZERO, data.b.smoothstep(), data.b.v > 0.0),
        }
    }

    #[inline]
    fn finalize_2d(data: VoronoiData) -> VoronoiData {
        Self::finalize_3d(data)
    }

    #[inline]
    fn finalize_3d(data: VoronoiData) -> VoronoiData {
        let a = Self::resolve_exponential_sum(data.a);
        let b = data.b;
        VoronoiData {
            a: Sample::select(Sample::ZERO, a.smoothstep(), a.v > 0.0 && a.v < 1.0),
            b: Sample::select(Sample::ZERO, b.smoothstep(), b.v > 0.0 && b.v < 1.0),
        }
    }

    #[inline]
    fn update(data: VoronoiData, sample: Sample) -> VoronoiData {
        let e = (-Self::SMOOTH_LSE * sample.v).exp();
        let a = data.a + Sample { v: 1.0, ..sample } * e;

        let h = 1.0 - (data.b.v - sample.v).abs() / Self::SMOOTH_POLY;
        let sample_is_nearer = sample.v < data.b.v;
        let mut b = if sample_is_nearer { sample } else { data.b };
        if h > 0.0 {
            // smin = min - k/4·h², with ∂h = -sign(b - s)·(∂b - ∂s)/k
            let sign = if sample_is_nearer { 1.0 } else { -1.0 };
            let slope = 0.5 * h * sign;
            b.v -= 0.25 * Self::SMOOTH_POLY * h * h;
            b.dx += slope * (data.b.dx - sample.dx);
            b.dy += slope * (data.b.dy - sample.dy);
            b.dz += slope * (data.b.dz - sample.dz);
        }
        VoronoiData { a, b }
    }

    #[inline]
    fn initial_data() -> VoronoiData {
        VoronoiData {
            a: Sample::ZERO,
            b: Sample::from_value(2.0),
        }
    }
}

/// Chebyshev distance: the largest absolute offset component
#[derive(Clone, Copy, Debug, Default)]
pub struct Chebyshev;

impl VoronoiDistance for Chebyshev {
    #[inline]
    fn distance_1d(x: f32) -> Sample {
        Worley::distance_1d(x)
    }

    #[inline]
    fn distance_2d(x: f32, z: f32) -> Sample {
        if x.abs() > z.abs() {
            Sample {
                v: x.abs(),
                dx: sign_toward(x),
                ..Sample::ZERO
            }
        } else {
            Sample {
                v: z.abs(),
                dz: sign_toward(z),
                ..Sample::ZERO
            }
        }
    }

    #[inline]
    fn distance_3d(x: f32, y: f32, z: f32) -> Sample {
        if x.abs() > y.abs() && x.abs() > z.abs() {
            Sample {
                v: x.abs(),
                dx: sign_toward(x),
                ..Sample::ZERO
            }
        } else if y.abs() > z.abs() {
            Sample {
                v: y.abs(),
                dy: sign_toward(y),
                ..Sample::ZERO
            }
        } else {
            Sample {
                v: z.abs(),
                dz: sign_toward(z),
                ..Sample::ZERO
            }
        }
    }

    #[inline]
    fn finalize_1d(data: VoronoiData) -> VoronoiData {
        data
    }

    #[inline]
    fn finalize_2d(data: VoronoiData) -> VoronoiData {
        data
    }

    #[inline]
    fn finalize_3d(data: VoronoiData) -> VoronoiData {
        data
    }

    #[inline]
    fn update(data: VoronoiData, sample: Sample) -> VoronoiData {
        Worley::update(data, sample)
    }

    #[inline]
    fn initial_data() -> VoronoiData {
        Worley::initial_data()
    }
}
