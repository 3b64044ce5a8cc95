//! Ways to turn the two nearest distances into a noise value

use crate::sample::Sample;

use super::VoronoiData;

pub trait VoronoiFunction: Default + Copy + Send + Sync + 'static {
    fn evaluate(data: VoronoiData) -> Sample;
}

/// Distance to the nearest feature point
#[derive(Clone, Copy, Debug, Default)]
pub struct F1;

impl VoronoiFunction for F1 {
    #[inline]
    fn evaluate(data: VoronoiData) -> Sample {
        data.a
    }
}

/// Distance to the second nearest feature point
#[derive(Clone, Copy, Debug, Default)]
pub struct F2;

impl VoronoiFunction for F2 {
    #[inline]
    fn evaluate(data: VoronoiData) -> Sample {
        data.b
    }
}

/// Cell edges: zero where two cells meet
#[derive(Clone, Copy, Debug, Default)]
pub struct F2MinusF1;

impl VoronoiFunction for F2MinusF1 {
    #[inline]
    fn evaluate(data: VoronoiData) -> Sample {
        data.b - data.a
    }
}
