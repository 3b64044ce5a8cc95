//! Small xxHash-style avalanche hashing
//!
//! `SmallXxHash` turns integer lattice coordinates into pseudorandom bits.
//! Coordinates are folded in one at a time with [`SmallXxHash::eat`], and the
//! accumulator is only avalanched when the bits are read. The same seed and
//! the same coordinate sequence always produce the same bits: everything is
//! wrapping `u32` arithmetic.
//!
//! `SmallXxHash4` runs the identical algorithm on four lanes at once.

use glam::{BVec4, IVec4, UVec4, Vec3, Vec4};
use rayon::prelude::*;
use std::ops::Add;
use tracing::debug;

use crate::domain::SpaceTrs;

const PRIME_A: u32 = 0b1001_1110_0011_0111_0111_1001_1011_0001;
const PRIME_B: u32 = 0b1000_0101_1110_1011_1100_1010_0111_0111;
const PRIME_C: u32 = 0b1100_0010_1011_0010_1010_1110_0011_1101;
const PRIME_D: u32 = 0b0010_0111_1101_0100_1110_1011_0010_1111;
const PRIME_E: u32 = 0b0001_0110_0101_0110_0110_0111_1011_0001;

#[inline]
fn avalanche(mut value: u32) -> u32 {
    value ^= value >> 15;
    value = value.wrapping_mul(PRIME_B);
    value ^= value >> 13;
    value = value.wrapping_mul(PRIME_C);
    value ^= value >> 16;
    value
}

/// Scalar hash accumulator
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SmallXxHash {
    accumulator: u32,
}

impl SmallXxHash {
    /// Wrap a raw accumulator value
    #[inline]
    pub const fn from_accumulator(accumulator: u32) -> Self {
        Self { accumulator }
    }

    /// Start a hash from a seed
    #[inline]
    pub const fn seed(seed: i32) -> Self {
        Self::from_accumulator((seed as u32).wrapping_add(PRIME_E))
    }

    /// Raw accumulator before avalanche
    #[inline]
    pub const fn accumulator(self) -> u32 {
        self.accumulator
    }

    /// Fold an integer into the hash (order dependent)
    #[inline]
    #[must_use]
    pub const fn eat(self, data: i32) -> Self {
        let mixed = self
            .accumulator
            .wrapping_add((data as u32).wrapping_mul(PRIME_C));
        Self::from_accumulator(mixed.rotate_left(17).wrapping_mul(PRIME_D))
    }

    /// Fold a single byte into the hash
    #[inline]
    #[must_use]
    pub const fn eat_byte(self, data: u8) -> Self {
        let mixed = self
            .accumulator
            .wrapping_add((data as u32).wrapping_mul(PRIME_E));
        Self::from_accumulator(mixed.rotate_left(11).wrapping_mul(PRIME_A))
    }

    /// Final avalanched bits
    #[inline]
    pub fn value(self) -> u32 {
        avalanche(self.accumulator)
    }

    #[inline]
    pub fn bytes_a(self) -> u32 {
        self.value() & 255
    }

    #[inline]
    pub fn bytes_b(self) -> u32 {
        (self.value() >> 8) & 255
    }

    #[inline]
    pub fn bytes_c(self) -> u32 {
        (self.value() >> 16) & 255
    }

    #[inline]
    pub fn bytes_d(self) -> u32 {
        self.value() >> 24
    }

    /// Lowest byte mapped to [0, 1]
    #[inline]
    pub fn floats01_a(self) -> f32 {
        self.bytes_a() as f32 * (1.0 / 255.0)
    }

    #[inline]
    pub fn floats01_b(self) -> f32 {
        self.bytes_b() as f32 * (1.0 / 255.0)
    }

    #[inline]
    pub fn floats01_c(self) -> f32 {
        self.bytes_c() as f32 * (1.0 / 255.0)
    }

    #[inline]
    pub fn floats01_d(self) -> f32 {
        self.bytes_d() as f32 * (1.0 / 255.0)
    }

    /// `count` bits starting at `shift`
    #[inline]
    pub fn bits(self, count: u32, shift: u32) -> u32 {
        (self.value() >> shift) & ((1u32 << count) - 1)
    }

    /// `count` bits starting at `shift`, mapped to [0, 1]
    #[inline]
    pub fn bits_as_floats01(self, count: u32, shift: u32) -> f32 {
        self.bits(count, shift) as f32 * (1.0 / ((1u32 << count) - 1) as f32)
    }
}

impl Add<i32> for SmallXxHash {
    type Output = Self;

    #[inline]
    fn add(self, rhs: i32) -> Self {
        Self::from_accumulator(self.accumulator.wrapping_add(rhs as u32))
    }
}

impl From<u32> for SmallXxHash {
    fn from(accumulator: u32) -> Self {
        Self::from_accumulator(accumulator)
    }
}

impl From<SmallXxHash> for u32 {
    fn from(hash: SmallXxHash) -> Self {
        hash.value()
    }
}

/// Four-lane hash accumulator
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SmallXxHash4 {
    accumulator: UVec4,
}

#[inline]
fn rotate_left4(data: UVec4, steps: u32) -> UVec4 {
    (data << steps) | (data >> (32 - steps))
}

impl SmallXxHash4 {
    #[inline]
    pub const fn from_accumulator(accumulator: UVec4) -> Self {
        Self { accumulator }
    }

    #[inline]
    pub fn seed(seed: IVec4) -> Self {
        Self::from_accumulator(seed.as_uvec4().wrapping_add(UVec4::splat(PRIME_E)))
    }

    #[inline]
    #[must_use]
    pub fn eat(self, data: IVec4) -> Self {
        let mixed = self
            .accumulator
            .wrapping_add(data.as_uvec4().wrapping_mul(UVec4::splat(PRIME_C)));
        Self::from_accumulator(rotate_left4(mixed, 17).wrapping_mul(UVec4::splat(PRIME_D)))
    }

    /// Avalanched bits of every lane
    #[inline]
    pub fn to_uvec4(self) -> UVec4 {
        let mut value = self.accumulator;
        value ^= value >> 15;
        value = value.wrapping_mul(UVec4::splat(PRIME_B));
        value ^= value >> 13;
        value = value.wrapping_mul(UVec4::splat(PRIME_C));
        value ^= value >> 16;
        value
    }

    /// Extract one lane as a scalar hash
    #[inline]
    pub fn lane(self, index: usize) -> SmallXxHash {
        SmallXxHash::from_accumulator(self.accumulator[index])
    }

    #[inline]
    pub fn bytes_a(self) -> UVec4 {
        self.to_uvec4() & 255
    }

    #[inline]
    pub fn bytes_b(self) -> UVec4 {
        (self.to_uvec4() >> 8) & 255u32
    }

    #[inline]
    pub fn bytes_c(self) -> UVec4 {
        (self.to_uvec4() >> 16) & 255u32
    }

    #[inline]
    pub fn bytes_d(self) -> UVec4 {
        self.to_uvec4() >> 24
    }

    #[inline]
    pub fn floats01_a(self) -> Vec4 {
        self.bytes_a().as_vec4() * (1.0 / 255.0)
    }

    #[inline]
    pub fn floats01_b(self) -> Vec4 {
        self.bytes_b().as_vec4() * (1.0 / 255.0)
    }

    #[inline]
    pub fn floats01_c(self) -> Vec4 {
        self.bytes_c().as_vec4() * (1.0 / 255.0)
    }

    #[inline]
    pub fn floats01_d(self) -> Vec4 {
        self.bytes_d().as_vec4() * (1.0 / 255.0)
    }

    #[inline]
    pub fn bits(self, count: u32, shift: u32) -> UVec4 {
        (self.to_uvec4() >> shift) & ((1u32 << count) - 1)
    }

    #[inline]
    pub fn bits_as_floats01(self, count: u32, shift: u32) -> Vec4 {
        self.bits(count, shift).as_vec4() * (1.0 / ((1u32 << count) - 1) as f32)
    }

    /// Lane-wise choice: `b` where `mask` is set, `a` elsewhere
    #[inline]
    pub fn select(a: Self, b: Self, mask: BVec4) -> Self {
        Self::from_accumulator(UVec4::select(mask, b.accumulator, a.accumulator))
    }
}

impl Add<i32> for SmallXxHash4 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: i32) -> Self {
        Self::from_accumulator(self.accumulator.wrapping_add(UVec4::splat(rhs as u32)))
    }
}

impl From<SmallXxHash> for SmallXxHash4 {
    fn from(hash: SmallXxHash) -> Self {
        Self::from_accumulator(UVec4::splat(hash.accumulator()))
    }
}

/// Hash the lattice cell containing each position.
///
/// Positions are moved through `domain` first, then floored per axis and fed
/// to the hash as x, y, z. Work is split into chunks of four positions that
/// run through [`SmallXxHash4`] in parallel. A trailing partial chunk is
/// padded by repeating its last position.
pub fn hash_points(positions: &[Vec3], seed: i32, domain: &SpaceTrs) -> Vec<u32> {
    let matrix = domain.matrix();
    let hash = SmallXxHash4::seed(IVec4::splat(seed));

    debug!(count = positions.len(), seed, "hashing points");

    let mut hashes = vec![0u32; positions.len()];
    hashes
        .par_chunks_mut(4)
        .zip(positions.par_chunks(4))
        .for_each(|(out, chunk)| {
            let mut cells = [[0i32; 4]; 3];
            for lane in 0..4 {
                let p = chunk[lane.min(chunk.len() - 1)];
                let p = matrix.transform_point3(p).floor();
                cells[0][lane] = p.x as i32;
                cells[1][lane] = p.y as i32;
                cells[2][lane] = p.z as i32;
            }
            let lanes = hash
                .eat(IVec4::from_array(cells[0]))
                .eat(IVec4::from_array(cells[1]))
                .eat(IVec4::from_array(cells[2]))
                .to_uvec4();
            for (slot, value) in out.iter_mut().zip(lanes.to_array()) {
                *slot = value;
            }
        });
    hashes
}
