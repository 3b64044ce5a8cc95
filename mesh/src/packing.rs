//! Vertex attribute packing for compact GPU layouts
//!
//! - position f32x3 → f16x4 (w = 1)
//! - uv f32x2 → unorm16x2
//! - normal f32x3 → octahedral snorm16x2 in a u32
//! - tangent f32x4 → octahedral u32 with the handedness in the top bit
//!
//! Used by [`PackedStream`](crate::streams::PackedStream).

use glam::{Vec2, Vec3, Vec4};
use half::f16;

/// Convert f32 to signed normalized 16-bit integer
///
/// Maps [-1.0, 1.0] to [-32767, 32767].
#[inline]
pub fn f32_to_snorm16(value: f32) -> i16 {
    (value.clamp(-1.0, 1.0) * 32767.0).round() as i16
}

#[inline]
pub fn snorm16_to_f32(value: i16) -> f32 {
    (value as f32 / 32767.0).max(-1.0)
}

/// Pack a position to f16x4 with w = 1
#[inline]
pub fn pack_position_f16(position: Vec3) -> [f16; 4] {
    [
        f16::from_f32(position.x),
        f16::from_f32(position.y),
        f16::from_f32(position.z),
        f16::ONE,
    ]
}

#[inline]
pub fn unpack_position_f16(packed: [f16; 4]) -> Vec3 {
    Vec3::new(packed[0].to_f32(), packed[1].to_f32(), packed[2].to_f32())
}

/// Pack a texture coordinate to unorm16x2
///
/// Coordinates outside [0, 1] are clamped.
#[inline]
pub fn pack_uv_unorm16(uv: Vec2) -> [u16; 2] {
    [
        (uv.x.clamp(0.0, 1.0) * 65535.0).round() as u16,
        (uv.y.clamp(0.0, 1.0) * 65535.0).round() as u16,
    ]
}

#[inline]
pub fn unpack_uv_unorm16(packed: [u16; 2]) -> Vec2 {
    Vec2::new(packed[0] as f32, packed[1] as f32) / 65535.0
}

/// Encode a direction to octahedral coordinates in [-1, 1]²
#[inline]
pub fn encode_octahedral(dir: Vec3) -> Vec2 {
    let l1_norm = dir.x.abs() + dir.y.abs() + dir.z.abs();
    if l1_norm == 0.0 {
        return Vec2::ZERO;
    }

    let mut u = dir.x / l1_norm;
    let mut v = dir.y / l1_norm;

    // Fold the lower hemisphere over the diagonals
    if dir.z < 0.0 {
        let u_abs = u.abs();
        let v_abs = v.abs();
        u = (1.0 - v_abs) * if u >= 0.0 { 1.0 } else { -1.0 };
        v = (1.0 - u_abs) * if v >= 0.0 { 1.0 } else { -1.0 };
    }

    Vec2::new(u, v)
}

/// Decode octahedral coordinates back to a unit direction
#[inline]
pub fn decode_octahedral(encoded: Vec2) -> Vec3 {
    let mut dir = Vec3::new(encoded.x, encoded.y, 1.0 - encoded.x.abs() - encoded.y.abs());

    if dir.z < 0.0 {
        let old_x = dir.x;
        dir.x = (1.0 - dir.y.abs()) * if old_x >= 0.0 { 1.0 } else { -1.0 };
        dir.y = (1.0 - old_x.abs()) * if dir.y >= 0.0 { 1.0 } else { -1.0 };
    }

    dir.normalize_or_zero()
}

/// Pack a direction as two snorm16 octahedral coordinates
#[inline]
pub fn pack_octahedral_u32(dir: Vec3) -> u32 {
    let encoded = encode_octahedral(dir);
    let u = f32_to_snorm16(encoded.x) as u16 as u32;
    let v = f32_to_snorm16(encoded.y) as u16 as u32;
    u | (v << 16)
}

#[inline]
pub fn unpack_octahedral_u32(packed: u32) -> Vec3 {
    let u = snorm16_to_f32((packed & 0xFFFF) as u16 as i16);
    let v = snorm16_to_f32((packed >> 16) as u16 as i16);
    decode_octahedral(Vec2::new(u, v))
}

/// Pack a tangent with handedness in `w`.
///
/// Bits 0-15 hold the snorm16 octahedral u. Bits 16-30 hold v as a 15-bit
/// signed value. Bit 31 is set for negative handedness.
#[inline]
pub fn pack_tangent(tangent: Vec4) -> u32 {
    let encoded = encode_octahedral(tangent.truncate());
    let u = f32_to_snorm16(encoded.x) as u16 as u32;
    let v = ((encoded.y.clamp(-1.0, 1.0) * 16383.0).round() as i32 as u32) & 0x7FFF;
    let sign = if tangent.w < 0.0 { 1u32 << 31 } else { 0 };
    u | (v << 16) | sign
}

#[inline]
pub fn unpack_tangent(packed: u32) -> Vec4 {
    let u = snorm16_to_f32((packed & 0xFFFF) as u16 as i16);
    // Sign-extend the 15-bit v
    let v_bits = ((packed >> 16) & 0x7FFF) as i32;
    let v_signed = (v_bits << 17) >> 17;
    let v = (v_signed as f32 / 16383.0).max(-1.0);
    let w = if packed & (1 << 31) != 0 { -1.0 } else { 1.0 };
    decode_octahedral(Vec2::new(u, v)).extend(w)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_position_f16() {
        let packed = pack_position_f16(Vec3::new(1.0, -2.0, 0.5));
        assert_eq!(packed[0], f16::from_f32(1.0));
        assert_eq!(packed[3], f16::ONE);
        assert_eq!(unpack_position_f16(packed), Vec3::new(1.0, -2.0, 0.5));
    }

    #[test]
    fn test_snorm16_range() {
        assert_eq!(f32_to_snorm16(1.0), 32767);
        assert_eq!(f32_to_snorm16(-1.0), -32767);
        assert_eq!(f32_to_snorm16(2.0), 32767);
        assert_eq!(f32_to_snorm16(0.0), 0);
    }

    #[test]
    fn test_uv_unorm16() {
        assert_eq!(pack_uv_unorm16(Vec2::new(0.0, 1.0)), [0, 65535]);
        assert_eq!(pack_uv_unorm16(Vec2::new(-1.0, 2.0)), [0, 65535]);
        let uv = unpack_uv_unorm16(pack_uv_unorm16(Vec2::new(0.25, 0.75)));
        assert!(uv.abs_diff_eq(Vec2::new(0.25, 0.75), 1e-4));
    }

    #[test]
    fn test_octahedral_roundtrip() {
        let directions = [
            Vec3::X,
            Vec3::NEG_Y,
            Vec3::Z,
            Vec3::NEG_Z,
            Vec3::new(1.0, 1.0, 1.0).normalize(),
            Vec3::new(-0.3, 0.5, -0.8).normalize(),
        ];
        for dir in directions {
            let decoded = unpack_octahedral_u32(pack_octahedral_u32(dir));
            assert!(dir.dot(decoded) > 0.9999, "{:?} -> {:?}", dir, decoded);
        }
    }

    #[test]
    fn test_tangent_roundtrip_keeps_handedness() {
        for tangent in [
            Vec4::new(1.0, 0.0, 0.0, -1.0),
            Vec4::new(0.0, 0.6, -0.8, 1.0),
            Vec4::new(-0.48, -0.6, -0.64, -1.0),
        ] {
            let decoded = unpack_tangent(pack_tangent(tangent));
            assert_eq!(decoded.w, tangent.w);
            assert!(tangent.truncate().dot(decoded.truncate()) > 0.999);
        }
    }

    #[test]
    fn test_zero_direction() {
        assert_eq!(encode_octahedral(Vec3::ZERO), Vec2::ZERO);
    }
}
