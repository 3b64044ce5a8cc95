//! Simplex noise
//!
//! Space is skewed so that the lattice cells split into simplices (segments,
//! triangles, tetrahedra). Every corner of the simplex containing the sample
//! contributes a radially falling kernel `f³` times its gradient, where `f`
//! reaches zero at the kernel radius. Corners outside the radius contribute
//! nothing. The 2D and 3D kernels have radius² 0.5, so they are scaled by 8
//! to peak at 1 like the 1D kernel.

use std::marker::PhantomData;

use glam::Vec3;

use crate::Noise;
use crate::gradient::Gradient;
use crate::hash::SmallXxHash;
use crate::sample::Sample;

/// Combine a falloff `f` with the corner gradient `g`.
///
/// `offset` holds the distance components that `f` depends on, so the kernel
/// derivative is `f³·g' - 6·offset·f²·g`.
#[inline]
fn kernel(f: f32, offset: Vec3, g: Sample) -> Sample {
    if f < 0.0 {
        return Sample::ZERO;
    }
    let f2 = f * f;
    let f3 = f2 * f;
    Sample {
        v: f3 * g.v,
        dx: f3 * g.dx - 6.0 * offset.x * f2 * g.v,
        dy: f3 * g.dy - 6.0 * offset.y * f2 * g.v,
        dz: f3 * g.dz - 6.0 * offset.z * f2 * g.v,
    }
}

/// Simplex noise along x
#[derive(Clone, Copy, Debug, Default)]
pub struct Simplex1D<G>(PhantomData<G>);

impl<G: Gradient> Simplex1D<G> {
    #[inline]
    fn corner(hash: SmallXxHash, lx: i32, x: f32) -> Sample {
        let x = x - lx as f32;
        let f = 1.0 - x * x;
        kernel(f, Vec3::new(x, 0.0, 0.0), G::evaluate_1d(hash.eat(lx), x))
    }
}

impl<G: Gradient> Noise for Simplex1D<G> {
    fn get_noise(position: Vec3, hash: SmallXxHash, frequency: i32) -> Sample {
        let x = position.x * frequency as f32;
        let x0 = x.floor() as i32;
        let s = Self::corner(hash, x0, x) + Self::corner(hash, x0.wrapping_add(1), x);
        G::evaluate_combined(s.scale_derivatives(frequency as f32))
    }
}

/// Simplex noise on the xz plane, over a triangular lattice
#[derive(Clone, Copy, Debug, Default)]
pub struct Simplex2D<G>(PhantomData<G>);

impl<G: Gradient> Simplex2D<G> {
    const SKEW: f32 = 0.366_025_42; // (√3 - 1) / 2
    const UNSKEW: f32 = 0.211_324_87; // (3 - √3) / 6

    #[inline]
    fn corner(hash: SmallXxHash, lx: i32, lz: i32, x: f32, z: f32) -> Sample {
        let unskew = (lx as f32 + lz as f32) * Self::UNSKEW;
        let x = x - lx as f32 + unskew;
        let z = z - lz as f32 + unskew;
        let f = 0.5 - x * x - z * z;
        kernel(f, Vec3::new(x, 0.0, z), G::evaluate_2d(hash, x, z)) * 8.0
    }
}

impl<G: Gradient> Noise for Simplex2D<G> {
    fn get_noise(position: Vec3, hash: SmallXxHash, frequency: i32) -> Sample {
        let scale = frequency as f32 * (1.0 / 3f32.sqrt());
        let x = position.x * scale;
        let z = position.z * scale;
        let skew = (x + z) * Self::SKEW;
        let sx = x + skew;
        let sz = z + skew;

        let x0 = sx.floor() as i32;
        let z0 = sz.floor() as i32;
        let x1 = x0.wrapping_add(1);
        let z1 = z0.wrapping_add(1);

        // Which triangle of the skewed cell contains the sample
        let x_greater = sx - x0 as f32 > sz - z0 as f32;
        let (xc, zc) = if x_greater { (x1, z0) } else { (x0, z1) };

        let h0 = hash.eat(x0);
        let h1 = hash.eat(x1);
        let hc = if x_greater { h1 } else { h0 };

        let s = Self::corner(h0.eat(z0), x0, z0, x, z)
            + Self::corner(h1.eat(z1), x1, z1, x, z)
            + Self::corner(hc.eat(zc), xc, zc, x, z);
        G::evaluate_combined(s.scale_derivatives(scale))
    }
}

/// Simplex noise in 3D, over a tetrahedral lattice
#[derive(Clone, Copy, Debug, Default)]
pub struct Simplex3D<G>(PhantomData<G>);

impl<G: Gradient> Simplex3D<G> {
    #[inline]
    fn corner(hash: SmallXxHash, lattice: [i32; 3], position: Vec3) -> Sample {
        let [lx, ly, lz] = lattice;
        let unskew = (lx as f32 + ly as f32 + lz as f32) * (1.0 / 6.0);
        let offset = position - Vec3::new(lx as f32, ly as f32, lz as f32) + unskew;
        let f = 0.5 - offset.length_squared();
        kernel(
            f,
            offset,
            G::evaluate_3d(hash.eat(lx).eat(ly).eat(lz), offset.x, offset.y, offset.z),
        ) * 8.0
    }
}

impl<G: Gradient> Noise for Simplex3D<G> {
    fn get_noise(position: Vec3, hash: SmallXxHash, frequency: i32) -> Sample {
        let scale = frequency as f32 * 0.6;
        let p = position * scale;
        let skew = (p.x + p.y + p.z) * (1.0 / 3.0);
        let sp = p + skew;
        let base = sp.floor();
        let local = sp - base;
        let [x0, y0, z0] = [base.x as i32, base.y as i32, base.z as i32];
        let [x1, y1, z1] = [x0.wrapping_add(1), y0.wrapping_add(1), z0.wrapping_add(1)];

        let x_gt_y = local.x > local.y;
        let x_gt_z = local.x > local.z;
        let y_gt_z = local.y > local.z;

        // First intermediate corner steps along the largest axis, the second
        // along the two largest.
        let xa = x_gt_y && x_gt_z;
        let xb = x_gt_y || (x_gt_z && y_gt_z);
        let ya = !x_gt_y && y_gt_z;
        let yb = !x_gt_y || (x_gt_z && y_gt_z);
        let za = (x_gt_y && !x_gt_z) || (!x_gt_y && !y_gt_z);
        let zb = !(x_gt_z && y_gt_z);

        let pick = |a: i32, b: i32, step: bool| if step { b } else { a };
        let ca = [pick(x0, x1, xa), pick(y0, y1, ya), pick(z0, z1, za)];
        let cb = [pick(x0, x1, xb), pick(y0, y1, yb), pick(z0, z1, zb)];

        let s = Self::corner(hash, [x0, y0, z0], p)
            + Self::corner(hash, [x1, y1, z1], p)
            + Self::corner(hash, ca, p)
            + Self::corner(hash, cb, p);
        G::evaluate_combined(s.scale_derivatives(scale))
    }
}
