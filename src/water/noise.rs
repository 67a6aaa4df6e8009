//! Classic 3D gradient noise for the small wave layer.
//!
//! Lattice hashing uses the `(34x² + x) mod 289` permutation polynomial, so
//! the function needs no lookup table and runs identically on the CPU and in
//! `water.wgsl`. Keep the two in sync: the arithmetic here is mirrored
//! line for line by `classic_noise` in the shader.

use glam::{Vec2, Vec3, Vec4};

/// Final scale bringing the output to roughly [-1, 1]
const OUTPUT_SCALE: f32 = 2.2;

/// Sample classic 3D noise at `p`.
///
/// Returns 0 at every integer lattice point and stays within about [-1, 1].
pub fn classic_noise(p: Vec3) -> f32 {
    let pi0 = mod289_3(p.floor());
    let pi1 = mod289_3(p.floor() + Vec3::ONE);
    let pf0 = p - p.floor();
    let pf1 = pf0 - Vec3::ONE;

    let ix = Vec4::new(pi0.x, pi1.x, pi0.x, pi1.x);
    let iy = Vec4::new(pi0.y, pi0.y, pi1.y, pi1.y);
    let iz0 = Vec4::splat(pi0.z);
    let iz1 = Vec4::splat(pi1.z);

    let ixy = permute(permute(ix) + iy);
    let ixy0 = permute(ixy + iz0);
    let ixy1 = permute(ixy + iz1);

    let (gx0, gy0, gz0) = gradients(ixy0);
    let (gx1, gy1, gz1) = gradients(ixy1);

    let mut g000 = Vec3::new(gx0.x, gy0.x, gz0.x);
    let mut g100 = Vec3::new(gx0.y, gy0.y, gz0.y);
    let mut g010 = Vec3::new(gx0.z, gy0.z, gz0.z);
    let mut g110 = Vec3::new(gx0.w, gy0.w, gz0.w);
    let mut g001 = Vec3::new(gx1.x, gy1.x, gz1.x);
    let mut g101 = Vec3::new(gx1.y, gy1.y, gz1.y);
    let mut g011 = Vec3::new(gx1.z, gy1.z, gz1.z);
    let mut g111 = Vec3::new(gx1.w, gy1.w, gz1.w);

    let norm0 = taylor_inv_sqrt(Vec4::new(
        g000.dot(g000),
        g010.dot(g010),
        g100.dot(g100),
        g110.dot(g110),
    ));
    g000 *= norm0.x;
    g010 *= norm0.y;
    g100 *= norm0.z;
    g110 *= norm0.w;

    let norm1 = taylor_inv_sqrt(Vec4::new(
        g001.dot(g001),
        g011.dot(g011),
        g101.dot(g101),
        g111.dot(g111),
    ));
    g001 *= norm1.x;
    g011 *= norm1.y;
    g101 *= norm1.z;
    g111 *= norm1.w;

    let n000 = g000.dot(pf0);
    let n100 = g100.dot(Vec3::new(pf1.x, pf0.y, pf0.z));
    let n010 = g010.dot(Vec3::new(pf0.x, pf1.y, pf0.z));
    let n110 = g110.dot(Vec3::new(pf1.x, pf1.y, pf0.z));
    let n001 = g001.dot(Vec3::new(pf0.x, pf0.y, pf1.z));
    let n101 = g101.dot(Vec3::new(pf1.x, pf0.y, pf1.z));
    let n011 = g011.dot(Vec3::new(pf0.x, pf1.y, pf1.z));
    let n111 = g111.dot(pf1);

    let fade_xyz = fade(pf0);
    let n_z = Vec4::new(n000, n100, n010, n110).lerp(Vec4::new(n001, n101, n011, n111), fade_xyz.z);
    let n_yz = Vec2::new(n_z.x, n_z.y).lerp(Vec2::new(n_z.z, n_z.w), fade_xyz.y);
    let n_xyz = n_yz.x * (1.0 - fade_xyz.x) + n_yz.y * fade_xyz.x;

    OUTPUT_SCALE * n_xyz
}

/// Pseudo-random gradient directions for four lattice corners
fn gradients(ixy: Vec4) -> (Vec4, Vec4, Vec4) {
    let gx = ixy / 7.0;
    let gy = fract(gx.floor() / 7.0) - 0.5;
    let gx = fract(gx);
    let gz = Vec4::splat(0.5) - gx.abs() - gy.abs();
    let sz = step(gz, Vec4::ZERO);
    let gx = gx - sz * (step(Vec4::ZERO, gx) - 0.5);
    let gy = gy - sz * (step(Vec4::ZERO, gy) - 0.5);
    (gx, gy, gz)
}

fn mod289(x: Vec4) -> Vec4 {
    x - (x / 289.0).floor() * 289.0
}

fn mod289_3(x: Vec3) -> Vec3 {
    x - (x / 289.0).floor() * 289.0
}

fn permute(x: Vec4) -> Vec4 {
    mod289((x * 34.0 + 1.0) * x)
}

fn taylor_inv_sqrt(r: Vec4) -> Vec4 {
    1.792_842_9 - 0.853_734_7 * r
}

fn fade(t: Vec3) -> Vec3 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

/// `x - floor(x)`, always in [0, 1) unlike `f32::fract` for negatives
fn fract(x: Vec4) -> Vec4 {
    x - x.floor()
}

/// Component-wise `x < edge ? 0 : 1`
fn step(edge: Vec4, x: Vec4) -> Vec4 {
    Vec4::select(x.cmplt(edge), Vec4::ZERO, Vec4::ONE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_on_lattice_points() {
        for &(x, y, z) in &[(0.0, 0.0, 0.0), (3.0, -2.0, 7.0), (-15.0, 4.0, 1.0), (288.0, 1.0, 290.0)] {
            assert_eq!(classic_noise(Vec3::new(x, y, z)), 0.0, "at ({x}, {y}, {z})");
        }
    }

    #[test]
    fn test_deterministic() {
        let p = Vec3::new(0.37, -1.91, 4.2);
        assert_eq!(classic_noise(p).to_bits(), classic_noise(p).to_bits());
    }

    #[test]
    fn test_bounded_and_not_flat() {
        let mut min = f32::MAX;
        let mut max = f32::MIN;

        for i in 0..40 {
            for j in 0..40 {
                let p = Vec3::new(i as f32 * 0.173 - 3.0, j as f32 * 0.219 - 4.0, 0.61);
                let n = classic_noise(p);
                assert!(n.is_finite());
                min = min.min(n);
                max = max.max(n);
            }
        }

        assert!(min > -1.5 && max < 1.5, "range [{min}, {max}]");
        assert!(max - min > 0.5, "noise looks flat: [{min}, {max}]");
    }

    #[test]
    fn test_continuous() {
        let p = Vec3::new(1.234, 5.678, 0.9);
        let d = Vec3::splat(1e-3);
        assert!((classic_noise(p) - classic_noise(p + d)).abs() < 0.02);
    }

    #[test]
    fn test_periodic_lattice() {
        // Hashing wraps every 289 cells
        let p = Vec3::new(0.3, 0.7, 0.2);
        let shifted = p + Vec3::new(289.0, 0.0, 0.0);
        assert!((classic_noise(p) - classic_noise(shifted)).abs() < 1e-3);
    }

    #[test]
    fn test_step_and_fract() {
        let x = Vec4::new(-1.25, 0.0, 0.5, 2.75);
        assert_eq!(fract(x), Vec4::new(0.75, 0.0, 0.5, 0.75));
        assert_eq!(step(Vec4::ZERO, x), Vec4::new(0.0, 1.0, 1.0, 1.0));
    }
}
