// src/utils/geometry.rs

type Point3 = [f64; 3];

/// Calculates distance between two Cartesian points (Angstroms)
pub fn calculate_distance(p1: Point3, p2: Point3) -> f64 {
    let diff = sub(p1, p2);
    len(diff)
}

/// Minimum-image displacement along one fractional axis.
///
/// Compares the direct separation with the one wrapped through the cell
/// boundary (`|lo + 1 - hi|`, taken from the atom with the smaller coordinate)
/// and keeps the shorter.
pub fn wrapped_separation(u: f64, v: f64) -> f64 {
    let direct = (u - v).abs();
    let wrapped = if u <= v {
        (u + 1.0 - v).abs()
    } else {
        (v + 1.0 - u).abs()
    };
    if wrapped < direct {
        wrapped
    } else {
        direct
    }
}

/// Periodic distance between two fractional positions (Angstroms).
///
/// Each axis is wrapped independently and scaled by its lattice length, so
/// the result is exact for orthogonal cells only. Cell angles are ignored.
pub fn periodic_distance(f1: Point3, f2: Point3, lengths: Point3) -> f64 {
    let d = [
        wrapped_separation(f1[0], f2[0]) * lengths[0],
        wrapped_separation(f1[1], f2[1]) * lengths[1],
        wrapped_separation(f1[2], f2[2]) * lengths[2],
    ];
    calculate_distance(d, [0.0, 0.0, 0.0])
}

// --- Internal Math Helpers for [f64; 3] ---

fn sub(a: Point3, b: Point3) -> Point3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn dot(a: Point3, b: Point3) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn len(a: Point3) -> f64 {
    dot(a, a).sqrt()
}
