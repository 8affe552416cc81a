// src/utils/linalg.rs

use nalgebra::Matrix3;

/// Build lattice vectors from cell parameters
///
/// # Arguments
/// * `lengths` - a, b, c in Angstroms
/// * `angles` - alpha, beta, gamma in degrees
///
/// # Returns
/// Lattice vectors as row matrix [[ax, ay, az], [bx, by, bz], [cx, cy, cz]],
/// with `a` along x and `b` in the xy plane
pub fn lattice_from_parameters(lengths: [f64; 3], angles: [f64; 3]) -> [[f64; 3]; 3] {
  let [a, b, c] = lengths;
  let (alpha, beta, gamma) = (
    angles[0].to_radians(),
    angles[1].to_radians(),
    angles[2].to_radians(),
  );

  let cx = c * beta.cos();
  let cy = c * (alpha.cos() - beta.cos() * gamma.cos()) / gamma.sin();
  let cz = (c * c - cx * cx - cy * cy).max(0.0).sqrt();

  [
    [a, 0.0, 0.0],
    [b * gamma.cos(), b * gamma.sin(), 0.0],
    [cx, cy, cz],
  ]
}

/// Cell volume in cubic Angstroms
///
/// # Formula
/// ```text
/// V = |det(Lattice)|
/// ```
pub fn cell_volume(lengths: [f64; 3], angles: [f64; 3]) -> f64 {
  let l = lattice_from_parameters(lengths, angles);
  let lat_mat = Matrix3::new(
    l[0][0], l[0][1], l[0][2],
    l[1][0], l[1][1], l[1][2],
    l[2][0], l[2][1], l[2][2],
  );
  lat_mat.determinant().abs()
}
