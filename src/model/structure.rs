// src/model/structure.rs

use crate::error::{Result, ZeoranError};
use crate::model::elements::is_t_site;
use serde::{Deserialize, Serialize};

/// Tolerance (degrees) under which a cell angle counts as right
const RIGHT_ANGLE_TOLERANCE: f64 = 1e-6;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Atom {
    // Site label as written in the source file (e.g. "O1", "Si3")
    pub label: String,
    // Element symbol ("Si", "O", ...)
    pub element: String,
    // Fractional coordinates, nominally in [0, 1)
    pub position: [f64; 3],
    pub charge: f64,
}

impl Atom {
    pub fn new(label: impl Into<String>, element: impl Into<String>, position: [f64; 3], charge: f64) -> Self {
        Self {
            label: label.into(),
            element: element.into(),
            position,
            charge,
        }
    }
}

/// Unit cell parameters as read from the framework description.
///
/// `atoms` and `t_atoms` are the declared counts; they are checked against
/// the atom list when a [`Framework`] is assembled.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UnitCell {
    pub atoms: usize,
    pub t_atoms: usize,
    // Lattice lengths a, b, c (Angstroms)
    pub lengths: [f64; 3],
    // Lattice angles alpha, beta, gamma (degrees)
    pub angles: [f64; 3],
    // Crystallographic setting label, carried through untouched
    pub setting: String,
}

impl UnitCell {
    /// Orthorhombic cell with the given lengths
    pub fn orthorhombic(atoms: usize, t_atoms: usize, lengths: [f64; 3]) -> Self {
        let setting = if lengths[0] == lengths[1] && lengths[1] == lengths[2] {
            "cubic"
        } else {
            "orthorhombic"
        };
        Self {
            atoms,
            t_atoms,
            lengths,
            angles: [90.0, 90.0, 90.0],
            setting: setting.to_string(),
        }
    }

    pub fn is_orthogonal(&self) -> bool {
        self.angles
            .iter()
            .all(|angle| (angle - 90.0).abs() <= RIGHT_ANGLE_TOLERANCE)
    }

    fn validate(&self) -> Result<()> {
        for (name, value) in ["a", "b", "c"].iter().zip(self.lengths.iter()) {
            if !value.is_finite() || *value <= 0.0 {
                return Err(ZeoranError::config(
                    format!("unit cell length {}", name),
                    format!("must be a positive finite length, got {}", value),
                ));
            }
        }
        for (name, value) in ["alpha", "beta", "gamma"].iter().zip(self.angles.iter()) {
            if !value.is_finite() || *value <= 0.0 || *value >= 180.0 {
                return Err(ZeoranError::config(
                    format!("unit cell angle {}", name),
                    format!("must lie strictly between 0 and 180 degrees, got {}", value),
                ));
            }
        }
        Ok(())
    }
}

/// A loaded zeolite framework: the atom list, its cell and the T-site map.
///
/// Immutable once built. T-site `i` is the `i`-th atom (in list order) whose
/// element is the T-site species; `t_ids[i]` is its index in `atoms`.
#[derive(Clone, Debug)]
pub struct Framework {
    atoms: Vec<Atom>,
    cell: UnitCell,
    t_ids: Vec<usize>,
}

impl Framework {
    /// Assembles a framework, rejecting inconsistent cells and atom lists
    pub fn new(atoms: Vec<Atom>, cell: UnitCell) -> Result<Self> {
        if atoms.is_empty() {
            return Err(ZeoranError::config("atoms", "framework contains no atoms"));
        }
        cell.validate()?;

        if cell.atoms != atoms.len() {
            return Err(ZeoranError::config(
                "unit cell atom count",
                format!("cell declares {} atoms but the list holds {}", cell.atoms, atoms.len()),
            ));
        }

        let t_ids: Vec<usize> = atoms
            .iter()
            .enumerate()
            .filter(|(_, atom)| is_t_site(&atom.element))
            .map(|(i, _)| i)
            .collect();

        if cell.t_atoms != t_ids.len() {
            return Err(ZeoranError::config(
                "unit cell T-atom count",
                format!("cell declares {} T-atoms but the list holds {}", cell.t_atoms, t_ids.len()),
            ));
        }

        Ok(Self { atoms, cell, t_ids })
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn cell(&self) -> &UnitCell {
        &self.cell
    }

    /// Global atom index of every T-site, in T-site order
    pub fn t_ids(&self) -> &[usize] {
        &self.t_ids
    }

    pub fn n_atoms(&self) -> usize {
        self.atoms.len()
    }

    pub fn n_t_sites(&self) -> usize {
        self.t_ids.len()
    }

    /// The atom sitting on T-site `t`
    pub fn t_atom(&self, t: usize) -> Option<&Atom> {
        self.t_ids.get(t).map(|&i| &self.atoms[i])
    }
}
