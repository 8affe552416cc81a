// tests/common/mod.rs

#![allow(dead_code)]

use std::collections::{HashSet, VecDeque};
use zeoran::{Atom, Framework, UnitCell};

/// Si-Si spacing of the synthetic frameworks (Angstroms); Si-O is half of it
pub const SPACING: f64 = 3.2;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Simple cubic SiO2 net: `n`^3 Si on a grid, one O halfway along +x, +y and +z
/// from every Si. Atoms are interleaved (Si, O, O, O, Si, ...) so T-site and
/// atom indices differ.
pub fn grid_framework(n: usize) -> Framework {
    let step = 1.0 / n as f64;
    let mut atoms = Vec::new();
    let mut t = 0;
    for i in 0..n {
        for j in 0..n {
            for k in 0..n {
                let p = [i as f64 * step, j as f64 * step, k as f64 * step];
                t += 1;
                atoms.push(Atom::new(format!("Si{}", t), "Si", p, 2.4));
                for axis in 0..3 {
                    let mut o = p;
                    o[axis] = (o[axis] + 0.5 * step).rem_euclid(1.0);
                    atoms.push(Atom::new(format!("O{}{}", t, axis), "O", o, -1.2));
                }
            }
        }
    }
    let len = n as f64 * SPACING;
    let cell = UnitCell::orthorhombic(atoms.len(), n * n * n, [len, len, len]);
    Framework::new(atoms, cell).expect("synthetic framework is consistent")
}

/// Two Si-O-Si pairs far apart: a T-site graph with two 2-site components
pub fn split_framework() -> Framework {
    let atoms = vec![
        Atom::new("Si1", "Si", [0.0, 0.0, 0.0], 2.4),
        Atom::new("O1", "O", [0.1, 0.0, 0.0], -1.2),
        Atom::new("Si2", "Si", [0.2, 0.0, 0.0], 2.4),
        Atom::new("Si3", "Si", [0.0, 0.5, 0.5], 2.4),
        Atom::new("O2", "O", [0.1, 0.5, 0.5], -1.2),
        Atom::new("Si4", "Si", [0.2, 0.5, 0.5], 2.4),
    ];
    Framework::new(atoms, UnitCell::orthorhombic(6, 4, [16.0, 16.0, 16.0])).expect("consistent")
}

pub fn is_unique(als: &[usize]) -> bool {
    als.iter().collect::<HashSet<_>>().len() == als.len()
}

/// True if the sites in `als` induce a connected subgraph
pub fn induces_connected(graph: &zeoran::TSiteGraph, als: &[usize]) -> bool {
    if als.is_empty() {
        return true;
    }
    let chosen: HashSet<usize> = als.iter().copied().collect();
    let mut seen = HashSet::from([als[0]]);
    let mut queue = VecDeque::from([als[0]]);
    while let Some(site) = queue.pop_front() {
        for &next in &graph.neighbors[site] {
            if chosen.contains(&next) && seen.insert(next) {
                queue.push_back(next);
            }
        }
    }
    seen.len() == chosen.len()
}
