// src/utils/report.rs

use crate::model::elements::get_atomic_number;
use crate::model::{Framework, SUBSTITUTE_ELEMENT, T_SITE_ELEMENT};
use crate::physics::connectivity::Topology;
use crate::utils::linalg::cell_volume;
use std::collections::HashMap;

/// Generates the text logged when a framework is loaded
pub fn framework_summary(framework: &Framework, topology: &Topology) -> String {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for atom in framework.atoms() {
        *counts.entry(atom.element.clone()).or_insert(0) += 1;
    }

    let mut parts: Vec<_> = counts.into_iter().collect();
    parts.sort_by(|a, b| {
        get_atomic_number(&b.0)
            .cmp(&get_atomic_number(&a.0))
            .then_with(|| a.0.cmp(&b.0))
    });

    let formula_str: String = parts
        .iter()
        .map(|(el, count)| format!("{}{}", el, count))
        .collect::<Vec<_>>()
        .join(" ");

    let cell = framework.cell();
    let [a, b, c] = cell.lengths;
    let [alpha, beta, gamma] = cell.angles;

    let mut out = String::new();
    out.push_str(&format!("Formula: {}\n", formula_str));
    out.push_str(&format!(
        "Cell: a={:.4} b={:.4} c={:.4} alpha={:.2} beta={:.2} gamma={:.2} ({})\n",
        a, b, c, alpha, beta, gamma, cell.setting
    ));
    out.push_str(&format!("Volume: {:.3} A^3\n", cell_volume(cell.lengths, cell.angles)));
    out.push_str(&format!(
        "T-sites: {} of {} atoms, {} T-T links\n",
        framework.n_t_sites(),
        framework.n_atoms(),
        topology.t_graph.matrix.edge_count()
    ));
    out
}

/// One-line description of a substitution set
pub fn substitution_summary(framework: &Framework, als: &[usize]) -> String {
    let n_al = als.len();
    let n_si = framework.n_t_sites().saturating_sub(n_al);

    let ratio = if n_al == 0 {
        "inf".to_string()
    } else {
        format!("{:.2}", n_si as f64 / n_al as f64)
    };

    let mut sorted = als.to_vec();
    sorted.sort_unstable();
    let sites = sorted
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(" ");

    format!(
        "{}{} {}{} ({}/{} = {}) T-sites: [{}]",
        T_SITE_ELEMENT, n_si, SUBSTITUTE_ELEMENT, n_al, T_SITE_ELEMENT, SUBSTITUTE_ELEMENT, ratio, sites
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Atom, UnitCell};

    fn framework() -> Framework {
        let atoms = vec![
            Atom::new("Si1", "Si", [0.0, 0.0, 0.0], 0.0),
            Atom::new("O1", "O", [0.25, 0.0, 0.0], 0.0),
            Atom::new("Si2", "Si", [0.5, 0.0, 0.0], 0.0),
            Atom::new("O2", "O", [0.75, 0.0, 0.0], 0.0),
        ];
        Framework::new(atoms, UnitCell::orthorhombic(4, 2, [6.4, 6.4, 6.4])).unwrap()
    }

    #[test]
    fn test_framework_summary() {
        let fw = framework();
        let topo = Topology::build(&fw);
        let text = framework_summary(&fw, &topo);
        assert!(text.contains("Formula: Si2 O2"));
        assert!(text.contains("T-sites: 2 of 4 atoms, 1 T-T links"));
        assert!(text.contains("(cubic)"));
    }

    #[test]
    fn test_substitution_summary() {
        let fw = framework();
        assert_eq!(substitution_summary(&fw, &[1]), "Si1 Al1 (Si/Al = 1.00) T-sites: [1]");
        assert!(substitution_summary(&fw, &[]).contains("Si/Al = inf"));
    }
}
