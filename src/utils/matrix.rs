// src/utils/matrix.rs

use std::fmt;

/// Dense symmetric 0/1 adjacency matrix with bounds-checked access.
///
/// Used both for the all-atom bond graph and for the T-site graph. Edits go
/// through [`connect`](Self::connect), [`remove_edge`](Self::remove_edge) and
/// [`isolate`](Self::isolate), which keep the matrix symmetric with an empty
/// diagonal.
#[derive(Clone, PartialEq, Eq)]
pub struct AdjacencyMatrix {
    n: usize,
    cells: Vec<bool>,
}

impl AdjacencyMatrix {
    pub fn new(n: usize) -> Self {
        Self {
            n,
            cells: vec![false; n * n],
        }
    }

    /// Builds an `n`-vertex graph from an edge list
    ///
    /// # Panics
    /// Panics if an endpoint is out of range.
    pub fn from_edges(n: usize, edges: &[(usize, usize)]) -> Self {
        let mut m = Self::new(n);
        for &(i, j) in edges {
            m.connect(i, j);
        }
        m
    }

    /// Number of vertices
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    #[inline]
    fn offset(&self, i: usize, j: usize) -> usize {
        assert!(
            i < self.n && j < self.n,
            "adjacency index ({}, {}) out of range for {} vertices",
            i,
            j,
            self.n
        );
        i * self.n + j
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> bool {
        self.cells[self.offset(i, j)]
    }

    /// Adds the undirected edge i-j. Self-loops are ignored.
    pub fn connect(&mut self, i: usize, j: usize) {
        if i == j {
            assert!(i < self.n, "adjacency index {} out of range for {} vertices", i, self.n);
            return;
        }
        let ij = self.offset(i, j);
        let ji = self.offset(j, i);
        self.cells[ij] = true;
        self.cells[ji] = true;
    }

    pub fn remove_edge(&mut self, i: usize, j: usize) {
        let ij = self.offset(i, j);
        let ji = self.offset(j, i);
        self.cells[ij] = false;
        self.cells[ji] = false;
    }

    /// Drops every edge touching `i`
    pub fn isolate(&mut self, i: usize) {
        for k in 0..self.n {
            self.remove_edge(i, k);
        }
    }

    /// Adjacent vertices of `i`, ascending
    pub fn neighbors(&self, i: usize) -> Vec<usize> {
        let row = self.offset(i, 0);
        self.cells[row..row + self.n]
            .iter()
            .enumerate()
            .filter(|(_, bonded)| **bonded)
            .map(|(j, _)| j)
            .collect()
    }

    pub fn degree(&self, i: usize) -> usize {
        let row = self.offset(i, 0);
        self.cells[row..row + self.n].iter().filter(|&&b| b).count()
    }

    pub fn edge_count(&self) -> usize {
        self.cells.iter().filter(|&&b| b).count() / 2
    }

    pub fn is_symmetric(&self) -> bool {
        (0..self.n).all(|i| (0..self.n).all(|j| self.get(i, j) == self.get(j, i)))
    }

    pub fn has_empty_diagonal(&self) -> bool {
        (0..self.n).all(|i| !self.get(i, i))
    }
}

impl fmt::Debug for AdjacencyMatrix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "AdjacencyMatrix({} vertices, {} edges)", self.n, self.edge_count())?;
        for i in 0..self.n {
            let row: String = (0..self.n)
                .map(|j| if self.get(i, j) { '1' } else { '0' })
                .collect();
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_is_symmetric() {
        let m = AdjacencyMatrix::from_edges(4, &[(0, 1), (2, 1), (3, 3)]);
        assert!(m.get(0, 1) && m.get(1, 0));
        assert!(m.get(1, 2) && m.get(2, 1));
        assert!(m.is_symmetric());
        assert!(m.has_empty_diagonal());
        assert_eq!(m.edge_count(), 2);
        assert_eq!(m.neighbors(1), vec![0, 2]);
        assert_eq!(m.degree(3), 0);
    }

    #[test]
    fn test_isolate_removes_row_and_column() {
        let mut m = AdjacencyMatrix::from_edges(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]);
        m.isolate(1);
        assert!(m.neighbors(1).is_empty());
        assert_eq!(m.neighbors(0), vec![3]);
        assert_eq!(m.neighbors(2), vec![3]);
        assert!(m.is_symmetric());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_out_of_range_access_panics() {
        let m = AdjacencyMatrix::new(3);
        m.get(0, 3);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_out_of_range_self_loop_panics() {
        let mut m = AdjacencyMatrix::new(3);
        m.connect(3, 3);
    }
}
