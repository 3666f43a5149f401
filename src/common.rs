use crate::Error;
use algograph::graph::*;
use std::{
    collections::{BTreeSet, HashMap},
    hash::Hash,
};

/// Probability mass per page: a transition distribution or a rank vector.
pub type Probabilities = HashMap<VertexId, f64, ahash::RandomState>;

pub fn norm_1<K: Ord + Hash>(v: &HashMap<K, f64, ahash::RandomState>) -> f64 {
    v.values().map(|x| x.abs()).sum()
}

/// Distinct pages that `u` links to. Self-loops and parallel edges collapse,
/// so a page linking only to itself comes back empty.
pub fn out_links<G: QueryableGraph>(g: &G, u: &VertexId) -> BTreeSet<VertexId> {
    g.out_edges(u).map(|e| e.sink).filter(|v| v != u).collect()
}

pub fn check_damping(damping: f64) -> Result<f64, Error> {
    if damping > 0.0 && damping <= 1.0 {
        Ok(damping)
    } else {
        Err(Error::InvalidDamping(damping))
    }
}

pub fn check_nonempty<G: QueryableGraph>(g: &G) -> Result<usize, Error> {
    match g.vertex_size() {
        0 => Err(Error::EmptyGraph),
        n => Ok(n),
    }
}
