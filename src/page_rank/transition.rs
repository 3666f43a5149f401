//! The random-surfer step shared by both estimators.
//!
//! From a page with links, the surfer follows one of them uniformly with
//! probability `damping`, and otherwise jumps to any page uniformly. A sink has
//! nowhere to go, so it behaves as if it linked to every page.

use crate::{common::*, Error};
use algograph::graph::*;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Follow(BTreeSet<VertexId>),
    Sink,
}

impl Transition {
    pub fn of<G: QueryableGraph>(g: &G, page: &VertexId) -> Self {
        let links = out_links(g, page);
        if links.is_empty() {
            Self::Sink
        } else {
            Self::Follow(links)
        }
    }

    /// Probability of moving to each page of `g`.
    pub fn distribution<G: QueryableGraph>(&self, g: &G, damping: f64) -> Probabilities {
        let n = g.vertex_size() as f64;
        match self {
            Self::Follow(links) => {
                let base = (1.0 - damping) / n;
                let unit = damping / (links.len() as f64);
                g.iter_vertices()
                    .map(|v| {
                        if links.contains(&v) {
                            (v, base + unit)
                        } else {
                            (v, base)
                        }
                    })
                    .collect()
            }
            Self::Sink => g.iter_vertices().map(|v| (v, 1.0 / n)).collect(),
        }
    }
}

pub fn transition_model<G: QueryableGraph>(
    g: &G,
    page: VertexId,
    damping: f64,
) -> Result<Probabilities, Error> {
    let damping = check_damping(damping)?;
    if !g.contains_vertex(&page) {
        return Err(Error::UnknownPage(format!("{page:?}")));
    }
    Ok(Transition::of(g, &page).distribution(g, damping))
}
