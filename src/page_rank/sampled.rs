use super::*;
use crate::{common::*, sampler::WeightedSampler, Error};
use algograph::graph::{QueryableGraph, VertexId};
use rand::{prelude::*, rngs::SmallRng};
use std::collections::HashMap;
use tracing::{debug, info};

/// Estimates PageRank as the visit frequency of a random surfer walking the
/// graph for a fixed number of steps.
pub struct SampledPageRank<'a, G>
where
    G: QueryableGraph,
{
    graph: &'a G,
    damping: f64,
    samples: usize,
    seed: Option<u64>,
    pages: Vec<VertexId>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub damping: f64,
    pub samples: usize,
    /// Fixed seed for a reproducible walk. `None` seeds every run from the OS.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            damping: 0.85,
            samples: 10_000,
            seed: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Result {
    pub page_rank: Probabilities,
    pub visits: HashMap<VertexId, usize, ahash::RandomState>,
    pub samples: usize,
}

impl<'a, G: QueryableGraph> SampledPageRank<'a, G> {
    pub fn new(g: &'a G, config: &Config) -> std::result::Result<Self, Error> {
        let damping = check_damping(config.damping)?;
        check_nonempty(g)?;
        if config.samples == 0 {
            return Err(Error::ZeroSamples);
        }
        Ok(Self {
            graph: g,
            damping,
            samples: config.samples,
            seed: config.seed,
            pages: g.iter_vertices().collect(),
        })
    }

    /// Walks with a caller-supplied generator instead of a freshly seeded one.
    pub fn calc_with_rng<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> std::result::Result<Result, Error> {
        let n = self.samples;
        let mut visits: HashMap<_, _, ahash::RandomState> =
            self.pages.iter().map(|v| (*v, 0usize)).collect();

        if let [only] = self.pages.as_slice() {
            visits.insert(*only, n);
        } else {
            let mut samplers: HashMap<VertexId, WeightedSampler<VertexId>, ahash::RandomState> =
                HashMap::with_hasher(ahash::RandomState::new());
            let mut cur = *self.pages.choose(rng).ok_or(Error::EmptyGraph)?;
            *visits.entry(cur).or_default() += 1;
            for _ in 1..n {
                if !samplers.contains_key(&cur) {
                    let dist =
                        Transition::of(self.graph, &cur).distribution(self.graph, self.damping);
                    // outcomes in page order, so a seeded walk repeats
                    let sampler = WeightedSampler::new(self.pages.iter().map(|v| (*v, dist[v])))?;
                    samplers.insert(cur, sampler);
                }
                cur = samplers[&cur].draw(rng);
                *visits.entry(cur).or_default() += 1;
            }
            debug!(
                steps = n,
                distinct = samplers.len(),
                "built transition samplers"
            );
        }

        let page_rank = visits
            .iter()
            .map(|(v, c)| (*v, *c as f64 / n as f64))
            .collect();
        info!(samples = n, pages = self.pages.len(), "sampled page rank");
        Ok(Result {
            page_rank,
            visits,
            samples: n,
        })
    }
}

impl<G: QueryableGraph> PageRank for SampledPageRank<'_, G> {
    type Result = self::Result;

    fn calc(&self) -> std::result::Result<Self::Result, Error> {
        let mut rng = match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        self.calc_with_rng(&mut rng)
    }
}

impl PageRankResult for self::Result {
    fn page_rank(&self) -> &Probabilities {
        &self.page_rank
    }
}
