use super::*;
use crate::{common::*, Error};
use algograph::graph::{QueryableGraph, VertexId};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

pub struct IteratedPageRank<'a, G>
where
    G: QueryableGraph,
{
    graph: &'a G,
    damping: f64,
    epsilon: f64,
    max_iterations: usize,
    transitions: BTreeMap<(VertexId, VertexId), f64>,
    sinks: Vec<VertexId>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub damping: f64,
    /// Largest per-page change still counted as converged.
    pub epsilon: f64,
    pub max_iterations: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            damping: 0.85,
            epsilon: 0.001,
            max_iterations: 1000,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Result {
    pub page_rank: Probabilities,
    pub delta: Probabilities,
    pub iterations: usize,
    pub converged: bool,
}

impl<'a, G: QueryableGraph> IteratedPageRank<'a, G> {
    pub fn new(g: &'a G, config: &Config) -> std::result::Result<Self, Error> {
        let damping = check_damping(config.damping)?;
        let epsilon = config.epsilon;
        if !(epsilon > 0.0 && epsilon.is_finite()) {
            return Err(Error::InvalidTolerance(epsilon));
        }
        if config.max_iterations == 0 {
            return Err(Error::ZeroIterations);
        }
        check_nonempty(g)?;

        let mut transitions = BTreeMap::new();
        let mut sinks = Vec::new();
        for u in g.iter_vertices() {
            match Transition::of(g, &u) {
                Transition::Follow(links) => {
                    let unit = damping / (links.len() as f64);
                    for v in links {
                        transitions.insert((u, v), unit);
                    }
                }
                Transition::Sink => sinks.push(u),
            }
        }
        Ok(Self {
            graph: g,
            damping,
            epsilon,
            max_iterations: config.max_iterations,
            transitions,
            sinks,
        })
    }
}

impl<G: QueryableGraph> PageRank for IteratedPageRank<'_, G> {
    type Result = self::Result;

    fn calc(&self) -> std::result::Result<Self::Result, Error> {
        let n = self.graph.vertex_size() as f64;
        let jump = (1.0 - self.damping) / n;
        let mut p: Probabilities = self.graph.iter_vertices().map(|v| (v, 1.0 / n)).collect();
        let mut r = Probabilities::with_hasher(ahash::RandomState::new());
        let mut delta = Probabilities::with_hasher(ahash::RandomState::new());
        for iteration in 1..=self.max_iterations {
            // sinks spread their rank over every page
            let leaked: f64 = self.sinks.iter().map(|v| p[v]).sum();
            let base = jump + self.damping * leaked / n;
            r.clear();
            for v in self.graph.iter_vertices() {
                r.insert(v, base);
            }
            for ((v0, v1), w) in self.transitions.iter() {
                let from = p[v0];
                if let Some(to) = r.get_mut(v1) {
                    *to += from * w;
                }
            }

            delta.clear();
            let mut max_delta = 0.0f64;
            for v in self.graph.iter_vertices() {
                let d = r[&v] - p[&v];
                max_delta = max_delta.max(d.abs());
                delta.insert(v, d);
            }
            debug!(iteration, max_delta, mass = norm_1(&r), "page rank iteration");

            if max_delta < self.epsilon {
                info!(iterations = iteration, "page rank converged");
                return Ok(Self::Result {
                    page_rank: r,
                    delta,
                    iterations: iteration,
                    converged: true,
                });
            }

            std::mem::swap(&mut p, &mut r);
        }

        warn!(
            max_iterations = self.max_iterations,
            epsilon = self.epsilon,
            "page rank did not converge, returning last iterate"
        );
        Ok(Self::Result {
            page_rank: p,
            delta,
            iterations: self.max_iterations,
            converged: false,
        })
    }
}

impl PageRankResult for self::Result {
    fn page_rank(&self) -> &Probabilities {
        &self.page_rank
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{tests::*, Corpus};
    use quickcheck_macros::quickcheck;

    fn ranks(corpus: &Corpus, config: &Config) -> Result {
        IteratedPageRank::new(corpus.graph(), config)
            .unwrap()
            .calc()
            .unwrap()
    }

    #[test]
    fn two_page_cycle() {
        let corpus = Corpus::from_links([("A", vec!["B"]), ("B", vec!["A"])]);
        let res = ranks(&corpus, &Config::default());
        assert!(res.converged);
        let pr = res.named(&corpus);
        assert!((pr["A"] - 0.5).abs() < 1e-9);
        assert!((pr["B"] - 0.5).abs() < 1e-9);
    }

    #[test]
    fn chain_into_sink() {
        let corpus = Corpus::from_links([("A", vec!["B"]), ("B", vec!["C"]), ("C", vec![])]);
        let res = ranks(&corpus, &Config::default());
        assert!(res.converged);
        let pr = res.named(&corpus);
        assert!(pr["C"] > pr["B"] && pr["B"] > pr["A"], "{pr:?}");
        let total: f64 = pr.values().sum();
        assert!((total - 1.0).abs() < 1e-3, "total={total}");
    }

    #[test]
    fn single_page() {
        let corpus = Corpus::from_links([("A", Vec::<&str>::new())]);
        let res = ranks(&corpus, &Config::default());
        assert!(res.converged);
        assert_eq!(res.iterations, 1);
        assert!((res.named(&corpus)["A"] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn self_link_and_no_link_are_both_sinks() {
        let plain = Corpus::from_links([("A", vec!["B"]), ("B", vec![]), ("C", vec!["A"])]);
        let looped = Corpus::from_links([("A", vec!["B"]), ("B", vec!["B"]), ("C", vec!["A"])]);
        let plain = ranks(&plain, &Config::default()).named(&plain);
        let looped = ranks(&looped, &Config::default()).named(&looped);
        assert_eq!(plain, looped);
    }

    #[test]
    fn fixed_point() {
        // 1 -> 2, 2 -> {1, 3}, 3 -> {2, 4}, 4 -> 2
        let corpus = Corpus::from_links([
            ("1", vec!["2"]),
            ("2", vec!["1", "3"]),
            ("3", vec!["2", "4"]),
            ("4", vec!["2"]),
        ]);
        let cfg = Config {
            epsilon: 1e-12,
            ..Default::default()
        };
        let pr = ranks(&corpus, &cfg).named(&corpus);
        let d = 0.85;
        let jump = (1.0 - d) / 4.0;
        let expect_1 = jump + d * pr["2"] / 2.0;
        let expect_2 = jump + d * (pr["1"] + pr["3"] / 2.0 + pr["4"]);
        let expect_3 = jump + d * pr["2"] / 2.0;
        let expect_4 = jump + d * pr["3"] / 2.0;
        assert!((pr["1"] - expect_1).abs() < 1e-9);
        assert!((pr["2"] - expect_2).abs() < 1e-9);
        assert!((pr["3"] - expect_3).abs() < 1e-9);
        assert!((pr["4"] - expect_4).abs() < 1e-9);
    }

    #[test]
    fn capped_iterations() {
        let corpus = Corpus::from_links([("A", vec!["B"]), ("B", vec!["C"]), ("C", vec![])]);
        let cfg = Config {
            epsilon: 1e-15,
            max_iterations: 2,
            ..Default::default()
        };
        let res = ranks(&corpus, &cfg);
        assert!(!res.converged);
        assert_eq!(res.iterations, 2);
        let total: f64 = res.page_rank.values().sum();
        assert!((total - 1.0).abs() < 1e-9, "total={total}");
    }

    #[test]
    fn rejects_bad_config() {
        let corpus = Corpus::from_links([("A", vec!["B"]), ("B", vec![])]);
        let bad = |cfg: Config| IteratedPageRank::new(corpus.graph(), &cfg).err();
        assert!(matches!(
            bad(Config {
                damping: 0.0,
                ..Default::default()
            }),
            Some(Error::InvalidDamping(_))
        ));
        assert!(matches!(
            bad(Config {
                epsilon: 0.0,
                ..Default::default()
            }),
            Some(Error::InvalidTolerance(_))
        ));
        assert!(matches!(
            bad(Config {
                max_iterations: 0,
                ..Default::default()
            }),
            Some(Error::ZeroIterations)
        ));
        let empty = Corpus::from_links(Vec::<(&str, Vec<&str>)>::new());
        assert!(matches!(
            IteratedPageRank::new(empty.graph(), &Config::default()).err(),
            Some(Error::EmptyGraph)
        ));
    }

    #[quickcheck]
    fn sums_to_one(c: RandomCorpus, damping: Damping) {
        let cfg = Config {
            damping: damping.0,
            ..Default::default()
        };
        let res = ranks(&c.corpus, &cfg);
        assert!(res.page_rank.values().all(|x| (0.0..=1.0).contains(x)));
        let total = norm_1(&res.page_rank);
        assert!((total - 1.0).abs() < 1e-3, "total={total}");
    }
}
