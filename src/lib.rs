//! PageRank for a small corpus of hyperlinked pages.
//!
//! Two estimators share one random-surfer model:
//! [`SampledPageRank`] walks the corpus and counts visits, while
//! [`IteratedPageRank`] relaxes the rank vector until it stops moving.

mod common;
pub use self::common::*;
pub mod corpus;
pub use self::corpus::Corpus;
mod error;
pub use self::error::Error;
pub mod page_rank;
pub use self::page_rank::{
    iterated::IteratedPageRank, sampled::SampledPageRank, PageRank, PageRankResult,
};
pub mod report;
pub mod sampler;

#[cfg(test)]
pub(crate) mod tests {
    use crate::Corpus;
    use quickcheck::{Arbitrary, Gen};

    /// Up to 8 pages with random links, some of them self-links or links to
    /// pages outside the corpus.
    #[derive(Debug, Clone)]
    pub struct RandomCorpus {
        pub corpus: Corpus,
    }

    impl Arbitrary for RandomCorpus {
        fn arbitrary(g: &mut Gen) -> Self {
            const N: usize = 8;

            let n = usize::arbitrary(g) % N + 1;
            let mut links = Vec::with_capacity(n);
            for i in 0..n {
                let k = usize::arbitrary(g) % (n + 2);
                let mut targets = Vec::with_capacity(k);
                for _ in 0..k {
                    targets.push(format!("p{}", usize::arbitrary(g) % (n + 2)));
                }
                links.push((format!("p{i}"), targets));
            }
            let corpus = Corpus::from_links(links);
            Self { corpus }
        }
    }

    /// A damping factor in (0, 1].
    #[derive(Debug, Clone, Copy)]
    pub struct Damping(pub f64);

    impl Arbitrary for Damping {
        fn arbitrary(g: &mut Gen) -> Self {
            Self((u32::arbitrary(g) % 100 + 1) as f64 / 100.0)
        }
    }
}
