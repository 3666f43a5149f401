use crate::{common::Probabilities, Corpus, Error};
use std::collections::BTreeMap;

pub trait PageRank {
    type Result: PageRankResult;

    fn calc(&self) -> Result<Self::Result, Error>;
}

pub trait PageRankResult {
    fn page_rank(&self) -> &Probabilities;

    fn named<'a>(&self, corpus: &'a Corpus) -> BTreeMap<&'a str, f64> {
        corpus.named(self.page_rank())
    }
}
