use crate::Error;
use rand::{
    distr::{weighted::WeightedIndex, Distribution},
    Rng,
};

/// Draws one outcome at a time, each with probability proportional to its
/// weight.
#[derive(Debug, Clone)]
pub struct WeightedSampler<K> {
    outcomes: Vec<K>,
    index: WeightedIndex<f64>,
}

impl<K: Copy> WeightedSampler<K> {
    pub fn new<I>(weights: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (K, f64)>,
    {
        let (outcomes, weights): (Vec<K>, Vec<f64>) = weights.into_iter().unzip();
        let index = WeightedIndex::new(&weights).map_err(|e| Error::Weights(e.to_string()))?;
        Ok(Self { outcomes, index })
    }

    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> K {
        self.outcomes[self.index.sample(rng)]
    }
}
