use std::{collections::BTreeMap, fmt};

/// Ranks of one estimator, printed in page-name order with four decimals.
#[derive(Debug, Clone)]
pub struct Report<'a> {
    title: String,
    ranks: BTreeMap<&'a str, f64>,
}

impl<'a> Report<'a> {
    pub fn new<T: Into<String>>(title: T, ranks: BTreeMap<&'a str, f64>) -> Self {
        Self {
            title: title.into(),
            ranks,
        }
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        for (page, rank) in self.ranks.iter() {
            writeln!(f, "  {page}: {rank:.4}")?;
        }
        Ok(())
    }
}
