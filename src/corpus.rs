//! A set of hyperlinked pages and the links between them.

use crate::{common::*, page_rank::transition::transition_model, Error};
use algograph::graph::*;
use regex::Regex;
use std::{
    collections::{BTreeMap, BTreeSet, HashMap},
    path::Path,
};
use tracing::{debug, info};

const HREF_PATTERN: &str = r#"<a\s+(?:[^>]*?)href="([^"]*)""#;

/// Pages keyed by name, backed by a directed graph with one vertex per page.
///
/// Every link points at another page of the corpus: self-links and links to
/// unknown pages are dropped while building.
#[derive(Debug, Clone)]
pub struct Corpus {
    graph: directed::TreeBackedGraph,
    names: BTreeMap<VertexId, String>,
    ids: HashMap<String, VertexId, ahash::RandomState>,
}

impl Corpus {
    pub fn from_links<I, P, L>(links: I) -> Self
    where
        I: IntoIterator<Item = (P, L)>,
        P: Into<String>,
        L: IntoIterator,
        L::Item: Into<String>,
    {
        let mut raw: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for (page, targets) in links {
            raw.entry(page.into())
                .or_default()
                .extend(targets.into_iter().map(Into::into));
        }

        let mut graph = directed::TreeBackedGraph::new();
        let mut names = BTreeMap::new();
        let mut ids = HashMap::with_hasher(ahash::RandomState::new());
        for page in raw.keys() {
            let v = graph.add_vertex();
            names.insert(v, page.clone());
            ids.insert(page.clone(), v);
        }
        for (page, targets) in raw.iter() {
            let u = ids[page];
            for target in targets.iter().filter(|t| *t != page) {
                if let Some(v) = ids.get(target) {
                    graph.add_edge(u, *v);
                }
            }
        }
        Self { graph, names, ids }
    }

    /// Reads every `*.html` file directly under `dir` and links each page to
    /// the other files of the directory its anchors point at.
    pub fn crawl<P: AsRef<Path>>(dir: P) -> Result<Self, Error> {
        let dir = dir.as_ref();
        let io_err = |source: std::io::Error| Error::Io {
            path: dir.to_path_buf(),
            source,
        };
        let href = Regex::new(HREF_PATTERN).expect("href pattern is valid");

        let mut pages = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(io_err)? {
            let entry = entry.map_err(io_err)?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if !name.ends_with(".html") {
                continue;
            }
            let path = entry.path();
            let contents = std::fs::read_to_string(&path).map_err(|source| Error::Io {
                path: path.clone(),
                source,
            })?;
            let links: Vec<String> = href
                .captures_iter(&contents)
                .map(|c| c[1].to_string())
                .collect();
            debug!(page = %name, hrefs = links.len(), "scanned page");
            pages.push((name, links));
        }

        let corpus = Self::from_links(pages);
        info!(
            dir = %dir.display(),
            pages = corpus.len(),
            links = corpus.graph.edge_size(),
            "loaded corpus"
        );
        Ok(corpus)
    }

    pub fn len(&self) -> usize {
        self.graph.vertex_size()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn graph(&self) -> &directed::TreeBackedGraph {
        &self.graph
    }

    pub fn page_id(&self, name: &str) -> Option<VertexId> {
        self.ids.get(name).copied()
    }

    pub fn page_name(&self, id: &VertexId) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    /// Pages in name order.
    pub fn pages(&self) -> impl Iterator<Item = (VertexId, &str)> + '_ {
        let mut pages: Vec<_> = self.names.iter().map(|(v, n)| (*v, n.as_str())).collect();
        pages.sort_by(|a, b| a.1.cmp(b.1));
        pages.into_iter()
    }

    pub fn links(&self, name: &str) -> Option<BTreeSet<&str>> {
        let u = self.page_id(name)?;
        Some(
            out_links(&self.graph, &u)
                .iter()
                .filter_map(|v| self.page_name(v))
                .collect(),
        )
    }

    pub fn is_sink(&self, name: &str) -> Option<bool> {
        self.links(name).map(|links| links.is_empty())
    }

    /// Where a random surfer on `name` goes next, keyed by page name.
    pub fn transition(&self, name: &str, damping: f64) -> Result<BTreeMap<&str, f64>, Error> {
        let u = self
            .page_id(name)
            .ok_or_else(|| Error::UnknownPage(name.to_string()))?;
        let dist = transition_model(&self.graph, u, damping)?;
        Ok(self.named(&dist))
    }

    /// Re-keys a per-vertex vector by page name. Vertices outside the corpus
    /// are skipped.
    pub fn named(&self, values: &Probabilities) -> BTreeMap<&str, f64> {
        values
            .iter()
            .filter_map(|(v, x)| self.page_name(v).map(|n| (n, *x)))
            .collect()
    }
}
