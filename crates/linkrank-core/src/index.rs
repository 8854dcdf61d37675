//! Inverted index from document tokens to node ids.
//!
//! Document `i` belongs to node `i`. The index maps each token to the set of
//! nodes whose document contains it. Posting sets are ordered so root-set
//! construction is deterministic.

use std::collections::{BTreeSet, HashMap};

use tracing::{debug, instrument};

static EMPTY_POSTINGS: BTreeSet<usize> = BTreeSet::new();

/// Token → posting set of node ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvertedIndex {
    postings: HashMap<String, BTreeSet<usize>>,
    document_count: usize,
}

impl InvertedIndex {
    /// Build an index from one token list per node id.
    ///
    /// Tokens may repeat within a document; each node id appears at most
    /// once per posting set. Returns `None` when there are no documents at
    /// all, which callers treat as "query-driven HITS unavailable".
    #[must_use]
    #[instrument(skip(documents))]
    pub fn build<D, T>(documents: impl IntoIterator<Item = D>) -> Option<Self>
    where
        D: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut postings: HashMap<String, BTreeSet<usize>> = HashMap::new();
        let mut document_count = 0;

        for (node, tokens) in documents.into_iter().enumerate() {
            document_count = node + 1;
            for token in tokens {
                postings.entry(token.into()).or_default().insert(node);
            }
        }

        if document_count == 0 {
            return None;
        }

        debug!(
            documents = document_count,
            tokens = postings.len(),
            "built inverted index"
        );

        Some(Self {
            postings,
            document_count,
        })
    }

    /// Node ids whose document contains `token`. Unseen tokens yield an
    /// empty set.
    #[must_use]
    pub fn lookup(&self, token: &str) -> &BTreeSet<usize> {
        self.postings.get(token).unwrap_or(&EMPTY_POSTINGS)
    }

    /// Whether `token` occurs in any document.
    #[must_use]
    pub fn contains(&self, token: &str) -> bool {
        self.postings.contains_key(token)
    }

    /// Number of distinct tokens.
    #[must_use]
    pub fn token_count(&self) -> usize {
        self.postings.len()
    }

    /// Number of documents the index was built from.
    #[must_use]
    pub const fn document_count(&self) -> usize {
        self.document_count
    }
}

/// Build an inverted index from per-node token lists.
///
/// See [`InvertedIndex::build`].
#[must_use]
pub fn build_inverted_index<D, T>(documents: impl IntoIterator<Item = D>) -> Option<InvertedIndex>
where
    D: IntoIterator<Item = T>,
    T: Into<String>,
{
    InvertedIndex::build(documents)
}
