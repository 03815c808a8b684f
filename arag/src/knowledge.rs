//! Startup construction of the searchable knowledge index.

use std::sync::Arc;
use std::time::{Duration, Instant};

use aprovider::Embedder;
use tracing::info;

use crate::{
    FlatL2Index, KnowledgeBase, KnowledgeItem, Neighbor, NoopRetrievalHooks, RetrievalError,
    RetrievalHooks,
};

pub const DEFAULT_EMBEDDING_BATCH_SIZE: usize = 64;

#[derive(Debug, Clone, PartialEq)]
pub struct IndexStats {
    pub items: usize,
    pub dimension: usize,
    pub embedding_model: String,
    pub elapsed: Duration,
}

/// Dataset plus the embedding of every question, aligned by index.
///
/// Read-only once built.
#[derive(Debug, Clone)]
pub struct KnowledgeIndex {
    base: KnowledgeBase,
    vectors: FlatL2Index,
    embedding_model: String,
}

impl KnowledgeIndex {
    /// Assembles an index from precomputed vectors, one per item.
    pub fn from_parts(
        base: KnowledgeBase,
        vectors: Vec<Vec<f32>>,
        embedding_model: impl Into<String>,
    ) -> Result<Self, RetrievalError> {
        if vectors.len() != base.len() {
            return Err(RetrievalError::index(format!(
                "{} vectors for {} items",
                vectors.len(),
                base.len()
            )));
        }

        let dimension = vectors
            .first()
            .map(Vec::len)
            .ok_or_else(|| RetrievalError::index("cannot index an empty dataset"))?;
        let mut index = FlatL2Index::new(dimension)?;
        index.add(&vectors)?;

        Ok(Self {
            base,
            vectors: index,
            embedding_model: embedding_model.into(),
        })
    }

    pub fn builder(base: KnowledgeBase) -> KnowledgeIndexBuilder {
        KnowledgeIndexBuilder::new(base)
    }

    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<Neighbor>, RetrievalError> {
        self.vectors.search(query, k)
    }

    pub fn item(&self, index: usize) -> Option<&KnowledgeItem> {
        self.base.get(index)
    }

    pub fn len(&self) -> usize {
        self.base.len()
    }

    pub fn is_empty(&self) -> bool {
        self.base.is_empty()
    }

    pub fn dimension(&self) -> usize {
        self.vectors.dimension()
    }

    pub fn embedding_model(&self) -> &str {
        &self.embedding_model
    }
}

pub struct KnowledgeIndexBuilder {
    base: KnowledgeBase,
    batch_size: usize,
    hooks: Arc<dyn RetrievalHooks>,
}

impl KnowledgeIndexBuilder {
    pub fn new(base: KnowledgeBase) -> Self {
        Self {
            base,
            batch_size: DEFAULT_EMBEDDING_BATCH_SIZE,
            hooks: Arc::new(NoopRetrievalHooks),
        }
    }

    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn hooks(mut self, hooks: Arc<dyn RetrievalHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    /// Embeds every question in batches and builds the index.
    pub async fn build(self, embedder: &dyn Embedder) -> Result<KnowledgeIndex, RetrievalError> {
        let started = Instant::now();
        let total = self.base.len();
        let model = embedder.model().to_string();
        info!(items = total, model = %model, batch_size = self.batch_size, "embedding knowledge base");

        let mut vectors = Vec::with_capacity(total);
        for batch in self.base.items().chunks(self.batch_size) {
            let questions = batch
                .iter()
                .map(|item| item.question.clone())
                .collect::<Vec<_>>();
            let embedded = embedder
                .embed(questions)
                .await
                .map_err(RetrievalError::embedding)?;

            if embedded.len() != batch.len() {
                return Err(RetrievalError::index(format!(
                    "embedder returned {} vectors for a batch of {}",
                    embedded.len(),
                    batch.len()
                )));
            }

            vectors.extend(embedded);
            info!(embedded = vectors.len(), total, "embedding progress");
        }

        let index = KnowledgeIndex::from_parts(self.base, vectors, model)?;
        let stats = IndexStats {
            items: index.len(),
            dimension: index.dimension(),
            embedding_model: index.embedding_model.clone(),
            elapsed: started.elapsed(),
        };
        info!(
            items = stats.items,
            dimension = stats.dimension,
            elapsed_ms = stats.elapsed.as_millis() as u64,
            "knowledge index ready"
        );
        self.hooks.on_index_built(&stats);

        Ok(index)
    }
}
