use crate::element::Element;
use crate::visitor::collect_ids;
use crc32fast::Hasher;
use std::sync::Arc;

/// Derive a short, stable seed from a document id using CRC32
pub fn get_document_seed(document_id: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(b"page://");
    hasher.update(document_id.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sequential element id generator scoped to one document
#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: String,
    count: u32,
}

impl IdGenerator {
    pub fn new(document_id: &str) -> Self {
        Self {
            seed: get_document_seed(document_id),
            count: 0,
        }
    }

    pub fn from_seed(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            count: 0,
        }
    }

    /// Generator for a document that already has elements
    ///
    /// Continues after the highest counter found among ids carrying this
    /// document's seed, so generated ids never collide with loaded ones.
    pub fn resume(document_id: &str, root: &Arc<Element>) -> Self {
        let mut generator = Self::new(document_id);
        let prefix = format!("{}-", generator.seed);

        generator.count = collect_ids(root)
            .ids
            .iter()
            .filter_map(|id| id.strip_prefix(&prefix))
            .filter_map(|suffix| suffix.parse::<u32>().ok())
            .max()
            .unwrap_or(0);

        generator
    }

    /// Generate next sequential id
    pub fn new_id(&mut self) -> String {
        self.count += 1;
        format!("{}-{}", self.seed, self.count)
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}
