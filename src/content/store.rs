//! Read-only index over ingested content
//!
//! The store is built once per build from the records ingestion produced and is
//! never mutated afterwards. It answers two questions: which records belong to a
//! post type (in display order), and which record owns a slug.

use std::collections::{BTreeMap, HashMap};
use std::iter::FusedIterator;

use super::{ContentError, ContentRecord, PostType};

/// Immutable content index
#[derive(Debug, Clone, Default)]
pub struct ContentStore {
    records: Vec<ContentRecord>,
    by_type: BTreeMap<PostType, Vec<usize>>,
    by_slug: HashMap<String, usize>,
    by_id: HashMap<String, usize>,
}

impl ContentStore {
    /// Build a store, rejecting duplicate ids and slugs
    pub fn new(records: Vec<ContentRecord>) -> Result<Self, ContentError> {
        let mut by_type: BTreeMap<PostType, Vec<usize>> = BTreeMap::new();
        let mut by_slug = HashMap::with_capacity(records.len());
        let mut by_id = HashMap::with_capacity(records.len());

        for (idx, record) in records.iter().enumerate() {
            if by_id.insert(record.id.clone(), idx).is_some() {
                return Err(ContentError::DuplicateId {
                    id: record.id.clone(),
                });
            }
            if by_slug.insert(record.slug.clone(), idx).is_some() {
                return Err(ContentError::DuplicateSlug {
                    slug: record.slug.clone(),
                });
            }
            by_type
                .entry(record.post_type.clone())
                .or_default()
                .push(idx);
        }

        for indices in by_type.values_mut() {
            indices.sort_by(|&a, &b| records[a].sort_key().cmp(&records[b].sort_key()));
        }

        tracing::debug!(
            "Content store built: {} records in {} post types",
            records.len(),
            by_type.len()
        );

        Ok(Self {
            records,
            by_type,
            by_slug,
            by_id,
        })
    }

    /// Records of one post type, ascending by `(order_index, id)`.
    ///
    /// An unknown post type yields an empty listing.
    pub fn list_by_type(&self, post_type: &PostType) -> Listing<'_> {
        let indices = self
            .by_type
            .get(post_type)
            .map(Vec::as_slice)
            .unwrap_or_default();
        Listing {
            records: &self.records,
            indices: indices.iter(),
        }
    }

    /// Exact, case-sensitive slug lookup
    pub fn get_by_slug(&self, slug: &str) -> Result<&ContentRecord, ContentError> {
        self.by_slug
            .get(slug)
            .map(|&idx| &self.records[idx])
            .ok_or_else(|| ContentError::not_found(slug))
    }

    pub fn get_by_id(&self, id: &str) -> Option<&ContentRecord> {
        self.by_id.get(id).map(|&idx| &self.records[idx])
    }

    /// Post types present in the store (case studies, blog posts, then others by name)
    pub fn post_types(&self) -> impl Iterator<Item = &PostType> {
        self.by_type.keys()
    }

    /// Every record, grouped by post type and ordered within each group
    pub fn iter(&self) -> impl Iterator<Item = &ContentRecord> {
        self.by_type
            .values()
            .flat_map(|indices| indices.iter().map(|&idx| &self.records[idx]))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Lazy, restartable view over the records of one post type.
///
/// Cloning a listing restarts iteration from the clone point without touching
/// the store.
#[derive(Debug, Clone)]
pub struct Listing<'a> {
    records: &'a [ContentRecord],
    indices: std::slice::Iter<'a, usize>,
}

impl<'a> Iterator for Listing<'a> {
    type Item = &'a ContentRecord;

    fn next(&mut self) -> Option<Self::Item> {
        self.indices.next().map(|&idx| &self.records[idx])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.indices.size_hint()
    }
}

impl DoubleEndedIterator for Listing<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.indices.next_back().map(|&idx| &self.records[idx])
    }
}

impl ExactSizeIterator for Listing<'_> {}

impl FusedIterator for Listing<'_> {}
