use uuid::Uuid;

/// Leaf name of the payload document in a snapshot group.
pub const DATA_LEAF: &str = "data.json";

/// Leaf name of the audit-metadata document in a snapshot group.
pub const METADATA_LEAF: &str = "metadata.json";

const REVISION_DIGITS: usize = 10;

/// Identity of one archived saga snapshot: saga-data id plus revision.
///
/// Revisions are zero-padded in object names so the store's lexicographic
/// listing order matches numeric revision order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SnapshotKey {
    pub id: Uuid,
    pub revision: u64,
}

/// Which of the two sibling documents a listed object name refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotLeaf {
    Data,
    Metadata,
}

impl SnapshotKey {
    pub fn new(id: Uuid, revision: u64) -> Self {
        Self { id, revision }
    }

    fn stem(&self, prefix: &str) -> String {
        format!("{}{}/{:0width$}", prefix, self.id.simple(), self.revision, width = REVISION_DIGITS)
    }

    /// Object name of the payload document.
    pub fn data_object(&self, prefix: &str) -> String {
        format!("{}/{}", self.stem(prefix), DATA_LEAF)
    }

    /// Object name of the audit-metadata document.
    pub fn metadata_object(&self, prefix: &str) -> String {
        format!("{}/{}", self.stem(prefix), METADATA_LEAF)
    }

    /// Parses a listed object name back into its key and leaf.
    ///
    /// Expects exactly three `/`-separated segments under the prefix; any
    /// other shape is a foreign object and yields `None`, to be skipped by
    /// the caller.
    pub fn parse(prefix: &str, name: &str) -> Option<(SnapshotKey, SnapshotLeaf)> {
        let rest = name.strip_prefix(prefix)?;
        let mut segments = rest.split('/');
        let id = segments.next()?;
        let revision = segments.next()?;
        let leaf = segments.next()?;
        if segments.next().is_some() {
            return None;
        }

        let id = Uuid::try_parse(id).ok()?;
        if revision.len() < REVISION_DIGITS {
            return None;
        }
        let revision: u64 = revision.parse().ok()?;
        let leaf = if leaf == DATA_LEAF {
            SnapshotLeaf::Data
        } else if leaf == METADATA_LEAF {
            SnapshotLeaf::Metadata
        } else {
            return None;
        };

        Some((SnapshotKey { id, revision }, leaf))
    }
}
