use crate::structs::ImageRecord;

/// Records of the currently loaded directory, oldest first.
///
/// Records with equal capture times keep the order they were inserted in.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<ImageRecord>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the contents with `records`, sorted by capture time.
    pub fn insert_all(&mut self, records: impl IntoIterator<Item = ImageRecord>) {
        self.records.clear();
        for record in records {
            self.insert(record);
        }
    }

    // Goes before the first strictly later record, i.e. after every equal one.
    fn insert(&mut self, record: ImageRecord) {
        let index = self
            .records
            .partition_point(|existing| existing.captured_at <= record.captured_at);
        self.records.insert(index, record);
    }

    pub fn all(&self) -> &[ImageRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&ImageRecord> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Mutable access for the enrichment pass. Only `point_of_interest` may be changed.
    pub(crate) fn records_mut(&mut self) -> &mut [ImageRecord] {
        &mut self.records
    }
}
