use crate::foundation::core::{DeformRecord, PosRect};
use crate::foundation::error::{PetpetError, PetpetResult};

/// Per-output-frame rectangles. Out-of-range lookups clamp to the last entry.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct RectTable(Vec<PosRect>);

impl RectTable {
    /// Build a non-empty table.
    pub fn new(rects: Vec<PosRect>) -> PetpetResult<Self> {
        if rects.is_empty() {
            return Err(PetpetError::malformed_position("no position data"));
        }
        Ok(Self(rects))
    }

    /// Number of stored rectangles.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; tables are non-empty by construction.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Rectangle for output frame `index`, clamped to the last entry.
    pub fn get(&self, index: usize) -> PosRect {
        let last = self.0.len() - 1;
        self.0[index.min(last)]
    }

    /// Largest width and largest height across all entries (each at least 0).
    pub fn max_size(&self) -> (i32, i32) {
        self.0
            .iter()
            .fold((0, 0), |(w, h), r| (w.max(r.w), h.max(r.h)))
    }

    /// All stored rectangles in order.
    pub fn as_slice(&self) -> &[PosRect] {
        &self.0
    }
}

/// Per-output-frame deform records. Lookups wrap modulo the table length.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct DeformTable(Vec<DeformRecord>);

impl DeformTable {
    /// Build a non-empty table.
    pub fn new(records: Vec<DeformRecord>) -> PetpetResult<Self> {
        if records.is_empty() {
            return Err(PetpetError::malformed_position("no deform data"));
        }
        Ok(Self(records))
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; tables are non-empty by construction.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Record for output frame `index`, cycling through the table.
    pub fn get(&self, index: usize) -> &DeformRecord {
        &self.0[index % self.0.len()]
    }

    /// All stored records in order.
    pub fn as_slice(&self) -> &[DeformRecord] {
        &self.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/placement/table.rs"]
mod tests;
