use push4_selectors::PixelSelector;
use std::collections::BTreeMap;

/// A selector's place in the per-column render order.
///
/// `render_row` is assigned, not given: it is the selector's 0-based rank by
/// ascending full numeric value among all selectors sharing its column. The
/// renderer walks each column in that order, so recovering a pixel's true
/// color requires both this rank and the independently ordered color table
/// at that rank. Indirection, not compression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemapEntry {
    pub column: u8,
    pub value: u32,
    /// Row the selector occupied in the source grid (row-major derivation).
    pub source_row: usize,
    /// Rank by ascending numeric value within the column.
    pub render_row: usize,
}

impl RemapEntry {
    /// 24-bit color key the proxy contract matches on within a column.
    pub fn color_key(&self) -> u32 {
        self.value >> 8
    }
}

/// Group a selector layout by column byte and assign render rows.
///
/// All selector values in a layout are distinct, so the ordering within each
/// column is total and the assignment deterministic.
pub fn remap_by_column(layout: &[PixelSelector], width: usize) -> BTreeMap<u8, Vec<RemapEntry>> {
    let mut columns: BTreeMap<u8, Vec<RemapEntry>> = BTreeMap::new();
    for selector in layout {
        columns.entry(selector.column()).or_default().push(RemapEntry {
            column: selector.column(),
            value: selector.value(),
            source_row: selector.index / width,
            render_row: 0,
        });
    }
    for entries in columns.values_mut() {
        entries.sort_by_key(|entry| entry.value);
        for (rank, entry) in entries.iter_mut().enumerate() {
            entry.render_row = rank;
        }
    }
    columns
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn selector(index: usize, bytes: [u8; 4]) -> PixelSelector {
        PixelSelector::new(index, bytes)
    }

    #[test]
    fn render_row_is_rank_by_value_not_source_row() {
        // One column (width 1) with values 30, 10, 20 at source rows 0, 1, 2.
        let layout = vec![
            selector(0, [0, 0, 30, 0]),
            selector(1, [0, 0, 10, 0]),
            selector(2, [0, 0, 20, 0]),
        ];
        let columns = remap_by_column(&layout, 1);
        let entries = &columns[&0];

        assert_eq!(entries[0].value, 10);
        assert_eq!(entries[0].source_row, 1);
        assert_eq!(entries[0].render_row, 0);

        assert_eq!(entries[1].value, 20);
        assert_eq!(entries[1].source_row, 2);
        assert_eq!(entries[1].render_row, 1);

        assert_eq!(entries[2].value, 30);
        assert_eq!(entries[2].source_row, 0);
        assert_eq!(entries[2].render_row, 2);
    }

    #[test]
    fn columns_are_remapped_independently() {
        let layout = vec![
            selector(0, [0, 0, 9, 0]),
            selector(1, [0, 0, 1, 1]),
            selector(2, [0, 0, 5, 0]),
            selector(3, [0, 0, 7, 1]),
        ];
        let columns = remap_by_column(&layout, 2);

        assert_eq!(columns.len(), 2);
        assert_eq!(
            columns[&0].iter().map(|e| e.value).collect::<Vec<_>>(),
            vec![5, 9]
        );
        assert_eq!(
            columns[&1].iter().map(|e| e.value).collect::<Vec<_>>(),
            vec![1, 7]
        );
        // Column byte, not grid position, decides membership.
        assert_eq!(columns[&0][0].source_row, 1);
    }

    #[test]
    fn color_key_drops_the_column_byte() {
        let entry = RemapEntry {
            column: 7,
            value: 0x4c342e07,
            source_row: 0,
            render_row: 0,
        };
        assert_eq!(entry.color_key(), 0x4c342e);
    }

    #[test]
    fn deployed_layout_remaps_cleanly() {
        let layout = crate::deployed_layout();
        let columns = remap_by_column(&layout, 15);

        assert_eq!(columns.len(), 15);
        for (column, entries) in &columns {
            assert_eq!(entries.len(), 25, "column {column} must hold 25 selectors");
            for (rank, entry) in entries.iter().enumerate() {
                assert_eq!(entry.render_row, rank);
                if rank > 0 {
                    assert!(entries[rank - 1].value < entry.value);
                }
            }
        }
    }
}
