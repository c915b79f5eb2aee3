//! Expands size quantities into label instances and maps them onto pages.

use crate::request::SizeQuantity;

/// One physical label to produce: a size plus its 0-based position across
/// the whole job. Derived on demand, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelInstance {
    pub size: String,
    pub sequence_index: usize,
}

/// Page/row/column slot of one label. Page-major, row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridPosition {
    pub page: usize,
    pub row: usize,
    pub column: usize,
}

/// Lazily emits `quantity` instances per entry, in entry order, with
/// strictly increasing sequence indices. Zero quantities are skipped;
/// all-zero input yields an empty sequence, which is not an error.
pub fn expand(size_quantities: &[SizeQuantity]) -> impl Iterator<Item = LabelInstance> + '_ {
    size_quantities
        .iter()
        .filter(|entry| entry.quantity > 0)
        .flat_map(|entry| std::iter::repeat(entry.size.as_str()).take(entry.quantity as usize))
        .enumerate()
        .map(|(sequence_index, size)| LabelInstance {
            size: size.to_string(),
            sequence_index,
        })
}

/// Total labels `expand` will emit for the given entries.
pub fn instance_count(size_quantities: &[SizeQuantity]) -> usize {
    size_quantities
        .iter()
        .map(|entry| entry.quantity as usize)
        .sum()
}

/// Slot for a sequence index on a `rows` x `cols` grid. Pure and total
/// for every index; grid dimensions must be non-zero.
pub fn grid_position(sequence_index: usize, rows: usize, cols: usize) -> GridPosition {
    let per_page = rows * cols;
    let on_page = sequence_index % per_page;
    GridPosition {
        page: sequence_index / per_page,
        row: on_page / cols,
        column: on_page % cols,
    }
}

/// Pages required for `label_count` labels at `per_page` slots each.
pub fn pages_needed(label_count: usize, per_page: usize) -> usize {
    label_count.div_ceil(per_page)
}
