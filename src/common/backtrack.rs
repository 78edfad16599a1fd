//! Path extraction over parent-indexed node arenas

use crate::common::traits::ParentLink;

/// Walk parent links from `terminal` back to the root and return the
/// visited indices in forward order, root first.
///
/// Arena nodes only point at earlier entries, so the walk always ends.
pub fn backtrack<N: ParentLink>(nodes: &[N], terminal: usize) -> Vec<usize> {
    let mut indices = Vec::new();
    let mut current = Some(terminal);

    while let Some(index) = current {
        indices.push(index);
        current = nodes[index].parent();
    }

    indices.reverse();
    indices
}
