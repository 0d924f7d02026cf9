use indexmap::IndexMap;

use super::operations::IrOperation;
use super::types::IrGroup;

/// Display group of an operation: its first non-empty tag, or `default_group`.
pub fn group_key<'a>(tags: &'a [String], default_group: &'a str) -> &'a str {
    match tags.first() {
        Some(tag) if !tag.is_empty() => tag.as_str(),
        _ => default_group,
    }
}

/// Bucket operations by their `group`. Groups appear in first-seen order and
/// keep operations in document order.
pub fn group_operations(operations: &[IrOperation]) -> Vec<IrGroup> {
    let mut groups: IndexMap<&str, Vec<usize>> = IndexMap::new();

    for (i, op) in operations.iter().enumerate() {
        groups.entry(op.group.as_str()).or_default().push(i);
    }

    groups
        .into_iter()
        .map(|(name, indices)| IrGroup {
            name: name.to_string(),
            operations: indices,
        })
        .collect()
}
