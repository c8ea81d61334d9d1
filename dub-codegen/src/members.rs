//! Member list filtering and registration table formatting.

use dub_model::MemberNode;

/// Width of the slot-name column in registration tables.
const NAME_COLUMN: usize = 20;

/// Drop ignored members from a possibly nested member list.
///
/// Groups are filtered recursively and disappear once empty. Returns `None`
/// when nothing is left, so "nothing to render" differs from an empty list.
pub fn filter_members<'a, T, F>(
    nodes: &'a [MemberNode<T>],
    ignore: &F,
) -> Option<Vec<MemberNode<&'a T>>>
where
    F: Fn(&T) -> bool,
{
    let list: Vec<MemberNode<&'a T>> = nodes
        .iter()
        .filter_map(|node| match node {
            MemberNode::Group(group) => filter_members(group, ignore).map(MemberNode::Group),
            MemberNode::Leaf(member) if ignore(member) => None,
            MemberNode::Leaf(member) => Some(MemberNode::Leaf(member)),
        })
        .collect();

    if list.is_empty() { None } else { Some(list) }
}

/// One `{ "name", identifier }` entry with a left-justified name column.
pub fn registration_entry(name: &str, identifier: &str) -> String {
    let quoted = format!("{:?}", name);
    format!("{{ {:<width$}, {} }}", quoted, identifier, width = NAME_COLUMN)
}

/// Join entries into a table body (comma and newline separated).
pub fn registration_table<I>(entries: I) -> String
where
    I: IntoIterator<Item = String>,
{
    entries.into_iter().collect::<Vec<_>>().join(",\n")
}
