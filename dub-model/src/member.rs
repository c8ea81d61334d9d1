/// Element-or-group member list. A group holds the overloads sharing one name.
#[derive(Debug, Clone, PartialEq)]
pub enum MemberNode<T> {
    Leaf(T),
    Group(Vec<MemberNode<T>>),
}

impl<T> MemberNode<T> {
    /// Borrowing view with the same shape.
    pub fn as_ref(&self) -> MemberNode<&T> {
        match self {
            MemberNode::Leaf(member) => MemberNode::Leaf(member),
            MemberNode::Group(nodes) => MemberNode::Group(nodes.iter().map(Self::as_ref).collect()),
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, MemberNode::Group(_))
    }

    /// First leaf in declaration order.
    pub fn first(&self) -> Option<&T> {
        match self {
            MemberNode::Leaf(member) => Some(member),
            MemberNode::Group(nodes) => nodes.iter().find_map(Self::first),
        }
    }

    /// All leaves, depth first.
    pub fn leaves(&self) -> Vec<&T> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a T>) {
        match self {
            MemberNode::Leaf(member) => out.push(member),
            MemberNode::Group(nodes) => nodes.iter().for_each(|node| node.collect_leaves(out)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_and_leaves() {
        let tree = MemberNode::Group(vec![
            MemberNode::Group(vec![]),
            MemberNode::Leaf("a"),
            MemberNode::Group(vec![MemberNode::Leaf("b"), MemberNode::Leaf("c")]),
        ]);

        assert_eq!(tree.first(), Some(&"a"));
        assert_eq!(tree.leaves(), vec![&"a", &"b", &"c"]);
        assert!(tree.is_group());
    }

    #[test]
    fn test_as_ref_keeps_shape() {
        let tree = MemberNode::Group(vec![MemberNode::Leaf(1), MemberNode::Leaf(2)]);
        assert_eq!(
            tree.as_ref(),
            MemberNode::Group(vec![MemberNode::Leaf(&1), MemberNode::Leaf(&2)])
        );
    }
}
