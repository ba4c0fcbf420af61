//! The concrete parse tree the Grammar Engine builds and the Transformer
//! consumes. A discriminated union of exactly the three shapes this
//! this grammar needs: a token leaf, an ordered sequence, and a tagged
//! node used wherever the Transformer needs to discriminate by production
//! name rather than by position.

use crate::token::Token;

#[derive(Debug, Clone)]
pub(crate) enum ParseNode<'a> {
    Leaf(Token<'a>),
    Sequence(Vec<ParseNode<'a>>),
    Tagged(&'static str, Box<ParseNode<'a>>),
}

impl<'a> ParseNode<'a> {
    pub(crate) fn tagged(name: &'static str, node: ParseNode<'a>) -> Self {
        ParseNode::Tagged(name, Box::new(node))
    }

    pub(crate) fn seq(nodes: Vec<ParseNode<'a>>) -> Self {
        ParseNode::Sequence(nodes)
    }

    /// The node's tag name, if it's a `Tagged` node.
    pub(crate) fn tag_name(&self) -> Option<&'static str> {
        match self {
            ParseNode::Tagged(name, _) => Some(name),
            _ => None,
        }
    }

    /// Unwraps one layer of tagging, if present.
    pub(crate) fn untag(&self) -> &ParseNode<'a> {
        match self {
            ParseNode::Tagged(_, inner) => inner,
            other => other,
        }
    }

    /// The underlying token, if this is (possibly through a tag) a `Leaf`.
    pub(crate) fn token(&self) -> Option<&Token<'a>> {
        match self.untag() {
            ParseNode::Leaf(tok) => Some(tok),
            _ => None,
        }
    }

    pub(crate) fn text(&self) -> Option<&'a str> {
        self.token().map(|t| t.text)
    }

    /// Children of a `Sequence` (after unwrapping a tag); empty for leaves.
    pub(crate) fn children(&self) -> &[ParseNode<'a>] {
        match self.untag() {
            ParseNode::Sequence(items) => items,
            _ => &[],
        }
    }

    /// The first token spanned by this node, recursing into `Sequence`
    /// children; used to attach a line/column to diagnostics raised over a
    /// whole production rather than a single leaf.
    pub(crate) fn first_token(&self) -> Option<&Token<'a>> {
        match self.untag() {
            ParseNode::Leaf(tok) => Some(tok),
            ParseNode::Sequence(items) => items.iter().find_map(|n| n.first_token()),
            ParseNode::Tagged(..) => unreachable!("untag() strips Tagged"),
        }
    }

    pub(crate) fn line(&self) -> u32 {
        self.first_token().map(|t| t.line).unwrap_or(0)
    }

    pub(crate) fn column(&self) -> u32 {
        self.first_token().map(|t| t.column).unwrap_or(0)
    }

    /// The first direct child whose tag name is `name`, searching a
    /// `Sequence`'s items (after unwrapping a tag on `self`). Used
    /// throughout the Transformer instead of positional indexing, since a
    /// production's optional leading/trailing parts shift child position.
    pub(crate) fn find_tagged(&self, name: &str) -> Option<&ParseNode<'a>> {
        self.children().iter().find(|c| c.tag_name() == Some(name))
    }

    /// All direct children whose tag name is `name`, in order.
    pub(crate) fn find_all_tagged<'b>(&'b self, name: &'b str) -> impl Iterator<Item = &'b ParseNode<'a>> {
        self.children().iter().filter(move |c| c.tag_name() == Some(name))
    }

    pub(crate) fn is_tagged(&self, name: &str) -> bool {
        self.tag_name() == Some(name)
    }
}
