use crate::ast::Node;
use crate::error::Diagnostic;

/// Result of a grammar rule.
///
/// `Recovered` still carries a usable node (usually a placeholder or a tree
/// containing one) together with the first diagnostic raised while building it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    Ok(Node),
    Recovered(Node, Diagnostic),
}

impl ParseOutcome {
    pub(crate) fn from_parts(node: Node, diagnostic: Option<Diagnostic>) -> Self {
        match diagnostic {
            Some(diag) => ParseOutcome::Recovered(node, diag),
            None => ParseOutcome::Ok(node),
        }
    }

    pub fn node(&self) -> &Node {
        match self {
            ParseOutcome::Ok(node) | ParseOutcome::Recovered(node, _) => node,
        }
    }

    pub fn into_node(self) -> Node {
        match self {
            ParseOutcome::Ok(node) | ParseOutcome::Recovered(node, _) => node,
        }
    }

    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            ParseOutcome::Ok(_) => None,
            ParseOutcome::Recovered(_, diag) => Some(diag),
        }
    }

    pub fn is_recovered(&self) -> bool {
        matches!(self, ParseOutcome::Recovered(..))
    }

    pub fn into_parts(self) -> (Node, Option<Diagnostic>) {
        match self {
            ParseOutcome::Ok(node) => (node, None),
            ParseOutcome::Recovered(node, diag) => (node, Some(diag)),
        }
    }

    /// Unwraps the node, keeping the diagnostic in `first` if none was seen yet.
    pub(crate) fn absorb(self, first: &mut Option<Diagnostic>) -> Node {
        let (node, diag) = self.into_parts();
        if first.is_none() {
            *first = diag;
        }
        node
    }
}
