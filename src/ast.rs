use serde::Serialize;
use serde_json::{json, Value};

/// Value of a `ReturnStatement` placeholder standing in for a statement the grammar does not cover.
pub const UNSUPPORTED_STATEMENT: &str = "Unsupported Statement";
/// Value of a `FunctionDeclaration` placeholder when the rule did not start at `func`.
pub const UNSUPPORTED_FUNCTION: &str = "UnsupportedFunction";
/// Value of a `Parameter` placeholder when no identifier was found.
pub const UNSUPPORTED_PARAMETER: &str = "UnsupportedParameter";
/// Value of a `MissingExpression` sentinel.
pub const UNSUPPORTED_PRIMARY: &str = "Unsupported Primary Expression";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NodeKind {
    Program,
    FunctionDeclaration,
    Parameter,
    ReturnStatement,
    FunctionBody,
    Expression,
    Term,
    Operator,
    Identifier,
    Integer,
    MissingExpression,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Program => "Program",
            NodeKind::FunctionDeclaration => "FunctionDeclaration",
            NodeKind::Parameter => "Parameter",
            NodeKind::ReturnStatement => "ReturnStatement",
            NodeKind::FunctionBody => "FunctionBody",
            NodeKind::Expression => "Expression",
            NodeKind::Term => "Term",
            NodeKind::Operator => "Operator",
            NodeKind::Identifier => "Identifier",
            NodeKind::Integer => "Integer",
            NodeKind::MissingExpression => "MissingExpression",
        }
    }
}

/// A tree node. Binary expressions are `Expression { value: op }` with exactly
/// two children, `[left, right]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub value: String,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(kind: NodeKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
            children: Vec::new(),
        }
    }

    pub fn program() -> Self {
        Self::new(NodeKind::Program, "")
    }

    pub fn binary(op: impl Into<String>, left: Node, right: Node) -> Self {
        Self {
            kind: NodeKind::Expression,
            value: op.into(),
            children: vec![left, right],
        }
    }

    pub fn missing_expression() -> Self {
        Self::new(NodeKind::MissingExpression, UNSUPPORTED_PRIMARY)
    }

    pub fn add_child(&mut self, child: Node) {
        self.children.push(child);
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.add_child(child);
        self
    }

    pub fn is_missing(&self) -> bool {
        self.kind == NodeKind::MissingExpression
    }

    /// True for any node the parser produced in place of something it could not recognize.
    pub fn is_placeholder(&self) -> bool {
        match self.kind {
            NodeKind::MissingExpression => true,
            NodeKind::ReturnStatement => self.value == UNSUPPORTED_STATEMENT,
            NodeKind::FunctionDeclaration => self.value == UNSUPPORTED_FUNCTION,
            NodeKind::Parameter => self.value == UNSUPPORTED_PARAMETER,
            _ => false,
        }
    }

    /// Pre-order walk over this node and all of its descendants.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Node)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }

    pub fn placeholders(&self) -> Vec<&Node> {
        let mut found = Vec::new();
        self.walk(&mut |node| {
            if node.is_placeholder() {
                found.push(node);
            }
        });
        found
    }

    pub fn to_json(&self) -> Value {
        json!({
            "kind": self.kind.as_str(),
            "value": self.value,
            "children": self.children.iter().map(|c| c.to_json()).collect::<Vec<_>>(),
        })
    }
}

// Long operator chains fold into left-deep trees; tear them down without recursing.
impl Drop for Node {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}
