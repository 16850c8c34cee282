use std::collections::{BTreeMap, HashMap};

use ego_tree::{NodeId, NodeRef, Tree};
use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};

/// Presentation properties the sieve may override on a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StyleProperty {
    Visibility,
    Height,
    Overflow,
    Margin,
    Padding,
}

impl StyleProperty {
    pub fn css_name(self) -> &'static str {
        match self {
            StyleProperty::Visibility => "visibility",
            StyleProperty::Height => "height",
            StyleProperty::Overflow => "overflow",
            StyleProperty::Margin => "margin",
            StyleProperty::Padding => "padding",
        }
    }
}

/// Structural change record, delivered in the order the changes happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// Subtree roots inserted into the document.
    Added(Vec<NodeId>),
    /// Subtree roots detached from the document. Their nodes stay readable.
    Removed(Vec<NodeId>),
    Navigated(String),
}

/// The host page: a parsed tree that can grow and shrink, a location, and an
/// inline-style override layer on top of the page's own styling.
#[derive(Debug)]
pub struct Document {
    html: Html,
    location: String,
    overrides: HashMap<NodeId, BTreeMap<StyleProperty, String>>,
    mutations: Vec<Mutation>,
}

impl Document {
    pub fn parse(html: &str, location: impl Into<String>) -> Self {
        Self {
            html: Html::parse_document(html),
            location: location.into(),
            overrides: HashMap::new(),
            mutations: Vec::new(),
        }
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    /// In-page navigation; the tree is left as is.
    pub fn navigate(&mut self, location: impl Into<String>) {
        self.location = location.into();
        self.mutations.push(Mutation::Navigated(self.location.clone()));
    }

    pub fn root(&self) -> NodeId {
        self.html.tree.root().id()
    }

    /// The `<body>` element, or the root element for documents without one.
    pub fn body(&self) -> NodeId {
        Selector::parse("body")
            .ok()
            .and_then(|sel| self.html.select(&sel).next())
            .unwrap_or_else(|| self.html.root_element())
            .id()
    }

    pub fn element(&self, id: NodeId) -> Option<ElementRef<'_>> {
        self.html.tree.get(id).and_then(ElementRef::wrap)
    }

    pub fn is_attached(&self, id: NodeId) -> bool {
        let root = self.root();
        self.html
            .tree
            .get(id)
            .is_some_and(|node| node.id() == root || node.ancestors().any(|a| a.id() == root))
    }

    /// Attached elements matching `selector`, in document order.
    pub fn select(&self, selector: &Selector) -> Vec<NodeId> {
        // Walk from the root: the arena still holds detached subtrees.
        self.html
            .tree
            .root()
            .descendants()
            .filter_map(ElementRef::wrap)
            .filter(|el| selector.matches(el))
            .map(|el| el.id())
            .collect()
    }

    /// `id` itself (when it matches) followed by matching descendants.
    /// Works on detached subtrees as well.
    pub fn select_within(&self, id: NodeId, selector: &Selector) -> Vec<NodeId> {
        let Some(element) = self.element(id) else {
            return Vec::new();
        };
        let mut found = Vec::new();
        if selector.matches(&element) {
            found.push(id);
        }
        found.extend(element.select(selector).map(|el| el.id()));
        found
    }

    /// Element carrying the given `id` attribute.
    pub fn find_by_dom_id(&self, dom_id: &str) -> Option<NodeId> {
        self.html
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .find(|el| el.value().id() == Some(dom_id))
            .map(|el| el.id())
    }

    /// Parses `fragment` and appends its top-level nodes to `parent`.
    /// Returns the inserted subtree roots.
    pub fn append_html(&mut self, parent: NodeId, fragment: &str) -> Vec<NodeId> {
        if !self.is_attached(parent) {
            return Vec::new();
        }
        let parsed = Html::parse_fragment(fragment);
        let added: Vec<NodeId> = parsed
            .root_element()
            .children()
            .filter_map(|child| graft(&mut self.html.tree, parent, child))
            .collect();
        if !added.is_empty() {
            self.mutations.push(Mutation::Added(added.clone()));
        }
        added
    }

    /// Detaches a subtree. The root node cannot be removed.
    pub fn remove(&mut self, id: NodeId) -> bool {
        if id == self.root() || !self.is_attached(id) {
            return false;
        }
        let Some(mut node) = self.html.tree.get_mut(id) else {
            return false;
        };
        node.detach();
        self.mutations.push(Mutation::Removed(vec![id]));
        true
    }

    /// Drains the change records accumulated since the last call.
    pub fn take_mutations(&mut self) -> Vec<Mutation> {
        std::mem::take(&mut self.mutations)
    }

    pub fn style(&self, id: NodeId, property: StyleProperty) -> Option<&str> {
        self.overrides
            .get(&id)
            .and_then(|decls| decls.get(&property))
            .map(String::as_str)
    }

    /// Sets all declarations in one step.
    pub fn set_styles(&mut self, id: NodeId, declarations: &[(StyleProperty, &str)]) {
        let decls = self.overrides.entry(id).or_default();
        for (property, value) in declarations {
            decls.insert(*property, (*value).to_string());
        }
    }

    /// Removes the overrides so the page's own styling applies again.
    pub fn clear_styles(&mut self, id: NodeId, properties: &[StyleProperty]) {
        if let Some(decls) = self.overrides.get_mut(&id) {
            for property in properties {
                decls.remove(property);
            }
            if decls.is_empty() {
                self.overrides.remove(&id);
            }
        }
    }

    /// Override layer for a node rendered as a CSS declaration list.
    pub fn inline_style(&self, id: NodeId) -> String {
        self.overrides
            .get(&id)
            .map(|decls| {
                decls
                    .iter()
                    .map(|(property, value)| format!("{}: {value}", property.css_name()))
                    .collect::<Vec<_>>()
                    .join("; ")
            })
            .unwrap_or_default()
    }
}

fn graft(tree: &mut Tree<Node>, parent: NodeId, source: NodeRef<'_, Node>) -> Option<NodeId> {
    let id = tree.get_mut(parent)?.append(source.value().clone()).id();
    for child in source.children() {
        graft(tree, id, child);
    }
    Some(id)
}
