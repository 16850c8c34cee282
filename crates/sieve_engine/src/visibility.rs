use ego_tree::NodeId;

use crate::document::{Document, StyleProperty};

/// Declarations that collapse an item so it takes no layout space.
pub const HIDE_BUNDLE: [(StyleProperty, &str); 5] = [
    (StyleProperty::Visibility, "hidden"),
    (StyleProperty::Height, "0"),
    (StyleProperty::Overflow, "hidden"),
    (StyleProperty::Margin, "0"),
    (StyleProperty::Padding, "0"),
];

/// Hides or shows a node. Showing removes the whole bundle rather than writing
/// explicit values, so the page's own styling takes over again.
pub fn apply_visibility(document: &mut Document, node: NodeId, hide: bool) {
    if hide {
        document.set_styles(node, &HIDE_BUNDLE);
    } else {
        let properties = HIDE_BUNDLE.map(|(property, _)| property);
        document.clear_styles(node, &properties);
    }
}

pub fn is_hidden(document: &Document, node: NodeId) -> bool {
    document.style(node, StyleProperty::Visibility) == Some("hidden")
}
