use crate::domain::model::ConfigNode;
use roxmltree::{Document, Node};

/// 把外掛設定的 XML 文字轉成設定樹；屬性不保留
pub fn parse_configuration(xml: &str) -> Result<ConfigNode, roxmltree::Error> {
    let doc = Document::parse(xml)?;
    Ok(to_node(doc.root_element()))
}

fn to_node(element: Node<'_, '_>) -> ConfigNode {
    let mut node = ConfigNode::new(element.tag_name().name());

    let text: String = element
        .children()
        .filter(|c| c.is_text())
        .filter_map(|c| c.text())
        .collect();
    let text = text.trim();
    if !text.is_empty() {
        node.value = Some(text.to_string());
    }

    for child in element.children().filter(|c| c.is_element()) {
        node.add_child(to_node(child));
    }

    node
}
