use std::cell::RefCell;
use std::rc::Rc;

use encoding_rs::Encoding;
use html5ever::interface::{Attribute, QualName};
use html5ever::tendril::{format_tendril, StrTendril, TendrilSink};
use html5ever::tree_builder::create_element;
use html5ever::{namespace_url, ns, parse_document, parse_fragment, LocalName};
use markup5ever_rcdom::{Handle, Node, NodeData, RcDom};

use crate::core::{AutolinkError, AutolinkResult};

use super::utils::is_full_document;

/// 输入标记的类型
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocumentKind {
    /// 正文片段（文章内容），按 `<body>` 上下文解析
    Fragment,
    /// 完整HTML文档
    Document,
}

/// 解析后的标记及其类型
pub struct ParsedMarkup {
    pub dom: RcDom,
    pub kind: DocumentKind,
}

impl ParsedMarkup {
    /// 获取内容根节点
    ///
    /// 片段模式下是解析器生成的 `<html>` 容器（其子节点即片段内容），
    /// 文档模式下是文档节点本身。
    pub fn content_root(&self) -> AutolinkResult<Handle> {
        match self.kind {
            DocumentKind::Document => Ok(self.dom.document.clone()),
            DocumentKind::Fragment => get_child_node_by_name(&self.dom.document, "html")
                .ok_or_else(|| AutolinkError::Parse("片段解析未产生根元素".to_string())),
        }
    }
}

/// 按指定字符集将字节解码为字符串
///
/// 无法识别的字符集按 UTF-8 (有损) 处理
pub fn decode_markup(data: &[u8], document_encoding: &str) -> String {
    if let Some(encoding) = Encoding::for_label(document_encoding.as_bytes()) {
        let (string, _, _) = encoding.decode(data);
        string.to_string()
    } else {
        String::from_utf8_lossy(data).to_string()
    }
}

/// 将 HTML 标记解析为 DOM
///
/// 解析是宽松的：html5ever 会为任何畸形输入构建尽力而为的树。
/// 只有连尽力而为的树都无法得到时才返回错误，调用方应原样返回输入。
pub fn html_to_dom(markup: &str) -> AutolinkResult<ParsedMarkup> {
    let kind = if is_full_document(markup) {
        DocumentKind::Document
    } else {
        DocumentKind::Fragment
    };

    let dom = match kind {
        DocumentKind::Document => parse_document(RcDom::default(), Default::default())
            .from_utf8()
            .read_from(&mut markup.as_bytes())?,
        DocumentKind::Fragment => parse_fragment(
            RcDom::default(),
            Default::default(),
            QualName::new(None, ns!(html), LocalName::from("body")),
            vec![],
        )
        .from_utf8()
        .read_from(&mut markup.as_bytes())?,
    };

    let parsed = ParsedMarkup { dom, kind };
    // Fail early if the tree has no usable root
    parsed.content_root()?;

    Ok(parsed)
}

/// 查找指定路径的DOM节点
pub fn find_nodes(node: &Handle, node_names: Vec<&str>) -> Vec<Handle> {
    let mut found_nodes = Vec::new();

    let Some(node_name) = node_names.first().copied() else {
        return found_nodes;
    };

    if node_names.len() == 1 {
        if get_node_name(node) == Some(node_name) {
            found_nodes.push(node.clone());
        }

        for child_node in node.children.borrow().iter() {
            found_nodes.append(&mut find_nodes(child_node, node_names.clone()));
        }
    } else if get_node_name(node) == Some(node_name) {
        let mut new_node_names = node_names;
        new_node_names.remove(0);
        found_nodes.append(&mut find_nodes(node, new_node_names));
    } else {
        for child_node in node.children.borrow().iter() {
            found_nodes.append(&mut find_nodes(child_node, node_names.clone()));
        }
    }

    found_nodes
}

/// 根据名称获取子节点
pub fn get_child_node_by_name(parent: &Handle, node_name: &str) -> Option<Handle> {
    let children = parent.children.borrow();
    let matching_children = children.iter().find(|child| match child.data {
        NodeData::Element { ref name, .. } => &*name.local == node_name,
        _ => false,
    });
    matching_children.cloned()
}

/// 获取节点属性值
pub fn get_node_attr(node: &Handle, attr_name: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => {
            for attr in attrs.borrow().iter() {
                if &*attr.name.local == attr_name {
                    return Some(attr.value.to_string());
                }
            }
            None
        }
        _ => None,
    }
}

/// 获取节点名称
pub fn get_node_name(node: &Handle) -> Option<&'_ str> {
    match &node.data {
        NodeData::Element { name, .. } => Some(name.local.as_ref()),
        _ => None,
    }
}

/// 获取父节点
///
/// 父节点引用只用于查找，不持有所有权
pub fn get_parent_node(child: &Handle) -> Option<Handle> {
    let weak_parent = child.parent.take();
    let parent = weak_parent.as_ref().and_then(|node| node.upgrade());
    child.parent.set(weak_parent);
    parent
}

/// 设置节点属性，`None` 表示删除该属性
pub fn set_node_attr(node: &Handle, attr_name: &str, attr_value: Option<String>) {
    let NodeData::Element { attrs, .. } = &node.data else {
        return;
    };
    let mut attrs = attrs.borrow_mut();

    match attr_value {
        Some(value) => {
            if let Some(attr) = attrs
                .iter_mut()
                .find(|attr| &*attr.name.local == attr_name)
            {
                attr.value = StrTendril::from(value.as_str());
            } else {
                attrs.push(Attribute {
                    name: QualName::new(None, ns!(), LocalName::from(attr_name)),
                    value: StrTendril::from(value.as_str()),
                });
            }
        }
        None => attrs.retain(|attr| &*attr.name.local != attr_name),
    }
}

/// 创建文本节点
pub fn create_text_node(text: &str) -> Handle {
    Node::new(NodeData::Text {
        contents: RefCell::new(StrTendril::from(text)),
    })
}

/// 获取文本节点内容
pub fn get_text_content(node: &Handle) -> Option<String> {
    match &node.data {
        NodeData::Text { contents } => Some(contents.borrow().to_string()),
        _ => None,
    }
}

/// 创建包含单个文本子节点的 `<a>` 元素
pub fn create_anchor(dom: &RcDom, text: &str, href: &str) -> Handle {
    let anchor = create_element(
        dom,
        QualName::new(None, ns!(html), LocalName::from("a")),
        vec![Attribute {
            name: QualName::new(None, ns!(), LocalName::from("href")),
            value: format_tendril!("{}", href),
        }],
    );

    append_child(&anchor, create_text_node(text));

    anchor
}

/// 追加子节点
pub fn append_child(parent: &Handle, child: Handle) {
    child.parent.set(Some(Rc::downgrade(parent)));
    parent.children.borrow_mut().push(child);
}

/// 用一组新节点替换父节点中的某个子节点
///
/// 如果 `old` 不是 `parent` 的子节点，不做任何修改并返回 `false`
pub fn replace_child(parent: &Handle, old: &Handle, replacements: Vec<Handle>) -> bool {
    let mut children = parent.children.borrow_mut();

    let Some(index) = children.iter().position(|child| Rc::ptr_eq(child, old)) else {
        return false;
    };

    for node in replacements.iter() {
        node.parent.set(Some(Rc::downgrade(parent)));
    }
    children.splice(index..index + 1, replacements);
    old.parent.set(None);

    true
}
