//! HTML解析和处理模块
//!
//! - `utils`: 基础工具函数和常量
//! - `dom`: 解析与基础DOM操作
//! - `serializer`: 序列化功能
//! - `walker`: 插入链接的DOM遍历

pub mod dom;
pub mod serializer;
pub mod utils;
pub mod walker;

pub use dom::{
    create_anchor, create_text_node, decode_markup, find_nodes, get_child_node_by_name,
    get_node_attr, get_node_name, get_parent_node, get_text_content, html_to_dom, replace_child,
    set_node_attr, DocumentKind, ParsedMarkup,
};
pub use serializer::serialize_document;
pub use utils::{is_full_document, is_word_char, HEADING_TAGS, NEVER_LINK_ELEMENTS};
pub use walker::{LinkWalker, WalkFlow};
