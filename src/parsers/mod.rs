//! # 解析器模块
//!
//! - `html` - HTML文档解析、DOM操作、序列化以及链接插入遍历

pub mod html;

// Re-export commonly used items for convenience
pub use html::{html_to_dom, serialize_document, LinkWalker};
