use html5ever::serialize::{serialize, SerializeOpts, TraversalScope};
use markup5ever_rcdom::SerializableHandle;

use crate::core::{AutolinkError, AutolinkResult};

use super::dom::{DocumentKind, ParsedMarkup};

/// 序列化文档
///
/// 片段模式只输出片段内容（不带解析器补全的 `<html>` 容器），
/// 文档模式输出整个文档。
pub fn serialize_document(parsed: &ParsedMarkup) -> AutolinkResult<String> {
    let mut buf: Vec<u8> = Vec::new();

    let root = parsed.content_root()?;
    let serializable: SerializableHandle = root.into();
    let opts = match parsed.kind {
        DocumentKind::Document => SerializeOpts::default(),
        DocumentKind::Fragment => SerializeOpts {
            traversal_scope: TraversalScope::ChildrenOnly(None),
            ..Default::default()
        },
    };

    serialize(&mut buf, &serializable, opts)?;

    String::from_utf8(buf)
        .map_err(|e| AutolinkError::Serialize(format!("序列化结果不是有效的UTF-8: {}", e)))
}
