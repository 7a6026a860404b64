/// 默认排除的标题标签
pub const HEADING_TAGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];

/// 无论配置如何都不会插入链接的元素
///
/// 这些元素的文本要么不是正文（脚本、样式），要么嵌入链接会改变其含义或产生无效HTML
pub const NEVER_LINK_ELEMENTS: &[&str] = &[
    "script", "style", "textarea", "title", "noscript", "template", "iframe", "svg", "math",
    "button", "select", "option", "code", "pre",
];

/// 锚点元素标签名
pub const ANCHOR_TAG: &str = "a";

/// 检查输入是否为完整的HTML文档（而不是正文片段）
///
/// 跳过开头的空白和注释后，以 `<!doctype` 或 `<html` 标签开头才算完整文档
pub fn is_full_document(markup: &str) -> bool {
    let mut rest = markup.trim_start();

    while let Some(comment) = rest.strip_prefix("<!--") {
        let Some(end) = comment.find("-->") else {
            return false;
        };
        rest = comment[end + 3..].trim_start();
    }

    starts_with_ignore_case(rest, "<!doctype") || starts_with_html_tag(rest)
}

fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    text.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

fn starts_with_html_tag(text: &str) -> bool {
    if !starts_with_ignore_case(text, "<html") {
        return false;
    }

    match text["<html".len()..].chars().next() {
        None => true,
        Some(c) => c == '>' || c == '/' || c.is_ascii_whitespace(),
    }
}

/// 检查是否为永不插入链接的元素
pub fn is_never_link_element(tag_name: &str) -> bool {
    NEVER_LINK_ELEMENTS.contains(&tag_name)
}

/// 检查字符是否属于单词字符（字母、数字、下划线）
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
