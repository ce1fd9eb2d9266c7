/// Escapes raw Markdown so no source character can be read as markup.
///
/// `&`, `<`, `>`, `"` and `'` become entities. NUL becomes U+FFFD, which
/// also keeps NUL free for the fenced-code placeholders.
pub fn escape_html(text: &str) -> String {
    html_escape::encode_quoted_attribute(text).replace('\0', "\u{FFFD}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn escapes_markup_characters() {
        let escaped = escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#);

        assert!(escaped.starts_with("&lt;a href="));
        assert!(escaped.contains("Tom &amp; "));
        assert!(escaped.ends_with("&lt;/a&gt;"));
        assert!(!escaped.contains(['<', '>', '"', '\'']));
    }

    #[test]
    fn leaves_markdown_syntax_alone() {
        let md = "# Title\n**bold** `code` [x](y) - item";
        assert_eq!(escape_html(md), md);
    }

    #[test]
    fn replaces_nul() {
        assert_eq!(escape_html("a\0b"), "a\u{FFFD}b");
    }
}
