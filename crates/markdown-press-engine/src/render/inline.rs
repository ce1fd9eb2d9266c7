use regex::Regex;
use std::sync::OnceLock;

/// `` `code` `` on a single line, at least one character long.
pub fn code_spans(buf: &str) -> String {
    static CODE_SPAN: OnceLock<Regex> = OnceLock::new();
    let re = CODE_SPAN.get_or_init(|| Regex::new(r"`([^`\n]+)`").expect("Invalid code span regex"));
    re.replace_all(buf, "<code>${1}</code>").into_owned()
}

/// `**strong**`. Must run before [`italic`].
pub fn bold(buf: &str) -> String {
    static BOLD: OnceLock<Regex> = OnceLock::new();
    let re = BOLD.get_or_init(|| Regex::new(r"\*\*(.+?)\*\*").expect("Invalid bold regex"));
    re.replace_all(buf, "<strong>${1}</strong>").into_owned()
}

/// `*emphasis*`.
pub fn italic(buf: &str) -> String {
    static ITALIC: OnceLock<Regex> = OnceLock::new();
    let re = ITALIC.get_or_init(|| Regex::new(r"\*(.+?)\*").expect("Invalid italic regex"));
    re.replace_all(buf, "<em>${1}</em>").into_owned()
}

/// `![alt](src)`. Must run before [`links`], which would otherwise eat the
/// bracket pair and leave a stray `!`.
pub fn images(buf: &str) -> String {
    static IMAGE: OnceLock<Regex> = OnceLock::new();
    let re = IMAGE
        .get_or_init(|| Regex::new(r"!\[(.*?)\]\((.*?)\)").expect("Invalid image regex"));
    re.replace_all(buf, r#"<img src="${2}" alt="${1}" />"#)
        .into_owned()
}

/// `[text](href)`.
pub fn links(buf: &str) -> String {
    static LINK: OnceLock<Regex> = OnceLock::new();
    let re = LINK.get_or_init(|| Regex::new(r"\[(.*?)\]\((.*?)\)").expect("Invalid link regex"));
    re.replace_all(buf, r#"<a href="${2}">${1}</a>"#).into_owned()
}
