use regex::{Captures, Regex};
use std::sync::OnceLock;

/// Fenced code blocks lifted out of the working buffer.
///
/// Each block is replaced by a one-line `<pre><code>` placeholder holding
/// its slot number between NUL bytes. Later stages cannot match inside the
/// placeholder, and the paragraph stage sees a single markup line. The
/// escape stage removes every NUL from the input, so placeholders never
/// collide with document text.
#[derive(Debug, Default)]
pub struct FenceStash {
    blocks: Vec<String>,
}

impl FenceStash {
    pub const FENCE: &'static str = "```";
    pub const OPEN: &'static str = "<pre><code>";
    pub const CLOSE: &'static str = "</code></pre>";

    /// Moves every fenced block of `buf` into the stash.
    ///
    /// A fence opens at the start of a line and closes at the next triple
    /// backtick, wherever it is. Everything in between, newlines and any
    /// info string included, is kept verbatim.
    pub fn extract(&mut self, buf: &str) -> String {
        static FENCED: OnceLock<Regex> = OnceLock::new();
        let re = FENCED
            .get_or_init(|| Regex::new(r"(?ms)^```(.*?)```").expect("Invalid code fence regex"));

        re.replace_all(buf, |caps: &Captures| {
            let slot = self.blocks.len();
            self.blocks.push(caps[1].to_string());
            format!("{}\0{slot}\0{}", Self::OPEN, Self::CLOSE)
        })
        .into_owned()
    }

    /// Puts the stashed blocks back in place of their placeholders.
    pub fn restore(&self, buf: &str) -> String {
        if self.blocks.is_empty() {
            return buf.to_string();
        }

        static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
        let re = PLACEHOLDER
            .get_or_init(|| Regex::new(r"\x00(\d+)\x00").expect("Invalid placeholder regex"));

        re.replace_all(buf, |caps: &Captures| {
            caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|slot| self.blocks.get(slot))
                .cloned()
                .unwrap_or_default()
        })
        .into_owned()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// `#`, `##` and `###` headings. Deeper levels are left as text.
pub fn headers(buf: &str) -> String {
    static HEADERS: OnceLock<Vec<(u8, Regex)>> = OnceLock::new();
    let levels = HEADERS.get_or_init(|| {
        (1..=3u8)
            .map(|level| {
                let pattern = format!(r"(?mR)^{} (.*)$", "#".repeat(level as usize));
                (level, Regex::new(&pattern).expect("Invalid header regex"))
            })
            .collect()
    });

    let mut out = buf.to_string();
    for (level, re) in levels {
        out = re
            .replace_all(&out, format!("<h{level}>${{1}}</h{level}>").as_str())
            .into_owned();
    }
    out
}

/// `- item` lines become `<li>` tags, then each run of items is folded
/// into one `<ul>` line.
///
/// Empty lines inside a run do not break it; a line holding only spaces
/// does. Newlines after the run stay
/// after the closing `</ul>`.
pub fn unordered_lists(buf: &str) -> String {
    static ITEM: OnceLock<Regex> = OnceLock::new();
    static RUN: OnceLock<Regex> = OnceLock::new();
    let item = ITEM.get_or_init(|| Regex::new(r"(?mR)^- (.*)$").expect("Invalid list item regex"));
    let run = RUN.get_or_init(|| {
        Regex::new(r"(?:<li>.*?</li>(?:\r?\n)*)+").expect("Invalid list run regex")
    });

    let items = item.replace_all(buf, "<li>${1}</li>");
    run.replace_all(&items, |caps: &Captures| {
        let whole = &caps[0];
        let body = whole.trim_end_matches(['\r', '\n']);
        let trailing = &whole[body.len()..];
        let items: String = body
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        format!("<ul>{items}</ul>{trailing}")
    })
    .into_owned()
}
