//! Script injection into the web client's index page.
//!
//! Inserts the client script tag before the page's closing body tag. A page
//! without one is served untouched; injection never fails.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

/// Route serving the client script. The injected tag prefixes it with the
/// service's public URL.
pub const SCRIPT_SRC: &str = "/GenreManager/script";

/// File name pattern registered with the host's transformation facility.
pub const INDEX_FILE_PATTERN: &str = r"index\.html";

const INDEX_SUFFIX: &str = "index.html";

static BODY_CLOSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</body>").expect("valid regex"));

/// The `<script>` tag inserted into the index page.
pub fn script_tag(src: &str) -> String {
    format!(
        r#"<script FileTransformation="true" plugin="GenreManager" defer="defer" src="{src}"></script>"#
    )
}

/// Insert `tag` immediately before the first `</body>` (any case).
///
/// Returns the input borrowed and unchanged when there is no closing body tag.
pub fn inject_script<'a>(html: &'a str, tag: &str) -> Cow<'a, str> {
    match BODY_CLOSE_RE.find(html) {
        Some(m) => {
            let mut out = String::with_capacity(html.len() + tag.len());
            out.push_str(&html[..m.start()]);
            out.push_str(tag);
            out.push_str(&html[m.start()..]);
            Cow::Owned(out)
        }
        None => Cow::Borrowed(html),
    }
}

/// Whether `file_name` names an index page: case-insensitive `index.html`
/// suffix, regardless of directory.
pub fn is_index_page(file_name: &str) -> bool {
    file_name.to_ascii_lowercase().ends_with(INDEX_SUFFIX)
}

/// Page transformation bound to the configured script tag.
#[derive(Debug, Clone)]
pub struct ScriptInjector {
    tag: String,
    enabled: bool,
}

impl ScriptInjector {
    pub fn new(script_src: &str, enabled: bool) -> Self {
        Self {
            tag: script_tag(script_src),
            enabled,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Transform a served page. Disabled injection, a non-index file name, or
    /// a page without `</body>` all leave the contents unchanged.
    pub fn transform<'a>(&self, file_name: Option<&str>, contents: &'a str) -> Cow<'a, str> {
        if !self.enabled || file_name.is_some_and(|name| !is_index_page(name)) {
            return Cow::Borrowed(contents);
        }
        inject_script(contents, &self.tag)
    }
}
