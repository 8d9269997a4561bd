//! Markdown generation: HTML → Markdown, then optional link/image rewriting.
//!
//! `html2md` does the conversion. When the config asks for anything other
//! than the default link-preserving output, the Markdown is re-parsed with
//! pulldown-cmark and only the link and image spans are spliced by byte
//! offset. Everything else in the document is left exactly as generated.

use std::collections::HashMap;
use std::ops::Range;

use pulldown_cmark::{Event, LinkType, Options, Parser, Tag, TagEnd};

/// Options controlling how links and images appear in the output.
///
/// The default keeps both as ordinary inline Markdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarkdownConfig {
    /// Replace each link with its text.
    pub ignore_links: bool,
    /// Remove images entirely.
    pub ignore_images: bool,
    /// Replace inline links with `text⟨n⟩` and append a reference list.
    pub citations: bool,
}

impl MarkdownConfig {
    fn rewrites(&self) -> bool {
        self.ignore_links || self.ignore_images || self.citations
    }
}

/// Converts an HTML document to Markdown according to `config`.
pub fn convert(html: &str, config: &MarkdownConfig) -> String {
    let markdown = html2md::parse_html(html);
    if config.rewrites() {
        rewrite_links(&markdown, config)
    } else {
        markdown
    }
}

/// A replacement of `range` in the source Markdown.
struct Edit {
    range: Range<usize>,
    replacement: String,
}

enum Construct {
    Link {
        /// Autolinks and email links, whose text is the destination itself.
        bare: bool,
        dest: String,
        title: String,
    },
    Image,
}

/// An open link or image while walking the event stream.
struct Frame {
    construct: Construct,
    range: Range<usize>,
    /// Byte span covered by child events, i.e. the link text.
    inner: Option<Range<usize>>,
    /// Edits made to nested constructs.
    edits: Vec<Edit>,
}

impl Frame {
    fn new(construct: Construct, range: Range<usize>) -> Self {
        Self {
            construct,
            range,
            inner: None,
            edits: Vec::new(),
        }
    }

    fn cover(&mut self, range: &Range<usize>) {
        self.inner = Some(match self.inner.take() {
            Some(inner) => inner.start.min(range.start)..inner.end.max(range.end),
            None => range.clone(),
        });
    }

    /// Inner text with nested edits applied.
    fn text(&self, source: &str) -> String {
        match &self.inner {
            Some(inner) => splice(&source[inner.clone()], inner.start, &self.edits),
            None => String::new(),
        }
    }

    /// Pushes this frame's edits onto `out`: either one edit replacing the
    /// whole construct, or the nested edits unchanged if it is kept.
    fn resolve(
        self,
        source: &str,
        config: &MarkdownConfig,
        references: &mut References,
        out: &mut Vec<Edit>,
    ) {
        let replacement = match &self.construct {
            Construct::Image if config.ignore_images => Some(String::new()),
            Construct::Link { .. } if config.ignore_links => Some(self.text(source)),
            Construct::Link {
                bare: false,
                dest,
                title,
            } if config.citations && !dest.is_empty() => {
                let n = references.cite(dest, title);
                Some(format!("{}⟨{n}⟩", self.text(source)))
            }
            _ => None,
        };

        match replacement {
            Some(replacement) => out.push(Edit {
                range: self.range,
                replacement,
            }),
            None => out.extend(self.edits),
        }
    }
}

/// Citation numbering, first occurrence wins.
#[derive(Default)]
struct References {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl References {
    fn cite(&mut self, dest: &str, title: &str) -> usize {
        if let Some(&n) = self.index.get(dest) {
            return n;
        }
        self.entries.push((dest.to_string(), title.to_string()));
        let n = self.entries.len();
        self.index.insert(dest.to_string(), n);
        n
    }

    fn render(&self) -> String {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, (dest, title))| {
                if title.is_empty() {
                    format!("⟨{}⟩ {dest}", i + 1)
                } else {
                    format!("⟨{}⟩ {dest}: {title}", i + 1)
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Copies `source` (which starts at byte `base` of the document) with
/// `edits` applied. Edits must be in document order and non-overlapping.
fn splice(source: &str, base: usize, edits: &[Edit]) -> String {
    let mut out = String::with_capacity(source.len());
    let mut cursor = 0;
    for edit in edits {
        let start = edit.range.start - base;
        out.push_str(&source[cursor..start]);
        out.push_str(&edit.replacement);
        cursor = edit.range.end - base;
    }
    out.push_str(&source[cursor..]);
    out
}

/// Rewrites links and images in `markdown` according to `config`.
///
/// With `citations`, a `## References` section is appended when at least
/// one link was cited.
pub fn rewrite_links(markdown: &str, config: &MarkdownConfig) -> String {
    let options = Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES | Options::ENABLE_TASKLISTS;

    let mut stack: Vec<Frame> = Vec::new();
    let mut edits: Vec<Edit> = Vec::new();
    let mut references = References::default();

    for (event, range) in Parser::new_ext(markdown, options).into_offset_iter() {
        match event {
            Event::Start(Tag::Link {
                link_type,
                dest_url,
                title,
                ..
            }) => {
                if let Some(parent) = stack.last_mut() {
                    parent.cover(&range);
                }
                let construct = Construct::Link {
                    bare: matches!(link_type, LinkType::Autolink | LinkType::Email),
                    dest: dest_url.to_string(),
                    title: title.to_string(),
                };
                stack.push(Frame::new(construct, range));
            }
            Event::Start(Tag::Image { .. }) => {
                if let Some(parent) = stack.last_mut() {
                    parent.cover(&range);
                }
                stack.push(Frame::new(Construct::Image, range));
            }
            Event::End(TagEnd::Link | TagEnd::Image) => {
                let Some(frame) = stack.pop() else {
                    continue;
                };
                // Anything inside an image that is being dropped goes with it,
                // and must not leave a citation behind.
                if config.ignore_images
                    && stack.iter().any(|f| matches!(f.construct, Construct::Image))
                {
                    continue;
                }
                let out = match stack.last_mut() {
                    Some(parent) => &mut parent.edits,
                    None => &mut edits,
                };
                frame.resolve(markdown, config, &mut references, out);
            }
            _ => {
                if let Some(frame) = stack.last_mut() {
                    frame.cover(&range);
                }
            }
        }
    }

    let body = splice(markdown, 0, &edits);
    if references.entries.is_empty() {
        body
    } else {
        format!(
            "{}\n\n## References\n\n{}",
            body.trim_end(),
            references.render()
        )
    }
}

#[cfg(test)]
#[path = "markdown_tests.rs"]
mod tests;
