//! Directory tree generation from flat relative paths.

use crate::domain::TreeStyle;
use std::cmp::Ordering;
use std::collections::BTreeMap;

struct Glyphs {
    branch: &'static str,
    last: &'static str,
    pipe: &'static str,
    blank: &'static str,
}

const UNICODE: Glyphs = Glyphs { branch: "├── ", last: "└── ", pipe: "│   ", blank: "    " };
const ASCII: Glyphs = Glyphs { branch: "|-- ", last: "`-- ", pipe: "|   ", blank: "    " };

impl TreeStyle {
    fn glyphs(&self) -> &'static Glyphs {
        match self {
            TreeStyle::Unicode => &UNICODE,
            TreeStyle::Ascii => &ASCII,
        }
    }
}

/// Nested view of a set of relative paths.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TreeNode {
    children: BTreeMap<String, TreeNode>,
}

impl TreeNode {
    pub fn from_paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut root = TreeNode::default();
        for path in paths {
            root.insert(path.as_ref());
        }
        root
    }

    /// Insert a `/`-separated relative path. Empty segments are ignored.
    pub fn insert(&mut self, relative_path: &str) {
        let mut node = self;
        for segment in relative_path.split('/').filter(|s| !s.is_empty() && *s != ".") {
            node = node.children.entry(segment.to_string()).or_default();
        }
    }

    fn is_dir(&self) -> bool {
        !self.children.is_empty()
    }

    /// Children in display order: case-insensitive by name, byte-wise tie break.
    fn sorted_children(&self) -> Vec<(&String, &TreeNode)> {
        let mut entries: Vec<_> = self.children.iter().collect();
        entries.sort_by(|a, b| compare_segments(a.0, b.0));
        entries
    }

    pub fn render(&self, style: TreeStyle) -> String {
        let mut lines = Vec::new();
        self.render_into(style.glyphs(), "", &mut lines);
        lines.join("\n")
    }

    fn render_into(&self, glyphs: &Glyphs, prefix: &str, lines: &mut Vec<String>) {
        let entries = self.sorted_children();
        let total_entries = entries.len();

        for (idx, (name, child)) in entries.into_iter().enumerate() {
            let is_last = idx == total_entries - 1;
            let connector = if is_last { glyphs.last } else { glyphs.branch };

            if child.is_dir() {
                lines.push(format!("{}{}{}/", prefix, connector, name));
                let extension = if is_last { glyphs.blank } else { glyphs.pipe };
                child.render_into(glyphs, &format!("{}{}", prefix, extension), lines);
            } else {
                lines.push(format!("{}{}{}", prefix, connector, name));
            }
        }
    }
}

fn compare_segments(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b))
}

/// Render tree art for a set of relative file paths.
///
/// The result depends only on the set of paths, not their order. An empty
/// set renders as an empty string.
pub fn render_tree<I, S>(paths: I, style: TreeStyle) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    TreeNode::from_paths(paths).render(style)
}
