// src/formatting/projector.rs
//! Flattens a markdown block tree into display lines.

use crate::model::MarkdownBlock;

/// Indent unit applied per nesting level to list-like lines.
const INDENT: &str = "  ";

/// Projects `blocks` depth-first into a flat list of lines.
///
/// Only lines starting with `-` are indented, by two spaces per level below
/// the top; everything else is emitted as-is at every depth. A block's
/// children follow it immediately.
pub fn blocks_to_markdown(blocks: &[MarkdownBlock], indent_level: usize) -> Vec<String> {
    let mut lines = Vec::new();
    project_into(blocks, indent_level, &mut lines);
    lines
}

fn project_into(blocks: &[MarkdownBlock], depth: usize, lines: &mut Vec<String>) {
    for block in blocks {
        if depth > 0 && block.text.starts_with('-') {
            lines.push(format!("{}{}", INDENT.repeat(depth), block.text));
        } else {
            lines.push(block.text.clone());
        }
        project_into(&block.children, depth + 1, lines);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn item(text: &str) -> MarkdownBlock {
        MarkdownBlock::new(text)
    }

    #[test]
    fn nested_list_items_are_indented() {
        let blocks = vec![item("- item").with_children(vec![item("- sub")])];
        assert_eq!(blocks_to_markdown(&blocks, 0), vec!["- item", "  - sub"]);
    }

    #[test]
    fn non_list_children_are_not_indented() {
        let blocks = vec![item("- item").with_children(vec![item("para")])];
        assert_eq!(blocks_to_markdown(&blocks, 0), vec!["- item", "para"]);
    }

    #[test]
    fn starting_depth_applies_to_top_level() {
        let blocks = vec![item("- nested"), item("> quote")];
        assert_eq!(blocks_to_markdown(&blocks, 2), vec!["    - nested", "> quote"]);
    }

    #[test]
    fn empty_input_yields_no_lines() {
        assert!(blocks_to_markdown(&[], 0).is_empty());
    }

    #[test]
    fn document_projection() {
        let blocks = vec![
            item("# Title"),
            item("Intro paragraph"),
            item("- one").with_children(vec![
                item("- one.a").with_children(vec![item("- one.a.i")]),
                item("detail"),
            ]),
            item("- [x] done"),
            item("---"),
        ];

        insta::assert_snapshot!(blocks_to_markdown(&blocks, 0).join("\n"), @r"
        # Title
        Intro paragraph
        - one
          - one.a
            - one.a.i
        detail
        - [x] done
        ---
        ");
    }
}
