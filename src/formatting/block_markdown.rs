// src/formatting/block_markdown.rs
//! Block tree → markdown-equivalent lines.
//!
//! Each Notion block becomes exactly one [`MarkdownBlock`]. Nesting is kept
//! as-is; indentation is applied later by the projector.

use super::rich_text::{rich_text_to_markdown, rich_text_to_plain};
use crate::api::responses::BlockRecord;
use crate::model::{BlockNode, MarkdownBlock};
use notion_client::objects::block::{BlockType, Icon};
use notion_client::objects::emoji::Emoji;
use notion_client::objects::file::File;
use notion_client::objects::rich_text::RichText;

/// Converts a fetched block tree, preserving order and nesting.
pub fn convert_block_tree(nodes: &[BlockNode]) -> Vec<MarkdownBlock> {
    nodes.iter().map(convert_node).collect()
}

fn convert_node(node: &BlockNode) -> MarkdownBlock {
    let children = match &node.block.block_type {
        Some(BlockType::Table { table }) if table.has_column_header => {
            with_header_separator(convert_block_tree(node.children()), table.table_width as usize)
        }
        _ => convert_block_tree(node.children()),
    };
    MarkdownBlock::new(block_line(&node.block)).with_children(children)
}

/// The single line a block renders to, without its children.
fn block_line(block: &BlockRecord) -> String {
    let Some(block_type) = &block.block_type else {
        log::debug!("Rendering unrecognised '{}' block as an empty line", block.kind);
        return String::new();
    };
    match block_type {
        BlockType::Paragraph { paragraph } => rich_text_to_markdown(&paragraph.rich_text),
        BlockType::Heading1 { heading_1 } => {
            format!("# {}", rich_text_to_markdown(&heading_1.rich_text))
        }
        BlockType::Heading2 { heading_2 } => {
            format!("## {}", rich_text_to_markdown(&heading_2.rich_text))
        }
        BlockType::Heading3 { heading_3 } => {
            format!("### {}", rich_text_to_markdown(&heading_3.rich_text))
        }
        BlockType::BulletedListItem { bulleted_list_item } => {
            format!("- {}", rich_text_to_markdown(&bulleted_list_item.rich_text))
        }
        BlockType::NumberedListItem { numbered_list_item } => {
            format!("1. {}", rich_text_to_markdown(&numbered_list_item.rich_text))
        }
        BlockType::ToDo { to_do } => {
            let mark = if to_do.checked.unwrap_or(false) { "x" } else { " " };
            format!("- [{}] {}", mark, rich_text_to_markdown(&to_do.rich_text))
        }
        BlockType::Toggle { toggle } => format!("- {}", rich_text_to_markdown(&toggle.rich_text)),
        BlockType::Quote { quote } => format!("> {}", rich_text_to_markdown(&quote.rich_text)),
        BlockType::Callout { callout } => {
            let icon = match &callout.icon {
                Some(Icon::Emoji(Emoji::Emoji { emoji })) => format!("{} ", emoji),
                _ => String::new(),
            };
            format!("> {}{}", icon, rich_text_to_markdown(&callout.rich_text))
        }
        BlockType::Code { code } => {
            let language = format!("{:?}", code.language).to_lowercase();
            // Code bodies are verbatim; annotations inside a fence would leak as literal markers
            let mut fenced = format!(
                "```{}\n{}\n```",
                language,
                rich_text_to_plain(&code.rich_text)
            );
            if !code.caption.is_empty() {
                fenced.push_str(&format!("\n*{}*", rich_text_to_markdown(&code.caption)));
            }
            fenced
        }
        BlockType::Divider { .. } => "---".to_string(),
        BlockType::Equation { equation } => format!("$${}$$", equation.expression),
        BlockType::Image { image } => {
            let alt = Some(rich_text_to_plain(&block.caption))
                .filter(|caption| !caption.trim().is_empty())
                .unwrap_or_else(|| "Image".to_string());
            format!("![{}]({})", alt, file_url(&image.file_type))
        }
        BlockType::Video { video } => file_link(&video.file_type, &block.caption, "Video"),
        BlockType::File { file } => file_link(&file.file_type, &file.caption, "File"),
        BlockType::Pdf { pdf } => file_link(&pdf.file_type, &pdf.caption, "PDF"),
        BlockType::Bookmark { bookmark } => url_link(&bookmark.url),
        BlockType::Embed { embed } => url_link(&embed.url),
        BlockType::LinkPreview { link_preview } => url_link(&link_preview.url),
        BlockType::ChildPage { child_page } => format!("**{}**", child_page.title),
        BlockType::TableRow { table_row } => {
            let cells: Vec<String> = table_row
                .cells
                .iter()
                .map(|cell| rich_text_to_markdown(cell).replace('|', "\\|"))
                .collect();
            format!("| {} |", cells.join(" | "))
        }
        _ => {
            log::debug!("Rendering '{}' block as an empty line", block.kind);
            String::new()
        }
    }
}

/// Inserts `| --- | --- |` after the first row of a headed table.
fn with_header_separator(mut rows: Vec<MarkdownBlock>, width: usize) -> Vec<MarkdownBlock> {
    if rows.is_empty() {
        return rows;
    }
    let separator = vec!["---"; width.max(1)].join(" | ");
    rows.insert(1, MarkdownBlock::new(format!("| {} |", separator)));
    rows
}

fn file_url(file: &File) -> &str {
    match file {
        File::External { external } => &external.url,
        File::File { file } => &file.url,
    }
}

/// `[caption](url)`, falling back to the file name in the URL, then `fallback`.
fn file_link(file: &File, caption: &[RichText], fallback: &str) -> String {
    let url = file_url(file);
    let name = Some(rich_text_to_plain(caption))
        .filter(|caption| !caption.trim().is_empty())
        .or_else(|| file_name(url))
        .unwrap_or_else(|| fallback.to_string());
    format!("[{}]({})", name, url)
}

fn file_name(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    parsed
        .path_segments()?
        .filter(|segment| !segment.is_empty())
        .last()
        .map(str::to_string)
}

fn url_link(url: &str) -> String {
    format!("[{}]({})", url, url)
}
