// src/formatting/rich_text.rs
//! Inline rich text → markdown.

use notion_client::objects::rich_text::{Annotations, RichText};

/// Renders a run of rich text fragments as one markdown string.
pub fn rich_text_to_markdown(items: &[RichText]) -> String {
    items.iter().map(render_fragment).collect()
}

/// Concatenates the unstyled text of every fragment.
pub fn rich_text_to_plain(items: &[RichText]) -> String {
    items
        .iter()
        .map(|item| match item {
            RichText::Text {
                text, plain_text, ..
            } => plain_text.clone().unwrap_or_else(|| text.content.clone()),
            RichText::Mention { plain_text, .. } | RichText::Equation { plain_text, .. } => {
                plain_text.clone()
            }
            _ => String::new(),
        })
        .collect()
}

fn render_fragment(item: &RichText) -> String {
    match item {
        RichText::Text {
            text,
            annotations,
            plain_text,
            href,
        } => {
            let content = plain_text.clone().unwrap_or_else(|| text.content.clone());
            let link = text
                .link
                .as_ref()
                .map(|link| link.url.clone())
                .or_else(|| href.clone());
            apply_styles(&content, annotations.as_ref(), link.as_deref())
        }
        RichText::Mention {
            annotations,
            plain_text,
            href,
            ..
        } => apply_styles(plain_text, Some(annotations), href.as_deref()),
        RichText::Equation { equation, .. } => format!("${}$", equation.expression),
        _ => {
            log::debug!("Skipping unsupported rich text fragment");
            String::new()
        }
    }
}

/// Wraps `content` in markdown for its annotations, then in a link.
fn apply_styles(content: &str, annotations: Option<&Annotations>, link: Option<&str>) -> String {
    // Markers around whitespace-only runs render as literal asterisks.
    if content.trim().is_empty() {
        return content.to_string();
    }

    let mut result = content.to_string();

    if let Some(style) = annotations {
        // Code first: the other markers must wrap the backticks, not sit inside them
        if style.code {
            result = format!("`{}`", result);
        }
        if style.strikethrough {
            result = format!("~~{}~~", result);
        }
        if style.bold {
            result = format!("**{}**", result);
        }
        if style.italic {
            result = format!("*{}*", result);
        }
        if style.underline {
            result = format!("<u>{}</u>", result);
        }
    }

    match link {
        Some(url) => format!("[{}]({})", result, url),
        None => result,
    }
}
