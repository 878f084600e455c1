use pulldown_cmark::{html, Event, Options, Parser};

const MARKDOWN_OPTIONS: Options = Options::ENABLE_TABLES
    .union(Options::ENABLE_FOOTNOTES)
    .union(Options::ENABLE_STRIKETHROUGH)
    .union(Options::ENABLE_TASKLISTS)
    .union(Options::ENABLE_SMART_PUNCTUATION);

/// Render a post body to sanitized HTML.
///
/// The editor produces HTML, but older posts may hold raw markdown; both
/// pass through `ammonia` before being injected into the page.
pub fn render_content(raw: &str) -> String {
    if looks_like_html(raw) {
        ammonia::clean(raw)
    } else {
        let parser = Parser::new_ext(raw, MARKDOWN_OPTIONS);
        let mut html_output = String::new();
        html::push_html(&mut html_output, parser);
        ammonia::clean(&html_output)
    }
}

/// Produce a plain-text preview of a post body: markup stripped and the
/// result truncated to at most `max_len` characters.
pub fn content_preview(raw: &str, max_len: usize) -> String {
    let text = if looks_like_html(raw) {
        // Strip every tag, keep the text content.
        ammonia::Builder::empty().clean(raw).to_string()
    } else {
        markdown_text(raw, max_len)
    };

    truncate_chars(text, max_len)
}

fn looks_like_html(raw: &str) -> bool {
    raw.trim_start().starts_with('<')
}

/// Walk markdown events collecting text until roughly `max_len` characters.
fn markdown_text(raw: &str, max_len: usize) -> String {
    let parser = Parser::new_ext(raw, MARKDOWN_OPTIONS);
    let mut text = String::new();

    for event in parser {
        match event {
            Event::Text(t) | Event::Code(t) => {
                if !text.is_empty() && !text.ends_with(' ') {
                    text.push(' ');
                }
                text.push_str(&t);
                if text.chars().count() >= max_len {
                    break;
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                text.push(' ');
            }
            _ => {}
        }
    }

    text
}

fn truncate_chars(mut text: String, max_len: usize) -> String {
    if let Some((idx, _)) = text.char_indices().nth(max_len) {
        text.truncate(idx);
    }
    text
}
