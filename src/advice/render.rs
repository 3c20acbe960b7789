//! Minimal Markdown-to-HTML rendering for advice text
//!
//! Handles the subset the advice service produces: `**bold**`, `*italic*`,
//! `##`/`###` headings and `* ` bullet lines. Everything else is passed
//! through with HTML-special characters escaped and line breaks kept.

use regex::Regex;
use std::sync::OnceLock;

struct InlinePatterns {
  bold: Regex,
  bold_underscore: Regex,
  italic: Regex,
  italic_underscore: Regex,
}

fn inline_patterns() -> &'static InlinePatterns {
  static PATTERNS: OnceLock<InlinePatterns> = OnceLock::new();
  PATTERNS.get_or_init(|| InlinePatterns {
    bold: Regex::new(r"\*\*(.+?)\*\*").expect("bold pattern"),
    bold_underscore: Regex::new(r"__(.+?)__").expect("bold pattern"),
    italic: Regex::new(r"\*(.+?)\*").expect("italic pattern"),
    italic_underscore: Regex::new(r"\b_(.+?)_\b").expect("italic pattern"),
  })
}

fn escape_html(text: &str) -> String {
  text
    .replace('&', "&amp;")
    .replace('<', "&lt;")
    .replace('>', "&gt;")
}

fn render_inline(text: &str) -> String {
  let patterns = inline_patterns();
  let escaped = escape_html(text);
  let out = patterns.bold.replace_all(&escaped, "<strong>$1</strong>");
  let out = patterns.bold_underscore.replace_all(&out, "<strong>$1</strong>");
  let out = patterns.italic.replace_all(&out, "<em>$1</em>");
  let out = patterns.italic_underscore.replace_all(&out, "<em>$1</em>");
  out.into_owned()
}

/// Render advice text as an HTML fragment
pub fn render_advice_html(text: &str) -> String {
  let mut html = String::new();
  let mut in_list = false;
  // Plain lines are separated by <br />; block elements need no break
  let mut needs_break = false;

  for line in text.lines() {
    let trimmed = line.trim_start();

    if let Some(item) = trimmed.strip_prefix("* ") {
      if !in_list {
        html.push_str("<ul>");
        in_list = true;
      }
      html.push_str(&format!("<li>{}</li>", render_inline(item.trim())));
      needs_break = false;
      continue;
    }

    if in_list {
      html.push_str("</ul>");
      in_list = false;
    }

    if let Some(heading) = trimmed.strip_prefix("### ") {
      html.push_str(&format!("<h3>{}</h3>", render_inline(heading.trim())));
      needs_break = false;
    } else if let Some(heading) = trimmed.strip_prefix("## ") {
      html.push_str(&format!("<h2>{}</h2>", render_inline(heading.trim())));
      needs_break = false;
    } else {
      if needs_break {
        html.push_str("<br />");
      }
      html.push_str(&render_inline(line));
      needs_break = true;
    }
  }

  if in_list {
    html.push_str("</ul>");
  }

  html
}
