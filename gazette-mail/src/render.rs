//! Deterministic HTML rendering of a briefing payload.
//!
//! A fixed skeleton with values interpolated in order. The only
//! conditional is section omission for empty arrays.

use gazette_types::{BriefingPayload, NewsItem};
use std::fmt::Write;

/// Subject line for a briefing email.
#[must_use]
pub fn subject_for(date: &str) -> String {
    format!("Daily News Briefing — {date}")
}

/// Render the payload to a self-contained HTML document.
#[must_use]
pub fn render(payload: &BriefingPayload) -> String {
    let mut html = String::with_capacity(4096);
    html.push_str(
        "<!DOCTYPE html><html><body style=\"font-family:Georgia,serif;\
         max-width:680px;margin:0 auto;padding:24px;color:#1a1a1a;\">",
    );
    let _ = write!(
        html,
        "<h1 style=\"border-bottom:3px double #1a1a1a;padding-bottom:8px;\">\
         Daily Briefing <small>{}</small></h1>",
        escape(&payload.date)
    );

    title_section(&mut html, "Top Headlines", &payload.viral_titles);
    title_section(&mut html, "Medical Headlines", &payload.medical_viral_titles);
    news_section(&mut html, "General News", &payload.general_news);
    news_section(&mut html, "Medical News", &payload.medical_news);

    html.push_str("</body></html>");
    html
}

fn title_section(html: &mut String, heading: &str, titles: &[String]) {
    if titles.is_empty() {
        return;
    }
    let _ = write!(html, "<h2>{heading}</h2><ul>");
    for title in titles {
        let _ = write!(html, "<li>{}</li>", escape(title));
    }
    html.push_str("</ul>");
}

fn news_section(html: &mut String, heading: &str, items: &[NewsItem]) {
    if items.is_empty() {
        return;
    }
    let _ = write!(html, "<h2>{heading}</h2>");
    for item in items {
        let _ = write!(
            html,
            "<div style=\"margin-bottom:16px;\">\
             <h3 style=\"margin-bottom:2px;\">{title_local}</h3>\
             <p style=\"margin-top:0;color:#555;\"><em>{title_en}</em></p>\
             <p>{summary_local}</p>\
             <p style=\"color:#555;\">{summary_en}</p>\
             <p><a href=\"{url}\">{source}</a></p>\
             </div>",
            title_local = escape(&item.title_local),
            title_en = escape(&item.title_en),
            summary_local = escape(&item.summary_local),
            summary_en = escape(&item.summary_en),
            url = escape(&item.source_url),
            source = escape(&item.source_name),
        );
    }
}

/// Minimal HTML escaping for interpolated model output.
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
