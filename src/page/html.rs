//! Static HTML output.
//!
//! Fills the slot elements of an HTML layout and appends an ECharts module
//! script that draws the charts in the browser.

use std::ops::Range;

use super::{PageTargets, PageText, Slot};
use crate::chart::{ChartBackend, ChartHandle, ChartOption, ChartSlot, EchartsTheme};
use crate::error::PageError;

/// Layout used when none is configured.
pub const DEFAULT_LAYOUT: &str = include_str!("../../assets/index.html");

/// A page adapter that records slot text and charts, then writes them into
/// an HTML layout.
///
/// # Example
///
/// ```
/// use census_dashboard::{EchartsTheme, HtmlDashboard, PageTargets, Slot, DEFAULT_LAYOUT};
///
/// let mut page = HtmlDashboard::new("https://cdn.example/echarts.esm.js");
/// page.set_text(Slot::LastRun, "Error: No data found in census.jsonl");
///
/// let html = page.render_document(DEFAULT_LAYOUT, &EchartsTheme::default()).unwrap();
/// assert!(html.contains("Error: No data found in census.jsonl"));
/// ```
#[derive(Debug, Clone)]
pub struct HtmlDashboard {
    echarts_url: String,
    text: PageText,
    script: ChartScript,
}

/// Charts and link groups recorded for the page's module script.
#[derive(Debug, Clone, Default)]
pub struct ChartScript {
    charts: Vec<(ChartSlot, ChartOption)>,
    links: Vec<Vec<ChartHandle>>,
}

impl ChartBackend for ChartScript {
    fn render(&mut self, container: ChartSlot, option: ChartOption) -> ChartHandle {
        self.charts.push((container, option));
        ChartHandle(self.charts.len() - 1)
    }

    fn link(&mut self, handles: &[ChartHandle]) {
        self.links.push(handles.to_vec());
    }
}

impl HtmlDashboard {
    /// Create an empty page that loads ECharts from `echarts_url`.
    pub fn new(echarts_url: &str) -> Self {
        Self {
            echarts_url: echarts_url.to_string(),
            text: PageText::new(),
            script: ChartScript::default(),
        }
    }

    /// Split into the text and chart targets, for
    /// [`load_and_render`](crate::render::load_and_render).
    pub fn targets(&mut self) -> (&mut PageText, &mut ChartScript) {
        (&mut self.text, &mut self.script)
    }

    /// Slot text written so far.
    pub fn text(&self) -> &PageText {
        &self.text
    }

    /// Charts rendered so far, in handle order.
    pub fn charts(&self) -> &[(ChartSlot, ChartOption)] {
        &self.script.charts
    }

    /// Link groups, in the order they were made.
    pub fn links(&self) -> &[Vec<ChartHandle>] {
        &self.script.links
    }

    /// Produce the final document.
    ///
    /// Every written slot must exist in `layout` as an element with the
    /// slot's id. The chart script is only added when charts were rendered.
    pub fn render_document(&self, layout: &str, theme: &EchartsTheme) -> Result<String, PageError> {
        let mut html = layout.to_string();
        for (slot, text) in self.text.iter() {
            fill_element(&mut html, &slot.element_id(), &escape_html(text))?;
        }

        if !self.script.charts.is_empty() {
            let script = self.chart_script(theme)?;
            let body_end = html.rfind("</body>").ok_or(PageError::MissingBody)?;
            html.insert_str(body_end, &script);
        }

        Ok(html)
    }

    fn chart_script(&self, theme: &EchartsTheme) -> Result<String, PageError> {
        let url = serde_json::to_string(&self.echarts_url)?;
        let mut lines = vec![
            "<script type=\"module\">".to_string(),
            format!("import * as echarts from {};", url),
            "const charts = [];".to_string(),
        ];

        for (idx, (slot, option)) in self.script.charts.iter().enumerate() {
            let id = serde_json::to_string(slot.element_id())?;
            let option = script_safe(&serde_json::to_string(&theme.apply(option)?)?);
            lines.push(format!(
                "charts.push(echarts.init(document.getElementById({})));",
                id
            ));
            lines.push(format!("charts[{}].setOption({});", idx, option));
        }
        for group in &self.script.links {
            let members: Vec<String> = group
                .iter()
                .filter(|h| h.0 < self.script.charts.len())
                .map(|h| format!("charts[{}]", h.0))
                .collect();
            lines.push(format!("echarts.connect([{}]);", members.join(", ")));
        }
        lines.push(
            "window.addEventListener(\"resize\", () => charts.forEach((c) => c.resize()));"
                .to_string(),
        );
        lines.push("</script>\n".to_string());

        Ok(lines.join("\n"))
    }
}

impl PageTargets for HtmlDashboard {
    fn set_text(&mut self, slot: Slot, text: &str) {
        self.text.set_text(slot, text);
    }
}

impl ChartBackend for HtmlDashboard {
    fn render(&mut self, container: ChartSlot, option: ChartOption) -> ChartHandle {
        self.script.render(container, option)
    }

    fn link(&mut self, handles: &[ChartHandle]) {
        self.script.link(handles);
    }
}

/// Replace the inner text of the element whose id is `id`.
///
/// The element's content runs from the end of its start tag to the next
/// `<`, so slot elements must hold plain text only.
fn fill_element(html: &mut String, id: &str, text: &str) -> Result<(), PageError> {
    let content =
        element_content(html, id).ok_or_else(|| PageError::MissingSlot(id.to_string()))?;
    html.replace_range(content, text);
    Ok(())
}

/// Byte range of the content of the first element whose `id` attribute
/// equals `id`.
///
/// Only start tags are inspected: comments, end tags, and the bodies of
/// `script` and `style` elements are skipped.
fn element_content(html: &str, id: &str) -> Option<Range<usize>> {
    let mut pos = 0;
    while let Some(offset) = html[pos..].find('<') {
        let start = pos + offset;
        let rest = &html[start..];

        if rest.starts_with("<!--") {
            pos = start + rest.find("-->")? + 3;
            continue;
        }

        let tag_end = start + tag_end(rest)?;
        let tag = &html[start + 1..tag_end];
        pos = tag_end + 1;
        if tag.starts_with(['/', '!', '?']) {
            continue;
        }

        let name_len = tag
            .find(|c: char| c.is_ascii_whitespace() || c == '/')
            .unwrap_or(tag.len());
        let name = &tag[..name_len];

        if attribute(&tag[name_len..], "id") == Some(id) {
            let close = html[pos..].find('<').map(|i| pos + i)?;
            return Some(pos..close);
        }

        if name.eq_ignore_ascii_case("script") || name.eq_ignore_ascii_case("style") {
            let closing = format!("</{}", name.to_ascii_lowercase());
            pos += html[pos..].to_ascii_lowercase().find(&closing)?;
        }
    }
    None
}

/// Offset of the `>` closing the tag at the start of `tag`, ignoring any
/// inside quoted attribute values.
fn tag_end(tag: &str) -> Option<usize> {
    let mut quote = None;
    for (idx, c) in tag.char_indices() {
        match (quote, c) {
            (None, '"' | '\'') => quote = Some(c),
            (Some(q), c) if c == q => quote = None,
            (None, '>') => return Some(idx),
            _ => {}
        }
    }
    None
}

/// Value of attribute `name` in the attribute part of a start tag.
///
/// Attribute names match whole and case-insensitively; values may be
/// double-quoted, single-quoted or bare.
fn attribute<'a>(attrs: &'a str, name: &str) -> Option<&'a str> {
    let mut rest = attrs;
    loop {
        rest = rest.trim_start_matches(|c: char| c.is_ascii_whitespace() || c == '/');
        if rest.is_empty() {
            return None;
        }

        let key_len = rest
            .find(|c: char| c.is_ascii_whitespace() || c == '=' || c == '/')
            .unwrap_or(rest.len());
        let key = &rest[..key_len];
        rest = rest[key_len..].trim_start();

        let value = match rest.strip_prefix('=') {
            Some(after) => {
                let after = after.trim_start();
                match after.chars().next() {
                    Some(quote @ ('"' | '\'')) => {
                        let body = &after[1..];
                        let end = body.find(quote)?;
                        rest = &body[end + 1..];
                        &body[..end]
                    }
                    _ => {
                        let end = after
                            .find(|c: char| c.is_ascii_whitespace())
                            .unwrap_or(after.len());
                        rest = &after[end..];
                        &after[..end]
                    }
                }
            }
            None => "",
        };

        if key.eq_ignore_ascii_case(name) {
            return Some(value);
        }
    }
}

/// Escape text for use as HTML element content.
fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Keep serialized JSON from closing the surrounding script element.
fn script_safe(json: &str) -> String {
    json.replace("</", "<\\/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{Axis, DataPoint, LineSeries, YValue};

    const LAYOUT: &str = r#"<html><body>
<p id="last-run">Loading...</p>
<span id="total-nodes"></span>
</body></html>"#;

    fn option(name: &str) -> ChartOption {
        ChartOption {
            x_axis: Axis::time(),
            y_axis: Axis::value(name),
            series: vec![LineSeries {
                name: name.to_string(),
                data: vec![DataPoint(1_700_000_000_000, YValue::Count(1000))],
            }],
        }
    }

    #[test]
    fn test_fill_element() {
        let mut html = LAYOUT.to_string();
        fill_element(&mut html, "last-run", "Last run November 14, 2023").unwrap();
        fill_element(&mut html, "total-nodes", "1,000").unwrap();

        assert!(html.contains(r#"<p id="last-run">Last run November 14, 2023</p>"#));
        assert!(html.contains(r#"<span id="total-nodes">1,000</span>"#));
    }

    #[test]
    fn test_fill_element_ignores_other_id_attributes() {
        let mut html = r#"<a data-id="total-nodes" href="x">Docs</a><span aria-describedby="x" id="total-nodes">-</span>"#.to_string();
        fill_element(&mut html, "total-nodes", "1,000").unwrap();

        assert!(html.starts_with(r#"<a data-id="total-nodes" href="x">Docs</a>"#));
        assert!(html.ends_with(r#"id="total-nodes">1,000</span>"#));
    }

    #[test]
    fn test_fill_element_quote_styles() {
        let mut html = "<p id='last-run'>Loading...</p><b ID=total-nodes>0</b>".to_string();
        fill_element(&mut html, "last-run", "Last run March 1, 2024").unwrap();
        fill_element(&mut html, "total-nodes", "18,234").unwrap();

        assert_eq!(html, "<p id='last-run'>Last run March 1, 2024</p><b ID=total-nodes>18,234</b>");
    }

    #[test]
    fn test_fill_element_skips_comments_and_scripts() {
        let mut html = concat!(
            r#"<!-- <p id="last-run">old</p> -->"#,
            r#"<script>const s = '<b id="last-run">';</script>"#,
            r#"<p title="a > b" id="last-run">Loading...</p>"#,
        )
        .to_string();
        fill_element(&mut html, "last-run", "Last run").unwrap();

        assert!(html.contains(r#"<!-- <p id="last-run">old</p> -->"#));
        assert!(html.contains(r#"'<b id="last-run">'"#));
        assert!(html.ends_with(r#"<p title="a > b" id="last-run">Last run</p>"#));
    }

    #[test]
    fn test_fill_element_missing() {
        let mut html = LAYOUT.to_string();
        let err = fill_element(&mut html, "stat-1-value", "60.0%").unwrap_err();
        assert!(matches!(err, PageError::MissingSlot(ref id) if id == "stat-1-value"));
    }

    #[test]
    fn test_text_is_escaped() {
        let mut page = HtmlDashboard::new("echarts.js");
        page.set_text(Slot::LastRun, "Error: <b>&</b>");

        let html = page.render_document(LAYOUT, &EchartsTheme::default()).unwrap();
        assert!(html.contains("Error: &lt;b&gt;&amp;&lt;/b&gt;"));
        // No charts, no script
        assert!(!html.contains("<script"));
    }

    #[test]
    fn test_chart_script() {
        let mut page = HtmlDashboard::new("https://cdn.example/echarts.esm.js");
        let a = page.render(ChartSlot::Nodes, option("Listening Nodes"));
        let b = page.render(ChartSlot::Features, option("V2 Transport"));
        page.link(&[a, b]);
        assert_eq!(page.links(), &[vec![ChartHandle(0), ChartHandle(1)]]);

        let html = page.render_document(LAYOUT, &EchartsTheme::default()).unwrap();
        assert!(html.contains(r#"import * as echarts from "https://cdn.example/echarts.esm.js";"#));
        assert!(html.contains(r#"echarts.init(document.getElementById("nodes-chart"))"#));
        assert!(html.contains(r#"echarts.init(document.getElementById("features-chart"))"#));
        assert!(html.contains("charts[1].setOption({"));
        assert!(html.contains("echarts.connect([charts[0], charts[1]]);"));
        assert!(html.contains("[1700000000000,1000]"));

        let script_at = html.find("<script").unwrap();
        assert!(script_at < html.rfind("</body>").unwrap());
    }

    #[test]
    fn test_script_cannot_close_early() {
        let mut page = HtmlDashboard::new("echarts.js");
        page.render(ChartSlot::Nodes, option("</script><b>"));

        let html = page.render_document(LAYOUT, &EchartsTheme::default()).unwrap();
        assert_eq!(html.matches("</script>").count(), 1);
        assert!(html.contains(r#"<\/script><b>"#));
    }

    #[test]
    fn test_targets_share_one_page() {
        let mut page = HtmlDashboard::new("echarts.js");
        let (text, charts) = page.targets();
        text.set_text(Slot::TotalNodes, "1,000");
        charts.render(ChartSlot::Nodes, option("Listening Nodes"));

        assert_eq!(page.text().get(Slot::TotalNodes), Some("1,000"));
        assert_eq!(page.charts().len(), 1);
    }

    #[test]
    fn test_missing_body() {
        let mut page = HtmlDashboard::new("echarts.js");
        page.render(ChartSlot::Nodes, option("Listening Nodes"));

        let err = page.render_document("<div></div>", &EchartsTheme::default()).unwrap_err();
        assert!(matches!(err, PageError::MissingBody));
    }

    #[test]
    fn test_default_layout_has_every_slot() {
        for slot in Slot::ALL {
            assert!(element_content(DEFAULT_LAYOUT, &slot.element_id()).is_some());
        }
        for chart in ChartSlot::ALL {
            assert!(element_content(DEFAULT_LAYOUT, chart.element_id()).is_some());
        }
        // The stylesheet mentions #last-run; the element is the paragraph
        let content = element_content(DEFAULT_LAYOUT, "last-run").unwrap();
        assert_eq!(&DEFAULT_LAYOUT[content], "Loading...");
    }
}
