use serde::Serialize;
use serde_json::Serializer;
use serde_json::ser::PrettyFormatter;
use std::fmt::Write;

pub const APP_TITLE: &str = "Docker Logs Looker";

const PAGE_STYLE: &str = "\
body {
    background-color: #000000;
    color: #bbbbbb;
}
a:link {
    color: #bbbbbb;
    text-decoration: none;
}
a:visited {
    color: #888888;
}
a:hover, a:active {
    text-decoration: underline;
}";

/// Only the first comma-separated token of the `Accept` header is consulted;
/// an exact match on `text/html` selects HTML rendering.
pub fn wants_html(accept: Option<&str>) -> bool {
    accept.and_then(|value| value.split(',').next()) == Some("text/html")
}

/// Plain-text container listing: one name per line, ascending order, trailing
/// newline.
pub fn container_index_text(names: &[String]) -> String {
    let mut sorted: Vec<&String> = names.iter().collect();
    sorted.sort();
    let mut out = String::new();
    for name in sorted {
        out.push_str(name);
        out.push('\n');
    }
    out
}

/// HTML container listing: each name links to its logs page, with inspect and
/// health links when those features are enabled.
pub fn container_index_html(
    names: &[String],
    inspect: bool,
    health: bool,
    refresh: Option<u64>,
) -> String {
    let mut sorted: Vec<&String> = names.iter().collect();
    sorted.sort();
    let mut body = String::new();
    for name in sorted {
        let _ = write!(body, "<a href=\"/command/logs/{name}\">{name}</a>");
        if inspect {
            let _ = write!(body, " <a href=\"/command/inspect/{name}\">\u{1F50D}</a>");
        }
        if health {
            let _ = write!(body, " <a href=\"/health/{name}\">\u{2764}</a>");
        }
        body.push('\n');
    }
    html_page(APP_TITLE, refresh, &body)
}

/// Command output as HTML: ANSI color codes become spans, the document is
/// titled `"{title} - Docker Logs Looker"`.
pub fn command_output_html(raw: &[u8], title: &str, refresh: Option<u64>) -> String {
    let text = String::from_utf8_lossy(raw);
    let converted = ansi_to_html::convert(&text).unwrap_or_else(|_| escape_html(&text));
    html_page(&format!("{title} - {APP_TITLE}"), refresh, &converted)
}

/// Pretty-print validated JSON with 4-space indentation.
pub fn pretty_json(raw: &[u8]) -> Result<Vec<u8>, serde_json::Error> {
    let value: serde_json::Value = serde_json::from_slice(raw)?;
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    Ok(buf)
}

/// Every HTML response goes through this single wrapper, so the document
/// structure is the same no matter which route produced it.
fn html_page(title: &str, refresh: Option<u64>, pre_body: &str) -> String {
    let mut page = String::new();
    page.push_str("<!doctype html>\n<html>\n<head>\n");
    let _ = writeln!(page, "<title>{}</title>", escape_html(title));
    if let Some(secs) = refresh {
        let _ = writeln!(page, "<meta http-equiv=\"refresh\" content=\"{secs}\">");
    }
    let _ = writeln!(page, "<style type=\"text/css\">\n{PAGE_STYLE}\n</style>");
    page.push_str("</head>\n<body>\n<pre>\n");
    page.push_str(pre_body);
    page.push_str("</pre>\n</body>\n</html>\n");
    page
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn accept_header_first_token_selects_html() {
        assert!(wants_html(Some("text/html")));
        assert!(wants_html(Some("text/html,application/xhtml+xml")));
        assert!(!wants_html(Some("text/plain")));
        assert!(!wants_html(Some("application/json,text/html")));
        assert!(!wants_html(None));
    }

    #[test]
    fn plain_index_is_sorted_with_trailing_newline() {
        assert_eq!(container_index_text(&names(&["web", "db"])), "db\nweb\n");
        assert_eq!(container_index_text(&[]), "");
    }

    #[test]
    fn html_index_links_names_to_logs() {
        let page = container_index_html(&names(&["web", "db"]), false, false, None);
        assert!(page.contains("<a href=\"/command/logs/db\">db</a>"));
        assert!(page.contains("<a href=\"/command/logs/web\">web</a>"));
        assert!(page.find("/command/logs/db") < page.find("/command/logs/web"));
        assert!(!page.contains("/command/inspect/"));
        assert!(!page.contains("/health/"));
    }

    #[test]
    fn html_index_adds_feature_links_when_enabled() {
        let page = container_index_html(&names(&["web"]), true, true, None);
        assert!(page.contains("<a href=\"/command/inspect/web\">"));
        assert!(page.contains("<a href=\"/health/web\">"));
    }

    #[test]
    fn refresh_directive_only_for_positive_seconds() {
        let with = container_index_html(&names(&["web"]), false, false, Some(30));
        assert!(with.contains("<meta http-equiv=\"refresh\" content=\"30\">"));
        let without = container_index_html(&names(&["web"]), false, false, None);
        assert!(!without.contains("http-equiv"));
    }

    #[test]
    fn index_rendering_is_deterministic() {
        let a = container_index_html(&names(&["web", "db"]), true, false, Some(10));
        let b = container_index_html(&names(&["web", "db"]), true, false, Some(10));
        assert_eq!(a, b);
    }

    #[test]
    fn command_output_titles_the_document() {
        let page = command_output_html(b"hello", "web", None);
        assert!(page.contains("<title>web - Docker Logs Looker</title>"));
        assert!(page.contains("hello"));
    }

    #[test]
    fn command_output_converts_ansi_colors_to_spans() {
        let page = command_output_html(b"\x1b[31mred\x1b[0m plain", "web", None);
        assert!(page.contains("<span"));
        assert!(page.contains("red"));
        assert!(page.contains("plain"));
    }

    #[test]
    fn html_document_structure_is_single_headed() {
        let page = command_output_html(b"line one\nline two", "web", Some(5));
        assert_eq!(page.matches("<!doctype html>").count(), 1);
        assert_eq!(page.matches("<head>").count(), 1);
        assert_eq!(page.matches("<body>").count(), 1);
    }

    #[test]
    fn pretty_json_uses_four_space_indent() {
        let out = pretty_json(br#"[{"State":{"Health":{"Status":"healthy"}}}]"#)
            .expect("valid json");
        let text = String::from_utf8(out).expect("utf8");
        assert!(text.contains("\n    {"));
        assert!(text.contains("\n        \"State\""));
    }

    #[test]
    fn pretty_json_rejects_non_json_bytes() {
        assert!(pretty_json(b"not json at all").is_err());
    }
}
