//! Output-side XSS filtering for user-supplied text.
//!
//! Tags listed in [`ALLOWED`] survive with only their listed attributes, and a
//! URL attribute is dropped when it decodes to a script scheme. Any other tag,
//! and any stray angle bracket, is escaped so it renders as text. Quotes and
//! ampersands are left alone.

use regex::Regex;
use std::sync::OnceLock;

/// Allowed tags and the attributes each may keep.
pub const ALLOWED: &[(&str, &[&str])] = &[
    ("a", &["target", "href", "title"]),
    ("b", &[]),
    ("blockquote", &["cite"]),
    ("br", &[]),
    ("code", &[]),
    ("em", &[]),
    ("h1", &[]),
    ("h2", &[]),
    ("h3", &[]),
    ("h4", &[]),
    ("h5", &[]),
    ("h6", &[]),
    ("hr", &[]),
    ("i", &[]),
    ("img", &["src", "alt", "title", "width", "height"]),
    ("li", &[]),
    ("ol", &[]),
    ("p", &[]),
    ("pre", &[]),
    ("small", &[]),
    ("span", &[]),
    ("strong", &[]),
    ("sub", &[]),
    ("sup", &[]),
    ("u", &[]),
    ("ul", &[]),
];

const DANGEROUS_SCHEMES: &[&str] = &["javascript:", "vbscript:", "data:"];

static TAG: OnceLock<Regex> = OnceLock::new();
static ATTR: OnceLock<Regex> = OnceLock::new();
static ENTITY: OnceLock<Regex> = OnceLock::new();

fn tag_pattern() -> &'static Regex {
    TAG.get_or_init(|| {
        Regex::new(r#"<(/?)([A-Za-z][A-Za-z0-9]*)((?:"[^"]*"|'[^']*'|[^'"<>])*)>"#)
            .expect("tag pattern is valid")
    })
}

fn attr_pattern() -> &'static Regex {
    ATTR.get_or_init(|| {
        Regex::new(r#"([A-Za-z_:][-A-Za-z0-9_:.]*)(?:\s*=\s*("[^"]*"|'[^']*'|[^\s"'<>]+))?"#)
            .expect("attribute pattern is valid")
    })
}

fn entity_pattern() -> &'static Regex {
    ENTITY.get_or_init(|| {
        Regex::new(r"&(?:#([0-9]+)|#[xX]([0-9A-Fa-f]+)|([A-Za-z]+));?")
            .expect("entity pattern is valid")
    })
}

fn allowed_attributes(tag: &str) -> Option<&'static [&'static str]> {
    ALLOWED
        .iter()
        .find(|(name, _)| *name == tag)
        .map(|(_, attrs)| *attrs)
}

/// Resolve character references the way a browser does inside attribute values.
/// Unknown named references are kept verbatim.
fn decode_entities(s: &str) -> String {
    entity_pattern()
        .replace_all(s, |cap: &regex::Captures| {
            let code = if let Some(dec) = cap.get(1) {
                dec.as_str().parse::<u32>().ok()
            } else if let Some(hex) = cap.get(2) {
                u32::from_str_radix(hex.as_str(), 16).ok()
            } else {
                match cap[3].to_ascii_lowercase().as_str() {
                    "colon" => Some(':' as u32),
                    "tab" => Some('\t' as u32),
                    "newline" => Some('\n' as u32),
                    "amp" => Some('&' as u32),
                    "lt" => Some('<' as u32),
                    "gt" => Some('>' as u32),
                    "quot" => Some('"' as u32),
                    "apos" => Some('\'' as u32),
                    _ => return cap[0].to_string(),
                }
            };
            // an out-of-range reference decodes to U+FFFD
            code.and_then(char::from_u32)
                .unwrap_or(char::REPLACEMENT_CHARACTER)
                .to_string()
        })
        .into_owned()
}

fn escape_brackets(s: &str, out: &mut String) {
    for ch in s.chars() {
        match ch {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
}

fn is_dangerous_value(raw: &str) -> bool {
    let unquoted = raw.trim_matches(|c| c == '"' || c == '\'');
    let compact: String = decode_entities(unquoted)
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect::<String>()
        .to_ascii_lowercase();
    DANGEROUS_SCHEMES.iter().any(|scheme| compact.starts_with(scheme))
}

/// Attributes that survive on an allowed tag, each prefixed with a space.
fn safe_attributes(allowed: &[&str], attrs: &str) -> String {
    let mut out = String::new();
    for cap in attr_pattern().captures_iter(attrs) {
        let name = cap[1].to_ascii_lowercase();
        if !allowed.contains(&name.as_str()) {
            continue;
        }
        if cap.get(2).map(|v| is_dangerous_value(v.as_str())).unwrap_or(false) {
            continue;
        }
        out.push(' ');
        out.push_str(&cap[0]);
    }
    if attrs.trim_end().ends_with('/') {
        out.push_str(" /");
    }
    out
}

/// Neutralize executable markup in `input`.
pub fn sanitize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut last = 0;
    for cap in tag_pattern().captures_iter(input) {
        let Some(whole) = cap.get(0) else { continue };
        escape_brackets(&input[last..whole.start()], &mut out);
        last = whole.end();

        let name = cap[2].to_ascii_lowercase();
        let Some(allowed) = allowed_attributes(&name) else {
            escape_brackets(whole.as_str(), &mut out);
            continue;
        };
        let closing = &cap[1] == "/";
        out.push('<');
        if closing {
            out.push('/');
            out.push_str(&name);
        } else {
            out.push_str(&name);
            out.push_str(&safe_attributes(allowed, &cap[3]));
        }
        out.push('>');
    }
    escape_brackets(&input[last..], &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_script_tags() {
        assert_eq!(
            sanitize(r#"Naughty naughty very naughty <script>alert("xss");</script>"#),
            r#"Naughty naughty very naughty &lt;script&gt;alert("xss");&lt;/script&gt;"#
        );
    }

    #[test]
    fn strips_event_handlers_from_allowed_tags() {
        assert_eq!(
            sanitize(
                r#"Bad image <img src="https://url.to.file.which/does-not.exist" onerror="alert(document.cookie);">. But not <strong>all</strong> bad."#
            ),
            r#"Bad image <img src="https://url.to.file.which/does-not.exist">. But not <strong>all</strong> bad."#
        );
    }

    #[test]
    fn strips_script_urls() {
        assert_eq!(
            sanitize(r#"<a href=" JavaScript:alert(1)" title='x'>link</a>"#),
            r#"<a title='x'>link</a>"#
        );
        assert_eq!(sanitize("<img src=data:text/html,x />"), "<img />");
    }

    #[test]
    fn strips_entity_encoded_script_urls() {
        for href in [
            "&#106;avascript:alert(document.cookie)",
            "javascript&colon;alert(1)",
            "java&#x09;script:alert(1)",
            "&#x6A;&#x61;vascript&#58;alert(1)",
            "java&Tab;script&NewLine;:alert(1)",
        ] {
            let input = format!(r#"<a href="{}">click</a>"#, href);
            assert_eq!(sanitize(&input), "<a>click</a>", "{}", href);
        }
    }

    #[test]
    fn keeps_urls_that_merely_contain_entities() {
        let input = r#"<a href="https://example.com/?a=1&amp;b=2">x</a>"#;
        assert_eq!(sanitize(input), input);
    }

    #[test]
    fn keeps_only_listed_attributes_per_tag() {
        assert_eq!(
            sanitize(r#"<span style="position:fixed" class="x">hi</span>"#),
            "<span>hi</span>"
        );
        assert_eq!(
            sanitize(r#"<a target="_blank" href="https://x.test" style="color:red" onclick="y()">x</a>"#),
            r#"<a target="_blank" href="https://x.test">x</a>"#
        );
        assert_eq!(
            sanitize(r#"<IMG SRC="a.png" Alt="a" width=10 onload="x">"#),
            r#"<img SRC="a.png" Alt="a" width=10>"#
        );
    }

    #[test]
    fn escapes_unknown_tags_and_stray_brackets() {
        assert_eq!(
            sanitize("<iframe src=\"x\"></iframe> 1 < 2"),
            "&lt;iframe src=\"x\"&gt;&lt;/iframe&gt; 1 &lt; 2"
        );
        assert_eq!(sanitize("<!-- hidden -->"), "&lt;!-- hidden --&gt;");
    }

    #[test]
    fn leaves_plain_text_alone() {
        let text = "Dan's \"quoted\" text & more";
        assert_eq!(sanitize(text), text);
    }
}
