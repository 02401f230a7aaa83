//! Document shell around the rendered report.

/// Head content for the document.
#[derive(Debug, Clone, Default)]
pub struct HeadContent {
    pub title: Option<String>,
    pub meta: Vec<(String, String)>,
    /// Inline `<style>` blocks.
    pub styles: Vec<String>,
}

impl HeadContent {
    /// Head with a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    /// Add a meta tag.
    pub fn with_meta(mut self, name: &str, content: &str) -> Self {
        self.meta.push((name.to_string(), content.to_string()));
        self
    }

    /// Add inline CSS.
    pub fn with_style(mut self, css: &str) -> Self {
        self.styles.push(css.to_string());
        self
    }

    /// Render head content to HTML.
    pub fn render(&self) -> String {
        let mut html = String::from("<meta charset=\"utf-8\">\n");

        if let Some(title) = &self.title {
            html.push_str(&format!("<title>{}</title>\n", escape_html(title)));
        }

        for (name, content) in &self.meta {
            html.push_str(&format!(
                r#"<meta name="{}" content="{}">"#,
                escape_html(name),
                escape_html(content)
            ));
            html.push('\n');
        }

        for css in &self.styles {
            html.push_str(&format!("<style>{}</style>\n", css));
        }

        html
    }
}

/// Complete HTML document wrapper.
#[derive(Debug, Clone)]
pub struct Shell {
    pub head: HeadContent,
    /// Class on `<body>`.
    pub body_class: Option<String>,
}

impl Shell {
    pub fn new(head: HeadContent) -> Self {
        Self {
            head,
            body_class: None,
        }
    }

    /// Set the body class.
    pub fn with_body_class(mut self, class: impl Into<String>) -> Self {
        self.body_class = Some(class.into());
        self
    }

    /// Wrap already-rendered body HTML into a full document.
    pub fn wrap(&self, body: &str) -> String {
        let body_open = match &self.body_class {
            Some(class) => format!(r#"<body class="{}">"#, escape_html(class)),
            None => "<body>".to_string(),
        };

        format!(
            "<!DOCTYPE html>\n<html lang=\"zh-CN\">\n<head>\n{head}</head>\n{body_open}\n{body}\n</body>\n</html>\n",
            head = self.head.render(),
            body_open = body_open,
            body = body
        )
    }
}

/// Escape text for HTML element and attribute content.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b class="x">Tom & Jerry's</b>"#),
            "&lt;b class=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/b&gt;"
        );
    }

    #[test]
    fn test_shell_wraps_body() {
        let shell = Shell::new(HeadContent::new("评价统计").with_style("body{margin:0}"))
            .with_body_class("reviews");
        let html = shell.wrap("<p>hi</p>");

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>评价统计</title>"));
        assert!(html.contains("<style>body{margin:0}</style>"));
        assert!(html.contains(r#"<body class="reviews">"#));
        assert!(html.contains("<p>hi</p>\n</body>"));
        assert!(html.trim_end().ends_with("</html>"));
    }
}
