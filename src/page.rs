// src/page.rs
//! Page shell for the chat UI.
//!
//! The widget in `public/chat-widget.js` owns rendering and input. This
//! module only supplies its content props and the `getResponse` callback.

use serde::Serialize;

use crate::message::SESSION_HEADER;

/// Literal the callback resolves to when the request itself fails.
pub const FETCH_FALLBACK: &str = "Error fetching data";

/// Path the callback posts questions to.
pub const RESPONSE_ENDPOINT: &str = "/api/response";

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WidgetProps {
    pub place_holder: String,
    pub class_name: String,
    pub overline: String,
    pub title: String,
    pub highlighted_text: String,
    pub gradient: [String; 2],
    pub subtitle: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageOptions {
    pub title: String,
    pub description: String,
    pub widget: WidgetProps,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            title: "Fitness AI".to_string(),
            description: "FitAI is a personalized fitness chatbot that helps you achieve your fitness goals.".to_string(),
            widget: WidgetProps {
                place_holder: "Ask me anything...".to_string(),
                class_name: "flex-1 flex flex-col items-center justify-center".to_string(),
                overline: "Ready to Sweat? 🔥".to_string(),
                title: "Personal".to_string(),
                highlighted_text: "Fitness AI".to_string(),
                gradient: ["#F09819".to_string(), "#EDDE5D".to_string()],
                subtitle: "Tell me your fitness goal, and I'll generate a personalized workout plan to get you started.".to_string(),
            },
        }
    }
}

const SHELL: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>__TITLE__</title>
  <meta name="description" content="__DESCRIPTION__">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <link rel="stylesheet" href="/static/chat-widget.css">
</head>
<body>
  <main style="display: flex; justify-content: center; height: 100vh">
    <div id="chat"></div>
  </main>
  <script type="application/json" id="chat-props">__PROPS__</script>
  <script>
    const SESSION_KEY = "fitai-session-id";

    async function getResponse(question) {
      try {
        const headers = { "Content-Type": "application/json" };
        const sessionId = window.sessionStorage.getItem(SESSION_KEY);
        if (sessionId) {
          headers["__SESSION_HEADER__"] = sessionId;
        }
        const response = await fetch("__ENDPOINT__", {
          method: "POST",
          headers,
          body: JSON.stringify({ question }),
        });
        const issued = response.headers.get("__SESSION_HEADER__");
        if (issued) {
          window.sessionStorage.setItem(SESSION_KEY, issued);
        }
        const data = await response.json();
        return data.response;
      } catch (error) {
        console.error("Error fetching data:", error);
        return "__FALLBACK__";
      }
    }
  </script>
  <script src="/static/chat-widget.js"></script>
  <script>
    ChatWidget.mount(
      document.getElementById("chat"),
      JSON.parse(document.getElementById("chat-props").textContent),
      getResponse,
    );
  </script>
</body>
</html>
"#;

/// Render the full HTML page for `options`.
pub fn render_page(options: &PageOptions) -> String {
    // Props only ever reach a JSON script block; `<`, `>` and `&` are
    // escaped so no value can close it early.
    let props = serde_json::to_string(&options.widget)
        .unwrap_or_else(|_| "{}".to_string())
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026");

    SHELL
        .replace("__TITLE__", &escape_html(&options.title))
        .replace("__DESCRIPTION__", &escape_html(&options.description))
        .replace("__SESSION_HEADER__", SESSION_HEADER)
        .replace("__ENDPOINT__", RESPONSE_ENDPOINT)
        .replace("__FALLBACK__", FETCH_FALLBACK)
        .replace("__PROPS__", &props)
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
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
