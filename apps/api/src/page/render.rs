//! HTML rendering for the single page.
//!
//! Every user-supplied string goes through `html_escape`. The model reply is
//! markdown; raw HTML inside it is shown as text, never injected.

use html_escape::{encode_double_quoted_attribute, encode_text};
use pulldown_cmark::{html, Event, Options, Parser, Tag};

use crate::drafting::category::Category;
use crate::errors::CREDENTIAL_WARNING;

pub const TITLE: &str = "§ Übersetzer für Anwälte §";
pub const DESCRIPTION: &str =
    "Verwandle Stichpunkte und Alltagssprache in professionelle Formulierungen für anwaltliche Schriftsätze.";
const CATEGORY_LABEL: &str = "Für welche Art von Dokument ist der Text?";
const TEXT_LABEL: &str = "Deine Stichpunkte / Rohtext:";
const PLACEHOLDER: &str =
    "Z.B.: Der Gegner lügt, er hat die Ware nie geschickt. Ich bin stinksauer.";
const BUTTON_LABEL: &str = "Formulierungen generieren";
const BUSY_MESSAGE: &str = "Analysiere Sachverhalt und generiere Varianten...";

/// What the status/result area shows below the form.
#[derive(Debug, Clone, PartialEq)]
pub enum PageStatus {
    Idle,
    Info(String),
    Success { heading: String, reply: String },
    Error(String),
}

/// Everything needed to render the interactive page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    pub selected: Category,
    pub text: String,
    pub status: PageStatus,
}

impl Default for PageView {
    fn default() -> Self {
        Self {
            selected: Category::default(),
            text: String::new(),
            status: PageStatus::Idle,
        }
    }
}

const SHELL: &str = r#"<!DOCTYPE html>
<html lang="de">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Legal Tech Tool</title>
<link rel="icon" href="data:image/svg+xml,&lt;svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 16 16'&gt;&lt;text y='14' font-size='14'&gt;§&lt;/text&gt;&lt;/svg&gt;">
<style>
body { font-family: system-ui, sans-serif; max-width: 46rem; margin: 2rem auto; padding: 0 1rem; color: #262730; }
label { display: block; margin: 1rem 0 .35rem; font-weight: 600; }
select, textarea { width: 100%; box-sizing: border-box; font: inherit; padding: .5rem; }
button { margin-top: 1rem; padding: .5rem 1rem; font: inherit; cursor: pointer; }
.banner { margin: 1rem 0; padding: .75rem 1rem; border-radius: .4rem; }
.info { background: #e8f0fe; } .success { background: #e6f4ea; } .error { background: #fdecea; } .warning { background: #fff8e1; }
.reply { line-height: 1.5; }
</style>
</head>
<body>
<h1>{title}</h1>
<p>{description}</p>
{body}
</body>
</html>
"#;

fn shell(body: &str) -> String {
    SHELL
        .replace("{title}", &encode_text(TITLE))
        .replace("{description}", &encode_text(DESCRIPTION))
        .replace("{body}", body)
}

/// The page shown while no API key is configured: warning only, no controls.
pub fn render_locked() -> String {
    shell(&banner("warning", CREDENTIAL_WARNING))
}

/// The interactive page: dropdown, text area, button, status area.
pub fn render_page(view: &PageView) -> String {
    let options: String = Category::ALL
        .into_iter()
        .map(|c| {
            let selected = if c == view.selected { " selected" } else { "" };
            format!(
                "<option value=\"{value}\"{selected}>{label}</option>",
                value = encode_double_quoted_attribute(c.label()),
                label = encode_text(c.label()),
            )
        })
        .collect();

    let form = format!(
        r#"<form id="draft-form" method="post" action="/">
<label for="category">{category_label}</label>
<select id="category" name="category">{options}</select>
<label for="text">{text_label}</label>
<textarea id="text" name="text" rows="7" placeholder="{placeholder}">{text}</textarea>
<button id="submit" type="submit">{button}</button>
</form>
<p id="busy" class="banner info" hidden>{busy}</p>
<script>
document.getElementById("draft-form").addEventListener("submit", function () {{
  document.getElementById("submit").disabled = true;
  document.getElementById("busy").hidden = false;
}});
</script>
"#,
        category_label = encode_text(CATEGORY_LABEL),
        text_label = encode_text(TEXT_LABEL),
        placeholder = encode_double_quoted_attribute(PLACEHOLDER),
        text = encode_text(&view.text),
        button = encode_text(BUTTON_LABEL),
        busy = encode_text(BUSY_MESSAGE),
    );

    let status = match &view.status {
        PageStatus::Idle => String::new(),
        PageStatus::Info(notice) => banner("info", notice),
        PageStatus::Success { heading, reply } => format!(
            "{}<div class=\"reply\">{}</div>",
            banner("success", heading),
            markdown_to_html(reply)
        ),
        PageStatus::Error(message) => banner("error", message),
    };

    shell(&format!("{form}<section id=\"result\">{status}</section>"))
}

fn banner(kind: &str, message: &str) -> String {
    format!(
        "<div class=\"banner {kind}\">{}</div>",
        encode_text(message)
    )
}

/// Link and image targets allowed in a rendered reply.
const SAFE_URL_SCHEMES: &[&str] = &["http://", "https://", "mailto:"];

fn is_safe_url(dest: &str) -> bool {
    let dest = dest.trim().to_ascii_lowercase();
    SAFE_URL_SCHEMES
        .iter()
        .any(|scheme| dest.starts_with(scheme))
}

/// Renders the reply as markdown. Raw HTML blocks become plain text; links and
/// images with any other scheme are unwrapped to their text.
pub fn markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, Options::ENABLE_TABLES).filter_map(|event| match event {
        Event::Html(raw) => Some(Event::Text(raw)),
        Event::Start(Tag::Link(_, ref dest, _) | Tag::Image(_, ref dest, _))
        | Event::End(Tag::Link(_, ref dest, _) | Tag::Image(_, ref dest, _))
            if !is_safe_url(dest) =>
        {
            None
        }
        other => Some(other),
    });

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}
