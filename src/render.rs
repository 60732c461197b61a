// src/render.rs
//! Presentation of generated resumes: files on disk and the web pages.
//!
//! Resume HTML comes straight from the generation workflow and is never
//! rewritten. In the browser it is isolated in a sandboxed iframe so its
//! scripts cannot run against this origin.

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::info;
use v_htmlescape::escape;

use crate::error::FAILURE_NOTICE;
use crate::types::NormalizedResult;
use crate::utils::{output_file_path, write_file_content};

/// Write the resume HTML to `<dir>/<name>_<timestamp>.html`
pub async fn write_resume_html(
    output_dir: &Path,
    full_name: &str,
    result: &NormalizedResult,
) -> Result<PathBuf> {
    let path = output_file_path(output_dir, full_name, "html");
    write_file_content(&path, &result.html).await?;
    info!("Resume written to {}", path.display());
    Ok(path)
}

/// Result page with the resume in a sandboxed frame and an optional PDF link
pub fn result_page(result: &NormalizedResult) -> String {
    let pdf_link = match &result.pdf_url {
        Some(url) => format!(
            r#"<a class="button" href="{}" target="_blank" rel="noopener noreferrer" download>Download PDF</a>"#,
            escape(url)
        ),
        None => String::new(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Your resume</title>
<style>{style}</style>
</head>
<body>
<header>
  <h1>Your resume is ready</h1>
  <nav>{pdf_link}<button class="button" id="reset">Start over</button></nav>
</header>
<iframe class="resume" sandbox="" srcdoc="{srcdoc}" title="Generated resume"></iframe>
<script>
document.getElementById("reset").addEventListener("click", async () => {{
  await fetch("/api/reset", {{ method: "POST" }});
  window.location.href = "/";
}});
</script>
</body>
</html>
"#,
        style = STYLE,
        pdf_link = pdf_link,
        srcdoc = escape(&result.html),
    )
}

/// Landing page with the resume form
pub fn landing_page() -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Resume Forge</title>
<style>{style}</style>
</head>
<body>
<section class="hero">
  <h1>Build a resume that gets read</h1>
  <button class="button" id="start">Get started</button>
</section>
<form id="resume-form" hidden>
  <label>Full name <input name="fullName" required></label>
  <label>Email <input name="email" type="email" required></label>
  <label>Phone <input name="phone"></label>
  <label>Location <input name="location"></label>
  <label>LinkedIn <input name="linkedin"></label>
  <label>Target role <input name="targetRole" required></label>
  <label>Experience level
    <select name="experienceLevel">
      <option value="entry">Entry</option>
      <option value="mid" selected>Mid</option>
      <option value="senior">Senior</option>
      <option value="executive">Executive</option>
    </select>
  </label>
  <label>Summary <textarea name="summary"></textarea></label>
  <label>Experience <textarea name="experience" required></textarea></label>
  <label>Education <textarea name="education" required></textarea></label>
  <label>Skills <textarea name="skills" required></textarea></label>
  <label>Certifications <textarea name="certifications"></textarea></label>
  <label>Template
    <select name="template">
      <option value="modern" selected>Modern</option>
      <option value="classic">Classic</option>
      <option value="minimal">Minimal</option>
    </select>
  </label>
  <button class="button" type="submit">Generate resume</button>
</form>
<div id="overlay" class="overlay" hidden>Generating your resume&hellip;</div>
<script>
const form = document.getElementById("resume-form");
const overlay = document.getElementById("overlay");
document.getElementById("start").addEventListener("click", async () => {{
  const response = await fetch("/api/start", {{ method: "POST" }});
  if (!response.ok) {{
    window.location.href = "/";
    return;
  }}
  form.hidden = false;
  setTimeout(() => form.scrollIntoView({{ behavior: "smooth" }}), 100);
}});
form.addEventListener("submit", async (event) => {{
  event.preventDefault();
  const values = {{}};
  for (const [key, value] of new FormData(form)) {{
    if (value !== "") values[key] = value;
  }}
  const submit = form.querySelector("button[type=submit]");
  submit.disabled = true;
  overlay.hidden = false;
  try {{
    const response = await fetch("/api/submit", {{
      method: "POST",
      headers: {{ "Content-Type": "application/json" }},
      body: JSON.stringify(values),
    }});
    if (response.ok) {{
      window.location.href = "/resume";
      return;
    }}
    const body = await response.json().catch(() => ({{}}));
    alert(body.error || "{notice}");
  }} finally {{
    overlay.hidden = true;
    submit.disabled = false;
  }}
}});
</script>
</body>
</html>
"#,
        style = STYLE,
        notice = FAILURE_NOTICE,
    )
}

const STYLE: &str = "body{margin:0;font-family:system-ui,sans-serif;background:#0b1222;color:#e2e8f0}\
header,.hero,form{max-width:960px;margin:0 auto;padding:2rem}\
header{display:flex;justify-content:space-between;align-items:center}\
form{display:grid;gap:1rem}label{display:grid;gap:.25rem}\
input,select,textarea{padding:.5rem;border-radius:4px;border:1px solid #334155}\
.button{background:#d4a72c;color:#0b1222;border:0;padding:.6rem 1.2rem;border-radius:4px;cursor:pointer;text-decoration:none;margin-left:.5rem}\
.overlay{position:fixed;inset:0;display:flex;align-items:center;justify-content:center;background:rgba(11,18,34,.85);font-size:1.5rem}\
.overlay[hidden]{display:none}\
.resume{display:block;width:100%;height:calc(100vh - 7rem);border:0;background:#fff}";
