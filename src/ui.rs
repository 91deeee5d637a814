use crate::layout::LayoutConfig;
use crate::models::{Bubble, StatsResponse};
use crate::storage::MAX_ANSWER_CHARS;
use chrono::NaiveDate;
use std::fmt::Write;

pub fn render_survey(error: Option<&str>, draft: &str) -> String {
    let message = match error {
        Some(message) => format!(r#"<div class="message error">{}</div>"#, escape_html(message)),
        None => String::new(),
    };

    SURVEY_HTML
        .replace("{{MESSAGE}}", &message)
        .replace("{{MAX}}", &MAX_ANSWER_CHARS.to_string())
        .replace("{{COUNT}}", &draft.chars().count().to_string())
        .replace("{{DRAFT}}", &escape_html(draft))
}

pub fn render_stats(stats: &StatsResponse, layout: &LayoutConfig) -> String {
    let mut options = String::from(r#"<option value="">Select a day</option>"#);
    for day in &stats.days {
        let selected = if stats.date.as_deref() == Some(day.as_str()) { " selected" } else { "" };
        let _ = write!(
            options,
            r#"<option value="{}"{selected}>{}</option>"#,
            escape_html(day),
            escape_html(&day_label(day)),
        );
    }

    let bubbles: String = stats.bubbles.iter().map(render_bubble).collect();
    let no_data = if stats.bubbles.is_empty() {
        r#"<p class="no-data">No responses yet. <a href="/">Be the first to answer.</a></p>"#
    } else {
        ""
    };

    let heading = match &stats.date {
        Some(day) => format!("Answers for {}", escape_html(&day_label(day))),
        None => "Answers".to_string(),
    };

    STATS_HTML
        .replace("{{HEADING}}", &heading)
        .replace("{{OPTIONS}}", &options)
        .replace("{{TOTAL}}", &stats.total.to_string())
        .replace("{{WIDTH}}", &layout.canvas_width.to_string())
        .replace("{{HEIGHT}}", &layout.canvas_height.to_string())
        .replace("{{NO_DATA}}", no_data)
        .replace("{{BUBBLES}}", &bubbles)
}

fn render_bubble(bubble: &Bubble) -> String {
    let text = escape_html(&bubble.text);
    format!(
        concat!(
            r#"<div class="bubble" title="&quot;{text}&quot;: {count} mentioned this" "#,
            r#"style="width:{d:.0}px;height:{d:.0}px;left:{x:.2}%;top:{y:.2}%;"#,
            r#"background:{color};animation-delay:{delay:.2}s">"#,
            r#"<div class="bubble-text">{text}</div><div class="bubble-count">{count}</div></div>"#,
        ),
        text = text,
        count = bubble.count,
        d = bubble.diameter,
        x = bubble.x,
        y = bubble.y,
        color = bubble.color,
        delay = bubble.delay,
    )
}

/// `2024-01-02` becomes `2024-01-02 (Tue)`; unparseable keys pass through.
pub fn day_label(day: &str) -> String {
    match NaiveDate::parse_from_str(day, "%Y-%m-%d") {
        Ok(date) => date.format("%Y-%m-%d (%a)").to_string(),
        Err(_) => day.to_string(),
    }
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

const SURVEY_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Daily Survey</title>
  <style>
    :root {
      --ink: #2b2a28;
      --accent: #ff6b4a;
      --card: rgba(255, 255, 255, 0.9);
    }

    body {
      margin: 0;
      min-height: 100vh;
      display: grid;
      place-items: center;
      background: linear-gradient(135deg, #f8f3e6, #ffe9d4 60%, #f9f2e9 100%);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
    }

    .app {
      width: min(640px, 100%);
      background: var(--card);
      border-radius: 24px;
      box-shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
      padding: 32px;
    }

    textarea {
      width: 100%;
      min-height: 140px;
      box-sizing: border-box;
      border-radius: 12px;
      padding: 12px;
      font: inherit;
    }

    .counter { text-align: right; color: #666; font-size: 0.9rem; }
    .counter.near-limit { color: #ff6b6b; }

    button {
      margin-top: 16px;
      border: none;
      border-radius: 999px;
      padding: 12px 28px;
      background: var(--accent);
      color: white;
      font-weight: 600;
      cursor: pointer;
    }

    .message { margin-bottom: 16px; padding: 12px 16px; border-radius: 12px; }
    .message.error { background: #ffe3e0; color: #b3261e; }
  </style>
</head>
<body>
  <main class="app">
    <h1>What did you work on today?</h1>
    {{MESSAGE}}
    <form method="post" action="/submit">
      <textarea id="answer" name="answer" maxlength="{{MAX}}" placeholder="Type your answer">{{DRAFT}}</textarea>
      <div class="counter" id="counter"><span id="count">{{COUNT}}</span> / {{MAX}}</div>
      <button type="submit">Submit</button>
    </form>
    <p><a href="/stats">See today's answers</a></p>
  </main>
  <script>
    const answer = document.getElementById('answer');
    const counter = document.getElementById('counter');
    answer.addEventListener('input', () => {
      document.getElementById('count').textContent = answer.value.length;
      counter.classList.toggle('near-limit', answer.value.length > {{MAX}} - 50);
    });
  </script>
</body>
</html>
"#;

const STATS_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Daily Survey Results</title>
  <style>
    body {
      margin: 0;
      padding: 32px 18px;
      background: #f7f4ee;
      color: #2b2a28;
      font-family: "Trebuchet MS", sans-serif;
    }

    header { display: flex; gap: 16px; align-items: center; flex-wrap: wrap; }

    .canvas {
      position: relative;
      width: min(100%, {{WIDTH}}px);
      height: {{HEIGHT}}px;
      margin: 24px auto;
      border-radius: 24px;
      background: white;
      overflow: hidden;
    }

    .bubble {
      position: absolute;
      transform: translate(-50%, -50%);
      border-radius: 50%;
      display: flex;
      flex-direction: column;
      align-items: center;
      justify-content: center;
      text-align: center;
      color: #2b2a28;
      box-shadow: 0 8px 24px rgba(0, 0, 0, 0.12);
      animation: float 6s ease-in-out infinite;
      cursor: pointer;
      overflow: hidden;
    }

    .bubble-text { padding: 0 10px; font-size: 0.9rem; overflow-wrap: anywhere; }
    .bubble-count { font-weight: 700; }
    .no-data { text-align: center; padding-top: 120px; color: #777; }

    @keyframes float {
      0%, 100% { margin-top: 0; }
      50% { margin-top: -10px; }
    }
  </style>
</head>
<body>
  <header>
    <h1>{{HEADING}}</h1>
    <form method="get" action="/stats">
      <select name="date" onchange="this.form.submit()">{{OPTIONS}}</select>
    </form>
    <span>{{TOTAL}} responses</span>
    <a href="/">Answer the survey</a>
  </header>
  <section class="canvas">
    {{NO_DATA}}
    {{BUBBLES}}
  </section>
  <script>
    document.querySelectorAll('.bubble').forEach((bubble) => {
      bubble.addEventListener('click', () => alert(bubble.title));
    });
  </script>
</body>
</html>
"#;
