use crate::models::{AnalyticsDocument, LoggedUserEntry, LoggedUserRegistry, Role, RoleStats};

pub fn render_index(analytics: &AnalyticsDocument, logged_users: &LoggedUserRegistry) -> String {
    INDEX_HTML
        .replace("{{STUDENT_CARDS}}", &stat_cards(&analytics.students))
        .replace("{{ALUMNI_CARDS}}", &stat_cards(&analytics.alumni))
        .replace("{{STUDENT_ROWS}}", &user_rows(logged_users.get(&Role::Student)))
        .replace("{{ALUMNI_ROWS}}", &user_rows(logged_users.get(&Role::Alumni)))
}

fn stat_cards(stats: &RoleStats) -> String {
    [
        ("Registered", stats.total_registered),
        ("New this week", stats.recent_registrations),
        ("Logins", stats.total_logins),
        ("Logins this week", stats.recent_logins),
        ("Active", stats.active_users),
    ]
    .iter()
    .map(|(label, value)| {
        format!(
            r#"<div class="stat"><span class="label">{label}</span><span class="value">{value}</span></div>"#
        )
    })
    .collect()
}

fn user_rows(entries: Option<&Vec<LoggedUserEntry>>) -> String {
    let entries = match entries {
        Some(entries) if !entries.is_empty() => entries,
        _ => return r#"<tr><td colspan="4" class="empty">Nobody has logged in yet</td></tr>"#.to_string(),
    };

    entries
        .iter()
        .rev()
        .map(|entry| {
            let status = entry.status.as_str();
            format!(
                r#"<tr><td>{}</td><td>{}</td><td>{}</td><td><span class="badge {status}">{status}</span></td></tr>"#,
                escape(&entry.name),
                escape(&entry.email),
                escape(&entry.login_time),
            )
        })
        .collect()
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Mentorship Activity</title>
  <style>
    :root {
      --bg: #f4f6fb;
      --ink: #1f2a3d;
      --muted: #6b7385;
      --accent: #3056d3;
      --card: #ffffff;
      --shadow: 0 18px 40px rgba(31, 42, 61, 0.12);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Segoe UI", "Helvetica Neue", sans-serif;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(960px, 100%);
      margin: 0 auto;
      display: grid;
      gap: 28px;
    }

    header {
      display: flex;
      flex-wrap: wrap;
      align-items: center;
      justify-content: space-between;
      gap: 16px;
    }

    h1 {
      margin: 0;
      font-size: clamp(1.8rem, 4vw, 2.4rem);
    }

    h2 {
      margin: 0 0 12px;
      font-size: 1.2rem;
    }

    section {
      background: var(--card);
      border-radius: 20px;
      box-shadow: var(--shadow);
      padding: 24px;
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(150px, 1fr));
      gap: 14px;
    }

    .stat {
      border: 1px solid rgba(31, 42, 61, 0.08);
      border-radius: 14px;
      padding: 14px;
      display: grid;
      gap: 6px;
    }

    .stat .label {
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.1em;
      color: var(--muted);
    }

    .stat .value {
      font-size: 1.6rem;
      font-weight: 600;
      color: var(--accent);
    }

    table {
      width: 100%;
      border-collapse: collapse;
    }

    th, td {
      text-align: left;
      padding: 10px 8px;
      border-bottom: 1px solid rgba(31, 42, 61, 0.08);
    }

    td.empty {
      color: var(--muted);
      text-align: center;
    }

    .badge {
      border-radius: 999px;
      padding: 2px 10px;
      font-size: 0.8rem;
      background: #e3e7ef;
    }

    .badge.online {
      background: #d5f5e3;
      color: #1d7a46;
    }

    .badge.away {
      background: #fff1cc;
      color: #8a6200;
    }

    button {
      border: none;
      border-radius: 999px;
      padding: 12px 18px;
      font-weight: 600;
      background: var(--accent);
      color: white;
      cursor: pointer;
    }

    #status {
      color: var(--muted);
      min-height: 1.2em;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Mentorship Activity</h1>
      <div>
        <button id="reset" type="button">Reset weekly counters</button>
        <div id="status"></div>
      </div>
    </header>

    <section>
      <h2>Students</h2>
      <div class="panel">{{STUDENT_CARDS}}</div>
    </section>

    <section>
      <h2>Alumni</h2>
      <div class="panel">{{ALUMNI_CARDS}}</div>
    </section>

    <section>
      <h2>Logged students</h2>
      <table>
        <thead><tr><th>Name</th><th>Email</th><th>Login time</th><th>Status</th></tr></thead>
        <tbody>{{STUDENT_ROWS}}</tbody>
      </table>
    </section>

    <section>
      <h2>Logged alumni</h2>
      <table>
        <thead><tr><th>Name</th><th>Email</th><th>Login time</th><th>Status</th></tr></thead>
        <tbody>{{ALUMNI_ROWS}}</tbody>
      </table>
    </section>
  </main>

  <script>
    const statusEl = document.getElementById('status');

    document.getElementById('reset').addEventListener('click', async () => {
      statusEl.textContent = 'Resetting...';
      const res = await fetch('/api/analytics/reset-weekly', { method: 'POST' });
      if (!res.ok) {
        statusEl.textContent = (await res.text()) || 'Request failed';
        return;
      }
      window.location.reload();
    });
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserStatus;

    #[test]
    fn renders_counts_and_escapes_names() {
        let mut registry = LoggedUserRegistry::new();
        registry.insert(
            Role::Student,
            vec![LoggedUserEntry {
                id: 1,
                name: "<b>Eve</b>".to_string(),
                email: "eve@uni.edu".to_string(),
                login_time: "1/2/2026, 9:00:00 AM".to_string(),
                status: UserStatus::Online,
            }],
        );

        let html = render_index(&AnalyticsDocument::default(), &registry);
        assert!(html.contains(">892<"));
        assert!(html.contains(">245<"));
        assert!(html.contains("&lt;b&gt;Eve&lt;/b&gt;"));
        assert!(html.contains(r#"class="badge online""#));
        assert!(html.contains("Nobody has logged in yet"));
        assert!(!html.contains("{{"));
    }
}
