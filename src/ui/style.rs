//! Dashboard style sheet
//!
//! Colour scheme: deep blue background gradient (`--bg1` to `--bg2`) with
//! purple to aqua accents (`--accent1` to `--accent2`).

pub const APP_CSS: &str = r#"@import url('https://fonts.googleapis.com/css2?family=Inter:wght@300;400;600;800&display=swap');

:root{
  --bg1: #061f4e;
  --bg2: #123881;
  --accent1: #e12cfc;
  --accent2: #23cdfa;
}
html, body {
  min-height: 100%;
  margin: 0;
  font-family: 'Inter', sans-serif;
  color: white;
  background: linear-gradient(180deg, var(--bg1) 0%, var(--bg2) 100%);
  background-attachment: fixed;
}

.page { max-width: 1200px; margin: 0 auto; padding: 24px; }
.page.wide { max-width: none; }

.row { display: flex; gap: 18px; align-items: stretch; }
.col-2 { flex: 2; }
.col-1 { flex: 1; }
.spread { display: flex; justify-content: space-between; align-items: center; }
.spacer { height: 18px; }

/* glass cards */
.card {
  background: linear-gradient(180deg, rgba(255,255,255,0.03), rgba(255,255,255,0.02));
  border-radius: 16px;
  padding: 20px;
  box-shadow: 0 8px 30px rgba(2,6,23,0.5);
  border: 1px solid rgba(255,255,255,0.05);
  backdrop-filter: blur(6px) saturate(120%);
}

.header-title {
  font-size: 42px;
  font-weight: 800;
  letter-spacing: 1px;
  color: white;
  margin: 0;
  padding: 0;
  text-transform: uppercase;
  line-height: 1;
  text-shadow: 0 4px 28px rgba(33,12,80,0.55);
}

.header-date {
  font-size: 14px;
  color: rgba(255,255,255,0.8);
  margin-top: 6px;
}

.accent-pill {
  display: inline-block;
  padding: 6px 10px;
  border-radius: 999px;
  font-weight: 600;
  background: linear-gradient(90deg, var(--accent1), var(--accent2));
  color: white;
  box-shadow: 0 6px 18px rgba(33,12,80,0.36);
}

.metric-title {
  color: rgba(255,255,255,0.85);
  font-weight: 600;
}

.metrics { display: flex; gap: 18px; margin-top: 16px; }
.metric { flex: 1; }
.metric-label { font-size: 14px; color: rgba(255,255,255,0.7); }
.metric-value { font-size: 32px; font-weight: 600; }
.metric-delta { font-size: 13px; }
.metric-delta.up { color: #3dd68c; }
.metric-delta.down { color: #ff6b6b; }

.progress {
  margin-top: 12px;
  height: 8px;
  border-radius: 4px;
  background: rgba(255,255,255,0.1);
  overflow: hidden;
}
.progress-bar {
  height: 100%;
  background: linear-gradient(90deg, var(--accent1), var(--accent2));
}

.small-muted {
  color: rgba(255,255,255,0.7);
  font-size: 13px;
}

table.stages { width: 100%; border-collapse: collapse; }
table.stages th, table.stages td {
  text-align: left;
  padding: 6px 8px;
  border-bottom: 1px solid rgba(255,255,255,0.08);
}

form.feedback label { display: block; margin-top: 14px; color: rgba(255,255,255,0.85); }
form.feedback input, form.feedback textarea { width: 100%; box-sizing: border-box; margin-top: 6px; }
form.feedback textarea { min-height: 90px; }

.button-neon {
  background: linear-gradient(90deg, var(--accent1), var(--accent2));
  color: #fff !important;
  border: none;
  height: 44px;
  margin-top: 16px;
  padding: 10px 18px;
  border-radius: 10px;
  font-weight: 700;
  cursor: pointer;
}

.ack {
  margin-top: 16px;
  padding: 12px;
  border-radius: 10px;
  background: rgba(61,214,140,0.15);
}
.ack-title { font-weight: 600; margin-bottom: 8px; }

.footer-note {
  color: rgba(255,255,255,0.65);
  font-size: 12px;
}
"#;
