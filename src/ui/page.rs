//! Dashboard page rendering
//!
//! Pure functions from a [`PageView`] to an HTML document. Handlers build
//! the view; nothing in here touches session state.

use chrono::{DateTime, Local};
use std::fmt::Write;

use super::style::APP_CSS;
use crate::metrics::NightlyMetrics;
use crate::session::{
    Feedback, DEFAULT_QUALITY, DURATION_STEP, MAX_DURATION, MAX_QUALITY, MIN_DURATION,
};

/// Values the feedback widgets are rendered with
#[derive(Debug, Clone, PartialEq)]
pub struct FormValues {
    pub quality: u8,
    pub duration: f64,
    pub notes: String,
}

impl FormValues {
    /// Widget defaults: quality 72, duration = tonight's predicted total
    pub fn defaults(metrics: &NightlyMetrics) -> Self {
        Self {
            quality: DEFAULT_QUALITY,
            duration: metrics.total_sleep_hours,
            notes: String::new(),
        }
    }
}

impl From<&Feedback> for FormValues {
    fn from(feedback: &Feedback) -> Self {
        Self {
            quality: feedback.quality,
            duration: feedback.duration,
            notes: feedback.notes.clone(),
        }
    }
}

/// Everything needed to render one dashboard page
#[derive(Debug, Clone)]
pub struct PageView<'a> {
    pub title: &'a str,
    pub wide: bool,
    pub now: DateTime<Local>,
    pub metrics: &'a NightlyMetrics,
    pub form: FormValues,
    /// Present only on the render that follows a submission
    pub acknowledgment: Option<&'a Feedback>,
}

/// Render the full dashboard document
pub fn render_page(view: &PageView<'_>) -> String {
    let mut html = String::with_capacity(APP_CSS.len() + 8 * 1024);
    let title = escape_html(view.title);

    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width,initial-scale=1\">\n\
         <title>{title}</title>\n<style>{css}</style>\n</head>\n<body>\n\
         <main class=\"page{wide}\">\n",
        title = title,
        css = APP_CSS,
        wide = if view.wide { " wide" } else { "" },
    );

    render_header(&mut html, &title, view.now);
    html.push_str("<div class=\"spacer\"></div>\n<div class=\"row\">\n");
    render_predictions(&mut html, view.metrics);
    render_feedback(&mut html, &view.form, view.acknowledgment);
    html.push_str("</div>\n<div class=\"spacer\"></div>\n");
    render_footer(&mut html, view.metrics.seed);

    html.push_str("</main>\n</body>\n</html>\n");
    html
}

fn render_header(html: &mut String, title: &str, now: DateTime<Local>) {
    let _ = write!(
        html,
        "<div class=\"card\"><div class=\"spread\"><div>\
         <h1 class=\"header-title\">{title}</h1>\
         <div class=\"header-date\">{date}</div>\
         </div></div></div>\n",
        title = title,
        date = now.format("%A, %B %d, %Y"),
    );
}

fn render_predictions(html: &mut String, metrics: &NightlyMetrics) {
    html.push_str(
        "<section class=\"card col-2\">\n\
         <div class=\"spread\"><div class=\"metric-title\">AI sleep predictions</div>\
         <div class=\"accent-pill\">beta</div></div>\n<div class=\"metrics\">\n",
    );

    let delta_class = if metrics.score_delta >= 0 { "up" } else { "down" };
    let _ = write!(
        html,
        "<div class=\"metric\"><div class=\"metric-label\">Sleep Score</div>\
         <div class=\"metric-value\">{score}</div>\
         <div class=\"metric-delta {class}\">{arrow} {delta}</div></div>\n",
        score = metrics.sleep_score,
        class = delta_class,
        arrow = if metrics.score_delta >= 0 { "&#8593;" } else { "&#8595;" },
        delta = metrics.score_delta,
    );
    render_metric(html, "Total Sleep (hrs)", &format_hours(metrics.total_sleep_hours));
    render_metric(
        html,
        "Deep (hrs) / REM (hrs)",
        &format!(
            "{} / {}",
            format_hours(metrics.deep_sleep_hours),
            format_hours(metrics.rem_sleep_hours)
        ),
    );
    html.push_str("</div>\n");

    let _ = write!(
        html,
        "<div class=\"progress\" role=\"progressbar\" aria-valuenow=\"{score}\" \
         aria-valuemin=\"0\" aria-valuemax=\"100\">\
         <div class=\"progress-bar\" style=\"width:{pct:.0}%\"></div></div>\n\
         <h3 style=\"margin-top:12px\">{label}</h3>\n\
         <div class=\"small-muted\">Sleep latency: {latency} min</div>\n\
         <hr style=\"opacity:0.12\"/>\n",
        score = metrics.sleep_score,
        pct = metrics.progress_fraction() * 100.0,
        label = escape_html(&metrics.lunar_label),
        latency = metrics.sleep_latency_minutes,
    );

    html.push_str(
        "<table class=\"stages\">\n<thead><tr><th>stage</th><th>hours</th></tr></thead>\n<tbody>\n",
    );
    for row in &metrics.stage_breakdown {
        let _ = writeln!(
            html,
            "<tr><td>{}</td><td>{}</td></tr>",
            row.stage,
            format_hours(row.hours)
        );
    }
    html.push_str("</tbody>\n</table>\n</section>\n");
}

fn render_metric(html: &mut String, label: &str, value: &str) {
    let _ = writeln!(
        html,
        "<div class=\"metric\"><div class=\"metric-label\">{}</div>\
         <div class=\"metric-value\">{}</div></div>",
        label, value
    );
}

fn render_feedback(html: &mut String, form: &FormValues, acknowledgment: Option<&Feedback>) {
    let _ = write!(
        html,
        "<section class=\"card col-1\">\n<div class=\"metric-title\">Sleep feedback</div>\n\
         <form class=\"feedback\" method=\"post\" action=\"/feedback\" novalidate>\n\
         <label for=\"quality\">How would you rate your sleep quality last night? \
         <output id=\"quality-value\">{quality}</output></label>\n\
         <input type=\"range\" id=\"quality\" name=\"quality\" min=\"0\" max=\"{max_q}\" \
         step=\"1\" value=\"{quality}\" oninput=\"document.getElementById('quality-value').value=this.value\">\n\
         <label for=\"duration\">How many hours did you sleep?</label>\n\
         <input type=\"number\" id=\"duration\" name=\"duration\" min=\"{min_d}\" max=\"{max_d}\" \
         step=\"{step}\" value=\"{duration}\">\n\
         <label for=\"notes\">Notes (what woke you, dreams, noises, comfort...)</label>\n\
         <textarea id=\"notes\" name=\"notes\" placeholder=\"I woke twice, dreams about...\">{notes}</textarea>\n\
         <button type=\"submit\" class=\"button-neon\">Submit feedback</button>\n\
         </form>\n",
        quality = form.quality,
        max_q = MAX_QUALITY,
        min_d = format_hours(MIN_DURATION),
        max_d = format_hours(MAX_DURATION),
        step = DURATION_STEP,
        duration = format_hours(form.duration),
        notes = escape_html(&form.notes),
    );

    if let Some(feedback) = acknowledgment {
        render_acknowledgment(html, feedback);
    }

    html.push_str("</section>\n");
}

/// Summary shown after a successful submission
fn render_acknowledgment(html: &mut String, feedback: &Feedback) {
    let _ = write!(
        html,
        "<div class=\"ack\" role=\"status\">\n\
         <div class=\"ack-title\">Thanks \u{2014} feedback received.</div>\n\
         <div><strong>Quality:</strong> {quality} / 100</div>\n\
         <div><strong>Duration:</strong> {duration} hrs</div>\n",
        quality = feedback.quality,
        duration = format_hours(feedback.duration),
    );

    if feedback.has_notes() {
        let _ = writeln!(
            html,
            "<div><strong>Notes:</strong> {}</div>",
            escape_html(&feedback.notes)
        );
    }

    html.push_str("</div>\n");
}

fn render_footer(html: &mut String, seed: u64) {
    let _ = write!(
        html,
        "<div class=\"card\"><div class=\"spread\">\
         <div><span class=\"footer-note\">Neurowake \u{2014} mock AI sleep tool \u{b7} \
         UI theme: blue \u{2192} purple gradients</span></div>\
         <div><small class=\"small-muted\">seed: {seed}</small></div>\
         </div></div>\n",
        seed = seed,
    );
}

/// Format an hour value, always with at least one decimal (8 -> "8.0")
pub fn format_hours(hours: f64) -> String {
    if hours.fract() == 0.0 {
        format!("{:.1}", hours)
    } else {
        hours.to_string()
    }
}

/// Escape text for safe inclusion in HTML content and attribute values
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::generate;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 9, 7, 30, 0).unwrap()
    }

    fn view<'a>(metrics: &'a NightlyMetrics, ack: Option<&'a Feedback>) -> PageView<'a> {
        PageView {
            title: "NEUROWAKE",
            wide: true,
            now: fixed_now(),
            metrics,
            form: FormValues::defaults(metrics),
            acknowledgment: ack,
        }
    }

    #[test]
    fn test_header_and_footer() {
        let metrics = generate(4242);
        let html = render_page(&view(&metrics, None));

        assert!(html.contains("<title>NEUROWAKE</title>"));
        assert!(html.contains("Saturday, March 09, 2024"));
        assert!(html.contains("seed: 4242"));
        assert!(html.contains("accent-pill"));
        assert!(html.contains("footer-note"));
        assert!(html.contains("--bg1: #061f4e"));
    }

    #[test]
    fn test_metrics_rendered() {
        let metrics = generate(99);
        let html = render_page(&view(&metrics, None));

        assert!(html.contains(&format!(
            "<div class=\"metric-value\">{}</div>",
            metrics.sleep_score
        )));
        assert!(html.contains(&format!(
            "{} / {}",
            format_hours(metrics.deep_sleep_hours),
            format_hours(metrics.rem_sleep_hours)
        )));
        assert!(html.contains(&metrics.lunar_label));
        assert!(html.contains(&format!("aria-valuenow=\"{}\"", metrics.sleep_score)));
        for stage in ["Light", "Deep", "REM", "Awake"] {
            assert!(html.contains(&format!("<tr><td>{}</td>", stage)));
        }
    }

    #[test]
    fn test_form_defaults() {
        let metrics = generate(5);
        let html = render_page(&view(&metrics, None));

        assert!(html.contains("value=\"72\""));
        assert!(html.contains(&format!(
            "step=\"0.25\" value=\"{}\"",
            format_hours(metrics.total_sleep_hours)
        )));
        assert!(!html.contains("feedback received"));
    }

    #[test]
    fn test_form_submits_off_step_default() {
        // Predicted totals sit on a 0.1 grid, the duration arrows step by 0.25
        let off_step = (0..1_000)
            .map(generate)
            .find(|m| (m.total_sleep_hours / DURATION_STEP).fract() != 0.0)
            .unwrap();
        let html = render_page(&view(&off_step, None));

        assert!(html.contains(&format!(
            "step=\"0.25\" value=\"{}\"",
            format_hours(off_step.total_sleep_hours)
        )));
        assert!(html.contains("action=\"/feedback\" novalidate>"));
    }

    #[test]
    fn test_acknowledgment() {
        let metrics = generate(5);
        let feedback = Feedback::new(80, 7.5, "woke once");
        let mut page = view(&metrics, Some(&feedback));
        page.form = FormValues::from(&feedback);
        let html = render_page(&page);

        assert!(html.contains("Thanks \u{2014} feedback received."));
        assert!(html.contains("<strong>Quality:</strong> 80 / 100"));
        assert!(html.contains("<strong>Duration:</strong> 7.5 hrs"));
        assert!(html.contains("<strong>Notes:</strong> woke once"));
        assert!(html.contains(">woke once</textarea>"));
    }

    #[test]
    fn test_acknowledgment_without_notes() {
        let metrics = generate(5);
        let feedback = Feedback::new(60, 8.0, "  ");
        let html = render_page(&view(&metrics, Some(&feedback)));

        assert!(html.contains("<strong>Duration:</strong> 8.0 hrs"));
        assert!(!html.contains("<strong>Notes:</strong>"));
    }

    #[test]
    fn test_notes_are_escaped() {
        let metrics = generate(5);
        let feedback = Feedback::new(60, 8.0, "<script>alert('x')</script>");
        let html = render_page(&view(&metrics, Some(&feedback)));

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
    }

    #[test]
    fn test_format_hours() {
        assert_eq!(format_hours(8.0), "8.0");
        assert_eq!(format_hours(7.5), "7.5");
        assert_eq!(format_hours(7.25), "7.25");
        assert_eq!(format_hours(-0.3), "-0.3");
    }

    #[test]
    fn test_centered_layout() {
        let metrics = generate(1);
        let mut page = view(&metrics, None);
        page.wide = false;
        let html = render_page(&page);
        assert!(html.contains("<main class=\"page\">"));
    }
}
