use std::fmt::Write;

use chrono::Local;
use dashboard_core::{DashboardViewModel, HistoryRowView};

const TITLE: &str = "Object Detection System";

pub fn render_header(view: &DashboardViewModel) -> String {
    format!("{TITLE} | Welcome, {}", view.display_name)
}

/// Upload panel: selected file, outcome and the available actions.
pub fn render_upload(view: &DashboardViewModel) -> String {
    let mut out = String::new();
    let preview = if view.has_preview { " (preview ready)" } else { "" };
    let _ = writeln!(out, "Image: {}{preview}", view.file_label);

    if let Some(error) = &view.error {
        let _ = writeln!(out, "Error: {error}");
    }
    if let Some(prediction) = &view.prediction {
        let _ = writeln!(out, "Prediction Result: {}", prediction.label);
        let _ = writeln!(out, "Confidence: {}", prediction.confidence_text);
    }

    let submit_state = if view.submit_enabled { "" } else { " (disabled)" };
    let _ = write!(out, "[{}]{submit_state}", view.submit_label);
    if view.clear_visible {
        out.push_str(" [Clear]");
    }
    out
}

pub fn render_history(view: &DashboardViewModel) -> String {
    let mut out = String::from("Prediction History");
    if let Some(message) = &view.empty_history_message {
        let _ = write!(out, "\n  {message}");
        return out;
    }
    for row in &view.history {
        let _ = write!(out, "\n  {}", render_history_row(row));
    }
    out
}

fn render_history_row(row: &HistoryRowView) -> String {
    let created = row.created_at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S");
    let mut line = format!(
        "#{} {} - {} confidence - {created}",
        row.id, row.label, row.confidence_text
    );
    if let Some(url) = &row.image_url {
        let _ = write!(line, " - {url}");
    }
    line
}

pub fn render(view: &DashboardViewModel) -> String {
    format!(
        "{}\n\n{}\n\n{}",
        render_header(view),
        render_upload(view),
        render_history(view)
    )
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use dashboard_core::{
        DashboardViewModel, HistoryRowView, PredictionView, EMPTY_HISTORY_MESSAGE,
    };
    use pretty_assertions::assert_eq;

    use super::{render_header, render_history, render_upload};

    fn base_view() -> DashboardViewModel {
        DashboardViewModel {
            display_name: "alice".into(),
            file_label: "cat.png".into(),
            has_preview: true,
            submit_enabled: true,
            submit_label: "Detect Object".into(),
            clear_visible: true,
            ..DashboardViewModel::default()
        }
    }

    #[test]
    fn header_greets_user() {
        assert_eq!(
            render_header(&base_view()),
            "Object Detection System | Welcome, alice"
        );
    }

    #[test]
    fn upload_shows_prediction() {
        let view = DashboardViewModel {
            prediction: Some(PredictionView {
                label: "cat".into(),
                confidence_text: "97.00%".into(),
            }),
            ..base_view()
        };
        assert_eq!(
            render_upload(&view),
            "Image: cat.png (preview ready)\nPrediction Result: cat\nConfidence: 97.00%\n[Detect Object] [Clear]"
        );
    }

    #[test]
    fn upload_shows_error_and_disabled_submit() {
        let view = DashboardViewModel {
            file_label: "Choose an image".into(),
            has_preview: false,
            error: Some("Please select an image".into()),
            submit_enabled: false,
            clear_visible: false,
            ..base_view()
        };
        assert_eq!(
            render_upload(&view),
            "Image: Choose an image\nError: Please select an image\n[Detect Object] (disabled)"
        );
    }

    #[test]
    fn empty_history_shows_hint() {
        let view = DashboardViewModel {
            empty_history_message: Some(EMPTY_HISTORY_MESSAGE.into()),
            ..base_view()
        };
        assert_eq!(
            render_history(&view),
            format!("Prediction History\n  {EMPTY_HISTORY_MESSAGE}")
        );
    }

    #[test]
    fn history_rows_list_label_and_confidence() {
        let view = DashboardViewModel {
            history: vec![HistoryRowView {
                id: 7,
                image_url: Some("http://testserver/media/cat.png".into()),
                label: "Tabby".into(),
                confidence_text: "91.00%".into(),
                created_at: Utc.with_ymd_and_hms(2024, 5, 2, 9, 30, 0).unwrap(),
            }],
            ..base_view()
        };
        let rendered = render_history(&view);
        assert!(rendered.starts_with("Prediction History\n  #7 Tabby - 91.00% confidence - "));
        assert!(rendered.ends_with(" - http://testserver/media/cat.png"));
    }
}
