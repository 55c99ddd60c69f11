//! HTML front end.
//!
//! One page per session: the training table with its accuracy, five
//! selectors, the predict button, the latest prediction and a model
//! information panel. The form submits with GET, so a prediction is just
//! a URL.

use axum::extract::{Path, Query, State};
use axum::response::{Html, Redirect};
use catalog::{options, Axis, Category, MovieFeatures, Outcome, TrainingTable};
use recommender::{ModelInfo, Prediction};
use serde::Deserialize;

use crate::error::AppError;
use crate::session::{Session, SessionStore};

/// The five selector values as submitted by the form.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SelectionQuery {
    pub genre: u8,
    pub age_rating: u8,
    pub length: u8,
    pub era: u8,
    pub user_rating: u8,
}

impl SelectionQuery {
    fn codes(&self) -> [u8; 5] {
        [
            self.genre,
            self.age_rating,
            self.length,
            self.era,
            self.user_rating,
        ]
    }
}

/// `GET /`: start a session and send the browser to its page.
pub async fn index(State(store): State<SessionStore>) -> Result<Redirect, AppError> {
    let session = store.create().await?;
    Ok(Redirect::to(&format!("/sessions/{}", session.id())))
}

/// `GET /sessions/:id`: the page with the default selection and no prediction.
pub async fn show_session(
    State(store): State<SessionStore>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let session = store.get(&id).await?;
    Ok(Html(render_page(&session, &MovieFeatures::default(), None)))
}

/// `GET /sessions/:id/predict?genre=..`: the page with a prediction.
///
/// Selections must be members of their axes; that is the only validation.
pub async fn predict(
    State(store): State<SessionStore>,
    Path(id): Path<String>,
    Query(selection): Query<SelectionQuery>,
) -> Result<Html<String>, AppError> {
    let session = store.get(&id).await?;
    let features = MovieFeatures::from_codes(selection.codes())?;
    let prediction = session.predict(&features)?;
    Ok(Html(render_page(&session, &features, Some(&prediction))))
}

const STYLE: &str = "\
body{font-family:sans-serif;margin:2rem auto;max-width:1100px;color:#222}\
.columns{display:flex;gap:2rem;flex-wrap:wrap}\
.columns section{flex:1;min-width:420px}\
table{border-collapse:collapse;width:100%;font-size:.9rem}\
th,td{border-bottom:1px solid #ddd;padding:.3rem .5rem;text-align:left}\
label{display:block;margin-top:.8rem}\
select{width:100%;padding:.4rem}\
button{margin-top:1rem;padding:.6rem 1.2rem}\
.will-watch{background:#e3f6e5;color:#1b6e2a;padding:.8rem;margin-top:1rem}\
.wont-watch{background:#fbe4e4;color:#8a1c1c;padding:.8rem;margin-top:1rem}\
.info{background:#eef3fb;padding:.8rem;margin-top:1rem}\
.accuracy{background:#e3f6e5;padding:.6rem}";

/// Render the full page for a session.
pub fn render_page(
    session: &Session,
    selection: &MovieFeatures,
    prediction: Option<&Prediction>,
) -> String {
    let report = session.report();
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Movie Recommendation ML</title>\n");
    html.push_str(&format!("<style>{}</style>\n", STYLE));
    html.push_str("</head>\n<body>\n");
    html.push_str("<h1>🎬 Movie Recommendation ML Model</h1>\n");
    html.push_str("<p>Supervised Learning System for Movie Preferences</p>\n");
    html.push_str("<div class=\"columns\">\n");

    // Left: training data
    html.push_str("<section>\n<h2>📊 Training Data</h2>\n");
    html.push_str(&render_training_table(&report.table));
    html.push_str(&format!(
        "<p class=\"accuracy\">🎯 Model Accuracy: {:.1}%</p>\n",
        report.accuracy * 100.0
    ));
    html.push_str("</section>\n");

    // Right: prediction form
    html.push_str("<section>\n<h2>🧠 Make Prediction</h2>\n");
    html.push_str(&render_form(session.id(), selection));
    if let Some(prediction) = prediction {
        html.push_str(&render_prediction(prediction));
    }
    html.push_str(&render_selection(selection));
    html.push_str("</section>\n</div>\n");

    html.push_str(&render_model_info(&session.model_info(), report.accuracy));
    html.push_str("</body>\n</html>\n");
    html
}

fn render_training_table(table: &TrainingTable) -> String {
    let mut html = String::from("<table>\n<thead><tr><th>#</th>");
    for axis in Axis::ALL {
        html.push_str(&format!("<th>{}</th>", escape(axis.title())));
    }
    html.push_str("</tr></thead>\n<tbody>\n");

    for row in table {
        let features = &row.features;
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            row.id,
            escape(features.genre.label()),
            escape(features.age_rating.label()),
            escape(features.length.label()),
            escape(features.era.label()),
            escape(features.user_rating.label()),
            escape(row.outcome.label()),
        ));
    }

    html.push_str("</tbody>\n</table>\n");
    html
}

fn render_form(session_id: &str, selection: &MovieFeatures) -> String {
    let mut html = format!(
        "<form method=\"get\" action=\"/sessions/{}/predict\">\n",
        escape(session_id)
    );

    for (axis, selected) in Axis::FEATURES.into_iter().zip(selection.codes()) {
        html.push_str(&format!(
            "<label for=\"{col}\">{title}</label>\n<select id=\"{col}\" name=\"{col}\">\n",
            col = axis.column(),
            title = escape(axis.title())
        ));
        for (code, label) in options(axis) {
            let marker = if code == selected { " selected" } else { "" };
            html.push_str(&format!(
                "<option value=\"{}\"{}>{}</option>\n",
                code,
                marker,
                escape(label)
            ));
        }
        html.push_str("</select>\n");
    }

    html.push_str("<button type=\"submit\">🚀 Predict Recommendation</button>\n</form>\n");
    html
}

fn render_prediction(prediction: &Prediction) -> String {
    let (class, icon, verdict) = match prediction.outcome {
        Outcome::WillWatch => ("will-watch", "✅", "This movie is recommended!"),
        Outcome::WontWatch => ("wont-watch", "❌", "This movie is not recommended"),
    };
    format!(
        "<div class=\"{}\">{} <strong>{}</strong> - {}<p>Confidence: {:.1}%</p></div>\n",
        class,
        icon,
        escape(prediction.outcome.label()),
        verdict,
        prediction.confidence() * 100.0
    )
}

fn render_selection(selection: &MovieFeatures) -> String {
    let mut html = String::from("<div class=\"info\">\n<strong>Current Selection:</strong>\n<ul>\n");
    let labels = [
        selection.genre.label(),
        selection.age_rating.label(),
        selection.length.label(),
        selection.era.label(),
        selection.user_rating.label(),
    ];
    for (axis, label) in Axis::FEATURES.into_iter().zip(labels) {
        html.push_str(&format!(
            "<li>{}: {}</li>\n",
            escape(axis.title()),
            escape(label)
        ));
    }
    html.push_str("</ul>\n</div>\n");
    html
}

fn render_model_info(info: &ModelInfo, accuracy: f64) -> String {
    let mut html = String::from("<section>\n<h3>Model Information</h3>\n<h4>Features Used</h4>\n<ul>\n");
    for axis in Axis::FEATURES {
        let labels: Vec<&str> = options(axis).into_iter().map(|(_, label)| label).collect();
        html.push_str(&format!(
            "<li>{} ({})</li>\n",
            escape(axis.title()),
            escape(&labels.join(", "))
        ));
    }
    html.push_str("</ul>\n<h4>Model Details</h4>\n<ul>\n");
    html.push_str(&format!(
        "<li>Algorithm: {} ({} trees, seed {})</li>\n",
        escape(&info.algorithm),
        info.n_estimators,
        info.seed
    ));
    html.push_str(&format!("<li>Training Samples: {}</li>\n", info.training_samples));
    html.push_str(&format!(
        "<li>Output Classes: {}</li>\n",
        escape(&info.classes.join(" / "))
    ));
    html.push_str(&format!(
        "<li>Accuracy: {:.1}% on training data</li>\n",
        accuracy * 100.0
    ));
    html.push_str("</ul>\n</section>\n");
    html
}

/// Escape text for use in HTML content and attribute values
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use recommender::ForestConfig;

    fn session() -> Session {
        Session::start(ForestConfig::default().with_estimators(10)).unwrap()
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("Won't Watch"), "Won&#39;t Watch");
        assert_eq!(escape("<a & b>"), "&lt;a &amp; b&gt;");
        assert_eq!(escape("PG-13"), "PG-13");
    }

    #[test]
    fn test_page_lists_every_training_row() {
        let session = session();
        let html = render_page(&session, &MovieFeatures::default(), None);

        assert_eq!(html.matches("<tr><td>").count(), 20);
        assert!(html.contains("Model Accuracy:"));
        assert!(html.contains("Training Samples: 20"));
        assert!(!html.contains("Confidence:"));
    }

    #[test]
    fn test_form_marks_current_selection() {
        let session = session();
        let html = render_page(&session, &MovieFeatures::default(), None);

        assert!(html.contains(&format!("action=\"/sessions/{}/predict\"", session.id())));
        assert!(html.contains("<option value=\"2\" selected>PG-13</option>"));
        assert!(html.contains("<option value=\"3\" selected>Modern</option>"));
        // Exactly one selected option per selector
        assert_eq!(html.matches(" selected>").count(), 5);
        assert!(html.contains("<li>Genre: Action</li>"));
    }

    #[test]
    fn test_prediction_box() {
        let will = Prediction {
            outcome: Outcome::WillWatch,
            probabilities: [0.125, 0.875],
        };
        let html = render_prediction(&will);
        assert!(html.contains("Will Watch"));
        assert!(html.contains("This movie is recommended!"));
        assert!(html.contains("Confidence: 87.5%"));

        let wont = Prediction {
            outcome: Outcome::WontWatch,
            probabilities: [0.6, 0.4],
        };
        let html = render_prediction(&wont);
        assert!(html.contains("Won&#39;t Watch"));
        assert!(html.contains("Confidence: 60.0%"));
    }
}
