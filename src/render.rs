//! HTML pages for the form, the prediction result and the history.

use axum::http::StatusCode;
use std::fmt::Write;

use crate::history::{HistorySummary, RECENT_LIMIT};
use crate::model::{Category, PredictionInput};

const STYLE: &str = "body{font-family:sans-serif;max-width:42rem;margin:2rem auto;padding:0 1rem}\
table{border-collapse:collapse;margin-bottom:1.5rem}\
th,td{border:1px solid #ccc;padding:.3rem .7rem;text-align:left}\
.categoria{font-weight:bold}";

/// Minimal HTML escaping for text and attribute content.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
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

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"es\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n{body}\n\
         <nav><a href=\"/\">Nueva predicción</a> | <a href=\"/historial\">Historial</a></nav>\n\
         </body>\n</html>\n",
        title = escape(title),
    )
}

pub fn index_page() -> String {
    let body = "<h1>Predicción de enfermedad</h1>\n\
        <form method=\"post\" action=\"/predecir\">\n\
        <label>PCR <input name=\"pcr\" type=\"number\" step=\"any\" required></label><br>\n\
        <label>Frecuencia cardíaca <input name=\"fc\" type=\"number\" step=\"any\" required></label><br>\n\
        <label>Edad <input name=\"edad\" type=\"number\" step=\"any\" required></label><br>\n\
        <button type=\"submit\">Predecir</button>\n\
        </form>";
    layout("Predicción de enfermedad", body)
}

pub fn prediction_page(input: &PredictionInput, categoria: Category) -> String {
    let body = format!(
        "<h1>Resultado</h1>\n\
         <p>PCR: {pcr} | FC: {fc} | Edad: {edad}</p>\n\
         <p>Categoría: <span class=\"categoria\">{categoria}</span></p>",
        pcr = input.pcr,
        fc = input.fc,
        edad = input.edad,
        categoria = escape(categoria.label()),
    );
    layout("Resultado de la predicción", &body)
}

pub fn history_page(summary: &HistorySummary) -> String {
    let mut body = String::from("<h1>Historial de predicciones</h1>\n");

    body.push_str("<h2>Total por Categoría</h2>\n<table>\n<tr><th>Categoría</th><th>Total</th></tr>\n");
    for (categoria, count) in &summary.counts {
        let _ = writeln!(
            body,
            "<tr><td>{}</td><td>{}</td></tr>",
            escape(categoria.label()),
            count
        );
    }
    let _ = writeln!(body, "<tr><th>Total</th><th>{}</th></tr>\n</table>", summary.total);

    let _ = writeln!(body, "<h2>Últimas {} Predicciones</h2>", RECENT_LIMIT);
    if summary.recent.is_empty() {
        body.push_str("<p>No hay predicciones registradas.</p>\n");
    } else {
        body.push_str(
            "<table>\n<tr><th>Fecha</th><th>PCR</th><th>FC</th><th>Edad</th><th>Categoría</th></tr>\n",
        );
        for record in &summary.recent {
            let _ = writeln!(
                body,
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                record.fecha.format("%Y-%m-%d %H:%M:%S"),
                record.pcr,
                record.fc,
                record.edad,
                escape(record.categoria.label())
            );
        }
        body.push_str("</table>\n");
    }

    layout("Historial", &body)
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    let body = format!(
        "<h1>Error {}</h1>\n<p>{}</p>",
        status.as_u16(),
        escape(message)
    );
    layout("Error", &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::summarize;
    use crate::model::PredictionRecord;

    #[test]
    fn test_escape() {
        assert_eq!(escape("<a href=\"x\">&'"), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
        assert_eq!(escape("Últimas"), "Últimas");
    }

    #[test]
    fn test_prediction_page_shows_label() {
        let input = PredictionInput {
            pcr: 5.0,
            fc: 100.0,
            edad: 25.0,
        };
        let html = prediction_page(&input, Category::Leve);
        assert!(html.contains("ENFERMEDAD LEVE"));
        assert!(html.contains("PCR: 5 | FC: 100 | Edad: 25"));
    }

    #[test]
    fn test_empty_history_page_has_headings() {
        let html = history_page(&summarize(&[]));
        assert!(html.contains("Total por Categoría"));
        assert!(html.contains("Últimas 5 Predicciones"));
        assert!(html.contains("No hay predicciones registradas."));
    }

    #[test]
    fn test_history_page_lists_records() {
        let record = PredictionRecord::new(
            PredictionInput {
                pcr: 30.0,
                fc: 160.0,
                edad: 90.0,
            },
            Category::Terminal,
        );
        let html = history_page(&summarize(&[record]));
        assert!(html.contains("<td>30</td><td>160</td><td>90</td><td>ENFERMEDAD TERMINAL</td>"));
    }

    #[test]
    fn test_error_page_escapes_message() {
        let html = error_page(StatusCode::BAD_REQUEST, "valor <script>");
        assert!(html.contains("Error 400"));
        assert!(html.contains("valor &lt;script&gt;"));
    }
}
