//! Core data types: classifier input, severity categories and log records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{PredictorError, Result};

/// Severity class produced by the classifier.
///
/// Variants are declared from least to most severe so that the derived `Ord`
/// doubles as severity order in summaries and tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "NO ENFERMO")]
    NoEnfermo,
    #[serde(rename = "ENFERMEDAD LEVE")]
    Leve,
    #[serde(rename = "ENFERMEDAD AGUDA")]
    Aguda,
    #[serde(rename = "ENFERMEDAD CRÓNICA")]
    Cronica,
    #[serde(rename = "ENFERMEDAD TERMINAL")]
    Terminal,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::NoEnfermo,
        Category::Leve,
        Category::Aguda,
        Category::Cronica,
        Category::Terminal,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::NoEnfermo => "NO ENFERMO",
            Category::Leve => "ENFERMEDAD LEVE",
            Category::Aguda => "ENFERMEDAD AGUDA",
            Category::Cronica => "ENFERMEDAD CRÓNICA",
            Category::Terminal => "ENFERMEDAD TERMINAL",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Category {
    type Err = PredictorError;

    fn from_str(s: &str) -> Result<Self> {
        Category::ALL
            .into_iter()
            .find(|c| c.label() == s.trim())
            .ok_or_else(|| PredictorError::invalid_input(format!("categoría desconocida '{}'", s)))
    }
}

/// Classifier input. No range constraints; values are only required to be finite numbers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionInput {
    pub pcr: f64,
    pub fc: f64,
    pub edad: f64,
}

/// Form body of `POST /predecir` before coercion.
///
/// Fields are kept as strings so a missing or malformed value can be reported
/// by name instead of through the extractor's generic rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PredictionForm {
    pub pcr: Option<String>,
    pub fc: Option<String>,
    pub edad: Option<String>,
}

impl TryFrom<PredictionForm> for PredictionInput {
    type Error = PredictorError;

    fn try_from(form: PredictionForm) -> Result<Self> {
        Ok(PredictionInput {
            pcr: parse_field("pcr", form.pcr.as_deref())?,
            fc: parse_field("fc", form.fc.as_deref())?,
            edad: parse_field("edad", form.edad.as_deref())?,
        })
    }
}

fn parse_field(name: &str, raw: Option<&str>) -> Result<f64> {
    let raw = raw.map(str::trim).unwrap_or_default();
    if raw.is_empty() {
        return Err(PredictorError::invalid_input(format!(
            "el campo '{}' es obligatorio",
            name
        )));
    }
    let value: f64 = raw.parse().map_err(|_| {
        PredictorError::invalid_input(format!(
            "el campo '{}' debe ser numérico (recibido '{}')",
            name, raw
        ))
    })?;
    if !value.is_finite() {
        return Err(PredictorError::invalid_input(format!(
            "el campo '{}' debe ser un número finito",
            name
        )));
    }
    Ok(value)
}

/// One row of the prediction log. Never mutated once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub fecha: DateTime<Utc>,
    pub pcr: f64,
    pub fc: f64,
    pub edad: f64,
    pub categoria: Category,
}

impl PredictionRecord {
    pub fn new(input: PredictionInput, categoria: Category) -> Self {
        Self::at(Utc::now(), input, categoria)
    }

    pub fn at(fecha: DateTime<Utc>, input: PredictionInput, categoria: Category) -> Self {
        Self {
            fecha,
            pcr: input.pcr,
            fc: input.fc,
            edad: input.edad,
            categoria,
        }
    }

    pub fn input(&self) -> PredictionInput {
        PredictionInput {
            pcr: self.pcr,
            fc: self.fc,
            edad: self.edad,
        }
    }
}
