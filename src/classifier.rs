//! Rule-based severity classifier.
//!
//! Rules are checked in order and the first match wins:
//!
//! 1. `ENFERMEDAD TERMINAL`: high PCR, high heart rate and elderly patient
//! 2. `ENFERMEDAD CRÓNICA`: elderly patient with moderately raised PCR or heart rate
//! 3. `ENFERMEDAD AGUDA`: high PCR or high heart rate
//! 4. `ENFERMEDAD LEVE`: mildly raised PCR or heart rate
//! 5. `NO ENFERMO`: everything else
//!
//! Every comparison is inclusive (`>=`). The cut points live in
//! [`ThresholdConfig`] so they can be tuned from `predictor.toml`.

use crate::config::ThresholdConfig;
use crate::model::{Category, PredictionInput};

/// Classify with the default thresholds.
pub fn classify(input: &PredictionInput) -> Category {
    classify_with(input, &ThresholdConfig::default())
}

/// Classify with explicit thresholds. Total over all numeric input; NaN
/// fails every comparison and lands in `NO ENFERMO`.
pub fn classify_with(input: &PredictionInput, t: &ThresholdConfig) -> Category {
    let PredictionInput { pcr, fc, edad } = *input;
    let elderly = edad >= t.edad_mayor;

    if pcr >= t.pcr_aguda && fc >= t.fc_aguda && elderly {
        Category::Terminal
    } else if elderly && (pcr >= t.pcr_cronica || fc >= t.fc_cronica) {
        Category::Cronica
    } else if pcr >= t.pcr_aguda || fc >= t.fc_aguda {
        Category::Aguda
    } else if pcr >= t.pcr_leve || fc >= t.fc_leve {
        Category::Leve
    } else {
        Category::NoEnfermo
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(pcr: f64, fc: f64, edad: f64) -> PredictionInput {
        PredictionInput { pcr, fc, edad }
    }

    #[test]
    fn test_known_mild_case() {
        assert_eq!(classify(&input(5.0, 100.0, 25.0)), Category::Leve);
    }

    #[test]
    fn test_known_terminal_case() {
        assert_eq!(classify(&input(30.0, 160.0, 90.0)), Category::Terminal);
    }

    #[test]
    fn test_healthy_values() {
        assert_eq!(classify(&input(1.0, 70.0, 40.0)), Category::NoEnfermo);
        assert_eq!(classify(&input(0.0, 0.0, 0.0)), Category::NoEnfermo);
    }

    #[test]
    fn test_boundaries_are_inclusive() {
        assert_eq!(classify(&input(2.99, 99.0, 30.0)), Category::NoEnfermo);
        assert_eq!(classify(&input(3.0, 60.0, 30.0)), Category::Leve);
        assert_eq!(classify(&input(1.0, 100.0, 30.0)), Category::Leve);
        assert_eq!(classify(&input(20.0, 80.0, 30.0)), Category::Aguda);
        assert_eq!(classify(&input(1.0, 140.0, 30.0)), Category::Aguda);
        assert_eq!(classify(&input(10.0, 80.0, 65.0)), Category::Cronica);
        assert_eq!(classify(&input(20.0, 140.0, 65.0)), Category::Terminal);
    }

    #[test]
    fn test_severe_young_patient_is_acute_not_terminal() {
        assert_eq!(classify(&input(30.0, 160.0, 40.0)), Category::Aguda);
    }

    #[test]
    fn test_elderly_with_one_high_marker_is_chronic() {
        assert_eq!(classify(&input(25.0, 90.0, 80.0)), Category::Cronica);
        assert_eq!(classify(&input(2.0, 125.0, 70.0)), Category::Cronica);
        // elderly but unremarkable markers
        assert_eq!(classify(&input(4.0, 90.0, 80.0)), Category::Leve);
    }

    #[test]
    fn test_nan_falls_through_to_no_enfermo() {
        assert_eq!(classify(&input(f64::NAN, f64::NAN, f64::NAN)), Category::NoEnfermo);
    }

    #[test]
    fn test_custom_thresholds() {
        let strict = ThresholdConfig {
            pcr_leve: 1.0,
            ..ThresholdConfig::default()
        };
        assert_eq!(classify_with(&input(1.5, 60.0, 30.0), &strict), Category::Leve);
        assert_eq!(classify(&input(1.5, 60.0, 30.0)), Category::NoEnfermo);
    }

    #[test]
    fn test_deterministic() {
        let i = input(12.0, 130.0, 50.0);
        assert_eq!(classify(&i), classify(&i));
    }
}
