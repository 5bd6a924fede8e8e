use crate::models::Prediction;

/// Probability as a percentage with two decimals, e.g. 0.87 -> "87.00".
pub fn format_percent(probability: f64) -> String {
    format!("{:.2}", probability * 100.0)
}

/// One row per prediction, in server order. Empty input renders nothing.
pub fn render_rows(predictions: &[Prediction]) -> String {
    if predictions.is_empty() {
        return String::new();
    }
    let mut out = String::from("La imagen se puede clasificar en:\n");
    for p in predictions {
        out.push_str(&format!("Class Name: {}\n", p.class_name));
        out.push_str(&format!("Probability: {}%\n", format_percent(p.probability)));
    }
    out
}

/// The full utterance for a result set: one fixed-template sentence per
/// prediction, joined by single spaces, spoken in one call. Empty or absent
/// results produce no utterance.
pub fn speech_text(predictions: &[Prediction]) -> Option<String> {
    if predictions.is_empty() {
        return None;
    }
    Some(
        predictions
            .iter()
            .map(|p| {
                format!(
                    "La imagen se clasifica como {} con una probabilidad de {}%.",
                    p.class_name,
                    format_percent(p.probability)
                )
            })
            .collect::<Vec<_>>()
            .join(" "),
    )
}
