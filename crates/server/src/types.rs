use chrono::{DateTime, Utc};
use cyons_common::{CyonsError, Style};
use cyons_llm::{
    ControlParams, ManifestoSet, ReviewReport, SummaryRequest, SummaryRun, BIAS_AVOIDANCE_RANGE,
    COMPRESSION_RANGE,
};
use serde::{Deserialize, Serialize};

/// Summarize / compile request
#[derive(Debug, Deserialize)]
pub struct SummarizeRequest {
    /// Style key; unknown or missing falls back to the default style
    #[serde(default)]
    pub style: Option<String>,

    /// Article text
    pub article: String,

    /// Compression level (0.1 - 1.0)
    #[serde(default)]
    pub compression: Option<f64>,

    /// Bias avoidance level (0.0 - 1.0)
    #[serde(default)]
    pub bias_avoidance: Option<f64>,
}

impl SummarizeRequest {
    /// Validate inputs and resolve the style against the loaded manifestos
    pub fn to_summary_request(
        &self,
        manifestos: &ManifestoSet,
    ) -> Result<SummaryRequest, CyonsError> {
        if self.article.trim().is_empty() {
            return Err(CyonsError::invalid_input(
                "Please paste an article to begin summarization.",
            ));
        }

        let style = match &self.style {
            Some(key) => manifestos.resolve(key).0,
            None => manifestos.default_style(),
        };

        Ok(SummaryRequest::new(style, self.article.clone(), self.controls()?))
    }

    /// Controls with defaults applied, checked against the slider ranges
    pub fn controls(&self) -> Result<ControlParams, CyonsError> {
        let defaults = ControlParams::default();
        let compression = self.compression.unwrap_or(defaults.compression);
        let bias_avoidance = self.bias_avoidance.unwrap_or(defaults.bias_avoidance);

        if !COMPRESSION_RANGE.contains(&compression) {
            return Err(CyonsError::invalid_input(format!(
                "compression must be between {} and {}, got {}",
                COMPRESSION_RANGE.start(),
                COMPRESSION_RANGE.end(),
                compression
            )));
        }

        if !BIAS_AVOIDANCE_RANGE.contains(&bias_avoidance) {
            return Err(CyonsError::invalid_input(format!(
                "bias_avoidance must be between {} and {}, got {}",
                BIAS_AVOIDANCE_RANGE.start(),
                BIAS_AVOIDANCE_RANGE.end(),
                bias_avoidance
            )));
        }

        Ok(ControlParams::new(compression, bias_avoidance))
    }
}

/// Summarize response
#[derive(Debug, Serialize)]
pub struct SummarizeResponse {
    /// Request identifier (also on the request's log span)
    pub request_id: String,

    pub style: Style,

    pub style_label: String,

    pub compression: f64,

    pub bias_avoidance: f64,

    pub model: String,

    /// "ok" or "failed"
    pub status: String,

    /// Summary text, or the error message when generation failed
    pub summary: String,

    pub review: Option<ReviewReport>,

    /// Rendered review report
    pub review_text: Option<String>,

    /// Prompt sent to the model
    pub prompt: String,

    pub generated_at: DateTime<Utc>,
}

impl SummarizeResponse {
    /// Build from a pipeline run
    pub fn from_run(request_id: String, run: SummaryRun) -> Self {
        Self {
            request_id,
            style: run.style,
            style_label: run.style.label().to_string(),
            compression: run.controls.compression,
            bias_avoidance: run.controls.bias_avoidance,
            model: run.model,
            status: run.generation.status().to_string(),
            summary: run.generation.text().to_string(),
            review_text: run.review.as_ref().map(ToString::to_string),
            review: run.review,
            prompt: run.prompt,
            generated_at: Utc::now(),
        }
    }
}

/// Compile response (prompt preview)
#[derive(Debug, Serialize)]
pub struct CompileResponse {
    pub style: Style,

    pub prompt: String,
}

/// Review request
#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    /// Summary text to review
    pub summary: String,
}

/// Review response
#[derive(Debug, Serialize)]
pub struct ReviewResponse {
    pub report: ReviewReport,

    /// Rendered report
    pub text: String,
}

/// Style entry
#[derive(Debug, Serialize)]
pub struct StyleInfo {
    pub key: String,

    pub label: String,
}

/// Styles response
#[derive(Debug, Serialize)]
pub struct StylesResponse {
    pub styles: Vec<StyleInfo>,

    /// Default style key
    pub default: String,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,

    pub model: String,

    pub version: String,
}

/// Completion API reachability
#[derive(Debug, Serialize)]
pub struct LlmHealthResponse {
    pub reachable: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Error body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,

    pub details: Option<String>,
}
