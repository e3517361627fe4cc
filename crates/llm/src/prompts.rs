//! Prompt templates for controlled summarization

use crate::types::ControlParams;

/// System message sent with every summary request
pub const SYSTEM_PROMPT: &str =
    "You are a professional, accurate, and highly controllable news summarization engine.";

pub const LENGTH_COMPREHENSIVE: &str =
    "The final summary should be as comprehensive as possible, minimizing compression.";
pub const LENGTH_MODERATE: &str =
    "The summary should be moderate in length, targeting about 60% of the original article's detail.";
pub const LENGTH_COMPRESSED: &str =
    "The summary must be highly compressed and brief, capturing only the main points.";

pub const BIAS_STRICT: &str = "Crucially, maintain absolute and strict neutrality. Eliminate all emotional, political, or subjective language.";
pub const BIAS_NEUTRAL: &str =
    "Maintain a neutral tone and remove any obvious political or emotional bias.";
pub const BIAS_LOW_PRIORITY: &str =
    "Bias avoidance is a lower priority; focus on summarizing based on the style provided.";

/// Length instruction for a compression level (0.1 = very short, 1.0 = max length)
pub fn length_instruction(compression: f64) -> &'static str {
    if compression >= 0.8 {
        LENGTH_COMPREHENSIVE
    } else if compression >= 0.5 {
        LENGTH_MODERATE
    } else {
        LENGTH_COMPRESSED
    }
}

/// Bias instruction for a bias-avoidance level (0.0 = ignore, 1.0 = strict)
pub fn bias_instruction(bias_avoidance: f64) -> &'static str {
    if bias_avoidance >= 0.9 {
        BIAS_STRICT
    } else if bias_avoidance >= 0.5 {
        BIAS_NEUTRAL
    } else {
        BIAS_LOW_PRIORITY
    }
}

/// Compile the instruction prompt sent to the model
///
/// Manifesto and article are embedded verbatim. Out-of-range controls are not
/// rejected; they land in whichever tier the thresholds select.
pub fn compile_prompt(manifesto: &str, article: &str, controls: &ControlParams) -> String {
    let prompt = format!(
        r#"--- ROLE AND INSTRUCTIONS ---

1. **Persona**: Adopt the persona and follow the guidelines defined in the [MANIFESTO].
2. **Task**: Summarize the provided [ARTICLE] based on the persona and the following control parameters.
3. **Length Control**: {length}
4. **Bias Control**: {bias}
5. **Format**: The output must be the final summary text ONLY, with no introductory phrases.

--- MANIFESTO ---
{manifesto}

--- ARTICLE TO SUMMARIZE ---
{article}"#,
        length = length_instruction(controls.compression),
        bias = bias_instruction(controls.bias_avoidance),
        manifesto = manifesto,
        article = article,
    );

    prompt.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFESTO: &str = "You are Sherlock. Deduce.";
    const ARTICLE: &str = "The council voted 7-2 to expand the bus network.";

    #[test]
    fn test_length_thresholds() {
        assert_eq!(length_instruction(0.1), LENGTH_COMPRESSED);
        assert_eq!(length_instruction(0.49), LENGTH_COMPRESSED);
        assert_eq!(length_instruction(0.5), LENGTH_MODERATE);
        assert_eq!(length_instruction(0.79), LENGTH_MODERATE);
        assert_eq!(length_instruction(0.8), LENGTH_COMPREHENSIVE);
        assert_eq!(length_instruction(1.0), LENGTH_COMPREHENSIVE);
    }

    #[test]
    fn test_bias_thresholds() {
        assert_eq!(bias_instruction(0.0), BIAS_LOW_PRIORITY);
        assert_eq!(bias_instruction(0.49), BIAS_LOW_PRIORITY);
        assert_eq!(bias_instruction(0.5), BIAS_NEUTRAL);
        assert_eq!(bias_instruction(0.89), BIAS_NEUTRAL);
        assert_eq!(bias_instruction(0.9), BIAS_STRICT);
        assert_eq!(bias_instruction(1.0), BIAS_STRICT);
    }

    #[test]
    fn test_out_of_range_falls_through() {
        assert_eq!(length_instruction(-3.0), LENGTH_COMPRESSED);
        assert_eq!(length_instruction(f64::NAN), LENGTH_COMPRESSED);
        assert_eq!(bias_instruction(f64::NAN), BIAS_LOW_PRIORITY);
        assert_eq!(length_instruction(7.0), LENGTH_COMPREHENSIVE);
    }

    #[test]
    fn test_compile_is_deterministic() {
        let controls = ControlParams::new(0.6, 0.7);
        let first = compile_prompt(MANIFESTO, ARTICLE, &controls);
        let second = compile_prompt(MANIFESTO, ARTICLE, &controls);
        assert_eq!(first, second);
    }

    #[test]
    fn test_compile_embeds_inputs_verbatim() {
        let manifesto = "Line one.\n  * indented {braces} and \"quotes\"\n<tag>";
        let article = "Para 1.\n\nPara 2 with **markdown** and {placeholders}.";
        let prompt = compile_prompt(manifesto, article, &ControlParams::default());

        assert!(prompt.contains(manifesto));
        assert!(prompt.contains(article));
        assert!(prompt.contains("--- MANIFESTO ---"));
        assert!(prompt.contains("--- ARTICLE TO SUMMARIZE ---"));
    }

    #[test]
    fn test_compile_selects_instructions() {
        let prompt = compile_prompt(MANIFESTO, ARTICLE, &ControlParams::new(0.8, 0.9));
        assert!(prompt.contains(&format!("3. **Length Control**: {}", LENGTH_COMPREHENSIVE)));
        assert!(prompt.contains(&format!("4. **Bias Control**: {}", BIAS_STRICT)));

        let prompt = compile_prompt(MANIFESTO, ARTICLE, &ControlParams::new(0.1, 0.0));
        assert!(prompt.contains(LENGTH_COMPRESSED));
        assert!(prompt.contains(BIAS_LOW_PRIORITY));
        assert!(!prompt.contains(LENGTH_MODERATE));
    }

    #[test]
    fn test_compile_is_trimmed_and_ordered() {
        let prompt = compile_prompt(MANIFESTO, "  article body  \n\n", &ControlParams::default());
        assert!(prompt.starts_with("--- ROLE AND INSTRUCTIONS ---"));
        assert!(prompt.ends_with("article body"));

        let manifesto_at = prompt.find(MANIFESTO).unwrap();
        let article_at = prompt.find("article body").unwrap();
        assert!(manifesto_at < article_at);
        assert!(prompt.contains("5. **Format**: The output must be the final summary text ONLY"));
    }
}
