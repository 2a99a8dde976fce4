//! AI prompt flows
//!
//! Two request/response operations that ask a language model for Markdown
//! tables:
//! - [`generate_table_from_description`]: description → Markdown table
//! - [`suggest_table_improvements`]: table → improved table + suggestions
//!
//! Each flow checks its input, renders a fixed prompt template, calls the
//! injected [`TextGenerator`] once and validates the JSON reply against the
//! flow's output schema. There is no retry and no partial result; timeouts
//! belong to the caller.
//!
//! ## Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use tabledraw::ai::{generate_table_from_description, GenerateTableInput,
//!     GeneratorError, PromptRequest, TextGenerator};
//!
//! struct Canned;
//!
//! #[async_trait]
//! impl TextGenerator for Canned {
//!     async fn generate(&self, _request: &PromptRequest) -> Result<String, GeneratorError> {
//!         Ok(r#"{"markdownTable": "| A |\n|---|\n| 1 |"}"#.to_string())
//!     }
//! }
//!
//! # async fn run() {
//! let output = generate_table_from_description(
//!     &Canned,
//!     GenerateTableInput { description: "one column".to_string() },
//! )
//! .await
//! .unwrap();
//! assert!(output.markdown_table.contains("| A |"));
//! # }
//! ```

use async_trait::async_trait;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

use crate::utils::error::{ConversionError, ConversionResult};

const GENERATE_TABLE_PROMPT: &str = "You are a tool that generates Markdown tables based on a description.

Description: {{{description}}}

Output the markdown table. Do not include any other text.";

const SUGGEST_IMPROVEMENTS_PROMPT: &str = "You are an AI expert in improving Markdown tables.

You will be given a Markdown table, and you will suggest improvements to it.

Table:
{{{table}}}

Output the improved table and suggestions for improving the table.
";

/// Failure reported by a text-generation backend
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct GeneratorError(pub String);

/// One call to a text-generation backend
#[derive(Debug, Clone, PartialEq)]
pub struct PromptRequest {
    /// Name of the prompt, for logging and routing
    pub name: &'static str,
    /// Rendered prompt text
    pub prompt: String,
    /// JSON schema the reply must satisfy
    pub output_schema: Value,
}

/// A language-model backend
///
/// Implementations send the prompt to a model and return its raw reply, which
/// should be a JSON object matching `request.output_schema`.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: &PromptRequest) -> Result<String, GeneratorError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateTableInput {
    /// A description of the table to generate
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateTableOutput {
    /// The generated Markdown table
    pub markdown_table: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestImprovementsInput {
    /// The Markdown table to improve
    pub table: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestImprovementsOutput {
    /// The improved Markdown table
    pub improved_table: String,
    /// Suggestions for improving the table
    pub suggestions: String,
}

fn generate_table_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "markdownTable": {
                "type": "string",
                "description": "The generated Markdown table."
            }
        },
        "required": ["markdownTable"]
    })
}

fn suggest_improvements_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "improvedTable": {
                "type": "string",
                "description": "The improved Markdown table."
            },
            "suggestions": {
                "type": "string",
                "description": "Suggestions for improving the table."
            }
        },
        "required": ["improvedTable", "suggestions"]
    })
}

/// Generate a Markdown table from a text description
pub async fn generate_table_from_description(
    generator: &dyn TextGenerator,
    input: GenerateTableInput,
) -> ConversionResult<GenerateTableOutput> {
    run_flow(
        generator,
        "generateTableFromDescriptionPrompt",
        GENERATE_TABLE_PROMPT,
        ("description", &input.description),
        generate_table_schema(),
    )
    .await
}

/// Ask for an improved version of a Markdown table plus suggestions
pub async fn suggest_table_improvements(
    generator: &dyn TextGenerator,
    input: SuggestImprovementsInput,
) -> ConversionResult<SuggestImprovementsOutput> {
    run_flow(
        generator,
        "suggestTableImprovementsPrompt",
        SUGGEST_IMPROVEMENTS_PROMPT,
        ("table", &input.table),
        suggest_improvements_schema(),
    )
    .await
}

async fn run_flow<O: DeserializeOwned>(
    generator: &dyn TextGenerator,
    name: &'static str,
    template: &str,
    (field, value): (&str, &str),
    output_schema: Value,
) -> ConversionResult<O> {
    if value.trim().is_empty() {
        return Err(ConversionError::invalid(format!("{} must not be empty", field)));
    }

    let request = PromptRequest {
        name,
        prompt: render_template(template, field, value),
        output_schema,
    };
    debug!("{}: sending {} byte prompt", name, request.prompt.len());

    let reply = generator.generate(&request).await.map_err(|e| {
        warn!("{}: backend failed: {}", name, e);
        ConversionError::service(e.to_string())
    })?;

    parse_reply(&reply).map_err(|e| {
        warn!("{}: reply does not match the output schema: {}", name, e);
        e
    })
}

/// Substitute `{{{field}}}` placeholders
fn render_template(template: &str, field: &str, value: &str) -> String {
    template.replace(&format!("{{{{{{{}}}}}}}", field), value)
}

/// Parse a model reply as the flow's output type
///
/// Models often wrap JSON in a Markdown code fence or surround it with prose
/// that may itself contain braces. The first `{` that starts a value of the
/// output type wins; anything after that value is ignored.
fn parse_reply<O: DeserializeOwned>(reply: &str) -> ConversionResult<O> {
    let mut first_error: Option<serde_json::Error> = None;
    for (start, _) in reply.match_indices('{') {
        match serde_json::Deserializer::from_str(&reply[start..])
            .into_iter::<O>()
            .next()
        {
            Some(Ok(value)) => return Ok(value),
            Some(Err(e)) => {
                first_error.get_or_insert(e);
            }
            None => {}
        }
    }
    Err(match first_error {
        Some(e) => ConversionError::schema(e.to_string()),
        None => ConversionError::schema("reply contains no JSON object"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Replies with a fixed result and records every request
    struct ScriptedGenerator {
        reply: Result<String, GeneratorError>,
        requests: Mutex<Vec<PromptRequest>>,
    }

    impl ScriptedGenerator {
        fn replying(reply: &str) -> Self {
            Self {
                reply: Ok(reply.to_string()),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                reply: Err(GeneratorError(message.to_string())),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl TextGenerator for ScriptedGenerator {
        async fn generate(&self, request: &PromptRequest) -> Result<String, GeneratorError> {
            self.requests.lock().unwrap().push(request.clone());
            self.reply.clone()
        }
    }

    #[test]
    fn test_render_template() {
        let prompt = render_template(GENERATE_TABLE_PROMPT, "description", "three users");
        assert!(prompt.contains("Description: three users"));
        assert!(!prompt.contains("{{{"));
    }

    #[test]
    fn test_parse_reply_fenced() {
        let reply = "```json\n{\"markdownTable\": \"| A |\"}\n```";
        let out: GenerateTableOutput = parse_reply(reply).unwrap();
        assert_eq!(out.markdown_table, "| A |");
    }

    #[test]
    fn test_parse_reply_braces_after_object() {
        let reply = "{\"markdownTable\": \"| A |\"}\nTip: wrap values in {braces}.";
        let out: GenerateTableOutput = parse_reply(reply).unwrap();
        assert_eq!(out.markdown_table, "| A |");
    }

    #[test]
    fn test_parse_reply_braces_before_object() {
        let reply = "Here is {your} table: {\"markdownTable\": \"| B |\"} enjoy";
        let out: GenerateTableOutput = parse_reply(reply).unwrap();
        assert_eq!(out.markdown_table, "| B |");
    }

    #[test]
    fn test_parse_reply_wrong_type() {
        let result: ConversionResult<GenerateTableOutput> = parse_reply("{\"markdownTable\": 3}");
        assert!(matches!(result, Err(ConversionError::SchemaMismatch { .. })));
    }

    #[test]
    fn test_parse_reply_no_object() {
        let result: ConversionResult<GenerateTableOutput> = parse_reply("| A | B |");
        assert!(matches!(result, Err(ConversionError::SchemaMismatch { .. })));
    }

    #[tokio::test]
    async fn test_generate_table() {
        let generator =
            ScriptedGenerator::replying(r#"{"markdownTable": "| Name |\n|---|\n| Ada |"}"#);
        let out = generate_table_from_description(
            &generator,
            GenerateTableInput {
                description: "A list of names".to_string(),
            },
        )
        .await
        .unwrap();
        assert_eq!(out.markdown_table, "| Name |\n|---|\n| Ada |");

        let requests = generator.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].name, "generateTableFromDescriptionPrompt");
        assert!(requests[0].prompt.contains("A list of names"));
        assert_eq!(requests[0].output_schema["required"][0], "markdownTable");
    }

    #[tokio::test]
    async fn test_blank_input_skips_backend() {
        let generator = ScriptedGenerator::replying("{}");
        let result = generate_table_from_description(
            &generator,
            GenerateTableInput {
                description: "   ".to_string(),
            },
        )
        .await;
        assert!(matches!(result, Err(ConversionError::InvalidInput { .. })));
        assert_eq!(generator.calls(), 0);
    }

    #[tokio::test]
    async fn test_suggest_improvements() {
        let generator = ScriptedGenerator::replying(
            r#"Here you go: {"improvedTable": "| A | B |", "suggestions": "Add units.", "extra": 1}"#,
        );
        let out = suggest_table_improvements(
            &generator,
            SuggestImprovementsInput {
                table: "| a | b |".to_string(),
            },
        )
        .await
        .unwrap();
        assert_eq!(out.improved_table, "| A | B |");
        assert_eq!(out.suggestions, "Add units.");
    }

    #[tokio::test]
    async fn test_missing_field_is_schema_mismatch() {
        let generator = ScriptedGenerator::replying(r#"{"improvedTable": "| A |"}"#);
        let result = suggest_table_improvements(
            &generator,
            SuggestImprovementsInput {
                table: "| a |".to_string(),
            },
        )
        .await;
        assert!(matches!(result, Err(ConversionError::SchemaMismatch { .. })));
    }

    #[tokio::test]
    async fn test_backend_failure_is_service_error() {
        let generator = ScriptedGenerator::failing("rate limited");
        let result = suggest_table_improvements(
            &generator,
            SuggestImprovementsInput {
                table: "| a |".to_string(),
            },
        )
        .await;
        assert_eq!(
            result,
            Err(ConversionError::ServiceError {
                message: "rate limited".to_string()
            })
        );
        assert_eq!(generator.calls(), 1);
    }
}
