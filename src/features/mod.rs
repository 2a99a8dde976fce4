//! Feature modules
//!
//! Functionality around the conversion pipeline:
//! - AI prompt flows that generate and improve Markdown tables

pub mod ai;

pub use ai::{
    generate_table_from_description, suggest_table_improvements, GenerateTableInput,
    GenerateTableOutput, GeneratorError, PromptRequest, SuggestImprovementsInput,
    SuggestImprovementsOutput, TextGenerator,
};
