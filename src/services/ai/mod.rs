//! AI travel content: generation cache, prompts, template fallback and
//! the generator that combines them.

pub mod cache;
pub mod fallback;
pub mod generator;
pub mod prompts;

pub use cache::{generation_key, GenerationCache};
pub use generator::{BudgetGeneration, Generation, TravelGenerator, TEMPLATE_MODEL};
pub use prompts::BudgetOptions;
