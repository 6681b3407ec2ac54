//! Prompt templates for remedy generation and the shopping-list fallback

/// Exact text providers are told to return when no remedy can be built.
///
/// Detection is a case-sensitive substring match, see
/// [`crate::remedy::interpreter::interpret`].
pub const NO_REMEDY_SENTINEL: &str = "No remedy possible with available ingredients.";

/// JSON schema embedded in the remedy system prompt
const REMEDY_SCHEMA: &str = r#"{
  "title": "RemedyInstruction",
  "type": "object",
  "properties": {
    "remedy_name": {"title": "Remedy Name", "type": "string"},
    "steps": {"title": "Steps", "type": ["array", "null"], "items": {"type": "string"}}
  },
  "required": ["remedy_name"]
}"#;

/// Templates for generating prompts for each request kind
pub struct RemedyPromptTemplate;

impl RemedyPromptTemplate {
    /// System prompt for remedy generation
    pub fn remedy_system() -> String {
        format!(
            r#"You are a professional medical assistant that specializes in home remedies for children.
Give a short, step-by-step remedy that uses ONLY the ingredients the parent has available.
Do not suggest any ingredient that is not in the list.
If a caution applies (for example, honey must not be given to children under 1 year old),
add it as the last step.

Answer with a single JSON object matching this schema and nothing else:
{}

If no remedy can be made with the available ingredients, respond with exactly:
{}"#,
            REMEDY_SCHEMA, NO_REMEDY_SENTINEL
        )
    }

    /// User prompt for remedy generation
    ///
    /// An empty ingredient list renders as `none`.
    pub fn remedy_user(symptom: &str, ingredients: &[String]) -> String {
        let available = if ingredients.is_empty() {
            "none".to_string()
        } else {
            ingredients.join(", ")
        };
        format!(
            "My child has {}. What home remedy can I use? I have these ingredients: {}.",
            symptom, available
        )
    }

    /// System prompt for the shopping-list fallback
    pub fn shopping_system() -> &'static str {
        r#"You are a helpful assistant that suggests the minimum grocery items a parent should buy
to prepare a simple home remedy for a child's symptom.
Respond only with a comma-separated list of items, for example: Honey, Lemon, Ginger"#
    }

    /// User prompt for the shopping-list fallback
    pub fn shopping_user(symptom: &str) -> String {
        format!(
            "My child has {}. What are the minimum items I should buy?",
            symptom
        )
    }

    /// Fold a system and user prompt into one message, for providers without a system role
    pub fn inline(system: &str, user: &str) -> String {
        format!("{}\n\n{}", system, user)
    }
}
