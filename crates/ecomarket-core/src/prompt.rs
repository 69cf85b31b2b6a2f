//! Chat message assembly for each intent.

use crate::records::Record;
use ecomarket_config::PromptSettings;
use serde::{Deserialize, Serialize};

/// Placeholder replaced with the user query in configured templates.
pub const QUERY_PLACEHOLDER: &str = "{query}";
/// Delimiter around embedded data and the user query.
pub const BLOCK_DELIMITER: &str = "\"\"\"";
/// Heading that precedes the delimited user query.
pub const QUERY_HEADING: &str = "Consulta del usuario:";

const CLASSIFIER_SYSTEM_PROMPT: &str = "Clasifica la consulta en 'tracking', 'return' o 'complex'.";

const RETRIEVED_DATA_HEADING: &str =
    "Utiliza la siguiente información recuperada de la base de datos:";

const RULES_HEADING: &str = "Responde la consulta siguiendo estas reglas:";

const TRACKING_RULES: &str = "\
1. Busca el número de seguimiento en la base de datos.
2. Proporciona el estado actual y la fecha de entrega.
3. Incluye el enlace de rastreo en tiempo real.
4. Si el pedido está \"Retrasado\", ofrece disculpas y una breve explicación.
5. Mantén siempre un tono amable y servicial.";

const RETURN_RULES: &str = "\
1. Identifica el producto a devolver.
2. Verifica si es elegible según las reglas.
3. Si es elegible, da una lista numerada con los pasos de devolución.
4. Si no es elegible, explica la razón claramente y con empatía.
5. Mantén siempre un tono amable y servicial.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// One entry of an OpenAI-style chat message list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Which prompt to build. Retrieval intents carry their matched record.
#[derive(Debug, Clone, Copy)]
pub enum PromptKind<'r> {
    Classify,
    Summary,
    Tracking(&'r Record),
    Return(&'r Record),
}

/// Builds message lists from the configured prompt templates.
#[derive(Debug, Clone, Copy)]
pub struct PromptBuilder<'a> {
    prompts: &'a PromptSettings,
}

impl<'a> PromptBuilder<'a> {
    pub fn new(prompts: &'a PromptSettings) -> Self {
        Self { prompts }
    }

    /// Build the system and user messages for one completion call.
    ///
    /// The query is inserted verbatim.
    pub fn build_messages(&self, kind: PromptKind<'_>, query: &str) -> Vec<Message> {
        match kind {
            PromptKind::Classify => vec![
                Message::system(CLASSIFIER_SYSTEM_PROMPT),
                Message::user(fill_query(&self.prompts.classifier.classify_prompt, query)),
            ],
            PromptKind::Summary => vec![
                Message::system(self.prompts.role_prompt.as_str()),
                Message::user(fill_query(&self.prompts.summary.summary_prompt, query)),
            ],
            PromptKind::Tracking(record) => vec![
                Message::system(self.prompts.role_prompt.as_str()),
                Message::user(self.retrieval_prompt(None, record, TRACKING_RULES, query)),
            ],
            PromptKind::Return(record) => vec![
                Message::system(self.prompts.role_prompt.as_str()),
                Message::user(self.retrieval_prompt(
                    Some(self.few_shot_examples()),
                    record,
                    RETURN_RULES,
                    query,
                )),
            ],
        }
    }

    fn retrieval_prompt(
        &self,
        examples: Option<String>,
        record: &Record,
        rules: &str,
        query: &str,
    ) -> String {
        let mut prompt = String::new();
        prompt.push('\n');
        prompt.push_str(&self.prompts.instruction_prompt);
        prompt.push('\n');
        prompt.push_str(&self.prompts.rag.retrieval_prompt);
        prompt.push_str("\n\n");
        if let Some(examples) = examples {
            prompt.push_str(&examples);
            prompt.push_str("\n\n");
        }
        prompt.push_str(RETRIEVED_DATA_HEADING);
        prompt.push_str("\n\n");
        push_delimited(&mut prompt, &record.to_json());
        prompt.push_str("\n\n");
        prompt.push_str(RULES_HEADING);
        prompt.push('\n');
        prompt.push_str(rules);
        prompt.push_str("\n\n");
        prompt.push_str(QUERY_HEADING);
        prompt.push('\n');
        push_delimited(&mut prompt, query);
        prompt.push('\n');
        prompt
    }

    fn few_shot_examples(&self) -> String {
        let p = self.prompts;
        format!(
            "Ejemplo positivo:\n\
             Consulta: {}\n\
             Razonamiento: {}\n\
             Respuesta: {}\n\n\
             Ejemplo negativo:\n\
             Consulta: {}\n\
             Razonamiento: {}\n\
             Respuesta: {}",
            p.positive_example,
            p.positive_reasoning,
            p.positive_output,
            p.negative_example,
            p.negative_reasoning,
            p.negative_output,
        )
    }
}

fn fill_query(template: &str, query: &str) -> String {
    template.replace(QUERY_PLACEHOLDER, query)
}

fn push_delimited(prompt: &mut String, body: &str) {
    prompt.push_str(BLOCK_DELIMITER);
    prompt.push_str(body);
    prompt.push_str(BLOCK_DELIMITER);
}
