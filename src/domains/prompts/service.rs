//! Prompt service implementation.
//!
//! The PromptService holds the prompt templates and renders them with the
//! caller's arguments. Prompts are defined in `definitions/` and registered
//! via `registry.rs`.

use rmcp::model::{GetPromptResult, Prompt, PromptMessage, PromptMessageRole};
use std::collections::{BTreeMap, HashMap};
use tracing::{info, warn};

use super::error::PromptError;
use super::registry::get_all_prompts;
use super::templates::PromptTemplate;

/// Service for listing and instantiating prompts.
pub struct PromptService {
    /// Key: prompt name, Value: prompt template
    prompts: BTreeMap<String, PromptTemplate>,
}

impl Default for PromptService {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptService {
    /// Create a PromptService with every registered prompt.
    pub fn new() -> Self {
        info!("Initializing PromptService");

        let mut service = Self {
            prompts: BTreeMap::new(),
        };
        for template in get_all_prompts() {
            service.register_prompt(template);
        }
        service
    }

    /// Register a prompt template.
    pub fn register_prompt(&mut self, template: PromptTemplate) {
        info!("Registering prompt: {}", template.name);
        self.prompts.insert(template.name.clone(), template);
    }

    /// List all available prompts.
    pub async fn list_prompts(&self) -> Vec<Prompt> {
        self.prompts
            .values()
            .map(|template| Prompt {
                name: template.name.clone(),
                title: None,
                description: template.description.clone(),
                arguments: Some(template.arguments.clone()),
                icons: None,
                meta: None,
            })
            .collect()
    }

    /// Get a prompt with arguments substituted.
    pub async fn get_prompt(
        &self,
        name: &str,
        arguments: Option<HashMap<String, String>>,
    ) -> Result<GetPromptResult, PromptError> {
        let template = self.prompts.get(name).ok_or_else(|| {
            warn!("Unknown prompt requested: {}", name);
            PromptError::not_found(name)
        })?;

        let arguments = arguments.unwrap_or_default();

        for arg in &template.arguments {
            let provided = arguments.get(&arg.name).is_some_and(|v| !v.is_empty());
            if arg.required.unwrap_or(false) && !provided {
                return Err(PromptError::missing_argument(&arg.name));
            }
        }

        let content = template.render(&arguments)?;

        Ok(GetPromptResult {
            description: template.description.clone(),
            messages: vec![PromptMessage::new_text(PromptMessageRole::User, content)],
        })
    }
}
