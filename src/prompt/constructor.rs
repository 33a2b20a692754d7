//! Prompt templating with simple `{{placeholder}}` substitution.
//!
//! Given a text `template` and an `inputs` object, replaces every
//! `{{ key }}` occurrence with `inputs[key]`. String inputs are inserted
//! as-is; other JSON values use their compact JSON form.
use serde_json::Value;
use crate::error::{AppResult, AppError};

#[derive(Debug, Default, Clone, Copy)]
pub struct PromptConstructor;

impl PromptConstructor {
    pub fn new() -> Self {
        PromptConstructor
    }

    /// Construct a prompt by substituting placeholders inside `template`
    /// with corresponding values from `inputs`.
    pub fn construct_prompt(&self, template: &str, inputs: &Value) -> AppResult<String> {
        self.validate_template(template)?;
        self.validate_inputs(inputs)?;

        let mut out = String::with_capacity(template.len());
        let mut rest = template;
        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            // validate_template guarantees the closing braces exist
            let end = after.find("}}").ok_or_else(|| {
                AppError::PromptConstruction("Unclosed placeholder".to_string())
            })?;
            let key = after[..end].trim();
            match inputs.get(key) {
                Some(Value::String(s)) => out.push_str(s),
                Some(other) => out.push_str(&other.to_string()),
                None => {
                    return Err(AppError::PromptConstruction(format!(
                        "Missing input for placeholder: {}",
                        key
                    )))
                }
            }
            rest = &after[end + 2..];
        }
        out.push_str(rest);

        Ok(out)
    }

    /// Every `{{` must be closed by `}}` and name a non-empty key.
    fn validate_template(&self, template: &str) -> AppResult<()> {
        let mut rest = template;
        while let Some(start) = rest.find("{{") {
            let after = &rest[start + 2..];
            let end = after.find("}}").ok_or_else(|| {
                AppError::PromptConstruction("Unclosed placeholder in template".to_string())
            })?;
            let key = after[..end].trim();
            if key.is_empty() || key.contains("{{") {
                return Err(AppError::PromptConstruction(format!(
                    "Malformed placeholder: {{{{{}}}}}",
                    &after[..end]
                )));
            }
            rest = &after[end + 2..];
        }
        Ok(())
    }

    fn validate_inputs(&self, inputs: &Value) -> AppResult<()> {
        if inputs.is_object() {
            Ok(())
        } else {
            Err(AppError::PromptConstruction("Inputs must be a JSON object".to_string()))
        }
    }
}
