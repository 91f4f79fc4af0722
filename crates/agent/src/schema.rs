use serde_json::{json, Map, Value};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParameterKind {
    String,
    Integer,
}

impl ParameterKind {
    fn type_name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
        }
    }
}

#[derive(Clone, Debug)]
pub struct ParameterSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: ParameterKind,
    pub required: bool,
    pub default: Option<Value>,
}

/// The call surface of one tool as registered with the language model:
/// unique name, natural-language description, and parameter specification.
#[derive(Clone, Debug)]
pub struct ToolSchema {
    pub name: &'static str,
    pub description: &'static str,
    pub parameters: Vec<ParameterSpec>,
}

impl ToolSchema {
    /// JSON function declaration handed to the model provider.
    pub fn to_json(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for parameter in &self.parameters {
            let mut property = Map::new();
            property.insert("type".to_string(), json!(parameter.kind.type_name()));
            property.insert("description".to_string(), json!(parameter.description));
            if let Some(default) = &parameter.default {
                property.insert("default".to_string(), default.clone());
            }
            properties.insert(parameter.name.to_string(), Value::Object(property));

            if parameter.required {
                required.push(json!(parameter.name));
            }
        }

        json!({
            "name": self.name,
            "description": self.description,
            "parameters": {
                "type": "object",
                "properties": properties,
                "required": required,
            },
        })
    }
}
