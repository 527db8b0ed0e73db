//! Loosely shaped source records
//!
//! Lead records reach the engine in several shapes: answers at the top level,
//! answers nested under `input`, and previously computed values nested under
//! `resultado`. `RawProfileInput` splits a record into those three sections
//! once, so the normalizer only ever deals with flat maps.

use serde_json::{Map, Value};

/// One flat section of a raw record
pub type RawSection = Map<String, Value>;

/// Where a key is looked up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Root,
    Input,
    Resultado,
}

/// Raw record split into its three sections
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawProfileInput {
    pub root: RawSection,
    pub input: Option<RawSection>,
    pub resultado: Option<RawSection>,
}

impl RawProfileInput {
    /// Split an arbitrary JSON value. Non-object values produce an empty record.
    pub fn from_value(value: Value) -> Self {
        let mut root = match value {
            Value::Object(map) => map,
            _ => return Self::default(),
        };

        let input = take_section(&mut root, "input");
        let resultado = take_section(&mut root, "resultado");

        Self { root, input, resultado }
    }

    /// Build a record from flat string pairs (e.g. one CSV row)
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let root = pairs
            .into_iter()
            .map(|(key, value)| (key.trim().to_string(), Value::String(value.to_string())))
            .collect();
        Self {
            root,
            input: None,
            resultado: None,
        }
    }

    /// Look up a key in one section. Null values count as absent.
    pub fn get(&self, scope: Scope, key: &str) -> Option<&Value> {
        let section = match scope {
            Scope::Root => Some(&self.root),
            Scope::Input => self.input.as_ref(),
            Scope::Resultado => self.resultado.as_ref(),
        };
        section
            .and_then(|s| s.get(key))
            .filter(|value| !value.is_null())
    }
}

impl From<Value> for RawProfileInput {
    fn from(value: Value) -> Self {
        Self::from_value(value)
    }
}

fn take_section(root: &mut RawSection, key: &str) -> Option<RawSection> {
    match root.remove(key) {
        Some(Value::Object(map)) => Some(map),
        // keep non-object values visible at the root
        Some(other) => {
            root.insert(key.to_string(), other);
            None
        }
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_split_sections() {
        let raw = RawProfileInput::from_value(json!({
            "edad": 40,
            "input": { "ingresoMensual": 1500 },
            "resultado": { "ltv": 0.9 },
        }));

        assert_eq!(raw.get(Scope::Root, "edad"), Some(&json!(40)));
        assert_eq!(raw.get(Scope::Input, "ingresoMensual"), Some(&json!(1500)));
        assert_eq!(raw.get(Scope::Resultado, "ltv"), Some(&json!(0.9)));
        assert!(raw.get(Scope::Root, "input").is_none());
    }

    #[test]
    fn test_malformed_shapes_do_not_fail() {
        assert_eq!(RawProfileInput::from_value(json!([1, 2, 3])), RawProfileInput::default());
        assert_eq!(RawProfileInput::from_value(Value::Null), RawProfileInput::default());

        let raw = RawProfileInput::from_value(json!({ "input": "n/a", "edad": null }));
        assert!(raw.input.is_none());
        assert_eq!(raw.get(Scope::Root, "input"), Some(&json!("n/a")));
        assert!(raw.get(Scope::Root, "edad").is_none());
    }

    #[test]
    fn test_from_pairs() {
        let raw = RawProfileInput::from_pairs([(" edad ", "35"), ("nacionalidad", "ecuatoriana")]);
        assert_eq!(raw.get(Scope::Root, "edad"), Some(&json!("35")));
        assert!(raw.get(Scope::Input, "edad").is_none());
    }
}
