//! JSON-schema rendering for the verdict shape
//!
//! OpenAI function parameters require:
//! 1. `additionalProperties: false` on all object schemas
//! 2. ALL properties listed in `required`, even nullable ones
//! 3. Fully inlined schemas (no `$ref` references)
//!
//! The fixups below rewrite a schemars-derived schema into that form.

use reviewsentry_core::Verdict;
use schemars::schema_for;

/// Render the OpenAI-compatible parameters schema for [`Verdict`].
pub fn verdict_parameters() -> serde_json::Value {
    let schema = schema_for!(Verdict);
    let mut value = serde_json::to_value(schema).unwrap_or_default();

    fix_object_schemas(&mut value);
    inline_refs(&mut value);

    if let serde_json::Value::Object(map) = &mut value {
        map.remove("definitions");
        map.remove("$schema");
        map.remove("title");
    }

    value
}

fn fix_object_schemas(value: &mut serde_json::Value) {
    if let serde_json::Value::Object(map) = value {
        if map.get("type") == Some(&serde_json::Value::String("object".to_string())) {
            map.insert(
                "additionalProperties".to_string(),
                serde_json::Value::Bool(false),
            );

            if let Some(serde_json::Value::Object(props)) = map.get("properties") {
                let all_keys: Vec<serde_json::Value> = props
                    .keys()
                    .map(|k| serde_json::Value::String(k.clone()))
                    .collect();
                map.insert("required".to_string(), serde_json::Value::Array(all_keys));
            }
        }

        for (_, v) in map.iter_mut() {
            fix_object_schemas(v);
        }
    } else if let serde_json::Value::Array(arr) = value {
        for item in arr.iter_mut() {
            fix_object_schemas(item);
        }
    }
}

fn inline_refs(value: &mut serde_json::Value) {
    let definitions = if let serde_json::Value::Object(map) = value {
        map.get("definitions").cloned()
    } else {
        None
    };

    if let Some(defs) = definitions {
        inline_refs_recursive(value, &defs);
    }
}

fn inline_refs_recursive(value: &mut serde_json::Value, definitions: &serde_json::Value) {
    match value {
        serde_json::Value::Object(map) => {
            if let Some(serde_json::Value::String(ref_path)) = map.get("$ref").cloned() {
                if ref_path.starts_with("#/definitions/") {
                    let type_name = ref_path.trim_start_matches("#/definitions/");
                    if let Some(def) = definitions.get(type_name) {
                        *value = def.clone();
                        inline_refs_recursive(value, definitions);
                        return;
                    }
                }
            }

            for (_, v) in map.iter_mut() {
                inline_refs_recursive(v, definitions);
            }
        }
        serde_json::Value::Array(arr) => {
            for item in arr.iter_mut() {
                inline_refs_recursive(item, definitions);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_parameters_shape() {
        let params = verdict_parameters();
        let obj = params.as_object().unwrap();

        assert_eq!(
            obj.get("type"),
            Some(&serde_json::Value::String("object".to_string()))
        );
        assert_eq!(
            obj.get("additionalProperties"),
            Some(&serde_json::Value::Bool(false))
        );
        assert!(!obj.contains_key("$schema"));
        assert!(!obj.contains_key("definitions"));
    }

    #[test]
    fn test_both_fields_required() {
        let params = verdict_parameters();
        let required = params["required"].as_array().unwrap();
        let required_strs: Vec<&str> = required.iter().filter_map(|v| v.as_str()).collect();

        assert!(required_strs.contains(&"flagged"));
        assert!(required_strs.contains(&"reason"));
        assert_eq!(required_strs.len(), 2);
    }

    #[test]
    fn test_field_types() {
        let params = verdict_parameters();
        assert_eq!(
            params["properties"]["flagged"]["type"],
            serde_json::Value::String("boolean".to_string())
        );
        assert_eq!(
            params["properties"]["reason"]["type"],
            serde_json::Value::String("string".to_string())
        );
    }
}
