//! Dotted key-path flattening for partial-document writes.
//!
//! Nested objects recurse into `parent.child` keys. Arrays, scalars and nulls
//! are leaves and are written whole, so replacing `workExperience` replaces the
//! entire list while `personalDetails.email` touches a single field.

use serde_json::{Map, Value};
use thiserror::Error;

/// A document body as stored: dotted key path → leaf value.
pub type FlatDocument = Map<String, Value>;

#[derive(Debug, Error, PartialEq)]
pub enum FlattenError {
    #[error("expected an object at the document root")]
    NotAnObject,

    #[error("key path '{0}' conflicts with a value already written at one of its prefixes")]
    Conflict(String),

    #[error("key path '{0}' has an empty segment")]
    EmptySegment(String),
}

/// Flattens a JSON object into dotted key paths.
pub fn flatten(value: &Value) -> Result<FlatDocument, FlattenError> {
    let object = value.as_object().ok_or(FlattenError::NotAnObject)?;
    let mut out = Map::new();
    flatten_into(object, "", &mut out);
    Ok(out)
}

fn flatten_into(object: &Map<String, Value>, parent: &str, out: &mut FlatDocument) {
    for (key, value) in object {
        let path = if parent.is_empty() {
            key.clone()
        } else {
            format!("{parent}.{key}")
        };
        match value {
            Value::Object(child) => flatten_into(child, &path, out),
            leaf => {
                out.insert(path, leaf.clone());
            }
        }
    }
}

/// Rebuilds the nested object from dotted key paths.
pub fn unflatten(document: &FlatDocument) -> Result<Value, FlattenError> {
    let mut root = Map::new();

    for (path, value) in document {
        let segments: Vec<&str> = path.split('.').collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(FlattenError::EmptySegment(path.clone()));
        }
        let (last, parents) = segments
            .split_last()
            .ok_or_else(|| FlattenError::EmptySegment(path.clone()))?;

        let mut cursor = &mut root;
        for segment in parents {
            let slot = cursor
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            cursor = match slot {
                Value::Object(map) => map,
                _ => return Err(FlattenError::Conflict(path.clone())),
            };
        }

        if cursor.contains_key(*last) {
            return Err(FlattenError::Conflict(path.clone()));
        }
        cursor.insert(last.to_string(), value.clone());
    }

    Ok(Value::Object(root))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Education, PersonalDetails, ResumeData, Skill, SkillLevel};
    use serde_json::json;

    fn sample_resume() -> ResumeData {
        ResumeData {
            personal_details: PersonalDetails {
                full_name: "Grace Hopper".to_string(),
                email: "grace@navy.mil".to_string(),
                phone: "+1 555 010 0199".to_string(),
                linkedin: String::new(),
                github: "https://github.com/grace".to_string(),
                location: "Arlington, VA".to_string(),
            },
            objective: "Build **compilers**.\n- COBOL\n- FLOW-MATIC".to_string(),
            education: vec![
                Education {
                    degree: "PhD Mathematics".to_string(),
                    institution: "Yale".to_string(),
                    start_date: "1930-09".to_string(),
                    end_date: "1934-06".to_string(),
                    ..Default::default()
                },
                Education {
                    degree: "BA".to_string(),
                    institution: "Vassar".to_string(),
                    ..Default::default()
                },
            ],
            skills: vec![Skill {
                category: "Languages".to_string(),
                skills: "COBOL, Assembly".to_string(),
                proficiency: Some(SkillLevel::Advanced),
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_flatten_nests_objects_into_dotted_keys() {
        let flat = flatten(&json!({ "a": { "b": 1, "c": { "d": "x" } }, "e": true })).unwrap();
        assert_eq!(flat.get("a.b"), Some(&json!(1)));
        assert_eq!(flat.get("a.c.d"), Some(&json!("x")));
        assert_eq!(flat.get("e"), Some(&json!(true)));
        assert!(flat.get("a").is_none());
    }

    #[test]
    fn test_flatten_keeps_arrays_whole() {
        let flat = flatten(&json!({ "list": [{ "x": 1 }, { "x": 2 }] })).unwrap();
        assert_eq!(flat.len(), 1);
        assert_eq!(flat.get("list"), Some(&json!([{ "x": 1 }, { "x": 2 }])));
    }

    #[test]
    fn test_flatten_keeps_null_leaves() {
        let flat = flatten(&json!({ "a": { "b": null } })).unwrap();
        assert_eq!(flat.get("a.b"), Some(&Value::Null));
    }

    #[test]
    fn test_flatten_rejects_non_object_root() {
        assert_eq!(flatten(&json!([1, 2])), Err(FlattenError::NotAnObject));
    }

    #[test]
    fn test_resume_round_trips_through_flattening() {
        let resume = sample_resume();
        let value = serde_json::to_value(&resume).unwrap();
        let flat = flatten(&value).unwrap();
        assert_eq!(
            flat.get("personalDetails.fullName"),
            Some(&json!("Grace Hopper"))
        );

        let rebuilt: ResumeData = serde_json::from_value(unflatten(&flat).unwrap()).unwrap();
        assert_eq!(rebuilt, resume);
    }

    #[test]
    fn test_unflatten_detects_conflicting_paths() {
        let mut doc = FlatDocument::new();
        doc.insert("a".to_string(), json!(1));
        doc.insert("a.b".to_string(), json!(2));
        assert!(matches!(unflatten(&doc), Err(FlattenError::Conflict(_))));
    }

    #[test]
    fn test_unflatten_rejects_empty_segments() {
        let mut doc = FlatDocument::new();
        doc.insert("a..b".to_string(), json!(1));
        assert!(matches!(unflatten(&doc), Err(FlattenError::EmptySegment(_))));
    }
}
