//! Contatos do HubSpot no formato exposto pela API
//!
//! Projeta `{ id, properties: { firstname, lastname, email } }` em
//! `{ id, first_name, last_name, email }`. A formatação é tudo-ou-nada:
//! um registro malformado invalida o lote inteiro.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::utils::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactsPayload {
    pub contacts: Vec<Contact>,
}

/// Formata a resposta de `GET /crm/v3/objects/contacts`
///
/// - `results` ausente → lista vazia; `results: null` → `AppError::Formatting`
/// - campo ausente ou `null` → `""`
/// - registro sem `properties`, ou campo que não é string → `AppError::Formatting`
pub fn format_contacts(response: &Value) -> AppResult<ContactsPayload> {
    let results = match response.get("results") {
        None => return Ok(ContactsPayload { contacts: Vec::new() }),
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(AppError::Formatting(format!(
                "'results' must be a list, got {}",
                json_type(other)
            )))
        }
    };

    let contacts = results
        .iter()
        .enumerate()
        .map(|(index, record)| project_contact(record).map_err(|e| AppError::Formatting(format!("results[{}]: {}", index, e))))
        .collect::<AppResult<Vec<_>>>()?;

    Ok(ContactsPayload { contacts })
}

fn project_contact(record: &Value) -> Result<Contact, String> {
    let record = record
        .as_object()
        .ok_or_else(|| format!("expected an object, got {}", json_type(record)))?;

    let properties = match record.get("properties") {
        Some(Value::Object(properties)) => properties,
        Some(other) => return Err(format!("'properties' must be an object, got {}", json_type(other))),
        None => return Err("missing 'properties'".to_string()),
    };

    Ok(Contact {
        id: text_field(record.get("id"), "id")?,
        first_name: text_field(properties.get("firstname"), "firstname")?,
        last_name: text_field(properties.get("lastname"), "lastname")?,
        email: text_field(properties.get("email"), "email")?,
    })
}

fn text_field(value: Option<&Value>, name: &str) -> Result<String, String> {
    match value {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(format!("'{}' must be a string, got {}", name, json_type(other))),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_single_contact() {
        let raw = json!({
            "results": [
                {"id": "1", "properties": {"firstname": "Jane", "lastname": "Doe", "email": "j@x.com"}}
            ]
        });

        let payload = format_contacts(&raw).unwrap();

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "contacts": [
                    {"id": "1", "first_name": "Jane", "last_name": "Doe", "email": "j@x.com"}
                ]
            })
        );
    }

    #[test]
    fn test_missing_email_defaults_to_empty() {
        let raw = json!({
            "results": [
                {"id": "1", "properties": {"firstname": "Jane", "lastname": "Doe"}},
                {"id": "2", "properties": {"firstname": "John", "lastname": "Roe", "email": "r@x.com"}}
            ]
        });

        let payload = format_contacts(&raw).unwrap();

        assert_eq!(payload.contacts.len(), 2);
        assert_eq!(payload.contacts[0].email, "");
        assert_eq!(payload.contacts[1].email, "r@x.com");
    }

    #[test]
    fn test_null_properties_default_to_empty() {
        // O HubSpot devolve `null` para propriedades sem valor
        let raw = json!({
            "results": [{"id": "7", "properties": {"firstname": null, "lastname": "Solo", "email": null}}]
        });

        let contact = &format_contacts(&raw).unwrap().contacts[0];
        assert_eq!(contact.first_name, "");
        assert_eq!(contact.last_name, "Solo");
        assert_eq!(contact.email, "");
    }

    #[test]
    fn test_missing_results_is_empty_list() {
        let payload = format_contacts(&json!({})).unwrap();
        assert!(payload.contacts.is_empty());
    }

    #[test]
    fn test_missing_properties_fails_whole_batch() {
        let raw = json!({
            "results": [
                {"id": "1", "properties": {"firstname": "Jane", "lastname": "Doe", "email": "j@x.com"}},
                {"id": "2"}
            ]
        });

        let err = format_contacts(&raw).unwrap_err();
        match err {
            AppError::Formatting(details) => {
                assert!(details.starts_with("results[1]"));
                assert!(details.contains("missing 'properties'"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_null_results_fails() {
        let err = format_contacts(&json!({"results": null})).unwrap_err();
        assert!(err.to_string().contains("'results' must be a list, got null"));
    }

    #[test]
    fn test_non_list_results_fails() {
        let err = format_contacts(&json!({"results": "nope"})).unwrap_err();
        assert!(matches!(err, AppError::Formatting(_)));
    }

    #[test]
    fn test_non_string_field_fails() {
        let raw = json!({"results": [{"id": 1, "properties": {}}]});
        let err = format_contacts(&raw).unwrap_err();
        assert!(err.to_string().contains("'id' must be a string"));
    }
}
