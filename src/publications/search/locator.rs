use serde_json::{Map, Value};

use super::super::domain::{LocatedCase, SearchFieldConfig};

/// Finds every case-like record inside an arbitrarily shaped payload.
///
/// Hearing-list payloads nest case data at wildly different paths (one list
/// type keeps cases under
/// `courtLists[].courtHouse.courtRoom[].session[].sittings[].hearing[].case[]`,
/// another is a flat array), so nothing here assumes a path. The walk is
/// depth-first and left-to-right, arrays in index order; with the
/// `preserve_order` map this yields matches in document order.
///
/// An object qualifies as a case when it directly carries a configured key
/// with a non-blank string value. A qualifying object contributes exactly
/// one record and is not descended into, so a case nested inside another
/// case is folded into its parent. Every sibling branch is still visited.
pub fn locate_cases(payload: &Value, fields: &SearchFieldConfig) -> Vec<LocatedCase> {
    let mut cases = Vec::new();
    if fields.is_searchable() {
        collect(payload, fields, &mut cases);
    }
    cases
}

fn collect(value: &Value, fields: &SearchFieldConfig, cases: &mut Vec<LocatedCase>) {
    match value {
        Value::Array(items) => {
            for item in items {
                collect(item, fields, cases);
            }
        }
        Value::Object(entries) => {
            if let Some(case) = direct_case(entries, fields) {
                cases.push(case);
            } else {
                for nested in entries.values() {
                    collect(nested, fields, cases);
                }
            }
        }
        _ => {}
    }
}

fn direct_case(entries: &Map<String, Value>, fields: &SearchFieldConfig) -> Option<LocatedCase> {
    let case_number = fields
        .case_number_key()
        .and_then(|key| string_value(entries, key));
    let case_name = fields
        .case_name_key()
        .and_then(|key| string_value(entries, key));

    if case_number.is_none() && case_name.is_none() {
        return None;
    }

    Some(LocatedCase {
        case_number,
        case_name,
    })
}

// Non-string values for a configured key count as absent, not as an error.
fn string_value(entries: &Map<String, Value>, key: &str) -> Option<String> {
    entries
        .get(key)
        .and_then(Value::as_str)
        .filter(|value| !value.trim().is_empty())
        .map(str::to_string)
}
