use std::collections::HashMap;

use async_trait::async_trait;

use super::domain::{ListType, ListTypeId, SearchFieldConfig};
use super::repository::{SearchConfigSource, SearchStoreError};

/// Pre-fetched lookup of list types by id, handed to the access layer.
#[derive(Debug, Clone, Default)]
pub struct ListTypeRegistry {
    by_id: HashMap<ListTypeId, ListType>,
}

impl ListTypeRegistry {
    pub fn new(list_types: impl IntoIterator<Item = ListType>) -> Self {
        Self {
            by_id: list_types
                .into_iter()
                .map(|list_type| (list_type.id.clone(), list_type))
                .collect(),
        }
    }

    pub fn resolve(&self, id: &ListTypeId) -> Option<&ListType> {
        self.by_id.get(id)
    }
}

/// One catalog row: the list type plus its optional search configuration.
#[derive(Debug, Clone)]
pub struct ListTypeCatalogEntry {
    pub list_type: ListType,
    pub search_fields: Option<SearchFieldConfig>,
}

/// Built-in definitions of the hearing lists the service publishes.
///
/// Each entry names the provenance used to gate classified artefacts of
/// that list type and, where the payload shape is known, the payload keys
/// that carry case data.
#[derive(Debug, Clone)]
pub struct ListTypeCatalog {
    entries: Vec<ListTypeCatalogEntry>,
}

impl ListTypeCatalog {
    pub fn standard() -> Self {
        let entries = vec![
            ListTypeCatalogEntry {
                list_type: list_type(
                    "CIVIL_DAILY_CAUSE_LIST",
                    "Civil Daily Cause List",
                    "COURT_GATEWAY",
                ),
                search_fields: Some(SearchFieldConfig::new(Some("caseNumber"), Some("caseName"))),
            },
            ListTypeCatalogEntry {
                list_type: list_type(
                    "FAMILY_DAILY_CAUSE_LIST",
                    "Family Daily Cause List",
                    "COURT_GATEWAY",
                ),
                // Family payloads anonymise parties; only the number is indexed.
                search_fields: Some(SearchFieldConfig::new(Some("caseNumber"), None)),
            },
            ListTypeCatalogEntry {
                list_type: list_type("CROWN_DAILY_LIST", "Crown Court Daily List", "CRIME_GATEWAY"),
                search_fields: Some(SearchFieldConfig::new(
                    Some("caseReference"),
                    Some("defendantName"),
                )),
            },
            ListTypeCatalogEntry {
                list_type: list_type(
                    "TRIBUNAL_WEEKLY_HEARING_LIST",
                    "Tribunal Weekly Hearing List",
                    "TRIBUNAL_GATEWAY",
                ),
                search_fields: None,
            },
        ];

        Self { entries }
    }

    pub fn registry(&self) -> ListTypeRegistry {
        ListTypeRegistry::new(self.entries.iter().map(|entry| entry.list_type.clone()))
    }

    pub fn search_fields_for(&self, id: &ListTypeId) -> Option<SearchFieldConfig> {
        self.entries
            .iter()
            .find(|entry| entry.list_type.id == *id)
            .and_then(|entry| entry.search_fields.clone())
    }
}

#[async_trait]
impl SearchConfigSource for ListTypeCatalog {
    async fn config_for_list_type(
        &self,
        list_type_id: &ListTypeId,
    ) -> Result<Option<SearchFieldConfig>, SearchStoreError> {
        Ok(self.search_fields_for(list_type_id))
    }
}

fn list_type(id: &str, friendly_name: &str, provenance: &str) -> ListType {
    ListType {
        id: ListTypeId(id.to_string()),
        name: id.to_string(),
        friendly_name: friendly_name.to_string(),
        provenance: provenance.to_string(),
    }
}
