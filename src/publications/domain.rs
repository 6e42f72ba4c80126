use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

/// Identifier wrapper for one published hearing-list version.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ArtefactId(pub String);

/// Identifier wrapper for a list-type definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListTypeId(pub String);

/// Three-tier visibility classification carried by every artefact.
///
/// The tiers form a strict ordering: everyone may see `Public`, verified and
/// administrative accounts may know about `Private`, and `Classified` is
/// additionally gated by originating-system provenance. Parsing is total and
/// fails closed: anything that is not exactly `PUBLIC` or `PRIVATE` becomes
/// `Classified`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Sensitivity {
    Public,
    Private,
    Classified,
}

impl Sensitivity {
    pub fn from_label(label: Option<&str>) -> Self {
        match label {
            Some("PUBLIC") => Sensitivity::Public,
            Some("PRIVATE") => Sensitivity::Private,
            _ => Sensitivity::Classified,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Sensitivity::Public => "PUBLIC",
            Sensitivity::Private => "PRIVATE",
            Sensitivity::Classified => "CLASSIFIED",
        }
    }
}

impl Default for Sensitivity {
    fn default() -> Self {
        Sensitivity::Classified
    }
}

impl<'de> Deserialize<'de> for Sensitivity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Total: null, numbers, and unknown strings all land on Classified.
        let raw = serde_json::Value::deserialize(deserializer)?;
        Ok(Sensitivity::from_label(raw.as_str()))
    }
}

/// Closed set of roles an authenticated account can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViewerRole {
    /// Unconditional elevated role; sees everything.
    SystemAdmin,
    /// Central admin team; metadata only for non-public content.
    CourtAdmin,
    /// Local court admin; metadata only for non-public content.
    RegionalAdmin,
    /// Verified citizen or professional account.
    Verified,
    /// Authenticated but unprivileged account.
    GeneralPublic,
}

impl ViewerRole {
    /// Unknown labels resolve to the least-privileged role.
    pub fn from_label(label: &str) -> Self {
        match label {
            "SYSTEM_ADMIN" => ViewerRole::SystemAdmin,
            "COURT_ADMIN" => ViewerRole::CourtAdmin,
            "REGIONAL_ADMIN" => ViewerRole::RegionalAdmin,
            "VERIFIED" => ViewerRole::Verified,
            _ => ViewerRole::GeneralPublic,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ViewerRole::SystemAdmin => "SYSTEM_ADMIN",
            ViewerRole::CourtAdmin => "COURT_ADMIN",
            ViewerRole::RegionalAdmin => "REGIONAL_ADMIN",
            ViewerRole::Verified => "VERIFIED",
            ViewerRole::GeneralPublic => "GENERAL_PUBLIC",
        }
    }
}

/// Resolved account descriptor supplied by the authentication layer.
///
/// `None` at the call sites of the access functions means an unauthenticated
/// public visitor. Provenance names the system the account authenticated
/// through and only matters for `Verified` accounts reading classified lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewer {
    pub role: ViewerRole,
    pub provenance: String,
}

impl Viewer {
    pub fn new(role: ViewerRole, provenance: impl Into<String>) -> Self {
        Self {
            role,
            provenance: provenance.into(),
        }
    }
}

/// Publication language of a hearing list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Language {
    English,
    Welsh,
    Bilingual,
}

impl Default for Language {
    fn default() -> Self {
        Language::English
    }
}

/// One published version of a hearing list, immutable once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artefact {
    pub artefact_id: ArtefactId,
    pub location_id: String,
    pub list_type_id: ListTypeId,
    #[serde(default)]
    pub sensitivity: Sensitivity,
    /// Originating system, kept for audit; classified gating uses the list
    /// type's provenance instead.
    pub provenance: String,
    #[serde(default)]
    pub language: Language,
    pub content_date: NaiveDate,
    pub display_from: NaiveDateTime,
    pub display_to: NaiveDateTime,
}

impl Artefact {
    pub fn is_within_display_window(&self, at: NaiveDateTime) -> bool {
        self.display_from <= at && at <= self.display_to
    }
}

/// Static definition of one kind of hearing list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListType {
    pub id: ListTypeId,
    pub name: String,
    pub friendly_name: String,
    /// The single originating-system tag classified artefacts of this list
    /// type are matched against.
    pub provenance: String,
}

/// Per-list-type names of the payload keys that carry case data.
///
/// Either key may be absent or blank, which switches that dimension off. A
/// config with neither key is simply not searchable; it is never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFieldConfig {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub case_number_field: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub case_name_field: Option<String>,
}

impl SearchFieldConfig {
    pub fn new(case_number_field: Option<&str>, case_name_field: Option<&str>) -> Self {
        Self {
            case_number_field: case_number_field.map(str::to_string),
            case_name_field: case_name_field.map(str::to_string),
        }
    }

    pub fn case_number_key(&self) -> Option<&str> {
        effective_key(self.case_number_field.as_deref())
    }

    pub fn case_name_key(&self) -> Option<&str> {
        effective_key(self.case_name_field.as_deref())
    }

    pub fn is_searchable(&self) -> bool {
        self.case_number_key().is_some() || self.case_name_key().is_some()
    }
}

fn effective_key(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|key| !key.is_empty())
}

/// A case found inside a payload, before it is tied to an artefact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocatedCase {
    pub case_number: Option<String>,
    pub case_name: Option<String>,
}

/// One row of the flat search index for an artefact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtefactSearchRecord {
    pub artefact_id: ArtefactId,
    pub case_number: Option<String>,
    pub case_name: Option<String>,
}

impl ArtefactSearchRecord {
    pub fn from_case(artefact_id: ArtefactId, case: LocatedCase) -> Self {
        Self {
            artefact_id,
            case_number: case.case_number,
            case_name: case.case_name,
        }
    }
}

pub(crate) fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
