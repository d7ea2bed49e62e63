use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CrmError;

/// Record type an uploaded file can be imported into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportTarget {
    Contacts,
    Leads,
    Companies,
}

impl ImportTarget {
    /// All supported import targets, in catalog order.
    pub fn all() -> &'static [ImportTarget] {
        &[
            ImportTarget::Contacts,
            ImportTarget::Leads,
            ImportTarget::Companies,
        ]
    }

    /// Canonical lowercase name, also used as the store table name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ImportTarget::Contacts => "contacts",
            ImportTarget::Leads => "leads",
            ImportTarget::Companies => "companies",
        }
    }
}

impl fmt::Display for ImportTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ImportTarget {
    type Err = CrmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "contact" | "contacts" => Ok(ImportTarget::Contacts),
            "lead" | "leads" => Ok(ImportTarget::Leads),
            "company" | "companies" => Ok(ImportTarget::Companies),
            other => Err(CrmError::UnknownTarget(other.to_string())),
        }
    }
}

/// Semantic tag driving per-value format validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Email,
    Phone,
}

/// One field of a target record schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetField {
    /// Unique key within the catalog (e.g., "first_name").
    pub name: String,
    /// Human-readable display label (e.g., "First Name").
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
    /// Alternate header strings recognized as referring to this field.
    pub aliases: Vec<String>,
}

/// The fixed field schema for one import target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldCatalog {
    pub target: ImportTarget,
    pub fields: Vec<TargetField>,
}

impl FieldCatalog {
    /// Built-in catalog for an import target.
    pub fn for_target(target: ImportTarget) -> Self {
        let fields = match target {
            ImportTarget::Contacts => contact_fields(),
            ImportTarget::Leads => lead_fields(),
            ImportTarget::Companies => company_fields(),
        };
        Self { target, fields }
    }

    /// Look up a field by its unique name.
    pub fn field(&self, name: &str) -> Option<&TargetField> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &TargetField> {
        self.fields.iter().filter(|field| field.required)
    }
}

fn field(
    name: &str,
    label: &str,
    kind: FieldKind,
    required: bool,
    aliases: &[&str],
) -> TargetField {
    TargetField {
        name: name.to_string(),
        label: label.to_string(),
        kind,
        required,
        aliases: aliases.iter().map(|alias| (*alias).to_string()).collect(),
    }
}

fn contact_fields() -> Vec<TargetField> {
    vec![
        field(
            "first_name",
            "First Name",
            FieldKind::Text,
            true,
            &["first name", "firstname", "fname", "given name"],
        ),
        field(
            "last_name",
            "Last Name",
            FieldKind::Text,
            false,
            &["last name", "lastname", "lname", "surname", "family name"],
        ),
        field(
            "email",
            "Email",
            FieldKind::Email,
            true,
            &["e-mail", "email address", "mail"],
        ),
        field(
            "phone",
            "Phone",
            FieldKind::Phone,
            false,
            &["phone number", "telephone", "tel", "mobile", "cell"],
        ),
        field(
            "company",
            "Company",
            FieldKind::Text,
            false,
            &["company name", "organization", "organisation", "account"],
        ),
        field(
            "job_title",
            "Job Title",
            FieldKind::Text,
            false,
            &["title", "position", "role"],
        ),
        field("status", "Status", FieldKind::Text, false, &[]),
        field("source", "Source", FieldKind::Text, false, &["lead source"]),
        field(
            "website",
            "Website",
            FieldKind::Text,
            false,
            &["url", "web site"],
        ),
        field(
            "address",
            "Address",
            FieldKind::Text,
            false,
            &["street", "street address"],
        ),
        field("city", "City", FieldKind::Text, false, &[]),
        field("country", "Country", FieldKind::Text, false, &[]),
        field(
            "notes",
            "Notes",
            FieldKind::Text,
            false,
            &["comments", "description"],
        ),
    ]
}

fn lead_fields() -> Vec<TargetField> {
    vec![
        field(
            "name",
            "Name",
            FieldKind::Text,
            true,
            &["full name", "contact name", "lead name"],
        ),
        field(
            "email",
            "Email",
            FieldKind::Email,
            true,
            &["e-mail", "email address", "mail"],
        ),
        field(
            "phone",
            "Phone",
            FieldKind::Phone,
            false,
            &["phone number", "telephone", "tel", "mobile"],
        ),
        field(
            "company",
            "Company",
            FieldKind::Text,
            false,
            &["company name", "organization", "organisation"],
        ),
        field(
            "status",
            "Status",
            FieldKind::Text,
            false,
            &["stage", "lead status"],
        ),
        field(
            "source",
            "Source",
            FieldKind::Text,
            false,
            &["lead source", "channel"],
        ),
        field(
            "value",
            "Value",
            FieldKind::Text,
            false,
            &["deal value", "amount", "estimated value"],
        ),
        field("notes", "Notes", FieldKind::Text, false, &["comments"]),
    ]
}

fn company_fields() -> Vec<TargetField> {
    vec![
        field(
            "name",
            "Name",
            FieldKind::Text,
            true,
            &["company", "company name", "organization", "organisation", "account name"],
        ),
        field(
            "website",
            "Website",
            FieldKind::Text,
            false,
            &["url", "web site", "domain"],
        ),
        field("industry", "Industry", FieldKind::Text, false, &["sector"]),
        field(
            "phone",
            "Phone",
            FieldKind::Phone,
            false,
            &["phone number", "telephone", "tel"],
        ),
        field(
            "email",
            "Email",
            FieldKind::Email,
            false,
            &["e-mail", "email address"],
        ),
        field(
            "size",
            "Size",
            FieldKind::Text,
            false,
            &["employees", "company size", "headcount"],
        ),
        field(
            "address",
            "Address",
            FieldKind::Text,
            false,
            &["street address"],
        ),
        field("city", "City", FieldKind::Text, false, &[]),
        field("country", "Country", FieldKind::Text, false, &[]),
        field("notes", "Notes", FieldKind::Text, false, &["description"]),
    ]
}
