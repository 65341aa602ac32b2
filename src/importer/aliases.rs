// src/importer/aliases.rs

use crate::errors::ServerError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// The two collections an import can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordKind {
    #[default]
    Leads,
    Inventory,
}

impl RecordKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RecordKind::Leads => "leads",
            RecordKind::Inventory => "inventory",
        }
    }

    /// Header synonyms used when resolving a row of this kind.
    pub fn aliases(self) -> &'static [FieldAliases] {
        match self {
            RecordKind::Leads => LEAD_ALIASES,
            RecordKind::Inventory => INVENTORY_ALIASES,
        }
    }
}

impl FromStr for RecordKind {
    type Err = ServerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "leads" | "lead" => Ok(RecordKind::Leads),
            "inventory" => Ok(RecordKind::Inventory),
            other => Err(ServerError::BadRequest(format!(
                "unknown import type '{other}' (expected 'leads' or 'inventory')"
            ))),
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical target fields across both record kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Name,
    Phone,
    Email,
    Budget,
    Status,
    Source,
    Type,
    PropertyInterest,
    Title,
    Location,
    Price,
    Sqft,
}

impl Field {
    pub fn key(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Phone => "phone",
            Field::Email => "email",
            Field::Budget => "budget",
            Field::Status => "status",
            Field::Source => "source",
            Field::Type => "type",
            Field::PropertyInterest => "propertyInterest",
            Field::Title => "title",
            Field::Location => "location",
            Field::Price => "price",
            Field::Sqft => "sqft",
        }
    }
}

/// One row of an alias table: a canonical field and the normalized headers that feed it.
#[derive(Debug)]
pub struct FieldAliases {
    pub field: Field,
    pub aliases: &'static [&'static str],
}

// Order matters: fields are resolved top to bottom, aliases are matched as substrings.
// "source/status" is listed under both status and source on purpose.
pub const LEAD_ALIASES: &[FieldAliases] = &[
    FieldAliases {
        field: Field::Name,
        aliases: &[
            "name",
            "full name",
            "client name",
            "lead/property name",
            "lead name",
            "client",
        ],
    },
    FieldAliases {
        field: Field::Phone,
        aliases: &["phone", "mobile", "contact", "contact/location", "number"],
    },
    FieldAliases {
        field: Field::Email,
        aliases: &["email", "mail"],
    },
    FieldAliases {
        field: Field::Budget,
        aliases: &[
            "budget",
            "price",
            "budget/price",
            "amount",
            "willing to pay",
        ],
    },
    FieldAliases {
        field: Field::Status,
        aliases: &["status", "stage", "source/status"],
    },
    FieldAliases {
        field: Field::Source,
        aliases: &["source", "channel", "referrer", "source/status"],
    },
    FieldAliases {
        field: Field::Type,
        aliases: &["type", "category"],
    },
    FieldAliases {
        field: Field::PropertyInterest,
        aliases: &["property", "interest"],
    },
];

pub const INVENTORY_ALIASES: &[FieldAliases] = &[
    FieldAliases {
        field: Field::Title,
        aliases: &[
            "title",
            "name",
            "property name",
            "lead/property name",
            "unit",
        ],
    },
    FieldAliases {
        field: Field::Location,
        aliases: &["location", "address", "contact/location", "city"],
    },
    FieldAliases {
        field: Field::Price,
        aliases: &["price", "cost", "budget/price", "asking price"],
    },
    FieldAliases {
        field: Field::Type,
        aliases: &["type", "category", "property type"],
    },
    FieldAliases {
        field: Field::Status,
        aliases: &["status", "availability", "source/status"],
    },
    FieldAliases {
        field: Field::Sqft,
        aliases: &["sqft", "square feet", "size"],
    },
];
