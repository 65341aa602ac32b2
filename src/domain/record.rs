// src/domain/record.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// Literal stored in the `type` field of every lead document.
pub const LEAD_TYPE_TAG: &str = "Lead";
pub const DEFAULT_LEAD_SOURCE: &str = "Google Sheets";
pub const DEFAULT_PROPERTY_TYPE: &str = "Property";

/// Sales funnel progress of a lead. Declaration order is the dashboard column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PipelineStage {
    #[default]
    New,
    Contacted,
    #[serde(rename = "Site Visit")]
    SiteVisit,
    Negotiation,
    Closed,
    Lost,
}

impl PipelineStage {
    pub const ALL: [PipelineStage; 6] = [
        PipelineStage::New,
        PipelineStage::Contacted,
        PipelineStage::SiteVisit,
        PipelineStage::Negotiation,
        PipelineStage::Closed,
        PipelineStage::Lost,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PipelineStage::New => "New",
            PipelineStage::Contacted => "Contacted",
            PipelineStage::SiteVisit => "Site Visit",
            PipelineStage::Negotiation => "Negotiation",
            PipelineStage::Closed => "Closed",
            PipelineStage::Lost => "Lost",
        }
    }

    /// Matches a stage label exactly. Anything else (e.g. "FB Ads" or "contacted") is not
    /// a stage.
    pub fn from_label(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|stage| stage.label() == value)
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Availability of an inventory unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InventoryStatus {
    #[default]
    Available,
    Booked,
    Sold,
}

impl InventoryStatus {
    pub fn label(self) -> &'static str {
        match self {
            InventoryStatus::Available => "Available",
            InventoryStatus::Booked => "Booked",
            InventoryStatus::Sold => "Sold",
        }
    }

    /// Unknown availability text falls back to `Available`.
    pub fn from_label_or_default(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "booked" => InventoryStatus::Booked,
            "sold" => InventoryStatus::Sold,
            _ => InventoryStatus::Available,
        }
    }
}

impl fmt::Display for InventoryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A fully-defaulted lead, ready to be stored as a document in the `leads` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadRecord {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    pub status: PipelineStage,
    pub source: String,
    #[serde(rename = "type")]
    pub record_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_interest: Option<String>,
}

/// A fully-defaulted inventory unit for the `inventory` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRecord {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(rename = "type")]
    pub property_type: String,
    pub status: InventoryStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sqft: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedRecord {
    Lead(LeadRecord),
    Inventory(InventoryRecord),
}

impl NormalizedRecord {
    /// Identifying value (lead name or unit title), used in logs and failure reports.
    pub fn label(&self) -> &str {
        match self {
            NormalizedRecord::Lead(lead) => &lead.name,
            NormalizedRecord::Inventory(item) => &item.title,
        }
    }
}
