pub mod amount;
pub mod record;

pub use amount::parse_amount;
pub use record::{
    InventoryRecord, InventoryStatus, LeadRecord, NormalizedRecord, PipelineStage,
    DEFAULT_LEAD_SOURCE, DEFAULT_PROPERTY_TYPE, LEAD_TYPE_TAG,
};
