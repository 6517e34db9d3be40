mod fuel_record;
mod record_id;
mod service_type;

pub use fuel_record::{
    compute_distance_since_last, compute_efficiency, compute_total_amount, sort_by_date_desc,
    FuelRecord,
};
pub use record_id::RecordId;
pub use service_type::ServiceType;
