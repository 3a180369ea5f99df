// Domain entities and value objects
pub mod conversions;
pub mod insight;
pub mod reading;
pub mod report;
pub mod trend;

// Re-export common types for easier imports
pub use insight::{BloodPressureLevel, GlucoseLevel, HeartRateLevel, InsightReport};
pub use reading::{DateRange, Reading, ReadingSeries, VitalSign};
pub use report::{AdvancedReport, VitalAverages};
pub use trend::{Trend, VitalTrends};
