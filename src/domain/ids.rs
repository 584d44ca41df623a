//! Entity identifiers
//!
//! One string newtype per entity so a mechanic id can never be passed where a bay id
//! is expected. Generated ids are UUIDv7 (timestamp-ordered) behind a short prefix.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize, JsonSchema)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Prefix used for generated identifiers
            pub const PREFIX: &'static str = $prefix;

            /// Wrap an existing identifier
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Generate a fresh, time-ordered identifier
            pub fn generate() -> Self {
                Self(format!("{}-{}", $prefix, uuid::Uuid::now_v7().simple()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self::new(s)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.pad(&self.0)
            }
        }
    };
}

entity_id!(
    /// Vehicle identifier
    VehicleId,
    "veh"
);
entity_id!(
    /// Driver identifier
    DriverId,
    "drv"
);
entity_id!(
    /// Mechanic identifier
    MechanicId,
    "mec"
);
entity_id!(
    /// Maintenance record identifier
    MaintenanceId,
    "mnt"
);
entity_id!(
    /// Workshop bay identifier
    BayId,
    "bay"
);
entity_id!(
    /// Alert identifier
    AlertId,
    "alr"
);
entity_id!(
    /// Planning entry identifier
    PlanningId,
    "pln"
);
