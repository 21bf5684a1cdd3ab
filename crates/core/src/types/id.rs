//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types.
//!
//! IDs are opaque strings. Fresh IDs are UUID v4 text, but any string loaded
//! from storage is accepted as-is so older blobs keep their identities.

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Constructors: `generate()` (fresh UUID v4) and `new()` (wrap existing)
/// - `as_str()`, `Display`, `AsRef<str>`, and `From` conversions
///
/// # Example
///
/// ```rust
/// # use estate_pulse_core::define_id;
/// define_id!(AgentId);
/// define_id!(BrokerId);
///
/// let agent_id = AgentId::new("a-1");
/// let broker_id = BrokerId::new("a-1");
///
/// // These are different types, so this won't compile:
/// // let _: AgentId = broker_id;
/// assert_eq!(agent_id.as_str(), broker_id.as_str());
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Generate a fresh, globally unique ID.
            #[must_use]
            pub fn generate() -> Self {
                Self($crate::types::id::fresh_id())
            }

            /// Wrap an existing ID string.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

/// Produce a new UUID v4 string.
///
/// Used by [`define_id!`]; exposed so the macro works from other crates
/// without them depending on `uuid` directly.
#[doc(hidden)]
#[must_use]
pub fn fresh_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

// Define standard entity IDs
define_id!(ProjectId);
define_id!(InstrumentId);
define_id!(InteractionId);
