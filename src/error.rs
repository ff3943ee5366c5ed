use thiserror::Error;

/// The single failure kind raised for any misuse of a builder. Every
/// violation aborts the current operation at the point of detection;
/// nothing is retried and nothing partially built is observable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("'{selector}' is not a property of '{type_name}'")]
    UnknownProperty {
        type_name: &'static str,
        selector: String,
    },

    #[error("property '{property}' of '{type_name}' does not accept a '{supplied}' value")]
    ValueTypeMismatch {
        type_name: &'static str,
        property: &'static str,
        supplied: &'static str,
    },

    #[error("required property '{property}' was not set")]
    RequiredNotSet { property: &'static str },

    #[error("non-nullable property '{property}' is null")]
    NonNullableNull { property: &'static str },
}
