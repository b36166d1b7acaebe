//! Centralized path definitions for generated code.
//!
//! Using `relfield::` prefix (without leading `::`) lets the facade crate's own
//! tests use the derive through `extern crate self as relfield`.

use proc_macro2::TokenStream;
use quote::quote;

// =============================================================================
// STANDARD LIBRARY
// =============================================================================

pub mod std {
    use super::*;

    pub fn option() -> TokenStream {
        quote!(::std::option::Option)
    }

    pub fn string() -> TokenStream {
        quote!(::std::string::String)
    }
}

// =============================================================================
// CORE TYPES AND TRAITS
// =============================================================================

pub mod core {
    use super::*;

    pub fn record() -> TokenStream {
        quote!(relfield::core::Record)
    }

    pub fn model() -> TokenStream {
        quote!(relfield::core::Model)
    }

    pub fn value() -> TokenStream {
        quote!(relfield::core::Value)
    }

    pub fn to_value() -> TokenStream {
        quote!(relfield::core::ToValue)
    }

    pub fn model_descriptor() -> TokenStream {
        quote!(relfield::core::ModelDescriptor)
    }

    pub fn field_descriptor() -> TokenStream {
        quote!(relfield::core::FieldDescriptor)
    }

    pub fn field_kind() -> TokenStream {
        quote!(relfield::core::FieldKind)
    }
}
