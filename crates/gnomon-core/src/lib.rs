//! Gnomon Core Types and Definitions
//!
//! This crate provides the foundational types for the Gnomon plot-model
//! system. It includes:
//!
//! - **Names**: Efficient string-interned attribute and class names ([`name::Name`])
//! - **Ids**: Document-unique model instance identifiers ([`id::ModelId`])
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Values**: The dynamic attribute value model ([`value::Value`])
//! - **Data types**: Declared-type tags and validation ([`datatype`] module)

pub mod color;
pub mod datatype;
pub mod id;
pub mod name;
pub mod value;
