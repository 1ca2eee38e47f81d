//! opwrap generates Python layer functions from operator metadata.
//!
//! Deep learning frameworks typically describe each operator (its inputs,
//! outputs, attributes and documentation) in a registry. opwrap turns an
//! operator description into the source of a Python function which builds
//! that operator through a `LayerHelper`, with a docstring derived from the
//! registry's documentation.
//!
//! # Workflow
//!
//! 1. Obtain operator metadata. Either build an [`OpRegistry`] in code using
//!    [`OpRegistry::register_op`] or load a registry dump with
//!    [`OpRegistry::load_file`]. Dumps can be JSON or a stream of
//!    length-delimited Protocol Buffers `OpProto` messages.
//! 2. Generate the wrapper using [`generate_wrapper`], or create a
//!    [`WrapperGenerator`] once and reuse it for many operators.
//!
//! ```
//! use opwrap::{generate_wrapper, AttrType, OpProto, OpRegistry};
//!
//! let registry = OpRegistry::with_ops([OpProto::new("scale")
//!     .with_input("X", "Input tensor")
//!     .with_output("Out", "Output tensor")
//!     .with_attr("scale", AttrType::Float, "(float, default 1.0) Scale factor")
//!     .with_comment("Scale operator.")]);
//!
//! let code = generate_wrapper(&registry, "scale").unwrap();
//! assert!(code.contains("def scale(x, scale=1.0):"));
//! ```
//!
//! # Generated code
//!
//! - Registry names are converted to Python identifiers with
//!   [`naming::NameNormalizer`] (`InputDimIdx` becomes `input_dim_idx`).
//! - Attribute defaults are extracted from comments of the form
//!   `(float, default 1.0) ...`.
//! - Framework bookkeeping attributes listed in [`render::FILTERED_ATTRS`]
//!   are omitted.
//! - Output docstring lines contain `${name_type}` and `${name_comment}`
//!   placeholders for later substitution.
//!
//! The emitted code is not parsed or validated.

pub mod comment;
pub mod env;
mod generator;
pub mod naming;
mod op_proto;
mod op_registry;
pub mod protobuf;
pub mod render;
mod substitute;
pub mod template;

pub use generator::{generate_wrapper, GenerateError, WrapperGenerator};
pub use op_proto::{AttrProto, AttrType, OpProto, VarProto};
pub use op_registry::{
    FileType, LoadError, LoadErrorKind, OpProtoSource, OpRegistry, RegistryError,
};
