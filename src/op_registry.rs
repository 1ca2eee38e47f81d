use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

use rustc_hash::FxHashMap;

use crate::op_proto::OpProto;

mod file_type;
mod json_registry;
mod load_error;
mod proto_registry;

pub use file_type::FileType;
pub use load_error::{LoadError, LoadErrorKind};

use load_error::LoadErrorImpl;

/// Source of operator metadata for the wrapper generator.
///
/// This is the only interface the generator needs from a registry. The
/// standard implementation is [`OpRegistry`], but tests and embedders can
/// supply their own.
pub trait OpProtoSource {
    /// Look up the metadata for operator `op_type`.
    fn get_op_proto(&self, op_type: &str) -> Result<&OpProto, RegistryError>;
}

/// In-memory collection of operator metadata, keyed by operator type.
///
/// Operators are kept in registration order. New registries are empty. Use
/// [`OpRegistry::register_op`] to add operators, or load a registry dump with
/// [`OpRegistry::load_file`].
///
/// ```
/// use opwrap::{AttrType, OpProto, OpProtoSource, OpRegistry};
///
/// let mut reg = OpRegistry::new();
/// reg.register_op(
///     OpProto::new("scale")
///         .with_input("X", "Input tensor")
///         .with_output("Out", "")
///         .with_attr("scale", AttrType::Float, "(float, default 1.0) Scale factor"),
/// );
///
/// let op = reg.get_op_proto("scale").unwrap();
/// assert_eq!(op.inputs[0].name, "X");
/// ```
#[derive(Default)]
pub struct OpRegistry {
    ops: Vec<OpProto>,

    /// Map of operator type to index in `ops`.
    index: FxHashMap<String, usize>,
}

impl OpRegistry {
    /// Create a new empty registry.
    pub fn new() -> OpRegistry {
        OpRegistry::default()
    }

    /// Create a registry containing `ops`.
    ///
    /// If an operator type occurs more than once, the last entry wins.
    pub fn with_ops(ops: impl IntoIterator<Item = OpProto>) -> OpRegistry {
        let mut reg = OpRegistry::new();
        for op in ops {
            reg.register_op(op);
        }
        reg
    }

    /// Add an operator to the registry.
    ///
    /// If an operator with the same type is already registered, it is replaced
    /// in place and the previous entry is returned.
    pub fn register_op(&mut self, op: OpProto) -> Option<OpProto> {
        if let Some(&idx) = self.index.get(&op.op_type) {
            log::warn!("replacing existing registration for operator \"{}\"", op.op_type);
            return Some(std::mem::replace(&mut self.ops[idx], op));
        }
        self.index.insert(op.op_type.clone(), self.ops.len());
        self.ops.push(op);
        None
    }

    /// Return the types of registered operators, in registration order.
    pub fn op_types(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().map(|op| op.op_type.as_str())
    }

    /// Return the number of registered operators.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Return true if no operators are registered.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Load a registry dump from a file.
    ///
    /// The format is determined from the file extension (`.json` or `.pb`),
    /// or from the content if the extension is not recognized.
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<OpRegistry, LoadError> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(LoadErrorImpl::ReadFailed)?;
        log::debug!("read {} bytes from {}", data.len(), path.display());
        Self::load(&data, FileType::from_path(path))
    }

    /// Load a registry dump from a buffer.
    ///
    /// If `file_type` is `None`, the format is inferred from the content.
    pub fn load(data: &[u8], file_type: Option<FileType>) -> Result<OpRegistry, LoadError> {
        let file_type = file_type
            .or_else(|| FileType::from_buffer(data))
            .ok_or(LoadErrorImpl::UnknownFileType)?;

        let ops = match file_type {
            FileType::Json => json_registry::read_ops(data)?,
            FileType::Protobuf => proto_registry::read_ops(data)?,
        };

        let reg = OpRegistry::with_ops(ops);
        log::info!(
            "loaded {} operators from {} registry dump",
            reg.len(),
            file_type
        );
        Ok(reg)
    }
}

impl OpProtoSource for OpRegistry {
    fn get_op_proto(&self, op_type: &str) -> Result<&OpProto, RegistryError> {
        self.index
            .get(op_type)
            .map(|&idx| &self.ops[idx])
            .ok_or_else(|| RegistryError::UnknownOperator {
                name: op_type.to_string(),
            })
    }
}

/// Errors that occur when looking up an operator.
#[derive(Clone, Debug, PartialEq)]
pub enum RegistryError {
    /// No operator with the given type is registered.
    UnknownOperator {
        /// The operator type that was requested.
        name: String,
    },
}

impl Display for RegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryError::UnknownOperator { name } => {
                write!(f, "operator \"{}\" is not registered", name)
            }
        }
    }
}

impl Error for RegistryError {}
