//! Compiles binding definition files into the two halves of the
//! native/managed interop glue: exported C++ accessor thunks with stable
//! mangled names, and C# proxy classes that call them and marshal the
//! results back into managed representations.

pub mod converters;
pub mod generators;
pub mod lexer;
pub mod model;
pub mod parser;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub use generators::CodegenError;
pub use lexer::{tokenize, LexError, Token, TokenKind};
pub use model::{BindingFile, ExposedMember, ExposedType, QualifiedIdentifier};
pub use parser::{ParseError, Parser};

/// Both generated artifacts for one compilation unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedBindings {
    /// C++ source fragment with one exported thunk per exposed member.
    pub native_glue: String,
    /// C# source fragment with one proxy class per exposed type.
    pub managed_proxies: String,
}

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("duplicate declaration of native type `{identifier}`")]
    DuplicateType { identifier: String },
    #[error(transparent)]
    Codegen(#[from] CodegenError),
}

/// Every stage fails fast: the first error aborts the run and no artifact is
/// produced. There is no partial-success mode.
pub fn compile(source: &str) -> Result<GeneratedBindings, CompileError> {
    let tokens = tokenize(source)?;
    let file = Parser::new(tokens).parse()?;
    check_unique_type_identifiers(&file)?;

    Ok(GeneratedBindings {
        native_glue: generators::generate_native_glue(&file)?,
        managed_proxies: generators::generate_managed_proxies(&file)?,
    })
}

/// Reads one binding definition file and compiles it.
pub fn compile_file(path: &Path) -> Result<GeneratedBindings, CompileError> {
    let source = std::fs::read_to_string(path).map_err(|source| CompileError::Read {
        path: path.to_owned(),
        source,
    })?;
    compile(&source)
}

/// The type identifier is the unique key of a compilation unit; two blocks
/// declaring the same qualified name would generate colliding accessors.
fn check_unique_type_identifiers(file: &BindingFile) -> Result<(), CompileError> {
    let mut seen = HashSet::new();
    for ty in &file.types {
        if !seen.insert(&ty.identifier) {
            return Err(CompileError::DuplicateType {
                identifier: ty.identifier.to_string(),
            });
        }
    }
    Ok(())
}
