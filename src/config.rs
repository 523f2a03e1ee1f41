//! Textual conventions for the aggregate sources.
//!
//! The engine never re-derives these: the base class name, the access
//! section markers, the implementation marker format, and the namespace
//! wrapper tokens are all owned by configuration. Defaults match the
//! historical `grid_operator.hpp` / `grid_operator.cpp` layout; a
//! `.declsplit.toml` next to the invocation overrides them per project.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = ".declsplit.toml";

/// Placeholder substituted with the derived type name in templated
/// convention strings (`impl_marker`, `include_line`).
pub const CLASS_SLOT: &str = "{class}";

/// The textual conventions one split run operates under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conventions {
    /// Name of the base class every derived class inherits from.
    #[serde(default = "default_base_class")]
    pub base_class: String,

    /// Marker comment preceding each implementation block. Must contain
    /// `{class}`.
    #[serde(default = "default_impl_marker")]
    pub impl_marker: String,

    /// Line that closes the namespace in the aggregate implementation;
    /// bounds the last implementation block.
    #[serde(default = "default_impl_epilogue")]
    pub impl_epilogue: String,

    #[serde(default = "default_public_marker")]
    pub public_marker: String,

    #[serde(default = "default_protected_marker")]
    pub protected_marker: String,

    #[serde(default = "default_private_marker")]
    pub private_marker: String,

    /// Opaque namespace wrapper tokens used when emitting. Never parsed.
    #[serde(default = "default_namespace_open")]
    pub namespace_open: String,

    #[serde(default = "default_namespace_close")]
    pub namespace_close: String,

    /// First line of every emitted header.
    #[serde(default = "default_header_prologue")]
    pub header_prologue: String,

    /// Include directive template for one derived class. Must contain
    /// `{class}`.
    #[serde(default = "default_include_line")]
    pub include_line: String,

    #[serde(default = "default_header_ext")]
    pub header_ext: String,

    #[serde(default = "default_source_ext")]
    pub source_ext: String,
}

fn default_base_class() -> String {
    "GridOperator".to_string()
}

fn default_impl_marker() -> String {
    "// {class} implementation".to_string()
}

fn default_impl_epilogue() -> String {
    "} // namespace VXZ".to_string()
}

fn default_public_marker() -> String {
    "public:".to_string()
}

fn default_protected_marker() -> String {
    "protected:".to_string()
}

fn default_private_marker() -> String {
    "private:".to_string()
}

fn default_namespace_open() -> String {
    "namespace VXZ {".to_string()
}

fn default_namespace_close() -> String {
    "}".to_string()
}

fn default_header_prologue() -> String {
    "#pragma once".to_string()
}

fn default_include_line() -> String {
    "#include \"operator/{class}.hpp\"".to_string()
}

fn default_header_ext() -> String {
    "hpp".to_string()
}

fn default_source_ext() -> String {
    "cpp".to_string()
}

impl Default for Conventions {
    fn default() -> Self {
        Self {
            base_class: default_base_class(),
            impl_marker: default_impl_marker(),
            impl_epilogue: default_impl_epilogue(),
            public_marker: default_public_marker(),
            protected_marker: default_protected_marker(),
            private_marker: default_private_marker(),
            namespace_open: default_namespace_open(),
            namespace_close: default_namespace_close(),
            header_prologue: default_header_prologue(),
            include_line: default_include_line(),
            header_ext: default_header_ext(),
            source_ext: default_source_ext(),
        }
    }
}

impl Conventions {
    /// Render the implementation marker comment for one derived type.
    pub fn marker_for(&self, type_name: &str) -> String {
        self.impl_marker.replace(CLASS_SLOT, type_name)
    }

    /// Render the include directive for one derived type.
    pub fn include_for(&self, type_name: &str) -> String {
        self.include_line.replace(CLASS_SLOT, type_name)
    }

    fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            !self.base_class.is_empty()
                && self
                    .base_class
                    .chars()
                    .all(|c| c.is_alphanumeric() || c == '_'),
            "base_class must be a plain identifier, got `{}`",
            self.base_class
        );
        anyhow::ensure!(
            self.impl_marker.contains(CLASS_SLOT),
            "impl_marker must contain the `{}` placeholder",
            CLASS_SLOT
        );
        anyhow::ensure!(
            self.include_line.contains(CLASS_SLOT),
            "include_line must contain the `{}` placeholder",
            CLASS_SLOT
        );
        Ok(())
    }

    /// Load conventions from an explicit config file path.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let conventions: Conventions = toml::from_str(&contents)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        conventions.validate()?;
        Ok(conventions)
    }

    /// Resolve conventions for a run: explicit config path if given,
    /// otherwise `.declsplit.toml` in the current directory if present,
    /// otherwise defaults. A `--base` override is applied on top.
    pub fn resolve(config_path: Option<&Path>, base_override: Option<&str>) -> Result<Self> {
        let mut conventions = match config_path {
            Some(path) => Self::from_file(path)?,
            None => {
                let local = Path::new(CONFIG_FILE_NAME);
                if local.is_file() {
                    log::debug!("loading conventions from {}", local.display());
                    Self::from_file(local)?
                } else {
                    Self::default()
                }
            }
        };
        if let Some(base) = base_override {
            conventions.base_class = base.to_string();
        }
        conventions.validate()?;
        Ok(conventions)
    }
}

/// Default config file contents written by `declsplit init`.
pub const DEFAULT_CONFIG_TOML: &str = r##"# declsplit conventions

base_class = "GridOperator"
impl_marker = "// {class} implementation"
impl_epilogue = "} // namespace VXZ"
public_marker = "public:"
protected_marker = "protected:"
private_marker = "private:"
namespace_open = "namespace VXZ {"
namespace_close = "}"
header_prologue = "#pragma once"
include_line = '#include "operator/{class}.hpp"'
header_ext = "hpp"
source_ext = "cpp"
"##;
