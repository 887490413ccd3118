//! Script lint rules.
//!
//! Rules here are **opt-in** in eslint-plugin-vue; enable them in the
//! configuration:
//!
//! ```toml
//! [rules]
//! "vue/require-emit-validator" = "warn"
//! ```

mod require_emit_validator;

pub use require_emit_validator::{classify, EmitValidation, RequireEmitValidator};
