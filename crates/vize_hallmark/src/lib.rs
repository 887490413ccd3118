//! # vize_hallmark
//!
//! Hallmark - The emit validator check for Vize.
//!
//! ## Name Origin
//!
//! A **hallmark** is the stamp struck into precious metal to certify what it
//! is. `vize_hallmark` stamps every declared emit: each one should certify
//! its payload with a validator function.
//!
//! ## What it checks
//!
//! `vue/require-emit-validator` reports emits declared without a validator,
//! in options objects (`export default { emits }`, `defineComponent`,
//! `Vue.component`, `createApp`, ...) and in `defineEmits(...)` calls inside
//! `<script setup>`. Emits declared with `null` get a suggestion to use
//! `() => true` instead; type-only `defineEmits<...>()` is left alone.
//!
//! ## Usage
//!
//! ```ignore
//! use vize_hallmark::{Linter, LintConfig};
//!
//! let config = LintConfig::from_toml_str(r#"
//! [rules]
//! "vue/require-emit-validator" = "error"
//! "#)?;
//! let linter = Linter::new().with_config(config);
//! let result = linter.lint_sfc(source, "Button.vue")?;
//! for diag in result.diagnostics {
//!     println!("{}:{} {}", result.filename, diag.start, diag.message);
//! }
//! ```

pub mod component;
pub mod config;
pub mod context;
pub mod diagnostic;
pub mod emits;
pub mod linter;
pub mod rule;
pub mod rules;
pub mod sfc;

pub use component::{collect_sites, EmitDeclarationSite};
pub use config::{ConfigError, LintConfig, RuleSetting};
pub use context::{LintContext, ScriptKind};
pub use diagnostic::{Fix, LintDiagnostic, LintSummary, Severity, TextEdit};
pub use emits::{extract_emits, ComponentEmit, UNKNOWN_EMIT};
pub use linter::{LintError, LintResult, Linter};
pub use rule::{RuleCategory, RuleMeta, RuleRegistry, ScriptRule};
pub use rules::{EmitValidation, RequireEmitValidator};
pub use sfc::{extract_script_blocks, ScriptBlock, SfcError};

/// Lint a `.vue` file with the default configuration
pub fn lint(source: &str, filename: &str) -> Result<LintResult, LintError> {
    Linter::new().lint_sfc(source, filename)
}
