//! Main linter entry point.
//!
//! Parses each script with oxc and runs the enabled rules over it. SFC files
//! are split into their script blocks first and diagnostics are mapped back
//! to file offsets.

use oxc_allocator::Allocator;
use oxc_ast::ast::Program;
use oxc_parser::Parser;
use oxc_span::SourceType;

use crate::config::LintConfig;
use crate::context::{is_component_filename, LintContext, ScriptKind};
use crate::diagnostic::{LintDiagnostic, LintSummary};
use crate::rule::{RuleRegistry, ScriptRule};
use crate::sfc::{extract_script_blocks, SfcError};

/// Error type for linting a whole file.
#[derive(Debug, thiserror::Error)]
pub enum LintError {
    /// Script blocks of an SFC could not be located.
    #[error("SFC parse error: {0}")]
    Sfc(#[from] SfcError),
}

/// Lint result for a single file
#[derive(Debug, Clone)]
pub struct LintResult {
    /// Filename that was linted
    pub filename: String,
    /// Collected diagnostics
    pub diagnostics: Vec<LintDiagnostic>,
    /// Number of errors
    pub error_count: usize,
    /// Number of warnings
    pub warning_count: usize,
}

impl LintResult {
    fn empty(filename: &str) -> Self {
        Self {
            filename: filename.to_string(),
            diagnostics: Vec::new(),
            error_count: 0,
            warning_count: 0,
        }
    }

    /// Check if there are any errors
    #[inline]
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    /// Check if there are any diagnostics
    #[inline]
    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    fn merge(&mut self, other: LintResult) {
        self.error_count += other.error_count;
        self.warning_count += other.warning_count;
        self.diagnostics.extend(other.diagnostics);
    }
}

/// Main linter struct.
///
/// Rules are `Send + Sync`, so one linter can be shared across threads.
pub struct Linter {
    registry: RuleRegistry,
    config: LintConfig,
}

impl Linter {
    /// Create a new linter with all rules at their default severity
    #[inline]
    pub fn new() -> Self {
        Self::with_registry(RuleRegistry::with_all())
    }

    /// Create a linter with a custom rule registry
    #[inline]
    pub fn with_registry(registry: RuleRegistry) -> Self {
        Self {
            registry,
            config: LintConfig::default(),
        }
    }

    /// Apply rule settings
    #[inline]
    pub fn with_config(mut self, config: LintConfig) -> Self {
        self.config = config;
        self
    }

    /// Get the active configuration
    #[inline]
    pub fn config(&self) -> &LintConfig {
        &self.config
    }

    /// Get the rule registry
    #[inline]
    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Get all registered rules
    #[inline]
    pub fn rules(&self) -> &[Box<dyn ScriptRule>] {
        self.registry.rules()
    }

    /// Check if a rule would run under the current configuration
    pub fn is_rule_enabled(&self, rule_name: &str) -> bool {
        self.registry
            .get(rule_name)
            .is_some_and(|rule| self.config.severity_for(rule.meta()).is_some())
    }

    /// Lint a standalone script (`.js`, `.ts`, `.jsx`, `.tsx`).
    ///
    /// The source type comes from the filename extension, falling back to
    /// TypeScript.
    pub fn lint_script(&self, source: &str, filename: &str, script_kind: ScriptKind) -> LintResult {
        let source_type = SourceType::from_path(filename).unwrap_or_else(|_| SourceType::ts());
        self.lint_source(
            source,
            filename,
            script_kind,
            source_type,
            is_component_filename(filename),
        )
    }

    /// Lint a full Vue SFC file.
    ///
    /// Every `<script>` and `<script setup>` block is linted; diagnostic
    /// offsets are relative to the whole file.
    pub fn lint_sfc(&self, source: &str, filename: &str) -> Result<LintResult, LintError> {
        let blocks = extract_script_blocks(source)?;
        let mut result = LintResult::empty(filename);

        for block in blocks {
            let mut block_result = self.lint_source(
                block.content,
                filename,
                block.script_kind(),
                block.source_type(),
                true,
            );
            for diag in &mut block_result.diagnostics {
                diag.shift(block.offset);
            }
            result.merge(block_result);
        }

        Ok(result)
    }

    /// Lint multiple files and aggregate results.
    ///
    /// `.vue` files go through [`Linter::lint_sfc`]; an SFC whose script
    /// blocks cannot be located is logged and contributes no diagnostics.
    pub fn lint_files(&self, files: &[(String, String)]) -> (Vec<LintResult>, LintSummary) {
        let mut results = Vec::with_capacity(files.len());
        let mut summary = LintSummary::default();

        for (filename, source) in files {
            let result = if filename.ends_with(".vue") {
                self.lint_sfc(source, filename).unwrap_or_else(|err| {
                    tracing::warn!(filename = %filename, error = %err, "skipping SFC");
                    LintResult::empty(filename)
                })
            } else {
                self.lint_script(source, filename, ScriptKind::Plain)
            };

            for diag in &result.diagnostics {
                summary.add(diag);
            }
            results.push(result);
        }

        summary.file_count = files.len();
        tracing::debug!(
            files = summary.file_count,
            errors = summary.error_count,
            warnings = summary.warning_count,
            "lint finished"
        );
        (results, summary)
    }

    fn lint_source(
        &self,
        source: &str,
        filename: &str,
        script_kind: ScriptKind,
        source_type: SourceType,
        component_file: bool,
    ) -> LintResult {
        let allocator = Allocator::default();
        let ret = Parser::new(&allocator, source, source_type).parse();

        if ret.panicked {
            tracing::warn!(filename = %filename, "script could not be parsed, skipping");
            return LintResult::empty(filename);
        }
        if !ret.errors.is_empty() {
            tracing::debug!(
                filename = %filename,
                errors = ret.errors.len(),
                "linting recovered AST after parse errors"
            );
        }

        let mut ctx =
            LintContext::new(source, filename, script_kind).with_component_file(component_file);
        self.run_rules(&mut ctx, &ret.program);

        let error_count = ctx.error_count();
        let warning_count = ctx.warning_count();
        LintResult {
            filename: filename.to_string(),
            diagnostics: ctx.into_diagnostics(),
            error_count,
            warning_count,
        }
    }

    fn run_rules<'a>(&self, ctx: &mut LintContext<'a>, program: &'a Program<'a>) {
        for rule in self.registry.rules() {
            let meta = rule.meta();
            let Some(severity) = self.config.severity_for(meta) else {
                continue;
            };
            tracing::trace!(rule = meta.name, filename = ctx.filename, "running rule");
            ctx.current_rule = meta.name;
            ctx.current_severity = severity;
            rule.check(ctx, program);
        }
    }
}

impl Default for Linter {
    fn default() -> Self {
        Self::new()
    }
}
