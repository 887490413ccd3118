//! Lint context for rule execution.

use compact_str::CompactString;
use oxc_span::Span;

use crate::diagnostic::{LintDiagnostic, Severity};

/// How a script block is compiled by Vue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScriptKind {
    /// A plain `<script>` block or a standalone `.js` / `.ts` module
    #[default]
    Plain,
    /// A `<script setup>` block, where compiler macros are available
    Setup,
}

impl ScriptKind {
    #[inline]
    pub fn is_setup(self) -> bool {
        matches!(self, Self::Setup)
    }
}

/// Lint context provides utilities for rules during execution.
///
/// One context is created per script block; rules report into it and the
/// linter collects the diagnostics afterwards.
pub struct LintContext<'a> {
    /// Source code being linted
    pub source: &'a str,
    /// Filename for diagnostics
    pub filename: &'a str,
    /// Kind of script block being linted
    pub script_kind: ScriptKind,
    /// Whether an `export default` object in this script is a component
    pub component_file: bool,
    /// Current rule name (set by the linter before calling rule methods)
    pub current_rule: &'static str,
    /// Severity configured for the current rule
    pub current_severity: Severity,
    /// Collected diagnostics
    diagnostics: Vec<LintDiagnostic>,
    /// Cached error count for fast access
    error_count: usize,
    /// Cached warning count for fast access
    warning_count: usize,
}

impl<'a> LintContext<'a> {
    /// Initial capacity for diagnostics vector
    const INITIAL_DIAGNOSTICS_CAPACITY: usize = 16;

    /// Create a new lint context
    #[inline]
    pub fn new(source: &'a str, filename: &'a str, script_kind: ScriptKind) -> Self {
        Self {
            source,
            filename,
            script_kind,
            component_file: is_component_filename(filename),
            current_rule: "",
            current_severity: Severity::Warning,
            diagnostics: Vec::with_capacity(Self::INITIAL_DIAGNOSTICS_CAPACITY),
            error_count: 0,
            warning_count: 0,
        }
    }

    /// Mark this script as component-bearing regardless of its filename
    #[inline]
    pub fn with_component_file(mut self, component_file: bool) -> Self {
        self.component_file = component_file;
        self
    }

    /// Start a diagnostic for the current rule at the given span
    #[inline]
    pub fn diagnostic(
        &self,
        message_id: &'static str,
        message: impl Into<CompactString>,
        span: Span,
    ) -> LintDiagnostic {
        LintDiagnostic::new(
            self.current_rule,
            message_id,
            self.current_severity,
            message,
            span,
        )
    }

    /// Report a lint diagnostic
    #[inline]
    pub fn report(&mut self, diagnostic: LintDiagnostic) {
        match diagnostic.severity {
            Severity::Error => self.error_count += 1,
            Severity::Warning => self.warning_count += 1,
        }
        self.diagnostics.push(diagnostic);
    }

    /// Get collected diagnostics
    #[inline]
    pub fn into_diagnostics(self) -> Vec<LintDiagnostic> {
        self.diagnostics
    }

    /// Get reference to collected diagnostics
    #[inline]
    pub fn diagnostics(&self) -> &[LintDiagnostic] {
        &self.diagnostics
    }

    /// Get the error count (cached, O(1))
    #[inline]
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    /// Get the warning count (cached, O(1))
    #[inline]
    pub fn warning_count(&self) -> usize {
        self.warning_count
    }
}

/// Files whose default export is treated as a component definition
#[inline]
pub(crate) fn is_component_filename(filename: &str) -> bool {
    [".vue", ".jsx", ".tsx"]
        .iter()
        .any(|ext| filename.ends_with(ext))
}
