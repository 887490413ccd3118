//! Diagnostic types for vize_hallmark.
//!
//! Uses `CompactString` for efficient small string storage.

use compact_str::CompactString;
use oxc_diagnostics::OxcDiagnostic;
use oxc_span::Span;
use serde::{Deserialize, Serialize};

/// Lint diagnostic severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    #[serde(alias = "warn")]
    Warning,
}

/// A single text replacement in the source code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextEdit {
    /// Start byte offset
    pub start: u32,
    /// End byte offset
    pub end: u32,
    /// Replacement text
    pub new_text: String,
}

impl TextEdit {
    /// Create a replacement edit
    #[inline]
    pub fn replace(start: u32, end: u32, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            new_text: text.into(),
        }
    }

    /// Shift the edit by `offset` bytes
    #[inline]
    pub(crate) fn shift(&mut self, offset: u32) {
        self.start += offset;
        self.end += offset;
    }
}

/// A fix for a diagnostic, containing one or more text edits.
///
/// The same type describes automatic fixes (`LintDiagnostic::fix`) and
/// suggestions (`LintDiagnostic::suggestions`); only the slot it lives in
/// decides whether a host may apply it without asking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fix {
    /// Description of the fix
    pub message: String,
    /// Text edits to apply
    pub edits: Vec<TextEdit>,
}

impl Fix {
    /// Create a new fix with a single edit
    #[inline]
    pub fn new(message: impl Into<String>, edit: TextEdit) -> Self {
        Self {
            message: message.into(),
            edits: vec![edit],
        }
    }

    /// Apply the fix to a source string
    pub fn apply(&self, source: &str) -> String {
        let mut result = source.to_string();
        // Apply edits in reverse order to preserve offsets
        let mut edits = self.edits.clone();
        edits.sort_by(|a, b| b.start.cmp(&a.start));

        for edit in edits {
            let start = edit.start as usize;
            let end = edit.end as usize;
            if start <= end && end <= result.len() {
                result.replace_range(start..end, &edit.new_text);
            }
        }
        result
    }
}

/// A lint diagnostic.
///
/// `start`/`end` cover the declaring node the diagnostic is about, in bytes
/// relative to the linted input.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LintDiagnostic {
    /// Rule that triggered this diagnostic
    pub rule_name: &'static str,
    /// Message kind within the rule (e.g. "missing", "skipped")
    pub message_id: &'static str,
    /// What the message is about, e.g. the emit name
    pub subject: Option<CompactString>,
    /// Severity level
    pub severity: Severity,
    /// Primary message
    pub message: CompactString,
    /// Start byte offset in source
    pub start: u32,
    /// End byte offset in source
    pub end: u32,
    /// Auto-fix, safe to apply without confirmation
    pub fix: Option<Fix>,
    /// Fixes that need a human to confirm them
    pub suggestions: Vec<Fix>,
}

impl LintDiagnostic {
    /// Create a new diagnostic with the given severity
    #[inline]
    pub fn new(
        rule_name: &'static str,
        message_id: &'static str,
        severity: Severity,
        message: impl Into<CompactString>,
        span: Span,
    ) -> Self {
        Self {
            rule_name,
            message_id,
            subject: None,
            severity,
            message: message.into(),
            start: span.start,
            end: span.end,
            fix: None,
            suggestions: Vec::new(),
        }
    }

    /// Set the subject of the message
    #[inline]
    pub fn with_subject(mut self, subject: impl Into<CompactString>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Attach a suggestion
    #[inline]
    pub fn with_suggestion(mut self, suggestion: Fix) -> Self {
        self.suggestions.push(suggestion);
        self
    }

    /// Check if this diagnostic has an automatic fix
    #[inline]
    pub fn has_fix(&self) -> bool {
        self.fix.is_some()
    }

    /// Check if this diagnostic offers suggestions
    #[inline]
    pub fn has_suggestions(&self) -> bool {
        !self.suggestions.is_empty()
    }

    /// Move the diagnostic and all of its edits by `offset` bytes
    pub(crate) fn shift(&mut self, offset: u32) {
        if offset == 0 {
            return;
        }
        self.start += offset;
        self.end += offset;
        for edit in self
            .fix
            .iter_mut()
            .chain(self.suggestions.iter_mut())
            .flat_map(|fix| fix.edits.iter_mut())
        {
            edit.shift(offset);
        }
    }

    /// Convert to OxcDiagnostic for rich rendering
    pub fn into_oxc_diagnostic(self) -> OxcDiagnostic {
        let mut diag = match self.severity {
            Severity::Error => OxcDiagnostic::error(self.message.to_string()),
            Severity::Warning => OxcDiagnostic::warn(self.message.to_string()),
        };

        diag = diag.with_label(Span::new(self.start, self.end));

        if let Some(suggestion) = self.suggestions.first() {
            diag = diag.with_help(suggestion.message.clone());
        }

        diag
    }
}

/// Summary of lint results
#[derive(Debug, Clone, Default, Serialize)]
pub struct LintSummary {
    pub error_count: usize,
    pub warning_count: usize,
    pub file_count: usize,
}

impl LintSummary {
    #[inline]
    pub fn add(&mut self, diagnostic: &LintDiagnostic) {
        match diagnostic.severity {
            Severity::Error => self.error_count += 1,
            Severity::Warning => self.warning_count += 1,
        }
    }

    #[inline]
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }
}
