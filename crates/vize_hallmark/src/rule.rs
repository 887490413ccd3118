//! Rule trait and registry for script lint rules.

use oxc_ast::ast::Program;

use crate::context::LintContext;
use crate::diagnostic::Severity;

/// Rule category for organization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleCategory {
    /// Essential rules (vue/essential) - prevent errors
    Essential,
    /// Strongly recommended rules (vue/strongly-recommended)
    StronglyRecommended,
    /// Recommended rules (vue/recommended)
    Recommended,
    /// Not part of any preset, opt-in only
    Uncategorized,
}

/// Rule metadata
pub struct RuleMeta {
    /// Rule name (e.g., "vue/require-emit-validator")
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Rule category
    pub category: RuleCategory,
    /// Whether rule is auto-fixable
    pub fixable: bool,
    /// Whether rule offers suggestions that need confirmation
    pub has_suggestions: bool,
    /// Default severity
    pub default_severity: Severity,
}

/// Rule trait for script-level lint rules
///
/// Rules receive the parsed program of one script block and report
/// diagnostics through the context.
pub trait ScriptRule: Send + Sync {
    /// Get rule metadata
    fn meta(&self) -> &'static RuleMeta;

    /// Check a parsed script block
    fn check<'a>(&self, ctx: &mut LintContext<'a>, program: &'a Program<'a>);
}

/// Registry holding all enabled lint rules
pub struct RuleRegistry {
    rules: Vec<Box<dyn ScriptRule>>,
}

impl RuleRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Register a rule
    pub fn register(&mut self, rule: Box<dyn ScriptRule>) {
        self.rules.push(rule);
    }

    /// Get all registered rules
    pub fn rules(&self) -> &[Box<dyn ScriptRule>] {
        &self.rules
    }

    /// Find a registered rule by name
    pub fn get(&self, name: &str) -> Option<&dyn ScriptRule> {
        self.rules
            .iter()
            .find(|rule| rule.meta().name == name)
            .map(|rule| rule.as_ref())
    }

    /// Create registry with all available rules (including opt-in)
    pub fn with_all() -> Self {
        let mut registry = Self::new();

        // Uncategorized rules (opt-in in eslint-plugin-vue)
        registry.register(Box::new(crate::rules::RequireEmitValidator));

        registry
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::with_all()
    }
}
