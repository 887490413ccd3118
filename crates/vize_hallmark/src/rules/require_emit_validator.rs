//! vue/require-emit-validator
//!
//! Require type definitions in emits.
//!
//! Every emit should carry a validator function so that payloads are checked
//! at runtime. Declaring the emit with `null` skips validation; the rule
//! suggests a parameterless validator instead.
//!
//! ## Examples
//!
//! ### Invalid
//! ```ts
//! export default {
//!   emits: ['save'],
//! }
//!
//! export default {
//!   emits: { save: null },
//! }
//! ```
//!
//! ### Valid
//! ```ts
//! export default {
//!   emits: { save: (id) => typeof id === 'number' },
//! }
//!
//! const emit = defineEmits<{ save: [id: number] }>()
//! ```

use memchr::memmem;
use oxc_ast::ast::{Expression, Program};
use oxc_span::Span;

use crate::component::collect_sites;
use crate::context::LintContext;
use crate::diagnostic::{Fix, Severity, TextEdit};
use crate::emits::{extract_emits, ComponentEmit};
use crate::rule::{RuleCategory, RuleMeta, ScriptRule};

static META: RuleMeta = RuleMeta {
    name: "vue/require-emit-validator",
    description: "Require type definitions in emits",
    category: RuleCategory::Uncategorized,
    fixable: false,
    has_suggestions: true,
    default_severity: Severity::Warning,
};

const REPLACEMENT_VALIDATOR: &str = "() => true";
const SUGGESTION_MESSAGE: &str = "Replace with a validator function with no parameters.";

/// Outcome of checking one emit declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitValidation {
    /// Value is a function or a reference assumed to be one
    HasValidator,
    /// No validator at all
    Missing,
    /// Declared with `null`; carries the span of the literal
    Skipped { null_span: Span },
}

/// Classify an emit declaration.
///
/// Identifiers other than `undefined` are trusted as validator references;
/// they are not resolved.
pub fn classify(emit: &ComponentEmit<'_>) -> EmitValidation {
    match emit.value {
        Some(Expression::Identifier(id)) if id.name.as_str() == "undefined" => {
            EmitValidation::Missing
        }
        Some(
            Expression::ArrowFunctionExpression(_)
            | Expression::FunctionExpression(_)
            | Expression::Identifier(_),
        ) => EmitValidation::HasValidator,
        Some(Expression::NullLiteral(null)) => EmitValidation::Skipped {
            null_span: null.span,
        },
        _ => EmitValidation::Missing,
    }
}

/// Require type definitions in emits
pub struct RequireEmitValidator;

impl ScriptRule for RequireEmitValidator {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check<'a>(&self, ctx: &mut LintContext<'a>, program: &'a Program<'a>) {
        let bytes = ctx.source.as_bytes();
        if memmem::find(bytes, b"emits").is_none() && memmem::find(bytes, b"defineEmits").is_none()
        {
            return;
        }

        for site in collect_sites(program, ctx.script_kind, ctx.component_file) {
            for emit in extract_emits(&site) {
                report_emit(ctx, &emit);
            }
        }
    }
}

fn report_emit(ctx: &mut LintContext<'_>, emit: &ComponentEmit<'_>) {
    let name = emit.display_name();

    let diagnostic = match classify(emit) {
        EmitValidation::HasValidator => return,
        EmitValidation::Missing => ctx.diagnostic(
            "missing",
            format!("Emit \"{name}\" should define at least its validator function."),
            emit.span,
        ),
        EmitValidation::Skipped { null_span } => ctx
            .diagnostic(
                "skipped",
                format!(
                    "Emit \"{name}\" should not skip validation, or you may define a validator function with no parameters."
                ),
                emit.span,
            )
            .with_suggestion(Fix::new(
                SUGGESTION_MESSAGE,
                TextEdit::replace(null_span.start, null_span.end, REPLACEMENT_VALIDATOR),
            )),
    };

    tracing::trace!(
        rule = META.name,
        emit = name,
        message_id = diagnostic.message_id,
        "reporting emit"
    );
    ctx.report(diagnostic.with_subject(name));
}
