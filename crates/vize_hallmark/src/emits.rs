//! Emit extraction.
//!
//! Normalizes both ways of declaring emits into one record type:
//!
//! ```ts
//! // options object
//! export default {
//!   emits: ['save', 'cancel'],                 // array form
//!   emits: { save: (id) => true, cancel: null } // object form
//! }
//!
//! // <script setup>
//! defineEmits(['save'])
//! defineEmits({ save: (id) => true })
//! defineEmits<{ save: [id: number] }>()        // type-only, not extracted
//! ```
//!
//! Extraction never reports anything. Shapes it cannot read degrade to a
//! record without a name and/or without a value.

use compact_str::CompactString;
use oxc_ast::ast::{
    ArrayExpressionElement, Expression, ObjectExpression, ObjectProperty, ObjectPropertyKind,
    PropertyKey, TemplateLiteral,
};
use oxc_span::{GetSpan, Span};

use crate::component::{unwrap_expression, EmitDeclarationSite};

/// Label used when an emit name cannot be determined statically
pub const UNKNOWN_EMIT: &str = "Unknown emit";

/// A single emit declaration.
#[derive(Debug, Clone)]
pub struct ComponentEmit<'a> {
    /// Statically known emit name
    pub name: Option<CompactString>,
    /// Declared value with parentheses and TS wrappers removed.
    /// `None` for the array form and for entries that carry no value.
    pub value: Option<&'a Expression<'a>>,
    /// The declaring node (array element or object property)
    pub span: Span,
    /// Identifier text when the declaring node is a bare identifier
    pub anchor_name: Option<&'a str>,
}

impl<'a> ComponentEmit<'a> {
    /// Name to show in messages
    #[inline]
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.anchor_name)
            .unwrap_or(UNKNOWN_EMIT)
    }
}

/// Extract the emits declared at a site, in declaration order.
///
/// Type-only `defineEmits<...>()` declares no runtime value and yields nothing.
pub fn extract_emits<'a>(site: &EmitDeclarationSite<'a>) -> Vec<ComponentEmit<'a>> {
    match *site {
        EmitDeclarationSite::Options(options) => emits_from_options(options),
        EmitDeclarationSite::Macro {
            type_only: true, ..
        } => Vec::new(),
        EmitDeclarationSite::Macro { call, .. } => call
            .arguments
            .first()
            .and_then(|arg| arg.as_expression())
            .map(emits_from_definition)
            .unwrap_or_default(),
    }
}

/// Extract emits from the `emits` property of a component options object
pub fn emits_from_options<'a>(options: &'a ObjectExpression<'a>) -> Vec<ComponentEmit<'a>> {
    let emits = options.properties.iter().find_map(|prop| match prop {
        ObjectPropertyKind::ObjectProperty(p)
            if static_property_name(p).as_deref() == Some("emits") =>
        {
            Some(&p.value)
        }
        _ => None,
    });

    emits.map(emits_from_definition).unwrap_or_default()
}

/// Extract emits from an `emits` value or a `defineEmits` argument
pub fn emits_from_definition<'a>(definition: &'a Expression<'a>) -> Vec<ComponentEmit<'a>> {
    match unwrap_expression(definition) {
        Expression::ArrayExpression(arr) => arr
            .elements
            .iter()
            .filter(|elem| !matches!(elem, ArrayExpressionElement::Elision(_)))
            .map(array_emit)
            .collect(),
        Expression::ObjectExpression(obj) => obj.properties.iter().map(object_emit).collect(),
        _ => Vec::new(),
    }
}

fn array_emit<'a>(elem: &'a ArrayExpressionElement<'a>) -> ComponentEmit<'a> {
    let (name, anchor_name) = match elem {
        ArrayExpressionElement::StringLiteral(s) => (Some(CompactString::new(s.value.as_str())), None),
        ArrayExpressionElement::TemplateLiteral(t) => (static_template_value(t), None),
        ArrayExpressionElement::Identifier(id) => (None, Some(id.name.as_str())),
        _ => (None, None),
    };

    ComponentEmit {
        name,
        value: None,
        span: elem.span(),
        anchor_name,
    }
}

fn object_emit<'a>(prop: &'a ObjectPropertyKind<'a>) -> ComponentEmit<'a> {
    match prop {
        ObjectPropertyKind::ObjectProperty(p) => ComponentEmit {
            name: static_property_name(p),
            value: Some(unwrap_expression(&p.value)),
            span: p.span,
            anchor_name: None,
        },
        ObjectPropertyKind::SpreadProperty(spread) => ComponentEmit {
            name: None,
            value: None,
            span: spread.span,
            anchor_name: None,
        },
    }
}

/// Statically known property name: `foo`, `'foo'`, `['foo']`, `` [`foo`] ``, `1`
fn static_property_name(prop: &ObjectProperty<'_>) -> Option<CompactString> {
    match &prop.key {
        PropertyKey::StaticIdentifier(id) => Some(CompactString::new(id.name.as_str())),
        PropertyKey::StringLiteral(s) => Some(CompactString::new(s.value.as_str())),
        PropertyKey::NumericLiteral(n) => Some(CompactString::new(n.value.to_string())),
        PropertyKey::TemplateLiteral(t) => static_template_value(t),
        _ => None,
    }
}

/// Cooked value of a template literal without substitutions
fn static_template_value(template: &TemplateLiteral<'_>) -> Option<CompactString> {
    if !template.expressions.is_empty() {
        return None;
    }
    let quasi = template.quasis.first()?;
    quasi
        .value
        .cooked
        .as_ref()
        .map(|cooked| CompactString::new(cooked.as_str()))
}
