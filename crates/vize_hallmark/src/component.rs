//! Component locator.
//!
//! Walks a parsed script and finds every place where a Vue component can
//! declare its emits:
//!
//! - options objects: `export default { ... }` in component files,
//!   `defineComponent({ ... })`, `defineNuxtComponent({ ... })`,
//!   `createApp({ ... })`, `Vue.extend({ ... })`, `<any>.mixin({ ... })`,
//!   `<any>.component('name', { ... })`, `new Vue({ ... })`
//! - `defineEmits(...)` compiler macro calls in `<script setup>`
//!
//! The walk descends into every statement, function, class and expression
//! body. Sites are returned in source order.

use oxc_ast::ast::{
    Argument, ArrayExpressionElement, CallExpression, ChainElement, Class, ClassElement,
    Declaration, ExportDefaultDeclarationKind, Expression, ForStatementInit, Function,
    NewExpression, ObjectExpression, ObjectPropertyKind, Program, Statement, VariableDeclaration,
};
use oxc_span::Span;

use crate::context::ScriptKind;

pub const DEFINE_EMITS: &str = "defineEmits";

/// A place in the source where a component declares its emits.
#[derive(Debug, Clone, Copy)]
pub enum EmitDeclarationSite<'a> {
    /// A component options object, whose `emits` property is read
    Options(&'a ObjectExpression<'a>),
    /// A `defineEmits(...)` call in `<script setup>`
    Macro {
        call: &'a CallExpression<'a>,
        /// `defineEmits<...>()` with no runtime argument
        type_only: bool,
    },
}

impl<'a> EmitDeclarationSite<'a> {
    /// Span of the options object or macro call
    #[inline]
    pub fn span(&self) -> Span {
        match self {
            Self::Options(object) => object.span,
            Self::Macro { call, .. } => call.span,
        }
    }

    #[inline]
    pub fn is_type_only(&self) -> bool {
        matches!(self, Self::Macro { type_only: true, .. })
    }
}

/// Collect every emit declaration site in a program
pub fn collect_sites<'a>(
    program: &'a Program<'a>,
    script_kind: ScriptKind,
    component_file: bool,
) -> Vec<EmitDeclarationSite<'a>> {
    let mut locator = SiteLocator {
        sites: Vec::new(),
        script_setup: script_kind.is_setup(),
        component_file,
    };

    locator.walk_statements(&program.body);

    tracing::trace!(count = locator.sites.len(), "collected emit declaration sites");
    locator.sites
}

/// Strip parentheses and TypeScript-only wrappers (`as`, `satisfies`, `!`, `<T>x`)
pub fn unwrap_expression<'a>(expr: &'a Expression<'a>) -> &'a Expression<'a> {
    match expr {
        Expression::ParenthesizedExpression(paren) => unwrap_expression(&paren.expression),
        Expression::TSAsExpression(ts_as) => unwrap_expression(&ts_as.expression),
        Expression::TSSatisfiesExpression(ts_satisfies) => {
            unwrap_expression(&ts_satisfies.expression)
        }
        Expression::TSNonNullExpression(ts_non_null) => unwrap_expression(&ts_non_null.expression),
        Expression::TSTypeAssertion(assertion) => unwrap_expression(&assertion.expression),
        _ => expr,
    }
}

/// Object literal passed as an argument, if any
#[inline]
fn object_argument<'a>(arg: Option<&'a Argument<'a>>) -> Option<&'a ObjectExpression<'a>> {
    match unwrap_expression(arg?.as_expression()?) {
        Expression::ObjectExpression(object) => Some(object),
        _ => None,
    }
}

/// Name of a plain identifier callee
#[inline]
fn callee_name<'a>(callee: &'a Expression<'a>) -> Option<&'a str> {
    match callee {
        Expression::Identifier(id) => Some(id.name.as_str()),
        _ => None,
    }
}

struct SiteLocator<'a> {
    sites: Vec<EmitDeclarationSite<'a>>,
    script_setup: bool,
    component_file: bool,
}

impl<'a> SiteLocator<'a> {
    fn walk_statements(&mut self, stmts: &'a oxc_allocator::Vec<'a, Statement<'a>>) {
        for stmt in stmts.iter() {
            self.walk_statement(stmt);
        }
    }

    fn walk_statement(&mut self, stmt: &'a Statement<'a>) {
        match stmt {
            Statement::ExpressionStatement(expr_stmt) => {
                self.walk_expression(&expr_stmt.expression);
            }
            Statement::VariableDeclaration(var_decl) => self.walk_variable_declaration(var_decl),
            Statement::FunctionDeclaration(func) => self.walk_function(func),
            Statement::ClassDeclaration(class) => self.walk_class(class),
            Statement::ExportDefaultDeclaration(export) => match &export.declaration {
                ExportDefaultDeclarationKind::FunctionDeclaration(func) => self.walk_function(func),
                ExportDefaultDeclarationKind::ClassDeclaration(class) => self.walk_class(class),
                declaration => {
                    if let Some(expr) = declaration.as_expression() {
                        if self.component_file {
                            if let Expression::ObjectExpression(object) = unwrap_expression(expr) {
                                self.sites.push(EmitDeclarationSite::Options(object));
                            }
                        }
                        self.walk_expression(expr);
                    }
                }
            },
            Statement::ExportNamedDeclaration(export) => match &export.declaration {
                Some(Declaration::VariableDeclaration(var_decl)) => {
                    self.walk_variable_declaration(var_decl);
                }
                Some(Declaration::FunctionDeclaration(func)) => self.walk_function(func),
                Some(Declaration::ClassDeclaration(class)) => self.walk_class(class),
                _ => {}
            },
            Statement::ReturnStatement(ret) => {
                if let Some(argument) = &ret.argument {
                    self.walk_expression(argument);
                }
            }
            Statement::BlockStatement(block) => self.walk_statements(&block.body),
            Statement::IfStatement(if_stmt) => {
                self.walk_expression(&if_stmt.test);
                self.walk_statement(&if_stmt.consequent);
                if let Some(alternate) = &if_stmt.alternate {
                    self.walk_statement(alternate);
                }
            }
            Statement::ForStatement(for_stmt) => {
                match &for_stmt.init {
                    Some(ForStatementInit::VariableDeclaration(var_decl)) => {
                        self.walk_variable_declaration(var_decl);
                    }
                    Some(init) => {
                        if let Some(expr) = init.as_expression() {
                            self.walk_expression(expr);
                        }
                    }
                    None => {}
                }
                if let Some(test) = &for_stmt.test {
                    self.walk_expression(test);
                }
                if let Some(update) = &for_stmt.update {
                    self.walk_expression(update);
                }
                self.walk_statement(&for_stmt.body);
            }
            Statement::ForInStatement(for_in) => {
                self.walk_expression(&for_in.right);
                self.walk_statement(&for_in.body);
            }
            Statement::ForOfStatement(for_of) => {
                self.walk_expression(&for_of.right);
                self.walk_statement(&for_of.body);
            }
            Statement::WhileStatement(while_stmt) => {
                self.walk_expression(&while_stmt.test);
                self.walk_statement(&while_stmt.body);
            }
            Statement::DoWhileStatement(do_while) => {
                self.walk_statement(&do_while.body);
                self.walk_expression(&do_while.test);
            }
            Statement::SwitchStatement(switch_stmt) => {
                self.walk_expression(&switch_stmt.discriminant);
                for case in switch_stmt.cases.iter() {
                    if let Some(test) = &case.test {
                        self.walk_expression(test);
                    }
                    self.walk_statements(&case.consequent);
                }
            }
            Statement::TryStatement(try_stmt) => {
                self.walk_statements(&try_stmt.block.body);
                if let Some(handler) = &try_stmt.handler {
                    self.walk_statements(&handler.body.body);
                }
                if let Some(finalizer) = &try_stmt.finalizer {
                    self.walk_statements(&finalizer.body);
                }
            }
            Statement::LabeledStatement(labeled) => self.walk_statement(&labeled.body),
            Statement::ThrowStatement(throw) => self.walk_expression(&throw.argument),
            _ => {}
        }
    }

    fn walk_variable_declaration(&mut self, var_decl: &'a VariableDeclaration<'a>) {
        for decl in var_decl.declarations.iter() {
            if let Some(init) = &decl.init {
                self.walk_expression(init);
            }
        }
    }

    fn walk_function(&mut self, func: &'a Function<'a>) {
        if let Some(body) = &func.body {
            self.walk_statements(&body.statements);
        }
    }

    fn walk_class(&mut self, class: &'a Class<'a>) {
        if let Some(super_class) = &class.super_class {
            self.walk_expression(super_class);
        }
        for element in class.body.body.iter() {
            match element {
                ClassElement::MethodDefinition(method) => self.walk_function(&method.value),
                ClassElement::PropertyDefinition(prop) => {
                    if let Some(value) = &prop.value {
                        self.walk_expression(value);
                    }
                }
                ClassElement::StaticBlock(block) => self.walk_statements(&block.body),
                _ => {}
            }
        }
    }

    fn walk_call(&mut self, call: &'a CallExpression<'a>) {
        self.visit_call(call);
        self.walk_expression(&call.callee);
        self.walk_arguments(&call.arguments);
    }

    fn walk_expression(&mut self, expr: &'a Expression<'a>) {
        match expr {
            Expression::CallExpression(call) => self.walk_call(call),
            Expression::NewExpression(new_expr) => {
                self.visit_new(new_expr);
                self.walk_expression(&new_expr.callee);
                self.walk_arguments(&new_expr.arguments);
            }
            Expression::ArrowFunctionExpression(arrow) => {
                self.walk_statements(&arrow.body.statements);
            }
            Expression::FunctionExpression(func) => self.walk_function(func),
            Expression::ClassExpression(class) => self.walk_class(class),
            Expression::StaticMemberExpression(member) => {
                self.walk_expression(&member.object);
            }
            Expression::ComputedMemberExpression(member) => {
                self.walk_expression(&member.object);
                self.walk_expression(&member.expression);
            }
            Expression::ChainExpression(chain) => match &chain.expression {
                ChainElement::CallExpression(call) => self.walk_call(call),
                ChainElement::TSNonNullExpression(expr) => self.walk_expression(&expr.expression),
                ChainElement::StaticMemberExpression(member) => {
                    self.walk_expression(&member.object);
                }
                ChainElement::ComputedMemberExpression(member) => {
                    self.walk_expression(&member.object);
                    self.walk_expression(&member.expression);
                }
                ChainElement::PrivateFieldExpression(field) => {
                    self.walk_expression(&field.object);
                }
            },
            Expression::ObjectExpression(object) => {
                for prop in object.properties.iter() {
                    match prop {
                        ObjectPropertyKind::ObjectProperty(p) => self.walk_expression(&p.value),
                        ObjectPropertyKind::SpreadProperty(spread) => {
                            self.walk_expression(&spread.argument);
                        }
                    }
                }
            }
            Expression::ArrayExpression(arr) => {
                for elem in arr.elements.iter() {
                    match elem {
                        ArrayExpressionElement::SpreadElement(spread) => {
                            self.walk_expression(&spread.argument);
                        }
                        ArrayExpressionElement::Elision(_) => {}
                        _ => {
                            if let Some(expr) = elem.as_expression() {
                                self.walk_expression(expr);
                            }
                        }
                    }
                }
            }
            Expression::TemplateLiteral(template) => {
                for expr in template.expressions.iter() {
                    self.walk_expression(expr);
                }
            }
            Expression::ConditionalExpression(cond) => {
                self.walk_expression(&cond.test);
                self.walk_expression(&cond.consequent);
                self.walk_expression(&cond.alternate);
            }
            Expression::LogicalExpression(logical) => {
                self.walk_expression(&logical.left);
                self.walk_expression(&logical.right);
            }
            Expression::BinaryExpression(binary) => {
                self.walk_expression(&binary.left);
                self.walk_expression(&binary.right);
            }
            Expression::UnaryExpression(unary) => {
                self.walk_expression(&unary.argument);
            }
            Expression::SequenceExpression(seq) => {
                for expr in seq.expressions.iter() {
                    self.walk_expression(expr);
                }
            }
            Expression::AssignmentExpression(assign) => {
                self.walk_expression(&assign.right);
            }
            Expression::AwaitExpression(await_expr) => {
                self.walk_expression(&await_expr.argument);
            }
            Expression::YieldExpression(yield_expr) => {
                if let Some(argument) = &yield_expr.argument {
                    self.walk_expression(argument);
                }
            }
            Expression::ParenthesizedExpression(paren) => {
                self.walk_expression(&paren.expression);
            }
            Expression::TSAsExpression(ts_as) => {
                self.walk_expression(&ts_as.expression);
            }
            Expression::TSSatisfiesExpression(ts_satisfies) => {
                self.walk_expression(&ts_satisfies.expression);
            }
            Expression::TSNonNullExpression(ts_non_null) => {
                self.walk_expression(&ts_non_null.expression);
            }
            Expression::TSTypeAssertion(assertion) => {
                self.walk_expression(&assertion.expression);
            }
            _ => {}
        }
    }

    fn walk_arguments(&mut self, arguments: &'a oxc_allocator::Vec<'a, Argument<'a>>) {
        for arg in arguments.iter() {
            match arg {
                Argument::SpreadElement(spread) => self.walk_expression(&spread.argument),
                _ => {
                    if let Some(expr) = arg.as_expression() {
                        self.walk_expression(expr);
                    }
                }
            }
        }
    }

    fn visit_call(&mut self, call: &'a CallExpression<'a>) {
        let options = match &call.callee {
            Expression::Identifier(id) => match id.name.as_str() {
                DEFINE_EMITS if self.script_setup => {
                    self.sites.push(EmitDeclarationSite::Macro {
                        call,
                        type_only: call.arguments.is_empty() && call.type_arguments.is_some(),
                    });
                    None
                }
                "defineComponent" | "defineNuxtComponent" | "createApp" => {
                    object_argument(call.arguments.first())
                }
                _ => None,
            },
            // <any>.component('name', {}), <any>.mixin({}), Vue.extend({})
            Expression::StaticMemberExpression(member) => {
                let receiver = callee_name(unwrap_expression(&member.object));
                match (receiver, member.property.name.as_str()) {
                    (Some(_), "component" | "mixin") | (Some("Vue"), "extend") => {
                        object_argument(call.arguments.last())
                    }
                    _ => None,
                }
            }
            _ => None,
        };

        if let Some(object) = options {
            self.sites.push(EmitDeclarationSite::Options(object));
        }
    }

    fn visit_new(&mut self, new_expr: &'a NewExpression<'a>) {
        if callee_name(&new_expr.callee) == Some("Vue") {
            if let Some(object) = object_argument(new_expr.arguments.first()) {
                self.sites.push(EmitDeclarationSite::Options(object));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxc_allocator::Allocator;
    use oxc_parser::Parser;
    use oxc_span::SourceType;

    fn site_spans(source: &str, kind: ScriptKind, component_file: bool) -> Vec<(String, bool)> {
        let allocator = Allocator::default();
        let ret = Parser::new(&allocator, source, SourceType::ts()).parse();
        collect_sites(&ret.program, kind, component_file)
            .iter()
            .map(|site| {
                let span = site.span();
                (
                    source[span.start as usize..span.end as usize].to_string(),
                    site.is_type_only(),
                )
            })
            .collect()
    }

    #[test]
    fn test_export_default_in_component_file() {
        let sites = site_spans("export default { emits: ['a'] }", ScriptKind::Plain, true);
        assert_eq!(sites, vec![("{ emits: ['a'] }".to_string(), false)]);
    }

    #[test]
    fn test_export_default_in_plain_module_is_ignored() {
        let sites = site_spans("export default { emits: ['a'] }", ScriptKind::Plain, false);
        assert!(sites.is_empty());
    }

    #[test]
    fn test_define_component_found_once() {
        let sites = site_spans(
            "export default defineComponent({ emits: ['a'] })",
            ScriptKind::Plain,
            true,
        );
        assert_eq!(sites.len(), 1);
        assert_eq!(sites[0].0, "{ emits: ['a'] }");
    }

    #[test]
    fn test_vue_component_and_app_forms() {
        let source = r#"
Vue.component('my-button', { emits: ['click'] })
const app = createApp({ emits: ['root'] })
app.component('other', { emits: ['other'] })
app.mixin({ emits: ['mixed'] })
new Vue({ emits: ['legacy'] })
"#;
        let sites = site_spans(source, ScriptKind::Plain, false);
        let texts: Vec<&str> = sites.iter().map(|(text, _)| text.as_str()).collect();
        assert_eq!(
            texts,
            vec![
                "{ emits: ['click'] }",
                "{ emits: ['root'] }",
                "{ emits: ['other'] }",
                "{ emits: ['mixed'] }",
                "{ emits: ['legacy'] }",
            ]
        );
    }

    #[test]
    fn test_any_identifier_receiver_registers_component() {
        let source = r#"
import app from './app'
app.component('x', { emits: ['a'] })
registry.mixin({ emits: ['b'] })
Vue.extend('Base', { emits: ['c'] })
"#;
        let texts: Vec<String> = site_spans(source, ScriptKind::Plain, false)
            .into_iter()
            .map(|(text, _)| text)
            .collect();
        assert_eq!(
            texts,
            vec!["{ emits: ['a'] }", "{ emits: ['b'] }", "{ emits: ['c'] }"]
        );
    }

    #[test]
    fn test_non_identifier_receiver_and_non_object_options_are_ignored() {
        let source = r#"
this.app.component('x', { emits: ['a'] })
app.component('y', options)
Other.extend({ emits: ['b'] })
"#;
        assert!(site_spans(source, ScriptKind::Plain, false).is_empty());
    }

    #[test]
    fn test_sites_inside_nested_statements() {
        let source = r#"
export function useDialog() {
  return defineComponent({ emits: ['fn'] })
}
export class Registry {
  panel = defineComponent({ emits: ['field'] })
  static { Vue.component('static-item', { emits: ['block'] }) }
}
try {
  Vue.component('tried', { emits: ['try'] })
} catch (err) {
  Vue.component('caught', { emits: ['catch'] })
} finally {
  Vue.mixin({ emits: ['finally'] })
}
for (const name of names) {
  Vue.component(name, { emits: ['loop'] })
}
switch (mode) {
  case 'a':
    app.component('case', { emits: ['case'] })
}
while (pending) { app.mixin({ emits: ['while'] }) }
const lazy = ready && window.app?.use(defineComponent({ emits: ['chain'] }))
const options = registry[defineComponent({ emits: ['computed'] }).name]
"#;
        let texts: Vec<String> = site_spans(source, ScriptKind::Plain, false)
            .into_iter()
            .map(|(text, _)| text)
            .collect();
        assert_eq!(
            texts,
            vec![
                "{ emits: ['fn'] }",
                "{ emits: ['field'] }",
                "{ emits: ['block'] }",
                "{ emits: ['try'] }",
                "{ emits: ['catch'] }",
                "{ emits: ['finally'] }",
                "{ emits: ['loop'] }",
                "{ emits: ['case'] }",
                "{ emits: ['while'] }",
                "{ emits: ['chain'] }",
                "{ emits: ['computed'] }",
            ]
        );
    }

    #[test]
    fn test_export_default_function_body() {
        let source = "export default function setup() {\n  return defineComponent({ emits: ['a'] })\n}";
        let sites = site_spans(source, ScriptKind::Plain, true);
        assert_eq!(sites.len(), 1);
        assert_eq!(sites[0].0, "{ emits: ['a'] }");
    }

    #[test]
    fn test_define_emits_only_in_script_setup() {
        let source = "const emit = defineEmits(['change'])";
        assert_eq!(site_spans(source, ScriptKind::Setup, false).len(), 1);
        assert!(site_spans(source, ScriptKind::Plain, false).is_empty());
    }

    #[test]
    fn test_type_only_define_emits() {
        let source = "const emit = defineEmits<{ (e: 'change', id: number): void }>()";
        let sites = site_spans(source, ScriptKind::Setup, false);
        assert_eq!(sites.len(), 1);
        assert!(sites[0].1);
    }

    #[test]
    fn test_unwrap_expression() {
        let allocator = Allocator::default();
        let source = "const x = ((null as any)!)";
        let ret = Parser::new(&allocator, source, SourceType::ts()).parse();
        let Statement::VariableDeclaration(decl) = &ret.program.body[0] else {
            panic!("expected variable declaration");
        };
        let init = decl.declarations[0].init.as_ref().unwrap();
        assert!(matches!(unwrap_expression(init), Expression::NullLiteral(_)));
    }
}
