//! End-to-end tests for `vue/require-emit-validator`.
//!
//! Diagnostics are rendered as `severity[message_id] `anchor text`: message`
//! with suggestions listed underneath, so snapshots stay independent of
//! byte offsets.

use vize_hallmark::{
    LintConfig, LintResult, Linter, RuleSetting, ScriptKind, Severity, UNKNOWN_EMIT,
};

const RULE: &str = "vue/require-emit-validator";

fn render(source: &str, result: &LintResult) -> String {
    let mut out = String::new();
    for diag in &result.diagnostics {
        let severity = match diag.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        out.push_str(&format!(
            "{severity}[{}] `{}`: {}\n",
            diag.message_id,
            &source[diag.start as usize..diag.end as usize],
            diag.message
        ));
        for suggestion in &diag.suggestions {
            for edit in &suggestion.edits {
                out.push_str(&format!(
                    "  suggestion: {} `{}` -> `{}`\n",
                    suggestion.message,
                    &source[edit.start as usize..edit.end as usize],
                    edit.new_text
                ));
            }
        }
    }
    out.trim_end().to_string()
}

fn lint_sfc(source: &str) -> LintResult {
    Linter::new().lint_sfc(source, "Component.vue").unwrap()
}

// =============================================================================
// Options objects
// =============================================================================

#[test]
fn array_emits_are_missing_validators() {
    let source = r#"<script>
export default {
  emits: ['save', 'cancel'],
}
</script>
"#;
    let result = lint_sfc(source);
    insta::assert_snapshot!(render(source, &result), @r#"
    warning[missing] `'save'`: Emit "save" should define at least its validator function.
    warning[missing] `'cancel'`: Emit "cancel" should define at least its validator function.
    "#);
}

#[test]
fn function_validator_is_accepted() {
    let source = r#"<script>
export default {
  emits: { save: (id) => typeof id === 'number' },
}
</script>
"#;
    assert!(!lint_sfc(source).has_diagnostics());
}

#[test]
fn null_validator_is_skipped_with_suggestion() {
    let source = r#"<script>
export default {
  emits: { save: null },
}
</script>
"#;
    let result = lint_sfc(source);
    insta::assert_snapshot!(render(source, &result), @r#"
    warning[skipped] `save: null`: Emit "save" should not skip validation, or you may define a validator function with no parameters.
      suggestion: Replace with a validator function with no parameters. `null` -> `() => true`
    "#);
}

#[test]
fn applying_suggestion_yields_clean_lint() {
    let source = r#"<script>
export default {
  emits: { save: null, close: null },
}
</script>
"#;
    let linter = Linter::new();
    let mut fixed = source.to_string();
    loop {
        let result = linter.lint_sfc(&fixed, "Component.vue").unwrap();
        let Some(diag) = result.diagnostics.first() else {
            break;
        };
        fixed = diag.suggestions[0].apply(&fixed);
    }
    assert!(fixed.contains("emits: { save: () => true, close: () => true }"));
}

#[test]
fn computed_key_uses_placeholder_name() {
    let source = r#"<script>
export default {
  emits: { [computedKey]: undefined },
}
</script>
"#;
    let result = lint_sfc(source);
    assert_eq!(result.diagnostics[0].subject.as_deref(), Some(UNKNOWN_EMIT));
    insta::assert_snapshot!(render(source, &result), @r#"
    warning[missing] `[computedKey]: undefined`: Emit "Unknown emit" should define at least its validator function.
    "#);
}

#[test]
fn define_component_and_global_registration() {
    let source = r#"
import Vue from 'vue'
import { createApp, defineComponent } from 'vue'

export const Panel = defineComponent({
  emits: { toggle: (open) => typeof open === 'boolean', resize: 'number' },
})

Vue.component('legacy-item', {
  emits: ['pick'],
})

const app = createApp({ emits: { ready: null } })
app.component('dialog-box', {
  emits: { close: isCloseReason },
})
"#;
    let result = Linter::new().lint_script(source, "components.ts", ScriptKind::Plain);
    insta::assert_snapshot!(render(source, &result), @r#"
    warning[missing] `resize: 'number'`: Emit "resize" should define at least its validator function.
    warning[missing] `'pick'`: Emit "pick" should define at least its validator function.
    warning[skipped] `ready: null`: Emit "ready" should not skip validation, or you may define a validator function with no parameters.
      suggestion: Replace with a validator function with no parameters. `null` -> `() => true`
    "#);
}

#[test]
fn registrations_inside_functions_loops_and_classes() {
    let source = r#"
import app from './app'

export function registerAll(names: string[]) {
  for (const name of names) {
    app.component(name, { emits: ['select'] })
  }
}

export class Plugin {
  install() {
    try {
      plugin.mixin({ emits: { log: undefined } })
    } catch {}
  }
}

const lazy = window.loader?.register(defineComponent({ emits: { load: null } }))
"#;
    let result = Linter::new().lint_script(source, "plugins.ts", ScriptKind::Plain);
    insta::assert_snapshot!(render(source, &result), @r#"
    warning[missing] `'select'`: Emit "select" should define at least its validator function.
    warning[missing] `log: undefined`: Emit "log" should define at least its validator function.
    warning[skipped] `load: null`: Emit "load" should not skip validation, or you may define a validator function with no parameters.
      suggestion: Replace with a validator function with no parameters. `null` -> `() => true`
    "#);
}

#[test]
fn ts_wrappers_and_method_shorthand() {
    let source = r#"<script lang="ts">
import { defineComponent } from 'vue'

export default defineComponent({
  emits: {
    save(id: number) {
      return id > 0
    },
    cancel: (null as unknown as () => boolean),
  } as const,
})
</script>
"#;
    let result = lint_sfc(source);
    insta::assert_snapshot!(render(source, &result), @r#"
    warning[skipped] `cancel: (null as unknown as () => boolean)`: Emit "cancel" should not skip validation, or you may define a validator function with no parameters.
      suggestion: Replace with a validator function with no parameters. `null` -> `() => true`
    "#);
}

// =============================================================================
// <script setup>
// =============================================================================

#[test]
fn define_emits_runtime_object() {
    let source = r#"<script setup>
const emit = defineEmits({ save: (id) => true, cancel: null })
</script>
"#;
    let result = lint_sfc(source);
    insta::assert_snapshot!(render(source, &result), @r#"
    warning[skipped] `cancel: null`: Emit "cancel" should not skip validation, or you may define a validator function with no parameters.
      suggestion: Replace with a validator function with no parameters. `null` -> `() => true`
    "#);
}

#[test]
fn define_emits_type_only_is_ignored() {
    let source = r#"<script setup lang="ts">
const emit = defineEmits<{ save: (id: number) => void }>()
</script>
"#;
    assert!(!lint_sfc(source).has_diagnostics());
}

#[test]
fn define_emits_outside_script_setup_is_ignored() {
    let source = "const emit = defineEmits(['save'])";
    let result = Linter::new().lint_script(source, "composable.ts", ScriptKind::Plain);
    assert!(!result.has_diagnostics());

    let result = Linter::new().lint_script(source, "composable.ts", ScriptKind::Setup);
    assert_eq!(result.warning_count, 1);
}

#[test]
fn both_script_blocks_map_to_file_offsets() {
    let source = r#"<template>
  <button @click="emit('open')">Open</button>
</template>

<script lang="ts">
export default { inheritAttrs: false, emits: ['close'] }
</script>

<script setup lang="ts">
const emit = defineEmits(['open'])
</script>
"#;
    let result = lint_sfc(source);
    insta::assert_snapshot!(render(source, &result), @r#"
    warning[missing] `'close'`: Emit "close" should define at least its validator function.
    warning[missing] `'open'`: Emit "open" should define at least its validator function.
    "#);
}

// =============================================================================
// Ordering, configuration, serialization
// =============================================================================

#[test]
fn permuting_declarations_permutes_diagnostics() {
    let subjects = |source: &str| -> Vec<String> {
        lint_sfc(source)
            .diagnostics
            .iter()
            .filter_map(|d| d.subject.as_ref().map(|s| s.to_string()))
            .collect()
    };

    let forward = subjects("<script>\nexport default { emits: { a: null, b: 1, c: () => true } }\n</script>");
    let reversed = subjects("<script>\nexport default { emits: { c: () => true, b: 1, a: null } }\n</script>");
    assert_eq!(forward, vec!["a", "b"]);
    assert_eq!(reversed, vec!["b", "a"]);
}

#[test]
fn config_controls_severity() {
    let source = "<script>\nexport default { emits: ['save'] }\n</script>";

    let config = LintConfig::from_toml_str("[rules]\n\"vue/require-emit-validator\" = \"error\"\n")
        .unwrap();
    let result = Linter::new().with_config(config).lint_sfc(source, "A.vue").unwrap();
    assert_eq!(result.error_count, 1);
    assert_eq!(result.warning_count, 0);

    let mut config = LintConfig::default();
    config.set(RULE, RuleSetting::Off);
    let result = Linter::new().with_config(config).lint_sfc(source, "A.vue").unwrap();
    assert!(!result.has_diagnostics());
}

#[test]
fn diagnostic_serializes_for_hosts() {
    let source = "<script>\nexport default { emits: { save: null } }\n</script>";
    let result = lint_sfc(source);
    let json = serde_json::to_value(&result.diagnostics[0]).unwrap();

    assert_eq!(json["ruleName"], RULE);
    assert_eq!(json["messageId"], "skipped");
    assert_eq!(json["subject"], "save");
    assert_eq!(json["severity"], "warning");
    assert!(json["fix"].is_null());
    assert_eq!(json["suggestions"][0]["edits"][0]["new_text"], "() => true");
}

#[test]
fn convenience_lint_function() {
    let result = vize_hallmark::lint(
        "<script>\nexport default { emits: ['save'] }\n</script>",
        "A.vue",
    )
    .unwrap();
    assert_eq!(result.filename, "A.vue");
    assert_eq!(result.warning_count, 1);
}
