//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fs;
use std::path::Path;

use miette::Diagnostic;
use serde_json::json;
use unitgen_core::QualifiedName;

use crate::emit::{BindingStatus, CompilationUnitBuilder, JavaLangNames, NameResolver, NoImplicitNames};
use crate::template::{self, TemplateError};

use super::{CliError, CliResult, ExitCode, UnitArgs};

/// Render a diagnostic (with code, help and labels) into a CLI error.
fn diagnostic<E>(err: E) -> CliError
where
    E: Diagnostic + Send + Sync + 'static,
{
    CliError::failure(format!("{:?}", miette::Report::new(err)))
}

/// Build a fresh unit from the shared construction arguments.
fn new_unit(unit: &UnitArgs) -> CliResult<CompilationUnitBuilder> {
    let resolver: &dyn NameResolver = if unit.java_lang { &JavaLangNames } else { &NoImplicitNames };
    CompilationUnitBuilder::with_resolver(
        resolver,
        unit.target.clone(),
        unit.companions.iter().cloned(),
        unit.feature_set(),
    )
    .map_err(diagnostic)
}

/// Render `body` through a fresh unit and return what `emit` prints.
pub fn emit_report(unit: &UnitArgs, body: &str, with_imports: bool, as_json: bool) -> CliResult<String> {
    let mut code = new_unit(unit)?;
    template::render(&mut code, body).map_err(|err| match err {
        TemplateError::Emit(emit) => diagnostic(emit),
        other => CliError::failure(format!("Error: {other}")),
    })?;

    let depth = code.blocks().depth();
    if depth > 0 {
        tracing::warn!(depth, "body template leaves blocks open");
    }

    let source = if with_imports {
        code.render_with_imports()
    } else {
        code.as_str().to_string()
    };
    if !as_json {
        return Ok(source);
    }

    let bindings: Vec<_> = code
        .scope()
        .bindings()
        .map(|(simple, binding)| {
            json!({
                "simple_name": simple,
                "owner": binding.owner.to_string(),
                "reserved": binding.status == BindingStatus::Reserved,
            })
        })
        .collect();
    let imports: Vec<String> = code.imports().iter().map(ToString::to_string).collect();
    let report = json!({
        "target": code.target().to_string(),
        "source": source,
        "open_blocks": depth,
        "bindings": bindings,
        "imports": imports,
    });
    serde_json::to_string_pretty(&report).map_err(|e| CliError::failure(format!("Error writing JSON report: {e}")))
}

/// `unitgen emit`
pub fn emit_file(unit: &UnitArgs, body: &Path, with_imports: bool, as_json: bool) -> CliResult<ExitCode> {
    let text = fs::read_to_string(body)
        .map_err(|e| CliError::failure(format!("Error reading {}: {e}", body.display())))?;
    let output = emit_report(unit, &text, with_imports, as_json)?;
    print!("{output}");
    if as_json {
        println!();
    }
    Ok(ExitCode::SUCCESS)
}

/// Spell each name in order against one fresh unit.
pub fn shorten_report(unit: &UnitArgs, names: &[QualifiedName]) -> CliResult<Vec<String>> {
    let mut code = new_unit(unit)?;
    Ok(names.iter().map(|name| code.shorten(name)).collect())
}

/// `unitgen shorten`
pub fn shorten_names(unit: &UnitArgs, names: &[QualifiedName]) -> CliResult<ExitCode> {
    for (name, spelling) in names.iter().zip(shorten_report(unit, names)?) {
        println!("{name} -> {spelling}");
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn q(s: &str) -> QualifiedName {
        s.parse().unwrap()
    }

    fn unit(java_lang: bool) -> UnitArgs {
        UnitArgs {
            target: q("com.example.Widget"),
            companions: vec![q("com.example.Widget_Builder")],
            java_lang,
            features: Vec::new(),
        }
    }

    #[test]
    fn test_emit_report_source() {
        let out = emit_report(&unit(false), "class Widget { ${java.util.List} items; }\n", true, false).unwrap();
        assert_eq!(
            out,
            "// Autogenerated code. Do not modify.\npackage com.example;\n\n\
             import java.util.List;\n\nclass Widget { List items; }\n"
        );
    }

    #[test]
    fn test_emit_report_json() {
        let out = emit_report(&unit(true), "${com.other.String} s;\n", false, true).unwrap();
        let report: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(report["target"], "com.example.Widget");
        assert_eq!(report["open_blocks"], 0);
        assert!(report["source"].as_str().unwrap().ends_with("com.other.String s;\n"));
        let widget = report["bindings"]
            .as_array()
            .unwrap()
            .iter()
            .find(|b| b["simple_name"] == "Widget")
            .unwrap();
        assert_eq!(widget["reserved"], true);
    }

    #[test]
    fn test_emit_report_renders_diagnostics() {
        let err = emit_report(&unit(false), "}\n", false, false).unwrap_err();
        assert_eq!(err.exit_code, ExitCode::FAILURE);
        assert!(err.message.contains("no open block to close"));
    }

    #[test]
    fn test_shorten_report_claim_order() {
        let spellings = shorten_report(
            &unit(false),
            &[q("java.util.List"), q("java.awt.List"), q("com.other.Widget"), q("java.util.List")],
        )
        .unwrap();
        assert_eq!(spellings, vec!["List", "java.awt.List", "com.other.Widget", "List"]);
    }
}
