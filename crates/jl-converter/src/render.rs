//! Renders action statements as LoadRunner C calls. Every literal passes
//! through [`escape_c_literal`] here and nowhere else.

use jl_core::ActionStatement;

use crate::transform::escape_c_literal;

const INDENT: &str = "    ";
const ARG_INDENT: &str = "        ";

pub fn render_statement(statement: &ActionStatement) -> String {
    match statement {
        ActionStatement::StartTransaction { name } => {
            format!("{INDENT}lr_start_transaction(\"{}\");\n", escape_c_literal(name))
        }
        ActionStatement::EndTransaction { name } => format!(
            "{INDENT}lr_end_transaction(\"{}\", LR_AUTO);\n",
            escape_c_literal(name)
        ),
        ActionStatement::SaveParamRegex {
            param_name,
            pattern,
        } => call(
            "web_reg_save_param_ex(",
            &[
                quoted("ParamName=", param_name),
                quoted("RegExp=", pattern),
            ],
        ),
        ActionStatement::SaveParamJson { param_name, query } => call(
            "web_reg_save_param_json(",
            &[
                quoted("ParamName=", param_name),
                quoted("QueryString=", query),
            ],
        ),
        ActionStatement::WebUrl { name, url } => call(
            &format!("web_url(\"{}\",", escape_c_literal(name)),
            &[
                quoted("URL=", url),
                quoted("TargetFrame=", ""),
                quoted("Resource=", "0"),
                quoted("Mode=", "HTTP"),
            ],
        ),
        ActionStatement::WebCustomRequest {
            name,
            url,
            method,
            body,
        } => {
            let mut args = vec![
                quoted("URL=", url),
                quoted("Method=", method),
                quoted("Resource=", "0"),
                quoted("Mode=", "HTTP"),
            ];
            if let Some(body) = body {
                args.push(quoted("Body=", body));
            }
            call(
                &format!("web_custom_request(\"{}\",", escape_c_literal(name)),
                &args,
            )
        }
        ActionStatement::WebSubmitData {
            name,
            action,
            method,
            items,
        } => {
            let mut args = vec![
                quoted("Action=", action),
                quoted("Method=", method),
                quoted("TargetFrame=", ""),
                quoted("Resource=", "0"),
                quoted("Mode=", "HTTP"),
                "ITEMDATA".to_string(),
            ];
            for item in items {
                args.push(format!(
                    "{}, {}, ENDITEM",
                    quoted("Name=", &item.name),
                    quoted("Value=", &item.value)
                ));
            }
            call(
                &format!("web_submit_data(\"{}\",", escape_c_literal(name)),
                &args,
            )
        }
    }
}

/// `opening` on the first line, one argument per continuation line, then `LAST);`.
fn call(opening: &str, args: &[String]) -> String {
    let mut out = format!("{INDENT}{opening}\n");
    for arg in args {
        out.push_str(ARG_INDENT);
        out.push_str(arg);
        out.push_str(",\n");
    }
    out.push_str(ARG_INDENT);
    out.push_str("LAST);\n");
    out
}

fn quoted(key: &str, value: &str) -> String {
    format!("\"{}{}\"", key, escape_c_literal(value))
}

/// Statements separated by blank lines, as they appear inside `Action()`.
pub fn render_statements(statements: &[ActionStatement]) -> String {
    statements
        .iter()
        .map(|statement| format!("{}\n", render_statement(statement)))
        .collect()
}
