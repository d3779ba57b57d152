use jl_core::ConvertError;
use std::fmt::Display;

fn map_error(code: &'static str, error: impl Display) -> ConvertError {
    ConvertError::new(code, error.to_string())
}

pub(crate) fn emit_error(error: ConvertError) -> i32 {
    println!("RESULT:ERROR");
    println!("ERROR_CODE:{}", error.code);
    println!(
        "ERROR_MSG_JSON:{}",
        serde_json::to_string(&error.message).unwrap_or_else(|_| "\"\"".to_string())
    );
    1
}

pub(crate) fn map_options_read(error: std::io::Error) -> ConvertError {
    map_error("OPTIONS_READ", error)
}

pub(crate) fn map_options_invalid(error: serde_json::Error) -> ConvertError {
    map_error("OPTIONS_INVALID", error)
}
