use jl_core::{ActionStatement, FormItem, RequestSpec, DEFAULT_METHOD};
use jl_parser::{non_blank_string_prop, XmlElementNode};

use crate::arguments::{append_query_string, build_base_url, extract_arguments, is_post_body_raw};
use crate::transform::rewrite_variables;
use crate::walker::FallbackNames;

const METHOD_PROP: &str = "HTTPSampler.method";

pub fn build_request_spec(sampler: &XmlElementNode, names: &mut FallbackNames) -> RequestSpec {
    let name = sampler
        .attr("testname")
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| names.next_request());
    let method = non_blank_string_prop(sampler, METHOD_PROP)
        .map(|method| method.trim().to_string())
        .unwrap_or_else(|| DEFAULT_METHOD.to_string());

    RequestSpec {
        name,
        method,
        base_url: build_base_url(sampler),
        arguments: extract_arguments(sampler),
        raw_body: is_post_body_raw(sampler),
    }
}

/// Picks the request statement for a sampler:
/// GET becomes `web_url`, a raw body `web_custom_request` with the first
/// argument as body, form arguments `web_submit_data`, anything else a
/// bodiless `web_custom_request`.
pub fn request_statement(request: &RequestSpec) -> ActionStatement {
    let name = request.name.clone();

    if request.is_get() {
        return ActionStatement::WebUrl {
            name,
            url: rewrite_variables(&append_query_string(
                &request.base_url,
                &request.arguments,
            )),
        };
    }

    let url = rewrite_variables(&request.base_url);
    let method = request.method.clone();

    if request.raw_body {
        let body = request
            .arguments
            .first()
            .map(|argument| rewrite_variables(&argument.value))
            .unwrap_or_default();
        return ActionStatement::WebCustomRequest {
            name,
            url,
            method,
            body: Some(body),
        };
    }

    if !request.arguments.is_empty() {
        let items = request
            .arguments
            .iter()
            .map(|argument| FormItem {
                name: rewrite_variables(&argument.name),
                value: rewrite_variables(&argument.value),
            })
            .collect();
        return ActionStatement::WebSubmitData {
            name,
            action: url,
            method,
            items,
        };
    }

    ActionStatement::WebCustomRequest {
        name,
        url,
        method,
        body: None,
    }
}
