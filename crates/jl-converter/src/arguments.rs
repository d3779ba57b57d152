use jl_core::HttpArgument;
use jl_parser::{
    bool_prop, collection_prop, element_children, element_prop, non_blank_string_prop,
    string_prop, XmlElementNode, ELEMENT_PROP,
};

const ARGUMENTS_PROP: &str = "HTTPsampler.Arguments";
const ARGUMENTS_TYPE: &str = "Arguments";
const ARGUMENTS_COLLECTION: &str = "Arguments.arguments";
const HTTP_ARGUMENT_TYPE: &str = "HTTPArgument";
const ARGUMENT_NAME: &str = "Argument.name";
const ARGUMENT_VALUE: &str = "Argument.value";
const POST_BODY_RAW: &str = "HTTPSampler.postBodyRaw";

const PROTOCOL_PROP: &str = "HTTPSampler.protocol";
const DOMAIN_PROP: &str = "HTTPSampler.domain";
const PORT_PROP: &str = "HTTPSampler.port";
const PATH_PROP: &str = "HTTPSampler.path";

/// Arguments of a sampler in document order. Repeated names are kept.
pub fn extract_arguments(sampler: &XmlElementNode) -> Vec<HttpArgument> {
    element_prop(sampler, ARGUMENTS_PROP, ARGUMENTS_TYPE)
        .flat_map(|arguments| collection_prop(arguments, ARGUMENTS_COLLECTION))
        .flat_map(|collection| element_children(collection))
        .filter(|entry| {
            entry.is(ELEMENT_PROP) && entry.attr("elementType") == Some(HTTP_ARGUMENT_TYPE)
        })
        .filter_map(|entry| {
            let name = string_prop(entry, ARGUMENT_NAME);
            let value = string_prop(entry, ARGUMENT_VALUE);
            if name.is_none() && value.is_none() {
                return None;
            }
            Some(HttpArgument::new(
                name.unwrap_or_default(),
                value.unwrap_or_default(),
            ))
        })
        .collect()
}

pub fn is_post_body_raw(sampler: &XmlElementNode) -> bool {
    bool_prop(sampler, POST_BODY_RAW)
}

/// `protocol://domain[:port][/path]`, defaulting to `http` and `localhost`.
pub fn build_base_url(sampler: &XmlElementNode) -> String {
    let protocol = non_blank_string_prop(sampler, PROTOCOL_PROP);
    let domain = non_blank_string_prop(sampler, DOMAIN_PROP);
    let port = non_blank_string_prop(sampler, PORT_PROP);
    let path = non_blank_string_prop(sampler, PATH_PROP);

    let mut url = format!(
        "{}://{}",
        protocol.as_deref().map(str::trim).unwrap_or("http"),
        domain.as_deref().map(str::trim).unwrap_or("localhost")
    );
    if let Some(port) = port {
        url.push(':');
        url.push_str(port.trim());
    }
    if let Some(path) = path {
        let path = path.trim();
        if !path.starts_with('/') {
            url.push('/');
        }
        url.push_str(path);
    }
    url
}

/// Appends `name=value` pairs as a query string, reusing an existing `?`.
pub fn append_query_string(base_url: &str, arguments: &[HttpArgument]) -> String {
    if arguments.is_empty() {
        return base_url.to_string();
    }

    let mut url = base_url.to_string();
    if !base_url.contains('?') {
        url.push('?');
    } else if !base_url.ends_with('&') && !base_url.ends_with('?') {
        url.push('&');
    }

    let query = arguments
        .iter()
        .map(|argument| format!("{}={}", argument.name, argument.value))
        .collect::<Vec<_>>()
        .join("&");
    url.push_str(&query);
    url
}
