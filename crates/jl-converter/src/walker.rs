use jl_core::{ActionStatement, ConversionWarning, ConvertOptions, WarningKind};
use tracing::debug;

use crate::correlation::extract_correlations;
use crate::pairing::{PlanNode, PlanScope, HTTP_SAMPLER, TRANSACTION_CONTROLLER};
use crate::push_warning;
use crate::request::{build_request_spec, request_statement};

/// Per-run counters for elements without a usable `testname`.
#[derive(Debug, Clone, Default)]
pub struct FallbackNames {
    transaction_counter: usize,
    request_counter: usize,
}

impl FallbackNames {
    pub fn next_transaction(&mut self) -> String {
        self.transaction_counter += 1;
        format!("Txn_{}", self.transaction_counter)
    }

    pub fn next_request(&mut self) -> String {
        self.request_counter += 1;
        format!("Request_{}", self.request_counter)
    }
}

/// Walks a thread group's plan tree and collects the action body.
pub struct ActionBuilder<'r> {
    options: &'r ConvertOptions,
    names: &'r mut FallbackNames,
    statements: Vec<ActionStatement>,
    warnings: Vec<ConversionWarning>,
}

impl<'r> ActionBuilder<'r> {
    pub fn new(options: &'r ConvertOptions, names: &'r mut FallbackNames) -> Self {
        Self {
            options,
            names,
            statements: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn walk_group(&mut self, group: &PlanNode<'_>, group_name: &str) {
        match &group.scope {
            Some(scope) => self.walk_scope(scope, false),
            None => push_warning(
                &mut self.warnings,
                WarningKind::GroupWithoutChildren,
                format!(
                    "No hashTree found for ThreadGroup '{}' (line {}).",
                    group_name,
                    group.element.line
                ),
            ),
        }
    }

    pub fn walk_scope(&mut self, scope: &PlanScope<'_>, inside_transaction: bool) {
        for node in &scope.nodes {
            match node.kind() {
                HTTP_SAMPLER => self.emit_sampler(node, inside_transaction),
                TRANSACTION_CONTROLLER => self.emit_transaction(node),
                _ => {}
            }
        }
    }

    fn emit_transaction(&mut self, node: &PlanNode<'_>) {
        let name = node
            .display_name()
            .map(str::to_string)
            .unwrap_or_else(|| self.names.next_transaction());

        self.statements.push(ActionStatement::StartTransaction { name: name.clone() });
        match &node.scope {
            Some(scope) => self.walk_scope(scope, true),
            None => push_warning(
                &mut self.warnings,
                WarningKind::TransactionWithoutChildren,
                format!(
                    "TransactionController '{}' (line {}) has no hashTree.",
                    name,
                    node.element.line
                ),
            ),
        }
        self.statements.push(ActionStatement::EndTransaction { name });
    }

    fn emit_sampler(&mut self, node: &PlanNode<'_>, inside_transaction: bool) {
        let request = build_request_spec(node.element, self.names);
        debug!(
            name = %request.name,
            method = %request.method,
            arguments = request.arguments.len(),
            "translating sampler"
        );

        // captures must be registered before the request they decorate
        if self.options.enable_correlation {
            let correlations = extract_correlations(node);
            if !correlations.is_empty() {
                debug!(
                    name = %request.name,
                    regex = correlations.regex.len(),
                    json = correlations.json.len(),
                    "registering captures"
                );
            }
            self.statements.extend(correlations.into_statements());
        }

        if !inside_transaction {
            self.statements.push(ActionStatement::StartTransaction {
                name: request.name.clone(),
            });
        }
        self.statements.push(request_statement(&request));
        if !inside_transaction {
            self.statements.push(ActionStatement::EndTransaction { name: request.name });
        }
    }

    pub fn finish(self) -> (Vec<ActionStatement>, Vec<ConversionWarning>) {
        (self.statements, self.warnings)
    }
}
