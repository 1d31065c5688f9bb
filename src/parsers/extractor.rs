use super::{CaptureSet, QueryCategory, SyntaxNode};
use crate::core::{FileSymbols, Include, Symbol, SymbolKind};

const RETURN_TYPE_KINDS: [&str; 3] = ["primitive_type", "type_identifier", "qualified_identifier"];
const PARAMETER_KINDS: [&str; 2] = ["parameter_declaration", "optional_parameter_declaration"];
const VIRTUAL_KINDS: [&str; 2] = ["virtual", "virtual_function_specifier"];
const NAMESPACE_NAME_KINDS: [&str; 3] = [
    "identifier",
    "namespace_identifier",
    "nested_namespace_specifier",
];

/// Turns one file's query captures into [`FileSymbols`].
///
/// Captures whose expected ancestor is missing are skipped rather than reported,
/// so partial or error-recovered trees still yield whatever is well formed.
#[derive(Debug, Clone, Copy, Default)]
pub struct SymbolExtractor;

impl SymbolExtractor {
    pub fn new() -> Self {
        Self
    }

    /// `None` stands for a file the parser could not handle; it yields empty symbols.
    pub fn extract<N: SyntaxNode>(
        &self,
        file_path: &str,
        captures: Option<&CaptureSet<N>>,
    ) -> FileSymbols {
        let mut symbols = FileSymbols::new(file_path);
        let Some(captures) = captures else {
            return symbols;
        };

        symbols.includes = self.extract_includes(captures);
        symbols.functions = self.extract_functions(captures);
        symbols.classes = self.extract_types(captures, QueryCategory::Classes, SymbolKind::Class);
        symbols.structs = self.extract_types(captures, QueryCategory::Structs, SymbolKind::Struct);
        symbols.namespaces = self.extract_namespaces(captures);
        symbols.called_names = captures
            .named(QueryCategory::CallExpressions)
            .map(|node| node.text().to_string())
            .filter(|name| !name.is_empty())
            .collect();

        symbols
    }

    fn extract_includes<N: SyntaxNode>(&self, captures: &CaptureSet<N>) -> Vec<Include> {
        captures
            .named(QueryCategory::Includes)
            .map(|path_node| {
                let path = path_node
                    .text()
                    .trim_matches(|c| c == '"' || c == '<' || c == '>')
                    .to_string();
                let is_system = path_node
                    .parent()
                    .map(|include| include.text().contains('<'))
                    .unwrap_or(false);
                Include {
                    path,
                    line: path_node.start_line(),
                    is_system,
                }
            })
            .collect()
    }

    fn extract_functions<N: SyntaxNode>(&self, captures: &CaptureSet<N>) -> Vec<Symbol> {
        let mut functions = Vec::new();

        for name_node in captures.named(QueryCategory::Functions) {
            let Some(definition) = nearest_ancestor(name_node, &["function_definition"]) else {
                continue;
            };

            let params = nearest_ancestor(name_node, &["function_declarator"])
                .map(|declarator| parameters(&declarator))
                .unwrap_or_default();
            let return_type =
                first_child_of(&definition, &RETURN_TYPE_KINDS).map(|node| node.text().to_string());
            let is_virtual = first_child_of(&definition, &VIRTUAL_KINDS).is_some();
            let is_static = definition.children().iter().any(|child| {
                child.kind() == "storage_class_specifier" && child.text().contains("static")
            });
            let scope = enclosing_scope(&definition).or_else(|| qualifier_of(name_node));

            functions.push(
                Symbol::new(
                    name_node.text().to_string(),
                    SymbolKind::Function,
                    definition.start_line(),
                    definition.end_line(),
                )
                .with_scope(scope)
                .with_params(params)
                .with_return_type(return_type)
                .with_modifiers(is_templated(&definition), is_virtual, is_static),
            );
        }

        functions
    }

    fn extract_types<N: SyntaxNode>(
        &self,
        captures: &CaptureSet<N>,
        category: QueryCategory,
        kind: SymbolKind,
    ) -> Vec<Symbol> {
        let specifier = match kind {
            SymbolKind::Struct => "struct_specifier",
            _ => "class_specifier",
        };

        captures
            .named(category)
            .filter_map(|name_node| {
                let definition = nearest_ancestor(name_node, &[specifier])?;
                // Only classes record their enclosing scope.
                let scope = match kind {
                    SymbolKind::Class => enclosing_scope(&definition),
                    _ => None,
                };
                Some(
                    Symbol::new(
                        name_node.text().to_string(),
                        kind,
                        definition.start_line(),
                        definition.end_line(),
                    )
                    .with_scope(scope)
                    .with_modifiers(is_templated(&definition), false, false),
                )
            })
            .collect()
    }

    fn extract_namespaces<N: SyntaxNode>(&self, captures: &CaptureSet<N>) -> Vec<Symbol> {
        captures
            .named(QueryCategory::Namespaces)
            .filter_map(|name_node| {
                let definition = nearest_ancestor(name_node, &["namespace_definition"])?;
                let name = first_child_of(&definition, &NAMESPACE_NAME_KINDS)
                    .map(|node| node.text().to_string())
                    .unwrap_or_else(|| name_node.text().to_string());
                Some(Symbol::new(
                    name,
                    SymbolKind::Namespace,
                    definition.start_line(),
                    definition.end_line(),
                ))
            })
            .collect()
    }
}

/// Closest strict ancestor whose kind is in `kinds`.
fn nearest_ancestor<N: SyntaxNode>(node: &N, kinds: &[&str]) -> Option<N> {
    let mut current = node.parent();
    while let Some(candidate) = current {
        if kinds.contains(&candidate.kind()) {
            return Some(candidate);
        }
        current = candidate.parent();
    }
    None
}

fn first_child_of<N: SyntaxNode>(node: &N, kinds: &[&str]) -> Option<N> {
    node.children()
        .into_iter()
        .find(|child| kinds.contains(&child.kind()))
}

fn parameters<N: SyntaxNode>(declarator: &N) -> Vec<String> {
    declarator
        .children()
        .into_iter()
        .filter(|child| child.kind() == "parameter_list")
        .flat_map(|list| list.children())
        .filter(|param| PARAMETER_KINDS.contains(&param.kind()))
        .map(|param| param.text().to_string())
        .collect()
}

fn is_templated<N: SyntaxNode>(definition: &N) -> bool {
    definition
        .parent()
        .map(|parent| parent.kind() == "template_declaration")
        .unwrap_or(false)
}

/// Name of the nearest enclosing namespace, class or struct.
///
/// Only the innermost scope is returned; `a::b::f` reports `b`. A nested
/// namespace definition (`namespace a::b`) reports its full `a::b` name.
fn enclosing_scope<N: SyntaxNode>(node: &N) -> Option<String> {
    let mut current = node.parent();
    while let Some(ancestor) = current {
        let name_kinds: &[&str] = match ancestor.kind() {
            "namespace_definition" => &NAMESPACE_NAME_KINDS,
            "class_specifier" | "struct_specifier" => &["type_identifier"],
            _ => &[],
        };
        if let Some(name) = first_child_of(&ancestor, name_kinds) {
            return Some(name.text().to_string());
        }
        current = ancestor.parent();
    }
    None
}

/// `Widget` for an out-of-line `Widget::draw` definition.
fn qualifier_of<N: SyntaxNode>(name_node: &N) -> Option<String> {
    let qualified = name_node.parent().filter(|p| p.kind() == "qualified_identifier")?;
    qualified
        .text()
        .rsplit_once("::")
        .map(|(scope, _)| scope.trim().to_string())
        .filter(|scope| !scope.is_empty())
}
