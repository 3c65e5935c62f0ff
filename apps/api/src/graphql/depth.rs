//! Selection depth gate
//!
//! Depth is the longest chain of nested fields in any operation, with
//! fragment spreads and inline fragments expanded in place. Introspection
//! fields (`__schema`, `__type`, `__typename`) and everything below them are
//! not counted, so schema tooling such as the GraphQL Playground keeps
//! working under a tight limit.
//!
//! The check runs right after parsing. A rejected document is neither
//! validated further nor executed.

use std::sync::Arc;

use async_graphql::extensions::{Extension, ExtensionContext, ExtensionFactory, NextParseQuery};
use async_graphql::parser::types::{ExecutableDocument, Selection, SelectionSet};
use async_graphql::{ServerError, ServerResult, Variables};

/// Error message for documents over the limit
pub const TOO_DEEP_MESSAGE: &str = "Query is nested too deep.";

/// Extension rejecting documents nested deeper than `max_depth` fields
#[derive(Debug, Clone, Copy)]
pub struct DepthLimit {
    max_depth: usize,
}

impl DepthLimit {
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }
}

impl ExtensionFactory for DepthLimit {
    fn create(&self) -> Arc<dyn Extension> {
        Arc::new(DepthLimitExtension {
            max_depth: self.max_depth,
        })
    }
}

struct DepthLimitExtension {
    max_depth: usize,
}

#[async_trait::async_trait]
impl Extension for DepthLimitExtension {
    async fn parse_query(
        &self,
        ctx: &ExtensionContext<'_>,
        query: &str,
        variables: &Variables,
        next: NextParseQuery<'_>,
    ) -> ServerResult<ExecutableDocument> {
        let document = next.run(ctx, query, variables).await?;

        let depth = document_depth(&document);
        if depth > self.max_depth {
            tracing::debug!(depth, limit = self.max_depth, "Rejected nested document");
            return Err(ServerError::new(TOO_DEEP_MESSAGE, None));
        }

        Ok(document)
    }
}

/// Deepest field chain over every operation in the document
pub fn document_depth(document: &ExecutableDocument) -> usize {
    let mut walker = DepthWalker {
        document,
        fragment_path: Vec::new(),
    };
    document
        .operations
        .iter()
        .map(|(_, operation)| walker.selection_set(&operation.node.selection_set.node))
        .max()
        .unwrap_or(0)
}

struct DepthWalker<'a> {
    document: &'a ExecutableDocument,
    // Fragments being expanded; cycles are reported by validation instead
    fragment_path: Vec<&'a str>,
}

impl<'a> DepthWalker<'a> {
    fn selection_set(&mut self, set: &'a SelectionSet) -> usize {
        set.items
            .iter()
            .map(|selection| self.selection(&selection.node))
            .max()
            .unwrap_or(0)
    }

    fn selection(&mut self, selection: &'a Selection) -> usize {
        match selection {
            Selection::Field(field) => {
                if field.node.name.node.starts_with("__") {
                    0
                } else {
                    1 + self.selection_set(&field.node.selection_set.node)
                }
            }
            Selection::InlineFragment(fragment) => {
                self.selection_set(&fragment.node.selection_set.node)
            }
            Selection::FragmentSpread(spread) => {
                let name = spread.node.fragment_name.node.as_str();
                if self.fragment_path.contains(&name) {
                    return 0;
                }
                let Some(fragment) = self.document.fragments.get(name) else {
                    return 0;
                };

                self.fragment_path.push(name);
                let depth = self.selection_set(&fragment.node.selection_set.node);
                self.fragment_path.pop();
                depth
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_graphql::parser::parse_query;
    use rstest::rstest;

    fn depth_of(query: &str) -> usize {
        document_depth(&parse_query(query).unwrap())
    }

    #[rstest]
    #[case::flat("{ users { id } }", 2)]
    #[case::nested("{ users { profile { memberType { id } } } }", 4)]
    #[case::widest_branch_wins("{ users { id posts { id } } memberTypes { id } }", 3)]
    #[case::inline_fragment("{ users { ... on User { posts { id } } } }", 3)]
    #[case::fragment_spread("{ users { ...Mine } } fragment Mine on User { posts { id } }", 3)]
    fn test_counts_nested_fields(#[case] query: &str, #[case] expected: usize) {
        assert_eq!(depth_of(query), expected);
    }

    #[rstest]
    #[case::schema("{ __schema { types { fields { type { ofType { ofType { name } } } } } } }", 0)]
    #[case::type_lookup("{ __type(name: \"User\") { fields { type { ofType { name } } } } }", 0)]
    #[case::typename("{ users { __typename id } }", 2)]
    fn test_introspection_fields_are_free(#[case] query: &str, #[case] expected: usize) {
        assert_eq!(depth_of(query), expected);
    }

    #[test]
    fn test_fragment_cycle_terminates() {
        let query = "{ users { ...A } } fragment A on User { posts { id } ...B } \
                     fragment B on User { ...A }";
        assert_eq!(depth_of(query), 3);
    }

    #[test]
    fn test_deepest_operation_counts() {
        let query = "query Short { users { id } } query Long { users { posts { id } } }";
        assert_eq!(depth_of(query), 3);
    }
}
