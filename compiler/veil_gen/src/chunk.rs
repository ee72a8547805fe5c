//! Chunked initializer builder.
//!
//! Target representations often bound the size of a single unit of code.
//! This builder splits an ordered stream of side-effecting statements into
//! bounded groups and, when more than one group exists, chains them through
//! a wrapper procedure. Running the wrapper performs exactly the statements
//! submitted, in submission order.

use veil_ir::{Initializer, Procedure};

/// Accumulates statements into bounded groups.
///
/// Rotation happens before a statement is appended, once the current group's
/// counter already exceeds `max_statements`. A group therefore holds at most
/// `max_statements + 1` statements.
pub struct ChainedInitializer<T> {
    prefix: String,
    max_statements: usize,
    count: usize,
    groups: Vec<Vec<T>>,
}

impl<T> ChainedInitializer<T> {
    pub fn new(prefix: impl Into<String>, max_statements: usize) -> Self {
        Self {
            prefix: prefix.into(),
            max_statements,
            count: 0,
            groups: vec![Vec::new()],
        }
    }

    /// Append a statement to the current group, rotating first if needed.
    pub fn push(&mut self, statement: T) {
        if self.count > self.max_statements {
            tracing::debug!(
                group = self.groups.len() + 1,
                limit = self.max_statements,
                "initializer group full, starting a new one"
            );
            self.count = 0;
            self.groups.push(Vec::new());
        }
        self.count += 1;
        if let Some(current) = self.groups.last_mut() {
            current.push(statement);
        }
    }

    /// Total statements submitted so far.
    pub fn len(&self) -> usize {
        self.groups.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Finish building.
    ///
    /// A single group is returned inline. Several groups become procedures
    /// named `<prefix><n>` (1-based) plus a wrapper calling them in order.
    pub fn build(self) -> Initializer<T> {
        let Self { prefix, groups, .. } = self;
        if groups.len() == 1 {
            return Initializer::Inline(groups.into_iter().flatten().collect());
        }

        let procedures: Vec<Procedure<T>> = groups
            .into_iter()
            .enumerate()
            .map(|(i, body)| Procedure {
                name: format!("{prefix}{}", i + 1),
                body,
            })
            .collect();
        let wrapper = procedures.iter().map(|p| p.name.clone()).collect();
        Initializer::Chained {
            procedures,
            wrapper,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;

    fn build_all<T>(limit: usize, statements: impl IntoIterator<Item = T>) -> Initializer<T> {
        let mut builder = ChainedInitializer::new("chainedMethod", limit);
        for statement in statements {
            builder.push(statement);
        }
        builder.build()
    }

    #[test]
    fn first_group_absorbs_the_limit_exceeding_statement() {
        let init = build_all(2, ['a', 'b', 'c', 'd', 'e']);
        assert_eq!(
            init,
            Initializer::Chained {
                procedures: vec![
                    Procedure {
                        name: "chainedMethod1".into(),
                        body: vec!['a', 'b', 'c'],
                    },
                    Procedure {
                        name: "chainedMethod2".into(),
                        body: vec!['d', 'e'],
                    },
                ],
                wrapper: vec!["chainedMethod1".into(), "chainedMethod2".into()],
            }
        );
    }

    #[test]
    fn under_the_limit_stays_inline() {
        let init = build_all(1000, 0..1001);
        let Initializer::Inline(body) = init else {
            panic!("1001 statements with limit 1000 fit in one block");
        };
        assert_eq!(body.len(), 1001);
    }

    #[test]
    fn empty_builder_is_an_empty_inline_block() {
        let builder: ChainedInitializer<u8> = ChainedInitializer::new("p", 10);
        assert!(builder.is_empty());
        assert_eq!(builder.build(), Initializer::Inline(Vec::new()));
    }

    #[test]
    fn zero_limit_puts_one_statement_per_group() {
        let init = build_all(0, [1, 2, 3]);
        let sizes: Vec<_> = init.procedures().iter().map(|p| p.body.len()).collect();
        assert_eq!(sizes, vec![1, 1, 1]);
    }

    #[test]
    fn prefix_is_configurable() {
        let init = build_all(0, [1, 2]);
        let names: Vec<_> = init.procedures().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["chainedMethod1", "chainedMethod2"]);

        let mut builder = ChainedInitializer::new("init_part_", 0);
        builder.push(1);
        builder.push(2);
        let names: Vec<_> = builder
            .build()
            .procedures()
            .iter()
            .map(|p| p.name.clone())
            .collect();
        assert_eq!(names, vec!["init_part_1", "init_part_2"]);
    }

    proptest! {
        #[test]
        fn chaining_preserves_order_and_bounds(n in 0usize..400, limit in 0usize..40) {
            let init = build_all(limit, 0..n);

            let replayed: Vec<usize> = init.statements().copied().collect();
            prop_assert_eq!(replayed, (0..n).collect::<Vec<_>>());

            for procedure in init.procedures() {
                prop_assert!(procedure.body.len() <= limit + 1);
                prop_assert!(!procedure.body.is_empty());
            }

            let expected_groups = if n == 0 { 1 } else { n.div_ceil(limit + 1) };
            let groups = init.procedures().len().max(1);
            prop_assert_eq!(groups, expected_groups);
        }
    }
}
