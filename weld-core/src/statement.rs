use crate::{
    Argument, Arguments, Destinations, Driver, Executor, Query, Result, SqlWriter, compile,
    map_rows,
};
use anyhow::Context;
use std::time::Instant;

/// One appended piece of SQL and the values it binds.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Fragment {
    pub text: String,
    pub arguments: Vec<Argument>,
}

impl Fragment {
    pub fn new(text: impl Into<String>, arguments: impl Arguments) -> Self {
        Self {
            text: text.into(),
            arguments: arguments.into_arguments(),
        }
    }
}

/// SQL statement built from fragments, in the order they are appended.
///
/// ```rust
/// use weld_core::{GenericSqlWriter, Statement};
/// let statement = Statement::new()
///     .q("SELECT name FROM users")
///     .q_args("WHERE id = ?", (7,))
///     .q_if(false, "AND active = ?", (true,));
/// assert_eq!(
///     statement.to_sql(&GenericSqlWriter).unwrap(),
///     "SELECT name FROM users WHERE id = ?;"
/// );
/// ```
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Statement {
    fragments: Vec<Fragment>,
}

impl Statement {
    pub fn new() -> Self {
        Default::default()
    }

    /// Append text that binds nothing, it is never scanned for placeholders.
    pub fn q(self, text: impl Into<String>) -> Self {
        self.q_args(text, ())
    }

    /// Append text with its positional arguments or a named aggregate.
    pub fn q_args(mut self, text: impl Into<String>, args: impl Arguments) -> Self {
        self.fragments.push(Fragment::new(text, args));
        self
    }

    /// Same as [`Statement::q_args`] when `condition` holds, otherwise unchanged.
    pub fn q_if(self, condition: bool, text: impl Into<String>, args: impl Arguments) -> Self {
        if condition {
            self.q_args(text, args)
        } else {
            self
        }
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn compile<W: SqlWriter + ?Sized>(&self, writer: &W) -> Result<Query> {
        compile(&self.fragments, writer)
    }

    /// Compiled SQL text, without the arguments.
    pub fn to_sql<W: SqlWriter + ?Sized>(&self, writer: &W) -> Result<String> {
        self.compile(writer).map(|v| v.sql)
    }

    /// Compile for the executor dialect, run and decode the rows into `destinations`.
    ///
    /// With `()` as destinations the statement is executed without fetching rows.
    pub async fn exec<E, D>(&self, executor: &mut E, destinations: D) -> Result<()>
    where
        E: Executor,
        D: Destinations,
    {
        let query = self
            .compile(&executor.driver().sql_writer())
            .map_err(|e| {
                log::error!("{:#}", e);
                e
            })?;
        let context = format!("While executing the statement:\n{}", query);
        log::debug!("{} ({} arguments)", query, query.args.len());
        let start = Instant::now();
        let result = if destinations.is_empty() {
            executor.execute(query).await.map(|_| ())
        } else {
            map_rows(executor.fetch(query), destinations).await
        };
        match result.context(context) {
            Ok(()) => {
                log::debug!("Statement completed in {:?}", start.elapsed());
                Ok(())
            }
            Err(e) => {
                log::error!("{:#}", e);
                Err(e)
            }
        }
    }
}
