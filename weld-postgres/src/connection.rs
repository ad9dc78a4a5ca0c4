use crate::{PostgresDriver, ValueHolder, util::row_to_weld_row};
use async_stream::try_stream;
use std::{borrow::Cow, env, pin::pin, sync::Arc};
use tokio::spawn;
use tokio_postgres::NoTls;
use url::Url;
use urlencoding::decode;
use weld_core::{
    Connection, Context, Driver, Error, Executor, Query, QueryResult, Result, RowLabeled,
    RowNames, RowsAffected,
    stream::{Stream, StreamExt, TryStreamExt},
};

pub struct PostgresConnection {
    pub(crate) client: tokio_postgres::Client,
}

/// The server handles a single statement per prepared query.
fn single_statement(sql: &str) -> &str {
    sql.trim_end().trim_end_matches(';')
}

impl Executor for PostgresConnection {
    type Driver = PostgresDriver;

    fn driver(&self) -> &Self::Driver {
        &PostgresDriver {}
    }

    fn run(&mut self, query: Query) -> impl Stream<Item = Result<QueryResult>> + Send {
        let context = Arc::new(format!("While running the query:\n{}", query));
        let client = &self.client;
        try_stream! {
            let Query { sql, args } = query;
            let stream = client
                .query_raw(single_statement(&sql), args.into_iter().map(ValueHolder))
                .await?;
            let mut stream = pin!(stream);
            let mut labels: Option<RowNames> = None;
            while let Some(row) = stream.next().await.transpose()? {
                let labels = labels.get_or_insert_with(|| {
                    row.columns().iter().map(|c| c.name().to_string()).collect()
                });
                yield QueryResult::Row(RowLabeled::new(labels.clone(), row_to_weld_row(row)?));
            }
            yield QueryResult::Affected(RowsAffected {
                rows_affected: stream.rows_affected().unwrap_or_default(),
            });
        }
        .map_err(move |e: Error| e.context(context.clone()))
    }

    async fn execute(&mut self, query: Query) -> Result<RowsAffected> {
        let Query { sql, args } = query;
        let sql = single_statement(&sql);
        let rows_affected = self
            .client
            .execute_raw(sql, args.into_iter().map(ValueHolder))
            .await
            .with_context(|| {
                format!(
                    "While executing the query:\n{}",
                    weld_core::truncate_long!(sql)
                )
            })?;
        Ok(RowsAffected { rows_affected })
    }
}

impl Connection for PostgresConnection {
    async fn connect(url: Cow<'static, str>) -> Result<PostgresConnection> {
        let context = || format!("While trying to connect to `{}`", url);
        let decoded = decode(&url).with_context(context)?;
        let prefix = format!("{}://", <Self::Driver as Driver>::NAME);
        if !decoded.starts_with(&prefix) {
            let error = Error::msg(format!(
                "Postgres connection url must start with `{}`",
                &prefix
            ))
            .context(context());
            log::error!("{:#}", error);
            return Err(error);
        }
        let mut parsed = Url::parse(&decoded).with_context(context)?;
        let mut pairs: Vec<(String, String)> = parsed
            .query_pairs()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        let sslmode = match pairs.iter().position(|(k, _)| k == "sslmode") {
            Some(pos) => Some(pairs.remove(pos).1),
            None => None,
        }
        .or_else(|| env::var("PGSSLMODE").ok())
        .unwrap_or_else(|| "disable".into());
        if pairs.is_empty() {
            parsed.set_query(None);
        } else {
            parsed
                .query_pairs_mut()
                .clear()
                .extend_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }
        if sslmode != "disable" {
            let error = Error::msg(format!(
                "Unsupported sslmode `{sslmode}`, only `disable` is available"
            ))
            .context(context());
            log::error!("{:#}", error);
            return Err(error);
        }
        let (client, connection) = tokio_postgres::connect(parsed.as_str(), NoTls)
            .await
            .with_context(context)?;
        spawn(async move {
            if let Err(e) = connection.await {
                if !e.is_closed() {
                    log::error!("Postgres connection error: {:#}", e);
                }
            }
        });
        Ok(Self { client })
    }
}
