#[cfg(test)]
mod tests {
    use indoc::indoc;
    use std::collections::{BTreeMap, HashMap};
    use weld::{
        Aggregate, ArgumentCountMismatch, AsValue, GenericSqlWriter, Literal, Record, RewriteRule,
        SqlWriter, Statement, Value, ts_query, ts_vector,
    };
    use weld_postgres::PostgresSqlWriter;

    const WRITER: PostgresSqlWriter = PostgresSqlWriter {};

    #[derive(Record, Default, Clone)]
    struct Post {
        id: i64,
        name: String,
        lastname: String,
        tags: Vec<String>,
    }

    #[test]
    fn identity_without_arguments() {
        let statement = Statement::new()
            .q("SELECT ? AS question, '@literal' AS at")
            .q("FROM posts");
        assert_eq!(
            statement.to_sql(&WRITER).unwrap(),
            "SELECT ? AS question, '@literal' AS at FROM posts;"
        );
        let query = statement.compile(&WRITER).unwrap();
        assert!(query.args.is_empty());
    }

    #[test]
    fn insert_with_named_values() {
        let query = Statement::new()
            .q("INSERT INTO t")
            .q_args(
                "(a,b) VALUES (@x, @y)",
                Aggregate::new().with("y", "z").with("x", 5),
            )
            .q("RETURNING id")
            .compile(&WRITER)
            .unwrap();
        assert_eq!(query.sql, "INSERT INTO t (a,b) VALUES ($1, $2) RETURNING id;");
        assert_eq!(
            query.args,
            vec![Value::Int32(Some(5)), Value::Varchar(Some("z".into()))]
        );
    }

    #[test]
    fn placeholder_count_matches_tokens() {
        let post = Post {
            name: "Daar".into(),
            lastname: "Walker".into(),
            ..Default::default()
        };
        let query = Statement::new()
            .q_args(
                "INSERT INTO posts (name, lastname, vectors) VALUES (@name, @lastname, to_tsvector('Daar Walker'))",
                &post,
            )
            .compile(&GenericSqlWriter)
            .unwrap();
        assert_eq!(query.sql.matches('?').count(), 2);
        assert_eq!(query.args.len(), 2);
    }

    #[test]
    fn token_prefix_of_another_token() {
        let map = HashMap::from([("id".to_string(), 1), ("identity".to_string(), 2)]);
        let query = Statement::new()
            .q("UPDATE t")
            .q_args("SET a=@id, b=@identity", &map)
            .compile(&WRITER)
            .unwrap();
        assert_eq!(query.sql, "UPDATE t SET a=$1, b=$2;");
        assert_eq!(query.args, vec![Value::Int32(Some(1)), Value::Int32(Some(2))]);
    }

    #[test]
    fn map_values_follow_the_text() {
        let map = BTreeMap::from([
            ("alpha".to_string(), 1i64),
            ("bravo".to_string(), 2),
            ("charlie".to_string(), 3),
        ]);
        let query = Statement::new()
            .q_args("SELECT @charlie, @alpha, @bravo", &map)
            .compile(&WRITER)
            .unwrap();
        assert_eq!(query.sql, "SELECT $1, $2, $3;");
        assert_eq!(
            query.args,
            vec![3i64.as_value(), 1i64.as_value(), 2i64.as_value()]
        );
    }

    #[test]
    fn collections_use_any() {
        let query = Statement::new()
            .q("SELECT * FROM posts")
            .q_args("WHERE id IN (?)", (vec![1, 2, 3],))
            .compile(&WRITER)
            .unwrap();
        assert_eq!(query.sql, "SELECT * FROM posts WHERE id = ANY($1);");
        assert_eq!(query.args, vec![vec![1, 2, 3].as_value()]);
    }

    #[test]
    fn named_collections_use_any() {
        let post = Post {
            tags: vec!["rust".into(), "sql".into()],
            ..Default::default()
        };
        let query = Statement::new()
            .q("SELECT * FROM posts")
            .q_args("WHERE Tag In (@tags)", &post)
            .compile(&WRITER)
            .unwrap();
        assert_eq!(query.sql, "SELECT * FROM posts WHERE Tag = ANY($1);");
    }

    #[test]
    fn argument_count_mismatch() {
        let error = Statement::new()
            .q("SELECT * FROM t")
            .q_args("WHERE a = ? AND b = ?", (1,))
            .to_sql(&WRITER)
            .unwrap_err();
        let mismatch = error
            .downcast_ref::<ArgumentCountMismatch>()
            .expect("Expected an argument count mismatch");
        assert_eq!(mismatch.placeholders, 2);
        assert_eq!(mismatch.arguments, 1);
        assert_eq!(mismatch.fragment, "WHERE a = ? AND b = ?");
    }

    #[test]
    fn literals_are_not_numbered() {
        let query = Statement::new()
            .q("SELECT id FROM posts")
            .q_args(
                "WHERE vectors @@ ? AND id > ? AND note = ?",
                (ts_query("Who? Walker"), 10, Literal::new("'?'")),
            )
            .compile(&WRITER)
            .unwrap();
        assert_eq!(
            query.sql,
            "SELECT id FROM posts WHERE vectors @@ to_tsquery('simple', 'wh:* & walke:*') AND id > $1 AND note = '?';"
        );
        assert_eq!(query.args, vec![Value::Int32(Some(10))]);
    }

    #[test]
    fn numbering_continues_across_fragments() {
        let query = Statement::new()
            .q("INSERT INTO posts (id, name, vectors)")
            .q_args("VALUES (?, ?,", (7i64, "seven"))
            .q_args("?)", (ts_vector(["Seven", "7"]),))
            .q("ON CONFLICT DO NOTHING")
            .q_args("RETURNING ?", (Value::Null,))
            .compile(&WRITER)
            .unwrap();
        assert_eq!(
            query.sql,
            indoc! {"
                INSERT INTO posts (id, name, vectors) VALUES ($1, $2, to_tsvector('simple', 'seven 7')) ON CONFLICT DO NOTHING RETURNING $3;
            "}
            .trim()
        );
        assert_eq!(query.args.len(), 3);
    }

    #[test]
    fn custom_rewrites() {
        struct NoRewrites;
        impl SqlWriter for NoRewrites {
            fn collection_rewrites(&self) -> &[RewriteRule] {
                &[]
            }
        }
        let sql = Statement::new()
            .q_args("WHERE id IN (?)", (vec![1],))
            .to_sql(&NoRewrites)
            .unwrap();
        assert_eq!(sql, "WHERE id IN (?);");
    }
}
