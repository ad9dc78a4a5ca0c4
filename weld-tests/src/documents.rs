use weld::{Executor, Record, Statement, map_to_ts_vector_value, ts_query, ts_vector};

#[derive(Record, Default, Debug)]
struct Document {
    id: i32,
    body: String,
}

pub async fn documents<E: Executor>(executor: &mut E) {
    Statement::new()
        .q("DROP TABLE IF EXISTS weld_documents")
        .exec(executor, ())
        .await
        .expect("Failed to drop weld_documents");
    Statement::new()
        .q("CREATE TABLE weld_documents (id SERIAL PRIMARY KEY, body TEXT NOT NULL, vectors TSVECTOR)")
        .exec(executor, ())
        .await
        .expect("Failed to create weld_documents");

    for body in ["Daar Walker", "Walking the dog", "Something else"] {
        Statement::new()
            .q("INSERT INTO weld_documents (body, vectors)")
            .q_args("VALUES (?, ?)", (body, ts_vector([body])))
            .exec(executor, ())
            .await
            .expect("Failed to insert the document");
    }
    let tags = std::collections::BTreeMap::from([("first", "Lorem"), ("second", "Ipsum")]);
    Statement::new()
        .q("INSERT INTO weld_documents (body, vectors)")
        .q_args(
            "VALUES (?, ?)",
            (map_to_ts_vector_value(&tags), ts_vector(tags.values())),
        )
        .exec(executor, ())
        .await
        .expect("Failed to insert the tags");

    // "walk" loses the last character and matches both "walker" and "walking"
    let mut found = Vec::<Document>::new();
    Statement::new()
        .q("SELECT id, body FROM weld_documents")
        .q_args("WHERE vectors @@ ?", (ts_query("Walk"),))
        .q("ORDER BY id")
        .exec(executor, &mut found)
        .await
        .expect("Failed to search the documents");
    assert_eq!(
        found.iter().map(|v| v.body.as_str()).collect::<Vec<_>>(),
        ["Daar Walker", "Walking the dog"]
    );

    let mut count = 0i64;
    Statement::new()
        .q("SELECT count(*) FROM weld_documents")
        .q_args("WHERE vectors @@ ?", (ts_query("ipsum lorem"),))
        .exec(executor, &mut count)
        .await
        .expect("Failed to count the documents");
    assert_eq!(count, 1);
}
