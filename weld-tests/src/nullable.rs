use weld::{Executor, Statement, null_i32, null_string};

pub async fn nullable<E: Executor>(executor: &mut E) {
    Statement::new()
        .q("DROP TABLE IF EXISTS weld_nullable")
        .exec(executor, ())
        .await
        .expect("Failed to drop weld_nullable");
    Statement::new()
        .q("CREATE TABLE weld_nullable (id INT PRIMARY KEY, label TEXT, amount INT)")
        .exec(executor, ())
        .await
        .expect("Failed to create weld_nullable");
    Statement::new()
        .q("INSERT INTO weld_nullable (id, label, amount)")
        .q_args(
            "VALUES (?, ?, ?), (?, ?, ?)",
            (1, null_string(""), null_i32(0), 2, null_string("two"), null_i32(2)),
        )
        .exec(executor, ())
        .await
        .expect("Failed to insert nullable values");

    let mut label = Some(String::from("placeholder"));
    let mut amount = Some(-1);
    Statement::new()
        .q("SELECT label, amount FROM weld_nullable")
        .q_args("WHERE id = ?", (1,))
        .exec(executor, (&mut label, &mut amount))
        .await
        .expect("Failed to select the first row");
    assert_eq!(label, None);
    assert_eq!(amount, None);

    Statement::new()
        .q("SELECT label, amount FROM weld_nullable")
        .q_args("WHERE id = ?", (2,))
        .exec(executor, (&mut label, &mut amount))
        .await
        .expect("Failed to select the second row");
    assert_eq!(label.as_deref(), Some("two"));
    assert_eq!(amount, Some(2));

    let mut nulls = 0i64;
    Statement::new()
        .q("SELECT count(*) FROM weld_nullable WHERE label IS NULL")
        .exec(executor, &mut nulls)
        .await
        .expect("Failed to count the null labels");
    assert_eq!(nulls, 1);
}
