use std::{
    collections::{BTreeMap, HashMap},
    sync::LazyLock,
};
use time::PrimitiveDateTime;
use tokio::sync::Mutex;
use weld::{DecodeError, Executor, Record, Statement};

#[derive(Record, Default, Debug, Clone, PartialEq)]
struct Person {
    id: i32,
    name: String,
    lastname: String,
    active: bool,
    amount: f64,
    amount_special: f64,
    quantity: i32,
    roles: Vec<String>,
    note: Option<String>,
    created_at: Option<PrimitiveDateTime>,
}

static MUTEX: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

pub async fn people<E: Executor>(executor: &mut E) {
    let _lock = MUTEX.lock().await;

    // Setup
    Statement::new()
        .q("DROP TABLE IF EXISTS weld_people")
        .exec(executor, ())
        .await
        .expect("Failed to drop weld_people");
    Statement::new()
        .q("CREATE TABLE weld_people (")
        .q("id SERIAL PRIMARY KEY,")
        .q("name VARCHAR(255) NOT NULL,")
        .q("lastname VARCHAR(255) NOT NULL,")
        .q("active BOOL NOT NULL DEFAULT false,")
        .q("amount FLOAT NOT NULL DEFAULT 0,")
        .q("amount_special FLOAT NOT NULL DEFAULT 0,")
        .q("quantity INT NOT NULL DEFAULT 0,")
        .q("roles VARCHAR[] NOT NULL DEFAULT array[]::varchar[],")
        .q("note TEXT,")
        .q("created_at TIMESTAMP NOT NULL DEFAULT current_timestamp)")
        .exec(executor, ())
        .await
        .expect("Failed to create weld_people");

    // Insert a record through named parameters
    let mut person = Person {
        name: "Dominik".into(),
        lastname: "Linduska".into(),
        active: true,
        amount: 999.99,
        amount_special: 999.99,
        quantity: 55,
        roles: vec!["owner".into(), "admin".into()],
        note: Some("go go go".into()),
        ..Default::default()
    };
    let mut id = 0;
    Statement::new()
        .q("INSERT INTO weld_people")
        .q("(id, name, lastname, active, amount, amount_special, quantity, roles, note, created_at)")
        .q_args(
            "VALUES (DEFAULT, @name, @lastname, @active, @amount, @amount_special, @quantity, @roles, @note, DEFAULT)",
            &person,
        )
        .q("RETURNING id")
        .exec(executor, &mut id)
        .await
        .expect("Failed to insert the person");
    assert_eq!(id, 1);
    person.id = id;

    // Update from the record
    person.active = false;
    Statement::new()
        .q("UPDATE weld_people")
        .q_args("SET active = @active", &person)
        .q_args("WHERE id = @id", &person)
        .exec(executor, ())
        .await
        .expect("Failed to update the person");
    let mut active = true;
    Statement::new()
        .q("SELECT active")
        .q("FROM weld_people")
        .q_args("WHERE id = ?", (person.id,))
        .exec(executor, &mut active)
        .await
        .expect("Failed to select active");
    assert!(!active);

    // Array column
    person.roles = vec!["user".into()];
    Statement::new()
        .q("UPDATE weld_people")
        .q_args("SET roles = @roles", &person)
        .q_args("WHERE id = @id", &person)
        .exec(executor, ())
        .await
        .expect("Failed to update the roles");
    let mut roles = None::<Vec<String>>;
    Statement::new()
        .q("SELECT roles FROM weld_people")
        .q_args("WHERE id = ?", (person.id,))
        .exec(executor, &mut roles)
        .await
        .expect("Failed to select the roles");
    assert_eq!(roles.as_deref(), Some(&["user".to_string()][..]));

    // Whole record
    let mut found = Person::default();
    Statement::new()
        .q("SELECT *")
        .q("FROM weld_people")
        .q_args("WHERE id = ?", (1,))
        .q("LIMIT 1")
        .exec(executor, &mut found)
        .await
        .expect("Failed to select the person");
    assert_eq!(found.name, "Dominik");
    assert_eq!(found.lastname, "Linduska");
    assert_eq!(found.amount, 999.99);
    assert_eq!(found.quantity, 55);
    assert_eq!(found.roles, ["user"]);
    assert_eq!(found.note.as_deref(), Some("go go go"));
    assert!(found.created_at.is_some());

    // Named parameters from a map, keys are snake cased
    let values = HashMap::from([
        ("name".to_string(), "Maria".to_string()),
        ("lastName".to_string(), "Rossi".to_string()),
    ]);
    let mut id = 0;
    Statement::new()
        .q("INSERT INTO weld_people (name, lastname)")
        .q_args("VALUES (@name, @last_name)", &values)
        .q("RETURNING id")
        .exec(executor, &mut id)
        .await
        .expect("Failed to insert from a map");
    assert_eq!(id, 2);

    // Sequence of records, in cursor order
    let mut everyone = Vec::<Person>::new();
    Statement::new()
        .q("SELECT * FROM weld_people")
        .q_args("WHERE id IN (?)", (vec![1, 2],))
        .q("ORDER BY id")
        .exec(executor, &mut everyone)
        .await
        .expect("Failed to select everyone");
    assert_eq!(
        everyone.iter().map(|v| v.name.as_str()).collect::<Vec<_>>(),
        ["Dominik", "Maria"]
    );

    // One value per row
    let mut names = Vec::<String>::new();
    Statement::new()
        .q("SELECT name FROM weld_people ORDER BY id")
        .exec(executor, &mut names)
        .await
        .expect("Failed to select the names");
    assert_eq!(names, ["Dominik", "Maria"]);

    // Columns into a map
    let mut row = BTreeMap::<String, String>::new();
    Statement::new()
        .q("SELECT name, lastname FROM weld_people")
        .q_args("WHERE id = ?", (2,))
        .exec(executor, &mut row)
        .await
        .expect("Failed to select into a map");
    assert_eq!(row.get("lastname").map(String::as_str), Some("Rossi"));

    // Columns into separate variables
    let mut name = String::new();
    let mut quantity = 0;
    Statement::new()
        .q("SELECT name, quantity FROM weld_people")
        .q_args("WHERE id = ?", (1,))
        .exec(executor, (&mut name, &mut quantity))
        .await
        .expect("Failed to select into a tuple");
    assert_eq!((name.as_str(), quantity), ("Dominik", 55));
    let error = crate::silent_logs! {
        Statement::new()
            .q("SELECT name, quantity FROM weld_people")
            .exec(executor, (&mut name, &mut quantity))
            .await
            .expect_err("A tuple accepts a single row")
    };
    assert!(error.downcast_ref::<DecodeError>().is_some());

    // Count and delete
    let mut count = 0i64;
    Statement::new()
        .q("SELECT count(id)")
        .q("FROM weld_people")
        .exec(executor, &mut count)
        .await
        .expect("Failed to count");
    assert_eq!(count, 2);
    Statement::new()
        .q("DELETE FROM weld_people")
        .q_args("WHERE id = ?", (1,))
        .exec(executor, ())
        .await
        .expect("Failed to delete");
    Statement::new()
        .q("SELECT count(id) FROM weld_people")
        .exec(executor, &mut count)
        .await
        .expect("Failed to count");
    assert_eq!(count, 1);
}
