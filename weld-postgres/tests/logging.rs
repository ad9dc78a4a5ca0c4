mod init;

#[cfg(test)]
mod tests {
    use super::init::init;
    use log::{Level, LevelFilter, Log, Metadata};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use weld_core::{Connection, Statement};
    use weld_postgres::PostgresConnection;

    static ERRORS: AtomicUsize = AtomicUsize::new(0);

    struct ErrorCounter;

    impl Log for ErrorCounter {
        fn enabled(&self, metadata: &Metadata) -> bool {
            metadata.level() <= Level::Error
        }
        fn log(&self, record: &log::Record) {
            if self.enabled(record.metadata()) {
                ERRORS.fetch_add(1, Ordering::SeqCst);
            }
        }
        fn flush(&self) {}
    }

    static LOGGER: ErrorCounter = ErrorCounter;

    #[tokio::test]
    async fn failed_statement_is_logged_once() {
        log::set_logger(&LOGGER).expect("No other logger is installed in this binary");
        log::set_max_level(LevelFilter::Error);
        let (url, container) = init().await;
        let mut connection = PostgresConnection::connect(url.into())
            .await
            .expect("Could not connect");
        let statement = Statement::new().q("SELECT * FROM missing_table_for_weld_logs");

        let before = ERRORS.load(Ordering::SeqCst);
        let error = statement
            .exec(&mut connection, ())
            .await
            .expect_err("The table does not exist");
        assert!(format!("{error:#}").contains("missing_table_for_weld_logs"));
        assert_eq!(ERRORS.load(Ordering::SeqCst) - before, 1);

        let before = ERRORS.load(Ordering::SeqCst);
        let mut count = 0i64;
        statement
            .exec(&mut connection, &mut count)
            .await
            .expect_err("The table does not exist");
        assert_eq!(ERRORS.load(Ordering::SeqCst) - before, 1);
        drop(container);
    }
}
