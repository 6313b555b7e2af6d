#[macro_export]
macro_rules! log_failure {
    // Usage: log_failure!("add_notice", &err);
    ($context:expr, $err:expr) => {{
        ::log::error!(
            "{} failed at {}:{}: {}",
            $context,
            file!(),
            line!(),
            $err
        );
    }};
}
