/// Convenience type to make error mapping cleaner in the application shell
pub type Result<T = ()> = anyhow::Result<T>;
