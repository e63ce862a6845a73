//! CLI 命令实现

pub mod relay;
pub mod serve;
pub mod test;

pub use relay::relay_command;
pub use serve::serve_command;
pub use test::test_command;
