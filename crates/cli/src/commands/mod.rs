mod create_statement;
pub use create_statement::CreateStatementCommand;

mod verify_statement;
pub use verify_statement::VerifyStatementCommand;

mod generate_key;
pub use generate_key::GenerateKeyCommand;

mod register_statement;
pub use register_statement::RegisterStatementCommand;
