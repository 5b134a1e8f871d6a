/// Integration tests: SQLite persistence and the JSON-RPC surface
mod basic_integration;
mod server_workflow;
